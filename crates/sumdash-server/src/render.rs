//! Server-side HTML for the dashboard pages.

use std::fmt::Write;

use sumdash_store::Dataset;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BRAND: &str = "ML2023 Dash Example A2 TUTORIAL";

/// Values shown on the `/model1` page.
#[derive(Debug, Default)]
pub struct ModelPageView<'a> {
    pub x_1: &'a str,
    pub x_2: &'a str,
    pub y_hardcode: String,
    pub y_model: String,
    pub dataset: Option<&'a Dataset>,
}

pub fn home_page() -> String {
    layout(
        "Home",
        r#"<h1>Welcome</h1>
<p>This dashboard predicts <code>y</code> from two inputs, where the true relation is <code>y = x_1 + x_2</code>.</p>
<p>Open <a href="/model1">Model 1</a> to compare a hardcoded formula against a trained linear regression model.</p>"#,
    )
}

pub fn model_page(view: &ModelPageView<'_>) -> String {
    let mut body = String::new();

    body.push_str(
        r#"<h1>The first Assignment sample</h1>
<p>There are two models to show. The goal is to predict y when the relation of y is y = x_1 + x_2.</p>
<p>The first model is basically a hardcoded y = x_1 + x_2. Very simple.</p>
<p>The second model is a LinearRegression model trained on a dataset, then used to predict y from an input x_1, x_2. A coef of [1, 1] shows that the model learned this relation.</p>
"#,
    );

    let _ = write!(
        body,
        r#"<form method="post" action="/model1" class="mb-3">
{x1}
{x2}
<div style="margin-top:10px">
<button type="submit" name="action" value="hardcode" class="btn btn-primary me-1">calculate y using hardcode</button>
<label class="form-label">y is: </label> <output id="y_hardcode">{y_hardcode}</output>
</div>
<div style="margin-top:10px">
<button type="submit" name="action" value="model" class="btn btn-primary me-1">calculate y using model</button>
<label class="form-label">y is: </label> <output id="y_model">{y_model}</output>
</div>
</form>
"#,
        x1 = number_input("x_1", view.x_1),
        x2 = number_input("x_2", view.x_2),
        y_hardcode = escape(&view.y_hardcode),
        y_model = escape(&view.y_model),
    );

    body.push_str("<h1>The Dataset used to train the model</h1>\n");
    match view.dataset {
        Some(ds) if !ds.columns.is_empty() => body.push_str(&dataset_table(ds)),
        _ => body.push_str("<p class=\"text-secondary\">Dataset unavailable.</p>\n"),
    }

    layout("Model 1", &body)
}

fn number_input(id: &str, value: &str) -> String {
    format!(
        r#"<div class="mb-3">
<label class="form-label" for="{id}">{id}</label>
<input class="form-control" id="{id}" name="{id}" type="number" step="any" placeholder="Put a value for {id}" value="{value}">
<div class="form-text text-secondary">This is the value for {id}</div>
</div>"#,
        id = id,
        value = escape(value),
    )
}

fn dataset_table(ds: &Dataset) -> String {
    let mut html = String::from(
        "<table class=\"table table-striped table-bordered table-hover table-sm\">\n<thead><tr>",
    );
    for column in &ds.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &ds.rows {
        html.push_str("<tr>");
        for value in row {
            let _ = write!(html, "<td>{}</td>", value);
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    format!("<div class=\"table-responsive\">\n{}</div>\n", html)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | sumdash</title>
<link rel="stylesheet" href="{css}">
</head>
<body>
<nav class="navbar navbar-expand navbar-dark bg-primary mb-3">
<div class="container-fluid">
<a class="navbar-brand" href="/">{brand}</a>
<ul class="navbar-nav">
<li class="nav-item"><a class="nav-link" href="/">Home</a></li>
<li class="nav-item"><a class="nav-link" href="/model1">Model 1</a></li>
</ul>
</div>
</nav>
<main class="container-fluid">
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        css = BOOTSTRAP_CSS,
        brand = BRAND,
        body = body,
    )
}

/// Escapes text for HTML element and attribute content.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_model_page_echoes_inputs() {
        let view = ModelPageView {
            x_1: "1",
            x_2: "2",
            y_hardcode: "3".into(),
            ..Default::default()
        };
        let html = model_page(&view);
        assert!(html.contains(r#"name="x_1" type="number" step="any" placeholder="Put a value for x_1" value="1""#));
        assert!(html.contains(r#"<output id="y_hardcode">3</output>"#));
        assert!(html.contains(r#"<output id="y_model"></output>"#));
        assert!(html.contains("Dataset unavailable."));
    }

    #[test]
    fn test_dataset_table() {
        let ds = Dataset::parse("x1,x2,y\n1,2,3\n").unwrap();
        let view = ModelPageView { dataset: Some(&ds), ..Default::default() };
        let html = model_page(&view);
        assert!(html.contains("<th>x1</th><th>x2</th><th>y</th>"));
        assert!(html.contains("<td>1</td><td>2</td><td>3</td>"));
    }

    #[test]
    fn test_home_page_navbar() {
        let html = home_page();
        assert!(html.contains(BRAND));
        assert!(html.contains(r#"href="/model1">Model 1</a>"#));
    }
}
