//! Dashboard page handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Form;
use tracing::info;

use crate::dto::{FormAction, FormSubmission};
use crate::render::{self, ModelPageView};
use crate::services::predict as predict_service;
use crate::ServerState;

/// GET / - Home page.
pub async fn home() -> Html<String> {
    Html(render::home_page())
}

/// GET /model1 - Empty form plus the training dataset.
pub async fn model1(State(state): State<Arc<ServerState>>) -> Html<String> {
    let view = ModelPageView {
        dataset: Some(&state.dataset),
        ..Default::default()
    };
    Html(render::model_page(&view))
}

/// POST /model1 - Runs the chosen prediction path and re-renders the page.
///
/// Errors are shown in the output slot of the button that was pressed.
pub async fn model1_submit(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<FormSubmission>,
) -> (StatusCode, Html<String>) {
    let input = form.input();
    info!("Form submit: action={:?} x_1={:?} x_2={:?}", form.action, form.x_1, form.x_2);

    let mut view = ModelPageView {
        x_1: &form.x_1,
        x_2: &form.x_2,
        dataset: Some(&state.dataset),
        ..Default::default()
    };

    let status = match form.action {
        FormAction::Hardcode => match predict_service::hardcoded(&input) {
            Ok(y) => {
                view.y_hardcode = y.to_string();
                StatusCode::OK
            }
            Err(e) => {
                view.y_hardcode = format!("error: {}", e.message());
                e.status()
            }
        },
        FormAction::Model => match predict_service::model(&state, &input).await {
            Ok(report) => {
                view.y_model = report.to_string();
                StatusCode::OK
            }
            Err(e) => {
                view.y_model = format!("error: {}", e.message());
                e.status()
            }
        },
    };

    (status, Html(render::model_page(&view)))
}
