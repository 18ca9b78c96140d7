//! Fit a model on a small dataset, save it, load it back and compare both paths.
//!
//! Run with: cargo run --example fit_and_predict

use sumdash::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // y = x1 + x2
    let dataset = Dataset::parse("x1,x2,y\n1,2,3\n2,2,4\n3,1,4\n0,5,5\n4,4,8\n")?;

    let frame = dataset.features(&FEATURE_COLUMNS)?;
    let model = LinearModel::fit(&frame, &dataset.column(TARGET_COLUMN)?)?;

    // Round-trip through the store
    let dir = std::env::temp_dir().join("sumdash-example");
    let path = dir.join("myModel.json");
    save(&path, &model)?;
    let model = load_model(&path)?;

    let input = InputPair::new(1.0, 2.0);
    println!("hardcode: y is {}", compute_sum_hardcoded(&input)?);
    println!("model:   {}", ModelReport::run(&model, &input)?);

    Ok(())
}
