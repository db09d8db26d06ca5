use linearmodels::{LinearModel, LinearModelError, metrics};
use ndarray::array;

fn main() -> Result<(), LinearModelError> {
    println!("=== Simple Linear Regression Example ===\n");

    // Create sample data: y = 2x + 3 + noise
    let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
    let y = array![5.1, 6.9, 9.2, 11.1, 12.8];

    println!("Training data:");
    println!("X: {:?}", x);
    println!("y: {:?}", y);

    let fitted = LinearModel::new().fit(&y, &x)?;
    let fittedvalues = fitted.fittedvalues().to_owned();
    let mse = metrics::mean_squared_error(&y, &fittedvalues)?;

    println!("\nResults:");
    println!("Intercept: {:.4}", fitted.params()[0]);
    println!("Slope: {:.4}", fitted.params()[1]);
    println!("R² score: {:.4}", fitted.rsquared());
    println!("MSE: {:.4}", mse);

    println!("\nFitted vs Actual:");
    for (i, ((fv, actual), resid)) in fittedvalues
        .iter()
        .zip(y.iter())
        .zip(fitted.resid().iter())
        .enumerate()
    {
        println!(
            "Sample {}: Fitted={:.2}, Actual={:.2}, Residual={:.2}",
            i + 1,
            fv,
            actual,
            resid
        );
    }

    // New inputs carry their own intercept column.
    let new_x = array![[1.0, 6.0], [1.0, 7.0]];
    let new_predictions = fitted.predict(&new_x)?;
    println!("\nPredictions on new data:");
    for (i, pred) in new_predictions.iter().enumerate() {
        println!("X={:.1}: Predicted y={:.2}", new_x[(i, 1)], pred);
    }

    // Duplicated predictors cannot be separated.
    let collinear = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
    match LinearModel::new().fit(&array![1.0, 2.0, 3.0], &collinear) {
        Err(err @ LinearModelError::RankDeficient { .. }) => println!("\nExpected failure: {}", err),
        other => println!("\nUnexpected outcome: {:?}", other.map(|f| f.params().to_owned())),
    }

    Ok(())
}
