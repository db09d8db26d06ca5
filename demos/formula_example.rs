use linearmodels::{DataFrame, LinearModel, LinearModelError};
use ndarray::array;

fn main() -> Result<(), LinearModelError> {
    println!("=== Formula Regression Example ===\n");

    // House prices against size and age; one row has a missing age.
    let data = DataFrame::new()
        .with_column("price", array![210.0, 340.0, 185.0, 420.0, 275.0, 305.0])?
        .with_column("size", array![80.0, 130.0, 70.0, 160.0, 105.0, 120.0])?
        .with_column("age", array![30.0, 5.0, 40.0, 2.0, f64::NAN, 12.0])?;

    let fitted = LinearModel::new().fit_from_formula("price ~ size + age", &data)?;

    println!("Observations used: {}", fitted.nobs());
    if let Some(names) = fitted.exog_names() {
        for (name, value) in names.iter().zip(fitted.params().iter()) {
            println!("{:>10}: {:>9.4}", name, value);
        }
    }
    println!("R² score: {:.4}", fitted.rsquared());
    println!("SSR: {:.4}", fitted.ssr());

    let no_intercept = LinearModel::new().fit_from_formula("price ~ size - 1", &data)?;
    println!("\nThrough the origin: price = {:.4} * size", no_intercept.params()[0]);

    match LinearModel::new().fit_from_formula("price ~ size + rooms", &data) {
        Err(err) => println!("\nExpected failure: {}", err),
        Ok(_) => println!("\nUnexpected success"),
    }

    Ok(())
}
