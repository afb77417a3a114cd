//! Elasticities in the log-log model.
//!
//! In log y ~ log(x1) + x2 the coefficient on log(x1) is the elasticity of y
//! with respect to x1: a 1% change in x1 moves y by b1 percent, at any point.
//! The level-scale derivative b1*y/x1 varies with the point, but rescaling it
//! by x1/y always recovers b1.

use margins::prelude::*;
use margins::MarginsError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), MarginsError> {
    let dgp = Dgp::new(
        FunctionalForm::LogLog,
        0.2,
        terms! { "x1" => 0.8, "x2" => 0.1 },
        0.2,
    )
    .with_x1_range(0.5, 5.0);

    let mut rng = StdRng::seed_from_u64(7);
    let data = dgp.simulate(5_000, &mut rng)?;

    let model = FittedModel::fit(FunctionalForm::LogLog, &data)?;
    println!("{}\n", model);

    let coeffs = model.coefficients();
    println!("point        level effect   elasticity");
    for x1 in [0.5, 1.0, 2.0, 4.0] {
        let y_hat = model.predict(x1, 0.0)?;
        let level = FunctionalForm::LogLog
            .evaluate(coeffs, &EvaluationPoint::new(x1, 0.0).with_outcome(y_hat))?;
        let elasticity =
            FunctionalForm::LogLog.elasticity(coeffs, &EvaluationPoint::new(x1, 0.0))?;
        println!(
            "x1 = {:<4.1}   {:>12.4}   {:>10.4}",
            x1,
            level.value(),
            elasticity
        );
    }
    println!();

    let comparison = EffectComparison::compare(&model, &data, &AmeOptions::default())?;
    println!("{}", comparison);
    Ok(())
}
