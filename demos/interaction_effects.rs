//! Marginal effects under an interaction term.
//!
//! Simulates y = 1 + x1 + 0.5*x2 + 10*x1*x2 + noise, fits the interaction
//! model, and compares the finite-difference AME of x1 with the closed-form
//! derivative b1 + b12*x2 averaged over the sample.

use margins::prelude::*;
use margins::MarginsError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), MarginsError> {
    let dgp = Dgp::new(
        FunctionalForm::Interaction,
        1.0,
        terms! { "x1" => 1.0, "x2" => 0.5, "x1:x2" => 10.0 },
        0.5,
    )
    .with_x2_range(0.0, 1.0);

    let mut rng = StdRng::seed_from_u64(42);
    let data = dgp.simulate(5_000, &mut rng)?;

    let model = FittedModel::fit(FunctionalForm::Interaction, &data)?;
    println!("{}\n", model);

    // The effect of x1 depends on where in x2 you evaluate it.
    for x2 in [0.0, 0.5, 1.0] {
        let effect = FunctionalForm::Interaction
            .evaluate(model.coefficients(), &EvaluationPoint::new(1.0, x2))?;
        println!("effect of x1 at x2 = {:.1}: {:.4}", x2, effect.value());
    }
    println!();

    let comparison = EffectComparison::compare(&model, &data, &AmeOptions::default())?;
    println!("{}", comparison);

    println!("\nas JSON:");
    println!(
        "{}",
        serde_json::to_string_pretty(&comparison).expect("comparison serializes")
    );
    Ok(())
}
