//! End-to-end validation: simulate from a known model, fit it, and check the
//! numerical average marginal effect against the closed-form derivative.

use approx::assert_relative_eq;
use margins::prelude::*;
use margins::MarginsError;
use rand::rngs::StdRng;
use rand::SeedableRng;

const N: usize = 4_000;

/// Simulate, fit and compare for one form; returns the fitted model and the
/// comparison so individual tests can add form-specific assertions.
fn run(
    dgp: &Dgp,
    seed: u64,
) -> Result<(FittedModel, EffectComparison), MarginsError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = dgp.simulate(N, &mut rng)?;
    let model = FittedModel::fit(dgp.form(), &data)?;
    let comparison = EffectComparison::compare(&model, &data, &AmeOptions::default())?;
    Ok((model, comparison))
}

/// Both AME estimates derive from the same fitted model, so they must agree
/// far more tightly than either agrees with the truth.
fn assert_estimates_agree(cmp: &EffectComparison) {
    assert!(cmp.analytical.is_level());
    assert!(cmp.numerical.is_level());
    assert!(
        cmp.relative_difference().unwrap_or(cmp.absolute_difference()) < 1e-5,
        "numerical and analytical AME diverge: {}",
        cmp
    );
}

#[test]
fn linear_ame_recovers_the_true_slope() {
    let dgp = Dgp::new(
        FunctionalForm::Linear,
        1.0,
        terms! { "x1" => 2.0, "x2" => -0.5 },
        0.05,
    );
    let (model, cmp) = run(&dgp, 1).unwrap();

    assert_estimates_agree(&cmp);
    // The linear AME is the coefficient itself, up to summation rounding.
    assert_relative_eq!(
        cmp.analytical.value(),
        model.coefficients().get("x1").unwrap(),
        max_relative = 1e-12
    );
    assert_relative_eq!(cmp.analytical.value(), 2.0, epsilon = 0.05);
}

#[test]
fn interaction_ame_tracks_the_mean_of_x2() {
    let dgp = Dgp::new(
        FunctionalForm::Interaction,
        1.0,
        terms! { "x1" => 1.0, "x2" => 0.5, "x1:x2" => 10.0 },
        0.05,
    )
    .with_x2_range(0.0, 1.0);
    let (model, cmp) = run(&dgp, 2).unwrap();

    assert_estimates_agree(&cmp);
    // E[x2] = 0.5, so the true AME is 1 + 10 * 0.5 = 6.
    assert_relative_eq!(cmp.analytical.value(), 6.0, epsilon = 0.1);

    // The pointwise effect at x2 = 0.5 matches the spec'd example exactly.
    let effect = FunctionalForm::Interaction
        .evaluate(
            model.coefficients(),
            &EvaluationPoint::new(1.0, 0.5),
        )
        .unwrap();
    assert_relative_eq!(effect.value(), 6.0, epsilon = 0.1);
}

#[test]
fn log_outcome_ame_scales_with_the_outcome_level() {
    let dgp = Dgp::new(
        FunctionalForm::LogOutcome,
        0.5,
        terms! { "x1" => 0.3, "x2" => 0.1 },
        0.05,
    )
    .with_x1_range(0.5, 2.0);
    let (model, cmp) = run(&dgp, 3).unwrap();

    assert_estimates_agree(&cmp);
    assert_relative_eq!(model.coefficients().get("x1").unwrap(), 0.3, epsilon = 0.02);

    // Level effect = log effect * y at any point with a known outcome.
    let coeffs = model.coefficients();
    let log_effect = FunctionalForm::LogOutcome
        .evaluate(coeffs, &EvaluationPoint::new(1.0, 0.0))
        .unwrap();
    let level_effect = FunctionalForm::LogOutcome
        .evaluate(coeffs, &EvaluationPoint::new(1.0, 0.0).with_outcome(3.0))
        .unwrap();
    assert_relative_eq!(level_effect.value(), log_effect.value() * 3.0);
}

#[test]
fn log_covariate_ame_recovers_b1_over_x1() {
    let dgp = Dgp::new(
        FunctionalForm::LogCovariate,
        1.0,
        terms! { "x1" => 1.5, "x2" => 0.2 },
        0.05,
    )
    .with_x1_range(1.0, 4.0);
    let (model, cmp) = run(&dgp, 4).unwrap();

    assert_estimates_agree(&cmp);
    let b1 = model.coefficients().get("x1").unwrap();
    assert_relative_eq!(b1, 1.5, epsilon = 0.05);

    let effect = FunctionalForm::LogCovariate
        .evaluate(model.coefficients(), &EvaluationPoint::new(2.0, 0.0))
        .unwrap();
    assert_relative_eq!(effect.value(), b1 / 2.0);
}

#[test]
fn log_log_elasticity_is_the_fitted_coefficient() {
    let dgp = Dgp::new(
        FunctionalForm::LogLog,
        0.2,
        terms! { "x1" => 0.8, "x2" => 0.1 },
        0.05,
    )
    .with_x1_range(0.5, 5.0);
    let (model, cmp) = run(&dgp, 5).unwrap();

    assert_estimates_agree(&cmp);
    let b1 = model.coefficients().get("x1").unwrap();
    assert_relative_eq!(b1, 0.8, epsilon = 0.05);

    // Elasticity is point-independent and equals b1 exactly.
    for (x1, x2) in [(0.7, 0.0), (2.0, 1.5), (4.5, -1.0)] {
        let e = FunctionalForm::LogLog
            .elasticity(model.coefficients(), &EvaluationPoint::new(x1, x2))
            .unwrap();
        assert_relative_eq!(e, b1);
    }

    // Level effect rescaled by x1/y gives the elasticity back.
    let y_hat = model.predict(2.0, 1.0).unwrap();
    let level = FunctionalForm::LogLog
        .evaluate(
            model.coefficients(),
            &EvaluationPoint::new(2.0, 1.0).with_outcome(y_hat),
        )
        .unwrap();
    assert_relative_eq!(level.value() * 2.0 / y_hat, b1, max_relative = 1e-12);
}

#[test]
fn refitting_a_simulated_dataset_is_deterministic() {
    let dgp = Dgp::new(
        FunctionalForm::Linear,
        0.0,
        terms! { "x1" => 1.0, "x2" => 1.0 },
        0.5,
    );
    let (model_a, _) = run(&dgp, 99).unwrap();
    let (model_b, _) = run(&dgp, 99).unwrap();
    assert_eq!(model_a, model_b);
}
