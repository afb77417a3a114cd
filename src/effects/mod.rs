//! Analytical marginal effects for linear regression functional forms
//!
//! A fitted linear model maps coefficients to effects on the original outcome
//! scale differently depending on how outcome and covariates were transformed
//! before fitting. This module enumerates the supported transformations as
//! [`FunctionalForm`] and computes the exact derivative of the outcome with
//! respect to `x1` from a [`CoefficientSet`] at an [`EvaluationPoint`].
//!
//! The evaluator is a pure function of its arguments: it holds no state and
//! reports every precondition violation to the caller as an [`EffectError`]
//! rather than substituting a default value.
//!
//! | Form | Model | d(outcome)/dx1 |
//! |------|-------|----------------|
//! | Linear | y = β₁x₁ + β₂x₂ | β₁ |
//! | Interaction | y = β₁x₁ + β₂x₂ + β₁₂x₁x₂ | β₁ + β₁₂x₂ |
//! | LogOutcome | log y = β₁x₁ + β₂x₂ | β₁ (log scale), β₁y (level scale) |
//! | LogCovariate | y = β₁log x₁ + β₂x₂ | β₁/x₁ |
//! | LogLog | log y = β₁log x₁ + β₂x₂ | β₁/x₁ (log scale), β₁y/x₁ (level scale) |

use std::fmt;

use serde::{Deserialize, Serialize};

mod coefficients;
mod error;

pub mod ame;

pub use coefficients::CoefficientSet;
pub use error::EffectError;

/// Term name of the covariate the marginal effect is taken with respect to
pub const TERM_X1: &str = "x1";
/// Term name of the second covariate
pub const TERM_X2: &str = "x2";
/// Term name of the interaction between the two covariates
pub const TERM_INTERACTION: &str = "x1:x2";

/// How outcome and covariates were transformed before linear fitting
///
/// The set of forms is closed by design: arbitrary formula parsing is out of
/// scope, and every consumer of this crate dispatches on these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionalForm {
    /// y ~ x1 + x2
    Linear,
    /// y ~ x1 * x2 (main effects plus the x1:x2 product)
    Interaction,
    /// log(y) ~ x1 + x2
    LogOutcome,
    /// y ~ log(x1) + x2
    LogCovariate,
    /// log(y) ~ log(x1) + x2
    LogLog,
}

impl FunctionalForm {
    /// Terms that must be present in a [`CoefficientSet`] for evaluation
    ///
    /// These are the terms the contract of each form references. The
    /// interaction form's derivative does not involve the `x2` main effect,
    /// so `x2` is not required there even though a fitted `y ~ x1 * x2`
    /// model will carry it.
    pub fn required_terms(&self) -> &'static [&'static str] {
        match self {
            FunctionalForm::Interaction => &[TERM_X1, TERM_INTERACTION],
            _ => &[TERM_X1, TERM_X2],
        }
    }

    /// Terms of the full regression model implied by this form, in design
    /// matrix order (the intercept is implicit)
    pub fn model_terms(&self) -> &'static [&'static str] {
        match self {
            FunctionalForm::Interaction => &[TERM_X1, TERM_X2, TERM_INTERACTION],
            _ => &[TERM_X1, TERM_X2],
        }
    }

    /// Whether the outcome enters the model on the log scale
    pub fn is_log_outcome(&self) -> bool {
        matches!(self, FunctionalForm::LogOutcome | FunctionalForm::LogLog)
    }

    /// Whether `x1` enters the model log-transformed
    pub fn logs_covariate(&self) -> bool {
        matches!(self, FunctionalForm::LogCovariate | FunctionalForm::LogLog)
    }

    /// Compute the exact marginal effect d(outcome)/dx1 at `point`
    ///
    /// For the log-outcome forms the result depends on what the evaluation
    /// point carries: with an outcome level the derivative is converted to
    /// the level scale (β₁y, β₁y/x₁), without one it stays on the log scale
    /// (β₁, β₁/x₁). The returned [`MarginalEffect`] is tagged accordingly,
    /// so the two cases are never confused.
    ///
    /// # Errors
    ///
    /// - [`EffectError::MissingTerm`] if `coeffs` lacks a required term
    /// - [`EffectError::Domain`] if `x1 ≤ 0` under a log-covariate form, or
    ///   if a supplied outcome level is non-positive under a log-outcome form
    pub fn evaluate(
        &self,
        coeffs: &CoefficientSet,
        point: &EvaluationPoint,
    ) -> Result<MarginalEffect, EffectError> {
        for term in self.required_terms() {
            coeffs.require(*self, term)?;
        }
        if self.logs_covariate() && point.x1() <= 0.0 {
            return Err(EffectError::Domain {
                form: *self,
                quantity: TERM_X1,
                value: point.x1(),
            });
        }

        let b1 = coeffs.require(*self, TERM_X1)?;

        match self {
            FunctionalForm::Linear => Ok(MarginalEffect::level(b1)),
            FunctionalForm::Interaction => {
                let b12 = coeffs.require(*self, TERM_INTERACTION)?;
                Ok(MarginalEffect::level(b1 + b12 * point.x2()))
            }
            FunctionalForm::LogCovariate => Ok(MarginalEffect::level(b1 / point.x1())),
            FunctionalForm::LogOutcome => match point.outcome() {
                Some(y) => {
                    self.check_outcome(y)?;
                    Ok(MarginalEffect::level(b1 * y))
                }
                None => Ok(MarginalEffect::log(b1)),
            },
            FunctionalForm::LogLog => match point.outcome() {
                Some(y) => {
                    self.check_outcome(y)?;
                    Ok(MarginalEffect::level(b1 * y / point.x1()))
                }
                None => Ok(MarginalEffect::log(b1 / point.x1())),
            },
        }
    }

    /// Compute the elasticity of the outcome with respect to `x1` at `point`
    ///
    /// For [`FunctionalForm::LogLog`] this is exactly β₁, independent of the
    /// evaluation point. For all other forms it is the level-scale marginal
    /// effect rescaled by `x1/y`, which requires an outcome level on the
    /// point.
    pub fn elasticity(
        &self,
        coeffs: &CoefficientSet,
        point: &EvaluationPoint,
    ) -> Result<f64, EffectError> {
        if let FunctionalForm::LogLog = self {
            for term in self.required_terms() {
                coeffs.require(*self, term)?;
            }
            if point.x1() <= 0.0 {
                return Err(EffectError::Domain {
                    form: *self,
                    quantity: TERM_X1,
                    value: point.x1(),
                });
            }
            return coeffs.require(*self, TERM_X1);
        }

        let y = point
            .outcome()
            .ok_or(EffectError::MissingOutcome { form: *self })?;
        if y == 0.0 {
            return Err(EffectError::Domain {
                form: *self,
                quantity: "y",
                value: y,
            });
        }
        let effect = self.evaluate(coeffs, point)?;
        Ok(effect.value() * point.x1() / y)
    }

    fn check_outcome(&self, y: f64) -> Result<(), EffectError> {
        if y <= 0.0 {
            return Err(EffectError::Domain {
                form: *self,
                quantity: "y",
                value: y,
            });
        }
        Ok(())
    }
}

impl fmt::Display for FunctionalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionalForm::Linear => "linear",
            FunctionalForm::Interaction => "interaction",
            FunctionalForm::LogOutcome => "log-outcome",
            FunctionalForm::LogCovariate => "log-covariate",
            FunctionalForm::LogLog => "log-log",
        };
        write!(f, "{}", name)
    }
}

/// Scale a marginal effect is expressed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectScale {
    /// d(y)/dx1 on the original outcome scale
    Level,
    /// d(log y)/dx1
    Log,
}

impl fmt::Display for EffectScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectScale::Level => write!(f, "level"),
            EffectScale::Log => write!(f, "log"),
        }
    }
}

/// A marginal effect tagged with the scale it is expressed on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginalEffect {
    value: f64,
    scale: EffectScale,
}

impl MarginalEffect {
    /// A level-scale effect, d(y)/dx1
    pub fn level(value: f64) -> Self {
        Self {
            value,
            scale: EffectScale::Level,
        }
    }

    /// A log-scale effect, d(log y)/dx1
    pub fn log(value: f64) -> Self {
        Self {
            value,
            scale: EffectScale::Log,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn scale(&self) -> EffectScale {
        self.scale
    }

    pub fn is_level(&self) -> bool {
        self.scale == EffectScale::Level
    }
}

impl fmt::Display for MarginalEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} ({} scale)", self.value, self.scale)
    }
}

/// Covariate values at which a derivative is evaluated
///
/// The outcome level is optional; it is only consumed by the log-outcome
/// forms when converting a log-scale derivative to the level scale, and by
/// elasticity computations outside the log-log form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPoint {
    x1: f64,
    x2: f64,
    outcome: Option<f64>,
}

impl EvaluationPoint {
    pub fn new(x1: f64, x2: f64) -> Self {
        Self {
            x1,
            x2,
            outcome: None,
        }
    }

    /// Attach the outcome level at this point
    pub fn with_outcome(mut self, y: f64) -> Self {
        self.outcome = Some(y);
        self
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn outcome(&self) -> Option<f64> {
        self.outcome
    }
}
