//! Ordinary least-squares fitting of the supported functional forms
//!
//! [`FittedModel::fit`] builds the design matrix a [`FunctionalForm`]
//! implies (intercept column always included, transforms applied to outcome
//! and covariates), solves the least-squares problem with nalgebra's SVD,
//! and returns the estimated [`CoefficientSet`] together with the usual fit
//! summaries. Estimation itself is delegated entirely to nalgebra; this
//! module owns only the form-to-design mapping and its validation.

use std::fmt;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Dataset;
use crate::effects::{CoefficientSet, EffectError, FunctionalForm, TERM_INTERACTION, TERM_X1, TERM_X2};

/// Errors that can occur while fitting a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Too few samples for the number of parameters
    #[error("fitting the {form} form needs at least {needed} samples, got {got}")]
    NotEnoughSamples {
        form: FunctionalForm,
        needed: usize,
        got: usize,
    },

    /// A log transform was requested on a non-positive value
    #[error("the {form} form requires {column} > 0, but row {row} has {value}")]
    NonPositive {
        form: FunctionalForm,
        column: &'static str,
        row: usize,
        value: f64,
    },

    /// The design matrix is rank deficient
    #[error("design matrix is rank deficient; covariates may be collinear or constant")]
    SingularDesign,
}

/// A fitted linear model: form, coefficients and fit summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    form: FunctionalForm,
    intercept: f64,
    coefficients: CoefficientSet,
    r_squared: f64,
    residual_variance: f64,
    n: usize,
}

impl FittedModel {
    /// Fit `form` to `data` by ordinary least squares
    ///
    /// The outcome and `x1` are log-transformed as the form dictates; both
    /// must be strictly positive wherever a log is taken. `R²` and the
    /// residual variance are reported on the scale the model is linear in
    /// (the log scale for log-outcome forms).
    ///
    /// # Errors
    ///
    /// - [`FitError::NotEnoughSamples`] when `data.len() ≤` parameter count
    /// - [`FitError::NonPositive`] when a log transform hits a value ≤ 0
    /// - [`FitError::SingularDesign`] when the design is rank deficient
    pub fn fit(form: FunctionalForm, data: &Dataset) -> Result<Self, FitError> {
        let terms = form.model_terms();
        let p = terms.len() + 1; // including the intercept
        let n = data.len();
        if n < p + 1 {
            return Err(FitError::NotEnoughSamples {
                form,
                needed: p + 1,
                got: n,
            });
        }

        for (row, s) in data.iter().enumerate() {
            if form.logs_covariate() && s.x1 <= 0.0 {
                return Err(FitError::NonPositive {
                    form,
                    column: "x1",
                    row,
                    value: s.x1,
                });
            }
            if form.is_log_outcome() && s.y <= 0.0 {
                return Err(FitError::NonPositive {
                    form,
                    column: "y",
                    row,
                    value: s.y,
                });
            }
        }

        let design = DMatrix::from_fn(n, p, |i, j| {
            let s = &data.samples()[i];
            let t1 = if form.logs_covariate() {
                s.x1.ln()
            } else {
                s.x1
            };
            match j {
                0 => 1.0,
                1 => t1,
                2 => s.x2,
                _ => t1 * s.x2, // interaction column
            }
        });
        let outcome = DVector::from_fn(n, |i, _| {
            let y = data.samples()[i].y;
            if form.is_log_outcome() {
                y.ln()
            } else {
                y
            }
        });

        let svd = design.clone().svd(true, true);
        if svd.rank(1e-10) < p {
            return Err(FitError::SingularDesign);
        }
        let beta = svd
            .solve(&outcome, 1e-10)
            .map_err(|_| FitError::SingularDesign)?;

        let residuals = &outcome - &design * &beta;
        let ssr: f64 = residuals.iter().map(|r| r * r).sum();
        let mean = outcome.mean();
        let sst: f64 = outcome.iter().map(|y| (y - mean) * (y - mean)).sum();
        let r_squared = if sst > 0.0 { 1.0 - ssr / sst } else { 0.0 };
        let residual_variance = ssr / (n - p) as f64;

        let coefficients = terms
            .iter()
            .enumerate()
            .map(|(j, term)| (*term, beta[j + 1]))
            .collect();

        Ok(Self {
            form,
            intercept: beta[0],
            coefficients,
            r_squared,
            residual_variance,
            n,
        })
    }

    pub fn form(&self) -> FunctionalForm {
        self.form
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    /// Coefficient of determination on the fitted scale
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Residual variance on the fitted scale
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// Number of samples the model was fitted on
    pub fn n(&self) -> usize {
        self.n
    }

    /// Predicted outcome on the level scale at `(x1, x2)`
    ///
    /// Log-outcome forms exponentiate the linear predictor, so the result is
    /// always comparable to observed `y` values.
    pub fn predict(&self, x1: f64, x2: f64) -> Result<f64, EffectError> {
        if self.form.logs_covariate() && x1 <= 0.0 {
            return Err(EffectError::Domain {
                form: self.form,
                quantity: TERM_X1,
                value: x1,
            });
        }
        let b1 = self.coefficients.require(self.form, TERM_X1)?;
        let b2 = self.coefficients.require(self.form, TERM_X2)?;
        let t1 = if self.form.logs_covariate() {
            x1.ln()
        } else {
            x1
        };
        let mut eta = self.intercept + b1 * t1 + b2 * x2;
        if let FunctionalForm::Interaction = self.form {
            let b12 = self.coefficients.require(self.form, TERM_INTERACTION)?;
            eta += b12 * x1 * x2;
        }
        if self.form.is_log_outcome() {
            Ok(eta.exp())
        } else {
            Ok(eta)
        }
    }
}

impl fmt::Display for FittedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} model fitted on {} samples", self.form, self.n)?;
        writeln!(f, "  intercept   {:>12.6}", self.intercept)?;
        for term in self.form.model_terms() {
            if let Some(value) = self.coefficients.get(term) {
                writeln!(f, "  {:<12}{:>12.6}", term, value)?;
            }
        }
        write!(f, "  R²          {:>12.4}", self.r_squared)
    }
}
