//! Data-generating processes for synthetic regression data
//!
//! A [`Dgp`] declares the true model a dataset is drawn from: a functional
//! form, an intercept, the true coefficients, a Gaussian noise level, and
//! uniform sampling ranges for the two covariates. Noise is added on the
//! scale the form is linear in, so for the log-outcome forms the disturbance
//! enters `log y` and the observed outcome stays strictly positive.

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{Dataset, Sample};
use crate::effects::{CoefficientSet, EffectError, FunctionalForm, TERM_INTERACTION, TERM_X1, TERM_X2};

/// Errors raised by an invalid simulation setup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DgpError {
    /// The declared true model lacks a term its form requires
    #[error(transparent)]
    Effect(#[from] EffectError),

    /// The noise standard deviation must be strictly positive
    #[error("noise standard deviation must be positive, got {0}")]
    InvalidNoiseSd(f64),

    /// A covariate sampling range is empty or inverted
    #[error("invalid {covariate} range [{low}, {high}]")]
    InvalidRange {
        covariate: &'static str,
        low: f64,
        high: f64,
    },

    /// Log-covariate forms need a strictly positive x1 support
    #[error("the {form} form requires a strictly positive x1 range, got [{low}, {high}]")]
    NonPositiveSupport {
        form: FunctionalForm,
        low: f64,
        high: f64,
    },

    /// Zero samples were requested
    #[error("cannot simulate an empty dataset")]
    EmptyDataset,
}

/// A declared true model to simulate from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dgp {
    form: FunctionalForm,
    intercept: f64,
    coefficients: CoefficientSet,
    noise_sd: f64,
    x1_range: (f64, f64),
    x2_range: (f64, f64),
}

impl Dgp {
    /// Declare a true model
    ///
    /// `coefficients` must contain every model term of `form` (`x1`, `x2`,
    /// and `x1:x2` for the interaction form). Covariates default to
    /// `x1 ∈ [0.5, 5.0]` and `x2 ∈ [-2.0, 2.0]`; override with
    /// [`with_x1_range`](Self::with_x1_range) and
    /// [`with_x2_range`](Self::with_x2_range).
    pub fn new(
        form: FunctionalForm,
        intercept: f64,
        coefficients: CoefficientSet,
        noise_sd: f64,
    ) -> Self {
        Self {
            form,
            intercept,
            coefficients,
            noise_sd,
            x1_range: (0.5, 5.0),
            x2_range: (-2.0, 2.0),
        }
    }

    pub fn with_x1_range(mut self, low: f64, high: f64) -> Self {
        self.x1_range = (low, high);
        self
    }

    pub fn with_x2_range(mut self, low: f64, high: f64) -> Self {
        self.x2_range = (low, high);
        self
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

    pub fn noise_sd(&self) -> f64 {
        self.noise_sd
    }

    fn validate(&self) -> Result<(), DgpError> {
        for term in self.form.model_terms() {
            self.coefficients.require(self.form, term)?;
        }
        if !(self.noise_sd > 0.0) {
            return Err(DgpError::InvalidNoiseSd(self.noise_sd));
        }
        for (name, (low, high)) in [("x1", self.x1_range), ("x2", self.x2_range)] {
            if !(low < high) || !low.is_finite() || !high.is_finite() {
                return Err(DgpError::InvalidRange {
                    covariate: name,
                    low,
                    high,
                });
            }
        }
        if self.form.logs_covariate() && self.x1_range.0 <= 0.0 {
            return Err(DgpError::NonPositiveSupport {
                form: self.form,
                low: self.x1_range.0,
                high: self.x1_range.1,
            });
        }
        Ok(())
    }

    /// The noiseless value of the linear predictor at `(x1, x2)`
    ///
    /// This is `E[y]` for the level-outcome forms and `E[log y]` for the
    /// log-outcome forms.
    pub fn linear_predictor(&self, x1: f64, x2: f64) -> Result<f64, EffectError> {
        if self.form.logs_covariate() && x1 <= 0.0 {
            return Err(EffectError::Domain {
                form: self.form,
                quantity: TERM_X1,
                value: x1,
            });
        }
        let b1 = self.coefficients.require(self.form, TERM_X1)?;
        let b2 = self.coefficients.require(self.form, TERM_X2)?;
        let eta = match self.form {
            FunctionalForm::Linear | FunctionalForm::LogOutcome => {
                self.intercept + b1 * x1 + b2 * x2
            }
            FunctionalForm::Interaction => {
                let b12 = self.coefficients.require(self.form, TERM_INTERACTION)?;
                self.intercept + b1 * x1 + b2 * x2 + b12 * x1 * x2
            }
            FunctionalForm::LogCovariate | FunctionalForm::LogLog => {
                self.intercept + b1 * x1.ln() + b2 * x2
            }
        };
        Ok(eta)
    }

    /// Draw `n` samples from the declared model
    ///
    /// # Errors
    ///
    /// Fails with a [`DgpError`] when the configuration is invalid or
    /// `n == 0`; sampling itself cannot fail once validation passes.
    pub fn simulate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Dataset, DgpError> {
        self.validate()?;
        if n == 0 {
            return Err(DgpError::EmptyDataset);
        }

        let x1_dist = Uniform::new(self.x1_range.0, self.x1_range.1).map_err(|_| {
            DgpError::InvalidRange {
                covariate: "x1",
                low: self.x1_range.0,
                high: self.x1_range.1,
            }
        })?;
        let x2_dist = Uniform::new(self.x2_range.0, self.x2_range.1).map_err(|_| {
            DgpError::InvalidRange {
                covariate: "x2",
                low: self.x2_range.0,
                high: self.x2_range.1,
            }
        })?;
        let noise = Normal::new(0.0, self.noise_sd)
            .map_err(|_| DgpError::InvalidNoiseSd(self.noise_sd))?;

        let mut samples = Vec::with_capacity(n);
        for _ in 0..n {
            let x1 = x1_dist.sample(rng);
            let x2 = x2_dist.sample(rng);
            let eta = self.linear_predictor(x1, x2)? + noise.sample(rng);
            let y = if self.form.is_log_outcome() {
                eta.exp()
            } else {
                eta
            };
            samples.push(Sample::new(x1, x2, y));
        }
        Ok(Dataset::new(samples))
    }
}
