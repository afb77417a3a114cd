//! Comparison of numerical and analytical average marginal effects

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::effects::ame::{average_analytical_effect, average_marginal_effect, AmeOptions};
use crate::effects::{EffectError, FunctionalForm, MarginalEffect};
use crate::fit::FittedModel;

/// Side-by-side comparison of the two AME estimates for one fitted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectComparison {
    /// Functional form of the compared model
    pub form: FunctionalForm,
    /// Number of samples averaged over
    pub n: usize,
    /// Exact effect from the closed-form derivative
    pub analytical: MarginalEffect,
    /// Finite-difference estimate
    pub numerical: MarginalEffect,
}

impl EffectComparison {
    /// Compute both averages over `data` and pair them up
    pub fn compare(
        model: &FittedModel,
        data: &Dataset,
        options: &AmeOptions,
    ) -> Result<Self, EffectError> {
        Ok(Self {
            form: model.form(),
            n: data.len(),
            analytical: average_analytical_effect(model, data)?,
            numerical: average_marginal_effect(model, data, options)?,
        })
    }

    /// |numerical − analytical|
    pub fn absolute_difference(&self) -> f64 {
        (self.numerical.value() - self.analytical.value()).abs()
    }

    /// Absolute difference relative to the analytical effect
    ///
    /// `None` when the analytical effect is zero.
    pub fn relative_difference(&self) -> Option<f64> {
        let reference = self.analytical.value();
        if reference == 0.0 {
            None
        } else {
            Some(self.absolute_difference() / reference.abs())
        }
    }
}

impl fmt::Display for EffectComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average marginal effect of x1 ({} form, n = {})", self.form, self.n)?;
        writeln!(f, "  analytical  {:>14.8}", self.analytical.value())?;
        writeln!(f, "  numerical   {:>14.8}", self.numerical.value())?;
        match self.relative_difference() {
            Some(rel) => write!(f, "  discrepancy {:>14.2e} (relative)", rel),
            None => write!(f, "  discrepancy {:>14.2e} (absolute)", self.absolute_difference()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builder::DatasetBuilderExt;
    use crate::fit::FittedModel;

    #[test]
    fn comparison_of_a_linear_model_is_tight() {
        let mut builder = Dataset::builder();
        for i in 0..30 {
            let x1 = i as f64 * 0.3;
            let x2 = (i % 6) as f64;
            builder = builder.sample(x1, x2, 2.0 + 1.5 * x1 + 0.5 * x2);
        }
        let data = builder.build();
        let model = FittedModel::fit(FunctionalForm::Linear, &data).unwrap();

        let cmp = EffectComparison::compare(&model, &data, &AmeOptions::default()).unwrap();
        assert_eq!(cmp.n, 30);
        assert!(cmp.relative_difference().unwrap() < 1e-6);

        let rendered = cmp.to_string();
        assert!(rendered.contains("linear form"));
        assert!(rendered.contains("analytical"));
    }
}
