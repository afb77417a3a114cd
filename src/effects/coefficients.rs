use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::effects::{EffectError, FunctionalForm};

/// Estimated coefficients of a fitted linear model, keyed by term name
///
/// Term names follow the formula convention used throughout the crate:
/// `"x1"`, `"x2"` for main effects and `"x1:x2"` for the interaction.
/// The set is immutable once built; construction goes through
/// [`CoefficientSet::with_term`], the [`terms!`](crate::terms) macro, or the
/// `From`/`FromIterator` impls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet {
    terms: HashMap<String, f64>,
}

impl CoefficientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term, consuming and returning the set
    pub fn with_term(mut self, name: impl Into<String>, value: f64) -> Self {
        self.terms.insert(name.into(), value);
        self
    }

    /// Look up a term by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.terms.get(name).copied()
    }

    /// Look up a term required by `form`, failing with
    /// [`EffectError::MissingTerm`] when absent
    pub(crate) fn require(
        &self,
        form: FunctionalForm,
        term: &'static str,
    ) -> Result<f64, EffectError> {
        self.get(term)
            .ok_or(EffectError::MissingTerm { form, term })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over (term, coefficient) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>, const N: usize> From<[(S, f64); N]> for CoefficientSet {
    fn from(terms: [(S, f64); N]) -> Self {
        terms.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CoefficientSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_term_and_get() {
        let coeffs = CoefficientSet::new()
            .with_term("x1", 1.5)
            .with_term("x2", -0.5);
        assert_eq!(coeffs.len(), 2);
        assert_eq!(coeffs.get("x1"), Some(1.5));
        assert_eq!(coeffs.get("x1:x2"), None);
    }

    #[test]
    fn require_reports_the_missing_term() {
        let coeffs = CoefficientSet::new().with_term("x1", 1.0);
        let err = coeffs
            .require(FunctionalForm::Linear, "x2")
            .unwrap_err();
        assert_eq!(
            err,
            EffectError::MissingTerm {
                form: FunctionalForm::Linear,
                term: "x2",
            }
        );
    }
}
