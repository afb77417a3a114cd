//! Errors for analytical effect evaluation

use thiserror::Error;

use crate::effects::FunctionalForm;

/// Errors that can occur when evaluating a marginal effect
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    /// The evaluation point violates the form's domain requirement
    #[error("{form} form requires {quantity} > 0, got {value}")]
    Domain {
        form: FunctionalForm,
        quantity: &'static str,
        value: f64,
    },

    /// The coefficient set lacks a term the form references
    #[error("coefficient set is missing term `{term}` required by the {form} form")]
    MissingTerm {
        form: FunctionalForm,
        term: &'static str,
    },

    /// A level-scale quantity was requested without an outcome level
    #[error("the {form} form needs an outcome level at the evaluation point")]
    MissingOutcome { form: FunctionalForm },

    /// An average was requested over an empty dataset
    #[error("cannot average a marginal effect over an empty dataset")]
    EmptyDataset,
}
