//! margins — simulate, fit and validate marginal effects of linear models
//!
//! The crate covers the full validation loop for marginal-effect estimation
//! under different functional forms:
//!
//! 1. declare a true model ([`Dgp`]) and simulate synthetic data from it,
//! 2. fit the matching linear model by OLS ([`FittedModel`]),
//! 3. estimate the average marginal effect of `x1` numerically by finite
//!    differences ([`effects::ame`]),
//! 4. evaluate the exact closed-form derivative ([`FunctionalForm::evaluate`]),
//! 5. compare the two ([`EffectComparison`]).
//!
//! ```rust
//! use margins::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), margins::MarginsError> {
//! let dgp = Dgp::new(
//!     FunctionalForm::Interaction,
//!     1.0,
//!     terms! { "x1" => 1.0, "x2" => 0.5, "x1:x2" => 10.0 },
//!     0.5,
//! );
//! let mut rng = StdRng::seed_from_u64(42);
//! let data = dgp.simulate(1_000, &mut rng)?;
//!
//! let model = FittedModel::fit(FunctionalForm::Interaction, &data)?;
//! let comparison = EffectComparison::compare(&model, &data, &AmeOptions::default())?;
//! println!("{}", comparison);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod dgp;
pub mod effects;
pub mod error;
pub mod fit;
pub mod report;

// extension traits
pub use crate::data::builder::DatasetBuilderExt;
pub use crate::data::{DataError, Dataset, Sample};
pub use crate::dgp::{Dgp, DgpError};
pub use crate::effects::ame::{average_analytical_effect, average_marginal_effect, AmeOptions};
pub use crate::effects::{
    CoefficientSet, EffectError, EffectScale, EvaluationPoint, FunctionalForm, MarginalEffect,
};
pub use crate::fit::{FitError, FittedModel};
pub use crate::report::EffectComparison;
pub use error::MarginsError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{parser::read_csv, Dataset, Sample};
    }
    pub mod effects {
        pub use crate::effects::{
            ame::{average_analytical_effect, average_marginal_effect, AmeOptions},
            CoefficientSet, EffectScale, EvaluationPoint, FunctionalForm, MarginalEffect,
        };
    }

    // extension traits
    pub use crate::data::builder::DatasetBuilderExt;
    pub use crate::dgp::Dgp;
    pub use crate::effects::ame::AmeOptions;
    pub use crate::effects::{CoefficientSet, EvaluationPoint, FunctionalForm, MarginalEffect};
    pub use crate::fit::FittedModel;
    pub use crate::report::EffectComparison;
    pub use crate::terms;
}

/// Build a [`CoefficientSet`](crate::effects::CoefficientSet) from
/// `term => value` pairs.
///
/// ```rust
/// use margins::{terms, CoefficientSet};
///
/// let coeffs: CoefficientSet = terms! { "x1" => 1.0, "x1:x2" => 10.0 };
/// assert_eq!(coeffs.get("x1:x2"), Some(10.0));
/// ```
#[macro_export]
macro_rules! terms {
    ($($k:expr => $v:expr),* $(,)?) => {{
        core::convert::From::from([$(($k, $v),)*])
    }};
}
