use thiserror::Error;

use crate::data::DataError;
use crate::dgp::DgpError;
use crate::effects::EffectError;
use crate::fit::FitError;

/// Crate-level error aggregating every module's failure modes
#[derive(Error, Debug)]
pub enum MarginsError {
    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Dgp(#[from] DgpError),

    #[error(transparent)]
    Data(#[from] DataError),
}
