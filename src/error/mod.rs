use thiserror::Error;

use crate::bicarb::PlanError;

#[derive(Error, Debug)]
pub enum InfusolError {
    #[error("Error in the correction plan: {0}")]
    PlanError(#[from] PlanError),
}
