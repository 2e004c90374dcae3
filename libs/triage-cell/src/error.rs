use thiserror::Error;

use crate::models::PatientStatus;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriageError {
    #[error("Invalid patient status transition from {from} to {to}")]
    InvalidStatusTransition { from: PatientStatus, to: PatientStatus },

    #[error("Only waiting patients can be upgraded to emergency (current status: {status})")]
    UpgradeNotAllowed { status: PatientStatus },
}
