pub mod app;
pub mod dashboard;
pub mod documents;
pub mod drafts;
pub mod metrics;

use billing_core::AppError;

use crate::services::ApiError;
use crate::workflow::WorkflowError;

/// Map a workflow refusal or failure onto the HTTP error surface.
pub(crate) fn workflow_error(err: WorkflowError) -> AppError {
    match err {
        WorkflowError::InvalidItem(msg) => AppError::ValidationError(msg),
        WorkflowError::AlreadyCreated
        | WorkflowError::SubmitInFlight
        | WorkflowError::NotCreated
        | WorkflowError::MutationInFlight => AppError::Conflict(anyhow::anyhow!("{}", err)),
        WorkflowError::Api(e) => api_error(e),
    }
}

pub(crate) fn api_error(err: ApiError) -> AppError {
    match err {
        ApiError::Validation { detail } => AppError::ValidationError(detail),
        ApiError::NotFound { detail } => AppError::NotFound(anyhow::anyhow!("{}", detail)),
        ApiError::Network(msg) => AppError::BadGateway(msg),
    }
}
