//! Top-level error type for embedders driving the whole funnel.

use thiserror::Error;

use crate::account::AuthError;
use crate::api::ApiError;
use crate::booking::SubmitError;
use crate::config::ConfigError;
use crate::payment::PaymentError;
use crate::storage::StorageError;

/// Any error the booking funnel can surface.
///
/// Each step has its own error type; this umbrella exists so an embedder
/// driving several steps can hold one error type end to end.
#[derive(Debug, Error)]
pub enum FunnelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}
