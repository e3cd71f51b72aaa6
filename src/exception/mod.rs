//! Exception filters and the shared translation step
//!
//! Both the [`ErrorTranslationLayer`] and the
//! [`ErrorTranslationInterceptor`](crate::interceptor::ErrorTranslationInterceptor)
//! delegate to the rest of the chain through one shared step that never fails:
//! a successful response is handed back untouched, and any fault is given to
//! an [`ExceptionFilter`] to render.

use crate::config::TranslationConfig;
use crate::fault::{Fault, Outcome};
use crate::interceptor::InterceptorResult;
use axum::http::{Method, Uri};
use axum::response::Response;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::panic::AssertUnwindSafe;

pub mod http;
pub mod layer;

pub use http::ErrorTranslationFilter;
pub use layer::{ErrorTranslationLayer, ErrorTranslationService};

/// User-facing message sent with every translated fault
pub const ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// JSON body written for a translated fault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn from_fault(fault: &Fault) -> Self {
        Self {
            message: ERROR_MESSAGE.to_string(),
            details: fault.description().to_string(),
        }
    }

    pub fn to_json(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// The ExceptionFilter trait
///
/// Filters turn a fault raised during request processing into a response.
/// They must return a valid Response.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch a fault and return a response
    fn catch(&self, fault: &Fault) -> Response;
}

/// Run `delegated` and absorb any fault it raises.
pub(crate) async fn absorb<F, Fut>(
    filter: &F,
    config: &TranslationConfig,
    method: &Method,
    uri: &Uri,
    delegated: Fut,
) -> Response
where
    F: ExceptionFilter + ?Sized,
    Fut: Future<Output = InterceptorResult>,
{
    tracing::trace!(outcome = %Outcome::Delegated, %method, %uri, "delegating request");

    let result = if config.catch_panics {
        match AssertUnwindSafe(delegated).catch_unwind().await {
            Ok(result) => result.map_err(Fault::from_error),
            Err(payload) => Err(Fault::from_panic(payload)),
        }
    } else {
        delegated.await.map_err(Fault::from_error)
    };

    match result {
        Ok(response) => {
            tracing::trace!(
                outcome = %Outcome::PassedThrough,
                %method,
                %uri,
                status = %response.status(),
                "request passed through"
            );
            response
        }
        Err(fault) => {
            if config.log_faults {
                tracing::error!(
                    outcome = %Outcome::Translated,
                    %method,
                    %uri,
                    origin = %fault.origin(),
                    details = %fault,
                    "unhandled fault while processing request"
                );
            }
            filter.catch(&fault)
        }
    }
}
