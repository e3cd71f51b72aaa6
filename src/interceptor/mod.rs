use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

pub mod error_translation;
pub mod layer;
pub mod logging;

pub use error_translation::ErrorTranslationInterceptor;
pub use layer::{InterceptorLayer, InterceptorMiddleware};
pub use logging::LoggingInterceptor;

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by a continuation
pub type BoxFuture = Pin<Box<dyn Future<Output = InterceptorResult> + Send>>;

/// Represents the next handler in the chain
pub struct Next {
    pub(crate) run: Box<dyn FnOnce(Request<Body>) -> BoxFuture + Send>,
}

impl Next {
    /// Create a new Next handler
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> BoxFuture + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors can inspect/modify the request before it reaches the handler,
/// and inspect/modify the response after the handler returns. Returning `Err`
/// hands the failure to whatever wraps the chain; put an
/// [`ErrorTranslationInterceptor`] first to turn it into a response.
///
/// # Example
/// ```
/// use faultwall::prelude::*;
/// use faultwall::axum::{body::Body, http::Request};
///
/// struct RequireHost;
///
/// #[async_trait]
/// impl Interceptor for RequireHost {
///     async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
///         if !request.headers().contains_key("host") {
///             return Err("missing host header".into());
///         }
///         next.run(request).await
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
