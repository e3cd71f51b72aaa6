use crate::config::TranslationConfig;
use crate::exception::{ErrorTranslationFilter, ExceptionFilter, absorb};
use crate::interceptor::InterceptorError;
use axum::{body::Body, http::Request, response::Response};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service, ServiceExt};

/// Tower Layer that translates every fault of the wrapped service into an error response
///
/// The produced service never fails, so it can be installed directly with
/// `Router::layer`. Readiness is driven inside the request future, which means
/// a readiness error is translated like any other fault.
///
/// # Example
/// ```rust,no_run
/// use faultwall::prelude::*;
/// use faultwall::exception::ErrorTranslationLayer;
///
/// let app: Router = Router::new()
///     .route("/", axum::routing::get(|| async { "hello" }))
///     .layer(ErrorTranslationLayer::new());
/// ```
pub struct ErrorTranslationLayer<F = ErrorTranslationFilter> {
    filter: Arc<F>,
    config: TranslationConfig,
}

impl<F> Clone for ErrorTranslationLayer<F> {
    fn clone(&self) -> Self {
        Self {
            filter: Arc::clone(&self.filter),
            config: self.config,
        }
    }
}

impl ErrorTranslationLayer {
    /// Create a layer with the default filter and configuration
    pub fn new() -> Self {
        Self::with_filter(ErrorTranslationFilter)
    }
}

impl Default for ErrorTranslationLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ExceptionFilter> ErrorTranslationLayer<F> {
    /// Create a layer that renders faults with a custom filter
    pub fn with_filter(filter: F) -> Self {
        Self {
            filter: Arc::new(filter),
            config: TranslationConfig::default(),
        }
    }

    pub fn config(mut self, config: TranslationConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, F> Layer<S> for ErrorTranslationLayer<F> {
    type Service = ErrorTranslationService<S, F>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorTranslationService {
            inner,
            filter: Arc::clone(&self.filter),
            config: self.config,
        }
    }
}

pub struct ErrorTranslationService<S, F = ErrorTranslationFilter> {
    inner: S,
    filter: Arc<F>,
    config: TranslationConfig,
}

impl<S: Clone, F> Clone for ErrorTranslationService<S, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            filter: Arc::clone(&self.filter),
            config: self.config,
        }
    }
}

impl<S, F> Service<Request<Body>> for ErrorTranslationService<S, F>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<InterceptorError> + Send,
    F: ExceptionFilter,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let filter = Arc::clone(&self.filter);
        let config = self.config;
        let method = request.method().clone();
        let uri = request.uri().clone();

        Box::pin(async move {
            let delegated = async move {
                let ready = inner.ready().await.map_err(Into::<InterceptorError>::into)?;
                let response = ready
                    .call(request)
                    .await
                    .map_err(Into::<InterceptorError>::into)?;
                Ok::<_, InterceptorError>(response)
            };

            Ok(absorb(filter.as_ref(), &config, &method, &uri, delegated).await)
        })
    }
}
