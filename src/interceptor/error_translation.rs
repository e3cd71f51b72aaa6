use crate::config::TranslationConfig;
use crate::exception::{ErrorTranslationFilter, ExceptionFilter, absorb};
use crate::interceptor::{Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};

/// An interceptor that turns any fault raised further down the chain into an
/// error response. `intercept` always returns `Ok`.
///
/// Place it first in an [`InterceptorLayer`](crate::interceptor::InterceptorLayer)
/// so that it also covers the interceptors after it.
#[derive(Default)]
pub struct ErrorTranslationInterceptor<F = ErrorTranslationFilter> {
    filter: F,
    config: TranslationConfig,
}

impl ErrorTranslationInterceptor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: ExceptionFilter> ErrorTranslationInterceptor<F> {
    pub fn with_filter(filter: F) -> Self {
        Self {
            filter,
            config: TranslationConfig::default(),
        }
    }

    pub fn config(mut self, config: TranslationConfig) -> Self {
        self.config = config;
        self
    }

    /// Delegate to `next` and translate its failure, if any
    pub async fn handle(&self, request: Request<Body>, next: Next) -> Response {
        let method = request.method().clone();
        let uri = request.uri().clone();

        absorb(&self.filter, &self.config, &method, &uri, next.run(request)).await
    }
}

#[async_trait]
impl<F: ExceptionFilter> Interceptor for ErrorTranslationInterceptor<F> {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        Ok(self.handle(request, next).await)
    }
}
