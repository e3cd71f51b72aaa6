use crate::interceptor::{BoxFuture, Interceptor, InterceptorError, Next};
use axum::{body::Body, http::Request, response::Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer for invoking a chain of Interceptors
///
/// Interceptors run in the order given: the first one sees the request first
/// and the response last.
#[derive(Clone)]
pub struct InterceptorLayer {
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
}

impl InterceptorLayer {
    pub fn new(interceptors: Vec<Box<dyn Interceptor>>) -> Self {
        Self {
            interceptors: Arc::new(interceptors),
        }
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl<S> Layer<S> for InterceptorLayer {
    type Service = InterceptorMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptorMiddleware {
            inner,
            interceptors: Arc::clone(&self.interceptors),
        }
    }
}

#[derive(Clone)]
pub struct InterceptorMiddleware<S> {
    inner: S,
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
}

impl<S> Service<Request<Body>> for InterceptorMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<InterceptorError> + Send,
{
    type Response = Response;
    type Error = InterceptorError;
    type Future = BoxFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let interceptors = Arc::clone(&self.interceptors);

        // Take the service that was driven to readiness and leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut chain = Next::new(move |req| -> BoxFuture {
                Box::pin(async move {
                    inner.call(req).await.map_err(Into::<InterceptorError>::into)
                })
            });

            // Wrap from the innermost interceptor outwards.
            for index in (0..interceptors.len()).rev() {
                let interceptors = Arc::clone(&interceptors);
                let next = chain;
                chain = Next::new(move |req| -> BoxFuture {
                    Box::pin(async move { interceptors[index].intercept(req, next).await })
                });
            }

            chain.run(request).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::InterceptorResult;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::convert::Infallible;
    use std::sync::Mutex;
    use tower::{ServiceExt, service_fn};

    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Interceptor for Recording {
        async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
            self.log.lock().unwrap().push(format!("{} before", self.name));
            let response = next.run(request).await;
            self.log.lock().unwrap().push(format!("{} after", self.name));
            response
        }
    }

    struct ShortCircuit;

    #[async_trait]
    impl Interceptor for ShortCircuit {
        async fn intercept(&self, _request: Request<Body>, _next: Next) -> InterceptorResult {
            Err("short-circuited".into())
        }
    }

    async fn no_content(_request: Request<Body>) -> Result<Response, Infallible> {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        Ok(response)
    }

    #[tokio::test]
    async fn test_interceptors_run_in_declaration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let layer = InterceptorLayer::new(vec![
            Box::new(Recording {
                name: "outer",
                log: Arc::clone(&log),
            }),
            Box::new(Recording {
                name: "inner",
                log: Arc::clone(&log),
            }),
        ]);
        assert_eq!(layer.len(), 2);

        let service = layer.layer(service_fn(no_content));
        let response = service
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["outer before", "inner before", "inner after", "outer after"]
        );
    }

    #[tokio::test]
    async fn test_empty_chain_calls_inner_service() {
        let layer = InterceptorLayer::new(Vec::new());
        assert!(layer.is_empty());

        let response = layer
            .layer(service_fn(no_content))
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_error_propagates_out_of_chain() {
        let layer = InterceptorLayer::new(vec![Box::new(ShortCircuit)]);

        let err = layer
            .layer(service_fn(no_content))
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "short-circuited");
    }
}
