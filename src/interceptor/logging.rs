use crate::interceptor::{Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{body::Body, http::Request};
use std::time::Instant;

/// An interceptor that logs request timing and status
///
/// Failures are logged and handed on unchanged.
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let started = Instant::now();

        tracing::info!(%method, %uri, "request started");

        let result = next.run(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::info!(
                %method,
                %uri,
                status = response.status().as_u16(),
                elapsed_ms,
                "request completed"
            ),
            Err(error) => tracing::warn!(
                %method,
                %uri,
                %error,
                elapsed_ms,
                "request failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::{BoxFuture, InterceptorError};
    use axum::http::StatusCode;
    use axum::response::Response;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn accepted_next() -> Next {
        Next::new(|_req| -> BoxFuture {
            Box::pin(async {
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::ACCEPTED;
                Ok::<_, InterceptorError>(response)
            })
        })
    }

    #[tokio::test]
    async fn test_response_is_untouched() {
        let response = LoggingInterceptor
            .intercept(Request::new(Body::empty()), accepted_next())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_logs_carry_structured_fields() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let request = Request::builder()
            .method("POST")
            .uri("/orders/9")
            .body(Body::empty())
            .unwrap();
        LoggingInterceptor
            .intercept(request, accepted_next())
            .await
            .unwrap();

        let next = Next::new(|_req| -> BoxFuture {
            Box::pin(async { Err::<Response, InterceptorError>("upstream timed out".into()) })
        });
        let _ = LoggingInterceptor
            .intercept(Request::new(Body::empty()), next)
            .await;

        let output = logs.contents();
        assert!(output.contains("request started"));
        assert!(output.contains("request completed"));
        assert!(output.contains("method=POST"));
        assert!(output.contains("uri=/orders/9"));
        assert!(output.contains("status=202"));
        assert!(output.contains("elapsed_ms="));
        assert!(output.contains("request failed"));
        assert!(output.contains("error=upstream timed out"));
    }

    #[tokio::test]
    async fn test_error_is_propagated() {
        let next = Next::new(|_req| -> BoxFuture {
            Box::pin(async { Err::<Response, InterceptorError>("boom".into()) })
        });

        let err = LoggingInterceptor
            .intercept(Request::new(Body::empty()), next)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
