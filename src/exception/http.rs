use crate::exception::{ERROR_MESSAGE, ErrorResponse, ExceptionFilter};
use crate::fault::Fault;
use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::Response,
};

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// The default exception filter
///
/// Every fault becomes a `500 Internal Server Error` with an [`ErrorResponse`]
/// JSON body. The fault kind is never inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorTranslationFilter;

impl ExceptionFilter for ErrorTranslationFilter {
    fn catch(&self, fault: &Fault) -> Response {
        render(ErrorResponse::from_fault(fault).to_json())
    }
}

/// Build the 500 response, or a plain-text one if the body could not be serialized.
fn render(body: crate::Result<Vec<u8>>) -> Response {
    match body {
        Ok(json) => internal_server_error(Body::from(json), APPLICATION_JSON),
        Err(e) => {
            tracing::error!("Falling back to plain-text error body: {}", e);
            internal_server_error(Body::from(ERROR_MESSAGE), TEXT_PLAIN)
        }
    }
}

fn internal_server_error(body: Body, content_type: &'static str) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
