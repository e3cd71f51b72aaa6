//! # Faultwall
//!
//! Centralized request error translation for axum and tower services.
//!
//! Faultwall sits in front of the rest of the request pipeline and makes sure
//! every fault that would otherwise reach the transport layer is turned into the
//! same well-formed JSON response:
//!
//! ```text
//! HTTP/1.1 500 Internal Server Error
//! content-type: application/json
//!
//! {"message":"An error occurred while processing your request.","details":"<fault description>"}
//! ```
//!
//! Successful responses pass through untouched.
//!
//! ## Features
//!
//! - **Error Translation Layer**: a `tower` layer that never fails, usable with `Router::layer`
//! - **Interceptor Chain**: ordered `Interceptor`s with a one-shot `Next` continuation
//! - **Panic Capture**: panics raised by handlers are translated like returned errors
//! - **Exception Filters**: swap the rendering of faults through `ExceptionFilter`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use faultwall::prelude::*;
//! use faultwall::axum::routing::get;
//! use faultwall::tower::ServiceBuilder;
//!
//! async fn find_item() -> Json<serde_json::Value> {
//!     panic!("Resource not found")
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let app: Router = Router::new()
//!         .route("/items/{id}", get(find_item))
//!         .layer(
//!             ServiceBuilder::new()
//!                 .layer(ErrorTranslationLayer::new())
//!                 .layer(InterceptorLayer::new(vec![Box::new(LoggingInterceptor)])),
//!         );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod exception;
pub mod fault;
pub mod interceptor;

// Re-export core types
pub use config::{ConfigService, TranslationConfig};
pub use error::{FaultwallError, Result};
pub use exception::{
    ERROR_MESSAGE, ErrorResponse, ErrorTranslationFilter, ErrorTranslationLayer,
    ErrorTranslationService, ExceptionFilter,
};
pub use fault::{Fault, FaultOrigin, Outcome};
pub use interceptor::{
    ErrorTranslationInterceptor, Interceptor, InterceptorError, InterceptorLayer,
    InterceptorResult, Next,
};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;
pub use tower;

/// Prelude module for convenient imports
///
/// ```
/// use faultwall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigService, TranslationConfig};
    pub use crate::error::{FaultwallError, Result};
    pub use crate::exception::{
        ErrorResponse, ErrorTranslationFilter, ErrorTranslationLayer, ExceptionFilter,
    };
    pub use crate::fault::Fault;
    pub use crate::interceptor::{
        ErrorTranslationInterceptor, Interceptor, InterceptorError, InterceptorLayer,
        InterceptorResult, LoggingInterceptor, Next,
    };
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
