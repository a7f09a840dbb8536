use axum::{Json, extract::Path};
use axum_extra::extract::WithRejection;

use crate::JotterError;

pub mod notes;
pub mod todos;

/// JSON body whose rejections render through `JotterError`.
pub type JsonBody<T> = WithRejection<Json<T>, JotterError>;

/// Path parameters whose rejections render through `JotterError`.
pub type PathParam<T> = WithRejection<Path<T>, JotterError>;

/// GET / -> liveness text.
pub async fn root_handler() -> &'static str {
    "jotter server running as expected"
}

/// GET /hello
pub async fn hello_handler() -> &'static str {
    "Hello World!"
}
