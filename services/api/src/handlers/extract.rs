use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections answer with the `ApiError` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
