use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` whose rejections come back as [`AppError`] instead of axum's plain-text bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
