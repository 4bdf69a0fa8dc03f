//! Extractors whose rejections use the gateway error envelope

use axum::extract::FromRequestParts;

use crate::error::ApiError;

/// `axum::extract::Path` rejecting with [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);
