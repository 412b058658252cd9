//! Auth Endpoints

use super::client::{self, Verb};
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, User};

pub async fn login(username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    let response: Option<LoginResponse> = client::send(Verb::Post, "/api/auth/login", &request).await?;
    response.ok_or_else(|| ApiError::Decode("login response has no token".to_string()))
}

/// Profile of the user the stored token belongs to
pub async fn current_user() -> Result<User, ApiError> {
    client::get("/api/auth/me").await
}
