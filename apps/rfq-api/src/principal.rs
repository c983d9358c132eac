//! Authenticated principal extraction.
//!
//! Authentication happens upstream; the gateway forwards the user it
//! verified in a header (`x-authenticated-user` unless configured otherwise).
//! This module only reads that header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Name recorded when principals are optional and none was supplied.
pub const ANONYMOUS: &str = "anonymous";

/// The caller on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(pub String);

impl Principal {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(&state.config.principal_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match supplied {
            Some(name) => Ok(Principal(name.to_string())),
            None if !state.config.require_principal => Ok(Principal(ANONYMOUS.to_string())),
            None => Err(ApiError::Unauthenticated),
        }
    }
}
