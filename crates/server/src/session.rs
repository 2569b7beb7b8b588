// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor extraction at the server boundary.
//!
//! Identity is asserted by the fronting auth layer through the
//! `X-Actor-Id` and `X-Actor-Role` headers. This module only parses those
//! headers; role enforcement happens in the API crate.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use civic_pulse_api::{AuthenticatedActor, Role, authenticate_stub};
use std::str::FromStr;
use tracing::{debug, warn};

/// Header carrying the actor's record identifier.
pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";

/// Header carrying the actor's role (`citizen`, `officer` or `admin`).
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

/// Extractor for the acting citizen, officer or admin.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionActor(actor): SessionActor,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Either header is missing or not valid UTF-8
/// - The identifier is not a positive integer
/// - The role is unknown
pub struct SessionActor(pub AuthenticatedActor);

fn header<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, SessionError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing actor header");
            SessionError::MissingHeader(name)
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Invalid actor header encoding");
            SessionError::InvalidHeader(name)
        })
}

impl<S> FromRequestParts<S> for SessionActor
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor_id: i64 = header(parts, ACTOR_ID_HEADER)?
            .trim()
            .parse()
            .map_err(|_| SessionError::InvalidHeader(ACTOR_ID_HEADER))?;
        let role: Role = Role::from_str(header(parts, ACTOR_ROLE_HEADER)?)
            .map_err(|e| SessionError::Rejected(e.to_string()))?;

        let actor: AuthenticatedActor = authenticate_stub(actor_id, role).map_err(|e| {
            warn!(actor_id, error = %e, "Actor authentication failed");
            SessionError::Rejected(e.to_string())
        })?;

        debug!(actor_id, role = role.as_str(), "Actor authenticated");
        Ok(Self(actor))
    }
}

/// Actor extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// A required header is missing.
    MissingHeader(&'static str),
    /// A header is present but malformed.
    InvalidHeader(&'static str),
    /// The asserted identity was rejected.
    Rejected(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header"),
            Self::Rejected(reason) => reason,
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
