//! Per-browser page sessions
//!
//! Each browser gets a random session id in a cookie. Edit mode, drafts,
//! alerts and pending focus are kept per session so two tabs never see each
//! other's transient state.

use std::fmt;

use axum::http::{header, HeaderMap, HeaderName};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "todomatic_session";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The session named by the request's cookie, or a fresh one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        find_cookie(headers).unwrap_or_else(Self::new)
    }

    /// `Set-Cookie` header that keeps this session for the browser
    pub fn set_cookie(&self) -> [(HeaderName, String); 1] {
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.0),
        )]
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn find_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(SessionId)
}
