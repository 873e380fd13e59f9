//! Landing URI and cookie domain resolution
//!
//! Outside production every browser is sent to the local user service on a
//! fixed debug domain. In production the request's own host is used.

use axum::http::{HeaderMap, Uri, header::HOST};

use crate::config::Settings;

/// Domain of the user service during local development
pub const DEBUG_DOMAIN: &str = "user-service.localhost";

/// Backend port whose local frontend listens on [`FRONTEND_DEV_PORT`]
const BACKEND_DEV_PORT: u16 = 5001;
const FRONTEND_DEV_PORT: u16 = 3000;
const FRONTEND_PORT: u16 = 8080;

/// Host (and optional port) a request was addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub host: String,
    pub port: Option<u16>,
}

impl RequestOrigin {
    /// Parses a `Host` header value (`example.com`, `localhost:5001`, `[::1]:8080`)
    pub fn parse(authority: &str) -> Option<Self> {
        let authority = authority.trim();
        if authority.is_empty() {
            return None;
        }

        match authority.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && !host.ends_with(':') => {
                let port = port.parse().ok()?;
                Some(Self {
                    host: host.to_string(),
                    port: Some(port),
                })
            }
            _ => Some(Self {
                host: authority.to_string(),
                port: None,
            }),
        }
    }

    /// Origin of a request: the `Host` header, else the authority of an absolute URI
    pub fn from_request(headers: &HeaderMap, uri: &Uri) -> Option<Self> {
        headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| uri.authority().map(|authority| authority.as_str()))
            .and_then(Self::parse)
    }

    /// `host[:port]` as sent by the client
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

/// Where a browser lands after logging in or out
///
/// `query` is an already encoded query string; when non-empty it is forwarded
/// as `/?<query>`.
pub fn login_landing_uri(settings: &Settings, origin: &RequestOrigin, query: Option<&str>) -> String {
    let mut uri = if settings.prod {
        format!("https://{}", origin.authority())
    } else {
        let port = if origin.port == Some(BACKEND_DEV_PORT) {
            FRONTEND_DEV_PORT
        } else {
            FRONTEND_PORT
        };
        format!("http://{}:{}", DEBUG_DOMAIN, port)
    };

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        uri.push_str("/?");
        uri.push_str(query);
    }

    uri
}

/// Domain the session cookies are scoped to
pub fn user_service_domain(settings: &Settings, origin: &RequestOrigin) -> String {
    if settings.prod {
        origin.host.to_lowercase()
    } else {
        DEBUG_DOMAIN.to_string()
    }
}
