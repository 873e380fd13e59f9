//! `Set-Cookie` values for the session cookies

use chrono::{DateTime, TimeDelta, Utc};

pub const SESSION_ID: &str = "session_id";
pub const USER_LOGGED_IN: &str = "user_logged_in";

/// Lifetime of a login session
pub const SESSION_TTL: TimeDelta = TimeDelta::hours(24);

const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// One `Set-Cookie` header value
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: &'static str,
    value: String,
    domain: String,
    expires: String,
    http_only: bool,
    secure: bool,
}

impl SessionCookie {
    /// A cookie valid until `expires`
    pub fn new(
        name: &'static str,
        value: impl Into<String>,
        domain: impl Into<String>,
        expires: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            value: value.into(),
            domain: domain.into(),
            expires: expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            http_only: false,
            secure: false,
        }
    }

    /// An empty cookie that makes the browser drop `name`
    pub fn expired(name: &'static str, domain: impl Into<String>) -> Self {
        Self {
            name,
            value: String::new(),
            domain: domain.into(),
            expires: EXPIRED.to_string(),
            http_only: false,
            secure: false,
        }
    }

    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn header_value(&self) -> String {
        let mut cookie = format!(
            "{}={}; Domain={}; Expires={}; Path=/",
            self.name, self.value, self.domain, self.expires
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_cookie() {
        let expires = Utc.with_ymd_and_hms(2026, 3, 5, 14, 7, 9).unwrap();
        let cookie = SessionCookie::new(SESSION_ID, "abc", "example.com", expires)
            .http_only()
            .secure(true);

        assert_eq!(
            cookie.header_value(),
            "session_id=abc; Domain=example.com; Expires=Thu, 05 Mar 2026 14:07:09 GMT; Path=/; Secure; HttpOnly"
        );
    }

    #[test]
    fn test_expired_cookie() {
        let cookie = SessionCookie::expired(USER_LOGGED_IN, "user-service.localhost");

        assert_eq!(
            cookie.header_value(),
            "user_logged_in=; Domain=user-service.localhost; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/"
        );
    }
}
