//! Session API Handlers
//!
//! Login and logout both answer with a redirect to the landing page; they
//! differ only in the cookies they set.

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{
        HeaderMap, HeaderValue, StatusCode, Uri,
        header::{LOCATION, SET_COOKIE},
    },
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::Settings;
use crate::cookies::{SESSION_ID, SESSION_TTL, SessionCookie, USER_LOGGED_IN};
use crate::landing::{RequestOrigin, login_landing_uri, user_service_domain};

/// GET /session
/// Start a session and send the browser to the landing page
pub async fn create_session(
    State(settings): State<Arc<Settings>>,
    headers: HeaderMap,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> ApiResult<Response> {
    let origin = request_origin(&headers, &uri)?;

    let public_key = tokio::fs::read_to_string(&settings.public_pem_filename).await?;
    tracing::debug!(
        "Loaded public key {} ({} bytes)",
        settings.public_pem_filename.display(),
        public_key.len()
    );

    let domain = user_service_domain(&settings, &origin);
    let expires = Utc::now() + SESSION_TTL;
    let session_id = Uuid::new_v4().to_string();

    let cookies = [
        SessionCookie::new(SESSION_ID, session_id, domain.clone(), expires)
            .http_only()
            .secure(settings.prod),
        SessionCookie::new(USER_LOGGED_IN, "true", domain.clone(), expires).secure(settings.prod),
    ];

    let location = login_landing_uri(&settings, &origin, query.as_deref());
    tracing::info!("Session created for {}, redirecting to {}", domain, location);

    redirect(&location, &cookies)
}

/// GET /logout
/// Drop the session cookies and send the browser to the landing page
pub async fn logout(
    State(settings): State<Arc<Settings>>,
    headers: HeaderMap,
    uri: Uri,
) -> ApiResult<Response> {
    let origin = request_origin(&headers, &uri)?;
    let domain = user_service_domain(&settings, &origin);

    let cookies = [
        SessionCookie::expired(SESSION_ID, domain.clone()).secure(settings.prod),
        SessionCookie::expired(USER_LOGGED_IN, domain.clone()).secure(settings.prod),
    ];

    let location = login_landing_uri(&settings, &origin, None);
    tracing::info!("Session cleared for {}, redirecting to {}", domain, location);

    redirect(&location, &cookies)
}

fn request_origin(headers: &HeaderMap, uri: &Uri) -> ApiResult<RequestOrigin> {
    RequestOrigin::from_request(headers, uri)
        .ok_or_else(|| ApiError::BadRequest("Missing or invalid Host header".to_string()))
}

/// 302 to `location` with an HTML body for clients that do not follow redirects
fn redirect(location: &str, cookies: &[SessionCookie]) -> ApiResult<Response> {
    let location_header = header_value(location.to_string())?;
    let cookie_headers = cookies
        .iter()
        .map(|cookie| header_value(cookie.header_value()).map(|value| (SET_COOKIE, value)))
        .collect::<ApiResult<Vec<_>>>()?;

    let target = escape_html(location);
    let body = format!(
        "<!doctype html>\n<html lang=en>\n<title>Redirecting...</title>\n\
         <h1>Redirecting...</h1>\n\
         <p>You should be redirected automatically to the target URL: \
         <a href=\"{target}\">{target}</a>. If not, click the link.\n"
    );

    Ok((
        StatusCode::FOUND,
        [(LOCATION, location_header)],
        AppendHeaders(cookie_headers),
        Html(body),
    )
        .into_response())
}

fn header_value(value: String) -> ApiResult<HeaderValue> {
    HeaderValue::try_from(value)
        .map_err(|e| ApiError::InternalError(format!("Invalid header value: {}", e)))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use axum::http::{
        HeaderName,
        header::{CONTENT_TYPE, HOST},
    };
    use axum_test::TestServer;
    use tempfile::TempDir;

    const EXPIRED: &str = "Expires=Thu, 01 Jan 1970 00:00:00 GMT";

    /// Test server whose public key lives in a temporary directory
    fn create_test_app(prod: bool) -> (TestServer, TempDir) {
        let dir = TempDir::new().unwrap();
        let pem = dir.path().join("public_key.pem");
        std::fs::write(&pem, "MOCK_KEY").unwrap();

        let settings = Settings::default().production(prod).with_public_pem(pem);
        let server = TestServer::new(create_router(settings)).unwrap();

        (server, dir)
    }

    fn host(value: &str) -> (HeaderName, HeaderValue) {
        (HOST, HeaderValue::from_str(value).unwrap())
    }

    fn set_cookies(response: &axum_test::TestResponse) -> Vec<String> {
        let mut cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        cookies.sort();
        cookies
    }

    #[tokio::test]
    async fn test_session_route_production() {
        let (server, _dir) = create_test_app(true);
        let (name, value) = host("MOCK_DOMAIN.");

        let response = server.get("/session").add_header(name, value).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header(LOCATION), "https://MOCK_DOMAIN.");
        assert_eq!(response.header(CONTENT_TYPE), "text/html; charset=utf-8");

        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("session_id="));
        assert!(cookies[0].contains("Domain=mock_domain."));
        assert!(cookies[0].contains("HttpOnly"));
        assert!(cookies[0].contains("Secure"));
        assert!(cookies[1].starts_with("user_logged_in=true"));
        assert!(!cookies[1].contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_session_route_forwards_query() {
        let (server, _dir) = create_test_app(true);
        let (name, value) = host("example.com");

        let response = server
            .get("/session")
            .add_query_param("next", "projects")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header(LOCATION),
            "https://example.com/?next=projects"
        );
    }

    #[tokio::test]
    async fn test_session_route_local() {
        let (server, _dir) = create_test_app(false);
        let (name, value) = host("localhost:5001");

        let response = server.get("/session").add_header(name, value).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header(LOCATION),
            "http://user-service.localhost:3000"
        );
        let cookies = set_cookies(&response);
        assert!(cookies[0].contains("Domain=user-service.localhost"));
        assert!(!cookies[0].contains("Secure"));
    }

    #[tokio::test]
    async fn test_session_route_missing_key() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::default().with_public_pem(dir.path().join("missing.pem"));
        let server = TestServer::new(create_router(settings)).unwrap();
        let (name, value) = host("localhost:5001");

        let response = server
            .get("/session")
            .add_header(name, value)
            .expect_failure()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_logout_route() {
        let (server, _dir) = create_test_app(true);
        let (name, value) = host("MOCK_DOMAIN.");

        let response = server.get("/logout").add_header(name, value).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header(LOCATION), "https://MOCK_DOMAIN.");
        assert_eq!(response.header(CONTENT_TYPE), "text/html; charset=utf-8");

        let cookies = set_cookies(&response);
        assert!(cookies[0].starts_with("session_id=;"));
        assert!(cookies[0].contains(EXPIRED));
        assert!(cookies[1].starts_with("user_logged_in=;"));
        assert!(cookies[1].contains(EXPIRED));
    }

    #[tokio::test]
    async fn test_logout_route_local() {
        let (server, _dir) = create_test_app(false);
        let (name, value) = host("localhost:8081");

        let response = server.get("/logout").add_header(name, value).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header(LOCATION),
            "http://user-service.localhost:8080"
        );

        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 2);
        for cookie in &cookies {
            assert!(cookie.contains("Domain=user-service.localhost"));
            assert!(cookie.contains(EXPIRED));
            assert!(!cookie.contains("Secure"));
        }
    }

    #[tokio::test]
    async fn test_session_without_host_is_bad_request() {
        let (_server, dir) = create_test_app(false);
        let settings = Settings::default().with_public_pem(dir.path().join("public_key.pem"));

        let response = create_session(
            State(Arc::new(settings)),
            HeaderMap::new(),
            Uri::from_static("/session"),
            RawQuery(None),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("https://a/?x=1&y=\"2\""),
            "https://a/?x=1&amp;y=&quot;2&quot;"
        );
    }
}
