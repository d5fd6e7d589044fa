//! Session middleware for Axum
//!
//! Resolves the session cookie into a [`RequestContext`] once per request.
//! Handlers take the context as an extractor instead of reading shared
//! per-request globals.

use crate::server::config::SessionConfig;
use armory_core::{Account, ArmoryStore};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
};
use tracing::warn;

/// Cookie settings shared with handlers through an `Extension`.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            secure: config.secure_cookie,
        }
    }
}

impl SessionSettings {
    /// `Set-Cookie` value that stores a session token.
    pub fn issue_cookie(&self, token: &str) -> HeaderValue {
        self.cookie_value(token, None)
    }

    /// `Set-Cookie` value that expires the session cookie.
    pub fn clear_cookie(&self) -> HeaderValue {
        self.cookie_value("", Some(0))
    }

    fn cookie_value(&self, token: &str, max_age: Option<u32>) -> HeaderValue {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, token
        );
        if let Some(age) = max_age {
            cookie.push_str(&format!("; Max-Age={age}"));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        // Cookie names come from config and tokens are hex, both ASCII.
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

/// Request-scoped context: the signed-in account, if any.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub account: Option<Account>,
    pub session_token: Option<String>,
}

impl RequestContext {
    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let store = parts.extensions.get::<ArmoryStore>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "store not configured",
        ))?;
        let settings = parts
            .extensions
            .get::<SessionSettings>()
            .cloned()
            .unwrap_or_default();

        let Some(token) = read_cookie(&parts.headers, &settings.cookie_name) else {
            return Ok(RequestContext::default());
        };

        // A failed lookup degrades to an anonymous request.
        let account = match store.session_account(&token).await {
            Ok(account) => account,
            Err(e) => {
                warn!("Session lookup failed: {}", e);
                None
            }
        };

        Ok(RequestContext {
            session_token: account.as_ref().map(|_| token),
            account,
        })
    }
}

/// Read a cookie value from the `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; armory_session=abc123; other=1"),
        );
        assert_eq!(
            read_cookie(&headers, "armory_session"),
            Some("abc123".to_string())
        );
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("armory_session="));
        assert_eq!(read_cookie(&headers, "armory_session"), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let settings = SessionSettings {
            cookie_name: "sid".to_string(),
            secure: true,
        };
        let issued = settings.issue_cookie("tok");
        assert_eq!(
            issued.to_str().unwrap(),
            "sid=tok; Path=/; HttpOnly; SameSite=Lax; Secure"
        );
        let cleared = settings.clear_cookie();
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_context_resolves_account() {
        let store = ArmoryStore::in_memory().await.unwrap();
        let account = store
            .create_account(&armory_core::NewAccount {
                name: "Kai".into(),
                email: "kai@example.com".into(),
                password: "pw".into(),
                role: Default::default(),
            })
            .await
            .unwrap();
        let session = store.create_session(account.id).await.unwrap();

        let request = axum::http::Request::builder()
            .header(
                header::COOKIE,
                format!("armory_session={}", session.token),
            )
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        parts.extensions.insert(store);
        parts.extensions.insert(SessionSettings::default());

        let ctx = RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.account.unwrap().email, "kai@example.com");
        assert_eq!(ctx.session_token, Some(session.token));
    }

    #[tokio::test]
    async fn test_context_with_unknown_token_is_anonymous() {
        let store = ArmoryStore::in_memory().await.unwrap();
        let request = axum::http::Request::builder()
            .header(header::COOKIE, "armory_session=nope")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        parts.extensions.insert(store);

        let ctx = RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(!ctx.is_authenticated());
        assert!(ctx.session_token.is_none());
    }
}
