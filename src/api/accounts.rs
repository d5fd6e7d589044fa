//! Account endpoints
//!
//! GET  /login     - Login form descriptor and current account
//! POST /login     - Verify email/password and open a session cookie
//! POST /logout    - Close the session and expire the cookie
//! GET  /register  - Registration form descriptor
//! POST /register  - Create an account (duplicate email keeps the form open)

use armory_core::{Account, ArmoryStore, Error, NewAccount, Role};
use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, ApiResponse};
use crate::middleware::session::{RequestContext, SessionSettings};

/// Form descriptor returned by the GET variants.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub fields: Vec<&'static str>,
    pub account: Option<Account>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub fn accounts_routes() -> Router {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/register", get(register_page).post(register))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

async fn login_page(ctx: RequestContext) -> Json<ApiResponse<FormPage>> {
    Json(ApiResponse::success(FormPage {
        fields: vec!["email", "password"],
        account: ctx.account,
    }))
}

async fn login(
    Extension(store): Extension<ArmoryStore>,
    Extension(settings): Extension<SessionSettings>,
    Form(form): Form<LoginForm>,
) -> Response {
    // Missing fields get the same generic message as a wrong password.
    let (Some(email), Some(password)) = (non_empty(form.email), form.password) else {
        return ApiError(Error::InvalidCredentials).into_response();
    };

    let account = match store.verify_credentials(&email, &password).await {
        Ok(account) => account,
        Err(e) => return ApiError(e).into_response(),
    };

    let session = match store.create_session(account.id).await {
        Ok(session) => session,
        Err(e) => return ApiError(e).into_response(),
    };

    info!(account_id = account.id, "Signed in");
    (
        [(header::SET_COOKIE, settings.issue_cookie(&session.token))],
        Json(ApiResponse::success(account).with_message("Signed in.")),
    )
        .into_response()
}

async fn logout(
    Extension(store): Extension<ArmoryStore>,
    Extension(settings): Extension<SessionSettings>,
    ctx: RequestContext,
) -> Response {
    if let Some(token) = &ctx.session_token {
        if let Err(e) = store.delete_session(token).await {
            return ApiError(e).into_response();
        }
    }
    if let Some(account) = &ctx.account {
        info!(account_id = account.id, "Signed out");
    }

    (
        [(header::SET_COOKIE, settings.clear_cookie())],
        Json(ApiResponse::success(()).with_message("Signed out.")),
    )
        .into_response()
}

async fn register_page(ctx: RequestContext) -> Json<ApiResponse<FormPage>> {
    Json(ApiResponse::success(FormPage {
        fields: vec!["name", "email", "password"],
        account: ctx.account,
    }))
}

async fn register(
    Extension(store): Extension<ArmoryStore>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let mut missing = Vec::new();
    let name = non_empty(form.name);
    let email = non_empty(form.email);
    let password = form.password.filter(|p| !p.is_empty());
    if name.is_none() {
        missing.push("name");
    }
    if email.is_none() {
        missing.push("email");
    }
    if password.is_none() {
        missing.push("password");
    }
    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return ApiError(Error::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
        .into_response();
    };

    let new = NewAccount {
        name,
        email,
        password,
        role: Role::User,
    };

    match store.create_account(&new).await {
        Ok(account) => Json(
            ApiResponse::success(account).with_message("Account created. You can now sign in."),
        )
        .into_response(),
        Err(Error::DuplicateEmail(_)) => Json(
            ApiResponse::<()>::error("duplicate email")
                .with_message("An account with this email already exists."),
        )
        .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn register_form(email: &str) -> RegisterForm {
        RegisterForm {
            name: Some("Nox".into()),
            email: Some(email.into()),
            password: Some("s3cret".into()),
        }
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let store = ArmoryStore::in_memory().await.unwrap();

        let first = register(Extension(store.clone()), Form(register_form("nox@example.com"))).await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = register(Extension(store.clone()), Form(register_form("nox@example.com"))).await;
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(store.account_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_missing_fields_is_422() {
        let store = ArmoryStore::in_memory().await.unwrap();
        let response = register(Extension(store), Form(RegisterForm::default())).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_login_sets_cookie() {
        let store = ArmoryStore::in_memory().await.unwrap();
        register(Extension(store.clone()), Form(register_form("nox@example.com"))).await;

        let response = login(
            Extension(store),
            Extension(SessionSettings::default()),
            Form(LoginForm {
                email: Some("nox@example.com".into()),
                password: Some("s3cret".into()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("armory_session="));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_has_no_cookie() {
        let store = ArmoryStore::in_memory().await.unwrap();
        register(Extension(store.clone()), Form(register_form("nox@example.com"))).await;

        let response = login(
            Extension(store),
            Extension(SessionSettings::default()),
            Form(LoginForm {
                email: Some("nox@example.com".into()),
                password: Some("guess".into()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
