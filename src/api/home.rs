//! Home page
//!
//! GET / - Site index with the signed-in account and top-level links

use armory_core::Account;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::ApiResponse;
use crate::middleware::session::RequestContext;

/// Home page payload.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub name: &'static str,
    pub version: &'static str,
    pub signed_in: bool,
    pub account: Option<Account>,
    pub links: Vec<&'static str>,
}

pub fn home_routes() -> Router {
    Router::new().route("/", get(home))
}

async fn home(ctx: RequestContext) -> Json<ApiResponse<HomePage>> {
    Json(ApiResponse::success(HomePage {
        name: "Armory",
        version: env!("CARGO_PKG_VERSION"),
        signed_in: ctx.is_authenticated(),
        account: ctx.account,
        links: vec![
            "/operators",
            "/weapons",
            "/damage_simulator",
            "/login",
            "/register",
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_home_anonymous() {
        let response = home(RequestContext::default()).await;
        assert!(response.0.success);
        let page = response.0.data.unwrap();
        assert!(!page.signed_in);
        assert!(page.account.is_none());
        assert!(page.links.contains(&"/operators"));
    }
}
