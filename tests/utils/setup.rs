use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use campus_gate::{
    accounts::{AccountModel, InMemoryAccountRepository},
    build_router,
    session::CookieSettings,
    AppState, Role, TokenConfig,
};

pub const TEST_SECRET: &str = "workflow-secret";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub token_config: TokenConfig,
}

impl TestApp {
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, format!("token={}", cookie));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        cookie: Option<&str>,
        body: serde_json::Value,
    ) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, format!("token={}", cookie));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn login(&self, portal: &str, email: &str, password: &str) -> Response {
        self.post_json(
            &format!("/api/auth/login/{}", portal),
            None,
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub struct TestAppBuilder {
    accounts: Vec<(String, String, Role)>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self { accounts: vec![] }
    }

    pub fn with_account(mut self, email: &str, password: &str, role: Role) -> Self {
        self.accounts.push((email.to_string(), password.to_string(), role));
        self
    }

    /// One account per role, password "pw"
    pub fn with_campus_staff(self) -> Self {
        self.with_account("root@campus.edu", "pw", Role::SuperAdmin)
            .with_account("tpo@campus.edu", "pw", Role::Admin)
            .with_account("prof@campus.edu", "pw", Role::Faculty)
            .with_account("coord@campus.edu", "pw", Role::Coordinator)
            .with_account("s1@campus.edu", "pw", Role::Student)
    }

    pub fn build(self) -> TestApp {
        let accounts = self
            .accounts
            .iter()
            .map(|(email, password, role)| {
                AccountModel::new(email, email, password, *role, 4).unwrap()
            })
            .collect();
        let token_config = TokenConfig::new(TEST_SECRET, Duration::hours(1));

        let state = AppState::new(
            Arc::new(InMemoryAccountRepository::with_accounts(accounts)),
            token_config.clone(),
            CookieSettings::default(),
        )
        .with_password_hash_cost(4);

        TestApp {
            router: build_router(state),
            token_config,
        }
    }
}
