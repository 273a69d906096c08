use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::Session,
    store::CookieTokenStore,
    types::{LoginRequest, LoginResponse, LogoutResponse, Role, SessionStatusResponse},
};
use crate::accounts::AccountService;
use crate::routing::{paths::dashboard_path_for, Portal};
use crate::shared::{AppError, AppState};

pub(crate) fn cookie_session(state: &AppState, jar: CookieJar) -> Session<CookieTokenStore> {
    Session::new(
        CookieTokenStore::new(jar, &state.cookie),
        state.token_config.clone(),
        state.cookie.name.clone(),
    )
}

/// HTTP handler for portal login
///
/// POST /api/auth/login/:portal
/// Sets the session cookie and returns the token with the dashboard to open
#[instrument(name = "login", skip(state, jar, request))]
pub async fn login(
    State(state): State<AppState>,
    Path(portal): Path<Portal>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    info!(portal = %portal, "Login requested");

    let service = AccountService::new(
        Arc::clone(&state.account_repository),
        state.password_hash_cost,
    );
    let account = service
        .authenticate(portal, &request.email, &request.password)
        .await?;

    let role: &'static str = account.role.into();
    let token = state
        .token_config
        .create_token(&account.id.to_string(), role)?;

    let mut session = cookie_session(&state, jar);
    session.start(&token)?;

    info!(email = %account.email, role = %account.role, "Login succeeded");

    let response = LoginResponse {
        token,
        role: account.role,
        redirect_to: dashboard_path_for(role).to_string(),
    };
    Ok((session.into_store().into_jar(), Json(response)))
}

/// HTTP handler for logout
///
/// POST /api/auth/logout
/// Clears the session cookie and points at the matching login page
#[instrument(name = "logout", skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let mut session = cookie_session(&state, jar);

    let login = session
        .get_role()
        .and_then(|role| Role::from_claim(&role))
        .map(Portal::for_role)
        .unwrap_or(Portal::Student)
        .login_path();

    session.end();

    let response = LogoutResponse {
        redirect_to: login.to_string(),
    };
    (session.into_store().into_jar(), Json(response))
}

/// HTTP handler reporting the current session
///
/// GET /api/session
/// An expired cookie is cleared as a side effect
#[instrument(name = "session_status", skip(state, jar))]
pub async fn session_status(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionStatusResponse>) {
    let mut session = cookie_session(&state, jar);
    let role = session.get_role();

    let response = SessionStatusResponse {
        authenticated: role.is_some(),
        role,
    };
    (session.into_store().into_jar(), Json(response))
}
