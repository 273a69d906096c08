use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use super::{
    gate::{self, GateDecision, PublicDecision, RoutePolicy},
    paths::ROOT_PATH,
};
use crate::session::cookie_session;
use crate::shared::AppState;

/// Middleware state for one protected route group
#[derive(Clone)]
pub struct ProtectedRoute {
    pub app: AppState,
    pub policy: RoutePolicy,
}

impl ProtectedRoute {
    pub fn new(app: AppState, policy: RoutePolicy) -> Self {
        Self { app, policy }
    }
}

/// Role gate for a protected route group.
/// Usage: .layer(middleware::from_fn_with_state(ProtectedRoute::new(state, policy), protected_route))
/// Authorized requests reach the group with Extension<SessionClaims> set, all
/// others get a 303 to a login page or to their own dashboard. Cookie
/// eviction is sent back in both cases.
#[instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn protected_route(
    State(route): State<ProtectedRoute>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let mut session = cookie_session(&route.app, jar);
    let decision = gate::evaluate(&mut session, &route.policy);
    let jar = session.into_store().into_jar();

    match decision {
        GateDecision::Authorized { claims } => {
            info!(sub = %claims.sub, role = %claims.role, "Access granted");
            req.extensions_mut().insert(claims);
            (jar, next.run(req).await).into_response()
        }
        denied => {
            let target = denied.redirect_target().unwrap_or(ROOT_PATH);
            warn!(state = ?denied.state(), target = %target, "Access denied, redirecting");
            (jar, Redirect::to(target)).into_response()
        }
    }
}

/// Gate for the public login pages: signed-in users go to their dashboard
#[instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn public_route(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let mut session = cookie_session(&state, jar);
    let decision = gate::evaluate_public(&mut session);
    let jar = session.into_store().into_jar();

    match decision {
        PublicDecision::Render => (jar, next.run(req).await).into_response(),
        PublicDecision::Redirect { dashboard } => {
            info!(target = %dashboard, "Already signed in, redirecting to dashboard");
            (jar, Redirect::to(dashboard)).into_response()
        }
    }
}
