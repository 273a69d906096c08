use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};
use strum::IntoEnumIterator;
use tower_http::trace::TraceLayer;

use crate::pages;
use crate::routing::{protected_route, public_route, Portal, ProtectedRoute};
use crate::session;
use crate::shared::AppState;

/// Protected pages of one portal, gated by the portal's role policy
fn portal_routes(state: &AppState, portal: Portal) -> Router<AppState> {
    let route = ProtectedRoute::new(state.clone(), portal.policy());

    Router::new()
        .route("/dashboard", get(pages::dashboard))
        .layer(Extension(portal))
        .layer(middleware::from_fn_with_state(route, protected_route))
}

/// Builds the full application router
pub fn build_router(state: AppState) -> Router {
    let public_pages = Router::new()
        .route("/login/:portal", get(pages::login_page))
        .layer(middleware::from_fn_with_state(state.clone(), public_route));

    let api = Router::new()
        .route("/auth/login/:portal", post(session::login))
        .route("/auth/logout", post(session::logout))
        .route("/session", get(session::session_status));

    let mut app = Router::new()
        .route("/", get(pages::landing))
        .merge(public_pages)
        .nest("/api", api);

    for portal in Portal::iter() {
        app = app.nest(&format!("/{}", portal), portal_routes(&state, portal));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
