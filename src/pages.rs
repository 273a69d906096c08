use axum::{extract::Path, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::routing::Portal;
use crate::session::SessionClaims;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LandingPage {
    pub portals: Vec<LoginPage>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginPage {
    pub portal: Portal,
    pub page: String,
    pub login_endpoint: String,
}

impl LoginPage {
    fn for_portal(portal: Portal) -> Self {
        Self {
            portal,
            page: portal.login_path().to_string(),
            login_endpoint: format!("/api/auth/login/{}", portal),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DashboardPage {
    pub portal: Portal,
    pub subject: String,
    pub role: String,
}

/// GET /
pub async fn landing() -> Json<LandingPage> {
    Json(LandingPage {
        portals: [Portal::Admin, Portal::Faculty, Portal::Student]
            .into_iter()
            .map(LoginPage::for_portal)
            .collect(),
    })
}

/// GET /login/:portal, behind the public route gate
pub async fn login_page(Path(portal): Path<Portal>) -> Json<LoginPage> {
    Json(LoginPage::for_portal(portal))
}

/// GET /{portal}/dashboard, behind the protected route gate
#[instrument(name = "dashboard", skip_all)]
pub async fn dashboard(
    Extension(portal): Extension<Portal>,
    Extension(claims): Extension<SessionClaims>,
) -> Json<DashboardPage> {
    info!(portal = %portal, sub = %claims.sub, "Rendering dashboard");

    Json(DashboardPage {
        portal,
        subject: claims.sub,
        role: claims.role,
    })
}
