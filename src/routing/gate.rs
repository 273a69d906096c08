use std::collections::BTreeSet;
use tracing::{debug, instrument};

use super::paths::{dashboard_path_for, login_path_for};
use crate::session::{Role, Session, SessionClaims, TokenStore};
use crate::shared::AppError;

/// Roles permitted to access a protected route group. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    allowed: BTreeSet<Role>,
}

impl RoutePolicy {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, AppError> {
        let allowed: BTreeSet<Role> = roles.into_iter().collect();
        if allowed.is_empty() {
            return Err(AppError::Configuration(
                "Route policy must allow at least one role".to_string(),
            ));
        }
        Ok(Self { allowed })
    }

    /// For the portal table, whose rows are never empty
    pub(crate) fn from_static(roles: &'static [Role]) -> Self {
        debug_assert!(!roles.is_empty());
        Self {
            allowed: roles.iter().copied().collect(),
        }
    }

    pub fn contains(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Whether a raw role claim is allowed. Unrecognized roles never are.
    pub fn allows(&self, role: &str) -> bool {
        Role::from_claim(role).is_some_and(|role| self.contains(role))
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.allowed.iter().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    AuthenticatedAuthorized,
    AuthenticatedUnauthorized,
}

/// Outcome of a navigation attempt on a protected route group
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Unauthenticated { login: &'static str },
    Unauthorized { role: String, dashboard: &'static str },
    Authorized { claims: SessionClaims },
}

impl GateDecision {
    pub fn state(&self) -> GateState {
        match self {
            GateDecision::Unauthenticated { .. } => GateState::Unauthenticated,
            GateDecision::Unauthorized { .. } => GateState::AuthenticatedUnauthorized,
            GateDecision::Authorized { .. } => GateState::AuthenticatedAuthorized,
        }
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GateDecision::Unauthenticated { login } => Some(*login),
            GateDecision::Unauthorized { dashboard, .. } => Some(*dashboard),
            GateDecision::Authorized { .. } => None,
        }
    }
}

/// Decides render-vs-redirect for the claims of a live token (or none)
pub fn decide(claims: Option<&SessionClaims>, policy: &RoutePolicy) -> GateDecision {
    match claims {
        None => GateDecision::Unauthenticated {
            login: login_path_for(policy),
        },
        Some(claims) if !policy.allows(&claims.role) => GateDecision::Unauthorized {
            role: claims.role.clone(),
            dashboard: dashboard_path_for(&claims.role),
        },
        Some(claims) => GateDecision::Authorized {
            claims: claims.clone(),
        },
    }
}

/// Runs the gate against a session. May evict an expired token.
#[instrument(skip(session))]
pub fn evaluate<S: TokenStore>(session: &mut Session<S>, policy: &RoutePolicy) -> GateDecision {
    let claims = session.active_claims();
    let decision = decide(claims.as_ref(), policy);
    debug!(state = ?decision.state(), target = ?decision.redirect_target(), "Gate evaluated");
    decision
}

/// Outcome of a navigation attempt on a public page (the login pages)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicDecision {
    Render,
    Redirect { dashboard: &'static str },
}

pub fn decide_public(claims: Option<&SessionClaims>) -> PublicDecision {
    match claims {
        Some(claims) => PublicDecision::Redirect {
            dashboard: dashboard_path_for(&claims.role),
        },
        None => PublicDecision::Render,
    }
}

#[instrument(skip(session))]
pub fn evaluate_public<S: TokenStore>(session: &mut Session<S>) -> PublicDecision {
    let claims = session.active_claims();
    let decision = decide_public(claims.as_ref());
    debug!(?decision, "Public gate evaluated");
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InMemoryTokenStore, TokenConfig};
    use chrono::{Duration, Utc};
    use rstest::rstest;
    use strum::IntoEnumIterator;

    const COOKIE: &str = "token";

    fn claims(role: &str) -> SessionClaims {
        SessionClaims {
            sub: "user-1".to_string(),
            role: role.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        }
    }

    fn policy(roles: &[Role]) -> RoutePolicy {
        RoutePolicy::new(roles.iter().copied()).unwrap()
    }

    /// Every non-empty subset of the role enumeration
    fn all_policies() -> Vec<RoutePolicy> {
        let roles: Vec<Role> = Role::iter().collect();
        (1u32..(1 << roles.len()))
            .map(|mask| {
                let subset = roles
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| *role);
                RoutePolicy::new(subset).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_policy_is_rejected() {
        let result = RoutePolicy::new(std::iter::empty());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_renders_iff_role_allowed() {
        for policy in all_policies() {
            for role in Role::iter() {
                let decision = decide(Some(&claims(&role.to_string())), &policy);
                let rendered = matches!(decision, GateDecision::Authorized { .. });
                assert_eq!(rendered, policy.contains(role), "{role} vs {policy:?}");
            }
        }
    }

    #[test]
    fn test_absent_claims_always_redirect_to_login() {
        let logins = ["/login/admin", "/login/faculty", "/login/student"];
        for policy in all_policies() {
            let decision = decide(None, &policy);
            assert_eq!(decision.state(), GateState::Unauthenticated);
            assert!(logins.contains(&decision.redirect_target().unwrap()));
        }
    }

    #[test]
    fn test_unknown_role_is_never_authorized() {
        for policy in all_policies() {
            let decision = decide(Some(&claims("unknown_role")), &policy);
            assert_eq!(decision.state(), GateState::AuthenticatedUnauthorized);
            assert_eq!(decision.redirect_target(), Some("/"));
        }
    }

    #[rstest]
    #[case(Some("STUDENT"), &[Role::Admin], GateState::AuthenticatedUnauthorized, Some("/student/dashboard"))]
    #[case(None, &[Role::Faculty, Role::Coordinator], GateState::Unauthenticated, Some("/login/faculty"))]
    #[case(Some("unknown_role"), &[Role::Student], GateState::AuthenticatedUnauthorized, Some("/"))]
    #[case(None, &[Role::SuperAdmin, Role::Admin], GateState::Unauthenticated, Some("/login/admin"))]
    #[case(None, &[Role::Student], GateState::Unauthenticated, Some("/login/student"))]
    #[case(Some("ADMIN"), &[Role::Faculty], GateState::AuthenticatedUnauthorized, Some("/admin/dashboard"))]
    #[case(Some("COORDINATOR"), &[Role::Student], GateState::AuthenticatedUnauthorized, Some("/faculty/dashboard"))]
    #[case(Some("COORDINATOR"), &[Role::Faculty, Role::Coordinator], GateState::AuthenticatedAuthorized, None)]
    #[case(Some("SUPER_ADMIN"), &[Role::SuperAdmin, Role::Admin], GateState::AuthenticatedAuthorized, None)]
    fn test_gate_scenarios(
        #[case] role: Option<&str>,
        #[case] roles: &[Role],
        #[case] state: GateState,
        #[case] target: Option<&str>,
    ) {
        let claims = role.map(claims);
        let decision = decide(claims.as_ref(), &policy(roles));

        assert_eq!(decision.state(), state);
        assert_eq!(decision.redirect_target(), target);
    }

    #[rstest]
    #[case("admin")]
    #[case("Admin")]
    #[case("student")]
    #[case("super_admin")]
    fn test_non_canonical_role_is_unauthorized(#[case] role: &str) {
        let decision = decide(Some(&claims(role)), &policy(&[Role::Admin]));

        assert_eq!(decision.state(), GateState::AuthenticatedUnauthorized);
        assert_eq!(decision.redirect_target(), Some("/"));
    }

    #[rstest]
    #[case(None, PublicDecision::Render)]
    #[case(Some("ADMIN"), PublicDecision::Redirect { dashboard: "/admin/dashboard" })]
    #[case(Some("FACULTY"), PublicDecision::Redirect { dashboard: "/faculty/dashboard" })]
    #[case(Some("STUDENT"), PublicDecision::Redirect { dashboard: "/student/dashboard" })]
    #[case(Some("unknown_role"), PublicDecision::Redirect { dashboard: "/" })]
    fn test_public_gate(#[case] role: Option<&str>, #[case] expected: PublicDecision) {
        let claims = role.map(claims);
        assert_eq!(decide_public(claims.as_ref()), expected);
    }

    #[test]
    fn test_evaluate_evicts_expired_token_and_redirects() {
        let config = TokenConfig::new("test-secret", Duration::hours(1));
        let token = config
            .create_token_expiring_at("user-1", "ADMIN", Utc::now().timestamp() - 1)
            .unwrap();
        let store = InMemoryTokenStore::with_token(COOKIE, token, Utc::now());
        let mut session = Session::new(store, config, COOKIE);

        let decision = evaluate(&mut session, &policy(&[Role::Admin]));

        assert_eq!(decision.redirect_target(), Some("/login/admin"));
        assert_eq!(session.into_store().get(COOKIE), None);
    }

    #[test]
    fn test_evaluate_renders_for_live_token() {
        let config = TokenConfig::new("test-secret", Duration::hours(1));
        let token = config.create_token("user-1", "STUDENT").unwrap();
        let store = InMemoryTokenStore::with_token(COOKIE, token, Utc::now());
        let mut session = Session::new(store, config, COOKIE);

        match evaluate(&mut session, &policy(&[Role::Student])) {
            GateDecision::Authorized { claims } => assert_eq!(claims.sub, "user-1"),
            other => panic!("Expected authorized, got {:?}", other),
        }
    }
}
