use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::gate::RoutePolicy;
use crate::session::Role;

/// Landing path, the fallback for anything the table does not cover
pub const ROOT_PATH: &str = "/";

/// One of the three portal route groups
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Portal {
    Admin,
    Faculty,
    Student,
}

struct PortalRoutes {
    portal: Portal,
    roles: &'static [Role],
    login_path: &'static str,
    dashboard_path: &'static str,
}

// Rows are in priority order for login resolution.
static PORTAL_TABLE: [PortalRoutes; 3] = [
    PortalRoutes {
        portal: Portal::Admin,
        roles: &[Role::SuperAdmin, Role::Admin],
        login_path: "/login/admin",
        dashboard_path: "/admin/dashboard",
    },
    PortalRoutes {
        portal: Portal::Faculty,
        roles: &[Role::Faculty, Role::Coordinator],
        login_path: "/login/faculty",
        dashboard_path: "/faculty/dashboard",
    },
    PortalRoutes {
        portal: Portal::Student,
        roles: &[Role::Student],
        login_path: "/login/student",
        dashboard_path: "/student/dashboard",
    },
];

fn row(portal: Portal) -> &'static PortalRoutes {
    match portal {
        Portal::Admin => &PORTAL_TABLE[0],
        Portal::Faculty => &PORTAL_TABLE[1],
        Portal::Student => &PORTAL_TABLE[2],
    }
}

impl Portal {
    pub fn for_role(role: Role) -> Portal {
        PORTAL_TABLE
            .iter()
            .find(|routes| routes.roles.contains(&role))
            .map(|routes| routes.portal)
            .unwrap_or(Portal::Student)
    }

    pub fn roles(self) -> &'static [Role] {
        row(self).roles
    }

    pub fn login_path(self) -> &'static str {
        row(self).login_path
    }

    pub fn dashboard_path(self) -> &'static str {
        row(self).dashboard_path
    }

    /// Route policy guarding this portal's pages
    pub fn policy(self) -> RoutePolicy {
        RoutePolicy::from_static(self.roles())
    }
}

/// Login page for a route group: the first portal whose roles intersect the
/// group's allowed roles, student login otherwise
pub fn login_path_for(policy: &RoutePolicy) -> &'static str {
    PORTAL_TABLE
        .iter()
        .find(|routes| routes.roles.iter().any(|role| policy.contains(*role)))
        .map(|routes| routes.login_path)
        .unwrap_or(Portal::Student.login_path())
}

/// Dashboard for a raw role claim, `/` for unrecognized roles
pub fn dashboard_path_for(role: &str) -> &'static str {
    Role::from_claim(role)
        .map(|role| Portal::for_role(role).dashboard_path())
        .unwrap_or(ROOT_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_table_rows_match_portals() {
        for portal in Portal::iter() {
            assert_eq!(row(portal).portal, portal);
            assert!(!portal.roles().is_empty());
        }
    }

    #[test]
    fn test_every_role_belongs_to_exactly_one_portal() {
        for role in Role::iter() {
            let owners = PORTAL_TABLE
                .iter()
                .filter(|routes| routes.roles.contains(&role))
                .count();
            assert_eq!(owners, 1, "role {} must map to one portal", role);
        }
    }

    #[rstest]
    #[case("SUPER_ADMIN", "/admin/dashboard")]
    #[case("ADMIN", "/admin/dashboard")]
    #[case("FACULTY", "/faculty/dashboard")]
    #[case("COORDINATOR", "/faculty/dashboard")]
    #[case("STUDENT", "/student/dashboard")]
    #[case("student", "/")]
    #[case("Admin", "/")]
    #[case("unknown_role", "/")]
    #[case("", "/")]
    fn test_dashboard_path_for(#[case] role: &str, #[case] expected: &str) {
        assert_eq!(dashboard_path_for(role), expected);
    }

    #[rstest]
    #[case(&[Role::Admin], "/login/admin")]
    #[case(&[Role::SuperAdmin], "/login/admin")]
    #[case(&[Role::Faculty, Role::Coordinator], "/login/faculty")]
    #[case(&[Role::Coordinator], "/login/faculty")]
    #[case(&[Role::Student], "/login/student")]
    #[case(&[Role::Student, Role::Admin], "/login/admin")]
    #[case(&[Role::Student, Role::Faculty], "/login/faculty")]
    fn test_login_path_for(#[case] roles: &[Role], #[case] expected: &str) {
        let policy = RoutePolicy::new(roles.iter().copied()).unwrap();
        assert_eq!(login_path_for(&policy), expected);
    }

    #[test]
    fn test_portal_parses_from_path_segment() {
        assert_eq!("admin".parse::<Portal>().unwrap(), Portal::Admin);
        assert_eq!(Portal::Faculty.to_string(), "faculty");
        assert!("recruiter".parse::<Portal>().is_err());
    }
}
