//! Client-side navigation table and guard enforcement.
//!
//! DESIGN
//! ======
//! Routes carry declarative guard metadata (`requires_auth`,
//! `requires_admin`, `roles`). [`authorize`] is the one place that reads it,
//! against the current [`AuthState`]. There is no server contract here: a
//! route allowed client side can still be refused by the backend.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use crate::net::types::Role;
use crate::state::auth::AuthState;

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
/// Where the UI goes after a successful login.
pub const AFTER_LOGIN: &str = "/schedule";
/// Where the UI goes after a successful registration.
pub const AFTER_REGISTER: &str = LOGIN;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Guard {
    pub requires_auth: bool,
    pub requires_admin: bool,
    /// Roles allowed in; empty means any role.
    pub roles: &'static [Role],
}

impl Guard {
    pub const PUBLIC: Self = Self { requires_auth: false, requires_admin: false, roles: &[] };
    pub const SIGNED_IN: Self = Self { requires_auth: true, requires_admin: false, roles: &[] };
    pub const ADMIN: Self = Self { requires_auth: true, requires_admin: true, roles: &[] };

    #[must_use]
    pub const fn roles(roles: &'static [Role]) -> Self {
        Self { requires_auth: true, requires_admin: false, roles }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Route {
    /// Pattern with `:param` and optional `:param?` segments.
    pub path: &'static str,
    pub name: &'static str,
    pub guard: Guard,
}

pub static ROUTES: &[Route] = &[
    Route { path: "/", name: "Home", guard: Guard::PUBLIC },
    Route { path: "/schedule", name: "Classes Schedule", guard: Guard::PUBLIC },
    Route { path: "/login", name: "Login", guard: Guard::PUBLIC },
    Route { path: "/register", name: "Register", guard: Guard::PUBLIC },
    Route { path: "/profile", name: "Profile", guard: Guard::SIGNED_IN },
    Route { path: "/pricing", name: "Pricing", guard: Guard::PUBLIC },
    Route { path: "/reservations", name: "Reservations", guard: Guard::SIGNED_IN },
    Route { path: "/payments", name: "Payments", guard: Guard::SIGNED_IN },
    Route { path: "/attendance/:classId?", name: "Attendance", guard: Guard::roles(&[Role::Admin, Role::Instructor]) },
    Route { path: "/school-info", name: "School Info", guard: Guard::PUBLIC },
    Route { path: "/admin/instructors", name: "Admin Instructors", guard: Guard::ADMIN },
    Route { path: "/admin/classes", name: "Admin Classes", guard: Guard::ADMIN },
    Route { path: "/admin/students", name: "Admin Students", guard: Guard::ADMIN },
    Route { path: "/admin/reports/attendance", name: "Attendance Report", guard: Guard::ADMIN },
    Route { path: "/admin/reports/analytics", name: "Class Analytics", guard: Guard::ADMIN },
];

#[derive(Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'static Route,
    pub params: Vec<(&'static str, &'a str)>,
}

impl<'a> RouteMatch<'a> {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(&'static str),
    NotFound,
}

/// Find the route for a concrete path. Query strings, fragments and a
/// trailing slash are ignored.
#[must_use]
pub fn resolve(path: &str) -> Option<RouteMatch<'_>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    ROUTES
        .iter()
        .find_map(|route| match_pattern(route.path, path).map(|params| RouteMatch { route, params }))
}

/// Apply `route`'s guard to the current auth state.
///
/// Unauthenticated visitors are sent to the login page; signed-in users
/// lacking the admin flag or an allowed role are sent home.
#[must_use]
pub fn authorize(route: &Route, auth: &AuthState) -> Navigation {
    let guard = route.guard;
    let needs_login = guard.requires_auth || guard.requires_admin || !guard.roles.is_empty();
    if needs_login && !auth.is_logged_in {
        return Navigation::Redirect(LOGIN);
    }
    if guard.requires_admin && !auth.is_admin() {
        return Navigation::Redirect(HOME);
    }
    if !guard.roles.is_empty() && !auth.role.is_some_and(|role| guard.roles.contains(&role)) {
        return Navigation::Redirect(HOME);
    }
    Navigation::Allow
}

/// Resolve and authorize in one step.
#[must_use]
pub fn navigate(path: &str, auth: &AuthState) -> Navigation {
    match resolve(path) {
        Some(matched) => authorize(matched.route, auth),
        None => Navigation::NotFound,
    }
}

fn match_pattern<'a>(pattern: &'static str, path: &'a str) -> Option<Vec<(&'static str, &'a str)>> {
    let mut actual = path.split('/').filter(|segment| !segment.is_empty()).peekable();
    let mut params = Vec::new();

    for expected in pattern.split('/').filter(|segment| !segment.is_empty()) {
        match expected.strip_prefix(':') {
            Some(name) => match name.strip_suffix('?') {
                Some(optional) => {
                    if let Some(value) = actual.next() {
                        params.push((optional, value));
                    }
                }
                None => params.push((name, actual.next()?)),
            },
            None => {
                if actual.next()? != expected {
                    return None;
                }
            }
        }
    }

    if actual.peek().is_some() {
        return None;
    }
    Some(params)
}
