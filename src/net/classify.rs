//! Decides whether an outgoing request path needs a bearer credential.
//!
//! Matching is a plain substring test: a path containing any listed
//! fragment anywhere is protected. The list is unordered and the only
//! consequence of a match is attaching the credential, so overlapping
//! fragments (`/create/` and `/students/create/`) need no resolution.

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;

/// Path fragments the backend guards with bearer auth.
pub const PROTECTED_FRAGMENTS: &[&str] = &[
    "/update/",
    "/create/",
    "/delete/",
    "/profile/",
    "/reports/",
    "/payments/",
    "/attendance/",
    "/instructors/",
    "/bookings/",
    "/admin/",
    "/students/create/",
    "/students/update/",
    "/students/delete/",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Protected,
    Public,
}

impl Access {
    #[must_use]
    pub fn is_protected(self) -> bool {
        self == Self::Protected
    }
}

/// Classify a request path against [`PROTECTED_FRAGMENTS`].
#[must_use]
pub fn classify_path(path: &str) -> Access {
    if PROTECTED_FRAGMENTS.iter().any(|fragment| path.contains(fragment)) {
        Access::Protected
    } else {
        Access::Public
    }
}
