//! Route-level access control.
//!
//! An [`AccessPolicy`] is an ordered table of rules. The first rule whose
//! method and path pattern match the request decides; requests matching no
//! rule are permitted and left to routing.

use axum::http::Method;

use crate::{
    error::AppError,
    models::{Principal, Role},
};

/// Path shapes a rule can match. Trailing slashes are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// The path itself
    Exact(String),
    /// The path and everything below it
    Subtree(String),
    /// A single segment directly below the path, e.g. `/api/books/{id}`
    Item(String),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        match self {
            PathPattern::Exact(base) => path == normalize(base),
            PathPattern::Subtree(base) => {
                path == normalize(base) || below(path, normalize(base)).is_some()
            }
            PathPattern::Item(base) => below(path, normalize(base))
                .is_some_and(|segment| !segment.is_empty() && !segment.contains('/')),
        }
    }
}

/// Remainder of `path` under `base`, without the separating slash
fn below<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    if base == "/" {
        return path.strip_prefix('/');
    }
    path.strip_prefix(base)?.strip_prefix('/')
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// What a matching rule demands of the principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Public,
    AnyRole(Vec<Role>),
}

#[derive(Debug, Clone)]
pub struct AccessRule {
    pub method: Method,
    pub path: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn new(method: Method, path: PathPattern, requirement: Requirement) -> Self {
        Self {
            method,
            path,
            requirement,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path.matches(path)
    }
}

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No authenticated principal
    Unauthenticated,
    /// Authenticated, but without any of the required roles
    Forbidden,
}

impl Denial {
    pub fn into_error(self, realm: &str) -> AppError {
        match self {
            Denial::Unauthenticated => AppError::unauthenticated(realm),
            Denial::Forbidden => {
                AppError::Authorization("Insufficient privileges for this operation".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// Rules for the books resource mounted at `base`:
    /// reads are public, creation needs USER or ADMIN, deletion needs ADMIN.
    pub fn books(base: &str) -> Self {
        Self::new(vec![
            AccessRule::new(Method::GET, PathPattern::Subtree(base.into()), Requirement::Public),
            AccessRule::new(
                Method::POST,
                PathPattern::Exact(base.into()),
                Requirement::AnyRole(vec![Role::User, Role::Admin]),
            ),
            AccessRule::new(
                Method::DELETE,
                PathPattern::Item(base.into()),
                Requirement::AnyRole(vec![Role::Admin]),
            ),
        ])
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    /// Decide whether `principal` may issue `method` on `path`
    pub fn check(&self, method: &Method, path: &str, principal: &Principal) -> Result<(), Denial> {
        let Some(rule) = self.rules.iter().find(|rule| rule.matches(method, path)) else {
            return Ok(());
        };

        match &rule.requirement {
            Requirement::Public => Ok(()),
            Requirement::AnyRole(_) if !principal.is_authenticated() => Err(Denial::Unauthenticated),
            Requirement::AnyRole(roles) if principal.has_any_role(roles) => Ok(()),
            Requirement::AnyRole(_) => Err(Denial::Forbidden),
        }
    }
}
