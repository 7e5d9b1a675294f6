//! Route registration errors.

use thiserror::Error;

/// Reasons a route table cannot be built.
///
/// Lookups never fail; these only come out of registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route path cannot be empty")]
    EmptyPath,

    #[error("parameter name missing in `{path}`")]
    EmptyParamName { path: String },

    #[error("wildcard must be the last token in `{path}`")]
    WildcardNotLast { path: String },

    #[error("`{path}` names its parameters {new:?}, but the route is already registered with {existing:?}")]
    ParamConflict {
        path: String,
        existing: Vec<String>,
        new: Vec<String>,
    },

    #[error("unknown HTTP method `{0}`")]
    UnknownMethod(String),

    #[error("no handler named `{name}` for {method} {path}")]
    UnresolvedHandler {
        method: String,
        path: String,
        name: String,
    },
}
