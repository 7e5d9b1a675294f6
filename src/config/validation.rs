//! Configuration validation.
//!
//! # Responsibilities
//! - Reject empty paths and handler names
//! - Detect the same method registered twice on one path
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RouteTableConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouteTableConfig;
use crate::routing::Method;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index}: path is empty")]
    EmptyPath { index: usize },

    #[error("route #{index}: handler name is empty")]
    EmptyHandler { index: usize },

    #[error("route #{index}: {method} {path} is already defined")]
    Duplicate {
        index: usize,
        method: Method,
        path: String,
    },
}

pub fn validate_config(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.path.is_empty() {
            errors.push(ValidationError::EmptyPath { index });
        }
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler { index });
        }

        let path = route.path.strip_prefix('/').unwrap_or(&route.path);
        if !seen.insert((route.method, path)) {
            errors.push(ValidationError::Duplicate {
                index,
                method: route.method,
                path: route.path.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
