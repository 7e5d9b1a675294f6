//! Handler abstraction and the two sentinel handlers.

use std::sync::{Arc, LazyLock};

use ::http::StatusCode;
use thiserror::Error;

use crate::http::Context;

/// Error a handler hands back to the serving layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("code={code}, message={message}")]
pub struct HttpError {
    pub code: u16,
    pub message: String,
}

impl HttpError {
    /// Error carrying the standard reason phrase for `code`, or an empty
    /// message when the code has none.
    pub fn new(code: u16) -> Self {
        let reason = StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default();
        Self {
            code,
            message: reason.to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

pub type HandlerResult = Result<(), HttpError>;

/// A request handler. Cloning is a reference-count bump.
pub type Handler = Arc<dyn Fn(&mut Context) -> HandlerResult + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler_fn<F>(f: F) -> Handler
where
    F: Fn(&mut Context) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

static NOT_FOUND: LazyLock<Handler> = LazyLock::new(|| handler_fn(|_| Err(HttpError::new(404))));

static METHOD_NOT_ALLOWED: LazyLock<Handler> =
    LazyLock::new(|| handler_fn(|_| Err(HttpError::new(405))));

/// Selected when no route matches the path.
pub fn not_found_handler() -> Handler {
    NOT_FOUND.clone()
}

/// Selected when the path matches but not for the requested method.
pub fn method_not_allowed_handler() -> Handler {
    METHOD_NOT_ALLOWED.clone()
}
