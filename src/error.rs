//! Error types for fragment routing.

use thiserror::Error;

/// Failure produced by a view loader.
///
/// This is the only failure in the routing subsystem that reaches the user:
/// the router renders the message in place of the view, together with a
/// control that navigates home.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ViewError {
	message: String,
}

impl ViewError {
	/// Creates a view error with a user-facing message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Returns the user-facing message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Error type for router operations.
///
/// Unmatched paths and guard failures are not errors; the router recovers
/// from them silently by redirecting. The variants here are programmer
/// errors surfaced through the registration surface and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A route with the same path is already registered.
	#[error("route already registered: {0}")]
	DuplicateRoute(String),
	/// A redirect chain exceeded the configured budget.
	#[error("redirect loop detected at: {0}")]
	RedirectLoop(String),
}
