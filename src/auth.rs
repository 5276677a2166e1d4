//! Authentication collaborator.
//!
//! The router never mutates authentication state. It asks the provider
//! whether a session exists and which role it carries, and awaits the
//! provider's readiness once before the first resolution so providers that
//! restore sessions asynchronously (token refresh, profile fetch) are not
//! polled for.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::fmt;

/// A role identifier carried by an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role(String);

impl Role {
	/// Creates a role from its identifier.
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	/// Returns the role identifier.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Role {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for Role {
	fn from(name: String) -> Self {
		Self(name)
	}
}

/// The authenticated user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
	/// Stable identifier of the user.
	pub id: String,
	/// Display name.
	pub username: String,
	/// Role evaluated by route guards.
	pub role: Role,
}

impl AuthUser {
	/// Creates a user record.
	pub fn new(id: impl Into<String>, username: impl Into<String>, role: impl Into<Role>) -> Self {
		Self {
			id: id.into(),
			username: username.into(),
			role: role.into(),
		}
	}
}

/// Read-only view of the authentication state.
#[async_trait]
pub trait AuthProvider: Send + Sync {
	/// Resolves once the provider can answer session queries.
	///
	/// The default implementation is immediately ready.
	async fn ready(&self) {}

	/// Whether a session is currently authenticated.
	async fn is_authenticated(&self) -> bool;

	/// Returns the current user, if any.
	async fn current_user(&self) -> Option<AuthUser>;
}

/// In-memory auth provider.
///
/// Always ready; intended for native hosts and tests.
#[derive(Default)]
pub struct MemoryAuth {
	user: RwLock<Option<AuthUser>>,
}

impl MemoryAuth {
	/// Creates a provider with no authenticated session.
	pub fn new() -> Self {
		Self::default()
	}

	/// Establishes a session for `user`.
	pub fn sign_in(&self, user: AuthUser) {
		*self.user.write() = Some(user);
	}

	/// Clears the session.
	pub fn sign_out(&self) {
		*self.user.write() = None;
	}
}

#[async_trait]
impl AuthProvider for MemoryAuth {
	async fn is_authenticated(&self) -> bool {
		self.user.read().is_some()
	}

	async fn current_user(&self) -> Option<AuthUser> {
		self.user.read().clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_display() {
		assert_eq!(Role::new("Admin").to_string(), "Admin");
		assert_eq!(Role::from("User").as_str(), "User");
	}

	#[tokio::test]
	async fn test_memory_auth_session() {
		let auth = MemoryAuth::new();
		assert!(!auth.is_authenticated().await);
		assert!(auth.current_user().await.is_none());

		auth.sign_in(AuthUser::new("7", "nadia", "Admin"));
		assert!(auth.is_authenticated().await);
		let user = auth.current_user().await.unwrap();
		assert_eq!(user.username, "nadia");
		assert_eq!(user.role, Role::new("Admin"));

		auth.sign_out();
		assert!(!auth.is_authenticated().await);
	}

	#[tokio::test]
	async fn test_default_readiness_is_immediate() {
		let auth = MemoryAuth::new();
		auth.ready().await;
	}
}
