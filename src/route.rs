//! Route descriptors and path normalization.

use crate::auth::Role;
use crate::loader::ViewLoader;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Hook invoked after a route's content is attached to the mount point.
pub type MountHook = Arc<dyn Fn() + Send + Sync>;

/// Normalizes a fragment into a route path.
///
/// An empty fragment maps to `/`; anything else gains a leading `/` if it
/// lacks one.
pub fn normalize_path(path: &str) -> String {
	if path.is_empty() {
		"/".to_string()
	} else if path.starts_with('/') {
		path.to_string()
	} else {
		format!("/{path}")
	}
}

/// Registration options for a route.
#[derive(Clone, Default)]
pub struct RouteOptions {
	requires_auth: bool,
	allowed_roles: Option<HashSet<Role>>,
	redirect_to: Option<String>,
	on_mount: Option<MountHook>,
}

impl RouteOptions {
	/// Creates the default options: public route, no redirection, no hook.
	pub fn new() -> Self {
		Self::default()
	}

	/// Requires an authenticated session before the view may render.
	pub fn requires_auth(mut self) -> Self {
		self.requires_auth = true;
		self
	}

	/// Restricts the route to the given roles.
	///
	/// The role check is honored even when `requires_auth` was not set.
	pub fn allowed_roles<I, R>(mut self, roles: I) -> Self
	where
		I: IntoIterator<Item = R>,
		R: Into<Role>,
	{
		self.allowed_roles = Some(roles.into_iter().map(Into::into).collect());
		self
	}

	/// Sets the redirect target used as the role-guard fallback and as the
	/// destination of role steering.
	pub fn redirect_to(mut self, path: impl AsRef<str>) -> Self {
		self.redirect_to = Some(normalize_path(path.as_ref()));
		self
	}

	/// Sets the post-mount hook for this route.
	pub fn on_mount<F>(mut self, hook: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.on_mount = Some(Arc::new(hook));
		self
	}
}

/// A path-to-view binding plus optional access guards.
#[derive(Clone)]
pub struct Route {
	path: String,
	loader: Arc<dyn ViewLoader>,
	requires_auth: bool,
	allowed_roles: Option<HashSet<Role>>,
	redirect_to: Option<String>,
	on_mount: Option<MountHook>,
}

impl Route {
	pub(crate) fn new(path: String, loader: Arc<dyn ViewLoader>, options: RouteOptions) -> Self {
		Self {
			path,
			loader,
			requires_auth: options.requires_auth,
			allowed_roles: options.allowed_roles,
			redirect_to: options.redirect_to,
			on_mount: options.on_mount,
		}
	}

	/// Returns the normalized route path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Whether the route requires an authenticated session.
	pub fn requires_auth(&self) -> bool {
		self.requires_auth
	}

	/// Returns the allowed role set, if the route is role-restricted.
	pub fn allowed_roles(&self) -> Option<&HashSet<Role>> {
		self.allowed_roles.as_ref()
	}

	/// Returns the configured redirect target.
	pub fn redirect_to(&self) -> Option<&str> {
		self.redirect_to.as_deref()
	}

	pub(crate) fn loader(&self) -> &Arc<dyn ViewLoader> {
		&self.loader
	}

	pub(crate) fn on_mount(&self) -> Option<&MountHook> {
		self.on_mount.as_ref()
	}

	/// Whether `role` may access this route.
	pub(crate) fn role_allowed(&self, role: &Role) -> bool {
		self.allowed_roles
			.as_ref()
			.map(|roles| roles.contains(role))
			.unwrap_or(true)
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("path", &self.path)
			.field("requires_auth", &self.requires_auth)
			.field("allowed_roles", &self.allowed_roles)
			.field("redirect_to", &self.redirect_to)
			.field("has_on_mount", &self.on_mount.is_some())
			.finish()
	}
}
