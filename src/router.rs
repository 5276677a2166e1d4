//! Core router implementation.
//!
//! The router owns the route table and the current-route pointer. It
//! resolves navigation events to a route, evaluates authentication and role
//! guards, invokes the matched route's view loader, swaps the mount point's
//! content, and triggers post-mount initialization.
//!
//! Resolution is event-driven: [`Router::navigate`] only writes the
//! location fragment, and the resulting fragment-change event re-enters the
//! resolution path. Redirects work the same way, so back/forward gestures,
//! direct hash edits, and programmatic navigation all flow through the one
//! entry point, [`Router::handle_route`].

use crate::auth::{AuthProvider, Role};
use crate::error::RouterError;
use crate::loader::ViewLoader;
use crate::location::LocationProvider;
use crate::mount::MountPoint;
use crate::route::{MountHook, Route, RouteOptions, normalize_path};
use crate::view::{View, html_escape};
use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Router configuration.
#[derive(Debug, Clone)]
pub struct RouterConfig {
	/// Fallback target for unmatched paths and failed role guards.
	pub home_path: String,
	/// Redirect target for unauthenticated access to guarded routes.
	pub login_path: String,
	/// Markup shown while a view loader is running.
	pub loading_view: View,
	/// Upper bound on consecutive redirects before resolution is aborted.
	pub max_redirects: usize,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			home_path: "/".to_string(),
			login_path: "/login".to_string(),
			loading_view: View::html(r#"<div class="route-loading">Loading...</div>"#),
			max_redirects: 8,
		}
	}
}

/// Outcome of a single resolution pass.
enum Resolution {
	/// Render the matched route.
	Render(Route),
	/// Update the fragment and terminate; the change event re-resolves.
	Redirect(String),
}

/// The client-side router.
///
/// One router per application: constructed at bootstrap with its
/// collaborators and shared behind [`Arc`] by anything that needs to
/// navigate.
///
/// # Example
///
/// ```ignore
/// let location = Arc::new(MemoryLocation::new());
/// let mount = Arc::new(MemoryMount::new());
/// let auth = Arc::new(MemoryAuth::new());
///
/// let router = Arc::new(Router::new(location, mount, auth));
/// router.register("/", static_view(View::html("<h1>Home</h1>")), RouteOptions::new())?;
/// router.register("/login", login_loader(), RouteOptions::new())?;
/// router.run().await;
/// ```
pub struct Router {
	routes: RwLock<Vec<Route>>,
	steering: RwLock<Vec<(String, Role)>>,
	current_route: RwLock<Option<Route>>,
	after_mount: RwLock<Option<MountHook>>,
	/// Consecutive redirects in the current resolution chain.
	redirects: Mutex<usize>,
	events: Mutex<Option<UnboundedReceiver<()>>>,
	location: Arc<dyn LocationProvider>,
	mount: Arc<dyn MountPoint>,
	auth: Arc<dyn AuthProvider>,
	config: RouterConfig,
}

impl Router {
	/// Creates a router with the default configuration.
	pub fn new(
		location: Arc<dyn LocationProvider>,
		mount: Arc<dyn MountPoint>,
		auth: Arc<dyn AuthProvider>,
	) -> Self {
		Self::with_config(location, mount, auth, RouterConfig::default())
	}

	/// Creates a router with an explicit configuration.
	pub fn with_config(
		location: Arc<dyn LocationProvider>,
		mount: Arc<dyn MountPoint>,
		auth: Arc<dyn AuthProvider>,
		config: RouterConfig,
	) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded();
		location.subscribe(events_tx);

		Self {
			routes: RwLock::new(Vec::new()),
			steering: RwLock::new(Vec::new()),
			current_route: RwLock::new(None),
			after_mount: RwLock::new(None),
			redirects: Mutex::new(0),
			events: Mutex::new(Some(events_rx)),
			location,
			mount,
			auth,
			config,
		}
	}

	/// Registers a route.
	///
	/// The path is normalized to begin with `/`. Registering a path twice
	/// is rejected; the table keeps its first registration.
	pub fn register(
		&self,
		path: &str,
		loader: Arc<dyn ViewLoader>,
		options: RouteOptions,
	) -> Result<(), RouterError> {
		let path = normalize_path(path);
		let mut routes = self.routes.write();
		if routes.iter().any(|route| route.path() == path) {
			return Err(RouterError::DuplicateRoute(path));
		}
		routes.push(Route::new(path, loader, options));
		Ok(())
	}

	/// Returns the registered route whose path equals the normalized input.
	pub fn find(&self, path: &str) -> Option<Route> {
		let path = normalize_path(path);
		self.routes
			.read()
			.iter()
			.find(|route| route.path() == path)
			.cloned()
	}

	/// Whether a route is registered for `path`.
	pub fn route_exists(&self, path: &str) -> bool {
		self.find(path).is_some()
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.read().len()
	}

	/// Declares that `role` arriving at `path` is steered to the route's
	/// configured redirect target instead of the requested view.
	pub fn steer(&self, path: &str, role: impl Into<Role>) {
		self.steering
			.write()
			.push((normalize_path(path), role.into()));
	}

	/// Installs the hook run after every successful mount, regardless of
	/// path. This is where navigation-bar re-initialization belongs.
	pub fn after_mount<F>(&self, hook: F)
	where
		F: Fn() + Send + Sync + 'static,
	{
		*self.after_mount.write() = Some(Arc::new(hook));
	}

	/// Requests a route change.
	///
	/// Writes the normalized path into the location fragment; resolution
	/// happens when the resulting navigation event is processed, never
	/// synchronously. Writing the path the fragment already carries emits
	/// no event, so repeated navigation to the current path is a no-op.
	pub fn navigate(&self, path: &str) {
		self.location.set_fragment(&normalize_path(path));
	}

	/// Returns the normalized path carried in the current fragment.
	pub fn current_path(&self) -> String {
		normalize_path(&self.location.fragment())
	}

	/// Returns the last successfully resolved route, if any.
	pub fn current_route(&self) -> Option<Route> {
		self.current_route.read().clone()
	}

	/// Resolves the path in the current fragment.
	///
	/// Guard failures and unmatched paths terminate the resolution by
	/// redirecting; the fragment-change event then re-enters this method
	/// for the new target. Only a matched route with passing guards
	/// reaches the view loader.
	pub async fn handle_route(&self) {
		let path = self.current_path();

		match self.resolve(&path).await {
			Resolution::Render(route) => {
				*self.redirects.lock() = 0;
				*self.current_route.write() = Some(route.clone());
				self.load_view(&route).await;
			}
			Resolution::Redirect(target) => {
				if target == path {
					// No event would fire; the resolution stalls here.
					warn!(path = %path, "redirect target equals current path");
					*self.redirects.lock() = 0;
					return;
				}
				let exhausted = {
					let mut redirects = self.redirects.lock();
					*redirects += 1;
					*redirects > self.config.max_redirects
				};
				if exhausted {
					*self.redirects.lock() = 0;
					let err = RouterError::RedirectLoop(path.clone());
					error!(path = %path, "redirect budget exhausted");
					self.render_error(&err.to_string());
					return;
				}
				debug!(from = %path, to = %target, "redirecting");
				self.location.set_fragment(&target);
			}
		}
	}

	/// Awaits the auth provider's readiness, then performs the initial
	/// resolution.
	pub async fn start(&self) {
		self.auth.ready().await;
		self.handle_route().await;
	}

	/// Drives the router until every navigation-event sender is gone:
	/// performs the initial resolution, then resolves once per
	/// fragment-change event.
	pub async fn run(&self) {
		let Some(mut events) = self.events.lock().take() else {
			warn!("router event loop is already running");
			return;
		};
		self.start().await;
		while events.next().await.is_some() {
			self.handle_route().await;
		}
	}

	/// Processes every currently queued navigation event, following the
	/// redirect chains they produce, then returns.
	///
	/// Cooperative hosts and tests drive the router with this instead of
	/// [`Router::run`].
	pub async fn pump(&self) {
		loop {
			let pending = {
				let mut guard = self.events.lock();
				match guard.as_mut() {
					Some(events) => matches!(events.try_next(), Ok(Some(()))),
					None => false,
				}
			};
			if !pending {
				break;
			}
			self.handle_route().await;
		}
	}

	async fn resolve(&self, path: &str) -> Resolution {
		let Some(route) = self.find(path) else {
			debug!(path = %path, "no route matched, falling back to home");
			return Resolution::Redirect(self.config.home_path.clone());
		};

		if route.requires_auth() && !self.auth.is_authenticated().await {
			debug!(path = %path, "authentication required");
			return Resolution::Redirect(self.config.login_path.clone());
		}

		let needs_user = route.allowed_roles().is_some() || route.redirect_to().is_some();
		let user = if needs_user {
			self.auth.current_user().await
		} else {
			None
		};

		// The role check runs whenever a role set is present, even without
		// requires_auth; an absent user fails it.
		if route.allowed_roles().is_some() {
			let allowed = user
				.as_ref()
				.map(|user| route.role_allowed(&user.role))
				.unwrap_or(false);
			if !allowed {
				debug!(path = %path, "role not allowed");
				let target = route
					.redirect_to()
					.unwrap_or(self.config.home_path.as_str())
					.to_string();
				return Resolution::Redirect(target);
			}
		}

		// Second, independent redirect check: declared role steering.
		if let (Some(target), Some(user)) = (route.redirect_to(), user.as_ref()) {
			if self.is_steered(route.path(), &user.role) {
				debug!(path = %path, role = %user.role, "steering role to alternate view");
				return Resolution::Redirect(target.to_string());
			}
		}

		Resolution::Render(route)
	}

	/// Writes the loading placeholder, awaits the loader, and swaps in the
	/// result. A loader failure renders in place and is never re-thrown;
	/// the current-route pointer keeps the failed route.
	async fn load_view(&self, route: &Route) {
		self.mount.set_content(&self.config.loading_view);

		match route.loader().load().await {
			Ok(view) => {
				self.mount.set_content(&view);
				self.initialize_view(route);
			}
			Err(err) => {
				error!(path = %route.path(), error = %err, "view loader failed");
				self.render_error(err.message());
			}
		}
	}

	/// Runs the route's own hook, then the unconditional post-mount hook,
	/// so page scripts and the navigation bar observe the freshly attached
	/// content.
	fn initialize_view(&self, route: &Route) {
		if let Some(hook) = route.on_mount() {
			hook();
		}
		let after_mount = self.after_mount.read().clone();
		if let Some(hook) = after_mount {
			hook();
		}
	}

	fn render_error(&self, message: &str) {
		let markup = format!(
			"<div class=\"route-error\"><p>{}</p><a href=\"#{}\">Go home</a></div>",
			html_escape(message),
			self.config.home_path,
		);
		self.mount.set_content(&View::html(markup));
	}

	fn is_steered(&self, path: &str, role: &Role) -> bool {
		self.steering
			.read()
			.iter()
			.any(|(steered_path, steered_role)| steered_path == path && steered_role == role)
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.routes.read().len())
			.field("current_route", &*self.current_route.read())
			.field("config", &self.config)
			.finish()
	}
}
