//! Client-side fragment router.
//!
//! Maps the location fragment of a single-page application to a registered
//! view, enforces authentication and role guards before rendering, manages
//! the lifecycle of the displayed view, and keeps browser navigation
//! gestures (back/forward, direct hash edits) consistent with the mounted
//! content.
//!
//! ## Architecture
//!
//! - [`router`]: the route table and the resolution state machine
//! - [`route`]: route descriptors, registration options, path normalization
//! - [`loader`]: the asynchronous view-loader capability
//! - [`auth`]: the authentication collaborator (roles, users, readiness)
//! - [`location`] / [`mount`]: the location-fragment and mount-point
//!   surfaces, with in-memory implementations for native targets
//! - [`view`]: opaque renderable content
//! - [`dom`] (wasm32 only): browser-backed location and mount point
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use fragment_router::{
//!     MemoryAuth, MemoryLocation, MemoryMount, RouteOptions, Router, View, static_view,
//! };
//!
//! let location = Arc::new(MemoryLocation::new());
//! let mount = Arc::new(MemoryMount::new());
//! let auth = Arc::new(MemoryAuth::new());
//! let router = Arc::new(Router::new(location, mount, auth));
//!
//! router.register("/", static_view(View::html("<h1>Home</h1>")), RouteOptions::new())?;
//! router.register("/login", static_view(View::html("<h1>Sign in</h1>")), RouteOptions::new())?;
//! router.register(
//!     "/dashboard",
//!     static_view(View::html("<h1>Dashboard</h1>")),
//!     RouteOptions::new().requires_auth().allowed_roles(["User", "Admin"]),
//! )?;
//!
//! router.run().await;
//! ```

pub mod auth;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod error;
pub mod loader;
pub mod location;
pub mod mount;
pub mod route;
pub mod router;
pub mod view;

pub use auth::{AuthProvider, AuthUser, MemoryAuth, Role};
pub use error::{RouterError, ViewError};
pub use loader::{ViewLoader, loader, static_view};
pub use location::{LocationProvider, MemoryLocation};
pub use mount::{MemoryMount, MountPoint};
pub use route::{MountHook, Route, RouteOptions, normalize_path};
pub use router::{Router, RouterConfig};
pub use view::View;
