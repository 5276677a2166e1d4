//! View loader abstractions.
//!
//! A [`ViewLoader`] is the capability that produces a route's renderable
//! content. Loading is asynchronous and may fail; the router renders
//! failures in place instead of propagating them.

use crate::error::ViewError;
use crate::view::View;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// Capability that produces a route's renderable content.
pub trait ViewLoader: Send + Sync {
	/// Loads the view content.
	fn load(&self) -> BoxFuture<'static, Result<View, ViewError>>;
}

/// Loader backed by an async closure.
struct FnLoader<F> {
	factory: F,
}

impl<F, Fut> ViewLoader for FnLoader<F>
where
	F: Fn() -> Fut + Send + Sync,
	Fut: Future<Output = Result<View, ViewError>> + Send + 'static,
{
	fn load(&self) -> BoxFuture<'static, Result<View, ViewError>> {
		Box::pin((self.factory)())
	}
}

/// Loader that clones a fixed view.
struct StaticLoader {
	view: View,
}

impl ViewLoader for StaticLoader {
	fn load(&self) -> BoxFuture<'static, Result<View, ViewError>> {
		let view = self.view.clone();
		Box::pin(async move { Ok(view) })
	}
}

/// Wraps an async closure as a view loader.
///
/// # Example
///
/// ```ignore
/// let profile = loader(|| async {
///     let markup = fetch_profile().await?;
///     Ok(View::html(markup))
/// });
/// router.register("/profile", profile, RouteOptions::new())?;
/// ```
pub fn loader<F, Fut>(factory: F) -> Arc<dyn ViewLoader>
where
	F: Fn() -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<View, ViewError>> + Send + 'static,
{
	Arc::new(FnLoader { factory })
}

/// Wraps a fixed view as an always-successful loader.
pub fn static_view(view: View) -> Arc<dyn ViewLoader> {
	Arc::new(StaticLoader { view })
}
