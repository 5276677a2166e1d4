//! Browser bindings for wasm targets.
//!
//! Wires the router's collaborators to the real location fragment, the
//! `hashchange` event, and a DOM element acting as the mount point. Native
//! targets use the in-memory collaborators instead.

use crate::location::LocationProvider;
use crate::mount::MountPoint;
use crate::view::View;
use futures::channel::mpsc::UnboundedSender;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// The browser's location fragment.
///
/// Stateless: every call goes through `window.location`, so the value is
/// always what the address bar shows, including after back/forward
/// gestures and direct hash edits.
#[derive(Debug, Default)]
pub struct BrowserLocation;

impl BrowserLocation {
	/// Creates the browser-backed location.
	pub fn new() -> Self {
		Self
	}
}

impl LocationProvider for BrowserLocation {
	fn fragment(&self) -> String {
		web_sys::window()
			.and_then(|window| window.location().hash().ok())
			.map(|hash| hash.trim_start_matches('#').to_string())
			.unwrap_or_default()
	}

	fn set_fragment(&self, path: &str) {
		if let Some(window) = web_sys::window() {
			// The browser only fires `hashchange` when the value differs.
			let _ = window.location().set_hash(path);
		}
	}

	fn subscribe(&self, events: UnboundedSender<()>) {
		let Some(window) = web_sys::window() else {
			return;
		};
		let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
			let _ = events.unbounded_send(());
		}) as Box<dyn FnMut(web_sys::Event)>);
		let attached = window
			.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())
			.is_ok();
		if attached {
			// The listener lives for the page lifetime.
			closure.forget();
		}
	}
}

/// Mount point backed by a DOM element looked up by id on every write.
#[derive(Debug)]
pub struct ElementMount {
	element_id: String,
}

impl ElementMount {
	/// Creates a mount point targeting the element with the given id.
	pub fn new(element_id: impl Into<String>) -> Self {
		Self {
			element_id: element_id.into(),
		}
	}
}

impl MountPoint for ElementMount {
	fn set_content(&self, view: &View) {
		let element = web_sys::window()
			.and_then(|window| window.document())
			.and_then(|document| document.get_element_by_id(&self.element_id));
		match element {
			Some(element) => element.set_inner_html(&view.render_to_string()),
			None => tracing::warn!(id = %self.element_id, "mount element not found"),
		}
	}
}
