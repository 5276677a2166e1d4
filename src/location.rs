//! Location fragment collaborator.
//!
//! The routed path is carried in the fragment portion of the current URL;
//! an empty fragment is equivalent to `/`. Implementations notify
//! subscribers when the fragment changes so the router can re-resolve,
//! mirroring the browser's `hashchange` event: writing a fragment equal to
//! the current one emits no notification.

use futures::channel::mpsc::UnboundedSender;
use parking_lot::Mutex;

/// The location surface the router reads and writes.
pub trait LocationProvider: Send + Sync {
	/// Returns the current fragment, without the leading `#`.
	fn fragment(&self) -> String;

	/// Replaces the fragment, notifying subscribers if it changed.
	fn set_fragment(&self, path: &str);

	/// Registers a navigation-event subscriber.
	fn subscribe(&self, events: UnboundedSender<()>);
}

/// In-memory location for native targets and tests.
#[derive(Default)]
pub struct MemoryLocation {
	fragment: Mutex<String>,
	subscribers: Mutex<Vec<UnboundedSender<()>>>,
}

impl MemoryLocation {
	/// Creates a location with an empty fragment.
	pub fn new() -> Self {
		Self::default()
	}
}

impl LocationProvider for MemoryLocation {
	fn fragment(&self) -> String {
		self.fragment.lock().clone()
	}

	fn set_fragment(&self, path: &str) {
		{
			let mut fragment = self.fragment.lock();
			if *fragment == path {
				return;
			}
			*fragment = path.to_string();
		}
		self.subscribers
			.lock()
			.retain(|events| events.unbounded_send(()).is_ok());
	}

	fn subscribe(&self, events: UnboundedSender<()>) {
		self.subscribers.lock().push(events);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::channel::mpsc;

	#[test]
	fn test_fragment_roundtrip() {
		let location = MemoryLocation::new();
		assert_eq!(location.fragment(), "");

		location.set_fragment("/about");
		assert_eq!(location.fragment(), "/about");
	}

	#[test]
	fn test_change_notifies_subscribers() {
		let location = MemoryLocation::new();
		let (tx, mut rx) = mpsc::unbounded();
		location.subscribe(tx);

		location.set_fragment("/a");
		assert!(rx.try_next().unwrap().is_some());
	}

	#[test]
	fn test_same_fragment_emits_no_event() {
		let location = MemoryLocation::new();
		let (tx, mut rx) = mpsc::unbounded();
		location.subscribe(tx);

		location.set_fragment("/a");
		rx.try_next().unwrap();

		location.set_fragment("/a");
		assert!(rx.try_next().is_err());
	}

	#[test]
	fn test_dropped_subscriber_is_pruned() {
		let location = MemoryLocation::new();
		let (tx, rx) = mpsc::unbounded::<()>();
		location.subscribe(tx);
		drop(rx);

		// Next change discards the dead subscriber without panicking.
		location.set_fragment("/a");
		location.set_fragment("/b");
	}
}
