use std::cell::RefCell;
use std::rc::Rc;

use crate::readable::Dependency;
use crate::subscribers::Subscription;

/// Bookkeeping for long-lived subscriptions: an injectable auditing
/// aid, not part of notification delivery. Holders work the same with
/// or without one. Cloning shares the underlying registry, so an
/// application can thread one registry through the components that
/// should be audited together.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
	inner: Rc<RefCell<Vec<Entry>>>,
}

struct Entry {
	label: String,
	source: Dependency,
	sub: Subscription,
}

impl ListenerRegistry {
	pub fn new() -> Self {
		ListenerRegistry {
			inner: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Tracks a live subscription under a human-readable label.
	pub fn register(
		&self,
		label: impl Into<String>,
		source: Dependency,
		sub: Subscription,
	) {
		self.inner.borrow_mut().push(Entry {
			label: label.into(),
			source,
			sub,
		});
	}

	/// Stops tracking a subscription without unsubscribing it.
	pub fn unregister(&self, sub: Subscription) -> bool {
		let mut entries = self.inner.borrow_mut();
		match entries.iter().position(|entry| entry.sub == sub) {
			Some(index) => {
				entries.remove(index);
				true
			}
			None => false,
		}
	}

	/// Number of currently tracked subscriptions.
	pub fn count(&self) -> usize {
		self.inner.borrow().len()
	}

	/// Unsubscribes every tracked listener from its holder and clears
	/// the registry. Returns how many entries were disposed.
	pub fn dispose_all(&self) -> usize {
		let entries = std::mem::take(&mut *self.inner.borrow_mut());
		tracing::debug!(open = entries.len(), "disposing tracked listeners");
		for entry in &entries {
			if !entry.source.unobserve(entry.sub) {
				tracing::debug!(label = %entry.label, "listener was already gone");
			}
		}
		entries.len()
	}
}
