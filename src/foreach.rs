use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::readable::ReadableState;
use crate::subscribers::Subscription;

/// Projects an ordered item sequence onto an ordered component
/// sequence, by index. When the source changes, vanished trailing
/// items drop their components, changed items rebuild theirs in
/// place, and new trailing items append fresh ones. There is no
/// keyed diffing: inserting at the front rebuilds every later index.
pub struct ForEachState<T, C>
where
	T: 'static,
{
	body: Rc<ForEachBody<T, C>>,
}

struct ForEachBody<T, C>
where
	T: 'static,
{
	state: ReadableState<Vec<T>>,
	factory: Box<dyn Fn(&T) -> C>,
	items: RefCell<Vec<T>>,
	components: RefCell<Vec<Rc<C>>>,
	sub: Cell<Option<Subscription>>,
}

impl<T, C> Clone for ForEachState<T, C>
where
	T: 'static,
{
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T, C> ForEachState<T, C>
where
	T: Clone + PartialEq + 'static,
	C: 'static,
{
	/// Subscribes to `source` immediately; the subscription replay
	/// runs the first reconciliation against its current value.
	pub fn new(
		source: impl Into<ReadableState<Vec<T>>>,
		factory: impl Fn(&T) -> C + 'static,
	) -> Self {
		let state = source.into();
		let body = Rc::new(ForEachBody {
			state: state.clone(),
			factory: Box::new(factory),
			items: RefCell::new(Vec::new()),
			components: RefCell::new(Vec::new()),
			sub: Cell::new(None),
		});

		let weak = Rc::downgrade(&body);
		let sub = state.subscribe(move |items| {
			if let Some(body) = weak.upgrade() {
				body.reconcile(items);
			}
		});
		body.sub.set(Some(sub));

		ForEachState { body }
	}

	/// Like [`new`](ForEachState::new) for a source that may carry no
	/// sequence at all; `None` reconciles as an empty sequence.
	pub fn new_optional(
		source: impl Into<ReadableState<Option<Vec<T>>>>,
		factory: impl Fn(&T) -> C + 'static,
	) -> Self {
		let source = source.into();
		Self::new(
			source.map(|items| items.clone().unwrap_or_default()),
			factory,
		)
	}

	/// Independent copy of the projected sequence. Mutating the
	/// returned vector never affects the reconciler; the components
	/// themselves are shared.
	pub fn components(&self) -> Vec<Rc<C>> {
		self.body.components.borrow().clone()
	}

	/// The source, read-only, for collaborators that want raw item
	/// changes independently of component reconciliation.
	pub fn state(&self) -> ReadableState<Vec<T>> {
		self.body.state.clone()
	}
}

impl<T, C> ForEachBody<T, C>
where
	T: Clone + PartialEq + 'static,
	C: 'static,
{
	fn reconcile(&self, next: &[T]) {
		let mut items = self.items.borrow_mut();
		let mut components = self.components.borrow_mut();

		// Trailing items vanished: truncate back to front.
		while items.len() > next.len() {
			items.pop();
			components.pop();
		}

		for (index, item) in next.iter().enumerate() {
			if index < items.len() {
				// Positional comparison only. A changed item is
				// rebuilt in place; components never move between
				// indices.
				if items[index] != *item {
					components[index] = Rc::new((self.factory)(item));
					items[index] = item.clone();
				}
			} else {
				components.push(Rc::new((self.factory)(item)));
				items.push(item.clone());
			}
		}

		tracing::trace!(len = items.len(), "reconciled");
	}
}

impl<T, C> Drop for ForEachBody<T, C>
where
	T: 'static,
{
	fn drop(&mut self) {
		if let Some(sub) = self.sub.get() {
			self.state.unsubscribe(sub);
		}
	}
}
