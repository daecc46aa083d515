use std::cell::Ref;
use std::rc::Rc;

use crate::state::State;
use crate::subscribers::Subscription;
use crate::Observable;

/// Read half of a holder: current value plus typed change
/// subscription. Implemented by every holder body; consumers usually
/// go through [`ReadableState`] instead of naming this trait.
pub trait Access<T>: Observable {
	fn get(&self) -> Ref<'_, T>;

	fn subscribe(&self, func: Rc<dyn Fn(&T)>) -> Subscription;

	fn unsubscribe(&self, sub: Subscription) -> bool;

	/// Upcast used to build a [`Dependency`] out of a read handle.
	fn observable(self: Rc<Self>) -> Rc<dyn Observable>;
}

/// Read-only view over any holder. Cloning shares the underlying
/// holder, it does not copy the value.
pub struct ReadableState<T> {
	source: Rc<dyn Access<T>>,
}

impl<T> Clone for ReadableState<T> {
	fn clone(&self) -> Self {
		ReadableState {
			source: self.source.clone(),
		}
	}
}

impl<T> ReadableState<T>
where
	T: 'static,
{
	pub fn new(source: Rc<dyn Access<T>>) -> Self {
		ReadableState { source }
	}

	#[inline]
	pub fn get(&self) -> Ref<'_, T> {
		self.source.get()
	}

	/// Appends `func` to the holder's listeners, then replays the
	/// current value to it once before returning.
	pub fn subscribe(&self, func: impl Fn(&T) + 'static) -> Subscription {
		self.source.subscribe(Rc::new(func))
	}

	#[inline]
	pub fn unsubscribe(&self, sub: Subscription) -> bool {
		self.source.unsubscribe(sub)
	}

	/// Read-only view holding `func` applied to this holder's value,
	/// updated on every source change. Sugar over a private [`State`]
	/// plus one subscription; the view lives as long as its source.
	pub fn map<F, R>(&self, func: F) -> ReadableState<R>
	where
		F: Fn(&T) -> R + 'static,
		R: PartialEq + 'static,
	{
		let derived = State::new(func(&self.get()));
		self.subscribe({
			let derived = derived.clone();
			move |value| derived.set(func(value))
		});
		ReadableState::from(derived)
	}

	/// Value-erased handle to this holder's change notifications.
	pub fn dependency(&self) -> Dependency {
		Dependency::new(self.source.clone().observable())
	}
}

/// Value-erased handle to one holder's change notifications. The unit
/// [`crate::ComputedState`] dependency lists and
/// [`crate::ListenerRegistry`] entries are made of.
#[derive(Clone)]
pub struct Dependency {
	source: Rc<dyn Observable>,
}

impl Dependency {
	pub fn new(source: Rc<dyn Observable>) -> Self {
		Dependency { source }
	}

	#[inline]
	pub fn observe(&self, func: Rc<dyn Fn()>) -> Subscription {
		self.source.observe(func)
	}

	#[inline]
	pub fn unobserve(&self, sub: Subscription) -> bool {
		self.source.unobserve(sub)
	}
}
