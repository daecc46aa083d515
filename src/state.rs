use std::cell::{Ref, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use crate::readable::{Access, Dependency, ReadableState};
use crate::subscribers::{Callback, Subscribers, Subscription};
use crate::Observable;

/// Mutable value holder. Adopting a new value notifies every
/// subscriber synchronously, in subscription order; setting a
/// value-equal value is a no-op. Cloning shares the holder.
pub struct State<T> {
	body: Rc<StateBody<T>>,
}

pub(crate) struct StateBody<T> {
	value: RefCell<T>,
	subscribers: RefCell<Subscribers<T>>,
}

impl<T> Clone for State<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> Default for State<T>
where
	T: Default + 'static,
{
	fn default() -> Self {
		State::new(Default::default())
	}
}

pub trait Toggle {
	fn toggle(&mut self);
}

impl Toggle for bool {
	fn toggle(&mut self) {
		*self = !*self
	}
}

impl<T> State<T>
where
	T: 'static,
{
	pub fn new(value: T) -> Self {
		State {
			body: Rc::new(StateBody {
				value: RefCell::new(value),
				subscribers: RefCell::new(Subscribers::new()),
			}),
		}
	}

	#[inline]
	pub fn get(&self) -> Ref<'_, T> {
		self.body.get()
	}

	#[inline]
	pub fn set(&self, value: T)
	where
		T: PartialEq,
	{
		self.body.set(value)
	}

	#[inline]
	pub fn update(&self, func: impl FnOnce(&mut T))
	where
		T: Clone + PartialEq,
	{
		self.body.update(func)
	}

	#[inline]
	pub fn toggle(&self)
	where
		T: Toggle + Clone + PartialEq,
	{
		self.update(T::toggle)
	}

	/// Appends `func` to the listeners, then replays the current
	/// value to it once before returning.
	pub fn subscribe(&self, func: impl Fn(&T) + 'static) -> Subscription {
		self.body.subscribe(Rc::new(func))
	}

	#[inline]
	pub fn unsubscribe(&self, sub: Subscription) -> bool {
		self.body.unsubscribe(sub)
	}

	pub fn map<F, R>(&self, func: F) -> ReadableState<R>
	where
		F: Fn(&T) -> R + 'static,
		R: PartialEq + 'static,
	{
		ReadableState::from(self).map(func)
	}

	pub fn dependency(&self) -> Dependency {
		Dependency::new(self.body.clone())
	}
}

impl<T> StateBody<T> {
	pub fn get(&self) -> Ref<'_, T> {
		self.value.borrow()
	}

	pub fn set(&self, value: T)
	where
		T: PartialEq,
	{
		if *self.value.borrow() == value {
			return;
		}

		*self.value.borrow_mut() = value;
		self.notify();
	}

	pub fn update(&self, func: impl FnOnce(&mut T))
	where
		T: Clone + PartialEq,
	{
		let next = {
			let current = self.value.borrow();
			let mut next = current.clone();
			func(&mut next);
			if *current == next {
				return;
			}
			next
		};

		*self.value.borrow_mut() = next;
		self.notify();
	}

	pub fn subscribe(&self, func: Callback<T>) -> Subscription {
		let sub = self.subscribers.borrow_mut().add(func.clone());
		let value = self.value.borrow();
		func(&value);
		sub
	}

	pub fn unsubscribe(&self, sub: Subscription) -> bool {
		self.subscribers.borrow_mut().remove(sub)
	}

	/// One delivery pass over the listeners registered when the pass
	/// starts. The value borrow is held across each call, so setting
	/// this holder from inside its own listener fails fast instead of
	/// reordering delivery.
	fn notify(&self) {
		let snapshot = self.subscribers.borrow().snapshot();
		tracing::trace!(subscribers = snapshot.len(), "value changed");
		for func in snapshot {
			let value = self.value.borrow();
			func(&value);
		}
	}
}

impl<T: 'static> Observable for StateBody<T> {
	fn observe(&self, func: Rc<dyn Fn()>) -> Subscription {
		self.subscribe(Rc::new(move |_| func()))
	}

	fn unobserve(&self, sub: Subscription) -> bool {
		self.unsubscribe(sub)
	}
}

impl<T> Access<T> for StateBody<T>
where
	T: 'static,
{
	fn get(&self) -> Ref<'_, T> {
		StateBody::get(self)
	}

	fn subscribe(&self, func: Callback<T>) -> Subscription {
		StateBody::subscribe(self, func)
	}

	fn unsubscribe(&self, sub: Subscription) -> bool {
		StateBody::unsubscribe(self, sub)
	}

	fn observable(self: Rc<Self>) -> Rc<dyn Observable> {
		self
	}
}

impl<T> From<&State<T>> for ReadableState<T>
where
	T: 'static,
{
	fn from(state: &State<T>) -> Self {
		ReadableState::new(state.body.clone())
	}
}

impl<T> From<State<T>> for ReadableState<T>
where
	T: 'static,
{
	fn from(state: State<T>) -> Self {
		ReadableState::new(state.body)
	}
}

impl<T> Debug for State<T>
where
	T: 'static + Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.get().fmt(f)
	}
}
