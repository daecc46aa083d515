use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::readable::{Access, Dependency, ReadableState};
use crate::subscribers::{Callback, Subscribers, Subscription};
use crate::Observable;

/// Derived read-only holder: a pure function of other holders,
/// recomputed synchronously whenever any of them changes. The cached
/// value is only replaced (and subscribers only notified) when the
/// recomputed result differs by value equality.
pub struct ComputedState<T> {
	body: Rc<ComputedBody<T>>,
}

struct ComputedBody<T> {
	value: RefCell<Option<T>>,
	compute: Box<dyn Fn() -> T>,
	subscribers: RefCell<Subscribers<T>>,
	dependencies: RefCell<Vec<(Dependency, Subscription)>>,
}

impl<T> Clone for ComputedState<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> ComputedState<T>
where
	T: PartialEq + 'static,
{
	/// Subscribes to every dependency, then runs one authoritative
	/// `compute` for the initial value. `compute` must be pure: it is
	/// re-invoked against the dependencies' current values on every
	/// dependency notification, regardless of which one fired.
	pub fn new(
		compute: impl Fn() -> T + 'static,
		dependencies: impl IntoIterator<Item = Dependency>,
	) -> Self {
		let body = Rc::new(ComputedBody {
			value: RefCell::new(None),
			compute: Box::new(compute),
			subscribers: RefCell::new(Subscribers::new()),
			dependencies: RefCell::new(Vec::new()),
		});

		for dependency in dependencies {
			let weak = Rc::downgrade(&body);
			let sub = dependency.observe(Rc::new(move || {
				if let Some(body) = weak.upgrade() {
					body.recompute();
				}
			}));
			body.dependencies.borrow_mut().push((dependency, sub));
		}

		let initial = (body.compute)();
		*body.value.borrow_mut() = Some(initial);

		ComputedState { body }
	}

	/// Returns the cached value. Never recomputes.
	#[inline]
	pub fn get(&self) -> Ref<'_, T> {
		self.body.get()
	}

	/// Appends `func` to the listeners, then replays the cached value
	/// to it once before returning.
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

impl<T> ComputedBody<T>
where
	T: 'static,
{
	fn get(&self) -> Ref<'_, T> {
		Ref::map(self.value.borrow(), |cache| cache.as_ref().unwrap())
	}

	fn subscribe(&self, func: Callback<T>) -> Subscription {
		let sub = self.subscribers.borrow_mut().add(func.clone());
		let value = self.get();
		func(&value);
		sub
	}

	fn unsubscribe(&self, sub: Subscription) -> bool {
		self.subscribers.borrow_mut().remove(sub)
	}

	fn notify(&self) {
		let snapshot = self.subscribers.borrow().snapshot();
		for func in snapshot {
			let value = self.get();
			func(&value);
		}
	}
}

impl<T> ComputedBody<T>
where
	T: PartialEq + 'static,
{
	fn recompute(&self) {
		// Replay pings arriving while the cache is unset belong to
		// construction; the initial compute runs once after every
		// dependency is wired.
		if self.value.borrow().is_none() {
			return;
		}

		let next = (self.compute)();
		if self.value.borrow().as_ref() == Some(&next) {
			return;
		}

		*self.value.borrow_mut() = Some(next);
		self.notify();
	}
}

impl<T> Drop for ComputedBody<T> {
	fn drop(&mut self) {
		for (dependency, sub) in self.dependencies.borrow_mut().drain(..) {
			dependency.unobserve(sub);
		}
	}
}

impl<T> Observable for ComputedBody<T>
where
	T: 'static,
{
	fn observe(&self, func: Rc<dyn Fn()>) -> Subscription {
		self.subscribe(Rc::new(move |_| func()))
	}

	fn unobserve(&self, sub: Subscription) -> bool {
		self.unsubscribe(sub)
	}
}

impl<T> Access<T> for ComputedBody<T>
where
	T: 'static,
{
	fn get(&self) -> Ref<'_, T> {
		ComputedBody::get(self)
	}

	fn subscribe(&self, func: Callback<T>) -> Subscription {
		ComputedBody::subscribe(self, func)
	}

	fn unsubscribe(&self, sub: Subscription) -> bool {
		ComputedBody::unsubscribe(self, sub)
	}

	fn observable(self: Rc<Self>) -> Rc<dyn Observable> {
		self
	}
}

impl<T> From<&ComputedState<T>> for ReadableState<T>
where
	T: 'static,
{
	fn from(computed: &ComputedState<T>) -> Self {
		ReadableState::new(computed.body.clone())
	}
}

impl<T> From<ComputedState<T>> for ReadableState<T>
where
	T: 'static,
{
	fn from(computed: ComputedState<T>) -> Self {
		ReadableState::new(computed.body)
	}
}
