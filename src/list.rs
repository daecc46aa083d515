use std::cell::Ref;
use std::fmt::Debug;

use crate::error::OutOfBounds;
use crate::readable::{Dependency, ReadableState};
use crate::state::State;
use crate::subscribers::Subscription;

/// Ordered-collection holder. Every mutation builds the next vector
/// and funnels through [`set`](ListState::set), so list operations
/// inherit equality suppression and snapshot notification from the
/// plain holder. List-shaped operations live only here; a scalar
/// holder cannot be asked for them.
pub struct ListState<E> {
	state: State<Vec<E>>,
}

impl<E> Clone for ListState<E> {
	fn clone(&self) -> Self {
		Self {
			state: self.state.clone(),
		}
	}
}

impl<E> Default for ListState<E>
where
	E: Clone + PartialEq + 'static,
{
	fn default() -> Self {
		ListState::new(std::iter::empty())
	}
}

impl<E> ListState<E>
where
	E: Clone + PartialEq + 'static,
{
	pub fn new(initial: impl IntoIterator<Item = E>) -> Self {
		ListState {
			state: State::new(initial.into_iter().collect()),
		}
	}

	#[inline]
	pub fn get(&self) -> Ref<'_, Vec<E>> {
		self.state.get()
	}

	#[inline]
	pub fn set(&self, items: Vec<E>) {
		self.state.set(items)
	}

	pub fn subscribe(&self, func: impl Fn(&Vec<E>) + 'static) -> Subscription {
		self.state.subscribe(func)
	}

	#[inline]
	pub fn unsubscribe(&self, sub: Subscription) -> bool {
		self.state.unsubscribe(sub)
	}

	pub fn map<F, R>(&self, func: F) -> ReadableState<R>
	where
		F: Fn(&Vec<E>) -> R + 'static,
		R: PartialEq + 'static,
	{
		self.state.map(func)
	}

	pub fn dependency(&self) -> Dependency {
		self.state.dependency()
	}

	pub fn push(&self, item: E) {
		self.state.update(|items| items.push(item));
	}

	pub fn extend(&self, items: impl IntoIterator<Item = E>) {
		self.state.update(|list| list.extend(items));
	}

	/// Removes and returns the last item, if any.
	pub fn pop(&self) -> Option<E> {
		let last = self.get().last().cloned()?;
		self.state.update(|items| {
			items.pop();
		});
		Some(last)
	}

	pub fn clear(&self) {
		self.set(Vec::new());
	}

	/// Keeps only the items for which `keep` returns true.
	pub fn retain(&self, keep: impl Fn(&E) -> bool) {
		self.state.update(|items| items.retain(|item| keep(item)));
	}

	/// Removes the first occurrence of `item`. Returns whether it was
	/// present.
	pub fn remove(&self, item: &E) -> bool {
		let Some(index) = self.index_of(item) else {
			return false;
		};
		self.state.update(|items| {
			items.remove(index);
		});
		true
	}

	/// Removes every occurrence of every listed item. Returns whether
	/// the list changed.
	pub fn remove_all(&self, items: &[E]) -> bool {
		let next: Vec<E> = {
			let current = self.get();
			current
				.iter()
				.filter(|item| !items.contains(*item))
				.cloned()
				.collect()
		};
		let changed = next.len() != self.len();
		self.set(next);
		changed
	}

	/// Keeps only occurrences of the listed items. Returns whether the
	/// list changed.
	pub fn retain_all(&self, items: &[E]) -> bool {
		let next: Vec<E> = {
			let current = self.get();
			current
				.iter()
				.filter(|item| items.contains(*item))
				.cloned()
				.collect()
		};
		let changed = next.len() != self.len();
		self.set(next);
		changed
	}

	/// Applies `apply` to every item matching `matches`. Returns
	/// whether any item matched.
	pub fn update_if(
		&self,
		matches: impl Fn(&E) -> bool,
		apply: impl Fn(&E) -> E,
	) -> bool {
		let (next, matched) = {
			let current = self.get();
			let mut matched = false;
			let next = current
				.iter()
				.map(|item| {
					if matches(item) {
						matched = true;
						apply(item)
					} else {
						item.clone()
					}
				})
				.collect();
			(next, matched)
		};
		self.set(next);
		matched
	}

	/// Replaces the item at `index`. The list is left untouched when
	/// `index` is out of bounds.
	pub fn set_at(&self, index: usize, item: E) -> Result<(), OutOfBounds> {
		{
			let current = self.get();
			if index >= current.len() {
				return Err(OutOfBounds {
					index,
					len: current.len(),
				});
			}
		}
		self.state.update(|items| items[index] = item);
		Ok(())
	}

	/// Replaces the first occurrence of `old` with `new`. Returns
	/// whether `old` was present.
	pub fn replace(&self, old: &E, new: E) -> bool {
		let Some(index) = self.index_of(old) else {
			return false;
		};
		self.state.update(|items| items[index] = new);
		true
	}

	pub fn index_of(&self, item: &E) -> Option<usize> {
		self.get().iter().position(|current| current == item)
	}

	pub fn contains(&self, item: &E) -> bool {
		self.get().contains(item)
	}

	pub fn contains_all(&self, items: &[E]) -> bool {
		let current = self.get();
		items.iter().all(|item| current.contains(item))
	}

	pub fn len(&self) -> usize {
		self.get().len()
	}

	pub fn is_empty(&self) -> bool {
		self.get().is_empty()
	}

	pub fn get_at(&self, index: usize) -> Option<Ref<'_, E>> {
		Ref::filter_map(self.get(), |items| items.get(index)).ok()
	}
}

impl<E> From<&ListState<E>> for ReadableState<Vec<E>>
where
	E: 'static,
{
	fn from(list: &ListState<E>) -> Self {
		ReadableState::from(&list.state)
	}
}

impl<E> From<ListState<E>> for ReadableState<Vec<E>>
where
	E: 'static,
{
	fn from(list: ListState<E>) -> Self {
		ReadableState::from(list.state)
	}
}

impl<E> Debug for ListState<E>
where
	E: 'static + Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.state.fmt(f)
	}
}
