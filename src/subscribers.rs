use std::cell::Cell;
use std::rc::Rc;

use smallvec::SmallVec;

thread_local! {
	static NEXT_SUBSCRIPTION: Cell<u64> = const { Cell::new(1) };
}

/// Handle identifying one registered listener. Only meaningful for
/// the holder that issued it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Subscription(u64);

impl Subscription {
	pub(crate) fn next() -> Self {
		NEXT_SUBSCRIPTION.with(|id| {
			let value = id.get();
			id.set(value + 1);
			Subscription(value)
		})
	}
}

pub(crate) type Callback<T> = Rc<dyn Fn(&T)>;

/// Insertion-ordered listener store shared by every holder body.
/// Insertion order is the notification order.
pub(crate) struct Subscribers<T> {
	entries: SmallVec<[Entry<T>; 2]>,
}

struct Entry<T> {
	sub: Subscription,
	func: Callback<T>,
}

impl<T> Subscribers<T> {
	pub fn new() -> Self {
		Subscribers {
			entries: SmallVec::new(),
		}
	}

	pub fn add(&mut self, func: Callback<T>) -> Subscription {
		let sub = Subscription::next();
		self.entries.push(Entry { sub, func });
		sub
	}

	pub fn remove(&mut self, sub: Subscription) -> bool {
		match self.entries.iter().position(|entry| entry.sub == sub) {
			Some(index) => {
				self.entries.remove(index);
				true
			}
			None => false,
		}
	}

	/// One delivery pass iterates over a snapshot, so listeners added
	/// or removed while the pass runs do not affect it.
	pub fn snapshot(&self) -> SmallVec<[Callback<T>; 2]> {
		self.entries.iter().map(|entry| entry.func.clone()).collect()
	}
}
