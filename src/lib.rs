pub mod macros;

mod computed;
mod error;
mod foreach;
mod list;
mod readable;
mod registry;
mod state;
mod subscribers;

use std::rc::Rc;

pub use computed::ComputedState;
pub use error::OutOfBounds;
pub use foreach::ForEachState;
pub use list::ListState;
pub use readable::{Access, Dependency, ReadableState};
pub use registry::ListenerRegistry;
pub use state::{State, Toggle};
pub use subscribers::Subscription;

/// Value-erased half of a holder: change pings without the value.
/// Dependency lists of a [`ComputedState`] and entries of a
/// [`ListenerRegistry`] are expressed in terms of this trait.
pub trait Observable: 'static {
	/// Register `func` to run after every subsequent value change.
	/// Mirrors subscriber replay: `func` is invoked once immediately.
	fn observe(&self, func: Rc<dyn Fn()>) -> Subscription;

	/// Drop a listener previously registered on this holder. Returns
	/// `false` when the subscription is unknown here.
	fn unobserve(&self, sub: Subscription) -> bool;
}
