pub use enclose::*;

/// Builds a [`ComputedState`](crate::ComputedState) over the named
/// holders: each name is cloned into the compute closure and listed
/// as a dependency.
///
/// ```ignore
/// let full = computed!((first, last) => format!("{} {}", first.get(), last.get()));
/// ```
#[macro_export]
macro_rules! computed {
    (( $($dep:ident),+ $(,)? ) => $($b:tt)*) => {
        $crate::ComputedState::new(
            $crate::macros::enclose!(($( $dep ),+) move || { $($b)* }),
            [$( $dep.dependency() ),+],
        )
    };
}
