//! Event keys.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of a notification channel.
///
/// Blanket-implemented for anything hashable, comparable, cloneable and printable:
/// `&'static str`, `String`, fieldless enums, integers.
///
/// ```rust
/// use tidings::EventKey;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Lifecycle { Ready, Closing }
///
/// fn accepts<E: EventKey>(_: E) {}
/// accepts(Lifecycle::Ready);
/// accepts("ready");
/// ```
pub trait EventKey: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T> EventKey for T where T: Eq + Hash + Clone + Debug + Send + Sync + 'static {}
