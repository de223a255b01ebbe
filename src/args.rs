//! # Positional event arguments.
//!
//! Arguments travel as a tuple. [`Args::Output`] defines what a resolved
//! `wait_for` yields for that tuple:
//!
//! ```text
//! ()            ──► ()
//! (T,)          ──► T
//! (T1, .., Tn)  ──► (T1, .., Tn)
//! ```
//!
//! Implemented for tuples up to arity 8.

/// Positional arguments carried by one emission.
///
/// Arguments are cloned once per invocation unit, so keep them cheap to clone
/// (wrap large payloads in `Arc`).
pub trait Args: Clone + Send + Sync + 'static {
    /// Value a resolved wait produces for these arguments.
    type Output: Send + 'static;

    /// Number of positional arguments.
    const ARITY: usize;

    /// Collapses the tuple into the wait result.
    fn into_output(self) -> Self::Output;
}

impl Args for () {
    type Output = ();
    const ARITY: usize = 0;

    fn into_output(self) -> Self::Output {}
}

impl<T: Clone + Send + Sync + 'static> Args for (T,) {
    type Output = T;
    const ARITY: usize = 1;

    fn into_output(self) -> Self::Output {
        self.0
    }
}

macro_rules! impl_args_tuple {
    ($arity:expr; $($name:ident),+) => {
        impl<$($name),+> Args for ($($name,)+)
        where
            $($name: Clone + Send + Sync + 'static),+
        {
            type Output = Self;
            const ARITY: usize = $arity;

            fn into_output(self) -> Self::Output {
                self
            }
        }
    };
}

impl_args_tuple!(2; T1, T2);
impl_args_tuple!(3; T1, T2, T3);
impl_args_tuple!(4; T1, T2, T3, T4);
impl_args_tuple!(5; T1, T2, T3, T4, T5);
impl_args_tuple!(6; T1, T2, T3, T4, T5, T6);
impl_args_tuple!(7; T1, T2, T3, T4, T5, T6, T7);
impl_args_tuple!(8; T1, T2, T3, T4, T5, T6, T7, T8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outputs_collapse_by_arity() {
        assert_eq!(<() as Args>::ARITY, 0);
        let () = ().into_output();

        assert_eq!(<(i32,) as Args>::ARITY, 1);
        assert_eq!((42,).into_output(), 42);

        assert_eq!(<(i32, i32) as Args>::ARITY, 2);
        assert_eq!((42, 43).into_output(), (42, 43));

        assert_eq!(
            ("a", 1u8, 2.5f64).into_output(),
            ("a", 1u8, 2.5f64)
        );
    }
}
