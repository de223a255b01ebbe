//! # Run a single listener invocation unit.
//!
//! One unit = one listener × one emission, executed on its own tokio task.
//!
//! ## Flow
//! ```text
//! Sync listener:
//!   f(args) ──────────────► Ok  → done
//!                          └► Err / panic → hook.on_listener_error(..)
//!
//! Suspend-capable listener:
//!   f(args).await ────────► Ok  → done
//!                          └► Err / panic → hook.on_listener_error(..)
//! ```
//!
//! ## Rules
//! - Dispatch is a `match` on the variant fixed at construction.
//! - Panics become `ListenerError::Panicked` only when `catch_panics` is set.
//! - Whatever the hook does (return, panic) stays inside this unit.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;

use crate::args::Args;
use crate::error::{panic_message, ListenerError};
use crate::event::EventKey;
use crate::hooks::ErrorHook;
use crate::listeners::{Callable, Listener};

/// Runs `listener` with `args` and routes any failure to `hook`.
pub(crate) async fn run_unit<E: EventKey, A: Args>(
    event: E,
    listener: Listener<A>,
    args: A,
    hook: Arc<dyn ErrorHook<E, A>>,
    catch_panics: bool,
) {
    let Err(error) = invoke(&listener, args.clone(), catch_panics).await else {
        return;
    };

    tracing::debug!(
        event = ?event,
        listener = listener.name(),
        label = error.as_label(),
        hook = hook.name(),
        "listener failed"
    );
    hook.on_listener_error(&event, &listener, &args, error).await;
}

async fn invoke<A: Args>(
    listener: &Listener<A>,
    args: A,
    catch_panics: bool,
) -> Result<(), ListenerError> {
    let result = match listener.callable() {
        Callable::Sync(f) if catch_panics => {
            catch_unwind(AssertUnwindSafe(|| f(args))).map_err(panicked)?
        }
        Callable::Sync(f) => f(args),
        Callable::Suspend(f) if catch_panics => {
            // build the future inside the guarded block: `f` itself may panic
            AssertUnwindSafe(async { f(args).await })
                .catch_unwind()
                .await
                .map_err(panicked)?
        }
        Callable::Suspend(f) => f(args).await,
    };
    result.map_err(ListenerError::Failed)
}

fn panicked(payload: Box<dyn Any + Send>) -> ListenerError {
    ListenerError::Panicked {
        info: panic_message(payload.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookFn;
    use parking_lot::Mutex;

    type Seen = Arc<Mutex<Vec<String>>>;

    fn recording_hook(seen: Seen) -> Arc<dyn ErrorHook<&'static str, (u32,)>> {
        Arc::new(HookFn::new(
            move |event: &&'static str, _l: &Listener<(u32,)>, args: &(u32,), err: ListenerError| {
                seen.lock().push(format!("{event}:{}:{}", args.0, err.as_label()));
            },
        ))
    }

    #[tokio::test]
    async fn successful_listener_skips_hook() {
        let seen = Seen::default();
        let listener = Listener::from_fn(|(_,): (u32,)| {});

        run_unit("ok", listener, (1,), recording_hook(seen.clone()), true).await;
        assert!(seen.lock().is_empty());
    }

    #[tokio::test]
    async fn returned_error_reaches_hook_with_args() {
        let seen = Seen::default();
        let listener = Listener::from_async_fn(|(n,): (u32,)| async move {
            tokio::task::yield_now().await;
            Err::<(), _>(format!("bad {n}"))
        });

        run_unit("io", listener, (7,), recording_hook(seen.clone()), true).await;
        assert_eq!(*seen.lock(), vec!["io:7:listener_failed"]);
    }

    #[tokio::test]
    async fn panics_are_caught_for_both_variants() {
        let seen = Seen::default();
        let sync = Listener::from_fn(|(_,): (u32,)| -> () { panic!("sync boom") });
        let suspend = Listener::from_async_fn(|(_,): (u32,)| async move {
            tokio::task::yield_now().await;
            if true {
                panic!("async boom");
            }
        });

        run_unit("a", sync, (1,), recording_hook(seen.clone()), true).await;
        run_unit("b", suspend, (2,), recording_hook(seen.clone()), true).await;
        assert_eq!(
            *seen.lock(),
            vec!["a:1:listener_panicked", "b:2:listener_panicked"]
        );
    }

    #[tokio::test]
    async fn uncaught_panic_unwinds_the_unit() {
        let seen = Seen::default();
        let listener = Listener::from_fn(|(_,): (u32,)| -> () { panic!("raw") });

        let unit = run_unit("raw", listener, (1,), recording_hook(seen.clone()), false);
        let joined = tokio::spawn(unit).await;

        assert!(joined.unwrap_err().is_panic());
        assert!(seen.lock().is_empty());
    }
}
