//! Default hook: fail loudly, inside the unit.

use async_trait::async_trait;

use crate::args::Args;
use crate::error::ListenerError;
use crate::event::EventKey;
use crate::hooks::ErrorHook;
use crate::listeners::Listener;

/// Re-raises listener failures as a panic of the invocation unit.
///
/// The unit is its own tokio task, so the panic is reported by the runtime and
/// stops nothing else: not the caller of `emit`, not sibling listeners.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reraise;

#[async_trait]
impl<E, A> ErrorHook<E, A> for Reraise
where
    E: EventKey,
    A: Args,
{
    async fn on_listener_error(
        &self,
        event: &E,
        listener: &Listener<A>,
        _args: &A,
        error: ListenerError,
    ) {
        panic!(
            "listener {} ({}) failed on event {:?}: {} ({})",
            listener.id(),
            listener.name(),
            event,
            error.as_message(),
            error.as_label()
        );
    }

    fn name(&self) -> &'static str {
        "reraise"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::panic_message;
    use futures::FutureExt;
    use std::panic::AssertUnwindSafe;

    #[tokio::test]
    async fn reraise_panics_with_original_message() {
        let listener = Listener::from_fn(|(_,): (u8,)| {}).with_name("parser");
        let fut = Reraise.on_listener_error(
            &"frame",
            &listener,
            &(1,),
            ListenerError::Failed("bad checksum".into()),
        );

        let payload = AssertUnwindSafe(fut).catch_unwind().await.unwrap_err();
        let msg = panic_message(payload.as_ref());
        assert!(msg.contains("parser"), "{msg}");
        assert!(msg.contains("\"frame\""), "{msg}");
        assert!(msg.contains("error: bad checksum (listener_failed)"), "{msg}");
    }
}
