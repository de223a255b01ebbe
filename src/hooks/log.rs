//! # LogWriter - failure logger
//!
//! A hook that reports listener failures through `tracing` instead of panicking.
//! Enabled via the `logging` feature.
//!
//! ## Example output (with a `fmt` subscriber)
//! ```text
//! ERROR tidings::hooks::log: listener failed event="ready" listener="audit" listener_id=#3 label="listener_failed" error=error: disk full
//! ```

use async_trait::async_trait;

use crate::args::Args;
use crate::error::ListenerError;
use crate::event::EventKey;
use crate::hooks::ErrorHook;
use crate::listeners::Listener;

/// Logs listener failures at `error` level and swallows them.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<E, A> ErrorHook<E, A> for LogWriter
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
        tracing::error!(
            event = ?event,
            listener = listener.name(),
            listener_id = %listener.id(),
            label = error.as_label(),
            error = %error.as_message(),
            "listener failed"
        );
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logs_failure_instead_of_panicking() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let listener = Listener::from_fn(|(_,): (u8,)| {}).with_name("audit");
        tracing::subscriber::with_default(subscriber, || {
            futures::executor::block_on(LogWriter::new().on_listener_error(
                &"ready",
                &listener,
                &(1,),
                ListenerError::Failed("disk full".into()),
            ));
        });

        let out = String::from_utf8(captured.0.lock().clone()).unwrap();
        assert!(out.contains("ERROR"), "{out}");
        assert!(out.contains("listener failed"), "{out}");
        assert!(out.contains("audit"), "{out}");
        assert!(out.contains("listener_failed"), "{out}");
        assert!(out.contains("error: disk full"), "{out}");
        assert_eq!(
            <LogWriter as ErrorHook<&'static str, (u8,)>>::name(&LogWriter),
            "log"
        );
    }
}
