//! # Custom Hook Example
//!
//! Replaces the default re-raising failure policy:
//! - the first emitter logs failures through [`LogWriter`];
//! - the second counts them with a custom [`ErrorHook`].
//!
//! ## Run
//! ```bash
//! cargo run --example custom_hook --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tidings::{Emitter, ErrorHook, Listener, ListenerError, LogWriter};

struct FailureCounter {
    failed: AtomicU64,
    panicked: AtomicU64,
}

impl FailureCounter {
    fn new() -> Self {
        Self {
            failed: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
        }
    }

    fn print_stats(&self) {
        println!();
        println!("Failures:");
        println!(" ├─► Errors: {}", self.failed.load(Ordering::Relaxed));
        println!(" └─► Panics: {}", self.panicked.load(Ordering::Relaxed));
    }
}

#[async_trait::async_trait]
impl ErrorHook<&'static str, (u32,)> for FailureCounter {
    async fn on_listener_error(
        &self,
        event: &&'static str,
        listener: &Listener<(u32,)>,
        _args: &(u32,),
        error: ListenerError,
    ) {
        println!("[{event}] {} -> {}", listener.name(), error.as_label());
        match error {
            ListenerError::Panicked { .. } => self.panicked.fetch_add(1, Ordering::Relaxed),
            _ => self.failed.fetch_add(1, Ordering::Relaxed),
        };
    }

    fn name(&self) -> &'static str {
        "failure_counter"
    }
}

fn flaky() -> Listener<(u32,)> {
    Listener::from_fn(|(n,): (u32,)| {
        if n % 2 == 0 {
            Err(format!("even input {n}"))
        } else {
            Ok(())
        }
    })
    .with_name("flaky")
}

fn explosive() -> Listener<(u32,)> {
    Listener::from_fn(|(n,): (u32,)| {
        if n == 3 {
            panic!("three is not allowed");
        }
    })
    .with_name("explosive")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let logged: Emitter<&'static str, (u32,)> =
        Emitter::builder().with_error_hook(LogWriter::new()).build();
    logged.enlist("job", flaky());
    for n in 0..3 {
        logged.emit("job", (n,));
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    let counter = Arc::new(FailureCounter::new());
    let counted: Emitter<&'static str, (u32,)> = Emitter::builder()
        .with_shared_error_hook(counter.clone())
        .build();
    counted.enlist("job", flaky());
    counted.enlist("job", explosive());
    for n in 0..6 {
        counted.emit("job", (n,));
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    counter.print_stats();
}
