//! # Basic Example
//!
//! Enlists a sync and an async listener, emits a few events and delists.
//!
//! ```text
//! emit("order", ..) ──► unit: audit (sync)
//!                  └──► unit: notify (async, sleeps before printing)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::time::Duration;

use tidings::{Emitter, Listener};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: Emitter<&'static str, (u32, String)> = Emitter::new();

    let audit = emitter.enlist(
        "order",
        Listener::from_fn(|(id, item): (u32, String)| {
            println!("[audit]  order #{id}: {item}");
        })
        .with_name("audit"),
    );

    emitter.enlist(
        "order",
        Listener::from_async_fn(|(id, _item): (u32, String)| async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            println!("[notify] order #{id} confirmed");
        })
        .with_name("notify"),
    );

    let on_cancel = emitter.enlister("cancel");
    on_cancel(Listener::from_fn(|(id, reason): (u32, String)| {
        println!("[cancel] order #{id}: {reason}");
    }));

    emitter.emit("order", (1, "keyboard".into()));
    emitter.emit("order", (2, "monitor".into()));
    emitter.emit("cancel", (1, "out of stock".into()));
    tokio::time::sleep(Duration::from_millis(100)).await;

    emitter.delist(&"order", &audit)?;
    println!(
        "audit delisted; {} listener(s) left on \"order\"",
        emitter.listener_count(&"order")
    );

    emitter.emit("order", (3, "mouse".into()));
    tokio::time::sleep(Duration::from_millis(100)).await;

    emitter.delist_all(None);
    println!("all listeners delisted; events known: {:?}", emitter.events());
    Ok(())
}
