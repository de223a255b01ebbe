//! # Wait-for Example
//!
//! Awaits emissions from another task: unconditionally, with a predicate, and with a
//! timeout that expires.
//!
//! ## Run
//! ```bash
//! cargo run --example wait_for
//! ```

use std::time::Duration;

use tidings::{Emitter, WaitError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: Emitter<&'static str, (u8,)> = Emitter::new();

    let producer = {
        let emitter = emitter.clone();
        tokio::spawn(async move {
            for percent in (0..=100u8).step_by(25) {
                tokio::time::sleep(Duration::from_millis(30)).await;
                emitter.emit("progress", (percent,));
            }
            emitter.emit("done", (0,));
        })
    };

    let first = emitter.wait_for("progress", None).await?;
    println!("first progress report: {first}%");

    let half = emitter
        .wait_for_where("progress", |(p,)| *p >= 50, Some(Duration::from_secs(1)))
        .await?;
    println!("past the halfway mark: {half}%");

    let code = emitter.wait_for("done", Some(Duration::from_secs(1))).await?;
    println!("done with code {code}");

    producer.await?;

    match emitter
        .wait_for("progress", Some(Duration::from_millis(50)))
        .await
    {
        Err(WaitError::Timeout { timeout }) => println!("no more progress within {timeout:?}"),
        other => println!("unexpected: {other:?}"),
    }
    Ok(())
}
