//! Demo binary: drives one tab session end to end with a logging renderer
//! standing in for the presentation layer.
//!
//! ```bash
//! RUST_LOG=info cargo run          # lifecycle milestones
//! RUST_LOG=debug cargo run         # per-transition scheduling
//! ```

use tab_lifecycle::{setup_tracing, SessionConfig, TabError, TabSystem};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), TabError> {
    setup_tracing();

    info!("starting tab session demo");
    let config = SessionConfig::default();
    let activation = config.activation_delay();
    let close = config.close_delay();
    let system = TabSystem::new(config);

    // Stand-in presentation adapter: re-render (log) on every snapshot.
    let mut renders = system.subscribe();
    tokio::spawn(async move {
        while renders.changed().await.is_ok() {
            let snapshot = renders.borrow_and_update().clone();
            info!(active = ?snapshot.active_id, tabs = ?snapshot.tabs, "render");
        }
    });

    let settle = activation + activation / 10;

    let first = system.client.open_tab().await?;
    tokio::time::sleep(settle).await;

    let second = system.client.open_tab().await?;
    tokio::time::sleep(settle + settle).await;

    info!(%first, "switching back to the first tab");
    system.client.select_tab(first).await?;
    tokio::time::sleep(settle + settle).await;

    info!(%second, "closing the second tab");
    system.client.request_close(second).await?;
    tokio::time::sleep(close + close).await;

    let snapshot = system.client.snapshot().await?;
    info!(active = ?snapshot.active_id, tabs = ?snapshot.tabs, "final state");

    system.shutdown().await?;
    info!("demo complete");
    Ok(())
}
