//! End-to-end walk through the reference scenario: open two tabs, switch,
//! close, and watch the collection settle, observed both by polling and
//! through the snapshot subscription.

use std::time::Duration;

use tab_lifecycle::{SessionClient, SessionConfig, TabSnapshot, TabStatus, TabSystem};

async fn wait_until<F>(client: &SessionClient, pred: F) -> TabSnapshot
where
    F: Fn(&TabSnapshot) -> bool,
{
    for _ in 0..400 {
        let snapshot = client.snapshot().await.expect("session alive");
        if pred(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn reference_scenario_runs_to_completion() {
    let system = TabSystem::new(SessionConfig::with_delays_ms(40, 20));

    // Tab "1": opened, selected, activates after the delay.
    let first = system.client.open_tab().await.unwrap();
    wait_until(&system.client, |s| {
        s.status_of(first) == Some(TabStatus::Active)
    })
    .await;

    // Tab "2": becomes the active id at once; statuses follow.
    let second = system.client.open_tab().await.unwrap();
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.active_id, Some(second));
    wait_until(&system.client, |s| {
        s.status_of(first) == Some(TabStatus::Inactive)
            && s.status_of(second) == Some(TabStatus::Active)
    })
    .await;

    // Close "2": after the drain only "1" remains and takes over.
    system.client.request_close(second).await.unwrap();
    let snapshot = wait_until(&system.client, |s| s.tabs.len() == 1).await;
    assert_eq!(snapshot.active_id, Some(first));
    assert_eq!(snapshot.tabs[0].id, first);

    // The survivor drifts back to active.
    wait_until(&system.client, |s| {
        s.status_of(first) == Some(TabStatus::Active)
    })
    .await;

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn subscription_observes_every_mutation() {
    let system = TabSystem::new(SessionConfig::with_delays_ms(10, 10));
    let mut renders = system.subscribe();

    let tab = system.client.open_tab().await.unwrap();

    // The open itself is one observable render. The watch channel
    // coalesces, so the first value seen may already carry later
    // settlements; it always contains the new tab.
    renders.changed().await.unwrap();
    let mut seen = renders.borrow_and_update().clone();
    assert!(seen.tabs.iter().any(|view| view.id == tab));

    // The activation settlement is eventually rendered too.
    while seen.status_of(tab) != Some(TabStatus::Active) {
        renders.changed().await.unwrap();
        seen = renders.borrow_and_update().clone();
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_terminates_the_session() {
    let system = TabSystem::new(SessionConfig::with_delays_ms(5, 5));
    let client = system.client.clone();

    system.client.open_tab().await.unwrap();
    // The extra clone must be gone before shutdown can complete.
    drop(client);
    system.shutdown().await.unwrap();
}
