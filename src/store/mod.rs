//! # Store: Pure Reducer & Effect Planner
//!
//! All structural mutation of the [`TabList`] happens here, as a pure
//! function `(state, event) -> new state`. The session actor applies events
//! through [`reduce`] and then asks [`plan`] which asynchronous work is
//! needed but not yet in flight.
//!
//! # Architecture Note
//! Keeping both functions pure means every lifecycle rule (sequential
//! transitions, stale-settlement discard, neighbor selection on close) can
//! be unit tested without a runtime. The actor owns the only copy of the
//! state and replaces it wholesale; there are no in-place writes from
//! callbacks.

use crate::model::{ClosePhase, PendingTransition, Tab, TabId, TabList, TabStatus};

/// A state transition of the tab collection.
///
/// Structural events (`Opened`, `Selected`, `Removed`, close phases) come
/// from user intents; `Transition*` events are settlements of the
/// asynchronous work the planner scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    /// Allocate the next id, append a new inactive tab, select it.
    Opened,
    /// Make `id` the active tab if it is present; no-op otherwise.
    Selected { id: TabId },
    /// Record the pending transition the planner just started.
    TransitionStarted {
        id: TabId,
        seq: u64,
        target: TabStatus,
    },
    /// Apply the settled status, if the tab still exists and `seq` is the
    /// generation of its current transition. Stale or orphaned settlements
    /// leave the state unchanged.
    TransitionSettled {
        id: TabId,
        seq: u64,
        status: TabStatus,
    },
    /// Clear the pending transition without touching the status, and stall
    /// the tab so the planner does not immediately reschedule it.
    TransitionFailed { id: TabId, seq: u64 },
    /// Record a close intent. Idempotent: a second request on a closing tab
    /// changes nothing.
    CloseRequested { id: TabId },
    /// The close drain timer has been started.
    CloseStarted { id: TabId },
    /// Remove the tab and, if it was active, select its neighbor.
    Removed { id: TabId },
}

/// Applies one event to the state, returning the new state.
pub fn reduce(state: &TabList, event: &TabEvent) -> TabList {
    let mut next = state.clone();
    match *event {
        TabEvent::Opened => {
            let id = next.next_tab_id();
            next.next_id += 1;
            next.tabs.push(Tab::new(id));
            next.active_id = Some(id);
        }
        TabEvent::Selected { id } => {
            if next.contains(id) {
                let previous = next.active_id;
                next.active_id = Some(id);
                // Re-selection is the recovery path after a failed
                // transition, for both ends of the switch.
                for tab in &mut next.tabs {
                    if tab.id == id || Some(tab.id) == previous {
                        tab.stalled = false;
                    }
                }
            }
        }
        TabEvent::TransitionStarted { id, seq, target } => {
            if let Some(tab) = next.get_mut(id) {
                tab.transition = Some(PendingTransition { seq, target });
            }
        }
        TabEvent::TransitionSettled { id, seq, status } => {
            if let Some(tab) = next.get_mut(id) {
                if tab.transition.map(|pending| pending.seq) == Some(seq) {
                    tab.status = status;
                    tab.transition = None;
                }
            }
        }
        TabEvent::TransitionFailed { id, seq } => {
            if let Some(tab) = next.get_mut(id) {
                if tab.transition.map(|pending| pending.seq) == Some(seq) {
                    tab.transition = None;
                    tab.stalled = true;
                }
            }
        }
        TabEvent::CloseRequested { id } => {
            if let Some(tab) = next.get_mut(id) {
                if tab.close.is_none() {
                    tab.close = Some(ClosePhase::Requested);
                }
            }
        }
        TabEvent::CloseStarted { id } => {
            if let Some(tab) = next.get_mut(id) {
                if tab.close == Some(ClosePhase::Requested) {
                    tab.close = Some(ClosePhase::Draining);
                }
            }
        }
        TabEvent::Removed { id } => {
            if let Some(index) = next.position(id) {
                let was_active = next.active_id == Some(id);
                next.tabs.remove(index);
                if was_active {
                    next.active_id = if next.tabs.is_empty() {
                        None
                    } else if index == next.tabs.len() {
                        // The removed tab was last in display order; fall
                        // back to its previous sibling.
                        Some(next.tabs[index - 1].id)
                    } else {
                        // Otherwise the tab that shifted into the vacated
                        // slot takes over.
                        Some(next.tabs[index].id)
                    };
                }
            }
        }
    }
    next
}

/// Asynchronous work the planner wants started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartTransition { id: TabId, target: TabStatus },
    StartClose { id: TabId },
}

/// Computes which work is needed and not yet in flight.
///
/// Per tab, in display order:
/// - a pending transition suppresses everything, keeping transitions
///   strictly sequential;
/// - a requested close starts its drain once the tab is idle, and a
///   draining close waits for its timer;
/// - otherwise the tab drifts toward the status its activeness demands,
///   unless it is stalled after a failure. A tab whose status already
///   matches is converged and yields nothing, so re-selecting the active
///   tab never costs a new delay cycle.
pub fn plan(state: &TabList) -> Vec<Effect> {
    let mut effects = Vec::new();
    for tab in &state.tabs {
        if tab.transition.is_some() {
            continue;
        }
        match tab.close {
            Some(ClosePhase::Requested) => effects.push(Effect::StartClose { id: tab.id }),
            Some(ClosePhase::Draining) => {}
            None => {
                if tab.stalled {
                    continue;
                }
                let desired = if state.active_id == Some(tab.id) {
                    TabStatus::Active
                } else {
                    TabStatus::Inactive
                };
                if tab.status != desired {
                    effects.push(Effect::StartTransition {
                        id: tab.id,
                        target: desired,
                    });
                }
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened_n(n: usize) -> TabList {
        let mut state = TabList::new();
        for _ in 0..n {
            state = reduce(&state, &TabEvent::Opened);
        }
        state
    }

    fn settled_n(n: usize) -> TabList {
        // All tabs idle, last one active with status applied.
        let mut state = opened_n(n);
        for i in 0..n {
            let id = state.tabs[i].id;
            let status = if state.active_id == Some(id) {
                TabStatus::Active
            } else {
                TabStatus::Inactive
            };
            state = reduce(
                &state,
                &TabEvent::TransitionStarted {
                    id,
                    seq: (i + 1) as u64,
                    target: status,
                },
            );
            state = reduce(
                &state,
                &TabEvent::TransitionSettled {
                    id,
                    seq: (i + 1) as u64,
                    status,
                },
            );
        }
        state
    }

    #[test]
    fn opened_allocates_increasing_ids_and_selects() {
        let state = opened_n(3);
        let ids: Vec<TabId> = state.tabs.iter().map(|tab| tab.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(state.active_id, Some(ids[2]));
        assert!(state.tabs.iter().all(|tab| tab.status == TabStatus::Inactive));
    }

    #[test]
    fn new_tab_is_planned_for_activation() {
        let state = opened_n(1);
        let id = state.tabs[0].id;
        assert_eq!(
            plan(&state),
            vec![Effect::StartTransition {
                id,
                target: TabStatus::Active
            }]
        );
    }

    #[test]
    fn pending_transition_suppresses_planning() {
        let mut state = opened_n(1);
        let id = state.tabs[0].id;
        state = reduce(
            &state,
            &TabEvent::TransitionStarted {
                id,
                seq: 1,
                target: TabStatus::Active,
            },
        );
        assert!(plan(&state).is_empty());
    }

    #[test]
    fn settlement_applies_status_and_clears_transition() {
        let mut state = opened_n(1);
        let id = state.tabs[0].id;
        state = reduce(
            &state,
            &TabEvent::TransitionStarted {
                id,
                seq: 1,
                target: TabStatus::Active,
            },
        );
        state = reduce(
            &state,
            &TabEvent::TransitionSettled {
                id,
                seq: 1,
                status: TabStatus::Active,
            },
        );
        let tab = state.get(id).unwrap();
        assert_eq!(tab.status, TabStatus::Active);
        assert!(tab.transition.is_none());
        // Converged and active: nothing left to do.
        assert!(plan(&state).is_empty());
    }

    #[test]
    fn stale_settlement_is_discarded() {
        let mut state = opened_n(1);
        let id = state.tabs[0].id;
        state = reduce(
            &state,
            &TabEvent::TransitionStarted {
                id,
                seq: 2,
                target: TabStatus::Active,
            },
        );
        let unchanged = reduce(
            &state,
            &TabEvent::TransitionSettled {
                id,
                seq: 1,
                status: TabStatus::Active,
            },
        );
        assert_eq!(unchanged, state);
    }

    #[test]
    fn settlement_for_removed_tab_is_discarded() {
        let state = opened_n(1);
        let id = state.tabs[0].id;
        let removed = reduce(&state, &TabEvent::Removed { id });
        let settled = reduce(
            &removed,
            &TabEvent::TransitionSettled {
                id,
                seq: 1,
                status: TabStatus::Active,
            },
        );
        assert_eq!(settled, removed);
    }

    #[test]
    fn selecting_another_tab_plans_both_sides() {
        let state = settled_n(2);
        let first = state.tabs[0].id;
        let second = state.tabs[1].id;
        let state = reduce(&state, &TabEvent::Selected { id: first });
        let effects = plan(&state);
        assert!(effects.contains(&Effect::StartTransition {
            id: first,
            target: TabStatus::Active
        }));
        assert!(effects.contains(&Effect::StartTransition {
            id: second,
            target: TabStatus::Inactive
        }));
    }

    #[test]
    fn selecting_missing_tab_changes_nothing() {
        let state = settled_n(1);
        let ghost = state.next_tab_id();
        let unchanged = reduce(&state, &TabEvent::Selected { id: ghost });
        assert_eq!(unchanged, state);
    }

    #[test]
    fn close_request_is_idempotent() {
        let mut state = settled_n(1);
        let id = state.tabs[0].id;
        state = reduce(&state, &TabEvent::CloseRequested { id });
        state = reduce(&state, &TabEvent::CloseStarted { id });
        let again = reduce(&state, &TabEvent::CloseRequested { id });
        assert_eq!(again, state);
        assert_eq!(again.get(id).unwrap().close, Some(ClosePhase::Draining));
    }

    #[test]
    fn closing_tab_waits_for_pending_transition() {
        let mut state = opened_n(1);
        let id = state.tabs[0].id;
        state = reduce(
            &state,
            &TabEvent::TransitionStarted {
                id,
                seq: 1,
                target: TabStatus::Active,
            },
        );
        state = reduce(&state, &TabEvent::CloseRequested { id });
        // Still transitioning: the drain must not start yet.
        assert!(plan(&state).is_empty());
        state = reduce(
            &state,
            &TabEvent::TransitionSettled {
                id,
                seq: 1,
                status: TabStatus::Active,
            },
        );
        assert_eq!(plan(&state), vec![Effect::StartClose { id }]);
    }

    #[test]
    fn closing_tab_gets_no_new_transitions() {
        let mut state = settled_n(2);
        let first = state.tabs[0].id;
        let second = state.tabs[1].id;
        state = reduce(&state, &TabEvent::CloseRequested { id: second });
        state = reduce(&state, &TabEvent::CloseStarted { id: second });
        // Selecting away would normally deactivate `second`, but it is
        // draining and must be left alone.
        state = reduce(&state, &TabEvent::Selected { id: first });
        let effects = plan(&state);
        assert_eq!(
            effects,
            vec![Effect::StartTransition {
                id: first,
                target: TabStatus::Active
            }]
        );
    }

    #[test]
    fn removing_last_active_tab_selects_previous_sibling() {
        let state = settled_n(3);
        let ids: Vec<TabId> = state.tabs.iter().map(|tab| tab.id).collect();
        assert_eq!(state.active_id, Some(ids[2]));
        let state = reduce(&state, &TabEvent::Removed { id: ids[2] });
        assert_eq!(state.active_id, Some(ids[1]));
    }

    #[test]
    fn removing_middle_active_tab_selects_shifted_in_tab() {
        let state = settled_n(3);
        let ids: Vec<TabId> = state.tabs.iter().map(|tab| tab.id).collect();
        let state = reduce(&state, &TabEvent::Selected { id: ids[1] });
        let state = reduce(&state, &TabEvent::Removed { id: ids[1] });
        assert_eq!(state.active_id, Some(ids[2]));
    }

    #[test]
    fn removing_only_tab_clears_selection() {
        let state = settled_n(1);
        let id = state.tabs[0].id;
        let state = reduce(&state, &TabEvent::Removed { id });
        assert!(state.tabs.is_empty());
        assert_eq!(state.active_id, None);
    }

    #[test]
    fn removing_inactive_tab_keeps_selection() {
        let state = settled_n(3);
        let ids: Vec<TabId> = state.tabs.iter().map(|tab| tab.id).collect();
        let state = reduce(&state, &TabEvent::Removed { id: ids[0] });
        assert_eq!(state.active_id, Some(ids[2]));
    }

    #[test]
    fn failed_transition_stalls_tab_until_reselected() {
        let mut state = opened_n(1);
        let id = state.tabs[0].id;
        state = reduce(
            &state,
            &TabEvent::TransitionStarted {
                id,
                seq: 1,
                target: TabStatus::Active,
            },
        );
        state = reduce(&state, &TabEvent::TransitionFailed { id, seq: 1 });
        let tab = state.get(id).unwrap();
        assert_eq!(tab.status, TabStatus::Inactive);
        assert!(tab.stalled);
        assert!(plan(&state).is_empty());

        let state = reduce(&state, &TabEvent::Selected { id });
        assert!(!state.get(id).unwrap().stalled);
        assert_eq!(
            plan(&state),
            vec![Effect::StartTransition {
                id,
                target: TabStatus::Active
            }]
        );
    }
}
