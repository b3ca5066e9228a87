//! Lazy phase re-evaluation scheduler.
//!
//! Rather than recomputing every settlement's phase every tick, the
//! scheduler keeps a minimum-priority queue keyed by the instant each
//! settlement's phase next changes. A tick only touches the settlements
//! that are actually due, then re-enqueues them at their next transition.
//!
//! The queue is a binary heap with lazy invalidation: rescheduling a
//! settlement records its new due time and leaves the old heap entry in
//! place; stale entries are discarded when popped. One *live* entry exists
//! per settlement at a time.
//!
//! Snapshots are merged by stable settlement id, never rebuilt wholesale:
//! a settlement whose war window and combat start are unchanged keeps its
//! queue entry and any selection across polls, so a poll cannot leave a
//! stale selected object behind.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::events::PhaseSink;
use crate::phase::PhaseConfig;
use crate::settlement::{Settlement, SettlementId};

/// One queue entry: a settlement and the instant it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ScheduleEntry {
    /// Due instant, UNIX seconds. Ordered first.
    due_at: u64,
    /// Settlement the entry belongs to. Tie order is not significant.
    id: SettlementId,
}

/// Priority-ordered phase scheduler.
///
/// Owns the settlement collection and the optional selection; there is no
/// process-wide state. Constructed with the map view and discarded with it.
#[derive(Debug)]
pub struct PhaseScheduler {
    cfg: PhaseConfig,
    settlements: BTreeMap<SettlementId, Settlement>,
    queue: BinaryHeap<Reverse<ScheduleEntry>>,
    /// Current live due time per settlement; heap entries that disagree are
    /// stale and dropped on pop.
    due: BTreeMap<SettlementId, u64>,
    selected: Option<SettlementId>,
}

impl PhaseScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new(cfg: PhaseConfig) -> Self {
        Self {
            cfg,
            settlements: BTreeMap::new(),
            queue: BinaryHeap::new(),
            due: BTreeMap::new(),
            selected: None,
        }
    }

    /// Number of settlements currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settlements.len()
    }

    /// Whether the scheduler tracks no settlements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Look up a settlement by id.
    #[must_use]
    pub fn get(&self, id: SettlementId) -> Option<&Settlement> {
        self.settlements.get(&id)
    }

    /// Iterate all tracked settlements in id order.
    pub fn settlements(&self) -> impl Iterator<Item = &Settlement> {
        self.settlements.values()
    }

    /// Clear the queue, the settlement collection and the selection.
    pub fn reset(&mut self) {
        self.settlements.clear();
        self.queue.clear();
        self.due.clear();
        self.selected = None;
    }

    /// Mark a settlement as selected so its countdown strings are refreshed
    /// on every tick. Selecting an id the scheduler does not track is a
    /// no-op.
    pub fn select(&mut self, id: SettlementId) {
        if self.settlements.contains_key(&id) {
            self.selected = Some(id);
        } else {
            tracing::debug!(id, "ignoring selection of unknown settlement");
        }
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Currently selected settlement, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Settlement> {
        self.selected.and_then(|id| self.settlements.get(&id))
    }

    /// Merge a settlement snapshot into the scheduler at `now`.
    ///
    /// Settlements are keyed by id: ids absent from the snapshot are
    /// dropped (and deselected), new ids are scheduled immediately, and
    /// surviving ids keep their queue entry unless their war window or
    /// combat start changed. `sink` receives an icon update for every
    /// settlement that was (re)scheduled.
    pub fn apply_snapshot(
        &mut self,
        incoming: Vec<Settlement>,
        now: u64,
        sink: &mut dyn PhaseSink,
    ) {
        let incoming_ids: std::collections::BTreeSet<SettlementId> =
            incoming.iter().map(|s| s.id).collect();

        let before = self.settlements.len();
        self.settlements.retain(|id, _| incoming_ids.contains(id));
        self.due.retain(|id, _| incoming_ids.contains(id));
        if let Some(sel) = self.selected {
            if !incoming_ids.contains(&sel) {
                self.selected = None;
            }
        }
        let dropped = before - self.settlements.len();

        let mut rescheduled = 0usize;
        for mut settlement in incoming {
            let id = settlement.id;
            let unchanged = self
                .settlements
                .get(&id)
                .is_some_and(|existing| existing.same_schedule_inputs(&settlement));

            if unchanged {
                if let Some(existing) = self.settlements.get_mut(&id) {
                    // Same windows: keep derived state and queue entry,
                    // refresh the descriptive fields from the poll.
                    settlement.phases = existing.phases;
                    *existing = settlement;
                }
            } else {
                let next = settlement.refresh_phases(now, &self.cfg);
                sink.icon_changed(&settlement);
                self.settlements.insert(id, settlement);
                self.schedule(id, due_at(now, next));
                rescheduled += 1;
            }
        }

        tracing::debug!(
            total = self.settlements.len(),
            rescheduled,
            dropped,
            "applied settlement snapshot"
        );
    }

    /// Insert or replace the queue entry for a settlement.
    fn schedule(&mut self, id: SettlementId, due_at: u64) {
        self.due.insert(id, due_at);
        self.queue.push(Reverse(ScheduleEntry { due_at, id }));
    }

    /// Re-evaluate every settlement that is due at `now`.
    ///
    /// Pops the queue while the head is due, recomputes both phases for
    /// each popped settlement, notifies `sink`, and re-enqueues the
    /// settlement one second past its next transition (the slack avoids
    /// flapping on the boundary instant). Afterwards the selected
    /// settlement, if any, gets its countdown strings refreshed regardless
    /// of due-ness.
    pub fn tick(&mut self, now: u64, sink: &mut dyn PhaseSink) {
        while let Some(Reverse(entry)) = self.queue.peek().copied() {
            if entry.due_at > now {
                break;
            }
            self.queue.pop();

            // Stale entry from an earlier reschedule, or a settlement that
            // vanished in a poll.
            if self.due.get(&entry.id) != Some(&entry.due_at) {
                continue;
            }
            let Some(settlement) = self.settlements.get_mut(&entry.id) else {
                continue;
            };

            let next = settlement.refresh_phases(now, &self.cfg);
            sink.icon_changed(settlement);
            tracing::trace!(
                id = entry.id,
                next_in = next,
                "settlement phase re-evaluated"
            );
            self.schedule(entry.id, due_at(now, next));
        }

        if let Some(id) = self.selected {
            if let Some(settlement) = self.settlements.get_mut(&id) {
                settlement.refresh_phases(now, &self.cfg);
                if let Some(phases) = settlement.phases {
                    let war = phases.war.describe();
                    let combat = phases.combat.describe();
                    sink.selection_updated(settlement, &war, &combat);
                }
            }
        }
    }
}

/// Next due instant: one second past the transition, so the re-evaluation
/// lands on the far side of the boundary.
fn due_at(now: u64, seconds_to_next: u64) -> u64 {
    now + seconds_to_next + 1
}
