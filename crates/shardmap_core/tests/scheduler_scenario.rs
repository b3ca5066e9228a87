//! End-to-end scheduler scenario: a snapshot feeds the scheduler, ticks
//! re-evaluate only due settlements, and a poll merge mid-stream keeps the
//! schedule and selection intact.

use shardmap_core::prelude::*;
use shardmap_core::settlement::PhaseState;

#[derive(Default)]
struct Recorder {
    icon_updates: Vec<(SettlementId, Icon)>,
    selection_updates: Vec<String>,
}

impl PhaseSink for Recorder {
    fn icon_changed(&mut self, settlement: &Settlement) {
        self.icon_updates.push((settlement.id, settlement.icon()));
    }

    fn selection_updated(&mut self, _settlement: &Settlement, war: &str, _combat: &str) {
        self.selection_updates.push(war.to_string());
    }
}

fn settlement(id: SettlementId, war_start: u64, war_end: u64) -> Settlement {
    Settlement {
        id,
        name: format!("Isle {id}"),
        tribe_id: Some(1_000_060_000 + id),
        grid_x: (id % 10) as u16,
        grid_y: (id / 10) as u16,
        size: 0.3,
        points: 10,
        settlers: Some(25),
        tax_rate: 12.5,
        war_start_utc: war_start,
        war_end_utc: war_end,
        // Noon start keeps the combat window away from the times under test.
        combat_start_of_day: 43_200,
        phases: None,
    }
}

#[test]
fn snapshot_tick_merge_cycle() {
    // Base time at a UTC midnight so the combat window stays out of the way.
    let t = 200 * 86_400;
    let cfg = PhaseConfig::default();
    let mut sched = PhaseScheduler::new(cfg);
    let mut sink = Recorder::default();

    // Two settlements whose wars begin at t+1 and t+5.
    sched.apply_snapshot(
        vec![settlement(1, t + 1, t + 3_600), settlement(2, t + 5, t + 3_600)],
        t,
        &mut sink,
    );
    assert_eq!(sched.len(), 2);
    // Both got an initial icon push, still at peace.
    assert_eq!(
        sink.icon_updates,
        vec![(1, Icon::Peace), (2, Icon::Peace)]
    );
    sink.icon_updates.clear();

    // Just past the first transition: only settlement 1 is re-evaluated.
    sched.tick(t + 2, &mut sink);
    assert_eq!(sink.icon_updates, vec![(1, Icon::War)]);
    assert!(sched.get(2).unwrap().phases.is_none());
    sink.icon_updates.clear();

    // Well past both: the remaining settlement catches up.
    sched.tick(t + 10, &mut sink);
    assert_eq!(sink.icon_updates, vec![(2, Icon::War)]);
    sink.icon_updates.clear();

    // Select settlement 1 and run two idle ticks: no icon churn, but the
    // countdown strings refresh each time.
    sched.select(1);
    sched.tick(t + 11, &mut sink);
    sched.tick(t + 12, &mut sink);
    assert!(sink.icon_updates.is_empty());
    assert_eq!(sink.selection_updates.len(), 2);
    assert!(sink.selection_updates[0].starts_with("AT WAR! ENDS IN"));

    // A poll arrives with the same windows plus a rename: the schedule and
    // selection survive the merge.
    let mut renamed = settlement(1, t + 1, t + 3_600);
    renamed.name = "Isle Renamed".to_string();
    sched.apply_snapshot(
        vec![renamed, settlement(2, t + 5, t + 3_600)],
        t + 13,
        &mut sink,
    );
    assert_eq!(sched.selected().unwrap().name, "Isle Renamed");
    let PhaseState { war, .. } = sched.get(1).unwrap().phases.unwrap();
    assert!(war.at_war());

    // Both wars end at t+3600; one second of slack puts each re-evaluation
    // just past the boundary.
    sched.tick(t + 3_610, &mut sink);
    let peace_icons: Vec<_> = sink
        .icon_updates
        .iter()
        .filter(|(_, icon)| *icon == Icon::Peace)
        .collect();
    assert_eq!(peace_icons.len(), 2);
}
