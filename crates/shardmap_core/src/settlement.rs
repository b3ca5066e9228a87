//! Settlement and tribe data model.
//!
//! Settlements arrive from the backend poll as JSON records and carry their
//! war window and daily combat start time. Phase state is derived, never
//! polled: [`Settlement::refresh_phases`] recomputes it and reports when it
//! next changes, which is what the scheduler keys on.

use serde::{Deserialize, Serialize};

use crate::phase::{combat_phase, war_phase, CombatPhase, PhaseConfig, WarPhase};

/// Stable identifier for settlements, preserved across polls.
pub type SettlementId = u64;

/// Identifier for tribes (owning companies).
pub type TribeId = u64;

/// Marker icon for a settlement's current phase state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    /// At war or inside the daily combat window.
    War,
    /// Neither at war nor in combat.
    Peace,
}

impl Icon {
    /// Asset file the rendering layer shows for this icon.
    #[must_use]
    pub const fn asset(self) -> &'static str {
        match self {
            Self::War => "HUD_War_Icon.png",
            Self::Peace => "HUD_Peace_Icon.png",
        }
    }
}

/// Derived phase state, recomputed by the scheduler on each due tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    /// War phase at the last refresh.
    pub war: WarPhase,
    /// Combat phase at the last refresh.
    pub combat: CombatPhase,
}

/// A settlement as reported by the backend, plus derived phase state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settlement {
    /// Stable settlement identifier.
    #[serde(rename = "SettlementID")]
    pub id: SettlementId,
    /// Display name.
    pub name: String,
    /// Owning tribe, if claimed.
    #[serde(default)]
    pub tribe_id: Option<TribeId>,
    /// Shard grid x index of the settlement's home shard.
    pub grid_x: u16,
    /// Shard grid y index of the settlement's home shard.
    pub grid_y: u16,
    /// Territory radius in shard-relative units.
    #[serde(default)]
    pub size: f64,
    /// Score value of holding the settlement.
    #[serde(default)]
    pub points: i64,
    /// Settler count; negative means the backend did not report one.
    #[serde(default)]
    pub settlers: Option<i64>,
    /// Tax rate in percent.
    #[serde(default)]
    pub tax_rate: f64,
    /// War window start, UNIX seconds UTC.
    #[serde(rename = "WarStartUTC")]
    pub war_start_utc: u64,
    /// War window end, UNIX seconds UTC.
    #[serde(rename = "WarEndUTC")]
    pub war_end_utc: u64,
    /// Daily combat window start, seconds into the UTC day.
    #[serde(rename = "CombatPhaseStartTime")]
    pub combat_start_of_day: u64,
    /// Derived phase state; `None` until first refreshed.
    #[serde(skip)]
    pub phases: Option<PhaseState>,
}

impl Settlement {
    /// Recompute both phases at `now` and return the number of seconds
    /// until the earlier of the two next transitions.
    ///
    /// The combat window recurs daily, so the returned wait is always
    /// finite even when the war phase has no upcoming transition.
    pub fn refresh_phases(&mut self, now: u64, cfg: &PhaseConfig) -> u64 {
        let war = war_phase(now, self.war_start_utc, self.war_end_utc, cfg);
        let combat = combat_phase(now, self.combat_start_of_day, cfg);

        let next = match war.seconds_to_next {
            Some(war_next) => war_next.min(combat.seconds_to_next),
            None => combat.seconds_to_next,
        };

        self.phases = Some(PhaseState { war, combat });
        next
    }

    /// Icon for the current phase state: war when at war **or** in combat.
    #[must_use]
    pub fn icon(&self) -> Icon {
        match &self.phases {
            Some(p) if p.war.at_war() || p.combat.in_combat => Icon::War,
            _ => Icon::Peace,
        }
    }

    /// Whether `other` would produce the same schedule: same war window and
    /// same combat start. Used by the snapshot merge to decide if an
    /// existing queue entry can be kept.
    #[must_use]
    pub fn same_schedule_inputs(&self, other: &Self) -> bool {
        self.war_start_utc == other.war_start_utc
            && self.war_end_utc == other.war_end_utc
            && self.combat_start_of_day == other.combat_start_of_day
    }
}

/// A tribe (owning company) record from the backend poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tribe {
    /// Tribe identifier.
    #[serde(rename = "TribeId")]
    pub id: TribeId,
    /// Display name.
    #[serde(rename = "TribeName")]
    pub name: String,
    /// Optional flag image shown in popups.
    #[serde(rename = "FlagURL", default)]
    pub flag_url: Option<String>,
}

/// One full settlement poll response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettlementSnapshot {
    /// All settlements in the world.
    #[serde(default)]
    pub settlements: Vec<Settlement>,
    /// All tribes that own at least one settlement.
    #[serde(default)]
    pub tribes: Vec<Tribe>,
}

/// Marker colors assignable to player tribes.
pub const TRIBE_PALETTE: [&str; 18] = [
    "red", "green", "yellow", "blue", "orange", "purple", "cyan", "magenta", "lime", "pink",
    "teal", "lavender", "brown", "beige", "maroon", "olive", "coral", "navy",
];

/// Ids at or below this value are system-owned, not player tribes.
pub const PLAYER_TRIBE_ID_FLOOR: TribeId = 1_000_050_000;

/// Marker color for a tribe.
///
/// Unowned is black, system-owned is grey, player tribes hash into the
/// palette by id so a tribe keeps its color across polls and sessions.
#[must_use]
pub fn tribe_color(tribe: Option<TribeId>) -> &'static str {
    match tribe {
        None => "black",
        Some(id) if id <= PLAYER_TRIBE_ID_FLOOR => "grey",
        Some(id) => TRIBE_PALETTE[(id % TRIBE_PALETTE.len() as u64) as usize],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settlement(war_start: u64, war_end: u64, combat_start: u64) -> Settlement {
        Settlement {
            id: 7,
            name: "Port Royal".to_string(),
            tribe_id: Some(1_000_060_000),
            grid_x: 3,
            grid_y: 2,
            size: 0.4,
            points: 12,
            settlers: Some(40),
            tax_rate: 10.0,
            war_start_utc: war_start,
            war_end_utc: war_end,
            combat_start_of_day: combat_start,
            phases: None,
        }
    }

    #[test]
    fn refresh_returns_earliest_transition() {
        let mut s = settlement(1_000, 2_000, 0);
        // At now=1500: war ends in 500; combat (window 0..32400) ends in 30900.
        let next = s.refresh_phases(1_500, &PhaseConfig::default());
        assert_eq!(next, 500);
        assert!(s.phases.unwrap().war.at_war());
    }

    #[test]
    fn refresh_falls_back_to_combat_when_war_is_settled() {
        let mut s = settlement(0, 1, 0);
        let now = 40 * 86_400;
        let next = s.refresh_phases(now, &PhaseConfig::default());
        // War is long over and out of cooldown; only the daily combat
        // window remains. At midnight the window just opened.
        assert_eq!(next, 32_400);
        assert_eq!(s.phases.unwrap().war.seconds_to_next, None);
    }

    #[test]
    fn icon_is_war_during_either_phase() {
        let mut s = settlement(1_000, 2_000, 0);
        s.refresh_phases(1_500, &PhaseConfig::default());
        assert_eq!(s.icon(), Icon::War);

        // Out of the war window and past the combat window.
        let mut t = settlement(1_000, 2_000, 0);
        t.refresh_phases(40_000 + 30 * 86_400, &PhaseConfig::default());
        assert_eq!(t.icon(), Icon::Peace);
        assert_eq!(t.icon().asset(), "HUD_Peace_Icon.png");
    }

    #[test]
    fn unrefreshed_settlement_defaults_to_peace_icon() {
        let s = settlement(0, u64::MAX, 0);
        assert_eq!(s.icon(), Icon::Peace);
    }

    #[test]
    fn tribe_colors() {
        assert_eq!(tribe_color(None), "black");
        assert_eq!(tribe_color(Some(500)), "grey");
        assert_eq!(tribe_color(Some(PLAYER_TRIBE_ID_FLOOR)), "grey");
        let id = PLAYER_TRIBE_ID_FLOOR + 1;
        assert_eq!(
            tribe_color(Some(id)),
            TRIBE_PALETTE[(id % 18) as usize]
        );
    }

    #[test]
    fn snapshot_wire_format() {
        let json = r#"{
            "Settlements": [{
                "SettlementID": 7,
                "Name": "Port Royal",
                "TribeId": 1000060001,
                "GridX": 3,
                "GridY": 2,
                "Size": 0.4,
                "Points": 12,
                "Settlers": 40,
                "TaxRate": 10.0,
                "WarStartUTC": 100,
                "WarEndUTC": 200,
                "CombatPhaseStartTime": 79200
            }],
            "Tribes": [{
                "TribeId": 1000060001,
                "TribeName": "The Black Flags",
                "FlagURL": "http://example.invalid/flag.png"
            }]
        }"#;

        let snap: SettlementSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.settlements.len(), 1);
        let s = &snap.settlements[0];
        assert_eq!(s.id, 7);
        assert_eq!((s.grid_x, s.grid_y), (3, 2));
        assert_eq!(s.combat_start_of_day, 79_200);
        assert!(s.phases.is_none());
        assert_eq!(snap.tribes[0].name, "The Black Flags");
    }
}
