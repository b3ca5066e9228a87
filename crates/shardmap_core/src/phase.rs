//! War and combat phase math.
//!
//! Pure functions over UNIX timestamps. A settlement has two independent
//! time-windowed phases:
//!
//! - **War**: a one-off `[war_start, war_end)` window set by the backend,
//!   followed by a cooldown during which war cannot be re-declared.
//! - **Combat**: a fixed-length window recurring every UTC day, starting at a
//!   per-settlement second-of-day. The window may wrap past midnight.
//!
//! Both functions also report the number of seconds until the phase next
//! changes, which is what the scheduler keys its queue on.

use serde::{Deserialize, Serialize};

/// Seconds in one UTC day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Tunable phase durations.
///
/// The reference deployment uses a 5-day war cooldown and a 9-hour daily
/// combat window; both are configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    /// Seconds after a war ends during which a new war cannot be declared.
    pub war_cooldown_secs: u64,
    /// Length of the daily combat window in seconds.
    pub combat_window_secs: u64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            war_cooldown_secs: 5 * SECONDS_PER_DAY,
            combat_window_secs: 32_400,
        }
    }
}

/// Which part of the war cycle a settlement is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarState {
    /// Inside the declared war window.
    Active,
    /// A war window is set but has not started yet.
    Pending,
    /// The war ended; re-declaration is blocked until the cooldown expires.
    Cooldown,
    /// No upcoming transition; war may be declared at any time.
    Undeclared,
}

/// War phase of a settlement at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarPhase {
    /// Current war cycle state.
    pub state: WarState,
    /// Seconds until the next war transition. `None` when [`WarState::Undeclared`]:
    /// nothing will change until the backend sets a new war window.
    pub seconds_to_next: Option<u64>,
}

impl WarPhase {
    /// Whether the settlement is currently at war.
    #[must_use]
    pub fn at_war(&self) -> bool {
        matches!(self.state, WarState::Active)
    }

    /// Human-readable status line for popups and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.state, self.seconds_to_next) {
            (WarState::Active, Some(secs)) => {
                format!("AT WAR! ENDS IN {}", format_duration(secs))
            }
            (WarState::Pending, Some(secs)) => {
                format!("WAR BEGINS IN {}", format_duration(secs))
            }
            (WarState::Cooldown, Some(secs)) => {
                format!("CAN DECLARE WAR IN {}", format_duration(secs))
            }
            _ => "War can be declared on this settlement.".to_string(),
        }
    }
}

/// Combat phase of a settlement at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatPhase {
    /// Whether the daily combat window is open.
    pub in_combat: bool,
    /// Seconds until the window opens or closes. Always >= 1.
    pub seconds_to_next: u64,
}

impl CombatPhase {
    /// Human-readable status line for popups and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.in_combat {
            format!(
                "In Combat Phase! {} remaining",
                format_duration(self.seconds_to_next)
            )
        } else {
            format!(
                "In Peace Phase. {} remaining",
                format_duration(self.seconds_to_next)
            )
        }
    }
}

/// Compute the war phase for a `[war_start, war_end)` window at `now`.
///
/// The window is followed by a cooldown of `cfg.war_cooldown_secs` during
/// which war cannot be re-declared; once the cooldown expires there is no
/// further transition to wait for.
#[must_use]
pub fn war_phase(now: u64, war_start: u64, war_end: u64, cfg: &PhaseConfig) -> WarPhase {
    if war_start <= now && now < war_end {
        WarPhase {
            state: WarState::Active,
            seconds_to_next: Some(war_end - now),
        }
    } else if now < war_start {
        WarPhase {
            state: WarState::Pending,
            seconds_to_next: Some(war_start - now),
        }
    } else if now < war_end.saturating_add(cfg.war_cooldown_secs) {
        WarPhase {
            state: WarState::Cooldown,
            seconds_to_next: Some(war_end.saturating_add(cfg.war_cooldown_secs) - now),
        }
    } else {
        WarPhase {
            state: WarState::Undeclared,
            seconds_to_next: None,
        }
    }
}

/// Compute the combat phase at `now` for a window opening at
/// `combat_start_of_day` seconds into each UTC day.
///
/// Handles both window orientations: `end > start` (same-day window) and
/// `end <= start` (window wraps past midnight). The reported
/// `seconds_to_next` is exact modular time to the next boundary, clamped to
/// a minimum of 1 so a boundary instant never schedules a zero-length wait.
#[must_use]
pub fn combat_phase(now: u64, combat_start_of_day: u64, cfg: &PhaseConfig) -> CombatPhase {
    let day_secs = now % SECONDS_PER_DAY;
    let start = combat_start_of_day % SECONDS_PER_DAY;
    let end = (start + cfg.combat_window_secs) % SECONDS_PER_DAY;

    let (in_combat, to_next) = if end > start {
        if day_secs < start {
            (false, start - day_secs)
        } else if day_secs < end {
            (true, end - day_secs)
        } else {
            (false, SECONDS_PER_DAY - day_secs + start)
        }
    } else {
        // Window wraps past midnight.
        if day_secs >= start {
            (true, SECONDS_PER_DAY - day_secs + end)
        } else if day_secs < end {
            (true, end - day_secs)
        } else {
            (false, start - day_secs)
        }
    };

    CombatPhase {
        in_combat,
        seconds_to_next: to_next.max(1),
    }
}

/// Format a duration in seconds as a compact countdown string.
///
/// Matches the map's display format: `"2d:3h:4n:5s"`, `"3h:4m:5s"`,
/// `"4m:5s"`, `"5s"`. (The `n` in the days form is the historical minute
/// marker the map has always shown; kept for display parity.)
#[must_use]
pub fn format_duration(secs: u64) -> String {
    let mut hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let days = hours / 24;
    hours %= 24;

    if days > 0 {
        format!("{days}d:{hours}h:{minutes}n:{seconds}s")
    } else if hours > 0 {
        format!("{hours}h:{minutes}m:{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m:{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PhaseConfig {
        PhaseConfig::default()
    }

    #[test]
    fn war_active_inside_window() {
        let phase = war_phase(1_000, 500, 2_000, &cfg());
        assert_eq!(phase.state, WarState::Active);
        assert!(phase.at_war());
        assert_eq!(phase.seconds_to_next, Some(1_000));
    }

    #[test]
    fn war_window_boundaries_are_half_open() {
        // At war exactly at start, not at war exactly at end.
        assert!(war_phase(500, 500, 2_000, &cfg()).at_war());
        assert!(!war_phase(2_000, 500, 2_000, &cfg()).at_war());
    }

    #[test]
    fn war_pending_before_window() {
        let phase = war_phase(100, 500, 2_000, &cfg());
        assert_eq!(phase.state, WarState::Pending);
        assert_eq!(phase.seconds_to_next, Some(400));
    }

    #[test]
    fn war_cooldown_after_window() {
        let phase = war_phase(2_001, 500, 2_000, &cfg());
        assert_eq!(phase.state, WarState::Cooldown);
        assert_eq!(phase.seconds_to_next, Some(5 * SECONDS_PER_DAY - 1));
    }

    #[test]
    fn war_undeclared_after_cooldown() {
        let phase = war_phase(2_000 + 5 * SECONDS_PER_DAY, 500, 2_000, &cfg());
        assert_eq!(phase.state, WarState::Undeclared);
        assert_eq!(phase.seconds_to_next, None);
    }

    #[test]
    fn war_countdown_strictly_decreases_within_phase() {
        let mut last = u64::MAX;
        for now in 500..600 {
            let phase = war_phase(now, 500, 2_000, &cfg());
            let next = phase.seconds_to_next.unwrap();
            assert!(next < last);
            last = next;
        }
    }

    #[test]
    fn combat_non_wrapping_window() {
        // Window 01:00 - 10:00.
        let non_wrap = PhaseConfig::default();

        let before = combat_phase(0, 3_600, &non_wrap);
        assert!(!before.in_combat);
        assert_eq!(before.seconds_to_next, 3_600);

        let inside = combat_phase(3_600, 3_600, &non_wrap);
        assert!(inside.in_combat);
        assert_eq!(inside.seconds_to_next, 32_400);

        let after = combat_phase(40_000, 3_600, &non_wrap);
        assert!(!after.in_combat);
        assert_eq!(after.seconds_to_next, 86_400 - 40_000 + 3_600);
    }

    #[test]
    fn combat_wrapping_window() {
        // Start 22:00, 9h window wraps to 07:00 next day.
        let phase = combat_phase(82_800, 79_200, &cfg());
        assert!(phase.in_combat);
        // 23:00 -> 07:00 is eight hours.
        assert_eq!(phase.seconds_to_next, 28_800);

        // 03:00 is still inside the wrapped tail.
        let tail = combat_phase(10_800, 79_200, &cfg());
        assert!(tail.in_combat);
        assert_eq!(tail.seconds_to_next, 25_200 - 10_800);

        // 12:00 is outside; next boundary is the 22:00 opening.
        let outside = combat_phase(43_200, 79_200, &cfg());
        assert!(!outside.in_combat);
        assert_eq!(outside.seconds_to_next, 79_200 - 43_200);
    }

    #[test]
    fn combat_never_reports_zero_wait() {
        // Exactly at the closing boundary of a same-day window.
        let phase = combat_phase(36_000, 3_600, &cfg());
        assert!(phase.seconds_to_next >= 1);

        for day_secs in (0..SECONDS_PER_DAY).step_by(997) {
            assert!(combat_phase(day_secs, 79_200, &cfg()).seconds_to_next >= 1);
        }
    }

    #[test]
    fn combat_uses_full_timestamps() {
        // Only the time of day matters.
        let a = combat_phase(82_800, 79_200, &cfg());
        let b = combat_phase(82_800 + 7 * SECONDS_PER_DAY, 79_200, &cfg());
        assert_eq!(a, b);
    }

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(5), "5s");
        assert_eq!(format_duration(61), "1m:1s");
        assert_eq!(format_duration(3_661), "1h:1m:1s");
        assert_eq!(format_duration(90_061), "1d:1h:1n:1s");
        assert_eq!(format_duration(0), "0s");
    }

    #[test]
    fn describe_strings() {
        let at_war = war_phase(1_000, 500, 2_000, &cfg());
        assert_eq!(at_war.describe(), "AT WAR! ENDS IN 16m:40s");

        let open = war_phase(u64::MAX / 2, 500, 2_000, &cfg());
        assert_eq!(open.describe(), "War can be declared on this settlement.");

        let combat = combat_phase(82_800, 79_200, &cfg());
        assert_eq!(combat.describe(), "In Combat Phase! 8h:0m:0s remaining");
    }
}
