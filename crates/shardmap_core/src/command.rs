//! Command-location string protocol.
//!
//! Operator commands travel as a single delimited string:
//!
//! ```text
//! <shard-id>::<frac-x>,<frac-y>::<command text>
//! ```
//!
//! A command without a location is just the bare text. Map-originated
//! commands may carry a leading routing token (`Map::<shard-id>::...`);
//! the parser accepts both shapes. Parsing never fails to the caller:
//! malformed input degrades to an empty bare command and a warning log,
//! since the console must keep accepting keystrokes.
//!
//! Serialize-then-parse reconstructs semantically equal fields within
//! floating tolerance; the exact string is not guaranteed to round-trip
//! (float formatting).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::{PlanePoint, ShardId, WorldGrid};

/// A parsed command: optional shard location plus the command text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandLocation {
    /// Target shard, when the command is located.
    pub shard: Option<ShardId>,
    /// Fractional x offset within the shard, `[0, 1)`.
    pub frac_x: f64,
    /// Fractional y offset within the shard, `[0, 1)`.
    pub frac_y: f64,
    /// The command text itself.
    pub text: String,
}

impl CommandLocation {
    /// A command with no location.
    #[must_use]
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            shard: None,
            frac_x: 0.0,
            frac_y: 0.0,
            text: text.into(),
        }
    }

    /// A command targeted at a point inside a shard.
    #[must_use]
    pub fn located(shard: ShardId, frac_x: f64, frac_y: f64, text: impl Into<String>) -> Self {
        Self {
            shard: Some(shard),
            frac_x,
            frac_y,
            text: text.into(),
        }
    }

    /// The `"<id>::<x>,<y>::"` prefix for this location, or `""` when the
    /// command has none. Used by history recall that swaps the command text
    /// while keeping the location.
    #[must_use]
    pub fn location_prefix(&self) -> String {
        match self.shard {
            Some(shard) => format!("{}::{},{}::", shard, self.frac_x, self.frac_y),
            None => String::new(),
        }
    }

    /// Plane point of the location, for dropping a marker while typing.
    #[must_use]
    pub fn plane_point(&self, grid: &WorldGrid) -> Option<PlanePoint> {
        let shard = self.shard?;
        let (grid_x, grid_y) = shard.unpack();
        Some(grid.to_plane(grid_x, grid_y, self.frac_x, self.frac_y))
    }
}

impl fmt::Display for CommandLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shard {
            Some(shard) => write!(
                f,
                "{}::{},{}::{}",
                shard, self.frac_x, self.frac_y, self.text
            ),
            None => f.write_str(&self.text),
        }
    }
}

/// Parse a command string.
///
/// Accepted shapes, split on `"::"`:
/// - 1 token: a bare command.
/// - 3 tokens: `id::x,y::text`.
/// - 4 tokens: `prefix::id::x,y::text` (routing prefix ignored).
///
/// Anything else, or non-numeric id/coordinates, is a parse failure: logged
/// and degraded to an empty bare command.
#[must_use]
pub fn parse(input: &str) -> CommandLocation {
    let parts: Vec<&str> = input.split("::").collect();

    let located = match parts.as_slice() {
        [text] => return CommandLocation::bare(*text),
        [id, coords, text] => parse_located(id, coords, text),
        [_prefix, id, coords, text] => parse_located(id, coords, text),
        _ => None,
    };

    located.unwrap_or_else(|| {
        tracing::warn!(input, "failed to parse command location");
        CommandLocation::bare("")
    })
}

fn parse_located(id: &str, coords: &str, text: &str) -> Option<CommandLocation> {
    let shard = ShardId(id.parse().ok()?);
    let (x, y) = coords.split_once(',')?;
    Some(CommandLocation::located(
        shard,
        x.parse().ok()?,
        y.parse().ok()?,
        text,
    ))
}

/// Rank command suggestions for a partially typed command.
///
/// Matches the case-folded first word of `input`'s command text against the
/// case-folded first word of each candidate; returns matches ordered by
/// ascending first-word length (more specific commands first), preserving
/// the candidates' relative order on ties.
#[must_use]
pub fn suggest(candidates: &[String], input: &str) -> Vec<String> {
    let command = parse(input).text;
    let Some(op) = command.split(' ').next().filter(|op| !op.is_empty()) else {
        return Vec::new();
    };
    let op = op.to_lowercase();

    let mut matches: Vec<(usize, &String)> = candidates
        .iter()
        .filter_map(|candidate| {
            let first = candidate.split(' ').next().unwrap_or("").to_lowercase();
            first.starts_with(&op).then_some((first.len(), candidate))
        })
        .collect();

    // Stable: equal-length matches keep their candidate order.
    matches.sort_by_key(|(len, _)| *len);
    matches.into_iter().map(|(_, c)| c.clone()).collect()
}
