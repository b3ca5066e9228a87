//! # Shardmap Core
//!
//! Engine core for the live shard-grid map: phase scheduling, coordinate
//! transcoding, and the command-location protocol.
//!
//! This crate contains **only** pure logic:
//! - No IO or network
//! - No timers (callers pass UNIX timestamps in)
//! - No rendering (the render layer subscribes via [`events`] traits)
//!
//! This separation keeps every phase computation and coordinate transform
//! independently testable against literal timestamps and points.
//!
//! ## Crate Structure
//!
//! - [`phase`] - war/combat phase math over UNIX time
//! - [`scheduler`] - priority-ordered lazy phase re-evaluation
//! - [`coords`] - shard id packing and shard/plane transcoding
//! - [`command`] - the `Shard::x,y::text` command protocol and suggestions
//! - [`settlement`] / [`entity`] - backend snapshot data model
//! - [`events`] - collaborator interfaces for the rendering/UI layer

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod command;
pub mod coords;
pub mod entity;
pub mod error;
pub mod events;
pub mod phase;
pub mod scheduler;
pub mod settlement;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::command::{parse, suggest, CommandLocation};
    pub use crate::coords::{PlanePoint, ShardId, ShardLocation, WorldGrid, PLANE_EXTENT};
    pub use crate::entity::{plane_position, Entity, EntityId, EntityKind, EntitySnapshot};
    pub use crate::error::{CoreError, Result};
    pub use crate::events::{PhaseSink, SuggestionSink};
    pub use crate::phase::{
        combat_phase, format_duration, war_phase, CombatPhase, PhaseConfig, WarPhase, WarState,
    };
    pub use crate::scheduler::PhaseScheduler;
    pub use crate::settlement::{
        tribe_color, Icon, Settlement, SettlementId, SettlementSnapshot, Tribe, TribeId,
    };
}
