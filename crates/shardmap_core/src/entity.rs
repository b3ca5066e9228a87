//! Mobile entity data model.
//!
//! Entities (ships and spawn beds) are positioned by their home shard plus
//! fractional offsets inside it. A bed placed on a ship is reported relative
//! to the ship, so its offsets are composed with the parent's before
//! conversion to the plane.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coords::{PlanePoint, ShardId, WorldGrid};
use crate::settlement::TribeId;

/// Unique identifier for entities.
pub type EntityId = u64;

/// Kind of marker an entity draws as.
///
/// Kinds the map has no marker for deserialize as [`EntityKind::Other`]
/// rather than failing the whole poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum EntityKind {
    /// A spawn bed.
    Bed,
    /// A ship.
    Ship,
    /// Anything the map has no marker for; skipped by the renderer.
    Other,
}

impl From<String> for EntityKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Bed" => Self::Bed,
            "Ship" => Self::Ship,
            _ => Self::Other,
        }
    }
}

/// Ship hull class, which selects the marker glyph.
///
/// Unknown classes deserialize as [`ShipClass::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ShipClass {
    /// No hull (beds, unknown classes).
    #[default]
    None,
    /// Raft.
    Raft,
    /// Dingy.
    Dingy,
    /// Sloop.
    Sloop,
    /// Schooner.
    Schooner,
    /// Brigantine.
    Brigantine,
    /// Galleon.
    Galleon,
}

impl From<String> for ShipClass {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Raft" => Self::Raft,
            "Dingy" => Self::Dingy,
            "Sloop" => Self::Sloop,
            "Schooner" => Self::Schooner,
            "Brigantine" => Self::Brigantine,
            "Galleon" => Self::Galleon,
            _ => Self::None,
        }
    }
}

/// One mobile entity from the backend poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Entity identifier.
    #[serde(rename = "EntityID")]
    pub id: EntityId,
    /// Display name.
    #[serde(rename = "EntityName")]
    pub name: String,
    /// Marker kind.
    #[serde(rename = "EntityType")]
    pub kind: EntityKind,
    /// Hull class for ships.
    #[serde(rename = "EntitySubType", default)]
    pub class: ShipClass,
    /// Owning tribe.
    #[serde(rename = "TribeID", default)]
    pub tribe_id: Option<TribeId>,
    /// Home shard.
    #[serde(rename = "ShardID")]
    pub shard: ShardId,
    /// Fractional x offset within the home shard.
    #[serde(rename = "ShardXRelativeLocation")]
    pub rel_x: f64,
    /// Fractional y offset within the home shard.
    #[serde(rename = "ShardYRelativeLocation")]
    pub rel_y: f64,
    /// Carrying entity, when this entity rides another (bed on a ship).
    #[serde(rename = "ParentEntityID", default)]
    pub parent: Option<EntityId>,
}

/// An entity poll response, keyed by entity id.
pub type EntitySnapshot = BTreeMap<EntityId, Entity>;

/// Plane position of an entity, composing the parent's offsets when the
/// entity rides another. A dangling parent id is ignored; the entity then
/// renders at its own offsets, which is the best available answer between
/// polls that disagree.
#[must_use]
pub fn plane_position(entity: &Entity, all: &EntitySnapshot, grid: &WorldGrid) -> PlanePoint {
    let (mut rel_x, mut rel_y) = (entity.rel_x, entity.rel_y);
    if let Some(parent) = entity.parent.and_then(|id| all.get(&id)) {
        rel_x += parent.rel_x;
        rel_y += parent.rel_y;
    }

    let (grid_x, grid_y) = entity.shard.unpack();
    grid.to_plane(grid_x, grid_y, rel_x, rel_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(id: EntityId, rel_x: f64, rel_y: f64) -> Entity {
        Entity {
            id,
            name: format!("Ship {id}"),
            kind: EntityKind::Ship,
            class: ShipClass::Sloop,
            tribe_id: Some(1_000_060_001),
            shard: ShardId::pack(2, 1),
            rel_x,
            rel_y,
            parent: None,
        }
    }

    #[test]
    fn positions_standalone_entity() {
        let grid = WorldGrid::new(10, 10).unwrap();
        let mut all = EntitySnapshot::new();
        all.insert(1, ship(1, 0.25, 0.75));

        let p = plane_position(&all[&1], &all, &grid);
        assert!((p.lng - (25.6 * 0.25 + 2.0 * 25.6)).abs() < 1e-9);
        assert!((p.lat - -(25.6 * 0.75 + 1.0 * 25.6)).abs() < 1e-9);
    }

    #[test]
    fn composes_parent_offsets() {
        let grid = WorldGrid::new(10, 10).unwrap();
        let mut all = EntitySnapshot::new();
        all.insert(1, ship(1, 0.25, 0.5));
        let mut bed = ship(2, 0.05, 0.05);
        bed.kind = EntityKind::Bed;
        bed.class = ShipClass::None;
        bed.parent = Some(1);
        all.insert(2, bed);

        let bed_pos = plane_position(&all[&2], &all, &grid);
        let expected = grid.to_plane(2, 1, 0.30, 0.55);
        assert!((bed_pos.lng - expected.lng).abs() < 1e-9);
        assert!((bed_pos.lat - expected.lat).abs() < 1e-9);
    }

    #[test]
    fn missing_parent_is_ignored() {
        let grid = WorldGrid::new(10, 10).unwrap();
        let mut all = EntitySnapshot::new();
        let mut orphan = ship(3, 0.5, 0.5);
        orphan.parent = Some(99);
        all.insert(3, orphan);

        let p = plane_position(&all[&3], &all, &grid);
        let expected = grid.to_plane(2, 1, 0.5, 0.5);
        assert!((p.lng - expected.lng).abs() < 1e-9);
        assert!((p.lat - expected.lat).abs() < 1e-9);
    }

    #[test]
    fn unknown_kinds_and_classes_deserialize() {
        let json = r#"{
            "EntityID": 5,
            "EntityName": "Mystery",
            "EntityType": "Kraken",
            "EntitySubType": "Tentacled",
            "ShardID": 131074,
            "ShardXRelativeLocation": 0.1,
            "ShardYRelativeLocation": 0.2
        }"#;
        let e: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(e.kind, EntityKind::Other);
        assert_eq!(e.class, ShipClass::None);
        assert_eq!(e.shard.unpack(), (2, 2));
        assert_eq!(e.parent, None);
    }
}
