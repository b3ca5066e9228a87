//! Log-based rendering collaborator.
//!
//! Stands in for the real map layer behind the core's sink traits: marker
//! placement, icon swaps and popup countdowns become structured log lines.
//! A real renderer would subscribe the same way.

use shardmap_core::coords::WorldGrid;
use shardmap_core::entity::{plane_position, EntityKind, EntitySnapshot};
use shardmap_core::events::{PhaseSink, SuggestionSink};
use shardmap_core::settlement::{tribe_color, Settlement};

/// Renderer stand-in that logs everything it would draw.
#[derive(Debug)]
pub struct LogView {
    grid: WorldGrid,
}

impl LogView {
    /// Create a view over the given world grid.
    #[must_use]
    pub fn new(grid: WorldGrid) -> Self {
        Self { grid }
    }

    /// Draw (log) all entity markers from a poll.
    pub fn render_entities(&self, entities: &EntitySnapshot) {
        for entity in entities.values() {
            if entity.kind == EntityKind::Other {
                continue;
            }
            let point = plane_position(entity, entities, &self.grid);
            tracing::debug!(
                id = entity.id,
                name = %entity.name,
                kind = ?entity.kind,
                color = tribe_color(entity.tribe_id),
                lat = point.lat,
                lng = point.lng,
                "entity marker"
            );
        }
    }
}

impl PhaseSink for LogView {
    fn icon_changed(&mut self, settlement: &Settlement) {
        let point = self
            .grid
            .to_plane(settlement.grid_x, settlement.grid_y, 0.5, 0.5);
        tracing::info!(
            id = settlement.id,
            name = %settlement.name,
            icon = settlement.icon().asset(),
            color = tribe_color(settlement.tribe_id),
            lat = point.lat,
            lng = point.lng,
            "settlement icon"
        );
    }

    fn selection_updated(&mut self, settlement: &Settlement, war: &str, combat: &str) {
        tracing::info!(id = settlement.id, war, combat, "selection countdown");
    }
}

impl SuggestionSink for LogView {
    fn suggestions_changed(&mut self, suggestions: &[String]) {
        tracing::info!(?suggestions, "command suggestions");
    }
}
