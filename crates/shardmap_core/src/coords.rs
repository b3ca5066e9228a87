//! Shard/plane coordinate transcoding.
//!
//! The game world is a grid of shards, each simulated by one backend
//! process. The backend addresses a shard by a packed 32-bit identifier and
//! positions entities by fractional offsets inside the shard. The rendering
//! layer works in a continuous 256x256 plane with north pointing toward
//! negative latitude. This module converts between the two, bit-exactly on
//! the identifier side and within floating tolerance on the plane side.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Extent of the rendering plane along each axis.
pub const PLANE_EXTENT: f64 = 256.0;

/// Packed 32-bit shard identifier.
///
/// Wire layout is little-endian with the grid **y** index in the low
/// half-word and the grid **x** index in the high half-word. The layout
/// must not change: the backend parses these ids out of command strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShardId(pub u32);

impl ShardId {
    /// Pack grid indices into an identifier.
    #[must_use]
    pub const fn pack(grid_x: u16, grid_y: u16) -> Self {
        Self(((grid_x as u32) << 16) | grid_y as u32)
    }

    /// Unpack into `(grid_x, grid_y)`. Exact inverse of [`ShardId::pack`].
    #[must_use]
    pub const fn unpack(self) -> (u16, u16) {
        ((self.0 >> 16) as u16, self.0 as u16)
    }

    /// Grid x index (high half-word).
    #[must_use]
    pub const fn grid_x(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Grid y index (low half-word).
    #[must_use]
    pub const fn grid_y(self) -> u16 {
        self.0 as u16
    }
}

impl std::fmt::Display for ShardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the rendering plane.
///
/// The addressable world occupies the quadrant `lat <= 0, lng >= 0`;
/// latitude grows more negative toward the south edge of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    /// Latitude, `[-256, 0]` inside the world.
    pub lat: f64,
    /// Longitude, `[0, 256]` inside the world.
    pub lng: f64,
}

impl PlanePoint {
    /// Center of the world plane, the default map view.
    pub const CENTER: Self = Self {
        lat: -(PLANE_EXTENT / 2.0),
        lng: PLANE_EXTENT / 2.0,
    };

    /// Create a plane point.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A shard plus fractional offsets inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShardLocation {
    /// The shard containing the point.
    pub shard: ShardId,
    /// Fractional x offset within the shard, `[0, 1)`.
    pub frac_x: f64,
    /// Fractional y offset within the shard, `[0, 1)`.
    pub frac_y: f64,
}

/// Dimensions of the shard grid, fixing the plane transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldGrid {
    shards_x: u16,
    shards_y: u16,
}

impl WorldGrid {
    /// Create a grid of `shards_x` by `shards_y` shards.
    pub fn new(shards_x: u16, shards_y: u16) -> Result<Self> {
        if shards_x == 0 || shards_y == 0 {
            return Err(CoreError::EmptyWorldGrid { shards_x, shards_y });
        }
        Ok(Self { shards_x, shards_y })
    }

    /// Plane width of one shard.
    #[must_use]
    pub fn shard_size_x(&self) -> f64 {
        PLANE_EXTENT / f64::from(self.shards_x)
    }

    /// Plane height of one shard.
    #[must_use]
    pub fn shard_size_y(&self) -> f64 {
        PLANE_EXTENT / f64::from(self.shards_y)
    }

    /// Convert shard grid indices plus in-shard fractional offsets to a
    /// plane point.
    #[must_use]
    pub fn to_plane(&self, grid_x: u16, grid_y: u16, frac_x: f64, frac_y: f64) -> PlanePoint {
        let size_x = self.shard_size_x();
        let size_y = self.shard_size_y();
        PlanePoint {
            lat: -(size_y * frac_y + f64::from(grid_y) * size_y),
            lng: size_x * frac_x + f64::from(grid_x) * size_x,
        }
    }

    /// Convert a [`ShardLocation`] to a plane point.
    #[must_use]
    pub fn location_to_plane(&self, loc: &ShardLocation) -> PlanePoint {
        let (grid_x, grid_y) = loc.shard.unpack();
        self.to_plane(grid_x, grid_y, loc.frac_x, loc.frac_y)
    }

    /// Find the shard containing a plane point.
    ///
    /// Returns `None` for points outside the world's quadrant
    /// (`lat > 0` or `lng < 0`) or past the far edge of the grid; that is
    /// an expected outcome of clicking open water off-map, not an error.
    #[must_use]
    pub fn locate(&self, point: PlanePoint) -> Option<ShardLocation> {
        if point.lat > 0.0 || point.lng < 0.0 {
            return None;
        }

        let size_x = self.shard_size_x();
        let size_y = self.shard_size_y();

        let grid_x = (point.lng / size_x).floor();
        let grid_y = (-point.lat / size_y).floor();
        if grid_x > f64::from(u16::MAX) || grid_y > f64::from(u16::MAX) {
            return None;
        }

        Some(ShardLocation {
            shard: ShardId::pack(grid_x as u16, grid_y as u16),
            frac_x: (point.lng % size_x) / size_x,
            frac_y: (-point.lat % size_y) / size_y,
        })
    }
}
