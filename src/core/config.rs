//! Game configuration types.
//!
//! A game is configured once at construction:
//! - `Coord`: a board position
//! - `AreaId`: per-player area identifier
//! - `GameConfig`: board dimensions, player count and area cap
//!
//! The engine never changes a configuration after construction.

use serde::{Deserialize, Serialize};

use super::error::GammaError;

/// Board position. `x` is the column (left to right), `y` the row
/// (bottom to top), both 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Area identifier, unique only within one player's ledger.
///
/// `AreaId::NONE` (0) marks a cell without an area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub u32);

impl AreaId {
    /// The "no area" marker.
    pub const NONE: AreaId = AreaId(0);

    /// Create a new area ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check whether this is a real area.
    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Area({})", self.0)
    }
}

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use gamma::core::GameConfig;
///
/// let config = GameConfig::new(10, 8, 2, 3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cell_count(), 80);
///
/// assert!(GameConfig::new(0, 8, 2, 3).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width (number of columns).
    pub width: u32,

    /// Board height (number of rows).
    pub height: u32,

    /// Number of players.
    pub players: u32,

    /// Maximum number of distinct areas one player may own.
    pub max_areas: u32,
}

impl GameConfig {
    /// Create a new game configuration. Call `validate` before use.
    #[must_use]
    pub const fn new(width: u32, height: u32, players: u32, max_areas: u32) -> Self {
        Self {
            width,
            height,
            players,
            max_areas,
        }
    }

    /// Set the board dimensions.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the player count.
    #[must_use]
    pub fn with_players(mut self, players: u32) -> Self {
        self.players = players;
        self
    }

    /// Set the area cap.
    #[must_use]
    pub fn with_max_areas(mut self, max_areas: u32) -> Self {
        self.max_areas = max_areas;
        self
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Check that every field is positive and the board is addressable.
    pub fn validate(&self) -> Result<(), GammaError> {
        if self.width == 0 || self.height == 0 {
            return Err(GammaError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.players == 0 {
            return Err(GammaError::ZeroPlayers);
        }
        if self.max_areas == 0 {
            return Err(GammaError::ZeroAreas);
        }
        if usize::try_from(self.cell_count()).is_err() {
            return Err(GammaError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(10, 10, 2, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_id() {
        let id = AreaId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(id.is_some());
        assert!(!AreaId::NONE.is_some());
        assert_eq!(format!("{}", id), "Area(5)");
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(format!("{}", Coord::new(3, 7)), "(3, 7)");
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::default()
            .with_size(5, 4)
            .with_players(3)
            .with_max_areas(2);

        assert_eq!(config, GameConfig::new(5, 4, 3, 2));
        assert_eq!(config.cell_count(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zeroes() {
        assert_eq!(
            GameConfig::new(0, 1, 1, 1).validate(),
            Err(GammaError::ZeroDimension { width: 0, height: 1 })
        );
        assert_eq!(
            GameConfig::new(1, 0, 1, 1).validate(),
            Err(GammaError::ZeroDimension { width: 1, height: 0 })
        );
        assert_eq!(GameConfig::new(1, 1, 0, 1).validate(), Err(GammaError::ZeroPlayers));
        assert_eq!(GameConfig::new(1, 1, 1, 0).validate(), Err(GammaError::ZeroAreas));
    }

    #[test]
    fn test_config_cell_count_does_not_overflow() {
        let config = GameConfig::new(u32::MAX, u32::MAX, 1, 1);
        assert_eq!(config.cell_count(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new(7, 3, 4, 2);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
