//! Per-player bookkeeping kept alongside the board.

use super::area::AreaLedger;
use crate::core::AreaId;

/// Everything the engine tracks about one player.
#[derive(Clone, Debug, Default)]
pub struct PlayerAreas {
    /// Live areas and their sizes.
    pub(crate) ledger: AreaLedger,

    /// Cells owned.
    pub(crate) busy_fields: u64,

    /// Unclaimed cells with at least one neighbor owned by this player.
    pub(crate) free_adjacent_fields: u64,

    /// Whether the golden move has been spent.
    pub(crate) used_golden_move: bool,
}

impl PlayerAreas {
    /// Create bookkeeping for a player with nothing on the board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct areas currently owned.
    #[must_use]
    pub fn area_count(&self) -> u32 {
        self.ledger.len()
    }

    /// Number of cells owned.
    #[must_use]
    pub fn busy_fields(&self) -> u64 {
        self.busy_fields
    }

    /// Unclaimed cells bordering this player's cells.
    #[must_use]
    pub fn free_adjacent_fields(&self) -> u64 {
        self.free_adjacent_fields
    }

    /// Whether the golden move has been used.
    #[must_use]
    pub fn used_golden_move(&self) -> bool {
        self.used_golden_move
    }

    /// Size of one area, zero if it is not live.
    #[must_use]
    pub fn area_size(&self, id: AreaId) -> u64 {
        self.ledger.size(id)
    }

    /// Read access to the area table.
    #[must_use]
    pub fn ledger(&self) -> &AreaLedger {
        &self.ledger
    }
}
