//! Full recomputation of the incremental bookkeeping.
//!
//! `Game::audit` rebuilds areas, sizes and counters from the raw cell owners
//! and compares them with what the move engine maintained. It is linear in
//! the board size and meant for tests and diagnostics, not for play.

use rustc_hash::{FxHashMap, FxHashSet};

use super::engine::Game;
use crate::core::{AreaId, Coord, GammaError, PlayerId};

fn inconsistent(msg: String) -> GammaError {
    GammaError::Inconsistent(msg)
}

impl Game {
    /// Check every bookkeeping invariant against a from-scratch recount.
    pub fn audit(&self) -> Result<(), GammaError> {
        let grid = self.grid();
        if !grid.markers_clear() {
            return Err(inconsistent("traversal marker left set".into()));
        }

        let width = grid.width() as usize;
        let idx = |c: Coord| c.y as usize * width + c.x as usize;
        let mut seen = vec![false; width * grid.height() as usize];
        let mut empty = 0u64;
        let mut components: FxHashMap<PlayerId, Vec<(AreaId, u64)>> = FxHashMap::default();

        for start in grid.coords() {
            let cell = *grid.get(start);
            let Some(owner) = cell.owner else {
                if cell.area.is_some() {
                    return Err(inconsistent(format!("unclaimed cell {} has {}", start, cell.area)));
                }
                empty += 1;
                continue;
            };
            if seen[idx(start)] {
                continue;
            }

            let mut queue = vec![start];
            seen[idx(start)] = true;
            let mut head = 0;
            while head < queue.len() {
                let current = queue[head];
                head += 1;
                if grid.area(current) != cell.area {
                    return Err(inconsistent(format!(
                        "{} area holds both {} and {}",
                        owner,
                        cell.area,
                        grid.area(current)
                    )));
                }
                for n in grid.neighbors(current) {
                    if !seen[idx(n)] && grid.get(n).is_owned_by(owner) {
                        seen[idx(n)] = true;
                        queue.push(n);
                    }
                }
            }
            components
                .entry(owner)
                .or_default()
                .push((cell.area, queue.len() as u64));
        }

        if empty != self.unclaimed_fields() {
            return Err(inconsistent(format!(
                "{} unclaimed cells counted as {}",
                empty,
                self.unclaimed_fields()
            )));
        }

        for player in PlayerId::all(self.player_count()) {
            let Some(info) = self.player(player) else {
                return Err(inconsistent(format!("{} has no bookkeeping", player)));
            };
            let found = components.get(&player).map(Vec::as_slice).unwrap_or(&[]);

            if found.len() as u32 != info.area_count() {
                return Err(inconsistent(format!(
                    "{} owns {} areas but the ledger has {}",
                    player,
                    found.len(),
                    info.area_count()
                )));
            }
            if info.area_count() > self.max_areas() {
                return Err(inconsistent(format!("{} exceeds the area cap", player)));
            }

            let mut ids = FxHashSet::default();
            let mut cells = 0;
            for &(id, size) in found {
                if !ids.insert(id) {
                    return Err(inconsistent(format!("{} reuses {} for two areas", player, id)));
                }
                if info.area_size(id) != size {
                    return Err(inconsistent(format!(
                        "{} {} has {} cells but the ledger says {}",
                        player,
                        id,
                        size,
                        info.area_size(id)
                    )));
                }
                cells += size;
            }
            if cells != info.busy_fields() || info.ledger().total_size() != info.busy_fields() {
                return Err(inconsistent(format!(
                    "{} owns {} cells but busy_fields is {}",
                    player,
                    cells,
                    info.busy_fields()
                )));
            }

            let bordering = grid
                .coords()
                .filter(|&c| grid.get(c).is_empty() && grid.owned_neighbor_count(player, c) > 0)
                .count() as u64;
            if bordering != info.free_adjacent_fields() {
                return Err(inconsistent(format!(
                    "{} borders {} free cells but the cache says {}",
                    player,
                    bordering,
                    info.free_adjacent_fields()
                )));
            }
        }

        Ok(())
    }
}
