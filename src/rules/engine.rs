//! The move engine.
//!
//! `Game` owns the board and every player's area bookkeeping and is the only
//! thing that mutates them. Each mutating call evaluates all of its legality
//! checks and reserves any storage it needs before writing anything, so a
//! rejected move leaves the game untouched.
//!
//! ## Incremental bookkeeping
//!
//! - Placing a cell either opens a new area or joins the areas it touches.
//!   On a join the largest touching area keeps its id (first in up, left,
//!   right, down order among equals) and the others are flood-filled to it.
//! - A golden move removes a cell from its owner, whose area may fall apart.
//!   The oracle finds one representative cell per fragment; the first
//!   fragment keeps the old id and each further one is relabelled to a
//!   fresh id.
//! - The per-player count of unclaimed cells bordering that player is kept
//!   up to date from the four neighbors of the changed cell only.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, error, trace};

use crate::board::{self, oracle, Grid, NeighborAreas, Neighbors};
use crate::core::{AreaId, Coord, GameConfig, GammaError, Move, MoveRecord, PlayerId, PlayerMap};
use crate::ledger::PlayerAreas;

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single player with the most cells.
    Winner(PlayerId),
    /// Several players share the most cells.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }
}

/// Everything a legal golden move needs to be applied.
struct GoldenPlan {
    victim: PlayerId,
    victim_area: AreaId,
    /// Areas of the acting player bordering the target cell.
    touching: NeighborAreas,
    /// One cell per fragment the victim's area breaks into.
    fragments: Neighbors,
}

/// A game of gamma.
///
/// ## Example
///
/// ```
/// use gamma::rules::Game;
/// use gamma::core::PlayerId;
///
/// let p1 = PlayerId::new(1);
/// let mut game = Game::with_dimensions(2, 1, 1, 1).unwrap();
///
/// assert!(game.place(p1, 0, 0));
/// assert_eq!(game.busy_fields(p1), 1);
/// assert_eq!(game.free_fields(p1), 1);
///
/// assert!(game.place(p1, 1, 0));
/// assert_eq!(game.area_count(p1), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    /// Unclaimed cells on the whole board.
    free_fields: u64,
    grid: Grid,
    players: PlayerMap<PlayerAreas>,
    history: Vector<MoveRecord>,
}

impl Game {
    /// Create a game with an empty board.
    ///
    /// Fails if any dimension, the player count or the area cap is zero, or
    /// if storage for the board or player tables cannot be allocated.
    pub fn new(config: GameConfig) -> Result<Self, GammaError> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height)?;
        let players = PlayerMap::try_with_default(config.players)?;

        debug!(
            width = config.width,
            height = config.height,
            players = config.players,
            max_areas = config.max_areas,
            "new game"
        );

        Ok(Self {
            config,
            free_fields: config.cell_count(),
            grid,
            players,
            history: Vector::new(),
        })
    }

    /// Shorthand for `Game::new(GameConfig::new(width, height, players, max_areas))`.
    pub fn with_dimensions(
        width: u32,
        height: u32,
        players: u32,
        max_areas: u32,
    ) -> Result<Self, GammaError> {
        Self::new(GameConfig::new(width, height, players, max_areas))
    }

    // === Accessors ===

    /// The configuration this game was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Board height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> u32 {
        self.config.players
    }

    /// Area cap per player.
    #[must_use]
    pub fn max_areas(&self) -> u32 {
        self.config.max_areas
    }

    /// Read-only view of the board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Bookkeeping for one player, `None` for an unknown player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerAreas> {
        self.players.get(player)
    }

    /// Unclaimed cells on the whole board.
    #[must_use]
    pub fn unclaimed_fields(&self) -> u64 {
        self.free_fields
    }

    /// Successful moves in the order they were made.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Owner of `(x, y)`, `None` if unclaimed or off the board.
    #[must_use]
    pub fn owner_at(&self, x: u32, y: u32) -> Option<PlayerId> {
        if !self.grid.contains(x, y) {
            return None;
        }
        self.grid.owner(Coord::new(x, y))
    }

    // === Queries ===

    /// Cells owned by `player`. Zero for an unknown player.
    #[must_use]
    pub fn busy_fields(&self, player: PlayerId) -> u64 {
        self.players.get(player).map_or(0, PlayerAreas::busy_fields)
    }

    /// Cells `player` could claim with an ordinary move.
    ///
    /// Below the area cap that is every unclaimed cell. At the cap only cells
    /// bordering the player's own areas qualify, and the cached count of
    /// those is returned instead. Zero for an unknown player.
    #[must_use]
    pub fn free_fields(&self, player: PlayerId) -> u64 {
        match self.players.get(player) {
            None => 0,
            Some(info) if info.area_count() >= self.config.max_areas => info.free_adjacent_fields(),
            Some(_) => self.free_fields,
        }
    }

    /// Number of distinct areas `player` owns. Zero for an unknown player.
    #[must_use]
    pub fn area_count(&self, player: PlayerId) -> u32 {
        self.players.get(player).map_or(0, PlayerAreas::area_count)
    }

    /// Sizes of `player`'s areas, largest first.
    #[must_use]
    pub fn area_sizes(&self, player: PlayerId) -> Vec<u64> {
        let mut sizes: Vec<u64> = self
            .players
            .get(player)
            .map(|info| info.ledger().iter().map(|(_, size)| size).collect())
            .unwrap_or_default();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }

    /// Whether `player` has spent the golden move. False for an unknown player.
    #[must_use]
    pub fn golden_used(&self, player: PlayerId) -> bool {
        self.players.get(player).is_some_and(PlayerAreas::used_golden_move)
    }

    /// Check whether `player` has any legal golden move on the board.
    ///
    /// Scans every cell, so this costs one pass over the board plus a
    /// bounded number of searches per candidate cell.
    pub fn golden_possible(&mut self, player: PlayerId) -> bool {
        let Some(info) = self.players.get(player) else {
            return false;
        };
        if info.used_golden_move() {
            return false;
        }
        // Nothing on the board belongs to an opponent.
        if self.free_fields + info.busy_fields() == self.config.cell_count() {
            return false;
        }

        for y in 0..self.config.height {
            for x in 0..self.config.width {
                if self.golden_allowed(player, Coord::new(x, y)) {
                    return true;
                }
            }
        }
        false
    }

    /// Board ownership as text, top row first.
    #[must_use]
    pub fn board_text(&self) -> String {
        board::board_text(&self.grid)
    }

    // === Turn availability ===

    /// Check whether `player` can make an ordinary move.
    #[must_use]
    pub fn can_move(&self, player: PlayerId) -> bool {
        self.free_fields(player) > 0
    }

    /// Check whether `player` can make any move, ordinary or golden.
    pub fn can_act(&mut self, player: PlayerId) -> bool {
        self.can_move(player) || self.golden_possible(player)
    }

    /// The next player after `after`, in cyclic order, who can act.
    ///
    /// `after` itself is considered last. `None` when nobody can act.
    pub fn next_player(&mut self, after: PlayerId) -> Option<PlayerId> {
        let count = self.config.players;
        let mut candidate = after;
        for _ in 0..count {
            candidate = candidate.next(count);
            if self.can_act(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Check whether no player can move any more.
    pub fn is_finished(&mut self) -> bool {
        PlayerId::all(self.config.players).all(|p| !self.can_act(p))
    }

    /// Outcome once the game is finished: the players owning the most cells.
    pub fn result(&mut self) -> Option<GameResult> {
        if !self.is_finished() {
            return None;
        }

        let best = PlayerId::all(self.config.players)
            .map(|p| self.busy_fields(p))
            .max()
            .unwrap_or(0);
        let mut leaders: Vec<PlayerId> = PlayerId::all(self.config.players)
            .filter(|&p| self.busy_fields(p) == best)
            .collect();

        Some(if leaders.len() == 1 {
            GameResult::Winner(leaders.remove(0))
        } else {
            GameResult::Winners(leaders)
        })
    }

    /// Every legal move for `player`: placements first, then golden moves.
    pub fn legal_moves(&mut self, player: PlayerId) -> Vec<Move> {
        let Some(info) = self.players.get(player) else {
            return Vec::new();
        };
        let capped = info.area_count() >= self.config.max_areas;
        let golden_left = !info.used_golden_move();

        let mut moves = Vec::new();
        for y in 0..self.config.height {
            for x in 0..self.config.width {
                let c = Coord::new(x, y);
                if self.grid.get(c).is_empty()
                    && (!capped || self.grid.owned_neighbor_count(player, c) > 0)
                {
                    moves.push(Move::Place(c));
                }
            }
        }

        if golden_left {
            for y in 0..self.config.height {
                for x in 0..self.config.width {
                    let c = Coord::new(x, y);
                    if self.golden_allowed(player, c) {
                        moves.push(Move::Golden(c));
                    }
                }
            }
        }

        moves
    }

    // === Mutations ===

    /// Apply a move for `player`. Returns whether it was legal.
    pub fn apply(&mut self, player: PlayerId, mv: Move) -> bool {
        let Coord { x, y } = mv.target();
        match mv {
            Move::Place(_) => self.place(player, x, y),
            Move::Golden(_) => self.golden_move(player, x, y),
        }
    }

    /// Claim the empty cell `(x, y)` for `player`.
    ///
    /// Returns `false`, changing nothing, if the player or coordinates are
    /// invalid, the cell is taken, or the cell would open an area beyond the
    /// cap. An internal allocation failure is logged and also reported as
    /// `false`; use [`Game::try_place`] to observe it.
    pub fn place(&mut self, player: PlayerId, x: u32, y: u32) -> bool {
        self.try_place(player, x, y).unwrap_or_else(|err| {
            error!(%err, player = player.raw(), x, y, "move aborted");
            false
        })
    }

    /// Like [`Game::place`], but reports allocation failure as an error.
    pub fn try_place(&mut self, player: PlayerId, x: u32, y: u32) -> Result<bool, GammaError> {
        let Some(c) = self.target(player, x, y) else {
            return Ok(false);
        };
        if !self.grid.get(c).is_empty() {
            trace!(player = player.raw(), x, y, "move rejected: cell taken");
            return Ok(false);
        }

        let touching = oracle::neighbor_areas(&self.grid, player, c);
        if touching.is_empty() {
            if self.players[player].area_count() >= self.config.max_areas {
                trace!(player = player.raw(), x, y, "move rejected: area cap");
                return Ok(false);
            }
            self.players[player].ledger.reserve(1)?;
        }

        self.grid.set_owner(c, Some(player));
        self.attach(player, c, &touching);
        self.free_fields -= 1;
        self.players[player].busy_fields += 1;
        self.update_adjacency(c, None, Some(player));
        self.history.push_back(MoveRecord::new(player, Move::Place(c)));

        debug!(
            player = player.raw(),
            x,
            y,
            areas = self.players[player].area_count(),
            "placed"
        );
        Ok(true)
    }

    /// Take `(x, y)` from its owner and give it to `player`, once per game.
    ///
    /// Returns `false`, changing nothing, unless the cell belongs to another
    /// player, `player` still has the golden move, and afterwards neither
    /// side owns more areas than the cap allows. An internal allocation
    /// failure is logged and also reported as `false`; use
    /// [`Game::try_golden_move`] to observe it.
    pub fn golden_move(&mut self, player: PlayerId, x: u32, y: u32) -> bool {
        self.try_golden_move(player, x, y).unwrap_or_else(|err| {
            error!(%err, player = player.raw(), x, y, "golden move aborted");
            false
        })
    }

    /// Like [`Game::golden_move`], but reports allocation failure as an error.
    pub fn try_golden_move(&mut self, player: PlayerId, x: u32, y: u32) -> Result<bool, GammaError> {
        let Some(c) = self.target(player, x, y) else {
            return Ok(false);
        };
        if self.players[player].used_golden_move {
            trace!(player = player.raw(), x, y, "golden move rejected: already used");
            return Ok(false);
        }
        let Some(plan) = self.golden_plan(player, c) else {
            trace!(player = player.raw(), x, y, "golden move rejected");
            return Ok(false);
        };

        if plan.fragments.len() > 1 {
            self.players[plan.victim]
                .ledger
                .reserve(plan.fragments.len() - 1)?;
        }
        if plan.touching.is_empty() {
            self.players[player].ledger.reserve(1)?;
        }

        self.grid.set_owner(c, Some(player));
        self.grid.set_area(c, AreaId::NONE);
        self.detach(plan.victim, plan.victim_area, &plan.fragments);
        self.attach(player, c, &plan.touching);

        self.players[plan.victim].busy_fields -= 1;
        self.players[player].busy_fields += 1;
        self.players[player].used_golden_move = true;
        self.update_adjacency(c, Some(plan.victim), Some(player));
        self.history.push_back(MoveRecord::new(player, Move::Golden(c)));

        debug!(
            player = player.raw(),
            victim = plan.victim.raw(),
            x,
            y,
            areas = self.players[player].area_count(),
            victim_areas = self.players[plan.victim].area_count(),
            "golden move"
        );
        Ok(true)
    }

    // === Internals ===

    /// Validate player and coordinates.
    fn target(&self, player: PlayerId, x: u32, y: u32) -> Option<Coord> {
        if !player.is_valid(self.config.players) {
            trace!(player = player.raw(), "move rejected: unknown player");
            return None;
        }
        if !self.grid.contains(x, y) {
            trace!(player = player.raw(), x, y, "move rejected: off the board");
            return None;
        }
        Some(Coord::new(x, y))
    }

    /// Would `player` stay within the cap after gaining a cell that touches
    /// `touching` of its areas?
    fn gain_fits(&self, player: PlayerId, touching: usize) -> bool {
        let count = u64::from(self.players[player].area_count());
        count + 1 - touching as u64 <= u64::from(self.config.max_areas)
    }

    /// Would `victim` stay within the cap after losing a cell whose area
    /// falls into `fragments` pieces?
    fn loss_fits(&self, victim: PlayerId, fragments: usize) -> bool {
        let count = u64::from(self.players[victim].area_count());
        count - 1 + fragments as u64 <= u64::from(self.config.max_areas)
    }

    /// Legality of a golden move on `c`, ignoring whether the golden move
    /// was already used.
    fn golden_allowed(&mut self, player: PlayerId, c: Coord) -> bool {
        let Some(victim) = self.grid.owner(c).filter(|&v| v != player) else {
            return false;
        };
        if !self.gain_fits(player, oracle::neighbor_area_count(&self.grid, player, c) as usize) {
            return false;
        }
        // Each neighbor can head at most one fragment.
        if self.loss_fits(victim, self.grid.owned_neighbor_count(victim, c)) {
            return true;
        }
        let area = self.grid.area(c);
        let fragments = oracle::would_split_if_removed(&mut self.grid, victim, area, c);
        self.loss_fits(victim, fragments as usize)
    }

    /// Full plan for a golden move on `c`, or `None` if it is illegal.
    fn golden_plan(&mut self, player: PlayerId, c: Coord) -> Option<GoldenPlan> {
        let victim = self.grid.owner(c).filter(|&v| v != player)?;
        let touching = oracle::neighbor_areas(&self.grid, player, c);
        if !self.gain_fits(player, touching.len()) {
            return None;
        }

        let victim_area = self.grid.area(c);
        let fragments = oracle::split_components(&mut self.grid, victim, victim_area, c);
        if !self.loss_fits(victim, fragments.len()) {
            return None;
        }

        Some(GoldenPlan {
            victim,
            victim_area,
            touching,
            fragments,
        })
    }

    /// Give the freshly owned cell `c` an area of `player`: a new one if it
    /// touches none, otherwise the largest touching area, into which the
    /// other touching areas are merged.
    fn attach(&mut self, player: PlayerId, c: Coord, touching: &NeighborAreas) {
        let ledger = &mut self.players[player].ledger;

        let Some((&first, rest)) = touching.split_first() else {
            let id = ledger.alloc(1);
            self.grid.set_area(c, id);
            return;
        };

        let mut surviving = first;
        for &id in rest {
            if ledger.size(id) > ledger.size(surviving) {
                surviving = id;
            }
        }
        let absorbed: NeighborAreas = touching.iter().copied().filter(|&id| id != surviving).collect();

        self.grid.set_area(c, surviving);
        for n in self.grid.neighbors(c) {
            let cell = *self.grid.get(n);
            if cell.is_owned_by(player) && absorbed.contains(&cell.area) {
                oracle::relabel(&mut self.grid, player, cell.area, n, surviving);
            }
        }

        let size = ledger.merge(surviving, &absorbed, 1);
        if !absorbed.is_empty() {
            trace!(
                player = player.raw(),
                surviving = surviving.raw(),
                absorbed = absorbed.len(),
                size,
                "areas merged"
            );
        }
    }

    /// Take one cell out of `victim`'s area `area`, which falls into the
    /// pieces headed by `fragments`. The cell must already carry its new
    /// owner.
    fn detach(&mut self, victim: PlayerId, area: AreaId, fragments: &Neighbors) {
        let ledger = &mut self.players[victim].ledger;
        let remaining = ledger.size(area) - 1;

        let Some((_, others)) = fragments.split_first() else {
            ledger.release(area);
            return;
        };

        let mut moved = 0;
        for &start in others {
            let id = ledger.alloc(0);
            let size = oracle::relabel(&mut self.grid, victim, area, start, id);
            ledger.set_size(id, size);
            moved += size;
        }
        ledger.set_size(area, remaining - moved);

        if !others.is_empty() {
            trace!(
                player = victim.raw(),
                area = area.raw(),
                pieces = fragments.len(),
                "area split"
            );
        }
    }

    /// Adjust the bordering-cell counters after `c` went from `old` to `new`.
    /// Must run after the grid already shows `new` at `c`.
    fn update_adjacency(&mut self, c: Coord, old: Option<PlayerId>, new: Option<PlayerId>) {
        let neighbors = self.grid.neighbors(c);

        if old.is_none() {
            // `c` itself stops counting for everyone who bordered it.
            let mut seen: SmallVec<[PlayerId; 4]> = SmallVec::new();
            for &n in &neighbors {
                if let Some(q) = self.grid.owner(n) {
                    if !seen.contains(&q) {
                        seen.push(q);
                        self.players[q].free_adjacent_fields -= 1;
                    }
                }
            }
        }

        for &n in &neighbors {
            if !self.grid.get(n).is_empty() {
                continue;
            }
            if let Some(o) = old {
                if self.grid.owned_neighbor_count(o, n) == 0 {
                    self.players[o].free_adjacent_fields -= 1;
                }
            }
            if let Some(p) = new {
                if self.grid.owned_neighbor_count(p, n) == 1 {
                    self.players[p].free_adjacent_fields += 1;
                }
            }
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.board_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn game(width: u32, height: u32, players: u32, areas: u32) -> Game {
        Game::with_dimensions(width, height, players, areas).unwrap()
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(P2);
        assert!(!result.is_winner(P1));
        assert!(result.is_winner(P2));

        let shared = GameResult::Winners(vec![P1, P2]);
        assert!(shared.is_winner(P1));
        assert!(!shared.is_winner(PlayerId::new(3)));
    }

    #[test]
    fn test_merge_keeps_largest_area_id() {
        let mut g = game(5, 1, 1, 3);
        // Area 1 = {0}, area 2 = {2, 3}.
        assert!(g.place(P1, 0, 0));
        assert!(g.place(P1, 2, 0));
        assert!(g.place(P1, 3, 0));
        assert_eq!(g.grid().area(Coord::new(0, 0)), AreaId::new(1));
        assert_eq!(g.grid().area(Coord::new(2, 0)), AreaId::new(2));

        assert!(g.place(P1, 1, 0));

        for x in 0..4 {
            assert_eq!(g.grid().area(Coord::new(x, 0)), AreaId::new(2));
        }
        assert_eq!(g.area_count(P1), 1);
        assert_eq!(g.player(P1).unwrap().area_size(AreaId::new(2)), 4);
        assert!(!g.player(P1).unwrap().ledger().is_live(AreaId::new(1)));
    }

    #[test]
    fn test_merge_tie_prefers_left_over_right() {
        let mut g = game(3, 1, 1, 2);
        assert!(g.place(P1, 2, 0));
        assert!(g.place(P1, 0, 0));
        // Equal sizes: left neighbor (area 2) comes before right (area 1).
        assert!(g.place(P1, 1, 0));
        assert_eq!(g.grid().area(Coord::new(2, 0)), AreaId::new(2));
        assert_eq!(g.area_sizes(P1), vec![3]);
    }

    #[test]
    fn test_released_id_is_reused() {
        let mut g = game(5, 1, 1, 3);
        assert!(g.place(P1, 0, 0));
        assert!(g.place(P1, 2, 0));
        assert!(g.place(P1, 1, 0));
        // Area 2 was absorbed into area 1 and is free again.
        assert!(g.place(P1, 4, 0));
        assert_eq!(g.grid().area(Coord::new(4, 0)), AreaId::new(2));
    }

    #[test]
    fn test_golden_split_allocates_fresh_id() {
        let mut g = game(3, 1, 2, 3);
        assert!(g.place(P1, 0, 0));
        assert!(g.place(P1, 1, 0));
        assert!(g.place(P1, 2, 0));
        assert!(g.golden_move(P2, 1, 0));

        let left = g.grid().area(Coord::new(0, 0));
        let right = g.grid().area(Coord::new(2, 0));
        assert_ne!(left, right);
        assert_eq!(g.area_sizes(P1), vec![1, 1]);
        assert!(g.audit().is_ok());
    }

    #[test]
    fn test_adjacency_counter_tracks_borders() {
        let mut g = game(3, 3, 2, 1);
        assert!(g.place(P1, 1, 1));
        assert_eq!(g.player(P1).unwrap().free_adjacent_fields(), 4);

        // Claiming a bordering cell removes it and exposes nothing new.
        assert!(g.place(P2, 1, 2));
        assert_eq!(g.player(P1).unwrap().free_adjacent_fields(), 3);
        assert_eq!(g.player(P2).unwrap().free_adjacent_fields(), 2);

        // Cells bordering both players count for both.
        assert!(g.place(P1, 0, 1));
        assert_eq!(g.player(P1).unwrap().free_adjacent_fields(), 4);
        assert_eq!(g.player(P2).unwrap().free_adjacent_fields(), 2);
        assert!(g.audit().is_ok());
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut g = game(3, 1, 2, 1);
        assert!(g.place(P1, 0, 0));
        let before = g.board_text();

        assert!(!g.place(P1, 2, 0));
        assert!(!g.place(P2, 0, 0));
        assert!(!g.place(PlayerId::new(3), 1, 0));
        assert!(!g.place(P1, 3, 0));

        assert_eq!(g.board_text(), before);
        assert_eq!(g.history().len(), 1);
        assert!(g.audit().is_ok());
    }

    #[test]
    fn test_display_matches_board_text() {
        let mut g = game(2, 2, 2, 2);
        assert!(g.place(P2, 1, 1));
        assert_eq!(g.to_string(), ". 2\n. .\n");
    }
}
