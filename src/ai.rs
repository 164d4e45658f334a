// Hunt/target search for the computer opponent.
// Works over partial information only: what the enemy board has reported for
// our own shots, plus cells proven empty by the spacing rule.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use log::{debug, warn};
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::board::Board;
use crate::common::{AttackOutcome, BoardError, Coord, ShipId};

/// Orthogonal neighbours in the order they are queued: north, south, west, east.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Search phase of the AI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetMode {
    /// Random sampling over unattacked cells that are not known water.
    Hunt,
    /// Finishing off a ship: candidates come from `queue` (front first),
    /// `hits` are the unresolved hits on the ship under attack.
    Target {
        queue: VecDeque<Coord>,
        hits: Vec<Coord>,
    },
}

/// How the AI picked a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSource {
    /// Popped from the target queue.
    Queue,
    /// Random sample that passed every filter.
    Hunt,
    /// Retry ceiling hit; the last sample is used as is.
    Fallback,
}

/// Coarse result of one shot, kept in the AI's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotKind {
    Hit,
    Miss,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    pub coord: Coord,
    pub kind: ShotKind,
}

/// Everything one AI turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiMove {
    pub coord: Coord,
    pub source: TargetSource,
    pub outcome: Result<AttackOutcome, BoardError>,
}

/// Targeting memory of a computer player.
#[derive(Debug, Clone)]
pub struct AiState {
    mode: TargetMode,
    last_hit: Option<Coord>,
    last_attack: Option<Coord>,
    known_water: BitBoard,
    history: Vec<ShotRecord>,
}

impl AiState {
    /// Fresh state in hunt mode for an enemy board of `board_size`.
    pub fn new(board_size: usize) -> Self {
        AiState {
            mode: TargetMode::Hunt,
            last_hit: None,
            last_attack: None,
            known_water: BitBoard::new(board_size),
            history: Vec::new(),
        }
    }

    pub fn mode(&self) -> &TargetMode {
        &self.mode
    }

    pub fn is_hunting(&self) -> bool {
        matches!(self.mode, TargetMode::Hunt)
    }

    /// Pending candidates, front first. Empty while hunting.
    pub fn target_queue(&self) -> impl Iterator<Item = Coord> + '_ {
        let queue = match &self.mode {
            TargetMode::Target { queue, .. } => Some(queue.iter().copied()),
            TargetMode::Hunt => None,
        };
        queue.into_iter().flatten()
    }

    /// Unresolved hits on the ship currently being finished off.
    pub fn hit_cells(&self) -> &[Coord] {
        match &self.mode {
            TargetMode::Target { hits, .. } => hits,
            TargetMode::Hunt => &[],
        }
    }

    pub fn last_hit(&self) -> Option<Coord> {
        self.last_hit
    }

    pub fn last_attack(&self) -> Option<Coord> {
        self.last_attack
    }

    pub fn known_water(&self) -> &BitBoard {
        &self.known_water
    }

    pub fn history(&self) -> &[ShotRecord] {
        &self.history
    }

    /// Pick the next coordinate to fire at on `enemy`.
    ///
    /// Queue candidates are tried first; exhausting the queue drops back to
    /// hunt mode. Both phases share one budget of `max_attempts` draws, but
    /// each always gets at least one, so a budget of zero still fires at the
    /// front of the queue. When hunting runs out of budget the last sample is
    /// returned with [`TargetSource::Fallback`].
    pub fn choose_target<R: Rng + ?Sized>(
        &mut self,
        enemy: &Board,
        rng: &mut R,
        max_attempts: usize,
    ) -> (Coord, TargetSource) {
        let mut attempts = 0;

        if let TargetMode::Target { queue, .. } = &mut self.mode {
            // the first pop is free, like the first hunt draw
            let mut chosen = None;
            while let Some(c) = queue.pop_front() {
                attempts += 1;
                if enemy.is_valid_coordinate(c.row, c.col) && !enemy.is_attacked_before(c.row, c.col) {
                    chosen = Some(c);
                    break;
                }
                if attempts >= max_attempts {
                    break;
                }
            }
            match chosen {
                Some(c) => return (c, TargetSource::Queue),
                None => {
                    debug!("target queue exhausted, back to hunting");
                    self.mode = TargetMode::Hunt;
                }
            }
        }

        self.hunt(enemy, rng, attempts, max_attempts)
    }

    fn hunt<R: Rng + ?Sized>(
        &self,
        enemy: &Board,
        rng: &mut R,
        mut attempts: usize,
        max_attempts: usize,
    ) -> (Coord, TargetSource) {
        let size = enemy.size();
        if size == 0 {
            return (Coord::new(0, 0), TargetSource::Fallback);
        }
        loop {
            let c = Coord::new(rng.random_range(0..size), rng.random_range(0..size));
            attempts += 1;
            if !enemy.is_attacked_before(c.row, c.col) && !self.known_water.contains(c) {
                return (c, TargetSource::Hunt);
            }
            if attempts >= max_attempts {
                warn!("hunt gave up after {} draws, firing at {}", attempts, c);
                return (c, TargetSource::Fallback);
            }
        }
    }

    /// Update targeting after firing at `coord` on `enemy`.
    pub fn observe(&mut self, coord: Coord, result: &Result<AttackOutcome, BoardError>, enemy: &Board) {
        self.last_attack = Some(coord);
        let kind = match result {
            Ok(AttackOutcome::Miss) => ShotKind::Miss,
            Ok(_) => ShotKind::Hit,
            Err(_) => ShotKind::Invalid,
        };
        self.history.push(ShotRecord { coord, kind });

        match *result {
            Ok(AttackOutcome::Hit { .. }) => {
                self.last_hit = Some(coord);
                self.on_hit(coord, enemy);
            }
            Ok(AttackOutcome::Sunk { ship }) => {
                self.last_hit = Some(coord);
                self.on_sunk(ship, enemy);
            }
            Ok(AttackOutcome::Miss) | Err(_) => {}
        }
    }

    fn on_hit(&mut self, coord: Coord, enemy: &Board) {
        if self.is_hunting() {
            self.mode = TargetMode::Target {
                queue: VecDeque::new(),
                hits: Vec::new(),
            };
        }
        let TargetMode::Target { queue, hits } = &mut self.mode else {
            return;
        };
        hits.push(coord);
        if hits.len() == 1 {
            queue_orthogonal(queue, coord, enemy);
        } else {
            narrow_to_line(queue, hits, enemy);
        }
        debug!("target mode: {} hit(s), {} queued", hits.len(), queue.len());
    }

    fn on_sunk(&mut self, ship: ShipId, enemy: &Board) {
        let water = self.mark_surrounding_water(ship, enemy);
        let back_to_hunt = match &mut self.mode {
            TargetMode::Target { queue, hits } => {
                queue.retain(|c| !water.contains(*c));
                hits.clear();
                queue.is_empty()
            }
            TargetMode::Hunt => false,
        };
        if back_to_hunt {
            self.mode = TargetMode::Hunt;
        }
        debug!("sunk ship {}, {} cells of known water", ship, self.known_water.count_ones());
    }

    /// Every cell touching the sunk ship is empty by the spacing rule. The
    /// ship's own cells come along too; they are spent anyway.
    fn mark_surrounding_water(&mut self, ship: ShipId, enemy: &Board) -> BitBoard {
        let mut water = BitBoard::new(enemy.size());
        let Some(sunk) = enemy.ship(ship) else {
            return water;
        };
        if self.known_water.size() != enemy.size() {
            warn!(
                "known water sized {0}x{0}, enemy board is {1}x{1}; starting over",
                self.known_water.size(),
                enemy.size()
            );
            self.known_water = BitBoard::new(enemy.size());
        }
        // both sets now match the enemy board, which only yields on-board cells
        for cell in sunk.cells() {
            for n in enemy.surrounding_cells(cell) {
                water.insert(n).ok();
                self.known_water.insert(n).ok();
            }
        }
        water
    }
}

fn queue_orthogonal(queue: &mut VecDeque<Coord>, hit: Coord, enemy: &Board) {
    for (dr, dc) in ORTHOGONAL {
        let Some(n) = hit.offset(dr, dc) else { continue };
        if enemy.is_valid_coordinate(n.row, n.col) && !queue.contains(&n) {
            queue.push_back(n);
        }
    }
}

/// With two or more hits on one row (or column), only the cells just past
/// either end are worth trying. Hits on neither a shared row nor column leave
/// the queue as it was.
fn narrow_to_line(queue: &mut VecDeque<Coord>, hits: &[Coord], enemy: &Board) {
    let Some(first) = hits.first().copied() else {
        return;
    };
    let ends = if hits.iter().all(|h| h.row == first.row) {
        let min = hits.iter().map(|h| h.col).min().unwrap_or(first.col);
        let max = hits.iter().map(|h| h.col).max().unwrap_or(first.col);
        [min.checked_sub(1).map(|c| (first.row, c)), Some((first.row, max + 1))]
    } else if hits.iter().all(|h| h.col == first.col) {
        let min = hits.iter().map(|h| h.row).min().unwrap_or(first.row);
        let max = hits.iter().map(|h| h.row).max().unwrap_or(first.row);
        [min.checked_sub(1).map(|r| (r, first.col)), Some((max + 1, first.col))]
    } else {
        return;
    };
    queue.clear();
    for (r, c) in ends.into_iter().flatten() {
        if enemy.is_valid_coordinate(r, c) {
            queue.push_back(Coord::new(r, c));
        }
    }
}
