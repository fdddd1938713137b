use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;

use crate::*;

/// Valid transitions:
/// - Ready -> Playing
/// - Ready -> GameOver
/// - Ready -> GameClear
/// - Playing -> GameOver
/// - Playing -> GameClear
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ready,
    Playing,
    GameOver,
    GameClear,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::GameClear)
    }

    fn of(cells: &CellCollection) -> Self {
        if cells.any_opened_mine() {
            Self::GameOver
        } else if cells.all_safe_cells_opened() {
            Self::GameClear
        } else if cells.opened_count() == 0 {
            Self::Ready
        } else {
            Self::Playing
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Ready
    }
}

/// Mines are placed once, on the first accepted open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MinePlacement {
    Unplaced,
    Placed,
}

type MoveResult<T> = core::result::Result<T, InvalidMove>;

/// Immutable game board. Commands return a new board carrying the events they caused.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    level: Level,
    cells: CellCollection,
    placement: MinePlacement,
    status: GameStatus,
    events: Events,
    exception: Option<InvalidMove>,
    seed: u64,
}

impl Board {
    /// Fresh board, every cell closed and no mines placed yet.
    pub fn new(level: Level, seed: u64) -> Self {
        Self {
            cells: CellCollection::new(level.size()),
            level,
            placement: MinePlacement::Unplaced,
            status: GameStatus::Ready,
            events: Events::empty(),
            exception: None,
            seed,
        }
    }

    /// Board over explicit row-major cells. Their content counts as already placed.
    pub fn from_cells<R: AsRef<[Cell]>>(level: Level, rows: &[R]) -> Result<Self> {
        let cells = CellCollection::from_rows(level.size(), rows)?;
        let status = GameStatus::of(&cells);
        Ok(Self {
            level,
            cells,
            placement: MinePlacement::Placed,
            status,
            events: Events::empty(),
            exception: None,
            seed: 0,
        })
    }

    /// New game on `level`, seeded from this board's seed.
    pub fn reset(&self, level: Level) -> Self {
        Self::new(level, SeededSampler::next_seed(self.seed))
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn cells(&self) -> &CellCollection {
        &self.cells
    }

    pub fn cell_at(&self, position: Position) -> Option<Cell> {
        self.cells.get(position)
    }

    pub fn row_size(&self) -> Coord {
        self.cells.row_size()
    }

    pub fn column_size(&self) -> Coord {
        self.cells.column_size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn placement(&self) -> MinePlacement {
        self.placement
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver)
    }

    pub fn is_game_clear(&self) -> bool {
        matches!(self.status, GameStatus::GameClear)
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_opened_cell(&self, position: Position) -> bool {
        self.cells.is_opened_cell(position)
    }

    pub fn has_unopened_mines(&self) -> bool {
        self.cells.has_unopened_mines()
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.flag_count()
    }

    /// How many flags are still available
    pub fn remaining_flag_count(&self) -> isize {
        (self.level.mine_count() as isize) - (self.cells.flag_count() as isize)
    }

    /// Events raised by the command that produced this board.
    pub fn events(&self) -> Events {
        self.events
    }

    pub fn exception(&self) -> Option<InvalidMove> {
        self.exception
    }

    pub fn sound_cue(&self) -> Option<SoundCue> {
        self.events.sound_cue()
    }

    pub fn open_cell(&self, position: Position) -> Self {
        self.open_cell_with(position, &mut SeededSampler::new(self.seed))
    }

    /// Opens a cell, drawing mines from `sampler` if this is the first open of the game.
    pub fn open_cell_with(&self, position: Position, sampler: &mut impl MineSampler) -> Self {
        match self.try_open_cell(position, sampler) {
            Ok(board) => board,
            Err(err) => self.rejected(err),
        }
    }

    pub fn toggle_flag(&self, position: Position) -> Self {
        match self.try_toggle_flag(position) {
            Ok(board) => board,
            Err(err) => self.rejected(err),
        }
    }

    /// Cosmetic end-of-game view, every mine turns into a flower. Not a command, raises no events.
    pub fn change_all_mine_cells_to_flowers(&self) -> Self {
        Self {
            cells: self.cells.change_all_mines_to_flowers(),
            events: Events::empty(),
            exception: None,
            ..self.clone()
        }
    }

    pub fn if_throw_game_exception(self, f: impl FnOnce(InvalidMove)) -> Self {
        if let Some(err) = self.exception {
            f(err);
        }
        self
    }

    pub fn if_first_opened_cell(self, f: impl FnOnce()) -> Self {
        self.if_event(Events::FIRST_OPEN, f)
    }

    pub fn if_game_over(self, f: impl FnOnce()) -> Self {
        self.if_event(Events::GAME_OVER, f)
    }

    pub fn if_game_clear(self, f: impl FnOnce()) -> Self {
        self.if_event(Events::GAME_CLEAR, f)
    }

    fn if_event(self, event: Events, f: impl FnOnce()) -> Self {
        if self.events.contains(event) {
            f();
        }
        self
    }

    fn try_open_cell(
        &self,
        position: Position,
        sampler: &mut impl MineSampler,
    ) -> MoveResult<Self> {
        self.check_not_finished()?;
        let cell = self.validate_position(position)?;

        if cell.is_opened() {
            return Err(InvalidMove::AlreadyOpened(position));
        }
        if cell.is_flagged() {
            return Err(InvalidMove::Flagged(position));
        }
        if cell.is_flower() {
            return Err(InvalidMove::Flower(position));
        }

        let first_open = self.cells.opened_count() == 0;
        let cells = match self.placement {
            MinePlacement::Unplaced => self.place_mines(position, sampler),
            MinePlacement::Placed => self.cells.clone(),
        };

        let cells = if cells[position].is_mine() {
            log::debug!("Opened mine at {}, revealing all mines", position);
            cells.open(position).open_all_mines()
        } else {
            let region = Self::flood_region(&cells, position);
            log::debug!("Open cell at {}, {} cells revealed", position, region.len());
            cells.open_all(region)
        };

        let status = GameStatus::of(&cells);
        let mut events = Events::OPENED;
        if first_open {
            events |= Events::FIRST_OPEN;
        }
        if status == GameStatus::GameOver && self.status != GameStatus::GameOver {
            events |= Events::GAME_OVER;
        }
        if status == GameStatus::GameClear && self.status != GameStatus::GameClear {
            events |= Events::GAME_CLEAR;
        }

        Ok(Self {
            level: self.level.clone(),
            cells,
            placement: MinePlacement::Placed,
            status,
            events,
            exception: None,
            seed: self.seed,
        })
    }

    fn try_toggle_flag(&self, position: Position) -> MoveResult<Self> {
        use RevealState::*;

        self.check_not_finished()?;
        let cell = self.validate_position(position)?;
        let limit = self.level.mine_count();

        let cells = match cell.state() {
            Opened => return Err(InvalidMove::FlagOnOpened(position)),
            Flagged => self.cells.unflag(position),
            Closed if self.cells.flag_count() >= limit => {
                return Err(InvalidMove::FlagLimitReached(limit));
            }
            Closed => self.cells.flag(position),
        };
        log::debug!("Toggled flag at {}", position);

        Ok(Self {
            cells,
            events: Events::FLAG_TOGGLED,
            exception: None,
            ..self.clone()
        })
    }

    fn rejected(&self, err: InvalidMove) -> Self {
        log::warn!("Rejected move: {}", err);
        Self {
            events: Events::REJECTED,
            exception: Some(err),
            ..self.clone()
        }
    }

    /// Draws mines anywhere but `start` and numbers the rest. Provisional flags are dropped.
    fn place_mines(&self, start: Position, sampler: &mut impl MineSampler) -> CellCollection {
        let candidates: Vec<Position> = self
            .cells
            .size()
            .positions()
            .filter(|&pos| pos != start)
            .collect();
        let wanted = usize::from(self.level.mine_count());

        let mut mines = sampler.sample(&candidates, wanted);
        mines.retain(|&pos| pos != start);
        if mines.len() != wanted {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}",
                mines.len(),
                wanted
            );
        }

        let flags = self.cells.flag_count();
        if flags > 0 {
            log::debug!("Clearing {} provisional flags", flags);
        }
        log::debug!("Placed {} mines, first open at {}", mines.len(), start);

        self.cells.clear_flags().with_mines(&mines)
    }

    /// Cells revealed by opening `start`: the start itself plus, from zero cells, every reachable
    /// cell up to and including the numbered border. Flagged cells and mines are never included.
    fn flood_region(cells: &CellCollection, start: Position) -> Vec<Position> {
        let mut region = Vec::from([start]);
        if cells[start].nearby_mine_count() != 0 {
            return region;
        }

        let mut visited = BTreeSet::from([start]);
        let mut to_visit: VecDeque<_> = cells.adjacent_positions(start).collect();
        log::trace!("Starting flood-fill from {}", start);

        while let Some(visit) = to_visit.pop_front() {
            if !visited.insert(visit) {
                continue;
            }

            let cell = cells[visit];
            if cell.disallows_opening() {
                log::trace!("Skipping cell at {}", visit);
                continue;
            }

            region.push(visit);
            log::trace!(
                "Flood opened cell at {}, mine count: {}",
                visit,
                cell.nearby_mine_count()
            );

            if cell.nearby_mine_count() == 0 {
                to_visit.extend(
                    cells
                        .adjacent_positions(visit)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        region
    }

    fn validate_position(&self, position: Position) -> MoveResult<Cell> {
        self.cells
            .get(position)
            .ok_or(InvalidMove::OutOfBounds(position))
    }

    fn check_not_finished(&self) -> MoveResult<()> {
        if self.status.is_finished() {
            Err(InvalidMove::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
