use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named board configuration: dimensions plus mine count.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LevelConfig", into = "LevelConfig")]
pub struct Level {
    name: Cow<'static, str>,
    size: GridSize,
    mine_count: CellCount,
}

impl Level {
    pub const VERY_EASY: Level = Level::preset("VERY_EASY", 4, 4, 3);
    pub const EASY: Level = Level::preset("EASY", 9, 9, 10);
    pub const NORMAL: Level = Level::preset("NORMAL", 16, 16, 40);

    const fn preset(
        name: &'static str,
        rows: Coord,
        columns: Coord,
        mine_count: CellCount,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            size: GridSize::new(rows, columns),
            mine_count,
        }
    }

    /// Custom level, at least one cell has to stay free of mines.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        size: GridSize,
        mine_count: CellCount,
    ) -> Result<Self> {
        if size.rows == 0 || size.columns == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mine_count >= size.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(Self {
            name: name.into(),
            size,
            mine_count,
        })
    }

    /// Presets in display order.
    pub fn all() -> [Level; 3] {
        [Self::VERY_EASY, Self::EASY, Self::NORMAL]
    }

    pub fn by_name(name: &str) -> Option<Level> {
        Self::all()
            .into_iter()
            .find(|level| level.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn size(&self) -> GridSize {
        self.size
    }

    pub const fn row_size(&self) -> Coord {
        self.size.rows
    }

    pub const fn column_size(&self) -> Coord {
        self.size.columns
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn total_cells(&self) -> CellCount {
        self.size.total_cells()
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::EASY
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self> {
        Self::by_name(name).ok_or(GameError::UnknownLevel)
    }
}

#[derive(Serialize, Deserialize)]
struct LevelConfig {
    name: String,
    rows: Coord,
    columns: Coord,
    mines: CellCount,
}

impl TryFrom<LevelConfig> for Level {
    type Error = GameError;

    fn try_from(config: LevelConfig) -> Result<Self> {
        Level::new(config.name, GridSize::new(config.rows, config.columns), config.mines)
    }
}

impl From<Level> for LevelConfig {
    fn from(level: Level) -> Self {
        Self {
            name: level.name.into_owned(),
            rows: level.size.rows,
            columns: level.size.columns,
            mines: level.mine_count,
        }
    }
}
