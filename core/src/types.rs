use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine, flag, and cell counts.
pub type CellCount = u16;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Grid dimensions as `rows x columns`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: Coord,
    pub columns: Coord,
}

impl GridSize {
    pub const fn new(rows: Coord, columns: Coord) -> Self {
        Self { rows, columns }
    }

    pub const fn total_cells(self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn contains(self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    /// Every position of the grid in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> + Clone {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| Position::new(row, column))
        })
    }
}

impl ToNdIndex for GridSize {
    type Output = (usize, usize);

    fn to_nd_index(self) -> Self::Output {
        (self.rows.into(), self.columns.into())
    }
}

/// Board coordinates `(row, column)`, both zero based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Coord,
    pub column: Coord,
}

impl Position {
    pub const fn new(row: Coord, column: Coord) -> Self {
        Self { row, column }
    }

    /// Up to eight surrounding positions that fall inside `bounds`.
    pub fn adjacent_positions(self, bounds: GridSize) -> NeighborIter {
        NeighborIter::new(self, bounds)
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, column): (Coord, Coord)) -> Self {
        Self::new(row, column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.column.into()]
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `position`, returning a value only when it remains in bounds.
fn apply_delta(position: Position, delta: (isize, isize), bounds: GridSize) -> Option<Position> {
    let (d_row, d_column) = delta;

    let row = position.row.checked_add_signed(d_row.try_into().ok()?)?;
    if row >= bounds.rows {
        return None;
    }

    let column = position.column.checked_add_signed(d_column.try_into().ok()?)?;
    if column >= bounds.columns {
        return None;
    }

    Some(Position::new(row, column))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Position,
    bounds: GridSize,
    index: u8,
}

impl NeighborIter {
    fn new(center: Position, bounds: GridSize) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
