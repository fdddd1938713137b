use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;

use crate::*;

/// Rectangular grid of cells. Every transition returns a new collection.
#[derive(Clone, Debug, PartialEq)]
pub struct CellCollection {
    cells: Array2<Cell>,
}

impl CellCollection {
    /// All cells closed and empty, as before mines are placed.
    pub fn new(size: GridSize) -> Self {
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, column)| {
            Cell::closed(CellType::Empty, Position::new(row as Coord, column as Coord))
        });
        Self { cells }
    }

    /// Builds a collection from row-major rows. Each cell must sit at its own position.
    pub fn from_rows<R: AsRef<[Cell]>>(size: GridSize, rows: &[R]) -> Result<Self> {
        if rows.len() != usize::from(size.rows) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut flat = Vec::with_capacity(usize::from(size.total_cells()));
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != usize::from(size.columns) {
                return Err(GameError::InvalidBoardShape);
            }
            for (column, &cell) in cells.iter().enumerate() {
                if cell.position().to_nd_index() != [row, column] {
                    return Err(GameError::InvalidBoardShape);
                }
                flat.push(cell);
            }
        }

        let cells = Array2::from_shape_vec(size.to_nd_index(), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn size(&self) -> GridSize {
        let (rows, columns) = self.cells.dim();
        GridSize::new(rows as Coord, columns as Coord)
    }

    pub fn row_size(&self) -> Coord {
        self.size().rows
    }

    pub fn column_size(&self) -> Coord {
        self.size().columns
    }

    pub fn contains(&self, position: Position) -> bool {
        self.size().contains(position)
    }

    pub fn get(&self, position: Position) -> Option<Cell> {
        self.cells.get(position.to_nd_index()).copied()
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Cell>> {
        self.cells.rows().into_iter().map(|row| row.into_iter())
    }

    pub fn adjacent_positions(&self, position: Position) -> NeighborIter {
        position.adjacent_positions(self.size())
    }

    pub fn adjacent_mine_count(&self, position: Position) -> u8 {
        self.adjacent_positions(position)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    pub fn count(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|cell| predicate(cell)).count() as CellCount
    }

    pub fn opened_count(&self) -> CellCount {
        self.count(|cell| cell.is_opened())
    }

    pub fn flag_count(&self) -> CellCount {
        self.count(|cell| cell.is_flagged())
    }

    pub fn mine_count(&self) -> CellCount {
        self.count(|cell| cell.is_mine())
    }

    pub fn unopened_mine_count(&self) -> CellCount {
        self.count(|cell| cell.is_mine() && !cell.is_opened())
    }

    pub fn has_unopened_mines(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_mine() && !cell.is_opened())
    }

    pub fn is_opened_cell(&self, position: Position) -> bool {
        self.get(position).is_some_and(Cell::is_opened)
    }

    pub fn is_all_closed(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_closed())
    }

    pub fn all_safe_cells_opened(&self) -> bool {
        self.cells
            .iter()
            .filter(|cell| cell.is_safe_cell())
            .all(|cell| cell.is_opened())
    }

    pub fn any_opened_mine(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_mine() && cell.is_opened())
    }

    /// Applies `f` to every cell matching `predicate`.
    pub fn replace_matching(
        &self,
        predicate: impl Fn(&Cell) -> bool,
        f: impl Fn(Cell) -> Cell,
    ) -> Self {
        let cells = self
            .cells
            .map(|&cell| if predicate(&cell) { f(cell) } else { cell });
        Self { cells }
    }

    fn replace_at(&self, position: Position, f: impl FnOnce(Cell) -> Cell) -> Self {
        let mut cells = self.cells.clone();
        if let Some(cell) = cells.get_mut(position.to_nd_index()) {
            *cell = f(*cell);
        }
        Self { cells }
    }

    pub fn open(&self, position: Position) -> Self {
        self.replace_at(position, Cell::open)
    }

    pub fn open_all(&self, positions: impl IntoIterator<Item = Position>) -> Self {
        let mut cells = self.cells.clone();
        for position in positions {
            if let Some(cell) = cells.get_mut(position.to_nd_index()) {
                *cell = cell.open();
            }
        }
        Self { cells }
    }

    pub fn flag(&self, position: Position) -> Self {
        self.replace_at(position, Cell::flag)
    }

    pub fn unflag(&self, position: Position) -> Self {
        self.replace_at(position, Cell::unflag)
    }

    pub fn clear_flags(&self) -> Self {
        self.replace_matching(|cell| cell.is_flagged(), Cell::unflag)
    }

    pub fn open_all_mines(&self) -> Self {
        self.replace_matching(|cell| cell.is_mine() && !cell.is_opened(), Cell::open)
    }

    pub fn change_all_mines_to_flowers(&self) -> Self {
        self.replace_matching(|cell| cell.is_mine(), Cell::mark_as_flower)
    }

    /// Places mines at `mines` and numbers every other cell by its mine neighbors.
    /// Reveal states are kept.
    pub fn with_mines(&self, mines: &[Position]) -> Self {
        let size = self.size();
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &position in mines {
            if let Some(is_mine) = mine_mask.get_mut(position.to_nd_index()) {
                *is_mine = true;
            }
        }

        let cells = self.cells.map(|&cell| {
            let position = cell.position();
            if mine_mask[position.to_nd_index()] {
                cell.with_type(CellType::Mine)
            } else {
                let count = position
                    .adjacent_positions(size)
                    .filter(|pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
                cell.with_type(CellType::from_nearby_mines(count))
            }
        });
        Self { cells }
    }
}

impl Index<Position> for CellCollection {
    type Output = Cell;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[position.to_nd_index()]
    }
}

impl<'a> IntoIterator for &'a CellCollection {
    type Item = &'a Cell;
    type IntoIter = ndarray::iter::Iter<'a, Cell, ndarray::Ix2>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
