use serde::{Deserialize, Serialize};

use crate::Position;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Closed,
    Opened,
    Flagged,
}

/// What a cell holds underneath its reveal state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Empty,
    /// Between 1 and 8 adjacent mines.
    Number(u8),
    Mine,
    /// Only ever produced from a mine once the game is decided.
    Flower,
}

impl CellType {
    pub const fn from_nearby_mines(count: u8) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Number(count)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_number(self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub const fn is_flower(self) -> bool {
        matches!(self, Self::Flower)
    }

    pub const fn nearby_mine_count(self) -> u8 {
        match self {
            Self::Number(count) => count,
            Self::Empty | Self::Mine | Self::Flower => 0,
        }
    }
}

/// Content tag handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellView {
    Closed,
    Flagged,
    Flower,
    Mine,
    Number(u8),
    Empty,
}

/// A single grid square. Transitions never check preconditions, the collection and board do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    state: RevealState,
    cell_type: CellType,
    position: Position,
}

impl Cell {
    pub const fn new(state: RevealState, cell_type: CellType, position: Position) -> Self {
        Self {
            state,
            cell_type,
            position,
        }
    }

    pub const fn closed(cell_type: CellType, position: Position) -> Self {
        Self::new(RevealState::Closed, cell_type, position)
    }

    pub const fn state(self) -> RevealState {
        self.state
    }

    pub const fn cell_type(self) -> CellType {
        self.cell_type
    }

    pub const fn position(self) -> Position {
        self.position
    }

    pub const fn is_closed(self) -> bool {
        matches!(self.state, RevealState::Closed)
    }

    pub const fn is_opened(self) -> bool {
        matches!(self.state, RevealState::Opened)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, RevealState::Flagged)
    }

    pub const fn is_mine(self) -> bool {
        self.cell_type.is_mine()
    }

    pub const fn is_number(self) -> bool {
        self.cell_type.is_number()
    }

    pub const fn is_flower(self) -> bool {
        self.cell_type.is_flower()
    }

    pub const fn nearby_mine_count(self) -> u8 {
        self.cell_type.nearby_mine_count()
    }

    /// Empty or numbered, the cells that must all be opened to clear the board.
    pub const fn is_safe_cell(self) -> bool {
        matches!(self.cell_type, CellType::Empty | CellType::Number(_))
    }

    /// Whether flood reveal has to stop at this cell.
    pub const fn disallows_opening(self) -> bool {
        self.is_flagged() || self.is_opened() || self.is_flower() || self.is_mine()
    }

    pub const fn open(self) -> Self {
        Self::new(RevealState::Opened, self.cell_type, self.position)
    }

    pub const fn flag(self) -> Self {
        Self::new(RevealState::Flagged, self.cell_type, self.position)
    }

    pub const fn unflag(self) -> Self {
        Self::new(RevealState::Closed, self.cell_type, self.position)
    }

    pub const fn with_type(self, cell_type: CellType) -> Self {
        Self::new(self.state, cell_type, self.position)
    }

    /// Mine becomes flower keeping its reveal state, anything else is returned as is.
    pub const fn mark_as_flower(self) -> Self {
        if self.is_mine() {
            self.with_type(CellType::Flower)
        } else {
            self
        }
    }

    pub const fn view(self) -> CellView {
        use CellView::*;

        if self.is_flower() {
            return Flower;
        }

        match (self.state, self.cell_type) {
            (RevealState::Flagged, _) => Flagged,
            (RevealState::Closed, _) => Closed,
            (RevealState::Opened, CellType::Mine) => Mine,
            (RevealState::Opened, CellType::Number(count)) => Number(count),
            (RevealState::Opened, CellType::Empty | CellType::Flower) => Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: Position = Position::new(1, 2);

    #[test]
    fn defaults_are_closed_and_empty() {
        assert_eq!(RevealState::default(), RevealState::Closed);
        assert_eq!(CellType::default(), CellType::Empty);
    }

    #[test]
    fn flag_then_unflag_returns_to_closed() {
        let cell = Cell::closed(CellType::Number(2), AT);

        let flagged = cell.flag();
        assert!(flagged.is_flagged());
        assert!(!flagged.is_opened());

        let unflagged = flagged.unflag();
        assert!(unflagged.is_closed());
        assert_eq!(unflagged, cell);
    }

    #[test]
    fn open_keeps_content_and_position() {
        let cell = Cell::closed(CellType::Number(3), AT).open();

        assert!(cell.is_opened());
        assert_eq!(cell.nearby_mine_count(), 3);
        assert_eq!(cell.position(), AT);
    }

    #[test]
    fn only_mines_turn_into_flowers() {
        let mine = Cell::new(RevealState::Opened, CellType::Mine, AT);
        let number = Cell::closed(CellType::Number(1), AT);

        let flower = mine.mark_as_flower();
        assert!(flower.is_flower());
        assert!(!flower.is_mine());
        assert!(flower.is_opened());
        assert_eq!(number.mark_as_flower(), number);
    }

    #[test]
    fn flood_stoppers() {
        assert!(!Cell::closed(CellType::Empty, AT).disallows_opening());
        assert!(!Cell::closed(CellType::Number(1), AT).disallows_opening());
        assert!(Cell::closed(CellType::Mine, AT).disallows_opening());
        assert!(Cell::closed(CellType::Flower, AT).disallows_opening());
        assert!(Cell::closed(CellType::Empty, AT).flag().disallows_opening());
        assert!(Cell::closed(CellType::Empty, AT).open().disallows_opening());
    }

    #[test]
    fn safe_cells_exclude_mines_and_flowers() {
        assert!(Cell::closed(CellType::Empty, AT).is_safe_cell());
        assert!(Cell::closed(CellType::Number(8), AT).is_safe_cell());
        assert!(!Cell::closed(CellType::Mine, AT).is_safe_cell());
        assert!(!Cell::closed(CellType::Flower, AT).is_safe_cell());
    }

    #[test]
    fn view_precedence() {
        let mine = Cell::closed(CellType::Mine, AT);

        assert_eq!(mine.view(), CellView::Closed);
        assert_eq!(mine.flag().view(), CellView::Flagged);
        assert_eq!(mine.open().view(), CellView::Mine);
        assert_eq!(mine.flag().mark_as_flower().view(), CellView::Flower);
        assert_eq!(Cell::closed(CellType::Number(4), AT).open().view(), CellView::Number(4));
        assert_eq!(Cell::closed(CellType::Empty, AT).open().view(), CellView::Empty);
    }

    #[test]
    fn nearby_count_from_type() {
        assert_eq!(CellType::from_nearby_mines(0), CellType::Empty);
        assert_eq!(CellType::from_nearby_mines(5), CellType::Number(5));
        assert_eq!(CellType::Mine.nearby_mine_count(), 0);
    }
}
