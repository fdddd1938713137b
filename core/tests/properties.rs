//! Property tests over randomly played games.

use blossom_core::*;
use proptest::prelude::*;

fn level_strategy() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::all().to_vec())
}

fn clamp(level: &Level, row: u8, column: u8) -> Position {
    Position::new(row % level.row_size(), column % level.column_size())
}

/// Sequence of `(is_flag, row, column)` moves.
fn moves_strategy() -> impl Strategy<Value = Vec<(bool, u8, u8)>> {
    prop::collection::vec((any::<bool>(), any::<u8>(), any::<u8>()), 1..80)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The first open is never a mine and leaves exactly the level's mines on the board.
    #[test]
    fn prop_first_open_is_safe(
        level in level_strategy(),
        seed in any::<u64>(),
        row in any::<u8>(),
        column in any::<u8>(),
    ) {
        let target = clamp(&level, row, column);

        let board = Board::new(level.clone(), seed).open_cell(target);

        prop_assert!(board.exception().is_none());
        prop_assert!(board.is_opened_cell(target));
        prop_assert!(!board.cell_at(target).unwrap().is_mine());
        prop_assert_eq!(board.cells().mine_count(), level.mine_count());
        prop_assert!(!board.is_game_over());
    }

    /// Terminal flags always agree with the cells, flags never exceed mines,
    /// and rejected commands only attach an exception.
    #[test]
    fn prop_random_games_keep_invariants(
        level in level_strategy(),
        seed in any::<u64>(),
        moves in moves_strategy(),
    ) {
        let mut board = Board::new(level.clone(), seed);

        for (is_flag, row, column) in moves {
            let position = clamp(&level, row, column);
            let next = if is_flag {
                board.toggle_flag(position)
            } else {
                board.open_cell(position)
            };

            prop_assert!(next.flag_count() <= level.mine_count());
            prop_assert_eq!(next.is_game_clear(), next.cells().all_safe_cells_opened());
            prop_assert_eq!(next.is_game_over(), next.cells().any_opened_mine());
            if next.is_game_over() {
                prop_assert!(!next.has_unopened_mines());
            }

            if let Some(err) = next.exception() {
                prop_assert_eq!(next.cells(), board.cells());
                prop_assert_eq!(next.status(), board.status());
                prop_assert_eq!(next.sound_cue(), Some(SoundCue::Error));
                prop_assert!(!err.to_string().is_empty());
            } else {
                prop_assert!(!next.events().contains(Events::REJECTED));
            }

            board = next;
        }
    }

    /// Without flags, every opened empty cell has all of its neighbors opened too.
    #[test]
    fn prop_flood_closes_empty_regions(
        level in level_strategy(),
        seed in any::<u64>(),
        opens in prop::collection::vec((any::<u8>(), any::<u8>()), 1..20),
    ) {
        let mut board = Board::new(level.clone(), seed);
        for (row, column) in opens {
            board = board.open_cell(clamp(&level, row, column));
        }

        let cells = board.cells();
        for cell in cells.iter().filter(|cell| cell.is_opened() && !cell.is_mine()) {
            if cell.nearby_mine_count() == 0 {
                for neighbor in cells.adjacent_positions(cell.position()) {
                    prop_assert!(
                        cells[neighbor].is_opened(),
                        "{} next to {}",
                        neighbor,
                        cell.position()
                    );
                }
            }
        }
    }

    /// Number cells count exactly their mine neighbors once mines are placed.
    #[test]
    fn prop_numbers_match_adjacent_mines(
        level in level_strategy(),
        seed in any::<u64>(),
        row in any::<u8>(),
        column in any::<u8>(),
    ) {
        let board = Board::new(level.clone(), seed).open_cell(clamp(&level, row, column));
        let cells = board.cells();

        for cell in cells.iter().filter(|cell| !cell.is_mine()) {
            prop_assert_eq!(
                cell.nearby_mine_count(),
                cells.adjacent_mine_count(cell.position())
            );
        }
    }
}

#[test]
fn flowers_are_idempotent_after_loss() {
    let mines = [Position::new(0, 1), Position::new(0, 2), Position::new(3, 1)];
    let board = Board::new(Level::VERY_EASY, 11)
        .open_cell_with(Position::new(3, 3), &mut FixedSampler::new(mines))
        .open_cell(Position::new(0, 1));
    assert!(board.is_game_over());

    let flowers = board.change_all_mine_cells_to_flowers();
    assert_eq!(flowers.cells().mine_count(), 0);
    assert_eq!(flowers.change_all_mine_cells_to_flowers(), flowers);
    assert!(flowers.is_game_over());
    for mine in mines {
        assert_eq!(flowers.cell_at(mine).unwrap().view(), CellView::Flower);
    }
}
