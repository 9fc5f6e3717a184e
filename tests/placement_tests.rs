//! Placement enumeration against live execution

use proptest::prelude::*;

use rl_tetris::core::{Board, BoardFeatures, Game, GameConfig, Piece, SequenceSource};
use rl_tetris::engine::{
    action_count, apply_placement, decode_action, encode_action, PlacementEnumerator, PlaceError,
};
use rl_tetris::types::PieceKind;

fn rough_board() -> Board {
    let mut grid = vec![vec![0u8; 10]; 20];
    let heights = [3usize, 5, 2, 0, 4, 6, 1, 0, 2, 3];
    for (x, &h) in heights.iter().enumerate() {
        for y in (20 - h)..20 {
            grid[y][x] = 1;
        }
    }
    grid[18][4] = 0;
    Board::from_grid(&grid).unwrap()
}

#[test]
fn test_bijection_over_full_space() {
    for width in [4usize, 6, 10, 12] {
        for id in 0..action_count(width) {
            let (x, r) = decode_action(id);
            assert!(x < width && r < 4);
            assert_eq!(encode_action(x, r), id);
        }
    }
}

#[test]
fn test_enumeration_is_deterministic() {
    let board = rough_board();
    let piece = Piece::new(PieceKind::J, 4, 0);
    let a = PlacementEnumerator::enumerate_with_features(&board, &piece);
    let b = PlacementEnumerator::enumerate_with_features(&board, &piece);
    assert_eq!(a, b);
}

#[test]
fn test_enumeration_matches_live_placement() {
    for kind in PieceKind::ALL {
        let mut game = Game::new(GameConfig::default(), SequenceSource::repeat(kind)).unwrap();
        game.reset();
        game.set_board_state(&rough_board().state()).unwrap();

        let set = PlacementEnumerator::enumerate_with_features(game.board(), game.active().unwrap());
        for id in 0..set.len() {
            let mut live = game.clone();
            match apply_placement(&mut live, id) {
                Ok(result) => {
                    assert!(set.mask[id], "{:?} slot {} executed but masked", kind, id);
                    let expected = BoardFeatures::extract(live.board(), result.lines_cleared);
                    assert_eq!(set.features_of(id), Some(&expected), "{:?} slot {}", kind, id);
                }
                Err(err) => {
                    assert!(!set.mask[id], "{:?} slot {} legal but rejected", kind, id);
                    assert_eq!(err, PlaceError::IllegalPlacement);
                    assert_eq!(set.boards[id], game.board().state());
                }
            }
        }
    }
}

#[test]
fn test_features_use_hypothetical_board() {
    let board = rough_board();
    let live = BoardFeatures::extract(&board, 0);
    let set = PlacementEnumerator::enumerate_with_features(&board, &Piece::new(PieceKind::O, 4, 0));
    // columns 3 and 7 are both empty at the floor, so no O placement clears a row
    for &id in &set.legal {
        let f = set.features_of(id).unwrap();
        assert_eq!(f.lines_cleared, 0);
        assert!(f.total_height > live.total_height);
    }
}

proptest! {
    #[test]
    fn legal_slots_sit_on_support(seed_heights in prop::collection::vec(0usize..8, 10), kind_idx in 0u8..7) {
        let mut grid = vec![vec![0u8; 10]; 20];
        for (x, &h) in seed_heights.iter().enumerate() {
            for y in (20 - h)..20 {
                grid[y][x] = 1;
            }
        }
        let board = Board::from_grid(&grid).unwrap();
        let kind = PieceKind::from_index(kind_idx).unwrap();
        let set = PlacementEnumerator::enumerate(&board, &Piece::new(kind, 0, 0));

        prop_assert_eq!(set.len(), 40);
        for slot in &set.slots {
            prop_assert_eq!(set.mask[slot.action_id], slot.is_legal());
            if !slot.is_legal() {
                prop_assert_eq!(&set.boards[slot.action_id], &grid);
                continue;
            }
            let filled = set.boards[slot.action_id].iter().flatten().filter(|&&c| c != 0).count();
            prop_assert_eq!(filled, board.filled_count() + 4);
        }
    }
}
