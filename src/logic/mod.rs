use crate::core::{Board, Move, PlayerId, Position, KNIGHT_OFFSETS};

/// All legal moves for `player`, in a stable enumeration order.
///
/// For a placed player: the up-to-8 knight destinations that are in bounds
/// and not blocked, in [`KNIGHT_OFFSETS`] order. For a player that has not
/// been placed yet: every blank cell, row-major (the opening placement).
/// Empty for the active player means that player has lost.
pub fn legal_moves(board: &Board, player: PlayerId) -> Vec<Move> {
    match board.location(player) {
        None => board.blank_cells().collect(),
        Some(from) => knight_destinations(board, from),
    }
}

/// Unblocked in-bounds knight destinations from `from`.
pub fn knight_destinations(board: &Board, from: Position) -> Vec<Position> {
    let mut moves = Vec::with_capacity(8);
    for &(dr, dc) in KNIGHT_OFFSETS.iter() {
        if let Some(to) = offset_pos(board, from, dr, dc) {
            if !board.is_blocked(to) {
                moves.push(to);
            }
        }
    }
    moves
}

/// Number of unblocked knight destinations from `cell`. Cheap proxy for
/// the mobility a player would have after moving there.
pub fn mobility(board: &Board, cell: Position) -> usize {
    KNIGHT_OFFSETS
        .iter()
        .filter(|&&(dr, dc)| {
            offset_pos(board, cell, dr, dc).is_some_and(|to| !board.is_blocked(to))
        })
        .count()
}

/// Cells reachable by `player` through repeated knight moves over blank
/// cells, grouped by distance: `levels[i]` holds the cells first reachable
/// in `i + 1` moves. Breadth-first, so each cell appears exactly once, at
/// its minimum distance.
pub fn reachable_by_depth(board: &Board, player: PlayerId) -> Vec<Vec<Position>> {
    let frontier = legal_moves(board, player);
    if frontier.is_empty() {
        return Vec::new();
    }

    let mut visited = vec![false; board.width * board.height];
    for &pos in &frontier {
        visited[pos.row * board.width + pos.col] = true;
    }

    let mut levels = vec![frontier];
    loop {
        let mut next = Vec::new();
        for &from in levels.last().unwrap() {
            for to in knight_destinations(board, from) {
                let idx = to.row * board.width + to.col;
                if !visited[idx] {
                    visited[idx] = true;
                    next.push(to);
                }
            }
        }
        if next.is_empty() {
            return levels;
        }
        levels.push(next);
    }
}

fn offset_pos(board: &Board, pos: Position, dr: i32, dc: i32) -> Option<Position> {
    let r = pos.row as i32 + dr;
    let c = pos.col as i32 + dc;
    if r >= 0 && c >= 0 && (r as usize) < board.height && (c as usize) < board.width {
        Some(Position::new(r as usize, c as usize))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_moves_stay_in_bounds_and_off_blocked_cells() {
        let mut board = Board::new(7, 7);
        let _ = board.apply(Position::new(0, 0)); // P1
        let _ = board.apply(Position::new(2, 1)); // P2, blocks one of P1's targets
        let moves = legal_moves(&board, PlayerId::Player1);
        assert_eq!(moves, vec![Position::new(1, 2)]);
        for mv in &moves {
            assert!(board.in_bounds(*mv));
            assert!(!board.is_blocked(*mv));
        }
    }

    #[test]
    fn unplaced_player_may_open_anywhere_blank() {
        let mut board = Board::new(3, 3);
        let _ = board.apply(Position::new(1, 1)); // P1 opening
        let moves = legal_moves(&board, PlayerId::Player2);
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Position::new(1, 1)));
    }

    #[test]
    fn centre_of_empty_board_has_full_mobility() {
        let board = Board::new(7, 7);
        assert_eq!(mobility(&board, Position::new(3, 3)), 8);
        assert_eq!(mobility(&board, Position::new(0, 0)), 2);
    }

    #[test]
    fn reachability_levels_partition_reached_cells() {
        let mut board = Board::new(5, 5);
        let _ = board.apply(Position::new(2, 2)); // P1 at centre
        let _ = board.apply(Position::new(0, 0)); // P2 in a corner
        let levels = reachable_by_depth(&board, PlayerId::Player1);

        // Every blank cell of a 5x5 board is knight-reachable from the centre.
        let total: usize = levels.iter().map(Vec::len).sum();
        assert_eq!(total, board.blank_count());

        // No cell appears at two distances.
        let mut seen = std::collections::HashSet::new();
        for cells in &levels {
            for &cell in cells {
                assert!(seen.insert(cell));
                assert!(!board.is_blocked(cell));
            }
        }

        // Level 1 is exactly the legal moves.
        assert_eq!(levels[0], legal_moves(&board, PlayerId::Player1));
    }

    #[test]
    fn trapped_player_reaches_nothing() {
        let mut board = Board::new(3, 3);
        let _ = board.apply(Position::new(1, 1)); // centre: no knight exits
        let _ = board.apply(Position::new(0, 0));
        assert!(reachable_by_depth(&board, PlayerId::Player1).is_empty());
    }
}
