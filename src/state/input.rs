use crate::model::{MatchState, MoveRequest};
use crate::render::tile_size;

/// Maps a click, in pixels relative to the canvas origin, to board indices.
///
/// Each axis is clamped to at most `n`, not `n - 1`: a click on the far
/// edge yields index `n`, which the server rejects.
pub fn map_click(px: f64, py: f64, edge: f64, n: usize) -> Option<(i64, i64)> {
    if n == 0 || edge <= 0.0 {
        return None;
    }
    let tile = tile_size(edge, n);
    let axis = |p: f64| ((p / tile).floor() as i64).min(n as i64);
    Some((axis(px), axis(py)))
}

/// The move a click should submit, if it is this client's turn.
pub fn click_action(
    state: &MatchState,
    match_id: u64,
    px: f64,
    py: f64,
    edge: f64,
) -> Option<MoveRequest> {
    if !state.is_my_turn() {
        return None;
    }
    let (x, y) = map_click(px, py, edge, state.board.size())?;
    Some(MoveRequest { match_id, x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Board, GameStatus};

    fn state(status: GameStatus, player_num: u8, n: usize) -> MatchState {
        MatchState {
            state: status,
            player_num,
            board: Board::try_from(vec!["*".repeat(n); n]).unwrap(),
        }
    }

    #[test]
    fn floors_to_tile_index() {
        assert_eq!(map_click(0.0, 0.0, 300.0, 3), Some((0, 0)));
        assert_eq!(map_click(99.9, 100.0, 300.0, 3), Some((0, 1)));
        assert_eq!(map_click(250.0, 299.0, 300.0, 3), Some((2, 2)));
    }

    #[test]
    fn far_edge_maps_to_n() {
        assert_eq!(map_click(300.0, 300.0, 300.0, 3), Some((3, 3)));
        assert_eq!(map_click(450.0, 10.0, 300.0, 3), Some((3, 0)));
    }

    #[test]
    fn no_board_no_mapping() {
        assert_eq!(map_click(10.0, 10.0, 300.0, 0), None);
        assert_eq!(map_click(10.0, 10.0, 0.0, 3), None);
    }

    #[test]
    fn ignores_click_on_opponents_turn() {
        let s = state(GameStatus::Player2Turn, 1, 3);
        assert_eq!(click_action(&s, 5, 0.0, 0.0, 300.0), None);
    }

    #[test]
    fn submits_click_on_own_turn() {
        let s = state(GameStatus::Player2Turn, 2, 3);
        assert_eq!(
            click_action(&s, 5, 0.0, 0.0, 300.0),
            Some(MoveRequest { match_id: 5, x: 0, y: 0 })
        );
        let s = state(GameStatus::Player1Turn, 1, 3);
        assert_eq!(
            click_action(&s, 5, 150.0, 299.0, 300.0),
            Some(MoveRequest { match_id: 5, x: 1, y: 2 })
        );
    }

    #[test]
    fn edge_click_is_sent_out_of_range() {
        let s = state(GameStatus::Player1Turn, 1, 3);
        assert_eq!(
            click_action(&s, 1, 300.0, 300.0, 300.0),
            Some(MoveRequest { match_id: 1, x: 3, y: 3 })
        );
    }

    #[test]
    fn ignores_clicks_outside_turn_phases() {
        for status in [GameStatus::Waiting, GameStatus::Player1Win, GameStatus::Tie] {
            let s = state(status, 1, 3);
            assert_eq!(click_action(&s, 1, 10.0, 10.0, 300.0), None);
        }
        let unassigned = state(GameStatus::Player1Turn, 0, 3);
        assert_eq!(click_action(&unassigned, 1, 10.0, 10.0, 300.0), None);
    }
}
