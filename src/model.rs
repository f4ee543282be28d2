//! Wire and in-memory types for a single match as the server reports it.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring the server puts in every "someone won" status.
pub const WIN_MARKER: &str = "WIN";
/// Substring the server puts in the drawn-game status.
pub const TIE_MARKER: &str = "TIE";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameStatus {
    /// Match created, second player not joined yet.
    Waiting,
    Player1Turn,
    Player2Turn,
    Player1Win,
    Player2Win,
    Tie,
    /// Any status string this client does not know; kept verbatim.
    Other(String),
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Waiting => "WAITING",
            GameStatus::Player1Turn => "PLAYER_1_TURN",
            GameStatus::Player2Turn => "PLAYER_2_TURN",
            GameStatus::Player1Win => "PLAYER_1_WIN",
            GameStatus::Player2Win => "PLAYER_2_WIN",
            GameStatus::Tie => "TIE",
            GameStatus::Other(s) => s,
        }
    }

    pub fn is_win(&self) -> bool {
        self.as_str().contains(WIN_MARKER)
    }

    pub fn is_tie(&self) -> bool {
        self.as_str().contains(TIE_MARKER)
    }

    /// Terminal statuses are recognised by marker substring, so unknown
    /// variants such as `WIN_P1` still end polling.
    pub fn is_terminal(&self) -> bool {
        self.is_win() || self.is_tie()
    }

    /// The player (1 or 2) whose move the status is waiting on.
    pub fn turn_player(&self) -> Option<u8> {
        match self {
            GameStatus::Player1Turn => Some(1),
            GameStatus::Player2Turn => Some(2),
            _ => None,
        }
    }
}

impl From<String> for GameStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "WAITING" => GameStatus::Waiting,
            "PLAYER_1_TURN" => GameStatus::Player1Turn,
            "PLAYER_2_TURN" => GameStatus::Player2Turn,
            "PLAYER_1_WIN" => GameStatus::Player1Win,
            "PLAYER_2_WIN" => GameStatus::Player2Win,
            "TIE" => GameStatus::Tie,
            _ => GameStatus::Other(s),
        }
    }
}

impl From<&str> for GameStatus {
    fn from(s: &str) -> Self {
        GameStatus::from(s.to_string())
    }
}

impl From<GameStatus> for String {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    /// Player 1's mark, drawn as a diagonal cross.
    Cross,
    /// Player 2's mark, drawn as a circle.
    Circle,
}

impl Cell {
    pub fn from_char(c: char) -> Self {
        match c {
            'x' => Cell::Cross,
            'o' => Cell::Circle,
            _ => Cell::Empty,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '*',
            Cell::Cross => 'x',
            Cell::Circle => 'o',
        }
    }
}

/// Square N x N grid, indexed `rows[y][x]` with (0, 0) the top-left corner.
///
/// On the wire each row is a string of cell characters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Edge length N; 0 before the first successful sync.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Every non-empty cell as `(x, y, cell)`, row by row.
    pub fn marks(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| **c != Cell::Empty)
                .map(move |(x, c)| (x, y, *c))
        })
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = ClientError;

    fn try_from(raw: Vec<String>) -> Result<Self, Self::Error> {
        let n = raw.len();
        let mut rows = Vec::with_capacity(n);
        for (y, line) in raw.iter().enumerate() {
            let row: Vec<Cell> = line.chars().map(Cell::from_char).collect();
            if row.len() != n {
                return Err(ClientError::Decode(format!(
                    "board row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    n
                )));
            }
            rows.push(row);
        }
        Ok(Board { rows })
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board
            .rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}

/// Snapshot of a match from the viewing player's perspective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub state: GameStatus,
    /// Side assigned to this client (1 or 2); 0 until the server says otherwise.
    #[serde(default)]
    pub player_num: u8,
    #[serde(default)]
    pub board: Board,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            state: GameStatus::Waiting,
            player_num: 0,
            board: Board::default(),
        }
    }
}

impl MatchState {
    /// True when the status says it is this client's move.
    pub fn is_my_turn(&self) -> bool {
        self.state.turn_player() == Some(self.player_num)
    }
}

/// A move the client wants to play. Coordinates are not range-checked;
/// the server is the only authority on validity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub match_id: u64,
    pub x: i64,
    pub y: i64,
}
