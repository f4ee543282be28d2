//! Client configuration: server endpoints, long-poll bound and canvas sizing.
//!
//! Defaults match the game server. A page can override any field by embedding
//! `<script id="client-config" type="application/json">{...}</script>`.

use crate::error::Result;
use crate::model::MoveRequest;
use crate::util::cwarn;
use serde::{Deserialize, Serialize};

pub const CONFIG_ELEMENT_ID: &str = "client-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub state_path: String,
    pub wait_path: String,
    pub move_path: String,
    /// Upper bound on a single state fetch.
    pub state_timeout_ms: u32,
    /// Upper bound on a single long-poll request.
    pub long_poll_timeout_ms: u32,
    /// Canvas edge as a fraction of the smaller viewport dimension.
    pub canvas_fraction: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            state_path: "/game_state".to_string(),
            wait_path: "/wait_for_update".to_string(),
            move_path: "/make_move".to_string(),
            state_timeout_ms: 10_000,
            long_poll_timeout_ms: 65_000,
            canvas_fraction: 0.6,
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Config embedded in the page, or the defaults when there is none.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                cwarn(&format!("ignoring embedded client config: {}", err));
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn state_url(&self, match_id: u64) -> String {
        format!("{}?id={}", self.state_path, match_id)
    }

    pub fn wait_url(&self, match_id: u64) -> String {
        format!("{}?id={}", self.wait_path, match_id)
    }

    pub fn move_url(&self, mv: &MoveRequest) -> String {
        format!("{}?id={}&x={}&y={}", self.move_path, mv.match_id, mv.x, mv.y)
    }
}
