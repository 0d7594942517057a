use rulotto_core::{Event, StateSnapshot};
use serde::Deserialize;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:7878";

/// One lobby reply: the verdict on the action plus the fresh state to render.
#[derive(Debug, Clone, Deserialize)]
pub struct LobbyEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub state: StateSnapshot,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Blocking client for the lobby server. One request in flight at a time,
/// no retries; callers log a failed call and move on.
#[derive(Debug, Clone)]
pub struct LobbyClient {
    base: String,
}

impl LobbyClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn fetch_state(&self) -> Result<LobbyEnvelope, String> {
        self.get("/api/state")
    }

    pub fn submit_player(
        &self,
        name: &str,
        numbers: &str,
        stars: &str,
    ) -> Result<LobbyEnvelope, String> {
        self.post(
            "/api/players",
            serde_json::json!({
                "name": name,
                "chosen_numbers": numbers,
                "chosen_stars": stars,
            }),
        )
    }

    pub fn generate_players(&self, count: usize) -> Result<LobbyEnvelope, String> {
        self.post("/api/players/generate", serde_json::json!({ "count": count }))
    }

    pub fn delete_players(&self) -> Result<LobbyEnvelope, String> {
        self.post_empty("/api/players/delete")
    }

    pub fn run_draw(&self) -> Result<LobbyEnvelope, String> {
        self.post_empty("/api/draw")
    }

    pub fn set_prize(&self, amount: &str) -> Result<LobbyEnvelope, String> {
        self.post("/api/prize", serde_json::json!({ "amount": amount }))
    }

    fn get(&self, path: &str) -> Result<LobbyEnvelope, String> {
        ureq::get(&format!("{}{path}", self.base))
            .call()
            .map_err(|err| err.to_string())?
            .into_json()
            .map_err(|err| err.to_string())
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<LobbyEnvelope, String> {
        ureq::post(&format!("{}{path}", self.base))
            .send_json(body)
            .map_err(|err| err.to_string())?
            .into_json()
            .map_err(|err| err.to_string())
    }

    fn post_empty(&self, path: &str) -> Result<LobbyEnvelope, String> {
        ureq::post(&format!("{}{path}", self.base))
            .call()
            .map_err(|err| err.to_string())?
            .into_json()
            .map_err(|err| err.to_string())
    }
}
