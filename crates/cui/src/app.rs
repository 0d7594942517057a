use crate::client::{LobbyClient, LobbyEnvelope};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rulotto_core::{
    BetSlip, Event, GameConfig, RngState, Selection, StateSnapshot, ToggleOutcome,
};
use rulotto_data::load_game_config_or_default;
use std::collections::VecDeque;
use std::path::Path;

const MAX_EVENT_LOG: usize = 200;
pub const NUMBER_GRID_WIDTH: usize = 7;
pub const STAR_GRID_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Numbers,
    Stars,
    Roster,
    Events,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Name,
    Generate,
    Prize,
}

pub struct App {
    pub client: LobbyClient,
    pub rng: RngState,
    pub config: GameConfig,
    pub slip: BetSlip,
    pub snapshot: StateSnapshot,
    pub focus: FocusPane,
    pub number_cursor: usize,
    pub star_cursor: usize,
    pub roster_cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub prompt_mode: Option<PromptMode>,
    pub prompt_input: String,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(server: String, seed: Option<u64>) -> Result<Self> {
        let config = load_game_config_or_default(Path::new("assets")).context("load config")?;
        let rng = match seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let slip = BetSlip::new(&config);
        let snapshot = StateSnapshot::empty(&config);
        let mut app = Self {
            client: LobbyClient::new(server),
            rng,
            config,
            slip,
            snapshot,
            focus: FocusPane::Numbers,
            number_cursor: 0,
            star_cursor: 0,
            roster_cursor: 0,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            prompt_mode: None,
            prompt_input: String::new(),
            should_quit: false,
        };
        app.push_event_line(format!("lobby server {}", app.client.base()));
        app.refresh_lobby();
        Ok(app)
    }

    pub fn on_tick(&mut self) {}

    pub fn focus_label(&self, pane: FocusPane) -> &'static str {
        match pane {
            FocusPane::Numbers => "Numbers",
            FocusPane::Stars => "Stars",
            FocusPane::Roster => "Roster",
            FocusPane::Events => "Events",
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (FocusPane::Numbers, true) => FocusPane::Stars,
            (FocusPane::Stars, true) => FocusPane::Roster,
            (FocusPane::Roster, true) => FocusPane::Events,
            (FocusPane::Events, true) => FocusPane::Numbers,
            (FocusPane::Numbers, false) => FocusPane::Events,
            (FocusPane::Stars, false) => FocusPane::Numbers,
            (FocusPane::Roster, false) => FocusPane::Stars,
            (FocusPane::Events, false) => FocusPane::Roster,
        };
    }

    pub fn next_hint(&self) -> String {
        if self.prompt_mode.is_some() {
            return "finish the prompt".to_string();
        }
        match self.focus {
            FocusPane::Numbers | FocusPane::Stars => {
                if self.slip.is_complete() {
                    "s submit".to_string()
                } else {
                    "space pick, r random fill".to_string()
                }
            }
            FocusPane::Roster => "enter refresh, g generate, x clear".to_string(),
            FocusPane::Events => "d draw, m prize".to_string(),
        }
    }

    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        match self.focus {
            FocusPane::Numbers => {
                let len = self.config.numbers.span() as usize;
                self.number_cursor = step_grid(self.number_cursor, len, NUMBER_GRID_WIDTH, dx, dy);
            }
            FocusPane::Stars => {
                let len = self.config.stars.span() as usize;
                self.star_cursor = step_grid(self.star_cursor, len, STAR_GRID_WIDTH, dx, dy);
            }
            FocusPane::Roster => {
                if dy != 0 {
                    let len = self.snapshot.players.len();
                    self.roster_cursor = step_grid(self.roster_cursor, len, 1, 0, dy);
                }
            }
            FocusPane::Events => {}
        }
    }

    fn focused_grid(&mut self) -> Option<(&mut Selection, usize)> {
        match self.focus {
            FocusPane::Numbers => Some((&mut self.slip.numbers, self.number_cursor)),
            FocusPane::Stars => Some((&mut self.slip.stars, self.star_cursor)),
            FocusPane::Roster | FocusPane::Events => None,
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        let Some((selection, cursor)) = self.focused_grid() else {
            return;
        };
        let value = selection.rule().min + cursor as u8;
        let outcome = selection.toggle(value);
        match outcome {
            ToggleOutcome::Added => self.push_status(format!("picked {value}")),
            ToggleOutcome::Removed => self.push_status(format!("dropped {value}")),
            ToggleOutcome::RejectedFull => {
                self.push_status(format!("limit reached, drop a pick before adding {value}"))
            }
            ToggleOutcome::RejectedOutOfRange => {}
        }
    }

    pub fn clear_slip(&mut self) {
        self.slip.clear();
        self.push_status("slip cleared");
    }

    pub fn randomize_slip(&mut self) {
        self.slip.randomize(&mut self.rng);
        self.push_status(format!(
            "random fill: {} + {}",
            self.slip.numbers.field_value(),
            self.slip.stars.field_value()
        ));
    }

    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.focus {
            FocusPane::Numbers | FocusPane::Stars => self.toggle_at_cursor(),
            FocusPane::Roster => self.refresh_lobby(),
            FocusPane::Events => {}
        }
    }

    pub fn open_name_prompt(&mut self) {
        self.prompt_mode = Some(PromptMode::Name);
        self.prompt_input.clear();
    }

    pub fn open_generate_prompt(&mut self) {
        self.prompt_mode = Some(PromptMode::Generate);
        self.prompt_input.clear();
    }

    pub fn open_prize_prompt(&mut self) {
        self.prompt_mode = Some(PromptMode::Prize);
        self.prompt_input.clear();
    }

    pub fn handle_prompt_key(&mut self, key: KeyEvent) -> bool {
        let Some(mode) = self.prompt_mode else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.prompt_mode = None;
                self.prompt_input.clear();
                self.push_status("prompt cancelled");
            }
            KeyCode::Enter => {
                let input = self.prompt_input.trim().to_string();
                self.prompt_mode = None;
                self.prompt_input.clear();
                match mode {
                    PromptMode::Name => self.submit_slip(&input),
                    PromptMode::Generate => self.generate_players(&input),
                    PromptMode::Prize => self.set_prize(&input),
                }
            }
            KeyCode::Backspace => {
                self.prompt_input.pop();
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    self.prompt_input.push(ch);
                }
            }
            _ => {}
        }
        true
    }

    pub fn submit_slip(&mut self, name: &str) {
        let result = self.client.submit_player(
            name,
            &self.slip.numbers.field_value(),
            &self.slip.stars.field_value(),
        );
        match result {
            Ok(envelope) => {
                if self.apply_envelope(envelope, format!("{name} joined the lobby")) {
                    // A successful submit is the page refresh: the slip resets.
                    self.slip.clear();
                }
            }
            Err(err) => self.push_event_line(format!("lobby request failed: {err}")),
        }
    }

    pub fn generate_players(&mut self, raw_count: &str) {
        let Ok(count) = raw_count.parse::<usize>() else {
            self.push_status("enter a plain number of players");
            return;
        };
        match self.client.generate_players(count) {
            Ok(envelope) => {
                self.apply_envelope(envelope, format!("{count} players generated"));
            }
            Err(err) => self.push_event_line(format!("lobby request failed: {err}")),
        }
    }

    pub fn delete_players(&mut self) {
        match self.client.delete_players() {
            Ok(envelope) => {
                if self.apply_envelope(envelope, "lobby cleared".to_string()) {
                    self.slip.clear();
                }
            }
            Err(err) => self.push_event_line(format!("lobby request failed: {err}")),
        }
    }

    pub fn run_draw(&mut self) {
        match self.client.run_draw() {
            Ok(envelope) => {
                self.apply_envelope(envelope, "draw complete".to_string());
            }
            Err(err) => self.push_event_line(format!("lobby request failed: {err}")),
        }
    }

    pub fn set_prize(&mut self, raw: &str) {
        match self.client.set_prize(raw) {
            Ok(envelope) => {
                self.apply_envelope(envelope, "prize updated".to_string());
            }
            Err(err) => self.push_event_line(format!("lobby request failed: {err}")),
        }
    }

    pub fn refresh_lobby(&mut self) {
        match self.client.fetch_state() {
            Ok(envelope) => {
                self.apply_envelope(envelope, "lobby refreshed".to_string());
            }
            Err(err) => self.push_event_line(format!("lobby request failed: {err}")),
        }
    }

    /// Applies one lobby reply: events go to the pane, a success swaps in the
    /// fresh snapshot, a rejection lands in the status line.
    fn apply_envelope(&mut self, envelope: LobbyEnvelope, success: String) -> bool {
        for event in &envelope.events {
            self.push_event_line(format_event(event));
        }
        if envelope.ok {
            self.snapshot = envelope.state;
            self.push_status(success);
            self.normalize_cursors();
            true
        } else {
            let message = envelope
                .error
                .unwrap_or_else(|| "request rejected".to_string());
            self.push_status(message);
            false
        }
    }

    pub fn normalize_cursors(&mut self) {
        clamp_index(&mut self.number_cursor, self.config.numbers.span() as usize);
        clamp_index(&mut self.star_cursor, self.config.stars.span() as usize);
        clamp_index(&mut self.roster_cursor, self.snapshot.players.len());
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn step_grid(cursor: usize, len: usize, width: usize, dx: isize, dy: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let step = dx + dy * width as isize;
    (cursor as isize + step).rem_euclid(len as isize) as usize
}

fn clamp_index(value: &mut usize, len: usize) {
    if len == 0 {
        *value = 0;
    } else if *value >= len {
        *value = len - 1;
    }
}

pub fn format_values(values: &[u8]) -> String {
    let parts: Vec<String> = values.iter().map(|value| value.to_string()).collect();
    parts.join(",")
}

fn format_event(event: &Event) -> String {
    match event {
        Event::PlayerRegistered { name, remaining } => {
            format!("{name} joined, {remaining} spots left")
        }
        Event::PlayersGenerated { count, remaining } => {
            format!("generated {count} players, {remaining} spots left")
        }
        Event::PlayersCleared { count } => format!("cleared {count} players"),
        Event::PrizeUpdated { amount } => format!("prize pool set to {amount}"),
        Event::DrawCompleted { numbers, stars } => format!(
            "draw: numbers {} stars {}",
            format_values(numbers),
            format_values(stars)
        ),
        Event::GainsDistributed { winners, prize } => {
            format!("{winners} winners split {prize}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_app() -> App {
        let config = GameConfig::default();
        let slip = BetSlip::new(&config);
        let snapshot = StateSnapshot::empty(&config);
        App {
            client: LobbyClient::new("http://127.0.0.1:9"),
            rng: RngState::from_seed(21),
            config,
            slip,
            snapshot,
            focus: FocusPane::Numbers,
            number_cursor: 0,
            star_cursor: 0,
            roster_cursor: 0,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            prompt_mode: None,
            prompt_input: String::new(),
            should_quit: false,
        }
    }

    #[test]
    fn toggle_flips_the_cell_under_the_cursor() {
        let mut app = offline_app();
        app.number_cursor = 6;
        app.toggle_at_cursor();
        assert_eq!(app.slip.numbers.values(), &[7]);
        assert_eq!(app.status_line, "picked 7");
        app.toggle_at_cursor();
        assert!(app.slip.numbers.is_empty());
        assert_eq!(app.status_line, "dropped 7");
    }

    #[test]
    fn grid_cursor_wraps_on_every_edge() {
        assert_eq!(step_grid(0, 49, 7, -1, 0), 48);
        assert_eq!(step_grid(48, 49, 7, 1, 0), 0);
        assert_eq!(step_grid(3, 49, 7, 0, -1), 45);
        assert_eq!(step_grid(45, 49, 7, 0, 1), 3);
        assert_eq!(step_grid(0, 0, 7, 1, 0), 0);
    }

    #[test]
    fn focus_cycle_visits_every_pane_and_returns() {
        let mut app = offline_app();
        let mut seen = vec![app.focus];
        for _ in 0..3 {
            app.cycle_focus(true);
            seen.push(app.focus);
        }
        assert_eq!(
            seen,
            vec![
                FocusPane::Numbers,
                FocusPane::Stars,
                FocusPane::Roster,
                FocusPane::Events
            ]
        );
        app.cycle_focus(true);
        assert_eq!(app.focus, FocusPane::Numbers);
        app.cycle_focus(false);
        assert_eq!(app.focus, FocusPane::Events);
    }

    #[test]
    fn random_fill_replaces_the_slip_and_reports_it() {
        let mut app = offline_app();
        app.slip.numbers.toggle(1);
        app.randomize_slip();
        assert!(app.slip.is_complete());
        assert!(app.status_line.starts_with("random fill: "));
    }

    #[test]
    fn prompt_collects_typed_characters_and_cancels() {
        let mut app = offline_app();
        app.open_prize_prompt();
        for ch in ['5', '0', '0'] {
            app.handle_prompt_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        app.handle_prompt_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.prompt_input, "50");
        assert!(app.handle_prompt_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(app.prompt_mode.is_none());
        assert!(app.prompt_input.is_empty());
        // With no prompt open, keys fall through to the normal bindings.
        assert!(!app.handle_prompt_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn garbage_generate_count_never_reaches_the_lobby() {
        let mut app = offline_app();
        app.open_generate_prompt();
        for ch in ['t', 'e', 'n'] {
            app.handle_prompt_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        app.handle_prompt_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.status_line, "enter a plain number of players");
        assert!(app.event_log.is_empty());
    }

    #[test]
    fn event_log_caps_at_two_hundred_lines() {
        let mut app = offline_app();
        for index in 0..250 {
            app.push_event_line(format!("line {index}"));
        }
        assert_eq!(app.event_log.len(), 200);
        assert_eq!(app.event_log.front().map(String::as_str), Some("line 50"));
    }

    #[test]
    fn lobby_events_render_as_short_lines() {
        let line = format_event(&Event::DrawCompleted {
            numbers: vec![1, 2, 3, 4, 5],
            stars: vec![6, 7],
        });
        assert_eq!(line, "draw: numbers 1,2,3,4,5 stars 6,7");
        let line = format_event(&Event::PlayerRegistered {
            name: "Alice".to_string(),
            remaining: 99,
        });
        assert_eq!(line, "Alice joined, 99 spots left");
    }
}
