use crate::{
    distribute, score_entry, sort_for_ranking, Draw, EntryError, Event, EventBus, GameConfig,
    PlayerEntry, PlayerView, RngState, Roster, RosterError, ScoredEntry, StateSnapshot,
};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("{0}")]
    Entry(#[from] EntryError),
    #[error("{0}")]
    Roster(#[from] RosterError),
    #[error("Please enter a valid amount.")]
    InvalidPrize,
}

/// One round of the game: a roster filling up, a prize pool, and at most one
/// draw at a time. Frontends drive it and render snapshots.
#[derive(Debug)]
pub struct Round {
    pub config: GameConfig,
    pub rng: RngState,
    pub roster: Roster,
    pub prize: f64,
    pub draw: Option<Draw>,
}

impl Round {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let roster = Roster::new(config.roster_cap);
        let prize = config.default_prize;
        Self {
            config,
            rng: RngState::from_seed(seed),
            roster,
            prize,
            draw: None,
        }
    }

    pub fn from_entropy(config: GameConfig) -> Self {
        let seed = RngState::from_entropy().seed();
        Self::new(config, seed)
    }

    /// Validates a raw submission and seats the player.
    pub fn register_player(
        &mut self,
        name: &str,
        numbers_field: &str,
        stars_field: &str,
        events: &mut EventBus,
    ) -> Result<(), RoundError> {
        let entry = PlayerEntry::from_form(&self.config, name, numbers_field, stars_field)?;
        let name = entry.name.clone();
        self.roster.register(entry)?;
        events.push(Event::PlayerRegistered {
            name,
            remaining: self.roster.remaining_spots(),
        });
        Ok(())
    }

    /// Seats `count` random players. Their entries skip form validation
    /// since the sampler cannot produce an invalid pick.
    pub fn generate_players(
        &mut self,
        count: usize,
        events: &mut EventBus,
    ) -> Result<usize, RoundError> {
        let added = self
            .roster
            .generate(count, &self.config, &mut self.rng)?;
        events.push(Event::PlayersGenerated {
            count: added,
            remaining: self.roster.remaining_spots(),
        });
        Ok(added)
    }

    /// Empties the roster. The last draw stays on the board.
    pub fn clear_players(&mut self, events: &mut EventBus) -> usize {
        let removed = self.roster.clear();
        events.push(Event::PlayersCleared { count: removed });
        removed
    }

    /// Replaces the prize pool. Only plain digit strings are accepted, the
    /// same as the submission form produces.
    pub fn set_prize(&mut self, raw: &str, events: &mut EventBus) -> Result<f64, RoundError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(RoundError::InvalidPrize);
        }
        let amount = trimmed
            .parse::<u64>()
            .map_err(|_| RoundError::InvalidPrize)? as f64;
        self.prize = amount;
        events.push(Event::PrizeUpdated { amount });
        Ok(amount)
    }

    /// Draws the winning values, scores every entry, splits the prize pool
    /// over the ranking and records each player's result.
    pub fn run_draw(&mut self, events: &mut EventBus) -> Draw {
        let draw = Draw::random(&self.config, &mut self.rng);
        let mut scored: Vec<ScoredEntry> = self
            .roster
            .players()
            .iter()
            .enumerate()
            .map(|(player, seat)| ScoredEntry {
                player,
                score: score_entry(&self.config, &draw, &seat.numbers, &seat.stars),
            })
            .collect();
        sort_for_ranking(&mut scored);
        distribute(self.prize, &self.config.payout_percentages, &mut scored);
        let winners = scored
            .iter()
            .filter(|entry| entry.score.gains > 0.0)
            .count();
        for entry in scored {
            self.roster.set_score(entry.player, entry.score);
        }
        events.push(Event::DrawCompleted {
            numbers: draw.numbers.clone(),
            stars: draw.stars.clone(),
        });
        events.push(Event::GainsDistributed {
            winners,
            prize: self.prize,
        });
        self.draw = Some(draw.clone());
        draw
    }

    /// The podium: biggest gains first, nearest misses breaking the ties,
    /// cut to as many rows as the payout table has ranks.
    pub fn ranking(&self) -> Vec<PlayerView> {
        let mut rows: Vec<PlayerView> = self
            .roster
            .players()
            .iter()
            .map(PlayerView::from_player)
            .collect();
        rows.sort_by(|a, b| {
            b.gains
                .partial_cmp(&a.gains)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.number_proximity.cmp(&b.number_proximity))
                .then_with(|| a.star_proximity.cmp(&b.star_proximity))
        });
        rows.truncate(self.config.payout_percentages.len());
        rows
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            players: self
                .roster
                .players()
                .iter()
                .map(PlayerView::from_player)
                .collect(),
            remaining_spots: self.roster.remaining_spots(),
            prize: self.prize,
            draw: self.draw.clone(),
        }
    }
}
