use crate::{DrawScore, GameConfig, PlayerEntry, RngState};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("A player named '{0}' already exists.")]
    DuplicateName(String),
    #[error("The maximum of {0} participants has been reached.")]
    LobbyFull(usize),
    #[error("Cannot add {requested} players, only {remaining} spots are left.")]
    NotEnoughSpots { requested: usize, remaining: usize },
}

/// A registered participant. The score appears after the next draw runs.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub numbers: Vec<u8>,
    pub stars: Vec<u8>,
    pub score: Option<DrawScore>,
}

/// All participants of the current round, in registration order.
#[derive(Debug, Clone)]
pub struct Roster {
    cap: usize,
    players: Vec<Player>,
}

impl Roster {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            players: Vec::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.cap
    }

    pub fn remaining_spots(&self) -> usize {
        self.cap.saturating_sub(self.players.len())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.players.iter().any(|player| player.name == name)
    }

    /// Adds a validated entry. Name collisions are reported before the cap
    /// so a returning player hears the right complaint.
    pub fn register(&mut self, entry: PlayerEntry) -> Result<(), RosterError> {
        if self.contains_name(&entry.name) {
            return Err(RosterError::DuplicateName(entry.name));
        }
        if self.is_full() {
            return Err(RosterError::LobbyFull(self.cap));
        }
        self.players.push(Player {
            name: entry.name,
            numbers: entry.numbers,
            stars: entry.stars,
            score: None,
        });
        Ok(())
    }

    /// Fills `count` seats with random entries named after their position,
    /// `Player_1`, `Player_2`, and so on.
    pub fn generate(
        &mut self,
        count: usize,
        config: &GameConfig,
        rng: &mut RngState,
    ) -> Result<usize, RosterError> {
        let remaining = self.remaining_spots();
        if remaining == 0 {
            return Err(RosterError::LobbyFull(self.cap));
        }
        if count > remaining {
            return Err(RosterError::NotEnoughSpots {
                requested: count,
                remaining,
            });
        }
        let start = self.players.len();
        for offset in 1..=count {
            self.players.push(Player {
                name: format!("Player_{}", start + offset),
                numbers: rng.sample_distinct(config.numbers, config.numbers.cap),
                stars: rng.sample_distinct(config.stars, config.stars.cap),
                score: None,
            });
        }
        Ok(count)
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.players.len();
        self.players.clear();
        removed
    }

    pub fn set_score(&mut self, index: usize, score: DrawScore) {
        if let Some(player) = self.players.get_mut(index) {
            player.score = Some(score);
        }
    }
}
