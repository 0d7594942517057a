use crate::{Draw, GameConfig, Player};
use serde::{Deserialize, Serialize};

/// One roster line as shown in lobbies and rankings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerView {
    pub name: String,
    pub numbers: Vec<u8>,
    pub stars: Vec<u8>,
    pub matched_numbers: Vec<u8>,
    pub matched_stars: Vec<u8>,
    pub number_proximity: u32,
    pub star_proximity: u32,
    pub gains: f64,
}

impl PlayerView {
    pub fn from_player(player: &Player) -> Self {
        let mut view = Self {
            name: player.name.clone(),
            numbers: player.numbers.clone(),
            stars: player.stars.clone(),
            matched_numbers: Vec::new(),
            matched_stars: Vec::new(),
            number_proximity: 0,
            star_proximity: 0,
            gains: 0.0,
        };
        if let Some(score) = &player.score {
            view.matched_numbers = score.matched_numbers.clone();
            view.matched_stars = score.matched_stars.clone();
            view.number_proximity = score.number_proximity;
            view.star_proximity = score.star_proximity;
            view.gains = score.gains;
        }
        view
    }
}

/// Everything a frontend needs to redraw itself after an action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateSnapshot {
    pub players: Vec<PlayerView>,
    pub remaining_spots: usize,
    pub prize: f64,
    pub draw: Option<Draw>,
}

impl StateSnapshot {
    /// What a round looks like before anyone has joined. Frontends fall back
    /// to this when they have nothing fresher to show.
    pub fn empty(config: &GameConfig) -> Self {
        Self {
            players: Vec::new(),
            remaining_spots: config.roster_cap,
            prize: config.default_prize,
            draw: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DrawScore;

    #[test]
    fn unscored_player_renders_with_zeroes() {
        let player = Player {
            name: "Alice".to_string(),
            numbers: vec![1, 2, 3, 4, 5],
            stars: vec![6, 7],
            score: None,
        };
        let view = PlayerView::from_player(&player);
        assert_eq!(view.name, "Alice");
        assert!(view.matched_numbers.is_empty());
        assert_eq!(view.gains, 0.0);
    }

    #[test]
    fn scored_player_carries_the_score_over() {
        let player = Player {
            name: "Bob".to_string(),
            numbers: vec![1, 2, 3, 4, 5],
            stars: vec![6, 7],
            score: Some(DrawScore {
                matched_numbers: vec![2, 4],
                matched_stars: vec![7],
                number_proximity: 12,
                star_proximity: 3,
                sum_proximity: 40,
                gains: 150.5,
            }),
        };
        let view = PlayerView::from_player(&player);
        assert_eq!(view.matched_numbers, vec![2, 4]);
        assert_eq!(view.matched_stars, vec![7]);
        assert_eq!(view.number_proximity, 12);
        assert_eq!(view.gains, 150.5);
    }

    #[test]
    fn empty_snapshot_reflects_the_config() {
        let snapshot = StateSnapshot::empty(&GameConfig::default());
        assert!(snapshot.players.is_empty());
        assert_eq!(snapshot.remaining_spots, 100);
        assert_eq!(snapshot.prize, 3_000_000.0);
        assert!(snapshot.draw.is_none());
    }
}
