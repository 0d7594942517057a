use serde::{Deserialize, Serialize};

/// Value range and selection cap for one grid of choice controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridRule {
    pub min: u8,
    pub max: u8,
    pub cap: usize,
}

impl GridRule {
    pub fn contains(&self, value: u8) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn span(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub numbers: GridRule,
    pub stars: GridRule,
    pub roster_cap: usize,
    pub default_prize: f64,
    pub payout_percentages: Vec<f64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            numbers: GridRule {
                min: 1,
                max: 49,
                cap: 5,
            },
            stars: GridRule {
                min: 1,
                max: 9,
                cap: 2,
            },
            roster_cap: 100,
            default_prize: 3_000_000.0,
            payout_percentages: vec![40.0, 20.0, 12.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
        }
    }
}
