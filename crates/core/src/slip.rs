use crate::{GameConfig, RngState, Selection, SelectionStatus};

/// The pair of grids a player fills before submitting an entry.
#[derive(Debug, Clone)]
pub struct BetSlip {
    pub numbers: Selection,
    pub stars: Selection,
}

impl BetSlip {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            numbers: Selection::new(config.numbers),
            stars: Selection::new(config.stars),
        }
    }

    /// Both grids at their cap, ready to submit.
    pub fn is_complete(&self) -> bool {
        self.numbers.status() == SelectionStatus::Full
            && self.stars.status() == SelectionStatus::Full
    }

    /// Wipes both grids and refills them at random.
    pub fn randomize(&mut self, rng: &mut RngState) {
        self.numbers.randomize(rng);
        self.stars.randomize(rng);
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
        self.stars.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_slip_is_incomplete() {
        let slip = BetSlip::new(&GameConfig::default());
        assert!(!slip.is_complete());
        assert!(slip.numbers.is_empty());
        assert!(slip.stars.is_empty());
    }

    #[test]
    fn randomize_completes_both_grids() {
        let mut rng = RngState::from_seed(11);
        let mut slip = BetSlip::new(&GameConfig::default());
        slip.randomize(&mut rng);
        assert!(slip.is_complete());
        assert_eq!(slip.numbers.len(), 5);
        assert_eq!(slip.stars.len(), 2);
    }

    #[test]
    fn clear_reopens_both_grids() {
        let mut rng = RngState::from_seed(12);
        let mut slip = BetSlip::new(&GameConfig::default());
        slip.randomize(&mut rng);
        slip.clear();
        assert!(!slip.is_complete());
        assert_eq!(slip.numbers.field_value(), "");
        assert_eq!(slip.stars.field_value(), "");
    }
}
