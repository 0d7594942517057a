use crate::{GridRule, RngState};

/// Whether a grid still accepts new picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    Open,
    Full,
}

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    RejectedFull,
    RejectedOutOfRange,
}

impl ToggleOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Picks for one grid, kept in the order the player made them.
#[derive(Debug, Clone)]
pub struct Selection {
    rule: GridRule,
    values: Vec<u8>,
}

impl Selection {
    pub fn new(rule: GridRule) -> Self {
        Self {
            rule,
            values: Vec::with_capacity(rule.cap),
        }
    }

    pub fn rule(&self) -> GridRule {
        self.rule
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: u8) -> bool {
        self.values.contains(&value)
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.rule.cap
    }

    pub fn status(&self) -> SelectionStatus {
        if self.is_full() {
            SelectionStatus::Full
        } else {
            SelectionStatus::Open
        }
    }

    /// A control stays usable while the grid is open; once full, only the
    /// selected ones may still be pressed to deselect.
    pub fn is_enabled(&self, value: u8) -> bool {
        !self.is_full() || self.contains(value)
    }

    /// Flips one value. Selected values always come out; new values only go
    /// in while the grid is below its cap.
    pub fn toggle(&mut self, value: u8) -> ToggleOutcome {
        if !self.rule.contains(value) {
            return ToggleOutcome::RejectedOutOfRange;
        }
        if let Some(pos) = self.values.iter().position(|&v| v == value) {
            self.values.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            return ToggleOutcome::RejectedFull;
        }
        self.values.push(value);
        ToggleOutcome::Added
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Replaces the picks with a full random selection.
    pub fn randomize(&mut self, rng: &mut RngState) {
        self.values = rng.sample_distinct(self.rule, self.rule.cap);
    }

    /// Comma-joined form field value, e.g. `"4,18,27"`.
    pub fn field_value(&self) -> String {
        let parts: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        parts.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers_grid() -> Selection {
        Selection::new(GridRule {
            min: 1,
            max: 49,
            cap: 5,
        })
    }

    fn stars_grid() -> Selection {
        Selection::new(GridRule {
            min: 1,
            max: 9,
            cap: 2,
        })
    }

    #[test]
    fn toggle_twice_restores_the_selection() {
        let mut selection = numbers_grid();
        assert_eq!(selection.toggle(12), ToggleOutcome::Added);
        assert_eq!(selection.toggle(12), ToggleOutcome::Removed);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_keeps_pick_order() {
        let mut selection = numbers_grid();
        for value in [30, 2, 17] {
            selection.toggle(value);
        }
        assert_eq!(selection.values(), &[30, 2, 17]);
        selection.toggle(2);
        assert_eq!(selection.values(), &[30, 17]);
    }

    #[test]
    fn cap_is_never_exceeded() {
        let mut selection = numbers_grid();
        for value in 1..=20 {
            selection.toggle(value);
            assert!(selection.len() <= 5);
        }
        assert_eq!(selection.values(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn add_at_cap_is_rejected_but_removal_still_works() {
        let mut selection = stars_grid();
        selection.toggle(3);
        selection.toggle(7);
        assert_eq!(selection.status(), SelectionStatus::Full);
        assert_eq!(selection.toggle(5), ToggleOutcome::RejectedFull);
        assert_eq!(selection.values(), &[3, 7]);
        assert_eq!(selection.toggle(3), ToggleOutcome::Removed);
        assert_eq!(selection.status(), SelectionStatus::Open);
        assert_eq!(selection.toggle(5), ToggleOutcome::Added);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut selection = stars_grid();
        assert_eq!(selection.toggle(0), ToggleOutcome::RejectedOutOfRange);
        assert_eq!(selection.toggle(10), ToggleOutcome::RejectedOutOfRange);
        assert!(!selection.toggle(0).accepted());
        assert!(selection.is_empty());
    }

    #[test]
    fn enablement_follows_fullness() {
        let mut selection = stars_grid();
        selection.toggle(1);
        selection.toggle(9);
        assert!(selection.is_enabled(1));
        assert!(selection.is_enabled(9));
        assert!(!selection.is_enabled(5));
        selection.toggle(9);
        assert!(selection.is_enabled(5));
    }

    #[test]
    fn randomize_fills_to_cap_with_distinct_values_in_range() {
        let mut rng = RngState::from_seed(42);
        for _ in 0..100 {
            let mut selection = numbers_grid();
            selection.randomize(&mut rng);
            assert_eq!(selection.len(), 5);
            assert!(selection.values().iter().all(|&v| (1..=49).contains(&v)));
            let mut sorted = selection.values().to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 5);
        }
    }

    #[test]
    fn randomize_discards_previous_picks() {
        let mut rng = RngState::from_seed(8);
        let mut selection = stars_grid();
        selection.toggle(4);
        selection.randomize(&mut rng);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.status(), SelectionStatus::Full);
    }

    #[test]
    fn field_value_joins_with_commas() {
        let mut selection = numbers_grid();
        assert_eq!(selection.field_value(), "");
        for value in [4, 18, 27] {
            selection.toggle(value);
        }
        assert_eq!(selection.field_value(), "4,18,27");
    }
}
