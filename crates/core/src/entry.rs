use crate::{GameConfig, GridRule};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("The name must contain letters only.")]
    InvalidName,
    #[error("Please enter valid numbers.")]
    UnparseableField,
    #[error("You must pick exactly {numbers} numbers and {stars} stars.")]
    WrongCount { numbers: usize, stars: usize },
    #[error("Numbers must be between {min} and {max}.")]
    NumberOutOfRange { min: u8, max: u8 },
    #[error("Stars must be between {min} and {max}.")]
    StarOutOfRange { min: u8, max: u8 },
    #[error("Numbers must be unique.")]
    DuplicateNumber,
    #[error("Stars must be unique.")]
    DuplicateStar,
}

/// A validated submission, ready to join the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntry {
    pub name: String,
    pub numbers: Vec<u8>,
    pub stars: Vec<u8>,
}

impl PlayerEntry {
    /// Checks a raw form submission. The checks run in a fixed order so the
    /// player always sees the first problem: name, parse, counts, ranges,
    /// duplicates.
    pub fn from_form(
        config: &GameConfig,
        name: &str,
        numbers_field: &str,
        stars_field: &str,
    ) -> Result<Self, EntryError> {
        if !valid_name(name) {
            return Err(EntryError::InvalidName);
        }
        let numbers = parse_field(numbers_field)?;
        let stars = parse_field(stars_field)?;
        if numbers.len() != config.numbers.cap || stars.len() != config.stars.cap {
            return Err(EntryError::WrongCount {
                numbers: config.numbers.cap,
                stars: config.stars.cap,
            });
        }
        if !in_range(&numbers, config.numbers) {
            return Err(EntryError::NumberOutOfRange {
                min: config.numbers.min,
                max: config.numbers.max,
            });
        }
        if !in_range(&stars, config.stars) {
            return Err(EntryError::StarOutOfRange {
                min: config.stars.min,
                max: config.stars.max,
            });
        }
        if !distinct(&numbers) {
            return Err(EntryError::DuplicateNumber);
        }
        if !distinct(&stars) {
            return Err(EntryError::DuplicateStar);
        }
        Ok(Self {
            name: name.to_string(),
            numbers: numbers.iter().map(|&v| v as u8).collect(),
            stars: stars.iter().map(|&v| v as u8).collect(),
        })
    }
}

fn valid_name(name: &str) -> bool {
    name.chars().any(|ch| ch.is_alphabetic())
        && name
            .chars()
            .all(|ch| ch.is_alphabetic() || ch.is_whitespace())
}

/// Splits a comma-joined field into values. Empty parts are skipped so a
/// trailing comma does not fail the submission.
fn parse_field(field: &str) -> Result<Vec<i64>, EntryError> {
    field
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>().map_err(|_| EntryError::UnparseableField))
        .collect()
}

fn in_range(values: &[i64], rule: GridRule) -> bool {
    values
        .iter()
        .all(|&v| v >= i64::from(rule.min) && v <= i64::from(rule.max))
}

fn distinct(values: &[i64]) -> bool {
    values
        .iter()
        .enumerate()
        .all(|(i, v)| !values[..i].contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn accepts_a_complete_entry() {
        let entry =
            PlayerEntry::from_form(&config(), "Alice", "1,2,3,4,5", "6,7").expect("valid entry");
        assert_eq!(entry.name, "Alice");
        assert_eq!(entry.numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(entry.stars, vec![6, 7]);
    }

    #[test]
    fn tolerates_spacing_and_trailing_commas() {
        let entry =
            PlayerEntry::from_form(&config(), "Bob Martin", " 1, 2 ,3,4,5,", "6,7,").expect("valid");
        assert_eq!(entry.numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn rejects_names_with_digits_or_symbols() {
        for name in ["Alice3", "Bob!", "", "   "] {
            let err = PlayerEntry::from_form(&config(), name, "1,2,3,4,5", "6,7").unwrap_err();
            assert_eq!(err, EntryError::InvalidName, "name: {name:?}");
        }
        assert!(PlayerEntry::from_form(&config(), "Jean Pierre", "1,2,3,4,5", "6,7").is_ok());
    }

    #[test]
    fn rejects_garbage_fields_before_counting() {
        let err = PlayerEntry::from_form(&config(), "Alice", "1,2,x,4,5", "6,7").unwrap_err();
        assert_eq!(err, EntryError::UnparseableField);
    }

    #[test]
    fn rejects_wrong_cardinality() {
        let err = PlayerEntry::from_form(&config(), "Alice", "1,2,3,4", "6,7").unwrap_err();
        assert_eq!(
            err,
            EntryError::WrongCount {
                numbers: 5,
                stars: 2
            }
        );
        let err = PlayerEntry::from_form(&config(), "Alice", "1,2,3,4,5", "6").unwrap_err();
        assert_eq!(
            err,
            EntryError::WrongCount {
                numbers: 5,
                stars: 2
            }
        );
    }

    #[test]
    fn rejects_values_outside_the_grids() {
        let err = PlayerEntry::from_form(&config(), "Alice", "0,2,3,4,5", "6,7").unwrap_err();
        assert_eq!(err, EntryError::NumberOutOfRange { min: 1, max: 49 });
        let err = PlayerEntry::from_form(&config(), "Alice", "1,2,3,4,300", "6,7").unwrap_err();
        assert_eq!(err, EntryError::NumberOutOfRange { min: 1, max: 49 });
        let err = PlayerEntry::from_form(&config(), "Alice", "1,2,3,4,5", "0,7").unwrap_err();
        assert_eq!(err, EntryError::StarOutOfRange { min: 1, max: 9 });
    }

    #[test]
    fn rejects_repeated_values() {
        let err = PlayerEntry::from_form(&config(), "Alice", "1,2,3,4,4", "6,7").unwrap_err();
        assert_eq!(err, EntryError::DuplicateNumber);
        let err = PlayerEntry::from_form(&config(), "Alice", "1,2,3,4,5", "7,7").unwrap_err();
        assert_eq!(err, EntryError::DuplicateStar);
    }
}
