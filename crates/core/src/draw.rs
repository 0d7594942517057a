use crate::{GameConfig, RngState};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// One official draw: the winning numbers and stars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draw {
    pub numbers: Vec<u8>,
    pub stars: Vec<u8>,
}

impl Draw {
    pub fn random(config: &GameConfig, rng: &mut RngState) -> Self {
        Self {
            numbers: rng.sample_distinct(config.numbers, config.numbers.cap),
            stars: rng.sample_distinct(config.stars, config.stars.cap),
        }
    }
}

/// How close one entry came to the draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawScore {
    pub matched_numbers: Vec<u8>,
    pub matched_stars: Vec<u8>,
    pub number_proximity: u32,
    pub star_proximity: u32,
    #[serde(skip)]
    pub sum_proximity: u32,
    pub gains: f64,
}

/// A score still tied to its roster slot, so ranking can reorder freely.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub player: usize,
    pub score: DrawScore,
}

pub fn score_entry(config: &GameConfig, draw: &Draw, numbers: &[u8], stars: &[u8]) -> DrawScore {
    let matched_numbers = matched(numbers, &draw.numbers);
    let matched_stars = matched(stars, &draw.stars);
    let number_proximity = proximity(&draw.numbers, numbers, &matched_numbers, config.numbers.max);
    let star_proximity = proximity(&draw.stars, stars, &matched_stars, config.stars.max);
    let drawn_sum: u32 = draw.numbers.iter().map(|&v| u32::from(v)).sum();
    let chosen_sum: u32 = numbers.iter().map(|&v| u32::from(v)).sum();
    DrawScore {
        matched_numbers,
        matched_stars,
        number_proximity,
        star_proximity,
        sum_proximity: drawn_sum.abs_diff(chosen_sum),
        gains: 0.0,
    }
}

/// Orders scores best-first. When nobody matched anything the tie-break on
/// the sum of the numbers decides the whole ranking; otherwise match counts
/// rule and proximities split the rest. The sort is stable, so equal entries
/// keep roster order.
pub fn sort_for_ranking(scored: &mut [ScoredEntry]) {
    let any_matches = scored
        .iter()
        .any(|entry| !entry.score.matched_numbers.is_empty() || !entry.score.matched_stars.is_empty());
    if any_matches {
        scored.sort_by_key(|entry| {
            (
                Reverse(entry.score.matched_numbers.len()),
                Reverse(entry.score.matched_stars.len()),
                entry.score.number_proximity,
                entry.score.star_proximity,
            )
        });
    } else {
        scored.sort_by_key(|entry| entry.score.sum_proximity);
    }
}

fn matched(chosen: &[u8], drawn: &[u8]) -> Vec<u8> {
    chosen
        .iter()
        .copied()
        .filter(|value| drawn.contains(value))
        .collect()
}

/// Total distance between the missed winning values and the player's unused
/// picks. Each missed winning value takes the closest remaining pick (first
/// one on a tie) and consumes it; once the picks run out, every further miss
/// costs the full width of the grid.
fn proximity(drawn: &[u8], chosen: &[u8], matched: &[u8], range_max: u8) -> u32 {
    let mut pool: Vec<u8> = chosen
        .iter()
        .copied()
        .filter(|value| !matched.contains(value))
        .collect();
    let mut total = 0u32;
    for &win in drawn.iter().filter(|value| !matched.contains(value)) {
        if pool.is_empty() {
            total += u32::from(range_max);
            continue;
        }
        let mut best_index = 0;
        let mut best_distance = u32::MAX;
        for (index, &value) in pool.iter().enumerate() {
            let distance = u32::from(win.abs_diff(value));
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
        total += best_distance;
        pool.remove(best_index);
    }
    total
}
