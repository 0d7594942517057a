use crate::ScoredEntry;

/// Splits the prize pool over ranked entries and writes each share into the
/// entry's `gains`.
///
/// The percentage table covers the first ten ranks. With fewer entries than
/// ranks, the unreachable shares are folded back proportionally so the whole
/// pool is still paid out. Entries that tie on every ranking criterion pool
/// the shares of the ranks they straddle and split them evenly.
pub fn distribute(prize: f64, percentages: &[f64], ranked: &mut [ScoredEntry]) {
    let table_len = percentages.len();
    let mut shares = percentages.to_vec();
    let count = ranked.len();
    if count > 0 && count < table_len {
        let reachable: f64 = shares[..count].iter().sum();
        let total: f64 = percentages.iter().sum();
        if reachable > 0.0 {
            let missing = total - reachable;
            for share in shares[..count].iter_mut() {
                *share += *share / reachable * missing;
            }
        }
    }

    let mut index = 0;
    let mut rank = 1;
    while index < count && rank <= table_len {
        let mut end = index + 1;
        while end < count && tied(&ranked[index], &ranked[end]) {
            end += 1;
        }
        let group = end - index;
        let first = rank - 1;
        let last = (first + group).min(table_len);
        let pooled: f64 = shares[first..last].iter().sum();
        let gain = round_cents(prize * pooled / 100.0 / group as f64);
        for entry in ranked[index..end].iter_mut() {
            entry.score.gains = gain;
        }
        index = end;
        rank += group;
    }

    // A tie group can straddle the table's edge; everyone past it wins
    // nothing, even if the group briefly handed them a share.
    for entry in ranked.iter_mut().skip(table_len) {
        entry.score.gains = 0.0;
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn tied(a: &ScoredEntry, b: &ScoredEntry) -> bool {
    a.score.matched_numbers.len() == b.score.matched_numbers.len()
        && a.score.matched_stars.len() == b.score.matched_stars.len()
        && a.score.number_proximity == b.score.number_proximity
        && a.score.star_proximity == b.score.star_proximity
}
