use rulotto_core::{
    BetSlip, GameConfig, GridRule, RngState, Selection, SelectionStatus, ToggleOutcome,
};

fn numbers_rule() -> GridRule {
    GridRule {
        min: 1,
        max: 49,
        cap: 5,
    }
}

fn stars_rule() -> GridRule {
    GridRule {
        min: 1,
        max: 9,
        cap: 2,
    }
}

macro_rules! toggle_case {
    ($name:ident, $rule:expr, [$($value:expr),*], $expected:expr) => {
        #[test]
        fn $name() {
            let mut selection = Selection::new($rule);
            $(selection.toggle($value);)*
            assert_eq!(selection.values(), &$expected[..]);
        }
    };
}

toggle_case!(toggle_none, numbers_rule(), [], [0u8; 0]);
toggle_case!(toggle_single, numbers_rule(), [7], [7]);
toggle_case!(toggle_pair, numbers_rule(), [7, 31], [7, 31]);
toggle_case!(toggle_self_cancels, numbers_rule(), [7, 7], [0u8; 0]);
toggle_case!(toggle_cancel_middle, numbers_rule(), [7, 31, 2, 31], [7, 2]);
toggle_case!(
    toggle_fill_to_cap,
    numbers_rule(),
    [1, 2, 3, 4, 5],
    [1, 2, 3, 4, 5]
);
toggle_case!(
    toggle_sixth_bounces,
    numbers_rule(),
    [1, 2, 3, 4, 5, 6],
    [1, 2, 3, 4, 5]
);
toggle_case!(
    toggle_swap_after_cap,
    numbers_rule(),
    [1, 2, 3, 4, 5, 1, 6],
    [2, 3, 4, 5, 6]
);
toggle_case!(
    toggle_out_of_range_ignored,
    numbers_rule(),
    [0, 50, 12],
    [12]
);
toggle_case!(toggle_star_pair, stars_rule(), [9, 1], [9, 1]);
toggle_case!(toggle_star_third_bounces, stars_rule(), [9, 1, 5], [9, 1]);
toggle_case!(
    toggle_star_retoggle_under_cap,
    stars_rule(),
    [9, 1, 9, 5],
    [1, 5]
);

macro_rules! outcome_case {
    ($name:ident, $rule:expr, [$($setup:expr),*], $last:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let mut selection = Selection::new($rule);
            $(selection.toggle($setup);)*
            assert_eq!(selection.toggle($last), $expected);
        }
    };
}

outcome_case!(outcome_first_add, numbers_rule(), [], 10, ToggleOutcome::Added);
outcome_case!(
    outcome_remove,
    numbers_rule(),
    [10],
    10,
    ToggleOutcome::Removed
);
outcome_case!(
    outcome_full_rejects,
    numbers_rule(),
    [1, 2, 3, 4, 5],
    6,
    ToggleOutcome::RejectedFull
);
outcome_case!(
    outcome_full_still_removes,
    numbers_rule(),
    [1, 2, 3, 4, 5],
    3,
    ToggleOutcome::Removed
);
outcome_case!(
    outcome_below_min,
    numbers_rule(),
    [],
    0,
    ToggleOutcome::RejectedOutOfRange
);
outcome_case!(
    outcome_above_max,
    stars_rule(),
    [],
    10,
    ToggleOutcome::RejectedOutOfRange
);
outcome_case!(
    outcome_range_beats_full,
    stars_rule(),
    [1, 2],
    10,
    ToggleOutcome::RejectedOutOfRange
);

macro_rules! field_case {
    ($name:ident, $rule:expr, [$($value:expr),*], $expected:expr) => {
        #[test]
        fn $name() {
            let mut selection = Selection::new($rule);
            $(selection.toggle($value);)*
            assert_eq!(selection.field_value(), $expected);
        }
    };
}

field_case!(field_empty, numbers_rule(), [], "");
field_case!(field_single, numbers_rule(), [42], "42");
field_case!(field_keeps_pick_order, numbers_rule(), [42, 3, 17], "42,3,17");
field_case!(field_after_removal, numbers_rule(), [42, 3, 17, 3], "42,17");
field_case!(field_stars, stars_rule(), [9, 4], "9,4");

#[test]
fn status_flips_at_the_cap_boundary() {
    let mut selection = Selection::new(stars_rule());
    assert_eq!(selection.status(), SelectionStatus::Open);
    selection.toggle(1);
    assert_eq!(selection.status(), SelectionStatus::Open);
    selection.toggle(2);
    assert_eq!(selection.status(), SelectionStatus::Full);
    selection.toggle(1);
    assert_eq!(selection.status(), SelectionStatus::Open);
}

#[test]
fn full_grid_disables_exactly_the_unselected_values() {
    let mut selection = Selection::new(numbers_rule());
    for value in [3, 14, 25, 36, 47] {
        selection.toggle(value);
    }
    for value in 1..=49 {
        assert_eq!(
            selection.is_enabled(value),
            selection.contains(value),
            "value {value}"
        );
    }
}

#[test]
fn open_grid_enables_everything() {
    let mut selection = Selection::new(numbers_rule());
    selection.toggle(3);
    for value in 1..=49 {
        assert!(selection.is_enabled(value));
    }
}

#[test]
fn randomized_slip_submits_valid_fields() {
    let config = GameConfig::default();
    let mut rng = RngState::from_seed(21);
    for _ in 0..50 {
        let mut slip = BetSlip::new(&config);
        slip.randomize(&mut rng);
        assert!(slip.is_complete());
        let numbers: Vec<u8> = slip
            .numbers
            .field_value()
            .split(',')
            .map(|part| part.parse().unwrap())
            .collect();
        assert_eq!(numbers.len(), 5);
        assert_eq!(numbers, slip.numbers.values());
    }
}

#[test]
fn toggling_a_randomized_value_peels_it_off() {
    let mut rng = RngState::from_seed(33);
    let mut slip = BetSlip::new(&GameConfig::default());
    slip.randomize(&mut rng);
    let first = slip.numbers.values()[0];
    assert_eq!(slip.numbers.toggle(first), ToggleOutcome::Removed);
    assert_eq!(slip.numbers.len(), 4);
    assert!(!slip.is_complete());
}
