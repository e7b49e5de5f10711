//! Empirical behavior of weighted category selection.

use eartrainer_exercises::{create_rng, validate_probabilities, weighted_choice, PROBABILITY_SUM_TOLERANCE};

const DRAWS: usize = 10_000;

fn frequency_of(table: &[(String, f64)], target: &str, seed: u64) -> f64 {
    let mut rng = create_rng(seed);
    let hits = (0..DRAWS)
        .filter(|_| weighted_choice(&mut rng, table).map(String::as_str) == Some(target))
        .count();
    hits as f64 / DRAWS as f64
}

fn table(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
    entries.iter().map(|(k, w)| (k.to_string(), *w)).collect()
}

#[test]
fn ninety_ten_split_is_respected() {
    let weights = table(&[("A", 0.9), ("B", 0.1)]);
    let freq = frequency_of(&weights, "A", 7);
    assert!((freq - 0.9).abs() < 0.02, "frequency of A was {}", freq);
}

#[test]
fn unnormalized_weights_are_renormalized() {
    let weights = table(&[("A", 9.0), ("B", 1.0)]);
    let freq = frequency_of(&weights, "A", 11);
    assert!((freq - 0.9).abs() < 0.02, "frequency of A was {}", freq);
}

#[test]
fn all_zero_weights_fall_back_to_uniform() {
    let weights = table(&[("A", 0.0), ("B", 0.0), ("C", 0.0), ("D", 0.0)]);
    for key in ["A", "B", "C", "D"] {
        let freq = frequency_of(&weights, key, 3);
        assert!((freq - 0.25).abs() < 0.03, "frequency of {} was {}", key, freq);
    }
}

#[test]
fn zero_weight_category_is_never_drawn() {
    let weights = table(&[("A", 1.0), ("B", 0.0)]);
    assert_eq!(frequency_of(&weights, "B", 5), 0.0);
}

#[test]
fn probability_tables_must_sum_to_one_within_tolerance() {
    let allowed = ["A", "B"];
    assert!(validate_probabilities(&table(&[("A", 0.9), ("B", 0.1)]), &allowed).is_ok());
    assert!(validate_probabilities(
        &table(&[("A", 0.9), ("B", 0.1 + PROBABILITY_SUM_TOLERANCE / 2.0)]),
        &allowed
    )
    .is_ok());
    assert!(validate_probabilities(&table(&[("A", 0.9), ("B", 0.2)]), &allowed).is_err());
    assert!(validate_probabilities(&table(&[("A", 0.9), ("C", 0.1)]), &allowed).is_err());
    assert!(validate_probabilities(&table(&[("A", 1.1), ("B", -0.1)]), &allowed).is_err());
}
