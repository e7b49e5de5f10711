//! Weighted random selection.

use rand::Rng;

/// Allowed distance from 1.0 for a caller-supplied probability table.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 0.001;

/// Picks one item by weight.
///
/// Weights are normalized by their sum, so they need not add up to 1. When
/// every weight is zero (or the sum is not a positive finite number) the
/// choice is uniform. Negative and non-finite weights count as zero. Returns
/// `None` only for an empty table.
pub fn weighted_choice<'a, T, R>(rng: &mut R, weights: &'a [(T, f64)]) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    if weights.is_empty() {
        return None;
    }

    let weight = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().map(|(_, w)| weight(*w)).sum();
    if !(total.is_finite() && total > 0.0) {
        let index = rng.gen_range(0..weights.len());
        return Some(&weights[index].0);
    }

    let draw: f64 = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for (item, w) in weights {
        cumulative += weight(*w) / total;
        if draw < cumulative {
            return Some(item);
        }
    }

    // Rounding can leave the cumulative sum just under 1.0.
    weights
        .iter()
        .rev()
        .find(|(_, w)| weight(*w) > 0.0)
        .map(|(item, _)| item)
}

/// Equal weights over `items`.
pub fn uniform_weights<S: AsRef<str>>(items: &[S]) -> Vec<(String, f64)> {
    if items.is_empty() {
        return Vec::new();
    }
    let p = 1.0 / items.len() as f64;
    items.iter().map(|item| (item.as_ref().to_string(), p)).collect()
}

/// Checks a caller-supplied probability table.
///
/// A table is accepted when it is non-empty, every key is one of `allowed`,
/// every weight is finite and non-negative, and the weights sum to 1 within
/// [`PROBABILITY_SUM_TOLERANCE`].
pub fn validate_probabilities(table: &[(String, f64)], allowed: &[&str]) -> Result<(), String> {
    if table.is_empty() {
        return Err("probability table is empty".to_string());
    }
    for (key, weight) in table {
        if !allowed.contains(&key.as_str()) {
            return Err(format!("unknown category '{}'", key));
        }
        if !weight.is_finite() || *weight < 0.0 {
            return Err(format!("invalid weight {} for '{}'", weight, key));
        }
    }
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    if (total - 1.0).abs() >= PROBABILITY_SUM_TOLERANCE {
        return Err(format!("probabilities sum to {}, expected 1.0", total));
    }
    Ok(())
}
