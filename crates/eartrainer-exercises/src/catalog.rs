//! The built-in exercise catalog.
//!
//! Each family module exposes `all_exercises()`; [`all_exercises`] strings
//! them together in catalog order.

pub mod chord;
pub mod direction;
pub mod interval;
pub mod tonal;

use eartrainer_theory::note::NATURAL_PITCH_CLASSES;
use eartrainer_theory::PitchClass;
use rand::Rng;

use crate::choice::{uniform_weights, weighted_choice};
use crate::config::Overrides;
use crate::error::{ExerciseError, ServiceResult};
use crate::exercise::Exercise;

/// Returns every built-in exercise.
pub fn all_exercises() -> Vec<Box<dyn Exercise>> {
    let mut exercises = Vec::new();
    exercises.extend(interval::all_exercises());
    exercises.extend(chord::all_exercises());
    exercises.extend(direction::all_exercises());
    exercises.extend(tonal::all_exercises());
    exercises
}

/// Natural note names offered as roots (`C` through `B`).
pub(crate) fn natural_names() -> Vec<&'static str> {
    NATURAL_PITCH_CLASSES.iter().map(|pc| pc.name()).collect()
}

/// A uniformly chosen natural pitch class.
pub(crate) fn random_natural<R: Rng + ?Sized>(rng: &mut R) -> PitchClass {
    NATURAL_PITCH_CLASSES[rng.gen_range(0..NATURAL_PITCH_CLASSES.len())]
}

/// Parses a natural root name (`"c"`, `"D"`).
pub(crate) fn parse_natural(name: &str) -> Option<PitchClass> {
    PitchClass::parse(name).ok().filter(|pc| pc.is_natural())
}

/// Draws one of `keys` from the `option` probability table, uniform when unset.
pub(crate) fn draw_category<'a, R: Rng + ?Sized>(
    rng: &mut R,
    o: &Overrides<'_>,
    option: &str,
    keys: &[&'a str],
) -> ServiceResult<&'a str> {
    let table = o.probabilities(option, keys).unwrap_or_else(|| uniform_weights(keys));
    let chosen = weighted_choice(rng, &table).ok_or_else(|| ExerciseError::internal("empty choice table"))?;
    keys.iter()
        .copied()
        .find(|k| *k == chosen.as_str())
        .ok_or_else(|| ExerciseError::internal("unknown category in table"))
}
