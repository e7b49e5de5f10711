//! Registry of exercise types, keyed by id.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog;
use crate::exercise::Exercise;
use crate::metadata::ExerciseMetadata;

/// Exercise types available to a service, in registration order.
///
/// Built once at startup and handed to whatever serves requests; tests
/// construct their own.
pub struct ExerciseRegistry {
    exercises: Vec<Box<dyn Exercise>>,
    index: HashMap<String, usize>,
}

impl ExerciseRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            exercises: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in catalog.
    pub fn with_default_catalog() -> Self {
        let mut registry = Self::new();
        for exercise in catalog::all_exercises() {
            if let Err(rejected) = registry.register(exercise) {
                debug!(id = rejected.id(), "duplicate exercise id in catalog");
            }
        }
        registry
    }

    /// Registers an exercise. A duplicate id hands the exercise back.
    pub fn register(&mut self, exercise: Box<dyn Exercise>) -> Result<(), Box<dyn Exercise>> {
        if self.index.contains_key(exercise.id()) {
            return Err(exercise);
        }
        self.index.insert(exercise.id().to_string(), self.exercises.len());
        self.exercises.push(exercise);
        Ok(())
    }

    /// Looks up an exercise by id.
    pub fn get(&self, id: &str) -> Option<&dyn Exercise> {
        self.index.get(id).map(|&i| self.exercises[i].as_ref())
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.exercises.iter().map(|e| e.id()).collect()
    }

    /// Metadata for every registered exercise.
    pub fn metadata(&self) -> Vec<&ExerciseMetadata> {
        self.exercises.iter().map(|e| e.metadata()).collect()
    }

    /// Returns the number of registered exercises.
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Returns true if no exercises are registered.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl Default for ExerciseRegistry {
    fn default() -> Self {
        Self::with_default_catalog()
    }
}

impl std::fmt::Debug for ExerciseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseRegistry").field("ids", &self.ids()).finish()
    }
}
