//! Eartrainer End-to-End Test Infrastructure
//!
//! Integration tests for the generate/check pipeline live in `tests/`:
//!
//! - **Theory laws**: transposition identity, chord octave invariant and
//!   interval round-trips, as property tests
//! - **Weighted choice**: empirical distribution of category draws
//! - **Cache determinism**: identical requests share one file, differing
//!   requests never do
//! - **Timing models**: harmonic, melodic and staggered renders are
//!   measurably distinct
//! - **Exercise scenarios**: every catalog entry survives a context round
//!   trip through JSON
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p eartrainer-tests
//! ```

pub mod audio_analysis;
pub mod determinism;
pub mod fixtures;

pub use determinism::{compute_hash, verify_determinism, DeterminismResult};
pub use fixtures::TestMedia;
