//! Determinism verification for rendered output.

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First run whose output differed, if any.
    pub first_mismatch: Option<usize>,
}

/// BLAKE3 hex digest of `data`.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs `generate` `runs` times and compares every output with the first.
pub fn verify_determinism<F>(mut generate: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> Vec<u8>,
{
    let runs = runs.max(1);
    let first = generate();
    let hash = compute_hash(&first);

    let first_mismatch = (1..runs).find(|_| generate() != first);

    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        output_size: first.len(),
        hash,
        first_mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_output_is_deterministic() {
        let result = verify_determinism(|| vec![1, 2, 3], 3);
        assert!(result.is_deterministic);
        assert_eq!(result.runs, 3);
        assert_eq!(result.output_size, 3);
        assert_eq!(result.hash, compute_hash(&[1, 2, 3]));
    }

    #[test]
    fn test_changing_output_is_detected() {
        let mut counter = 0u8;
        let result = verify_determinism(
            || {
                counter += 1;
                vec![counter]
            },
            3,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.first_mismatch, Some(1));
    }
}
