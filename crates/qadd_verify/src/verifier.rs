//! Verification engine
//!
//! Builds the half-adder for each input pair, samples it, votes on the
//! outcome table, and compares the winner against the truth table.
//!
//! Shot-count errors abort the run before any sampling. Everything that
//! goes wrong for a single pair (sampler failure, timeout, malformed table,
//! rejected tie) is recorded on that pair's row and the run continues.

use crate::config::VerifyConfig;
use crate::report::{VerificationRecord, VerificationReport};
use qadd_backend::{Backend, SimulatorBackend, TimeoutBackend};
use qadd_core::{adder, half_adder, Counts, InputPair, QaddResult};
use std::sync::Arc;
use std::time::Instant;

/// Majority-vote verifier over all four input pairs
pub struct Verifier {
    backend: Arc<dyn Backend>,
    config: VerifyConfig,
}

impl Verifier {
    /// Create a verifier over `backend`
    ///
    /// When the config carries a timeout the backend is wrapped in a
    /// [`TimeoutBackend`]. An expired call is abandoned, not cancelled: its
    /// worker thread keeps sampling until the inner backend returns, so
    /// repeated timeouts against a slow backend accumulate background work.
    pub fn new(backend: Arc<dyn Backend>, config: VerifyConfig) -> Self {
        let backend: Arc<dyn Backend> = match config.timeout() {
            Some(timeout) => Arc::new(TimeoutBackend::new(backend, timeout)),
            None => backend,
        };
        Self { backend, config }
    }

    /// Verifier over the bundled ideal simulator, seeded from the config
    pub fn with_simulator(config: VerifyConfig) -> Self {
        let simulator = SimulatorBackend::ideal(adder::NUM_WIRES)
            .with_seed_opt(config.seed)
            .with_max_shots(config.max_shots);
        Self::new(Arc::new(simulator), config)
    }

    /// Configuration
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Backend in use (after any timeout wrapping)
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    // ========================================================================
    // Run
    // ========================================================================

    /// Verify all four input pairs
    ///
    /// Returns `Err` only for configuration errors detected before sampling.
    pub fn run(&self) -> QaddResult<VerificationReport> {
        self.config.validate()?;
        self.backend.validate_shots(self.config.shots)?;

        log::info!(
            "Verifying half-adder on {} ({} shots per pair)",
            self.backend.name(),
            self.config.shots
        );
        let start = Instant::now();

        let records = if self.config.parallel {
            self.evaluate_parallel()
        } else {
            self.evaluate_sequential()
        };

        let report = VerificationReport::new(
            self.config.shots,
            self.backend.name(),
            self.config.tie_policy,
            records,
        );

        log::info!(
            "Verification finished in {:.1}ms: {}/{} passed",
            start.elapsed().as_secs_f64() * 1000.0,
            report.passed_count(),
            report.records.len()
        );

        Ok(report)
    }

    /// Verify a single pair
    pub fn verify_pair(&self, pair: InputPair) -> VerificationRecord {
        let shots = self.config.shots;
        let circuit = half_adder(pair);

        let record = match self.backend.execute(&circuit, shots) {
            Ok(result) => match result.validate(shots, adder::NUM_CLBITS) {
                Ok(()) => {
                    VerificationRecord::from_counts(pair, result.counts, self.config.tie_policy)
                }
                Err(err) => VerificationRecord::failed(pair, &err, result.counts),
            },
            Err(err) => VerificationRecord::failed(pair, &err, Counts::new()),
        };

        if let Some(err) = &record.error {
            log::warn!("{}: {}", pair, err);
        } else if self.config.verbose {
            log::info!("{}", record);
        } else {
            log::debug!("{}", record);
        }

        record
    }

    fn evaluate_sequential(&self) -> Vec<VerificationRecord> {
        InputPair::ALL
            .iter()
            .map(|&pair| self.verify_pair(pair))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_parallel(&self) -> Vec<VerificationRecord> {
        use rayon::prelude::*;

        // One slot per pair, so the output order never depends on scheduling.
        let mut slots: Vec<Option<VerificationRecord>> = vec![None; InputPair::ALL.len()];
        slots
            .par_iter_mut()
            .zip(InputPair::ALL.to_vec())
            .for_each(|(slot, pair)| *slot = Some(self.verify_pair(pair)));

        slots.into_iter().flatten().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_parallel(&self) -> Vec<VerificationRecord> {
        log::warn!("Built without the `parallel` feature; verifying sequentially");
        self.evaluate_sequential()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TiePolicy;
    use qadd_backend::StaticBackend;
    use qadd_core::QaddError;

    #[test]
    fn test_simulator_all_pass() {
        let verifier = Verifier::with_simulator(VerifyConfig::reproducible(42));
        let report = verifier.run().unwrap();

        assert!(report.all_passed());
        assert_eq!(report.records.len(), 4);
        for (record, pair) in report.records.iter().zip(InputPair::ALL) {
            assert_eq!(record.pair(), pair);
            assert_eq!(record.observed_count, 4096);
        }
    }

    #[test]
    fn test_zero_shots_fails_fast() {
        let verifier = Verifier::with_simulator(VerifyConfig::default().with_shots(0));
        assert!(matches!(
            verifier.run(),
            Err(QaddError::InvalidShotCount { shots: 0, .. })
        ));
    }

    #[test]
    fn test_backend_cap_fails_fast() {
        let backend = SimulatorBackend::ideal(4).with_max_shots(10);
        let verifier = Verifier::new(Arc::new(backend), VerifyConfig::default().with_shots(11));
        assert!(matches!(
            verifier.run(),
            Err(QaddError::InvalidShotCount { shots: 11, max: 10 })
        ));
    }

    #[test]
    fn test_wrong_answer_backend() {
        let backend = StaticBackend::from_pairs([("11", 3), ("00", 1)]);
        let verifier = Verifier::new(Arc::new(backend), VerifyConfig::default().with_shots(4));

        let report = verifier.run().unwrap();
        assert!(!report.all_passed());
        assert_eq!(report.passed_count(), 0);
        assert!(report.records.iter().all(|r| r.error.is_none()));
    }

    #[test]
    fn test_failing_backend_records_every_row() {
        let backend = StaticBackend::failing("sampler offline");
        let verifier = Verifier::new(Arc::new(backend), VerifyConfig::default().with_shots(8));

        let report = verifier.run().unwrap();
        assert_eq!(report.records.len(), 4);
        for record in &report.records {
            assert!(!record.passed);
            assert!(record.error.as_deref().unwrap().contains("sampler offline"));
            assert!(record.counts.is_empty());
        }
    }

    #[test]
    fn test_tie_policy_applied() {
        let backend: Arc<dyn Backend> = Arc::new(StaticBackend::from_pairs([("00", 2), ("01", 2)]));

        let lenient = Verifier::new(Arc::clone(&backend), VerifyConfig::default().with_shots(4));
        let report = lenient.run().unwrap();
        // "00" wins the tie, so only the (0,0) row passes
        assert_eq!(report.passed_count(), 1);
        assert!(report.records[0].passed);

        let zero_zero = report.record(InputPair::new(0, 0).unwrap()).unwrap();
        assert_eq!(zero_zero.observed.as_deref(), Some("00"));
        let one_one = report.record(InputPair::new(1, 1).unwrap()).unwrap();
        assert!(!one_one.passed);
        assert_eq!(one_one.expected, "10");

        let strict = Verifier::new(
            backend,
            VerifyConfig::default()
                .with_shots(4)
                .with_tie_policy(TiePolicy::Reject),
        );
        let report = strict.run().unwrap();
        assert_eq!(report.passed_count(), 0);
        assert!(report.records.iter().all(|r| r.is_error()));
    }

    #[test]
    fn test_timeout_wrapping() {
        let config = VerifyConfig::reproducible(1).with_timeout(std::time::Duration::from_secs(30));
        let verifier = Verifier::with_simulator(config);

        assert!(verifier.backend().name().ends_with("+timeout"));
        assert!(verifier.run().unwrap().all_passed());
    }
}
