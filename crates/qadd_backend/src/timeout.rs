//! Timeout decorator for any backend
//!
//! Runs the wrapped backend on a worker thread and gives up after a
//! caller-supplied duration, surfacing `ExecutionFailure`.

use crate::execution::{Backend, ExecutionResult};
use qadd_core::{Circuit, QaddError, QaddResult};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Backend wrapper enforcing a per-execution timeout
///
/// A timed-out worker is detached, not cancelled: it runs to completion in
/// the background and its result is dropped.
#[derive(Clone)]
pub struct TimeoutBackend {
    inner: Arc<dyn Backend>,
    timeout: Duration,
    name: String,
}

impl TimeoutBackend {
    /// Wrap a backend with a timeout
    pub fn new(inner: Arc<dyn Backend>, timeout: Duration) -> Self {
        let name = format!("{}+timeout", inner.name());
        Self {
            inner,
            timeout,
            name,
        }
    }

    /// Configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wrapped backend
    pub fn inner(&self) -> &Arc<dyn Backend> {
        &self.inner
    }
}

impl Backend for TimeoutBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_wires(&self) -> usize {
        self.inner.num_wires()
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> QaddResult<ExecutionResult> {
        self.validate_shots(shots)?;

        let inner = Arc::clone(&self.inner);
        let circuit = circuit.clone();
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("qadd-sampler".to_string())
            .spawn(move || {
                // The receiver is gone once the caller has timed out.
                let _ = tx.send(inner.execute(&circuit, shots));
            })
            .map_err(|e| QaddError::execution(format!("failed to spawn sampler: {}", e)))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "{}: no result after {}ms",
                    self.inner.name(),
                    self.timeout.as_millis()
                );
                Err(QaddError::execution(format!(
                    "sampler '{}' timed out after {}ms",
                    self.inner.name(),
                    self.timeout.as_millis()
                )))
            }
            Err(RecvTimeoutError::Disconnected) => Err(QaddError::execution(format!(
                "sampler '{}' stopped without a result",
                self.inner.name()
            ))),
        }
    }

    fn is_simulator(&self) -> bool {
        self.inner.is_simulator()
    }

    fn max_shots(&self) -> u64 {
        self.inner.max_shots()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::SimulatorBackend;
    use qadd_core::half_adder_circuit;

    struct SlowBackend {
        delay: Duration,
    }

    impl Backend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        fn num_wires(&self) -> usize {
            4
        }

        fn execute(&self, circuit: &Circuit, shots: u64) -> QaddResult<ExecutionResult> {
            thread::sleep(self.delay);
            SimulatorBackend::ideal(4).execute(circuit, shots)
        }
    }

    struct PanickingBackend;

    impl Backend for PanickingBackend {
        fn name(&self) -> &str {
            "panicking"
        }

        fn num_wires(&self) -> usize {
            4
        }

        fn execute(&self, _circuit: &Circuit, _shots: u64) -> QaddResult<ExecutionResult> {
            panic!("substrate crashed");
        }
    }

    #[test]
    fn test_completes_within_timeout() {
        let backend = TimeoutBackend::new(
            Arc::new(SimulatorBackend::ideal(4).with_seed(1)),
            Duration::from_secs(10),
        );
        let circuit = half_adder_circuit(0, 1).unwrap();

        let result = backend.execute(&circuit, 64).unwrap();
        assert_eq!(result.counts.get("01"), Some(&64));
        assert_eq!(backend.name(), "qadd_simulator+timeout");
    }

    #[test]
    fn test_timeout_expiry() {
        let backend = TimeoutBackend::new(
            Arc::new(SlowBackend {
                delay: Duration::from_millis(500),
            }),
            Duration::from_millis(20),
        );
        let circuit = half_adder_circuit(1, 1).unwrap();

        let err = backend.execute(&circuit, 8).unwrap_err();
        assert!(matches!(err, QaddError::ExecutionFailure(ref m) if m.contains("timed out")));
    }

    #[test]
    fn test_worker_panic_is_execution_failure() {
        let backend = TimeoutBackend::new(Arc::new(PanickingBackend), Duration::from_secs(5));
        let circuit = half_adder_circuit(1, 1).unwrap();

        assert!(matches!(
            backend.execute(&circuit, 8),
            Err(QaddError::ExecutionFailure(_))
        ));
    }

    #[test]
    fn test_invalid_shots_rejected_before_spawn() {
        let backend = TimeoutBackend::new(
            Arc::new(SlowBackend {
                delay: Duration::from_secs(5),
            }),
            Duration::from_millis(10),
        );
        let circuit = half_adder_circuit(1, 1).unwrap();

        assert!(matches!(
            backend.execute(&circuit, 0),
            Err(QaddError::InvalidShotCount { shots: 0, .. })
        ));
    }
}
