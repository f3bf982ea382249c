//! Simulator backend for QADD
//!
//! Ideal (noise-free) state-vector simulator. The final state is computed
//! once per execution and every shot is an independent draw from its
//! measurement distribution.

use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
use qadd_core::{Bitstring, Circuit, Counts, Gate, QaddError, QaddResult};
use num_complex::Complex64 as Complex;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::time::Instant;

/// Widest circuit the simulator accepts by default
pub const DEFAULT_MAX_WIRES: usize = 16;

/// Ideal simulator backend
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Number of wires
    num_wires: usize,

    /// Random seed
    seed: Option<u64>,

    /// Maximum shots per execution
    max_shots: u64,
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create ideal simulator holding up to `num_wires` wires
    pub fn ideal(num_wires: usize) -> Self {
        Self {
            name: "qadd_simulator".to_string(),
            num_wires,
            seed: None,
            max_shots: qadd_core::shots::MAX_SHOTS,
        }
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set optional seed
    pub fn with_seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set maximum shots per execution
    pub fn with_max_shots(mut self, max_shots: u64) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Seed in use, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Evolve |0...0> through every gate of the circuit
    fn final_state(&self, circuit: &Circuit) -> Vec<Complex> {
        let n = circuit.num_wires();
        let mut state = vec![Complex::new(0.0, 0.0); 1 << n];
        state[0] = Complex::new(1.0, 0.0);

        for gate in circuit.gates() {
            self.apply_gate(&mut state, gate, n);
        }

        state
    }

    /// Sample `shots` readouts from the final state
    fn simulate(&self, circuit: &Circuit, shots: u64, rng: &mut StdRng) -> Counts {
        let state = self.final_state(circuit);
        let probs: Vec<f64> = state.iter().map(|c| c.norm_sqr()).collect();
        let map = circuit.measurement_map();

        let mut counts = Counts::new();
        for _ in 0..shots {
            let outcome = sample_index(&probs, rng);
            let bitstring = readout(outcome, &map, circuit.num_clbits());
            *counts.entry(bitstring).or_insert(0) += 1;
        }

        counts
    }

    /// Apply a gate to the state
    fn apply_gate(&self, state: &mut [Complex], gate: &Gate, n: usize) {
        match gate {
            Gate::X(w) => self.apply_x(state, *w, n),
            Gate::H(w) => self.apply_h(state, *w, n),
            Gate::Cnot(c, t) => self.apply_cnot(state, *c, *t, n),
            Gate::Ccx(c1, c2, t) => self.apply_ccx(state, *c1, *c2, *t, n),
            // Readout happens on the final state
            Gate::Measure { .. } | Gate::Barrier(_) => {}
        }
    }

    // ========================================================================
    // Single-Wire Gates
    // ========================================================================

    fn apply_h(&self, state: &mut [Complex], w: usize, n: usize) {
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        self.apply_single_wire_gate(state, w, n, |a, b| {
            let new_a = (a + b) * sqrt2_inv;
            let new_b = (a - b) * sqrt2_inv;
            (new_a, new_b)
        });
    }

    fn apply_x(&self, state: &mut [Complex], w: usize, n: usize) {
        self.apply_single_wire_gate(state, w, n, |a, b| (b, a));
    }

    fn apply_single_wire_gate<F>(&self, state: &mut [Complex], w: usize, n: usize, f: F)
    where
        F: Fn(Complex, Complex) -> (Complex, Complex),
    {
        let mask = 1 << w;
        for i in 0..(1 << n) {
            if i & mask == 0 {
                let j = i | mask;
                let (new_i, new_j) = f(state[i], state[j]);
                state[i] = new_i;
                state[j] = new_j;
            }
        }
    }

    // ========================================================================
    // Controlled Flips
    // ========================================================================

    fn apply_cnot(&self, state: &mut [Complex], control: usize, target: usize, n: usize) {
        self.apply_controlled_flip(state, 1 << control, target, n);
    }

    fn apply_ccx(&self, state: &mut [Complex], c1: usize, c2: usize, target: usize, n: usize) {
        self.apply_controlled_flip(state, (1 << c1) | (1 << c2), target, n);
    }

    /// Swap amplitudes across `target` wherever all control bits are set
    fn apply_controlled_flip(&self, state: &mut [Complex], controls: usize, target: usize, n: usize) {
        let target_mask = 1 << target;

        for i in 0..(1 << n) {
            if (i & controls) == controls && (i & target_mask) == 0 {
                let j = i | target_mask;
                state.swap(i, j);
            }
        }
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_wires(&self) -> usize {
        self.num_wires
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> QaddResult<ExecutionResult> {
        self.validate_shots(shots)?;

        if circuit.num_wires() > self.num_wires {
            return Err(QaddError::execution(format!(
                "circuit needs {} wires but '{}' holds only {}",
                circuit.num_wires(),
                self.name,
                self.num_wires
            )));
        }

        if !circuit.has_measurements() {
            return Err(QaddError::execution("circuit has no measurements"));
        }

        circuit
            .validate()
            .map_err(|err| QaddError::execution(format!("malformed circuit: {}", err)))?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let start = Instant::now();
        let counts = self.simulate(circuit, shots, &mut rng);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        log::debug!(
            "{}: {} gates x {} shots -> {} distinct outcomes in {}ms",
            self.name,
            circuit.gate_count(),
            shots,
            counts.len(),
            elapsed_ms
        );

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                execution_time_ms: Some(elapsed_ms),
                simulated: true,
                seed: self.seed,
                ..Default::default()
            },
        })
    }

    fn max_shots(&self) -> u64 {
        self.max_shots
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::ideal(DEFAULT_MAX_WIRES)
    }
}

// ============================================================================
// Sampling Helpers
// ============================================================================

/// Draw a basis-state index from a probability vector
fn sample_index(probs: &[f64], rng: &mut StdRng) -> usize {
    let r: f64 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &p) in probs.iter().enumerate() {
        cumsum += p;
        if r < cumsum {
            return i;
        }
    }

    // Rounding left r above the final cumulative sum; take the last
    // state that carries weight.
    probs.iter().rposition(|&p| p > 0.0).unwrap_or(0)
}

/// Map a basis-state index to the output bitstring
fn readout(outcome: usize, map: &[(usize, usize)], num_clbits: usize) -> String {
    let mut outputs = vec![false; num_clbits];
    for &(wire, clbit) in map {
        outputs[clbit] = (outcome >> wire) & 1 == 1;
    }
    Bitstring::from_positions(&outputs).to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qadd_core::{half_adder_circuit, hello_circuit, CircuitBuilder};

    #[test]
    fn test_simulator_half_adder_11() {
        let backend = SimulatorBackend::ideal(4).with_seed(42);
        let circuit = half_adder_circuit(1, 1).unwrap();

        let result = backend.execute(&circuit, 1000).unwrap();

        assert_eq!(result.counts.len(), 1);
        assert_eq!(result.counts.get("10"), Some(&1000));
    }

    #[test]
    fn test_counts_sum_to_shots() {
        let backend = SimulatorBackend::ideal(4);
        for shots in [1, 7, 4096] {
            let result = backend.execute(&hello_circuit(), shots).unwrap();
            assert_eq!(result.total_counts(), shots);
            assert!(result.validate(shots, 1).is_ok());
        }
    }

    #[test]
    fn test_hello_superposition() {
        let backend = SimulatorBackend::ideal(1).with_seed(42);

        let result = backend.execute(&hello_circuit(), 10_000).unwrap();

        assert_abs_diff_eq!(result.probability("0"), 0.5, epsilon = 0.05);
        assert_abs_diff_eq!(result.probability("1"), 0.5, epsilon = 0.05);
    }

    #[test]
    fn test_double_hadamard_is_identity() {
        let backend = SimulatorBackend::ideal(1).with_seed(7);
        let circuit = CircuitBuilder::new(1, 1).h(0).h(0).measure(0, 0).build();

        let result = backend.execute(&circuit, 500).unwrap();
        assert_eq!(result.counts.get("0"), Some(&500));
    }

    #[test]
    fn test_unmeasured_positions_read_zero() {
        let backend = SimulatorBackend::ideal(2);
        let circuit = CircuitBuilder::new(2, 3).x(1).measure(1, 2).build();

        let result = backend.execute(&circuit, 10).unwrap();
        assert_eq!(result.counts.get("100"), Some(&10));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::ideal(4);
        let circuit = half_adder_circuit(0, 0).unwrap();

        assert_eq!(
            backend.execute(&circuit, 0),
            Err(QaddError::InvalidShotCount {
                shots: 0,
                max: qadd_core::shots::MAX_SHOTS
            })
        );
    }

    #[test]
    fn test_shot_cap() {
        let backend = SimulatorBackend::ideal(4).with_max_shots(10);
        let circuit = half_adder_circuit(0, 0).unwrap();
        assert!(matches!(
            backend.execute(&circuit, 11),
            Err(QaddError::InvalidShotCount { shots: 11, max: 10 })
        ));
    }

    #[test]
    fn test_wire_limit() {
        let backend = SimulatorBackend::ideal(3);
        let circuit = half_adder_circuit(1, 0).unwrap();

        let err = backend.execute(&circuit, 100).unwrap_err();
        assert!(err.is_execution_error());
    }

    #[test]
    fn test_missing_measurements() {
        let backend = SimulatorBackend::ideal(2);
        let circuit = CircuitBuilder::new(2, 1).x(0).build();
        assert!(matches!(
            backend.execute(&circuit, 10),
            Err(QaddError::ExecutionFailure(_))
        ));
    }

    #[test]
    fn test_malformed_deserialized_circuit() {
        let backend = SimulatorBackend::ideal(4);

        let wide: Circuit = serde_json::from_str(
            r#"{"num_wires":2,"num_clbits":1,"gates":[{"X":5},{"Measure":{"wire":0,"clbit":0}}]}"#,
        )
        .unwrap();
        match backend.execute(&wide, 4) {
            Err(QaddError::ExecutionFailure(msg)) => assert!(msg.contains("malformed circuit")),
            other => panic!("expected ExecutionFailure, got {:?}", other),
        }

        let bad_clbit: Circuit = serde_json::from_str(
            r#"{"num_wires":1,"num_clbits":1,"gates":[{"Measure":{"wire":0,"clbit":2}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            backend.execute(&bad_clbit, 4),
            Err(QaddError::ExecutionFailure(_))
        ));
    }

    #[test]
    fn test_seed_reproducibility() {
        let backend1 = SimulatorBackend::ideal(1).with_seed(42);
        let backend2 = SimulatorBackend::ideal(1).with_seed(42);

        let result1 = backend1.execute(&hello_circuit(), 200).unwrap();
        let result2 = backend2.execute(&hello_circuit(), 200).unwrap();

        assert_eq!(result1.counts, result2.counts);
        assert_eq!(result1.metadata.seed, Some(42));
    }

    #[test]
    fn test_readout_ordering() {
        // wire 2 -> position 0, wire 3 -> position 1; basis index with
        // only wire 3 set reads as "10"
        let map = [(2, 0), (3, 1)];
        assert_eq!(readout(0b1000, &map, 2), "10");
        assert_eq!(readout(0b0100, &map, 2), "01");
        assert_eq!(readout(0b0011, &map, 2), "00");
    }
}
