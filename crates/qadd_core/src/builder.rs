//! Circuit builder for QADD
//!
//! Fluent builder for constructing circuits, including the half-adder
//! and the single-wire superposition demo.

use crate::circuit::Circuit;
use crate::constants::adder::{
    CLBIT_CARRY, CLBIT_SUM, NUM_CLBITS, NUM_WIRES, WIRE_A, WIRE_B, WIRE_CARRY, WIRE_SUM,
};
use crate::error::{QaddError, QaddResult};
use crate::gate::Gate;
use crate::types::{Bit, ClbitId, InputPair, WireId};

/// Fluent circuit builder (consuming self pattern)
///
/// Invalid gates are not added; the first rejection is kept and reported
/// by [`CircuitBuilder::build_validated`].
pub struct CircuitBuilder {
    circuit: Circuit,
    error: Option<QaddError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    pub fn new(num_wires: usize, num_clbits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_wires, num_clbits),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(num_wires: usize, num_clbits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_wires, num_clbits, name),
            error: None,
        }
    }

    fn push(mut self, gate: Gate) -> Self {
        if let Err(err) = self.circuit.add_gate(gate) {
            if self.error.is_none() {
                self.error = Some(err);
            }
        }
        self
    }

    // ========================================================================
    // Gates
    // ========================================================================

    /// Add unconditional flip
    pub fn x(self, wire: WireId) -> Self {
        self.push(Gate::X(wire))
    }

    /// Flip the wire only when `bit` is set
    ///
    /// Starting from zero this is the reversible form of assigning `bit`.
    pub fn x_if(self, wire: WireId, bit: Bit) -> Self {
        if bit.is_set() {
            self.x(wire)
        } else {
            self
        }
    }

    /// Add Hadamard gate
    pub fn h(self, wire: WireId) -> Self {
        self.push(Gate::H(wire))
    }

    /// Add controlled flip
    pub fn cnot(self, control: WireId, target: WireId) -> Self {
        self.push(Gate::Cnot(control, target))
    }

    /// Alias for cnot
    pub fn cx(self, control: WireId, target: WireId) -> Self {
        self.cnot(control, target)
    }

    /// Add doubly-controlled flip (Toffoli)
    pub fn ccx(self, c1: WireId, c2: WireId, target: WireId) -> Self {
        self.push(Gate::Ccx(c1, c2, target))
    }

    /// Add measurement of a wire into an output position
    pub fn measure(self, wire: WireId, clbit: ClbitId) -> Self {
        self.push(Gate::Measure { wire, clbit })
    }

    /// Add barrier across all wires
    pub fn barrier(self) -> Self {
        let wires: Vec<WireId> = (0..self.circuit.num_wires()).collect();
        self.push(Gate::Barrier(wires))
    }

    // ========================================================================
    // Half-Adder Stages
    // ========================================================================

    /// Load the input pair onto wires A and B
    pub fn load_inputs(self, pair: InputPair) -> Self {
        self.x_if(WIRE_A, pair.a).x_if(WIRE_B, pair.b)
    }

    /// SUM = A XOR B: two cascaded controlled flips on the SUM wire
    pub fn xor_into_sum(self) -> Self {
        self.cx(WIRE_A, WIRE_SUM).cx(WIRE_B, WIRE_SUM)
    }

    /// CARRY = A AND B: one doubly-controlled flip on the CARRY wire
    pub fn and_into_carry(self) -> Self {
        self.ccx(WIRE_A, WIRE_B, WIRE_CARRY)
    }

    /// Read SUM into position 0 and CARRY into position 1
    pub fn measure_outputs(self) -> Self {
        self.measure(WIRE_SUM, CLBIT_SUM)
            .measure(WIRE_CARRY, CLBIT_CARRY)
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build and return the circuit
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build, surfacing the first rejected gate or an empty circuit
    pub fn build_validated(self) -> QaddResult<Circuit> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.circuit.is_empty() {
            return Err(QaddError::EmptyCircuit);
        }
        Ok(self.circuit)
    }
}

// ============================================================================
// Named Circuits
// ============================================================================

/// Reversible half-adder for validated inputs
///
/// ```text
/// A     ──[X if A]──●─────────●──
/// B     ──[X if B]──┼────●────●──
/// SUM   ────────────⊕────⊕────┼── M -> c0
/// CARRY ──────────────────────⊕── M -> c1
/// ```
pub fn half_adder(pair: InputPair) -> Circuit {
    CircuitBuilder::with_name(
        NUM_WIRES,
        NUM_CLBITS,
        format!("half_adder_A{}_B{}", pair.a, pair.b),
    )
    .load_inputs(pair)
    .xor_into_sum()
    .and_into_carry()
    .measure_outputs()
    .build()
}

/// Half-adder from raw integer inputs
///
/// Fails with [`QaddError::InvalidInput`] unless both values are 0 or 1.
pub fn half_adder_circuit(a: i64, b: i64) -> QaddResult<Circuit> {
    Ok(half_adder(InputPair::new(a, b)?))
}

/// Single-wire superposition demo: H on |0> then measure
pub fn hello_circuit() -> Circuit {
    CircuitBuilder::with_name(1, 1, "hello").h(0).measure(0, 0).build()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(3, 1)
            .x(0)
            .cnot(0, 1)
            .ccx(0, 1, 2)
            .measure(2, 0)
            .build();

        assert_eq!(circuit.num_wires(), 3);
        assert_eq!(circuit.gate_count(), 4);
    }

    #[test]
    fn test_build_validated_reports_first_error() {
        let result = CircuitBuilder::new(2, 1).x(0).cx(0, 4).measure(0, 3).build_validated();
        assert_eq!(
            result,
            Err(QaddError::GateWireMismatch {
                wire: 4,
                num_wires: 2
            })
        );
    }

    #[test]
    fn test_barrier_spans_all_wires() {
        let circuit = CircuitBuilder::new(3, 1).x(0).barrier().x(1).build();

        assert_eq!(circuit.gates()[1], Gate::Barrier(vec![0, 1, 2]));
        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.depth(), 1);
    }

    #[test]
    fn test_build_validated_empty() {
        assert_eq!(
            CircuitBuilder::new(2, 1).build_validated(),
            Err(QaddError::EmptyCircuit)
        );
    }

    #[test]
    fn test_x_if() {
        let skipped = CircuitBuilder::new(1, 0).x_if(0, Bit::ZERO).build();
        let applied = CircuitBuilder::new(1, 0).x_if(0, Bit::ONE).build();
        assert!(skipped.is_empty());
        assert_eq!(applied.gates(), &[Gate::X(0)]);
    }

    #[test]
    fn test_half_adder_structure_11() {
        let circuit = half_adder_circuit(1, 1).unwrap();

        assert_eq!(
            circuit.gates(),
            &[
                Gate::X(WIRE_A),
                Gate::X(WIRE_B),
                Gate::Cnot(WIRE_A, WIRE_SUM),
                Gate::Cnot(WIRE_B, WIRE_SUM),
                Gate::Ccx(WIRE_A, WIRE_B, WIRE_CARRY),
                Gate::Measure {
                    wire: WIRE_SUM,
                    clbit: CLBIT_SUM
                },
                Gate::Measure {
                    wire: WIRE_CARRY,
                    clbit: CLBIT_CARRY
                },
            ]
        );
        assert_eq!(circuit.name(), Some("half_adder_A1_B1"));
    }

    #[test]
    fn test_half_adder_00_has_no_flips() {
        let circuit = half_adder_circuit(0, 0).unwrap();
        assert!(!circuit.gates().iter().any(|g| matches!(g, Gate::X(_))));
        assert_eq!(circuit.count_2w(), 2);
        assert_eq!(circuit.count_3w(), 1);
        assert_eq!(circuit.count_measurements(), 2);
    }

    #[test]
    fn test_half_adder_deterministic() {
        for pair in InputPair::ALL {
            assert_eq!(half_adder(pair), half_adder(pair));
        }
    }

    #[test]
    fn test_half_adder_invalid_input() {
        assert_eq!(half_adder_circuit(2, 0), Err(QaddError::InvalidInput(2)));
        assert_eq!(half_adder_circuit(0, -1), Err(QaddError::InvalidInput(-1)));
    }

    #[test]
    fn test_half_adder_is_classical() {
        for pair in InputPair::ALL {
            let circuit = half_adder(pair);
            assert!(circuit.is_classical());
            assert_eq!(circuit.measurement_map(), vec![(WIRE_SUM, 0), (WIRE_CARRY, 1)]);
        }
    }

    #[test]
    fn test_hello_circuit() {
        let circuit = hello_circuit();
        assert_eq!(circuit.num_wires(), 1);
        assert!(!circuit.is_classical());
        assert_eq!(circuit.measurement_map(), vec![(0, 0)]);
    }
}
