//! Circuit structure for QADD
//!
//! An ordered gate list over a fixed set of wires, plus the output
//! positions that measurements write into.

use crate::error::{QaddError, QaddResult};
use crate::gate::Gate;
use crate::types::{ClbitId, WireId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Circuit description
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of wires
    num_wires: usize,

    /// Number of output positions
    num_clbits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new(num_wires: usize, num_clbits: usize) -> Self {
        Self {
            num_wires,
            num_clbits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_wires: usize, num_clbits: usize, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(num_wires, num_clbits)
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(num_wires: usize, num_clbits: usize, gates: Vec<Gate>) -> QaddResult<Self> {
        let mut circuit = Self::new(num_wires, num_clbits);
        circuit.add_gates(gates)?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    pub fn add_gate(&mut self, gate: Gate) -> QaddResult<()> {
        self.check_gate(&gate)?;
        self.gates.push(gate);
        Ok(())
    }

    fn check_gate(&self, gate: &Gate) -> QaddResult<()> {
        for &wire in &gate.wires() {
            if wire >= self.num_wires {
                return Err(QaddError::GateWireMismatch {
                    wire,
                    num_wires: self.num_wires,
                });
            }
        }
        if let Some(clbit) = gate.clbit() {
            if clbit >= self.num_clbits {
                return Err(QaddError::ClbitOutOfRange {
                    clbit,
                    num_clbits: self.num_clbits,
                });
            }
        }
        Ok(())
    }

    /// Re-check every gate against the wire and output ranges
    ///
    /// Circuits built through `add_gate` always pass. A deserialized circuit
    /// skips those checks, so consumers run this before touching its gates.
    pub fn validate(&self) -> QaddResult<()> {
        self.gates.iter().try_for_each(|gate| self.check_gate(gate))
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> QaddResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Get number of wires
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// Get number of output positions
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Measurement Map
    // ========================================================================

    /// (wire, output position) pairs in gate order
    pub fn measurement_map(&self) -> Vec<(WireId, ClbitId)> {
        self.gates
            .iter()
            .filter_map(|g| match g {
                Gate::Measure { wire, clbit } => Some((*wire, *clbit)),
                _ => None,
            })
            .collect()
    }

    /// Wire read into the given output position (last measurement wins)
    pub fn wire_for_clbit(&self, clbit: ClbitId) -> Option<WireId> {
        self.measurement_map()
            .into_iter()
            .rev()
            .find(|&(_, c)| c == clbit)
            .map(|(w, _)| w)
    }

    /// Check if any gate is a measurement
    pub fn has_measurements(&self) -> bool {
        self.gates.iter().any(|g| g.is_measurement())
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path, barriers excluded)
    pub fn depth(&self) -> usize {
        let mut wire_depths = vec![0usize; self.num_wires];

        for gate in self.gates.iter().filter(|g| !g.is_barrier()) {
            let wires = gate.wires();
            let max_depth = wires
                .iter()
                .filter_map(|&w| wire_depths.get(w))
                .max()
                .copied()
                .unwrap_or(0);
            for &w in &wires {
                if w < self.num_wires {
                    wire_depths[w] = max_depth + 1;
                }
            }
        }

        wire_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total gate count
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count single-wire gates
    pub fn count_1w(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_wire()).count()
    }

    /// Count two-wire gates
    pub fn count_2w(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_wire()).count()
    }

    /// Count three-wire gates
    pub fn count_3w(&self) -> usize {
        self.gates.iter().filter(|g| g.is_three_wire()).count()
    }

    /// Count measurement operations
    pub fn count_measurements(&self) -> usize {
        self.gates.iter().filter(|g| g.is_measurement()).count()
    }

    /// Check if every gate maps basis states to basis states
    pub fn is_classical(&self) -> bool {
        self.gates.iter().all(|g| g.is_classical())
    }

    // ========================================================================
    // QASM Export
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    pub fn to_qasm(&self) -> String {
        let mut lines = Vec::new();

        lines.push("OPENQASM 2.0;".to_string());
        lines.push("include \"qelib1.inc\";".to_string());
        lines.push(String::new());

        lines.push(format!("qreg q[{}];", self.num_wires));
        lines.push(format!("creg c[{}];", self.num_clbits));
        lines.push(String::new());

        for gate in &self.gates {
            lines.push(gate.to_qasm());
        }

        lines.join("\n")
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit{}({} wires, {} outputs, {} gates)",
            self.name
                .as_deref()
                .map(|n| format!(" '{}'", n))
                .unwrap_or_default(),
            self.num_wires,
            self.num_clbits,
            self.gates.len()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1W gates: {}", self.count_1w())?;
        writeln!(f, "  2W gates: {}", self.count_2w())?;
        writeln!(f, "  3W gates: {}", self.count_3w())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
