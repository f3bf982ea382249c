//! Gate definitions for QADD
//!
//! The reversible flip primitives used by the half-adder, plus the
//! Hadamard used by the superposition demo, measurement and barriers.

use crate::types::{ClbitId, WireId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Wire Gates
    // ========================================================================
    /// Unconditional bit flip (Pauli-X, NOT)
    X(WireId),

    /// Hadamard gate
    H(WireId),

    // ========================================================================
    // Controlled Flips
    // ========================================================================
    /// Controlled flip: (control, target)
    Cnot(WireId, WireId),

    /// Doubly-controlled flip (Toffoli): (control1, control2, target)
    Ccx(WireId, WireId, WireId),

    // ========================================================================
    // Measurement and Control
    // ========================================================================
    /// Read out a wire into an output position
    Measure {
        /// Wire being read
        wire: WireId,
        /// Output position receiving the value
        clbit: ClbitId,
    },

    /// Barrier (visual separation only)
    Barrier(Vec<WireId>),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get wires involved in this gate
    pub fn wires(&self) -> Vec<WireId> {
        match self {
            Gate::X(w) | Gate::H(w) => vec![*w],
            Gate::Cnot(c, t) => vec![*c, *t],
            Gate::Ccx(c1, c2, t) => vec![*c1, *c2, *t],
            Gate::Measure { wire, .. } => vec![*wire],
            Gate::Barrier(ws) => ws.clone(),
        }
    }

    /// Output position written by this gate, if any
    pub fn clbit(&self) -> Option<ClbitId> {
        match self {
            Gate::Measure { clbit, .. } => Some(*clbit),
            _ => None,
        }
    }

    /// Check if gate acts on a single wire
    pub fn is_single_wire(&self) -> bool {
        matches!(self, Gate::X(_) | Gate::H(_))
    }

    /// Check if gate acts on two wires
    pub fn is_two_wire(&self) -> bool {
        matches!(self, Gate::Cnot(_, _))
    }

    /// Check if gate acts on three wires
    pub fn is_three_wire(&self) -> bool {
        matches!(self, Gate::Ccx(_, _, _))
    }

    /// Check if gate is a measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }

    /// Check if gate is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier(_))
    }

    /// Check if gate maps basis states to basis states
    ///
    /// Circuits built only from these gates behave exactly like classical
    /// reversible logic.
    pub fn is_classical(&self) -> bool {
        !matches!(self, Gate::H(_))
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X(_) => "x",
            Gate::H(_) => "h",
            Gate::Cnot(_, _) => "cx",
            Gate::Ccx(_, _, _) => "ccx",
            Gate::Measure { .. } => "measure",
            Gate::Barrier(_) => "barrier",
        }
    }

    /// Convert to OpenQASM 2.0 string
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::X(w) => format!("x q[{}];", w),
            Gate::H(w) => format!("h q[{}];", w),
            Gate::Cnot(c, t) => format!("cx q[{}],q[{}];", c, t),
            Gate::Ccx(c1, c2, t) => format!("ccx q[{}],q[{}],q[{}];", c1, c2, t),
            Gate::Measure { wire, clbit } => format!("measure q[{}] -> c[{}];", wire, clbit),
            Gate::Barrier(ws) => {
                if ws.is_empty() {
                    "barrier q;".to_string()
                } else {
                    let wires: Vec<String> = ws.iter().map(|w| format!("q[{}]", w)).collect();
                    format!("barrier {};", wires.join(","))
                }
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================
