//! Constants for QADD
//!
//! Wire layout of the half-adder, sampling limits, and the expected
//! truth table.

// ============================================================================
// Half-Adder Wire Layout
// ============================================================================

pub mod adder {
    //! Fixed wire and output-position layout of the half-adder circuit

    use crate::types::{ClbitId, WireId};

    /// Input wire A
    pub const WIRE_A: WireId = 0;

    /// Input wire B
    pub const WIRE_B: WireId = 1;

    /// Output wire receiving A XOR B
    pub const WIRE_SUM: WireId = 2;

    /// Output wire receiving A AND B
    pub const WIRE_CARRY: WireId = 3;

    /// Total wires in the half-adder
    pub const NUM_WIRES: usize = 4;

    /// Output position of SUM (rightmost character)
    pub const CLBIT_SUM: ClbitId = 0;

    /// Output position of CARRY (leftmost character)
    pub const CLBIT_CARRY: ClbitId = 1;

    /// Number of output positions
    pub const NUM_CLBITS: usize = 2;
}

// ============================================================================
// Sampling Constants
// ============================================================================

pub mod shots {
    //! Shot-count defaults and limits

    /// Default shots per circuit execution
    pub const DEFAULT_SHOTS: u64 = 4096;

    /// Shots used by quick runs
    pub const QUICK_SHOTS: u64 = 1024;

    /// Smallest valid shot count
    pub const MIN_SHOTS: u64 = 1;

    /// Largest shot count accepted by the bundled backends
    pub const MAX_SHOTS: u64 = 1_000_000;

    /// Check a shot count against [`MIN_SHOTS`] and an upper bound
    #[inline]
    pub fn in_range(shots: u64, max: u64) -> bool {
        (MIN_SHOTS..=max).contains(&shots)
    }
}

// ============================================================================
// Expected Truth Table
// ============================================================================

pub mod truth_table {
    //! Arithmetically correct half-adder outputs
    //!
    //! Bitstrings are ordered CARRY then SUM, so `"10"` reads as binary 2.

    use crate::types::InputPair;

    /// One row of the expected table: ((A, B), CARRY-SUM bitstring)
    pub type TruthRow = ((u8, u8), &'static str);

    /// Expected outputs, in verification order
    pub const EXPECTED: [TruthRow; 4] = [
        ((0, 0), "00"),
        ((0, 1), "01"),
        ((1, 0), "01"),
        ((1, 1), "10"),
    ];

    /// Look up the expected bitstring for an input pair
    pub fn expected_for(pair: InputPair) -> &'static str {
        EXPECTED[pair.index()].1
    }
}

// ============================================================================
// Tests
// ============================================================================
