//! Core types for QADD
//!
//! Fundamental type aliases and validated wrapper types used throughout
//! the workspace: input bits, input pairs, bitstrings and outcome tables.

use crate::error::{QaddError, QaddResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Wire identifier (0-indexed)
pub type WireId = usize;

/// Output bit position (0-indexed, position 0 is the rightmost character)
pub type ClbitId = usize;

/// Outcome frequency table: bitstring -> count
///
/// Ordered so that iteration, display and tie-breaking never depend on
/// hashing.
pub type Counts = BTreeMap<String, u64>;

// ============================================================================
// Bit (Validated Wrapper)
// ============================================================================

/// A single logical input bit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Bit(bool);

impl Bit {
    /// Logical zero
    pub const ZERO: Self = Self(false);

    /// Logical one
    pub const ONE: Self = Self(true);

    /// Create a bit, rejecting anything outside {0, 1}
    pub fn new(value: i64) -> QaddResult<Self> {
        match value {
            0 => Ok(Self::ZERO),
            1 => Ok(Self::ONE),
            other => Err(QaddError::InvalidInput(other)),
        }
    }

    /// Whether the bit is set
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0
    }

    /// Numeric value (0 or 1)
    #[inline]
    pub fn value(&self) -> u8 {
        self.0 as u8
    }

    /// Exclusive or
    #[inline]
    pub fn xor(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Logical and
    #[inline]
    pub fn and(self, other: Self) -> Self {
        Self(self.0 && other.0)
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.value()
    }
}

impl TryFrom<u8> for Bit {
    type Error = QaddError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl TryFrom<i64> for Bit {
    type Error = QaddError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ============================================================================
// InputPair
// ============================================================================

/// The two logical inputs (A, B) of the half-adder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InputPair {
    /// Input A
    pub a: Bit,
    /// Input B
    pub b: Bit,
}

impl InputPair {
    /// Every input pair, in verification order
    pub const ALL: [InputPair; 4] = [
        InputPair::from_bits(Bit::ZERO, Bit::ZERO),
        InputPair::from_bits(Bit::ZERO, Bit::ONE),
        InputPair::from_bits(Bit::ONE, Bit::ZERO),
        InputPair::from_bits(Bit::ONE, Bit::ONE),
    ];

    /// Create from already validated bits
    pub const fn from_bits(a: Bit, b: Bit) -> Self {
        Self { a, b }
    }

    /// Create from raw integers
    pub fn new(a: i64, b: i64) -> QaddResult<Self> {
        Ok(Self {
            a: Bit::new(a)?,
            b: Bit::new(b)?,
        })
    }

    /// Position of this pair in [`InputPair::ALL`]
    pub fn index(&self) -> usize {
        ((self.a.value() as usize) << 1) | self.b.value() as usize
    }

    /// Classical SUM output (A XOR B)
    pub fn sum(&self) -> Bit {
        self.a.xor(self.b)
    }

    /// Classical CARRY output (A AND B)
    pub fn carry(&self) -> Bit {
        self.a.and(self.b)
    }

    /// Arithmetic value of A + B
    pub fn arithmetic_sum(&self) -> u8 {
        self.a.value() + self.b.value()
    }
}

impl fmt::Display for InputPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A={} B={}", self.a, self.b)
    }
}

// ============================================================================
// Bitstring
// ============================================================================

/// Readout bitstring, stored most significant output position first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools (most significant first)
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create from values indexed by output position (position 0 last)
    pub fn from_positions(values: &[bool]) -> Self {
        Self {
            bits: values.iter().rev().copied().collect(),
        }
    }

    /// Create from string (e.g., "10")
    pub fn parse(s: &str) -> QaddResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(QaddError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Create zero bitstring of given length
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Value at an output position (position 0 is the rightmost character)
    pub fn position(&self, clbit: ClbitId) -> Option<bool> {
        let len = self.bits.len();
        if clbit >= len {
            return None;
        }
        self.bits.get(len - 1 - clbit).copied()
    }

    /// Convert to usize (for small bitstrings)
    pub fn to_usize(&self) -> usize {
        self.bits
            .iter()
            .rev()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| 1 << i)
            .sum()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
