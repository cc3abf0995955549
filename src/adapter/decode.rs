//! Stateless decoding of game state from RAM.
//!
//! Game programs keep their score and status in ad hoc encodings. Titles
//! describe where to look and how to read it with the declarative pieces
//! here, which are testable against a plain byte table.
//!
//! - `ScoreLayout`: where the score lives and how its bytes combine
//! - `Condition`: one relational test of a RAM byte against a constant
//! - `TerminalRule`: conditions combined into a game-over predicate

use serde::{Deserialize, Serialize};

use crate::machine::MemoryReader;

/// Decode one byte of packed decimal: high nibble tens, low nibble units.
///
/// ```
/// use arcade_env::adapter::decode::packed_decimal;
/// assert_eq!(packed_decimal(0x59), 59);
/// ```
#[must_use]
pub const fn packed_decimal(byte: u8) -> i64 {
    (byte >> 4) as i64 * 10 + (byte & 0x0F) as i64
}

/// Combine packed-decimal bytes into one integer.
///
/// `addresses` is ordered least significant first: the first byte holds
/// the units and tens, the next the hundreds and thousands, and so on.
pub fn decimal_score<M: MemoryReader + ?Sized>(memory: &M, addresses: &[u16]) -> i64 {
    addresses
        .iter()
        .rev()
        .fold(0, |acc, &address| acc * 100 + packed_decimal(memory.peek(address)))
}

/// Where a title keeps its score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreLayout {
    /// Packed-decimal bytes, least significant first.
    PackedDecimal(&'static [u16]),
    /// Two plain binary counters; the score is `ours - theirs`.
    Difference { ours: u16, theirs: u16 },
}

impl ScoreLayout {
    /// Decode the current score.
    pub fn decode<M: MemoryReader + ?Sized>(&self, memory: &M) -> i64 {
        match *self {
            ScoreLayout::PackedDecimal(addresses) => decimal_score(memory, addresses),
            ScoreLayout::Difference { ours, theirs } => {
                i64::from(memory.peek(ours)) - i64::from(memory.peek(theirs))
            }
        }
    }
}

/// Relational operator for a `Condition`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    #[must_use]
    pub fn apply(self, lhs: u8, rhs: u8) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }
}

/// `peek(address) <cmp> value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub address: u16,
    pub cmp: Comparison,
    pub value: u8,
}

impl Condition {
    #[must_use]
    pub const fn new(address: u16, cmp: Comparison, value: u8) -> Self {
        Self { address, cmp, value }
    }

    #[must_use]
    pub const fn equals(address: u16, value: u8) -> Self {
        Self::new(address, Comparison::Eq, value)
    }

    #[must_use]
    pub const fn not_equals(address: u16, value: u8) -> Self {
        Self::new(address, Comparison::Ne, value)
    }

    #[must_use]
    pub const fn at_least(address: u16, value: u8) -> Self {
        Self::new(address, Comparison::Ge, value)
    }

    #[must_use]
    pub const fn at_most(address: u16, value: u8) -> Self {
        Self::new(address, Comparison::Le, value)
    }

    /// Evaluate against `memory`.
    pub fn holds<M: MemoryReader + ?Sized>(&self, memory: &M) -> bool {
        self.cmp.apply(memory.peek(self.address), self.value)
    }
}

/// Game-over predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalRule {
    /// The game never reports its own end.
    Never,
    /// Every condition holds.
    All(&'static [Condition]),
    /// At least one condition holds.
    Any(&'static [Condition]),
}

impl TerminalRule {
    /// Evaluate against `memory`.
    pub fn evaluate<M: MemoryReader + ?Sized>(&self, memory: &M) -> bool {
        match *self {
            TerminalRule::Never => false,
            TerminalRule::All(conditions) => conditions.iter().all(|c| c.holds(memory)),
            TerminalRule::Any(conditions) => conditions.iter().any(|c| c.holds(memory)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{ram_index, RAM_SIZE};
    use proptest::prelude::*;

    fn ram_with(bytes: &[(u16, u8)]) -> Vec<u8> {
        let mut ram = vec![0u8; RAM_SIZE];
        for &(address, value) in bytes {
            ram[ram_index(address)] = value;
        }
        ram
    }

    #[test]
    fn test_packed_decimal() {
        assert_eq!(packed_decimal(0x00), 0);
        assert_eq!(packed_decimal(0x09), 9);
        assert_eq!(packed_decimal(0x10), 10);
        assert_eq!(packed_decimal(0x99), 99);
    }

    #[test]
    fn test_decimal_score_positional() {
        // 000150 over three bytes, least significant first
        let ram = ram_with(&[(0x9E, 0x50), (0x9D, 0x01), (0x9C, 0x00)]);
        assert_eq!(decimal_score(&ram, &[0x9E, 0x9D, 0x9C]), 150);

        let ram = ram_with(&[(0x9E, 0x34), (0x9D, 0x12), (0x9C, 0x98)]);
        assert_eq!(decimal_score(&ram, &[0x9E, 0x9D, 0x9C]), 981_234);
    }

    #[test]
    fn test_decimal_score_empty_layout() {
        let ram = ram_with(&[]);
        assert_eq!(decimal_score(&ram, &[]), 0);
    }

    #[test]
    fn test_difference_layout() {
        let layout = ScoreLayout::Difference { ours: 0x8E, theirs: 0x8D };
        let ram = ram_with(&[(0x8E, 3), (0x8D, 7)]);
        assert_eq!(layout.decode(&ram), -4);
    }

    #[test]
    fn test_comparisons() {
        assert!(Comparison::Eq.apply(3, 3));
        assert!(Comparison::Ne.apply(3, 4));
        assert!(Comparison::Lt.apply(3, 4));
        assert!(Comparison::Le.apply(4, 4));
        assert!(Comparison::Gt.apply(5, 4));
        assert!(Comparison::Ge.apply(4, 4));
        assert!(!Comparison::Gt.apply(4, 4));
    }

    #[test]
    fn test_condition_constructors() {
        let ram = ram_with(&[(0x90, 7)]);
        assert!(Condition::equals(0x90, 7).holds(&ram));
        assert!(Condition::not_equals(0x90, 8).holds(&ram));
        assert!(Condition::at_least(0x90, 7).holds(&ram));
        assert!(!Condition::at_least(0x90, 8).holds(&ram));
        assert!(Condition::at_most(0x90, 7).holds(&ram));
        assert_eq!(Condition::at_most(0x90, 7).cmp, Comparison::Le);
    }

    const ALL_OF: &[Condition] = &[
        Condition::equals(0x9F, 0),
        Condition::equals(0xA2, 0x03),
        Condition::equals(0x80, 0x80),
    ];

    #[test]
    fn test_all_rule_needs_every_condition() {
        let rule = TerminalRule::All(ALL_OF);
        let base = [(0x9F, 0), (0xA2, 0x03), (0x80, 0x80)];
        assert!(rule.evaluate(&ram_with(&base)));

        for i in 0..base.len() {
            let mut broken = base;
            broken[i].1 ^= 0x01;
            assert!(!rule.evaluate(&ram_with(&broken)), "condition {} flipped", i);
        }
    }

    #[test]
    fn test_any_rule() {
        const EITHER: &[Condition] = &[Condition::equals(0x8D, 21), Condition::equals(0x8E, 21)];
        let rule = TerminalRule::Any(EITHER);

        assert!(!rule.evaluate(&ram_with(&[(0x8D, 20), (0x8E, 3)])));
        assert!(rule.evaluate(&ram_with(&[(0x8D, 21)])));
        assert!(rule.evaluate(&ram_with(&[(0x8E, 21)])));
        assert!(!TerminalRule::Never.evaluate(&ram_with(&[])));
    }

    proptest! {
        #[test]
        fn prop_packed_decimal_recovers_digits(tens in 0u8..10, units in 0u8..10) {
            prop_assert_eq!(packed_decimal((tens << 4) | units), i64::from(tens) * 10 + i64::from(units));
        }

        #[test]
        fn prop_decimal_score_matches_integer(score in 0i64..1_000_000) {
            let digits = |pair: i64| {
                let pair = pair as u8;
                ((pair / 10) << 4) | (pair % 10)
            };
            let ram = ram_with(&[
                (0x9E, digits(score % 100)),
                (0x9D, digits(score / 100 % 100)),
                (0x9C, digits(score / 10_000)),
            ]);
            prop_assert_eq!(decimal_score(&ram, &[0x9E, 0x9D, 0x9C]), score);
        }
    }
}
