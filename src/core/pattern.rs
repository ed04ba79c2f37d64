//! Transaction patterns: ordered catalogs of line archetypes
//!
//! A [`TransactionPattern`] is a read-only value describing which lines a
//! statement has, in which direction each goes, and the plausible amount range
//! for each. The built-in catalogs are `static` and shared process-wide.

use crate::core::date_sampler::SamplingContract;
use crate::types::Direction::{Deposit, Withdrawal};
use crate::types::{Direction, Money};
use std::borrow::Cow;

/// Inclusive amount bounds for an archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    pub min: Money,
    pub max: Money,
}

impl AmountRange {
    pub const fn units(min: i64, max: i64) -> Self {
        AmountRange {
            min: Money::from_units(min),
            max: Money::from_units(max),
        }
    }

    /// A range that always yields `amount`
    pub const fn constant(amount: Money) -> Self {
        AmountRange {
            min: amount,
            max: amount,
        }
    }
}

/// Extra rules an archetype's amount must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountConstraint {
    /// The amount must be strictly greater than this
    pub floor: Option<Money>,
    /// The amount must differ from the immediately preceding line's amount
    pub distinct_from_previous: bool,
}

impl AmountConstraint {
    pub const NONE: AmountConstraint = AmountConstraint {
        floor: None,
        distinct_from_previous: false,
    };
}

/// A named line category with a direction and amount range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archetype {
    pub label: Cow<'static, str>,
    pub direction: Direction,
    pub range: AmountRange,
    pub constraint: AmountConstraint,
}

impl Archetype {
    pub const fn new(label: &'static str, direction: Direction, range: AmountRange) -> Self {
        Archetype::constrained(label, direction, range, AmountConstraint::NONE)
    }

    pub const fn constrained(
        label: &'static str,
        direction: Direction,
        range: AmountRange,
        constraint: AmountConstraint,
    ) -> Self {
        Archetype {
            label: Cow::Borrowed(label),
            direction,
            range,
            constraint,
        }
    }
}

/// An ordered list of archetypes plus the date contract used to date them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPattern {
    pub name: Cow<'static, str>,
    pub archetypes: Cow<'static, [Archetype]>,
    pub sampling: SamplingContract,
}

impl TransactionPattern {
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn count(&self, direction: Direction) -> usize {
        self.archetypes
            .iter()
            .filter(|a| a.direction == direction)
            .count()
    }

    /// A constant-amount pattern: every line gets exactly the given amount
    ///
    /// Lines are dated under the anchored-ascending contract like the
    /// canonical pattern.
    pub fn fixed(name: &str, lines: &[(&str, Direction, Money)]) -> Self {
        let archetypes = lines
            .iter()
            .map(|(label, direction, amount)| Archetype {
                label: Cow::Owned(label.to_string()),
                direction: *direction,
                range: AmountRange::constant(*amount),
                constraint: AmountConstraint::NONE,
            })
            .collect::<Vec<_>>();
        TransactionPattern {
            name: Cow::Owned(name.to_string()),
            archetypes: Cow::Owned(archetypes),
            sampling: SamplingContract::AnchoredAscending,
        }
    }
}

const UTILITY_FLOOR: AmountConstraint = AmountConstraint {
    floor: Some(Money::from_units(50)),
    distinct_from_previous: false,
};

const UTILITY_FLOOR_DISTINCT: AmountConstraint = AmountConstraint {
    floor: Some(Money::from_units(50)),
    distinct_from_previous: true,
};

const CANONICAL_ARCHETYPES: &[Archetype] = &[
    Archetype::constrained(
        "Internet Bill",
        Withdrawal,
        AmountRange::units(25, 150),
        UTILITY_FLOOR,
    ),
    Archetype::constrained(
        "Electric Bill",
        Withdrawal,
        AmountRange::units(40, 300),
        UTILITY_FLOOR_DISTINCT,
    ),
    Archetype::new("Deposit", Deposit, AmountRange::units(200, 1_500)),
    Archetype::new("Payroll Run", Deposit, AmountRange::units(2_500, 7_500)),
    Archetype::new("Rent Bill", Withdrawal, AmountRange::units(800, 2_500)),
    Archetype::new("Card Payment", Withdrawal, AmountRange::units(100, 600)),
    Archetype::new("Check", Withdrawal, AmountRange::units(150, 1_200)),
    Archetype::new("Cash Deposit", Deposit, AmountRange::units(100, 2_000)),
    Archetype::new("Wire Transfer", Withdrawal, AmountRange::units(1_000, 4_500)),
    Archetype::new("Payroll Run", Deposit, AmountRange::units(2_500, 7_500)),
    Archetype::new("Insurance Premium", Withdrawal, AmountRange::units(300, 2_000)),
];

const COMPACT_ARCHETYPES: &[Archetype] = &[
    Archetype::new("Transfer In", Deposit, AmountRange::units(200, 300)),
    Archetype::new("Subscription", Withdrawal, AmountRange::units(30, 50)),
    Archetype::new("Salary Advance", Deposit, AmountRange::units(300, 600)),
    Archetype::new("Groceries", Withdrawal, AmountRange::units(200, 550)),
    Archetype::new("Service Fee", Withdrawal, AmountRange::units(5, 10)),
    Archetype::new("Fuel", Withdrawal, AmountRange::units(50, 185)),
    Archetype::new("Bank Charge", Withdrawal, AmountRange::units(2, 5)),
    Archetype::new("Pharmacy", Withdrawal, AmountRange::units(30, 67)),
];

/// The 11-line statement pattern: 7 withdrawals, 4 deposits
pub static CANONICAL: TransactionPattern = TransactionPattern {
    name: Cow::Borrowed("canonical"),
    archetypes: Cow::Borrowed(CANONICAL_ARCHETYPES),
    sampling: SamplingContract::AnchoredAscending,
};

/// The 8-line spreadsheet pattern
pub static COMPACT: TransactionPattern = TransactionPattern {
    name: Cow::Borrowed("compact"),
    archetypes: Cow::Borrowed(COMPACT_ARCHETYPES),
    sampling: SamplingContract::UnconstrainedAscending,
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::canonical(&CANONICAL, 11, 7, 4)]
    #[case::compact(&COMPACT, 8, 6, 2)]
    fn test_catalog_shape(
        #[case] pattern: &TransactionPattern,
        #[case] len: usize,
        #[case] withdrawals: usize,
        #[case] deposits: usize,
    ) {
        assert_eq!(pattern.len(), len);
        assert_eq!(pattern.count(Direction::Withdrawal), withdrawals);
        assert_eq!(pattern.count(Direction::Deposit), deposits);
    }

    #[test]
    fn test_catalog_ranges_are_ordered() {
        for archetype in CANONICAL.archetypes.iter().chain(COMPACT.archetypes.iter()) {
            assert!(
                archetype.range.min <= archetype.range.max,
                "{} has an inverted range",
                archetype.label
            );
        }
    }

    #[test]
    fn test_electric_follows_internet() {
        let labels: Vec<&str> = CANONICAL.archetypes.iter().map(|a| a.label.as_ref()).collect();
        let electric = labels.iter().position(|l| *l == "Electric Bill").unwrap();
        assert_eq!(labels[electric - 1], "Internet Bill");
        assert!(CANONICAL.archetypes[electric].constraint.distinct_from_previous);
    }

    #[test]
    fn test_fixed_pattern_uses_constant_ranges() {
        let pattern = TransactionPattern::fixed(
            "demo",
            &[("Check", Direction::Withdrawal, Money::from_cents(7_599))],
        );
        assert_eq!(pattern.len(), 1);
        assert_eq!(pattern.archetypes[0].range.min, pattern.archetypes[0].range.max);
    }
}
