//! Ledger generation
//!
//! Composes the date sampler, a transaction pattern, and integer-cents money
//! into a complete [`Ledger`]:
//!
//! 1. The opening balance is converted to cents.
//! 2. One date per archetype is sampled under the pattern's contract.
//! 3. Each archetype draws an amount from its range, subject to its floor and
//!    distinct-from-previous rules, and moves the running balance.
//! 4. The ledger equation is checked and, should the last balance disagree,
//!    the last line and the closing balance are forced to
//!    `opening + total_in - total_out`.

use crate::core::date_sampler::sample_dates;
use crate::core::pattern::{Archetype, TransactionPattern};
use crate::types::{Direction, Ledger, Money, StatementError, StatementPeriod, TransactionLine};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Redraws allowed for an archetype that must differ from its predecessor
pub const MAX_DRAW_ATTEMPTS: u32 = 32;

/// Builds ledgers for one transaction pattern
#[derive(Debug, Clone, Copy)]
pub struct LedgerGenerator<'p> {
    pattern: &'p TransactionPattern,
}

impl<'p> LedgerGenerator<'p> {
    pub fn new(pattern: &'p TransactionPattern) -> Self {
        LedgerGenerator { pattern }
    }

    pub fn pattern(&self) -> &'p TransactionPattern {
        self.pattern
    }

    /// Generate a reconciled ledger over `period`
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` when the opening balance does not fit in cents
    /// - `InvalidPeriod` when the period's end precedes its start
    /// - `AmountConstraintUnsatisfiable` when an archetype cannot draw a
    ///   valid amount
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        opening_balance: Decimal,
        period: &StatementPeriod,
    ) -> Result<Ledger, StatementError> {
        let opening = Money::from_decimal(opening_balance)?;
        let dates = sample_dates(rng, period, self.pattern.len(), self.pattern.sampling)?;

        let mut balance = opening;
        let mut total_in = Money::ZERO;
        let mut total_out = Money::ZERO;
        let mut previous: Option<Money> = None;
        let mut lines = Vec::with_capacity(self.pattern.len());

        for (archetype, date) in self.pattern.archetypes.iter().zip(dates) {
            let amount = draw_amount(rng, archetype, previous)?;
            match archetype.direction {
                Direction::Withdrawal => {
                    balance -= amount;
                    total_out += amount;
                }
                Direction::Deposit => {
                    balance += amount;
                    total_in += amount;
                }
            }
            previous = Some(amount);
            lines.push(TransactionLine {
                date,
                direction: archetype.direction,
                amount,
                running_balance_after: balance,
                label: Some(archetype.label.to_string()),
            });
        }

        let expected_closing = opening + total_in - total_out;
        if let Some(last) = lines.last_mut() {
            if last.running_balance_after != expected_closing {
                warn!(
                    drift_cents = (last.running_balance_after - expected_closing).cents(),
                    "forcing closing balance to the ledger equation"
                );
                last.running_balance_after = expected_closing;
            }
        }

        debug!(
            pattern = %self.pattern.name,
            lines = lines.len(),
            total_in = %total_in,
            total_out = %total_out,
            "generated ledger"
        );

        Ok(Ledger {
            opening_balance: opening,
            lines,
            total_in,
            total_out,
            closing_balance: expected_closing,
        })
    }
}

/// Draw a whole-cent amount for `archetype`
///
/// The floor raises the lower bound to one cent above it. Distinct-from-
/// previous archetypes redraw until they differ from `previous`.
fn draw_amount<R: Rng + ?Sized>(
    rng: &mut R,
    archetype: &Archetype,
    previous: Option<Money>,
) -> Result<Money, StatementError> {
    let range = archetype.range;
    let min = match archetype.constraint.floor {
        Some(floor) => range.min.max(floor + Money::from_cents(1)),
        None => range.min,
    };
    if min > range.max {
        return Err(StatementError::amount_constraint_unsatisfiable(
            &archetype.label,
            0,
        ));
    }

    let must_differ = archetype.constraint.distinct_from_previous;
    for _ in 0..MAX_DRAW_ATTEMPTS {
        let amount = Money::from_cents(rng.gen_range(min.cents()..=range.max.cents()));
        if !must_differ || previous != Some(amount) {
            return Ok(amount);
        }
    }

    Err(StatementError::amount_constraint_unsatisfiable(
        &archetype.label,
        MAX_DRAW_ATTEMPTS,
    ))
}
