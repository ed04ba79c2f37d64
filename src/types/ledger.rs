//! Ledger types produced by the ledger generator

use super::money::Money;
use chrono::NaiveDate;
use serde::Serialize;

/// Direction of a statement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money leaving the account; lowers the running balance
    Withdrawal,
    /// Money entering the account; raises the running balance
    Deposit,
}

/// A single dated statement line
///
/// Lines are only created by the ledger generator and are not mutated once
/// placed in a [`Ledger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionLine {
    pub date: NaiveDate,
    pub direction: Direction,
    /// Non-negative; zero only for constant-zero archetypes
    pub amount: Money,
    pub running_balance_after: Money,
    pub label: Option<String>,
}

/// A generated statement: opening balance, lines, and summary totals
///
/// Holds the ledger equation
/// `closing_balance == opening_balance + total_in - total_out`, and the last
/// line's running balance equals `closing_balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    pub opening_balance: Money,
    pub lines: Vec<TransactionLine>,
    pub total_in: Money,
    pub total_out: Money,
    pub closing_balance: Money,
}

impl Ledger {
    /// Balance after each step, starting with the opening balance
    ///
    /// An 11-line ledger yields 12 balances.
    pub fn balances(&self) -> impl Iterator<Item = Money> + '_ {
        std::iter::once(self.opening_balance)
            .chain(self.lines.iter().map(|line| line.running_balance_after))
    }

    /// Lines going in the given direction, in statement order
    pub fn lines_in(&self, direction: Direction) -> impl Iterator<Item = &TransactionLine> {
        self.lines
            .iter()
            .filter(move |line| line.direction == direction)
    }

    /// Whether the ledger equation and last-line balance hold
    pub fn is_reconciled(&self) -> bool {
        let expected = self.opening_balance + self.total_in - self.total_out;
        let last = self
            .lines
            .last()
            .map(|line| line.running_balance_after)
            .unwrap_or(self.opening_balance);
        expected == self.closing_balance && last == self.closing_balance
    }
}
