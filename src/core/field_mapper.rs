//! Field mapping: identity fields plus a ledger to named template slots
//!
//! [`map_fields`] is pure. It turns its inputs into the flat key-to-string
//! mapping a [`TemplateRenderer`](crate::core::traits::TemplateRenderer)
//! consumes, applying display rules along the way: uppercased names, masked
//! account numbers, formatted periods and money, and blank cells for zero
//! amounts.

use crate::types::{Direction, IdentityFields, Ledger, Money, StatementPeriod};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Flat slot-name to display-string mapping
pub type SlotMap = BTreeMap<String, String>;

/// Run of mask characters between the kept prefix and suffix digits
pub const MASK_RUN: &str = "*****";

const MASK_KEEP_DIGITS: usize = 6;

/// Per-document display conventions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingStyle {
    /// Prefix for summary totals (`totalIn`, `balanceOn`, ...)
    pub currency_prefix: Option<&'static str>,
    /// chrono format for `date{i}` slots
    pub line_date_format: &'static str,
    /// chrono format for the `month` caption
    pub caption_format: &'static str,
    /// chrono format for the issue `date` slot
    pub issue_date_format: &'static str,
}

impl Default for MappingStyle {
    fn default() -> Self {
        MappingStyle {
            currency_prefix: None,
            line_date_format: "%d/%m/%Y",
            caption_format: "%b %d",
            issue_date_format: "%d/%m/%Y",
        }
    }
}

/// Mask an account number for display
///
/// A leading two-letter country prefix is dropped, then the first six and
/// last six remaining digits are kept around [`MASK_RUN`]. Shorter numbers
/// keep the first six digits and whatever is left after them.
pub fn mask_account(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let body = match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
            &trimmed[2..]
        }
        _ => trimmed,
    };

    let digits: String = body.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return MASK_RUN.to_string();
    }

    let head_len = digits.len().min(MASK_KEEP_DIGITS);
    let (head, rest) = digits.split_at(head_len);
    let tail = &rest[rest.len().saturating_sub(MASK_KEEP_DIGITS)..];
    if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head}{MASK_RUN}{tail}")
    }
}

fn amount_cell(amount: Money) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        amount.to_display_string(None)
    }
}

/// Build the slot mapping for one statement
pub fn map_fields(
    identity: &IdentityFields,
    period: &StatementPeriod,
    ledger: &Ledger,
    style: &MappingStyle,
    issued_on: NaiveDate,
) -> SlotMap {
    let mut slots = SlotMap::new();
    let mut put = |key: &str, value: String| {
        slots.insert(key.to_string(), value);
    };

    let full_name = identity.full_name.to_uppercase();
    let account_name = identity
        .account_display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| full_name.clone());

    put("fullname", full_name);
    put("accountName", account_name);
    put("addressOne", identity.address_line1.clone());
    put("addressTwo", identity.address_line2.clone());
    put("accountNumber", mask_account(&identity.account_number));
    put("statementPeriod", period.to_string());
    put("month", period.start.format(style.caption_format).to_string());
    put("date", issued_on.format(style.issue_date_format).to_string());

    let total = |m: Money| m.to_display_string(style.currency_prefix);
    put("totalOn", total(ledger.opening_balance));
    put("totalIn", total(ledger.total_in));
    put("totalOut", total(ledger.total_out));
    put("balanceOn", total(ledger.closing_balance));
    put("ebBal", total(ledger.closing_balance));

    for (i, line) in ledger.lines.iter().enumerate() {
        put(
            &format!("date{}", i + 1),
            line.date.format(style.line_date_format).to_string(),
        );
    }
    for (i, line) in ledger.lines_in(Direction::Withdrawal).enumerate() {
        put(&format!("withdra{}", i + 1), amount_cell(line.amount));
    }
    for (i, line) in ledger.lines_in(Direction::Deposit).enumerate() {
        put(&format!("deposit{}", i + 1), amount_cell(line.amount));
    }
    for (i, balance) in ledger.balances().enumerate() {
        put(&format!("balance{}", i + 1), balance.to_display_string(None));
    }

    slots
}
