//! Caller-supplied identity fields and request records

use rust_decimal::Decimal;
use serde::Deserialize;

/// Identity and account fields printed on a statement
///
/// The account number is only ever displayed masked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityFields {
    #[serde(rename = "fullname", alias = "fullName")]
    pub full_name: String,
    #[serde(rename = "addressOne", alias = "address1")]
    pub address_line1: String,
    #[serde(rename = "addressTwo", alias = "address2")]
    pub address_line2: String,
    #[serde(rename = "accountNumber", alias = "accountNum")]
    pub account_number: String,
    #[serde(rename = "accountName", default)]
    pub account_display_name: Option<String>,
}

/// One record of a generation request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatementRequest {
    #[serde(alias = "fileName")]
    pub filename: String,
    #[serde(flatten)]
    pub identity: IdentityFields,
    #[serde(rename = "openingBalance")]
    pub opening_balance: Decimal,
    /// `DD/Mon/YYYY to DD/Mon/YYYY`; previous month when absent
    #[serde(rename = "statementPeriod", default)]
    pub statement_period: Option<String>,
}
