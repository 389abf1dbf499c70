use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// True when `code` is an ISO 4217 currency code known to `rusty_money`.
pub fn is_known_currency(code: &str) -> bool {
    iso::find(code).is_some()
}

/// Formats an amount in the given ISO 4217 currency, `None` for an unknown
/// code. Display only, no conversion happens here.
pub fn format_amount(amount: Decimal, code: &str) -> Option<String> {
    let currency = iso::find(code)?;
    Some(Money::from_decimal(amount, currency).to_string())
}
