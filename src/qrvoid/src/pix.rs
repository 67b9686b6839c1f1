//! Pix merchant-presented-mode payment payloads.
//!
//! The output is a sequence of tag/length/value fields closed by a
//! CRC-16 field (`6304XXXX`). Field order and the constant values are part of
//! the interchange format and must not change.

use crate::checksum::{checksum, CHECKSUM_FIELD_PREFIX};
use crate::tlv::format_field;
use log::debug;

/// Globally unique identifier of the Pix arrangement.
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Transaction id used when none is supplied.
pub const DEFAULT_TXID: &str = "***";

/// Maximum beneficiary name length; longer names are silently truncated.
pub const MAX_NAME_LEN: usize = 25;

/// Maximum beneficiary city length; longer cities are silently truncated.
pub const MAX_CITY_LEN: usize = 15;

const PAYLOAD_FORMAT_INDICATOR: &str = "01";
const MERCHANT_CATEGORY_CODE: &str = "0000";
const CURRENCY_BRL: &str = "986";
const COUNTRY_CODE: &str = "BR";

/// A single Pix payment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Pix key (e-mail, phone, CPF/CNPJ or random key).
    pub key: String,
    pub beneficiary_name: String,
    pub beneficiary_city: String,
    /// Decimal amount as typed by the user; unparseable values are dropped.
    pub amount: Option<String>,
    /// Transaction id; empty means [`DEFAULT_TXID`].
    pub transaction_id: String,
}

impl PaymentRequest {
    /// Creates a request with no amount and the default transaction id.
    pub fn new(
        key: impl Into<String>,
        beneficiary_name: impl Into<String>,
        beneficiary_city: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            beneficiary_name: beneficiary_name.into(),
            beneficiary_city: beneficiary_city.into(),
            amount: None,
            transaction_id: DEFAULT_TXID.to_string(),
        }
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = transaction_id.into();
        self
    }
}

/// Builds the full payment payload, checksum included.
///
/// Never fails: an amount that does not parse as a decimal number is omitted
/// and over-long names and cities are cut to their maximum length.
pub fn build_payment_payload(req: &PaymentRequest) -> String {
    let name = truncate_chars(&req.beneficiary_name, MAX_NAME_LEN);
    let city = truncate_chars(&req.beneficiary_city, MAX_CITY_LEN);
    let txid = if req.transaction_id.is_empty() {
        DEFAULT_TXID
    } else {
        req.transaction_id.as_str()
    };

    let merchant_account = format!(
        "{}{}",
        format_field("00", PIX_GUI),
        format_field("01", &req.key)
    );

    let mut raw = String::new();
    raw.push_str(&format_field("00", PAYLOAD_FORMAT_INDICATOR));
    raw.push_str(&format_field("26", &merchant_account));
    raw.push_str(&format_field("52", MERCHANT_CATEGORY_CODE));
    raw.push_str(&format_field("53", CURRENCY_BRL));
    if let Some(amount) = req.amount.as_deref().and_then(format_amount) {
        raw.push_str(&format_field("54", &amount));
    }
    raw.push_str(&format_field("58", COUNTRY_CODE));
    raw.push_str(&format_field("59", name));
    raw.push_str(&format_field("60", city));
    raw.push_str(&format_field("62", &format_field("05", txid)));

    let crc = checksum(&raw);
    raw.push_str(CHECKSUM_FIELD_PREFIX);
    raw.push_str(&crc);
    raw
}

/// Formats an amount with exactly two fractional digits.
///
/// Returns `None` for empty, non-numeric or non-finite input.
fn format_amount(amount: &str) -> Option<String> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(format!("{value:.2}")),
        _ => {
            debug!("Ignoring unparseable Pix amount {amount:?}");
            None
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
