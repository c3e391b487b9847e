use crate::domain::entities::{Currency, Order};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Local};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

/// Locale posted with every initiation
pub const LOCALE: &str = "en-za";

/// Fixed integration tag posted in USER3
pub const CLIENT_TAG: &str = "paygate-rs-v1.0.0";

/// Country code substituted when the billing address has none
pub const DEFAULT_COUNTRY: &str = "ZAF";

/// Email substituted when the billing address has none
pub const DEFAULT_EMAIL: &str = "test@tom.com";

/// Relative path of the return handler the gateway redirects back to
pub const RETURN_HANDLER_PATH: &str = "Plugins/PaymentPayGate/PayGateReturnHandler";

/// Merchant credentials used to sign initiation requests
#[derive(Debug, Clone)]
pub struct Credentials {
    pub paygate_id: String,
    pub encryption_key: String,
}

/// The ordered field set posted to the gateway's initiate endpoint.
///
/// Field insertion order is the checksum concatenation order; reordering a
/// field silently breaks every transaction, so the fields are only reachable
/// through the ordered accessors.
#[derive(Debug, Clone)]
pub struct InitiateRequest {
    fields: Vec<(&'static str, String)>,
    checksum: String,
}

impl InitiateRequest {
    /// Assemble the signed field set for one checkout attempt.
    ///
    /// Missing billing country or email is substituted and logged, never
    /// fatal. A missing or negative order total is fatal.
    pub fn build(
        order: &Order,
        currency: &Currency,
        credentials: &Credentials,
        store_url: &str,
        transaction_date: DateTime<Local>,
    ) -> DomainResult<Self> {
        let amount = amount_cents(order.order_total)?;
        let return_url = format!(
            "{}{}?pgnopcommerce={}",
            ensure_trailing_slash(store_url),
            RETURN_HANDLER_PATH,
            order.id
        );

        let country = match order.billing_country() {
            Some(code) => code.to_string(),
            None => {
                warn!(
                    "Order {} has no billing country, defaulting to {}",
                    order.id, DEFAULT_COUNTRY
                );
                DEFAULT_COUNTRY.to_string()
            }
        };

        let email = match order.billing_email() {
            Some(email) => email.to_string(),
            None => {
                warn!(
                    "Order {} has no billing email, defaulting to {}",
                    order.id, DEFAULT_EMAIL
                );
                DEFAULT_EMAIL.to_string()
            }
        };

        let fields = vec![
            ("PAYGATE_ID", credentials.paygate_id.clone()),
            ("REFERENCE", order.id.to_string()),
            ("AMOUNT", amount),
            ("CURRENCY", currency.currency_code.clone()),
            ("RETURN_URL", return_url),
            (
                "TRANSACTION_DATE",
                transaction_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
            ("LOCALE", LOCALE.to_string()),
            ("COUNTRY", country),
            ("EMAIL", email),
            ("USER3", CLIENT_TAG.to_string()),
        ];

        let checksum = checksum(
            fields.iter().map(|(_, value)| value.as_str()),
            &credentials.encryption_key,
        );

        Ok(Self { fields, checksum })
    }

    /// Fields in checksum order, without the checksum itself
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Hex checksum over the field values and the encryption key
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// The complete form body for the initiate POST, checksum last
    pub fn form_fields(&self) -> Vec<(&str, &str)> {
        let mut form: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        form.push(("CHECKSUM", self.checksum.as_str()));
        form
    }

    /// Concatenated field values, as hashed (secret excluded). Logged at
    /// debug level before the initiate call.
    pub fn concatenated_values(&self) -> String {
        self.fields
            .iter()
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Keyed integrity checksum: MD5 over the concatenation of all field values
/// in insertion order, followed by the shared encryption key, hex-encoded.
/// The gateway recomputes this byte for byte; a mismatch is a configuration
/// error, not a transient fault.
pub fn checksum<'a, I>(values: I, encryption_key: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut concatenated: String = values.into_iter().collect();
    concatenated.push_str(encryption_key);
    format!("{:x}", md5::compute(concatenated.as_bytes()))
}

/// Order total expressed as an integer count of cents: rounded to two
/// decimal places (banker's rounding), then multiplied by 100.
pub fn amount_cents(total: Decimal) -> DomainResult<String> {
    if total.is_sign_negative() {
        return Err(DomainError::InvalidAmount(format!(
            "Order total must not be negative: {}",
            total
        )));
    }

    let cents = (total.round_dp(2) * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| {
            DomainError::InvalidAmount(format!("Order total out of range: {}", total))
        })?;

    Ok(cents.to_string())
}

fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
