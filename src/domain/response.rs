use std::collections::HashMap;

/// Error tokens the gateway is known to reply with, in match priority order
const KNOWN_ERROR_TOKENS: [&str; 4] = ["PGID_NOT_EN", "DATA_CUR", "DATA_PW", "DATA_CHK"];

/// A gateway rejection recognized by its error token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayError {
    /// PGID_NOT_EN
    NotEnabled,
    /// DATA_CUR
    UnsupportedCurrency,
    /// DATA_PW
    MissingMandatoryFields,
    /// DATA_CHK, and the fallback for any other recognized rejection
    ChecksumMismatch,
}

impl GatewayError {
    /// The fixed diagnostic for this rejection
    pub fn message(&self) -> &'static str {
        match self {
            GatewayError::NotEnabled => {
                "The PayGate ID being used to post data to PayGate has not yet been enabled, \
                 or there are no payment methods setup on it."
            }
            GatewayError::UnsupportedCurrency => {
                "The currency that has been posted to PayGate is not supported."
            }
            GatewayError::MissingMandatoryFields => {
                "Mandatory fields have been excluded from the post to PayGate, refer to page 9 \
                 of the documentation as to what fields should be posted."
            }
            GatewayError::ChecksumMismatch => {
                "Checksum posted does not match the one calculated by PayGate, either due to an \
                 incorrect encryption key used or a field that has been excluded from the \
                 checksum calculation"
            }
        }
    }
}

/// Classification of a raw initiate response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitiateOutcome {
    /// The response carries one of the known error tokens
    KnownError(GatewayError),
    /// The response carries the two values needed for the process redirect
    Redirectable {
        pay_request_id: String,
        checksum: String,
    },
    /// Neither a known error nor a usable key set
    Indeterminate,
}

/// Parse the gateway's `key=value&key=value` reply. Values are
/// percent-decoded; a key without `=` maps to `None`.
pub fn parse_gateway_response(raw: &str) -> HashMap<String, Option<String>> {
    raw.split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (
                key.to_string(),
                Some(
                    urlencoding::decode(value)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| value.to_string()),
                ),
            ),
            None => (pair.to_string(), None),
        })
        .collect()
}

/// Classify a raw initiate response. Error tokens are matched as substrings
/// of the raw text, in a fixed priority order; only then is the response
/// parsed for the redirect keys.
pub fn classify(raw: &str) -> InitiateOutcome {
    if KNOWN_ERROR_TOKENS.iter().any(|token| raw.contains(token)) {
        let error = if raw.contains("PGID_NOT_EN") {
            GatewayError::NotEnabled
        } else if raw.contains("DATA_CUR") {
            GatewayError::UnsupportedCurrency
        } else if raw.contains("DATA_PW") {
            GatewayError::MissingMandatoryFields
        } else {
            GatewayError::ChecksumMismatch
        };
        return InitiateOutcome::KnownError(error);
    }

    let pairs = parse_gateway_response(raw);
    let pay_request_id = pairs.get("PAY_REQUEST_ID").and_then(|v| v.clone());
    let checksum = pairs.get("CHECKSUM").and_then(|v| v.clone());

    match (pay_request_id, checksum) {
        (Some(pay_request_id), Some(checksum)) => InitiateOutcome::Redirectable {
            pay_request_id,
            checksum,
        },
        _ => InitiateOutcome::Indeterminate,
    }
}
