/// Wire types for the intent solver contract
use serde::{Deserialize, Deserializer, Serialize};

use crate::chains::{is_hex_address, is_hex_bytes};

/// Request body for POST /solve_intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRequest {
    pub raw_text: String,
    /// Caller address; the zero address for quote-only requests
    pub user_address: String,
}

/// Custom deserializer for wei amounts that may arrive as number or string
///
/// Amounts in the smallest token unit can exceed u64 for 18-decimal tokens,
/// in which case solvers send them as decimal strings.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = u128;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer amount (number or decimal string)")
        }

        fn visit_u64<E>(self, value: u64) -> Result<u128, E>
        where
            E: de::Error,
        {
            Ok(value as u128)
        }

        fn visit_u128<E>(self, value: u128) -> Result<u128, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<u128, E>
        where
            E: de::Error,
        {
            u128::try_from(value)
                .map_err(|_| E::custom(format!("negative amount: {}", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<u128, E>
        where
            E: de::Error,
        {
            value
                .parse::<u128>()
                .map_err(|_| E::custom(format!("invalid amount string: {}", value)))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// A solver-produced, executable swap plan
///
/// Immutable once received: read and forwarded verbatim to the signing step,
/// never recomputed client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRoute {
    #[serde(rename = "token_in_address")]
    pub token_in: String,
    #[serde(rename = "token_out_address")]
    pub token_out: String,
    #[serde(rename = "amount_in_wei", deserialize_with = "deserialize_amount")]
    pub amount_in: u128,
    #[serde(rename = "min_amount_out_wei", deserialize_with = "deserialize_amount")]
    pub min_amount_out: u128,
    #[serde(rename = "router_address")]
    pub router: String,
    /// Exact payload for the router call, opaque to the client
    pub calldata: String,
    /// Informational gas estimate
    pub estimated_gas: u64,
    /// Pool fee tier; older solver versions omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_tier: Option<u32>,
}

impl SwapRoute {
    /// Structural validation of the wire encoding
    ///
    /// Addresses must be 20-byte hex, calldata a whole-byte hex string.
    /// Content is never interpreted.
    pub fn validate(&self) -> Result<(), String> {
        if !is_hex_address(&self.token_in) {
            return Err(format!("token_in_address is not an address: {}", self.token_in));
        }
        if !is_hex_address(&self.token_out) {
            return Err(format!(
                "token_out_address is not an address: {}",
                self.token_out
            ));
        }
        if !is_hex_address(&self.router) {
            return Err(format!("router_address is not an address: {}", self.router));
        }
        if !is_hex_bytes(&self.calldata) {
            return Err("calldata is not a hex byte string".to_string());
        }
        Ok(())
    }
}
