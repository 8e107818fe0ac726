//! On-chain resource layouts read from Aptos accounts

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::errors::ParseError;

/// One entry of `GET /v1/accounts/{address}/resources`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: serde_json::Value,
}

impl RawResource {
    pub fn new(resource_type: &str, data: serde_json::Value) -> Self {
        Self { resource_type: resource_type.to_string(), data }
    }
}

/// `swap::TokenPairReserve<X, Y>` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenPairReserve {
    #[serde(deserialize_with = "deserialize_u64")]
    pub reserve_x: u64,
    #[serde(deserialize_with = "deserialize_u64")]
    pub reserve_y: u64,
    #[serde(default, deserialize_with = "deserialize_opt_u64")]
    pub block_timestamp_last: Option<u64>,
}

impl TokenPairReserve {
    pub fn from_resource(resource: &RawResource) -> Result<Self, ParseError> {
        Self::deserialize(&resource.data).map_err(|e| ParseError::payload(&resource.resource_type, e))
    }

    /// `block_timestamp_last` (seconds) as a UTC time
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.block_timestamp_last?).ok()?;
        Utc.timestamp_opt(secs, 0).single()
    }
}

/// Move `u64` values come back as JSON strings; plain numbers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum U64Repr {
    Text(String),
    Number(u64),
}

impl U64Repr {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            U64Repr::Number(n) => Ok(n),
            U64Repr::Text(s) => s
                .parse::<u64>()
                .map_err(|e| E::custom(format!("invalid u64 {s:?}: {e}"))),
        }
    }
}

fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    U64Repr::deserialize(deserializer)?.into_u64()
}

fn deserialize_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<U64Repr>::deserialize(deserializer)?
        .map(U64Repr::into_u64)
        .transpose()
}
