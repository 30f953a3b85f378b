//! String entity identifiers in the persisted `id_<base36>` format

use crate::core::error::{MarketResult, ValidationError};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const ID_PREFIX: &str = "id_";
const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Unique identifier for a stored entity.
///
/// The persisted key format is `id_` followed by nine base36 characters,
/// e.g. `id_k3f9x2m1q`. This is the only key format the stores understand,
/// so ids arriving from outside the crate go through [`EntityId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        EntityId::parse(&value).map_err(serde::de::Error::custom)
    }
}

impl EntityId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let mut id = String::with_capacity(ID_PREFIX.len() + ID_SUFFIX_LEN);
        id.push_str(ID_PREFIX);
        for _ in 0..ID_SUFFIX_LEN {
            id.push(BASE36[rng.random_range(0..BASE36.len())] as char);
        }
        Self(id)
    }

    /// Parse and validate an id from untrusted input.
    pub fn parse(value: &str) -> MarketResult<Self> {
        static ID_REGEX: OnceLock<regex::Regex> = OnceLock::new();
        let pattern =
            ID_REGEX.get_or_init(|| regex::Regex::new(r"^id_[0-9a-z]{9}$").expect("valid regex"));

        if pattern.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(ValidationError::InvalidId {
                value: value.to_string(),
            }
            .into())
        }
    }

    /// The id as its persisted string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = crate::core::error::MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
