//! Snapshot block reference.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// The block a proposal's snapshot was taken at.
///
/// Deserializes from a block number, a decimal string or the string `"latest"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockRef {
    Number(u64),
    Latest,
}

impl BlockRef {
    /// Encode as a JSON-RPC block parameter (`0x`-prefixed hex or `latest`).
    pub fn to_rpc_param(&self) -> String {
        match self {
            Self::Number(n) => format!("{n:#x}"),
            Self::Latest => "latest".to_string(),
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Latest => write!(f, "latest"),
        }
    }
}

impl FromStr for BlockRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "latest" {
            return Ok(Self::Latest);
        }
        s.parse::<u64>()
            .map(Self::Number)
            .map_err(|_| TypeError::InvalidBlockRef(s.to_string()))
    }
}

impl Serialize for BlockRef {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => s.serialize_u64(*n),
            Self::Latest => s.serialize_str("latest"),
        }
    }
}

struct BlockRefVisitor;

impl Visitor<'_> for BlockRefVisitor {
    type Value = BlockRef;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a block number or \"latest\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BlockRef, E> {
        Ok(BlockRef::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BlockRef, E> {
        u64::try_from(v)
            .map(BlockRef::Number)
            .map_err(|_| E::custom(format!("negative block number {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BlockRef, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for BlockRef {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(BlockRefVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_param_is_hex() {
        assert_eq!(BlockRef::Number(255).to_rpc_param(), "0xff");
        assert_eq!(BlockRef::Number(0).to_rpc_param(), "0x0");
        assert_eq!(BlockRef::Latest.to_rpc_param(), "latest");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("17000000".parse::<BlockRef>(), Ok(BlockRef::Number(17_000_000)));
        assert_eq!("latest".parse::<BlockRef>(), Ok(BlockRef::Latest));
        assert!("pending".parse::<BlockRef>().is_err());
    }

    #[test]
    fn test_deserialize_number_and_latest() {
        let n: BlockRef = serde_json::from_str("42").unwrap();
        assert_eq!(n, BlockRef::Number(42));
        let l: BlockRef = serde_json::from_str(r#""latest""#).unwrap();
        assert_eq!(l, BlockRef::Latest);
        let s: BlockRef = serde_json::from_str(r#""1234""#).unwrap();
        assert_eq!(s, BlockRef::Number(1234));
        assert!(serde_json::from_str::<BlockRef>(r#""earliest""#).is_err());
        assert!(serde_json::from_str::<BlockRef>("-1").is_err());
    }
}
