use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The block a bundle targets, relative to the chain head at submission time.
///
/// The head is always fetched fresh by the caller and resolved here. Nothing
/// caches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTarget {
    /// Target the current head.
    #[default]
    Head,
    /// Target the block after the current head.
    Next,
}

impl BlockTarget {
    /// Resolve the target block number given the current head.
    pub const fn resolve(self, head: u64) -> u64 {
        match self {
            Self::Head => head,
            Self::Next => head.saturating_add(1),
        }
    }

    /// The name of the target.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for BlockTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`BlockTarget`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block target {0:?}, expected \"head\" or \"next\"")]
pub struct ParseTargetError(pub String);

impl FromStr for BlockTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "head" | "latest" => Ok(Self::Head),
            "next" => Ok(Self::Next),
            _ => Err(ParseTargetError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolves() {
        assert_eq!(BlockTarget::Head.resolve(100), 100);
        assert_eq!(BlockTarget::Next.resolve(100), 101);
        assert_eq!(BlockTarget::Next.resolve(u64::MAX), u64::MAX);
    }

    #[test]
    fn parses() {
        assert_eq!("head".parse::<BlockTarget>().unwrap(), BlockTarget::Head);
        assert_eq!("NEXT".parse::<BlockTarget>().unwrap(), BlockTarget::Next);
        assert!("tomorrow".parse::<BlockTarget>().is_err());
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&BlockTarget::Next).unwrap(), r#""next""#);
    }
}
