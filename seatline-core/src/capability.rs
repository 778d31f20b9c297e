use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named permission carried by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Admin,
    Read,
    Write,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Admin => "admin",
            Capability::Read => "read",
            Capability::Write => "write",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(pub String);

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Capability::Admin),
            "read" => Ok(Capability::Read),
            "write" => Ok(Capability::Write),
            other => Err(UnknownCapability(other.to_string())),
        }
    }
}
