use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The byte sequence read from a contactless tag.
///
/// Two identities are equal only when every byte matches and both have the
/// same length. An `Identity` is never mutated after it has been read.
///
/// # Text form
/// Identities are shown the way the reader's serial output prints them:
/// upper-case hex pairs separated by single spaces (`13 A3 50 11`).
/// Parsing accepts that form as well as compact (`13a35011`) or
/// colon-separated (`13:A3:50:11`) input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(Box<[u8]>);

impl Identity {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into().into_boxed_slice())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for Identity {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Identity {
    fn from(bytes: [u8; N]) -> Self {
        Self::new(bytes)
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Errors produced when parsing an [`Identity`] from text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityParseError {
    #[error("Identity is empty")]
    Empty,

    #[error("Invalid identity hex '{input}': {reason}")]
    InvalidHex { input: String, reason: String },
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .collect();
        if compact.is_empty() {
            return Err(IdentityParseError::Empty);
        }
        hex::decode(&compact)
            .map(Identity::new)
            .map_err(|e| IdentityParseError::InvalidHex {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.to_string()
    }
}
