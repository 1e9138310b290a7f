use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Identifier assigned to an upload at storage time.
///
/// Tokens are random v4 UUIDs, so uniqueness holds across restarts without
/// any persisted counter or lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileToken(Uuid);

impl FileToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the textual form used in URLs and filenames.
    ///
    /// Only the lowercase hyphenated form produced by `Display` is accepted,
    /// so each stored file is reachable under exactly one token string.
    pub fn parse(value: &str) -> Option<Self> {
        let uuid = Uuid::try_parse(value).ok()?;
        let mut buf = Uuid::encode_buffer();
        (&*uuid.hyphenated().encode_lower(&mut buf) == value).then_some(Self(uuid))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for FileToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Error)]
#[error("'{0}' is not a file token")]
pub struct InvalidToken(String);

impl FromStr for FileToken {
    type Err = InvalidToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidToken(s.to_string()))
    }
}
