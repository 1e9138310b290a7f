use std::fmt;
use std::path::{Component, Path};

/// Validated folder name, relative to the storage root.
///
/// Caller-supplied folders are confined to the storage root: absolute
/// paths, `..` and `.` segments are rejected instead of being joined
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderName(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FolderError {
    #[error("folder name contains a NUL byte")]
    Nul,
    #[error("folder '{0}' escapes the storage root")]
    Escapes(String),
}

impl FolderName {
    /// Picks the caller override when it is present and non-blank, the
    /// default folder otherwise.
    pub fn resolve(requested: Option<&str>, default: &str) -> Result<Self, FolderError> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => Self::parse(name),
            None => Self::parse(default),
        }
    }

    pub fn parse(name: &str) -> Result<Self, FolderError> {
        if name.contains('\0') {
            return Err(FolderError::Nul);
        }

        let normalized = name.replace('\\', "/");
        let mut parts = Vec::new();
        for component in Path::new(&normalized).components() {
            match component {
                Component::Normal(part) => match part.to_str() {
                    Some(part) => parts.push(part.to_string()),
                    None => return Err(FolderError::Escapes(name.to_string())),
                },
                _ => {
                    tracing::warn!("Rejected folder outside storage root: {}", name);
                    return Err(FolderError::Escapes(name.to_string()));
                }
            }
        }

        if parts.is_empty() {
            return Err(FolderError::Escapes(name.to_string()));
        }

        Ok(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for FolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_override_uses_default() {
        assert_eq!(FolderName::resolve(None, "uploads").unwrap().as_str(), "uploads");
        assert_eq!(FolderName::resolve(Some(""), "uploads").unwrap().as_str(), "uploads");
        assert_eq!(FolderName::resolve(Some("   "), "uploads").unwrap().as_str(), "uploads");
    }

    #[test]
    fn test_override_wins() {
        let folder = FolderName::resolve(Some("alice"), "uploads").unwrap();
        assert_eq!(folder.as_str(), "alice");
    }

    #[test]
    fn test_nested_folder_allowed() {
        let folder = FolderName::parse("team/alice").unwrap();
        assert_eq!(folder.as_str(), "team/alice");
        let folder = FolderName::parse("team\\bob").unwrap();
        assert_eq!(folder.as_str(), "team/bob");
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(matches!(
            FolderName::parse("../etc"),
            Err(FolderError::Escapes(_))
        ));
        assert!(FolderName::parse("a/../../b").is_err());
        assert!(FolderName::parse("/tmp").is_err());
        assert!(FolderName::parse("./uploads").is_err());
        assert!(FolderName::parse(".").is_err());
        assert_eq!(FolderName::parse("bad\0name"), Err(FolderError::Nul));
    }
}
