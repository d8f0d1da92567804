//! Error types for form groups.
//!
//! Construction failures, envelope resolution failures and post-dispose use
//! all surface as a `GroupError`. Member-level failures are wrapped once in
//! `GroupError::Member` by the control that raised them and then travel
//! through the group untouched.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for group operations.
#[derive(Error, Debug)]
pub enum GroupError {
    /// A group was constructed with no members.
    #[error("a group needs at least one member")]
    EmptyGroup,

    /// Members of one group report different control kinds.
    #[error("mixed control kinds: expected {expected}, found {found} on {id}")]
    MixedKinds {
        expected: String,
        found: String,
        id: String,
    },

    /// The members are not radio or checkbox controls.
    #[error("unsupported group kind: {kind}")]
    UnsupportedKind { kind: String },

    /// Two members share one identity.
    #[error("duplicate member id: {id}")]
    DuplicateMember { id: String },

    /// An answer referenced a control that is not part of the group.
    #[error("unknown member: {id}")]
    UnknownMember { id: String },

    /// Several exclusive choices were checked and the tie-break rejects that.
    #[error("ambiguous selection: {} checked", .ids.join(", "))]
    AmbiguousSelection { ids: Vec<String> },

    /// The group was used after `dealloc`.
    #[error("used after dispose")]
    Disposed,

    /// A member control failed.
    #[error("member {id} failed: {message}")]
    Member { id: String, message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// I/O errors while reading configuration files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Envelope or configuration (de)serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },
}

/// A specialized Result type for group operations.
pub type Result<T> = std::result::Result<T, GroupError>;

impl GroupError {
    /// Create a mixed kinds error.
    pub fn mixed_kinds(
        expected: impl Into<String>,
        found: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self::MixedKinds {
            expected: expected.into(),
            found: found.into(),
            id: id.into(),
        }
    }

    /// Create an unsupported kind error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    /// Create a duplicate member error.
    pub fn duplicate_member(id: impl Into<String>) -> Self {
        Self::DuplicateMember { id: id.into() }
    }

    /// Create an unknown member error.
    pub fn unknown_member(id: impl Into<String>) -> Self {
        Self::UnknownMember { id: id.into() }
    }

    /// Create an ambiguous selection error.
    pub fn ambiguous_selection<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AmbiguousSelection {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a member error.
    pub fn member(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Member {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Whether the error is a construction precondition failure.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::EmptyGroup
                | Self::MixedKinds { .. }
                | Self::UnsupportedKind { .. }
                | Self::DuplicateMember { .. }
        )
    }
}

impl From<io::Error> for GroupError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for GroupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_display() {
        assert_eq!(
            GroupError::EmptyGroup.to_string(),
            "a group needs at least one member"
        );
    }

    #[test]
    fn test_mixed_kinds_display() {
        let err = GroupError::mixed_kinds("radio", "checkbox", "opt-2");
        assert_eq!(
            err.to_string(),
            "mixed control kinds: expected radio, found checkbox on opt-2"
        );
    }

    #[test]
    fn test_unknown_member_display() {
        let err = GroupError::unknown_member("ghost");
        assert_eq!(err.to_string(), "unknown member: ghost");
    }

    #[test]
    fn test_ambiguous_selection_display() {
        let err = GroupError::ambiguous_selection(["a", "b"]);
        assert_eq!(err.to_string(), "ambiguous selection: a, b checked");
    }

    #[test]
    fn test_member_error_display() {
        let err = GroupError::member("opt-1", "disposed");
        assert_eq!(err.to_string(), "member opt-1 failed: disposed");
    }

    #[test]
    fn test_storage_error_display() {
        let err = GroupError::storage(
            "/tmp/config.toml",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("/tmp/config.toml"));
    }

    #[test]
    fn test_is_construction() {
        assert!(GroupError::EmptyGroup.is_construction());
        assert!(GroupError::duplicate_member("a").is_construction());
        assert!(GroupError::unsupported_kind("text").is_construction());
        assert!(!GroupError::Disposed.is_construction());
        assert!(!GroupError::unknown_member("a").is_construction());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: GroupError = json_err.into();
        assert!(matches!(err, GroupError::Serde { .. }));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: GroupError = io_err.into();
        assert!(matches!(err, GroupError::Storage { .. }));
    }
}
