// Copyright 2026 Oidreg Authors
// See LICENSE.txt file for terms

use std::error;
use std::fmt;

/// Convenience alias for operations that can fail with [Error]
pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned by every fallible registry operation
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    origin: Option<Box<dyn error::Error + Send + Sync>>,
    errmsg: Option<String>,
}

/// The set of failures the registry can report
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An identifier string violates the dotted-decimal grammar
    MalformedIdentifier,
    /// Registration collided with an already stored identifier
    DuplicateIdentifier,
    /// Registration collided with an already stored name or alias
    DuplicateName,
    /// A well-formed query matched nothing
    NotFound,
    /// A handle does not denote a live entry in this store
    InvalidHandle,
    /// A dispatch capability the mechanism does not provide was invoked
    DispatchSlotAbsent,
    /// Other error, see origin
    Nested,
}

impl Error {
    /// A malformed dotted-decimal identifier
    pub fn malformed(id: &str) -> Error {
        Error {
            kind: ErrorKind::MalformedIdentifier,
            origin: None,
            errmsg: Some(String::from(id)),
        }
    }

    /// An identifier already present in the store
    pub fn duplicate_id(id: &str) -> Error {
        Error {
            kind: ErrorKind::DuplicateIdentifier,
            origin: None,
            errmsg: Some(String::from(id)),
        }
    }

    /// A name or alias already present in the store
    pub fn duplicate_name(name: &str) -> Error {
        Error {
            kind: ErrorKind::DuplicateName,
            origin: None,
            errmsg: Some(String::from(name)),
        }
    }

    /// A query that matched no entry
    pub fn not_found(what: &str) -> Error {
        Error {
            kind: ErrorKind::NotFound,
            origin: None,
            errmsg: Some(String::from(what)),
        }
    }

    /// A stale or foreign entry handle
    pub fn invalid_handle() -> Error {
        Error {
            kind: ErrorKind::InvalidHandle,
            origin: None,
            errmsg: None,
        }
    }

    /// An invocation of a dispatch slot the mechanism left absent
    pub fn slot_absent(slot: &str) -> Error {
        Error {
            kind: ErrorKind::DispatchSlotAbsent,
            origin: None,
            errmsg: Some(String::from(slot)),
        }
    }

    /// Wraps any foreign error
    pub fn other_error<E>(error: E) -> Error
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Error {
            kind: ErrorKind::Nested,
            origin: Some(error.into()),
            errmsg: None,
        }
    }

    /// Returns the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// True when the error marks a miss rather than a malfunction
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = self.errmsg.as_deref().unwrap_or("");
        match self.kind {
            ErrorKind::MalformedIdentifier => {
                write!(f, "malformed identifier: {:?}", msg)
            }
            ErrorKind::DuplicateIdentifier => {
                write!(f, "identifier already registered: {}", msg)
            }
            ErrorKind::DuplicateName => {
                write!(f, "name already registered: {:?}", msg)
            }
            ErrorKind::NotFound => write!(f, "not found: {:?}", msg),
            ErrorKind::InvalidHandle => write!(f, "invalid entry handle"),
            ErrorKind::DispatchSlotAbsent => {
                write!(f, "dispatch slot not provided: {}", msg)
            }
            ErrorKind::Nested => match self.origin {
                Some(ref e) => e.fmt(f),
                None => write!(f, "unknown error"),
            },
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.origin
            .as_ref()
            .map(|e| e.as_ref() as &(dyn error::Error + 'static))
    }
}

impl From<asn1::WriteError> for Error {
    fn from(error: asn1::WriteError) -> Error {
        Error::other_error(format!("{:?}", error))
    }
}
