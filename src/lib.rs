// Copyright 2026 Oidreg Authors
// See LICENSE.txt file for terms

#![warn(missing_docs)]

//! This is oidreg
//!
//! An identifier registry for cryptographic mechanisms: it maps
//! human-readable names, dotted-decimal object identifiers and engine
//! categories to entries that both name a mechanism and carry the
//! dispatch interface needed to instantiate, use and destroy it.
//! Mechanism implementations register themselves once, during a
//! single-threaded setup phase; everything else locates them through
//! the registry's lookup surface.

mod error;
mod mechanism;
mod oid;
mod registry;

pub use error::{Error, ErrorKind, Result};
pub use mechanism::{CapFlags, Context, Mechanism};
pub use oid::{is_well_formed, Engine, Mode, OidEntry};
pub use registry::{OidRef, OidRegistry};

/// Optional env-driven tracing setup, see [log::trace_init]
#[cfg(feature = "log")]
pub mod log;

#[cfg(test)]
mod tests;
