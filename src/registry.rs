// Copyright 2026 Oidreg Authors
// See LICENSE.txt file for terms

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::mechanism::CapFlags;
use crate::oid::{is_well_formed, Engine, OidEntry};

/// A cheap, clonable handle to a live registry entry
///
/// Handles stay usable as long as the issuing [OidRegistry] is alive
/// and still holds the entry; [OidRegistry::validate_handle] and
/// [OidRegistry::check] tell a stale or foreign handle apart from a
/// live one.
#[derive(Clone, Debug)]
pub struct OidRef(Arc<OidEntry>);

impl Deref for OidRef {
    type Target = OidEntry;

    fn deref(&self) -> &OidEntry {
        self.0.as_ref()
    }
}

/// The process catalog of mechanism identifiers
///
/// Populated once during a single-threaded setup phase via
/// [OidRegistry::register], then queried read-only; the `&mut self` /
/// `&self` split on the methods makes that phase discipline
/// structural. A populated registry is `Send + Sync` and safe for
/// unbounded concurrent lookups.
///
/// Lookups by name and identifier are indexed; engine iteration
/// always follows registration order.
#[derive(Debug)]
pub struct OidRegistry {
    entries: Vec<Arc<OidEntry>>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl OidRegistry {
    /// Creates an empty registry
    pub fn new() -> OidRegistry {
        OidRegistry {
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Adds a fully formed entry to the store
    ///
    /// Fails with `DuplicateIdentifier` or `DuplicateName` when the
    /// identifier or any alias collides with an already registered
    /// entry. All checks run before any mutation, so a failed
    /// registration leaves the store unchanged. On success the entry
    /// is immutable and a handle to it is returned.
    pub fn register(&mut self, entry: OidEntry) -> Result<OidRef> {
        if self.by_id.contains_key(entry.id()) {
            #[cfg(feature = "log")]
            log::debug!("rejected duplicate identifier {}", entry.id());
            return Err(Error::duplicate_id(entry.id()));
        }
        for name in entry.names() {
            if self.by_name.contains_key(name) {
                #[cfg(feature = "log")]
                log::debug!("rejected duplicate name {:?}", name);
                return Err(Error::duplicate_name(name));
            }
        }

        let idx = self.entries.len();
        let entry = Arc::new(entry);
        self.by_id.insert(String::from(entry.id()), idx);
        for name in entry.names() {
            self.by_name.insert(name.clone(), idx);
        }
        self.entries.push(Arc::clone(&entry));
        #[cfg(feature = "log")]
        log::trace!("registered {:?} as {}", entry.name(), entry.id());
        Ok(OidRef(entry))
    }

    /// The number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A lazy, restartable iterator over all entries in registration
    /// order
    pub fn entries(&self) -> impl Iterator<Item = OidRef> + '_ {
        self.entries.iter().map(|e| OidRef(Arc::clone(e)))
    }

    /// True when the handle denotes an entry live in this store
    pub fn validate_handle(&self, handle: &OidRef) -> bool {
        match self.by_id.get(handle.id()) {
            Some(&idx) => Arc::ptr_eq(&self.entries[idx], &handle.0),
            None => false,
        }
    }

    /// Finds the entry carrying `name` among its aliases
    ///
    /// The match is exact and case-sensitive; by the store's
    /// uniqueness invariant at most one entry can match.
    pub fn find_by_name(&self, name: &str) -> Result<OidRef> {
        match self.by_name.get(name) {
            Some(&idx) => Ok(OidRef(Arc::clone(&self.entries[idx]))),
            None => Err(Error::not_found(name)),
        }
    }

    /// Finds the entry registered under the identifier `id`
    ///
    /// The input is validated against the dotted-decimal grammar
    /// first; a syntax violation reports `MalformedIdentifier`, which
    /// is distinct from `NotFound` for a well-formed but absent
    /// identifier.
    pub fn find_by_id(&self, id: &str) -> Result<OidRef> {
        if !is_well_formed(id) {
            return Err(Error::malformed(id));
        }
        match self.by_id.get(id) {
            Some(&idx) => Ok(OidRef(Arc::clone(&self.entries[idx]))),
            None => Err(Error::not_found(id)),
        }
    }

    /// Finds an entry by identifier or name, whichever matches
    ///
    /// When the token is well-formed dotted-decimal an identifier
    /// match wins; otherwise, and on an identifier miss, the token is
    /// looked up as a name. A token that merely looks numeric-dotted
    /// but is malformed is treated as an ordinary name rather than a
    /// syntax error, since names may legitimately contain dots.
    pub fn find_by_name_or_id(&self, token: &str) -> Result<OidRef> {
        if is_well_formed(token) {
            if let Ok(entry) = self.find_by_id(token) {
                return Ok(entry);
            }
        }
        self.find_by_name(token)
    }

    /// Finds the first entry of the given engine category, in
    /// registration order
    ///
    /// Establishes the stable starting point for engine iteration;
    /// continue with [OidRegistry::find_next_by_engine].
    pub fn find_by_engine(&self, engine: Engine) -> Result<OidRef> {
        for entry in &self.entries {
            if entry.engine() == engine {
                return Ok(OidRef(Arc::clone(entry)));
            }
        }
        Err(Error::not_found(&format!("{:?}", engine)))
    }

    /// Finds the next entry after `current` with the given engine
    ///
    /// `current` must be a handle previously returned by
    /// [OidRegistry::find_by_engine] or this function and still live
    /// in this store, else the call fails with `InvalidHandle`.
    /// `NotFound` is the terminal state of the iteration; restarting
    /// requires a fresh [OidRegistry::find_by_engine].
    pub fn find_next_by_engine(
        &self,
        current: &OidRef,
        engine: Engine,
    ) -> Result<OidRef> {
        let idx = match self.by_id.get(current.id()) {
            Some(&i) if Arc::ptr_eq(&self.entries[i], &current.0) => i,
            _ => return Err(Error::invalid_handle()),
        };
        for entry in &self.entries[idx + 1..] {
            if entry.engine() == engine {
                return Ok(OidRef(Arc::clone(entry)));
            }
        }
        Err(Error::not_found(&format!("{:?}", engine)))
    }

    /// Defensive validation of a caller-held handle
    ///
    /// True when the handle is live in this store and the entry is
    /// structurally sound: non-empty alias list, well-formed
    /// identifier, and a dispatch descriptor declaring at least the
    /// mandatory `Create` and `Destroy` slots.
    pub fn check(&self, handle: &OidRef) -> bool {
        if !self.validate_handle(handle) {
            return false;
        }
        if handle.names().is_empty() || !is_well_formed(handle.id()) {
            return false;
        }
        handle
            .func()
            .capabilities()
            .contains(CapFlags::Create | CapFlags::Destroy)
    }
}

impl Default for OidRegistry {
    fn default() -> OidRegistry {
        OidRegistry::new()
    }
}
