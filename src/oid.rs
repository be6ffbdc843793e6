// Copyright 2026 Oidreg Authors
// See LICENSE.txt file for terms

use std::any::Any;
use std::fmt;

use crate::error::{Error, Result};
use crate::mechanism::Mechanism;

/// The category of cryptographic mechanism an entry identifies
///
/// Closed enumeration; extending it is a source change, never a
/// runtime operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Engine {
    /// Block cipher algorithms
    BlockCipher,
    /// Stream cipher algorithms
    StreamCipher,
    /// Unkeyed hash functions
    HashFunction,
    /// Keyed hash functions (HMAC)
    Hmac,
    /// Other message authentication codes
    Mac,
    /// Signature generation
    SignFunction,
    /// Signature verification
    VerifyFunction,
    /// Random and pseudo-random generators
    RandomGenerator,
    /// Secret key containers
    SecretKey,
}

/// How the identified object is used
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// A cryptographic algorithm proper
    Algorithm,
    /// A static parameter set
    Parameter,
    /// Elliptic curve domain parameters
    CurveParameters,
    /// A key-wrapping mode
    KeyWrap,
}

/// Checks an identifier against the dotted-decimal grammar
///
/// Well-formed means one or more decimal segments separated by single
/// dots, with no leading or trailing dot and no empty segment. The
/// grammar is purely syntactic; whether the identifier is registered,
/// or even DER-encodable, is a separate question.
pub fn is_well_formed(id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    id.split('.')
        .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()))
}

/* The stored octets are the full DER TLV so consumers can splice them
 * into encoded structures without re-encoding. */
fn derive_asn1(id: &str) -> Result<Vec<u8>> {
    let oid = match asn1::ObjectIdentifier::from_string(id) {
        Some(o) => o,
        None => return Err(Error::malformed(id)),
    };
    Ok(asn1::write_single(&oid)?)
}

/// One row of the registry: identifiers plus the dispatch interface
/// of a single cryptographic mechanism or parameter set
///
/// Entries are immutable once constructed; the registry adds the
/// uniqueness guarantees at registration time.
pub struct OidEntry {
    engine: Engine,
    mode: Mode,
    names: Vec<String>,
    id: String,
    asn1: Vec<u8>,
    data: Option<&'static (dyn Any + Send + Sync)>,
    func: Box<dyn Mechanism>,
}

impl OidEntry {
    /// Builds a validated entry
    ///
    /// `names` is the ordered alias list; the first name is canonical.
    /// `id` must satisfy the dotted-decimal grammar and be encodable
    /// as a DER OBJECT IDENTIFIER; the encoded octets are derived here
    /// and are not independently settable. `data` is borrowed for the
    /// process lifetime and is never freed by the registry.
    pub fn new(
        engine: Engine,
        mode: Mode,
        names: &[&str],
        id: &str,
        data: Option<&'static (dyn Any + Send + Sync)>,
        func: Box<dyn Mechanism>,
    ) -> Result<OidEntry> {
        if names.is_empty() {
            return Err(Error::other_error(
                "an oid entry requires at least one name",
            ));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::duplicate_name(name));
            }
        }
        if !is_well_formed(id) {
            return Err(Error::malformed(id));
        }
        let asn1 = derive_asn1(id)?;
        Ok(OidEntry {
            engine: engine,
            mode: mode,
            names: names.iter().map(|n| String::from(*n)).collect(),
            id: String::from(id),
            asn1: asn1,
            data: data,
            func: func,
        })
    }

    /// The mechanism category
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// The usage qualifier
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The full alias list, canonical name first
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The canonical name
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// The dotted-decimal identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The DER encoding of the identifier, derived at construction
    pub fn asn1(&self) -> &[u8] {
        &self.asn1
    }

    /// Mechanism-specific static parameters, if any
    ///
    /// Ownership stays with whoever registered the entry; the
    /// registry never frees this.
    pub fn data(&self) -> Option<&'static (dyn Any + Send + Sync)> {
        self.data
    }

    /// The mechanism's dispatch interface
    pub fn func(&self) -> &dyn Mechanism {
        self.func.as_ref()
    }
}

impl fmt::Debug for OidEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OidEntry")
            .field("engine", &self.engine)
            .field("mode", &self.mode)
            .field("names", &self.names)
            .field("id", &self.id)
            .field("func", &self.func)
            .finish_non_exhaustive()
    }
}
