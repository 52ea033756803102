// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Block cipher abstractions and the two resolution paths the MAC
//! adapters use to bind an implementation at runtime: the provider
//! fetch registry (name plus property query) and the legacy by-name
//! fallback registry.

use std::fmt::Debug;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::{ErrorKind, Result};
use crate::native;

/// A keyed block cipher operation.
///
/// This is the primitive the MAC accumulators drive; one instance holds
/// the expanded key schedule of exactly one key.
pub trait BlockCipherOp: Debug + Send {
    fn block_size(&self) -> usize;
    /// Encrypts one block in place, `block` must be exactly one block long
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;
    /// Deep copy, used when an accumulator is duplicated
    fn dup(&self) -> Box<dyn BlockCipherOp>;
}

/// Descriptor of one named block cipher implementation.
///
/// All fields are static data plus a constructor, so the descriptor is
/// cheap to clone; registries hand out shared or borrowed references and
/// accumulators keep their own copy once bound.
#[derive(Clone, Debug)]
pub struct CipherImplementation {
    name: &'static str,
    aliases: &'static [&'static str],
    block_size: usize,
    key_size: usize,
    properties: &'static [(&'static str, &'static str)],
    new_op: fn(key: &[u8]) -> Result<Box<dyn BlockCipherOp>>,
}

impl CipherImplementation {
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        block_size: usize,
        key_size: usize,
        properties: &'static [(&'static str, &'static str)],
        new_op: fn(key: &[u8]) -> Result<Box<dyn BlockCipherOp>>,
    ) -> CipherImplementation {
        CipherImplementation {
            name: name,
            aliases: aliases,
            block_size: block_size,
            key_size: key_size,
            properties: properties,
            new_op: new_op,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Cipher names are matched case insensitively, on the canonical
    /// name or any registered alias
    pub fn matches_name(&self, name: &str) -> bool {
        if self.name.eq_ignore_ascii_case(name) {
            return true;
        }
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Property queries are comma separated `key=value` terms; an
    /// implementation matches when every term matches one of its
    /// advertised properties. The empty query matches everything.
    pub fn matches_properties(&self, query: &str) -> bool {
        for term in query.split(',') {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }
            let (key, val) = match term.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => return false,
            };
            if !self
                .properties
                .iter()
                .any(|(k, v)| *k == key && v.eq_ignore_ascii_case(val))
            {
                return false;
            }
        }
        true
    }

    /// Instantiates a keyed operation, checking the key length
    pub fn new_op(&self, key: &[u8]) -> Result<Box<dyn BlockCipherOp>> {
        if key.len() != self.key_size {
            return Err(ErrorKind::Initialization)?;
        }
        (self.new_op)(key)
    }
}

/// The provider fetch registry, filled at provider construction
#[derive(Debug)]
pub struct CipherRegistry {
    list: Vec<Arc<CipherImplementation>>,
}

impl CipherRegistry {
    pub fn new() -> CipherRegistry {
        CipherRegistry { list: Vec::new() }
    }

    pub fn register(&mut self, cipher: CipherImplementation) {
        self.list.push(Arc::new(cipher));
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Resolves a cipher by name and optional property query and returns
    /// a shared (owned) reference to it
    pub fn fetch(
        &self,
        name: &str,
        propquery: Option<&str>,
    ) -> Result<Arc<CipherImplementation>> {
        for c in &self.list {
            if !c.matches_name(name) {
                continue;
            }
            match propquery {
                Some(q) => {
                    if !c.matches_properties(q) {
                        continue;
                    }
                }
                None => (),
            }
            log::debug!("Fetched cipher {} for \"{}\"", c.name(), name);
            return Ok(c.clone());
        }
        log::debug!(
            "No cipher matches \"{}\" (properties: {:?})",
            name,
            propquery
        );
        Err(ErrorKind::UnknownCipher)?
    }
}

/// The legacy by-name registry, a static table that predates property
/// based resolution. References handed out are borrowed for the life of
/// the process and must never be released.
#[derive(Debug)]
pub struct LegacyCiphers {
    list: Vec<CipherImplementation>,
}

impl LegacyCiphers {
    pub fn new() -> LegacyCiphers {
        LegacyCiphers { list: Vec::new() }
    }

    pub fn register(&mut self, cipher: CipherImplementation) {
        self.list.push(cipher);
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Name only lookup, property queries do not apply to this path
    pub fn by_name(&self, name: &str) -> Option<&CipherImplementation> {
        self.list.iter().find(|c| c.matches_name(name))
    }
}

static LEGACY_CIPHERS: Lazy<LegacyCiphers> = Lazy::new(|| {
    let mut legacy = LegacyCiphers::new();
    native::aes::register_legacy(&mut legacy);
    legacy
});

/// Returns the process wide legacy cipher table.
///
/// The provider context injects this into contexts that are allowed to
/// use the fallback path; tests and constrained configurations disable
/// it wholesale instead of stubbing lookups.
pub fn legacy_ciphers() -> &'static LegacyCiphers {
    &LEGACY_CIPHERS
}
