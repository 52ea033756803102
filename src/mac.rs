// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! The generic, pluggable MAC interface: the dispatch traits every MAC
//! implementation provides ([MacAlgorithm], [MacCtx]) and the registry a
//! provider context serves lookups from ([Macs]).

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use bitflags::bitflags;
use constant_time_eq::constant_time_eq;

use crate::error::{ErrorKind, Result};
use crate::params::{ParamDescr, Params};
use crate::ProviderContext;

bitflags! {
    /// Capability flags a MAC algorithm advertises
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct MacFlags: u32 {
        /// The algorithm binds a block cipher
        const CIPHER = 0x01;
        /// The algorithm binds a digest
        const DIGEST = 0x02;
    }
}

/// A registered MAC algorithm, the factory side of the dispatch surface
pub trait MacAlgorithm: Debug + Send + Sync {
    fn flags(&self) -> MacFlags;

    /// Allocates a fresh operation context bound to the provider
    fn new_ctx(
        &self,
        provctx: &Arc<ProviderContext>,
    ) -> Result<Box<dyn MacCtx>>;

    /// The parameters contexts of this algorithm accept before
    /// initialization, advertised statically for introspection
    fn settable_ctx_params(&self) -> &'static [ParamDescr];

    /// The parameters contexts of this algorithm can report
    fn gettable_ctx_params(&self) -> &'static [ParamDescr];
}

/// A live MAC operation context, the per-computation side of the
/// dispatch surface. Contexts are single threaded; duplication yields a
/// fully independent context. Release is Drop.
pub trait MacCtx: Debug + Send {
    /// Commits the staged configuration; with nothing staged this
    /// restarts the previous binding for a fresh computation
    fn init(&mut self) -> Result<()>;

    /// Absorbs message bytes, cumulatively
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Computes the tag into `output` and returns the bytes written
    fn finalize(&mut self, output: &mut [u8]) -> Result<usize>;

    /// Processes recognized parameters in order, see the algorithm's
    /// settable set
    fn set_ctx_params(&mut self, params: &Params) -> Result<()>;

    /// Fills in the request parameters it recognizes, ignores the rest
    fn get_ctx_params(&self, params: &mut Params) -> Result<()>;

    /// Deep copy producing an independent context
    fn dup_ctx(&self) -> Result<Box<dyn MacCtx>>;
}

/// Registry mapping MAC names to their algorithm implementations
#[derive(Debug)]
pub struct Macs {
    tree: BTreeMap<&'static str, Box<dyn MacAlgorithm>>,
}

impl Macs {
    pub fn new() -> Macs {
        Macs {
            tree: BTreeMap::new(),
        }
    }

    pub fn add_mac(&mut self, name: &'static str, mac: Box<dyn MacAlgorithm>) {
        self.tree.insert(name, mac);
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn list(&self) -> Vec<&'static str> {
        self.tree.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Result<&Box<dyn MacAlgorithm>> {
        match self.tree.get(name) {
            Some(m) => Ok(m),
            None => Err(ErrorKind::Resolution)?,
        }
    }
}

/// Finalizes `ctx` and compares the tag against `expected` in constant
/// time. The expected tag must carry the algorithm's full output length.
pub fn verify_final(ctx: &mut dyn MacCtx, expected: &[u8]) -> Result<bool> {
    let mut computed = vec![0u8; expected.len()];
    let written = ctx.finalize(computed.as_mut_slice())?;
    if written != expected.len() {
        return Ok(false);
    }
    Ok(constant_time_eq(&computed, expected))
}
