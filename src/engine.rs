// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Engine (accelerator) handles and the registry that resolves them by
//! identifier. Engines are optional collaborators: a MAC binding without
//! an engine is always valid, and builds without the `engine` feature
//! keep the registry as a stub that resolves nothing.

use std::sync::Arc;

use crate::cipher::{BlockCipherOp, CipherImplementation};
use crate::error::Result;

#[cfg(not(feature = "engine"))]
use crate::error::ErrorKind;

/// An opaque accelerator handle.
///
/// An engine may take over the keyed block cipher operation for the
/// implementations it accelerates; the built-in engine accelerates
/// nothing and exists so resolution and binding paths stay exercised.
#[derive(Debug)]
pub struct Engine {
    id: &'static str,
    name: &'static str,
}

impl Engine {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the engine's own keyed operation for this cipher, or
    /// None when the engine does not accelerate it and the caller must
    /// fall back to the implementation constructor
    pub fn cipher_op(
        &self,
        _cipher: &CipherImplementation,
        _key: &[u8],
    ) -> Option<Result<Box<dyn BlockCipherOp>>> {
        None
    }
}

/// Registry of the engines available to one provider context
#[derive(Debug)]
pub struct Engines {
    #[cfg_attr(not(feature = "engine"), allow(dead_code))]
    list: Vec<Arc<Engine>>,
}

impl Engines {
    pub fn new() -> Engines {
        Engines { list: Vec::new() }
    }

    #[cfg(feature = "engine")]
    pub fn register(&mut self, engine: Engine) {
        self.list.push(Arc::new(engine));
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Resolves an engine by identifier
    #[cfg(feature = "engine")]
    pub fn by_id(&self, id: &str) -> Result<Arc<Engine>> {
        for e in &self.list {
            if e.id == id {
                return Ok(e.clone());
            }
        }
        log::debug!("No engine with id \"{}\"", id);
        Err(crate::error::ErrorKind::Resolution)?
    }

    /// Engine support is compiled out, every lookup fails
    #[cfg(not(feature = "engine"))]
    pub fn by_id(&self, id: &str) -> Result<Arc<Engine>> {
        log::debug!("Engine support disabled, cannot resolve \"{}\"", id);
        Err(ErrorKind::Resolution)?
    }
}

#[cfg(feature = "engine")]
pub fn register_builtin(engines: &mut Engines) {
    engines.register(Engine {
        id: "builtin",
        name: "Built-in software engine",
    });
}
