// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! CMAC bound to the generic MAC interface. This adapter owns the
//! parameter negotiation that picks a block cipher implementation at
//! runtime (provider fetch first, legacy by-name fallback second), the
//! staging of that choice until initialization commits it into the
//! accumulator, and context duplication.

use std::sync::{Arc, Weak};

use crate::cipher::CipherImplementation;
use crate::engine::Engine;
use crate::error::{ErrorKind, Result};
use crate::mac::{MacAlgorithm, MacCtx, MacFlags, Macs};
use crate::native::cmac::CmacState;
use crate::params::{
    ParamDescr, ParamType, Params, MAC_PARAM_CIPHER, MAC_PARAM_ENGINE,
    MAC_PARAM_KEY, MAC_PARAM_PROPERTIES, MAC_PARAM_SIZE,
};
use crate::ProviderContext;
use crate::{err_kind, map_err};

pub const MAC_NAME_CMAC: &str = "CMAC";

/// A staged cipher resolution and its provenance.
///
/// Fetched references are owned, shared with whatever the registry and
/// other contexts hold, and released at last drop; legacy references are
/// borrowed from the static fallback table and never released. Release
/// logic is exhaustive over the variants by construction.
#[derive(Clone, Debug)]
pub enum CachedCipher {
    Fetched(Arc<CipherImplementation>),
    Legacy(&'static CipherImplementation),
    Empty,
}

impl CachedCipher {
    /// Clears the staging slot and hands the previous content out
    pub fn take(&mut self) -> CachedCipher {
        std::mem::replace(self, CachedCipher::Empty)
    }

    pub fn get(&self) -> Option<&CipherImplementation> {
        match self {
            CachedCipher::Fetched(c) => Some(c),
            CachedCipher::Legacy(c) => Some(c),
            CachedCipher::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CachedCipher::Empty => true,
            _ => false,
        }
    }
}

/// A CMAC operation context.
///
/// The cipher and engine fields are single-use staging slots filled by
/// parameter negotiation and consumed (successfully or not) by the next
/// initialization; durable binding state lives in the accumulator.
#[derive(Debug)]
pub struct CmacOperation {
    provctx: Weak<ProviderContext>,
    state: CmacState,
    cipher: CachedCipher,
    engine: Option<Arc<Engine>>,
}

impl CmacOperation {
    pub fn new(provctx: &Arc<ProviderContext>) -> Result<CmacOperation> {
        Ok(CmacOperation {
            provctx: Arc::downgrade(provctx),
            state: CmacState::new()?,
            cipher: CachedCipher::Empty,
            engine: None,
        })
    }

    /// Deep copies the accumulator and shares any owned cipher
    /// reference; the copy is fully independent from this context
    pub fn dup(&self) -> Result<CmacOperation> {
        Ok(CmacOperation {
            provctx: self.provctx.clone(),
            state: map_err!(self.state.copy(), Copy)?,
            cipher: self.cipher.clone(),
            engine: self.engine.clone(),
        })
    }

    /* the provider handle is a weak back-reference, only used to reach
     * the registries during parameter negotiation */
    fn provider(&self) -> Result<Arc<ProviderContext>> {
        match self.provctx.upgrade() {
            Some(p) => Ok(p),
            None => err_kind!(General; "provider context is gone".to_string()),
        }
    }

    fn resolve_cipher(
        &mut self,
        name: &str,
        propquery: Option<&str>,
    ) -> Result<()> {
        /* destructive on failure: the prior staging is gone either way,
         * matching the configure-before-init contract */
        self.cipher = CachedCipher::Empty;

        let provctx = self.provider()?;
        let query = match propquery {
            Some(q) => Some(q),
            None => provctx.config().default_properties.as_deref(),
        };
        self.cipher = match provctx.ciphers().fetch(name, query) {
            Ok(c) => CachedCipher::Fetched(c),
            Err(_) => match provctx.legacy_ciphers() {
                Some(legacy) => match legacy.by_name(name) {
                    Some(c) => {
                        log::debug!(
                            "Cipher \"{}\" resolved via legacy table",
                            name
                        );
                        CachedCipher::Legacy(c)
                    }
                    None => {
                        return err_kind!(
                            UnknownCipher;
                            format!("no cipher matches \"{}\"", name)
                        )
                    }
                },
                None => {
                    return err_kind!(
                        UnknownCipher;
                        format!("no cipher matches \"{}\"", name)
                    )
                }
            },
        };
        Ok(())
    }
}

impl MacCtx for CmacOperation {
    fn init(&mut self) -> Result<()> {
        /* staging is consumed whatever the outcome */
        let cipher = self.cipher.take();
        let engine = self.engine.take();
        self.state.init(None, cipher.get(), engine)
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.state.update(data)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize> {
        let size = self.state.block_size();
        if size == 0 {
            return Err(ErrorKind::Initialization)?;
        }
        if output.len() < size {
            return Err(ErrorKind::BufferTooSmall)?;
        }
        self.state.finalize(&mut output[..size])?;
        Ok(size)
    }

    /*
     * ALL parameters should be set before init().
     */
    fn set_ctx_params(&mut self, params: &Params) -> Result<()> {
        if let Some(p) = params.locate(MAC_PARAM_CIPHER) {
            let name = p.as_utf8_string()?;

            /* a new cipher selection invalidates any staged engine */
            self.engine = None;
            if let Some(p) = params.locate(MAC_PARAM_ENGINE) {
                let eid = p.as_utf8_string()?;
                self.engine = Some(self.provider()?.engines().by_id(eid)?);
            }

            let propquery = match params.locate(MAC_PARAM_PROPERTIES) {
                Some(p) => Some(p.as_utf8_string()?),
                None => None,
            };

            self.resolve_cipher(name, propquery)?;
        }
        if let Some(p) = params.locate(MAC_PARAM_KEY) {
            let key = p.as_octet_string()?;

            /* keying commits the staged binding immediately; the staging
             * slots are consumed even when initialization fails so no
             * stale selection can be reused later */
            let cipher = self.cipher.take();
            let engine = self.engine.take();
            self.state.init(Some(key), cipher.get(), engine)?;
        }
        Ok(())
    }

    fn get_ctx_params(&self, params: &mut Params) -> Result<()> {
        if let Some(p) = params.locate_mut(MAC_PARAM_SIZE) {
            p.set_ulong(u64::try_from(self.state.block_size())?)?;
        }
        Ok(())
    }

    fn dup_ctx(&self) -> Result<Box<dyn MacCtx>> {
        Ok(Box::new(self.dup()?))
    }
}

static SETTABLE_CTX_PARAMS: [ParamDescr; 4] = [
    ParamDescr::new(MAC_PARAM_CIPHER, ParamType::Utf8String),
    ParamDescr::new(MAC_PARAM_ENGINE, ParamType::Utf8String),
    ParamDescr::new(MAC_PARAM_PROPERTIES, ParamType::Utf8String),
    ParamDescr::new(MAC_PARAM_KEY, ParamType::OctetString),
];

static GETTABLE_CTX_PARAMS: [ParamDescr; 1] =
    [ParamDescr::new(MAC_PARAM_SIZE, ParamType::Ulong)];

#[derive(Debug)]
struct CmacMac;

impl MacAlgorithm for CmacMac {
    fn flags(&self) -> MacFlags {
        MacFlags::CIPHER
    }

    fn new_ctx(
        &self,
        provctx: &Arc<ProviderContext>,
    ) -> Result<Box<dyn MacCtx>> {
        Ok(Box::new(CmacOperation::new(provctx)?))
    }

    fn settable_ctx_params(&self) -> &'static [ParamDescr] {
        &SETTABLE_CTX_PARAMS
    }

    fn gettable_ctx_params(&self) -> &'static [ParamDescr] {
        &GETTABLE_CTX_PARAMS
    }
}

pub fn register(macs: &mut Macs) {
    macs.add_mac(MAC_NAME_CMAC, Box::new(CmacMac {}));
}
