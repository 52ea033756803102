// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This is Macprov
//!
//! A pluggable MAC provider framework: MAC algorithms register against a
//! generic dispatch surface and bind their underlying primitives (block
//! ciphers, optionally accelerated by engines) by name at runtime.

use std::sync::Arc;

pub mod cipher;
pub mod cmac;
pub mod config;
pub mod engine;
pub mod error;
pub mod mac;
pub mod params;

mod log;

/* Native Rust primitive implementations */
pub mod native;

use cipher::{CipherRegistry, LegacyCiphers};
use config::Config;
use engine::Engines;
use error::Result;
use mac::{MacCtx, Macs};

/// The library context MAC operations resolve implementations from.
///
/// It owns the cipher fetch registry, the engine registry and the MAC
/// algorithm table, all populated at construction and read-only
/// afterwards, so one context can serve any number of concurrent
/// operations. Operation contexts keep only a weak back-reference.
#[derive(Debug)]
pub struct ProviderContext {
    config: Config,
    ciphers: CipherRegistry,
    engines: Engines,
    macs: Macs,
    legacy: Option<&'static LegacyCiphers>,
}

impl ProviderContext {
    /// Builds a provider from the default configuration (the located
    /// config file, or built-in defaults)
    pub fn new() -> Result<Arc<ProviderContext>> {
        Self::with_config(Config::default_config())
    }

    pub fn with_config(conf: Config) -> Result<Arc<ProviderContext>> {
        log::macprov_log_init();

        let mut ciphers = CipherRegistry::new();
        native::aes::register(&mut ciphers);

        #[cfg_attr(not(feature = "engine"), allow(unused_mut))]
        let mut engines = Engines::new();
        #[cfg(feature = "engine")]
        engine::register_builtin(&mut engines);

        let mut macs = Macs::new();
        cmac::register(&mut macs);

        let legacy = if conf.legacy_fallback {
            Some(cipher::legacy_ciphers())
        } else {
            None
        };

        ::log::info!(
            "Provider up: {} ciphers, {} engines, {} macs",
            ciphers.len(),
            engines.len(),
            macs.len()
        );

        Ok(Arc::new(ProviderContext {
            config: conf,
            ciphers: ciphers,
            engines: engines,
            macs: macs,
            legacy: legacy,
        }))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ciphers(&self) -> &CipherRegistry {
        &self.ciphers
    }

    pub fn engines(&self) -> &Engines {
        &self.engines
    }

    pub fn macs(&self) -> &Macs {
        &self.macs
    }

    /// The injected legacy fallback table, None when the configuration
    /// disables the fallback path
    pub fn legacy_ciphers(&self) -> Option<&'static LegacyCiphers> {
        self.legacy
    }

    /// Convenience constructor for a named MAC operation context
    pub fn new_mac(self: &Arc<Self>, name: &str) -> Result<Box<dyn MacCtx>> {
        self.macs.get(name)?.new_ctx(self)
    }
}

#[cfg(test)]
mod tests;
