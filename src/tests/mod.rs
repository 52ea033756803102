// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use std::sync::Arc;

use super::*;
use crate::cmac::MAC_NAME_CMAC;
use crate::config::Config;
use crate::mac::MacCtx;
use crate::params::{Params, MAC_PARAM_CIPHER, MAC_PARAM_KEY};

#[macro_use]
mod util;

mod cmac_vectors;
mod config;
mod params;

fn test_provider() -> Arc<ProviderContext> {
    ret_or_panic!(ProviderContext::with_config(Config::new()))
}

fn cmac_ctx(provctx: &Arc<ProviderContext>) -> Box<dyn MacCtx> {
    ret_or_panic!(provctx.new_mac(MAC_NAME_CMAC))
}

/* one shot CMAC computation over the provider surface */
fn cmac_tag(
    provctx: &Arc<ProviderContext>,
    cipher: &str,
    key: &[u8],
    msg: &[u8],
) -> Vec<u8> {
    let mut ctx = cmac_ctx(provctx);
    let mut params = Params::new();
    params.add_utf8_string(MAC_PARAM_CIPHER, cipher);
    params.add_octet_string(MAC_PARAM_KEY, key);
    ret_or_panic!(ctx.set_ctx_params(&params));
    ret_or_panic!(ctx.update(msg));
    let mut out = vec![0u8; 64];
    let len = ret_or_panic!(ctx.finalize(out.as_mut_slice()));
    out.truncate(len);
    out
}
