// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! CMAC accumulator primitive from NIST SP 800-38B, driven over a keyed
//! [BlockCipherOp]. The accumulator owns its own cipher operation
//! sub-context; which implementation gets bound, and when, is the MAC
//! adapter's business.

use std::sync::Arc;

use zeroize::Zeroize;

use crate::cipher::{BlockCipherOp, CipherImplementation};
use crate::engine::Engine;
use crate::error::{ErrorKind, Result};
use crate::{err_kind, some_or_err};

fn xor_in(state: &mut [u8], block: &[u8]) {
    state.iter_mut().zip(block.iter()).for_each(|(s, b)| *s ^= *b);
}

/* subkey doubling in GF(2^b), Rb per SP 800-38B */
fn dbl(block: &[u8], rb: u8) -> Vec<u8> {
    let mut out = vec![0u8; block.len()];
    let mut carry = 0u8;
    for i in (0..block.len()).rev() {
        out[i] = (block[i] << 1) | carry;
        carry = block[i] >> 7;
    }
    if carry != 0 {
        let last = out.len() - 1;
        out[last] ^= rb;
    }
    out
}

fn rb_constant(block_size: usize) -> Result<u8> {
    match block_size {
        16 => Ok(0x87),
        8 => Ok(0x1b),
        _ => err_kind!(
            Initialization;
            format!("unsupported block size {}", block_size)
        ),
    }
}

/// The CMAC running state.
///
/// Lifecycle: bound to a cipher (with or without a key), keyed, absorbing,
/// finalized. A finalized accumulator only becomes usable again through a
/// new [CmacState::init] call.
#[derive(Debug)]
pub struct CmacState {
    cipher: Option<CipherImplementation>,
    engine: Option<Arc<Engine>>,
    op: Option<Box<dyn BlockCipherOp>>,
    k1: Vec<u8>,
    k2: Vec<u8>,
    state: Vec<u8>,
    buffer: Vec<u8>,
    keyed: bool,
    finalized: bool,
}

impl Drop for CmacState {
    fn drop(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
        self.state.zeroize();
        self.buffer.zeroize();
    }
}

impl CmacState {
    pub fn new() -> Result<CmacState> {
        Ok(CmacState {
            cipher: None,
            engine: None,
            op: None,
            k1: Vec::new(),
            k2: Vec::new(),
            state: Vec::new(),
            buffer: Vec::new(),
            keyed: false,
            finalized: false,
        })
    }

    /// (Re)initializes the accumulator.
    ///
    /// State rules follow the reference CMAC contract:
    /// - all arguments empty restarts a previously keyed accumulator for
    ///   a fresh computation under the same key and cipher;
    /// - a cipher binds (or rebinds) the implementation and invalidates
    ///   any previous key;
    /// - a key completes initialization and requires a bound cipher; the
    ///   bound engine may supply the keyed operation, otherwise the
    ///   implementation constructor is used.
    pub fn init(
        &mut self,
        key: Option<&[u8]>,
        cipher: Option<&CipherImplementation>,
        engine: Option<Arc<Engine>>,
    ) -> Result<()> {
        if key.is_none() && cipher.is_none() && engine.is_none() {
            if !self.keyed {
                return Err(ErrorKind::Initialization)?;
            }
            self.state.iter_mut().for_each(|b| *b = 0);
            self.buffer.zeroize();
            self.buffer.clear();
            self.finalized = false;
            return Ok(());
        }

        if let Some(c) = cipher {
            self.cipher = Some(c.clone());
            self.engine = engine;
            self.op = None;
            self.k1.zeroize();
            self.k1.clear();
            self.k2.zeroize();
            self.k2.clear();
            self.state.clear();
            self.buffer.zeroize();
            self.buffer.clear();
            self.keyed = false;
            self.finalized = false;
        } else if let Some(e) = engine {
            /* an engine alone never constitutes a binding, it is just
             * recorded for the next keying */
            self.engine = Some(e);
        }

        if let Some(k) = key {
            let c = match &self.cipher {
                Some(c) => c,
                None => return Err(ErrorKind::Initialization)?,
            };
            let op = match &self.engine {
                Some(e) => match e.cipher_op(c, k) {
                    Some(res) => res?,
                    None => c.new_op(k)?,
                },
                None => c.new_op(k)?,
            };
            let bs = op.block_size();
            let rb = rb_constant(bs)?;

            /* L = E_K(0^b), then K1 = dbl(L), K2 = dbl(K1) */
            let mut l = vec![0u8; bs];
            op.encrypt_block(&mut l)?;
            self.k1.zeroize();
            self.k2.zeroize();
            self.k1 = dbl(&l, rb);
            self.k2 = dbl(&self.k1, rb);
            l.zeroize();

            self.op = Some(op);
            self.state.zeroize();
            self.state = vec![0u8; bs];
            self.buffer.zeroize();
            self.buffer = Vec::with_capacity(bs);
            self.keyed = true;
            self.finalized = false;
        }
        Ok(())
    }

    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if !self.keyed || self.finalized {
            return Err(ErrorKind::Initialization)?;
        }
        if data.is_empty() {
            return Ok(());
        }
        let op = some_or_err!(self.op);
        let bs = op.block_size();

        /* the last block must stay buffered until finalization (or until
         * more data proves it was not the last), so blocks are processed
         * only when bytes beyond them exist */
        if self.buffer.len() + data.len() <= bs {
            self.buffer.extend_from_slice(data);
            return Ok(());
        }

        let mut data = data;
        if self.buffer.len() > 0 {
            let fill = bs - self.buffer.len();
            self.buffer.extend_from_slice(&data[..fill]);
            data = &data[fill..];
            xor_in(&mut self.state, &self.buffer);
            op.encrypt_block(&mut self.state)?;
            self.buffer.zeroize();
            self.buffer.clear();
        }
        while data.len() > bs {
            xor_in(&mut self.state, &data[..bs]);
            op.encrypt_block(&mut self.state)?;
            data = &data[bs..];
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Computes the tag into `output`, which must be exactly one block
    /// long; capacity negotiation happens in the MAC adapter
    pub fn finalize(&mut self, output: &mut [u8]) -> Result<()> {
        if !self.keyed || self.finalized {
            return Err(ErrorKind::Initialization)?;
        }
        let op = some_or_err!(self.op);
        let bs = op.block_size();
        if output.len() != bs {
            return Err(ErrorKind::General)?;
        }

        let mut last = vec![0u8; bs];
        if self.buffer.len() == bs {
            xor_in(&mut last, &self.buffer);
            xor_in(&mut last, &self.k1);
        } else {
            last[..self.buffer.len()].copy_from_slice(&self.buffer);
            last[self.buffer.len()] = 0x80;
            xor_in(&mut last, &self.k2);
        }
        xor_in(&mut self.state, &last);
        op.encrypt_block(&mut self.state)?;
        output.copy_from_slice(&self.state);
        last.zeroize();
        self.finalized = true;
        Ok(())
    }

    /// Deep copy for context duplication
    pub fn copy(&self) -> Result<CmacState> {
        Ok(CmacState {
            cipher: self.cipher.clone(),
            engine: self.engine.clone(),
            op: match &self.op {
                Some(o) => Some(o.dup()),
                None => None,
            },
            k1: self.k1.clone(),
            k2: self.k2.clone(),
            state: self.state.clone(),
            buffer: self.buffer.clone(),
            keyed: self.keyed,
            finalized: self.finalized,
        })
    }

    /// Block size of the bound cipher, which is also the tag size;
    /// 0 when no cipher has been bound yet
    pub fn block_size(&self) -> usize {
        match &self.cipher {
            Some(c) => c.block_size(),
            None => 0,
        }
    }
}
