// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! AES block cipher implementations backed by the RustCrypto `aes`
//! crate, registered under the conventional CBC cipher names the MAC
//! layer resolves. Only the raw block operation is driven here, chaining
//! is the accumulators' business.

use std::fmt;

use aes::cipher::{Block, BlockEncrypt, BlockSizeUser, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::cipher::{
    BlockCipherOp, CipherImplementation, CipherRegistry, LegacyCiphers,
};
use crate::error::{ErrorKind, Result};

struct AesOp<C> {
    name: &'static str,
    cipher: C,
}

impl<C> fmt::Debug for AesOp<C> {
    /* never print the key schedule */
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AesOp").field("name", &self.name).finish()
    }
}

impl<C: Clone> Clone for AesOp<C> {
    fn clone(&self) -> AesOp<C> {
        AesOp {
            name: self.name,
            cipher: self.cipher.clone(),
        }
    }
}

impl<C> BlockCipherOp for AesOp<C>
where
    C: BlockEncrypt + Clone + Send + 'static,
{
    fn block_size(&self) -> usize {
        C::block_size()
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        if block.len() != C::block_size() {
            return Err(ErrorKind::General)?;
        }
        self.cipher.encrypt_block(Block::<C>::from_mut_slice(block));
        Ok(())
    }

    fn dup(&self) -> Box<dyn BlockCipherOp> {
        Box::new(self.clone())
    }
}

fn aes128_op(key: &[u8]) -> Result<Box<dyn BlockCipherOp>> {
    match Aes128::new_from_slice(key) {
        Ok(cipher) => Ok(Box::new(AesOp {
            name: "AES-128-CBC",
            cipher: cipher,
        })),
        Err(_) => Err(ErrorKind::Initialization)?,
    }
}

fn aes192_op(key: &[u8]) -> Result<Box<dyn BlockCipherOp>> {
    match Aes192::new_from_slice(key) {
        Ok(cipher) => Ok(Box::new(AesOp {
            name: "AES-192-CBC",
            cipher: cipher,
        })),
        Err(_) => Err(ErrorKind::Initialization)?,
    }
}

fn aes256_op(key: &[u8]) -> Result<Box<dyn BlockCipherOp>> {
    match Aes256::new_from_slice(key) {
        Ok(cipher) => Ok(Box::new(AesOp {
            name: "AES-256-CBC",
            cipher: cipher,
        })),
        Err(_) => Err(ErrorKind::Initialization)?,
    }
}

const AES_PROPERTIES: &[(&str, &str)] =
    &[("provider", "native"), ("fips", "no")];

static AES_128_CBC: CipherImplementation = CipherImplementation::new(
    "AES-128-CBC",
    &["AES128", "AES-128"],
    16,
    16,
    AES_PROPERTIES,
    aes128_op,
);

static AES_192_CBC: CipherImplementation = CipherImplementation::new(
    "AES-192-CBC",
    &["AES192", "AES-192"],
    16,
    24,
    AES_PROPERTIES,
    aes192_op,
);

static AES_256_CBC: CipherImplementation = CipherImplementation::new(
    "AES-256-CBC",
    &["AES256", "AES-256"],
    16,
    32,
    AES_PROPERTIES,
    aes256_op,
);

pub fn register(ciphers: &mut CipherRegistry) {
    ciphers.register(AES_128_CBC.clone());
    ciphers.register(AES_192_CBC.clone());
    ciphers.register(AES_256_CBC.clone());
}

/* the same implementations are reachable through the legacy by-name
 * table, minus any property based selection */
pub fn register_legacy(legacy: &mut LegacyCiphers) {
    legacy.register(AES_128_CBC.clone());
    legacy.register(AES_192_CBC.clone());
    legacy.register(AES_256_CBC.clone());
}
