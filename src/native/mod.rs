// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This is a meta module to provide access to native Rust implementations
//! of cryptographic primitives

pub mod aes;
pub mod cmac;
