// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module provides the typed parameter containers used to pass named
//! values across the provider boundary ([Param], [Params]) and the static
//! descriptors ([ParamDescr]) algorithms advertise for introspection.

use zeroize::Zeroize;

use crate::error::{ErrorKind, Result};

/* Well known parameter names */
pub const MAC_PARAM_CIPHER: &str = "cipher";
pub const MAC_PARAM_ENGINE: &str = "engine";
pub const MAC_PARAM_PROPERTIES: &str = "properties";
pub const MAC_PARAM_KEY: &str = "key";
pub const MAC_PARAM_SIZE: &str = "size";

/// List of value encodings we understand
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamType {
    Utf8String,
    OctetString,
    Ulong,
}

/// A parameter value with its encoding
#[derive(Clone, Debug)]
pub enum ParamValue {
    Utf8String(String),
    OctetString(Vec<u8>),
    Ulong(u64),
}

impl ParamValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Utf8String(_) => ParamType::Utf8String,
            ParamValue::OctetString(_) => ParamType::OctetString,
            ParamValue::Ulong(_) => ParamType::Ulong,
        }
    }
}

impl Drop for ParamValue {
    fn drop(&mut self) {
        /* octet strings may carry key material */
        if let ParamValue::OctetString(v) = self {
            v.zeroize();
        }
    }
}

/// A named parameter
#[derive(Clone, Debug)]
pub struct Param {
    name: String,
    value: ParamValue,
}

impl Param {
    pub fn new(name: &str, value: ParamValue) -> Param {
        Param {
            name: name.to_string(),
            value: value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.value.param_type()
    }

    /// Returns the value as a string slice, or a type mismatch error
    /// when the value carries any other encoding
    pub fn as_utf8_string(&self) -> Result<&str> {
        match self.value {
            ParamValue::Utf8String(ref s) => Ok(s.as_str()),
            _ => Err(ErrorKind::TypeMismatch)?,
        }
    }

    /// Returns the value as a byte slice, or a type mismatch error
    pub fn as_octet_string(&self) -> Result<&[u8]> {
        match self.value {
            ParamValue::OctetString(ref v) => Ok(v.as_slice()),
            _ => Err(ErrorKind::TypeMismatch)?,
        }
    }

    /// Returns the value as an unsigned integer, or a type mismatch error
    pub fn as_ulong(&self) -> Result<u64> {
        match self.value {
            ParamValue::Ulong(u) => Ok(u),
            _ => Err(ErrorKind::TypeMismatch)?,
        }
    }

    /// Overwrites the value of an unsigned integer request parameter,
    /// used by operations to fill in requests they recognize
    pub fn set_ulong(&mut self, val: u64) -> Result<()> {
        match self.value {
            ParamValue::Ulong(ref mut u) => {
                *u = val;
                Ok(())
            }
            _ => Err(ErrorKind::TypeMismatch)?,
        }
    }
}

/// An ordered collection of named parameters.
///
/// Duplicated names are legal, only the first occurrence is found
/// by [Params::locate].
#[derive(Clone, Debug, Default)]
pub struct Params {
    list: Vec<Param>,
}

impl Params {
    pub fn new() -> Params {
        Params { list: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn add_utf8_string(&mut self, name: &str, val: &str) -> &mut Params {
        self.list
            .push(Param::new(name, ParamValue::Utf8String(val.to_string())));
        self
    }

    pub fn add_octet_string(&mut self, name: &str, val: &[u8]) -> &mut Params {
        self.list
            .push(Param::new(name, ParamValue::OctetString(val.to_vec())));
        self
    }

    pub fn add_ulong(&mut self, name: &str, val: u64) -> &mut Params {
        self.list.push(Param::new(name, ParamValue::Ulong(val)));
        self
    }

    pub fn locate(&self, name: &str) -> Option<&Param> {
        self.list.iter().find(|p| p.name == name)
    }

    pub fn locate_mut(&mut self, name: &str) -> Option<&mut Param> {
        self.list.iter_mut().find(|p| p.name == name)
    }
}

/// Static descriptor for one settable or gettable parameter
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParamDescr {
    pub name: &'static str,
    pub ptype: ParamType,
}

impl ParamDescr {
    pub const fn new(name: &'static str, ptype: ParamType) -> ParamDescr {
        ParamDescr {
            name: name,
            ptype: ptype,
        }
    }
}
