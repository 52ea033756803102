// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Error type shared by the whole crate, with the failure kinds the
//! provider surface reports and conversions from the errors of the
//! underlying crates.

use std::error;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// List of failure kinds an operation can report
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /* Resource exhaustion while building a context */
    Allocation,
    /* A parameter value carries the wrong encoding */
    TypeMismatch,
    /* A named implementation was not found in a registry */
    Resolution,
    /* No cipher matches the requested name, on any resolution path */
    UnknownCipher,
    /* The accumulator rejected the key/cipher combination */
    Initialization,
    /* Duplication of an operation context failed */
    Copy,
    /* The output buffer is too small for the computed tag */
    BufferTooSmall,
    /* Internal invariant break, see origin/errmsg */
    General,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    origin: Option<Box<dyn error::Error + Send + Sync>>,
    errmsg: Option<String>,
}

impl Error {
    pub fn with_kind(kind: ErrorKind) -> Error {
        Error {
            kind: kind,
            origin: None,
            errmsg: None,
        }
    }

    pub fn with_errmsg(kind: ErrorKind, errmsg: String) -> Error {
        Error {
            kind: kind,
            origin: None,
            errmsg: Some(errmsg),
        }
    }

    pub fn from_error<E>(kind: ErrorKind, error: E) -> Error
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Error {
            kind: kind,
            origin: Some(error.into()),
            errmsg: None,
        }
    }

    pub fn general_error<E>(error: E) -> Error
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Error::from_error(ErrorKind::General, error)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref e) = self.errmsg {
            return write!(f, "{}", e);
        }
        match self.kind {
            ErrorKind::Allocation => write!(f, "allocation failure"),
            ErrorKind::TypeMismatch => {
                write!(f, "parameter value has the wrong encoding")
            }
            ErrorKind::Resolution => write!(f, "implementation not found"),
            ErrorKind::UnknownCipher => write!(f, "unknown cipher"),
            ErrorKind::Initialization => {
                write!(f, "operation not initialized")
            }
            ErrorKind::Copy => write!(f, "context duplication failed"),
            ErrorKind::BufferTooSmall => write!(f, "buffer too small"),
            ErrorKind::General => match self.origin {
                Some(ref e) => e.fmt(f),
                None => write!(f, "general error"),
            },
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.origin {
            Some(ref e) => {
                let source: &(dyn error::Error + 'static) = e.as_ref();
                Some(source)
            }
            None => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::with_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::general_error(error)
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(error: std::num::TryFromIntError) -> Error {
        Error::general_error(error)
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(error: std::convert::Infallible) -> Error {
        Error::general_error(error)
    }
}

#[macro_export]
macro_rules! some_or_err {
    ($action:expr) => {
        if let Some(ref x) = $action {
            x
        } else {
            return Err($crate::error::Error::with_kind(
                $crate::error::ErrorKind::General,
            ));
        }
    };
    (mut $action:expr) => {
        if let Some(ref mut x) = $action {
            x
        } else {
            return Err($crate::error::Error::with_kind(
                $crate::error::ErrorKind::General,
            ));
        }
    };
}

#[macro_export]
macro_rules! err_kind {
    ($kind:ident) => {
        Err($crate::error::Error::with_kind(
            $crate::error::ErrorKind::$kind,
        ))
    };
    ($kind:ident; $errmsg:expr) => {
        Err($crate::error::Error::with_errmsg(
            $crate::error::ErrorKind::$kind,
            $errmsg,
        ))
    };
}

#[macro_export]
macro_rules! map_err {
    ($map:expr, $kind:ident) => {{
        $map.map_err(|e| {
            $crate::error::Error::from_error($crate::error::ErrorKind::$kind, e)
        })
    }};
}
