// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

macro_rules! ret_or_panic {
    ($ret:expr) => {
        match $ret {
            Ok(r) => r,
            Err(e) => panic!("{e}"),
        }
    };
}

macro_rules! expect_kind {
    ($ret:expr; $kind:ident) => {
        match $ret {
            Ok(_) => panic!(
                "expected {} failure",
                stringify!($kind)
            ),
            Err(e) => {
                assert_eq!(e.kind(), $crate::error::ErrorKind::$kind)
            }
        }
    };
}
