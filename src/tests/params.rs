// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use super::*;

use crate::params::{ParamType, MAC_PARAM_PROPERTIES, MAC_PARAM_SIZE};

#[test]
fn test_typed_access() {
    let mut params = Params::new();
    params
        .add_utf8_string(MAC_PARAM_CIPHER, "AES-128-CBC")
        .add_octet_string(MAC_PARAM_KEY, &[1, 2, 3])
        .add_ulong(MAC_PARAM_SIZE, 16);
    assert_eq!(params.len(), 3);

    let p = params.locate(MAC_PARAM_CIPHER).unwrap();
    assert_eq!(p.param_type(), ParamType::Utf8String);
    assert_eq!(ret_or_panic!(p.as_utf8_string()), "AES-128-CBC");
    expect_kind!(p.as_octet_string(); TypeMismatch);
    expect_kind!(p.as_ulong(); TypeMismatch);

    let p = params.locate(MAC_PARAM_KEY).unwrap();
    assert_eq!(ret_or_panic!(p.as_octet_string()), &[1, 2, 3]);
    expect_kind!(p.as_utf8_string(); TypeMismatch);

    let p = params.locate(MAC_PARAM_SIZE).unwrap();
    assert_eq!(ret_or_panic!(p.as_ulong()), 16);

    assert!(params.locate(MAC_PARAM_PROPERTIES).is_none());
}

#[test]
fn test_locate_first_occurrence() {
    let mut params = Params::new();
    params
        .add_utf8_string("name", "first")
        .add_utf8_string("name", "second");
    let p = params.locate("name").unwrap();
    assert_eq!(ret_or_panic!(p.as_utf8_string()), "first");
}

#[test]
fn test_request_fill() {
    let mut params = Params::new();
    params.add_ulong(MAC_PARAM_SIZE, 0);
    let p = params.locate_mut(MAC_PARAM_SIZE).unwrap();
    ret_or_panic!(p.set_ulong(32));
    assert_eq!(ret_or_panic!(p.as_ulong()), 32);

    /* requests can only be filled with the type they advertise */
    let mut params = Params::new();
    params.add_utf8_string(MAC_PARAM_SIZE, "oops");
    let p = params.locate_mut(MAC_PARAM_SIZE).unwrap();
    expect_kind!(p.set_ulong(32); TypeMismatch);
}
