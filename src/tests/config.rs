// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use std::env;
use std::fs;

use serial_test::serial;

use super::*;

fn scratch_conf(name: &str, content: &str) -> String {
    let path = env::temp_dir().join(name);
    ret_or_panic!(fs::write(&path, content));
    path.to_str().unwrap().to_string()
}

#[test]
fn test_defaults() {
    let conf = Config::new();
    assert_eq!(conf.legacy_fallback, true);
    assert_eq!(conf.default_properties, None);
}

#[test]
fn test_from_file() {
    let file = scratch_conf(
        "macprov_test_basic.conf",
        "legacy_fallback = false\n\
         default_properties = \"provider=native\"\n",
    );
    let conf = ret_or_panic!(Config::from_file(&file));
    assert_eq!(conf.legacy_fallback, false);
    assert_eq!(conf.default_properties.as_deref(), Some("provider=native"));

    /* omitted keys take the defaults */
    let file = scratch_conf("macprov_test_empty.conf", "");
    let conf = ret_or_panic!(Config::from_file(&file));
    assert_eq!(conf.legacy_fallback, true);
    assert_eq!(conf.default_properties, None);

    let file = scratch_conf("macprov_test_bad.conf", "legacy_fallback = 42\n");
    assert!(Config::from_file(&file).is_err());

    assert!(Config::from_file("/no/such/path/macprov.conf").is_err());
}

#[test]
#[serial]
fn test_conf_env_var() {
    let file = scratch_conf(
        "macprov_test_env.conf",
        "legacy_fallback = false\n",
    );
    env::set_var("MACPROV_CONF", &file);
    let found = ret_or_panic!(Config::find_conf());
    assert_eq!(found, file);
    let conf = Config::default_config();
    assert_eq!(conf.legacy_fallback, false);
    env::remove_var("MACPROV_CONF");
}

#[test]
#[serial]
fn test_default_config_without_file() {
    env::remove_var("MACPROV_CONF");
    env::set_var("XDG_CONFIG_HOME", "/no/such/dir");
    /* no file anywhere reachable, the built-in defaults apply */
    let conf = Config::default_config();
    assert_eq!(conf.legacy_fallback, true);
    env::remove_var("XDG_CONFIG_HOME");
}

#[test]
#[serial]
fn test_malformed_conf_is_ignored() {
    let file = scratch_conf("macprov_test_mangled.conf", "not really toml [");
    env::set_var("MACPROV_CONF", &file);
    let conf = Config::default_config();
    assert_eq!(conf.legacy_fallback, true);
    env::remove_var("MACPROV_CONF");
}
