// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Provider configuration, loaded from a TOML file located via the
//! MACPROV_CONF environment variable or the usual XDG paths. Absent any
//! file the built-in defaults apply.

use std::env;
use std::fs;
use std::path::Path;

use serde::de;
use serde::{Deserialize, Serialize};
use toml;

use crate::error::{Error, ErrorKind, Result};

const DEFAULT_CONF_DIR: &str = {
    match option_env!("CONFDIR") {
        Some(p) => p,
        None => "/usr/local/etc",
    }
};

pub const DEFAULT_CONF_NAME: &str = "macprov.conf";

fn config_error<E: de::Error + Send + Sync + 'static>(error: E) -> Error {
    Error::from_error(ErrorKind::General, error)
}

fn default_legacy_fallback() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether cipher resolution may fall back to the legacy by-name
    /// table when a provider fetch finds no match
    #[serde(default = "default_legacy_fallback")]
    pub legacy_fallback: bool,

    /// Property query applied to cipher fetches when the caller
    /// supplies none
    #[serde(default)]
    pub default_properties: Option<String>,
}

impl Config {
    pub fn new() -> Config {
        Config {
            legacy_fallback: true,
            default_properties: None,
        }
    }

    pub fn find_conf() -> Result<String> {
        /* First check for our own env var,
         * this has the highest precedence */
        match env::var("MACPROV_CONF") {
            Ok(var) => return Ok(var),
            Err(_) => (),
        }
        /* Freedesktop specification for config dirs first,
         * then fallback to $HOME/.config, if that is also not
         * available see if we have access to a system config */
        let conffile = match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => format!("{}/macprov/{}", xdg, DEFAULT_CONF_NAME),
            Err(_) => match env::var("HOME") {
                Ok(home) => {
                    format!("{}/.config/macprov/{}", home, DEFAULT_CONF_NAME)
                }
                Err(_) => format!(
                    "{}/macprov/{}",
                    DEFAULT_CONF_DIR, DEFAULT_CONF_NAME
                ),
            },
        };
        if Path::new(&conffile).is_file() {
            Ok(conffile)
        } else {
            Err(ErrorKind::General)?
        }
    }

    pub fn from_file(filename: &str) -> Result<Config> {
        let config_str = fs::read_to_string(filename)?;
        let conf: Config = toml::from_str(&config_str).map_err(config_error)?;
        Ok(conf)
    }

    /// The configuration the provider starts from when the caller does
    /// not hand one in: the located file, or built-in defaults when no
    /// file exists
    pub fn default_config() -> Config {
        match Self::find_conf() {
            Ok(filename) => match Self::from_file(&filename) {
                Ok(conf) => conf,
                Err(_) => {
                    log::warn!("Malformed config file {}, ignored", filename);
                    Config::new()
                }
            },
            Err(_) => Config::new(),
        }
    }
}
