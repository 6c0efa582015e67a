// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Error, Route53Settings};
use serde::de::DeserializeOwned;
use serde::Deserialize;
#[allow(deprecated)]
use std::env::home_dir;
use std::fs::read_to_string;

/// Configuration parameters, kept as TOML text until a consumer asks for its table.
#[derive(Debug)]
pub struct CubConfig {
    debug_enabled: bool,
    toml: String,
}

impl CubConfig {
    /// Creates a configuration builder.
    pub fn builder() -> CubConfigBuilder {
        CubConfigBuilder {
            cub_config: None,
            debug_enabled: false,
            error: None,
        }
    }

    /// Returns `true` if debug is enabled.
    pub fn debug(&self) -> bool {
        self.debug_enabled
    }

    /// Returns configuration parameters.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Error> {
        toml::from_str(&self.toml).map_err(|e: toml::de::Error| Error::String(format!("toml: {e}")))
    }

    /// Returns the `[route53]` table, or the defaults if the table is absent.
    pub fn route53(&self) -> Result<Route53Settings, Error> {
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            route53: Route53Settings,
        }
        let ConfigToml { route53 } = self.get()?;
        Ok(route53)
    }
}

/// Builds a [`CubConfig`] from a string or a file.
pub struct CubConfigBuilder {
    cub_config: Option<CubConfig>,
    debug_enabled: bool,
    error: Option<Error>,
}

impl CubConfigBuilder {
    /// Complete building, failing if no TOML source was set or it could not be read.
    pub fn build(self) -> Result<CubConfig, Error> {
        if let Some(error) = self.error {
            Err(error)
        } else if let Some(cub_config) = self.cub_config {
            Ok(cub_config)
        } else {
            Err(Error::String("config not set".to_string()))
        }
    }

    /// Echo log lines to stdout.
    pub fn debug(self, debug_enabled: bool) -> Self {
        Self {
            cub_config: self.cub_config.map(|cub_config| CubConfig {
                debug_enabled,
                ..cub_config
            }),
            debug_enabled,
            error: self.error,
        }
    }

    /// Read `file_name` from the home directory, falling back to the current directory.
    pub fn toml_file(self, file_name: &str) -> Self {
        let debug_enabled = self.debug_enabled;
        #[allow(deprecated)]
        let home_path = home_dir()
            .and_then(|pathbuf| pathbuf.to_str().map(|path| format!("{path}/{file_name}")));
        let local_path = format!("./{file_name}");
        let read = |path: &str| {
            read_to_string(path).map(|toml| CubConfig {
                toml,
                debug_enabled,
            })
        };
        match home_path.and_then(|path| read(&path).ok()) {
            Some(cub_config) => Self {
                cub_config: Some(cub_config),
                debug_enabled,
                error: None,
            },
            None => match read(&local_path) {
                Ok(cub_config) => Self {
                    cub_config: Some(cub_config),
                    debug_enabled,
                    error: None,
                },
                Err(_) => Self {
                    cub_config: None,
                    debug_enabled,
                    error: Some(Error::String(format!("{local_path}: cannot read"))),
                },
            },
        }
    }

    /// Use `toml` as the configuration text.
    pub fn toml_str(self, toml: &str) -> Self {
        self.toml_string(toml.to_string())
    }

    /// Use `toml` as the configuration text.
    pub fn toml_string(self, toml: String) -> Self {
        Self {
            cub_config: Some(CubConfig {
                debug_enabled: self.debug_enabled,
                toml,
            }),
            debug_enabled: self.debug_enabled,
            error: None,
        }
    }
}
