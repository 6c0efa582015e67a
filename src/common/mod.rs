// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(feature = "toml")]
mod config;
/// An enum that encapsulates a variety of error types.
mod error;
/// Settings of the Route 53 client and its HTTP executor.
mod settings;
/// Unit tests.
mod tests;

#[cfg(feature = "toml")]
pub use self::config::{CubConfig, CubConfigBuilder};
pub use self::error::Error;
pub use self::settings::Route53Settings;
