// Copyright 2024. The Tari Project
//
// Redistribution and use in source and binary forms, with or without modification, are permitted provided that the
// following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this list of conditions and the following
// disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice, this list of conditions and the
// following disclaimer in the documentation and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors may be used to endorse or promote
// products derived from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES,
// INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
// WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE
// USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Configuration loading for the wallet static content layer.
//!
//! Sections are plain serde structs. Implementing [`OsConfigPath`] (or [`ConfigPath`] directly) grants
//! [`ConfigLoader`] and, for structs with a `Default`, [`DefaultConfigLoader`].

mod error;
mod loader;
mod platform;

use std::path::Path;

use config::{Config, File};
pub use error::ConfigurationError;
pub use loader::{ConfigLoader, ConfigPath, DefaultConfigLoader, OsConfigPath};
use log::*;
pub use platform::{Os, Platform};

const LOG_TARGET: &str = "wallet::common::configuration";

/// Loads the configuration file at `path`. A missing file is not an error: an empty configuration is returned so that
/// every section falls back to its defaults.
pub fn load_configuration(path: &Path) -> Result<Config, ConfigurationError> {
    if !path.exists() {
        info!(
            target: LOG_TARGET,
            "No configuration file found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }
    let cfg = Config::builder().add_source(File::from(path)).build()?;
    info!(target: LOG_TARGET, "Configuration file loaded from {}", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_yields_empty_config() {
        let dir = tempdir().unwrap();
        let cfg = load_configuration(&dir.path().join("config.toml")).unwrap();
        assert!(cfg.get_string("static_content.os").is_err());
    }

    #[test]
    fn it_loads_a_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[static_content]\nos = \"ios\"\n").unwrap();
        let cfg = load_configuration(&path).unwrap();
        assert_eq!(cfg.get_string("static_content.os").unwrap(), "ios");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[static_content\nos = ").unwrap();
        assert!(load_configuration(&path).is_err());
    }
}
