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

use std::path::PathBuf;

use config::Config;
use serde::{Deserialize, Serialize};
use wallet_common::{ConfigurationError, DefaultConfigLoader, Os, OsConfigPath, Platform};

use crate::eligibility::PlatformContext;

/// Configuration for the static content service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticContentConfig {
    /// Platform family matched against the platforms content declares (default: mobile)
    pub platform: Platform,
    /// Runtime OS, matched against popups that declare one. Also selects the `[static_content.<os>]` override table.
    /// (default: android)
    pub os: Os,
    /// Where the JSON backend keeps content and history. None keeps everything in memory. (default: None)
    pub history_file: Option<PathBuf>,
    /// Capacity of the event broadcast channel (default: 250)
    pub event_channel_size: usize,
}

impl Default for StaticContentConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Mobile,
            os: Os::Android,
            history_file: None,
            event_channel_size: 250,
        }
    }
}

impl OsConfigPath for StaticContentConfig {
    fn main_key_prefix() -> &'static str {
        "static_content"
    }
}

impl StaticContentConfig {
    pub fn load_from(config: &Config) -> Result<Self, ConfigurationError> {
        <Self as DefaultConfigLoader>::load_from(config)
    }

    pub fn platform_context(&self) -> PlatformContext {
        PlatformContext::new(self.platform, self.os)
    }
}

#[cfg(test)]
mod test {
    use config::{File, FileFormat};

    use super::*;

    fn from_toml(s: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(s, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn defaults_apply_without_a_section() {
        let config = StaticContentConfig::load_from(&Config::default()).unwrap();
        assert_eq!(config, StaticContentConfig::default());
        assert_eq!(config.platform_context(), PlatformContext::new(Platform::Mobile, Os::Android));
    }

    #[test]
    fn it_reads_the_section_and_os_overrides() {
        let config = from_toml(
            r#"
            [static_content]
            os = "ios"
            history_file = "/tmp/static_content.json"
            event_channel_size = 100

            [static_content.ios]
            event_channel_size = 16
            "#,
        );
        let config = StaticContentConfig::load_from(&config).unwrap();
        assert_eq!(config.os, Os::Ios);
        assert_eq!(config.platform, Platform::Mobile);
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/static_content.json")));
        assert_eq!(config.event_channel_size, 16);
    }

    #[test]
    fn it_rejects_unknown_platforms() {
        let config = from_toml("[static_content]\nplatform = \"desktop\"\n");
        assert!(StaticContentConfig::load_from(&config).is_err());
    }
}
