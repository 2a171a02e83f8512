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
//
//! # Section loading
//!
//! A configuration section is any struct implementing [`Deserialize`][serde::Deserialize] and [`ConfigPath`].
//! [`ConfigLoader::load_from`] reads the section at `main_key_prefix()` and applies the override table returned by
//! `overload_key_prefix()`. [`OsConfigPath`] selects the override table from the section's `os` key, so that
//!
//! ```toml
//! [static_content]
//! os = "ios"
//! event_channel_size = 100
//! [static_content.ios]
//! event_channel_size = 50
//! ```
//!
//! yields `event_channel_size = 50`. [`DefaultConfigLoader`] additionally fills missing keys from the struct's
//! [`Default`].

use config::{Config, Value};

use super::{ConfigurationError, Os};

/// Load struct from config's main section and subsection override
pub trait ConfigPath {
    /// Main configuration section
    fn main_key_prefix() -> &'static str;
    /// Path to the configuration table holding overloading values, or `Ok(None)` if no overload is required.
    /// Returns `ConfigurationError` if the key selecting the table has a wrong value.
    fn overload_key_prefix(config: &Config) -> Result<Option<String>, ConfigurationError>;
    /// Merge `defaults` (if any), the main section and the overload table into a config from which the main section
    /// can be deserialized. A missing overload table has no effect.
    fn merge_subconfig(config: &Config, defaults: Option<Value>) -> Result<Config, ConfigurationError> {
        let mut builder = Config::builder();
        if let Some(defaults) = defaults {
            builder = builder.set_default(Self::main_key_prefix(), defaults)?;
        }
        builder = builder.add_source(config.clone());
        if let Some(key) = Self::overload_key_prefix(config)? {
            if let Ok(overload) = config.get::<Value>(key.as_str()) {
                builder = builder.set_override(Self::main_key_prefix(), overload)?;
            }
        }
        Ok(builder.build()?)
    }
}

/// Load struct from config's main section with an override table chosen by the `os` key of that section.
///
/// A wrong `os` value results in an error.
pub trait OsConfigPath {
    /// Main configuration section
    fn main_key_prefix() -> &'static str;
    /// Path for `os` key in config
    fn os_config_key() -> String {
        format!("{}.os", <Self as OsConfigPath>::main_key_prefix())
    }
}

impl<C: OsConfigPath> ConfigPath for C {
    fn main_key_prefix() -> &'static str {
        <Self as OsConfigPath>::main_key_prefix()
    }

    fn overload_key_prefix(config: &Config) -> Result<Option<String>, ConfigurationError> {
        let os_key = Self::os_config_key();
        match config.get_string(os_key.as_str()) {
            Ok(s) => {
                let os: Os = s.parse()?;
                Ok(Some(format!("{}.{}", <Self as ConfigPath>::main_key_prefix(), os)))
            },
            Err(_) => Ok(None),
        }
    }
}

/// Configuration loader based on ConfigPath selectors.
///
/// Default values are taken from `#[serde(default)]` attributes only; use [`DefaultConfigLoader`] to inherit the
/// struct's `Default`.
pub trait ConfigLoader: ConfigPath + for<'de> serde::de::Deserialize<'de> {
    fn load_from(config: &Config) -> Result<Self, ConfigurationError> {
        let merger = Self::merge_subconfig(config, None)?;
        Ok(merger.get(Self::main_key_prefix())?)
    }
}
impl<C> ConfigLoader for C where C: ConfigPath + for<'de> serde::de::Deserialize<'de> {}

/// Configuration loader based on ConfigPath selectors with Defaults
pub trait DefaultConfigLoader:
    ConfigPath + Default + serde::ser::Serialize + for<'de> serde::de::Deserialize<'de>
{
    fn load_from(config: &Config) -> Result<Self, ConfigurationError> {
        let default = <Self as Default>::default();
        let buf = serde_json::to_string(&default)?;
        let value: Value = serde_json::from_str(buf.as_str())?;
        let merger = Self::merge_subconfig(config, Some(value))?;
        Ok(merger.get(Self::main_key_prefix())?)
    }
}
impl<C> DefaultConfigLoader for C where C: ConfigPath + Default + serde::ser::Serialize + for<'de> serde::de::Deserialize<'de>
{}

#[cfg(test)]
mod test {
    use config::{File, FileFormat};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Greeter {
        welcome_message: String,
        #[serde(default = "default_retries")]
        retries: u32,
    }

    fn default_retries() -> u32 {
        3
    }

    impl Default for Greeter {
        fn default() -> Self {
            Self {
                welcome_message: "welcome".into(),
                retries: 1,
            }
        }
    }

    impl OsConfigPath for Greeter {
        fn main_key_prefix() -> &'static str {
            "greeter"
        }
    }

    fn from_toml(s: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(s, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn it_loads_the_main_section() {
        let config = from_toml("[greeter]\nwelcome_message = \"hi\"\n");
        let greeter = <Greeter as ConfigLoader>::load_from(&config).unwrap();
        assert_eq!(greeter.welcome_message, "hi");
        assert_eq!(greeter.retries, default_retries());
    }

    #[test]
    fn it_requires_keys_without_defaults() {
        let config = from_toml("[greeter]\nretries = 2\n");
        assert!(<Greeter as ConfigLoader>::load_from(&config).is_err());
    }

    #[test]
    fn it_fills_missing_keys_from_default() {
        let config = from_toml("[greeter]\nretries = 7\n");
        let greeter = <Greeter as DefaultConfigLoader>::load_from(&config).unwrap();
        assert_eq!(greeter.welcome_message, "welcome");
        assert_eq!(greeter.retries, 7);

        let greeter = <Greeter as DefaultConfigLoader>::load_from(&Config::default()).unwrap();
        assert_eq!(greeter.welcome_message, "welcome");
        assert_eq!(greeter.retries, 1);
    }

    #[test]
    fn it_applies_the_os_override_table() {
        let config = from_toml(
            "[greeter]\nos = \"ios\"\nwelcome_message = \"hi\"\n[greeter.ios]\nwelcome_message = \"hi from ios\"\n\
             [greeter.android]\nwelcome_message = \"hi from android\"\n",
        );
        let greeter = <Greeter as DefaultConfigLoader>::load_from(&config).unwrap();
        assert_eq!(greeter.welcome_message, "hi from ios");
    }

    #[test]
    fn it_rejects_an_unknown_os() {
        let config = from_toml("[greeter]\nos = \"palm\"\n");
        let err = <Greeter as DefaultConfigLoader>::load_from(&config).unwrap_err();
        assert_eq!(err.field(), "os");
    }
}
