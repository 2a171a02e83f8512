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

//! # Common configuration and logging utilities
//!
//! Settings for the wallet static content layer live in a single configuration file (usually
//! `~/.wallet/config.toml`). Values are applied using the following order of precedence:
//!
//! 1. An OS-specific override table, e.g. `[static_content.ios]`
//! 2. The `config.toml` file value
//! 3. The configuration struct's `Default`
//!
//! ### Example - Loading a configuration section
//!
//! ```
//! # use config::Config;
//! # use serde::{Deserialize, Serialize};
//! # use wallet_common::{DefaultConfigLoader, OsConfigPath};
//! #[derive(Default, Serialize, Deserialize)]
//! struct MyConfig {
//!     greeting: String,
//! }
//! impl OsConfigPath for MyConfig {
//!     fn main_key_prefix() -> &'static str {
//!         "my_section"
//!     }
//! }
//! let config = Config::builder()
//!     .set_override("my_section.greeting", "hello")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let my_config = <MyConfig as DefaultConfigLoader>::load_from(&config).unwrap();
//! assert_eq!(my_config.greeting, "hello");
//! ```

pub mod configuration;
pub mod dir_utils;
mod logging;

pub use configuration::{
    load_configuration,
    ConfigLoader,
    ConfigPath,
    ConfigurationError,
    DefaultConfigLoader,
    Os,
    OsConfigPath,
    Platform,
};
pub use logging::{get_log_configuration_path, initialize_logging, install_default_logfile_config};

pub const DEFAULT_CONFIG: &str = "config.toml";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
