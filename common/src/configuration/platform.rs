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

use std::{
    convert::TryFrom,
    fmt,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// The platform family a client belongs to. Content declares the families it targets in `info.platforms`.
#[derive(Clone, Debug, PartialEq, Eq, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    Mobile,
    Extension,
    Webapp,
}

impl Platform {
    pub const fn as_key_str(self) -> &'static str {
        match self {
            Platform::Mobile => "mobile",
            Platform::Extension => "extension",
            Platform::Webapp => "webapp",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Mobile
    }
}

impl FromStr for Platform {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "mobile" => Ok(Platform::Mobile),
            "extension" => Ok(Platform::Extension),
            "webapp" => Ok(Platform::Webapp),
            invalid => Err(ConfigurationError::new(
                "platform",
                Some(value.to_string()),
                format!("Invalid platform option: {}", invalid),
            )),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<Platform> for String {
    fn from(p: Platform) -> Self {
        p.to_string()
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_key_str())
    }
}

/// The operating system the client runs on
#[derive(Clone, Debug, PartialEq, Eq, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Os {
    Android,
    Ios,
}

impl Os {
    pub const fn as_key_str(self) -> &'static str {
        match self {
            Os::Android => "android",
            Os::Ios => "ios",
        }
    }

    /// Case-insensitive comparison against an OS name as it appears in content metadata
    pub fn matches(self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.as_key_str())
    }
}

impl Default for Os {
    fn default() -> Self {
        Os::Android
    }
}

impl FromStr for Os {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "android" => Ok(Os::Android),
            "ios" => Ok(Os::Ios),
            invalid => Err(ConfigurationError::new(
                "os",
                Some(value.to_string()),
                format!("Invalid os option: {}", invalid),
            )),
        }
    }
}

impl TryFrom<String> for Os {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<Os> for String {
    fn from(os: Os) -> Self {
        os.to_string()
    }
}

impl Display for Os {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_key_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn platform_from_str() {
        assert_eq!(Platform::from_str("mobile").unwrap(), Platform::Mobile);
        assert_eq!(Platform::from_str("Extension").unwrap(), Platform::Extension);
        assert_eq!(Platform::from_str("WEBAPP").unwrap(), Platform::Webapp);
        assert!(Platform::from_str("desktop").is_err());
    }

    #[test]
    fn platform_default() {
        assert_eq!(Platform::default(), Platform::Mobile);
        assert_eq!(Platform::default().to_string(), "mobile");
    }

    #[test]
    fn os_from_str() {
        assert_eq!(Os::from_str("android").unwrap(), Os::Android);
        assert_eq!(Os::from_str("iOS").unwrap(), Os::Ios);
        let err = Os::from_str("symbian").unwrap_err();
        assert_eq!(err.field(), "os");
    }

    #[test]
    fn os_matches_case_insensitively() {
        assert!(Os::Ios.matches("IOS"));
        assert!(Os::Ios.matches("ios"));
        assert!(Os::Android.matches("Android"));
        assert!(!Os::Android.matches("ios"));
    }

    #[test]
    fn os_serde_round_trip_uses_key_str() {
        let json = serde_json::to_string(&Os::Ios).unwrap();
        assert_eq!(json, "\"ios\"");
        let os: Os = serde_json::from_str("\"Android\"").unwrap();
        assert_eq!(os, Os::Android);
    }
}
