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

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::types::ContentId;

/// Key of an impression history entry: `"{position}-{id}"` for banners and popups, the bare id for confirmations
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryKey(String);

impl HistoryKey {
    pub fn for_position(position: &str, id: ContentId) -> Self {
        Self(format!("{}-{}", position, id))
    }

    pub fn for_id(id: ContentId) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HistoryKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HistoryKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How often, and when last, a piece of content was shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupHistoryEntry {
    /// Unix timestamp in milliseconds, 0 if never shown
    pub last_show_time: i64,
    pub show_times: u64,
}

impl PopupHistoryEntry {
    pub fn is_unseen(&self) -> bool {
        self.show_times == 0
    }
}

pub type HistoryMap = BTreeMap<HistoryKey, PopupHistoryEntry>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn history_keys() {
        assert_eq!(HistoryKey::for_position("home", 1).as_str(), "home-1");
        assert_eq!(HistoryKey::for_id(42).to_string(), "42");
        assert_eq!(HistoryKey::from("home-1"), HistoryKey::for_position("home", 1));
    }

    #[test]
    fn history_entry_json_matches_the_stored_format() {
        let mut map = HistoryMap::new();
        map.insert(HistoryKey::for_position("home", 1), PopupHistoryEntry {
            last_show_time: 1_700_000_000_000,
            show_times: 2,
        });
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"home-1":{"lastShowTime":1700000000000,"showTimes":2}}"#);
    }
}
