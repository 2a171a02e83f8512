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

//! Impression history bookkeeping. Both operations return a new map, the input snapshot is never mutated.

use log::*;

use crate::{
    error::StaticContentError,
    types::{ContentItem, HistoryKey, HistoryMap, PopupHistoryEntry},
    variant::ContentVariant,
};

const LOG_TARGET: &str = "wallet::static_content::history";

/// Adds an unseen entry for every item without one. Existing entries are kept as they are.
pub fn init_history<V: ContentVariant>(items: &[ContentItem], existing: &HistoryMap) -> HistoryMap {
    let mut history = existing.clone();
    let mut added = 0usize;
    for item in items {
        history.entry(V::history_key(item)).or_insert_with(|| {
            added += 1;
            PopupHistoryEntry::default()
        });
    }
    debug!(
        target: LOG_TARGET,
        "Seeded {} new {} history entries ({} total)",
        added,
        V::KIND,
        history.len()
    );
    history
}

/// Counts one impression for every key in `keys` at `now` (unix millis).
///
/// Every key must already have an entry; if one does not, no entry is updated.
pub fn record_shown(keys: &[HistoryKey], existing: &HistoryMap, now: i64) -> Result<HistoryMap, StaticContentError> {
    if let Some(missing) = keys.iter().find(|k| !existing.contains_key(*k)) {
        error!(
            target: LOG_TARGET,
            "Content `{}` was shown before its history was initialized", missing
        );
        return Err(StaticContentError::HistoryKeyNotFound(missing.clone()));
    }
    let mut history = existing.clone();
    for key in keys {
        if let Some(entry) = history.get_mut(key) {
            entry.show_times += 1;
            entry.last_show_time = now;
            trace!(target: LOG_TARGET, "`{}` shown {} times", key, entry.show_times);
        }
    }
    Ok(history)
}
