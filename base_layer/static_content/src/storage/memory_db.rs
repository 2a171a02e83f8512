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
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::StaticContentStorageError,
    storage::database::{DbKey, DbKeyValuePair, DbValue, StaticContentBackend, WriteOperation},
    types::{ContentItem, HistoryMap},
};

/// Stored content and history, keyed by content kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct InnerDatabase {
    #[serde(default)]
    content: BTreeMap<String, Vec<ContentItem>>,
    #[serde(default)]
    history: BTreeMap<String, HistoryMap>,
}

impl InnerDatabase {
    pub(crate) fn fetch(&self, key: &DbKey) -> Option<DbValue> {
        match key {
            DbKey::Content(kind) => self.content.get(&kind.to_string()).cloned().map(DbValue::Content),
            DbKey::History(kind) => self.history.get(&kind.to_string()).cloned().map(DbValue::History),
        }
    }

    pub(crate) fn write(&mut self, op: WriteOperation) {
        match op {
            WriteOperation::Upsert(kvp) => self.upsert(*kvp),
            WriteOperation::Batch(kvps) => kvps.into_iter().for_each(|kvp| self.upsert(kvp)),
        }
    }

    fn upsert(&mut self, kvp: DbKeyValuePair) {
        match kvp {
            DbKeyValuePair::Content(kind, items) => {
                self.content.insert(kind.to_string(), items);
            },
            DbKeyValuePair::History(kind, history) => {
                self.history.insert(kind.to_string(), history);
            },
        }
    }
}

/// An in-process backend. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    db: Arc<RwLock<InnerDatabase>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StaticContentBackend for MemoryDatabase {
    fn fetch(&self, key: &DbKey) -> Result<Option<DbValue>, StaticContentStorageError> {
        let db = self.db.read().map_err(|_| StaticContentStorageError::LockPoisoned)?;
        Ok(db.fetch(key))
    }

    fn write(&self, op: WriteOperation) -> Result<(), StaticContentStorageError> {
        let mut db = self.db.write().map_err(|_| StaticContentStorageError::LockPoisoned)?;
        db.write(op);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        storage::database::StaticContentDatabase,
        test_utils::item,
        types::{ContentKind, HistoryKey, PopupHistoryEntry},
    };

    #[test]
    fn it_stores_content_per_kind() {
        let db = StaticContentDatabase::new(MemoryDatabase::new());
        db.set_content(ContentKind::Banner, vec![item(1, "home", 1)]).unwrap();
        db.set_content(ContentKind::Popup, vec![item(2, "home", 1), item(3, "home", 1)])
            .unwrap();
        assert_eq!(db.get_content(ContentKind::Banner).unwrap().len(), 1);
        assert_eq!(db.get_content(ContentKind::Popup).unwrap().len(), 2);
        match db.get_content(ContentKind::Confirmation) {
            Err(StaticContentStorageError::ValueNotFound(key)) => {
                assert_eq!(key, DbKey::Content(ContentKind::Confirmation))
            },
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn history_is_replaced_wholesale() {
        let backend = MemoryDatabase::new();
        let db = StaticContentDatabase::new(backend.clone());
        let mut history = HistoryMap::new();
        history.insert(HistoryKey::from("home-1"), PopupHistoryEntry::default());
        history.insert(HistoryKey::from("home-2"), PopupHistoryEntry::default());
        db.set_history(ContentKind::Banner, history).unwrap();

        let mut history = HistoryMap::new();
        history.insert(HistoryKey::from("home-3"), PopupHistoryEntry::default());
        db.set_history(ContentKind::Banner, history.clone()).unwrap();

        // a second handle onto the same backend sees the write
        let other = StaticContentDatabase::new(backend);
        assert_eq!(other.get_history(ContentKind::Banner).unwrap(), history);
    }
}
