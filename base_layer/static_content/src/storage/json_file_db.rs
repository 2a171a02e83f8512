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
    fs,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use log::*;

use crate::{
    config::StaticContentConfig,
    error::StaticContentStorageError,
    storage::{
        database::{DbKey, DbValue, StaticContentBackend, WriteOperation},
        memory_db::InnerDatabase,
    },
};

const LOG_TARGET: &str = "wallet::static_content::json_file_db";

/// A backend persisted as a single JSON document. The document is read once on open and rewritten on every write.
#[derive(Debug, Clone)]
pub struct JsonFileDatabase {
    path: PathBuf,
    db: Arc<RwLock<InnerDatabase>>,
}

impl JsonFileDatabase {
    /// Opens the document at `path`, starting empty if it does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StaticContentStorageError> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let buf = fs::read(&path)?;
            let inner: InnerDatabase = serde_json::from_slice(&buf)?;
            debug!(target: LOG_TARGET, "Loaded static content store from {}", path.display());
            inner
        } else {
            info!(
                target: LOG_TARGET,
                "No static content store at {}, starting empty",
                path.display()
            );
            InnerDatabase::default()
        };
        Ok(Self {
            path,
            db: Arc::new(RwLock::new(inner)),
        })
    }

    /// Opens the document named by `history_file`. Returns None when the configuration keeps content in memory.
    pub fn from_config(config: &StaticContentConfig) -> Result<Option<Self>, StaticContentStorageError> {
        config.history_file.as_ref().map(Self::open).transpose()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, inner: &InnerDatabase) -> Result<(), StaticContentStorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(inner)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StaticContentBackend for JsonFileDatabase {
    fn fetch(&self, key: &DbKey) -> Result<Option<DbValue>, StaticContentStorageError> {
        let db = self.db.read().map_err(|_| StaticContentStorageError::LockPoisoned)?;
        Ok(db.fetch(key))
    }

    fn write(&self, op: WriteOperation) -> Result<(), StaticContentStorageError> {
        let mut db = self.db.write().map_err(|_| StaticContentStorageError::LockPoisoned)?;
        let mut next = db.clone();
        next.write(op);
        if let Err(e) = self.persist(&next) {
            warn!(
                target: LOG_TARGET,
                "Could not write static content store to {}: {}",
                self.path.display(),
                e
            );
            return Err(e);
        }
        *db = next;
        Ok(())
    }
}
