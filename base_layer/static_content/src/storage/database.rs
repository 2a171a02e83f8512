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
    fmt::{Display, Error, Formatter},
    sync::Arc,
};

use log::*;

use crate::{
    error::StaticContentStorageError,
    types::{ContentItem, ContentKind, HistoryMap},
};

const LOG_TARGET: &str = "wallet::static_content::database";

/// This trait defines the functionality that a database backend needs to provide for the static content service
pub trait StaticContentBackend: Send + Sync + Clone {
    /// Retrieve the record associated with the provided DbKey
    fn fetch(&self, key: &DbKey) -> Result<Option<DbValue>, StaticContentStorageError>;
    /// Modify the state of the backend with a write operation
    fn write(&self, op: WriteOperation) -> Result<(), StaticContentStorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbKey {
    Content(ContentKind),
    History(ContentKind),
}

#[derive(Debug, Clone)]
pub enum DbValue {
    Content(Vec<ContentItem>),
    History(HistoryMap),
}

#[derive(Debug, Clone)]
pub enum DbKeyValuePair {
    Content(ContentKind, Vec<ContentItem>),
    History(ContentKind, HistoryMap),
}

#[derive(Debug, Clone)]
pub enum WriteOperation {
    /// Replace the stored value wholesale
    Upsert(Box<DbKeyValuePair>),
    /// Replace several values in one write. Either all of them are stored or none are.
    Batch(Vec<DbKeyValuePair>),
}

// Private macro that pulls out all the boiler plate of extracting a DB query result from its variants
macro_rules! fetch {
    ($db:ident, $key_val:expr, $key_var:ident) => {{
        let key = DbKey::$key_var($key_val);
        match $db.fetch(&key) {
            Ok(None) => Err(StaticContentStorageError::ValueNotFound(key)),
            Ok(Some(DbValue::$key_var(k))) => Ok(k),
            Ok(Some(other)) => unexpected_result(key, other),
            Err(e) => log_error(key, e),
        }
    }};
}

pub struct StaticContentDatabase<T>
where T: StaticContentBackend
{
    db: Arc<T>,
}

impl<T> Clone for StaticContentDatabase<T>
where T: StaticContentBackend
{
    fn clone(&self) -> Self {
        Self { db: self.db.clone() }
    }
}

impl<T> StaticContentDatabase<T>
where T: StaticContentBackend + 'static
{
    pub fn new(db: T) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn get_content(&self, kind: ContentKind) -> Result<Vec<ContentItem>, StaticContentStorageError> {
        let db = &self.db;
        fetch!(db, kind, Content)
    }

    pub fn get_history(&self, kind: ContentKind) -> Result<HistoryMap, StaticContentStorageError> {
        let db = &self.db;
        fetch!(db, kind, History)
    }

    pub fn set_content(&self, kind: ContentKind, items: Vec<ContentItem>) -> Result<(), StaticContentStorageError> {
        self.db
            .write(WriteOperation::Upsert(Box::new(DbKeyValuePair::Content(kind, items))))
    }

    pub fn set_history(&self, kind: ContentKind, history: HistoryMap) -> Result<(), StaticContentStorageError> {
        self.db
            .write(WriteOperation::Upsert(Box::new(DbKeyValuePair::History(kind, history))))
    }

    /// Stores the content list of `kind` together with its history in a single write
    pub fn set_content_and_history(
        &self,
        kind: ContentKind,
        items: Vec<ContentItem>,
        history: HistoryMap,
    ) -> Result<(), StaticContentStorageError> {
        self.db.write(WriteOperation::Batch(vec![
            DbKeyValuePair::Content(kind, items),
            DbKeyValuePair::History(kind, history),
        ]))
    }
}

fn unexpected_result<T>(req: DbKey, res: DbValue) -> Result<T, StaticContentStorageError> {
    let msg = format!("Unexpected result for database query {}. Response: {}", req, res);
    error!(target: LOG_TARGET, "{}", msg);
    Err(StaticContentStorageError::UnexpectedResult(msg))
}

fn log_error<T>(req: DbKey, err: StaticContentStorageError) -> Result<T, StaticContentStorageError> {
    error!(target: LOG_TARGET, "Database access error on request: {}: {}", req, err);
    Err(err)
}

impl Display for DbKey {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            DbKey::Content(kind) => write!(f, "Content: {}", kind),
            DbKey::History(kind) => write!(f, "History: {}", kind),
        }
    }
}

impl Display for DbValue {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            DbValue::Content(_) => f.write_str("Content"),
            DbValue::History(_) => f.write_str("History"),
        }
    }
}
