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

use std::{marker::PhantomData, sync::Arc};

use log::*;

use crate::{
    bucket::bucket_by_position,
    conditions::ConditionChecker,
    eligibility::{filter_by_conditions, filter_by_time_and_platform, PlatformContext},
    error::StaticContentError,
    history::{init_history, record_shown},
    types::{ContentItem, ContentMap, HistoryKey, HistoryMap, YieldPosition},
    variant::ContentVariant,
};

const LOG_TARGET: &str = "wallet::static_content::handler";

/// The snapshots produced by [`StaticContentHandler::set_data`]
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub items: Arc<Vec<ContentItem>>,
    pub history: Arc<HistoryMap>,
}

struct CachedContentMap {
    items: Arc<Vec<ContentItem>>,
    history: Arc<HistoryMap>,
    positions: Arc<Vec<YieldPosition>>,
    map: Arc<ContentMap>,
}

impl CachedContentMap {
    fn is_current(
        &self,
        items: &Arc<Vec<ContentItem>>,
        history: &Arc<HistoryMap>,
        positions: &Arc<Vec<YieldPosition>>,
    ) -> bool {
        Arc::ptr_eq(&self.items, items) && Arc::ptr_eq(&self.history, history) && Arc::ptr_eq(&self.positions, positions)
    }
}

/// Active content and impression history for one content variant.
///
/// State is held as immutable snapshots that are replaced on every update. The content map is cached and recomputed
/// only once the content, the history or the yield positions it was computed from have been replaced.
pub struct StaticContentHandler<V> {
    items: Arc<Vec<ContentItem>>,
    history: Arc<HistoryMap>,
    cache: Option<CachedContentMap>,
    _variant: PhantomData<V>,
}

impl<V: ContentVariant> StaticContentHandler<V> {
    pub fn new(items: Vec<ContentItem>, history: HistoryMap) -> Self {
        Self {
            items: Arc::new(items),
            history: Arc::new(history),
            cache: None,
            _variant: PhantomData,
        }
    }

    pub fn items(&self) -> &Arc<Vec<ContentItem>> {
        &self.items
    }

    pub fn history(&self) -> &Arc<HistoryMap> {
        &self.history
    }

    /// Computes the snapshots for newly fetched content without applying them: the time and platform stage of the
    /// eligibility filter, and the history seeded with every fetched item.
    pub fn prepare_data(
        &self,
        raw: Vec<ContentItem>,
        checker: &dyn ConditionChecker,
        ctx: &PlatformContext,
    ) -> ContentUpdate {
        let history = init_history::<V>(&raw, &self.history);
        let items = filter_by_time_and_platform::<V>(raw, checker, ctx);
        ContentUpdate {
            items: Arc::new(items),
            history: Arc::new(history),
        }
    }

    /// Computes the history after the content under `keys` has been shown at `now` without applying it
    pub fn prepare_history(&self, keys: &[HistoryKey], now: i64) -> Result<Arc<HistoryMap>, StaticContentError> {
        record_shown(keys, &self.history, now).map(Arc::new)
    }

    pub fn apply_data(&mut self, update: &ContentUpdate) {
        self.items = update.items.clone();
        self.history = update.history.clone();
        debug!(
            target: LOG_TARGET,
            "{} content replaced: {} active items, {} history entries",
            V::KIND,
            self.items.len(),
            self.history.len()
        );
    }

    pub fn apply_history(&mut self, history: Arc<HistoryMap>) {
        self.history = history;
    }

    pub fn set_data(
        &mut self,
        raw: Vec<ContentItem>,
        checker: &dyn ConditionChecker,
        ctx: &PlatformContext,
    ) -> ContentUpdate {
        let update = self.prepare_data(raw, checker, ctx);
        self.apply_data(&update);
        update
    }

    pub fn update_history(&mut self, keys: &[HistoryKey], now: i64) -> Result<Arc<HistoryMap>, StaticContentError> {
        let history = self.prepare_history(keys, now)?;
        self.apply_history(history.clone());
        Ok(history)
    }

    /// Active content that passes its conditions, grouped by position
    pub fn content_map(
        &mut self,
        checker: &dyn ConditionChecker,
        positions: &Arc<Vec<YieldPosition>>,
    ) -> Arc<ContentMap> {
        if let Some(cached) = &self.cache {
            if cached.is_current(&self.items, &self.history, positions) {
                return cached.map.clone();
            }
        }
        let map = Arc::new(bucket_by_position(filter_by_conditions(&self.items, checker, positions)));
        trace!(
            target: LOG_TARGET,
            "{} content map recomputed: {} items in {} positions",
            V::KIND,
            map.item_count(),
            map.len()
        );
        self.cache = Some(CachedContentMap {
            items: self.items.clone(),
            history: self.history.clone(),
            positions: positions.clone(),
            map: map.clone(),
        });
        map
    }

    /// Drops the cached content map, e.g. after the condition checker has been replaced
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

impl<V: ContentVariant> Default for StaticContentHandler<V> {
    fn default() -> Self {
        Self::new(Vec::new(), HistoryMap::new())
    }
}
