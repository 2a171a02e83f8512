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

use std::sync::Arc;

use chrono::Utc;
use log::*;
use tokio::sync::broadcast;

use crate::{
    conditions::ConditionChecker,
    config::StaticContentConfig,
    eligibility::PlatformContext,
    error::{StaticContentError, StaticContentStorageError},
    handler::StaticContentHandler,
    storage::database::{StaticContentBackend, StaticContentDatabase},
    types::{ContentItem, ContentKind, ContentMap, HistoryKey, HistoryMap, YieldPosition},
    variant::{Banner, Confirmation, ContentVariant, Popup},
};

const LOG_TARGET: &str = "wallet::static_content::service";

/// Published after every successful write
#[derive(Debug, Clone)]
pub enum StaticContentEvent {
    ContentUpdated {
        kind: ContentKind,
        items: Arc<Vec<ContentItem>>,
    },
    HistoryUpdated {
        kind: ContentKind,
        history: Arc<HistoryMap>,
    },
}

/// Everything the per-variant operations share
struct ServiceContext<T>
where T: StaticContentBackend
{
    db: StaticContentDatabase<T>,
    checker: Arc<dyn ConditionChecker>,
    platform: PlatformContext,
    yield_positions: Arc<Vec<YieldPosition>>,
    event_publisher: broadcast::Sender<Arc<StaticContentEvent>>,
}

impl<T> ServiceContext<T>
where T: StaticContentBackend + 'static
{
    fn restore<V: ContentVariant>(&self) -> Result<StaticContentHandler<V>, StaticContentError> {
        let items = or_empty(self.db.get_content(V::KIND))?;
        let history = or_empty(self.db.get_history(V::KIND))?;
        debug!(
            target: LOG_TARGET,
            "Restored {} {} items and {} history entries",
            items.len(),
            V::KIND,
            history.len()
        );
        Ok(StaticContentHandler::new(items, history))
    }

    fn set_data<V: ContentVariant>(
        &self,
        handler: &mut StaticContentHandler<V>,
        raw: Vec<ContentItem>,
    ) -> Result<(), StaticContentError> {
        let update = handler.prepare_data(raw, self.checker.as_ref(), &self.platform);
        self.db.set_content_and_history(
            V::KIND,
            update.items.as_ref().clone(),
            update.history.as_ref().clone(),
        )?;
        handler.apply_data(&update);
        self.publish(StaticContentEvent::ContentUpdated {
            kind: V::KIND,
            items: update.items,
        });
        self.publish(StaticContentEvent::HistoryUpdated {
            kind: V::KIND,
            history: update.history,
        });
        Ok(())
    }

    fn update_history<V: ContentVariant>(
        &self,
        handler: &mut StaticContentHandler<V>,
        keys: &[HistoryKey],
    ) -> Result<(), StaticContentError> {
        let history = handler.prepare_history(keys, Utc::now().timestamp_millis())?;
        self.db.set_history(V::KIND, history.as_ref().clone())?;
        handler.apply_history(history.clone());
        self.publish(StaticContentEvent::HistoryUpdated { kind: V::KIND, history });
        Ok(())
    }

    fn content_map<V: ContentVariant>(&self, handler: &mut StaticContentHandler<V>) -> Arc<ContentMap> {
        handler.content_map(self.checker.as_ref(), &self.yield_positions)
    }

    fn publish(&self, event: StaticContentEvent) {
        let _size = self.event_publisher.send(Arc::new(event)).map_err(|e| {
            trace!(
                target: LOG_TARGET,
                "Error sending event because there are no subscribers: {:?}",
                e
            );
            e
        });
    }
}

fn or_empty<R: Default>(result: Result<R, StaticContentStorageError>) -> Result<R, StaticContentError> {
    match result {
        Ok(v) => Ok(v),
        Err(StaticContentStorageError::ValueNotFound(_)) => Ok(R::default()),
        Err(e) => Err(e.into()),
    }
}

/// Owns the banner, popup and confirmation state of the wallet.
///
/// Each write is persisted to the backend before the in-memory snapshot is replaced, and then published to event
/// subscribers. The three content kinds are independent: a failed operation on one leaves the others untouched.
pub struct StaticContentService<T>
where T: StaticContentBackend
{
    context: ServiceContext<T>,
    banners: StaticContentHandler<Banner>,
    popups: StaticContentHandler<Popup>,
    confirmations: StaticContentHandler<Confirmation>,
}

impl<T> StaticContentService<T>
where T: StaticContentBackend + 'static
{
    /// Creates the service, restoring any content and history the backend holds
    pub fn new(
        config: &StaticContentConfig,
        backend: T,
        checker: Arc<dyn ConditionChecker>,
    ) -> Result<Self, StaticContentError> {
        let (event_publisher, _) = broadcast::channel(config.event_channel_size.max(1));
        let context = ServiceContext {
            db: StaticContentDatabase::new(backend),
            checker,
            platform: config.platform_context(),
            yield_positions: Arc::new(Vec::new()),
            event_publisher,
        };
        let banners = context.restore::<Banner>()?;
        let popups = context.restore::<Popup>()?;
        let confirmations = context.restore::<Confirmation>()?;
        info!(
            target: LOG_TARGET,
            "Static content service started for {}/{}", context.platform.platform, context.platform.os
        );
        Ok(Self {
            context,
            banners,
            popups,
            confirmations,
        })
    }

    pub fn get_event_stream(&self) -> broadcast::Receiver<Arc<StaticContentEvent>> {
        self.context.event_publisher.subscribe()
    }

    pub fn platform_context(&self) -> PlatformContext {
        self.context.platform
    }

    pub fn set_banner_data(&mut self, raw: Vec<ContentItem>) -> Result<(), StaticContentError> {
        self.context.set_data(&mut self.banners, raw)
    }

    pub fn set_popup_data(&mut self, raw: Vec<ContentItem>) -> Result<(), StaticContentError> {
        self.context.set_data(&mut self.popups, raw)
    }

    pub fn set_confirmation_data(&mut self, raw: Vec<ContentItem>) -> Result<(), StaticContentError> {
        self.context.set_data(&mut self.confirmations, raw)
    }

    /// Records that the banners under `keys` were shown
    pub fn update_banner_history(&mut self, keys: &[HistoryKey]) -> Result<(), StaticContentError> {
        self.context.update_history(&mut self.banners, keys)
    }

    pub fn update_popup_history(&mut self, key: &HistoryKey) -> Result<(), StaticContentError> {
        self.context.update_history(&mut self.popups, std::slice::from_ref(key))
    }

    pub fn update_confirmation_history(&mut self, key: &HistoryKey) -> Result<(), StaticContentError> {
        self.context
            .update_history(&mut self.confirmations, std::slice::from_ref(key))
    }

    pub fn banner_map(&mut self) -> Arc<ContentMap> {
        self.context.content_map(&mut self.banners)
    }

    pub fn popup_map(&mut self) -> Arc<ContentMap> {
        self.context.content_map(&mut self.popups)
    }

    pub fn confirmation_map(&mut self) -> Arc<ContentMap> {
        self.context.content_map(&mut self.confirmations)
    }

    pub fn content(&self, kind: ContentKind) -> Arc<Vec<ContentItem>> {
        match kind {
            ContentKind::Banner => self.banners.items().clone(),
            ContentKind::Popup => self.popups.items().clone(),
            ContentKind::Confirmation => self.confirmations.items().clone(),
        }
    }

    pub fn history(&self, kind: ContentKind) -> Arc<HistoryMap> {
        match kind {
            ContentKind::Banner => self.banners.history().clone(),
            ContentKind::Popup => self.popups.history().clone(),
            ContentKind::Confirmation => self.confirmations.history().clone(),
        }
    }

    /// Replaces the staking positions earning conditions are evaluated against
    pub fn set_yield_positions(&mut self, positions: Vec<YieldPosition>) {
        debug!(target: LOG_TARGET, "{} yield positions set", positions.len());
        self.context.yield_positions = Arc::new(positions);
    }

    /// Replaces the condition checker, e.g. once balances have changed. Cached content maps are dropped.
    pub fn set_condition_checker(&mut self, checker: Arc<dyn ConditionChecker>) {
        self.context.checker = checker;
        self.banners.invalidate();
        self.popups.invalidate();
        self.confirmations.invalidate();
        debug!(target: LOG_TARGET, "Condition checker replaced, content maps invalidated");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        storage::{
            database::{DbKey, DbKeyValuePair, DbValue, WriteOperation},
            memory_db::MemoryDatabase,
        },
        test_utils::{item, FixedConditionChecker},
    };

    /// Accepts content writes and refuses anything that touches history
    #[derive(Clone, Default)]
    struct HistoryRejectingDatabase {
        inner: MemoryDatabase,
    }

    impl StaticContentBackend for HistoryRejectingDatabase {
        fn fetch(&self, key: &DbKey) -> Result<Option<DbValue>, StaticContentStorageError> {
            self.inner.fetch(key)
        }

        fn write(&self, op: WriteOperation) -> Result<(), StaticContentStorageError> {
            let is_history = |kvp: &DbKeyValuePair| matches!(kvp, DbKeyValuePair::History(..));
            let touches_history = match &op {
                WriteOperation::Upsert(kvp) => is_history(&**kvp),
                WriteOperation::Batch(kvps) => kvps.iter().any(is_history),
            };
            if touches_history {
                return Err(StaticContentStorageError::UnexpectedResult(
                    "history writes are refused".to_string(),
                ));
            }
            self.inner.write(op)
        }
    }

    fn service(checker: FixedConditionChecker) -> StaticContentService<MemoryDatabase> {
        StaticContentService::new(&StaticContentConfig::default(), MemoryDatabase::new(), Arc::new(checker)).unwrap()
    }

    #[test]
    fn it_publishes_content_and_history() {
        let mut service = service(FixedConditionChecker::passing());
        let mut events = service.get_event_stream();
        service.set_popup_data(vec![item(1, "home", 1)]).unwrap();

        match events.try_recv().unwrap().as_ref() {
            StaticContentEvent::ContentUpdated { kind, items } => {
                assert_eq!(*kind, ContentKind::Popup);
                assert_eq!(items.len(), 1);
            },
            other => panic!("Unexpected event: {:?}", other),
        }
        match events.try_recv().unwrap().as_ref() {
            StaticContentEvent::HistoryUpdated { kind, history } => {
                assert_eq!(*kind, ContentKind::Popup);
                assert!(history.contains_key(&HistoryKey::from("home-1")));
            },
            other => panic!("Unexpected event: {:?}", other),
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn it_works_without_subscribers() {
        let mut service = service(FixedConditionChecker::passing());
        service.set_banner_data(vec![item(1, "home", 1)]).unwrap();
        service.update_banner_history(&[HistoryKey::from("home-1")]).unwrap();
        assert_eq!(service.history(ContentKind::Banner)[&HistoryKey::from("home-1")].show_times, 1);
    }

    #[test]
    fn replacing_the_checker_refreshes_maps() {
        let conditional = item(1, "home", 1).with_conditions(crate::types::ContentConditions {
            balance: Some(vec![]),
            earning: None,
        });
        let mut service = service(FixedConditionChecker::passing().with_balance(false));
        service.set_banner_data(vec![conditional]).unwrap();
        assert!(service.banner_map().is_empty());

        service.set_condition_checker(Arc::new(FixedConditionChecker::passing()));
        assert_eq!(service.banner_map().item_count(), 1);
    }

    #[test]
    fn a_failed_write_leaves_storage_and_memory_untouched() {
        let backend = HistoryRejectingDatabase::default();
        let mut service = StaticContentService::new(
            &StaticContentConfig::default(),
            backend.clone(),
            Arc::new(FixedConditionChecker::passing()),
        )
        .unwrap();
        let mut events = service.get_event_stream();

        assert!(service.set_banner_data(vec![item(1, "home", 1)]).is_err());

        let stored = StaticContentDatabase::new(backend.inner);
        assert!(matches!(
            stored.get_content(ContentKind::Banner),
            Err(StaticContentStorageError::ValueNotFound(_))
        ));
        assert!(matches!(
            stored.get_history(ContentKind::Banner),
            Err(StaticContentStorageError::ValueNotFound(_))
        ));
        assert!(service.content(ContentKind::Banner).is_empty());
        assert!(service.history(ContentKind::Banner).is_empty());
        assert!(events.try_recv().is_err());
    }
}
