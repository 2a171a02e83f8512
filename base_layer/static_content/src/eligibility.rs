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

//! Narrowing fetched content down to the items that may be displayed.
//!
//! Filtering runs in two stages. The time and platform stage runs when content is set and its result is stored. The
//! condition stage runs over that stored list whenever the content map is read, since balance and staking state
//! change independently of the content.

use log::*;
use wallet_common::{Os, Platform};

use crate::{
    conditions::ConditionChecker,
    types::{ContentItem, YieldPosition},
    variant::ContentVariant,
};

const LOG_TARGET: &str = "wallet::static_content::eligibility";

/// The platform family and OS of the running client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformContext {
    pub platform: Platform,
    pub os: Os,
}

impl PlatformContext {
    pub fn new(platform: Platform, os: Os) -> Self {
        Self { platform, os }
    }
}

/// Keeps the items inside their display window that target the current platform (and OS, for variants that filter
/// by OS), sorted by ascending priority. Variants without a time and platform stage get `items` back unchanged.
pub fn filter_by_time_and_platform<V: ContentVariant>(
    items: Vec<ContentItem>,
    checker: &dyn ConditionChecker,
    ctx: &PlatformContext,
) -> Vec<ContentItem> {
    if !V::FILTERS_BY_TIME_AND_PLATFORM {
        return items;
    }
    let total = items.len();
    let mut active = items
        .into_iter()
        .filter(|item| checker.check_exist_time(&item.info))
        .filter(|item| item.info.targets_platform(ctx.platform))
        .filter(|item| !V::FILTERS_BY_OS || item.info.targets_os(ctx.os))
        .collect::<Vec<_>>();
    // sort_by_key is stable, equal priorities keep their input order
    active.sort_by_key(|item| item.priority);
    debug!(
        target: LOG_TARGET,
        "{} of {} {} items are active on {}/{}",
        active.len(),
        total,
        V::KIND,
        ctx.platform,
        ctx.os
    );
    active
}

/// An item without conditions always passes. Otherwise it passes when its balance conditions or its earning
/// conditions hold. Only declared lists are evaluated, an absent list never lets an item through.
pub fn passes_conditions(item: &ContentItem, checker: &dyn ConditionChecker, positions: &[YieldPosition]) -> bool {
    if item.conditions.is_empty() {
        return true;
    }
    let balance_pass = item
        .conditions
        .balance
        .as_deref()
        .map_or(false, |c| checker.check_balance_condition(c));
    let earning_pass = item
        .conditions
        .earning
        .as_deref()
        .map_or(false, |c| checker.check_earning_condition(positions, c));
    trace!(
        target: LOG_TARGET,
        "Item {} at {}: balance {}, earning {}",
        item.id,
        item.position,
        balance_pass,
        earning_pass
    );
    balance_pass || earning_pass
}

pub fn filter_by_conditions(
    items: &[ContentItem],
    checker: &dyn ConditionChecker,
    positions: &[YieldPosition],
) -> Vec<ContentItem> {
    items
        .iter()
        .filter(|item| passes_conditions(item, checker, positions))
        .cloned()
        .collect()
}

/// Both stages: the condition stage runs over the output of the time and platform stage
pub fn filter_active<V: ContentVariant>(
    items: Vec<ContentItem>,
    checker: &dyn ConditionChecker,
    ctx: &PlatformContext,
    positions: &[YieldPosition],
) -> Vec<ContentItem> {
    let active = filter_by_time_and_platform::<V>(items, checker, ctx);
    filter_by_conditions(&active, checker, positions)
}
