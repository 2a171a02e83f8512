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

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::*;

use crate::types::{BalanceCondition, ContentInfo, EarningCondition, YieldPosition};

const LOG_TARGET: &str = "wallet::static_content::conditions";

/// Evaluates the display conditions attached to content. Hosts provide the balance and staking state these checks
/// depend on.
pub trait ConditionChecker: Send + Sync {
    /// Whether the item is inside its display window
    fn check_exist_time(&self, info: &ContentInfo) -> bool;
    fn check_balance_condition(&self, conditions: &[BalanceCondition]) -> bool;
    fn check_earning_condition(&self, positions: &[YieldPosition], conditions: &[EarningCondition]) -> bool;
}

/// A [`ConditionChecker`] over a fixed snapshot of free balances, keyed by chain asset slug.
///
/// Balance and earning lists pass when any one of their conditions holds. Assets and pools the snapshot does not know
/// about count as zero.
#[derive(Debug, Clone, Default)]
pub struct StandardConditionChecker {
    balances: HashMap<String, f64>,
}

impl StandardConditionChecker {
    pub fn new(balances: HashMap<String, f64>) -> Self {
        Self { balances }
    }

    pub fn with_balance<S: Into<String>>(mut self, chain_asset: S, balance: f64) -> Self {
        self.balances.insert(chain_asset.into(), balance);
        self
    }

    pub fn check_exist_time_at(&self, info: &ContentInfo, now: DateTime<Utc>) -> bool {
        let started = info.start_time.map_or(true, |start| start <= now);
        let not_stopped = info.stop_time.map_or(true, |stop| now <= stop);
        started && not_stopped
    }

    fn balance_of(&self, chain_asset: &str) -> f64 {
        self.balances.get(chain_asset).copied().unwrap_or_default()
    }
}

impl ConditionChecker for StandardConditionChecker {
    fn check_exist_time(&self, info: &ContentInfo) -> bool {
        self.check_exist_time_at(info, Utc::now())
    }

    fn check_balance_condition(&self, conditions: &[BalanceCondition]) -> bool {
        conditions.iter().any(|c| {
            let balance = self.balance_of(&c.chain_asset);
            let holds = c.comparison.holds(balance, c.value);
            trace!(
                target: LOG_TARGET,
                "Balance condition {} {:?} {} against {}: {}",
                c.chain_asset,
                c.comparison,
                c.value,
                balance,
                holds
            );
            holds
        })
    }

    fn check_earning_condition(&self, positions: &[YieldPosition], conditions: &[EarningCondition]) -> bool {
        conditions.iter().any(|c| {
            let stake = positions
                .iter()
                .filter(|p| p.slug == c.pool_slug)
                .map(|p| p.total_stake)
                .sum::<f64>();
            c.comparison.holds(stake, c.value)
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;
    use crate::types::Comparison;

    fn balance(asset: &str, comparison: Comparison, value: f64) -> BalanceCondition {
        BalanceCondition {
            chain_asset: asset.to_string(),
            comparison,
            value,
        }
    }

    #[test]
    fn exist_time_window() {
        let checker = StandardConditionChecker::default();
        let now = Utc::now();
        let mut info = ContentInfo::default();
        assert!(checker.check_exist_time_at(&info, now));

        info.start_time = Some(now - Duration::days(1));
        info.stop_time = Some(now + Duration::days(1));
        assert!(checker.check_exist_time_at(&info, now));

        info.start_time = Some(now + Duration::hours(1));
        assert!(!checker.check_exist_time_at(&info, now));

        info.start_time = None;
        info.stop_time = Some(now - Duration::seconds(1));
        assert!(!checker.check_exist_time_at(&info, now));
    }

    #[test]
    fn balance_conditions_pass_when_any_holds() {
        let checker = StandardConditionChecker::default().with_balance("DOT", 10.0);
        assert!(checker.check_balance_condition(&[balance("DOT", Comparison::Gte, 5.0)]));
        assert!(!checker.check_balance_condition(&[balance("DOT", Comparison::Lt, 5.0)]));
        assert!(checker.check_balance_condition(&[
            balance("DOT", Comparison::Lt, 5.0),
            balance("KSM", Comparison::Eq, 0.0),
        ]));
        assert!(!checker.check_balance_condition(&[]));
    }

    #[test]
    fn earning_conditions_sum_matching_positions() {
        let checker = StandardConditionChecker::default();
        let positions = vec![
            YieldPosition::new("DOT___native_staking", 3.0),
            YieldPosition::new("DOT___native_staking", 2.0),
            YieldPosition::new("KSM___nomination_pool", 100.0),
        ];
        let condition = EarningCondition {
            pool_slug: "DOT___native_staking".to_string(),
            comparison: Comparison::Gte,
            value: 5.0,
        };
        assert!(checker.check_earning_condition(&positions, &[condition.clone()]));
        assert!(!checker.check_earning_condition(&[], &[condition]));
    }
}
