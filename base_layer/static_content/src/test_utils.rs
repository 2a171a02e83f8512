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

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    conditions::ConditionChecker,
    types::{BalanceCondition, ContentId, ContentInfo, ContentItem, EarningCondition, YieldPosition},
};

/// A mobile item named `item-{id}` without conditions or time window
pub fn item(id: ContentId, position: &str, priority: i64) -> ContentItem {
    let mut info = ContentInfo::for_platforms(["mobile"]);
    info.name = format!("item-{}", id);
    ContentItem::new(id, position, priority, info)
}

/// Answers every check with a fixed value. Items named in `expired` fail the exist-time check.
#[derive(Debug, Clone, Default)]
pub struct FixedConditionChecker {
    exist_time: bool,
    balance: bool,
    earning: bool,
    expired: Vec<String>,
}

impl FixedConditionChecker {
    pub fn passing() -> Self {
        Self {
            exist_time: true,
            balance: true,
            earning: true,
            expired: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_exist_time(mut self, pass: bool) -> Self {
        self.exist_time = pass;
        self
    }

    pub fn with_balance(mut self, pass: bool) -> Self {
        self.balance = pass;
        self
    }

    pub fn with_earning(mut self, pass: bool) -> Self {
        self.earning = pass;
        self
    }

    pub fn with_expired(mut self, ids: Vec<ContentId>) -> Self {
        self.expired = ids.into_iter().map(|id| format!("item-{}", id)).collect();
        self
    }
}

impl ConditionChecker for FixedConditionChecker {
    fn check_exist_time(&self, info: &ContentInfo) -> bool {
        self.exist_time && !self.expired.contains(&info.name)
    }

    fn check_balance_condition(&self, _: &[BalanceCondition]) -> bool {
        self.balance
    }

    fn check_earning_condition(&self, _: &[YieldPosition], _: &[EarningCondition]) -> bool {
        self.earning
    }
}

/// Counts balance checks, answering every check with `pass`
#[derive(Debug, Default)]
pub struct CountingConditionChecker {
    pass: bool,
    balance_calls: AtomicUsize,
}

impl CountingConditionChecker {
    pub fn new(pass: bool) -> Self {
        Self {
            pass,
            balance_calls: AtomicUsize::new(0),
        }
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }
}

impl ConditionChecker for CountingConditionChecker {
    fn check_exist_time(&self, _: &ContentInfo) -> bool {
        self.pass
    }

    fn check_balance_condition(&self, _: &[BalanceCondition]) -> bool {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.pass
    }

    fn check_earning_condition(&self, _: &[YieldPosition], _: &[EarningCondition]) -> bool {
        self.pass
    }
}
