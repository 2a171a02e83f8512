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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wallet_common::{Os, Platform};

pub type ContentId = u64;

/// A banner, popup or confirmation as delivered by the content service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    /// Named UI slot the item is rendered in
    pub position: String,
    /// Display order within a position, lower values are shown first
    #[serde(default)]
    pub priority: i64,
    pub info: ContentInfo,
    #[serde(default)]
    pub conditions: ContentConditions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ContentItem {
    pub fn new<P: Into<String>>(id: ContentId, position: P, priority: i64, info: ContentInfo) -> Self {
        Self {
            id,
            position: position.into(),
            priority,
            info,
            conditions: ContentConditions::default(),
            content: None,
        }
    }

    pub fn with_conditions(mut self, conditions: ContentConditions) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Display metadata used by the time and platform checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInfo {
    #[serde(default)]
    pub name: String,
    /// Platform families the item targets, e.g. `mobile`, `extension`
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_time: Option<DateTime<Utc>>,
}

impl ContentInfo {
    pub fn for_platforms<I, S>(platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            platforms: platforms.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn targets_platform(&self, platform: Platform) -> bool {
        self.platforms.iter().any(|p| p == platform.as_key_str())
    }

    /// True when no OS restriction is declared or the declared OS matches `os` case-insensitively. A blank `os` declares
    /// no restriction.
    pub fn targets_os(&self, os: Os) -> bool {
        self.os
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map_or(true, |name| os.matches(name))
    }
}

/// Balance and earning conditions. An item with neither list set is unconditional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentConditions {
    #[serde(rename = "condition-balance", default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Vec<BalanceCondition>>,
    #[serde(rename = "condition-earning", default, skip_serializing_if = "Option::is_none")]
    pub earning: Option<Vec<EarningCondition>>,
}

impl ContentConditions {
    pub fn is_empty(&self) -> bool {
        self.balance.is_none() && self.earning.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    /// Evaluates `actual <op> expected`
    pub fn holds(self, actual: f64, expected: f64) -> bool {
        match self {
            Comparison::Eq => (actual - expected).abs() < f64::EPSILON,
            Comparison::Gt => actual > expected,
            Comparison::Gte => actual >= expected,
            Comparison::Lt => actual < expected,
            Comparison::Lte => actual <= expected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceCondition {
    /// Chain asset slug the balance is read from
    pub chain_asset: String,
    pub comparison: Comparison,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningCondition {
    /// Slug of the yield pool whose staked total is compared
    pub pool_slug: String,
    pub comparison: Comparison,
    pub value: f64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_deserializes_content_service_json() {
        let json = r#"{
            "id": 12,
            "position": "home",
            "priority": 3,
            "info": {
                "name": "Stake now",
                "platforms": ["mobile", "extension"],
                "os": "iOS",
                "start_time": "2024-01-01T00:00:00Z",
                "stop_time": "2024-02-01T00:00:00Z"
            },
            "conditions": {
                "condition-balance": [{"chain_asset": "polkadot-NATIVE-DOT", "comparison": "gte", "value": 1.5}]
            }
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 12);
        assert_eq!(item.position, "home");
        assert_eq!(item.priority, 3);
        assert!(item.info.targets_platform(Platform::Mobile));
        assert!(!item.info.targets_platform(Platform::Webapp));
        assert!(item.info.targets_os(Os::Ios));
        assert!(!item.info.targets_os(Os::Android));
        let balance = item.conditions.balance.as_ref().unwrap();
        assert_eq!(balance[0].comparison, Comparison::Gte);
        assert!(item.conditions.earning.is_none());
        assert!(!item.conditions.is_empty());
    }

    #[test]
    fn missing_conditions_are_empty() {
        let json = r#"{"id": 1, "position": "home", "info": {"platforms": ["mobile"]}}"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert!(item.conditions.is_empty());
        assert_eq!(item.priority, 0);
        assert!(item.info.targets_os(Os::Android));
    }

    #[test]
    fn comparisons() {
        assert!(Comparison::Gt.holds(2.0, 1.0));
        assert!(!Comparison::Gt.holds(1.0, 1.0));
        assert!(Comparison::Gte.holds(1.0, 1.0));
        assert!(Comparison::Lt.holds(0.5, 1.0));
        assert!(Comparison::Lte.holds(1.0, 1.0));
        assert!(Comparison::Eq.holds(1.0, 1.0));
        assert!(!Comparison::Eq.holds(1.0, 1.1));
    }
}
