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

use serde::{Deserialize, Serialize};

use crate::types::ContentItem;

/// Eligible content grouped by display position.
///
/// Positions are kept in the order they first appear in the bucketed input, and items keep their input order within
/// a position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentMap {
    buckets: Vec<(String, Vec<ContentItem>)>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` to the bucket for its position, creating the bucket if needed
    pub fn push(&mut self, item: ContentItem) {
        match self.buckets.iter_mut().find(|(p, _)| *p == item.position) {
            Some((_, items)) => items.push(item),
            None => self.buckets.push((item.position.clone(), vec![item])),
        }
    }

    pub fn get(&self, position: &str) -> Option<&[ContentItem]> {
        self.buckets
            .iter()
            .find(|(p, _)| p == position)
            .map(|(_, items)| items.as_slice())
    }

    pub fn positions(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(p, _)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ContentItem])> {
        self.buckets.iter().map(|(p, items)| (p.as_str(), items.as_slice()))
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of items across all positions
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|(_, items)| items.len()).sum()
    }
}

impl FromIterator<ContentItem> for ContentMap {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        let mut map = ContentMap::new();
        for item in iter {
            map.push(item);
        }
        map
    }
}
