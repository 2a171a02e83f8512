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

//! Content variants. Banners, popups and confirmations share one item shape and differ only in how they are
//! filtered and how their history is keyed.

use crate::types::{ContentItem, ContentKind, HistoryKey};

pub trait ContentVariant: Send + Sync + 'static {
    const KIND: ContentKind;
    /// Apply the exist-time and platform checks and sort by priority
    const FILTERS_BY_TIME_AND_PLATFORM: bool;
    /// Additionally require a declared `info.os` to match the runtime OS
    const FILTERS_BY_OS: bool;

    fn history_key(item: &ContentItem) -> HistoryKey {
        HistoryKey::for_position(&item.position, item.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Banner;

impl ContentVariant for Banner {
    const FILTERS_BY_OS: bool = false;
    const FILTERS_BY_TIME_AND_PLATFORM: bool = true;
    const KIND: ContentKind = ContentKind::Banner;
}

#[derive(Debug, Clone, Copy)]
pub struct Popup;

impl ContentVariant for Popup {
    const FILTERS_BY_OS: bool = true;
    const FILTERS_BY_TIME_AND_PLATFORM: bool = true;
    const KIND: ContentKind = ContentKind::Popup;
}

#[derive(Debug, Clone, Copy)]
pub struct Confirmation;

impl ContentVariant for Confirmation {
    const FILTERS_BY_OS: bool = false;
    const FILTERS_BY_TIME_AND_PLATFORM: bool = false;
    const KIND: ContentKind = ContentKind::Confirmation;

    fn history_key(item: &ContentItem) -> HistoryKey {
        HistoryKey::for_id(item.id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::ContentInfo;

    #[test]
    fn history_keys_per_variant() {
        let item = ContentItem::new(7, "home", 1, ContentInfo::default());
        assert_eq!(Banner::history_key(&item).as_str(), "home-7");
        assert_eq!(Popup::history_key(&item).as_str(), "home-7");
        assert_eq!(Confirmation::history_key(&item).as_str(), "7");
    }
}
