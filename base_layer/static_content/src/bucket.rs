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

use crate::types::{ContentItem, ContentMap};

/// Groups `items` by position, keeping their relative order
pub fn bucket_by_position(items: Vec<ContentItem>) -> ContentMap {
    items.into_iter().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::item;

    #[test]
    fn empty_input_gives_empty_map() {
        let map = bucket_by_position(vec![]);
        assert!(map.is_empty());
        assert_eq!(map.item_count(), 0);
    }

    #[test]
    fn it_groups_and_preserves_order() {
        let items = vec![
            item(2, "home", 1),
            item(5, "earning", 1),
            item(1, "home", 2),
            item(7, "home", 3),
            item(3, "earning", 4),
        ];
        let map = bucket_by_position(items);
        assert_eq!(map.positions().collect::<Vec<_>>(), vec!["home", "earning"]);
        let home = map.get("home").unwrap().iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(home, vec![2, 1, 7]);
        let earning = map.get("earning").unwrap().iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(earning, vec![5, 3]);
        assert!(map.get("history").is_none());
    }

    #[test]
    fn it_preserves_the_total_count() {
        let positions = ["home", "earning", "token", "crowdloan"];
        let items = (0..37u64)
            .map(|i| item(i, positions[(i as usize * 7) % positions.len()], (i % 5) as i64))
            .collect::<Vec<_>>();
        let map = bucket_by_position(items);
        assert_eq!(map.item_count(), 37);
        assert_eq!(map.iter().map(|(_, items)| items.len()).sum::<usize>(), 37);
    }
}
