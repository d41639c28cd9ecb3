use std::collections::HashMap;

use crate::standings::StandingsEntry;

/// Where a collected friend's row comes from when it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSource {
    /// Inner markup captured from the friend's native row.
    Markup(String),
    /// Standings API entry, rendered through [`crate::markup::entry_row_html`].
    Api(StandingsEntry),
}

impl RowSource {
    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Markup(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FriendRecord {
    pub name: String,
    pub rank: u32,
    pub source: RowSource,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    /// An API-backed record now carries captured markup.
    Upgraded,
    Unchanged,
}

/// Friends discovered so far in this friends-only session, keyed by normalized name.
#[derive(Debug, Default)]
pub struct FriendCollector {
    records: HashMap<String, FriendRecord>,
    next_seq: u64,
}

impl FriendCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, name: &str, rank: u32, source: RowSource) -> MergeOutcome {
        if let Some(existing) = self.records.get_mut(name) {
            if !existing.source.is_markup() && source.is_markup() {
                existing.source = source;
                return MergeOutcome::Upgraded;
            }
            return MergeOutcome::Unchanged;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.insert(
            name.to_string(),
            FriendRecord {
                name: name.to_string(),
                rank,
                source,
                seq,
            },
        );
        MergeOutcome::Inserted
    }

    pub fn remove(&mut self, name: &str) -> Option<FriendRecord> {
        self.records.remove(name)
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.next_seq = 0;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FriendRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records by ascending rank; equal ranks keep first-seen order.
    pub fn snapshot_sorted(&self) -> Vec<&FriendRecord> {
        let mut sorted: Vec<&FriendRecord> = self.records.values().collect();
        sorted.sort_by_key(|record| (record.rank, record.seq));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(rank: i64) -> RowSource {
        RowSource::Api(StandingsEntry {
            rank: Some(rank),
            ..Default::default()
        })
    }

    fn markup(html: &str) -> RowSource {
        RowSource::Markup(html.to_string())
    }

    #[test]
    fn first_merge_inserts() {
        let mut collector = FriendCollector::new();
        assert_eq!(collector.merge("alice", 3, markup("<td>a</td>")), MergeOutcome::Inserted);
        assert!(collector.contains("alice"));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn markup_upgrades_api_record_in_place() {
        let mut collector = FriendCollector::new();
        collector.merge("alice", 5, api(5));
        assert_eq!(
            collector.merge("alice", 7, markup("<td>native</td>")),
            MergeOutcome::Upgraded
        );
        let record = collector.get("alice").expect("record");
        assert_eq!(record.source, markup("<td>native</td>"));
        assert_eq!(record.rank, 5);
    }

    #[test]
    fn markup_is_never_downgraded_or_overwritten() {
        let mut collector = FriendCollector::new();
        collector.merge("alice", 3, markup("<td>first</td>"));

        let followups = [api(3), markup("<td>second</td>"), api(1), api(9)];
        for source in followups {
            assert_eq!(collector.merge("alice", 1, source), MergeOutcome::Unchanged);
            assert_eq!(
                collector.get("alice").map(|r| &r.source),
                Some(&markup("<td>first</td>"))
            );
        }
    }

    #[test]
    fn api_merge_over_api_record_is_unchanged() {
        let mut collector = FriendCollector::new();
        collector.merge("bob", 2, api(2));
        assert_eq!(collector.merge("bob", 1, api(1)), MergeOutcome::Unchanged);
        assert_eq!(collector.get("bob").map(|r| r.rank), Some(2));
    }

    #[test]
    fn snapshot_is_sorted_and_stable_for_ties() {
        let mut collector = FriendCollector::new();
        collector.merge("carol", 4, api(4));
        collector.merge("alice", 2, api(2));
        collector.merge("zed", 4, api(4));
        collector.merge("bob", 4, api(4));
        collector.merge("dave", 1, api(1));

        let names = |c: &FriendCollector| -> Vec<String> {
            c.snapshot_sorted().iter().map(|r| r.name.clone()).collect()
        };
        let expected = vec!["dave", "alice", "carol", "zed", "bob"];
        assert_eq!(names(&collector), expected);
        assert_eq!(names(&collector), expected);

        let ranks: Vec<u32> = collector.snapshot_sorted().iter().map(|r| r.rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn remove_and_reset() {
        let mut collector = FriendCollector::new();
        collector.merge("alice", 1, api(1));
        collector.merge("bob", 2, api(2));

        assert!(collector.remove("alice").is_some());
        assert!(collector.remove("alice").is_none());
        assert_eq!(collector.len(), 1);

        collector.reset();
        assert!(collector.is_empty());
        assert!(collector.snapshot_sorted().is_empty());
    }
}
