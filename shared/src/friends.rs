use std::collections::HashSet;

use crate::names::normalize;

/// Normalized view of the persisted friend list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendSet {
    keys: HashSet<String>,
}

impl FriendSet {
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Self {
        Self {
            keys: raw
                .iter()
                .map(|name| normalize(name.as_ref()))
                .filter(|key| !key.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        !key.is_empty() && self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarToggle {
    Added(Vec<String>),
    Removed(Vec<String>),
}

impl StarToggle {
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::Added(list) | Self::Removed(list) => list,
        }
    }
}

/// Flip `key` in the raw persisted list.
///
/// Removal drops every raw entry that normalizes to `key`; addition appends
/// the key itself.
pub fn toggle_friend(list: &[String], key: &str) -> StarToggle {
    if list.iter().any(|raw| normalize(raw) == key) {
        StarToggle::Removed(
            list.iter()
                .filter(|raw| normalize(raw) != key)
                .cloned()
                .collect(),
        )
    } else {
        let mut next = list.to_vec();
        next.push(key.to_string());
        StarToggle::Added(next)
    }
}

/// Parse the popup editor's newline-separated text into a raw friend list.
pub fn parse_friend_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
