use crate::names::normalize;
use crate::standings::{UNRANKED, parse_rank_text};

/// What a table adapter can observe about one `<tr>` without interpreting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFacts {
    /// Row carries the injected-row marker class.
    pub injected: bool,
    /// Text of the first `/users/` link, read from a copy with star controls removed.
    pub user_link_text: Option<String>,
    /// Row contains at least one `<th>`.
    pub has_heading_cell: bool,
    /// Visible text of the first cell.
    pub first_cell_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// One of our own synthetic rows.
    Injected,
    /// Column headings.
    Header,
    User { name: String, rank: u32 },
    /// Divider or supplementary row.
    Plain,
}

pub fn classify(facts: &RowFacts) -> RowKind {
    if facts.injected {
        return RowKind::Injected;
    }
    match &facts.user_link_text {
        Some(text) => RowKind::User {
            name: normalize(text),
            rank: facts
                .first_cell_text
                .as_deref()
                .map(parse_rank_text)
                .unwrap_or(UNRANKED),
        },
        None if facts.has_heading_cell => RowKind::Header,
        None => RowKind::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_wins_over_everything() {
        let facts = RowFacts {
            injected: true,
            user_link_text: Some("alice".into()),
            has_heading_cell: true,
            first_cell_text: Some("1".into()),
        };
        assert_eq!(classify(&facts), RowKind::Injected);
    }

    #[test]
    fn heading_without_link_is_header() {
        let facts = RowFacts {
            has_heading_cell: true,
            first_cell_text: Some("Rank".into()),
            ..Default::default()
        };
        assert_eq!(classify(&facts), RowKind::Header);
    }

    #[test]
    fn user_row_with_heading_rank_cell_is_still_a_user() {
        let facts = RowFacts {
            user_link_text: Some("Alice ⭐".into()),
            has_heading_cell: true,
            first_cell_text: Some("3".into()),
            ..Default::default()
        };
        assert_eq!(
            classify(&facts),
            RowKind::User {
                name: "alice".into(),
                rank: 3
            }
        );
    }

    #[test]
    fn unreadable_rank_sorts_last() {
        let facts = RowFacts {
            user_link_text: Some("bob".into()),
            first_cell_text: Some("-".into()),
            ..Default::default()
        };
        assert_eq!(
            classify(&facts),
            RowKind::User {
                name: "bob".into(),
                rank: UNRANKED
            }
        );

        let no_cell = RowFacts {
            user_link_text: Some("bob".into()),
            ..Default::default()
        };
        assert!(matches!(classify(&no_cell), RowKind::User { rank: UNRANKED, .. }));
    }

    #[test]
    fn row_without_link_or_heading_is_plain() {
        assert_eq!(classify(&RowFacts::default()), RowKind::Plain);
    }
}
