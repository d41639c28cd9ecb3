//! In-memory standings table for exercising the session without a DOM.

use crate::row::RowFacts;
use crate::table::StandingsTable;

#[derive(Debug, Clone, Default)]
pub struct FakeRow {
    pub link_text: Option<String>,
    pub heading: bool,
    pub first_cell: Option<String>,
    pub markup: String,
    pub injected: bool,
    pub hidden: bool,
    pub highlighted: bool,
}

impl FakeRow {
    pub fn header() -> Self {
        Self {
            heading: true,
            first_cell: Some("Rank".into()),
            markup: "<th>Rank</th><th>User</th><th>Score</th>".into(),
            ..Default::default()
        }
    }

    pub fn user(name: &str, rank: u32) -> Self {
        Self {
            link_text: Some(name.into()),
            heading: true,
            first_cell: Some(rank.to_string()),
            markup: format!(
                r#"<th>{rank}</th><th><a href="/users/{name}">{name}</a></th><td>0</td>"#
            ),
            ..Default::default()
        }
    }

    pub fn plain() -> Self {
        Self {
            markup: r#"<td colspan="3">...</td>"#.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeTable {
    pub rows: Vec<FakeRow>,
    /// Inner markup of injected rows in insertion order.
    pub injected: Vec<String>,
    pub rebuilds: usize,
}

impl FakeTable {
    pub fn new(rows: Vec<FakeRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn native_user_rows(&self) -> impl Iterator<Item = &FakeRow> {
        self.rows
            .iter()
            .filter(|row| !row.injected && row.link_text.is_some())
    }

    /// The host replaces the table body: injected rows vanish and native rows
    /// come back with fresh styles.
    pub fn host_rerender(&mut self) {
        self.rows.retain(|row| !row.injected);
        for row in &mut self.rows {
            row.hidden = false;
            row.highlighted = false;
        }
        self.injected.clear();
    }
}

impl StandingsTable for FakeTable {
    type Row = usize;

    fn rows(&self) -> Vec<usize> {
        (0..self.rows.len()).collect()
    }

    fn facts(&self, row: &usize) -> RowFacts {
        let row = &self.rows[*row];
        RowFacts {
            injected: row.injected,
            user_link_text: row.link_text.clone(),
            has_heading_cell: row.heading,
            first_cell_text: row.first_cell.clone(),
        }
    }

    fn row_markup(&self, row: &usize) -> String {
        self.rows[*row].markup.clone()
    }

    fn set_hidden(&mut self, row: &usize, hidden: bool) {
        self.rows[*row].hidden = hidden;
    }

    fn set_highlighted(&mut self, row: &usize, highlighted: bool) {
        self.rows[*row].highlighted = highlighted;
    }

    fn injected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.injected).count()
    }

    fn remove_injected(&mut self) {
        self.rebuilds += 1;
        self.rows.retain(|row| !row.injected);
        self.injected.clear();
    }

    fn append_injected(&mut self, inner_html: &str) {
        self.injected.push(inner_html.to_string());
        self.rows.push(FakeRow {
            injected: true,
            markup: inner_html.to_string(),
            ..Default::default()
        });
    }
}
