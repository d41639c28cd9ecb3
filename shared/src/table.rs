use crate::row::RowFacts;

/// The live standings table as seen by the session.
///
/// Implemented over the DOM in the content script and in memory for tests.
/// Row handles are only valid for the pass that produced them.
pub trait StandingsTable {
    type Row;

    /// Every `<tr>` of the table body, injected rows included, in document order.
    fn rows(&self) -> Vec<Self::Row>;

    fn facts(&self, row: &Self::Row) -> RowFacts;

    /// Inner markup of a native row, captured for later re-injection.
    fn row_markup(&self, row: &Self::Row) -> String;

    /// Hide with important priority, or clear the inline `display`.
    fn set_hidden(&mut self, row: &Self::Row, hidden: bool);

    /// Apply or clear the friend highlight (tint + left accent).
    fn set_highlighted(&mut self, row: &Self::Row, highlighted: bool);

    fn injected_count(&self) -> usize;

    fn remove_injected(&mut self);

    /// Append one marked, styled row with the given inner markup.
    fn append_injected(&mut self, inner_html: &str);
}
