use crate::collector::{FriendCollector, FriendRecord, MergeOutcome, RowSource};
use crate::error::{FetchRejected, StaleFetch};
use crate::friends::FriendSet;
use crate::markup::record_row_html;
use crate::names::normalize;
use crate::row::{RowKind, classify};
use crate::standings::StandingsEntry;
use crate::table::StandingsTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    FriendsOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPhase {
    #[default]
    Idle,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    InFlight {
        epoch: u64,
    },
}

/// Fingerprint of the sorted collected set: `name+rank` pairs joined by `,`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderKey(String);

impl RenderKey {
    pub fn of(sorted: &[&FriendRecord]) -> Self {
        let parts: Vec<String> = sorted
            .iter()
            .map(|record| format!("{}{}", record.name, record.rank))
            .collect();
        Self(parts.join(","))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Not in friends-only mode.
    Inactive,
    /// Key unchanged and every injected row still present.
    Unchanged,
    Rebuilt { rows: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// A render was in progress; nothing touched.
    Skipped,
    Applied(RenderOutcome),
}

/// Proof that a bulk fetch was admitted for a given activation.
#[derive(Debug)]
pub struct FetchTicket {
    epoch: u64,
}

impl FetchTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSummary {
    pub added: usize,
    pub upgraded: usize,
    /// Collected friends after the merge.
    pub total: usize,
    pub render: RenderOutcome,
}

/// Per-page-load state: display mode, collected friends, render bookkeeping
/// and the two guarded phases.
#[derive(Debug, Default)]
pub struct Session {
    mode: Mode,
    epoch: u64,
    collector: FriendCollector,
    last_render_key: Option<RenderKey>,
    render_phase: RenderPhase,
    fetch_phase: FetchPhase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_friends_only(&self) -> bool {
        self.mode == Mode::FriendsOnly
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn collector(&self) -> &FriendCollector {
        &self.collector
    }

    pub fn is_rendering(&self) -> bool {
        self.render_phase == RenderPhase::Rendering
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.fetch_phase, FetchPhase::InFlight { .. })
    }

    /// Enter friends-only mode with an empty collector. Any fetch still in
    /// flight belongs to the previous activation and will be discarded.
    pub fn activate_friends_only(&mut self) -> u64 {
        self.mode = Mode::FriendsOnly;
        self.start_epoch();
        self.epoch
    }

    pub fn deactivate(&mut self) {
        self.mode = Mode::Normal;
        self.start_epoch();
    }

    fn start_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.collector.reset();
        self.last_render_key = None;
        self.fetch_phase = FetchPhase::Idle;
    }

    /// Drop an un-starred friend and force the next render to rebuild.
    pub fn forget_friend(&mut self, name: &str) {
        self.collector.remove(name);
        self.last_render_key = None;
    }

    /// One pass of the view filter over every row of `table`.
    pub fn apply_filter<T: StandingsTable>(
        &mut self,
        table: &mut T,
        friends: &FriendSet,
    ) -> FilterOutcome {
        if self.is_rendering() {
            return FilterOutcome::Skipped;
        }

        let friends_only = self.is_friends_only();
        for row in table.rows() {
            match classify(&table.facts(&row)) {
                RowKind::Injected | RowKind::Header => {}
                RowKind::User { name, rank } => {
                    let is_friend = friends.contains(&name);
                    if friends_only {
                        table.set_hidden(&row, true);
                        if is_friend && !self.has_markup(&name) {
                            let html = table.row_markup(&row);
                            self.collect(&name, rank, RowSource::Markup(html));
                        }
                    } else {
                        table.set_hidden(&row, false);
                        table.set_highlighted(&row, is_friend);
                    }
                }
                RowKind::Plain => table.set_hidden(&row, friends_only),
            }
        }

        if friends_only {
            FilterOutcome::Applied(self.render(table))
        } else {
            FilterOutcome::Applied(RenderOutcome::Inactive)
        }
    }

    fn has_markup(&self, name: &str) -> bool {
        self.collector
            .get(name)
            .is_some_and(|record| record.source.is_markup())
    }

    fn collect(&mut self, name: &str, rank: u32, source: RowSource) -> MergeOutcome {
        let outcome = self.collector.merge(name, rank, source);
        if outcome == MergeOutcome::Upgraded {
            // Same key, different markup: the rows on screen are stale.
            self.last_render_key = None;
        }
        outcome
    }

    /// Reconcile injected rows with the collected set.
    pub fn render<T: StandingsTable>(&mut self, table: &mut T) -> RenderOutcome {
        if !self.is_friends_only() {
            return RenderOutcome::Inactive;
        }

        let sorted = self.collector.snapshot_sorted();
        let key = RenderKey::of(&sorted);
        if self.last_render_key.as_ref() == Some(&key) && table.injected_count() == sorted.len() {
            return RenderOutcome::Unchanged;
        }
        let rows: Vec<String> = sorted.into_iter().map(record_row_html).collect();
        self.last_render_key = Some(key);

        self.render_phase = RenderPhase::Rendering;
        table.remove_injected();
        for html in &rows {
            table.append_injected(html);
        }
        self.render_phase = RenderPhase::Idle;

        RenderOutcome::Rebuilt { rows: rows.len() }
    }

    /// Admit one bulk fetch for the current activation.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, FetchRejected> {
        if !self.is_friends_only() {
            return Err(FetchRejected::Inactive);
        }
        if self.is_fetching() {
            return Err(FetchRejected::InFlight);
        }
        self.fetch_phase = FetchPhase::InFlight { epoch: self.epoch };
        Ok(FetchTicket { epoch: self.epoch })
    }

    /// Release the in-flight phase if `ticket` still owns it.
    pub fn finish_fetch(&mut self, ticket: FetchTicket) {
        if self.fetch_phase == (FetchPhase::InFlight { epoch: ticket.epoch }) {
            self.fetch_phase = FetchPhase::Idle;
        }
    }

    fn check_current(&self, ticket: &FetchTicket) -> Result<(), StaleFetch> {
        if self.is_friends_only() && ticket.epoch == self.epoch {
            Ok(())
        } else {
            Err(StaleFetch {
                fetched_for: ticket.epoch,
                current: self.epoch,
            })
        }
    }

    /// Merge uncollected friends from bulk standings as API-backed records.
    /// Returns the names newly added.
    pub fn merge_remote(
        &mut self,
        ticket: &FetchTicket,
        entries: &[StandingsEntry],
        friends: &FriendSet,
    ) -> Result<Vec<String>, StaleFetch> {
        self.check_current(ticket)?;

        let mut added = Vec::new();
        for entry in entries {
            let Some(user_id) = entry.user_id() else {
                continue;
            };
            let name = normalize(user_id);
            if !friends.contains(&name) || self.collector.contains(&name) {
                continue;
            }
            self.collector
                .merge(&name, entry.effective_rank(), RowSource::Api(entry.clone()));
            added.push(name);
        }
        Ok(added)
    }

    /// Upgrade the named API-backed records with markup from rows currently
    /// in `table`. Returns how many were upgraded.
    pub fn enrich_from_table<T: StandingsTable>(&mut self, table: &T, names: &[String]) -> usize {
        let mut upgraded = 0;
        for row in table.rows() {
            let RowKind::User { name, rank } = classify(&table.facts(&row)) else {
                continue;
            };
            if !names.contains(&name) || self.has_markup(&name) {
                continue;
            }
            if self.collect(&name, rank, RowSource::Markup(table.row_markup(&row)))
                == MergeOutcome::Upgraded
            {
                upgraded += 1;
            }
        }
        upgraded
    }

    /// Apply a successful bulk fetch: merge, enrich newly added records from
    /// visible rows, and re-render when anything was added.
    pub fn complete_fetch<T: StandingsTable>(
        &mut self,
        ticket: &FetchTicket,
        entries: &[StandingsEntry],
        friends: &FriendSet,
        table: &mut T,
    ) -> Result<CompletionSummary, StaleFetch> {
        let added = self.merge_remote(ticket, entries, friends)?;
        let (upgraded, render) = if added.is_empty() {
            (0, RenderOutcome::Unchanged)
        } else {
            let upgraded = self.enrich_from_table(table, &added);
            (upgraded, self.render(table))
        };
        Ok(CompletionSummary {
            added: added.len(),
            upgraded,
            total: self.collector.len(),
            render,
        })
    }
}
