/// Lifecycle of the mutation coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    #[default]
    Uninitialized,
    /// Watching the whole document for the standings root to appear.
    WaitingForTable,
    /// Watching the standings subtree.
    Active,
}

/// What the driver must do after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    WatchDocument,
    /// Drop any document watch, watch the table, run one initial cycle.
    Activate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDecision {
    Run,
    SkipRendering,
    SkipContextLost,
    SkipInactive,
}

/// Transport-agnostic state machine for reacting to external table changes.
///
/// Notifications may be bursty, self-inflicted, or arrive after the watch
/// was replaced; every entry point tolerates all three.
#[derive(Debug, Default)]
pub struct Coordinator {
    state: CoordinatorState,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn start(&mut self, table_present: bool) -> Transition {
        if self.state != CoordinatorState::Uninitialized {
            return Transition::None;
        }
        if table_present {
            self.state = CoordinatorState::Active;
            Transition::Activate
        } else {
            self.state = CoordinatorState::WaitingForTable;
            Transition::WatchDocument
        }
    }

    pub fn on_document_change(&mut self, table_present: bool) -> Transition {
        if self.state == CoordinatorState::WaitingForTable && table_present {
            self.state = CoordinatorState::Active;
            Transition::Activate
        } else {
            Transition::None
        }
    }

    /// Whether a table notification should (re)start the debounce timer.
    pub fn on_table_change(&self) -> bool {
        self.state == CoordinatorState::Active
    }

    pub fn on_debounce_elapsed(&self, rendering: bool, context_valid: bool) -> CycleDecision {
        if self.state != CoordinatorState::Active {
            CycleDecision::SkipInactive
        } else if rendering {
            CycleDecision::SkipRendering
        } else if !context_valid {
            CycleDecision::SkipContextLost
        } else {
            CycleDecision::Run
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_present_at_startup_activates_immediately() {
        let mut coordinator = Coordinator::new();
        assert_eq!(coordinator.start(true), Transition::Activate);
        assert_eq!(coordinator.state(), CoordinatorState::Active);
    }

    #[test]
    fn waits_for_table_then_activates_once() {
        let mut coordinator = Coordinator::new();
        assert_eq!(coordinator.start(false), Transition::WatchDocument);
        assert_eq!(coordinator.on_document_change(false), Transition::None);
        assert_eq!(coordinator.state(), CoordinatorState::WaitingForTable);

        assert_eq!(coordinator.on_document_change(true), Transition::Activate);
        // Late document notifications after the switch are ignored.
        assert_eq!(coordinator.on_document_change(true), Transition::None);
        assert_eq!(coordinator.state(), CoordinatorState::Active);
    }

    #[test]
    fn start_is_not_repeatable() {
        let mut coordinator = Coordinator::new();
        coordinator.start(false);
        assert_eq!(coordinator.start(true), Transition::None);
        assert_eq!(coordinator.state(), CoordinatorState::WaitingForTable);
    }

    #[test]
    fn table_changes_only_count_when_active() {
        let mut coordinator = Coordinator::new();
        assert!(!coordinator.on_table_change());
        coordinator.start(false);
        assert!(!coordinator.on_table_change());
        coordinator.on_document_change(true);
        assert!(coordinator.on_table_change());
    }

    #[test]
    fn debounced_cycle_guards() {
        let mut coordinator = Coordinator::new();
        assert_eq!(
            coordinator.on_debounce_elapsed(false, true),
            CycleDecision::SkipInactive
        );
        coordinator.start(true);
        assert_eq!(coordinator.on_debounce_elapsed(false, true), CycleDecision::Run);
        assert_eq!(
            coordinator.on_debounce_elapsed(true, true),
            CycleDecision::SkipRendering
        );
        assert_eq!(
            coordinator.on_debounce_elapsed(false, false),
            CycleDecision::SkipContextLost
        );
    }
}
