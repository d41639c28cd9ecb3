use std::cell::RefCell;
use std::rc::Rc;

use omc_friends_shared::{FilterOutcome, FriendSet, RenderOutcome, Session};

use crate::chrome;
use crate::config::ContentConfig;
use crate::dom::{self, DomTable};
use crate::stars;

/// Everything one page load of the content script owns.
pub struct ContentApp {
    pub config: ContentConfig,
    /// Borrowed only within synchronous sections, never across an `.await`.
    /// Observer and debounce callbacks still probe with `try_borrow*` and skip
    /// their pass when the session is busy.
    pub session: RefCell<Session>,
}

impl ContentApp {
    pub fn new(config: ContentConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            session: RefCell::new(Session::new()),
        })
    }

    pub fn is_friends_only(&self) -> bool {
        self.session
            .try_borrow()
            .map(|session| session.is_friends_only())
            .unwrap_or(false)
    }
}

/// Run the view filter over the live table. A session that is already
/// borrowed means a render is underway; the pass is skipped.
pub fn apply_filter(app: &ContentApp, friends: &FriendSet) -> FilterOutcome {
    let Some(document) = dom::document() else {
        return FilterOutcome::Skipped;
    };
    let Ok(mut session) = app.session.try_borrow_mut() else {
        return FilterOutcome::Skipped;
    };
    let mut table = DomTable::new(document);
    session.apply_filter(&mut table, friends)
}

/// One full cycle: view filter, then star annotation.
pub async fn refresh(app: Rc<ContentApp>) {
    let friends = chrome::load_friends().await;
    let outcome = apply_filter(&app, &friends);
    if let FilterOutcome::Applied(RenderOutcome::Rebuilt { rows }) = outcome {
        web_sys::console::info_1(&format!("friend_rows_injected={rows}").into());
    }
    stars::annotate(&friends);
}
