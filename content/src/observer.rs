use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{MutationObserver, MutationObserverInit, Node};

use omc_friends_shared::{Coordinator, CycleDecision, Transition};

use crate::app::{self, ContentApp};
use crate::chrome;
use crate::dom;
use crate::stars::StarClickBinding;
use crate::toggle::ToggleBinding;

struct ObserverBinding {
    observer: MutationObserver,
    _callback: Closure<dyn Fn()>,
}

impl ObserverBinding {
    /// Watch `target`'s subtree for added or removed nodes.
    fn watch(target: &Node, callback: Closure<dyn Fn()>) -> Option<Self> {
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(target, &init).ok()?;
        Some(Self {
            observer,
            _callback: callback,
        })
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for ObserverBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Drives the coordinator state machine from DOM mutations.
pub struct ContentScript {
    app: Rc<ContentApp>,
    coordinator: RefCell<Coordinator>,
    document_watch: RefCell<Option<ObserverBinding>>,
    table_watch: RefCell<Option<ObserverBinding>>,
    debounce: RefCell<Option<Timeout>>,
    toggle: RefCell<Option<ToggleBinding>>,
    star_clicks: RefCell<Option<StarClickBinding>>,
}

impl ContentScript {
    pub fn new(app: Rc<ContentApp>) -> Rc<Self> {
        Rc::new(Self {
            app,
            coordinator: RefCell::new(Coordinator::new()),
            document_watch: RefCell::new(None),
            table_watch: RefCell::new(None),
            debounce: RefCell::new(None),
            toggle: RefCell::new(None),
            star_clicks: RefCell::new(None),
        })
    }

    fn table_present() -> bool {
        dom::document()
            .and_then(|document| dom::standings_root(&document))
            .is_some()
    }

    pub fn start(self: &Rc<Self>) {
        let transition = self.coordinator.borrow_mut().start(Self::table_present());
        self.follow(transition);
    }

    fn follow(self: &Rc<Self>, transition: Transition) {
        if transition != Transition::None {
            let state = self.coordinator.borrow().state();
            web_sys::console::info_1(&format!("coordinator_state={state:?}").into());
        }
        match transition {
            Transition::None => {}
            Transition::WatchDocument => self.watch_document(),
            Transition::Activate => self.activate(),
        }
    }

    fn watch_document(self: &Rc<Self>) {
        let Some(body) = dom::document().and_then(|document| document.body()) else {
            return;
        };
        let weak: Weak<Self> = Rc::downgrade(self);
        let callback = Closure::<dyn Fn()>::new(move || {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let transition = this
                .coordinator
                .borrow_mut()
                .on_document_change(Self::table_present());
            this.follow(transition);
        });
        *self.document_watch.borrow_mut() = ObserverBinding::watch(&body, callback);
    }

    fn activate(self: &Rc<Self>) {
        // Disconnect only: this can run inside the document watch's own callback,
        // which must stay alive until it returns.
        if let Some(watch) = self.document_watch.borrow().as_ref() {
            watch.disconnect();
        }

        *self.toggle.borrow_mut() = ToggleBinding::install(&self.app);
        *self.star_clicks.borrow_mut() = StarClickBinding::install(&self.app);

        let Some(root) = dom::document().and_then(|document| dom::standings_root(&document)) else {
            return;
        };
        let weak: Weak<Self> = Rc::downgrade(self);
        let callback = Closure::<dyn Fn()>::new(move || {
            if let Some(this) = weak.upgrade() {
                this.schedule_cycle();
            }
        });
        *self.table_watch.borrow_mut() = ObserverBinding::watch(&root, callback);
        web_sys::console::info_1(&"standings_watch_active".into());

        spawn_local(app::refresh(Rc::clone(&self.app)));
    }

    /// Restart the debounce window; bursts of host churn collapse into one cycle.
    fn schedule_cycle(self: &Rc<Self>) {
        if !self.coordinator.borrow().on_table_change() {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let timeout = Timeout::new(self.app.config.debounce_ms, move || {
            if let Some(this) = weak.upgrade() {
                this.run_cycle();
            }
        });
        // Dropping the previous timeout clears it.
        *self.debounce.borrow_mut() = Some(timeout);
    }

    fn run_cycle(self: &Rc<Self>) {
        let rendering = self
            .app
            .session
            .try_borrow()
            .map(|session| session.is_rendering())
            .unwrap_or(true);
        let decision = self
            .coordinator
            .borrow()
            .on_debounce_elapsed(rendering, chrome::context_valid());
        if decision == CycleDecision::Run {
            spawn_local(app::refresh(Rc::clone(&self.app)));
        }
    }
}
