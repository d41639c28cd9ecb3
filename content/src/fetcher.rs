use std::rc::Rc;

use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use omc_friends_shared::standings::{contest_id_from_path, standings_url};
use omc_friends_shared::{
    FetchError, FetchResult, FetchStatus, FetchTicket, RenderOutcome, StandingsResponse,
    settled_status,
};

use crate::app::ContentApp;
use crate::chrome;
use crate::dom::{self, DomTable};
use crate::indicator;
use crate::stars;

fn current_contest_id() -> Option<String> {
    let path = web_sys::window()?.location().pathname().ok()?;
    contest_id_from_path(&path).map(str::to_string)
}

/// Fetch the complete standings, unrated entries included. Aborted and
/// reported as [`FetchError::TimedOut`] if it does not settle in `timeout_ms`.
pub async fn fetch_standings(
    contest_id: &str,
    timeout_ms: u32,
) -> Result<StandingsResponse, FetchError> {
    let url = standings_url(contest_id);
    let controller = web_sys::AbortController::new().ok();
    let signal = controller.as_ref().map(|c| c.signal());

    let request = async {
        let resp = gloo_net::http::Request::get(&url)
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.ok() {
            return Err(FetchError::Status(resp.status()));
        }

        resp.json::<StandingsResponse>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    };

    match select(Box::pin(request), TimeoutFuture::new(timeout_ms)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            if let Some(controller) = controller {
                controller.abort();
            }
            Err(FetchError::TimedOut(timeout_ms))
        }
    }
}

/// Start the one bulk completion fetch for this activation, unless one is
/// already in flight or there is nothing to look up.
pub fn start(app: &Rc<ContentApp>) {
    if !chrome::context_valid() {
        return;
    }
    let Some(contest_id) = current_contest_id() else {
        return;
    };
    let Ok(ticket) = app.session.borrow_mut().begin_fetch() else {
        return;
    };
    spawn_local(run(Rc::clone(app), contest_id, ticket));
}

async fn run(app: Rc<ContentApp>, contest_id: String, ticket: FetchTicket) {
    let friends = chrome::load_friends().await;
    if friends.is_empty() {
        app.session.borrow_mut().finish_fetch(ticket);
        return;
    }

    indicator::show(FetchStatus::Searching);

    let result = match fetch_standings(&contest_id, app.config.fetch_timeout_ms).await {
        Ok(response) => match dom::document() {
            Some(document) => {
                let mut table = DomTable::new(document);
                FetchResult::Completed(app.session.borrow_mut().complete_fetch(
                    &ticket,
                    &response.standings,
                    &friends,
                    &mut table,
                ))
            }
            None => FetchResult::Failed(FetchError::Network("document unavailable".into())),
        },
        Err(e) => {
            web_sys::console::warn_1(&format!("Standings fetch failed: {e}").into());
            FetchResult::Failed(e)
        }
    };

    let still_friends_only = {
        let mut session = app.session.borrow_mut();
        session.finish_fetch(ticket);
        session.is_friends_only()
    };

    match &result {
        FetchResult::Completed(Ok(summary)) => {
            web_sys::console::info_1(
                &format!(
                    "standings_fetch_merged added={} upgraded={} total={}",
                    summary.added, summary.upgraded, summary.total
                )
                .into(),
            );
            if matches!(summary.render, RenderOutcome::Rebuilt { .. }) {
                stars::annotate(&friends);
            }
        }
        FetchResult::Completed(Err(stale)) => {
            web_sys::console::info_1(&format!("standings_fetch_discarded: {stale}").into());
        }
        FetchResult::Failed(_) => {}
    }

    indicator::settle(
        settled_status(&result, still_friends_only),
        app.config.indicator_dismiss_ms,
    );
}
