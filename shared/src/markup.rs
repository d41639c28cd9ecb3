//! Synthesized standings rows.
//!
//! The host page renders each row as:
//! rank `<th>`, user link `<th>`, score/time `<td>`, then one `<td>` per task.
//! Only this module knows that layout.

use std::fmt::Write;

use crate::collector::{FriendRecord, RowSource};
use crate::rating::RatingTier;
use crate::standings::{StandingsEntry, TaskResult};

const CHECK_SVG: &str = r#"<svg stroke="currentColor" fill="currentColor" stroke-width="0" viewBox="0 0 24 24" height="1em" width="1em" xmlns="http://www.w3.org/2000/svg"><path fill="none" d="M0 0h24v24H0z"></path><path d="M9 16.2L4.8 12l-1.4 1.4L9 19 21 7l-1.4-1.4L9 16.2z"></path></svg>"#;

/// Format elapsed seconds as `m:ss`; missing times render as `-`.
pub fn format_elapsed(seconds: Option<i64>) -> String {
    let Some(secs) = seconds else {
        return "-".to_string();
    };
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_points(point: Option<f64>) -> String {
    format!("{}", point.unwrap_or(0.0))
}

fn write_task_cell(html: &mut String, task: &TaskResult) {
    if !task.is_solved() {
        html.push_str("<td><p>-</p></td>");
        return;
    }
    let penalty = task.penalty();
    if penalty > 0 {
        let _ = write!(
            html,
            r#"<td class=" table-danger"><p><span class="standings-ac">{CHECK_SVG}</span></p><p>{}<span class="standings-wa">+{penalty}</span></p></td>"#,
            format_elapsed(task.time)
        );
    } else {
        let _ = write!(
            html,
            r#"<td class=""><p><span class="standings-ac">{CHECK_SVG}</span></p><p>{}</p></td>"#,
            format_elapsed(task.time)
        );
    }
}

/// Inner markup for a row built from API data.
///
/// `fallback_name` is used when the entry carries no user id.
pub fn entry_row_html(rank: u32, entry: &StandingsEntry, fallback_name: &str) -> String {
    let username = escape_html(entry.user_id().unwrap_or(fallback_name));
    let link_class = RatingTier::from_rate(entry.rate()).link_class();

    let mut html = String::new();
    let _ = write!(html, "<th>{rank}</th>");
    let _ = write!(
        html,
        r#"<th><a href="/users/{username}" class="{link_class}">{username}</a></th>"#
    );
    let _ = write!(
        html,
        r#"<td><p><span class="standings-score">{}</span></p><p>{}</p></td>"#,
        format_points(entry.point),
        format_elapsed(entry.time)
    );
    for task in &entry.tasks {
        write_task_cell(&mut html, task);
    }
    html
}

/// Inner markup for one injected row: captured native markup verbatim, or
/// markup synthesized from the API entry.
pub fn record_row_html(record: &FriendRecord) -> String {
    match &record.source {
        RowSource::Markup(html) => html.clone(),
        RowSource::Api(entry) => entry_row_html(record.rank, entry, &record.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::FriendCollector;
    use crate::standings::StandingsUser;

    fn entry(id: &str, rate: Option<i32>) -> StandingsEntry {
        StandingsEntry {
            rank: Some(5),
            user: Some(StandingsUser {
                id: Some(id.to_string()),
                rate,
            }),
            point: Some(700.0),
            time: Some(3725),
            tasks: vec![
                TaskResult {
                    point: Some(100.0),
                    time: Some(125),
                    penalty: Some(0),
                },
                TaskResult {
                    point: Some(300.0),
                    time: Some(3725),
                    penalty: Some(2),
                },
                TaskResult::default(),
            ],
        }
    }

    #[test]
    fn formats_elapsed_time() {
        assert_eq!(format_elapsed(Some(0)), "0:00");
        assert_eq!(format_elapsed(Some(65)), "1:05");
        assert_eq!(format_elapsed(Some(3725)), "62:05");
        assert_eq!(format_elapsed(None), "-");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn synthesized_row_has_host_layout() {
        let html = entry_row_html(5, &entry("Alice", Some(2450)), "alice");
        assert!(html.starts_with("<th>5</th>"));
        assert!(html.contains(
            r#"<a href="/users/Alice" class="user-link user-link-orange">Alice</a>"#
        ));
        assert!(html.contains(r#"<span class="standings-score">700</span></p><p>62:05</p>"#));
        assert_eq!(html.matches("<td").count(), 4);
        assert_eq!(html.matches(r#"class="standings-ac""#).count(), 2);
        assert!(html.contains(r#"<td class=" table-danger">"#));
        assert!(html.contains(r#"62:05<span class="standings-wa">+2</span>"#));
        assert!(html.ends_with("<td><p>-</p></td>"));
    }

    #[test]
    fn unrated_user_gets_neutral_link() {
        let html = entry_row_html(9, &entry("newbie", None), "newbie");
        assert!(html.contains(r#"class="user-link">newbie</a>"#));
    }

    #[test]
    fn missing_user_id_falls_back_to_record_name() {
        let entry = StandingsEntry::default();
        let html = entry_row_html(9999, &entry, "dave");
        assert!(html.contains(r#"<a href="/users/dave""#));
        assert!(html.contains(r#"<span class="standings-score">0</span></p><p>-</p>"#));
    }

    #[test]
    fn hostile_user_id_is_escaped() {
        let html = entry_row_html(1, &entry("<img onerror=x>", None), "x");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img onerror=x&gt;"));
    }

    #[test]
    fn captured_markup_is_used_verbatim() {
        let mut collector = FriendCollector::new();
        collector.merge("alice", 3, RowSource::Markup("<th>3</th><th>native</th>".into()));
        collector.merge("bob", 4, RowSource::Api(entry("Bob", Some(900))));
        let sorted = collector.snapshot_sorted();
        assert_eq!(record_row_html(sorted[0]), "<th>3</th><th>native</th>");
        assert!(record_row_html(sorted[1]).starts_with("<th>4</th>"));
    }
}
