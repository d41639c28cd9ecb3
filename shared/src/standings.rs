use serde::{Deserialize, Deserializer, Serialize};

/// Rank given to rows whose rank cannot be read. Sorts after every real rank
/// of a contest smaller than this.
pub const UNRANKED: u32 = 9999;

/// Body of `GET /api/contests/{id}/standings?rated=0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandingsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub standings: Vec<StandingsEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandingsEntry {
    #[serde(default, deserialize_with = "whole_number")]
    pub rank: Option<i64>,
    #[serde(default)]
    pub user: Option<StandingsUser>,
    #[serde(default)]
    pub point: Option<f64>,
    /// Seconds from contest start to the last scoring submission.
    #[serde(default, deserialize_with = "whole_number")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<TaskResult>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandingsUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "whole_rate")]
    pub rate: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub point: Option<f64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "count")]
    pub penalty: Option<u32>,
}

// The API is loose about its numbers and lists: `null` stands in for an
// empty list, and times may arrive as fractional seconds.

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|n| n.is_finite())
        .map(|n| n.floor() as i64))
}

fn whole_rate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(whole_number(deserializer)?.map(|n| n.clamp(i32::MIN.into(), i32::MAX.into()) as i32))
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(whole_number(deserializer)?.map(|n| n.clamp(0, u32::MAX.into()) as u32))
}

impl StandingsEntry {
    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.id.as_deref())
            .filter(|id| !id.is_empty())
    }

    pub fn rate(&self) -> Option<i32> {
        self.user.as_ref().and_then(|u| u.rate)
    }

    /// Rank to sort by; missing or zero ranks fall back to [`UNRANKED`].
    pub fn effective_rank(&self) -> u32 {
        self.rank
            .filter(|rank| *rank > 0)
            .and_then(|rank| u32::try_from(rank).ok())
            .unwrap_or(UNRANKED)
    }
}

impl TaskResult {
    pub fn is_solved(&self) -> bool {
        self.point.is_some_and(|p| p != 0.0)
    }

    pub fn penalty(&self) -> u32 {
        self.penalty.unwrap_or(0)
    }
}

/// Extract the contest identifier from a location path such as
/// `/contests/abc123/standings`.
pub fn contest_id_from_path(path: &str) -> Option<&str> {
    let (_, rest) = path.split_once("/contests/")?;
    let id = rest.split('/').next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

pub fn standings_url(contest_id: &str) -> String {
    format!("/api/contests/{contest_id}/standings?rated=0")
}

/// Parse a rank out of a rank cell's text: leading digits, ignoring any
/// trailing annotation. Zero, negative or missing ranks become [`UNRANKED`].
pub fn parse_rank_text(text: &str) -> u32 {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(rank) if rank > 0 => rank,
        _ => UNRANKED,
    }
}
