use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-declared classification of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteStatus {
    Fake,
    Real,
}

impl std::fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteStatus::Fake => write!(f, "Fake"),
            VoteStatus::Real => write!(f, "Real"),
        }
    }
}

/// A news item as served by the API. Read-only from the client's
/// perspective; vote counters are server-sourced and never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: i64,
    pub topic: String,
    pub short_detail: String,
    pub full_detail: String,
    pub status: VoteStatus,
    pub reporter: String,
    pub date_time: DateTime<Utc>,
    pub image_url: String,
    pub fake_votes: u64,
    pub real_votes: u64,
}

/// List-route filter over the news status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsFilter {
    #[default]
    All,
    Fake,
    Real,
}

impl NewsFilter {
    /// Normalize arbitrary query-string input. Anything other than the two
    /// known values falls back to `All`; never fails.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some("fake") => NewsFilter::Fake,
            Some("real") => NewsFilter::Real,
            _ => NewsFilter::All,
        }
    }

    pub fn matches(&self, item: &NewsItem) -> bool {
        match self {
            NewsFilter::All => true,
            NewsFilter::Fake => item.status == VoteStatus::Fake,
            NewsFilter::Real => item.status == VoteStatus::Real,
        }
    }
}
