use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single comment's vote, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Fake,
    Real,
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vote::Fake => write!(f, "fake"),
            Vote::Real => write!(f, "real"),
        }
    }
}

impl FromStr for Vote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fake" => Ok(Vote::Fake),
            "real" => Ok(Vote::Real),
            other => Err(format!("invalid vote '{}', expected 'fake' or 'real'", other)),
        }
    }
}

/// A comment on a news item.
///
/// Server-assigned IDs are positive; client-local comments carry negative
/// IDs so the two can never collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    pub id: i64,
    pub news_id: i64,
    pub user: String,
    pub vote: Vote,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentItem {
    /// Local comments are the ones synthesized on this client and never
    /// sent to the server.
    pub fn is_local(&self) -> bool {
        self.id < 0
    }
}

/// Everything a comment needs except its ID, which the store assigns.
#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub news_id: i64,
    pub user: String,
    pub vote: Vote,
    pub comment: String,
    pub attachments: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentDraft {
    pub fn new(news_id: i64, user: impl Into<String>, vote: Vote, comment: impl Into<String>) -> Self {
        Self {
            news_id,
            user: user.into(),
            vote,
            comment: comment.into(),
            attachments: None,
            created_at: None,
        }
    }
}
