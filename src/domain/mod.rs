pub mod comment;
pub mod news;
pub mod vote;

pub use comment::{CommentDraft, CommentItem, Vote};
pub use news::{NewsFilter, NewsItem, VoteStatus};
pub use vote::{fake_percent, majority_label, MajorityLabel, VoteDelta};
