pub mod comments;
pub mod news;

mod persist;

#[cfg(test)]
pub(crate) mod fake;

pub use comments::{CommentSlot, CommentStore};
pub use news::NewsStore;
