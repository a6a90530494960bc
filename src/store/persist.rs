//! Best-effort JSON persistence of the local comment map. Not required
//! for correctness; the store works purely in memory when no path is set.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::app::Result;
use crate::domain::CommentItem;

pub(crate) type LocalComments = HashMap<i64, Vec<CommentItem>>;

/// A missing file is an empty map, not an error.
pub(crate) fn load(path: &Path) -> Result<LocalComments> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

pub(crate) fn save(path: &Path, local: &LocalComments) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(local)?;
    fs::write(path, content)?;
    Ok(())
}
