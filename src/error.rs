//! Error types shared across the viewer

use std::fmt;
use std::path::PathBuf;

use crate::scene::NodeId;

/// Errors surfaced by the loader, the part explorer and the config layer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerError {
    /// The model asset could not be read or parsed
    LoadFailure { path: PathBuf, reason: String },
    /// Ancestor resolution walked off the top of the tree
    MissingNode { node: NodeId, depth: usize },
    /// A hover referenced an entry that is not in the column stack
    UnknownEntry { depth: usize, index: usize },
    /// The configuration file exists but could not be used
    Config { path: PathBuf, reason: String },
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::LoadFailure { path, reason } => {
                write!(f, "Failed to load model {}: {}", path.display(), reason)
            }
            ViewerError::MissingNode { node, depth } => {
                write!(f, "Node {} has no ancestor {} levels above its parent", node, depth)
            }
            ViewerError::UnknownEntry { depth, index } => {
                write!(f, "No entry {} in column {}", index, depth)
            }
            ViewerError::Config { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ViewerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_message_names_path() {
        let err = ViewerError::LoadFailure {
            path: PathBuf::from("assets/missing.glb"),
            reason: "not found".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("assets/missing.glb"));
        assert!(message.contains("not found"));
    }
}
