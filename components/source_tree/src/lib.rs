//! Remote source tree model and flattening
//!
//! The hosting API returns deployment files as a nested tree. This component
//! provides:
//! - [`TreeNode`], deserialized straight from the API response
//! - [`flatten`], turning a tree into an ordered list of [`FlatEntry`]
//! - [`FlatEntry::local_path`], mapping a remote path below a local directory
//!
//! # Examples
//!
//! ```
//! use source_tree::{flatten, EntryKind, TreeNode};
//!
//! let src = TreeNode::directory("src", vec![
//!     TreeNode::file("a.txt", "uid-a"),
//!     TreeNode::directory("sub", vec![TreeNode::file("b.txt", "uid-b")]),
//! ]);
//!
//! let paths: Vec<_> = flatten(&src).into_iter().map(|e| e.path).collect();
//! assert_eq!(paths, ["src/a.txt", "src/sub", "src/sub/b.txt"]);
//! ```

mod flatten;
mod path;
mod types;

pub use flatten::flatten;
pub use path::PathError;
pub use types::{EntryKind, FlatEntry, TreeNode};

/// Name of the top-level directory that holds a deployment's sources
pub const SOURCE_ROOT: &str = "src";
