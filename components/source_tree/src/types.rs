use serde::{Deserialize, Serialize};

/// Kind of a tree entry as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    /// Lambdas, symlinks and whatever else the API may grow
    #[serde(other)]
    Other,
}

/// One node of the remote file tree.
///
/// `name` is a single path segment, never a full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Content handle, only present for files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn file(name: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            uid: Some(uid.into()),
            children: Vec::new(),
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            uid: None,
            children,
        }
    }

    /// Number of nodes below this one, excluding itself
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// A tree node with its full '/'-joined path, rooted at the tree root name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub path: String,
    pub kind: EntryKind,
    pub uid: Option<String>,
}

impl FlatEntry {
    /// Files and uid-carrying unknown entries have content to download
    pub fn has_content(&self) -> bool {
        match self.kind {
            EntryKind::File => true,
            EntryKind::Directory => false,
            EntryKind::Other => self.uid.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_tree() {
        let json = r#"[
            {
                "name": "src",
                "type": "directory",
                "mode": 16877,
                "children": [
                    { "name": "index.js", "type": "file", "uid": "2d4b", "mode": 33188 },
                    { "name": "lib", "type": "directory", "children": [] }
                ]
            },
            { "name": "api", "type": "lambda" }
        ]"#;

        let nodes: Vec<TreeNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 2);

        let src = &nodes[0];
        assert_eq!(src.kind, EntryKind::Directory);
        assert_eq!(src.uid, None);
        assert_eq!(src.children[0].uid.as_deref(), Some("2d4b"));
        assert_eq!(src.children[1].kind, EntryKind::Directory);

        assert_eq!(nodes[1].kind, EntryKind::Other);
        assert!(nodes[1].children.is_empty());
    }

    #[test]
    fn counts_descendants() {
        let tree = TreeNode::directory(
            "src",
            vec![
                TreeNode::file("a", "1"),
                TreeNode::directory("b", vec![TreeNode::file("c", "2"), TreeNode::file("d", "3")]),
            ],
        );
        assert_eq!(tree.descendant_count(), 4);
        assert_eq!(TreeNode::file("x", "y").descendant_count(), 0);
    }

    #[test]
    fn content_depends_on_kind_and_uid() {
        let entry = |kind, uid: Option<&str>| FlatEntry {
            path: "src/x".to_string(),
            kind,
            uid: uid.map(str::to_string),
        };
        assert!(entry(EntryKind::File, Some("u")).has_content());
        assert!(!entry(EntryKind::Directory, None).has_content());
        assert!(entry(EntryKind::Other, Some("u")).has_content());
        assert!(!entry(EntryKind::Other, None).has_content());
    }
}
