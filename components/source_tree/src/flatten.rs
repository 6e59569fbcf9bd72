use crate::types::{FlatEntry, TreeNode};

/// Flatten a tree into entries with full paths.
///
/// For every node, all immediate children are emitted first, followed by the
/// flattened descendants of each child in child order. The node passed in is
/// not emitted itself. A parent therefore always precedes its children, which
/// is what mirroring relies on to create directories before writing files.
pub fn flatten(node: &TreeNode) -> Vec<FlatEntry> {
    let mut entries = Vec::with_capacity(node.descendant_count());
    flatten_children(&node.name, &node.children, &mut entries);
    entries
}

fn flatten_children(parent: &str, children: &[TreeNode], entries: &mut Vec<FlatEntry>) {
    let paths: Vec<String> = children
        .iter()
        .map(|child| format!("{}/{}", parent, child.name))
        .collect();

    entries.extend(children.iter().zip(&paths).map(|(child, path)| FlatEntry {
        path: path.clone(),
        kind: child.kind,
        uid: child.uid.clone(),
    }));

    for (child, path) in children.iter().zip(&paths) {
        flatten_children(path, &child.children, entries);
    }
}
