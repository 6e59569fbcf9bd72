use crate::types::FlatEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("entry path '{0}' has no segments below the tree root")]
    Empty(String),

    #[error("entry path '{path}' contains unsafe segment '{segment}'")]
    UnsafeSegment { path: String, segment: String },
}

impl FlatEntry {
    /// Map this entry below `destination`, replacing the leading root segment.
    ///
    /// `src/sub/b.txt` below `out` becomes `out/sub/b.txt`. Segments that could
    /// escape the destination are rejected.
    pub fn local_path(&self, destination: impl AsRef<Path>) -> Result<PathBuf, PathError> {
        let mut segments = self.path.split('/');
        // the root segment is replaced by the destination
        segments.next();

        let mut local = destination.as_ref().to_path_buf();
        let mut pushed = 0;
        for segment in segments {
            if !is_safe_segment(segment) {
                return Err(PathError::UnsafeSegment {
                    path: self.path.clone(),
                    segment: segment.to_string(),
                });
            }
            local.push(segment);
            pushed += 1;
        }

        if pushed == 0 {
            return Err(PathError::Empty(self.path.clone()));
        }
        Ok(local)
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('\\')
        && !segment.contains('\0')
        && !(cfg!(windows) && segment.contains(':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;
    use assert_matches::assert_matches;

    fn entry(path: &str) -> FlatEntry {
        FlatEntry {
            path: path.to_string(),
            kind: EntryKind::File,
            uid: Some("u".to_string()),
        }
    }

    #[test]
    fn replaces_root_with_destination() {
        assert_eq!(
            entry("src/sub/b.txt").local_path("out").unwrap(),
            Path::new("out").join("sub").join("b.txt")
        );
        assert_eq!(
            entry("src/a.txt").local_path("/tmp/mirror").unwrap(),
            Path::new("/tmp/mirror/a.txt")
        );
    }

    #[test]
    fn only_leading_root_is_replaced() {
        assert_eq!(
            entry("src/src/main.rs").local_path("out").unwrap(),
            Path::new("out").join("src").join("main.rs")
        );
    }

    #[test]
    fn rejects_traversal() {
        assert_matches!(
            entry("src/../etc/passwd").local_path("out"),
            Err(PathError::UnsafeSegment { segment, .. }) if segment == ".."
        );
        assert_matches!(
            entry("src/a//b").local_path("out"),
            Err(PathError::UnsafeSegment { .. })
        );
        assert_matches!(
            entry("src/..\\evil").local_path("out"),
            Err(PathError::UnsafeSegment { .. })
        );
    }

    #[test]
    fn root_only_is_empty() {
        assert_eq!(
            entry("src").local_path("out"),
            Err(PathError::Empty("src".to_string()))
        );
    }
}
