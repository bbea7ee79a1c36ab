//! Shell-style path resolution over node handles.

use crate::error::{Result, RtdbError};
use crate::node::Node;

/// Resolve a path expression against the current node.
///
/// Follows Unix shell intuition: `expr` is split on `/` (repeated,
/// leading and trailing slashes collapse), `.` stays put, `..` moves to
/// the parent, anything else descends into a child. A leading slash (or
/// an expression consisting only of slashes) starts the walk at `root`
/// instead of `current`; an empty expression is the current node itself.
///
/// `..` at the session root stays at the root rather than erroring. A
/// node the backend genuinely cannot go above anywhere else fails with
/// `Invalid path`, carrying the original expression.
///
/// Resolution is pure address computation and performs no I/O.
pub fn resolve<N: Node>(current: &N, root: &N, expr: &str) -> Result<N> {
    if expr.is_empty() {
        return Ok(current.clone());
    }

    let segments: Vec<&str> = expr.split('/').filter(|s| !s.is_empty()).collect();

    let mut node = if segments.is_empty() || expr.starts_with('/') {
        root.clone()
    } else {
        current.clone()
    };

    for segment in segments {
        match segment {
            "." => {}
            ".." => {
                if let Some(parent) = node.parent() {
                    node = parent;
                } else if node.path() != root.path() {
                    return Err(RtdbError::InvalidPath(expr.to_string()));
                }
            }
            segment => node = node.child(segment),
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemNode;

    fn resolve_path(current: &MemNode, root: &MemNode, expr: &str) -> String {
        resolve(current, root, expr).unwrap().path().to_string()
    }

    #[test]
    fn test_empty_expression_is_current() {
        let root = MemNode::root();
        let current = root.child("foo");
        assert_eq!(resolve_path(&current, &root, ""), "/foo");
    }

    #[test]
    fn test_relative_and_absolute() {
        let root = MemNode::root();
        let current = root.child("foo");

        assert_eq!(resolve_path(&current, &root, "bar"), "/foo/bar");
        assert_eq!(resolve_path(&current, &root, "bar/baz"), "/foo/bar/baz");
        assert_eq!(resolve_path(&current, &root, "/bar"), "/bar");
        assert_eq!(resolve_path(&current, &root, "/"), "/");
        assert_eq!(resolve_path(&current, &root, "///"), "/");
    }

    #[test]
    fn test_repeated_slashes_collapse() {
        let root = MemNode::root();
        assert_eq!(resolve_path(&root, &root, "foo//bar/"), "/foo/bar");
    }

    #[test]
    fn test_dot_segments_resolve_to_start() {
        let root = MemNode::root();
        let current = root.child("foo").child("bar");

        for expr in [".", "./.", "././."] {
            assert_eq!(resolve_path(&current, &root, expr), "/foo/bar");
        }
        assert_eq!(resolve_path(&current, &root, "./baz"), "/foo/bar/baz");
    }

    #[test]
    fn test_parent_undoes_child() {
        let root = MemNode::root();
        let node = root.child("foo");
        let child = node.child("bar");
        assert_eq!(resolve_path(&child, &root, ".."), "/foo");
        assert_eq!(resolve_path(&child, &root, "../.."), "/");
    }

    #[test]
    fn test_parent_at_root_is_a_noop() {
        let root = MemNode::root();
        assert_eq!(resolve_path(&root, &root, ".."), "/");
        assert_eq!(resolve_path(&root, &root, "../../.."), "/");
        assert_eq!(resolve_path(&root, &root, "../foo"), "/foo");
    }

    #[test]
    fn test_unaddressable_parent_is_invalid_path() {
        // A backend that cannot compute parents below the session root.
        let root = MemNode::detached();
        let current = root.child("data");

        let err = resolve(&current, &root, "..").unwrap_err();
        assert_eq!(err.to_string(), "Invalid path: \"..\"");

        let err = resolve(&current, &root, "../x").unwrap_err();
        assert_eq!(err.to_string(), "Invalid path: \"../x\"");
    }
}
