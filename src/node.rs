//! Tree node handles and the backend capability trait.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::RtdbClient;
use crate::error::Result;

/// One addressable location in the remote tree.
///
/// A node is a cheap, immutable value handle: constructing one (and
/// walking with [`parent`](Node::parent) / [`child`](Node::child)) is pure
/// address computation and never touches the network. Only the six I/O
/// operations perform remote calls.
///
/// Paths are absolute, slash-separated, never contain `.` or `..`
/// segments, and `parent(child(n, seg))` addresses the same location as
/// `n`. `parent` returns `None` exactly when the backend cannot address
/// anything above the node; for the production adapter that is the tree
/// root.
// Session and shell are generic over the node type, so the trait stays a
// plain async trait without boxing.
#[allow(async_fn_in_trait)]
pub trait Node: Clone {
    /// The node's absolute path.
    fn path(&self) -> &str;

    /// Handle to the parent location, `None` when there is nothing above.
    fn parent(&self) -> Option<Self>;

    /// Handle to the child named `segment`.
    ///
    /// `segment` must be non-empty and must not be `.` or `..`; those are
    /// path-resolution concerns that never reach a node.
    fn child(&self, segment: &str) -> Self;

    /// Fetch the full subtree rooted at this node.
    async fn get(&self) -> Result<Value>;

    /// Fetch only the immediate children's presence (object keys map to
    /// placeholders; scalar data comes back whole).
    async fn get_shallow(&self) -> Result<Value>;

    /// Overwrite this node's data entirely.
    async fn set(&self, value: &Value) -> Result<()>;

    /// Merge the given key/value pairs into this node's children.
    async fn update(&self, entries: &Map<String, Value>) -> Result<()>;

    /// Remove this node and all descendants.
    async fn delete(&self) -> Result<()>;

    /// Create a new uniquely named child holding `value` (or an empty
    /// placeholder when `None`) and return the child's absolute path.
    async fn push(&self, value: Option<&Value>) -> Result<String>;
}

/// Production node handle backed by the REST client.
#[derive(Debug, Clone)]
pub struct RemoteNode {
    client: Arc<RtdbClient>,
    path: String,
}

impl RemoteNode {
    /// Root node of the database the client points at.
    pub fn root(client: Arc<RtdbClient>) -> Self {
        Self {
            client,
            path: "/".to_string(),
        }
    }
}

impl Node for RemoteNode {
    fn path(&self) -> &str {
        &self.path
    }

    fn parent(&self) -> Option<Self> {
        parent_of(&self.path).map(|path| Self {
            client: Arc::clone(&self.client),
            path,
        })
    }

    fn child(&self, segment: &str) -> Self {
        debug_assert!(!segment.is_empty() && segment != "." && segment != "..");
        Self {
            client: Arc::clone(&self.client),
            path: join_segment(&self.path, segment),
        }
    }

    async fn get(&self) -> Result<Value> {
        self.client.get(&self.path).await
    }

    async fn get_shallow(&self) -> Result<Value> {
        self.client.get_shallow(&self.path).await
    }

    async fn set(&self, value: &Value) -> Result<()> {
        self.client.put(&self.path, value).await
    }

    async fn update(&self, entries: &Map<String, Value>) -> Result<()> {
        self.client.patch(&self.path, entries).await
    }

    async fn delete(&self) -> Result<()> {
        self.client.delete(&self.path).await
    }

    async fn push(&self, value: Option<&Value>) -> Result<String> {
        // A nil push still has to create the child; the REST protocol
        // treats a JSON null as a delete, so an empty string stands in.
        let placeholder = Value::String(String::new());
        let value = value.unwrap_or(&placeholder);
        self.client.push(&self.path, value).await
    }
}

/// Append one segment to a normalized absolute path.
pub(crate) fn join_segment(path: &str, segment: &str) -> String {
    if path == "/" {
        format!("/{segment}")
    } else {
        format!("{path}/{segment}")
    }
}

/// Drop the last segment of a normalized absolute path. Returns `None`
/// at the root.
pub(crate) fn parent_of(path: &str) -> Option<String> {
    if path == "/" {
        return None;
    }

    match path.rfind('/') {
        Some(0) => Some("/".to_string()),
        Some(idx) => Some(path[..idx].to_string()),
        None => None,
    }
}
