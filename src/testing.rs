//! In-memory node double used by resolver, session and shell tests.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};

use crate::error::{Result, RtdbError};
use crate::node::{join_segment, parent_of, Node};

/// Backing store shared by every handle of one mock tree.
///
/// The double models a single remote value: reads return it, writes
/// replace or merge it, and an injected failure message makes every I/O
/// operation fail while leaving pure navigation intact.
#[derive(Debug, Default)]
pub(crate) struct MemStore {
    pub data: Option<Value>,
    pub fail: Option<String>,
    pub deleted: bool,
    pub pushed: Option<Value>,
}

/// In-memory implementation of [`Node`].
///
/// Handles are value-like and share one [`MemStore`]; `parent`/`child`
/// are pure path arithmetic, matching the production adapter.
#[derive(Debug, Clone)]
pub(crate) struct MemNode {
    path: String,
    store: Arc<Mutex<MemStore>>,
    parents: bool,
}

impl MemNode {
    /// Root handle over an empty tree.
    pub fn root() -> Self {
        Self::with_store(MemStore::default())
    }

    /// Root handle over a tree holding `data`.
    pub fn with_data(data: Value) -> Self {
        Self::with_store(MemStore {
            data: Some(data),
            ..MemStore::default()
        })
    }

    /// Root handle whose every I/O operation fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self::with_store(MemStore {
            fail: Some(message.to_string()),
            ..MemStore::default()
        })
    }

    /// Root handle for a backend that cannot compute parents at all,
    /// so `..` below the root has nowhere to go.
    pub fn detached() -> Self {
        let mut node = Self::root();
        node.parents = false;
        node
    }

    fn with_store(store: MemStore) -> Self {
        Self {
            path: "/".to_string(),
            store: Arc::new(Mutex::new(store)),
            parents: true,
        }
    }

    /// Direct access to the shared store for assertions.
    pub fn store(&self) -> MutexGuard<'_, MemStore> {
        self.store.lock().unwrap()
    }

    fn check_fail(&self) -> Result<()> {
        match &self.store().fail {
            Some(message) => Err(RtdbError::Custom(message.clone())),
            None => Ok(()),
        }
    }
}

impl Node for MemNode {
    fn path(&self) -> &str {
        &self.path
    }

    fn parent(&self) -> Option<Self> {
        if !self.parents {
            return None;
        }

        parent_of(&self.path).map(|path| Self {
            path,
            store: Arc::clone(&self.store),
            parents: self.parents,
        })
    }

    fn child(&self, segment: &str) -> Self {
        Self {
            path: join_segment(&self.path, segment),
            store: Arc::clone(&self.store),
            parents: self.parents,
        }
    }

    async fn get(&self) -> Result<Value> {
        self.check_fail()?;
        Ok(self.store().data.clone().unwrap_or(Value::Null))
    }

    async fn get_shallow(&self) -> Result<Value> {
        self.get().await
    }

    async fn set(&self, value: &Value) -> Result<()> {
        self.check_fail()?;
        self.store().data = Some(value.clone());
        Ok(())
    }

    async fn update(&self, entries: &Map<String, Value>) -> Result<()> {
        self.check_fail()?;

        let mut store = self.store();
        match &mut store.data {
            Some(Value::Object(existing)) => {
                for (key, value) in entries {
                    existing.insert(key.clone(), value.clone());
                }
            }
            _ => store.data = Some(Value::Object(entries.clone())),
        }
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        self.check_fail()?;

        let mut store = self.store();
        store.data = None;
        store.deleted = true;
        Ok(())
    }

    async fn push(&self, value: Option<&Value>) -> Result<String> {
        self.check_fail()?;

        let pushed = value.cloned().unwrap_or_else(|| Value::String(String::new()));
        self.store().pushed = Some(pushed);
        Ok(join_segment(&self.path, "child"))
    }
}
