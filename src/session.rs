//! Shell session state: the current-node cursor and per-verb operations.

use std::io::Write;

use serde_json::Value;

use crate::error::{Result, RtdbError};
use crate::node::Node;
use crate::resolver::resolve;
use crate::value;

/// Process-local cursor over the remote tree.
///
/// Exactly one session exists per running shell. It owns the current
/// node and the root handle it was created with; the cursor moves only
/// on a successful `cd`, never speculatively. A failed resolution or
/// remote call leaves it untouched.
#[derive(Debug)]
pub struct Session<N: Node> {
    current: N,
    root: N,
}

impl<N: Node> Session<N> {
    /// Create a session with its cursor at `root`.
    pub fn new(root: N) -> Self {
        Self {
            current: root.clone(),
            root,
        }
    }

    /// Absolute path of the current node.
    pub fn pwd(&self) -> &str {
        self.current.path()
    }

    /// Resolve a path expression relative to the cursor.
    pub fn resolve(&self, expr: &str) -> Result<N> {
        resolve(&self.current, &self.root, expr)
    }

    /// Move the cursor. Without an argument the cursor returns to the
    /// root, mirroring a bare `cd` in a Unix shell.
    pub fn cd(&mut self, path: Option<&str>) -> Result<()> {
        let target = match path {
            Some(path) => self.resolve(path)?,
            None => self.root.clone(),
        };

        self.current = target;
        Ok(())
    }

    /// Fetch and print the value at each target path.
    ///
    /// With no paths the current node is shown. A single target prints
    /// the value alone; multiple targets each get a `<path>:` header
    /// (the argument as typed) with one blank line between blocks.
    /// Targets are processed in argument order and the first error
    /// stops the command, keeping any output already produced.
    pub async fn get<W: Write>(&self, paths: &[String], out: &mut W) -> Result<()> {
        let fallback = [String::new()];
        let paths = if paths.is_empty() { &fallback[..] } else { paths };
        let heading = paths.len() > 1;

        for (idx, expr) in paths.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }

            let target = self.resolve(expr)?;
            let data = target.get().await?;

            if heading {
                writeln!(out, "{expr}:")?;
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
        }

        Ok(())
    }

    /// List the immediate child names at each target path, one per line.
    ///
    /// Multi-target headers and error behavior match [`get`](Self::get).
    /// Non-object data has no children and lists nothing.
    pub async fn ls<W: Write>(&self, paths: &[String], out: &mut W) -> Result<()> {
        let fallback = [String::new()];
        let paths = if paths.is_empty() { &fallback[..] } else { paths };
        let heading = paths.len() > 1;

        for (idx, expr) in paths.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }

            let target = self.resolve(expr)?;
            let data = target.get_shallow().await?;

            if heading {
                writeln!(out, "{expr}:")?;
            }
            if let Value::Object(children) = data {
                for name in children.keys() {
                    writeln!(out, "{name}")?;
                }
            }
        }

        Ok(())
    }

    /// Write `data` to the target path (or the current node).
    pub async fn set(&self, path: Option<&str>, data: &str) -> Result<()> {
        let target = self.target(path)?;
        target.set(&value::decode(data)).await
    }

    /// Merge the keys of `data` into the target's children. `data` must
    /// decode to an object; anything else is rejected locally before any
    /// remote call is attempted.
    pub async fn update(&self, path: Option<&str>, data: &str) -> Result<()> {
        let Value::Object(entries) = value::decode(data) else {
            return Err(RtdbError::DataNotMap);
        };

        let target = self.target(path)?;
        target.update(&entries).await
    }

    /// Push a new child under the current node and return its path.
    pub async fn push(&self, data: Option<&str>) -> Result<String> {
        let decoded = data.map(value::decode);
        self.current.push(decoded.as_ref()).await
    }

    /// Delete the target path (or the current node) and all descendants.
    pub async fn delete(&self, path: Option<&str>) -> Result<()> {
        let target = self.target(path)?;
        target.delete().await
    }

    fn target(&self, path: Option<&str>) -> Result<N> {
        match path {
            Some(path) => self.resolve(path),
            None => Ok(self.current.clone()),
        }
    }
}
