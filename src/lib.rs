//! # rtdbsh
//!
//! Interactive navigation shell for a remote hierarchical key/value tree
//! (a Firebase Realtime Database), with Unix-style path semantics.
//!
//! ## Features
//!
//! - **Navigation**: `cd`/`pwd` over slash-separated paths with `.`,
//!   `..`, relative and absolute expressions resolved exactly the way a
//!   Unix shell would.
//! - **Data access**: `get` (full subtree), `ls` (immediate children),
//!   `set`, `update` (merge), `push` (server-named child), `delete`.
//! - **One dispatch path** for interactive use, scripted invocations and
//!   tests, so behavior is identical everywhere.
//! - **Pluggable backend**: the shell core only knows the [`Node`]
//!   capability trait; the production adapter speaks the database's REST
//!   protocol and tests run against an in-memory double.
//!
//! ## Example
//!
//! ```no_run
//! use std::io;
//! use std::sync::Arc;
//!
//! use rtdbsh::api::RtdbClient;
//! use rtdbsh::{RemoteNode, Session, Shell};
//!
//! # async fn example() -> rtdbsh::Result<()> {
//! let client = RtdbClient::new("https://example-db.firebaseio.com", None)?;
//! let session = Session::new(RemoteNode::root(Arc::new(client)));
//!
//! let mut shell = Shell::new(session, io::stdout());
//! shell.process_line("get /users").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod node;
pub mod resolver;
pub mod session;
pub mod shell;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use error::{Result, RtdbError};
pub use node::{Node, RemoteNode};
pub use session::Session;
pub use shell::{Control, Shell};
