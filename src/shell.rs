//! The read-eval-print loop and command dispatch.
//!
//! One dispatch path serves interactive input, scripted invocations and
//! tests alike: a line is tokenized into a verb plus positional
//! arguments, matched against the command table, and handed to the
//! session. No command failure ever terminates the shell; only writing
//! to the output sink can abort the loop.

use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::error::{Result, RtdbError};
use crate::node::Node;
use crate::session::Session;

/// Crate version, printed by the `version` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A REPL verb with its help line for the `help` listing.
struct Command {
    name: &'static str,
    help: &'static str,
}

const COMMANDS: &[Command] = &[
    Command {
        name: "cd",
        help: "Changes the current location",
    },
    Command {
        name: "delete",
        help: "Deletes the current or specified path and all its child nodes",
    },
    Command {
        name: "get",
        help: "Gets the data in the current or specified path",
    },
    Command {
        name: "ls",
        help: "Lists the child nodes of the current or specified path",
    },
    Command {
        name: "push",
        help: "Pushes a new child to the current path",
    },
    Command {
        name: "pwd",
        help: "Prints the path of the current node",
    },
    Command {
        name: "set",
        help: "Sets the data at the current or specified path",
    },
    Command {
        name: "update",
        help: "Updates the specified child keys",
    },
    Command {
        name: "version",
        help: "Prints the current version of the CLI",
    },
    Command {
        name: "help",
        help: "Lists the available commands",
    },
    Command {
        name: "exit",
        help: "Leaves the shell",
    },
];

/// Whether the dispatch loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The interactive shell: a session bound to an output sink.
#[derive(Debug)]
pub struct Shell<N: Node, W: Write> {
    session: Session<N>,
    out: W,
    prompt: String,
}

impl<N: Node, W: Write> Shell<N, W> {
    /// Create a shell over `session`, writing command output to `out`.
    pub fn new(session: Session<N>, out: W) -> Self {
        let prompt = prompt_for(session.pwd());
        Self {
            session,
            out,
            prompt,
        }
    }

    /// The session driven by this shell.
    pub fn session(&self) -> &Session<N> {
        &self.session
    }

    /// The prompt reflecting the current location.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Tokenize one input line and dispatch it.
    pub async fn process_line(&mut self, line: &str) -> Result<Control> {
        self.dispatch(&tokenize(line)).await
    }

    /// Execute one command given as verb + arguments.
    ///
    /// This is the single entry point shared by the interactive loop,
    /// script mode and tests. Command failures are printed to the sink
    /// and the shell keeps going; only sink write failures are returned.
    pub async fn dispatch(&mut self, argv: &[String]) -> Result<Control> {
        let Some((verb, args)) = argv.split_first() else {
            return Ok(Control::Continue);
        };
        debug!(verb = %verb, args = args.len(), "dispatch");

        match verb.as_str() {
            "pwd" => {
                let path = self.session.pwd().to_string();
                writeln!(self.out, "{path}")?;
            }
            "cd" => {
                let result = match args {
                    [] => self.session.cd(None),
                    [path] => self.session.cd(Some(path.as_str())),
                    _ => Err(RtdbError::UsageError("cd [path]")),
                };
                match result {
                    Ok(()) => self.prompt = prompt_for(self.session.pwd()),
                    Err(err) => self.report(err)?,
                }
            }
            "get" => {
                if let Err(err) = self.session.get(args, &mut self.out).await {
                    self.report(err)?;
                }
            }
            "ls" => {
                if let Err(err) = self.session.ls(args, &mut self.out).await {
                    self.report(err)?;
                }
            }
            "set" => {
                let result = match args {
                    [data] => self.session.set(None, data).await,
                    [path, data] => self.session.set(Some(path.as_str()), data).await,
                    _ => Err(RtdbError::UsageError("set [path] <data>")),
                };
                if let Err(err) = result {
                    self.report(err)?;
                }
            }
            "update" => {
                let result = match args {
                    [data] => self.session.update(None, data).await,
                    [path, data] => self.session.update(Some(path.as_str()), data).await,
                    _ => Err(RtdbError::UsageError("update [path] <data>")),
                };
                if let Err(err) = result {
                    self.report(err)?;
                }
            }
            "push" => {
                let result = match args {
                    [] => self.session.push(None).await,
                    [data] => self.session.push(Some(data.as_str())).await,
                    _ => Err(RtdbError::UsageError("push [data]")),
                };
                match result {
                    Ok(child) => writeln!(self.out, "{child}")?,
                    Err(err) => self.report(err)?,
                }
            }
            "delete" => {
                let result = match args {
                    [] => self.session.delete(None).await,
                    [path] => self.session.delete(Some(path.as_str())).await,
                    _ => Err(RtdbError::UsageError("delete [path]")),
                };
                if let Err(err) = result {
                    self.report(err)?;
                }
            }
            "version" => writeln!(self.out, "{VERSION}")?,
            "help" => self.print_help()?,
            "exit" => return Ok(Control::Exit),
            unknown => writeln!(self.out, "command not found: {unknown}")?,
        }

        Ok(Control::Continue)
    }

    /// Run the interactive loop until `exit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| RtdbError::Custom(format!("failed to init line editor: {e}")))?;

        loop {
            let line = match editor.readline(self.prompt()) {
                Ok(line) => line,
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => continue,
                Err(e) => return Err(RtdbError::Custom(format!("readline error: {e}"))),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let _ = editor.add_history_entry(line);

            match self.process_line(line).await? {
                Control::Continue => {}
                Control::Exit => break,
            }
        }

        Ok(())
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(self.out, "Commands:")?;
        for command in COMMANDS {
            writeln!(self.out, "  {:<10}{}", command.name, command.help)?;
        }
        Ok(())
    }

    /// Print a command failure to the sink; sink failures propagate.
    fn report(&mut self, err: RtdbError) -> Result<()> {
        if matches!(err, RtdbError::IoError(_)) {
            return Err(err);
        }
        writeln!(self.out, "{err}")?;
        Ok(())
    }
}

fn prompt_for(path: &str) -> String {
    format!("{path} >>> ")
}

/// Split an input line into whitespace-separated tokens, honoring
/// double quotes and backslash escapes so JSON literals containing
/// spaces survive as a single argument.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
