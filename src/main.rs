use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::Level;

use rtdbsh::api::RtdbClient;
use rtdbsh::{RemoteNode, Session, Shell};

#[derive(Parser, Debug)]
#[command(
    name = "rtdbsh",
    version,
    about = "Interactive shell for a Firebase Realtime Database"
)]
struct Cli {
    /// Realtime database URL, e.g. https://example-db.firebaseio.com
    #[arg(long, env = "FIREBASE_RTDB_URL")]
    url: Option<String>,

    /// Database auth token appended to every request
    #[arg(long, env = "FIREBASE_RTDB_AUTH", hide_env_values = true)]
    auth: Option<String>,

    /// Run the given command non-interactively and exit
    #[arg(long)]
    script: bool,

    #[arg(long, default_value = "off", value_enum)]
    log_level: LogLevel,

    /// Command words for --script mode
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(&cli);

    let Some(url) = cli.url else {
        eprintln!("rtdb url not specified");
        return ExitCode::FAILURE;
    };

    let client = match RtdbClient::new(&url, cli.auth) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let session = Session::new(RemoteNode::root(Arc::new(client)));
    let mut shell = Shell::new(session, io::stdout());

    if cli.script {
        return match shell.dispatch(&cli.command).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    println!("Realtime Database CLI");
    println!("{url}");
    println!();

    match shell.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(cli: &Cli) {
    if let Some(level) = cli.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .compact()
            .init();
    }
}
