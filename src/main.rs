use std::io;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    use beepboop_shell::config::{Config, ConfigLoader};
    use beepboop_shell::io::LineReader;
    use beepboop_shell::prompt::ShellPrompt;
    use beepboop_shell::repl::{DebugInterpreter, Repl};

    // Logs go to stderr so token dumps on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ConfigLoader::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    tracing::debug!(?config, "starting scanner shell");

    let reader = LineReader::with_capacity(io::stdin().lock(), config.buffer_capacity);
    let prompt = ShellPrompt::detect(&config.prompt);
    let interpreter = DebugInterpreter::new(io::stdout(), config.print_style);

    let mut repl = Repl::new(reader, prompt, interpreter);
    match repl.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
