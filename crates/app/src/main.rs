//! Till CLI

use std::{error::Error, io, process::ExitCode};

use till_app::{cli::Cli, logging};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(init_error) = logging::init(&cli.logging) {
        report(&init_error);

        return ExitCode::FAILURE;
    }

    match cli.run(io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!(error = %run_error, "command failed");
            report(&run_error);

            ExitCode::FAILURE
        }
    }
}

fn report(error: &dyn Error) {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    #[expect(
        clippy::print_stderr,
        reason = "errors are shown to the user even when logging is filtered out"
    )]
    {
        eprintln!("error: {message}");
    }
}
