use std::process::ExitCode;

use clap::Parser;

use passgen::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    passgen::logging::init(cli.log.as_deref(), cli.verbose);

    if let Err(e) = passgen_core::disable_core_dumps() {
        tracing::warn!("Could not disable core dumps: {e}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match passgen::run(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed.");
            eprintln!("passgen: {e}");
            e.exit_code()
        }
    }
}
