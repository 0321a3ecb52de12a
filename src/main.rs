use anyhow::Result;
use kilomoco::cli::{self, CliResult};

fn main() -> Result<()> {
    // Initialize unified logging first — it writes to a side file, never to
    // the terminal, so both the CLI paths and the TUI stay clean.
    kilomoco::debug::init_log_bridge();

    match cli::process_cli() {
        CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            // Non-zero exit: use process::exit so the shell sees the correct
            // exit code. No TUI state exists yet, so no destructors are skipped.
            std::process::exit(code);
        }
        CliResult::Continue => {}
    }

    log::info!("Starting kilomoco interactive interface");
    match kilomoco::tui::run_tui() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("kilomoco: error: {e:#}");
            std::process::exit(1);
        }
    }
}
