//! Entry point for the merrin dashboard. Parses args, loads config and runs the App.

mod app;
mod cli;
mod config;
mod logging;
mod ui;

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use app::App;
use cli::parse_args;
use config::load_config;
use merrin_metrics::Collector;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    if !cfg!(target_os = "linux") {
        eprintln!("This program must be run on Linux");
        return ExitCode::FAILURE;
    }

    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(e) => {
            if e.exit_code() == 0 {
                println!("{e}");
            } else {
                eprintln!("{e}");
            }
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    logging::init_tracing();
    let cfg = load_config();
    let collector = Collector::new(cfg.sensors);

    let res = if parsed.once {
        print_once(collector).await
    } else {
        let refresh = Duration::from_secs(parsed.refresh_secs.unwrap_or(cfg.refresh_secs));
        let mut app = App::new(collector, cfg.thresholds, refresh);
        // SIGINT from outside the terminal (kill -INT); dropping the run future restores the screen
        tokio::select! {
            res = app.run() => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "merrin exited with an error");
            eprintln!("merrin: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// One snapshot as pretty JSON on stdout.
async fn print_once(collector: Collector) -> anyhow::Result<()> {
    let snap = tokio::task::spawn_blocking(move || collector.collect())
        .await
        .context("collector task failed")?;
    let json = serde_json::to_string_pretty(&snap).context("serializing snapshot")?;
    println!("{json}");
    Ok(())
}
