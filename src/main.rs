use anyhow::Result;
use clap::Parser;
use salescope::cli::{Cli, Commands};
use salescope::commands::{handle_analyze, handle_report, init_config, AnalyzeOptions};

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Analyze {
            path,
            sales,
            stores,
            features,
            format,
            output,
            config,
            top_n,
            moving_average_window,
            period_split_date,
            verbosity: _,
        } => handle_analyze(AnalyzeOptions {
            path,
            sales,
            stores,
            features,
            format,
            output,
            config,
            top_n,
            moving_average_window,
            period_split_date,
        }),
        Commands::Report {
            path,
            output,
            config,
            verbosity: _,
        } => handle_report(path, output, config),
        Commands::Init { force } => init_config(force),
    }
}
