use crate::report::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "salescope")]
#[command(about = "Retail weekly-sales analytics and report generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the datasets, run the analysis catalog, and render the results
    Analyze {
        /// Data directory holding train.csv, stores.csv, and optionally
        /// features.csv
        path: PathBuf,

        /// Explicit sales file (overrides <path>/train.csv)
        #[arg(long)]
        sales: Option<PathBuf>,

        /// Explicit store metadata file (overrides <path>/stores.csv)
        #[arg(long)]
        stores: Option<PathBuf>,

        /// Explicit features file (overrides <path>/features.csv)
        #[arg(long)]
        features: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file, or output directory for the csv format
        /// (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to salescope.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// How many stores the top-performer table shows
        #[arg(long = "top-n")]
        top_n: Option<usize>,

        /// Trailing moving-average window in points
        #[arg(long = "moving-average-window")]
        moving_average_window: Option<usize>,

        /// Cutoff date for the early/late period comparison (YYYY-MM-DD)
        #[arg(long = "period-split-date")]
        period_split_date: Option<NaiveDate>,

        /// Increase verbosity (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Render the narrative markdown report (shorthand for
    /// `analyze --format markdown`)
    Report {
        /// Data directory
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Increase verbosity
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default salescope.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Analyze { verbosity, .. } | Commands::Report { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults_to_terminal_format() {
        let cli = Cli::try_parse_from(["salescope", "analyze", "data"]).unwrap();
        match cli.command {
            Commands::Analyze { format, path, .. } => {
                assert_eq!(format, OutputFormat::Terminal);
                assert_eq!(path, PathBuf::from("data"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn overrides_parse() {
        let cli = Cli::try_parse_from([
            "salescope",
            "analyze",
            "data",
            "--format",
            "json",
            "--top-n",
            "5",
            "--period-split-date",
            "2011-07-01",
            "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                format,
                top_n,
                period_split_date,
                verbosity,
                ..
            } => {
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(top_n, Some(5));
                assert_eq!(
                    period_split_date,
                    Some(NaiveDate::from_ymd_opt(2011, 7, 1).unwrap())
                );
                assert_eq!(verbosity, 2);
            }
            _ => panic!("expected analyze"),
        }
    }
}
