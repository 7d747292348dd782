#[macro_use]
extern crate log;

use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use hrv_patterns::{algo::PatternDetector, loader, report};

#[derive(Parser)]
pub struct HrvPatternsCli {
    /// Daily wearable export with one row per user and day
    #[arg(env = "HRV_PATTERNS_FILE", long, default_value = "wearables_health_6mo_daily.csv")]
    pub file: PathBuf,
    #[clap(subcommand)]
    pub subcommand: HrvPatternsCommand,
}

#[derive(Subcommand)]
pub enum HrvPatternsCommand {
    ///
    /// Rank lifestyle patterns affecting one user's HRV
    ///
    Detect {
        #[arg(env = "HRV_PATTERNS_USER", long, default_value = "U0001")]
        user: String,
        /// How many findings to print
        #[arg(long, default_value_t = 5)]
        limit: usize,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    ///
    /// List users in the export with their logged days
    ///
    Users,
    ///
    /// Print shell completions
    ///
    Completions { shell: Shell },
}

fn main() -> anyhow::Result<()> {
    let dotenv_result = dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = dotenv_result {
        debug!("no .env loaded: {}", error);
    }

    let cli = HrvPatternsCli::parse();

    match cli.subcommand {
        HrvPatternsCommand::Detect { user, limit, json } => {
            let records = loader::load_user(&cli.file, &user)
                .with_context(|| format!("loading {}", cli.file.display()))?;

            info!("loaded {} days for {}", records.len(), user);
            if let Some((first, last)) = loader::date_range(&records) {
                info!("logged from {} to {}", first, last);
            }

            let findings = PatternDetector::default()
                .detect(&records)
                .with_context(|| format!("detecting patterns for {}", user))?;

            if let Some(finding) = findings.first().filter(|f| f.is_sentinel()) {
                warn!("no pattern for {}: {}", user, finding.pattern);
            }

            let output = if json {
                report::render_json(&user, records.len(), &findings, limit)? + "\n"
            } else {
                report::render_text(&user, records.len(), &findings, limit)
            };
            print!("{}", output);
            Ok(())
        }
        HrvPatternsCommand::Users => {
            let users = loader::list_users(&cli.file)
                .with_context(|| format!("loading {}", cli.file.display()))?;

            for (user, days) in users {
                println!("{}\t{} days", user, days);
            }
            Ok(())
        }
        HrvPatternsCommand::Completions { shell } => {
            let mut command = HrvPatternsCli::command();
            clap_complete::generate(shell, &mut command, "hrv-patterns", &mut io::stdout());
            Ok(())
        }
    }
}
