use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use storeledger::application::engine::StoreEngine;
use storeledger::config::{DEFAULT_HOLD_DURATION, EngineConfig, RankingMetric};
use storeledger::domain::{AccountId, Timestamp};
use storeledger::interfaces::csv::account_writer::AccountWriter;
use storeledger::interfaces::csv::op_reader::OpReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Account allowed to register merchants and force-release funds
    #[arg(long, default_value_t = 0)]
    admin: AccountId,

    /// Escrow hold applied to every purchase and refund credit, seconds
    #[arg(long, default_value_t = DEFAULT_HOLD_DURATION)]
    hold_duration: Timestamp,

    /// Metric the best-merchant ranking accumulates
    #[arg(long, value_enum, default_value = "quantity")]
    ranking: RankingMetric,

    /// Write completion events as JSON lines to this file
    #[arg(long)]
    events: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut engine = StoreEngine::new(EngineConfig {
        admin: cli.admin,
        hold_duration: cli.hold_duration,
        ranking: cli.ranking,
    });

    let mut event_sink = match &cli.events {
        Some(path) => Some(File::create(path).into_diagnostic()?),
        None => None,
    };

    let file = File::open(&cli.input).into_diagnostic()?;
    for record in OpReader::new(file).records() {
        match record {
            Ok(record) => match record.apply(&mut engine) {
                Ok(Some(event)) => {
                    if let Some(sink) = event_sink.as_mut() {
                        serde_json::to_writer(&mut *sink, &event).into_diagnostic()?;
                        writeln!(sink).into_diagnostic()?;
                    }
                }
                Ok(None) => {}
                Err(e) => eprintln!("Error processing operation: {e}"),
            },
            Err(e) => eprintln!("Error reading operation: {e}"),
        }
    }

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer
        .write_accounts(engine.accounts())
        .into_diagnostic()?;

    Ok(())
}
