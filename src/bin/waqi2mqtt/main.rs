mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use log::LevelFilter;
use waqi2mqtt::{
    cycle::{CycleOptions, Outcome, run_cycle},
    last_time::LastTimeFile,
    mqtt::MqttPublisher,
    waqi::WaqiClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("waqi2mqtt", level)
        .parse_default_env()
        .init();
}

async fn run(args: Args) -> Result<()> {
    let http = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;
    let source = WaqiClient::new(http, args.city, args.waqi_api_key);
    let last_time = LastTimeFile::new(args.last_time);
    let publisher = MqttPublisher::new(args.mqtt_host, args.mqtt_port);
    let options = CycleOptions::new(args.topic, args.topic_error, args.dry_run);

    match run_cycle(&source, &last_time, &publisher, &options).await? {
        Outcome::Published(reading) => {
            if options.dry_run {
                println!("Dry run, not publishing reading from {}", reading.time);
            } else {
                println!("Published reading from {} to {}", reading.time, options.topic);
            }
        }
        Outcome::NoNewData { .. } => println!("No new data found"),
        Outcome::Failed(report) => {
            let payload =
                serde_json::to_string(&report).context("failed to serialize failure report")?;
            println!("Failure with message <{payload}>");
        }
    }

    Ok(())
}
