use std::time::Duration;

use anyhow::{Context as _, Result};
use log::debug;

use crate::last_time::LastTimeFile;
use crate::mqtt::Publish;
use crate::retry::{MAX_ATTEMPTS, RETRY_INTERVAL, retry};
use crate::waqi::{FailureReport, FeedSource, Reading};

#[derive(Debug, Clone)]
pub struct CycleOptions {
    pub topic: String,

    pub topic_error: String,

    pub dry_run: bool,

    pub max_attempts: usize,

    pub retry_interval: Duration,
}

impl CycleOptions {
    pub fn new(topic: impl Into<String>, topic_error: impl Into<String>, dry_run: bool) -> Self {
        Self {
            topic: topic.into(),
            topic_error: topic_error.into(),
            dry_run,
            max_attempts: MAX_ATTEMPTS,
            retry_interval: RETRY_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The reading was newer than the stored timestamp and went to the success topic
    /// (unless dry-run).
    Published(Reading),

    /// The stored timestamp is at least as recent as the reading; nothing was written.
    NoNewData { last_time: i64, reading: Reading },

    /// Every attempt failed; the last report went to the error topic (unless dry-run).
    Failed(FailureReport),
}

/// One fetch, dedup and publish pass.
pub async fn run_cycle<S, P>(
    source: &S,
    last_time: &LastTimeFile,
    publisher: &P,
    options: &CycleOptions,
) -> Result<Outcome>
where
    S: FeedSource,
    P: Publish,
{
    let fetched = retry(options.max_attempts, options.retry_interval, || source.fetch()).await;

    match fetched {
        Ok(reading) => {
            let payload = serde_json::to_string(&reading).context("failed to serialize reading")?;
            debug!("Success with message <{payload}>");

            if let Some(previous) = last_time.read()?
                && previous >= reading.time
            {
                return Ok(Outcome::NoNewData {
                    last_time: previous,
                    reading,
                });
            }

            last_time.write(reading.time)?;

            if !options.dry_run {
                publisher
                    .publish(&options.topic, &payload)
                    .await
                    .with_context(|| format!("failed to publish reading to {}", options.topic))?;
            }

            Ok(Outcome::Published(reading))
        }
        Err(report) => {
            let payload =
                serde_json::to_string(&report).context("failed to serialize failure report")?;

            if !options.dry_run {
                publisher
                    .publish(&options.topic_error, &payload)
                    .await
                    .with_context(|| {
                        format!("failed to publish failure to {}", options.topic_error)
                    })?;
            }

            Ok(Outcome::Failed(report))
        }
    }
}
