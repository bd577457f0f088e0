use anyhow::{Context as _, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::waqi::{FetchError, Reading};

// Ref: https://aqicn.org/json-api/doc/#api-Feed-GetFeed
const REQUIRED_MEASUREMENTS: [&str; 5] = ["h", "t", "p", "pm10", "pm25"];

#[derive(Debug, Deserialize)]
struct Feed {
    data: FeedData,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    time: FeedTime,
    iaqi: Iaqi,
}

#[derive(Debug, Deserialize)]
struct FeedTime {
    v: i64,
    tz: String,
}

#[derive(Debug, Deserialize)]
struct Iaqi {
    h: Measure,
    t: Measure,
    p: Measure,
    pm10: Measure,
    pm25: Measure,
}

#[derive(Debug, Deserialize)]
struct Measure {
    v: f64,
}

/// Validates a decoded feed payload and normalizes it into a [`Reading`].
///
/// The envelope checks run in a fixed order: `status` present, `status` equal
/// to `"ok"`, all five measurements present. Any other shape problem is
/// reported as [`FetchError::Malformed`].
pub fn parse_feed(payload: Value) -> Result<Reading, FetchError> {
    let Some(status) = payload.get("status") else {
        return Err(FetchError::NotWellFormed(payload));
    };

    if status.as_str() != Some("ok") {
        return Err(FetchError::Api(payload));
    }

    let Some(iaqi) = payload.pointer("/data/iaqi").and_then(Value::as_object) else {
        return Err(malformed("missing data.iaqi object", payload));
    };

    if REQUIRED_MEASUREMENTS
        .iter()
        .any(|key| !iaqi.contains_key(*key))
    {
        return Err(FetchError::Incomplete(payload));
    }

    let feed = match Feed::deserialize(&payload) {
        Ok(feed) => feed,
        Err(err) => return Err(malformed(err.to_string(), payload)),
    };

    let adjustment = match tz_adjustment(&feed.data.time.tz) {
        Ok(adjustment) => adjustment,
        Err(err) => return Err(malformed(format!("{err:#}"), payload)),
    };

    let Some(time) = feed.data.time.v.checked_add(adjustment) else {
        return Err(malformed("time out of range", payload));
    };

    let iaqi = feed.data.iaqi;

    Ok(Reading {
        time,
        temp: iaqi.t.v,
        hum: iaqi.h.v,
        pm10: iaqi.pm10.v,
        pm25: iaqi.pm25.v,
        pres: iaqi.p.v,
    })
}

/// Seconds to add to the feed's `time.v`.
///
/// Only the sign character and up to two hour digits are read (`"+01:00"` gives
/// `-3600`, `"+1"` gives `-3600`). A `+` offset is subtracted, anything else is added.
pub fn tz_adjustment(tz: &str) -> Result<i64> {
    let mut chars = tz.chars();
    let Some(sign) = chars.next() else {
        bail!("empty timezone");
    };

    let rest = chars.as_str();
    let hours = rest.get(..2).unwrap_or(rest);

    let hours: i64 = hours
        .parse()
        .with_context(|| format!("failed to parse timezone hours: {tz:?}"))?;

    let diff = hours * 3600;
    if sign == '+' { Ok(-diff) } else { Ok(diff) }
}

fn malformed(reason: impl Into<String>, payload: Value) -> FetchError {
    FetchError::Malformed {
        reason: reason.into(),
        payload,
    }
}
