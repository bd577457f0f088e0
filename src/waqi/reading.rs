use serde::{Deserialize, Serialize};

/// A normalized outdoor reading, published as-is on the success topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Unix seconds, shifted by the inverted station offset.
    pub time: i64,

    pub temp: f64,

    pub hum: f64,

    pub pm10: f64,

    pub pm25: f64,

    pub pres: f64,
}
