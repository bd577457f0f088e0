use std::path::PathBuf;

use clap::{Parser, builder::NonEmptyStringValueParser};
use waqi2mqtt::mqtt::DEFAULT_PORT;

/// Read current air quality, temperature and humidity from waqi.info and send
/// them to a MQTT broker.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// WAQI API Key.
    #[arg(
        short = 'a',
        long,
        env = "WAQI_API_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub waqi_api_key: String,

    /// WAQI city ID.
    #[arg(
        short,
        long,
        env = "WAQI_CITY_ID",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub city: String,

    /// Specify the MQTT host to connect to.
    #[arg(short, long, default_value = "127.0.0.1")]
    pub mqtt_host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub mqtt_port: u16,

    /// No data will be sent to the MQTT broker.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// The file where the last timestamp coming from WAQI API will be saved.
    #[arg(short = 'o', long, default_value = "/tmp/waqi_last")]
    pub last_time: PathBuf,

    /// The MQTT topic on which to publish the message (if it was a success).
    #[arg(short, long, default_value = "sensor/outdoor")]
    pub topic: String,

    /// The MQTT topic on which to publish the message (if it wasn't a success).
    #[arg(short = 'T', long, default_value = "error/sensor/outdoor", value_name = "TOPIC")]
    pub topic_error: String,

    /// Enable debug messages.
    #[arg(short, long)]
    pub verbose: bool,
}
