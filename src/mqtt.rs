use anyhow::{Context as _, Result};
use log::debug;
use rumqttc::{AsyncClient, Event, MqttOptions, Outgoing, QoS};

pub const DEFAULT_PORT: u16 = 1883;

/// Sends one text message to a topic.
pub trait Publish {
    fn publish(&self, topic: &str, payload: &str) -> impl Future<Output = Result<()>>;
}

/// Connects, publishes a single QoS 0 message and disconnects on every call.
#[derive(Debug, Clone)]
pub struct MqttPublisher {
    host: String,
    port: u16,
    client_id: String,
}

impl MqttPublisher {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: format!("waqi2mqtt-{}", std::process::id()),
        }
    }
}

impl Publish for MqttPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> Result<()> {
        let options = MqttOptions::new(&self.client_id, &self.host, self.port);
        let (client, mut eventloop) = AsyncClient::new(options, 10);

        client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .context("failed to queue MQTT publish")?;
        client
            .disconnect()
            .await
            .context("failed to queue MQTT disconnect")?;

        loop {
            let event = eventloop.poll().await.with_context(|| {
                format!("failed to publish to MQTT broker {}:{}", self.host, self.port)
            })?;

            match event {
                Event::Outgoing(Outgoing::Disconnect) => break,
                event => debug!("MQTT event: {event:?}"),
            }
        }

        Ok(())
    }
}
