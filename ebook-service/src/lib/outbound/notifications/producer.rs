use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;

use crate::config::Config;
use crate::domain::account::errors::NotifierError;
use crate::domain::account::models::VerificationEmail;
use crate::domain::account::ports::VerificationNotifier;
use crate::outbound::notifications::messages::MailTemplate;
use crate::outbound::notifications::messages::NotificationMessage;

/// Publishes verification email requests to Kafka for the mailer to deliver.
pub struct KafkaVerificationNotifier {
    producer: FutureProducer,
    topic: String,
    template: MailTemplate,
}

impl KafkaVerificationNotifier {
    /// Create a new Kafka notifier with "at least once" delivery semantics
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate messages during retries
    /// - Creating the producer does not contact the brokers
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        tracing::info!(
            brokers = %config.kafka.brokers,
            topic = %config.kafka.topic,
            "Initializing Kafka producer for verification emails"
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.kafka.brokers)
            .set("message.timeout.ms", "30000")
            .set("queue.buffering.max.messages", "10000")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "10")
            .set("max.in.flight.requests.per.connection", "5")
            .set("retry.backoff.ms", "100")
            .create()?;

        Ok(Self {
            producer,
            topic: config.kafka.topic.to_string(),
            template: MailTemplate {
                sender: config.mail.sender.clone(),
                frontend_url: config.mail.frontend_url.clone(),
                link_ttl_hours: config.mail.verification_expiration_hours,
            },
        })
    }

    /// Enqueue a message keyed by user id, then wait for the broker
    /// acknowledgement in a background task.
    fn enqueue(&self, key: &str, message: &NotificationMessage) -> Result<(), NotifierError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| NotifierError::SerializationFailed(e.to_string()))?;

        let record = FutureRecord::to(&self.topic).key(key).payload(&payload);

        let delivery = self
            .producer
            .send_result(record)
            .map_err(|(err, _)| NotifierError::PublishFailed(err.to_string()))?;

        let topic = self.topic.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            match delivery.await {
                Ok(Ok(_)) => {
                    tracing::debug!(topic = %topic, user_id = %key, "Verification email request delivered");
                }
                Ok(Err((err, _))) => {
                    tracing::error!(
                        topic = %topic,
                        user_id = %key,
                        error = %err,
                        "Failed to deliver verification email request after all retries"
                    );
                }
                Err(_) => {
                    tracing::error!(topic = %topic, user_id = %key, "Kafka delivery was cancelled");
                }
            }
        });

        Ok(())
    }
}

#[async_trait]
impl VerificationNotifier for KafkaVerificationNotifier {
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), NotifierError> {
        let message: NotificationMessage = self.template.render(email).into();
        self.enqueue(&email.user_id.to_string(), &message)
    }
}
