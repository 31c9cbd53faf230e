use async_trait::async_trait;
use printwatch_core::channel::NotificationChannel;
use printwatch_core::context::{
    ChannelConfig, FailureAlertContext, PrinterNotificationContext, TestMessageContext,
};
use printwatch_core::error::ChannelError;
use printwatch_core::feature::Feature;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

const APP_TOKEN_VAR: &str = "PUSHOVER_APP_TOKEN";
const MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct PushoverConfig {
    pub user_key: String,
}

impl TryFrom<&ChannelConfig> for PushoverConfig {
    type Error = ChannelError;

    fn try_from(value: &ChannelConfig) -> Result<Self, Self::Error> {
        serde_json::from_value(Value::Object(value.0.clone()))
            .map_err(|e| ChannelError::InvalidConfig(e.to_string()))
    }
}

#[derive(Serialize)]
struct PushoverMessageRequest {
    token: String,
    user: String,
    message: String,
    title: Option<String>,
    html: Option<u8>,
}

pub struct PushoverChannel {
    client: reqwest::Client,
}

impl PushoverChannel {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn app_token(&self) -> Result<String, ChannelError> {
        std::env::var(APP_TOKEN_VAR)
            .map_err(|_| ChannelError::InvalidConfig(format!("{APP_TOKEN_VAR} is not set")))
    }

    async fn deliver(
        &self,
        config: &PushoverConfig,
        title: Option<String>,
        message: String,
    ) -> Result<(), ChannelError> {
        let request = PushoverMessageRequest {
            token: self.app_token()?,
            user: config.user_key.clone(),
            message,
            title,
            html: Some(1),
        };

        self.client
            .post(MESSAGES_URL)
            .body(serde_urlencoded::to_string(request).unwrap_or_default())
            .send()
            .await
            .map_err(|e| ChannelError::Delivery(e.into()))?
            .error_for_status()
            .map_err(|e| ChannelError::Delivery(e.into()))?;
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for PushoverChannel {
    fn name(&self) -> &'static str {
        "pushover"
    }

    fn validate_config(&self, config: &ChannelConfig) -> Result<ChannelConfig, ChannelError> {
        PushoverConfig::try_from(config)?;
        Ok(config.clone())
    }

    /// Pushover notifications are push alerts; frequent heater chatter and
    /// resume events are deliberately left out.
    fn supported_features(&self) -> HashSet<Feature> {
        let mut features = Feature::all();
        features.remove(&Feature::HeaterStatus);
        features.remove(&Feature::PrintResume);
        features
    }

    fn env_vars(&self) -> HashMap<String, String> {
        HashMap::from([(
            APP_TOKEN_VAR.to_string(),
            std::env::var(APP_TOKEN_VAR).unwrap_or_default(),
        )])
    }

    // Pushover messages render HTML when html=1 is set.
    fn i(&self, s: &str) -> String {
        format!("<i>{s}</i>")
    }

    fn b(&self, s: &str) -> String {
        format!("<b>{s}</b>")
    }

    fn u(&self, s: &str) -> String {
        format!("<u>{s}</u>")
    }

    async fn send_failure_alert(&self, context: &FailureAlertContext) -> Result<(), ChannelError> {
        let config = PushoverConfig::try_from(context.config())?;

        let title = self.get_failure_alert_title(context);
        let body = self.get_failure_alert_text(context, None);
        self.deliver(&config, Some(title), body).await
    }

    async fn send_printer_notification(
        &self,
        context: &PrinterNotificationContext,
    ) -> Result<(), ChannelError> {
        let config = PushoverConfig::try_from(context.config())?;

        let body = self.get_printer_notification_text(context)?;
        if body.is_empty() {
            debug!(
                notification_type = %context.notification_type,
                "empty notification body, skipping pushover send"
            );
            return Ok(());
        }

        let title = self.get_printer_notification_title(context);
        self.deliver(&config, Some(title), body).await
    }

    async fn send_test_message(&self, context: &TestMessageContext) -> Result<(), ChannelError> {
        let config = PushoverConfig::try_from(&context.config)?;
        self.deliver(
            &config,
            None,
            "Printwatch test message. Your Pushover channel is configured correctly.".to_string(),
        )
        .await
    }
}
