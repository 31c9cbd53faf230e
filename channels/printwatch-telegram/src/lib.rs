mod botapi;

use crate::botapi::TelegramBotApi;
use async_trait::async_trait;
use printwatch_core::channel::NotificationChannel;
use printwatch_core::context::{
    ChannelConfig, FailureAlertContext, PrinterNotificationContext, TestMessageContext,
};
use printwatch_core::error::ChannelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl TryFrom<&ChannelConfig> for TelegramConfig {
    type Error = ChannelError;

    fn try_from(value: &ChannelConfig) -> Result<Self, Self::Error> {
        serde_json::from_value(Value::Object(value.0.clone()))
            .map_err(|e| ChannelError::InvalidConfig(e.to_string()))
    }
}

pub struct TelegramChannel {
    client: TelegramBotApi,
}

impl TelegramChannel {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client: TelegramBotApi::new(client),
        }
    }

    async fn deliver(&self, config: &TelegramConfig, text: String) -> Result<(), ChannelError> {
        self.client
            .send_message(&config.bot_token, &config.chat_id, &text)
            .await
            .map_err(|e| ChannelError::Delivery(e.into()))
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn validate_config(&self, config: &ChannelConfig) -> Result<ChannelConfig, ChannelError> {
        TelegramConfig::try_from(config)?;
        Ok(config.clone())
    }

    // Telegram HTML parse mode.
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
        let config = TelegramConfig::try_from(context.config())?;

        // alert_overwrite replaces the rendered body wholesale for this
        // channel.
        let body = match context.print().alert_overwrite.as_deref() {
            Some(overwrite) => overwrite.to_string(),
            None => self.get_failure_alert_text(context, None),
        };

        let text = format!("{}\n{}", self.b(&self.get_failure_alert_title(context)), body);
        self.deliver(&config, text).await
    }

    async fn send_printer_notification(
        &self,
        context: &PrinterNotificationContext,
    ) -> Result<(), ChannelError> {
        let config = TelegramConfig::try_from(context.config())?;

        let body = self.get_printer_notification_text(context)?;
        if body.is_empty() {
            debug!(
                notification_type = %context.notification_type,
                "empty notification body, skipping telegram send"
            );
            return Ok(());
        }

        self.deliver(&config, body).await
    }

    async fn send_test_message(&self, context: &TestMessageContext) -> Result<(), ChannelError> {
        let config = TelegramConfig::try_from(&context.config)?;
        self.deliver(
            &config,
            "Printwatch test message. Your Telegram channel is configured correctly.".to_string(),
        )
        .await
    }
}
