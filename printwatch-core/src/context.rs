use crate::error::ChannelError;
use crate::feature::Feature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-channel configuration. Opaque to the core; a channel interprets it
/// in `NotificationChannel::validate_config` and its send methods.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelConfig(pub Map<String, Value>);

/// Event-specific variables attached to a notification.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraContext(pub Map<String, Value>);

impl ExtraContext {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn require(&self, key: &'static str) -> Result<&Value, ChannelError> {
        self.0.get(key).ok_or(ChannelError::MissingContextKey(key))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterContext {
    pub id: i64,
    pub name: String,
    pub pause_on_failure: bool,
    pub watching_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintContext {
    pub id: i64,
    pub filename: String,

    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub alerted_at: Option<DateTime<Utc>>,

    /// Channel-policy hook: when set, a channel may use this text instead of
    /// (or alongside) the rendered alert body. The default renderer ignores
    /// it; whether it replaces or augments the body is up to the channel.
    pub alert_overwrite: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub id: i64,
    pub email: String,
    pub syndicate_name: String,
    pub first_name: String,
    pub last_name: String,
    pub unsub_token: String,
    pub dh_balance: f64,
    pub is_pro: bool,
}

/// Everything a channel needs to know at the moment of dispatch. Built by
/// the caller per event, passed into exactly one channel call, then dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationContext {
    pub config: ChannelConfig,
    pub user: UserContext,
    pub printer: PrinterContext,
    pub print: PrintContext,
    pub extra_context: ExtraContext,
    pub img_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureAlertContext {
    pub notification: NotificationContext,
    pub is_warning: bool,
    pub print_paused: bool,
}

impl FailureAlertContext {
    pub fn printer(&self) -> &PrinterContext {
        &self.notification.printer
    }

    pub fn print(&self) -> &PrintContext {
        &self.notification.print
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.notification.config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterNotificationContext {
    pub notification: NotificationContext,
    pub feature: Feature,
    /// Wire value from the event-type registry. Unknown values are not an
    /// error here; rendering maps them to an empty string so the caller can
    /// suppress the send.
    pub notification_type: String,
}

impl PrinterNotificationContext {
    pub fn printer(&self) -> &PrinterContext {
        &self.notification.printer
    }

    pub fn print(&self) -> &PrintContext {
        &self.notification.print
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.notification.config
    }

    pub fn extra_context(&self) -> &ExtraContext {
        &self.notification.extra_context
    }
}

/// Minimal context for connectivity tests. Carries no printer or print
/// state on purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMessageContext {
    pub config: ChannelConfig,
    pub user: UserContext,
    pub extra_context: ExtraContext,
}
