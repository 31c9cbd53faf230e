use crate::context::{
    ChannelConfig, FailureAlertContext, PrinterNotificationContext, TestMessageContext,
};
use crate::error::ChannelError;
use crate::event::EventType;
use crate::feature::Feature;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The contract every notification channel implements.
///
/// A channel overrides the send methods it intends to support (the defaults
/// report `NotImplemented`), and may override the markup hooks `i`/`b`/`u`
/// to retarget all default-rendered text to its own dialect. The rendering
/// methods are pure; delivery is entirely the channel's business.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Registry key. Also names the channel in `NotImplemented` errors.
    fn name(&self) -> &'static str;

    /// Normalizes or rejects a channel config. The default accepts anything.
    fn validate_config(&self, config: &ChannelConfig) -> Result<ChannelConfig, ChannelError> {
        Ok(config.clone())
    }

    async fn send_failure_alert(
        &self,
        _context: &FailureAlertContext,
    ) -> Result<(), ChannelError> {
        Err(ChannelError::NotImplemented(self.name()))
    }

    async fn send_printer_notification(
        &self,
        _context: &PrinterNotificationContext,
    ) -> Result<(), ChannelError> {
        Err(ChannelError::NotImplemented(self.name()))
    }

    async fn send_test_message(&self, _context: &TestMessageContext) -> Result<(), ChannelError> {
        Err(ChannelError::NotImplemented(self.name()))
    }

    /// Advisory capability set. Callers check membership before dispatching
    /// an event; the default claims everything.
    fn supported_features(&self) -> HashSet<Feature> {
        Feature::all()
    }

    /// Extra environment variables the channel reads, name to current value.
    fn env_vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Italic markup hook. Plain text by default.
    fn i(&self, s: &str) -> String {
        s.to_string()
    }

    /// Bold markup hook. Plain text by default.
    fn b(&self, s: &str) -> String {
        s.to_string()
    }

    /// Underline markup hook. Plain text by default.
    fn u(&self, s: &str) -> String {
        s.to_string()
    }

    fn get_failure_alert_title(&self, _context: &FailureAlertContext) -> String {
        "Printwatch - Failure alert!".to_string()
    }

    fn get_failure_alert_text(&self, context: &FailureAlertContext, link: Option<&str>) -> String {
        let mut text = format!("{} ", self.b(&context.printer().name));

        if context.is_warning {
            text.push_str("Warning ⚠️\n");
        } else {
            text.push_str("Failure Alert 🛑\n");
        }

        // Paused state wins over the warning-specific note.
        if context.print_paused {
            text.push_str("Printer is paused.");
        } else if context.printer().pause_on_failure && context.is_warning {
            text.push_str("Printer is NOT paused.");
        }

        text.push_str(&format!("Print job {} \n\n", self.b(&context.print().filename)));

        if let Some(link) = link {
            text.push_str(&format!("\nGo check it at: {link}"));
        }

        text
    }

    fn get_printer_notification_title(&self, _context: &PrinterNotificationContext) -> String {
        "Printwatch - Print job notification".to_string()
    }

    /// Renders the notification body, or an empty string for an event type
    /// outside the registry. Callers must treat empty as "do not send".
    fn get_printer_notification_text(
        &self,
        context: &PrinterNotificationContext,
    ) -> Result<String, ChannelError> {
        let Some(event) = EventType::from_name(&context.notification_type) else {
            debug!(
                notification_type = %context.notification_type,
                "unknown notification type, rendering empty text"
            );
            return Ok(String::new());
        };

        let mut text = format!("{} ", self.b(&context.printer().name));

        match event {
            EventType::PrintStarted => text.push_str("Started ☀️"),
            EventType::PrintDone => text.push_str("Completed ✅"),
            EventType::PrintCancelled => text.push_str("Canceled ❌"),
            EventType::PrintPaused => text.push_str("Paused ⏸️"),
            EventType::PrintResumed => text.push_str("Resumed ▶️"),
            EventType::FilamentChange => text.push_str("requires filament change ♻️"),
            EventType::HeaterCooledDown => {
                let (heater_name, heater_actual) = heater_values(context)?;
                text.push_str(&format!(
                    "\nHeater {} has cooled down to {} ",
                    self.b(&heater_name),
                    self.b(&(heater_actual + "℃")),
                ));
            }
            EventType::HeaterTargetReached => {
                let (heater_name, heater_actual) = heater_values(context)?;
                text.push_str(&format!(
                    "\nHeater {} has reached target temperature {} ",
                    self.b(&heater_name),
                    self.b(&(heater_actual + "℃")),
                ));
            }
        }

        text.push('\n');
        text.push_str(&format!("Print job {}", self.b(&context.print().filename)));

        Ok(text)
    }
}

fn heater_values(context: &PrinterNotificationContext) -> Result<(String, String), ChannelError> {
    let name = context.extra_context().require("heater_name")?;
    let actual = context.extra_context().require("heater_actual")?;
    Ok((display_value(name), display_value(actual)))
}

// Strings interpolate without JSON quoting; numbers keep their literal form.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        ExtraContext, NotificationContext, PrintContext, PrinterContext, UserContext,
    };
    use serde_json::json;

    struct PlainChannel;

    impl NotificationChannel for PlainChannel {
        fn name(&self) -> &'static str {
            "plain"
        }
    }

    struct MarkdownChannel;

    impl NotificationChannel for MarkdownChannel {
        fn name(&self) -> &'static str {
            "markdown"
        }

        fn i(&self, s: &str) -> String {
            format!("_{s}_")
        }

        fn b(&self, s: &str) -> String {
            format!("*{s}*")
        }

        fn u(&self, s: &str) -> String {
            format!("__{s}__")
        }
    }

    fn user() -> UserContext {
        UserContext {
            id: 7,
            email: "sam@example.com".to_string(),
            syndicate_name: "base".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Vimes".to_string(),
            unsub_token: "tok".to_string(),
            dh_balance: 12.5,
            is_pro: true,
        }
    }

    fn notification(extra: ExtraContext) -> NotificationContext {
        NotificationContext {
            config: ChannelConfig::default(),
            user: user(),
            printer: PrinterContext {
                id: 1,
                name: "Ender3".to_string(),
                pause_on_failure: true,
                watching_enabled: true,
            },
            print: PrintContext {
                id: 2,
                filename: "vase.gcode".to_string(),
                started_at: None,
                ended_at: None,
                alerted_at: None,
                alert_overwrite: None,
            },
            extra_context: extra,
            img_url: "https://img.example.com/tagged.jpg".to_string(),
        }
    }

    fn printer_notification(notification_type: &str, extra: ExtraContext) -> PrinterNotificationContext {
        let event = EventType::from_name(notification_type);
        PrinterNotificationContext {
            notification: notification(extra),
            feature: event.map_or(Feature::PrintDone, |e| e.feature()),
            notification_type: notification_type.to_string(),
        }
    }

    fn failure_alert(is_warning: bool, print_paused: bool) -> FailureAlertContext {
        FailureAlertContext {
            notification: notification(ExtraContext::default()),
            is_warning,
            print_paused,
        }
    }

    #[test]
    fn default_features_and_identity_hooks() {
        let channel = PlainChannel;

        assert_eq!(channel.supported_features().len(), 8);
        assert!(channel.env_vars().is_empty());
        assert_eq!(channel.i("x"), "x");
        assert_eq!(channel.b("x"), "x");
        assert_eq!(channel.u("x"), "x");
    }

    #[test]
    fn validate_config_is_identity() {
        let channel = PlainChannel;
        let config = ChannelConfig(json!({ "a": 1 }).as_object().unwrap().clone());

        let validated = channel.validate_config(&config).unwrap();
        assert_eq!(validated.0, config.0);
    }

    #[tokio::test]
    async fn default_sends_are_not_implemented() {
        let channel = PlainChannel;

        let err = channel
            .send_failure_alert(&failure_alert(false, true))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::NotImplemented("plain")));

        let err = channel
            .send_printer_notification(&printer_notification("PrintDone", ExtraContext::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::NotImplemented("plain")));

        let err = channel
            .send_test_message(&TestMessageContext {
                config: ChannelConfig::default(),
                user: user(),
                extra_context: ExtraContext::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::NotImplemented("plain")));
    }

    #[test]
    fn failure_alert_paused_text() {
        let channel = PlainChannel;
        let text = channel.get_failure_alert_text(&failure_alert(false, true), None);

        assert!(text.contains("Ender3"));
        assert!(text.contains("Failure Alert"));
        assert!(text.contains("Printer is paused."));
        assert!(text.contains("vase.gcode"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn failure_alert_warning_not_paused() {
        let channel = PlainChannel;
        // pause_on_failure is set, so a warning without a pause gets the note.
        let text = channel.get_failure_alert_text(&failure_alert(true, false), None);

        assert!(text.contains("Warning"));
        assert!(text.contains("Printer is NOT paused."));
    }

    #[test]
    fn failure_alert_paused_wins_over_warning_note() {
        let channel = PlainChannel;
        let text = channel.get_failure_alert_text(&failure_alert(true, true), None);

        assert!(text.contains("Printer is paused."));
        assert!(!text.contains("NOT paused"));
    }

    #[test]
    fn failure_alert_link_is_appended() {
        let channel = PlainChannel;
        let text = channel.get_failure_alert_text(
            &failure_alert(false, false),
            Some("https://app.example.com/printers/1/"),
        );

        assert!(text.ends_with("Go check it at: https://app.example.com/printers/1/"));
    }

    #[test]
    fn failure_alert_title_is_fixed() {
        let channel = PlainChannel;
        assert_eq!(
            channel.get_failure_alert_title(&failure_alert(false, false)),
            "Printwatch - Failure alert!"
        );
    }

    #[test]
    fn lifecycle_events_render_name_and_filename() {
        let channel = PlainChannel;
        let phrases = [
            ("PrintStarted", "Started"),
            ("PrintDone", "Completed"),
            ("PrintCancelled", "Canceled"),
            ("PrintPaused", "Paused"),
            ("PrintResumed", "Resumed"),
            ("FilamentChange", "requires filament change"),
        ];

        for (notification_type, phrase) in phrases {
            let context = printer_notification(notification_type, ExtraContext::default());
            let text = channel.get_printer_notification_text(&context).unwrap();

            assert!(!text.is_empty());
            assert!(text.contains("Ender3"), "{notification_type}");
            assert!(text.contains("vase.gcode"), "{notification_type}");
            assert!(text.contains(phrase), "{notification_type}");
            assert!(!text.contains("Heater"), "{notification_type}");
        }
    }

    #[test]
    fn unknown_notification_type_renders_empty() {
        let channel = PlainChannel;
        let context = printer_notification("PrintExploded", ExtraContext::default());

        let text = channel.get_printer_notification_text(&context).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn heater_events_render_name_and_temperature() {
        let channel = PlainChannel;
        let extra = ExtraContext(
            json!({ "heater_name": "bed", "heater_actual": 42.5 })
                .as_object()
                .unwrap()
                .clone(),
        );

        let text = channel
            .get_printer_notification_text(&printer_notification("HeaterCooledDown", extra.clone()))
            .unwrap();
        assert!(text.contains("Heater bed"));
        assert!(text.contains("has cooled down to 42.5℃"));

        let text = channel
            .get_printer_notification_text(&printer_notification("HeaterTargetReached", extra))
            .unwrap();
        assert!(text.contains("has reached target temperature 42.5℃"));
    }

    #[test]
    fn heater_event_without_keys_is_an_error() {
        let channel = PlainChannel;
        let extra = ExtraContext(json!({ "heater_name": "tool0" }).as_object().unwrap().clone());
        let context = printer_notification("HeaterTargetReached", extra);

        let err = channel.get_printer_notification_text(&context).unwrap_err();
        assert!(matches!(err, ChannelError::MissingContextKey("heater_actual")));
    }

    #[test]
    fn notification_title_is_fixed() {
        let channel = PlainChannel;
        let context = printer_notification("PrintDone", ExtraContext::default());
        assert_eq!(
            channel.get_printer_notification_title(&context),
            "Printwatch - Print job notification"
        );
    }

    #[test]
    fn markup_hooks_retarget_rendering() {
        let channel = MarkdownChannel;
        let context = printer_notification("PrintDone", ExtraContext::default());

        let text = channel.get_printer_notification_text(&context).unwrap();
        assert!(text.contains("*Ender3*"));
        assert!(text.contains("Print job *vase.gcode*"));

        let alert = channel.get_failure_alert_text(&failure_alert(false, true), None);
        assert!(alert.contains("*Ender3*"));
        assert!(alert.contains("*vase.gcode*"));
    }
}
