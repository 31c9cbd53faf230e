use printwatch_core::channel::NotificationChannel;
use printwatch_core::registry::ChannelRegistry;
use printwatch_pushover::PushoverChannel;
use printwatch_telegram::TelegramChannel;
use std::sync::Arc;

pub fn all_channels() -> Vec<Arc<dyn NotificationChannel>> {
    let client = reqwest::Client::new();

    let channels: Vec<Arc<dyn NotificationChannel>> = vec![
        Arc::new(TelegramChannel::new(client.clone())),
        Arc::new(PushoverChannel::new(client)),
        // Add more channels here...
    ];

    channels
}

pub fn build_registry() -> ChannelRegistry {
    let mut registry = ChannelRegistry::new();
    for channel in all_channels() {
        registry.register(channel);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_all_built_in_channels() {
        let registry = build_registry();

        assert!(registry.get("telegram").is_some());
        assert!(registry.get("pushover").is_some());
        assert!(registry.get("carrier-pigeon").is_none());
    }
}
