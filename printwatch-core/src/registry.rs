use crate::channel::NotificationChannel;
use crate::feature::Feature;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup surface over the configured channels, keyed by `name()`.
/// The registry never dispatches anything itself.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: HashMap<&'static str, Arc<dyn NotificationChannel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn register(&mut self, channel: Arc<dyn NotificationChannel>) {
        self.channels.insert(channel.name(), channel);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn NotificationChannel>> {
        self.channels.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.channels.keys().copied()
    }

    /// Channels that declared support for the given feature.
    pub fn supporting(&self, feature: Feature) -> Vec<Arc<dyn NotificationChannel>> {
        self.channels
            .values()
            .filter(|channel| channel.supported_features().contains(&feature))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct StubChannel {
        name: &'static str,
        features: HashSet<Feature>,
    }

    impl NotificationChannel for StubChannel {
        fn name(&self) -> &'static str {
            self.name
        }

        fn supported_features(&self) -> HashSet<Feature> {
            self.features.clone()
        }
    }

    #[test]
    fn register_and_get_by_name() {
        let mut registry = ChannelRegistry::new();
        registry.register(Arc::new(StubChannel {
            name: "stub",
            features: Feature::all(),
        }));

        assert!(registry.get("stub").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["stub"]);
    }

    #[test]
    fn supporting_filters_on_declared_features() {
        let mut registry = ChannelRegistry::new();
        registry.register(Arc::new(StubChannel {
            name: "everything",
            features: Feature::all(),
        }));
        registry.register(Arc::new(StubChannel {
            name: "alerts-only",
            features: HashSet::from([Feature::FailureAlert]),
        }));

        assert_eq!(registry.supporting(Feature::FailureAlert).len(), 2);

        let done = registry.supporting(Feature::PrintDone);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].name(), "everything");
    }
}
