use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Capability tags a channel may declare support for.
///
/// `supported_features` is advisory: the caller is expected to check
/// membership before dispatching an event and skip the call when the
/// channel opted out. Nothing enforces this centrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    FailureAlert,
    PrintDone,
    PrintCancelled,
    FilamentChange,
    HeaterStatus,
    PrintStart,
    PrintPause,
    PrintResume,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::FailureAlert,
        Feature::PrintDone,
        Feature::PrintCancelled,
        Feature::FilamentChange,
        Feature::HeaterStatus,
        Feature::PrintStart,
        Feature::PrintPause,
        Feature::PrintResume,
    ];

    pub fn all() -> HashSet<Feature> {
        Self::ALL.into_iter().collect()
    }
}
