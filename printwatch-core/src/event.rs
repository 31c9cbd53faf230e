use crate::feature::Feature;

/// Canonical event-type identifiers emitted by the monitoring backend.
///
/// The wire names must match the backend's strings bit-for-bit; anything
/// else fails to parse and renders as an empty notification upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    PrintStarted,
    PrintDone,
    PrintCancelled,
    PrintPaused,
    PrintResumed,
    FilamentChange,
    HeaterCooledDown,
    HeaterTargetReached,
}

impl EventType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PrintStarted" => Some(Self::PrintStarted),
            "PrintDone" => Some(Self::PrintDone),
            "PrintCancelled" => Some(Self::PrintCancelled),
            "PrintPaused" => Some(Self::PrintPaused),
            "PrintResumed" => Some(Self::PrintResumed),
            "FilamentChange" => Some(Self::FilamentChange),
            "HeaterCooledDown" => Some(Self::HeaterCooledDown),
            "HeaterTargetReached" => Some(Self::HeaterTargetReached),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PrintStarted => "PrintStarted",
            Self::PrintDone => "PrintDone",
            Self::PrintCancelled => "PrintCancelled",
            Self::PrintPaused => "PrintPaused",
            Self::PrintResumed => "PrintResumed",
            Self::FilamentChange => "FilamentChange",
            Self::HeaterCooledDown => "HeaterCooledDown",
            Self::HeaterTargetReached => "HeaterTargetReached",
        }
    }

    /// The capability a channel must declare to receive this event.
    pub fn feature(&self) -> Feature {
        match self {
            Self::PrintStarted => Feature::PrintStart,
            Self::PrintDone => Feature::PrintDone,
            Self::PrintCancelled => Feature::PrintCancelled,
            Self::PrintPaused => Feature::PrintPause,
            Self::PrintResumed => Feature::PrintResume,
            Self::FilamentChange => Feature::FilamentChange,
            Self::HeaterCooledDown | Self::HeaterTargetReached => Feature::HeaterStatus,
        }
    }
}
