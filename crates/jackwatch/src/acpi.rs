//! Classification of `acpi_listen` output lines.
//!
//! The line format belongs to acpid and is not versioned. Lines look like
//! `jack/headphone HEADPHONE plug` and are matched by substring only:
//! a category (`jack/headphone`, `jack/microphone`) and then an uppercase
//! source token followed by ` plug` or ` unplug`.

use serde::Serialize;
use std::fmt;

/// A physical audio jack reported by ACPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Jack {
    Headphone,
    Microphone,
}

impl Jack {
    /// Checked in this order; the first category found wins.
    pub const ALL: [Jack; 2] = [Jack::Headphone, Jack::Microphone];

    /// Event category substring, e.g. `jack/headphone`.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Headphone => "jack/headphone",
            Self::Microphone => "jack/microphone",
        }
    }

    fn plug_pattern(&self) -> &'static str {
        match self {
            Self::Headphone => " HEADPHONE plug",
            Self::Microphone => " MICROPHONE plug",
        }
    }

    fn unplug_pattern(&self) -> &'static str {
        match self {
            Self::Headphone => " HEADPHONE unplug",
            Self::Microphone => " MICROPHONE unplug",
        }
    }

    /// Console label: "Headphones" / "Microphone".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Headphone => "Headphones",
            Self::Microphone => "Microphone",
        }
    }
}

impl fmt::Display for Jack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a single event line means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "event", content = "jack", rename_all = "snake_case")]
pub enum JackEvent {
    Plugged(Jack),
    Unplugged(Jack),
    /// Names a jack category but carries no plug/unplug action. Not reported.
    Unresolved(Jack),
    /// Mentions no known jack category. Reported as a pass-through.
    Other,
}

impl JackEvent {
    pub fn jack(&self) -> Option<Jack> {
        match self {
            Self::Plugged(jack) | Self::Unplugged(jack) | Self::Unresolved(jack) => Some(*jack),
            Self::Other => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Plugged(_) => "plugged",
            Self::Unplugged(_) => "unplugged",
            Self::Unresolved(_) => "unresolved",
            Self::Other => "other",
        }
    }
}

/// Classify one raw event line.
pub fn classify_line(line: &str) -> JackEvent {
    for jack in Jack::ALL {
        if line.contains(jack.category()) {
            return if line.contains(jack.plug_pattern()) {
                JackEvent::Plugged(jack)
            } else if line.contains(jack.unplug_pattern()) {
                JackEvent::Unplugged(jack)
            } else {
                JackEvent::Unresolved(jack)
            };
        }
    }
    JackEvent::Other
}
