//! jackwatch: list audio endpoints and watch headphone/microphone jacks.
//!
//! Two sequential phases:
//!
//! - **Enumeration**: walk every ALSA card and PCM device once, classifying
//!   each playback/capture endpoint as speaker, headphones, or microphone.
//! - **Monitoring**: read `acpi_listen` output line by line and report jack
//!   plug/unplug transitions until the event source goes away.
//!
//! Both the sound subsystem ([`SoundSystem`]) and the event feed
//! ([`LineSource`]) are traits, so either phase can run against scripted
//! input.

pub mod acpi;
pub mod device;
pub mod enumerate;
pub mod error;
pub mod monitor;
pub mod report;
pub mod sound;
pub mod sources;

pub use acpi::{classify_line, Jack, JackEvent};
pub use device::{classify, classify_raw, AudioDevice, DeviceList, DeviceType, StreamType};
pub use enumerate::enumerate_devices;
pub use error::{CapacityExceeded, MonitorError, SoundError};
pub use monitor::{monitor_events, LineSource, MonitorStats, ProcessLineSource, ReaderLineSource};
pub use report::Reporter;
pub use sound::{card_handle, CardControl, CardInfo, PcmInfo, SoundSystem};
pub use sources::AlsaSoundSystem;
