//! Device records and the playback/capture classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CapacityExceeded;

/// Direction of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StreamType {
    Playback,
    Capture,
}

impl StreamType {
    /// Enumeration order: playback endpoints are listed before capture.
    pub const ALL: [StreamType; 2] = [StreamType::Playback, StreamType::Capture];

    /// Map a raw driver direction (`SND_PCM_STREAM_*`) to a stream type.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Playback),
            1 => Some(Self::Capture),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playback => "Playback",
            Self::Capture => "Capture",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a PCM endpoint is, as far as its name and direction tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Speaker,
    Headphones,
    Microphone,
    Unknown,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speaker => "Speaker",
            Self::Headphones => "Headphones",
            Self::Microphone => "Microphone",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker the driver puts in headphone PCM names. Matched case-sensitively.
pub const HEADPHONES_MARKER: &str = "Headphones";

/// Classify an endpoint from its stream direction and driver-reported name.
pub fn classify(stream_type: StreamType, pcm_name: &str) -> DeviceType {
    match stream_type {
        StreamType::Playback if pcm_name.contains(HEADPHONES_MARKER) => DeviceType::Headphones,
        StreamType::Playback => DeviceType::Speaker,
        StreamType::Capture => DeviceType::Microphone,
    }
}

/// Like [`classify`], for a raw direction value that may not be a known stream.
pub fn classify_raw(raw_stream: i32, pcm_name: &str) -> DeviceType {
    StreamType::from_raw(raw_stream)
        .map(|stream| classify(stream, pcm_name))
        .unwrap_or(DeviceType::Unknown)
}

/// One PCM endpoint discovered during enumeration.
///
/// Immutable once built; `device_type` is always derived from
/// `stream_type` and `pcm_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioDevice {
    card: u32,
    device: u32,
    name: String,
    path: String,
    pcm_name: String,
    stream_type: StreamType,
    device_type: DeviceType,
}

impl AudioDevice {
    pub fn new(
        card: u32,
        device: u32,
        path: impl Into<String>,
        pcm_name: impl Into<String>,
        stream_type: StreamType,
    ) -> Self {
        let pcm_name = pcm_name.into();
        let device_type = classify(stream_type, &pcm_name);
        Self {
            card,
            device,
            name: format!("Card {} Device {}", card, device),
            path: path.into(),
            pcm_name,
            stream_type,
            device_type,
        }
    }

    pub fn card(&self) -> u32 {
        self.card
    }

    pub fn device(&self) -> u32 {
        self.device
    }

    /// Human label, e.g. "Card 0 Device 1".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Card control handle, e.g. "hw:0".
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pcm_name(&self) -> &str {
        &self.pcm_name
    }

    pub fn stream_type(&self) -> StreamType {
        self.stream_type
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }
}

/// Ordered device records, optionally bounded.
#[derive(Debug, Clone, Default)]
pub struct DeviceList {
    devices: Vec<AudioDevice>,
    capacity: Option<usize>,
    overflow: usize,
}

impl DeviceList {
    /// A list that grows as needed.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A list that refuses records past `capacity`.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            devices: Vec::with_capacity(capacity),
            capacity: Some(capacity),
            overflow: 0,
        }
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    /// Append a record, or count it as overflow and fail if the list is full.
    pub fn try_push(&mut self, device: AudioDevice) -> Result<(), CapacityExceeded> {
        if let Some(capacity) = self.capacity {
            if self.devices.len() >= capacity {
                self.overflow += 1;
                return Err(CapacityExceeded { capacity });
            }
        }
        self.devices.push(device);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Records rejected because the list was full.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AudioDevice> {
        self.devices.iter()
    }

    pub fn as_slice(&self) -> &[AudioDevice] {
        &self.devices
    }
}

impl<'a> IntoIterator for &'a DeviceList {
    type Item = &'a AudioDevice;
    type IntoIter = std::slice::Iter<'a, AudioDevice>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}
