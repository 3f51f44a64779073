//! Error types for enumeration and monitoring.

use thiserror::Error;

/// A failed query against the sound subsystem.
///
/// Enumeration swallows these and skips the affected card or device; they
/// only surface in debug logs and to direct users of [`crate::SoundSystem`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoundError {
    #[error("failed to open control handle {handle}: {message}")]
    Open { handle: String, message: String },

    #[error("failed to read card info for {handle}: {message}")]
    CardInfo { handle: String, message: String },

    #[error("failed to read pcm info for {handle} device {device} ({stream}): {message}")]
    PcmInfo {
        handle: String,
        device: u32,
        stream: crate::StreamType,
        message: String,
    },

    #[error("invalid control handle name {0:?}")]
    InvalidName(String),
}

/// A device list bounded by `capacity` was asked to hold one more record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("device list is full (capacity {capacity})")]
pub struct CapacityExceeded {
    pub capacity: usize,
}

/// Failures of the event monitor. All of them end monitoring.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} has no stdout pipe")]
    MissingStdout { command: String },

    #[error("Failed to read from {name}: {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },

    #[error("Event source {name} closed after {lines} lines")]
    Closed { name: String, lines: u64 },

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
