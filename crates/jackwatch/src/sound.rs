//! The sound subsystem as seen by the enumerator.
//!
//! Implemented over ALSA in [`crate::sources::alsa`]; tests script their own.

use crate::device::StreamType;
use crate::error::SoundError;

/// Card metadata from the control interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardInfo {
    pub id: String,
    pub name: String,
}

/// PCM metadata for one device/subdevice/stream combination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcmInfo {
    pub name: String,
}

/// Control handle string for a card index.
pub fn card_handle(card: u32) -> String {
    format!("hw:{}", card)
}

/// Host sound subsystem: lists cards and opens their control handles.
pub trait SoundSystem {
    type Control: CardControl;

    /// Card indices in ascending order. Empty when there is no sound subsystem.
    fn cards(&self) -> Vec<u32>;

    /// Open the control handle for `card`. The handle is released on drop.
    fn open(&self, card: u32) -> Result<Self::Control, SoundError>;
}

/// An open card control handle.
pub trait CardControl {
    fn handle(&self) -> &str;

    fn card_info(&self) -> Result<CardInfo, SoundError>;

    /// PCM device indices on this card, ascending.
    fn pcm_devices(&self) -> Vec<u32>;

    fn pcm_info(
        &self,
        device: u32,
        subdevice: u32,
        stream: StreamType,
    ) -> Result<PcmInfo, SoundError>;
}
