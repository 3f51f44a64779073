use alsa::ctl::{Ctl, DeviceIter};
use alsa::Direction;
use std::ffi::CString;

use crate::device::StreamType;
use crate::error::SoundError;
use crate::sound::{card_handle, CardControl, CardInfo, PcmInfo, SoundSystem};

/// ALSA control-interface access to the host's sound cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlsaSoundSystem;

impl AlsaSoundSystem {
    pub fn new() -> Self {
        Self
    }
}

/// An open `hw:N` control handle. Closed when dropped.
pub struct AlsaCard {
    handle: String,
    ctl: Ctl,
}

impl SoundSystem for AlsaSoundSystem {
    type Control = AlsaCard;

    fn cards(&self) -> Vec<u32> {
        // snd_card_next errors end the walk, same as running out of cards
        alsa::card::Iter::new()
            .map_while(|card| card.ok())
            .filter_map(|card| u32::try_from(card.get_index()).ok())
            .collect()
    }

    fn open(&self, card: u32) -> Result<AlsaCard, SoundError> {
        let handle = card_handle(card);
        let name = CString::new(handle.clone()).map_err(|_| SoundError::InvalidName(handle.clone()))?;
        let ctl = Ctl::open(&name, false).map_err(|e| SoundError::Open {
            handle: handle.clone(),
            message: e.to_string(),
        })?;

        Ok(AlsaCard { handle, ctl })
    }
}

impl CardControl for AlsaCard {
    fn handle(&self) -> &str {
        &self.handle
    }

    fn card_info(&self) -> Result<CardInfo, SoundError> {
        let err = |e: alsa::Error| SoundError::CardInfo {
            handle: self.handle.clone(),
            message: e.to_string(),
        };
        let info = self.ctl.card_info().map_err(err)?;

        Ok(CardInfo {
            id: info.get_id().map_err(err)?.to_string(),
            name: info.get_name().map_err(err)?.to_string(),
        })
    }

    fn pcm_devices(&self) -> Vec<u32> {
        DeviceIter::new(&self.ctl)
            .filter_map(|device| u32::try_from(device).ok())
            .collect()
    }

    fn pcm_info(
        &self,
        device: u32,
        subdevice: u32,
        stream: StreamType,
    ) -> Result<PcmInfo, SoundError> {
        let err = |e: alsa::Error| SoundError::PcmInfo {
            handle: self.handle.clone(),
            device,
            stream,
            message: e.to_string(),
        };
        let info = self
            .ctl
            .pcm_info(device, subdevice, direction(stream))
            .map_err(err)?;
        let name = info.get_name().map_err(err)?.to_string();

        Ok(PcmInfo { name })
    }
}

fn direction(stream: StreamType) -> Direction {
    match stream {
        StreamType::Playback => Direction::Playback,
        StreamType::Capture => Direction::Capture,
    }
}
