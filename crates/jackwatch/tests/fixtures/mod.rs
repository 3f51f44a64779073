#![allow(dead_code)]

use jackwatch::{card_handle, CardControl, CardInfo, PcmInfo, SoundError, SoundSystem, StreamType};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// How a scripted card behaves when enumerated.
#[derive(Clone, Default)]
pub struct ScriptedCard {
    pub fail_open: bool,
    pub fail_info: bool,
    /// (device, stream) -> pcm name; missing entries fail the pcm query.
    pub pcms: BTreeMap<(u32, StreamType), String>,
}

impl ScriptedCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unopenable() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn without_info() -> Self {
        Self {
            fail_info: true,
            ..Self::default()
        }
    }

    pub fn pcm(mut self, device: u32, stream: StreamType, name: &str) -> Self {
        self.pcms.insert((device, stream), name.to_string());
        self
    }

    /// Device indices a control handle reports, playback or capture.
    fn device_indices(&self) -> Vec<u32> {
        let mut devices: Vec<u32> = self.pcms.keys().map(|(device, _)| *device).collect();
        devices.dedup();
        devices
    }
}

/// A sound system driven entirely by test data.
///
/// Tracks how many control handles are open so tests can check that every
/// handle is released.
#[derive(Default)]
pub struct ScriptedSoundSystem {
    cards: BTreeMap<u32, ScriptedCard>,
    open_handles: Rc<Cell<usize>>,
    opened_total: Rc<Cell<usize>>,
}

impl ScriptedSoundSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(mut self, index: u32, card: ScriptedCard) -> Self {
        self.cards.insert(index, card);
        self
    }

    pub fn open_handles(&self) -> usize {
        self.open_handles.get()
    }

    pub fn opened_total(&self) -> usize {
        self.opened_total.get()
    }

    /// Two cards: an onboard codec with speaker, headphone, and mic
    /// endpoints, and an HDMI card with one output.
    pub fn laptop() -> Self {
        Self::new()
            .card(
                0,
                ScriptedCard::new()
                    .pcm(0, StreamType::Playback, "ALC257 Analog")
                    .pcm(0, StreamType::Capture, "ALC257 Analog")
                    .pcm(1, StreamType::Playback, "ALC257 Headphones"),
            )
            .card(1, ScriptedCard::new().pcm(3, StreamType::Playback, "HDMI 0"))
    }
}

pub struct ScriptedControl {
    handle: String,
    card: ScriptedCard,
    open_handles: Rc<Cell<usize>>,
}

impl Drop for ScriptedControl {
    fn drop(&mut self) {
        self.open_handles.set(self.open_handles.get() - 1);
    }
}

impl SoundSystem for ScriptedSoundSystem {
    type Control = ScriptedControl;

    fn cards(&self) -> Vec<u32> {
        self.cards.keys().copied().collect()
    }

    fn open(&self, card: u32) -> Result<ScriptedControl, SoundError> {
        let handle = card_handle(card);
        let scripted = self.cards.get(&card).cloned().unwrap_or_default();
        if scripted.fail_open {
            return Err(SoundError::Open {
                handle,
                message: "Permission denied".to_string(),
            });
        }

        self.open_handles.set(self.open_handles.get() + 1);
        self.opened_total.set(self.opened_total.get() + 1);
        Ok(ScriptedControl {
            handle,
            card: scripted,
            open_handles: Rc::clone(&self.open_handles),
        })
    }
}

impl CardControl for ScriptedControl {
    fn handle(&self) -> &str {
        &self.handle
    }

    fn card_info(&self) -> Result<CardInfo, SoundError> {
        if self.card.fail_info {
            return Err(SoundError::CardInfo {
                handle: self.handle.clone(),
                message: "Input/output error".to_string(),
            });
        }
        Ok(CardInfo {
            id: "PCH".to_string(),
            name: "HDA Intel PCH".to_string(),
        })
    }

    fn pcm_devices(&self) -> Vec<u32> {
        self.card.device_indices()
    }

    fn pcm_info(&self, device: u32, _subdevice: u32, stream: StreamType) -> Result<PcmInfo, SoundError> {
        self.card
            .pcms
            .get(&(device, stream))
            .map(|name| PcmInfo { name: name.clone() })
            .ok_or_else(|| SoundError::PcmInfo {
                handle: self.handle.clone(),
                device,
                stream,
                message: "No such file or directory".to_string(),
            })
    }
}
