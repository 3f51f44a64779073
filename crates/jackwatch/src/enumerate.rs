//! Walk every card and PCM device the sound subsystem exposes.

use tracing::{debug, warn};

use crate::device::{AudioDevice, DeviceList, StreamType};
use crate::sound::{CardControl, SoundSystem};

/// PCM info is always queried for the first subdevice.
const SUBDEVICE: u32 = 0;

/// Enumerate playback and capture endpoints on every card.
///
/// Order is card ascending, then Playback before Capture, then device
/// ascending. Cards that fail to open or report info are skipped, as are
/// device/stream pairs whose info query fails. With `capacity` set, records
/// past the bound are counted in [`DeviceList::overflow`] rather than kept.
pub fn enumerate_devices<S: SoundSystem>(system: &S, capacity: Option<usize>) -> DeviceList {
    let mut devices = DeviceList::with_capacity(capacity);

    for card in system.cards() {
        let control = match system.open(card) {
            Ok(control) => control,
            Err(e) => {
                debug!("Skipping card {}: {}", card, e);
                continue;
            }
        };

        if let Err(e) = control.card_info() {
            debug!("Skipping card {}: {}", card, e);
            continue;
        }

        for stream in StreamType::ALL {
            for device in control.pcm_devices() {
                let info = match control.pcm_info(device, SUBDEVICE, stream) {
                    Ok(info) => info,
                    Err(e) => {
                        debug!("{}", e);
                        continue;
                    }
                };

                let record = AudioDevice::new(card, device, control.handle(), info.name, stream);
                if devices.try_push(record).is_err() {
                    debug!(
                        "Dropping {} device {} ({}): list full",
                        control.handle(),
                        device,
                        stream
                    );
                }
            }
        }
        // control handle dropped (closed) here, before the next card
    }

    if devices.overflow() > 0 {
        warn!(
            "Device list capacity {:?} reached; {} endpoints not listed",
            devices.capacity(),
            devices.overflow()
        );
    }

    devices
}
