//! Console output for device listings and jack events.
//!
//! Text mode keeps the historical log-style lines that downstream scripts
//! grep for. JSON mode writes one object per line.

use jackconf::OutputFormat;
use serde::Serialize;
use std::io::{self, Write};

use crate::acpi::{Jack, JackEvent};
use crate::device::{AudioDevice, DeviceList};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Device(&'a AudioDevice),
    NoDevices,
    Monitoring { source: &'a str },
    AcpiEvent {
        raw: &'a str,
        event: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        jack: Option<Jack>,
    },
}

/// Writes reports to `out` in the configured format.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print every device in enumeration order, or a "no devices" notice.
    pub fn devices(&mut self, devices: &DeviceList) -> io::Result<()> {
        if devices.is_empty() {
            match self.format {
                OutputFormat::Text => writeln!(self.out, "No audio devices found.")?,
                OutputFormat::Json => self.record(&Record::NoDevices)?,
            }
        }

        for device in devices {
            match self.format {
                OutputFormat::Text => writeln!(
                    self.out,
                    "Device Name: {}, Path: {}, PCM: {}, Stream: {}, Type: {}",
                    device.name(),
                    device.path(),
                    device.pcm_name(),
                    device.stream_type(),
                    device.device_type()
                )?,
                OutputFormat::Json => self.record(&Record::Device(device))?,
            }
        }

        self.out.flush()
    }

    /// Announce that monitoring has started.
    pub fn monitoring(&mut self, source: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "Monitoring for real-time audio device events...")?,
            OutputFormat::Json => self.record(&Record::Monitoring { source })?,
        }
        self.out.flush()
    }

    /// Echo a raw event line, then report what it means.
    pub fn event(&mut self, line: &str, event: &JackEvent) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "ACPI Event: {}", line)?;
                match event {
                    JackEvent::Plugged(jack) => writeln!(self.out, "{} plugged in.", jack)?,
                    JackEvent::Unplugged(jack) => writeln!(self.out, "{} unplugged.", jack)?,
                    JackEvent::Unresolved(_) => {}
                    JackEvent::Other => writeln!(self.out, "Other jack event detected: {}", line)?,
                }
            }
            OutputFormat::Json => self.record(&Record::AcpiEvent {
                raw: line,
                event: event.name(),
                jack: event.jack(),
            })?,
        }
        self.out.flush()
    }

    fn record(&mut self, record: &Record<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acpi::classify_line;
    use crate::device::StreamType;
    use pretty_assertions::assert_eq;

    fn text(f: impl FnOnce(&mut Reporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = Reporter::new(Vec::new(), OutputFormat::Text);
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_no_devices() {
        let out = text(|r| r.devices(&DeviceList::unbounded()));
        assert_eq!(out, "No audio devices found.\n");
    }

    #[test]
    fn test_device_lines() {
        let mut list = DeviceList::unbounded();
        list.try_push(AudioDevice::new(0, 0, "hw:0", "ALC257 Analog", StreamType::Playback))
            .unwrap();
        list.try_push(AudioDevice::new(0, 0, "hw:0", "ALC257 Analog", StreamType::Capture))
            .unwrap();

        let out = text(|r| r.devices(&list));
        assert_eq!(
            out,
            "Device Name: Card 0 Device 0, Path: hw:0, PCM: ALC257 Analog, Stream: Playback, Type: Speaker\n\
             Device Name: Card 0 Device 0, Path: hw:0, PCM: ALC257 Analog, Stream: Capture, Type: Microphone\n"
        );
    }

    #[test]
    fn test_event_lines() {
        let plug = "ACPI event: jack/headphone HEADPHONE plug";
        let out = text(|r| r.event(plug, &classify_line(plug)));
        assert_eq!(out, format!("ACPI Event: {}\nHeadphones plugged in.\n", plug));

        let mic = "jack/microphone MICROPHONE unplug";
        let out = text(|r| r.event(mic, &classify_line(mic)));
        assert_eq!(out, format!("ACPI Event: {}\nMicrophone unplugged.\n", mic));

        let other = "button/lid LID close";
        let out = text(|r| r.event(other, &classify_line(other)));
        assert_eq!(
            out,
            format!("ACPI Event: {}\nOther jack event detected: {}\n", other, other)
        );

        let unresolved = "jack/headphone HEADPHONE";
        let out = text(|r| r.event(unresolved, &classify_line(unresolved)));
        assert_eq!(out, format!("ACPI Event: {}\n", unresolved));
    }

    #[test]
    fn test_json_records() {
        let mut reporter = Reporter::new(Vec::new(), OutputFormat::Json);
        let mut list = DeviceList::unbounded();
        list.try_push(AudioDevice::new(1, 3, "hw:1", "USB Headphones", StreamType::Playback))
            .unwrap();
        reporter.devices(&list).unwrap();
        let line = "jack/headphone HEADPHONE unplug";
        reporter.event(line, &classify_line(line)).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let records: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["kind"], "device");
        assert_eq!(records[0]["name"], "Card 1 Device 3");
        assert_eq!(records[0]["device_type"], "Headphones");
        assert_eq!(records[1]["kind"], "acpi_event");
        assert_eq!(records[1]["event"], "unplugged");
        assert_eq!(records[1]["jack"], "headphone");
        assert_eq!(records[1]["raw"], line);
    }
}
