mod fixtures;

use fixtures::{ScriptedCard, ScriptedSoundSystem};
use jackconf::OutputFormat;
use jackwatch::{enumerate_devices, DeviceType, Reporter, StreamType};

#[test]
fn test_no_cards_yields_empty_list() {
    let system = ScriptedSoundSystem::new();
    let devices = enumerate_devices(&system, None);

    assert!(devices.is_empty());
    assert_eq!(devices.overflow(), 0);

    let mut reporter = Reporter::new(Vec::new(), OutputFormat::Text);
    reporter.devices(&devices).unwrap();
    assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(), "No audio devices found.\n");
}

#[test]
fn test_laptop_enumeration_order() {
    let system = ScriptedSoundSystem::laptop();
    let devices = enumerate_devices(&system, None);

    let rows: Vec<_> = devices
        .iter()
        .map(|d| (d.name(), d.path(), d.pcm_name(), d.stream_type(), d.device_type()))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Card 0 Device 0", "hw:0", "ALC257 Analog", StreamType::Playback, DeviceType::Speaker),
            ("Card 0 Device 1", "hw:0", "ALC257 Headphones", StreamType::Playback, DeviceType::Headphones),
            ("Card 0 Device 0", "hw:0", "ALC257 Analog", StreamType::Capture, DeviceType::Microphone),
            ("Card 1 Device 3", "hw:1", "HDMI 0", StreamType::Playback, DeviceType::Speaker),
        ]
    );
}

#[test]
fn test_failed_cards_are_skipped() {
    let system = ScriptedSoundSystem::new()
        .card(0, ScriptedCard::unopenable())
        .card(1, ScriptedCard::without_info().pcm(0, StreamType::Playback, "Lost"))
        .card(2, ScriptedCard::new().pcm(0, StreamType::Capture, "USB Mic"));

    let devices = enumerate_devices(&system, None);

    assert_eq!(devices.len(), 1);
    let mic = &devices.as_slice()[0];
    assert_eq!(mic.card(), 2);
    assert_eq!(mic.path(), "hw:2");
    assert_eq!(mic.device_type(), DeviceType::Microphone);
}

#[test]
fn test_failed_pcm_queries_are_skipped() {
    // device 1 only answers for capture, device 2 only for playback
    let system = ScriptedSoundSystem::new().card(
        0,
        ScriptedCard::new()
            .pcm(1, StreamType::Capture, "Mic")
            .pcm(2, StreamType::Playback, "Speaker"),
    );

    let devices = enumerate_devices(&system, None);
    let rows: Vec<_> = devices.iter().map(|d| (d.device(), d.stream_type())).collect();
    assert_eq!(rows, vec![(2, StreamType::Playback), (1, StreamType::Capture)]);
}

#[test]
fn test_every_opened_handle_is_released() {
    let system = ScriptedSoundSystem::laptop()
        .card(4, ScriptedCard::without_info())
        .card(5, ScriptedCard::unopenable());

    let _devices = enumerate_devices(&system, None);

    assert_eq!(system.opened_total(), 3);
    assert_eq!(system.open_handles(), 0);
}

#[test]
fn test_count_never_exceeds_capacity() {
    let system = ScriptedSoundSystem::laptop();

    for capacity in 1..=6 {
        let devices = enumerate_devices(&system, Some(capacity));
        assert!(devices.len() <= capacity);
        assert_eq!(devices.len() + devices.overflow(), 4);
    }
}

#[test]
fn test_unbounded_matches_successful_combinations() {
    let mut card = ScriptedCard::new();
    for device in 0..12 {
        card = card
            .pcm(device, StreamType::Playback, "Out")
            .pcm(device, StreamType::Capture, "In");
    }
    let system = ScriptedSoundSystem::new().card(0, card);

    let devices = enumerate_devices(&system, None);
    assert_eq!(devices.len(), 24);
    assert_eq!(devices.overflow(), 0);
}

#[test]
fn test_bounded_keeps_earliest_records() {
    let system = ScriptedSoundSystem::laptop();
    let devices = enumerate_devices(&system, Some(2));

    let names: Vec<_> = devices.iter().map(|d| d.pcm_name()).collect();
    assert_eq!(names, vec!["ALC257 Analog", "ALC257 Headphones"]);
    assert_eq!(devices.overflow(), 2);
}
