//! Sound subsystem backends.

pub mod alsa;

pub use self::alsa::{AlsaCard, AlsaSoundSystem};
