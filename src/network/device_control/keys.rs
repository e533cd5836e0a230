//! ECP vocabulary: remote keys, key actions, query names, and the static
//! tables that map caller-facing names onto them.

use std::fmt;
use std::str::FromStr;

use super::error::ControlError;

/// Remote-control keys understood by the television
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Home,
    Rewind,
    Forward,
    Play,
    Select,
    Left,
    Right,
    Down,
    Up,
    Back,
    Replay,
    Info,
    Backspace,
    Search,
    Enter,
    FindRemote,
    VolumeDown,
    VolumeMute,
    VolumeUp,
    PowerOn,
    PowerOff,
    ChannelUp,
    ChannelDown,
    InputTuner,
    InputHdmi1,
    InputHdmi2,
    InputHdmi3,
    InputHdmi4,
    InputAv1,
}

impl Key {
    pub const ALL: [Key; 29] = [
        Key::Home,
        Key::Rewind,
        Key::Forward,
        Key::Play,
        Key::Select,
        Key::Left,
        Key::Right,
        Key::Down,
        Key::Up,
        Key::Back,
        Key::Replay,
        Key::Info,
        Key::Backspace,
        Key::Search,
        Key::Enter,
        Key::FindRemote,
        Key::VolumeDown,
        Key::VolumeMute,
        Key::VolumeUp,
        Key::PowerOn,
        Key::PowerOff,
        Key::ChannelUp,
        Key::ChannelDown,
        Key::InputTuner,
        Key::InputHdmi1,
        Key::InputHdmi2,
        Key::InputHdmi3,
        Key::InputHdmi4,
        Key::InputAv1,
    ];

    /// Name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Home => "Home",
            Key::Rewind => "Rev",
            Key::Forward => "Fwd",
            Key::Play => "Play",
            Key::Select => "Select",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Down => "Down",
            Key::Up => "Up",
            Key::Back => "Back",
            Key::Replay => "InstantReplay",
            Key::Info => "Info",
            Key::Backspace => "Backspace",
            Key::Search => "Search",
            Key::Enter => "Enter",
            Key::FindRemote => "FindRemote",
            Key::VolumeDown => "VolumeDown",
            Key::VolumeMute => "VolumeMute",
            Key::VolumeUp => "VolumeUp",
            Key::PowerOn => "PowerOn",
            Key::PowerOff => "PowerOff",
            Key::ChannelUp => "ChannelUp",
            Key::ChannelDown => "ChannelDown",
            Key::InputTuner => "InputTuner",
            Key::InputHdmi1 => "InputHDMI1",
            Key::InputHdmi2 => "InputHDMI2",
            Key::InputHdmi3 => "InputHDMI3",
            Key::InputHdmi4 => "InputHDMI4",
            Key::InputAv1 => "InputAV1",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Key {
    type Err = ControlError;

    /// Accepts wire names case-insensitively (`volumeup`, `InputHDMI2`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ControlError::UnknownKey(s.to_string()))
    }
}

/// The three ways a key can be actuated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Down,
    Up,
}

impl KeyAction {
    pub fn path(&self) -> &'static str {
        match self {
            KeyAction::Press => "keypress",
            KeyAction::Down => "keydown",
            KeyAction::Up => "keyup",
        }
    }
}

impl FromStr for KeyAction {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "press" | "keypress" => Ok(KeyAction::Press),
            "down" | "keydown" => Ok(KeyAction::Down),
            "up" | "keyup" => Ok(KeyAction::Up),
            _ => Err(ControlError::UnknownKeyAction(s.to_string())),
        }
    }
}

/// Read-only ECP queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    DeviceInfo,
    Apps,
    ActiveApp,
}

impl Query {
    /// Path segment, which is also the root element of the returned document
    pub fn as_str(&self) -> &'static str {
        match self {
            Query::DeviceInfo => "device-info",
            Query::Apps => "apps",
            Query::ActiveApp => "active-app",
        }
    }
}

/// App text the television reports while showing its powered-off screen
pub const INPUT_WHEN_OFF: &str = "Davinci Channel";

/// Normalized name reported for [`INPUT_WHEN_OFF`]
pub const BLANKED_INPUT: &str = "blanked";

/// Resolve a caller-facing port name to the key that selects it.
pub fn input_key(port: &str) -> Option<Key> {
    match port.to_ascii_lowercase().as_str() {
        "hdmi1" => Some(Key::InputHdmi1),
        "hdmi2" => Some(Key::InputHdmi2),
        "hdmi3" => Some(Key::InputHdmi3),
        "hdmi4" => Some(Key::InputHdmi4),
        "av" => Some(Key::InputAv1),
        "tuner" => Some(Key::InputTuner),
        _ => None,
    }
}

/// Normalize an ECP `power-mode` value. Unknown modes map to "".
pub fn power_state(power_mode: &str) -> &'static str {
    match power_mode {
        "PowerOn" => "on",
        "Headless" => "standby",
        _ => "",
    }
}
