mod controller;
mod error;
mod keys;
mod roku;
mod types;

#[allow(unused_imports)]
pub use controller::{
    BLANK_UNKNOWN, DeviceController, NOT_SUPPORTED, RemoteControl, VOLUME_UNKNOWN,
};
pub use error::ControlError;
#[allow(unused_imports)]
pub use keys::{Key, KeyAction};
pub use roku::{ClientConfig, RokuController};
#[allow(unused_imports)]
pub use types::{
    ActiveSignal, CommandResult, DeviceInfo, HardwareInfo, InputStatus, MuteStatus, NetworkInfo,
    PowerStatus,
};
