use std::sync::Arc;

use super::error::{ControlError, ResultExt};
use super::keys::{Key, KeyAction, input_key, power_state};
use super::types::{
    ActiveSignal, CommandResult, DeviceInfo, HardwareInfo, InputStatus, MuteStatus, PowerStatus,
};

/// Reply for anything the protocol cannot do or report
pub const NOT_SUPPORTED: &str = "We unfortunately can't do this :(";

/// Reply for the display status query, which the device cannot answer
pub const BLANK_UNKNOWN: &str = "I'm hesitant on this one, but not hopeful :/";

/// Reply for volume steps, since the device never reports a level
pub const VOLUME_UNKNOWN: &str = "I don't know what the volume is...";

/// Protocol-level operations a television exposes. Every call is a
/// self-contained exchange with the device at `address`.
pub trait RemoteControl: Send + Sync {
    fn send_key(&self, address: &str, action: KeyAction, key: Key) -> Result<(), ControlError>;
    fn device_info(&self, address: &str) -> Result<DeviceInfo, ControlError>;
    fn current_input(&self, address: &str) -> Result<String, ControlError>;
    fn input_list(&self, address: &str) -> Result<Vec<String>, ControlError>;
    fn hardware_info(&self, address: &str) -> Result<HardwareInfo, ControlError>;
}

/// Main device controller that turns caller actions into protocol calls
#[derive(Clone)]
pub struct DeviceController {
    remote: Arc<dyn RemoteControl>,
}

impl DeviceController {
    pub fn new(remote: Arc<dyn RemoteControl>) -> Self {
        Self { remote }
    }

    fn press(&self, address: &str, key: Key) -> Result<(), ControlError> {
        self.remote.send_key(address, KeyAction::Press, key)
    }

    /// Power is reported optimistically; the device is not re-queried.
    pub fn power_on(&self, address: &str) -> Result<PowerStatus, ControlError> {
        self.press(address, Key::PowerOn).context("power on", address)?;
        Ok(PowerStatus {
            power: "on".to_string(),
        })
    }

    pub fn standby(&self, address: &str) -> Result<PowerStatus, ControlError> {
        self.press(address, Key::PowerOff)
            .context("switch to standby", address)?;
        Ok(PowerStatus {
            power: "standby".to_string(),
        })
    }

    pub fn switch_input(&self, address: &str, port: &str) -> Result<InputStatus, ControlError> {
        let action = format!("switch input to {}", port);
        let key = input_key(port)
            .ok_or_else(|| ControlError::UnsupportedInput(port.to_string()))
            .context(action.as_str(), address)?;

        self.press(address, key).context(action.as_str(), address)?;
        Ok(InputStatus {
            input: port.to_uppercase(),
        })
    }

    pub fn volume_up(&self, address: &str) -> Result<&'static str, ControlError> {
        self.press(address, Key::VolumeUp)
            .context("raise volume", address)?;
        Ok(VOLUME_UNKNOWN)
    }

    pub fn volume_down(&self, address: &str) -> Result<&'static str, ControlError> {
        self.press(address, Key::VolumeDown)
            .context("lower volume", address)?;
        Ok(VOLUME_UNKNOWN)
    }

    /// The mute key is only honored right after a volume change, so the
    /// volume is nudged down and back up first.
    pub fn mute(&self, address: &str) -> Result<MuteStatus, ControlError> {
        for key in [Key::VolumeDown, Key::VolumeUp, Key::VolumeMute] {
            self.press(address, key).context("mute", address)?;
        }
        Ok(MuteStatus { muted: true })
    }

    /// There is no unmute key. A volume nudge clears mute on its own.
    pub fn unmute(&self, address: &str) -> Result<MuteStatus, ControlError> {
        for key in [Key::VolumeDown, Key::VolumeUp] {
            self.press(address, key).context("unmute", address)?;
        }
        Ok(MuteStatus { muted: false })
    }

    /// Forward a raw remote key, e.g. `("press", "Home")`
    pub fn send_key(
        &self,
        address: &str,
        action: &str,
        key: &str,
    ) -> Result<CommandResult, ControlError> {
        let operation = format!("send {} {}", key, action);
        let action = action.parse::<KeyAction>().context(operation.as_str(), address)?;
        let key = key.parse::<Key>().context(operation.as_str(), address)?;

        self.remote
            .send_key(address, action, key)
            .context(format!("send {} {}", key, action.path()), address)?;
        Ok(CommandResult {
            success: true,
            message: format!("Sent {} {}", key, action.path()),
        })
    }

    pub fn get_power(&self, address: &str) -> Result<PowerStatus, ControlError> {
        let info = self
            .remote
            .device_info(address)
            .context("get power state", address)?;
        Ok(PowerStatus {
            power: power_state(&info.power_mode).to_string(),
        })
    }

    pub fn get_input(&self, address: &str) -> Result<InputStatus, ControlError> {
        let input = self.remote.current_input(address)?;
        Ok(InputStatus { input })
    }

    pub fn get_input_list(&self, address: &str) -> Result<Vec<String>, ControlError> {
        self.remote.input_list(address)
    }

    pub fn get_active_signal(&self, address: &str, port: &str) -> Result<ActiveSignal, ControlError> {
        let input = self
            .remote
            .current_input(address)
            .context(format!("check for a signal on {}", port), address)?;
        Ok(ActiveSignal {
            active: input.to_lowercase() == port.to_lowercase(),
        })
    }

    pub fn get_hardware_info(&self, address: &str) -> Result<HardwareInfo, ControlError> {
        self.remote.hardware_info(address)
    }

    pub fn set_volume(&self, _level: &str) -> &'static str {
        NOT_SUPPORTED
    }

    pub fn blank_display(&self) -> &'static str {
        NOT_SUPPORTED
    }

    pub fn unblank_display(&self) -> &'static str {
        NOT_SUPPORTED
    }

    pub fn get_volume(&self) -> &'static str {
        NOT_SUPPORTED
    }

    pub fn get_mute(&self) -> &'static str {
        NOT_SUPPORTED
    }

    pub fn get_blank(&self) -> &'static str {
        BLANK_UNKNOWN
    }
}
