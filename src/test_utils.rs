use std::sync::Mutex;

use crate::network::device_control::{
    ControlError, DeviceInfo, HardwareInfo, Key, KeyAction, NetworkInfo, RemoteControl,
};

/// In-memory television that records every key it receives
pub struct FakeRemote {
    calls: Mutex<Vec<String>>,
    fail_on: Option<Key>,
    power_mode: String,
    input: String,
}

impl Default for FakeRemote {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
            power_mode: "PowerOn".to_string(),
            input: "HDMI1".to_string(),
        }
    }
}

impl FakeRemote {
    /// Every key succeeds except `key`, which answers HTTP 500
    pub fn failing_on(key: Key) -> Self {
        Self {
            fail_on: Some(key),
            ..Default::default()
        }
    }

    pub fn with_power_mode(power_mode: &str) -> Self {
        Self {
            power_mode: power_mode.to_string(),
            ..Default::default()
        }
    }

    pub fn with_input(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Default::default()
        }
    }

    /// Keys received so far, as `<action path>/<key>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RemoteControl for FakeRemote {
    fn send_key(&self, address: &str, action: KeyAction, key: Key) -> Result<(), ControlError> {
        let path = format!("{}/{}", action.path(), key);
        self.calls.lock().unwrap().push(path.clone());

        if self.fail_on == Some(key) {
            return Err(ControlError::Status {
                url: format!("http://{}:8060/{}", address, path),
                status: 500,
            });
        }
        Ok(())
    }

    fn device_info(&self, _address: &str) -> Result<DeviceInfo, ControlError> {
        Ok(DeviceInfo {
            model_name: "55S425".to_string(),
            power_mode: self.power_mode.clone(),
            ..Default::default()
        })
    }

    fn current_input(&self, _address: &str) -> Result<String, ControlError> {
        Ok(self.input.clone())
    }

    fn input_list(&self, _address: &str) -> Result<Vec<String>, ControlError> {
        Ok(vec!["HDMI1".to_string(), self.input.clone()])
    }

    fn hardware_info(&self, address: &str) -> Result<HardwareInfo, ControlError> {
        Ok(HardwareInfo {
            hostname: address.to_string(),
            model_name: "55S425".to_string(),
            network_information: NetworkInfo {
                ip_address: address.to_string(),
                mac_address: "d4:e2:2f:00:11:22".to_string(),
            },
            power_status: "on".to_string(),
            ..Default::default()
        })
    }
}
