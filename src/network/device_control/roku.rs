//! Roku ECP client. Implements the External Control Protocol on port 8060:
//! key actions, XML queries, and the normalization of their answers.

use std::net::IpAddr;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;

use super::controller::RemoteControl;
use super::error::{ControlError, ResultExt};
use super::keys::{Key, KeyAction, Query, power_state};
use super::types::{ActiveApp, AppList, DeviceInfo, HardwareInfo, NetworkInfo};

/// Connection settings for talking to televisions
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub port: u16,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: RokuController::PORT,
            timeout: RokuController::TIMEOUT,
        }
    }
}

/// Roku External Control Protocol implementation.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RokuController {
    client: reqwest::blocking::Client,
    port: u16,
    timeout: Duration,
}

impl RokuController {
    pub const PORT: u16 = 8060;
    pub const TIMEOUT: Duration = Duration::from_secs(3);

    pub fn new(config: &ClientConfig) -> Result<Self, ControlError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ControlError::Client)?;

        Ok(Self {
            client,
            port: config.port,
            timeout: config.timeout,
        })
    }

    fn url(&self, address: &str, path: &str) -> String {
        format!("http://{}:{}/{}", address, self.port, path)
    }

    /// Press and release a key
    pub fn send_keypress(&self, address: &str, key: Key) -> Result<(), ControlError> {
        self.send_key_action(address, KeyAction::Press, key)
    }

    /// Hold a key down until a matching keyup
    pub fn send_keydown(&self, address: &str, key: Key) -> Result<(), ControlError> {
        self.send_key_action(address, KeyAction::Down, key)
    }

    /// Release a key held by keydown
    pub fn send_keyup(&self, address: &str, key: Key) -> Result<(), ControlError> {
        self.send_key_action(address, KeyAction::Up, key)
    }

    fn send_key_action(
        &self,
        address: &str,
        action: KeyAction,
        key: Key,
    ) -> Result<(), ControlError> {
        let url = self.url(address, &format!("{}/{}", action.path(), key));
        tracing::debug!(%url, "sending key");

        let response = self
            .client
            .post(&url)
            .body(Vec::new())
            .send()
            .map_err(|source| ControlError::Transport {
                url: url.clone(),
                source,
            })
            .context(format!("send {} {}", key, action.path()), address)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ControlError::Status {
                url,
                status: status.as_u16(),
            })
            .context(format!("send {} {}", key, action.path()), address);
        }

        Ok(())
    }

    /// Run a query and return the raw response body
    pub fn query(&self, address: &str, query: Query) -> Result<String, ControlError> {
        let url = self.url(address, &format!("query/{}", query.as_str()));
        tracing::debug!(%url, "querying device");

        let action = format!("send {} query", query.as_str());
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ControlError::Transport {
                url: url.clone(),
                source,
            })
            .context(action.as_str(), address)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ControlError::Status {
                url,
                status: status.as_u16(),
            })
            .context(action.as_str(), address);
        }

        response
            .text()
            .map_err(|source| ControlError::Read { url, source })
            .context(action.as_str(), address)
    }

    pub fn get_device_info(&self, address: &str) -> Result<DeviceInfo, ControlError> {
        self.query(address, Query::DeviceInfo)
            .and_then(|body| parse_document(&body, Query::DeviceInfo, address))
            .context("get device info", address)
    }

    /// Name of the input or app currently on screen
    pub fn get_current_input(&self, address: &str) -> Result<String, ControlError> {
        let active: ActiveApp = self
            .query(address, Query::ActiveApp)
            .and_then(|body| parse_document(&body, Query::ActiveApp, address))
            .context("get current input", address)?;

        Ok(active.app.input_name())
    }

    /// Names of every input and app, in the order the device lists them
    pub fn get_input_list(&self, address: &str) -> Result<Vec<String>, ControlError> {
        let list: AppList = self
            .query(address, Query::Apps)
            .and_then(|body| parse_document(&body, Query::Apps, address))
            .context("get the list of inputs", address)?;

        Ok(list.apps.iter().map(|app| app.input_name()).collect())
    }

    pub fn get_hardware_info(&self, address: &str) -> Result<HardwareInfo, ControlError> {
        let info = self
            .get_device_info(address)
            .context("get hardware info", address)?;

        Ok(build_hardware_info(address, lookup_hostname(address, self.timeout), &info))
    }
}

impl RemoteControl for RokuController {
    fn send_key(&self, address: &str, action: KeyAction, key: Key) -> Result<(), ControlError> {
        match action {
            KeyAction::Press => self.send_keypress(address, key),
            KeyAction::Down => self.send_keydown(address, key),
            KeyAction::Up => self.send_keyup(address, key),
        }
    }

    fn device_info(&self, address: &str) -> Result<DeviceInfo, ControlError> {
        self.get_device_info(address)
    }

    fn current_input(&self, address: &str) -> Result<String, ControlError> {
        self.get_current_input(address)
    }

    fn input_list(&self, address: &str) -> Result<Vec<String>, ControlError> {
        self.get_input_list(address)
    }

    fn hardware_info(&self, address: &str) -> Result<HardwareInfo, ControlError> {
        self.get_hardware_info(address)
    }
}

/// Deserialize an ECP document after checking its root element
fn parse_document<T: DeserializeOwned>(
    body: &str,
    query: Query,
    address: &str,
) -> Result<T, ControlError> {
    let expected = query.as_str();
    let parse_error = |source: quick_xml::DeError| ControlError::Parse {
        document: expected,
        address: address.to_string(),
        source,
    };

    let mut reader = Reader::from_str(body);
    let found = loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                break String::from_utf8_lossy(e.name().as_ref()).into_owned();
            }
            Ok(Event::Eof) => {
                return Err(ControlError::UnexpectedDocument {
                    expected,
                    found: "an empty document".to_string(),
                    address: address.to_string(),
                });
            }
            Ok(_) => continue,
            Err(e) => return Err(parse_error(quick_xml::DeError::InvalidXml(e))),
        }
    };

    if found != expected {
        return Err(ControlError::UnexpectedDocument {
            expected,
            found: format!("<{}>", found),
            address: address.to_string(),
        });
    }

    quick_xml::de::from_str(body).map_err(parse_error)
}

/// Best-effort reverse DNS. `None` when the address is not an IP literal,
/// has no usable PTR record, or the resolver does not answer within
/// `timeout`.
fn lookup_hostname(address: &str, timeout: Duration) -> Option<String> {
    let ip: IpAddr = address.parse().ok()?;

    // The resolver call cannot be cancelled; a late answer is dropped.
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(dns_lookup::lookup_addr(&ip));
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(name)) => {
            let name = name.trim_matches('.');
            (!name.is_empty()).then(|| name.to_string())
        }
        Ok(Err(e)) => {
            tracing::debug!(address, error = %e, "reverse lookup failed");
            None
        }
        Err(_) => {
            tracing::debug!(address, ?timeout, "reverse lookup timed out");
            None
        }
    }
}

fn build_hardware_info(address: &str, hostname: Option<String>, info: &DeviceInfo) -> HardwareInfo {
    HardwareInfo {
        hostname: hostname.unwrap_or_else(|| address.to_string()),
        model_name: info.model_name.clone(),
        serial_number: info.serial_number.clone(),
        firmware_version: info.software_version.clone(),
        network_information: NetworkInfo {
            ip_address: address.to_string(),
            mac_address: info.ethernet_mac.clone(),
        },
        power_status: power_state(&info.power_mode).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Server, ServerGuard};

    const DEVICE_INFO: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<device-info>
    <udn>29780021-2c0a-1073-80b8-d4e22f001122</udn>
    <serial-number>X01234567890</serial-number>
    <vendor-name>TCL</vendor-name>
    <model-name>55S425</model-name>
    <model-number>8105X</model-number>
    <is-tv>true</is-tv>
    <is-stick>false</is-stick>
    <screen-size>55</screen-size>
    <ethernet-mac>d4:e2:2f:00:11:22</ethernet-mac>
    <software-version>9.1.0</software-version>
    <software-build>4111</software-build>
    <uptime>2851</uptime>
    <power-mode>PowerOn</power-mode>
</device-info>"#;

    fn controller_for(server: &ServerGuard) -> RokuController {
        let port = server
            .host_with_port()
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
            .expect("mock server port");
        RokuController::new(&ClientConfig {
            port,
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    fn closed_port_controller() -> RokuController {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        RokuController::new(&ClientConfig {
            port,
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.port, 8060);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_key_actions_hit_their_paths() {
        let mut server = Server::new();
        let press = server.mock("POST", "/keypress/PowerOn").with_status(200).create();
        let down = server.mock("POST", "/keydown/VolumeUp").with_status(200).create();
        let up = server.mock("POST", "/keyup/VolumeUp").with_status(200).create();

        let roku = controller_for(&server);
        roku.send_keypress("127.0.0.1", Key::PowerOn).unwrap();
        roku.send_keydown("127.0.0.1", Key::VolumeUp).unwrap();
        roku.send_keyup("127.0.0.1", Key::VolumeUp).unwrap();

        press.assert();
        down.assert();
        up.assert();
    }

    #[test]
    fn test_keypress_error_status_is_reported() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/keypress/InputHDMI2")
            .with_status(500)
            .create();

        let err = controller_for(&server)
            .send_keypress("127.0.0.1", Key::InputHdmi2)
            .unwrap_err();

        assert_eq!(err.kind(), "status");
        assert!(err.to_string().contains("send InputHDMI2 keypress"));
    }

    #[test]
    fn test_keypress_transport_failure() {
        let err = closed_port_controller()
            .send_keypress("127.0.0.1", Key::PowerOff)
            .unwrap_err();

        assert_eq!(err.kind(), "transport");
        assert_eq!(err.to_string(), "failed to send PowerOff keypress on 127.0.0.1");
    }

    #[test]
    fn test_get_device_info() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/query/device-info")
            .with_status(200)
            .with_header("content-type", "text/xml; charset=utf-8")
            .with_body(DEVICE_INFO)
            .create();

        let info = controller_for(&server).get_device_info("127.0.0.1").unwrap();

        mock.assert();
        assert_eq!(info.vendor_name, "TCL");
        assert_eq!(info.model_name, "55S425");
        assert_eq!(info.uptime, 2851);
        assert!(info.is_tv);
        assert_eq!(info.power_mode, "PowerOn");
    }

    #[test]
    fn test_get_device_info_rejects_wrong_document() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/query/device-info")
            .with_body("<apps><app id=\"12\" type=\"appl\">Netflix</app></apps>")
            .create();

        let err = controller_for(&server)
            .get_device_info("127.0.0.1")
            .unwrap_err();

        assert_eq!(err.kind(), "parse");
        assert_eq!(err.to_string(), "failed to get device info on 127.0.0.1");
        assert!(err.causes().iter().any(|c| c.contains("found <apps>")));
    }

    #[test]
    fn test_get_device_info_rejects_malformed_xml() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/query/device-info")
            .with_body("<device-info><screen-size>big</screen-size></device-info>")
            .create();

        let err = controller_for(&server)
            .get_device_info("127.0.0.1")
            .unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_empty_body_is_parse_error() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/query/active-app").with_body("").create();

        let err = controller_for(&server)
            .get_current_input("127.0.0.1")
            .unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_query_transport_failure() {
        let err = closed_port_controller()
            .get_input_list("127.0.0.1")
            .unwrap_err();

        assert_eq!(err.kind(), "transport");
        assert_eq!(err.to_string(), "failed to get the list of inputs on 127.0.0.1");
        assert_eq!(err.causes()[0], "failed to send apps query on 127.0.0.1");
    }

    #[test]
    fn test_get_current_input() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/query/active-app")
            .with_body(
                r#"<?xml version="1.0" encoding="UTF-8" ?>
<active-app>
    <app id="tvinput.hdmi1" type="tvin" version="1.0.0">HDMI 1</app>
</active-app>"#,
            )
            .create();

        let input = controller_for(&server)
            .get_current_input("127.0.0.1")
            .unwrap();
        assert_eq!(input, "HDMI1");
    }

    #[test]
    fn test_get_input_list_preserves_order() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/query/apps")
            .with_body(
                r#"<apps>
    <app id="tvinput.hdmi2" type="tvin" version="1.0.0">Apple TV</app>
    <app id="tvinput.hdmi1" type="tvin" version="1.0.0">HDMI 1</app>
    <app id="562859" type="menu" version="1.0.0">Home</app>
    <app id="837" subtype="ndka" type="appl" version="2.0.0">YouTube</app>
    <app id="551012" subtype="rsga" type="appl" version="1.0.0">Davinci Channel</app>
</apps>"#,
            )
            .create();

        let inputs = controller_for(&server).get_input_list("127.0.0.1").unwrap();
        assert_eq!(inputs, vec!["HDMI2", "HDMI1", "Menu", "YouTube", "blanked"]);
    }

    #[test]
    fn test_get_hardware_info() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/query/device-info")
            .with_body(DEVICE_INFO)
            .create();

        let hardware = controller_for(&server)
            .get_hardware_info("127.0.0.1")
            .unwrap();

        assert!(!hardware.hostname.is_empty());
        assert_eq!(hardware.model_name, "55S425");
        assert_eq!(hardware.serial_number, "X01234567890");
        assert_eq!(hardware.firmware_version, "9.1.0");
        assert_eq!(hardware.network_information.ip_address, "127.0.0.1");
        assert_eq!(hardware.network_information.mac_address, "d4:e2:2f:00:11:22");
        assert_eq!(hardware.power_status, "on");
    }

    #[test]
    fn test_hostname_falls_back_to_address() {
        assert_eq!(lookup_hostname("living-room-tv", Duration::from_secs(1)), None);

        let info = DeviceInfo {
            power_mode: "Headless".to_string(),
            ..Default::default()
        };
        let hardware = build_hardware_info("10.5.34.17", None, &info);
        assert_eq!(hardware.hostname, "10.5.34.17");
        assert_eq!(hardware.power_status, "standby");
    }

    #[test]
    fn test_get_hardware_info_uses_address_when_not_an_ip() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/query/device-info")
            .with_body(DEVICE_INFO)
            .create();

        let hardware = controller_for(&server)
            .get_hardware_info("localhost")
            .unwrap();

        assert_eq!(hardware.hostname, "localhost");
        assert_eq!(hardware.network_information.ip_address, "localhost");
        assert_eq!(hardware.model_name, "55S425");
        assert_eq!(hardware.power_status, "on");
    }

    #[test]
    fn test_get_device_info_tolerates_blank_fields() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/query/device-info")
            .with_body(
                "<device-info><model-name>X</model-name><panel-id></panel-id>\
                 <is-stick/><power-mode>Headless</power-mode></device-info>",
            )
            .create();

        let controller = controller_for(&server);
        let info = controller.get_device_info("127.0.0.1").unwrap();
        assert_eq!(info.model_name, "X");
        assert_eq!(info.panel_id, 0);
        assert!(!info.is_stick);

        let hardware = controller.get_hardware_info("127.0.0.1").unwrap();
        assert_eq!(hardware.power_status, "standby");
    }

    #[test]
    fn test_unknown_power_mode_is_empty() {
        let info = DeviceInfo {
            power_mode: "Suspend".to_string(),
            ..Default::default()
        };
        let hardware = build_hardware_info("10.5.34.17", Some("tv.byu.edu".to_string()), &info);
        assert_eq!(hardware.hostname, "tv.byu.edu");
        assert_eq!(hardware.power_status, "");
    }
}
