//! Wi-Fi network payloads (`WIFI:T:...;S:...;P:...;H:...;;`) and SSID discovery.

use clap::ValueEnum;
use log::{debug, error, info};
use std::fmt;
use std::process::Command;

/// Wi-Fi authentication type as written into the `T:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Encryption {
    /// WPA/WPA2/WPA3 personal.
    #[default]
    Wpa,
    Wep,
    /// Open network; no password segment is emitted.
    #[value(name = "nopass")]
    NoPass,
}

impl Encryption {
    pub fn as_str(self) -> &'static str {
        match self {
            Encryption::Wpa => "WPA",
            Encryption::Wep => "WEP",
            Encryption::NoPass => "nopass",
        }
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials for a single Wi-Fi network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WifiCredential {
    pub ssid: String,
    pub password: String,
    pub encryption: Encryption,
    pub hidden: bool,
}

impl WifiCredential {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>, encryption: Encryption) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
            encryption,
            hidden: false,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Builds the Wi-Fi join string understood by phone camera apps.
pub fn build_wifi_payload(cred: &WifiCredential) -> String {
    let mut payload = format!(
        "WIFI:T:{};S:{};",
        cred.encryption,
        escape_special_chars(&cred.ssid)
    );
    if cred.encryption != Encryption::NoPass {
        payload.push_str("P:");
        payload.push_str(&escape_special_chars(&cred.password));
        payload.push(';');
    }
    if cred.hidden {
        payload.push_str("H:true;");
    }
    payload.push(';');
    payload
}

/// Backslash-escapes the characters that delimit Wi-Fi payload fields.
///
/// Backslash goes first so the escapes added afterwards are not doubled.
fn escape_special_chars(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace(':', "\\:")
}

/// Returns the SSID of the currently connected network, if it can be found.
///
/// Uses NetworkManager's `nmcli`. A missing utility or a failing command is
/// logged and reported as `None`.
pub fn detect_ssid() -> Option<String> {
    if which::which("nmcli").is_err() {
        error!("nmcli not found. Install network-manager to detect the current network");
        return None;
    }

    let output = match Command::new("nmcli")
        .args(["-t", "-f", "active,ssid", "dev", "wifi"])
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            error!("Failed to run nmcli: {}", e);
            return None;
        }
    };

    if !output.status.success() {
        error!(
            "nmcli failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let ssid = parse_active_ssid(&String::from_utf8_lossy(&output.stdout));
    match &ssid {
        Some(ssid) => info!("Wi-Fi detected: {}", ssid),
        None => debug!("nmcli reported no active Wi-Fi connection"),
    }
    ssid
}

/// Picks the active network out of `nmcli -t -f active,ssid dev wifi` output.
///
/// Lines look like `yes:HomeNetwork` or `no:Neighbor`. Some locales print
/// `sim` instead of `yes`.
pub fn parse_active_ssid(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (active, ssid) = line.split_once(':')?;
        matches!(active, "yes" | "sim").then(|| ssid.to_string())
    })
}
