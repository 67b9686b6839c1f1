//! Selecting and encoding the text that goes into a QR code.

use crate::pix::{build_payment_payload, PaymentRequest};
use crate::social::Platform;
use crate::wifi::{build_wifi_payload, WifiCredential};

/// What the user wants to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A link or any free text, encoded as-is.
    Text(String),
    Wifi(WifiCredential),
    Pix(PaymentRequest),
    Social { platform: Platform, value: String },
}

impl Payload {
    /// Builds the QR text, or `None` when a required field is blank.
    ///
    /// Required fields are the text itself, the Wi-Fi SSID, the Pix key, name
    /// and city, and the social handle. Those fields are trimmed before use.
    pub fn encode(&self) -> Option<String> {
        match self {
            Payload::Text(text) => non_blank(text).map(str::to_string),
            Payload::Wifi(cred) => {
                let ssid = non_blank(&cred.ssid)?;
                let cred = WifiCredential {
                    ssid: ssid.to_string(),
                    ..cred.clone()
                };
                Some(build_wifi_payload(&cred))
            }
            Payload::Pix(req) => {
                let req = PaymentRequest {
                    key: non_blank(&req.key)?.to_string(),
                    beneficiary_name: non_blank(&req.beneficiary_name)?.to_string(),
                    beneficiary_city: non_blank(&req.beneficiary_city)?.to_string(),
                    ..req.clone()
                };
                Some(build_payment_payload(&req))
            }
            Payload::Social { platform, value } => non_blank(value).map(|v| platform.link(v)),
        }
    }

    /// Social payload from a free-form platform label.
    ///
    /// Unknown platforms fall back to encoding the value as plain text.
    pub fn social(label: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match Platform::from_name(label) {
            Some(platform) => Payload::Social { platform, value },
            None => Payload::Text(value),
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wifi::Encryption;

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(
            Payload::Text("  https://example.com ".into()).encode(),
            Some("https://example.com".to_string())
        );
        assert_eq!(Payload::Text("   ".into()).encode(), None);
    }

    #[test]
    fn test_wifi_requires_ssid() {
        let cred = WifiCredential::new("  ", "secret", Encryption::Wpa);
        assert_eq!(Payload::Wifi(cred).encode(), None);

        let cred = WifiCredential::new(" Home ", "secret", Encryption::Wpa);
        assert_eq!(
            Payload::Wifi(cred).encode(),
            Some("WIFI:T:WPA;S:Home;P:secret;;".to_string())
        );
    }

    #[test]
    fn test_pix_requires_key_name_and_city() {
        let ok = PaymentRequest::new("user@bank.com", "JOHN DOE", "SAO PAULO");
        assert!(Payload::Pix(ok.clone()).encode().is_some());

        for req in [
            PaymentRequest { key: " ".into(), ..ok.clone() },
            PaymentRequest { beneficiary_name: String::new(), ..ok.clone() },
            PaymentRequest { beneficiary_city: "\t".into(), ..ok.clone() },
        ] {
            assert_eq!(Payload::Pix(req).encode(), None);
        }
    }

    #[test]
    fn test_pix_fields_are_trimmed() {
        let padded = PaymentRequest::new(" user@bank.com ", " JOHN DOE", "SAO PAULO ");
        let clean = PaymentRequest::new("user@bank.com", "JOHN DOE", "SAO PAULO");
        assert_eq!(Payload::Pix(padded).encode(), Payload::Pix(clean).encode());
    }

    #[test]
    fn test_social() {
        assert_eq!(
            Payload::social("Instagram", "@john.doe").encode(),
            Some("https://instagram.com/john.doe".to_string())
        );
        assert_eq!(Payload::social("E-mail", "").encode(), None);
        assert_eq!(
            Payload::social("Myspace", "tom").encode(),
            Some("tom".to_string())
        );
    }
}
