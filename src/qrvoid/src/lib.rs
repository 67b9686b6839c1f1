//! QR payload builders and image helpers.
//!
//! This crate turns structured data into QR code text and images:
//!
//! - **Pix payments**: EMV merchant-presented-mode payloads with a CRC-16
//!   trailer ([`pix`], [`tlv`], [`checksum`]).
//! - **Wi-Fi**: `WIFI:` join strings with field escaping, plus detection of
//!   the current network through `nmcli` ([`wifi`]).
//! - **Social links**: per-platform link normalizers ([`social`]).
//! - **Rendering**: raster and SVG output, logo overlays at nine anchors and a
//!   background generator that drops superseded requests ([`render`],
//!   [`logo`], [`worker`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use qrvoid::{Payload, PaymentRequest, GenerationRequest, RenderOptions, generate};
//!
//! let text = Payload::Pix(PaymentRequest::new("user@bank.com", "JOHN DOE", "SAO PAULO"))
//!     .encode()
//!     .expect("required fields present");
//! let image = generate(&GenerationRequest {
//!     text,
//!     render: RenderOptions::default(),
//!     logo: None,
//! })?;
//! ```
//!
//! The payload builders are total: bad amounts are dropped and long names are
//! truncated rather than reported. Only rendering can fail.

pub mod checksum;
mod error;
pub mod logo;
pub mod payload;
pub mod pix;
pub mod render;
pub mod social;
pub mod tlv;
pub mod wifi;
pub mod worker;

pub use checksum::checksum;
pub use error::{Error, Result};
pub use logo::{composite_logo, Anchor, LogoPlacement};
pub use payload::Payload;
pub use pix::{build_payment_payload, PaymentRequest};
pub use render::{parse_color, render_image, render_svg, ErrorCorrection, RenderOptions};
pub use social::Platform;
pub use tlv::format_field;
pub use wifi::{build_wifi_payload, detect_ssid, Encryption, WifiCredential};
pub use worker::{generate, GenerationRequest, Generator, LogoOverlay, RequestId};
