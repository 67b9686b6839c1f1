mod cli;
mod config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use image::DynamicImage;
use log::{info, warn};
use qrvoid::{
    detect_ssid, render_svg, GenerationRequest, Generator, LogoOverlay, Payload, PaymentRequest,
    Platform, WifiCredential,
};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("qrvoid {} starting", env!("CARGO_PKG_VERSION"));

    let file_config = config::load_config()
        .context("Failed to load ~/.qrvoid.toml")?
        .unwrap_or_default();
    let settings = config::merge_config(&cli.output, file_config)?;

    let payload = build_payload(cli.command)?;
    let text = payload
        .encode()
        .context("Fill in the required fields to generate a QR code")?;

    if cli.output.print {
        println!("{text}");
        return Ok(());
    }

    let output = cli.output.output.as_path();
    if has_extension(output, &["svg"]) {
        if cli.output.logo.is_some() {
            warn!("Logos are not supported for SVG output, ignoring --logo");
        }
        let svg = render_svg(&text, &settings.render).context("Failed to create QR code")?;
        fs::write(output, svg).context("Failed to save QR code SVG")?;
    } else {
        let logo = match &cli.output.logo {
            Some(path) => Some(LogoOverlay {
                image: image::open(path)
                    .with_context(|| format!("Failed to open logo image {}", path.display()))?,
                placement: settings.logo,
            }),
            None => None,
        };

        let generator = Generator::new();
        generator.submit(GenerationRequest {
            text,
            render: settings.render,
            logo,
        });
        let image = generator.recv_latest().context("Failed to create QR code")?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        // JPEG has no alpha channel
        let image = if has_extension(output, &["jpg", "jpeg"]) {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8())
        } else {
            DynamicImage::ImageRgba8(image)
        };
        image.save(output).context("Failed to save QR code image")?;
    }

    println!("QR code generated successfully: {}", output.display());
    Ok(())
}

fn build_payload(command: Command) -> Result<Payload> {
    let payload = match command {
        Command::Text { text } => Payload::Text(text),
        Command::Wifi {
            ssid,
            password,
            encryption,
            hidden,
            detect,
        } => {
            let ssid = if detect {
                match detect_ssid() {
                    Some(ssid) => ssid,
                    None => bail!("Could not detect the current Wi-Fi network, pass --ssid instead"),
                }
            } else {
                ssid.unwrap_or_default()
            };
            Payload::Wifi(WifiCredential::new(ssid, password, encryption).hidden(hidden))
        }
        Command::Pix {
            key,
            name,
            city,
            amount,
            txid,
        } => {
            let mut request = PaymentRequest::new(key, name, city);
            request.amount = amount;
            if let Some(txid) = txid {
                request = request.with_transaction_id(txid);
            }
            Payload::Pix(request)
        }
        Command::Social { platform, value } => {
            if Platform::from_name(&platform).is_none() {
                warn!("Unknown platform {platform:?}, encoding the value as plain text");
            }
            Payload::social(&platform, value)
        }
    };
    Ok(payload)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
