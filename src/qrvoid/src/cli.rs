use clap::{Args, Parser, Subcommand};
use qrvoid::{Anchor, Encryption, ErrorCorrection};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qrvoid")]
#[command(version)]
#[command(about = "Generate QR codes for links, Wi-Fi networks, Pix payments and social profiles")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a link or any text as-is
    Text {
        #[arg(help = "Text or URL to encode")]
        text: String,
    },

    /// Encode Wi-Fi network credentials
    Wifi {
        #[arg(short, long, help = "WiFi network name (SSID)")]
        ssid: Option<String>,

        #[arg(short, long, default_value = "", help = "WiFi network password")]
        password: String,

        #[arg(short, long, value_enum, default_value_t, help = "Authentication type")]
        encryption: Encryption,

        #[arg(long, help = "Mark the network as hidden")]
        hidden: bool,

        #[arg(long, conflicts_with = "ssid", help = "Use the SSID of the current connection (requires nmcli)")]
        detect: bool,
    },

    /// Encode a Pix payment request
    Pix {
        #[arg(short, long, help = "Pix key (e-mail, phone, CPF/CNPJ or random key)")]
        key: String,

        #[arg(short, long, help = "Beneficiary name (truncated to 25 characters)")]
        name: String,

        #[arg(short, long, help = "Beneficiary city (truncated to 15 characters)")]
        city: String,

        #[arg(short, long, help = "Amount, e.g. 10.50; ignored if not a number")]
        amount: Option<String>,

        #[arg(short, long, help = "Transaction id (defaults to ***)")]
        txid: Option<String>,
    },

    /// Encode a social profile or contact link
    Social {
        #[arg(help = "Platform: whatsapp, instagram, twitter/x, facebook, linkedin, github, youtube, discord, telegram, steam, pinterest, email")]
        platform: String,

        #[arg(help = "Handle, phone number, invite code or e-mail address")]
        value: String,
    },
}

/// Output and styling options shared by every subcommand.
///
/// Unset options fall back to `~/.qrvoid.toml` and then to built-in defaults.
#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(short, long, global = true, default_value = "qrcode.png", help = "Output file; a .svg extension writes SVG")]
    pub output: PathBuf,

    #[arg(long, global = true, value_enum, ignore_case = true, help = "Error correction level")]
    pub ec: Option<ErrorCorrection>,

    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=100), help = "Pixels per module")]
    pub box_size: Option<u32>,

    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(0..=40), help = "Quiet zone width in modules")]
    pub border: Option<u32>,

    #[arg(long, global = true, help = "Module color (#RRGGBB, #RRGGBBAA, black or white)")]
    pub fg: Option<String>,

    #[arg(long, global = true, help = "Background color (#RRGGBB, #RRGGBBAA, black or white)")]
    pub bg: Option<String>,

    #[arg(long, global = true, help = "Draw square modules instead of rounded ones")]
    pub square: bool,

    #[arg(short, long, global = true, help = "Path to an image file to overlay as a logo")]
    pub logo: Option<PathBuf>,

    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(0..=100), help = "Logo size as a percentage of the QR code")]
    pub logo_size: Option<u32>,

    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(0..=100), help = "Logo opacity in percent")]
    pub logo_opacity: Option<u32>,

    #[arg(long, global = true, value_enum, help = "Logo position")]
    pub logo_position: Option<Anchor>,

    #[arg(long, global = true, help = "Print the payload text instead of writing an image")]
    pub print: bool,
}
