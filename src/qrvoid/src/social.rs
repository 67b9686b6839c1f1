//! Social profile and contact links.
//!
//! Each platform has a total normalizer that turns whatever the user typed
//! (a handle, a phone number, an invite URL) into the canonical link. The
//! closed [`Platform`] enum selects the normalizer.

/// Platforms with a dedicated link format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Whatsapp,
    Instagram,
    /// Twitter / X.
    Twitter,
    Facebook,
    Linkedin,
    Github,
    Youtube,
    Discord,
    Telegram,
    Steam,
    Pinterest,
    Email,
}

impl Platform {
    /// Every platform, in the order they are offered to users.
    pub const ALL: [Platform; 12] = [
        Platform::Email,
        Platform::Whatsapp,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Facebook,
        Platform::Linkedin,
        Platform::Github,
        Platform::Youtube,
        Platform::Discord,
        Platform::Telegram,
        Platform::Steam,
        Platform::Pinterest,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Whatsapp => "whatsapp",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
            Platform::Github => "github",
            Platform::Youtube => "youtube",
            Platform::Discord => "discord",
            Platform::Telegram => "telegram",
            Platform::Steam => "steam",
            Platform::Pinterest => "pinterest",
            Platform::Email => "email",
        }
    }

    /// Resolves a user-facing label such as `"E-mail"`, `"LinkedIn"` or `"X"`.
    ///
    /// Case, spaces, dashes and underscores are ignored. Returns `None` for
    /// labels that are not a known platform.
    pub fn from_name(label: &str) -> Option<Platform> {
        let key: String = label
            .chars()
            .filter(|c| !matches!(*c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "x" => Some(Platform::Twitter),
            "mail" => Some(Platform::Email),
            _ => Platform::ALL.into_iter().find(|p| p.name() == key),
        }
    }

    /// The normalizer for this platform.
    pub fn handler(self) -> fn(&str) -> String {
        match self {
            Platform::Whatsapp => whatsapp,
            Platform::Instagram => instagram,
            Platform::Twitter => twitter,
            Platform::Facebook => facebook,
            Platform::Linkedin => linkedin,
            Platform::Github => github,
            Platform::Youtube => youtube,
            Platform::Discord => discord,
            Platform::Telegram => telegram,
            Platform::Steam => steam,
            Platform::Pinterest => pinterest,
            Platform::Email => email,
        }
    }

    /// Normalizes `value` into this platform's link.
    pub fn link(self, value: &str) -> String {
        (self.handler())(value)
    }
}

/// Trims whitespace and a single leading `@`.
fn clean_handle(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

/// Keeps only ASCII digits.
fn clean_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub fn whatsapp(number: &str) -> String {
    format!("https://wa.me/{}", clean_digits(number))
}

pub fn instagram(handle: &str) -> String {
    format!("https://instagram.com/{}", clean_handle(handle))
}

pub fn twitter(handle: &str) -> String {
    format!("https://twitter.com/{}", clean_handle(handle))
}

pub fn facebook(handle: &str) -> String {
    format!("https://facebook.com/{}", clean_handle(handle))
}

pub fn linkedin(handle: &str) -> String {
    format!("https://linkedin.com/in/{}", clean_handle(handle))
}

pub fn github(handle: &str) -> String {
    format!("https://github.com/{}", clean_handle(handle))
}

/// Channel handles always get an `@`, whether or not the user typed one.
pub fn youtube(channel: &str) -> String {
    format!("https://youtube.com/@{}", clean_handle(channel))
}

/// Accepts a bare invite code or a full `https://discord.gg/` link.
pub fn discord(invite: &str) -> String {
    let code = invite.replace("https://discord.gg/", "");
    format!("https://discord.gg/{}", code.trim())
}

pub fn telegram(handle: &str) -> String {
    format!("https://t.me/{}", clean_handle(handle))
}

pub fn steam(id: &str) -> String {
    format!("https://steamcommunity.com/id/{}", clean_handle(id))
}

pub fn pinterest(handle: &str) -> String {
    format!("https://pinterest.com/{}", clean_handle(handle))
}

/// `MATMSG` compose-mail payload. The `;;` terminator is required.
pub fn email(address: &str) -> String {
    format!("MATMSG:TO:{};;", address.trim().replace("mailto:", ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_keeps_digits_only() {
        assert_eq!(whatsapp("+55 (11) 99999-9999"), "https://wa.me/5511999999999");
        assert_eq!(whatsapp("abc"), "https://wa.me/");
    }

    #[test]
    fn test_handle_platforms() {
        assert_eq!(instagram("@john.doe"), "https://instagram.com/john.doe");
        assert_eq!(twitter("  @jack "), "https://twitter.com/jack");
        assert_eq!(facebook("zuck"), "https://facebook.com/zuck");
        assert_eq!(github("@rust-lang"), "https://github.com/rust-lang");
        assert_eq!(telegram("@durov"), "https://t.me/durov");
        assert_eq!(pinterest("@maker"), "https://pinterest.com/maker");
        assert_eq!(linkedin("@jane"), "https://linkedin.com/in/jane");
        assert_eq!(steam(" gaben "), "https://steamcommunity.com/id/gaben");
    }

    #[test]
    fn test_only_one_at_is_stripped() {
        assert_eq!(instagram("@@double"), "https://instagram.com/@double");
    }

    #[test]
    fn test_youtube_always_prefixes_at() {
        assert_eq!(youtube("@channel"), "https://youtube.com/@channel");
        assert_eq!(youtube("channel"), "https://youtube.com/@channel");
    }

    #[test]
    fn test_discord_accepts_full_link() {
        assert_eq!(discord("https://discord.gg/abc123"), "https://discord.gg/abc123");
        assert_eq!(discord("  abc123 "), "https://discord.gg/abc123");
    }

    #[test]
    fn test_email_payload_format() {
        assert_eq!(email("test@example.com"), "MATMSG:TO:test@example.com;;");
        assert_eq!(email("mailto:test@example.com"), "MATMSG:TO:test@example.com;;");
        assert_eq!(email("  test@example.com  "), "MATMSG:TO:test@example.com;;");
        assert_eq!(email(" mailto:a@b.com "), "MATMSG:TO:a@b.com;;");
    }

    #[test]
    fn test_platform_from_name() {
        assert_eq!(Platform::from_name("E-mail"), Some(Platform::Email));
        assert_eq!(Platform::from_name("LinkedIn"), Some(Platform::Linkedin));
        assert_eq!(Platform::from_name("X"), Some(Platform::Twitter));
        assert_eq!(Platform::from_name("Whats App"), Some(Platform::Whatsapp));
        assert_eq!(Platform::from_name("myspace"), None);
    }

    #[test]
    fn test_every_platform_round_trips_by_name() {
        for platform in Platform::ALL {
            assert_eq!(Platform::from_name(platform.name()), Some(platform));
        }
    }

    #[test]
    fn test_link_dispatches_to_handler() {
        assert_eq!(Platform::Instagram.link("@john.doe"), instagram("@john.doe"));
        assert_eq!(Platform::Email.link("a@b.com"), "MATMSG:TO:a@b.com;;");
    }
}
