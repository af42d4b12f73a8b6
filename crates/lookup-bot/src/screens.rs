//! Chat text for every screen and notice the bot sends.
//!
//! All output is MarkdownV2 and built through [`MessageBuilder`], so dynamic
//! values are always escaped.

use crate::config::BotSettings;
use crate::format::display_time;
use crate::markdown::{code, escape, MessageBuilder};
use crate::menu::Menu;
use crate::status::{endpoint_host, StatusSnapshot};
use std::time::Duration;

/// Toast shown when handling a button press fails.
pub const CALLBACK_ERROR: &str = "❌ Error occurred";

/// Message text with the keyboard shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub menu: Menu,
}

pub fn welcome() -> Screen {
    let mut msg = MessageBuilder::new();
    msg.title("📞 Welcome to Number Lookup Bot!")
        .blank()
        .line("Send a phone number and get the contact details on record for it.")
        .blank()
        .title("🔍 What can I do?")
        .bullet("Phone number lookups")
        .bullet("Contact information")
        .bullet("Address & network details")
        .bullet("Fast and private searches")
        .blank()
        .title("🚀 Get Started:")
        .line("Choose an option below or simply send me a phone number!");

    Screen {
        text: msg.build(),
        menu: Menu::Main,
    }
}

pub fn help(settings: &BotSettings) -> Screen {
    let mut msg = MessageBuilder::new();
    msg.title("📖 Number Lookup Bot Help")
        .blank()
        .title("📋 Commands:")
        .bullet("/start - Welcome message and main menu")
        .bullet("/help - This help message")
        .bullet("/lookup <number> - Look up a phone number")
        .bullet("/status - Check bot and API status")
        .blank()
        .title("📞 Supported Formats:")
        .code_bullet("+1234567890", Some("International"))
        .code_bullet("1234567890", Some("National"))
        .code_bullet("+1-234-567-8900", Some("With separators"))
        .blank()
        .line("You can also simply send a phone number as a message.")
        .blank()
        .field(
            "⚡",
            "Rate Limits",
            &format!(
                "{} requests per {} seconds",
                settings.max_requests,
                settings.window.as_secs()
            ),
        )
        .field("🔒", "Privacy", "No data stored, secure searches only");

    Screen {
        text: msg.build(),
        menu: Menu::Help,
    }
}

pub fn instructions() -> Screen {
    let mut msg = MessageBuilder::new();
    msg.title("🔍 Phone Number Lookup")
        .blank()
        .line("📱 Ready to search? Simply send me any phone number!")
        .blank()
        .title("📋 Instructions:")
        .line("1️⃣ Send the phone number in any format")
        .line("2️⃣ Wait for results (usually a few seconds)")
        .line("3️⃣ Review the report")
        .blank()
        .title("💡 Example Numbers:")
        .code_bullet("+1234567890", None)
        .code_bullet("9876543210", None)
        .code_bullet("+91-987-654-3210", None)
        .blank()
        .title("⚠️ Important Notes:")
        .bullet("Use only for legitimate purposes")
        .bullet("Respect privacy and local laws")
        .bullet("Rate limited for fair usage");

    Screen {
        text: msg.build(),
        menu: Menu::Instructions,
    }
}

pub fn examples() -> Screen {
    let mut msg = MessageBuilder::new();
    msg.title("💡 Usage Examples")
        .blank()
        .title("🇮🇳 Indian Numbers:")
        .code_bullet("9876543210", None)
        .code_bullet("+91 9876543210", None)
        .code_bullet("+91-987-654-3210", None)
        .blank()
        .title("🇺🇸 US Numbers:")
        .code_bullet("1234567890", None)
        .code_bullet("+1 234 567 8900", None)
        .code_bullet("(234) 567-8900", None)
        .blank()
        .title("🌍 International:")
        .code_bullet("+44 7911 123456", Some("UK"))
        .code_bullet("+86 138 0013 8000", Some("China"))
        .code_bullet("+33 1 42 86 83 26", Some("France"))
        .blank()
        .title("✅ What You'll Get:")
        .bullet("👤 Full name and father's name")
        .bullet("🏠 Address details")
        .bullet("📞 Alternative phone numbers")
        .bullet("🌐 Network circle")
        .bullet("🆔 Associated ID numbers")
        .blank()
        .line("🚀 Try it: send any number now!");

    Screen {
        text: msg.build(),
        menu: Menu::Examples,
    }
}

/// Status report. The API endpoint is only shown to admins.
pub fn status(snapshot: &StatusSnapshot, settings: &BotSettings, is_admin: bool) -> Screen {
    let mut msg = MessageBuilder::new();
    msg.title("📊 System Status")
        .blank()
        .field("🤖", "Bot Status", "✅ Online")
        .field(
            "⚡",
            "API Status",
            if snapshot.api_online {
                "✅ Online"
            } else {
                "❌ Offline"
            },
        )
        .field("🕐", "Last Check", &display_time(snapshot.checked_at))
        .blank()
        .title("📈 Rate Limits:")
        .bullet(&format!(
            "Max requests: {} per {}",
            settings.max_requests,
            seconds(settings.window)
        ))
        .bullet(&format!("API timeout: {}", seconds(settings.lookup_timeout)))
        .blank()
        .title("🔧 Configuration:");

    if is_admin {
        msg.bullet(&format!(
            "API Endpoint: {}",
            endpoint_host(&settings.api_endpoint)
        ));
    }
    msg.bullet(&format!("Log Level: {}", settings.log_level));

    Screen {
        text: msg.build(),
        menu: Menu::Status,
    }
}

pub fn searching(number: &str) -> String {
    format!(
        "{} {}{}",
        escape("🔍 Searching for information about"),
        code(number),
        escape("...")
    )
}

pub fn rate_limited(
    max_requests: usize,
    window: Duration,
    retry_after: Option<Duration>,
) -> String {
    let mut msg = MessageBuilder::new();
    msg.title("⏰ Rate Limit Exceeded")
        .blank()
        .line(&format!(
            "You can only make {} requests per {} seconds.",
            max_requests,
            window.as_secs()
        ))
        .blank();

    match retry_after {
        // Rounded up to whole seconds.
        Some(wait) => msg.line(&format!(
            "Please wait {} before making another request.",
            seconds(wait + Duration::from_millis(999))
        )),
        None => msg.line("Please wait before making another request."),
    };
    msg.build()
}

pub fn not_understood() -> String {
    escape("❓ I didn't understand that. Please send a phone number or use /help for more information.")
}

pub fn lookup_usage() -> String {
    format!(
        "{}\n\n{} {}",
        escape("❌ Please provide a phone number."),
        escape("Example:"),
        code("/lookup +1234567890")
    )
}

pub fn lookup_failed(reason: &str) -> String {
    escape(&format!("❌ Lookup failed: {}", reason))
}

pub fn checking_status() -> String {
    escape("🔍 Checking system status...")
}

pub fn apology() -> String {
    escape("❌ An error occurred. Please try again later.")
}

fn seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs())
}
