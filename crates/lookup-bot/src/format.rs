//! Lookup report rendering.

use crate::markdown::{truncate, MessageBuilder};
use crate::phone;
use chrono::{DateTime, Utc};
use lookup_client::{ContactRecord, LookupPayload};
use thiserror::Error;
use tracing::warn;

/// Telegram's limit on message length, in characters.
pub const MESSAGE_LIMIT: usize = 4096;

/// Longest record value shown, before escaping.
pub const MAX_FIELD_CHARS: usize = 256;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━";
const TITLE: &str = "🔍 Lookup Results";

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("report is {len} characters, limit is {limit}")]
    TooLong { len: usize, limit: usize },
}

/// Render the report for a lookup. Never fails: a report that cannot be
/// rendered is replaced by a short fallback.
pub fn format_report(number: &str, payload: &LookupPayload, searched_at: DateTime<Utc>) -> String {
    match payload {
        LookupPayload::Empty => summary(number, "No information found", searched_at),
        LookupPayload::Malformed => summary(number, "No valid information found", searched_at),
        LookupPayload::Record(record) => match render_record(number, record, searched_at) {
            Ok(report) => report,
            Err(e) => {
                warn!("Error formatting lookup result: {}", e);
                fallback(number, searched_at)
            }
        },
    }
}

pub fn display_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn render_record(
    number: &str,
    record: &ContactRecord,
    searched_at: DateTime<Utc>,
) -> Result<String, FormatError> {
    let mut msg = MessageBuilder::new();
    msg.title(TITLE)
        .line(RULE)
        .code_field("📱", "Number", number)
        .field("✅", "Status", "Information Found")
        .blank();

    if let Some(name) = &record.name {
        msg.field("👤", "Name", &value(name));
    }
    if let Some(father_name) = &record.father_name {
        msg.field("👨", "Father's Name", &value(father_name));
    }
    if let Some(mobile) = &record.primary_mobile {
        if phone::normalize(mobile) != number {
            msg.code_field("📞", "Primary Mobile", &value(mobile));
        }
    }
    if let Some(alt_mobile) = &record.alt_mobile {
        msg.code_field("📱", "Alternative Mobile", &value(alt_mobile));
    }
    if let Some(email) = &record.email {
        msg.field("📧", "Email", &value(email));
    }
    if let Some(address) = &record.address {
        let address = clean_address(address);
        if !address.is_empty() {
            msg.blank()
                .field("🏠", "Address", "")
                .line(&format!("   {}", value(&address)));
        }
    }
    if let Some(circle) = &record.network_circle {
        msg.field("🌐", "Network Circle", &value(circle));
    }
    if let Some(id_number) = &record.id_number {
        msg.code_field("🆔", "ID Number", &value(id_number));
    }
    if let Some(database_id) = &record.database_id {
        msg.code_field("🔢", "Database ID", &value(database_id));
    }
    if let Some(raw) = &record.raw_response {
        msg.field("📄", "Response", &value(raw));
    }

    msg.blank()
        .line(RULE)
        .field("🕐", "Search Time", &display_time(searched_at))
        .blank()
        .field(
            "⚠️",
            "Disclaimer",
            "Use this information responsibly and in accordance with local laws.",
        )
        .line("🔒 This data is sourced from publicly available information.");

    let len = msg.char_count();
    if len > MESSAGE_LIMIT {
        return Err(FormatError::TooLong {
            len,
            limit: MESSAGE_LIMIT,
        });
    }
    Ok(msg.build())
}

/// `!` separators become spaces and whitespace runs collapse.
fn clean_address(address: &str) -> String {
    address
        .replace('!', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn value(text: &str) -> String {
    truncate(text.trim(), MAX_FIELD_CHARS)
}

fn summary(number: &str, status: &str, searched_at: DateTime<Utc>) -> String {
    let mut msg = MessageBuilder::new();
    msg.title(TITLE)
        .blank()
        .code_field("📱", "Number", number)
        .field("📊", "Status", status)
        .field("🕐", "Searched", &display_time(searched_at))
        .blank()
        .line("ℹ️ This number may be private or not in our database.");
    msg.build()
}

fn fallback(number: &str, searched_at: DateTime<Utc>) -> String {
    let mut msg = MessageBuilder::new();
    msg.title(TITLE)
        .blank()
        .code_field("📱", "Number", &truncate(number, MAX_FIELD_CHARS))
        .field("❌", "Status", "Error formatting results")
        .field("🕐", "Searched", &display_time(searched_at))
        .blank()
        .line("Raw data available but couldn't be formatted properly.");
    msg.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::has_unescaped_reserved;
    use chrono::TimeZone;

    const NUMBER: &str = "9876543210";

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn record(json: serde_json::Value) -> LookupPayload {
        LookupPayload::from_value(json)
    }

    #[test]
    fn test_empty_payloads() {
        for payload in [
            record(serde_json::json!([])),
            record(serde_json::json!({})),
            record(serde_json::Value::Null),
        ] {
            let report = format_report(NUMBER, &payload, at());
            assert!(report.contains("No information found"), "{report}");
        }
    }

    #[test]
    fn test_malformed_payloads() {
        for payload in [
            record(serde_json::json!([1, 2])),
            record(serde_json::json!(["text"])),
            record(serde_json::json!(42)),
        ] {
            let report = format_report(NUMBER, &payload, at());
            assert!(report.contains("No valid information found"), "{report}");
        }
    }

    #[test]
    fn test_full_record_in_order() {
        let payload = record(serde_json::json!({
            "name": "Ravi Kumar",
            "father_name": "Suresh Kumar",
            "mobile": "9123456780",
            "alt_mobile": "9000000001",
            "email": "ravi.k@example.com",
            "address": "12!MG Road!!  Bangalore ! 560001",
            "circle": "AIRTEL KARNATAKA",
            "id_number": 123412341234u64,
            "id": 77
        }));

        let report = format_report(NUMBER, &payload, at());

        let order = [
            "*Name:* Ravi Kumar",
            "*Father's Name:* Suresh Kumar",
            "*Primary Mobile:* `9123456780`",
            "*Alternative Mobile:* `9000000001`",
            "*Email:* ravi\\.k@example\\.com",
            "   12 MG Road Bangalore 560001",
            "*Network Circle:* AIRTEL KARNATAKA",
            "*ID Number:* `123412341234`",
            "*Database ID:* `77`",
            "*Search Time:* 2024\\-01\\-02 03:04:05 UTC",
            "*Disclaimer:*",
        ];
        let mut cursor = 0;
        for expected in order {
            let pos = report[cursor..]
                .find(expected)
                .unwrap_or_else(|| panic!("missing or out of order: {expected}\n{report}"));
            cursor += pos + expected.len();
        }
        assert!(report.contains("*Number:* `9876543210`"));
    }

    #[test]
    fn test_primary_mobile_hidden_when_same_as_query() {
        let payload = record(serde_json::json!({ "name": "A", "mobile": "+98765 43210" }));
        let report = format_report(NUMBER, &payload, at());
        assert!(!report.contains("Primary Mobile"));

        let payload = record(serde_json::json!([{ "name": "A", "mobile": 9876543210u64 }]));
        let report = format_report(NUMBER, &payload, at());
        assert!(!report.contains("Primary Mobile"));
    }

    #[test]
    fn test_blank_fields_skipped() {
        let payload = record(serde_json::json!({
            "name": "A",
            "email": "   ",
            "address": " ! ! ",
            "circle": ""
        }));
        let report = format_report(NUMBER, &payload, at());
        assert!(!report.contains("Email"));
        assert!(!report.contains("Address"));
        assert!(!report.contains("Network Circle"));
    }

    #[test]
    fn test_raw_response() {
        let payload = LookupPayload::from_body("Service temporarily unavailable.");
        let report = format_report(NUMBER, &payload, at());
        assert!(report.contains("*Response:* Service temporarily unavailable\\."));
    }

    #[test]
    fn test_values_escaped_and_bounded() {
        let payload = record(serde_json::json!({
            "name": "*bold* [link](http://x.y) _it_ `code` ~s~ >q #h +p -m =e |b {c} !x \\",
        }));
        let report = format_report(NUMBER, &payload, at());
        assert!(!has_unescaped_reserved(&report.replace("*Name:*", "")
            .replace("`9876543210`", "")
            .replace("*Number:*", "")
            .replace("*Status:*", "")
            .replace("*Search Time:*", "")
            .replace("*Disclaimer:*", "")
            .replace("*🔍 Lookup Results*", "")));

        let long = "x".repeat(1000);
        let payload = record(serde_json::json!({ "name": long }));
        let report = format_report(NUMBER, &payload, at());
        assert!(report.contains(&format!("{}\\.\\.\\.", "x".repeat(MAX_FIELD_CHARS - 3))));
        assert!(!report.contains(&"x".repeat(MAX_FIELD_CHARS)));
    }

    #[test]
    fn test_oversized_report_falls_back() {
        let huge = "!.".repeat(200);
        let payload = record(serde_json::json!({
            "name": huge,
            "father_name": huge,
            "mobile": huge,
            "alt_mobile": huge,
            "email": huge,
            "address": "a.".repeat(200),
            "circle": huge,
            "id_number": huge,
            "id": huge,
        }));

        let report = format_report(NUMBER, &payload, at());
        assert!(report.contains("Error formatting results"));
        assert!(report.chars().count() < MESSAGE_LIMIT);
    }
}
