//! Structured Logging with Sensitive Data Redaction
//!
//! Lines go to stderr as `[timestamp] LEVEL [module] message | k=v ...`.
//! Field values are redacted by key:
//! - Secret material (private keys, seeds) and owner signatures are fully hidden
//! - Addresses and public keys are shortened
//! - Large encoded blobs (bcs, payload, message) are shortened with their length

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Once;

/// Environment variable read once to seed the level threshold
pub const LOG_ENV_VAR: &str = "MSAFE_LOG";

static LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INIT_FROM_ENV: Once = Once::new();

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    /// Threshold only; no entry is logged at this level
    Off = 4,
}

impl LogLevel {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Set the minimum level that gets written
pub fn set_level(level: LogLevel) {
    // An explicit call wins over the environment
    INIT_FROM_ENV.call_once(|| {});
    LEVEL.store(level as u8, Ordering::SeqCst);
}

pub fn level() -> LogLevel {
    INIT_FROM_ENV.call_once(|| {
        if let Some(level) = std::env::var(LOG_ENV_VAR).ok().and_then(|v| v.parse::<LogLevel>().ok()) {
            LEVEL.store(level as u8, Ordering::SeqCst);
        }
    });
    LogLevel::from_u8(LEVEL.load(Ordering::SeqCst))
}

pub fn is_enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level >= self::level()
}

/// Structured log entry
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the log entry (auto-redacts sensitive data)
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let value_str = value.to_string();
        let redacted = redact_if_sensitive(key, &value_str);
        self.fields.push((key, redacted));
        self
    }

    /// Add a field with explicit redaction
    pub fn redacted_field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let redacted = redact_value(&value.to_string());
        self.fields.push((key, redacted));
        self
    }

    pub fn render(&self) -> String {
        let fields_str = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        if fields_str.is_empty() {
            format!("[{}] {} [{}] {}", timestamp, self.level, self.module, self.message)
        } else {
            format!("[{}] {} [{}] {} | {}", timestamp, self.level, self.module, self.message, fields_str)
        }
    }

    /// Log the entry
    pub fn log(self) {
        if !is_enabled(self.level) {
            return;
        }
        eprintln!("{}", self.render());
    }
}

/// Redact a value if the key suggests it's sensitive
fn redact_if_sensitive(key: &str, value: &str) -> String {
    let key_lower = key.to_lowercase();

    let fully_redacted_keys = ["private_key", "privatekey", "secret", "seed", "signing_key", "signature"];
    if fully_redacted_keys.iter().any(|k| key_lower.contains(k)) {
        return redact_value(value);
    }

    let blob_keys = ["bcs", "payload", "message", "bytes"];
    if blob_keys.iter().any(|k| key_lower.contains(k)) {
        return redact_blob(value);
    }

    let address_keys = ["address", "sender", "public_key", "signer", "owner"];
    if address_keys.iter().any(|k| key_lower.contains(k)) {
        return redact_address(value);
    }

    value.to_string()
}

/// Fully redact a sensitive value
fn redact_value(value: &str) -> String {
    if value.is_empty() {
        return "[EMPTY]".to_string();
    }

    let len = value.len();
    if len <= 4 {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED:{}chars]", len)
    }
}

/// Partially redact an address (show first 8 and last 4 chars)
fn redact_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }

    let prefix_len = if trimmed.starts_with("0x") { 8 } else { 6 };
    let suffix_len = 4;
    if !trimmed.is_ascii() || trimmed.len() <= prefix_len + suffix_len + 3 {
        return trimmed.to_string();
    }

    let prefix = &trimmed[..prefix_len];
    let suffix = &trimmed[trimmed.len() - suffix_len..];
    format!("{}...{}", prefix, suffix)
}

/// Shorten an encoded blob, keeping its head and total length
fn redact_blob(blob: &str) -> String {
    let trimmed = blob.trim();
    if !trimmed.is_ascii() || trimmed.len() <= 32 {
        return trimmed.to_string();
    }
    format!("{}...[{}chars]", &trimmed[..16], trimmed.len())
}

/// Convenience macro for debug logging
#[macro_export]
macro_rules! log_debug {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Convenience macro for info logging
#[macro_export]
macro_rules! log_info {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Info,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Info,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Convenience macro for warning logging
#[macro_export]
macro_rules! log_warn {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Convenience macro for error logging
#[macro_export]
macro_rules! log_error {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Error,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Error,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_value() {
        assert_eq!(redact_value(""), "[EMPTY]");
        assert_eq!(redact_value("abc"), "[REDACTED]");
        assert_eq!(redact_value("secret_key_12345"), "[REDACTED:16chars]");
    }

    #[test]
    fn test_redact_address() {
        let addr = "0xaa90e0d9d16b63ba4a289fb0dc8d1b454058b21c9b5c76864f825d5c1f32582e";
        let redacted = redact_address(addr);
        assert_eq!(redacted, "0xaa90e0...582e");

        assert_eq!(redact_address("0x1"), "0x1");
    }

    #[test]
    fn test_redact_blob() {
        let blob = "ab".repeat(100);
        let redacted = redact_blob(&blob);
        assert!(redacted.starts_with("abababababababab..."));
        assert!(redacted.ends_with("[200chars]"));

        assert_eq!(redact_blob("0x0102"), "0x0102");
    }

    #[test]
    fn test_redact_if_sensitive() {
        assert!(redact_if_sensitive("private_key", "secret123").contains("REDACTED"));
        assert!(redact_if_sensitive("raw_bcs", &"00".repeat(64)).contains("[128chars]"));
        assert!(redact_if_sensitive("expected", "0x0000000000000000000000000000000000000000000000000000000000000001")
            .starts_with("0x000000"));
        assert_eq!(redact_if_sensitive("field", "sequence_number"), "sequence_number");
    }

    #[test]
    fn test_signatures_are_fully_redacted() {
        let signature = format!("0x{}", "ab".repeat(64));
        assert_eq!(redact_if_sensitive("signature", &signature), "[REDACTED:130chars]");
        assert_eq!(redact_if_sensitive("owner_signature", "0x0102"), "[REDACTED:6chars]");
        // signing messages are blobs, not secrets
        assert!(redact_if_sensitive("signing_message", &signature).starts_with("0xabababababab"));
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("off".parse::<LogLevel>(), Ok(LogLevel::Off));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_entry_fields() {
        let entry = LogEntry::new(LogLevel::Info, "test", "Test message")
            .field("amount", "100")
            .field("seed", "correct horse battery staple");

        let seed = entry.fields.iter().find(|(k, _)| *k == "seed");
        assert!(seed.is_some_and(|(_, v)| v.contains("REDACTED")));

        let line = entry.render();
        assert!(line.contains("INFO [test] Test message | amount=100"));
    }
}
