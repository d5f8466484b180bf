use std::path::PathBuf;
use std::time::Duration;

use hoadon_printer::{CodePage, DEFAULT_SETTLE, QrErrorLevel};

use crate::payment::QrImageEndpoint;

/// Characters per line on 80mm paper with the standard font
pub const PAPER_WIDTH: usize = 48;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HOADON_SETTINGS | (none) | Settings JSON file |
/// | HOADON_LOG_LEVEL | info | Log level when RUST_LOG is unset |
/// | HOADON_LOG_JSON | false | JSON log lines |
/// | HOADON_QR_ENDPOINT | https://img.vietqr.io/image | QR image service |
/// | HOADON_QR_TEMPLATE | compact2 | QR image template |
/// | HOADON_QR_MODULE | 8 | QR module size in dots (1-16) |
/// | HOADON_QR_LEVEL | M | QR error correction (L, M, Q, H) |
/// | HOADON_FEED_LINES | 3 | Lines fed before the cut |
/// | HOADON_SETTLE_MS | 500 | Wait before triggering the print dialog |
/// | HOADON_CODE_PAGE | utf-8 | Printer text encoding (WHATWG label) |
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub settings_path: Option<PathBuf>,
    pub log_level: String,
    pub log_json: bool,
    pub qr_endpoint: QrImageEndpoint,
    pub qr_module_size: u8,
    pub qr_level: QrErrorLevel,
    pub feed_lines: u8,
    /// Print surface settle delay
    pub settle: Duration,
    pub code_page: CodePage,
}

impl EngineConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let endpoint = QrImageEndpoint {
            base_url: env_or("HOADON_QR_ENDPOINT", defaults.qr_endpoint.base_url),
            template: env_or("HOADON_QR_TEMPLATE", defaults.qr_endpoint.template),
        };
        let code_page = match std::env::var("HOADON_CODE_PAGE") {
            Ok(label) => CodePage::from_label(&label).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to UTF-8");
                CodePage::UTF8
            }),
            Err(_) => defaults.code_page,
        };

        Self {
            settings_path: std::env::var("HOADON_SETTINGS").ok().map(PathBuf::from),
            log_level: env_or("HOADON_LOG_LEVEL", defaults.log_level),
            log_json: env_parse("HOADON_LOG_JSON").unwrap_or(defaults.log_json),
            qr_endpoint: endpoint,
            qr_module_size: env_parse("HOADON_QR_MODULE")
                .filter(|n| (1..=16).contains(n))
                .unwrap_or(defaults.qr_module_size),
            qr_level: std::env::var("HOADON_QR_LEVEL")
                .ok()
                .and_then(|v| parse_qr_level(&v))
                .unwrap_or(defaults.qr_level),
            feed_lines: env_parse("HOADON_FEED_LINES").unwrap_or(defaults.feed_lines),
            settle: env_parse("HOADON_SETTLE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle),
            code_page,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            log_level: "info".to_string(),
            log_json: false,
            qr_endpoint: QrImageEndpoint::default(),
            qr_module_size: 8,
            qr_level: QrErrorLevel::M,
            feed_lines: 3,
            settle: DEFAULT_SETTLE,
            code_page: CodePage::UTF8,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// `L`, `M`, `Q` or `H`, case-insensitive
pub fn parse_qr_level(s: &str) -> Option<QrErrorLevel> {
    match s.trim().to_ascii_uppercase().as_str() {
        "L" => Some(QrErrorLevel::L),
        "M" => Some(QrErrorLevel::M),
        "Q" => Some(QrErrorLevel::Q),
        "H" => Some(QrErrorLevel::H),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.qr_module_size, 8);
        assert_eq!(c.qr_level, QrErrorLevel::M);
        assert_eq!(c.feed_lines, 3);
        assert_eq!(c.settle, Duration::from_millis(500));
        assert!(c.code_page.is_utf8());
    }

    #[test]
    fn test_parse_qr_level() {
        assert_eq!(parse_qr_level("h"), Some(QrErrorLevel::H));
        assert_eq!(parse_qr_level(" Q "), Some(QrErrorLevel::Q));
        assert_eq!(parse_qr_level("X"), None);
    }
}
