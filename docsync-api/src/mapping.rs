//! Path mappings
//!
//! A path mapping pairs a local share name with a remote drive folder. The
//! share name lands on a Windows-compatible filesystem, so it is validated
//! client-side before the form is submitted.

use serde::{Deserialize, Serialize};

/// One configured mapping as listed by the service
#[derive(Debug, Clone, Deserialize)]
pub struct PathMapping {
    pub id: i64,
    pub smb_name: String,
    #[serde(default)]
    pub remote_path: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub drive_id: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// Detail record used to preload the form when editing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathMappingDetails {
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub drive_id: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Form body for `/add-path-mapping`
///
/// `old_smb_id` stays empty when adding; it carries the mapping id when
/// editing an existing one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PathMappingForm {
    pub smb_name: String,
    pub remote_path: String,
    pub folder_id: String,
    pub drive_id: String,
    pub web_url: String,
    pub old_smb_id: String,
}

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    "FAILED-DOCUMENTS",
];

/// Checks a share name against Windows naming rules
///
/// Rejects empty or over-long names, `< > : " / \ | ? *` and control
/// characters, reserved device names, and names ending in a dot or space.
pub fn validate_share_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 255 {
        return false;
    }
    if RESERVED_NAMES.contains(&name.to_ascii_uppercase().as_str()) {
        return false;
    }
    if name
        .chars()
        .any(|c| matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control())
    {
        return false;
    }
    if name.ends_with('.') || name.ends_with(' ') {
        return false;
    }
    if name.chars().all(|c| c == '.' || c == ' ') {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_share_name("Invoices"));
        assert!(validate_share_name("scans 2024"));
        assert!(validate_share_name("a.b.c"));
    }

    #[test]
    fn rejects_forbidden_characters() {
        for name in ["a<b", "a>b", "a:b", "a\"b", "a/b", "a\\b", "a|b", "a?b", "a*b"] {
            assert!(!validate_share_name(name), "{name} should be rejected");
        }
        assert!(!validate_share_name("tab\tname"));
    }

    #[test]
    fn rejects_reserved_names_case_insensitively() {
        assert!(!validate_share_name("CON"));
        assert!(!validate_share_name("con"));
        assert!(!validate_share_name("Lpt1"));
        assert!(!validate_share_name("failed-documents"));
        // Reserved only as the whole name
        assert!(validate_share_name("console"));
    }

    #[test]
    fn rejects_trailing_dot_or_space_and_empty() {
        assert!(!validate_share_name(""));
        assert!(!validate_share_name("name."));
        assert!(!validate_share_name("name "));
        assert!(!validate_share_name("..."));
        assert!(!validate_share_name("   "));
    }

    #[test]
    fn rejects_over_long_names() {
        let long = "a".repeat(256);
        assert!(!validate_share_name(&long));
        let ok = "a".repeat(255);
        assert!(validate_share_name(&ok));
    }
}
