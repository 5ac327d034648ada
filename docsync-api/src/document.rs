//! Document cards and update events
//!
//! The wire types for the dashboard: the card projection of a tracked
//! document, the partial update events pushed over the stream, and the pure
//! rendering rules (progress segments, status classification, badge
//! contrast) that must behave identically no matter how often they run.
//!
//! Field names follow the service. An update event is a patch: every field
//! except `id` is optional, and an absent field means "leave it alone".
//! The service pads sparse updates with empty strings and zeroes, so those
//! are treated as absent too.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of discrete progress segments on a card
pub const PROGRESS_SEGMENT_COUNT: usize = 5;

/// Visual state of a single progress segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Neutral,
    Active,
    Completed,
    Failed,
}

/// Renders a progress step into segment states
///
/// The step is clamped to [-1, 5]. -1 marks every segment failed, 5 marks
/// every segment completed, anything else lights the first `step` segments.
/// Idempotent: the output depends on the clamped step alone.
pub fn progress_segments(step: i32) -> [SegmentState; PROGRESS_SEGMENT_COUNT] {
    let step = step.clamp(-1, 5);
    match step {
        -1 => [SegmentState::Failed; PROGRESS_SEGMENT_COUNT],
        5 => [SegmentState::Completed; PROGRESS_SEGMENT_COUNT],
        partial => {
            let mut segments = [SegmentState::Neutral; PROGRESS_SEGMENT_COUNT];
            for (index, segment) in segments.iter_mut().enumerate() {
                if (index as i32) < partial {
                    *segment = SegmentState::Active;
                }
            }
            segments
        }
    }
}

/// Text color that contrasts with a badge background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contrast {
    Black,
    White,
}

/// Picks black or white text for a `#RRGGBB` background
///
/// Uses the YIQ luma approximation `Y = 0.299R + 0.587G + 0.114B`; black
/// text iff `Y >= 128`. Colors that fail to parse get white text.
pub fn contrast_yiq(hex: &str) -> Contrast {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Contrast::White;
    }
    let channel = |range: std::ops::Range<usize>| u32::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => {
            let yiq = (r * 299 + g * 587 + b * 114) / 1000;
            if yiq >= 128 {
                Contrast::Black
            } else {
                Contrast::White
            }
        }
        _ => Contrast::White,
    }
}

/// Broad classification of a document's status string
///
/// The service reports free-form phases ("OCR Processing", "Sync Pending",
/// ...); the dashboard only distinguishes these broad kinds. Matching is a
/// case-insensitive substring check, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Pending,
    Processing,
    Completed,
    Failed,
    Deleted,
    InvalidFile,
    Syncing,
}

impl StatusKind {
    pub fn classify(status: &str) -> Self {
        let status = status.to_ascii_lowercase();
        if status.contains("pending") {
            StatusKind::Pending
        } else if status.contains("processing") {
            StatusKind::Processing
        } else if status.contains("completed") {
            StatusKind::Completed
        } else if status.contains("failed") {
            StatusKind::Failed
        } else if status.contains("deleted") {
            StatusKind::Deleted
        } else if status.contains("invalid file") {
            StatusKind::InvalidFile
        } else if status.contains("syncing") {
            StatusKind::Syncing
        } else {
            StatusKind::Pending
        }
    }
}

/// One colored label on a card, denoting a storage target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: i64,
    pub text: String,
    /// Background color as `#RRGGBB`
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Aggregate counters shown above the card grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub processing_pdfs: u32,
    #[serde(default)]
    pub processed_pdfs: u32,
    #[serde(default)]
    pub latest_processing_timestamp: Option<String>,
    #[serde(default)]
    pub latest_completed_timestamp: Option<String>,
}

/// Client-side projection of one tracked document
///
/// Mirrors server state; the reconciler owns the only copies and mutates
/// them in place as update events arrive.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentCard {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub local_modified: Option<String>,
    #[serde(default)]
    pub file_status: Option<String>,
    #[serde(default)]
    pub status_progressbar: Option<i32>,
    #[serde(default)]
    pub pdf_pages: Option<u32>,
    #[serde(default)]
    pub previewimage_path: Option<String>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub current_uploading: Option<u32>,
    #[serde(default)]
    pub current_upload_target: Option<String>,
}

impl DocumentCard {
    /// An empty card; the reconciler fills it from the first update event
    pub fn new(id: i64) -> Self {
        Self {
            id,
            file_name: None,
            local_modified: None,
            file_status: None,
            status_progressbar: None,
            pdf_pages: None,
            previewimage_path: None,
            badges: Vec::new(),
            current_uploading: None,
            current_upload_target: None,
        }
    }

    /// Applies the present fields of an update, leaving the rest untouched
    ///
    /// Empty or whitespace-only strings and a zero page count are treated as
    /// absent. A present `badges` array replaces the badge list wholesale,
    /// preserving the event's order. A progress step of 0 is a real value.
    pub fn apply(&mut self, update: &CardUpdate) {
        if let Some(name) = non_empty(&update.file_name) {
            self.file_name = Some(name.to_string());
        }
        if let Some(modified) = non_empty(&update.local_modified) {
            self.local_modified = Some(modified.to_string());
        }
        if let Some(status) = non_empty(&update.file_status) {
            self.file_status = Some(status.to_string());
        }
        if let Some(step) = update.status_progressbar {
            self.status_progressbar = Some(step.clamp(-1, 5));
        }
        if let Some(pages) = update.pdf_pages {
            if pages > 0 {
                self.pdf_pages = Some(pages);
            }
        }
        if let Some(path) = non_empty(&update.previewimage_path) {
            self.previewimage_path = Some(path.to_string());
        }
        if let Some(badges) = &update.badges {
            self.badges = badges.clone();
        }
        if let Some(current) = update.current_uploading {
            self.current_uploading = Some(current);
        }
        if let Some(target) = non_empty(&update.current_upload_target) {
            self.current_upload_target = Some(target.to_string());
        }
    }

    /// Broad status classification, defaulting to pending
    pub fn status_kind(&self) -> StatusKind {
        self.file_status
            .as_deref()
            .map(StatusKind::classify)
            .unwrap_or(StatusKind::Pending)
    }

    /// The text on the status line
    ///
    /// While the document is syncing this composes an upload progress line
    /// instead of echoing the raw status; the target total falls back to the
    /// number of storage-target badges.
    pub fn status_line(&self) -> String {
        let raw = self.file_status.as_deref().unwrap_or("N/A");
        if !raw.eq_ignore_ascii_case("syncing") {
            return raw.to_string();
        }
        let current = self.current_uploading.unwrap_or(1);
        let total = (self.badges.len() as u32).max(current).max(1);
        match self.current_upload_target.as_deref() {
            Some(target) => format!("Uploading {current}/{total} to {target}"),
            None => raw.to_string(),
        }
    }

    /// Progress step for rendering; the service seeds new cards at step 1
    pub fn progress_step(&self) -> i32 {
        self.status_progressbar.unwrap_or(1)
    }

    /// Page count label, "N/A" when unknown
    pub fn pages_label(&self) -> String {
        match self.pdf_pages {
            Some(pages) if pages > 0 => pages.to_string(),
            _ => "N/A".to_string(),
        }
    }

    pub fn title(&self) -> &str {
        self.file_name.as_deref().unwrap_or("N/A")
    }
}

/// Partial update for one card, pushed over the event stream
///
/// Only `id` is required. Some service versions stringify the id, so both
/// encodings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardUpdate {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub local_modified: Option<String>,
    #[serde(default)]
    pub file_status: Option<String>,
    #[serde(default)]
    pub status_progressbar: Option<i32>,
    #[serde(default)]
    pub pdf_pages: Option<u32>,
    #[serde(default)]
    pub previewimage_path: Option<String>,
    #[serde(default)]
    pub badges: Option<Vec<Badge>>,
    #[serde(default)]
    pub current_uploading: Option<u32>,
    #[serde(default)]
    pub current_upload_target: Option<String>,
    #[serde(default)]
    pub dashboard_data: Option<DashboardStats>,
}

impl CardUpdate {
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

/// Accepts the id as a JSON number or a decimal string
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value: Value = Deserialize::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::custom("invalid number for id")),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| Error::custom("invalid string for id")),
        _ => Err(Error::custom("id must be a number or string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn progress_segments_terminal_failed() {
        assert_eq!(progress_segments(-1), [SegmentState::Failed; 5]);
    }

    #[test]
    fn progress_segments_terminal_completed() {
        assert_eq!(progress_segments(5), [SegmentState::Completed; 5]);
    }

    #[test]
    fn progress_segments_partial() {
        let segments = progress_segments(3);
        assert_eq!(
            segments,
            [
                SegmentState::Active,
                SegmentState::Active,
                SegmentState::Active,
                SegmentState::Neutral,
                SegmentState::Neutral,
            ]
        );
    }

    #[test]
    fn progress_segments_idempotent() {
        for step in -1..=5 {
            assert_eq!(progress_segments(step), progress_segments(step));
        }
    }

    #[test]
    fn progress_segments_clamps_out_of_range() {
        assert_eq!(progress_segments(-7), progress_segments(-1));
        assert_eq!(progress_segments(42), progress_segments(5));
    }

    #[test]
    fn contrast_black_background() {
        assert_eq!(contrast_yiq("#000000"), Contrast::White);
    }

    #[test]
    fn contrast_white_background() {
        assert_eq!(contrast_yiq("#FFFFFF"), Contrast::Black);
    }

    #[test]
    fn contrast_mid_gray_is_exactly_on_the_boundary() {
        // 128 * (299 + 587 + 114) / 1000 == 128, and 128 >= 128 picks black
        assert_eq!(contrast_yiq("#808080"), Contrast::Black);
    }

    #[test]
    fn contrast_tolerates_missing_hash_and_garbage() {
        assert_eq!(contrast_yiq("FFFFFF"), Contrast::Black);
        assert_eq!(contrast_yiq("not-a-color"), Contrast::White);
        assert_eq!(contrast_yiq(""), Contrast::White);
    }

    #[test]
    fn classify_matches_first_substring() {
        assert_eq!(StatusKind::classify("OCR Pending"), StatusKind::Pending);
        assert_eq!(StatusKind::classify("Sync Pending"), StatusKind::Pending);
        assert_eq!(
            StatusKind::classify("File Name Processing"),
            StatusKind::Processing
        );
        assert_eq!(StatusKind::classify("Completed"), StatusKind::Completed);
        assert_eq!(StatusKind::classify("Sync Failed"), StatusKind::Failed);
        assert_eq!(StatusKind::classify("Deleted"), StatusKind::Deleted);
        assert_eq!(
            StatusKind::classify("Invalid File"),
            StatusKind::InvalidFile
        );
        assert_eq!(StatusKind::classify("Syncing"), StatusKind::Syncing);
        assert_eq!(StatusKind::classify("File Not Ready"), StatusKind::Pending);
    }

    #[test]
    fn update_accepts_string_id() {
        let update: CardUpdate =
            serde_json::from_value(json!({"id": "17", "file_name": "scan.pdf"})).unwrap();
        assert_eq!(update.id, 17);
        assert_eq!(update.file_name.as_deref(), Some("scan.pdf"));
    }

    #[test]
    fn apply_ignores_blank_fields() {
        let mut card = DocumentCard::new(3);
        card.file_name = Some("scan.pdf".into());
        card.pdf_pages = Some(4);

        let update: CardUpdate =
            serde_json::from_value(json!({"id": 3, "file_name": "  ", "pdf_pages": 0})).unwrap();
        card.apply(&update);

        assert_eq!(card.file_name.as_deref(), Some("scan.pdf"));
        assert_eq!(card.pdf_pages, Some(4));
    }

    #[test]
    fn apply_replaces_badges_in_event_order() {
        let badge = |id: i64, text: &str| Badge {
            id,
            text: text.into(),
            color: "#88B04B".into(),
            url: None,
            title: None,
        };

        let mut card = DocumentCard::new(1);
        card.badges = vec![badge(1, "A"), badge(2, "B"), badge(3, "C")];

        let mut update = CardUpdate {
            id: 1,
            ..CardUpdate::default()
        };
        update.badges = Some(vec![badge(3, "C"), badge(1, "A")]);
        card.apply(&update);

        let texts: Vec<&str> = card.badges.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["C", "A"]);
    }

    #[test]
    fn apply_accepts_step_zero() {
        let mut card = DocumentCard::new(9);
        card.status_progressbar = Some(4);

        let update: CardUpdate =
            serde_json::from_value(json!({"id": 9, "status_progressbar": 0})).unwrap();
        card.apply(&update);

        assert_eq!(card.status_progressbar, Some(0));
    }

    #[test]
    fn status_line_composes_upload_progress() {
        let mut card = DocumentCard::new(5);
        card.file_status = Some("Syncing".into());
        card.current_uploading = Some(2);
        card.current_upload_target = Some("Invoices".into());
        card.badges = vec![
            Badge {
                id: 1,
                text: "Invoices".into(),
                color: "#FF6F61".into(),
                url: None,
                title: None,
            },
            Badge {
                id: 2,
                text: "Archive".into(),
                color: "#6B5B95".into(),
                url: None,
                title: None,
            },
            Badge {
                id: 3,
                text: "Tax".into(),
                color: "#88B04B".into(),
                url: None,
                title: None,
            },
        ];

        assert_eq!(card.status_line(), "Uploading 2/3 to Invoices");
    }

    #[test]
    fn status_line_echoes_non_syncing_status() {
        let mut card = DocumentCard::new(5);
        card.file_status = Some("OCR Processing".into());
        assert_eq!(card.status_line(), "OCR Processing");
    }
}
