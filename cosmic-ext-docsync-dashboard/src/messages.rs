use docsync_api::{
    CardUpdate, DashboardStats, DocumentCard, DriveItem, FileNamingLogs, OllamaProbe, PathMapping,
    PathMappingDetails,
};

use crate::Page;

/// File-naming backend selected in the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingMethod {
    OpenAi,
    Ollama,
    Disabled,
}

/// Main application message type
#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(Page),

    // Event stream lifecycle
    StreamConnected,
    StreamDisconnected,
    StreamEvent(CardUpdate),

    // Dashboard data
    SnapshotLoaded(Vec<DocumentCard>),
    StatusLoaded(DashboardStats),
    PreviewLoaded(i64, String, cosmic::iced::widget::image::Handle), // id, path, image
    OpenUrl(String),

    // Path mappings
    MappingsLoaded(Vec<PathMapping>),
    RefreshMappings,
    StartAddMapping,
    StartEditMapping(i64),
    MappingDetailsLoaded(i64, PathMappingDetails),
    CancelMappingForm,
    ShareNameInput(String),
    SubmitMapping,
    MappingSaved,
    MappingSaveFailed(String),
    DeleteMapping(i64),
    ConfirmDeleteMapping(i64),
    MappingDeleted,

    // Remote directory browser
    ToggleRemoteBrowser,
    BrowserLoaded(u64, Vec<DriveItem>),   // request token, items
    BrowserLoadFailed(u64, String),       // request token, response body
    SelectFolder(usize),                  // index into the listing
    DescendFolder(usize),                 // index into the listing
    BrowserBack,

    // OneDrive settings
    ClientIdInput(String),
    SaveOneDriveSettings,
    OneDriveSettingsSaved(String),

    // File naming settings
    SelectNamingMethod(NamingMethod),
    OpenAiKeyInput(String),
    SaveOpenAiSettings,
    OpenAiSettingsSaved(String),
    DeleteOpenAiSettings,
    OllamaSchemeSelected(usize),
    OllamaAddressInput(String),
    OllamaPortInput(String),
    ConnectOllama,
    OllamaProbed(OllamaProbe),
    OllamaProbeFailed(String),
    OllamaModelSelected(usize),
    SaveOllamaSettings,
    OllamaSettingsSaved(String),
    DeleteOllamaSettings,
    DisableFileNaming,
    FileNamingDisabled(String),
    SettingsSaveFailed(String),

    // File naming logs
    ToggleLogsSection,
    RefreshLogs,
    LogsPageRequested(u32),
    LogsFilterSelected(usize),
    LogsLoaded(FileNamingLogs),
    LogsFailed(String),

    // Blocking dialog
    ShowError(String, String), // title, body
    CloseDialog,

    None,
}
