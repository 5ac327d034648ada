mod config;
mod messages;
mod views;

use std::collections::HashMap;

use clap::Parser;
use cosmic::{
    app::{Core, Task},
    iced::{Color, Length, Size, Subscription},
    theme,
    widget::{row, scrollable},
    Application, Element,
};
use docsync_api::{
    ApiClient, CardReconciler, DirectoryBrowser, DriveItemsRequest, EventStream, FileNamingLogs,
    LoadRequest, LogFilter, OllamaProbe, OllamaSettingsForm, PathMapping, PathMappingForm,
    SelectedFolder, UpdateOutcome,
};
use tracing::{info, warn};

use config::Config;
use messages::{Message, NamingMethod};

const APP_ID: &str = "com.github.olafkfreund.DocsyncDashboard";

/// Log rows fetched per page, matching the service's listing
const LOGS_PER_PAGE: u32 = 5;

pub(crate) const ICON_XS: u16 = 12;
pub(crate) const ICON_S: u16 = 16;
pub(crate) const ICON_M: u16 = 24;
pub(crate) const ICON_XL: u16 = 64;

fn main() -> cosmic::iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = cosmic::app::Settings::default().size(Size::new(1100.0, 760.0));
    cosmic::app::run::<DocsyncDashboard>(settings, args)
}

#[derive(Parser, Debug, Clone)]
#[command(name = "cosmic-ext-docsync-dashboard")]
#[command(about = "DocSync dashboard for COSMIC Desktop")]
pub struct Args {
    /// Override the configured backend base URL
    #[arg(long)]
    pub server: Option<String>,
}

/// Navigation pages of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Documents,
    Sync,
    Settings,
}

impl Page {
    fn title(&self) -> &'static str {
        match self {
            Page::Documents => "Documents",
            Page::Sync => "Sync",
            Page::Settings => "Settings",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            Page::Documents => "x-office-document-symbolic",
            Page::Sync => "folder-remote-symbolic",
            Page::Settings => "preferences-system-symbolic",
        }
    }
}

/// Preview image state for one card
#[derive(Debug, Clone)]
pub(crate) struct Preview {
    path: String,
    pub(crate) handle: Option<cosmic::iced::widget::image::Handle>,
}

/// In-progress path-mapping form
#[derive(Debug, Clone, Default)]
pub(crate) struct MappingForm {
    pub(crate) share_name: String,
    pub(crate) old_smb_id: Option<i64>,
    pub(crate) error: Option<String>,
    pub(crate) busy: bool,
}

/// Ollama connection form state
#[derive(Debug, Clone)]
pub(crate) struct OllamaForm {
    pub(crate) scheme_index: usize,
    pub(crate) address: String,
    pub(crate) port: String,
    pub(crate) probe: Option<OllamaProbe>,
    /// Dropdown labels for the probed models, kept alongside `probe`
    pub(crate) model_labels: Vec<String>,
    pub(crate) model_index: usize,
    pub(crate) busy: bool,
    pub(crate) error: Option<String>,
}

pub(crate) const OLLAMA_SCHEMES: &[&str] = &["http", "https"];

impl Default for OllamaForm {
    fn default() -> Self {
        Self {
            scheme_index: 0,
            address: String::new(),
            port: "11434".to_string(),
            probe: None,
            model_labels: Vec::new(),
            model_index: 0,
            busy: false,
            error: None,
        }
    }
}

impl OllamaForm {
    fn scheme(&self) -> &'static str {
        OLLAMA_SCHEMES[self.scheme_index.min(OLLAMA_SCHEMES.len() - 1)]
    }
}

/// Status line under the file-naming section
#[derive(Debug, Clone)]
pub(crate) struct SettingsStatus {
    pub(crate) message: String,
    pub(crate) is_error: bool,
}

/// A blocking dialog replaces the page content until dismissed
#[derive(Debug, Clone)]
pub(crate) enum Dialog {
    Error { title: String, body: String },
    ConfirmDeleteMapping { id: i64 },
}

pub struct DocsyncDashboard {
    core: Core,
    api: ApiClient,
    active_page: Page,
    cards_per_row: usize,

    // Dashboard
    reconciler: CardReconciler,
    previews: HashMap<i64, Preview>,
    stream_connected: bool,

    // Sync page
    mappings: Vec<PathMapping>,
    mapping_form: Option<MappingForm>,
    browser: DirectoryBrowser,
    browser_open: bool,

    // Settings
    client_id_input: String,
    onedrive_busy: bool,
    naming_method: NamingMethod,
    openai_key_input: String,
    openai_busy: bool,
    ollama: OllamaForm,
    settings_status: Option<SettingsStatus>,

    // File naming logs
    logs_open: bool,
    logs_fetched: bool,
    logs_busy: bool,
    logs: FileNamingLogs,
    logs_filter: LogFilter,

    dialog: Option<Dialog>,
}

impl DocsyncDashboard {
    fn fetch_snapshot_task(&self) -> Task<Message> {
        let api = self.api.clone();
        let limit = self.reconciler.capacity();
        cosmic::task::future(async move {
            match api.fetch_documents(limit).await {
                Ok(snapshot) => Message::SnapshotLoaded(snapshot),
                Err(error) => Message::ShowError(
                    "Failed to load documents".to_string(),
                    error.display_body(),
                ),
            }
        })
    }

    fn fetch_status_task(&self) -> Task<Message> {
        let api = self.api.clone();
        cosmic::task::future(async move {
            match api.fetch_status().await {
                Ok(stats) => Message::StatusLoaded(stats),
                Err(error) => {
                    warn!("Failed to fetch dashboard status: {}", error);
                    Message::None
                }
            }
        })
    }

    fn fetch_mappings_task(&self) -> Task<Message> {
        let api = self.api.clone();
        cosmic::task::future(async move {
            match api.fetch_path_mappings().await {
                Ok(mappings) => Message::MappingsLoaded(mappings),
                Err(error) => Message::ShowError(
                    "Failed to load path mappings".to_string(),
                    error.display_body(),
                ),
            }
        })
    }

    fn fetch_preview_task(&self, id: i64, path: String) -> Task<Message> {
        let api = self.api.clone();
        cosmic::task::future(async move {
            match api.fetch_preview(&path).await {
                Ok(bytes) => Message::PreviewLoaded(
                    id,
                    path,
                    cosmic::iced::widget::image::Handle::from_bytes(bytes),
                ),
                Err(error) => {
                    warn!("Failed to fetch preview for card {}: {}", id, error);
                    Message::None
                }
            }
        })
    }

    /// Fetches previews for cards whose image is missing or changed and
    /// drops preview state for evicted cards
    fn queue_preview_fetches(&mut self) -> Task<Message> {
        let live: std::collections::HashSet<i64> =
            self.reconciler.cards().map(|card| card.id).collect();
        self.previews.retain(|id, _| live.contains(id));

        let wanted: Vec<(i64, String)> = self
            .reconciler
            .cards()
            .filter_map(|card| card.previewimage_path.clone().map(|path| (card.id, path)))
            .collect();

        let mut tasks = Vec::new();
        for (id, path) in wanted {
            let up_to_date = self
                .previews
                .get(&id)
                .map(|preview| preview.path == path)
                .unwrap_or(false);
            if !up_to_date {
                self.previews.insert(
                    id,
                    Preview {
                        path: path.clone(),
                        handle: None,
                    },
                );
                tasks.push(self.fetch_preview_task(id, path));
            }
        }
        Task::batch(tasks)
    }

    fn browser_load_task(&self, request: LoadRequest) -> Task<Message> {
        let api = self.api.clone();
        let token = request.token;
        let body = DriveItemsRequest::from(&request);
        cosmic::task::future(async move {
            match api.list_drive_items(&body).await {
                Ok(items) => Message::BrowserLoaded(token, items),
                Err(error) => Message::BrowserLoadFailed(token, error.display_body()),
            }
        })
    }

    fn mapping_details_task(&self, id: i64) -> Task<Message> {
        let api = self.api.clone();
        cosmic::task::future(async move {
            match api.path_mapping_details(id).await {
                Ok(details) => Message::MappingDetailsLoaded(id, details),
                Err(error) => {
                    warn!("Failed to fetch path mapping details for {}: {}", id, error);
                    Message::None
                }
            }
        })
    }

    fn fetch_logs_task(&mut self, page: u32) -> Task<Message> {
        self.logs_busy = true;
        let api = self.api.clone();
        let filter = self.logs_filter;
        cosmic::task::future(async move {
            match api.file_naming_logs(page.max(1), LOGS_PER_PAGE, filter).await {
                Ok(logs) => Message::LogsLoaded(logs),
                Err(error) => {
                    warn!("Failed to fetch file naming logs: {}", error);
                    Message::LogsFailed(error.display_body())
                }
            }
        })
    }

    pub(crate) fn preview_handle(
        &self,
        id: i64,
    ) -> Option<&cosmic::iced::widget::image::Handle> {
        self.previews.get(&id).and_then(|preview| preview.handle.as_ref())
    }
}

impl Application for DocsyncDashboard {
    type Executor = cosmic::executor::Default;
    type Flags = Args;
    type Message = Message;
    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Self::Message>) {
        let config = Config::load().unwrap_or_else(|error| {
            warn!("Failed to load config, using defaults: {}", error);
            Config::default()
        });
        let base_url = flags.server.unwrap_or_else(|| config.server.base_url.clone());
        let api = ApiClient::new(base_url);
        info!("DocSync dashboard starting against {}", api.base_url());

        let app = DocsyncDashboard {
            core,
            api,
            active_page: Page::Documents,
            cards_per_row: config.dashboard.cards_per_row.max(1),
            reconciler: CardReconciler::new(config.dashboard.entries_per_page),
            previews: HashMap::new(),
            stream_connected: false,
            mappings: Vec::new(),
            mapping_form: None,
            browser: DirectoryBrowser::new(),
            browser_open: false,
            client_id_input: String::new(),
            onedrive_busy: false,
            naming_method: NamingMethod::Disabled,
            openai_key_input: String::new(),
            openai_busy: false,
            ollama: OllamaForm::default(),
            settings_status: None,
            logs_open: false,
            logs_fetched: false,
            logs_busy: false,
            logs: FileNamingLogs::default(),
            logs_filter: LogFilter::All,
            dialog: None,
        };

        let startup = Task::batch(vec![
            app.fetch_snapshot_task(),
            app.fetch_status_task(),
            app.fetch_mappings_task(),
        ]);

        (app, startup)
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        struct EventStreamSubscription;

        enum Phase {
            Connecting(ApiClient),
            Connected(ApiClient, Box<EventStream>),
        }

        let api = self.api.clone();
        Subscription::run_with_id(
            std::any::TypeId::of::<EventStreamSubscription>(),
            cosmic::iced::futures::stream::unfold(Phase::Connecting(api), |phase| async move {
                match phase {
                    Phase::Connecting(api) => {
                        match EventStream::connect(api.http(), api.base_url()).await {
                            Ok(stream) => Some((
                                Message::StreamConnected,
                                Phase::Connected(api, Box::new(stream)),
                            )),
                            Err(error) => {
                                warn!("Event stream connection failed: {}", error);
                                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                                Some((Message::StreamDisconnected, Phase::Connecting(api)))
                            }
                        }
                    }
                    Phase::Connected(api, mut stream) => match stream.next_update().await {
                        Ok(Some(update)) => Some((
                            Message::StreamEvent(update),
                            Phase::Connected(api, stream),
                        )),
                        Ok(None) => {
                            warn!("Event stream closed by server");
                            Some((Message::StreamDisconnected, Phase::Connecting(api)))
                        }
                        Err(error) => {
                            warn!("Event stream error: {}", error);
                            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                            Some((Message::StreamDisconnected, Phase::Connecting(api)))
                        }
                    },
                }
            }),
        )
    }

    fn view(&self) -> Element<'_, Self::Message> {
        if let Some(dialog) = &self.dialog {
            return self.dialog_view(dialog);
        }

        let sidebar = self.sidebar_view();
        let content = scrollable(self.content_view())
            .width(Length::Fill)
            .height(Length::Fill);

        row::with_capacity(2)
            .push(sidebar)
            .push(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn update(&mut self, message: Self::Message) -> Task<Self::Message> {
        match message {
            Message::NavigateTo(page) => {
                self.active_page = page;
                Task::none()
            }

            // Event stream lifecycle
            Message::StreamConnected => {
                info!("Event stream connected");
                self.stream_connected = true;
                self.fetch_status_task()
            }
            Message::StreamDisconnected => {
                self.stream_connected = false;
                Task::none()
            }
            Message::StreamEvent(update) => {
                match self.reconciler.apply_update(&update) {
                    UpdateOutcome::Inserted => {
                        info!("Added new card {} from stream", update.id);
                        self.queue_preview_fetches()
                    }
                    UpdateOutcome::Updated => self.queue_preview_fetches(),
                    UpdateOutcome::Dropped => Task::none(),
                }
            }

            // Dashboard data
            Message::SnapshotLoaded(snapshot) => {
                info!("Loaded snapshot of {} documents", snapshot.len());
                self.reconciler.initialize(snapshot);
                self.queue_preview_fetches()
            }
            Message::StatusLoaded(stats) => {
                self.reconciler.set_stats(stats);
                Task::none()
            }
            Message::PreviewLoaded(id, path, handle) => {
                self.previews.insert(
                    id,
                    Preview {
                        path,
                        handle: Some(handle),
                    },
                );
                Task::none()
            }
            Message::OpenUrl(url) => {
                if let Err(error) = open::that_detached(&url) {
                    warn!("Failed to open {}: {}", url, error);
                }
                Task::none()
            }

            // Path mappings
            Message::MappingsLoaded(mappings) => {
                self.mappings = mappings;
                Task::none()
            }
            Message::RefreshMappings => self.fetch_mappings_task(),
            Message::StartAddMapping => {
                self.mapping_form = Some(MappingForm::default());
                self.browser.reset();
                self.browser_open = false;
                Task::none()
            }
            Message::StartEditMapping(id) => {
                let Some(mapping) = self.mappings.iter().find(|m| m.id == id).cloned() else {
                    return Task::none();
                };
                self.mapping_form = Some(MappingForm {
                    share_name: mapping.smb_name.clone(),
                    old_smb_id: Some(id),
                    error: None,
                    busy: false,
                });
                self.browser.reset();
                self.browser_open = false;
                self.browser.restore_selection(SelectedFolder {
                    folder_id: mapping.folder_id.unwrap_or_default(),
                    path: mapping.remote_path.unwrap_or_default(),
                    drive_id: mapping.drive_id.unwrap_or_default(),
                    web_url: mapping.web_url.unwrap_or_default(),
                });
                self.mapping_details_task(id)
            }
            Message::MappingDetailsLoaded(id, details) => {
                let editing = self
                    .mapping_form
                    .as_ref()
                    .and_then(|form| form.old_smb_id)
                    == Some(id);
                if editing {
                    let path = self
                        .browser
                        .selected()
                        .map(|selected| selected.path.clone())
                        .unwrap_or_default();
                    self.browser.restore_selection(SelectedFolder {
                        folder_id: details.folder_id.unwrap_or_default(),
                        path,
                        drive_id: details.drive_id.unwrap_or_default(),
                        web_url: details.web_url.unwrap_or_default(),
                    });
                }
                Task::none()
            }
            Message::CancelMappingForm => {
                self.mapping_form = None;
                self.browser.reset();
                self.browser_open = false;
                Task::none()
            }
            Message::ShareNameInput(value) => {
                if let Some(form) = self.mapping_form.as_mut() {
                    form.share_name = value;
                }
                Task::none()
            }
            Message::SubmitMapping => {
                let Some(form) = &self.mapping_form else {
                    return Task::none();
                };
                let name = form.share_name.trim().to_string();
                let old_id = form.old_smb_id;

                if !docsync_api::validate_share_name(&name) {
                    if let Some(form) = self.mapping_form.as_mut() {
                        form.error = Some(
                            "Invalid share name: avoid < > : \" / \\ | ? * and reserved names."
                                .to_string(),
                        );
                    }
                    return Task::none();
                }

                let selected = self.browser.selected().cloned();
                let Some(selected) = selected.filter(|s| !s.folder_id.is_empty()) else {
                    if let Some(form) = self.mapping_form.as_mut() {
                        form.error = Some("Pick a remote folder first.".to_string());
                    }
                    return Task::none();
                };

                if let Some(form) = self.mapping_form.as_mut() {
                    form.error = None;
                    form.busy = true;
                }

                let api = self.api.clone();
                let body = PathMappingForm {
                    smb_name: name,
                    remote_path: selected.path,
                    folder_id: selected.folder_id,
                    drive_id: selected.drive_id,
                    web_url: selected.web_url,
                    old_smb_id: old_id.map(|id| id.to_string()).unwrap_or_default(),
                };
                cosmic::task::future(async move {
                    match api.add_path_mapping(&body).await {
                        Ok(()) => Message::MappingSaved,
                        Err(error) => Message::MappingSaveFailed(error.display_body()),
                    }
                })
            }
            Message::MappingSaved => {
                self.mapping_form = None;
                self.browser.reset();
                self.browser_open = false;
                self.fetch_mappings_task()
            }
            Message::MappingSaveFailed(body) => {
                if let Some(form) = self.mapping_form.as_mut() {
                    form.busy = false;
                }
                self.dialog = Some(Dialog::Error {
                    title: "Failed to save path mapping".to_string(),
                    body,
                });
                Task::none()
            }
            Message::DeleteMapping(id) => {
                self.dialog = Some(Dialog::ConfirmDeleteMapping { id });
                Task::none()
            }
            Message::ConfirmDeleteMapping(id) => {
                self.dialog = None;
                let api = self.api.clone();
                cosmic::task::future(async move {
                    match api.delete_path_mapping(id).await {
                        Ok(()) => Message::MappingDeleted,
                        Err(error) => Message::ShowError(
                            "Failed to delete path mapping".to_string(),
                            error.display_body(),
                        ),
                    }
                })
            }
            Message::MappingDeleted => self.fetch_mappings_task(),

            // Remote directory browser
            Message::ToggleRemoteBrowser => {
                self.browser_open = !self.browser_open;
                if self.browser_open {
                    if let Some(request) = self.browser.open() {
                        return self.browser_load_task(request);
                    }
                }
                Task::none()
            }
            Message::BrowserLoaded(token, items) => {
                self.browser.complete_load(token, &items);
                Task::none()
            }
            Message::BrowserLoadFailed(token, body) => {
                if self.browser.fail_load(token) {
                    self.dialog = Some(Dialog::Error {
                        title: "Failed to list remote folder".to_string(),
                        body,
                    });
                }
                Task::none()
            }
            Message::SelectFolder(index) => {
                if let Some(entry) = self.browser.entries().get(index).cloned() {
                    self.browser.select(&entry);
                }
                Task::none()
            }
            Message::DescendFolder(index) => {
                if let Some(entry) = self.browser.entries().get(index).cloned() {
                    if let Some(request) = self.browser.descend(&entry) {
                        return self.browser_load_task(request);
                    }
                }
                Task::none()
            }
            Message::BrowserBack => {
                if let Some(request) = self.browser.ascend() {
                    return self.browser_load_task(request);
                }
                Task::none()
            }

            // OneDrive settings
            Message::ClientIdInput(value) => {
                self.client_id_input = value;
                Task::none()
            }
            Message::SaveOneDriveSettings => {
                self.onedrive_busy = true;
                let api = self.api.clone();
                let client_id = self.client_id_input.trim().to_string();
                cosmic::task::future(async move {
                    match api.save_onedrive_settings(&client_id).await {
                        Ok(message) => Message::OneDriveSettingsSaved(message),
                        Err(error) => Message::SettingsSaveFailed(error.display_body()),
                    }
                })
            }
            Message::OneDriveSettingsSaved(message) => {
                self.onedrive_busy = false;
                self.settings_status = Some(SettingsStatus {
                    message,
                    is_error: false,
                });
                Task::none()
            }

            // File naming settings
            Message::SelectNamingMethod(method) => {
                self.naming_method = method;
                Task::none()
            }
            Message::OpenAiKeyInput(value) => {
                self.openai_key_input = value;
                Task::none()
            }
            Message::SaveOpenAiSettings => {
                self.openai_busy = true;
                let api = self.api.clone();
                let key = self.openai_key_input.trim().to_string();
                cosmic::task::future(async move {
                    match api.save_openai_settings(&key).await {
                        Ok(message) => Message::OpenAiSettingsSaved(message),
                        Err(error) => Message::SettingsSaveFailed(error.display_body()),
                    }
                })
            }
            Message::OpenAiSettingsSaved(message) => {
                self.openai_busy = false;
                self.openai_key_input.clear();
                self.settings_status = Some(SettingsStatus {
                    message,
                    is_error: false,
                });
                Task::none()
            }
            Message::DeleteOpenAiSettings => {
                self.openai_busy = true;
                let api = self.api.clone();
                cosmic::task::future(async move {
                    match api.delete_openai_settings().await {
                        Ok(message) => Message::OpenAiSettingsSaved(message),
                        Err(error) => Message::SettingsSaveFailed(error.display_body()),
                    }
                })
            }
            Message::OllamaSchemeSelected(index) => {
                self.ollama.scheme_index = index.min(OLLAMA_SCHEMES.len() - 1);
                Task::none()
            }
            Message::OllamaAddressInput(value) => {
                self.ollama.address = value;
                Task::none()
            }
            Message::OllamaPortInput(value) => {
                self.ollama.port = value;
                Task::none()
            }
            Message::ConnectOllama => {
                self.ollama.busy = true;
                self.ollama.error = None;
                self.ollama.probe = None;
                self.ollama.model_labels.clear();
                self.ollama.model_index = 0;
                let api = self.api.clone();
                let scheme = self.ollama.scheme().to_string();
                let address = self
                    .ollama
                    .address
                    .trim()
                    .trim_end_matches('/')
                    .to_string();
                let port = self.ollama.port.trim().to_string();
                cosmic::task::future(async move {
                    match api.probe_ollama(&scheme, &address, &port).await {
                        Ok(probe) => Message::OllamaProbed(probe),
                        Err(error) => Message::OllamaProbeFailed(error.display_body()),
                    }
                })
            }
            Message::OllamaProbed(probe) => {
                info!(
                    "Connected to Ollama {} with {} models",
                    probe.version,
                    probe.models.len()
                );
                self.ollama.busy = false;
                self.ollama.model_labels = probe.models.iter().map(|model| model.label()).collect();
                self.ollama.probe = Some(probe);
                self.ollama.model_index = 0;
                Task::none()
            }
            Message::OllamaProbeFailed(body) => {
                self.ollama.busy = false;
                self.ollama.error = Some(body);
                Task::none()
            }
            Message::OllamaModelSelected(index) => {
                self.ollama.model_index = index;
                Task::none()
            }
            Message::SaveOllamaSettings => {
                let Some(probe) = &self.ollama.probe else {
                    return Task::none();
                };
                let Some(model) = probe.models.get(self.ollama.model_index) else {
                    return Task::none();
                };
                self.ollama.busy = true;
                self.ollama.error = None;
                let api = self.api.clone();
                let form = OllamaSettingsForm {
                    ollama_server_scheme: self.ollama.scheme().to_string(),
                    ollama_server_address: self
                        .ollama
                        .address
                        .trim()
                        .trim_end_matches('/')
                        .to_string(),
                    ollama_server_port: self.ollama.port.trim().to_string(),
                    ollama_model_select: model.name.clone(),
                };
                cosmic::task::future(async move {
                    match api.save_ollama_settings(&form).await {
                        Ok(message) => Message::OllamaSettingsSaved(message),
                        Err(error) => Message::OllamaProbeFailed(error.display_body()),
                    }
                })
            }
            Message::OllamaSettingsSaved(message) => {
                self.ollama.busy = false;
                self.settings_status = Some(SettingsStatus {
                    message,
                    is_error: false,
                });
                Task::none()
            }
            Message::DeleteOllamaSettings => {
                self.ollama.busy = true;
                let api = self.api.clone();
                cosmic::task::future(async move {
                    match api.delete_ollama_settings().await {
                        Ok(message) => Message::OllamaSettingsSaved(message),
                        Err(error) => Message::OllamaProbeFailed(error.display_body()),
                    }
                })
            }
            Message::DisableFileNaming => {
                let api = self.api.clone();
                cosmic::task::future(async move {
                    match api.disable_file_naming().await {
                        Ok(message) => Message::FileNamingDisabled(message),
                        Err(error) => Message::SettingsSaveFailed(error.display_body()),
                    }
                })
            }
            Message::FileNamingDisabled(message) => {
                self.naming_method = NamingMethod::Disabled;
                self.settings_status = Some(SettingsStatus {
                    message,
                    is_error: false,
                });
                Task::none()
            }
            Message::SettingsSaveFailed(body) => {
                self.onedrive_busy = false;
                self.openai_busy = false;
                self.settings_status = Some(SettingsStatus {
                    message: body,
                    is_error: true,
                });
                Task::none()
            }

            // File naming logs
            Message::ToggleLogsSection => {
                self.logs_open = !self.logs_open;
                if self.logs_open && !self.logs_fetched {
                    self.logs_fetched = true;
                    return self.fetch_logs_task(1);
                }
                Task::none()
            }
            Message::RefreshLogs => {
                let page = self.logs.page.max(1);
                self.fetch_logs_task(page)
            }
            Message::LogsPageRequested(page) => self.fetch_logs_task(page),
            Message::LogsFilterSelected(index) => {
                self.logs_filter = match index {
                    1 => LogFilter::Success,
                    2 => LogFilter::Failed,
                    _ => LogFilter::All,
                };
                self.fetch_logs_task(1)
            }
            Message::LogsLoaded(logs) => {
                self.logs_busy = false;
                self.logs = logs;
                Task::none()
            }
            Message::LogsFailed(body) => {
                warn!("File naming logs unavailable: {}", body);
                self.logs_busy = false;
                self.logs = FileNamingLogs::default();
                Task::none()
            }

            // Blocking dialog
            Message::ShowError(title, body) => {
                self.dialog = Some(Dialog::Error { title, body });
                Task::none()
            }
            Message::CloseDialog => {
                self.dialog = None;
                Task::none()
            }

            Message::None => Task::none(),
        }
    }
}

// Spacing shortcuts for the COSMIC spacing scale
pub(crate) fn space_xxxs() -> u16 {
    theme::active().cosmic().space_xxxs()
}

pub(crate) fn space_xxs() -> u16 {
    theme::active().cosmic().space_xxs()
}

pub(crate) fn space_xs() -> u16 {
    theme::active().cosmic().space_xs()
}

pub(crate) fn space_s() -> u16 {
    theme::active().cosmic().space_s()
}

pub(crate) fn space_m() -> u16 {
    theme::active().cosmic().space_m()
}

// Theme-aware colors
pub(crate) fn theme_accent_color() -> Color {
    theme::active().cosmic().accent_color().into()
}

pub(crate) fn theme_success_color() -> Color {
    theme::active().cosmic().success_color().into()
}

pub(crate) fn theme_destructive_color() -> Color {
    theme::active().cosmic().destructive_color().into()
}

pub(crate) fn theme_muted_color() -> Color {
    theme::active().cosmic().palette.neutral_6.into()
}

pub(crate) fn theme_neutral_color() -> Color {
    theme::active().cosmic().palette.neutral_4.into()
}

/// Parses a `#RRGGBB` badge color; unparseable input gets the muted tone
pub(crate) fn parse_hex_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return theme_muted_color();
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::from_rgb8(r, g, b),
        _ => theme_muted_color(),
    }
}
