//! Remote directory browser
//!
//! State machine behind the remote-folder picker: `Idle` until the panel is
//! first expanded, then `Loading` while a listing request is in flight and
//! `Listed` once it renders. Descending pushes the current context onto a
//! navigation stack; the back control pops it. Every load carries a
//! generation token so a slow response from an abandoned navigation can
//! never overwrite a newer listing.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// One item of a drive listing as the service returns it
///
/// This is the raw Graph-shaped record; only folders survive into
/// [`DirectoryEntry`]. Shared-with-me items carry their drive id under
/// `remoteItem`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub folder: Option<Value>,
    #[serde(default)]
    pub package: Option<Value>,
    #[serde(default)]
    pub shared: Option<Value>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub parent_reference: Option<ParentReference>,
    #[serde(default)]
    pub remote_item: Option<RemoteItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub drive_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteItem {
    #[serde(default)]
    pub parent_reference: Option<ParentReference>,
}

impl DriveItem {
    /// Folder facet present and not a package (OneNote notebooks etc.)
    pub fn is_browsable_folder(&self) -> bool {
        truthy(&self.folder) && !truthy(&self.package)
    }

    fn drive_id(&self) -> Option<String> {
        self.parent_reference
            .as_ref()
            .and_then(|parent| parent.drive_id.clone())
            .or_else(|| {
                self.remote_item
                    .as_ref()
                    .and_then(|remote| remote.parent_reference.as_ref())
                    .and_then(|parent| parent.drive_id.clone())
            })
    }
}

/// The service marks shared roots with `shared: true`, while Graph itself
/// uses a `shared` facet object; both count.
fn truthy(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number.as_f64() != Some(0.0),
        Some(Value::Object(_)) | Some(Value::Array(_)) => true,
    }
}

/// One folder row in the rendered listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub item_id: String,
    pub name: String,
    pub parent_id: String,
    pub parent_path: String,
    pub is_shared: bool,
    pub web_url: String,
    pub drive_id: String,
    pub is_folder: bool,
}

impl DirectoryEntry {
    fn from_item(item: &DriveItem) -> Self {
        let parent = item.parent_reference.clone().unwrap_or_default();
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            parent_id: parent.id.unwrap_or_default(),
            parent_path: parent.path.unwrap_or_default(),
            is_shared: truthy(&item.shared),
            web_url: item.web_url.clone().unwrap_or_default(),
            drive_id: item.drive_id().unwrap_or_default(),
            is_folder: item.is_browsable_folder(),
        }
    }
}

/// Folder context to return to when the user goes back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationFrame {
    /// `None` means the drive root
    pub folder_id: Option<String>,
    pub is_shared_with_me: bool,
    pub drive_id: Option<String>,
}

impl NavigationFrame {
    pub fn root() -> Self {
        Self::default()
    }
}

/// A listing request the caller should issue against the service
///
/// Responses are fed back through [`DirectoryBrowser::complete_load`] with
/// the same token; stale tokens are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: u64,
    pub folder_id: Option<String>,
    pub is_shared_with_me: bool,
    pub drive_id: Option<String>,
    pub dir_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserState {
    #[default]
    Idle,
    Loading,
    Listed,
}

/// The single folder currently picked for a path mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFolder {
    pub folder_id: String,
    pub path: String,
    pub drive_id: String,
    pub web_url: String,
}

/// Navigation and selection state for the remote-folder picker
#[derive(Debug)]
pub struct DirectoryBrowser {
    state: BrowserState,
    entries: Vec<DirectoryEntry>,
    stack: Vec<NavigationFrame>,
    current: NavigationFrame,
    dir_level: u32,
    current_path: String,
    selected: Option<SelectedFolder>,
    token: u64,
}

impl Default for DirectoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryBrowser {
    pub fn new() -> Self {
        Self {
            state: BrowserState::Idle,
            entries: Vec::new(),
            stack: Vec::new(),
            current: NavigationFrame::root(),
            dir_level: 1,
            current_path: "/".to_string(),
            selected: None,
            token: 0,
        }
    }

    pub fn state(&self) -> BrowserState {
        self.state
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn depth(&self) -> u32 {
        self.dir_level
    }

    pub fn selected(&self) -> Option<&SelectedFolder> {
        self.selected.as_ref()
    }

    /// Back is possible exactly when a frame is on the stack
    pub fn can_go_back(&self) -> bool {
        !self.stack.is_empty()
    }

    /// First expansion of the panel; a no-op once anything was loaded
    pub fn open(&mut self) -> Option<LoadRequest> {
        match self.state {
            BrowserState::Idle => Some(self.begin_load(NavigationFrame::root())),
            _ => None,
        }
    }

    /// Re-request the current folder
    pub fn reload(&mut self) -> LoadRequest {
        let current = self.current.clone();
        self.begin_load(current)
    }

    /// Records the response for `token`; returns false for stale tokens
    pub fn complete_load(&mut self, token: u64, items: &[DriveItem]) -> bool {
        if token != self.token {
            debug!("Discarding stale listing for request {} (current {})", token, self.token);
            return false;
        }
        let mut entries: Vec<DirectoryEntry> = items
            .iter()
            .filter(|item| item.is_browsable_folder())
            .map(DirectoryEntry::from_item)
            .collect();
        entries.sort_by_key(|entry| entry.name.to_lowercase());
        self.entries = entries;
        self.state = BrowserState::Listed;
        true
    }

    /// A failed load leaves the browser loading with the listing hidden;
    /// returns whether the failure belongs to the current request.
    pub fn fail_load(&mut self, token: u64) -> bool {
        token == self.token && self.state == BrowserState::Loading
    }

    /// Single click: picks a folder without navigating
    pub fn select(&mut self, entry: &DirectoryEntry) -> &SelectedFolder {
        let parent = entry
            .parent_path
            .split("root:")
            .nth(1)
            .unwrap_or_default()
            .to_string();
        self.selected.insert(SelectedFolder {
            folder_id: entry.item_id.clone(),
            path: format!("{}/{}", parent, entry.name),
            drive_id: entry.drive_id.clone(),
            web_url: entry.web_url.clone(),
        })
    }

    /// Restores a selection when editing an existing mapping
    pub fn restore_selection(&mut self, selection: SelectedFolder) {
        self.selected = Some(selection);
    }

    /// Descends into a folder, remembering the current context for back
    pub fn descend(&mut self, entry: &DirectoryEntry) -> Option<LoadRequest> {
        if !entry.is_folder {
            return None;
        }
        self.stack.push(self.current.clone());
        self.dir_level += 1;
        self.current_path.push_str(&entry.name);
        self.current_path.push('/');
        Some(self.begin_load(NavigationFrame {
            folder_id: Some(entry.item_id.clone()),
            is_shared_with_me: entry.is_shared,
            drive_id: (!entry.drive_id.is_empty()).then(|| entry.drive_id.clone()),
        }))
    }

    /// Pops the navigation stack; a no-op when already at the first level
    pub fn ascend(&mut self) -> Option<LoadRequest> {
        let frame = self.stack.pop()?;
        self.dir_level -= 1;
        self.current_path = trim_last_segment(&self.current_path);
        Some(self.begin_load(frame))
    }

    /// Clears selection and navigation; used when the mapping dialog is
    /// dismissed or reopened for adding
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn begin_load(&mut self, target: NavigationFrame) -> LoadRequest {
        self.state = BrowserState::Loading;
        self.token += 1;
        self.current = target.clone();
        LoadRequest {
            token: self.token,
            folder_id: target.folder_id,
            is_shared_with_me: target.is_shared_with_me,
            drive_id: target.drive_id,
            dir_level: self.dir_level,
        }
    }
}

/// "/Scans/2024/" -> "/Scans/"
fn trim_last_segment(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() <= 2 {
        return "/".to_string();
    }
    let mut trimmed = segments[..segments.len() - 2].join("/");
    trimmed.push('/');
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn folder_item(id: &str, name: &str) -> DriveItem {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "folder": {"childCount": 1},
            "parentReference": {
                "id": "parent-1",
                "path": "/drive/root:/Scans",
                "driveId": "drive-1",
            },
            "webUrl": format!("https://example.test/{id}"),
        }))
        .unwrap()
    }

    fn entry_for(item: &DriveItem) -> DirectoryEntry {
        DirectoryEntry::from_item(item)
    }

    #[test]
    fn starts_idle_and_loads_lazily_once() {
        let mut browser = DirectoryBrowser::new();
        assert_eq!(browser.state(), BrowserState::Idle);

        let request = browser.open().expect("first expansion loads the root");
        assert_eq!(request.folder_id, None);
        assert_eq!(request.dir_level, 1);
        assert_eq!(browser.state(), BrowserState::Loading);
        assert!(browser.open().is_none());
    }

    #[test]
    fn listing_filters_and_sorts() {
        let mut browser = DirectoryBrowser::new();
        let request = browser.open().unwrap();

        let items: Vec<DriveItem> = vec![
            serde_json::from_value(json!({"id": "f1", "name": "zeta", "folder": {}})).unwrap(),
            serde_json::from_value(json!({"id": "d1", "name": "notes.pdf"})).unwrap(),
            serde_json::from_value(
                json!({"id": "p1", "name": "Notebook", "folder": {}, "package": {"type": "oneNote"}}),
            )
            .unwrap(),
            serde_json::from_value(json!({"id": "f2", "name": "Alpha", "folder": {}})).unwrap(),
        ];
        assert!(browser.complete_load(request.token, &items));

        let names: Vec<&str> = browser
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, ["Alpha", "zeta"]);
        assert_eq!(browser.state(), BrowserState::Listed);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut browser = DirectoryBrowser::new();
        let first = browser.open().unwrap();

        let item = folder_item("f1", "Scans");
        browser.complete_load(first.token, std::slice::from_ref(&item));
        let second = browser.descend(&entry_for(&item)).unwrap();

        // The first request resolves again after the user navigated on.
        assert!(!browser.complete_load(first.token, &[]));
        assert_eq!(browser.state(), BrowserState::Loading);
        assert!(browser.complete_load(second.token, &[]));
        assert_eq!(browser.state(), BrowserState::Listed);
    }

    #[test]
    fn descend_then_ascend_restores_context() {
        let mut browser = DirectoryBrowser::new();
        let root = browser.open().unwrap();
        let item = folder_item("f1", "Scans");
        browser.complete_load(root.token, std::slice::from_ref(&item));

        assert!(!browser.can_go_back());
        let down = browser.descend(&entry_for(&item)).unwrap();
        assert_eq!(down.folder_id.as_deref(), Some("f1"));
        assert_eq!(down.dir_level, 2);
        assert_eq!(browser.current_path(), "/Scans/");
        assert!(browser.can_go_back());

        let up = browser.ascend().unwrap();
        assert_eq!(up.folder_id, root.folder_id);
        assert_eq!(up.dir_level, 1);
        assert_eq!(browser.current_path(), "/");
        assert!(!browser.can_go_back());
        assert!(browser.ascend().is_none());
    }

    #[test]
    fn descend_ignores_non_folders() {
        let mut browser = DirectoryBrowser::new();
        browser.open();
        let mut entry = entry_for(&folder_item("f1", "Scans"));
        entry.is_folder = false;
        assert!(browser.descend(&entry).is_none());
    }

    #[test]
    fn select_builds_path_from_parent_and_name() {
        let mut browser = DirectoryBrowser::new();
        let entry = entry_for(&folder_item("f9", "2024"));
        let selected = browser.select(&entry);
        assert_eq!(selected.path, "/Scans/2024");
        assert_eq!(selected.folder_id, "f9");
        assert_eq!(selected.drive_id, "drive-1");
    }

    #[test]
    fn select_without_root_marker_uses_bare_name() {
        let mut browser = DirectoryBrowser::new();
        let mut entry = entry_for(&folder_item("f9", "Shared"));
        entry.parent_path = String::new();
        let selected = browser.select(&entry);
        assert_eq!(selected.path, "/Shared");
    }

    #[test]
    fn reset_clears_everything() {
        let mut browser = DirectoryBrowser::new();
        let root = browser.open().unwrap();
        let item = folder_item("f1", "Scans");
        browser.complete_load(root.token, std::slice::from_ref(&item));
        let entry = entry_for(&item);
        browser.select(&entry);
        browser.descend(&entry);

        browser.reset();
        assert_eq!(browser.state(), BrowserState::Idle);
        assert!(browser.selected().is_none());
        assert!(!browser.can_go_back());
        assert_eq!(browser.depth(), 1);
        assert_eq!(browser.current_path(), "/");
    }

    #[test]
    fn failed_load_stays_loading() {
        let mut browser = DirectoryBrowser::new();
        let request = browser.open().unwrap();
        assert!(browser.fail_load(request.token));
        assert_eq!(browser.state(), BrowserState::Loading);
    }

    #[test]
    fn shared_drive_id_comes_from_remote_item() {
        let item: DriveItem = serde_json::from_value(json!({
            "id": "s1",
            "name": "Team",
            "folder": {},
            "shared": true,
            "remoteItem": {"parentReference": {"driveId": "remote-drive"}},
        }))
        .unwrap();
        let entry = DirectoryEntry::from_item(&item);
        assert!(entry.is_shared);
        assert_eq!(entry.drive_id, "remote-drive");
    }
}
