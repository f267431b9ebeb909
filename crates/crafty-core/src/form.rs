//! Create-container form: draft entity, validation and submission

use crate::Route;
use crafty_gateway::{Gateway, NewContainer};

/// Game difficulty catalog offered by the form
pub const DIFFICULTIES: [(u8, &str); 4] = [(0, "Peaceful"), (1, "Easy"), (2, "Normal"), (3, "Hard")];

pub const MIN_NAME_LEN: usize = 6;
pub const PORT_RANGE: std::ops::RangeInclusive<u32> = 10000..=40000;

/// User-edited staging entity for a container that does not exist yet
///
/// Fields hold raw input text; numbers are parsed during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftContainer {
    /// Reserved for editing existing containers; always `None` today
    pub id: Option<String>,
    pub name: String,
    /// Optional host port
    pub port: String,
    pub version: String,
    pub forge_version: String,
    pub seed: String,
    pub difficulty: String,
}

impl DraftContainer {
    pub fn new(default_version: &str) -> Self {
        Self {
            id: None,
            name: String::new(),
            port: String::new(),
            version: default_version.to_string(),
            forge_version: String::new(),
            seed: String::new(),
            difficulty: "1".to_string(),
        }
    }

    /// Label of the selected difficulty, if the value is in the catalog
    pub fn difficulty_label(&self) -> Option<&'static str> {
        let value: u8 = self.difficulty.trim().parse().ok()?;
        DIFFICULTIES
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| *label)
    }

    fn to_request(&self, difficulty: u8) -> NewContainer {
        NewContainer {
            name: self.name.clone(),
            version: self.version.clone(),
            port: self.port.clone(),
            forge_version: self.forge_version.clone(),
            seed: self.seed.clone(),
            difficulty,
        }
    }
}

impl Default for DraftContainer {
    fn default() -> Self {
        Self::new("1.9")
    }
}

fn parse_difficulty(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|d| *d <= 3)
}

/// Forge builds are accepted as typed; looking them up in the forge
/// catalog would plug in here.
fn check_forge_version(_forge_version: &str) -> Option<String> {
    None
}

/// Validate a draft, returning error messages in display order
///
/// Port and difficulty accept decimal integers only, so `25565.0` or
/// `1.0` are rejected.
pub fn validate(draft: &DraftContainer) -> Vec<String> {
    let mut errors = Vec::new();

    if draft.name.chars().count() < MIN_NAME_LEN {
        errors.push("Invalid server name".to_string());
    }
    if draft.version.is_empty() {
        errors.push("Invalid version".to_string());
    }
    if !draft.port.is_empty() {
        let in_range = draft
            .port
            .trim()
            .parse::<u32>()
            .map(|p| PORT_RANGE.contains(&p))
            .unwrap_or(false);
        if !in_range {
            errors.push("Invalid port".to_string());
        }
    }
    if !draft.forge_version.is_empty() {
        errors.extend(check_forge_version(&draft.forge_version));
    }
    if parse_difficulty(&draft.difficulty).is_none() {
        errors.push("Invalid difficulty".to_string());
    }

    errors
}

/// Owns the active draft, its error list and the version catalog
#[derive(Debug, Clone, Default)]
pub struct FormController {
    draft: Option<DraftContainer>,
    errors: Vec<String>,
    versions: Vec<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, draft: DraftContainer) {
        self.draft = Some(draft);
    }

    /// Discard the draft and any errors
    pub fn close(&mut self) {
        self.draft = None;
        self.errors.clear();
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&DraftContainer> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut DraftContainer> {
        self.draft.as_mut()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn set_versions(&mut self, versions: Vec<String>) {
        self.versions = versions;
    }

    /// Fetch the version catalog; failures leave it unchanged
    pub async fn load_versions(&mut self, gateway: &dyn Gateway) {
        match gateway.list_versions().await {
            Ok(versions) => self.versions = versions,
            Err(e) => tracing::warn!("Failed to load versions: {}", e),
        }
    }

    /// Validate and submit the active draft
    ///
    /// Returns the route to follow after a successful creation. Validation
    /// failures never reach the network; a server failure replaces the
    /// error list with its single message.
    pub async fn submit(&mut self, gateway: &dyn Gateway) -> Option<Route> {
        let draft = self.draft.as_ref()?;

        self.errors = validate(draft);
        if !self.errors.is_empty() {
            tracing::debug!("Draft rejected: {:?}", self.errors);
            return None;
        }
        let difficulty = parse_difficulty(&draft.difficulty)?;
        let request = draft.to_request(difficulty);

        match gateway.create_container(&request).await {
            Ok(Some(container)) => {
                tracing::info!("Created container {}", container.name);
                self.close();
                Some(Route::List)
            }
            Ok(None) => {
                tracing::warn!("Server accepted {} without returning it", request.name);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to create {}: {}", request.name, e);
                self.errors = vec![e.user_message()];
                None
            }
        }
    }
}
