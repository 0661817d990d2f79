//! User settings for famfin
//!
//! Holds the local profile, the active view (personal or a family space),
//! display preferences and the category suggestion settings.

use serde::{Deserialize, Serialize};

use super::paths::FamfinPaths;
use crate::error::FamfinError;
use crate::models::SpaceId;

/// The local user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    /// URL or path of the avatar image
    #[serde(default)]
    pub avatar: String,
}

/// Which slice of the data the user is currently looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CurrentView {
    /// Records not linked to any family space
    #[default]
    Personal,
    /// Records linked to one family space
    Family { space_id: SpaceId },
}

impl CurrentView {
    /// The family space this view is scoped to, if any
    pub fn space_id(&self) -> Option<SpaceId> {
        match self {
            Self::Personal => None,
            Self::Family { space_id } => Some(*space_id),
        }
    }

    /// Check whether a record linked to `space_id` is visible in this view
    pub fn includes(&self, space_id: Option<SpaceId>) -> bool {
        self.space_id() == space_id
    }
}

/// Settings for the generative category suggester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizerSettings {
    /// Base URL of the generative-text API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for CategorizerSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CategorizerSettings {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// User settings for famfin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub profile: Option<Profile>,

    #[serde(default)]
    pub current_view: CurrentView,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub categorizer: CategorizerSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            profile: None,
            current_view: CurrentView::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            categorizer: CategorizerSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FamfinPaths) -> Result<Self, FamfinError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FamfinError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FamfinError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FamfinPaths) -> Result<(), FamfinError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FamfinError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FamfinError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The profile e-mail, required by family-space operations
    pub fn require_profile(&self) -> Result<&Profile, FamfinError> {
        self.profile.as_ref().ok_or_else(|| {
            FamfinError::Config(
                "No profile configured. Run 'famfin profile set --name <NAME> --email <EMAIL>'"
                    .into(),
            )
        })
    }
}
