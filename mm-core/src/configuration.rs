use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Settings read once from the environment at startup and handed to the clients.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfiguration {
    api_url: String,
    #[serde(default)]
    api_public_url: Option<String>,
    app_url: String,
    #[serde(default, deserialize_with = "literal_true")]
    prod_error_messages: bool,
    #[serde(default = "default_disabled_ccpwgl", deserialize_with = "literal_true")]
    disabled_ccpwgl: bool,
    #[serde(default = "default_prod_url")]
    prod_url: String,
    #[serde(default = "default_datetime_format")]
    datetime_format: String,
    #[serde(default)]
    vapid_public_key: Option<String>,
    #[serde(default)]
    vapid_private_key: Option<String>,
    #[serde(default)]
    vapid_contact: Option<String>,
    #[serde(default)]
    shared_secret: Option<String>,
    #[serde(default = "default_esi_url")]
    esi_url: String,
    #[serde(default)]
    sun_types_file: Option<PathBuf>,
}

/// Flags are on only when set to exactly `true`, any other value turns them off.
fn literal_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value == "true")
}

fn default_disabled_ccpwgl() -> bool {
    true
}

fn default_prod_url() -> String {
    "https://my.minmatar.org".to_string()
}

fn default_datetime_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_esi_url() -> String {
    "https://esi.evetech.net/latest".to_string()
}

impl AppConfiguration {
    pub fn from_env() -> Result<Self> {
        envy::from_env::<Self>().map(Self::normalized).context("Failed to read configuration from environment")
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars).map(Self::normalized).context("Failed to read configuration")
    }

    fn normalized(mut self) -> Self {
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        self.app_url = self.app_url.trim_end_matches('/').to_string();
        self.esi_url = self.esi_url.trim_end_matches('/').to_string();
        self.api_public_url = self.api_public_url.map(|url| url.trim_end_matches('/').to_string());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_public_url(&self) -> &str {
        self.api_public_url.as_deref().unwrap_or(&self.api_url)
    }

    pub fn auth_url(&self) -> String {
        format!("{}/api/users/login?redirect_url={}/auth/login", self.api_public_url(), self.app_url)
    }

    pub fn friend_auth_url(&self) -> String {
        format!("{}/api/users/login?redirect_url={}/friend/login", self.api_url, self.app_url)
    }

    pub fn app_url(&self, path: &str) -> String {
        format!("{}{}", self.app_url, path)
    }

    pub fn prod_error_messages(&self) -> bool {
        self.prod_error_messages
    }

    pub fn is_disabled_ccpwgl(&self) -> bool {
        self.disabled_ccpwgl
    }

    pub fn prod_url(&self) -> &str {
        &self.prod_url
    }

    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    pub fn vapid_public_key(&self) -> Option<&str> {
        self.vapid_public_key.as_deref()
    }

    pub fn vapid_private_key(&self) -> Option<&str> {
        self.vapid_private_key.as_deref()
    }

    pub fn vapid_contact(&self) -> Option<&str> {
        self.vapid_contact.as_deref()
    }

    pub fn shared_secret(&self) -> Option<&str> {
        self.shared_secret.as_deref()
    }

    pub fn esi_url(&self) -> &str {
        &self.esi_url
    }

    pub fn sun_types_file(&self) -> Option<&PathBuf> {
        self.sun_types_file.as_ref()
    }
}
