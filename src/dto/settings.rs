use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Per-session preferences edited on the settings screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub notifications: bool,
    pub email_reports: bool,
    pub auto_backup: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            email_reports: false,
            auto_backup: true,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SettingsPage {
    pub app_name: &'static str,
    pub version: &'static str,
    pub api_url: String,
    pub user: User,
    pub preferences: Preferences,
}
