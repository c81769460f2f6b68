use serde::Deserialize;

use crate::dto::settings::Preferences;

/// Preference checkboxes. Browsers omit unchecked boxes, so absence means off.
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesForm {
    #[serde(default)]
    pub notifications: Option<String>,
    #[serde(default)]
    pub email_reports: Option<String>,
    #[serde(default)]
    pub auto_backup: Option<String>,
}

impl From<PreferencesForm> for Preferences {
    fn from(form: PreferencesForm) -> Self {
        Self {
            notifications: form.notifications.is_some(),
            email_reports: form.email_reports.is_some(),
            auto_backup: form.auto_backup.is_some(),
        }
    }
}
