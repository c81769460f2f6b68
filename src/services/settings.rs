use crate::domain::user::User;
use crate::dto::settings::{Preferences, SettingsPage};

pub const APP_NAME: &str = "Fiado Joyería";

/// Settings screen: application info, the API in use and the session's preferences.
pub fn load_settings(user: &User, api_url: &str, preferences: Preferences) -> SettingsPage {
    SettingsPage {
        app_name: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
        api_url: api_url.to_string(),
        user: user.clone(),
        preferences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::client_user;

    #[test]
    fn settings_show_version_and_api() {
        let page = load_settings(
            &client_user(),
            "http://localhost:8080",
            Preferences::default(),
        );
        assert_eq!(page.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(page.api_url, "http://localhost:8080");
        assert!(page.preferences.notifications);
        assert!(!page.preferences.email_reports);
    }
}
