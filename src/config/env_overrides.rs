use super::VikingConfig;
use super::schema::{API_KEY_ENV, BASE_URL_ENV, RESOURCE_ID_ENV, non_empty};

impl VikingConfig {
    /// Fill credentials the config file left empty from the process
    /// environment. Values from the file always win.
    pub fn apply_env_fallbacks(&mut self) {
        self.apply_env_fallbacks_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_fallbacks_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fill = |slot: &mut Option<String>, key: &str| {
            if non_empty(slot.as_deref()).is_none()
                && let Some(value) = lookup(key).filter(|v| !v.trim().is_empty())
            {
                *slot = Some(value);
            }
        };

        fill(&mut self.api_key, API_KEY_ENV);
        fill(&mut self.resource_id, RESOURCE_ID_ENV);
        fill(&mut self.base_url, BASE_URL_ENV);
    }
}
