mod env_overrides;
pub mod jsonc;
mod loader;
pub mod schema;

pub use schema::{
    API_KEY_ENV, BASE_URL_ENV, Credentials, DEFAULT_BASE_URL, RESOURCE_ID_ENV, VikingConfig,
};
