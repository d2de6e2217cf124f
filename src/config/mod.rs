//! Configuration module for sflow.
//!
//! Handles the config file, environment variable expansion, and settings.

mod settings;

pub use settings::{
    expand_env_vars, FilterSettings, SalesforceSettings, Settings, SettingsError, TerraformSettings,
};
