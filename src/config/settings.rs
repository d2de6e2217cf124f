//! TOML-based configuration for sflow.
//!
//! Supports a config file (sflow.toml) with environment variable expansion.
//! Every key is optional; the defaults reproduce the stock AppFlow/Snowflake
//! layout.
//!
//! Example configuration:
//! ```toml
//! [salesforce]
//! login_url = "https://test.salesforce.com"
//! api_version = "59.0"
//! username = "${SFDC_USERNAME}"
//! password = "${SFDC_PASSWORD}"
//! security_token = "${SFDC_SECURITYTOKEN}"
//!
//! [filter]
//! ignored_fields = ["Secret__c"]
//! ignored_datatypes = []
//!
//! [terraform]
//! destination_database = "STAGING"
//! destination_schema = "SALESFORCE"
//! schedule_expression = "rate(1days)"
//! schedule_start_hour = 8
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::metadata::{SalesforceCredentials, DEFAULT_API_VERSION, DEFAULT_LOGIN_URL};
use crate::record::FieldFilter;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Salesforce connection settings.
    pub salesforce: SalesforceSettings,

    /// Field exclusion lists.
    pub filter: FilterSettings,

    /// Terraform rendering settings.
    pub terraform: TerraformSettings,
}

/// Salesforce connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SalesforceSettings {
    /// Login endpoint (`https://test.salesforce.com` for sandboxes).
    pub login_url: String,

    /// API version for the SOAP and REST calls.
    pub api_version: String,

    /// Username (supports ${ENV_VAR} expansion).
    pub username: String,

    /// Password (supports ${ENV_VAR} expansion).
    pub password: String,

    /// Security token appended to the password (supports ${ENV_VAR} expansion).
    pub security_token: String,

    /// Connect timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SalesforceSettings {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            username: "${SFDC_USERNAME}".to_string(),
            password: "${SFDC_PASSWORD}".to_string(),
            security_token: "${SFDC_SECURITYTOKEN}".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl SalesforceSettings {
    /// Credentials with environment variables expanded.
    pub fn credentials(&self) -> Result<SalesforceCredentials, SettingsError> {
        Ok(SalesforceCredentials::new(
            expand_env_vars(&self.username)?,
            expand_env_vars(&self.password)?,
            expand_env_vars(&self.security_token)?,
        ))
    }

    /// Login URL with environment variables expanded.
    pub fn resolved_login_url(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.login_url)
    }

    /// Connect timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Field exclusion lists, added on top of
/// [`DEFAULT_IGNORED_FIELDS`](crate::record::DEFAULT_IGNORED_FIELDS).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Extra qualified API names that are never extracted.
    pub ignored_fields: Vec<String>,

    /// Native type labels that are never extracted.
    pub ignored_datatypes: Vec<String>,
}

impl FilterSettings {
    /// Build the field filter. The default system fields are always ignored.
    pub fn to_filter(&self) -> FieldFilter {
        let filter = self
            .ignored_fields
            .iter()
            .fold(FieldFilter::default(), |filter, name| filter.ignore_field(name.as_str()));

        self.ignored_datatypes
            .iter()
            .fold(filter, |filter, label| filter.ignore_datatype(label.as_str()))
    }
}

/// Terraform rendering settings.
///
/// Resource references are written verbatim into the output, so they must
/// name resources defined elsewhere in the Terraform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TerraformSettings {
    /// Prefix for the flow and table resource names.
    pub resource_prefix: String,

    /// Source connector profile resource.
    pub source_connector_profile: String,

    /// Destination connector profile resource.
    pub destination_connector_profile: String,

    /// S3 object resource used as the intermediate stage.
    pub stage_object: String,

    /// Snowflake database receiving the data.
    pub destination_database: String,

    /// Snowflake schema receiving the data.
    pub destination_schema: String,

    /// Snowflake schema resource the table belongs to.
    pub snowflake_schema_resource: String,

    /// Timestamp field driving incremental pulls.
    pub incremental_field: String,

    /// Pull soft-deleted records as well.
    pub include_deleted_records: bool,

    /// Stop the flow at the first destination error.
    pub fail_on_first_destination_error: bool,

    /// AppFlow schedule expression.
    pub schedule_expression: String,

    /// UTC hour of tomorrow at which the schedule starts.
    pub schedule_start_hour: u32,
}

impl Default for TerraformSettings {
    fn default() -> Self {
        Self {
            resource_prefix: "salesforce".to_string(),
            source_connector_profile: "aws_appflow_connector_profile.salesforce_connector_profile".to_string(),
            destination_connector_profile: "aws_appflow_connector_profile.snowflake_connector_profile".to_string(),
            stage_object: "aws_s3_object.salesforce_stage_object".to_string(),
            destination_database: "STAGING".to_string(),
            destination_schema: "SALESFORCE".to_string(),
            snowflake_schema_resource: "snowflake_schema.salesforce_schema".to_string(),
            incremental_field: "SystemModstamp".to_string(),
            include_deleted_records: true,
            fail_on_first_destination_error: false,
            schedule_expression: "rate(1days)".to_string(),
            schedule_start_hour: 8,
        }
    }
}

impl TerraformSettings {
    /// Check values that would otherwise produce broken output.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.schedule_start_hour > 23 {
            return Err(SettingsError::InvalidConfig(format!(
                "terraform.schedule_start_hour must be 0-23, got {}",
                self.schedule_start_hour
            )));
        }
        if self.resource_prefix.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "terraform.resource_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.terraform.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SFLOW_CONFIG`
    /// 2. `./sflow.toml`
    /// 3. `~/.config/sflow/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SFLOW_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("sflow.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sflow").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Load from an explicit path if given, otherwise from the default locations.
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                name.push(ch);
            }
            name
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                // Lone `$`
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
