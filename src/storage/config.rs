use crate::api::client::DEFAULT_TIMEOUT_SECS;
use crate::api::models::{ReportParameter, ReportRequest};
use crate::core::delimiter::Delimiter;
use crate::error::ConfigError;
use crate::utils::error_helpers::convert_io_error;
use crate::utils::validation::validate_url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_SERVICE_URL: &str = "https://service4.ultipro.com/services/BiDataService";
pub const DEFAULT_OUTPUT_FILE: &str = "Birthdays.csv";
pub const DEFAULT_REPORT_PATH: &str = "/content/folder[@name='UltiPro BI Content']/folder[@name='UltiPro BI for Core HR and Payroll']/folder[@name='_UltiPro Delivered Reports']/folder[@name='Human Resources Reports']/report[@name='Employee Birthdays']";

/// Report job description. Every field has a default, so an empty file (or no
/// file at all) runs the delivered "Employee Birthdays" report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_service_url: String,
    pub timeout_seconds: u64,
    pub delimiter: String,
    pub output_file: PathBuf,
    pub report: ReportConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub path: String,
    pub parameters: Vec<ReportParameter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_service_url: DEFAULT_DATA_SERVICE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            delimiter: ",".to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_REPORT_PATH.to_string(),
            parameters: vec![
                ReportParameter {
                    name: "EmploymentStatus".to_string(),
                    value: "A".to_string(),
                    required: false,
                    data_type: "xsdString".to_string(),
                    multi_valued: true,
                },
                ReportParameter {
                    name: "Month".to_string(),
                    value: "11".to_string(),
                    required: false,
                    data_type: "xsdDouble".to_string(),
                    multi_valued: true,
                },
            ],
        }
    }
}

impl Config {
    /// Load the job file at `path`, or the built-in job when no path is given.
    /// Nothing is read from or written to any default location.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
                hint: "Pass an existing TOML job file to --config, or omit it to run the default report"
                    .to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|e| convert_io_error(e, path))?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_url(&self.data_service_url).map_err(|_| ConfigError::InvalidValue {
            field: "data_service_url".to_string(),
            value: self.data_service_url.clone(),
            reason: "URL must start with http:// or https://".to_string(),
        })?;
        self.delimiter()?;
        if self.report.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.path".to_string(),
                value: self.report.path.clone(),
                reason: "report path cannot be empty".to_string(),
            }
            .into());
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn delimiter(&self) -> crate::Result<Delimiter> {
        Ok(self.delimiter.parse::<Delimiter>()?)
    }

    pub fn report_request(&self) -> ReportRequest {
        ReportRequest::new(self.report.path.clone(), self.report.parameters.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_reproduce_sample_job() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.data_service_url, DEFAULT_DATA_SERVICE_URL);
        assert_eq!(config.output_file, PathBuf::from("Birthdays.csv"));
        assert_eq!(config.delimiter().unwrap(), Delimiter::Char(','));
        assert_eq!(config.timeout_seconds, 60);

        let request = config.report_request();
        assert!(request.report_path().ends_with("report[@name='Employee Birthdays']"));
        let names: Vec<&str> = request.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["EmploymentStatus", "Month"]);
        assert_eq!(request.parameters()[1].data_type, "xsdDouble");
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
data_service_url = "http://localhost:8080/services/BiDataService"
delimiter = "HT"
output_file = "out.tsv"

[report]
path = "/content/report[@name='Headcount']"

[[report.parameters]]
name = "Company"
value = "ACME"
required = true
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.delimiter().unwrap(), Delimiter::Tab);
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.report.parameters.len(), 1);
        let parameter = &config.report.parameters[0];
        assert!(parameter.required);
        assert!(!parameter.multi_valued);
        assert_eq!(parameter.data_type, "xsdString");
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = Config::load(Some(Path::new("/definitely/not/here/job.toml")));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_delimiter = Config::from_toml(r#"delimiter = "TAB""#);
        assert!(matches!(
            bad_delimiter,
            Err(AppError::Config(ConfigError::InvalidValue { ref field, .. })) if field == "delimiter"
        ));

        let bad_url = Config::from_toml(r#"data_service_url = "service4.ultipro.com""#);
        assert!(matches!(
            bad_url,
            Err(AppError::Config(ConfigError::InvalidValue { ref field, .. })) if field == "data_service_url"
        ));

        let empty_path = Config::from_toml("[report]\npath = \"\"\n");
        assert!(empty_path.is_err());
    }

    #[test]
    fn test_unknown_keys_are_parse_errors() {
        let result = Config::from_toml(r#"delimeter = ";""#);
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::ParseError { .. }))
        ));
    }
}
