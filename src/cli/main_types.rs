use crate::core::auth::Credentials;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bids-report")]
#[command(about = "Run a BI data service report and save the result as CSV")]
#[command(version)]
pub struct Cli {
    /// Username
    pub username: String,

    /// Password
    pub password: String,

    /// Client Access Key
    pub client_access_key: String,

    /// User Access Key
    pub user_access_key: String,

    #[arg(short, long)]
    pub verbose: bool,

    /// TOML job file (service URL, report, parameters, delimiter, output file)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.username.clone(),
            self.password.clone(),
            self.client_access_key.clone(),
            self.user_access_key.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parses_four_positionals() {
        let cli = Cli::try_parse_from(["bids-report", "jdoe", "pw", "CAK", "UAK"]).unwrap();
        assert_eq!(cli.username, "jdoe");
        assert_eq!(cli.user_access_key, "UAK");
        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        let credentials = cli.credentials();
        assert_eq!(credentials.client_access_key, "CAK");
    }

    #[test]
    fn test_optional_flags() {
        let cli = Cli::try_parse_from([
            "bids-report",
            "--verbose",
            "--config",
            "job.toml",
            "jdoe",
            "pw",
            "CAK",
            "UAK",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("job.toml")));
    }

    #[test]
    fn test_each_missing_positional_is_a_usage_error() {
        let full = ["bids-report", "jdoe", "pw", "CAK", "UAK"];
        for provided in 1..full.len() {
            let err = Cli::try_parse_from(&full[..provided]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }
}
