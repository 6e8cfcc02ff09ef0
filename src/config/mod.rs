pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::directory::DEFAULT_REVIEW_PAGE;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::{default_data_dir, AppConfig, ENV_DATA_DIR};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "company-finder")]
#[command(about = "Search companies, read their reviews and keep a local list of favorites")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Directory holding the favorites file")]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Search companies by name
    Search { query: String },
    /// Company details with the first page of reviews
    Show { domain: String },
    /// One page of reviews for a company domain
    Reviews {
        domain: String,
        #[arg(long, default_value_t = DEFAULT_REVIEW_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// List saved favorites
    Favorites,
    /// Save a company (looked up by domain) as a favorite
    Favorite { domain: String },
    /// Remove a favorite by company id
    Unfavorite { company_id: String },
    /// Flip the favorite state of a company (looked up by domain)
    Toggle { domain: String },
    /// Report whether a company id is a favorite
    Check { company_id: String },
}

#[cfg(feature = "cli")]
impl Command {
    /// Commands that only touch local favorites and need no API credentials.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Command::Favorites | Command::Unfavorite { .. } | Command::Check { .. }
        )
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入完整設定：有 --config 就讀檔，否則讀環境變數
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::from_env()?,
        };
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        Ok(config)
    }

    /// Favorites directory without requiring API settings.
    pub fn storage_dir(&self) -> Result<String> {
        if let Some(data_dir) = &self.data_dir {
            return Ok(data_dir.clone());
        }
        if let Some(path) = &self.config {
            return Ok(AppConfig::from_file(path)?.storage.data_dir);
        }
        Ok(std::env::var(ENV_DATA_DIR).unwrap_or_else(|_| default_data_dir()))
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reviews_with_page() {
        let cli = CliConfig::try_parse_from([
            "company-finder",
            "reviews",
            "acme.com",
            "--page",
            "2",
            "--data-dir",
            "/tmp/x",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Reviews {
                domain: "acme.com".to_string(),
                page: 2
            }
        );
        assert_eq!(cli.storage_dir().unwrap(), "/tmp/x");
    }

    #[test]
    fn test_reviews_page_defaults_to_one_and_rejects_zero() {
        let cli = CliConfig::try_parse_from(["company-finder", "reviews", "acme.com"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Reviews {
                domain: "acme.com".to_string(),
                page: 1
            }
        );

        assert!(
            CliConfig::try_parse_from(["company-finder", "reviews", "acme.com", "--page", "0"])
                .is_err()
        );
    }

    #[test]
    fn test_local_commands() {
        assert!(Command::Favorites.is_local());
        assert!(Command::Check {
            company_id: "c1".to_string()
        }
        .is_local());
        assert!(!Command::Search {
            query: "acme".to_string()
        }
        .is_local());
    }
}
