use clap::Parser;
use company_finder::app::commands;
use company_finder::utils::error::ErrorSeverity;
use company_finder::utils::{logger, validation::Validate};
use company_finder::{
    CliConfig, CompanyCatalog, DirectoryClient, FavoritesStore, FinderError, LocalStorage,
};

async fn execute(cli: &CliConfig) -> Result<String, FinderError> {
    if cli.command.is_local() {
        let storage = LocalStorage::new(cli.storage_dir()?);
        tracing::debug!("Using favorites in {}", storage.base_path());
        let favorites = FavoritesStore::new(storage);
        return commands::run_local(&favorites, &cli.command).await;
    }

    let config = cli.load_app_config()?;
    config.validate()?;

    let directory = DirectoryClient::new(&config)?;
    let favorites = FavoritesStore::new(LocalStorage::new(config.data_dir().to_string()));
    let catalog = CompanyCatalog::new(directory, favorites);

    commands::run(&catalog, &cli.command).await
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    match execute(&cli).await {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
