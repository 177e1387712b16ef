use clap::Parser;
use doi_prefixes::config::fetch_config::FetchArgs;
use doi_prefixes::domain::ports::ConfigProvider;
use doi_prefixes::utils::logger;
use doi_prefixes::{LocalStorage, PageFetcher};

#[tokio::main]
async fn main() {
    let args = FetchArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Fetching page {} of {} (page size {})",
        args.page,
        config.endpoint(),
        config.page_size()
    );

    let storage = LocalStorage::new(config.output_dir().to_string());
    let fetcher = PageFetcher::new(storage, config);

    match fetcher.save_page(args.page).await {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            tracing::error!("Fetching page {} failed: {}", args.page, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
