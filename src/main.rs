use clap::Parser;
use doi_prefixes::utils::{logger, validation::Validate};
use doi_prefixes::{CliConfig, LineEmitter};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌 (stderr)
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    match LineEmitter::new().emit(&config.rest_prefixes_json_file, &mut out) {
        Ok(count) => {
            tracing::info!("Printed {} prefixes", count);
        }
        Err(e) => {
            tracing::error!("Failed to emit prefixes: {}", e);
            tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
