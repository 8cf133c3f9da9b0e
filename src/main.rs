use clap::Parser;
use home_score::app::commands;
use home_score::utils::error::{ErrorSeverity, HomeScoreError};
use home_score::utils::{logger, validation::Validate};
use home_score::{config, CensusClient, CliConfig, HomeScoreService};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ home-score failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<(), HomeScoreError> {
    let mut config = config::load(cli.config.as_deref())?;
    cli.overrides.apply(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let regions = config.region_table()?;
    let client = CensusClient::new(&config)?;
    let service = HomeScoreService::new(client, regions, config.scaling());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&service, &cli.command, &mut out).await
}
