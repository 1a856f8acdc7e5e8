use clap::Parser;
use maven_copilot::core::selection::load_selection;
use maven_copilot::core::ConfigProvider;
use maven_copilot::utils::format::NumberFormat;
use maven_copilot::utils::{logger, validation::Validate};
use maven_copilot::{
    render_dashboard, CliConfig, HttpAnalysisClient, LocalStorage, OutputFormat, SubmitOutcome,
    UploadController,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 先解析設定，日誌格式依最終的輸出格式決定
    let resolved = config
        .validate()
        .and_then(|_| config.settings())
        .and_then(|settings| settings.validate().map(|_| settings));

    let json_logs = resolved.as_ref().map(|s| s.json_logs()).unwrap_or(false);
    if json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting maven-copilot");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }
    if let Some(path) = &config.config {
        tracing::info!("📁 Loaded configuration from: {}", path);
    }

    // 驗證配置
    let settings = match resolved {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::info!("🔗 Analysis endpoint: {}", settings.endpoint());

    let storage = LocalStorage::new(".".to_string());
    let number_format = NumberFormat::new(settings.locale());
    let mut controller = UploadController::new(HttpAnalysisClient::from_config(&settings));
    let mut failed_uploads = 0;

    for path in &config.files {
        let file = match load_selection(&storage, path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("❌ Could not select {}: {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                failed_uploads += 1;
                continue;
            }
        };

        controller.select_file(file);
        if let SubmitOutcome::Failed { reason, .. } = controller.submit().await {
            tracing::debug!("Upload failure kind: {:?}", reason.kind);
            failed_uploads += 1;
        }

        let screen = render_dashboard(controller.state(), &number_format);
        match settings.format {
            OutputFormat::Text => println!("{}", screen),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&screen)?),
        }
    }

    if failed_uploads > 0 {
        tracing::warn!("{} of {} uploads failed", failed_uploads, config.files.len());
        std::process::exit(2);
    }

    Ok(())
}
