use clap::Parser;
use job_insights::domain::model::LoadState;
use job_insights::domain::ports::ConfigProvider;
use job_insights::utils::logger;
use job_insights::{CliConfig, HttpGateway, InsightsEngine, InsightsError, Selection, View};
use serde::Serialize;
use serde_json::{json, Map, Value};

fn exit_with(e: &InsightsError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code())
}

/// Writes one view into the output document; returns whether it failed.
fn render<T: Serialize>(
    output: &mut Map<String, Value>,
    name: &str,
    state: Option<LoadState<T>>,
) -> serde_json::Result<bool> {
    let (entry, failed) = match state {
        Some(LoadState::Ready(view)) => (
            json!({"status": "ready", "data": serde_json::to_value(view)?}),
            false,
        ),
        Some(LoadState::Degraded { data, reason }) => (
            json!({"status": "degraded", "error": reason, "data": serde_json::to_value(data)?}),
            false,
        ),
        Some(LoadState::Failed { message }) => (json!({"status": "failed", "error": message}), true),
        None => (json!({"status": "not_loaded"}), false),
    };
    output.insert(name.to_string(), entry);
    Ok(failed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting job-insights CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.resolve().unwrap_or_else(|e| exit_with(&e));
    let gateway = HttpGateway::from_config(&config).unwrap_or_else(|e| exit_with(&e));
    let engine = InsightsEngine::new(gateway, config.view_options());
    let selection = Selection::parse(config.default_country());

    tracing::info!(
        "📡 Gateway: {} | Country: {} | View: {:?}",
        config.base_url(),
        selection,
        cli.view
    );

    match cli.view.resource() {
        Some(resource) => {
            engine.refresh(resource).await;
        }
        None => engine.refresh_all().await,
    }

    let mut output = Map::new();
    let mut failed = false;
    if matches!(cli.view, View::Dashboard | View::All) {
        failed |= render(&mut output, "dashboard", engine.dashboard_view(&selection))?;
    }
    if matches!(cli.view, View::Skills | View::All) {
        failed |= render(&mut output, "skills", engine.skills_view(&selection))?;
    }
    if matches!(cli.view, View::Jobs | View::All) {
        failed |= render(&mut output, "jobs", engine.jobs_view())?;
    }
    if matches!(cli.view, View::Forecast | View::All) {
        failed |= render(&mut output, "forecast", engine.forecast_view(&selection))?;
    }

    if let Some(question) = &cli.ask {
        // 問答需要儀表板的技能資料作為上下文
        if engine.dashboard_view(&selection).is_none() {
            engine.refresh_dashboard().await;
        }
        if let Some(answer) = engine.ask(question, &selection).await {
            output.insert("answer".to_string(), Value::String(answer));
        }
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(output))?);

    if failed {
        tracing::error!("❌ One or more views could not be loaded");
        std::process::exit(2);
    }

    tracing::info!("✅ Done");
    Ok(())
}
