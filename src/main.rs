use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use report_builder_ui::api::HttpBackend;
use report_builder_ui::commands::ReportCommands;
use report_builder_ui::state::{ClientSettings, ConfigManager, PreviewArea, ReportForm};

const USAGE: &str = "usage: report-builder-ui preview <report_id> <csrf_token>\n       \
                     report-builder-ui download <report_id>";

fn main() -> Result<()> {
    env_logger::init();

    let settings = match ConfigManager::new().and_then(|config| config.load_settings()) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Failed to load settings, using defaults: {err:#}");
            ClientSettings::default()
        }
    }
    .with_env_overrides();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(run(settings, &args))
}

async fn run(settings: ClientSettings, args: &[String]) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&settings)?);
    log::debug!("Using {} with path prefix {:?}", settings.base_url, backend.prefix());

    match args {
        [command, report_id, csrf_token] if command == "preview" => {
            let form = ReportForm::new(report_id.as_str(), csrf_token.as_str(), settings)
                .into_shared();
            ReportCommands::refresh_preview(&form, backend.as_ref()).await;
            let form = form.lock();
            match form.preview() {
                PreviewArea::Loaded(html) => println!("{html}"),
                other => bail!("Preview failed:\n{}", other.html()),
            }
        }
        [command, report_id] if command == "download" => {
            let poll_interval = settings.poll_interval();
            let form = ReportForm::new(report_id.as_str(), "", settings).into_shared();
            let task_id = ReportCommands::start_report_job(&form, &backend).await?;
            eprintln!("Waiting for task {task_id}...");
            loop {
                tokio::time::sleep(poll_interval.max(Duration::from_millis(100))).await;
                if let Some(link) = form.lock().navigate_to() {
                    println!("{link}");
                    break;
                }
            }
            form.lock().teardown();
        }
        _ => bail!("{USAGE}"),
    }
    Ok(())
}
