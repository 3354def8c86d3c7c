use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use recruitflow::config::AppConfig;
use recruitflow::error::AppError;
use recruitflow::pipeline::{
    stage_router, JobId, PipelineService, StageDraft, StageRepository, StageView,
};
use recruitflow::telemetry;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "RecruitFlow Stage Service",
    about = "Manage recruitment pipeline stages and candidate status reconciliation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect pipeline stage configuration from the command line
    Stages {
        #[command(subcommand)]
        command: StagesCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum StagesCommand {
    /// Render a pipeline preview with resolved colors and status vocabulary
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Optional CSV stage template to seed the pipeline from
    #[arg(long)]
    template: Option<PathBuf>,
    /// Job identifier the preview pipeline belongs to
    #[arg(long, default_value = "demo-job")]
    job: String,
    /// Application status strings to reconcile against the pipeline
    #[arg(long = "status")]
    statuses: Vec<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Stages {
            command: StagesCommand::Preview(args),
        } => run_stage_preview(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let service = Arc::new(PipelineService::new(StageRepository::new()));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(stage_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "stage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_stage_preview(args: PreviewArgs) -> Result<(), AppError> {
    let PreviewArgs {
        template,
        job,
        statuses,
    } = args;

    let job_id = JobId(job);
    let service = PipelineService::new(StageRepository::new());
    let imported = template.is_some();

    let stages = match template {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            service.import_stages(&job_id, file)?
        }
        None => seed_standard_pipeline(&service, &job_id)?,
    };

    render_stage_preview(&service, &job_id, &stages, &statuses, imported);
    Ok(())
}

/// Default pipeline used when no template is supplied.
fn standard_pipeline() -> Vec<StageDraft> {
    [
        ("Applied", 1),
        ("Screening", 2),
        ("Interview", 3),
        ("Offer", 4),
        ("Hired", 5),
    ]
    .into_iter()
    .map(|(name, order)| StageDraft {
        name: name.to_string(),
        order,
        color: None,
        description: None,
    })
    .collect()
}

fn seed_standard_pipeline(
    service: &PipelineService,
    job_id: &JobId,
) -> Result<Vec<StageView>, AppError> {
    let mut views = Vec::new();
    for draft in standard_pipeline() {
        views.push(service.create_stage(job_id, draft)?);
    }
    Ok(views)
}

fn render_stage_preview(
    service: &PipelineService,
    job_id: &JobId,
    stages: &[StageView],
    statuses: &[String],
    imported: bool,
) {
    println!("Pipeline preview for job {job_id}");
    if imported {
        println!("Data source: CSV stage template");
    } else {
        println!("Data source: standard pipeline (no template provided)");
    }

    println!("\nStages");
    for stage in stages {
        let activity = if stage.is_active { "active" } else { "inactive" };
        println!(
            "- [{}] {} | {} | {}",
            stage.order, stage.name, stage.color, activity
        );
    }

    let vocabulary = service.allowed_statuses(job_id);
    if vocabulary.is_empty() {
        println!("\nAllowed statuses: none (no managed pipeline)");
    } else {
        println!("\nAllowed statuses: {}", vocabulary.join(", "));
    }

    if !statuses.is_empty() {
        println!("\nStatus reconciliation");
        for status in statuses {
            let resolution = service.resolve_status(job_id, status);
            let verdict = if resolution.valid {
                "valid transition"
            } else {
                "fallback display"
            };
            println!("- {} -> {} ({})", status, resolution.color, verdict);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pipeline_seeds_in_order() {
        let service = PipelineService::new(StageRepository::new());
        let job_id = JobId("demo-job".to_string());
        let stages = seed_standard_pipeline(&service, &job_id).expect("seeding succeeds");

        let names: Vec<&str> = stages.iter().map(|stage| stage.name.as_str()).collect();
        assert_eq!(
            names,
            ["Applied", "Screening", "Interview", "Offer", "Hired"]
        );
        assert_eq!(
            service.allowed_statuses(&job_id),
            ["Applied", "Screening", "Interview", "Offer", "Hired"]
        );
    }

    #[test]
    fn preview_statuses_reconcile_against_seeded_pipeline() {
        let service = PipelineService::new(StageRepository::new());
        let job_id = JobId("demo-job".to_string());
        seed_standard_pipeline(&service, &job_id).expect("seeding succeeds");

        assert!(service.resolve_status(&job_id, "Interview").valid);
        assert!(!service.resolve_status(&job_id, "interview").valid);
    }
}
