use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use fraud_guard::assessment::{
    AnswerSet, AssessmentEngine, AssessmentResult, AssessmentWizard, Question, WizardStep,
};
use fraud_guard::chat::{preset_scenarios, ChatAdvisor, PresetScenario, ScenarioKind};
use fraud_guard::config::AppConfig;
use fraud_guard::education::{CaseCatalog, CaseFilter, CaseStatistics, FraudCase};
use fraud_guard::error::AppError;
use fraud_guard::session::{ChatMessage, ChatRole, SessionState};
use fraud_guard::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    engine: Arc<AssessmentEngine>,
    advisor: Arc<ChatAdvisor>,
    catalog: Arc<CaseCatalog>,
    session: Arc<Mutex<SessionState>>,
    reply_delay: Duration,
}

#[derive(Parser, Debug)]
#[command(
    name = "Fraud Guard",
    about = "Run the fraud-awareness platform service from the command line",
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
    /// Run a risk assessment without starting the server
    Assess {
        #[command(subcommand)]
        command: AssessCommand,
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
enum AssessCommand {
    /// List the questionnaire with option values and weights
    Questions,
    /// Score a set of answers and print the risk result
    Score(AssessScoreArgs),
}

#[derive(Args, Debug)]
struct AssessScoreArgs {
    /// Answer as question-id=option-value; repeat for each question
    #[arg(long = "answer", value_parser = parse_answer)]
    answers: Vec<(String, String)>,
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() && !value.trim().is_empty() => {
            Ok((id.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected question-id=option-value, got '{raw}'")),
    }
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
        Command::Assess {
            command: AssessCommand::Questions,
        } => {
            render_questionnaire(&AssessmentEngine::standard());
            Ok(())
        }
        Command::Assess {
            command: AssessCommand::Score(args),
        } => run_assessment(args),
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
        engine: Arc::new(AssessmentEngine::standard()),
        advisor: Arc::new(ChatAdvisor::new()),
        catalog: Arc::new(CaseCatalog::standard()),
        session: Arc::new(Mutex::new(SessionState::new())),
        reply_delay: Duration::from_millis(config.chat.reply_delay_ms),
    };

    let app = build_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fraud awareness platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/assessment/questionnaire",
            get(questionnaire_endpoint),
        )
        .route("/api/v1/assessment/score", post(score_endpoint))
        .route("/api/v1/chat/scenarios", get(chat_scenarios_endpoint))
        .route("/api/v1/chat/advise", post(chat_advise_endpoint))
        .route(
            "/api/v1/chat/history",
            get(chat_history_endpoint).delete(chat_clear_endpoint),
        )
        .route("/api/v1/cases/search", post(case_search_endpoint))
        .route("/api/v1/cases/statistics", get(case_statistics_endpoint))
        .with_state(state)
}

fn run_assessment(args: AssessScoreArgs) -> Result<(), AppError> {
    let engine = AssessmentEngine::standard();
    let answers: AnswerSet = args.answers.into_iter().collect();

    let mut wizard = AssessmentWizard::new(engine);
    loop {
        if let Some(question) = wizard.current_question() {
            if let Some(value) = answers.choice(&question.id) {
                let value = value.to_string();
                wizard.select(value);
            }
        }
        if let WizardStep::Completed(result) = wizard.advance()? {
            render_assessment(
                &result,
                wizard.answers().answered_count(),
                wizard.question_count(),
            );
            return Ok(());
        }
    }
}

fn render_questionnaire(engine: &AssessmentEngine) {
    println!("Risk assessment questionnaire");
    for (index, question) in engine.questionnaire().questions().iter().enumerate() {
        println!("\n{}. {} (id: {})", index + 1, question.prompt, question.id);
        for option in &question.options {
            println!(
                "   - {} = {} (weight {})",
                option.value, option.label, option.score
            );
        }
    }
}

fn render_assessment(result: &AssessmentResult, answered: usize, total: usize) {
    println!("Risk assessment result");
    println!("Questions answered: {answered}/{total}");
    println!(
        "Score: {}/{} ({}%)",
        result.raw_score, result.max_score, result.percentage
    );
    println!("Risk tier: {}", result.risk_tier.label());
    println!("\nRecommendations");
    for recommendation in &result.recommendations {
        println!("- {recommendation}");
    }
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

#[derive(Debug, Serialize)]
struct QuestionnaireResponse {
    questions: Vec<Question>,
}

async fn questionnaire_endpoint(State(state): State<AppState>) -> Json<QuestionnaireResponse> {
    Json(QuestionnaireResponse {
        questions: state.engine.questionnaire().questions().to_vec(),
    })
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    answers: AnswerSet,
}

async fn score_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<AssessmentResult>, AppError> {
    let result = state.engine.score(&payload.answers)?;

    let mut session = state.session.lock().unwrap_or_else(PoisonError::into_inner);
    session.set_assessment_result(Some(result.clone()));

    Ok(Json(result))
}

async fn chat_scenarios_endpoint() -> Json<Vec<PresetScenario>> {
    Json(preset_scenarios())
}

#[derive(Debug, Deserialize)]
struct AdviseRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct AdviseResponse {
    scenario: Option<ScenarioKind>,
    reply: String,
}

async fn chat_advise_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<AdviseRequest>,
) -> Json<AdviseResponse> {
    // UI pacing only; the reply itself is a synchronous lookup.
    if !state.reply_delay.is_zero() {
        tokio::time::sleep(state.reply_delay).await;
    }

    let advice = state.advisor.respond(&payload.message);

    let mut session = state.session.lock().unwrap_or_else(PoisonError::into_inner);
    session.add_chat_message(ChatRole::User, payload.message);
    session.add_chat_message(ChatRole::Assistant, advice.reply.clone());

    Json(AdviseResponse {
        scenario: advice.scenario,
        reply: advice.reply,
    })
}

async fn chat_history_endpoint(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    let session = state.session.lock().unwrap_or_else(PoisonError::into_inner);
    Json(session.chat_history().to_vec())
}

async fn chat_clear_endpoint(State(state): State<AppState>) -> StatusCode {
    let mut session = state.session.lock().unwrap_or_else(PoisonError::into_inner);
    session.clear_chat_history();
    StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize)]
struct CaseSearchResponse {
    total: usize,
    cases: Vec<FraudCase>,
}

async fn case_search_endpoint(
    State(state): State<AppState>,
    Json(filter): Json<CaseFilter>,
) -> Json<CaseSearchResponse> {
    let cases: Vec<FraudCase> = state.catalog.search(&filter).into_iter().cloned().collect();

    Json(CaseSearchResponse {
        total: cases.len(),
        cases,
    })
}

async fn case_statistics_endpoint(State(state): State<AppState>) -> Json<CaseStatistics> {
    Json(state.catalog.statistics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraud_guard::assessment::RiskTier;
    use fraud_guard::education::FraudCategory;

    // The prometheus recorder is process-global, so the pair is created
    // once and shared across tests.
    fn metrics_handle() -> PrometheusHandle {
        static HANDLE: std::sync::OnceLock<PrometheusHandle> = std::sync::OnceLock::new();
        HANDLE
            .get_or_init(|| {
                let (_layer, handle) = PrometheusMetricLayer::pair();
                handle
            })
            .clone()
    }

    fn test_state() -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: metrics_handle(),
            engine: Arc::new(AssessmentEngine::standard()),
            advisor: Arc::new(ChatAdvisor::new()),
            catalog: Arc::new(CaseCatalog::standard()),
            session: Arc::new(Mutex::new(SessionState::new())),
            reply_delay: Duration::ZERO,
        }
    }

    #[test]
    fn parse_answer_requires_both_halves() {
        assert!(parse_answer("age=18-25").is_ok());
        assert!(parse_answer("age=").is_err());
        assert!(parse_answer("=18-25").is_err());
        assert!(parse_answer("age").is_err());
    }

    #[tokio::test]
    async fn questionnaire_endpoint_returns_eight_questions() {
        let state = test_state();
        let Json(body) = questionnaire_endpoint(State(state)).await;
        assert_eq!(body.questions.len(), 8);
        assert!(body.questions.iter().all(|q| !q.options.is_empty()));
    }

    #[tokio::test]
    async fn score_endpoint_scores_and_stores_the_result() {
        let state = test_state();
        let mut answers = AnswerSet::new();
        answers.select("age", "18-25");
        answers.select("fraud-awareness", "not-at-all");

        let Json(body) = score_endpoint(State(state.clone()), Json(ScoreRequest { answers }))
            .await
            .expect("scores");

        assert_eq!(body.raw_score, 6);
        let session = state.session.lock().expect("session lock");
        let stored = session.assessment_result().expect("result stored");
        assert_eq!(stored.percentage, body.percentage);
    }

    #[tokio::test]
    async fn advise_endpoint_records_both_turns() {
        let state = test_state();
        let Json(body) = chat_advise_endpoint(
            State(state.clone()),
            Json(AdviseRequest {
                message: "Someone promises huge investment returns".to_string(),
            }),
        )
        .await;

        assert_eq!(body.scenario, Some(ScenarioKind::Investment));
        let session = state.session.lock().expect("session lock");
        let history = session.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(history[1].content, body.reply);
    }

    #[tokio::test]
    async fn clearing_history_empties_the_transcript() {
        let state = test_state();
        chat_advise_endpoint(
            State(state.clone()),
            Json(AdviseRequest {
                message: "refund".to_string(),
            }),
        )
        .await;

        let status = chat_clear_endpoint(State(state.clone())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(history) = chat_history_endpoint(State(state)).await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn case_search_endpoint_applies_the_filter() {
        let state = test_state();
        let filter = CaseFilter {
            search: None,
            category: Some(FraudCategory::Investment),
            region: None,
        };

        let Json(body) = case_search_endpoint(State(state), Json(filter)).await;
        assert_eq!(body.total, 1);
        assert!(body
            .cases
            .iter()
            .all(|case| case.category == FraudCategory::Investment));
    }

    #[tokio::test]
    async fn statistics_endpoint_reports_every_category() {
        let state = test_state();
        let Json(stats) = case_statistics_endpoint(State(state)).await;
        assert_eq!(stats.by_category.len(), 5);
        assert_eq!(stats.total, 6);
    }

    #[tokio::test]
    async fn router_serves_health_and_scoring_routes() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let app = build_router(test_state());

        let health = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(health.status(), StatusCode::OK);

        let score = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessment/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"answers":{"age":"18-25"}}"#))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(score.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_answer_set_lands_in_the_low_tier() {
        let state = test_state();
        let Json(body) = score_endpoint(
            State(state),
            Json(ScoreRequest {
                answers: AnswerSet::new(),
            }),
        )
        .await
        .expect("scores");

        assert_eq!(body.percentage, 0);
        assert_eq!(body.risk_tier, RiskTier::Low);
    }
}
