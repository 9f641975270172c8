use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Inputs, run_simulation};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Web payloads are partial; any field left out falls back to the CLI
/// default before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    balance: Option<f64>,
    apr: Option<f64>,
    minimum_percentage: Option<f64>,
    fixed_amount: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "payoff",
    about = "Credit card repayment simulator (minimum, fixed-at-initial-minimum, and custom fixed payments)"
)]
struct Cli {
    #[arg(long, default_value_t = 5000.0, help = "Current card balance")]
    balance: f64,
    #[arg(
        long,
        default_value_t = 18.9,
        help = "Annual percentage rate in percent, e.g. 18.9"
    )]
    apr: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Minimum repayment as a percent of the outstanding balance"
    )]
    minimum_percentage: f64,
    #[arg(
        long,
        default_value_t = 200.0,
        help = "Custom fixed monthly payment amount"
    )]
    fixed_amount: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    if !cli.balance.is_finite() || cli.balance <= 0.0 {
        return Err("--balance must be > 0".to_string());
    }

    if !cli.apr.is_finite() || cli.apr <= 0.0 {
        return Err("--apr must be > 0".to_string());
    }

    if !cli.minimum_percentage.is_finite() || cli.minimum_percentage <= 0.0 {
        return Err("--minimum-percentage must be > 0".to_string());
    }

    if !cli.fixed_amount.is_finite() || cli.fixed_amount <= 0.0 {
        return Err("--fixed-amount must be > 0".to_string());
    }

    Ok(Inputs {
        balance: cli.balance,
        apr: cli.apr,
        minimum_percentage: cli.minimum_percentage,
        fixed_amount: cli.fixed_amount,
    })
}

pub fn run_cli(args: Vec<String>) -> Result<(), String> {
    let cli = Cli::parse_from(std::iter::once("payoff".to_string()).chain(args));
    let inputs = build_inputs(cli)?;
    let result = run_simulation(&inputs);
    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| format!("Failed to serialize result: {e}"))?;
    println!("{json}");
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Payoff HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    json_response(StatusCode::OK, run_simulation(&inputs))
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: SimulatePayload) -> Result<Inputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.balance {
        cli.balance = v;
    }
    if let Some(v) = payload.apr {
        cli.apr = v;
    }
    if let Some(v) = payload.minimum_percentage {
        cli.minimum_percentage = v;
    }
    if let Some(v) = payload.fixed_amount {
        cli.fixed_amount = v;
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        balance: 5_000.0,
        apr: 18.9,
        minimum_percentage: 2.0,
        fixed_amount: 200.0,
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        default_cli_for_api()
    }

    #[test]
    fn build_inputs_accepts_defaults() {
        let inputs = build_inputs(sample_cli()).expect("defaults are valid");
        assert_approx(inputs.balance, 5_000.0);
        assert_approx(inputs.apr, 18.9);
        assert_approx(inputs.minimum_percentage, 2.0);
        assert_approx(inputs.fixed_amount, 200.0);
    }

    #[test]
    fn build_inputs_rejects_non_positive_balance() {
        let mut cli = sample_cli();
        cli.balance = 0.0;
        let err = build_inputs(cli).expect_err("must reject zero balance");
        assert!(err.contains("--balance"));
    }

    #[test]
    fn build_inputs_rejects_non_positive_apr() {
        let mut cli = sample_cli();
        cli.apr = -1.0;
        let err = build_inputs(cli).expect_err("must reject negative apr");
        assert!(err.contains("--apr"));
    }

    #[test]
    fn build_inputs_rejects_non_positive_minimum_percentage() {
        let mut cli = sample_cli();
        cli.minimum_percentage = 0.0;
        let err = build_inputs(cli).expect_err("must reject zero percentage");
        assert!(err.contains("--minimum-percentage"));
    }

    #[test]
    fn build_inputs_rejects_non_finite_fixed_amount() {
        let mut cli = sample_cli();
        cli.fixed_amount = f64::NAN;
        let err = build_inputs(cli).expect_err("must reject NaN fixed amount");
        assert!(err.contains("--fixed-amount"));
    }

    #[test]
    fn inputs_from_json_parses_web_keys() {
        let json = r#"{
          "balance": 2500,
          "apr": 21.5,
          "minimumPercentage": 2.5,
          "fixedAmount": 150
        }"#;
        let inputs = inputs_from_json(json).expect("json should parse");

        assert_approx(inputs.balance, 2_500.0);
        assert_approx(inputs.apr, 21.5);
        assert_approx(inputs.minimum_percentage, 2.5);
        assert_approx(inputs.fixed_amount, 150.0);
    }

    #[test]
    fn inputs_from_json_falls_back_to_defaults_for_missing_keys() {
        let inputs = inputs_from_json(r#"{"balance": 1200}"#).expect("json should parse");
        assert_approx(inputs.balance, 1_200.0);
        assert_approx(inputs.apr, 18.9);
        assert_approx(inputs.minimum_percentage, 2.0);
        assert_approx(inputs.fixed_amount, 200.0);
    }

    #[test]
    fn inputs_from_json_rejects_non_positive_values() {
        let err = inputs_from_json(r#"{"apr": -5}"#).expect_err("must reject negative apr");
        assert!(err.contains("--apr"));
    }

    #[test]
    fn simulate_response_serialization_contains_expected_fields() {
        let inputs = build_inputs(sample_cli()).expect("valid inputs");
        let result = run_simulation(&inputs);
        let json = serde_json::to_string(&result).expect("result should serialize");

        assert!(json.contains("\"minimumPayments\""));
        assert!(json.contains("\"fixedMinimumPayments\""));
        assert!(json.contains("\"fixedCustomPayments\""));
        assert!(json.contains("\"totalPaidMinimum\""));
        assert!(json.contains("\"totalPaidFixedMinimum\""));
        assert!(json.contains("\"totalPaidFixedCustom\""));
        assert!(json.contains("\"timeToPayMinimum\""));
        assert!(json.contains("\"timeToPayFixedMinimum\""));
        assert!(json.contains("\"timeToPayFixedCustom\""));
        assert!(json.contains("\"initialMinimumPayment\""));
        assert!(json.contains("\"month\":1"));
    }
}
