use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{GrowthInput, ProjectError, TurnoverPolicy, project};

#[derive(Parser, Debug)]
#[command(
    name = "seatcast",
    about = "Coworking seat revenue projector (12-month linear, steady, and exponential scenarios)"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 500.0,
        help = "Membership fee per occupied seat per month"
    )]
    membership_fee: f64,
    #[arg(long, default_value_t = 100, help = "Total seat capacity of the space")]
    total_seats: u32,
    #[arg(
        long,
        default_value_t = 20,
        help = "Seats occupied at the start of month 1"
    )]
    occupied_seats: u32,
    #[arg(
        long,
        default_value_t = 2,
        help = "Seats vacated by departing members each month"
    )]
    turnover_seats: u32,
    #[arg(
        long,
        conflicts_with = "turnover_seats",
        help = "Percentage of occupied seats vacated each month; replaces --turnover-seats"
    )]
    turnover_rate: Option<f64>,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Exponential-scenario acquisition pace as a percentage of current occupancy, e.g. 5 for 5%"
    )]
    growth_factor: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    membership_fee: Option<f64>,
    total_seats: Option<u32>,
    occupied_seats: Option<u32>,
    turnover_seats: Option<u32>,
    growth_factor: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<GrowthInput, String> {
    if !cli.membership_fee.is_finite() || cli.membership_fee <= 0.0 {
        return Err("--membership-fee must be > 0".to_string());
    }

    if cli.occupied_seats > cli.total_seats {
        return Err("--occupied-seats cannot exceed --total-seats".to_string());
    }

    if let Some(rate) = cli.turnover_rate {
        if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
            return Err("--turnover-rate must be between 0 and 100".to_string());
        }
    }

    if !cli.growth_factor.is_finite() || cli.growth_factor < 0.0 {
        return Err("--growth-factor must be >= 0".to_string());
    }

    let turnover = match cli.turnover_rate {
        Some(rate) => TurnoverPolicy::Rate(rate),
        None => TurnoverPolicy::Seats(cli.turnover_seats),
    };

    Ok(GrowthInput {
        membership_fee: cli.membership_fee,
        total_seats: cli.total_seats,
        occupied_seats: cli.occupied_seats,
        turnover,
        growth_factor: cli.growth_factor,
    })
}

pub fn run_cli() -> Result<String, String> {
    let input = build_inputs(Cli::parse())?;
    let projection = project(&input).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&projection).map_err(|e| format!("Failed to encode projection: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/calculate_growth",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("seatcast HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/calculate_growth");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    calculate_handler_impl(payload)
}

async fn calculate_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    calculate_handler_impl(payload)
}

fn calculate_handler_impl(payload: ProjectPayload) -> Response {
    let input = match growth_input_from_payload(payload) {
        Ok(input) => input,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match project(&input) {
        Ok(projection) => json_response(StatusCode::OK, projection),
        Err(err @ ProjectError::InvalidInput { .. }) => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err @ ProjectError::Overflow { .. }) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
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
fn growth_input_from_json(json: &str) -> Result<GrowthInput, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    growth_input_from_payload(payload)
}

// Missing payload fields fall back to the CLI defaults.
fn growth_input_from_payload(payload: ProjectPayload) -> Result<GrowthInput, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.membership_fee {
        cli.membership_fee = v;
    }
    if let Some(v) = payload.total_seats {
        cli.total_seats = v;
    }
    if let Some(v) = payload.occupied_seats {
        cli.occupied_seats = v;
    }
    if let Some(v) = payload.turnover_seats {
        cli.turnover_seats = v;
    }
    if let Some(v) = payload.growth_factor {
        cli.growth_factor = v;
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        membership_fee: 500.0,
        total_seats: 100,
        occupied_seats: 20,
        turnover_seats: 2,
        turnover_rate: None,
        growth_factor: 5.0,
    }
}
