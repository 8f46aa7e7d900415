use std::env;

use quiz_client::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::dto::request::SignInRequest,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("[{}] {}", err.error_code(), err);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env();
    log::info!("Using quiz backend at {}", config.api_base_url);

    let state = AppState::new(config)?;
    let subject = sign_in(&state).await?;

    let mut catalog = state.catalog();
    catalog.load().await?;

    println!("Dashboard for {}:", subject);
    for entry in catalog.entries() {
        let marker = if catalog.can_modify(entry) { "*" } else { " " };
        println!(
            "{} {:<24} {:>3} questions  score {}/{}  [{}]",
            marker,
            entry.title,
            entry.question_count,
            entry.total_score,
            entry.total_max_score,
            entry.quiz_id
        );
    }

    Ok(())
}

/// `QUIZ_TOKEN` wins over `QUIZ_EMAIL` + `QUIZ_PASSWORD`.
async fn sign_in(state: &AppState) -> AppResult<String> {
    if let Ok(token) = env::var("QUIZ_TOKEN") {
        return state.user_service.restore(&token);
    }

    match (env::var("QUIZ_EMAIL"), env::var("QUIZ_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            state
                .user_service
                .sign_in(SignInRequest { email, password })
                .await
        }
        _ => Err(AppError::Unauthorized(
            "Set QUIZ_TOKEN or QUIZ_EMAIL and QUIZ_PASSWORD".to_string(),
        )),
    }
}
