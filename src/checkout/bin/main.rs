use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use circulation::checkout::controller::{borrow_book, return_book};
use circulation::core::controller::AppState;
use circulation::core::domain::Configuration;
use circulation::core::repository::RepositoryStore;
use circulation::fees::controller::compute_fee;
use circulation::patrons::controller::patron_status;
use circulation::utils::ddb::setup_tracing;

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::build(Configuration::from_env("dev"), RepositoryStore::LocalDynamoDB).await
    } else {
        AppState::build(Configuration::from_env("prod"), RepositoryStore::DynamoDB).await
    };

    let app = Router::new()
        .route("/checkout", post(borrow_book))
        .route("/checkout/return", post(return_book))
        .route("/patrons/:patron_id/status", get(patron_status))
        .route("/patrons/:patron_id/fees/:book_id", get(compute_fee))
        .with_state(state);

    run(app).await
}
