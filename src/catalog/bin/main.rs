use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use circulation::catalog::controller::{add_book, find_book_by_id, find_book_by_isbn};
use circulation::core::controller::AppState;
use circulation::core::domain::Configuration;
use circulation::core::repository::RepositoryStore;
use circulation::utils::ddb::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

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
        .route("/catalog", post(add_book))
        .route("/catalog/:book_id", get(find_book_by_id))
        .route("/catalog/isbn/:isbn", get(find_book_by_isbn))
        .with_state(state);

    run(app).await
}
