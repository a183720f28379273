mod cli;
mod infra;
mod routes;
mod server;

use awesome_applicants::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
