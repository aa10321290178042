use anyhow::Result;
use reviews_dashboard::{
    config::config_loader,
    infrastructure::postgres::{postgres_connection, seed},
    observability,
};
use tracing::{error, info};

fn main() {
    if let Err(error) = run() {
        error!("Seeding failed, transaction rolled back: {:?}", error);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    observability::init_observability("seed")?;

    let database = config_loader::load_database()?;
    let postgres_pool = postgres_connection::establish_connection(&database.url, 1)?;
    info!("Postgres connection has been established");

    let report = seed::run(&postgres_pool, seed::seed_data()?)?;
    info!(?report, "Database seeded successfully");

    Ok(())
}
