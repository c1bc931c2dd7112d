use chrono::Utc;
use colored::*;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::env;

use crate::seed::{Seeder, run_seeder};
use crate::seeds::measurement::MeasurementSeeder;

mod seed;
mod seeds;

const DEFAULT_COUNT: usize = 20;

#[tokio::main]
async fn main() {
    let count = match env::args().nth(1) {
        None => DEFAULT_COUNT,
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!("{} expected a positive row count, got {:?}", "error:".red(), arg);
                eprintln!("usage: seeder [count]");
                std::process::exit(2);
            }
        },
    };

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "Failed to connect:".red(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {}", "Migration failed:".red(), e);
        std::process::exit(1);
    }

    let session_id = format!("sim-{}", Utc::now().format("%Y%m%d%H%M%S"));
    println!(
        "Simulating {} sweep points into {} (session {})",
        count.to_string().bold(),
        util::config::database_path().cyan(),
        session_id.bold()
    );

    let seeders: Vec<(Box<dyn Seeder + Send + Sync>, &str)> = vec![(
        Box::new(MeasurementSeeder::new(count, session_id)),
        "Measurement",
    )];

    for (seeder, name) in seeders {
        run_seeder(&*seeder, name, &db).await;
    }
}
