use menuiq::app::{seed_demo, IngestionService};
use menuiq::domain::model::{UserId, DEFAULT_USER_ROLE};
use menuiq::infra::{init_telemetry, JwtManager, Settings};
use menuiq::storage::{schema, PgMenuStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin migrate -- [--seed] [--issue-token <user_id>]\n\
         \n\
         Requires DATABASE_URL (or database.url in config/menuiq.*).\n\
         --issue-token prints a bearer token signed with auth.jwt_secret and exits.\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let seed = args.iter().any(|a| a == "--seed");
    let token_for = match args.iter().position(|a| a == "--issue-token") {
        Some(idx) => match args.get(idx + 1).and_then(|v| v.parse::<i64>().ok()) {
            Some(id) => Some(UserId(id)),
            None => usage_and_exit(),
        },
        None => None,
    };

    let settings = Settings::load()?;
    init_telemetry(&settings.logging);

    if let Some(user_id) = token_for {
        let jwt = JwtManager::new(&settings.auth.jwt_secret, settings.auth.token_ttl_secs);
        let token = jwt.generate_token(user_id, DEFAULT_USER_ROLE)?;
        println!("{token}");
        return Ok(());
    }

    let url = settings.database.require_url()?;
    let store = PgMenuStore::connect(url, &settings.database).await?;

    println!("> Running schema migration...");
    schema::migrate(store.pool()).await?;
    println!("> Schema is up to date.");

    if seed {
        println!("> Seeding demo data...");
        let ingestion = IngestionService::new(
            std::sync::Arc::new(store.clone()),
            settings.database.ingest_timeout(),
        );
        let report = seed_demo(&store, &ingestion).await?;
        println!(
            "> Demo owner {} ({}) with menu {} ({} items).",
            report.owner,
            menuiq::app::seed::DEMO_EMAIL,
            report.menu_id,
            report.items
        );
        println!(
            "> Bearer token: cargo run --bin migrate -- --issue-token {}",
            report.owner
        );
    }

    Ok(())
}
