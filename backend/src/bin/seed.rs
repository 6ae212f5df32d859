//! Demo-data seeder.
//!
//! Generates a deterministic listing plan and applies it through the
//! persistence layer: one system account that owns and favourites every
//! generated house. Reseeding wipes the existing rows first.

use chrono::{Duration, Utc};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::{NewUserRecord, SeedRepository};
use backend::domain::{BCRYPT_COST, HouseStatus, NewHouse, NewPicture};
use backend::outbound::persistence::{DbPool, DieselSeedRepository, PoolConfig};
use listing_data::{
    DEFAULT_HOUSE_COUNT, DEFAULT_SEED, HouseSeed, PlanConfig, generate_listing_plan,
};

/// Populate the database with deterministic demo listings.
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Populate the database with demo listings")]
struct SeedArgs {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// RNG seed; identical seeds produce identical data.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of houses to generate.
    #[arg(long, default_value_t = DEFAULT_HOUSE_COUNT)]
    houses: u32,
}

fn into_new_house(seed: &HouseSeed) -> std::io::Result<NewHouse> {
    let status: HouseStatus = seed
        .status
        .as_token()
        .parse()
        .map_err(|e| std::io::Error::other(format!("generated status invalid: {e}")))?;
    let posted = Utc::now() - Duration::days(i64::from(seed.days_ago));

    Ok(NewHouse {
        zpid: Some(seed.zpid),
        street_address: seed.street_address.clone(),
        city: seed.city.clone(),
        state: seed.state.clone(),
        zipcode: seed.zipcode.clone(),
        neighborhood: None,
        community: None,
        subdivision: None,
        bedrooms: seed.bedrooms,
        bathrooms: seed.bathrooms,
        price: seed.price,
        year_built: seed.year_built,
        longitude: seed.longitude,
        latitude: seed.latitude,
        status,
        home_type: seed.home_type.clone(),
        description: seed.description.clone(),
        living_area: seed.living_area,
        currency: seed.currency.clone(),
        date_posted: Some(posted.date_naive().to_string()),
    })
}

fn into_new_picture(seed: &HouseSeed) -> NewPicture {
    NewPicture {
        url: seed.picture.url.clone(),
        alt_text: Some(seed.picture.alt_text.clone()),
        is_primary: seed.picture.is_primary,
        position: seed.picture.position,
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = SeedArgs::parse();

    let plan = generate_listing_plan(&PlanConfig {
        seed: args.seed,
        house_count: args.houses,
    })
    .map_err(|e| std::io::Error::other(format!("plan generation failed: {e}")))?;

    let pool = DbPool::new(PoolConfig::new(&args.database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
    let repository = DieselSeedRepository::new(pool);

    repository
        .clear_all()
        .await
        .map_err(|e| std::io::Error::other(format!("clearing existing data failed: {e}")))?;
    info!("cleared existing favourites, pictures, houses and users");

    let password = plan.user.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(&password, BCRYPT_COST))
        .await
        .map_err(|e| std::io::Error::other(format!("hashing task failed: {e}")))?
        .map_err(|e| std::io::Error::other(format!("password hashing failed: {e}")))?;

    repository
        .insert_user(
            plan.user.id,
            NewUserRecord {
                email: plan.user.email.clone(),
                name: plan.user.name.clone(),
                password_hash,
            },
        )
        .await
        .map_err(|e| std::io::Error::other(format!("seeding system user failed: {e}")))?;

    for house_seed in &plan.houses {
        let house = into_new_house(house_seed)?;
        let picture = into_new_picture(house_seed);
        repository
            .insert_house(house_seed.id, plan.user.id, house, vec![picture])
            .await
            .map_err(|e| std::io::Error::other(format!("seeding house failed: {e}")))?;
        repository
            .insert_favorite(plan.user.id, house_seed.id)
            .await
            .map_err(|e| std::io::Error::other(format!("seeding favourite failed: {e}")))?;
    }

    info!(
        seed = args.seed,
        houses = plan.houses.len(),
        user = %plan.user.email,
        "seeding complete"
    );
    Ok(())
}
