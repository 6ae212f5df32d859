//! Deterministic listing plan generation.
//!
//! The same [`PlanConfig`] always produces an identical [`ListingPlan`]: the
//! RNG is seeded from the config and all table lookups cycle in ordinal
//! order. Statuses follow a fixed 40% for-sale / 50% for-rent / 10%
//! recently-sold split.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::plan::{HouseSeed, ListingPlan, ListingStatusSeed, PictureSeed, SystemUserSeed};
use crate::tables::{CITIES, City, FEATURES, PROPERTY_TYPES, STREETS};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// Number of houses generated by default.
pub const DEFAULT_HOUSE_COUNT: u32 = 100;

/// Largest supported house count.
const MAX_HOUSE_COUNT: u32 = 10_000;

/// Minimum number of features mentioned in a description.
const MIN_FEATURES: usize = 2;

/// Maximum number of features mentioned in a description.
const MAX_FEATURES: usize = 6;

/// Latitude/longitude jitter applied around each city centre, in degrees.
const COORDINATE_JITTER: f64 = 0.05;

/// Email of the account that owns every seeded house.
const SYSTEM_EMAIL: &str = "system@gmail.com";

/// Display name of the system account.
const SYSTEM_NAME: &str = "System User";

/// Demo password of the system account.
const SYSTEM_PASSWORD: &str = "system123";

/// Configuration for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanConfig {
    /// RNG seed; identical seeds produce identical plans.
    pub seed: u64,
    /// Number of houses to generate.
    pub house_count: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            house_count: DEFAULT_HOUSE_COUNT,
        }
    }
}

/// Generates the complete demo data plan for `config`.
///
/// The plan holds one system user and `config.house_count` houses, each with
/// a single primary picture. Every house is owned by the system user; the
/// seed binary additionally favourites each house for that user.
///
/// # Errors
///
/// Returns [`GenerationError::NoHouses`] for a zero count and
/// [`GenerationError::TooManyHouses`] above the supported maximum.
pub fn generate_listing_plan(config: &PlanConfig) -> Result<ListingPlan, GenerationError> {
    if config.house_count == 0 {
        return Err(GenerationError::NoHouses);
    }
    if config.house_count > MAX_HOUSE_COUNT {
        return Err(GenerationError::TooManyHouses {
            requested: config.house_count,
            max: MAX_HOUSE_COUNT,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let user = SystemUserSeed {
        id: Uuid::from_u128(rng.random()),
        email: SYSTEM_EMAIL.to_owned(),
        name: SYSTEM_NAME.to_owned(),
        password: SYSTEM_PASSWORD.to_owned(),
    };

    let tables = CITIES
        .iter()
        .zip(STREETS.iter().cycle())
        .cycle()
        .zip(PROPERTY_TYPES.iter().cycle());

    let houses = (1..=config.house_count)
        .zip(tables)
        .map(|(ordinal, ((city, street), home_type))| {
            generate_house(&mut rng, ordinal, config.house_count, city, street, home_type)
        })
        .collect();

    Ok(ListingPlan { user, houses })
}

/// Generates a single house for the given 1-based ordinal.
fn generate_house(
    rng: &mut ChaCha8Rng,
    ordinal: u32,
    total: u32,
    city: &City,
    street: &str,
    home_type: &str,
) -> HouseSeed {
    let id = Uuid::from_u128(rng.random());
    let street_number: u32 = rng.random_range(1..=9999);
    let street_address = format!("{street_number} {street}");
    let zipcode = rng.random_range(10_000_u32..=99_999).to_string();

    let bedrooms: i32 = rng.random_range(1..=5);
    let bathrooms: i32 = rng.random_range(1..=3);
    let year_built: i32 = rng.random_range(1970..=2019);
    let living_area: i32 = rng.random_range(800..=3799);

    // Apartments list monthly rent; everything else lists a sale price.
    let price_int: u32 = if home_type == "Apartment" {
        rng.random_range(1000..=3999)
    } else {
        rng.random_range(200_000..=999_999)
    };

    let latitude = jittered(rng, city.latitude);
    let longitude = jittered(rng, city.longitude);
    let description = compose_description(rng, home_type, bedrooms, bathrooms);

    let picture = PictureSeed {
        id: Uuid::from_u128(rng.random()),
        url: format!("https://picsum.photos/seed/house-{ordinal}/1080/720"),
        alt_text: format!("{street_address} - Photo 1"),
        is_primary: true,
        position: 0,
    };

    HouseSeed {
        id,
        zpid: i64::from(ordinal),
        street_address,
        city: city.name.to_owned(),
        state: city.state.to_owned(),
        zipcode,
        bedrooms,
        bathrooms,
        year_built,
        living_area,
        price: f64::from(price_int),
        longitude,
        latitude,
        status: status_for_ordinal(ordinal, total),
        home_type: home_type.to_owned(),
        description,
        currency: "USD".to_owned(),
        days_ago: rng.random_range(0..=364),
        picture,
    }
}

/// Applies per-house coordinate jitter around a city centre.
#[expect(
    clippy::float_arithmetic,
    reason = "coordinate jitter is inherently floating-point"
)]
fn jittered(rng: &mut ChaCha8Rng, base: f64) -> f64 {
    base + rng.random_range(-COORDINATE_JITTER..=COORDINATE_JITTER)
}

/// Composes a marketing description from the type, room counts and features.
fn compose_description(
    rng: &mut ChaCha8Rng,
    home_type: &str,
    bedrooms: i32,
    bathrooms: i32,
) -> String {
    let feature_count = rng.random_range(MIN_FEATURES..=MAX_FEATURES);
    let features = FEATURES
        .iter()
        .take(feature_count)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Beautiful {} with {bedrooms} bedrooms and {bathrooms} bathrooms. \
         Features include {features}.",
        home_type.to_lowercase()
    )
}

/// Status for the given 1-based ordinal: the first 40% of houses are for
/// sale, the next 50% for rent and the final 10% recently sold.
const fn status_for_ordinal(ordinal: u32, total: u32) -> ListingStatusSeed {
    // Threshold comparisons use cross-multiplication to stay in integers.
    if ordinal as u64 * 10 <= total as u64 * 4 {
        ListingStatusSeed::ForSale
    } else if ordinal as u64 * 10 <= total as u64 * 9 {
        ListingStatusSeed::ForRent
    } else {
        ListingStatusSeed::RecentlySold
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn default_plan() -> ListingPlan {
        generate_listing_plan(&PlanConfig::default()).expect("generation succeeds")
    }

    #[rstest]
    fn generates_requested_house_count(default_plan: ListingPlan) {
        assert_eq!(default_plan.houses.len(), 100);
    }

    #[rstest]
    fn generation_is_deterministic(default_plan: ListingPlan) {
        let again = generate_listing_plan(&PlanConfig::default()).expect("generation succeeds");
        assert_eq!(default_plan, again);
    }

    #[test]
    fn different_seeds_produce_different_plans() {
        let first = generate_listing_plan(&PlanConfig {
            seed: 1,
            ..PlanConfig::default()
        })
        .expect("generation succeeds");
        let second = generate_listing_plan(&PlanConfig {
            seed: 2,
            ..PlanConfig::default()
        })
        .expect("generation succeeds");
        assert_ne!(
            first.houses.first().map(|h| h.id),
            second.houses.first().map(|h| h.id)
        );
    }

    #[rstest]
    fn status_split_is_40_50_10(default_plan: ListingPlan) {
        let count_of = |status: ListingStatusSeed| {
            default_plan
                .houses
                .iter()
                .filter(|h| h.status == status)
                .count()
        };
        assert_eq!(count_of(ListingStatusSeed::ForSale), 40);
        assert_eq!(count_of(ListingStatusSeed::ForRent), 50);
        assert_eq!(count_of(ListingStatusSeed::RecentlySold), 10);
    }

    #[rstest]
    fn zpids_are_sequential_ordinals(default_plan: ListingPlan) {
        for (index, house) in default_plan.houses.iter().enumerate() {
            assert_eq!(house.zpid, i64::try_from(index).expect("small index") + 1);
        }
    }

    #[rstest]
    fn apartments_price_as_monthly_rent(default_plan: ListingPlan) {
        for house in &default_plan.houses {
            if house.home_type == "Apartment" {
                assert!(
                    (1000.0..=3999.0).contains(&house.price),
                    "rent out of range: {}",
                    house.price
                );
            } else {
                assert!(
                    (200_000.0..=999_999.0).contains(&house.price),
                    "price out of range: {}",
                    house.price
                );
            }
        }
    }

    #[rstest]
    fn rooms_and_years_stay_in_bounds(default_plan: ListingPlan) {
        for house in &default_plan.houses {
            assert!((1..=5).contains(&house.bedrooms));
            assert!((1..=3).contains(&house.bathrooms));
            assert!((1970..=2019).contains(&house.year_built));
            assert!((800..=3799).contains(&house.living_area));
            assert!(house.days_ago <= 364);
        }
    }

    #[rstest]
    fn coordinates_jitter_around_known_cities(default_plan: ListingPlan) {
        for house in &default_plan.houses {
            let city = CITIES
                .iter()
                .find(|c| c.name == house.city)
                .expect("city from table");
            assert!((house.latitude - city.latitude).abs() <= COORDINATE_JITTER);
            assert!((house.longitude - city.longitude).abs() <= COORDINATE_JITTER);
        }
    }

    #[rstest]
    fn pictures_are_primary_with_descriptive_alt_text(default_plan: ListingPlan) {
        for house in &default_plan.houses {
            assert!(house.picture.is_primary);
            assert_eq!(house.picture.position, 0);
            assert_eq!(
                house.picture.alt_text,
                format!("{} - Photo 1", house.street_address)
            );
        }
    }

    #[rstest]
    fn system_user_has_fixed_identity(default_plan: ListingPlan) {
        assert_eq!(default_plan.user.email, "system@gmail.com");
        assert_eq!(default_plan.user.name, "System User");
        assert_eq!(default_plan.user.password, "system123");
    }

    #[test]
    fn rejects_zero_house_count() {
        let result = generate_listing_plan(&PlanConfig {
            house_count: 0,
            ..PlanConfig::default()
        });
        assert_eq!(result, Err(GenerationError::NoHouses));
    }

    #[test]
    fn rejects_excessive_house_count() {
        let result = generate_listing_plan(&PlanConfig {
            house_count: 20_000,
            ..PlanConfig::default()
        });
        assert_eq!(
            result,
            Err(GenerationError::TooManyHouses {
                requested: 20_000,
                max: 10_000,
            })
        );
    }

    #[rstest]
    #[case(1, 100, ListingStatusSeed::ForSale)]
    #[case(40, 100, ListingStatusSeed::ForSale)]
    #[case(41, 100, ListingStatusSeed::ForRent)]
    #[case(90, 100, ListingStatusSeed::ForRent)]
    #[case(91, 100, ListingStatusSeed::RecentlySold)]
    #[case(100, 100, ListingStatusSeed::RecentlySold)]
    #[case(2, 5, ListingStatusSeed::ForSale)]
    #[case(3, 5, ListingStatusSeed::ForRent)]
    #[case(5, 5, ListingStatusSeed::RecentlySold)]
    fn status_thresholds_scale_with_total(
        #[case] ordinal: u32,
        #[case] total: u32,
        #[case] expected: ListingStatusSeed,
    ) {
        assert_eq!(status_for_ordinal(ordinal, total), expected);
    }
}
