//! Random demo employees inserted at server startup.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::db::validation::COUNTRY_CODES;
use crate::db::{
    AddressRepository, Database, DbError, DbResult, Gender, NewAddress, NewUser, UserRepository,
    WorkStatusRepository,
};

const FIRST_NAMES: &[&str] = &[
    "Anna", "Ben", "Clara", "David", "Emma", "Felix", "Greta", "Hannah", "Jonas", "Julia", "Lukas",
    "Lea", "Maximilian", "Mia", "Noah", "Paul", "Sophie", "Tim", "Lena", "Elias",
];

const LAST_NAMES: &[&str] = &[
    "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker", "Schulz",
    "Hoffmann", "Koch", "Richter", "Klein", "Wolf", "Schröder", "Neumann", "Schwarz", "Braun",
];

const STREETS: &[&str] = &[
    "Hauptstraße",
    "Bahnhofstraße",
    "Gartenweg",
    "Schulstraße",
    "Lindenallee",
    "Bergstraße",
    "Kirchplatz",
];

const CITIES: &[&str] = &[
    "Berlin", "Hamburg", "München", "Köln", "Frankfurt", "Stuttgart", "Leipzig", "Dresden", "Bonn",
];

const MIN_SEED_AGE: i64 = 18;
const MAX_SEED_AGE: i64 = 80;

/// Fully generated employee, ready to insert.
#[derive(Debug, Clone)]
pub struct SeedEmployee {
    pub user: NewUser,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country_code: String,
    pub is_home_office: bool,
}

/// Generate `count` random employees with unique emails.
pub fn generate_employees(count: usize) -> Vec<SeedEmployee> {
    let mut rng = rand::rng();

    (0..count)
        .map(|i| {
            let first_name = pick(&mut rng, FIRST_NAMES);
            let last_name = pick(&mut rng, LAST_NAMES);
            // Index suffix keeps emails unique across the batch
            let email = format!(
                "{}.{}{}@example.com",
                ascii_slug(first_name),
                ascii_slug(last_name),
                i + 1
            );

            SeedEmployee {
                user: NewUser {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email,
                    age: rng.random_range(MIN_SEED_AGE..=MAX_SEED_AGE),
                    gender: Gender::ALL.choose(&mut rng).copied(),
                },
                street: format!("{} {}", pick(&mut rng, STREETS), rng.random_range(1..=200)),
                city: pick(&mut rng, CITIES).to_string(),
                postal_code: format!("{:05}", rng.random_range(1000..=99999)),
                country_code: pick(&mut rng, COUNTRY_CODES).to_string(),
                is_home_office: rng.random_bool(0.5),
            }
        })
        .collect()
}

/// Insert `count` random employees, each with an address and a work status.
///
/// Returns the number of users actually inserted. Emails that already exist
/// in the database are skipped.
pub async fn seed_users<D: Database>(db: &D, count: usize) -> DbResult<usize> {
    // ThreadRng is not Send, so everything random is built before the first await
    let employees = generate_employees(count);
    let mut inserted = 0;

    for employee in employees {
        let user = match db.users().create(&employee.user).await {
            Ok(user) => user,
            Err(DbError::AlreadyExists { .. }) => {
                debug!(email = %employee.user.email, "Skipping existing seed user");
                continue;
            }
            Err(e) => return Err(e),
        };

        db.addresses()
            .create(&NewAddress {
                street: employee.street,
                city: employee.city,
                postal_code: employee.postal_code,
                country_code: employee.country_code,
                user_id: user.id,
            })
            .await?;

        db.work_statuses()
            .set(user.id, employee.is_home_office)
            .await?;

        inserted += 1;
    }

    Ok(inserted)
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn ascii_slug(value: &str) -> String {
    value
        .to_lowercase()
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue")
        .replace('ß', "ss")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
