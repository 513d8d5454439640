//! # Seed Data Generator
//!
//! Deterministic fake records for products, users and tasks.
//!
//! ## Generated Data
//! Every value is derived from the record's index through constant tables,
//! so two stores built with the same counts hold identical data apart from
//! timestamps.
//!
//! - Products: ids from 1000, SKU `{CATEGORY}-{INDEX}`, price $1.00 - $99.99,
//!   `basePrice` 20% below price, every fifth product out of stock
//! - Users: ids from 1000, age 18 - 80, `first.last@domain` emails
//! - Tasks: always the same three entries

use chrono::{DateTime, Duration, Utc};
use testapi_core::{Address, Product, Task, User, FIRST_SEED_ID, MAX_USER_AGE, MIN_USER_AGE};

// =============================================================================
// Tables
// =============================================================================

/// Product categories with their SKU prefix
const CATEGORIES: &[(&str, &str)] = &[
    ("HOM", "Home"),
    ("GRD", "Garden"),
    ("TOY", "Toys"),
    ("SPT", "Sports"),
    ("ELC", "Electronics"),
    ("BKS", "Books"),
    ("CLT", "Clothing"),
];

const ADJECTIVES: &[&str] = &[
    "Handcrafted",
    "Ergonomic",
    "Rustic",
    "Sleek",
    "Practical",
    "Gorgeous",
    "Refined",
    "Small",
    "Licensed",
    "Tasty",
    "Incredible",
    "Modern",
];

const MATERIALS: &[&str] = &[
    "Wooden", "Steel", "Cotton", "Granite", "Rubber", "Plastic", "Bronze", "Frozen", "Fresh",
    "Soft", "Concrete",
];

const NOUNS: &[&str] = &[
    "Chair", "Table", "Shoes", "Gloves", "Hat", "Keyboard", "Lamp", "Towels", "Bike", "Ball",
    "Sausages", "Mouse", "Computer", "Pants", "Shirt",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Linus", "Barbara", "Dennis", "Margaret", "Ken", "Frances", "Edsger",
    "Radia", "John", "Katherine", "Niklaus", "Hedy", "Tim", "Sophie", "Guido",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Torvalds", "Liskov", "Ritchie", "Hamilton", "Thompson",
    "Allen", "Dijkstra", "Perlman", "Backus", "Johnson", "Wirth", "Lamarr", "Berners-Lee",
    "Wilson", "Rossum",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "corp.test"];

const COMPANIES: &[&str] = &[
    "Acme Corp",
    "Globex",
    "Initech",
    "Umbrella Labs",
    "Hooli",
    "Stark Industries",
    "Wayne Enterprises",
    "Cyberdyne Systems",
    "Soylent Co",
];

const STREETS: &[&str] = &[
    "Main Street",
    "Oak Avenue",
    "Maple Road",
    "Station Road",
    "Church Lane",
    "High Street",
    "Park Drive",
    "Mill Lane",
];

const CITIES: &[&str] = &[
    "Springfield",
    "Riverton",
    "Fairview",
    "Greenville",
    "Bristol",
    "Madison",
    "Georgetown",
    "Salem",
    "Clinton",
];

// =============================================================================
// Generators
// =============================================================================

/// Cheap index scrambler so neighbouring records do not look alike.
fn mix(index: usize, salt: usize) -> usize {
    index
        .wrapping_mul(2_654_435_761)
        .wrapping_add(salt.wrapping_mul(40_503))
        % 1_000_003
}

fn pick<'a>(table: &[&'a str], index: usize, salt: usize) -> &'a str {
    table[mix(index, salt) % table.len()]
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Whether the seeded product at `index` is in stock.
pub fn product_is_stocked(index: usize) -> bool {
    index % 5 != 4
}

/// Generates `count` products with ids `1000..1000 + count`.
pub fn products(count: usize, now: DateTime<Utc>) -> Vec<Product> {
    (0..count).map(|index| product(index, now)).collect()
}

fn product(index: usize, now: DateTime<Utc>) -> Product {
    let id = FIRST_SEED_ID + index as i64;
    let (code, category) = CATEGORIES[index % CATEGORIES.len()];
    let title = format!(
        "{} {} {}",
        pick(ADJECTIVES, index, 1),
        pick(MATERIALS, index, 2),
        pick(NOUNS, index, 3)
    );

    // $1.00 - $99.99
    let price = round_cents((100 + mix(index, 4) % 9_900) as f64 / 100.0);
    let created_at = now - Duration::days((mix(index, 5) % 365) as i64);

    Product {
        id,
        sku: format!("{}-{:05}", code, index),
        desc: Some(format!("{} from our {} range", title, category)),
        title,
        stocked: product_is_stocked(index),
        price,
        image: Some(format!("https://picsum.photos/seed/{}/640/480", id)),
        base_price: Some(round_cents(price - price / 100.0 * 20.0)),
        created_at,
        updated_at: created_at,
    }
}

/// Generates `count` users with ids `1000..1000 + count`.
pub fn users(count: usize, now: DateTime<Utc>) -> Vec<User> {
    (0..count).map(|index| user(index, now)).collect()
}

fn user(index: usize, now: DateTime<Utc>) -> User {
    let id = FIRST_SEED_ID + index as i64;
    let first_name = pick(FIRST_NAMES, index, 11);
    let last_name = pick(LAST_NAMES, index, 12);
    let age_span = (MAX_USER_AGE - MIN_USER_AGE + 1) as usize;

    User {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age: MIN_USER_AGE + (mix(index, 13) % age_span) as i64,
        email: format!("{}.{}@{}", first_name, last_name, pick(DOMAINS, index, 14)).to_lowercase(),
        image: format!("https://i.pravatar.cc/150?u={}", id),
        phone: format!("+1-555-{:04}", mix(index, 15) % 10_000),
        company: pick(COMPANIES, index, 16).to_string(),
        created_at: now - Duration::days((mix(index, 17) % 1_000) as i64),
        address: Address {
            street: format!("{} {}", 1 + mix(index, 18) % 999, pick(STREETS, index, 19)),
            city: pick(CITIES, index, 20).to_string(),
            zip: format!("{:05}", mix(index, 21) % 100_000),
        },
    }
}

/// The three fixed tasks.
pub fn tasks() -> Vec<Task> {
    [
        (1, "Drink coffee", true),
        (2, "Write code", false),
        (3, "Document work", false),
    ]
    .into_iter()
    .map(|(id, desc, completed)| Task {
        id,
        desc: desc.to_string(),
        completed,
    })
    .collect()
}
