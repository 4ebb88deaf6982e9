//! Database seeding commands.
//!
//! `seed products` inserts a small sample catalog so the cart endpoints have
//! something to work with. `seed admin` creates an admin account; admin
//! accounts are never created through the public registration endpoint.

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use copper_kettle_core::{Email, UserRole};
use copper_kettle_server::db::products::NewProduct;
use copper_kettle_server::db::{ProductRepository, UserRepository};
use copper_kettle_server::services::auth::hash_password;

use super::{CommandError, database_url};

/// Sample catalog: (name, price, stock, category).
const SAMPLE_PRODUCTS: &[(&str, &str, i32, &str)] = &[
    ("Copper Kettle 1.5L", "64.00", 25, "kitchen"),
    ("Cast Iron Skillet 26cm", "39.50", 40, "kitchen"),
    ("Walnut Cutting Board", "28.00", 60, "kitchen"),
    ("Ceramic Pour-Over Set", "45.90", 15, "coffee"),
    ("Burr Coffee Grinder", "89.00", 10, "coffee"),
    ("Linen Apron", "22.00", 80, "textiles"),
];

/// Insert the sample product catalog.
///
/// # Errors
///
/// Returns `CommandError` if the connection or any insert fails.
pub async fn products() -> Result<(), CommandError> {
    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;
    let repo = ProductRepository::new(&pool);

    for &(name, price, stock, category) in SAMPLE_PRODUCTS {
        let price: Decimal = price
            .parse()
            .map_err(|_| CommandError::InvalidInput(format!("bad price for {name}")))?;

        let product = repo
            .insert(NewProduct {
                name: name.to_string(),
                price,
                stock,
                category: category.to_string(),
                image: None,
            })
            .await?;

        tracing::info!(id = %product.id, name, "Seeded product");
    }

    tracing::info!(count = SAMPLE_PRODUCTS.len(), "Product seeding complete");
    Ok(())
}

/// Create an admin user.
///
/// # Errors
///
/// Returns `CommandError` if the email is invalid, already registered, or
/// the insert fails.
pub async fn admin(email: &str, name: &str, password: &SecretString) -> Result<(), CommandError> {
    let email =
        Email::parse(email).map_err(|e| CommandError::InvalidInput(format!("email: {e}")))?;

    let password_hash = hash_password(password.expose_secret())
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    let url = database_url()?;
    let pool = PgPool::connect(url.expose_secret()).await?;

    let user = UserRepository::new(&pool)
        .create(&email, name, &password_hash, UserRole::Admin)
        .await?;

    tracing::info!(id = %user.id, email = %user.email, "Created admin user");
    Ok(())
}
