//! Demo catalog seeder, used by the `seed` CLI command.

use sqlx::PgPool;

use crate::adapters::PostgresProductRepository;
use crate::domain::Product;
use crate::ports::ProductRepository;

pub async fn seed_products(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        tracing::info!(count, "products already seeded, skipping");
        return Ok(());
    }

    let repo = PostgresProductRepository::new(pool.clone());
    for product in demo_products() {
        let saved = repo.insert(&product).await?;
        tracing::info!(name = %saved.name, "seeded product");
    }

    Ok(())
}

fn demo_products() -> Vec<Product> {
    vec![
        Product::new(
            "iPhone 14 Pro".to_string(),
            "Latest Apple smartphone with A16 Bionic chip, 48MP camera system, \
             Dynamic Island, and all-day battery life. Available in Space Black."
                .to_string(),
            4_500_000,
            15,
            "https://images.unsplash.com/photo-1678652197831-2d180705cd2c?w=800".to_string(),
        ),
        Product::new(
            "MacBook Pro 14\"".to_string(),
            "Professional laptop with M3 Pro chip, 18GB RAM, 512GB SSD. Perfect \
             for developers and creative professionals."
                .to_string(),
            8_500_000,
            10,
            "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=800".to_string(),
        ),
        Product::new(
            "AirPods Pro 2".to_string(),
            "Active Noise Cancellation, Adaptive Transparency, Personalized \
             Spatial Audio with dynamic head tracking."
                .to_string(),
            950_000,
            50,
            "https://images.unsplash.com/photo-1600294037681-c80b4cb5b434?w=800".to_string(),
        ),
        Product::new(
            "Apple Watch Ultra 2".to_string(),
            "The most rugged and capable Apple Watch. 49mm titanium case, \
             precision dual-frequency GPS, up to 36 hours battery."
                .to_string(),
            3_200_000,
            20,
            "https://images.unsplash.com/photo-1434493789847-2f02dc6ca35d?w=800".to_string(),
        ),
        Product::new(
            "iPad Pro 12.9\"".to_string(),
            "M2 chip, Liquid Retina XDR display, 256GB storage. Transform your \
             workflow with the power of a laptop in a tablet."
                .to_string(),
            5_200_000,
            12,
            "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=800".to_string(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_well_formed() {
        let products = demo_products();
        assert_eq!(products.len(), 5);
        assert!(products.iter().all(|p| p.price > 0 && p.stock > 0));
    }
}
