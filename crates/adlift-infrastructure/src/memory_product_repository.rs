//! In-memory ProductRepository implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use adlift_core::error::{AdliftError, Result};
use adlift_core::product::{Product, ProductRepository};

/// In-memory product repository backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl MemoryProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(AdliftError::data_access(format!(
                "product '{}' already exists",
                product.id
            )));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn find_by_id(&self, product_id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(product_id).cloned())
    }

    async fn delete(&self, product_id: &str) -> Result<()> {
        let mut products = self.products.write().await;
        products.remove(product_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }
}
