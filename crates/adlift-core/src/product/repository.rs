//! Product repository trait.

use super::model::Product;
use crate::error::Result;

/// An abstract repository for managing product persistence.
///
/// Products are write-once as far as the orchestrator is concerned; `delete`
/// exists solely for the creation-compensation path.
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persists a new product.
    async fn insert(&self, product: &Product) -> Result<()>;

    /// Finds a product by its ID.
    async fn find_by_id(&self, product_id: &str) -> Result<Option<Product>>;

    /// Deletes a product. Compensation only.
    ///
    /// Deleting an unknown id is not an error.
    async fn delete(&self, product_id: &str) -> Result<()>;

    /// Lists all stored products.
    async fn list_all(&self) -> Result<Vec<Product>>;
}
