//! Product creation request model.

use serde::{Deserialize, Serialize};

use super::model::Product;
use crate::error::{AdliftError, Result};

/// Request to create a new product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductRequest {
    /// Product name (required)
    pub name: String,

    /// Product description (required)
    pub description: String,

    /// Feature bullet points
    #[serde(default)]
    pub features: Vec<String>,

    /// Blob store URL from a prior image upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CreateProductRequest {
    /// Validate the request and return the first offending field if any.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdliftError::validation(
                "product.name",
                "product name is required and cannot be empty",
            ));
        }
        if self.description.trim().is_empty() {
            return Err(AdliftError::validation(
                "product.description",
                "product description is required and cannot be empty",
            ));
        }
        Ok(())
    }

    /// Convert this request into a `Product`, always generating a new UUID.
    pub fn into_product(self) -> Product {
        let mut product = Product::new(self.name, self.description);
        product.features = self.features;
        product.image_url = self.image_url;
        product
    }
}
