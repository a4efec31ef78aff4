//! Product domain module.

pub mod model;
pub mod repository;
pub mod request;

pub use model::Product;
pub use repository::ProductRepository;
pub use request::CreateProductRequest;
