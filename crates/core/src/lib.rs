pub mod config;
pub mod domain;
pub mod errors;

pub use domain::cart::{frete_fixo, Cart, CartItem};
pub use domain::order::OrderRecord;
pub use domain::product::Product;
pub use errors::ServiceError;
