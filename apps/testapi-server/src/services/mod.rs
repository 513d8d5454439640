//! Business services sitting between handlers and the store.

pub mod basket_service;

pub use basket_service::BasketService;
