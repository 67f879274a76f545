pub mod recipe_store;
pub mod spin_service;

pub use recipe_store::PgRecipeStore;
pub use spin_service::SpinSessions;
