//! Wheel selection core: turns a user's recipe list into wheel segments, spins the wheel
//! and resolves where it stops. Persistence is reached only through [`store::RecipeStore`].

pub mod constants;
pub mod error;
pub mod identity;
pub mod items;
pub mod palette;
pub mod segments;
pub mod spin;
pub mod store;
pub mod validation;
pub mod wheel;

pub use error::{StoreError, WheelError};
pub use items::{CatalogRecipe, Item, ItemSource};
pub use segments::{build, Segment};
pub use spin::{resolve, spin, SpinResult, SpinState};
pub use store::{InMemoryRecipeStore, RecipeStore};
pub use wheel::WheelSession;
