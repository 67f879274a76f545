pub const HEALTH_ENDPOINT: &str = "/health";
pub const API_PREFIX: &str = "/api";
pub const USERS_ENDPOINT: &str = "/users";
pub const CATALOG_ENDPOINT: &str = "/catalog";

// Relative to `WHEEL_PREFIX`.
pub const WHEEL_PREFIX: &str = "/wheel";
pub const WHEEL_ITEMS_ENDPOINT: &str = "/items";
pub const WHEEL_ITEM_ENDPOINT: &str = "/items/:id";
pub const WHEEL_SEGMENTS_ENDPOINT: &str = "/segments";
pub const WHEEL_SPIN_ENDPOINT: &str = "/spin";

/// Header carrying the caller's locally persisted user id.
pub const USER_ID_HEADER: &str = "x-user-id";

pub const MAX_WHEEL_ITEMS: usize = 12;
pub const MIN_LABEL_LENGTH: usize = 1;
pub const MAX_LABEL_LENGTH: usize = 50;

pub const FULL_TURN_DEGREES: f64 = 360.0;
pub const MIN_FULL_TURNS: f64 = 3.0;
pub const MAX_FULL_TURNS: f64 = 6.0;
pub const SPIN_DURATION_MS: u64 = 3000;

pub const INVALID_LABEL_ERROR: &str = "Please enter a valid recipe name (1-50 characters)";
pub const DUPLICATE_ITEM_ERROR: &str = "This recipe is already on your wheel";
pub const WHEEL_FULL_ERROR: &str = "The wheel holds at most 12 recipes";
pub const ITEM_NOT_FOUND_ERROR: &str = "Recipe not found on your wheel";
pub const EMPTY_WHEEL_ERROR: &str = "Add at least one recipe before spinning";
pub const SPIN_IN_PROGRESS_ERROR: &str = "The wheel is still spinning";
pub const MISSING_USER_ID_ERROR: &str = "Missing or invalid user id";
pub const STORE_UNAVAILABLE_ERROR: &str = "Recipe store is unavailable. Please try again";
