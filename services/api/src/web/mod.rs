pub mod auth;
pub mod insights;
pub mod rest;
pub mod shares;
pub mod state;

// Re-export the handlers the binary wires into the router.
pub use auth::{login_handler, signup_handler};
pub use insights::{
    business_insights_handler, insights_handler, monthly_reflections_handler,
    weekly_reflections_handler,
};
pub use rest::{
    create_entry_handler, delete_entry_handler, list_entries_handler, todays_entry_handler,
};
pub use shares::{create_share_handler, resolve_share_handler};
