// Export components
pub mod google_calendar;

// Re-export the pieces the server is assembled from
pub use google_calendar::{CalendarProvider, GoogleProvider, TokenManager};
