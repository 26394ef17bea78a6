pub mod user;
pub mod venue;
pub mod event;

pub use user::{Admin, Organizer, Student};
pub use venue::Venue;
pub use event::{Event, EventSummary};
