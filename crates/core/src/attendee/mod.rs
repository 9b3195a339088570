mod types;

pub use types::Attendee;
