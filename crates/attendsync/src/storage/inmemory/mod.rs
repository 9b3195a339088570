mod web_api;

pub use web_api::FakeAttendeeWebApi;
