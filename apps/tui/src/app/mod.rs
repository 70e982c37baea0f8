// Application state and orchestration: page selections, fetch batches and
// how their outcomes land.

pub mod actions;
pub mod chat;
pub mod fetch;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::App;
