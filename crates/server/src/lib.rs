pub mod errors;
pub mod extract;
pub mod forms;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run_with_shutdown;
pub use state::ServerState;
