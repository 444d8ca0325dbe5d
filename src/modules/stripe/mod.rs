pub mod client;
pub mod model;
pub mod utils;

mod routes;
pub use routes::get_router;
