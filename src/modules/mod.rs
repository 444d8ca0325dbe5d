pub mod stripe;

mod router;
pub use router::get_router;
