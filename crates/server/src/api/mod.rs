pub mod handlers;
pub mod quiz;
pub mod routes;

pub use routes::create_router;
