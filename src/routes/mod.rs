pub mod submissions;

pub mod frontend;

pub use frontend::configure_frontend_routes;
pub use submissions::configure_submissions_routes;
