// HTTP API: search, recipe details, stats and health probes
pub mod handlers;
pub mod models;
pub mod routes;
