pub mod bench_file;
pub mod database;
pub mod errors;
pub mod server;
pub mod services;
pub mod settings;

#[cfg(feature = "graphql")]
pub mod graphql;
