//! Database access - connection pooling and repository implementations.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{
    MySqlResetTokenRepository, MySqlTokenRepository, MySqlUserRepository,
};
