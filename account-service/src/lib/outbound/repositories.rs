pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
