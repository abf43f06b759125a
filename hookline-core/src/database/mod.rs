//! Activity persistence.
//!
//! [`ports`] defines the store interface the server depends on; the adapters
//! under [`infrastructure`] implement it for PostgreSQL and for memory.

pub mod infrastructure;
pub mod ports;

#[cfg(feature = "database")]
#[cfg_attr(docsrs, doc(cfg(feature = "database")))]
pub mod postgres;

pub use infrastructure::memory::InMemoryActivityStore;
pub use ports::activities::ActivityStore;

#[cfg(feature = "database")]
pub use infrastructure::postgres::repositories::{
    activities::PostgresActivityStore,
};
#[cfg(feature = "database")]
pub use postgres::ActivityDatabase;
