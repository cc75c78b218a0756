pub mod content;
pub mod memory;
pub mod tag;
pub mod user;

pub use content::PostgresContentRepository;
pub use memory::InMemoryStore;
pub use tag::PostgresTagRepository;
pub use user::PostgresUserRepository;
