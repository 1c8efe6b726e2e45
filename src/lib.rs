pub mod codec;
pub mod error;
pub mod query;
pub mod schema;
pub mod store;
pub mod validation;

pub use codec::Record;
pub use error::{FlatDbError, Result};
pub use query::Query;
pub use schema::{Schema, SchemaDefinition, TypeTag};
pub use store::Store;
