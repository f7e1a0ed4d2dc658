//! Management information base: identifiers, values and the object table.

pub mod oid;
pub mod registry;
pub mod value;

pub use oid::{MAX_OID_LEN, Oid, OidError};
pub use registry::{Access, ManagedObject, ObjectSource, Registry, SENTINEL, Successor};
pub use value::Value;
