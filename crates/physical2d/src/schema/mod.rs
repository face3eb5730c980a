mod registry;
mod scheme;
mod wire;

pub use registry::{SchemaError, SchemaRegistry};
pub use scheme::{NetScheme, Schema};
pub use wire::WireType;
