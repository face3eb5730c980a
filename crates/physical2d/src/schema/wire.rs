use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
    Float32,
    String,
    /// Nested value encoded through its own schema.
    ClassInstance,
    List(Box<WireType>),
}

impl WireType {
    /// Encoded size in bytes, `None` for variable-length values.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::String | Self::ClassInstance | Self::List(_) => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        match self {
            Self::ClassInstance => true,
            Self::List(item) => item.is_nested(),
            _ => false,
        }
    }
}
