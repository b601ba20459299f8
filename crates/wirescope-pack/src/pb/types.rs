//! PB wire and logical type enumerations with the key-name tables.

/// On-wire field encoding, the low three bits of a tag header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    Bytes = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Maps the low three bits of a tag header; 6 and 7 are reserved.
    pub fn from_low3(bits: u64) -> Option<WireType> {
        match bits {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::Bytes),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }
}

/// Field tag and wire type read from one tag header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub tag: u64,
    pub wire_type: WireType,
}

/// Rendering type for a decoded field: the wire types plus the logical
/// scalars a caller may hint. "No hint" is `Option::<LogicalType>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    Varint,
    Fixed32,
    Fixed64,
    Bytes,
    String,
    Message,
    Int32,
    Int64,
    UInt,
    SInt,
    Bool,
    Double,
    Float,
    SFixed32,
    SFixed64,
    Packed(PackedType),
}

/// Element type of a `[packed = true]` repeated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedType {
    Int32,
    Int64,
    UInt,
    SInt,
    Bool,
    Fixed32,
    Float,
    SFixed32,
    Fixed64,
    Double,
    SFixed64,
}

impl LogicalType {
    /// Key-name segment for this type. Packed names are already plural, so
    /// the fix-up pass never renames them.
    pub fn type_name(self) -> &'static str {
        match self {
            LogicalType::Varint => "varint",
            LogicalType::Fixed32 => "fixed32",
            LogicalType::Fixed64 => "fixed64",
            LogicalType::Bytes => "bytes",
            LogicalType::String => "string",
            LogicalType::Message => "message",
            LogicalType::Int32 => "int32",
            LogicalType::Int64 => "int64",
            LogicalType::UInt => "uint",
            LogicalType::SInt => "sint",
            LogicalType::Bool => "bool",
            LogicalType::Double => "double",
            LogicalType::Float => "float",
            LogicalType::SFixed32 => "sfixed32",
            LogicalType::SFixed64 => "sfixed64",
            LogicalType::Packed(base) => base.type_name(),
        }
    }

    /// Formats the output key for `tag`: the zero-padded four-digit tag plus
    /// the type name.
    pub fn key(self, tag: u64) -> String {
        format!("{tag:04}_{}", self.type_name())
    }

    /// Resolves a caller-supplied type-name string. Plural forms map to the
    /// singular type (unpacked repeated fields decode per element), and
    /// `packed.<name>s` forms map to the packed variant.
    pub fn from_name(name: &str) -> Option<LogicalType> {
        let typ = match name {
            "varint" | "varints" => LogicalType::Varint,
            "fixed32" | "fixed32s" => LogicalType::Fixed32,
            "fixed64" | "fixed64s" => LogicalType::Fixed64,
            "bytes" => LogicalType::Bytes,
            "string" | "strings" => LogicalType::String,
            "message" | "messages" => LogicalType::Message,
            "int32" | "int32s" => LogicalType::Int32,
            "int64" | "int64s" => LogicalType::Int64,
            "uint" | "uints" => LogicalType::UInt,
            "sint" | "sints" => LogicalType::SInt,
            "bool" | "bools" => LogicalType::Bool,
            "double" | "doubles" => LogicalType::Double,
            "float" | "floats" => LogicalType::Float,
            "sfixed32" | "sfixed32s" => LogicalType::SFixed32,
            "sfixed64" | "sfixed64s" => LogicalType::SFixed64,
            "packed.int32s" => LogicalType::Packed(PackedType::Int32),
            "packed.int64s" => LogicalType::Packed(PackedType::Int64),
            "packed.uints" => LogicalType::Packed(PackedType::UInt),
            "packed.sints" => LogicalType::Packed(PackedType::SInt),
            "packed.bools" => LogicalType::Packed(PackedType::Bool),
            "packed.fixed32s" => LogicalType::Packed(PackedType::Fixed32),
            "packed.floats" => LogicalType::Packed(PackedType::Float),
            "packed.sfixed32s" => LogicalType::Packed(PackedType::SFixed32),
            "packed.fixed64s" => LogicalType::Packed(PackedType::Fixed64),
            "packed.doubles" => LogicalType::Packed(PackedType::Double),
            "packed.sfixed64s" => LogicalType::Packed(PackedType::SFixed64),
            _ => return None,
        };
        Some(typ)
    }
}

impl PackedType {
    pub fn type_name(self) -> &'static str {
        match self {
            PackedType::Int32 => "packed.int32s",
            PackedType::Int64 => "packed.int64s",
            PackedType::UInt => "packed.uints",
            PackedType::SInt => "packed.sints",
            PackedType::Bool => "packed.bools",
            PackedType::Fixed32 => "packed.fixed32s",
            PackedType::Float => "packed.floats",
            PackedType::SFixed32 => "packed.sfixed32s",
            PackedType::Fixed64 => "packed.fixed64s",
            PackedType::Double => "packed.doubles",
            PackedType::SFixed64 => "packed.sfixed64s",
        }
    }
}
