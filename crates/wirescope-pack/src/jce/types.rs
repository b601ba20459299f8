//! JCE element type enumeration and key-name table.

/// On-wire JCE element type, the low nibble of a tag/type header.
///
/// The three `Empty*` codes never appear on the wire; they exist to name the
/// keys of zero-length composites in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JceType {
    Char = 0,
    Short = 1,
    Int = 2,
    Int64 = 3,
    Float = 4,
    Double = 5,
    String1 = 6,
    String4 = 7,
    Map = 8,
    List = 9,
    StructBegin = 10,
    StructEnd = 11,
    Zero = 12,
    SimpleList = 13,
    EmptyMap = 17,
    EmptyList = 18,
    EmptySimpleList = 19,
}

impl JceType {
    /// Maps a wire nibble; 14 and 15 are unassigned.
    pub fn from_wire(code: u8) -> Option<JceType> {
        match code {
            0 => Some(JceType::Char),
            1 => Some(JceType::Short),
            2 => Some(JceType::Int),
            3 => Some(JceType::Int64),
            4 => Some(JceType::Float),
            5 => Some(JceType::Double),
            6 => Some(JceType::String1),
            7 => Some(JceType::String4),
            8 => Some(JceType::Map),
            9 => Some(JceType::List),
            10 => Some(JceType::StructBegin),
            11 => Some(JceType::StructEnd),
            12 => Some(JceType::Zero),
            13 => Some(JceType::SimpleList),
            _ => None,
        }
    }

    /// Key-name segment for this type. Both string widths render as
    /// `string`; struct markers share the `struct` name.
    pub fn type_name(self) -> &'static str {
        match self {
            JceType::Char => "char",
            JceType::Short => "short",
            JceType::Int => "int",
            JceType::Int64 => "int64",
            JceType::Float => "float",
            JceType::Double => "double",
            JceType::String1 | JceType::String4 => "string",
            JceType::Map => "map",
            JceType::List => "list",
            JceType::StructBegin | JceType::StructEnd => "struct",
            JceType::Zero => "zero",
            JceType::SimpleList => "simplelist",
            JceType::EmptyMap => "emptymap",
            JceType::EmptyList => "emptylist",
            JceType::EmptySimpleList => "emptysimplelist",
        }
    }

    /// Formats the output key for `tag`.
    pub fn key(self, tag: u64) -> String {
        format!("{tag:04}_{}", self.type_name())
    }
}

/// Field tag and element type read from one tag/type header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub tag: u64,
    pub wire_type: JceType,
}
