//! Enumerations shared by classes, members and associations.
//!
//! Every enum maps to and from the Solidity keyword it stands for, so the
//! parser can classify source constructs and the renderer can print them.

use std::fmt;

// ============================================================================
// VISIBILITY
// ============================================================================

/// Visibility of a state variable or function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    #[default]
    None,
    Public,
    External,
    Internal,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Public => "public",
            Self::External => "external",
            Self::Internal => "internal",
            Self::Private => "private",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::Public),
            "external" => Some(Self::External),
            "internal" => Some(Self::Internal),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

// ============================================================================
// CLASS STEREOTYPE
// ============================================================================

/// What kind of source construct a class was built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassStereotype {
    #[default]
    None,
    Library,
    Interface,
    Abstract,
    Contract,
    Struct,
    Enum,
    /// File-level constants grouped into one class.
    Constant,
    /// Placeholder for a file's imports.
    Import,
}

impl ClassStereotype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Library => "library",
            Self::Interface => "interface",
            Self::Abstract => "abstract",
            Self::Contract => "contract",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Constant => "constant",
            Self::Import => "import",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "library" => Some(Self::Library),
            "interface" => Some(Self::Interface),
            "abstract" => Some(Self::Abstract),
            "contract" => Some(Self::Contract),
            "struct" => Some(Self::Struct),
            "enum" => Some(Self::Enum),
            "constant" => Some(Self::Constant),
            "import" => Some(Self::Import),
            _ => None,
        }
    }

    /// Returns true for structs and enums, the only classes that may carry a parent id.
    pub fn is_type_definition(&self) -> bool {
        matches!(self, Self::Struct | Self::Enum)
    }
}

// ============================================================================
// OPERATOR STEREOTYPE
// ============================================================================

/// Distinguishes modifiers, events and special functions from plain functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatorStereotype {
    #[default]
    None,
    Modifier,
    Event,
    Payable,
    Fallback,
    Abstract,
}

impl OperatorStereotype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Modifier => "modifier",
            Self::Event => "event",
            Self::Payable => "payable",
            Self::Fallback => "fallback",
            Self::Abstract => "abstract",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "modifier" => Some(Self::Modifier),
            "event" => Some(Self::Event),
            "payable" => Some(Self::Payable),
            "fallback" => Some(Self::Fallback),
            "abstract" => Some(Self::Abstract),
            _ => None,
        }
    }
}

// ============================================================================
// ATTRIBUTE TYPE
// ============================================================================

/// Shape of an attribute's declared type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeType {
    /// `uint256`, `address`, `bool`, ...
    #[default]
    Elementary,
    /// A contract, struct or enum name.
    UserDefined,
    Function,
    Array,
    Mapping,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::UserDefined => "user-defined",
            Self::Function => "function",
            Self::Array => "array",
            Self::Mapping => "mapping",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "elementary" => Some(Self::Elementary),
            "user-defined" => Some(Self::UserDefined),
            "function" => Some(Self::Function),
            "array" => Some(Self::Array),
            "mapping" => Some(Self::Mapping),
            _ => None,
        }
    }
}

// ============================================================================
// REFERENCE TYPE
// ============================================================================

/// How an associated type is held by the owning class.
///
/// Ordered `Memory < Storage`: when the same association is recorded twice
/// the stronger kind is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceType {
    #[default]
    Memory,
    Storage,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Storage => "storage",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "memory" | "calldata" => Some(Self::Memory),
            "storage" => Some(Self::Storage),
            _ => None,
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(
    Visibility,
    ClassStereotype,
    OperatorStereotype,
    AttributeType,
    ReferenceType
);
