//! Class members: attributes (state variables, struct fields, enum values),
//! operators (functions, modifiers, events), constants and imports.
//!
//! Attributes and operators share a [`MemberInfo`] descriptor. An operator
//! embeds one rather than extending an attribute type, and [`Member`] /
//! [`MemberRef`] give a single polymorphic view over both.

use smol_str::SmolStr;

use super::types::{AttributeType, OperatorStereotype, Visibility};

// ============================================================================
// MEMBER DESCRIPTOR
// ============================================================================

/// Fields common to every attribute and operator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberInfo {
    pub visibility: Visibility,
    pub name: SmolStr,
    /// True for constants and immutables, whose value is fixed at compile time.
    pub compiled: bool,
    /// Class the member came from. Only set on squashed classes.
    pub source_contract: Option<SmolStr>,
}

impl MemberInfo {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// ATTRIBUTE
// ============================================================================

/// A contract variable, struct field or enum value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub info: MemberInfo,
    /// Declared type. Enum values have none.
    pub type_name: Option<SmolStr>,
    pub attribute_type: Option<AttributeType>,
}

impl Attribute {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            info: MemberInfo::new(name),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn with_type(mut self, type_name: impl Into<SmolStr>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_attribute_type(mut self, attribute_type: AttributeType) -> Self {
        self.attribute_type = Some(attribute_type);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.info.visibility = visibility;
        self
    }

    /// Mark as `constant` or `immutable`.
    pub fn compiled(mut self) -> Self {
        self.info.compiled = true;
        self
    }

    pub fn with_source_contract(mut self, source: impl Into<SmolStr>) -> Self {
        self.info.source_contract = Some(source.into());
        self
    }
}

// ============================================================================
// OPERATOR
// ============================================================================

/// A function, modifier or event parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// Absent for unnamed return values and modifier arguments.
    pub name: Option<SmolStr>,
    pub type_name: SmolStr,
}

impl Parameter {
    /// An unnamed parameter.
    pub fn new(type_name: impl Into<SmolStr>) -> Self {
        Self {
            name: None,
            type_name: type_name.into(),
        }
    }

    pub fn named(name: impl Into<SmolStr>, type_name: impl Into<SmolStr>) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
        }
    }
}

/// A function, modifier or event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operator {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub info: MemberInfo,
    pub stereotype: OperatorStereotype,
    pub parameters: Vec<Parameter>,
    pub return_parameters: Vec<Parameter>,
    /// `pure`, `view`, `payable` or empty; stored as written.
    pub state_mutability: Option<SmolStr>,
    /// Names of the modifiers applied to this operator.
    pub modifiers: Vec<SmolStr>,
    /// Signature hash. Only set on squashed classes.
    pub hash: Option<SmolStr>,
    /// Distance from the squashed class to the class defining this operator.
    /// Only set on squashed classes.
    pub inheritance_position: Option<u32>,
}

impl Operator {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            info: MemberInfo::new(name),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn with_stereotype(mut self, stereotype: OperatorStereotype) -> Self {
        self.stereotype = stereotype;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.info.visibility = visibility;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn with_return(mut self, parameter: Parameter) -> Self {
        self.return_parameters.push(parameter);
        self
    }

    pub fn with_state_mutability(mut self, mutability: impl Into<SmolStr>) -> Self {
        self.state_mutability = Some(mutability.into());
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<SmolStr>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn with_source_contract(mut self, source: impl Into<SmolStr>) -> Self {
        self.info.source_contract = Some(source.into());
        self
    }

    /// `name(type1,type2)`, the part of an operator that overrides match on.
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({})", self.info.name, params)
    }

    /// True when declared `payable`, either as stereotype or mutability.
    pub fn is_payable(&self) -> bool {
        self.stereotype == OperatorStereotype::Payable
            || self.state_mutability.as_deref() == Some("payable")
    }
}

// ============================================================================
// CONSTANT
// ============================================================================

/// A file-level constant with a numeric value.
///
/// `value` saturates at the bounds of `i128`. Constants read from source text
/// keep that text in `literal`, which stays exact for `uint256` values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constant {
    pub name: SmolStr,
    pub value: i128,
    #[cfg_attr(feature = "serde", serde(default))]
    pub literal: Option<SmolStr>,
    /// Class the constant came from. Only set on squashed classes.
    pub source_contract: Option<SmolStr>,
}

impl Constant {
    pub fn new(name: impl Into<SmolStr>, value: i128) -> Self {
        Self {
            name: name.into(),
            value,
            literal: None,
            source_contract: None,
        }
    }

    /// Constant from a Solidity number literal: decimal, `0x` hex or
    /// scientific (`2e18`), with optional `_` separators and a leading `-`.
    ///
    /// Returns `None` when `text` is not such a literal.
    pub fn from_literal(name: impl Into<SmolStr>, text: &str) -> Option<Self> {
        let value = parse_number_literal(text.trim())?;
        Some(Self {
            literal: Some(SmolStr::new(text.trim())),
            ..Self::new(name, value)
        })
    }
}

fn parse_number_literal(text: &str) -> Option<i128> {
    if let Some(rest) = text.strip_prefix('-') {
        return parse_number_literal(rest).map(|v| -v);
    }
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        return accumulate_digits(hex, 16);
    }
    match digits.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => {
            let mantissa = accumulate_digits(mantissa, 10)?;
            let exponent: u32 = exponent.parse().ok()?;
            Some(mantissa.saturating_mul(10i128.saturating_pow(exponent)))
        }
        None => accumulate_digits(&digits, 10),
    }
}

/// Saturates at `i128::MAX`.
fn accumulate_digits(digits: &str, radix: u32) -> Option<i128> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0i128, |acc, c| {
        let digit = c.to_digit(radix)?;
        Some(acc.saturating_mul(i128::from(radix)).saturating_add(i128::from(digit)))
    })
}

// ============================================================================
// POLYMORPHIC MEMBER
// ============================================================================

/// Either kind of class member, owned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    Attribute(Attribute),
    Operator(Operator),
}

impl Member {
    pub fn info(&self) -> &MemberInfo {
        match self {
            Member::Attribute(a) => &a.info,
            Member::Operator(o) => &o.info,
        }
    }

    pub fn as_member_ref(&self) -> MemberRef<'_> {
        match self {
            Member::Attribute(a) => MemberRef::Attribute(a),
            Member::Operator(o) => MemberRef::Operator(o),
        }
    }
}

impl From<Attribute> for Member {
    fn from(attribute: Attribute) -> Self {
        Member::Attribute(attribute)
    }
}

impl From<Operator> for Member {
    fn from(operator: Operator) -> Self {
        Member::Operator(operator)
    }
}

/// Either kind of class member, borrowed from its class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberRef<'a> {
    Attribute(&'a Attribute),
    Operator(&'a Operator),
}

impl<'a> MemberRef<'a> {
    pub fn info(&self) -> &'a MemberInfo {
        match self {
            MemberRef::Attribute(a) => &a.info,
            MemberRef::Operator(o) => &o.info,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.info().name
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, MemberRef::Operator(_))
    }
}

// ============================================================================
// IMPORTS
// ============================================================================

/// One symbol pulled in by an import directive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportedName {
    pub class_name: SmolStr,
    pub alias: Option<SmolStr>,
}

impl ImportedName {
    pub fn new(class_name: impl Into<SmolStr>) -> Self {
        Self {
            class_name: class_name.into(),
            alias: None,
        }
    }

    pub fn aliased(class_name: impl Into<SmolStr>, alias: impl Into<SmolStr>) -> Self {
        Self {
            class_name: class_name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Name the symbol is known by in the importing file.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.class_name)
    }
}

/// An import directive as written in the source file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Import {
    pub absolute_path: String,
    /// Empty for a whole-file import.
    pub class_names: Vec<ImportedName>,
}

impl Import {
    pub fn new(absolute_path: impl Into<String>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            class_names: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: ImportedName) -> Self {
        self.class_names.push(name);
        self
    }
}
