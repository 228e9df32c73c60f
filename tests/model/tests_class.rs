//! UmlClass construction tests.

use rayon::prelude::*;
use rstest::rstest;
use rustc_hash::FxHashSet;
use soluml::{
    Association, AttributeType, ClassId, ClassProperties, ClassStereotype, IdAllocator,
    ModelError, OperatorStereotype, ReferenceType, UmlClass,
};

use crate::helpers::class_fixtures::{class_in, token_properties};

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_ids_strictly_increase() {
    let ids = IdAllocator::new();
    let mut last: Option<ClassId> = None;
    for name in ["A", "B", "A", "C"] {
        let class = UmlClass::with_allocator(class_in(name, "X.sol"), &ids).unwrap();
        if let Some(prev) = last {
            assert!(class.id() > prev, "{} should follow {}", class.id(), prev);
        }
        last = Some(class.id());
    }
}

#[test]
fn test_global_constructor_is_monotonic() {
    let first = UmlClass::new(class_in("First", "A.sol")).unwrap();
    let second = UmlClass::new(class_in("First", "A.sol")).unwrap();
    assert!(second.id() > first.id());
}

#[test]
fn test_parallel_construction_never_reuses_ids() {
    let ids = IdAllocator::new();
    let classes: Vec<UmlClass> = (0..1000)
        .into_par_iter()
        .map(|i| UmlClass::with_allocator(class_in(&format!("C{i}"), "Par.sol"), &ids).unwrap())
        .collect();

    let unique: FxHashSet<ClassId> = classes.iter().map(UmlClass::id).collect();
    assert_eq!(unique.len(), 1000);
    assert_eq!(ids.peek(), ClassId(1000));
}

// ============================================================================
// Name validation
// ============================================================================

#[rstest]
#[case(ClassProperties::default())]
#[case(ClassProperties::new("", "/a.sol", "a.sol"))]
#[case(ClassProperties::new("", "/a.sol", "a.sol").with_stereotype(ClassStereotype::Contract))]
fn test_missing_name_fails(#[case] props: ClassProperties) {
    let ids = IdAllocator::new();
    let err = UmlClass::with_allocator(props, &ids).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err, ModelError::missing_name());
    assert_eq!(ids.peek(), ClassId(0), "failed construction must not consume an id");
}

// ============================================================================
// Token scenario
// ============================================================================

#[test]
fn test_token_scenario() {
    let ids = IdAllocator::new();
    let mut token = UmlClass::with_allocator(token_properties(), &ids).unwrap();

    assert_eq!(token.stereotype(), ClassStereotype::Contract);
    assert_eq!(token.attributes.len(), 1);
    assert_eq!(token.attributes[0].type_name.as_deref(), Some("uint256"));
    assert_eq!(token.attributes[0].attribute_type, Some(AttributeType::Elementary));
    assert_eq!(token.operators[0].stereotype, OperatorStereotype::None);
    assert_eq!(token.operators[0].signature(), "transfer(address,uint256)");

    token
        .add_association(Association {
            target_uml_class_name: "ERC20".into(),
            reference_type: ReferenceType::Storage,
            realization: true,
            parent_uml_class_name: None,
        })
        .unwrap();

    let parents = token.parent_contracts();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].target(), "ERC20");
}

#[test]
fn test_incremental_population() {
    let ids = IdAllocator::new();
    let mut class = UmlClass::with_allocator(class_in("Vault", "Vault.sol"), &ids).unwrap();
    class.imported_file_names.push("Token.sol".to_string());
    class
        .constants
        .push(soluml::Constant::new("MAX_SUPPLY", 1_000_000));
    class.enums.push(ClassId(42));

    assert_eq!(class.imported_file_names, ["Token.sol"]);
    assert_eq!(class.constants[0].value, 1_000_000);
    assert_eq!(class.enums, [ClassId(42)]);
}
