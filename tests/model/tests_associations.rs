//! Association recording and merge tests.

use rstest::rstest;
use soluml::{Association, IdAllocator, MergeOutcome, ModelError, ReferenceType, UmlClass};

use crate::helpers::class_fixtures::class_in;
use crate::helpers::model_assertions::{assert_reference_type, get_association, parent_names};

fn new_class(name: &str) -> UmlClass {
    UmlClass::with_allocator(class_in(name, "Test.sol"), &IdAllocator::new()).unwrap()
}

// ============================================================================
// Reference type merging
// ============================================================================

#[rstest]
#[case(ReferenceType::Memory, ReferenceType::Memory, ReferenceType::Memory)]
#[case(ReferenceType::Memory, ReferenceType::Storage, ReferenceType::Storage)]
#[case(ReferenceType::Storage, ReferenceType::Memory, ReferenceType::Storage)]
#[case(ReferenceType::Storage, ReferenceType::Storage, ReferenceType::Storage)]
fn test_reference_type_merge(
    #[case] first: ReferenceType,
    #[case] second: ReferenceType,
    #[case] expected: ReferenceType,
) {
    let mut class = new_class("Owner");
    class.add_association(Association::new("Target", first)).unwrap();
    class.add_association(Association::new("Target", second)).unwrap();

    assert_eq!(class.associations.len(), 1);
    assert_reference_type(&class, "Target", expected);
}

#[test]
fn test_merge_outcomes() {
    let mut class = new_class("Owner");
    assert_eq!(
        class.add_association(Association::new("T", ReferenceType::Memory)),
        Ok(MergeOutcome::Inserted)
    );
    assert_eq!(
        class.add_association(Association::new("T", ReferenceType::Memory)),
        Ok(MergeOutcome::Unchanged)
    );
    assert_eq!(
        class.add_association(Association::new("T", ReferenceType::Storage)),
        Ok(MergeOutcome::Upgraded)
    );
    assert_eq!(
        class.add_association(Association::new("T", ReferenceType::Storage)),
        Ok(MergeOutcome::Unchanged)
    );
}

// ============================================================================
// First write wins
// ============================================================================

#[test]
fn test_realization_keeps_first_value() {
    let mut class = new_class("Token");
    class
        .add_association(Association::new("Base", ReferenceType::Memory).with_realization(true))
        .unwrap();
    class
        .add_association(Association::new("Base", ReferenceType::Storage).with_realization(false))
        .unwrap();

    let stored = get_association(&class, "Base");
    assert!(stored.realization);
    assert_eq!(stored.reference_type, ReferenceType::Storage);
}

#[test]
fn test_later_realization_does_not_promote_usage() {
    let mut class = new_class("Token");
    class
        .add_association(Association::new("Base", ReferenceType::Memory))
        .unwrap();
    class.add_association(Association::realization("Base")).unwrap();

    assert!(!get_association(&class, "Base").realization);
    assert!(class.parent_contracts().is_empty());
}

#[test]
fn test_parent_name_keeps_first_value() {
    let mut class = new_class("User");
    class
        .add_association(Association::new("Order", ReferenceType::Memory).with_parent("Shop"))
        .unwrap();
    class
        .add_association(Association::new("Order", ReferenceType::Memory).with_parent("Market"))
        .unwrap();
    class
        .add_association(Association::new("Order", ReferenceType::Storage))
        .unwrap();

    let stored = get_association(&class, "Order");
    assert_eq!(stored.parent_uml_class_name.as_deref(), Some("Shop"));
    assert_eq!(stored.reference_type, ReferenceType::Storage);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_empty_target_leaves_table_unchanged() {
    let mut class = new_class("Owner");
    class.add_association(Association::realization("Base")).unwrap();
    let before = class.associations.clone();

    let err = class
        .add_association(Association::new("", ReferenceType::Storage))
        .unwrap_err();
    assert_eq!(err, ModelError::missing_target());
    assert_eq!(err.to_string(), "invalid argument: missing target");
    assert_eq!(class.associations, before);
}

// ============================================================================
// Parent contracts
// ============================================================================

#[test]
fn test_parent_contracts_filters_realizations() {
    let mut class = new_class("Child");
    class.add_association(Association::realization("A")).unwrap();
    class
        .add_association(Association::new("B", ReferenceType::Storage))
        .unwrap();
    class.add_association(Association::realization("C")).unwrap();

    assert_eq!(parent_names(&class), ["A", "C"]);
}

#[test]
fn test_parent_contracts_is_one_level() {
    let mut class = new_class("Child");
    class.add_association(Association::realization("Parent")).unwrap();
    // Grandparent edges live on the parent class, not here.
    assert_eq!(parent_names(&class), ["Parent"]);
}
