//! Squashed class tests.

use soluml::{
    Association, Attribute, ClassRegistry, Operator, Parameter, ReferenceType,
    model::operator_hash,
};

use crate::helpers::class_fixtures::{class_in, token_hierarchy};
use crate::helpers::model_assertions::assert_reference_type;

#[test]
fn test_squash_merges_ancestor_members() {
    let h = token_hierarchy();
    let squashed = h.registry.squash(h.token).unwrap();

    assert_eq!(squashed.name, "Token");
    let attrs: Vec<(&str, Option<&str>)> = squashed
        .attributes
        .iter()
        .map(|a| (a.name(), a.info.source_contract.as_deref()))
        .collect();
    assert_eq!(
        attrs,
        [("owner", Some("Ownable")), ("balance", Some("Token"))]
    );
}

#[test]
fn test_squash_keeps_most_derived_operator() {
    let h = token_hierarchy();
    let squashed = h.registry.squash(h.token).unwrap();

    let ops: Vec<(&str, Option<&str>, Option<u32>)> = squashed
        .operators
        .iter()
        .map(|o| {
            (
                o.name(),
                o.info.source_contract.as_deref(),
                o.inheritance_position,
            )
        })
        .collect();
    assert_eq!(
        ops,
        [
            ("transfer", Some("Token"), Some(0)),
            ("transferOwnership", Some("Token"), Some(0)),
            ("onlyOwner", Some("Ownable"), Some(2)),
            ("_msgSender", Some("Context"), Some(3)),
        ]
    );

    let transfer = &squashed.operators[0];
    assert_eq!(transfer.hash.as_ref(), Some(&operator_hash(transfer)));
    assert_eq!(squashed.operators[1].modifiers, ["onlyOwner"]);
}

fn diamond() -> (ClassRegistry, soluml::ClassId) {
    // contract Base { x }  contract Left is Base { l }  contract Right is Base { r }
    // contract Bottom is Left, Right { b }
    let mut registry = ClassRegistry::new();
    for (name, attr) in [("Base", "x"), ("Left", "l"), ("Right", "r"), ("Bottom", "b")] {
        registry
            .create(class_in(name, "Diamond.sol").with_attributes([Attribute::new(attr)]))
            .unwrap();
    }
    let edges = [
        ("Left", "Base"),
        ("Right", "Base"),
        ("Bottom", "Left"),
        ("Bottom", "Right"),
    ];
    for (child, parent) in edges {
        let id = registry.first_by_name(child).unwrap().id();
        registry
            .add_association(id, Association::realization(parent))
            .unwrap();
    }
    let bottom = registry.first_by_name("Bottom").unwrap().id();
    (registry, bottom)
}

#[test]
fn test_squash_diamond_attributes_most_base_first() {
    let (registry, bottom) = diamond();
    let squashed = registry.squash(bottom).unwrap();

    let names: Vec<&str> = squashed.attributes.iter().map(|a| a.name()).collect();
    assert_eq!(names, ["x", "l", "r", "b"]);
    let sources: Vec<Option<&str>> = squashed
        .attributes
        .iter()
        .map(|a| a.info.source_contract.as_deref())
        .collect();
    assert_eq!(
        sources,
        [Some("Base"), Some("Left"), Some("Right"), Some("Bottom")]
    );
}

#[test]
fn test_squash_rightmost_parent_overrides() {
    // contract A is B, C where both B and C define foo(uint256)
    let mut registry = ClassRegistry::new();
    let foo = || Operator::new("foo").with_parameter(Parameter::new("uint256"));
    registry
        .create(class_in("B", "Multi.sol").with_operators([foo(), Operator::new("onlyB")]))
        .unwrap();
    registry
        .create(class_in("C", "Multi.sol").with_operators([foo()]))
        .unwrap();
    let a = registry.create(class_in("A", "Multi.sol")).unwrap();
    registry.add_association(a, Association::realization("B")).unwrap();
    registry.add_association(a, Association::realization("C")).unwrap();

    let squashed = registry.squash(a).unwrap();
    let ops: Vec<(&str, Option<&str>, Option<u32>)> = squashed
        .operators
        .iter()
        .map(|o| {
            (
                o.name(),
                o.info.source_contract.as_deref(),
                o.inheritance_position,
            )
        })
        .collect();
    assert_eq!(ops, [("foo", Some("C"), Some(1)), ("onlyB", Some("B"), Some(2))]);
}

#[test]
fn test_squash_associations() {
    let h = token_hierarchy();
    let squashed = h.registry.squash(h.token).unwrap();

    assert!(squashed.parent_contracts().is_empty());
    assert_eq!(squashed.associations.len(), 1);
    assert_reference_type(&squashed, "Ledger", ReferenceType::Memory);
}

#[test]
fn test_squash_constants_most_derived_wins() {
    let mut registry = ClassRegistry::new();
    let base = registry
        .create(
            class_in("Base", "B.sol")
                .with_constants([soluml::Constant::new("FEE", 30), soluml::Constant::new("CAP", 5)]),
        )
        .unwrap();
    let child = registry
        .create(class_in("Child", "C.sol").with_constants([soluml::Constant::new("FEE", 25)]))
        .unwrap();
    registry
        .add_association(child, Association::realization("Base"))
        .unwrap();

    let squashed = registry.squash(child).unwrap();
    let constants: Vec<(&str, i128, Option<&str>)> = squashed
        .constants
        .iter()
        .map(|c| (c.name.as_str(), c.value, c.source_contract.as_deref()))
        .collect();
    assert_eq!(
        constants,
        [("FEE", 25, Some("Child")), ("CAP", 5, Some("Base"))]
    );
    assert!(registry.get(base).unwrap().constants[0].source_contract.is_none());
}

#[test]
fn test_squash_does_not_modify_registry() {
    let h = token_hierarchy();
    let before = h.registry.get(h.token).unwrap().clone();
    let squashed = h.registry.squash(h.token).unwrap();

    assert_ne!(squashed.id(), h.token);
    assert_eq!(h.registry.len(), 5);
    assert_eq!(h.registry.get(h.token).unwrap(), &before);
}
