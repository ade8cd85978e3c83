use indoc::indoc;

use super::*;
use crate::config::Config;
use crate::test_utils::{Fixture, field};

const PET_STORE: &str = indoc! {r#"
    {
      "namespaces": [
        { "name": "" },
        { "name": "TypeSpec", "parent": 0 },
        { "name": "PetStore", "parent": 0, "doc": "Pets and their owners." }
      ],
      "types": [
        { "kind": "scalar", "name": "string", "namespace": 1 },
        {
          "kind": "record",
          "name": "Pet",
          "namespace": 2,
          "doc": "A pet.",
          "fields": [
            { "name": "name", "type": 0 },
            { "name": "tags", "type": 2, "optional": true }
          ]
        },
        { "kind": "array", "element": 0 },
        { "kind": "literal", "value": 3 },
        { "kind": "intrinsic", "name": "void" }
      ],
      "service": { "namespace": 2, "title": "Pet Store", "version": "1.0" }
    }
"#};

#[test]
fn from_json_links_namespaces_and_declarations() {
    let schema = Schema::from_json(PET_STORE).unwrap();
    let graph = &schema.graph;

    assert_eq!(graph.namespace_count(), 3);
    assert_eq!(graph.type_count(), 5);
    assert_eq!(
        graph.namespace(NamespaceId::GLOBAL).children(),
        [NamespaceId(1), NamespaceId(2)]
    );
    assert_eq!(graph.namespace(NamespaceId(1)).declarations(), [TypeId(0)]);
    assert_eq!(graph.namespace(NamespaceId(2)).declarations(), [TypeId(1)]);

    let pet = graph.record(TypeId(1)).unwrap();
    assert_eq!(pet.fields[1].name, "tags");
    assert!(pet.fields[1].optional);
    assert_eq!(graph.ty(TypeId(1)).doc.as_deref(), Some("A pet."));
    assert_eq!(
        graph.kind(TypeId(3)),
        &TypeKind::Literal {
            value: LiteralValue::Number(3.0)
        }
    );
    assert_eq!(schema.service.title.as_deref(), Some("Pet Store"));
}

#[test]
fn qualified_names() {
    let schema = Schema::from_json(PET_STORE).unwrap();
    let graph = &schema.graph;

    assert_eq!(graph.qualified_name(TypeId(0)).unwrap(), "TypeSpec.string");
    assert_eq!(graph.qualified_name(TypeId(1)).unwrap(), "PetStore.Pet");
    assert_eq!(graph.qualified_name(TypeId(2)), None);
    assert_eq!(graph.qualified_namespace(NamespaceId(2)).unwrap(), "PetStore");
    assert_eq!(graph.qualified_namespace(NamespaceId::GLOBAL).unwrap(), "");
}

#[test]
fn nested_namespace_paths() {
    let mut fixture = Fixture::new();
    let store = fixture.service;
    let inventory = fixture.namespace("Inventory", store);
    let toys = fixture.namespace("Toys", inventory);

    let graph = &fixture.graph;
    assert_eq!(
        graph.namespace_path(toys).unwrap(),
        ["PetStore", "Inventory", "Toys"]
    );
    assert_eq!(
        graph.qualified_namespace(toys).unwrap(),
        "PetStore.Inventory.Toys"
    );
}

#[test]
fn template_instances_compose_their_name() {
    let mut fixture = Fixture::new();
    let page = fixture.record("Page", vec![]);
    if let TypeKind::Record(record) = &mut fixture.graph.ty_mut(page).kind {
        record.template_args = vec!["Pet".to_string()];
    }

    let name = fixture.graph.kind(page).declared_name().unwrap();
    assert_eq!(name.pascal_case(), "PagePet");

    if let TypeKind::Record(record) = &mut fixture.graph.ty_mut(page).kind {
        record.friendly_name = Some("PetPage".to_string());
    }
    let name = fixture.graph.kind(page).declared_name().unwrap();
    assert_eq!(name.pascal_case(), "PetPage");
}

#[test]
fn empty_record_and_union_names_are_anonymous() {
    let mut fixture = Fixture::new();
    let record = fixture.record("", vec![]);
    let union = fixture.union(Some(""), &[], None);

    assert!(fixture.graph.kind(record).declared_name().is_none());
    assert!(fixture.graph.kind(union).declared_name().is_none());

    if let TypeKind::Record(r) = &mut fixture.graph.ty_mut(record).kind {
        r.friendly_name = Some(String::new());
    }
    assert!(fixture.graph.kind(record).declared_name().is_none());
}

#[test]
fn dangling_type_handle_is_rejected() {
    let json = PET_STORE.replace(r#""element": 0"#, r#""element": 9"#);
    let err = Schema::from_json(&json).unwrap_err();

    assert!(matches!(err, CompileError::UnknownType(TypeId(9))));
    insta::assert_snapshot!(err.to_string(), @"type#9 does not exist");
}

#[test]
fn dangling_namespace_handle_is_rejected() {
    let json = PET_STORE.replace(r#""namespace": 2, "title""#, r#""namespace": 7, "title""#);
    let err = Schema::from_json(&json).unwrap_err();

    assert!(matches!(err, CompileError::UnknownNamespace(NamespaceId(7))));
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = Schema::from_json("{").unwrap_err();
    assert!(matches!(err, CompileError::Json(_)));
}

#[test]
fn namespace_cycle_is_detached() {
    let mut fixture = Fixture::new();
    let inner = fixture.namespace("Inner", fixture.service);
    fixture.graph.namespace_mut(fixture.service).parent = Some(inner);
    fixture.graph.link().unwrap();

    let err = fixture.graph.namespace_path(inner).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"namespace `Inner` is not reachable from the global namespace");
}

#[test]
fn endpoint_container_must_be_an_interface() {
    let mut fixture = Fixture::new();
    let pet = fixture.record("Pet", vec![field("name", fixture.string)]);
    fixture.endpoint(pet, "getPet", Verb::Get, "/pets", vec![]);

    let service = Service {
        namespace: fixture.service,
        title: None,
        version: None,
        http: fixture.http.take(),
    };
    let err = Schema::new(fixture.graph, service).unwrap_err();
    assert!(matches!(err, CompileError::NotAnInterface(id) if id == pet));
}

#[test]
fn json_schema_compiles() {
    let schema = Schema::from_json(PET_STORE).unwrap();
    let compilation = crate::compile(&schema, &Config::default()).unwrap();

    assert!(compilation.diagnostics().is_empty());
    let pet_store = crate::test_utils::file(&compilation, "models/all/pet_store.rs");
    insta::assert_snapshot!(pet_store, @r#"
    // Generated by weaver. Do not edit.

    //! Pets and their owners.

    /// A pet.
    #[derive(Debug, Clone, PartialEq, ::weaver_runtime::vendored::serde::Deserialize, ::weaver_runtime::vendored::serde::Serialize)]
    #[serde(crate = "::weaver_runtime::vendored::serde")]
    pub struct Pet {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub tags: Option<Vec<String>>,
    }
    "#);

    let root = crate::test_utils::file(&compilation, "mod.rs");
    insta::assert_snapshot!(root, @r"
    // Generated by weaver. Do not edit.

    //! Pet Store (version 1.0)

    pub mod models;

    #[allow(unused_imports)]
    pub use models::all::pet_store::*;
    ");
}
