use crate::names::{
    NameScope, const_name, element_name, escape_keyword, map_value_name, type_name, value_name,
};

#[test]
fn keywords_become_raw_identifiers() {
    assert_eq!(escape_keyword("type"), "r#type");
    assert_eq!(escape_keyword("async"), "r#async");
    assert_eq!(escape_keyword("yield"), "r#yield");
    assert_eq!(escape_keyword("kind"), "kind");
}

#[test]
fn path_keywords_get_a_suffix() {
    assert_eq!(escape_keyword("self"), "self_");
    assert_eq!(escape_keyword("Self"), "Self_");
    assert_eq!(escape_keyword("crate"), "crate_");
    assert_eq!(escape_keyword("super"), "super_");
}

#[test]
fn leading_digits_are_prefixed() {
    assert_eq!(escape_keyword("2fa"), "_2fa");
}

#[test]
fn conventions() {
    assert_eq!(value_name("petId"), "pet_id");
    assert_eq!(value_name("type"), "r#type");
    assert_eq!(type_name("pet_store"), "PetStore");
    assert_eq!(type_name("self"), "Self_");
    assert_eq!(const_name("maxPageSize"), "MAX_PAGE_SIZE");
}

#[test]
fn element_names() {
    assert_eq!(element_name("Pets"), "Pet");
    assert_eq!(element_name("Categories"), "Category");
    assert_eq!(element_name("Addresses"), "Address");
    assert_eq!(element_name("Boxes"), "Box");
    assert_eq!(element_name("Matches"), "Match");
    assert_eq!(element_name("Status"), "StatusItem");
    assert_eq!(element_name("Glass"), "GlassItem");
    assert_eq!(element_name("Tag"), "TagItem");
}

#[test]
fn map_value_names() {
    assert_eq!(map_value_name("Labels"), "LabelsValue");
}

#[test]
fn name_scope_suffixes_repeated_claims() {
    let mut scope = NameScope::new();
    assert_eq!(scope.claim("A"), "A");
    assert_eq!(scope.claim("A"), "A2");
    assert_eq!(scope.claim("A2"), "A22");
    assert_eq!(scope.claim("A"), "A3");
    assert_eq!(scope.claim("B"), "B");
}
