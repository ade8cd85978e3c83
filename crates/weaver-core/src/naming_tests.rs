use crate::naming::{Case, Convention, pascal_case, snake_case, upper_snake_case};

fn components(identifier: &str) -> Vec<String> {
    Case::parse(identifier).components().to_vec()
}

#[test]
fn parse_camel_and_pascal() {
    assert_eq!(components("petId"), ["pet", "id"]);
    assert_eq!(components("PetStore"), ["pet", "store"]);
    assert_eq!(components("pet"), ["pet"]);
}

#[test]
fn parse_acronyms() {
    assert_eq!(components("HTTPResponse"), ["http", "response"]);
    assert_eq!(components("OpenAIContext"), ["open", "ai", "context"]);
    assert_eq!(components("userID"), ["user", "id"]);
    assert_eq!(components("ID"), ["id"]);
}

#[test]
fn parse_separators() {
    assert_eq!(components("x-rate-limit"), ["x", "rate", "limit"]);
    assert_eq!(components("FOO_BAR"), ["foo", "bar"]);
    assert_eq!(components("Pet.Store"), ["pet", "store"]);
    assert_eq!(components("Pet::Store"), ["pet", "store"]);
    assert_eq!(components("a/b c"), ["a", "b", "c"]);
}

#[test]
fn parse_separator_ends_component_before_uppercase() {
    assert_eq!(components("foo_Bar"), ["foo", "bar"]);
    assert_eq!(components("HTTP_Response"), ["http", "response"]);
}

#[test]
fn parse_consecutive_separators_yield_no_empty_components() {
    assert_eq!(components("__foo--bar__"), ["foo", "bar"]);
    assert_eq!(components("::"), Vec::<String>::new());
}

#[test]
fn parse_digits_do_not_start_components() {
    assert_eq!(components("v2Beta"), ["v2", "beta"]);
    assert_eq!(components("int32"), ["int32"]);
    assert_eq!(components("Base64Url"), ["base64", "url"]);
}

#[test]
fn parse_empty() {
    let case = Case::parse("");
    assert!(case.is_empty());
    assert_eq!(case.render(Convention::Pascal), "");
}

#[test]
fn render_conventions() {
    let case = Case::parse("OpenAIContext");
    assert_eq!(case.render(Convention::Pascal), "OpenAiContext");
    assert_eq!(case.render(Convention::Camel), "openAiContext");
    assert_eq!(case.render(Convention::Snake), "open_ai_context");
    assert_eq!(case.render(Convention::Kebab), "open-ai-context");
    assert_eq!(case.render(Convention::Dot), "open.ai.context");
    assert_eq!(case.render(Convention::Path), "open/ai/context");
    assert_eq!(case.render(Convention::Scope), "open::ai::context");
    assert_eq!(case.render(Convention::Space), "open ai context");
}

#[test]
fn render_upper() {
    let case = Case::parse("maxPageSize");
    assert_eq!(case.render_upper(Convention::Snake), "MAX_PAGE_SIZE");
    assert_eq!(case.render_upper(Convention::Kebab), "MAX-PAGE-SIZE");
}

#[test]
fn rendering_is_idempotent() {
    for identifier in ["HTTPResponse", "petId", "x-rate-limit", "v2Beta", "OpenAIContext"] {
        let pascal = pascal_case(identifier);
        assert_eq!(pascal_case(&pascal), pascal, "{identifier}");

        let snake = snake_case(identifier);
        assert_eq!(snake_case(&snake), snake, "{identifier}");
    }
}

#[test]
fn from_components_reparses_each_part() {
    let case = Case::from_components(["Page", "petOwner"]);
    assert_eq!(case.pascal_case(), "PagePetOwner");
}

#[test]
fn join_appends_components() {
    let case = Case::parse("get").join(&Case::parse("PetResponse"));
    assert_eq!(case.pascal_case(), "GetPetResponse");
}

#[test]
fn shorthands() {
    assert_eq!(pascal_case("pet_store"), "PetStore");
    assert_eq!(snake_case("PetStore"), "pet_store");
    assert_eq!(upper_snake_case("PetStore"), "PET_STORE");
}

#[test]
fn display_uses_spaces() {
    insta::assert_snapshot!(Case::parse("HTTPResponseCode").to_string(), @"http response code");
}
