use weaver_compiler::Schema;
use weaver_compiler::graph::HttpService;

use super::CliError;
use super::routes::{render_json, render_tree, resolve_request};
use super::test_utils::PET_STORE;

fn http() -> HttpService {
    let schema = Schema::from_json(PET_STORE).unwrap();
    schema.service.http.unwrap()
}

#[test]
fn tree_is_labelled_with_operation_names() {
    insta::assert_snapshot!(render_tree(&http()), @r#"
    "/pets"
      GET listPets
      "/"
        {petId}
          GET getPet
    "#);
}

#[test]
fn json_lists_endpoints_in_declaration_order() {
    insta::assert_snapshot!(render_json(&http()).unwrap(), @r#"
    [
      {
        "method": "GET",
        "path": "/pets/{petId}",
        "operation": "getPet"
      },
      {
        "method": "GET",
        "path": "/pets",
        "operation": "listPets"
      }
    ]
    "#);
}

#[test]
fn resolve_reports_operation_and_bindings() {
    let http = http();
    assert_eq!(
        resolve_request(&http, "GET /pets/7").unwrap(),
        "getPet\n  petId = 7\n"
    );
    assert_eq!(resolve_request(&http, "get /pets").unwrap(), "listPets\n");
}

#[test]
fn resolve_misses() {
    let http = http();

    let err = resolve_request(&http, "DELETE /pets").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"`DELETE /pets`: the path exists but not for this method");

    let err = resolve_request(&http, "GET /owners").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"`GET /owners`: no route matches the path");
}

#[test]
fn malformed_requests() {
    let http = http();
    for request in ["/pets", "FETCH /pets", ""] {
        let err = resolve_request(&http, request).unwrap_err();
        assert!(matches!(err, CliError::InvalidRequest(_)), "{request}");
    }
}
