use std::path::PathBuf;

use indoc::indoc;
use tempfile::TempDir;

/// Pets interface served over HTTP: `getPet` at `/pets/{petId}` and
/// `listPets` at `/pets`.
pub const PET_STORE: &str = indoc! {r#"
    {
      "namespaces": [
        { "name": "" },
        { "name": "TypeSpec", "parent": 0 },
        { "name": "PetStore", "parent": 0 }
      ],
      "types": [
        { "kind": "scalar", "name": "string", "namespace": 1 },
        {
          "kind": "record",
          "name": "Pet",
          "namespace": 2,
          "fields": [{ "name": "name", "type": 0 }]
        },
        { "kind": "array", "element": 1 },
        {
          "kind": "interface",
          "name": "Pets",
          "namespace": 2,
          "operations": [
            {
              "name": "getPet",
              "parameters": [{ "name": "petId", "type": 0 }],
              "return_type": 1
            },
            { "name": "listPets", "return_type": 2 }
          ]
        }
      ],
      "service": {
        "namespace": 2,
        "title": "Pet Store",
        "http": {
          "operations": [
            {
              "operation": { "container": { "kind": "interface", "id": 3 }, "name": "getPet" },
              "verb": "get",
              "path": "/pets/{petId}",
              "parameters": [{ "name": "petId", "location": "path", "type": 0 }],
              "responses": [{ "status": { "kind": "exact", "code": 200 }, "body": 1 }]
            },
            {
              "operation": { "container": { "kind": "interface", "id": 3 }, "name": "listPets" },
              "verb": "get",
              "path": "/pets",
              "responses": [{ "status": { "kind": "exact", "code": 200 }, "body": 2 }]
            }
          ]
        }
      }
    }
"#};

/// Same service with `listPets` bound to `GET /pets` twice.
pub fn pet_store_with_duplicate_route() -> String {
    let mut schema: serde_json::Value = serde_json::from_str(PET_STORE).unwrap();
    let operations = schema["service"]["http"]["operations"].as_array_mut().unwrap();
    let list_pets = operations[1].clone();
    operations.push(list_pets);
    serde_json::to_string_pretty(&schema).unwrap()
}

/// Write `text` to `schema.json` in a fresh temporary directory.
pub fn schema_file(text: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    std::fs::write(&path, text).unwrap();
    (dir, path)
}
