use crate::config::Config;
use crate::graph::LiteralValue;
use crate::test_utils::{Fixture, field, file, operation};

/// Text of `models/all/pet_store.rs` from the first line starting with `marker`.
fn from_marker(f: Fixture, marker: &str) -> String {
    let compilation = f.compile(&Config::default());
    let text = file(&compilation, "models/all/pet_store.rs");
    let start = text
        .find(marker)
        .unwrap_or_else(|| panic!("`{marker}` not found in:\n{text}"));
    text[start..].to_string()
}

#[test]
fn interface_trait_with_split_return() {
    let mut f = Fixture::new();
    let pet = f.record("Pet", vec![field("name", f.string)]);
    let not_found = f.error_record("NotFound", vec![field("message", f.string)]);
    let result = f.union(None, &[(None, pet), (None, not_found)], None);
    let mut get_pet = operation("getPet", vec![field("petId", f.string)], result);
    get_pet.doc = Some("Fetch one pet.".to_string());
    let pets = f.interface("Pets", vec![get_pet]);
    f.graph.ty_mut(pets).doc = Some("Pet operations.".to_string());

    insta::assert_snapshot!(from_marker(f, "/// Pet operations."), @r"
    /// Pet operations.
    pub trait Pets {
        type Error<OperationError>: ::std::error::Error + Send + Sync + 'static;

        /// Fetch one pet.
        fn get_pet(&mut self, pet_id: impl AsRef<str>) -> impl ::weaver_runtime::OperationFuture<Pet, Self::Error<NotFound>>;
    }
    ");
}

#[test]
fn optional_parameters_get_an_options_struct() {
    let mut f = Fixture::new();
    let pet = f.record("Pet", vec![field("name", f.string)]);
    let pets = f.array(pet);
    let list_pets = operation(
        "listPets",
        vec![field("kind", f.string), field("limit", f.int32).optional()],
        pets,
    );
    f.interface("Pets", vec![list_pets]);

    insta::assert_snapshot!(from_marker(f, "/// Optional parameters"), @r"
    /// Optional parameters of `list_pets`.
    #[derive(Debug, Clone, Default)]
    pub struct PetsListPetsOptions {
        pub limit: Option<i32>,
    }

    pub trait Pets {
        type Error<OperationError>: ::std::error::Error + Send + Sync + 'static;

        fn list_pets(&mut self, kind: impl AsRef<str>) -> impl ::weaver_runtime::OperationFuture<Vec<Pet>, Self::Error<::core::convert::Infallible>> {
            self.list_pets_with_options(kind, Default::default())
        }

        fn list_pets_with_options(&mut self, kind: impl AsRef<str>, options: PetsListPetsOptions) -> impl ::weaver_runtime::OperationFuture<Vec<Pet>, Self::Error<::core::convert::Infallible>>;
    }
    ");
}

#[test]
fn literal_parameters_are_skipped() {
    let mut f = Fixture::new();
    let version = f.literal(LiteralValue::String("v1".to_string()));
    let ping = operation(
        "ping",
        vec![field("apiVersion", version), field("echo", f.boolean)],
        f.string,
    );
    f.interface("Health", vec![ping]);

    let text = from_marker(f, "pub trait Health");
    assert!(text.contains("    fn ping(&mut self, echo: bool) -> impl ::weaver_runtime::OperationFuture<String, "));
    assert!(!text.contains("api_version"));
}

#[test]
fn namespace_operations_become_a_trait() {
    let mut f = Fixture::new();
    let void = f.intrinsic(crate::graph::Intrinsic::Void);
    let service = f.service;
    f.graph
        .namespace_mut(service)
        .operations
        .push(operation("ping", vec![], void));

    insta::assert_snapshot!(from_marker(f, "pub trait"), @r"
    pub trait PetStore {
        type Error<OperationError>: ::std::error::Error + Send + Sync + 'static;

        fn ping(&mut self) -> impl ::weaver_runtime::OperationFuture<(), Self::Error<::core::convert::Infallible>>;
    }
    ");
}

#[test]
fn anonymous_parameter_is_named_after_the_operation() {
    let mut f = Fixture::new();
    let body = f.anonymous_record(vec![field("name", f.string)]);
    let pet = f.record("Pet", vec![field("name", f.string)]);
    f.interface(
        "Pets",
        vec![operation("createPet", vec![field("body", body)], pet)],
    );

    let compilation = f.compile(&Config::default());
    let text = file(&compilation, "models/all/pet_store.rs");
    assert!(text.contains(
        "fn create_pet(&mut self, body: super::super::synthetic::CreatePetBody) -> "
    ));
    let synthetic = file(&compilation, "models/synthetic.rs");
    assert!(synthetic.contains("pub struct CreatePetBody {"));
}

#[test]
fn host_crate_path_is_configurable() {
    let mut f = Fixture::new();
    f.interface("Pets", vec![operation("count", vec![], f.int32)]);

    let config = Config::new().crate_path("crate::runtime");
    let compilation = f.compile(&config);
    let text = file(&compilation, "models/all/pet_store.rs");
    assert!(text.contains("impl crate::runtime::OperationFuture<i32, Self::Error<::core::convert::Infallible>>;"));
}

#[test]
fn global_namespace_operations_get_a_fallback_trait_name() {
    let mut f = Fixture::new();
    f.service = crate::graph::NamespaceId::GLOBAL;
    let string = f.string;
    f.graph
        .namespace_mut(crate::graph::NamespaceId::GLOBAL)
        .operations
        .push(operation("ping", vec![], string));

    let compilation = f.compile(&Config::default());
    let text = file(&compilation, "models/all.rs");
    assert!(text.contains("pub trait GlobalOperations {\n"));
    assert!(text.contains(
        "    fn ping(&mut self) -> impl ::weaver_runtime::OperationFuture<String, Self::Error<::core::convert::Infallible>>;\n"
    ));
    assert!(!text.contains("pub trait  {"));
}
