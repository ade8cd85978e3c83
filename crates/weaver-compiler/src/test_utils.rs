//! Fixtures for compiler tests.

use crate::config::Config;
use crate::graph::{
    Container, EnumMember, Enumeration, Field, HttpOperation, HttpParameter, HttpResponse,
    HttpService, Interface, Intrinsic, LiteralValue, NamespaceId, Operation, OperationRef,
    ParameterLocation, Record, Scalar, Schema, Service, StatusCode, TypeGraph, TypeId, TypeKind,
    TypeNode, Union, UnionVariant, Verb,
};
use crate::{Compilation, compile};

/// A graph with the standard library scalars and a `PetStore` service namespace.
pub struct Fixture {
    pub graph: TypeGraph,
    pub std: NamespaceId,
    pub service: NamespaceId,
    pub string: TypeId,
    pub int32: TypeId,
    pub int64: TypeId,
    pub boolean: TypeId,
    pub utc_date_time: TypeId,
    pub http: Option<HttpService>,
}

impl Fixture {
    pub fn new() -> Self {
        let mut graph = TypeGraph::new();
        let std = graph.add_namespace("TypeSpec", NamespaceId::GLOBAL);
        let service = graph.add_namespace("PetStore", NamespaceId::GLOBAL);

        let mut scalar = |name: &str| {
            graph.add_type(TypeNode::new(TypeKind::Scalar(Scalar {
                name: name.to_string(),
                namespace: std,
                base: None,
            })))
        };
        let string = scalar("string");
        let int32 = scalar("int32");
        let int64 = scalar("int64");
        let boolean = scalar("boolean");
        let utc_date_time = scalar("utcDateTime");

        Self {
            graph,
            std,
            service,
            string,
            int32,
            int64,
            boolean,
            utc_date_time,
            http: None,
        }
    }

    pub fn namespace(&mut self, name: &str, parent: NamespaceId) -> NamespaceId {
        self.graph.add_namespace(name, parent)
    }

    pub fn record(&mut self, name: &str, fields: Vec<Field>) -> TypeId {
        let namespace = self.service;
        self.record_in(namespace, name, fields)
    }

    pub fn record_in(&mut self, namespace: NamespaceId, name: &str, fields: Vec<Field>) -> TypeId {
        self.graph.add_type(TypeNode::new(TypeKind::Record(Record {
            name: Some(name.to_string()),
            namespace: Some(namespace),
            template_args: Vec::new(),
            friendly_name: None,
            fields,
            error: false,
        })))
    }

    pub fn error_record(&mut self, name: &str, fields: Vec<Field>) -> TypeId {
        let id = self.record(name, fields);
        if let TypeKind::Record(record) = &mut self.graph.ty_mut(id).kind {
            record.error = true;
        }
        id
    }

    pub fn anonymous_record(&mut self, fields: Vec<Field>) -> TypeId {
        self.graph.add_type(TypeNode::new(TypeKind::Record(Record {
            name: None,
            namespace: None,
            template_args: Vec::new(),
            friendly_name: None,
            fields,
            error: false,
        })))
    }

    /// Replace the fields of a record created earlier (for self-references).
    pub fn set_fields(&mut self, record: TypeId, fields: Vec<Field>) {
        if let TypeKind::Record(r) = &mut self.graph.ty_mut(record).kind {
            r.fields = fields;
        }
    }

    pub fn scalar(&mut self, name: &str, base: Option<TypeId>) -> TypeId {
        self.graph.add_type(TypeNode::new(TypeKind::Scalar(Scalar {
            name: name.to_string(),
            namespace: self.service,
            base,
        })))
    }

    pub fn enumeration(&mut self, name: &str, members: &[(&str, Option<&str>)]) -> TypeId {
        let members = members
            .iter()
            .map(|(name, value)| EnumMember {
                name: name.to_string(),
                value: value.map(|v| LiteralValue::String(v.to_string())),
                doc: None,
            })
            .collect();
        self.graph
            .add_type(TypeNode::new(TypeKind::Enum(Enumeration {
                name: name.to_string(),
                namespace: self.service,
                members,
            })))
    }

    pub fn union(
        &mut self,
        name: Option<&str>,
        variants: &[(Option<&str>, TypeId)],
        discriminator: Option<&str>,
    ) -> TypeId {
        let variants = variants
            .iter()
            .map(|(name, ty)| UnionVariant {
                name: name.map(String::from),
                ty: *ty,
            })
            .collect();
        self.graph
            .add_type(TypeNode::new(TypeKind::Union(Union {
                name: name.map(String::from),
                namespace: name.map(|_| self.service),
                variants,
                discriminator: discriminator.map(String::from),
            })))
    }

    pub fn interface(&mut self, name: &str, operations: Vec<Operation>) -> TypeId {
        self.graph
            .add_type(TypeNode::new(TypeKind::Interface(Interface {
                name: name.to_string(),
                namespace: self.service,
                operations,
            })))
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.graph
            .add_type(TypeNode::new(TypeKind::Array { element }))
    }

    pub fn map(&mut self, value: TypeId) -> TypeId {
        self.graph.add_type(TypeNode::new(TypeKind::Map { value }))
    }

    pub fn literal(&mut self, value: LiteralValue) -> TypeId {
        self.graph
            .add_type(TypeNode::new(TypeKind::Literal { value }))
    }

    pub fn intrinsic(&mut self, name: Intrinsic) -> TypeId {
        self.graph
            .add_type(TypeNode::new(TypeKind::Intrinsic { name }))
    }

    /// Register an HTTP endpoint for an interface operation.
    pub fn endpoint(
        &mut self,
        interface: TypeId,
        operation: &str,
        verb: Verb,
        path: &str,
        responses: Vec<HttpResponse>,
    ) {
        let parameters = path_parameters(path, self.string);
        self.http
            .get_or_insert_with(HttpService::default)
            .operations
            .push(HttpOperation {
                operation: OperationRef {
                    container: Container::Interface { id: interface },
                    name: operation.to_string(),
                },
                verb,
                path: path.to_string(),
                parameters,
                responses,
                span: None,
            });
    }

    pub fn schema(self) -> Schema {
        let service = Service {
            namespace: self.service,
            title: None,
            version: None,
            http: self.http,
        };
        Schema::new(self.graph, service).expect("fixture schema is valid")
    }

    pub fn compile(self, config: &Config) -> Compilation {
        compile(&self.schema(), config).expect("fixture compiles")
    }
}

pub fn field(name: &str, ty: TypeId) -> Field {
    Field::new(name, ty)
}

pub fn operation(name: &str, parameters: Vec<Field>, return_type: TypeId) -> Operation {
    Operation {
        name: name.to_string(),
        parameters,
        return_type,
        doc: None,
        span: None,
    }
}

pub fn response(code: u16, body: Option<TypeId>) -> HttpResponse {
    HttpResponse {
        status: StatusCode::Exact { code },
        body,
        span: None,
    }
}

fn path_parameters(path: &str, string: TypeId) -> Vec<HttpParameter> {
    crate::http::parse_template(path)
        .into_iter()
        .filter_map(|segment| match segment {
            crate::http::RouteSegment::Parameter(name) => Some(HttpParameter {
                name,
                location: ParameterLocation::Path,
                ty: string,
                optional: false,
            }),
            crate::http::RouteSegment::Literal(_) => None,
        })
        .collect()
}

/// Text of the generated file at `path`.
pub fn file(compilation: &Compilation, path: &str) -> String {
    compilation
        .files()
        .into_iter()
        .find(|f| f.path == path)
        .map(|f| f.text)
        .unwrap_or_else(|| panic!("no generated file at `{path}`"))
}
