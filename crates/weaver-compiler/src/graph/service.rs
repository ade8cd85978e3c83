//! Service root and HTTP endpoint descriptions.

use serde::{Deserialize, Serialize};

use super::{NamespaceId, Span, TypeId};

/// The service being compiled: its root namespace plus optional HTTP surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub namespace: NamespaceId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub http: Option<HttpService>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpService {
    #[serde(default)]
    pub operations: Vec<HttpOperation>,
    #[serde(default)]
    pub auth: Vec<AuthScheme>,
}

/// One endpoint: an operation bound to a verb and a path template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpOperation {
    pub operation: OperationRef,
    pub verb: Verb,
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<HttpParameter>,
    #[serde(default)]
    pub responses: Vec<HttpResponse>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationRef {
    pub container: Container,
    pub name: String,
}

/// Where an operation is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Container {
    Namespace { id: NamespaceId },
    Interface { id: TypeId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Put,
    Post,
    Patch,
    Delete,
    Head,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Put => "PUT",
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpParameter {
    pub name: String,
    pub location: ParameterLocation,
    #[serde(rename = "type")]
    pub ty: TypeId,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: StatusCode,
    /// Body type; `None` for empty responses.
    #[serde(default)]
    pub body: Option<TypeId>,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusCode {
    Exact { code: u16 },
    Range { start: u16, end: u16 },
    Default,
}

impl StatusCode {
    /// Whether a response with this status signals failure when its body does not say.
    pub fn is_error(&self) -> bool {
        match self {
            StatusCode::Exact { code } => *code >= 400,
            StatusCode::Range { start, .. } => *start >= 400,
            StatusCode::Default => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthScheme {
    pub id: String,
    #[serde(flatten)]
    pub kind: AuthKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthKind {
    ApiKey {
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        name: String,
    },
    Http {
        scheme: String,
    },
    Oauth2,
    OpenIdConnect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

impl AuthKind {
    pub fn describe(&self) -> String {
        match self {
            AuthKind::ApiKey { location, .. } => {
                let location = match location {
                    ApiKeyLocation::Header => "header",
                    ApiKeyLocation::Query => "query",
                    ApiKeyLocation::Cookie => "cookie",
                };
                format!("API key in {location}")
            }
            AuthKind::Http { scheme } => format!("HTTP {scheme}"),
            AuthKind::Oauth2 => "OAuth2".to_string(),
            AuthKind::OpenIdConnect => "OpenID Connect".to_string(),
        }
    }
}
