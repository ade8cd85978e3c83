//! Type reference resolution.
//!
//! Every occurrence of a type in emitted code goes through
//! [`Session::resolve`]. The result is spelled relative to the module the
//! occurrence is written in, and whatever declaration it names is enqueued
//! for emission, so resolving references is what grows the output.

use weaver_core::{Case, ItemPath, PathCursor};

use crate::diagnostics::DiagnosticKind;
use crate::error::{CompileError, Result};
use crate::graph::{Container, Intrinsic, Operation, Span, TypeId, TypeKind};
use crate::names;
use crate::scalar::Disposition;

use super::session::{DeclarationRef, Session, Synthetic};

const INFALLIBLE: &str = "::core::convert::Infallible";

/// One side (success or error) of an operation's return type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitReturn {
    /// Nothing can be returned on this side.
    Infallible,
    /// A single type, spelled afresh at each use site.
    Type { ty: TypeId, name: String },
    /// A partial union synthesized for this side, by absolute location.
    Union(ItemPath),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnSplit {
    pub success: SplitReturn,
    pub error: SplitReturn,
}

impl Session<'_> {
    /// Spell `ty` as seen from the module at `cursor`.
    ///
    /// `preferred` names the synthetic declaration created when `ty` is an
    /// anonymous record or union that has not been named yet.
    pub fn resolve(
        &mut self,
        ty: TypeId,
        span: Option<Span>,
        disposition: Disposition,
        cursor: &PathCursor,
        preferred: &str,
    ) -> Result<String> {
        let graph = self.graph;
        let kind = graph.kind(ty);

        match kind {
            TypeKind::Scalar(_) => Ok(self.resolve_scalar(ty, span, disposition)),
            TypeKind::Record(_) | TypeKind::Union(_) if kind.declared_name().is_none() => {
                let reference = self.resolve_anonymous(ty, cursor, preferred)?;
                Ok(by_disposition(reference, disposition))
            }
            TypeKind::Record(_)
            | TypeKind::Enum(_)
            | TypeKind::Union(_)
            | TypeKind::Interface(_) => {
                let reference = self.resolve_declaration(ty, cursor)?;
                Ok(by_disposition(reference, disposition))
            }
            TypeKind::Array { element } => {
                let element_name = names::element_name(preferred);
                let element =
                    self.resolve(*element, span, Disposition::Owned, cursor, &element_name)?;
                Ok(match disposition {
                    Disposition::Owned => format!("Vec<{element}>"),
                    Disposition::Borrowed | Disposition::Param => format!("&[{element}]"),
                })
            }
            TypeKind::Map { value } => {
                let value_name = names::map_value_name(preferred);
                let value = self.resolve(*value, span, Disposition::Owned, cursor, &value_name)?;
                let map = format!("::std::collections::HashMap<String, {value}>");
                Ok(by_disposition(map, disposition))
            }
            TypeKind::Literal { .. } => Err(CompileError::LiteralType(ty)),
            TypeKind::Intrinsic { name } => Ok(match name {
                Intrinsic::Never => "!".to_string(),
                Intrinsic::Void | Intrinsic::Null => "()".to_string(),
                Intrinsic::Unknown => self.config.vendored("serde_json::Value"),
                Intrinsic::ErrorType => {
                    "compile_error!(\"encountered an error type in the type graph\")".to_string()
                }
            }),
        }
    }

    /// Spelling of a scalar, walking `extends` until a registered scalar is found.
    ///
    /// Unregistered scalars are reported and spelled `()` so emission can continue.
    pub(crate) fn resolve_scalar(
        &mut self,
        ty: TypeId,
        span: Option<Span>,
        disposition: Disposition,
    ) -> String {
        let graph = self.graph;
        let mut current = Some(ty);
        // Bounded by the arena size in case the `extends` chain loops.
        for _ in 0..=graph.type_count() {
            let Some(id) = current else {
                break;
            };
            if let Some(spelling) = self.scalars.get(id) {
                return spelling.get(disposition).to_string();
            }
            current = match graph.kind(id) {
                TypeKind::Scalar(scalar) => scalar.base,
                _ => None,
            };
        }

        let name = graph
            .qualified_name(ty)
            .unwrap_or_else(|| ty.to_string());
        self.diagnostics
            .report(
                DiagnosticKind::UnrecognizedScalar,
                span.or(graph.ty(ty).span),
            )
            .message(name)
            .emit();
        "()".to_string()
    }

    fn resolve_declaration(&mut self, ty: TypeId, cursor: &PathCursor) -> Result<String> {
        let name = self.declaration_name(ty)?;
        let namespace = self.owning_namespace(ty)?;
        let module = self.module_for_namespace(namespace)?;

        self.declarations.add(DeclarationRef::Type(ty));
        Ok(cursor.path_to(&self.cursor(module), Some(&name))?)
    }

    fn resolve_anonymous(
        &mut self,
        ty: TypeId,
        cursor: &PathCursor,
        preferred: &str,
    ) -> Result<String> {
        let name = match self.anonymous.get(&ty) {
            Some(name) => name.clone(),
            None => {
                if Case::parse(preferred).is_empty() {
                    return Err(CompileError::AnonymousWithoutName(ty));
                }
                let name = self.unique_synthetic_name(preferred);
                tracing::trace!(%ty, name = %name, "anonymous type named");
                self.anonymous.insert(ty, name.clone());
                self.synthetics.push_back(Synthetic::Anonymous {
                    name: name.clone(),
                    underlying: ty,
                });
                name
            }
        };

        Ok(cursor.path_to(&self.synthetic_cursor(), Some(&name))?)
    }

    /// Reference to a union restricted to `variants`, synthesized under `name`.
    pub fn resolve_partial_union(
        &mut self,
        union: TypeId,
        variants: Vec<usize>,
        cursor: &PathCursor,
        name: &str,
    ) -> Result<String> {
        let key = (union, name.to_string());
        let assigned = match self.partial_unions.get(&key) {
            Some(assigned) => assigned.clone(),
            None => {
                let assigned = self.unique_synthetic_name(name);
                self.partial_unions.insert(key, assigned.clone());
                self.synthetics.push_back(Synthetic::PartialUnion {
                    name: assigned.clone(),
                    union,
                    variants,
                });
                assigned
            }
        };

        Ok(cursor.path_to(&self.synthetic_cursor(), Some(&assigned))?)
    }

    /// Split an operation's return type into its success and error sides.
    ///
    /// Error records go to the error side. A union return type is split by
    /// variant: an empty side is `Infallible`, a single variant is referenced
    /// directly, and several variants become a partial union. The split is
    /// computed once per operation, from the module declaring it.
    pub fn split_return_type(
        &mut self,
        container: Container,
        operation: &Operation,
    ) -> Result<ReturnSplit> {
        let key = (container, operation.name.clone());
        if let Some(split) = self.return_splits.get(&key) {
            return Ok(split.clone());
        }

        let graph = self.graph;
        let return_type = operation.return_type;
        let op = Case::parse(&operation.name).pascal_case();

        let split = match graph.kind(return_type) {
            TypeKind::Union(union) => {
                let (errors, successes): (Vec<usize>, Vec<usize>) = (0..union.variants.len())
                    .partition(|&i| graph.is_error_record(union.variants[i].ty));

                let success_name = if errors.is_empty() {
                    format!("{op}Response")
                } else {
                    format!("{op}SuccessResponse")
                };
                let error_name = format!("{op}ErrorResponse");

                let module = self.container_module(container)?;
                let cursor = self.cursor(module);
                let whole = union.variants.len();
                ReturnSplit {
                    success: self.split_side(return_type, successes, whole, &cursor, success_name)?,
                    error: self.split_side(return_type, errors, whole, &cursor, error_name)?,
                }
            }
            _ if graph.is_error_record(return_type) => ReturnSplit {
                success: SplitReturn::Infallible,
                error: SplitReturn::Type {
                    ty: return_type,
                    name: format!("{op}ErrorResponse"),
                },
            },
            _ => ReturnSplit {
                success: SplitReturn::Type {
                    ty: return_type,
                    name: format!("{op}Response"),
                },
                error: SplitReturn::Infallible,
            },
        };

        tracing::trace!(operation = %operation.name, ?split, "return type split");
        self.return_splits.insert(key, split.clone());
        Ok(split)
    }

    fn split_side(
        &mut self,
        union: TypeId,
        variants: Vec<usize>,
        whole: usize,
        cursor: &PathCursor,
        name: String,
    ) -> Result<SplitReturn> {
        let graph = self.graph;
        match variants.as_slice() {
            [] => Ok(SplitReturn::Infallible),
            [single] => {
                let TypeKind::Union(u) = graph.kind(union) else {
                    return Ok(SplitReturn::Infallible);
                };
                Ok(SplitReturn::Type {
                    ty: u.variants[*single].ty,
                    name,
                })
            }
            _ if variants.len() == whole => Ok(SplitReturn::Type { ty: union, name }),
            _ => {
                let reference = self.resolve_partial_union(union, variants, cursor, &name)?;
                Ok(SplitReturn::Union(
                    cursor.resolve_relative_item_path(&reference)?,
                ))
            }
        }
    }

    /// Spell one side of a return split from the module at `cursor`.
    pub fn render_split(&mut self, side: &SplitReturn, cursor: &PathCursor) -> Result<String> {
        match side {
            SplitReturn::Infallible => Ok(INFALLIBLE.to_string()),
            SplitReturn::Type { ty, name } => {
                self.resolve(*ty, None, Disposition::Owned, cursor, name)
            }
            SplitReturn::Union(path) => Ok(path.relative_to(cursor)?),
        }
    }
}

fn by_disposition(reference: String, disposition: Disposition) -> String {
    match disposition {
        Disposition::Borrowed => format!("&{reference}"),
        Disposition::Owned | Disposition::Param => reference,
    }
}
