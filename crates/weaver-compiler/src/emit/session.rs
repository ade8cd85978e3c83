//! Compilation session: all mutable state of one compilation.

use std::collections::{HashMap, HashSet, VecDeque};

use weaver_core::{PathCursor, Worklist};

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::graph::{Container, NamespaceId, Service, TypeGraph, TypeId};
use crate::module::{ModuleId, ModuleTree, Visibility};
use crate::names::{self, NameScope};
use crate::scalar::ScalarTable;

use super::reference::ReturnSplit;

/// Something the driver renders into a namespace module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationRef {
    /// A named record, enumeration, union, interface or scalar.
    Type(TypeId),
    /// The operations declared directly in a namespace, rendered as a trait.
    Operations(NamespaceId),
}

/// A declaration that exists only because a reference needed a name for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Synthetic {
    /// An anonymous record or union, rendered under `name`.
    Anonymous { name: String, underlying: TypeId },
    /// A subset of a union's variants, rendered as its own union.
    PartialUnion {
        name: String,
        union: TypeId,
        variants: Vec<usize>,
    },
}

impl Synthetic {
    pub(super) fn key(&self) -> (TypeId, String) {
        match self {
            Synthetic::Anonymous { name, underlying } => (*underlying, name.clone()),
            Synthetic::PartialUnion { name, union, .. } => (*union, name.clone()),
        }
    }
}

pub(crate) type OperationKey = (Container, String);

/// Rust emitter state for one compilation.
pub struct Session<'g> {
    pub(crate) graph: &'g TypeGraph,
    pub(crate) service: &'g Service,
    pub(crate) config: &'g Config,
    pub(crate) scalars: ScalarTable,
    pub(crate) modules: ModuleTree,
    pub(crate) diagnostics: Diagnostics,

    /// Declarations discovered so far; each is rendered once
    pub(crate) declarations: Worklist<DeclarationRef>,
    /// Synthetic declarations waiting to be rendered
    pub(super) synthetics: VecDeque<Synthetic>,
    /// Anonymous type -> synthetic name (first requested name wins)
    pub(super) anonymous: HashMap<TypeId, String>,
    /// (union, requested name) -> synthetic name
    pub(super) partial_unions: HashMap<(TypeId, String), String>,
    /// Keys of synthetics already rendered
    pub(super) synthesized: HashSet<(TypeId, String)>,
    /// Names taken in the synthetic module (for collision avoidance)
    pub(super) synthetic_names: NameScope,
    /// Namespace -> module it is rendered into
    pub(super) namespace_modules: HashMap<NamespaceId, ModuleId>,
    /// Return type splits, computed once per operation from its declaring module
    pub(super) return_splits: HashMap<OperationKey, ReturnSplit>,

    pub(crate) synthetic: ModuleId,
}

impl<'g> Session<'g> {
    pub fn new(graph: &'g TypeGraph, service: &'g Service, config: &'g Config) -> Self {
        let mut modules = ModuleTree::new();
        let models = modules.add_child(ModuleId::ROOT, "models", Visibility::Public, false);
        modules.module_mut(models).doc = Some("Data types declared by the service.".to_string());
        let all = modules.add_child(models, "all", Visibility::Public, false);
        modules.module_mut(all).namespace = Some(NamespaceId::GLOBAL);
        let synthetic = modules.add_child(models, "synthetic", Visibility::Public, false);
        modules.module_mut(synthetic).doc =
            Some("Named declarations for anonymous and partial types.".to_string());

        let mut namespace_modules = HashMap::new();
        namespace_modules.insert(NamespaceId::GLOBAL, all);

        Self {
            graph,
            service,
            config,
            scalars: ScalarTable::standard(graph, config),
            modules,
            diagnostics: Diagnostics::new(),
            declarations: Worklist::new(),
            synthetics: VecDeque::new(),
            anonymous: HashMap::new(),
            partial_unions: HashMap::new(),
            synthesized: HashSet::new(),
            synthetic_names: NameScope::new(),
            namespace_modules,
            return_splits: HashMap::new(),
            synthetic,
        }
    }

    pub fn modules(&self) -> &ModuleTree {
        &self.modules
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Hand the results over, consuming the session.
    pub fn finish(self) -> (ModuleTree, Diagnostics) {
        (self.modules, self.diagnostics)
    }

    pub(crate) fn cursor(&self, module: ModuleId) -> PathCursor {
        self.modules.module(module).cursor.clone()
    }

    pub(crate) fn synthetic_cursor(&self) -> PathCursor {
        self.cursor(self.synthetic)
    }

    /// Reserve a unique name in the synthetic module.
    pub(super) fn unique_synthetic_name(&mut self, base: &str) -> String {
        self.synthetic_names.claim(&names::type_name(base))
    }
}
