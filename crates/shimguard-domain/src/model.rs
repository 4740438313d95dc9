use shimguard_types::{Location, ModulePath, RepoPath};

/// Everything the checks need to know about one crate's module tree.
#[derive(Clone, Debug, Default)]
pub struct CrateModel {
    pub root: RepoPath,
    pub crate_name: String,
    /// One entry per source file, sorted by module path.
    pub modules: Vec<ModuleModel>,
}

#[derive(Clone, Debug, Default)]
pub struct ModuleModel {
    pub path: ModulePath,
    pub file: RepoPath,
    pub items: Vec<ItemDecl>,
    pub reexports: Vec<ReexportDecl>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// `pub`
    Public,
    /// `pub(crate)`, `pub(super)`, `pub(in ...)`
    Restricted,
    Private,
}

impl Visibility {
    pub fn is_exported(self) -> bool {
        !matches!(self, Visibility::Private)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Struct,
    Enum,
    Union,
    Trait,
    TypeAlias,
    Fn,
    Const,
    Static,
    Mod,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Struct => "struct",
            ItemKind::Enum => "enum",
            ItemKind::Union => "union",
            ItemKind::Trait => "trait",
            ItemKind::TypeAlias => "type",
            ItemKind::Fn => "fn",
            ItemKind::Const => "const",
            ItemKind::Static => "static",
            ItemKind::Mod => "mod",
        }
    }
}

/// A top-level item defined in a module.
#[derive(Clone, Debug)]
pub struct ItemDecl {
    pub kind: ItemKind,
    pub name: String,
    pub visibility: Visibility,
    pub location: Option<Location>,
}

/// Where a `use` declaration points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReexportTarget {
    /// A module inside the scanned crate (`crate::`-anchored).
    Internal(ModulePath),
    /// Another crate; rendered as written.
    External(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReexportSymbol {
    Named { name: String, alias: Option<String> },
    Glob,
}

impl ReexportSymbol {
    /// The name the importing module exposes (alias wins), `*` for globs.
    pub fn exposed_name(&self) -> &str {
        match self {
            ReexportSymbol::Named { name, alias } => alias.as_deref().unwrap_or(name),
            ReexportSymbol::Glob => "*",
        }
    }
}

/// One leaf of a `use` tree: `use a::b::{C, D as E};` yields two decls.
#[derive(Clone, Debug)]
pub struct ReexportDecl {
    pub target: ReexportTarget,
    pub symbol: ReexportSymbol,
    pub visibility: Visibility,
    pub location: Option<Location>,
}

impl ReexportDecl {
    /// Exported re-export into a module of this crate: a forward.
    pub fn is_internal_forward(&self) -> bool {
        self.visibility.is_exported() && matches!(self.target, ReexportTarget::Internal(_))
    }
}

impl CrateModel {
    pub fn module(&self, path: &ModulePath) -> Option<&ModuleModel> {
        self.modules.iter().find(|m| &m.path == path)
    }

    pub fn forwards(&self) -> impl Iterator<Item = (&ModuleModel, &ReexportDecl)> {
        self.modules.iter().flat_map(|m| {
            m.reexports
                .iter()
                .filter(|r| r.is_internal_forward())
                .map(move |r| (m, r))
        })
    }
}

impl ModuleModel {
    pub fn defines(&self, name: &str) -> bool {
        self.items
            .iter()
            .any(|i| i.name == name && i.visibility.is_exported())
    }

    pub fn reexports_name(&self, name: &str) -> bool {
        self.reexports.iter().any(|r| {
            r.visibility.is_exported()
                && matches!(&r.symbol, ReexportSymbol::Named { .. })
                && r.symbol.exposed_name() == name
        })
    }

    /// Exported re-export exposing `name`, other than the declaration `except`.
    pub fn reexport_of(&self, name: &str, except: &ReexportDecl) -> Option<&ReexportDecl> {
        self.reexports.iter().find(|r| {
            !std::ptr::eq(*r, except)
                && r.visibility.is_exported()
                && matches!(&r.symbol, ReexportSymbol::Named { .. })
                && r.symbol.exposed_name() == name
        })
    }

    /// True when an exported glob re-export could be providing `name`.
    pub fn has_exported_glob(&self) -> bool {
        self.reexports
            .iter()
            .any(|r| r.visibility.is_exported() && r.symbol == ReexportSymbol::Glob)
    }
}
