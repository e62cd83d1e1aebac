//! Two-scope symbol resolution.
//!
//! The class scope holds `static` and `field` entries and lives for one class.
//! The subroutine scope holds `argument` and `local` entries and is rebuilt for
//! every subroutine. Indices are dense per storage kind, zero-based, in
//! declaration order.
//!
//! Lookup order is selectable through [`ShadowingRule`]. The default searches
//! the class scope first, so a local that reuses a field's name resolves to
//! the field.

use jack_divide::SubroutineKind;
use jack_ir::grammar::CLASS_VAR_KEYWORDS;
use jack_ir::vm::Segment;
use jack_ir::{Keyword, Token};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// A symbol's declaration category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StorageKind {
    Static,
    Field,
    Argument,
    Local,
}

impl StorageKind {
    /// The memory segment a symbol of this kind lives in.
    pub const fn segment(self) -> Segment {
        match self {
            StorageKind::Static => Segment::Static,
            StorageKind::Field => Segment::This,
            StorageKind::Argument => Segment::Argument,
            StorageKind::Local => Segment::Local,
        }
    }

    pub fn from_keyword(kw: Keyword) -> Option<Self> {
        match kw {
            Keyword::Static => Some(StorageKind::Static),
            Keyword::Field => Some(StorageKind::Field),
            Keyword::Var => Some(StorageKind::Local),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StorageKind::Static => "static",
            StorageKind::Field => "field",
            StorageKind::Argument => "argument",
            StorageKind::Local => "local",
        }
    }

    const fn slot(self) -> usize {
        match self {
            StorageKind::Static => 0,
            StorageKind::Field => 1,
            StorageKind::Argument => 2,
            StorageKind::Local => 3,
        }
    }
}

/// One resolved name.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Symbol {
    pub name: String,
    pub declared_type: String,
    pub kind: StorageKind,
    pub index: u16,
}

/// Which scope wins when a name is declared in both.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ShadowingRule {
    /// Class scope is searched before subroutine scope.
    #[default]
    ClassFirst,
    /// Subroutine scope is searched first; inner declarations shadow outer ones.
    InnermostFirst,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Scope {
    entries: FxHashMap<String, Symbol>,
    counts: [u16; 4],
}

impl Scope {
    fn clear(&mut self) {
        self.entries.clear();
        self.counts = [0; 4];
    }

    fn define(&mut self, name: &str, declared_type: &str, kind: StorageKind) {
        let slot = kind.slot();
        let index = self.counts[slot];
        self.counts[slot] = index.saturating_add(1);

        trace!(name, declared_type, kind = kind.as_str(), index, "define");
        let previous = self.entries.insert(
            name.to_owned(),
            Symbol {
                name: name.to_owned(),
                declared_type: declared_type.to_owned(),
                kind,
                index,
            },
        );
        if previous.is_some() {
            debug!(name, "redeclared name replaces earlier entry");
        }
    }
}

/// Class and subroutine scopes for the class being compiled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    class_scope: Scope,
    subroutine_scope: Scope,
    rule: ShadowingRule,
}

impl SymbolTable {
    pub fn new(rule: ShadowingRule) -> Self {
        SymbolTable {
            rule,
            ..SymbolTable::default()
        }
    }

    /// Rebuild the class scope from `static`/`field` declaration ranges.
    ///
    /// Comma-separated names in one declaration become separate entries
    /// sharing its type and kind. Running this twice on the same input yields
    /// the same table.
    pub fn build_class_scope(&mut self, var_decs: &[&[Token]]) {
        self.class_scope.clear();
        for dec in var_decs {
            let Some(kind) = dec
                .first()
                .filter(|t| t.is_any_keyword(&CLASS_VAR_KEYWORDS))
                .and_then(Token::keyword)
                .and_then(StorageKind::from_keyword)
            else {
                debug!("class variable declaration without storage keyword");
                continue;
            };
            define_all(&mut self.class_scope, &dec[1..], kind);
        }
    }

    /// Clear the subroutine scope.
    pub fn reset_subroutine_scope(&mut self) {
        self.subroutine_scope.clear();
    }

    /// Rebuild the subroutine scope.
    ///
    /// `entries` are parameter ranges (`int x`) followed by `var` declaration
    /// ranges. A method first receives the implicit `this` as argument 0, typed
    /// by `class_name`.
    pub fn build_subroutine_scope(
        &mut self,
        entries: &[&[Token]],
        kind: SubroutineKind,
        class_name: &str,
    ) {
        self.reset_subroutine_scope();

        if kind == SubroutineKind::Method {
            self.subroutine_scope
                .define("this", class_name, StorageKind::Argument);
        }

        for entry in entries {
            match entry.first() {
                Some(first) if first.is_keyword(Keyword::Var) => {
                    define_all(&mut self.subroutine_scope, &entry[1..], StorageKind::Local);
                }
                Some(_) => define_all(&mut self.subroutine_scope, entry, StorageKind::Argument),
                None => {}
            }
        }
    }

    /// Look a name up under the table's shadowing rule.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        let class = || self.class_scope.entries.get(name);
        let subroutine = || self.subroutine_scope.entries.get(name);
        match self.rule {
            ShadowingRule::ClassFirst => class().or_else(subroutine),
            ShadowingRule::InnermostFirst => subroutine().or_else(class),
        }
    }

    /// Number of entries of `kind` defined in the scope that holds that kind.
    pub fn var_count(&self, kind: StorageKind) -> u16 {
        match kind {
            StorageKind::Static | StorageKind::Field => self.class_scope.counts[kind.slot()],
            StorageKind::Argument | StorageKind::Local => {
                self.subroutine_scope.counts[kind.slot()]
            }
        }
    }

    /// Object size in words for a constructor's allocation.
    pub fn field_count(&self) -> u16 {
        self.var_count(StorageKind::Field)
    }
}

/// Define every name in `<type> name (, name)* [;]`.
fn define_all(scope: &mut Scope, tokens: &[Token], kind: StorageKind) {
    let Some((type_token, names)) = tokens.split_first() else {
        return;
    };
    let Some(declared_type) = type_token.word() else {
        debug!(token = %type_token, "declaration without a type");
        return;
    };

    for name in names.iter().filter_map(Token::identifier) {
        scope.define(name, declared_type, kind);
    }
}
