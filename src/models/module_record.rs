//! Module record data structures
//!
//! One `ModuleRecord` is produced per Python source file and carries the
//! module's defined symbols and import statements. Records are the interchange
//! format between the extractor and the analysis passes, and serialize to the
//! JSON report consumed by `--from-report`. Every field is required on
//! deserialization; a report missing one signals a broken extractor.

use serde::{Deserialize, Serialize};

/// Filename marking a directory as a Python package.
pub const PACKAGE_MARKER: &str = "__init__";

/// A single symbol definition site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDef {
    pub name: String,
}

impl SymbolDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One `from X import a, b` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromImport {
    /// Dotted module name, relative specifier, or a mix (`..pkg.mod`)
    pub module: String,
    /// Imported identifiers in source order
    pub names: Vec<String>,
}

impl FromImport {
    pub fn new(module: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            module: module.into(),
            names,
        }
    }
}

/// All import statements of one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTable {
    /// Plain `import x.y` entries, rendered with their ` as alias` suffix when present
    pub imports: Vec<String>,
    /// `from X import ...` entries
    pub from_imports: Vec<FromImport>,
}

impl ImportTable {
    /// Total number of import entries of both kinds
    pub fn len(&self) -> usize {
        self.imports.len() + self.from_imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.from_imports.is_empty()
    }
}

/// Everything recorded about one Python module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Path relative to the scan root, `/`-separated on every platform.
    /// Unique within one analysis snapshot.
    pub path: String,
    /// Top-level function definitions in source order
    pub functions: Vec<SymbolDef>,
    /// Top-level class definitions in source order
    pub classes: Vec<SymbolDef>,
    /// Import statements
    pub imports: ImportTable,
}

impl ModuleRecord {
    /// Create an empty record for the given module path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            functions: Vec::new(),
            classes: Vec::new(),
            imports: ImportTable::default(),
        }
    }

    /// Record a top-level function definition
    pub fn add_function(&mut self, name: impl Into<String>) {
        self.functions.push(SymbolDef::new(name));
    }

    /// Record a top-level class definition
    pub fn add_class(&mut self, name: impl Into<String>) {
        self.classes.push(SymbolDef::new(name));
    }

    /// Record a plain `import x.y` entry (already alias-suffixed if aliased)
    pub fn add_plain_import(&mut self, entry: impl Into<String>) {
        self.imports.imports.push(entry.into());
    }

    /// Record a `from X import ...` entry
    pub fn add_from_import(&mut self, module: impl Into<String>, names: Vec<String>) {
        self.imports.from_imports.push(FromImport::new(module, names));
    }

    /// Whether this record is a package marker (`__init__.py`)
    pub fn is_package_marker(&self) -> bool {
        let stem = self.path.strip_suffix(".py").unwrap_or(&self.path);
        stem == PACKAGE_MARKER || stem.ends_with(&format!("/{}", PACKAGE_MARKER))
    }

    /// The dotted import name this module answers to
    pub fn dotted_name(&self) -> String {
        dotted_name_for(&self.path)
    }
}

/// Derive the dotted import name for a root-relative module path.
///
/// The `.py` suffix is stripped and slashes become dots. A package marker
/// contributes its containing directory's name, so `pkg/sub/__init__.py`
/// maps to `pkg.sub` and a root-level `__init__.py` maps to the empty name.
pub fn dotted_name_for(path: &str) -> String {
    let stem = path.strip_suffix(".py").unwrap_or(path);
    let mut segments: Vec<&str> = stem.split('/').collect();
    if segments.last() == Some(&PACKAGE_MARKER) {
        segments.pop();
    }
    segments.join(".")
}
