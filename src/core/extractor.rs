//! Python module extraction
//!
//! This module parses one Python source file into a [`ModuleRecord`]:
//! top-level function and class definitions plus import statements. Only
//! statements in the module body are recorded; names nested inside
//! functions, classes, or conditional blocks do not participate.

use crate::error::{ModscanError, Result};
use crate::models::ModuleRecord;
use rustpython_parser::ast;
use std::path::{Component, Path};

/// Parser facade turning Python sources into module records
pub struct ModuleExtractor;

impl ModuleExtractor {
    /// Parse Python source into a record keyed by `module_path`.
    pub fn parse(source: &str, module_path: &str) -> Result<ModuleRecord> {
        let parsed = rustpython_parser::parse(source, rustpython_parser::Mode::Module, module_path)
            .map_err(|e| ModscanError::parse_failure(module_path, e.to_string()))?;

        let mut record = ModuleRecord::new(module_path);

        if let ast::Mod::Module(module) = parsed {
            for stmt in &module.body {
                match stmt {
                    ast::Stmt::FunctionDef(def) => record.add_function(def.name.to_string()),
                    ast::Stmt::AsyncFunctionDef(def) => record.add_function(def.name.to_string()),
                    ast::Stmt::ClassDef(def) => record.add_class(def.name.to_string()),
                    ast::Stmt::Import(import) => {
                        for alias in &import.names {
                            record.add_plain_import(Self::render_plain_entry(alias));
                        }
                    }
                    ast::Stmt::ImportFrom(import_from) => {
                        let names = import_from
                            .names
                            .iter()
                            .map(|alias| alias.name.to_string())
                            .collect();
                        record.add_from_import(Self::render_from_module(import_from), names);
                    }
                    _ => {}
                }
            }
        }

        Ok(record)
    }

    /// Read and parse one Python file, keyed by its path relative to `root`.
    pub fn parse_file(file: &Path, root: &Path) -> Result<ModuleRecord> {
        let module_path = Self::module_path_for(file, root)?;
        let source = std::fs::read_to_string(file).map_err(|e| ModscanError::SourceRead {
            path: file.to_path_buf(),
            source: e,
        })?;
        Self::parse(&source, &module_path)
    }

    /// Root-relative module path with `/` separators on every platform.
    pub fn module_path_for(file: &Path, root: &Path) -> Result<String> {
        let relative = file.strip_prefix(root).map_err(|_| ModscanError::InvalidPath {
            path: file.to_path_buf(),
        })?;

        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        Ok(segments.join("/"))
    }

    /// Render one `import` alias, keeping the ` as name` suffix when present
    fn render_plain_entry(alias: &ast::Alias) -> String {
        match &alias.asname {
            Some(asname) => format!("{} as {}", alias.name, asname),
            None => alias.name.to_string(),
        }
    }

    /// Render the module reference of a `from X import ...` statement.
    ///
    /// Relative imports carry one leading dot per level, so `from .. import x`
    /// yields `..` and `from ..pkg import x` yields `..pkg`.
    fn render_from_module(import_from: &ast::StmtImportFrom) -> String {
        let level = import_from.level.as_ref().map_or(0, |l| l.to_u32()) as usize;
        let module = import_from
            .module
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_default();
        format!("{}{}", ".".repeat(level), module)
    }
}
