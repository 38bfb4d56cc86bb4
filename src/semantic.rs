mod analyzer;
mod call;
mod diagnostics;
mod dump;
mod errors;
mod reset;
pub mod resolver;
mod rules;
mod scope;
mod symbol;
pub mod symbol_table;
mod types;

pub use call::{validate_call, CallError};
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Reportable, Severity};
pub use dump::dump_symbols;
pub use errors::{InternalError, SemanticError};
pub use rules::{
    check_assignment, check_binary, check_cast, check_unary, Checked, TypeError, TypeWarning,
};
pub use scope::{Context, ScopeManager};
pub use symbol::{Prototype, PrototypeBuilder, Symbol, SymbolClass};
pub use symbol_table::SymbolTableBuilder;
pub use types::{Noun, TypeTag};

use crate::arena::BumpaloArena;
use crate::syntax::{traverse, Program};
use analyzer::Analyzer;
use log::debug;

/// The result of analyzing one program.
#[derive(Debug)]
pub struct Analysis<'a> {
    program: &'a Program<'a>,
    root: &'a Context<'a>,
    scopes: ScopeManager<'a>,
    diagnostics: Diagnostics<'a>,
}

impl<'a> Analysis<'a> {
    pub fn program(&self) -> &'a Program<'a> {
        self.program
    }

    /// The program's context. It outlives the pass for whole-run reporting.
    pub fn root(&self) -> &'a Context<'a> {
        self.root
    }

    pub fn diagnostics(&self) -> &Diagnostics<'a> {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.warning_count()
    }

    /// Code generation may only run on a program without errors.
    pub fn is_ready_for_codegen(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn dump_symbols(&mut self) -> Result<String, InternalError> {
        dump_symbols(&mut self.scopes, self.program)
    }
}

/// Runs the scope, symbol and type pass over `program`. Contexts, symbols
/// and prototypes are allocated in `arena`.
///
/// Mistakes in the program are collected as diagnostics. An `Err` means the
/// tree itself is malformed and the analysis was abandoned.
///
/// Annotations left by an earlier pass are cleared first, so analyzing the
/// same tree again yields the same diagnostics and types.
pub fn analyze<'a>(
    arena: &'a BumpaloArena,
    program: &'a Program<'a>,
) -> Result<Analysis<'a>, InternalError> {
    reset::clear_annotations(program)?;

    let mut analyzer = Analyzer::new(arena);
    traverse(&mut analyzer, program)?;

    let (scopes, diagnostics) = analyzer.into_parts();
    let root = scopes.root().ok_or(InternalError::MissingRootContext)?;

    debug!(
        "[semantic] {}: errors = {} warnings = {}",
        program.file(),
        diagnostics.error_count(),
        diagnostics.warning_count()
    );

    Ok(Analysis {
        program,
        root,
        scopes,
        diagnostics,
    })
}
