use super::{CompilerError, CompilerOptions, MessageFormat};
use crate::semantic::{self, Analysis, Diagnostic};
use crate::syntax::{load_program, Ast};
use log::info;
use serde::Serialize;
use std::fmt::Write;

/// What one run of the pass produced.
#[derive(Debug)]
pub struct Compilation {
    pub output: String,
    pub error_count: usize,
    pub warning_count: usize,
}

impl Compilation {
    pub fn succeeded(&self) -> bool {
        self.error_count == 0
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'r, 'a> {
    file: &'a str,
    succeeded: bool,
    errors: usize,
    warnings: usize,
    diagnostics: &'r [Diagnostic<'a>],
    #[serde(skip_serializing_if = "Option::is_none")]
    symbols: Option<&'r str>,
}

/// Loads the document in `src`, analyzes it once and renders the report.
pub fn compile(src: &str, options: &CompilerOptions) -> Result<Compilation, CompilerError> {
    let ast = Ast::new();
    let program = load_program(&ast, src)?;
    let mut analysis = semantic::analyze(ast.arena(), program)?;

    let symbols = if options.dump_symbols {
        Some(analysis.dump_symbols()?)
    } else {
        None
    };

    let output = match options.message_format {
        MessageFormat::Human => human_report(&analysis, symbols.as_deref()),
        MessageFormat::Json => json_report(&analysis, symbols.as_deref())?,
    };

    info!(
        "{}: errors = {} warnings = {}",
        program.file(),
        analysis.error_count(),
        analysis.warning_count()
    );

    Ok(Compilation {
        output,
        error_count: analysis.error_count(),
        warning_count: analysis.warning_count(),
    })
}

fn human_report(analysis: &Analysis<'_>, symbols: Option<&str>) -> String {
    let mut out = String::new();

    for diagnostic in analysis.diagnostics().iter() {
        let _ = writeln!(out, "{}", diagnostic);
    }
    if let Some(symbols) = symbols {
        out.push_str(symbols);
    }

    let status = if analysis.is_ready_for_codegen() {
        "SUCCEEDED"
    } else {
        "FAILED"
    };
    let _ = writeln!(
        out,
        "compile {}: errors = {} warnings = {}",
        status,
        analysis.error_count(),
        analysis.warning_count()
    );

    out
}

fn json_report(analysis: &Analysis<'_>, symbols: Option<&str>) -> Result<String, CompilerError> {
    let report = JsonReport {
        file: analysis.program().file(),
        succeeded: analysis.is_ready_for_codegen(),
        errors: analysis.error_count(),
        warnings: analysis.warning_count(),
        diagnostics: analysis.diagnostics().as_slice(),
        symbols,
    };

    let json = serde_json::to_string_pretty(&report)?;
    Ok(format!("{}\n", json))
}
