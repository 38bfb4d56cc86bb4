use super::diagnostics::{DiagnosticCode, Reportable};
use super::{SymbolClass, TypeTag};
use crate::syntax::Position;
use thiserror::Error;

/// Mistakes in the analyzed program. They are reported and analysis goes on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError<'a> {
    #[error("symbol \"{name}\" already defined as a {class} at {position}")]
    DuplicateSymbol {
        name: &'a str,
        class: SymbolClass,
        position: Position<'a>,
    },

    #[error("symbol \"{0}\" not defined")]
    UndefinedSymbol(&'a str),

    #[error("symbol \"{0}\" is not a function")]
    NotAFunction(&'a str),

    #[error("cannot assign to a function name \"{0}\"")]
    AssignToFunction(&'a str),

    #[error("function \"{0}\" cannot be used as a value")]
    FunctionAsValue(&'a str),

    #[error("cannot declare \"{0}\" as nothing")]
    NothingData(&'a str),

    #[error("function \"{0}\" returns nothing but a value is returned")]
    UnexpectedReturnValue(&'a str),

    #[error("function \"{name}\" must return {}", .return_type.noun())]
    MissingReturnValue {
        name: &'a str,
        return_type: TypeTag<'a>,
    },
}

impl Reportable for SemanticError<'_> {
    fn code(&self) -> DiagnosticCode {
        match self {
            SemanticError::DuplicateSymbol { .. } => DiagnosticCode::DuplicateSymbol,
            SemanticError::UndefinedSymbol(_) => DiagnosticCode::UndefinedSymbol,
            SemanticError::NotAFunction(_)
            | SemanticError::AssignToFunction(_)
            | SemanticError::FunctionAsValue(_) => DiagnosticCode::WrongSymbolClass,
            SemanticError::NothingData(_) => DiagnosticCode::NothingValue,
            SemanticError::UnexpectedReturnValue(_) | SemanticError::MissingReturnValue { .. } => {
                DiagnosticCode::InvalidReturn
            }
        }
    }
}

/// Bugs in the analyzer or a malformed tree. Analysis stops immediately.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InternalError {
    #[error("context stack underflow")]
    ContextUnderflow,

    #[error("no active context")]
    NoActiveContext,

    #[error("no root context to reset to")]
    MissingRootContext,

    #[error("context #{0} is not a child of the active context")]
    UnexpectedContext(u32),

    #[error("{0} has no recorded context")]
    MissingContext(String),

    #[error("{0} is annotated twice")]
    Reannotated(String),

    #[error("no prototype is under construction for `{0}`")]
    MissingPrototype(String),

    #[error("prototype of `{0}` started while `{1}` is unfinished")]
    NestedPrototype(String, String),

    #[error("literal `{0}` at {1} has no type")]
    UntypedLiteral(String, String),

    #[error("`{0}` at {1} is not a type name")]
    NotATypeName(String, String),
}
