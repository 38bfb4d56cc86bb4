use super::diagnostics::{DiagnosticCode, Reportable};
use super::{Prototype, TypeTag};
use crate::arena::BumpaloArena;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CallError<'a> {
    #[error("expected {expected} function parameters but got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("expected function proto {expected} but got {found}")]
    SignatureMismatch {
        expected: &'a Prototype<'a>,
        found: &'a Prototype<'a>,
    },
}

impl Reportable for CallError<'_> {
    fn code(&self) -> DiagnosticCode {
        match self {
            CallError::ArityMismatch { .. } => DiagnosticCode::ArityMismatch,
            CallError::SignatureMismatch { .. } => DiagnosticCode::SignatureMismatch,
        }
    }
}

/// Validates a call of the function declared as `declared` with arguments of
/// the given types. Argument types are matched exactly, without promotion.
///
/// An argument whose type is unknown has already been reported, so only the
/// arity is checked in that case.
pub fn validate_call<'a>(
    arena: &'a BumpaloArena,
    declared: &'a Prototype<'a>,
    arguments: &[Option<TypeTag<'a>>],
) -> Result<(), CallError<'a>> {
    if declared.arity() != arguments.len() {
        return Err(CallError::ArityMismatch {
            expected: declared.arity(),
            found: arguments.len(),
        });
    }

    let types = match arguments.iter().copied().collect::<Option<Vec<_>>>() {
        Some(types) => types,
        None => return Ok(()),
    };

    let found = Prototype::new(arena, declared.return_type(), declared.name(), &types);
    if *declared != found {
        return Err(CallError::SignatureMismatch {
            expected: declared,
            found: arena.alloc(found),
        });
    }

    Ok(())
}
