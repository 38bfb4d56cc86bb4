use super::{Context, SemanticError, Symbol, SymbolClass};
use crate::syntax::Identifier;
use log::trace;

/// How a name is used at a reference site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseSite {
    Value,
    AssignmentTarget,
    Callee,
}

impl UseSite {
    fn expected_class(&self) -> SymbolClass {
        match self {
            UseSite::Value | UseSite::AssignmentTarget => SymbolClass::Data,
            UseSite::Callee => SymbolClass::Function,
        }
    }
}

/// Resolves `name` against `context` and its ancestors. The symbol's
/// reference count is incremented only when its class fits the use site.
pub fn lookup<'a>(
    context: &'a Context<'a>,
    name: Identifier<'a>,
    site: UseSite,
) -> Result<&'a Symbol<'a>, SemanticError<'a>> {
    let symbol = context
        .lookup(name.name())
        .ok_or_else(|| SemanticError::UndefinedSymbol(name.name()))?;

    if symbol.class() != site.expected_class() {
        return Err(match site {
            UseSite::Value => SemanticError::FunctionAsValue(name.name()),
            UseSite::AssignmentTarget => SemanticError::AssignToFunction(name.name()),
            UseSite::Callee => SemanticError::NotAFunction(name.name()),
        });
    }

    symbol.reference();
    trace!(
        "[resolver] {} at {} -> {} (refs {})",
        name,
        name.position(),
        symbol,
        symbol.ref_count()
    );
    Ok(symbol)
}
