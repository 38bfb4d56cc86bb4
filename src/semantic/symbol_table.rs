use super::{
    Context, Diagnostics, InternalError, PrototypeBuilder, ScopeManager, SemanticError, Symbol,
    TypeTag,
};
use crate::arena::BumpaloArena;
use crate::syntax::{DataDeclaration, FunctionDefinition, TypeName};
use log::debug;

/// Creates symbols for declarations and binds them into the active context.
#[derive(Debug)]
pub struct SymbolTableBuilder<'a> {
    arena: &'a BumpaloArena,
    prototype: Option<PrototypeBuilder<'a>>,
}

impl<'a> SymbolTableBuilder<'a> {
    pub fn new(arena: &'a BumpaloArena) -> Self {
        Self {
            arena,
            prototype: None,
        }
    }

    pub fn declare_data(
        &mut self,
        scopes: &ScopeManager<'a>,
        diagnostics: &mut Diagnostics<'a>,
        declaration: &'a DataDeclaration<'a>,
    ) -> Result<Option<&'a Symbol<'a>>, InternalError> {
        let declared_type = declared_type(declaration)?;
        let symbol = Symbol::alloc_data_in(self.arena, declaration, declared_type);

        self.declare(scopes, diagnostics, declaration, symbol)
    }

    /// Binds a parameter into the function's context and appends its type to
    /// the prototype under construction.
    pub fn declare_parameter(
        &mut self,
        scopes: &ScopeManager<'a>,
        diagnostics: &mut Diagnostics<'a>,
        declaration: &'a DataDeclaration<'a>,
    ) -> Result<Option<&'a Symbol<'a>>, InternalError> {
        let declared_type = declared_type(declaration)?;

        match self.prototype {
            Some(ref mut prototype) => prototype.push(declared_type),
            None => {
                return Err(InternalError::MissingPrototype(
                    declaration.name().name().to_string(),
                ))
            }
        }

        let symbol = Symbol::alloc_parameter_in(self.arena, declaration, declared_type);
        self.declare(scopes, diagnostics, declaration, symbol)
    }

    fn declare(
        &mut self,
        scopes: &ScopeManager<'a>,
        diagnostics: &mut Diagnostics<'a>,
        declaration: &'a DataDeclaration<'a>,
        symbol: &'a Symbol<'a>,
    ) -> Result<Option<&'a Symbol<'a>>, InternalError> {
        if symbol.declared_type() == TypeTag::Nothing {
            diagnostics.error(symbol.position(), &SemanticError::NothingData(symbol.name()));
        }

        let bound = bind(scopes.peek_context()?, symbol, diagnostics);
        if let Some(symbol) = bound {
            declaration
                .assign_symbol(symbol)
                .map_err(|_| InternalError::Reannotated(format!("declaration `{}`", declaration)))?;
        }

        Ok(bound)
    }

    /// Binds the function's symbol into the active context before its
    /// parameters or body are visited, and starts its prototype.
    pub fn declare_function(
        &mut self,
        scopes: &ScopeManager<'a>,
        diagnostics: &mut Diagnostics<'a>,
        definition: &'a FunctionDefinition<'a>,
    ) -> Result<Option<&'a Symbol<'a>>, InternalError> {
        let name = definition.name().name();

        if let Some(ref unfinished) = self.prototype {
            return Err(InternalError::NestedPrototype(
                name.to_string(),
                unfinished.name().to_string(),
            ));
        }

        let return_type = type_tag(definition.return_type())?;
        let symbol = Symbol::alloc_function_in(self.arena, definition, return_type);

        let bound = bind(scopes.peek_context()?, symbol, diagnostics);
        if let Some(symbol) = bound {
            definition
                .assign_symbol(symbol)
                .map_err(|_| InternalError::Reannotated(format!("function `{}`", name)))?;
        }

        self.prototype = Some(PrototypeBuilder::new(return_type, name));
        Ok(bound)
    }

    /// Fixes the prototype once every parameter is known. It is stored on the
    /// definition and, when it was bound, on the function's symbol.
    pub fn finish_prototype(
        &mut self,
        definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), InternalError> {
        let name = definition.name().name();
        let builder = self
            .prototype
            .take()
            .ok_or_else(|| InternalError::MissingPrototype(name.to_string()))?;
        let prototype = builder.finish(self.arena);

        debug!("[symbol_table] prototype `{}`", prototype);

        let reannotated = |_| InternalError::Reannotated(format!("prototype of `{}`", name));
        definition.assign_prototype(prototype).map_err(reannotated)?;
        if let Some(symbol) = definition.symbol() {
            symbol.assign_prototype(prototype).map_err(reannotated)?;
        }

        Ok(())
    }
}

/// Binds `symbol` into `context` unless its name is already bound anywhere on
/// the chain up to the root. A rejected symbol is reported and dropped.
pub fn bind<'a>(
    context: &'a Context<'a>,
    symbol: &'a Symbol<'a>,
    diagnostics: &mut Diagnostics<'a>,
) -> Option<&'a Symbol<'a>> {
    if let Some(existing) = context.lookup(symbol.name()) {
        diagnostics.error(
            symbol.position(),
            &SemanticError::DuplicateSymbol {
                name: symbol.name(),
                class: existing.class(),
                position: existing.position(),
            },
        );
        return None;
    }

    debug!(
        "[symbol_table] bind {} {} in #{}",
        symbol,
        symbol.declared_type(),
        context.id()
    );
    context.insert(symbol);
    Some(symbol)
}

pub(super) fn type_tag<'a>(type_name: TypeName<'a>) -> Result<TypeTag<'a>, InternalError> {
    type_name.type_tag().ok_or_else(|| {
        InternalError::NotATypeName(type_name.to_string(), type_name.position().to_string())
    })
}

fn declared_type<'a>(declaration: &'a DataDeclaration<'a>) -> Result<TypeTag<'a>, InternalError> {
    type_tag(declaration.type_name())
}
