use super::{InternalError, Symbol};
use crate::arena::BumpaloArena;
use log::debug;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::ptr;

/// One lexical scope: the symbols bound in it and a link to the enclosing
/// scope. Bindings are never removed.
#[derive(Debug)]
pub struct Context<'a> {
    id: u32,
    symbols: RefCell<HashMap<&'a str, &'a Symbol<'a>>>,
    parent: Option<&'a Context<'a>>,
}

impl<'a> Context<'a> {
    fn new(id: u32, parent: Option<&'a Context<'a>>) -> Self {
        Self {
            id,
            symbols: RefCell::new(HashMap::new()),
            parent,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    pub fn lookup_local(&self, name: &str) -> Option<&'a Symbol<'a>> {
        self.symbols.borrow().get(name).copied()
    }

    /// Searches this context and then each enclosing one.
    pub fn lookup(&self, name: &str) -> Option<&'a Symbol<'a>> {
        if let Some(symbol) = self.lookup_local(name) {
            return Some(symbol);
        }

        let mut context = self.parent;
        while let Some(scope) = context {
            if let Some(symbol) = scope.lookup_local(name) {
                return Some(symbol);
            }
            context = scope.parent;
        }

        None
    }

    pub(super) fn insert(&self, symbol: &'a Symbol<'a>) {
        self.symbols.borrow_mut().insert(symbol.name(), symbol);
    }

    pub fn borrow_symbols(&self) -> Ref<'_, HashMap<&'a str, &'a Symbol<'a>>> {
        self.symbols.borrow()
    }

    /// Symbols bound in this context, ordered by name.
    pub fn sorted_symbols(&self) -> Vec<&'a Symbol<'a>> {
        let mut symbols: Vec<_> = self.symbols.borrow().values().copied().collect();
        symbols.sort_by(|a, b| a.name().cmp(b.name()));
        symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.borrow().is_empty()
    }
}

/// Tracks the active context while the tree is walked. Contexts are created
/// and popped in step with the scope-opening nodes.
#[derive(Debug)]
pub struct ScopeManager<'a> {
    arena: &'a BumpaloArena,
    root: Option<&'a Context<'a>>,
    active: Option<&'a Context<'a>>,
    seq: u32,
}

impl<'a> ScopeManager<'a> {
    pub fn new(arena: &'a BumpaloArena) -> Self {
        Self {
            arena,
            root: None,
            active: None,
            seq: 0,
        }
    }

    pub fn root(&self) -> Option<&'a Context<'a>> {
        self.root
    }

    /// Allocates a child of the active context and activates it. The first
    /// context created becomes the root.
    pub fn create_context(&mut self) -> &'a Context<'a> {
        let context = &*self.arena.alloc(Context::new(self.seq, self.active));

        self.seq += 1;
        if self.root.is_none() {
            self.root = Some(context);
        }
        self.active = Some(context);

        debug!(
            "[scope] create #{} (parent {:?})",
            context.id(),
            context.parent().map(|p| p.id())
        );
        context
    }

    /// Re-activates a context recorded by an earlier pass. It must be a child
    /// of the active context.
    pub fn push_context(&mut self, context: &'a Context<'a>) -> Result<(), InternalError> {
        let is_child = match (context.parent(), self.active) {
            (Some(parent), Some(active)) => ptr::eq(parent, active),
            _ => false,
        };

        if !is_child {
            return Err(InternalError::UnexpectedContext(context.id()));
        }

        debug!("[scope] push #{}", context.id());
        self.active = Some(context);
        Ok(())
    }

    /// Restores the parent of the active context and returns it.
    pub fn pop_context(&mut self) -> Result<Option<&'a Context<'a>>, InternalError> {
        let context = self.active.ok_or(InternalError::ContextUnderflow)?;

        debug!("[scope] pop #{}", context.id());
        self.active = context.parent();
        Ok(self.active)
    }

    pub fn peek_context(&self) -> Result<&'a Context<'a>, InternalError> {
        self.active.ok_or(InternalError::NoActiveContext)
    }

    /// Makes the root active again so a new pass can start.
    pub fn reset_context(&mut self) -> Result<&'a Context<'a>, InternalError> {
        let root = self.root.ok_or(InternalError::MissingRootContext)?;

        debug!("[scope] reset to #{}", root.id());
        self.active = Some(root);
        Ok(root)
    }
}
