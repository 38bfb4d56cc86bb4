use crate::arena::{BumpaloArena, BumpaloVec};
use crate::semantic::TypeTag;
use crate::syntax::{DataDeclaration, FunctionDefinition, Position, Slot};
use std::cell::Cell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Data,
    Function,
}

impl fmt::Display for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolClass::Data => write!(f, "data"),
            SymbolClass::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug)]
pub struct Symbol<'a> {
    class: SymbolClass,
    name: &'a str,
    declared_type: TypeTag<'a>,
    position: Position<'a>,
    prototype: Slot<&'a Prototype<'a>>,
    is_const: bool,
    is_iterator: bool,
    is_init: Cell<bool>,
    ref_count: Cell<u32>,
    definition: Definition<'a>,
}

#[derive(Clone, Copy)]
enum Definition<'a> {
    Data(&'a DataDeclaration<'a>),
    Function(&'a FunctionDefinition<'a>),
}

// The defining node links back to its symbol, so only name the node here.
impl fmt::Debug for Definition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Data(node) => write!(f, "Data({})", node.name()),
            Definition::Function(node) => write!(f, "Function({})", node.name()),
        }
    }
}

impl<'a> Symbol<'a> {
    pub fn alloc_data_in(
        arena: &'a BumpaloArena,
        declaration: &'a DataDeclaration<'a>,
        declared_type: TypeTag<'a>,
    ) -> &'a Symbol<'a> {
        arena.alloc(Self::new(
            SymbolClass::Data,
            declared_type,
            declaration.is_const(),
            false,
            Definition::Data(declaration),
        ))
    }

    /// Parameters receive their value from the caller.
    pub fn alloc_parameter_in(
        arena: &'a BumpaloArena,
        declaration: &'a DataDeclaration<'a>,
        declared_type: TypeTag<'a>,
    ) -> &'a Symbol<'a> {
        let symbol = Self::alloc_data_in(arena, declaration, declared_type);
        symbol.mark_initialized();
        symbol
    }

    pub fn alloc_function_in(
        arena: &'a BumpaloArena,
        definition: &'a FunctionDefinition<'a>,
        return_type: TypeTag<'a>,
    ) -> &'a Symbol<'a> {
        arena.alloc(Self::new(
            SymbolClass::Function,
            return_type,
            true,
            definition.is_iterator(),
            Definition::Function(definition),
        ))
    }

    fn new(
        class: SymbolClass,
        declared_type: TypeTag<'a>,
        is_const: bool,
        is_iterator: bool,
        definition: Definition<'a>,
    ) -> Self {
        let name = match definition {
            Definition::Data(node) => node.name(),
            Definition::Function(node) => node.name(),
        };

        Self {
            class,
            name: name.name(),
            declared_type,
            position: name.position(),
            prototype: Slot::default(),
            is_const,
            is_iterator,
            is_init: Cell::new(false),
            ref_count: Cell::new(0),
            definition,
        }
    }

    pub fn class(&self) -> SymbolClass {
        self.class
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The data type, or the return type of a function.
    pub fn declared_type(&self) -> TypeTag<'a> {
        self.declared_type
    }

    /// Position of the defining identifier.
    pub fn position(&self) -> Position<'a> {
        self.position
    }

    pub fn prototype(&self) -> Option<&'a Prototype<'a>> {
        self.prototype.get()
    }

    pub fn assign_prototype(&self, prototype: &'a Prototype<'a>) -> Result<(), &'a Prototype<'a>> {
        self.prototype.assign(prototype)
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn is_iterator(&self) -> bool {
        self.is_iterator
    }

    pub fn is_init(&self) -> bool {
        self.is_init.get()
    }

    pub fn mark_initialized(&self) {
        self.is_init.set(true);
    }

    pub fn ref_count(&self) -> u32 {
        self.ref_count.get()
    }

    pub fn reference(&self) {
        self.ref_count.set(self.ref_count.get() + 1);
    }

    pub fn is_function(&self) -> bool {
        self.class == SymbolClass::Function
    }

    pub fn data_declaration(&self) -> Option<&'a DataDeclaration<'a>> {
        if let Definition::Data(node) = self.definition {
            Some(node)
        } else {
            None
        }
    }

    pub fn function_definition(&self) -> Option<&'a FunctionDefinition<'a>> {
        if let Definition::Function(node) = self.definition {
            Some(node)
        } else {
            None
        }
    }
}

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.class, self.name)
    }
}

/// The decorated signature of a function: return type, name and the ordered
/// parameter types. Two prototypes match only when all three are identical.
#[derive(Debug, PartialEq)]
pub struct Prototype<'a> {
    return_type: TypeTag<'a>,
    name: &'a str,
    parameters: BumpaloVec<'a, TypeTag<'a>>,
}

impl<'a> Prototype<'a> {
    pub fn new(
        arena: &'a BumpaloArena,
        return_type: TypeTag<'a>,
        name: &'a str,
        parameters: &[TypeTag<'a>],
    ) -> Self {
        let mut params = BumpaloVec::with_capacity_in(parameters.len(), arena);

        params.extend_from_slice(parameters);

        Self {
            return_type,
            name,
            parameters: params,
        }
    }

    pub fn return_type(&self) -> TypeTag<'a> {
        self.return_type
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn parameters(&self) -> impl ExactSizeIterator<Item = TypeTag<'a>> + '_ {
        self.parameters.iter().copied()
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for Prototype<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;

        let mut it = self.parameters().peekable();
        while let Some(param) = it.next() {
            write!(f, "{}", param)?;
            if it.peek().is_some() {
                write!(f, ",")?;
            }
        }

        write!(f, ")")
    }
}

/// Collects parameter types while a function header is being analyzed.
#[derive(Debug)]
pub struct PrototypeBuilder<'a> {
    return_type: TypeTag<'a>,
    name: &'a str,
    parameters: Vec<TypeTag<'a>>,
}

impl<'a> PrototypeBuilder<'a> {
    pub fn new(return_type: TypeTag<'a>, name: &'a str) -> Self {
        Self {
            return_type,
            name,
            parameters: vec![],
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn push(&mut self, parameter: TypeTag<'a>) {
        self.parameters.push(parameter);
    }

    pub fn finish(self, arena: &'a BumpaloArena) -> &'a Prototype<'a> {
        arena.alloc(Prototype::new(
            arena,
            self.return_type,
            self.name,
            &self.parameters,
        ))
    }
}
