use super::resolver::{lookup, UseSite};
use super::symbol_table::type_tag;
use super::{
    check_assignment, check_binary, check_cast, check_unary, validate_call, Checked, Context,
    Diagnostics, InternalError, Reportable, ScopeManager, SemanticError, SymbolTableBuilder,
    TypeError, TypeTag,
};
use crate::arena::BumpaloArena;
use crate::syntax::{
    Assignment, BinaryExpression, Block, CallExpression, CastExpression, DataDeclaration,
    DataDefinition, Expression, FormatString, FunctionDefinition, Position, Program,
    ReturnStatement, StartBlock, Token, UnaryExpression, VariableExpression, Visitor,
};
use log::debug;

/// The single pass over a program: scopes are opened and closed, symbols
/// bound, references resolved and expressions typed in one depth-first walk.
#[derive(Debug)]
pub(super) struct Analyzer<'a> {
    arena: &'a BumpaloArena,
    scopes: ScopeManager<'a>,
    symbols: SymbolTableBuilder<'a>,
    diagnostics: Diagnostics<'a>,
    function: Option<&'a FunctionDefinition<'a>>,
}

impl<'a> Analyzer<'a> {
    pub fn new(arena: &'a BumpaloArena) -> Self {
        Self {
            arena,
            scopes: ScopeManager::new(arena),
            symbols: SymbolTableBuilder::new(arena),
            diagnostics: Diagnostics::new(),
            function: None,
        }
    }

    pub fn into_parts(self) -> (ScopeManager<'a>, Diagnostics<'a>) {
        (self.scopes, self.diagnostics)
    }

    fn annotate(&self, expr: &'a Expression<'a>, r#type: TypeTag<'a>) -> Result<(), InternalError> {
        debug!("[analyzer] {} : {}", expr.position(), r#type);
        expr.assign_type(r#type)
            .map_err(|_| InternalError::Reannotated(format!("expression at {}", expr.position())))
    }

    fn report(&mut self, position: Position<'a>, error: &dyn Reportable) {
        self.diagnostics.error(position, error);
    }

    /// Reports the outcome of a type rule and returns the resulting type, if
    /// the rule accepted its operands.
    fn apply(
        &mut self,
        position: Position<'a>,
        checked: Result<Checked<'a>, TypeError<'a>>,
    ) -> Option<TypeTag<'a>> {
        match checked {
            Ok(Checked { r#type, warning }) => {
                if let Some(warning) = warning {
                    self.diagnostics.warning(position, &warning);
                }
                Some(r#type)
            }
            Err(err) => {
                self.report(position, &err);
                None
            }
        }
    }

    fn open_scope(&mut self, node: &str) -> &'a Context<'a> {
        let context = self.scopes.create_context();
        debug!("[analyzer] {} opens #{}", node, context.id());
        context
    }
}

impl<'a> Visitor<'a> for Analyzer<'a> {
    type Error = InternalError;

    fn enter_program(&mut self, program: &'a Program<'a>) -> Result<(), InternalError> {
        let root = self.open_scope("program");
        program
            .assign_context(root)
            .map_err(|_| InternalError::Reannotated(format!("program `{}`", program.file())))
    }

    fn exit_program(&mut self, _program: &'a Program<'a>) -> Result<(), InternalError> {
        self.scopes.pop_context()?;
        Ok(())
    }

    fn enter_start(&mut self, _start: &'a StartBlock<'a>) -> Result<(), InternalError> {
        self.function = None;
        Ok(())
    }

    fn enter_data_declaration(
        &mut self,
        declaration: &'a DataDeclaration<'a>,
    ) -> Result<(), InternalError> {
        self.symbols
            .declare_data(&self.scopes, &mut self.diagnostics, declaration)?;
        Ok(())
    }

    fn exit_data_definition(
        &mut self,
        definition: &'a DataDefinition<'a>,
    ) -> Result<(), InternalError> {
        let declaration = definition.declaration();
        let target = type_tag(declaration.type_name())?;

        // `nothing` data is already reported by the declaration.
        if target == TypeTag::Nothing {
            return Ok(());
        }

        let value = match definition.initializer().and_then(|init| init.r#type()) {
            Some(value) => value,
            None => return Ok(()),
        };

        let position = declaration.name().position();
        if self.apply(position, check_assignment(target, value)).is_some() {
            if let Some(symbol) = declaration.symbol() {
                symbol.mark_initialized();
            }
        }

        Ok(())
    }

    fn enter_function_definition(
        &mut self,
        definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), InternalError> {
        self.symbols
            .declare_function(&self.scopes, &mut self.diagnostics, definition)?;

        let context = self.open_scope(definition.name().name());
        definition.assign_context(context).map_err(|_| {
            InternalError::Reannotated(format!("context of `{}`", definition.name()))
        })?;

        self.function = Some(definition);
        Ok(())
    }

    fn exit_function_definition(
        &mut self,
        _definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), InternalError> {
        self.scopes.pop_context()?;
        self.function = None;
        Ok(())
    }

    fn enter_function_parameter(
        &mut self,
        _fun: &'a FunctionDefinition<'a>,
        param: &'a DataDeclaration<'a>,
    ) -> Result<(), InternalError> {
        self.symbols
            .declare_parameter(&self.scopes, &mut self.diagnostics, param)?;
        Ok(())
    }

    fn exit_function_parameters(
        &mut self,
        fun: &'a FunctionDefinition<'a>,
    ) -> Result<(), InternalError> {
        self.symbols.finish_prototype(fun)
    }

    fn enter_block(&mut self, block: &'a Block<'a>) -> Result<(), InternalError> {
        let context = self.open_scope("block");
        block
            .assign_context(context)
            .map_err(|_| InternalError::Reannotated(format!("block at {}", block.position())))
    }

    fn exit_block(&mut self, _block: &'a Block<'a>) -> Result<(), InternalError> {
        self.scopes.pop_context()?;
        Ok(())
    }

    fn enter_assignment(&mut self, assignment: &'a Assignment<'a>) -> Result<(), InternalError> {
        let context = self.scopes.peek_context()?;
        let target = assignment.target();

        match lookup(context, target, UseSite::AssignmentTarget) {
            Ok(symbol) => assignment.assign_symbol(symbol).map_err(|_| {
                InternalError::Reannotated(format!("assignment at {}", target.position()))
            }),
            Err(err) => {
                self.report(target.position(), &err);
                Ok(())
            }
        }
    }

    fn exit_assignment(&mut self, assignment: &'a Assignment<'a>) -> Result<(), InternalError> {
        let (symbol, value) = match (assignment.symbol(), assignment.value().r#type()) {
            (Some(symbol), Some(value)) => (symbol, value),
            _ => return Ok(()),
        };

        let checked = check_assignment(symbol.declared_type(), value);
        if self.apply(assignment.target().position(), checked).is_some() {
            symbol.mark_initialized();
        }

        Ok(())
    }

    fn exit_return(&mut self, stmt: &'a ReturnStatement<'a>) -> Result<(), InternalError> {
        let fun = match self.function {
            Some(fun) => fun,
            None => return Ok(()),
        };
        let name = fun.name().name();
        let return_type = type_tag(fun.return_type())?;

        match (stmt.value(), return_type) {
            (None, TypeTag::Nothing) => {}
            (Some(_), TypeTag::Nothing) => {
                self.report(stmt.position(), &SemanticError::UnexpectedReturnValue(name));
            }
            (None, return_type) => {
                self.report(
                    stmt.position(),
                    &SemanticError::MissingReturnValue { name, return_type },
                );
            }
            (Some(value), return_type) => {
                if let Some(value) = value.r#type() {
                    self.apply(stmt.position(), check_assignment(return_type, value));
                }
            }
        }

        Ok(())
    }

    fn exit_literal(&mut self, expr: &'a Expression<'a>, token: Token<'a>) -> Result<(), InternalError> {
        match expr.r#type() {
            Some(_) => Ok(()),
            None => Err(InternalError::UntypedLiteral(
                token.raw.to_string(),
                token.position.to_string(),
            )),
        }
    }

    fn enter_variable(
        &mut self,
        _expr: &'a Expression<'a>,
        variable: &'a VariableExpression<'a>,
    ) -> Result<(), InternalError> {
        let context = self.scopes.peek_context()?;
        let name = variable.name();

        match lookup(context, name, UseSite::Value) {
            Ok(symbol) => variable.assign_symbol(symbol).map_err(|_| {
                InternalError::Reannotated(format!("variable at {}", name.position()))
            }),
            Err(err) => {
                self.report(name.position(), &err);
                Ok(())
            }
        }
    }

    fn exit_variable(
        &mut self,
        expr: &'a Expression<'a>,
        variable: &'a VariableExpression<'a>,
    ) -> Result<(), InternalError> {
        match variable.symbol() {
            Some(symbol) => self.annotate(expr, symbol.declared_type()),
            None => Ok(()),
        }
    }

    fn enter_call(
        &mut self,
        _expr: &'a Expression<'a>,
        call: &'a CallExpression<'a>,
    ) -> Result<(), InternalError> {
        let context = self.scopes.peek_context()?;
        let callee = call.callee();

        match lookup(context, callee, UseSite::Callee) {
            Ok(symbol) => call.assign_symbol(symbol).map_err(|_| {
                InternalError::Reannotated(format!("call at {}", callee.position()))
            }),
            Err(err) => {
                self.report(callee.position(), &err);
                Ok(())
            }
        }
    }

    fn exit_call(
        &mut self,
        expr: &'a Expression<'a>,
        call: &'a CallExpression<'a>,
    ) -> Result<(), InternalError> {
        let symbol = match call.symbol() {
            Some(symbol) => symbol,
            None => return Ok(()),
        };
        let prototype = symbol
            .prototype()
            .ok_or_else(|| InternalError::MissingPrototype(symbol.name().to_string()))?;

        let arguments: Vec<_> = call.arguments().map(|arg| arg.r#type()).collect();
        if let Err(err) = validate_call(self.arena, prototype, &arguments) {
            self.report(call.callee().position(), &err);
        }

        self.annotate(expr, prototype.return_type())
    }

    fn exit_binary(
        &mut self,
        expr: &'a Expression<'a>,
        binary: &'a BinaryExpression<'a>,
    ) -> Result<(), InternalError> {
        let (lhs, rhs) = match (binary.lhs().r#type(), binary.rhs().r#type()) {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            _ => return Ok(()),
        };

        let position = binary.operator_token().position;
        match self.apply(position, check_binary(binary.operator(), lhs, rhs)) {
            Some(r#type) => self.annotate(expr, r#type),
            None => Ok(()),
        }
    }

    fn exit_unary(
        &mut self,
        expr: &'a Expression<'a>,
        unary: &'a UnaryExpression<'a>,
    ) -> Result<(), InternalError> {
        let operand = match unary.operand().r#type() {
            Some(operand) => operand,
            None => return Ok(()),
        };

        let position = unary.operator_token().position;
        match self.apply(position, check_unary(unary.operator(), operand)) {
            Some(r#type) => self.annotate(expr, r#type),
            None => Ok(()),
        }
    }

    fn exit_cast(
        &mut self,
        expr: &'a Expression<'a>,
        cast: &'a CastExpression<'a>,
    ) -> Result<(), InternalError> {
        let to = type_tag(cast.type_name())?;
        let from = match cast.operand().r#type() {
            Some(from) => from,
            None => return Ok(()),
        };

        match self.apply(cast.type_name().position(), check_cast(to, from)) {
            Some(r#type) => self.annotate(expr, r#type),
            None => Ok(()),
        }
    }

    fn exit_grouped(
        &mut self,
        expr: &'a Expression<'a>,
        inner: &'a Expression<'a>,
    ) -> Result<(), InternalError> {
        match inner.r#type() {
            Some(r#type) => self.annotate(expr, r#type),
            None => Ok(()),
        }
    }

    fn exit_format(
        &mut self,
        expr: &'a Expression<'a>,
        _format: &'a FormatString<'a>,
    ) -> Result<(), InternalError> {
        self.annotate(expr, TypeTag::String)
    }
}

#[cfg(test)]
mod tests {
    use crate::semantic::{analyze, Analysis, DiagnosticCode, Severity, SymbolClass, TypeTag};
    use crate::syntax::{
        Ast, AstBuilder, BinaryOperator, ElseBranch, Program, ProgramItem, Statement,
        UnaryOperator,
    };
    use assert_matches::assert_matches;
    use std::ptr;

    fn codes(analysis: &Analysis<'_>) -> Vec<(Severity, DiagnosticCode)> {
        analysis
            .diagnostics()
            .iter()
            .map(|d| (d.severity, d.code))
            .collect()
    }

    fn run<'a>(ast: &'a Ast, program: &'a Program<'a>) -> Analysis<'a> {
        analyze(ast.arena(), program).unwrap()
    }

    #[test]
    fn well_typed_program() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        // int a = 1
        // float b = a
        // int add(int x, int y) { return (x + y) }
        // start { int r = add(a, 2) }
        let a = b.data(b.declaration(false, "int", "a"), Some(b.integer(1)));
        let widened = b.variable("a");
        let fb = b.data(b.declaration(false, "float", "b"), Some(widened));
        let sum = b.binary(BinaryOperator::Add, b.variable("x"), b.variable("y"));
        let add = b.function(
            false,
            "int",
            "add",
            vec![b.declaration(false, "int", "x"), b.declaration(false, "int", "y")],
            b.block(vec![b.ret(Some(sum))]),
        );
        let call = b.call("add", vec![b.variable("a"), b.integer(2)]);
        let r = b.data(b.declaration(false, "int", "r"), Some(call));
        let start = b.start(b.block(vec![Statement::Data(r)]));

        let program = b.program(vec![
            ProgramItem::Data(a),
            ProgramItem::Data(fb),
            ProgramItem::Function(add),
            ProgramItem::Start(start),
        ]);
        let analysis = run(&ast, program);

        assert_eq!(analysis.error_count(), 0);
        assert_eq!(analysis.warning_count(), 0);
        assert!(analysis.is_ready_for_codegen());

        assert_eq!(widened.r#type(), Some(TypeTag::Integer));
        assert_eq!(sum.r#type(), Some(TypeTag::Integer));
        assert_eq!(call.r#type(), Some(TypeTag::Integer));

        let root = analysis.root();
        let a = root.lookup_local("a").unwrap();
        assert!(a.is_init());
        assert_eq!(a.ref_count(), 2);
        assert_eq!(root.lookup_local("b").unwrap().declared_type(), TypeTag::Float);

        let add = root.lookup_local("add").unwrap();
        assert_eq!(add.class(), SymbolClass::Function);
        assert_eq!(add.ref_count(), 1);
        assert_eq!(add.prototype().unwrap().to_string(), "int add(int,int)");
        assert!(root.lookup_local("x").is_none());
        assert!(root.lookup_local("r").is_none());
    }

    #[test]
    fn bool_from_string_warns() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let c = b.data(b.declaration(false, "bool", "c"), Some(b.string("x")));
        let program = b.program(vec![ProgramItem::Data(c)]);
        let analysis = run(&ast, program);

        assert_eq!(codes(&analysis), vec![(Severity::Warning, DiagnosticCode::AlwaysTrue)]);
        assert_eq!(
            analysis.diagnostics().as_slice()[0].message,
            "assigning a string to a boolean is always true"
        );
        assert!(analysis.is_ready_for_codegen());
        assert_eq!(
            analysis.root().lookup_local("c").unwrap().declared_type(),
            TypeTag::Bool
        );
    }

    #[test]
    fn binary_expression_types() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let ints = b.binary(BinaryOperator::Add, b.integer(1), b.integer(2));
        let mixed = b.binary(BinaryOperator::Add, b.integer(1), b.float(2.5));
        let concat = b.binary(BinaryOperator::Add, b.string("x"), b.integer(1));
        let minus = b.binary(BinaryOperator::Sub, b.integer(1), b.string("x"));
        let start = b.start(b.block(vec![
            Statement::Expression(ints),
            Statement::Expression(mixed),
            Statement::Expression(concat),
            Statement::Expression(minus),
        ]));
        let program = b.program(vec![ProgramItem::Start(start)]);
        let analysis = run(&ast, program);

        assert_eq!(ints.r#type(), Some(TypeTag::Integer));
        assert_eq!(mixed.r#type(), Some(TypeTag::Float));
        assert_eq!(concat.r#type(), Some(TypeTag::String));
        assert_eq!(minus.r#type(), None);

        assert_eq!(codes(&analysis), vec![(Severity::Error, DiagnosticCode::InvalidOperand)]);
        assert_eq!(analysis.diagnostics().as_slice()[0].position, minus.position());
        assert!(!analysis.is_ready_for_codegen());
    }

    #[test]
    fn arity_error() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let g = b.function(false, "nothing", "g", vec![], b.block(vec![]));
        let call = b.call("g", vec![b.integer(1)]);
        let start = b.start(b.block(vec![Statement::Expression(call)]));
        let program = b.program(vec![ProgramItem::Function(g), ProgramItem::Start(start)]);
        let analysis = run(&ast, program);

        assert_eq!(codes(&analysis), vec![(Severity::Error, DiagnosticCode::ArityMismatch)]);
        assert_eq!(
            analysis.diagnostics().as_slice()[0].message,
            "expected 0 function parameters but got 1"
        );
        assert_eq!(call.r#type(), Some(TypeTag::Nothing));
    }

    #[test]
    fn call_matching_is_exact() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let f = b.function(
            false,
            "int",
            "f",
            vec![b.declaration(false, "int", "x"), b.declaration(false, "int", "y")],
            b.block(vec![b.ret(Some(b.variable("x")))]),
        );
        let call = b.call("f", vec![b.integer(1), b.float(2.0)]);
        let start = b.start(b.block(vec![Statement::Expression(call)]));
        let program = b.program(vec![ProgramItem::Function(f), ProgramItem::Start(start)]);
        let analysis = run(&ast, program);

        assert_eq!(
            codes(&analysis),
            vec![(Severity::Error, DiagnosticCode::SignatureMismatch)]
        );
        assert_eq!(
            analysis.diagnostics().as_slice()[0].message,
            "expected function proto int f(int,int) but got int f(int,float)"
        );
        assert_eq!(analysis.diagnostics().as_slice()[0].position, call.position());
    }

    #[test]
    fn float_into_integer_only_warns() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let i = b.data(b.declaration(false, "int", "i"), Some(b.float(2.0)));
        let program = b.program(vec![ProgramItem::Data(i)]);
        let analysis = run(&ast, program);

        assert_eq!(
            codes(&analysis),
            vec![(Severity::Warning, DiagnosticCode::LossyConversion)]
        );
        assert!(analysis.is_ready_for_codegen());
    }

    #[test]
    fn sibling_functions_with_the_same_name() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let first = b.at(1, 1).function(
            false,
            "int",
            "f",
            vec![],
            b.block(vec![b.ret(Some(b.integer(1)))]),
        );
        let second = b.at(2, 1).function(
            false,
            "int",
            "f",
            vec![],
            b.block(vec![b.ret(Some(b.integer(2)))]),
        );
        let program = b.program(vec![ProgramItem::Function(first), ProgramItem::Function(second)]);
        let analysis = run(&ast, program);

        assert_eq!(
            codes(&analysis),
            vec![(Severity::Error, DiagnosticCode::DuplicateSymbol)]
        );
        assert_eq!(
            analysis.diagnostics().as_slice()[0].position,
            second.name().position()
        );
        assert!(ptr::eq(
            analysis.root().lookup_local("f").unwrap(),
            first.symbol().unwrap()
        ));
        assert!(second.symbol().is_none());
        assert!(second.prototype().is_some());
    }

    #[test]
    fn redeclaration_in_nested_scopes() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        // int n = 0
        // start { int n = 1  { float n = 2.0 }  n = 3 }
        let outer = b.data(b.declaration(false, "int", "n"), Some(b.integer(0)));
        let first = b.data(b.declaration(false, "int", "n"), Some(b.integer(1)));
        let second = b.data(b.declaration(false, "float", "n"), Some(b.float(2.0)));
        let nested = b.block(vec![Statement::Data(second)]);
        let use_site = b.variable("n");
        let start = b.start(b.block(vec![
            Statement::Data(first),
            Statement::Block(nested),
            Statement::Expression(use_site),
        ]));
        let program = b.program(vec![ProgramItem::Data(outer), ProgramItem::Start(start)]);
        let analysis = run(&ast, program);

        assert_eq!(analysis.error_count(), 2);
        assert!(analysis
            .diagnostics()
            .iter()
            .all(|d| d.code == DiagnosticCode::DuplicateSymbol));
        assert_eq!(
            analysis.diagnostics().as_slice()[0].position,
            first.declaration().name().position()
        );
        assert_eq!(
            analysis.diagnostics().as_slice()[1].position,
            second.declaration().name().position()
        );

        // The first binding still resolves.
        assert_eq!(use_site.r#type(), Some(TypeTag::Integer));
        assert!(ptr::eq(
            analysis.root().lookup_local("n").unwrap(),
            outer.declaration().symbol().unwrap()
        ));
    }

    #[test]
    fn parameters_cannot_be_shadowed() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        // int f(int x, float x) { int x = 1  return (x) }
        let local = b.data(b.declaration(false, "int", "x"), Some(b.integer(1)));
        let f = b.function(
            false,
            "int",
            "f",
            vec![b.declaration(false, "int", "x"), b.declaration(false, "float", "x")],
            b.block(vec![Statement::Data(local), b.ret(Some(b.variable("x")))]),
        );
        let program = b.program(vec![ProgramItem::Function(f)]);
        let analysis = run(&ast, program);

        assert_eq!(analysis.error_count(), 2);
        assert!(analysis
            .diagnostics()
            .iter()
            .all(|d| d.code == DiagnosticCode::DuplicateSymbol));
        // Duplicates still shape the prototype.
        assert_eq!(f.prototype().unwrap().to_string(), "int f(int,float)");
    }

    #[test]
    fn undefined_reference_is_reported_once() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        // start { int r = -(ghost + 1) * 2 }
        let ghost = b.at(3, 9).variable("ghost");
        let expr = b.binary(
            BinaryOperator::Mul,
            b.unary(
                UnaryOperator::Minus,
                b.group(b.binary(BinaryOperator::Add, ghost, b.integer(1))),
            ),
            b.integer(2),
        );
        let r = b.data(b.declaration(false, "int", "r"), Some(expr));
        let start = b.start(b.block(vec![Statement::Data(r)]));
        let program = b.program(vec![ProgramItem::Start(start)]);
        let analysis = run(&ast, program);

        assert_eq!(
            codes(&analysis),
            vec![(Severity::Error, DiagnosticCode::UndefinedSymbol)]
        );
        let diagnostic = &analysis.diagnostics().as_slice()[0];
        assert_eq!(diagnostic.position, ghost.position());
        assert_eq!(diagnostic.to_string(), "test.dk:3:9 error: symbol \"ghost\" not defined");
        assert_eq!(expr.r#type(), None);
        assert!(!r.declaration().symbol().unwrap().is_init());
    }

    #[test]
    fn wrong_kind_of_symbol() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let v = b.data(b.declaration(false, "int", "v"), Some(b.integer(1)));
        let f = b.function(false, "nothing", "f", vec![], b.block(vec![]));
        let start = b.start(b.block(vec![
            Statement::Expression(b.call("v", vec![])),
            b.assign("f", b.integer(2)),
            Statement::Expression(b.variable("f")),
        ]));
        let program = b.program(vec![
            ProgramItem::Data(v),
            ProgramItem::Function(f),
            ProgramItem::Start(start),
        ]);
        let analysis = run(&ast, program);

        assert_eq!(analysis.error_count(), 3);
        assert!(analysis
            .diagnostics()
            .iter()
            .all(|d| d.code == DiagnosticCode::WrongSymbolClass));
        assert_eq!(f.symbol().unwrap().ref_count(), 0);
        assert_eq!(v.declaration().symbol().unwrap().ref_count(), 0);
    }

    #[test]
    fn return_checks() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let log = b.function(
            false,
            "nothing",
            "log",
            vec![],
            b.block(vec![b.ret(Some(b.integer(1))), b.ret(None)]),
        );
        let count = b.function(
            false,
            "int",
            "count",
            vec![],
            b.block(vec![b.ret(None), b.ret(Some(b.string("x"))), b.ret(Some(b.float(1.5)))]),
        );
        let start = b.start(b.block(vec![b.ret(Some(b.integer(0)))]));
        let program = b.program(vec![
            ProgramItem::Function(log),
            ProgramItem::Function(count),
            ProgramItem::Start(start),
        ]);
        let analysis = run(&ast, program);

        assert_eq!(
            codes(&analysis),
            vec![
                (Severity::Error, DiagnosticCode::InvalidReturn),
                (Severity::Error, DiagnosticCode::InvalidReturn),
                (Severity::Error, DiagnosticCode::IncompatibleAssignment),
                (Severity::Warning, DiagnosticCode::LossyConversion),
            ]
        );
        let messages: Vec<_> = analysis
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages[0], "function \"log\" returns nothing but a value is returned");
        assert_eq!(messages[1], "function \"count\" must return an integer");
        assert_eq!(messages[2], "cannot assign a string to an integer");
    }

    #[test]
    fn nothing_call_in_arithmetic() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let g = b.function(false, "nothing", "g", vec![], b.block(vec![]));
        let sum = b.binary(BinaryOperator::Add, b.call("g", vec![]), b.integer(1));
        let start = b.start(b.block(vec![Statement::Expression(sum)]));
        let program = b.program(vec![ProgramItem::Function(g), ProgramItem::Start(start)]);
        let analysis = run(&ast, program);

        assert_eq!(codes(&analysis), vec![(Severity::Error, DiagnosticCode::NothingValue)]);
        assert_eq!(sum.r#type(), None);
    }

    #[test]
    fn statements_and_casts() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        // start {
        //   bool flag = true
        //   if (not flag) { flag = 1 } else if (flag) { } else { }
        //   while (flag) { break }
        //   do { continue } while (bool:2.5)
        //   string s = "%d items"(float:flag)
        // }
        let not_flag = b.unary(UnaryOperator::Not, b.variable("flag"));
        let else_if = b.if_stmt(b.variable("flag"), b.block(vec![]), Some(ElseBranch::Block(b.block(vec![]))));
        let if_stmt = b.if_stmt(
            not_flag,
            b.block(vec![b.assign("flag", b.integer(1))]),
            Some(ElseBranch::If(else_if)),
        );
        let always_true = b.cast("bool", b.float(2.5));
        let bad_cast = b.cast("float", b.variable("flag"));
        let format = b.format("%d items", vec![bad_cast]);
        let s = b.data(b.declaration(false, "string", "s"), Some(format));
        let start = b.start(b.block(vec![
            Statement::Data(b.data(b.declaration(false, "bool", "flag"), Some(b.boolean(true)))),
            Statement::If(if_stmt),
            b.while_loop(Some(b.variable("flag")), b.block(vec![b.brk()])),
            b.do_loop(b.block(vec![b.cont()]), Some(always_true)),
            Statement::Data(s),
            b.inline("nop"),
        ]));
        let program = b.program(vec![ProgramItem::Import(b.import("std")), ProgramItem::Start(start)]);
        let analysis = run(&ast, program);

        assert_eq!(
            codes(&analysis),
            vec![
                (Severity::Warning, DiagnosticCode::LossyConversion),
                (Severity::Warning, DiagnosticCode::AlwaysTrue),
                (Severity::Error, DiagnosticCode::InvalidCast),
            ]
        );
        assert_eq!(not_flag.r#type(), Some(TypeTag::Bool));
        assert_eq!(always_true.r#type(), Some(TypeTag::Bool));
        assert_eq!(bad_cast.r#type(), None);
        assert_eq!(format.r#type(), Some(TypeTag::String));
        assert!(s.declaration().symbol().unwrap().is_init());
    }

    #[test]
    fn untyped_literal_is_internal() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let literal = b.untyped_literal(crate::syntax::TokenKind::IntegerLiteral, "7");
        let start = b.start(b.block(vec![Statement::Expression(literal)]));
        let program = b.program(vec![ProgramItem::Start(start)]);

        assert_matches!(
            analyze(ast.arena(), program),
            Err(crate::semantic::InternalError::UntypedLiteral(raw, _)) if raw == "7"
        );
    }

    fn build_sample<'a>(b: &AstBuilder<'a>) -> (&'a Program<'a>, Vec<&'a crate::syntax::Expression<'a>>) {
        let a = b.data(b.declaration(false, "int", "a"), Some(b.integer(1)));
        let lossy = b.data(b.declaration(false, "int", "l"), Some(b.float(0.5)));
        let sum = b.binary(BinaryOperator::Add, b.variable("a"), b.float(1.0));
        let concat = b.binary(BinaryOperator::Add, b.string("n"), b.variable("a"));
        let bad = b.binary(BinaryOperator::Mod, b.string("n"), b.variable("missing"));
        let start = b.start(b.block(vec![
            Statement::Expression(sum),
            Statement::Expression(concat),
            Statement::Expression(bad),
        ]));
        let program = b.program(vec![
            ProgramItem::Data(a),
            ProgramItem::Data(lossy),
            ProgramItem::Start(start),
        ]);
        (program, vec![sum, concat, bad])
    }

    #[test]
    fn reanalyzing_the_same_tree() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");
        let (program, exprs) = build_sample(&b);

        let first = run(&ast, program);
        let first_types: Vec<_> = exprs.iter().map(|e| e.r#type()).collect();

        let second = run(&ast, program);
        let second_types: Vec<_> = exprs.iter().map(|e| e.r#type()).collect();

        assert_eq!(first.diagnostics().as_slice(), second.diagnostics().as_slice());
        assert_eq!(first_types, second_types);
        assert!(ptr::eq(program.context().unwrap(), second.root()));
        assert!(!ptr::eq(first.root(), second.root()));
        assert_eq!(second.root().lookup_local("a").unwrap().ref_count(), 2);
    }

    #[test]
    fn analysis_is_deterministic() {
        let first_ast = Ast::new();
        let first_builder = AstBuilder::new(&first_ast, "test.dk");
        let (first, first_exprs) = build_sample(&first_builder);

        let second_ast = Ast::new();
        let second_builder = AstBuilder::new(&second_ast, "test.dk");
        let (second, second_exprs) = build_sample(&second_builder);

        let first = run(&first_ast, first);
        let second = run(&second_ast, second);

        assert_eq!(first.diagnostics().as_slice(), second.diagnostics().as_slice());
        let first_types: Vec<_> = first_exprs.iter().map(|e| e.r#type()).collect();
        let second_types: Vec<_> = second_exprs.iter().map(|e| e.r#type()).collect();
        assert_eq!(first_types, second_types);
        assert_eq!(
            first_types,
            vec![Some(TypeTag::Float), Some(TypeTag::String), None]
        );
    }
}
