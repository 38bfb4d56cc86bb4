use super::{Context, InternalError, ScopeManager, Symbol};
use crate::syntax::{traverse, Block, FunctionDefinition, Program, Visitor};
use log::debug;
use std::fmt::Write;
use std::ptr;

/// Renders every non-empty context of an analyzed program, re-entering the
/// recorded contexts from the root in tree order.
pub fn dump_symbols<'a>(
    scopes: &mut ScopeManager<'a>,
    program: &'a Program<'a>,
) -> Result<String, InternalError> {
    let mut dumper = SymbolDumper {
        scopes,
        output: String::new(),
    };

    traverse(&mut dumper, program)?;
    Ok(dumper.output)
}

struct SymbolDumper<'a, 's> {
    scopes: &'s mut ScopeManager<'a>,
    output: String,
}

impl<'a> SymbolDumper<'a, '_> {
    fn enter(&mut self, context: Option<&'a Context<'a>>, node: String) -> Result<(), InternalError> {
        let context = context.ok_or(InternalError::MissingContext(node))?;

        self.scopes.push_context(context)?;
        self.render(context);
        Ok(())
    }

    fn render(&mut self, context: &'a Context<'a>) {
        if context.is_empty() {
            return;
        }

        let header = match context.parent() {
            Some(parent) => format!("context #{} (parent #{})", context.id(), parent.id()),
            None => format!("context #{}", context.id()),
        };
        self.line(header);

        for symbol in context.sorted_symbols() {
            self.line(format!("  {}", describe(symbol)));
        }
    }

    fn line(&mut self, line: String) {
        debug!("[dump] {}", line);
        // Writing into a String cannot fail.
        let _ = writeln!(self.output, "{}", line);
    }
}

fn describe(symbol: &Symbol<'_>) -> String {
    let mut text = format!(
        "{} {} {}",
        symbol.class(),
        symbol.declared_type(),
        symbol.name()
    );

    if let Some(prototype) = symbol.prototype() {
        let _ = write!(text, " `{}`", prototype);
    }
    if symbol.is_const() {
        text.push_str(" const");
    }
    if symbol.is_init() {
        text.push_str(" init");
    }
    if symbol.is_iterator() {
        text.push_str(" iterator");
    }

    let _ = write!(text, " refs={}", symbol.ref_count());
    text
}

impl<'a> Visitor<'a> for SymbolDumper<'a, '_> {
    type Error = InternalError;

    fn enter_program(&mut self, program: &'a Program<'a>) -> Result<(), InternalError> {
        let root = self.scopes.reset_context()?;

        match program.context() {
            Some(context) if ptr::eq(context, root) => {
                self.render(root);
                Ok(())
            }
            Some(context) => Err(InternalError::UnexpectedContext(context.id())),
            None => Err(InternalError::MissingContext(format!(
                "program `{}`",
                program.file()
            ))),
        }
    }

    fn exit_program(&mut self, _program: &'a Program<'a>) -> Result<(), InternalError> {
        self.scopes.pop_context()?;
        Ok(())
    }

    fn enter_function_definition(
        &mut self,
        definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), InternalError> {
        self.enter(
            definition.context(),
            format!("function `{}`", definition.name()),
        )
    }

    fn exit_function_definition(
        &mut self,
        _definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), InternalError> {
        self.scopes.pop_context()?;
        Ok(())
    }

    fn enter_block(&mut self, block: &'a Block<'a>) -> Result<(), InternalError> {
        self.enter(block.context(), format!("block at {}", block.position()))
    }

    fn exit_block(&mut self, _block: &'a Block<'a>) -> Result<(), InternalError> {
        self.scopes.pop_context()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::analyze;
    use crate::syntax::{Ast, AstBuilder, ProgramItem, Statement};
    use assert_matches::assert_matches;

    #[test]
    fn dump_after_analysis() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        // const float ratio = 0.5
        // iterator int f(int x) { int y = x  yield (y) }
        // start { }
        let ratio = b.data(b.declaration(true, "float", "ratio"), Some(b.float(0.5)));
        let y = b.data(b.declaration(false, "int", "y"), Some(b.variable("x")));
        let f = b.function(
            true,
            "int",
            "f",
            vec![b.declaration(false, "int", "x")],
            b.block(vec![Statement::Data(y), b.yield_value(Some(b.variable("y")))]),
        );
        let start = b.start(b.block(vec![]));
        let program = b.program(vec![
            ProgramItem::Data(ratio),
            ProgramItem::Function(f),
            ProgramItem::Start(start),
        ]);

        let mut analysis = analyze(ast.arena(), program).unwrap();
        let dump = analysis.dump_symbols().unwrap();

        assert_eq!(
            dump,
            "context #0\n\
             \x20 function int f `int f(int)` const iterator refs=0\n\
             \x20 data float ratio const init refs=0\n\
             context #1 (parent #0)\n\
             \x20 data int x init refs=1\n\
             context #2 (parent #1)\n\
             \x20 data int y init refs=1\n"
        );
    }

    #[test]
    fn unanalyzed_tree_has_no_contexts() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");
        let program = b.program(vec![]);

        let mut scopes = ScopeManager::new(ast.arena());
        assert_matches!(
            dump_symbols(&mut scopes, program),
            Err(InternalError::MissingRootContext)
        );

        scopes.create_context();
        assert_matches!(
            dump_symbols(&mut scopes, program),
            Err(InternalError::MissingContext(_))
        );
    }
}
