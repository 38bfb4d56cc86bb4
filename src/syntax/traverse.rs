use super::tree::*;
use super::Token;

/// Hooks invoked by [`traverse`]. Every hook defaults to a no-op, so a
/// visitor only implements the nodes it cares about. Returning an error
/// stops the walk immediately.
#[allow(unused_variables)]
pub trait Visitor<'a> {
    type Error;

    fn enter_program(&mut self, program: &'a Program<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_program(&mut self, program: &'a Program<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_import(&mut self, import: &'a ImportStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_start(&mut self, start: &'a StartBlock<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_start(&mut self, start: &'a StartBlock<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_data_definition(
        &mut self,
        definition: &'a DataDefinition<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_data_definition(
        &mut self,
        definition: &'a DataDefinition<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_data_declaration(
        &mut self,
        declaration: &'a DataDeclaration<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_function_definition(
        &mut self,
        definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_function_definition(
        &mut self,
        definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_function_parameter(
        &mut self,
        fun: &'a FunctionDefinition<'a>,
        param: &'a DataDeclaration<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the last parameter and before the body.
    fn exit_function_parameters(
        &mut self,
        fun: &'a FunctionDefinition<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_block(&mut self, block: &'a Block<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_block(&mut self, block: &'a Block<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    // Statement
    fn enter_assignment(&mut self, assignment: &'a Assignment<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_assignment(&mut self, assignment: &'a Assignment<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_if(&mut self, stmt: &'a IfStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_if(&mut self, stmt: &'a IfStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_while(&mut self, stmt: &'a WhileStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_while(&mut self, stmt: &'a WhileStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_do(&mut self, stmt: &'a DoStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_do(&mut self, stmt: &'a DoStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_return(&mut self, stmt: &'a ReturnStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_yield(&mut self, stmt: &'a YieldStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_break(&mut self, keyword: Token<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_continue(&mut self, keyword: Token<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_inline(&mut self, stmt: &'a InlineStatement<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    // Expression
    fn enter_expression(&mut self, expr: &'a Expression<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_expression(&mut self, expr: &'a Expression<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_literal(&mut self, expr: &'a Expression<'a>, token: Token<'a>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_variable(
        &mut self,
        expr: &'a Expression<'a>,
        variable: &'a VariableExpression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_variable(
        &mut self,
        expr: &'a Expression<'a>,
        variable: &'a VariableExpression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_call(
        &mut self,
        expr: &'a Expression<'a>,
        call: &'a CallExpression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_call(
        &mut self,
        expr: &'a Expression<'a>,
        call: &'a CallExpression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_binary(
        &mut self,
        expr: &'a Expression<'a>,
        binary: &'a BinaryExpression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_unary(
        &mut self,
        expr: &'a Expression<'a>,
        unary: &'a UnaryExpression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_cast(
        &mut self,
        expr: &'a Expression<'a>,
        cast: &'a CastExpression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_grouped(
        &mut self,
        expr: &'a Expression<'a>,
        inner: &'a Expression<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_format(
        &mut self,
        expr: &'a Expression<'a>,
        format: &'a FormatString<'a>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walks the tree depth-first, left to right and outer to inner.
pub fn traverse<'a, V: Visitor<'a>>(
    visitor: &mut V,
    program: &'a Program<'a>,
) -> Result<(), V::Error> {
    visitor.enter_program(program)?;
    for item in program.items() {
        traverse_item(visitor, item)?;
    }
    visitor.exit_program(program)
}

fn traverse_item<'a, V: Visitor<'a>>(visitor: &mut V, item: ProgramItem<'a>) -> Result<(), V::Error> {
    match item {
        ProgramItem::Import(import) => visitor.enter_import(import),
        ProgramItem::Data(definition) => traverse_data_definition(visitor, definition),
        ProgramItem::Function(definition) => traverse_function_definition(visitor, definition),
        ProgramItem::Start(start) => {
            visitor.enter_start(start)?;
            traverse_block(visitor, start.body())?;
            visitor.exit_start(start)
        }
    }
}

fn traverse_data_definition<'a, V: Visitor<'a>>(
    visitor: &mut V,
    definition: &'a DataDefinition<'a>,
) -> Result<(), V::Error> {
    visitor.enter_data_definition(definition)?;
    visitor.enter_data_declaration(definition.declaration())?;
    if let Some(init) = definition.initializer() {
        traverse_expression(visitor, init)?;
    }
    visitor.exit_data_definition(definition)
}

fn traverse_function_definition<'a, V: Visitor<'a>>(
    visitor: &mut V,
    definition: &'a FunctionDefinition<'a>,
) -> Result<(), V::Error> {
    visitor.enter_function_definition(definition)?;
    for param in definition.parameters() {
        visitor.enter_function_parameter(definition, param)?;
    }
    visitor.exit_function_parameters(definition)?;
    traverse_block(visitor, definition.body())?;
    visitor.exit_function_definition(definition)
}

fn traverse_block<'a, V: Visitor<'a>>(visitor: &mut V, block: &'a Block<'a>) -> Result<(), V::Error> {
    visitor.enter_block(block)?;
    for stmt in block.statements() {
        traverse_statement(visitor, stmt)?;
    }
    visitor.exit_block(block)
}

fn traverse_statement<'a, V: Visitor<'a>>(
    visitor: &mut V,
    stmt: Statement<'a>,
) -> Result<(), V::Error> {
    match stmt {
        Statement::Data(definition) => traverse_data_definition(visitor, definition),
        Statement::Assignment(assignment) => {
            visitor.enter_assignment(assignment)?;
            traverse_expression(visitor, assignment.value())?;
            visitor.exit_assignment(assignment)
        }
        Statement::Expression(expr) => traverse_expression(visitor, expr),
        Statement::If(stmt) => traverse_if(visitor, stmt),
        Statement::While(stmt) => {
            visitor.enter_while(stmt)?;
            if let Some(condition) = stmt.condition() {
                traverse_expression(visitor, condition)?;
            }
            traverse_block(visitor, stmt.body())?;
            visitor.exit_while(stmt)
        }
        Statement::Do(stmt) => {
            visitor.enter_do(stmt)?;
            traverse_block(visitor, stmt.body())?;
            if let Some(condition) = stmt.condition() {
                traverse_expression(visitor, condition)?;
            }
            visitor.exit_do(stmt)
        }
        Statement::Return(stmt) => {
            if let Some(value) = stmt.value() {
                traverse_expression(visitor, value)?;
            }
            visitor.exit_return(stmt)
        }
        Statement::Yield(stmt) => {
            if let Some(value) = stmt.value() {
                traverse_expression(visitor, value)?;
            }
            visitor.exit_yield(stmt)
        }
        Statement::Break(keyword) => visitor.enter_break(keyword),
        Statement::Continue(keyword) => visitor.enter_continue(keyword),
        Statement::Inline(stmt) => visitor.enter_inline(stmt),
        Statement::Block(block) => traverse_block(visitor, block),
    }
}

fn traverse_if<'a, V: Visitor<'a>>(visitor: &mut V, stmt: &'a IfStatement<'a>) -> Result<(), V::Error> {
    visitor.enter_if(stmt)?;
    traverse_expression(visitor, stmt.condition())?;
    traverse_block(visitor, stmt.then_block())?;
    match stmt.else_branch() {
        Some(ElseBranch::If(next)) => traverse_if(visitor, next)?,
        Some(ElseBranch::Block(block)) => traverse_block(visitor, block)?,
        None => {}
    }
    visitor.exit_if(stmt)
}

fn traverse_expression<'a, V: Visitor<'a>>(
    visitor: &mut V,
    expr: &'a Expression<'a>,
) -> Result<(), V::Error> {
    visitor.enter_expression(expr)?;

    match *expr.kind() {
        ExpressionKind::Literal(token) => {
            visitor.exit_literal(expr, token)?;
        }
        ExpressionKind::Variable(variable) => {
            visitor.enter_variable(expr, variable)?;
            visitor.exit_variable(expr, variable)?;
        }
        ExpressionKind::Call(call) => {
            visitor.enter_call(expr, call)?;
            for arg in call.arguments() {
                traverse_expression(visitor, arg)?;
            }
            visitor.exit_call(expr, call)?;
        }
        ExpressionKind::Binary(binary) => {
            traverse_expression(visitor, binary.lhs())?;
            traverse_expression(visitor, binary.rhs())?;
            visitor.exit_binary(expr, binary)?;
        }
        ExpressionKind::Unary(unary) => {
            traverse_expression(visitor, unary.operand())?;
            visitor.exit_unary(expr, unary)?;
        }
        ExpressionKind::Cast(cast) => {
            traverse_expression(visitor, cast.operand())?;
            visitor.exit_cast(expr, cast)?;
        }
        ExpressionKind::Grouped(inner) => {
            traverse_expression(visitor, inner)?;
            visitor.exit_grouped(expr, inner)?;
        }
        ExpressionKind::Format(format) => {
            for arg in format.arguments() {
                traverse_expression(visitor, arg)?;
            }
            visitor.exit_format(expr, format)?;
        }
    }

    visitor.exit_expression(expr)
}
