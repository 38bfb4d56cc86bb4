use super::InternalError;
use crate::syntax::{
    traverse, Assignment, Block, CallExpression, DataDeclaration, Expression, FunctionDefinition,
    Program, VariableExpression, Visitor,
};
use log::debug;

/// Empties every slot a previous analysis filled in, so the tree can be
/// analyzed again from a fresh root context.
pub(super) fn clear_annotations<'a>(program: &'a Program<'a>) -> Result<(), InternalError> {
    let mut cleaner = AnnotationCleaner::default();
    traverse(&mut cleaner, program)?;
    debug!("[reset] {}: {} nodes cleared", program.file(), cleaner.cleared);
    Ok(())
}

#[derive(Debug, Default)]
struct AnnotationCleaner {
    cleared: usize,
}

impl<'a> Visitor<'a> for AnnotationCleaner {
    type Error = InternalError;

    fn enter_program(&mut self, program: &'a Program<'a>) -> Result<(), InternalError> {
        program.clear_annotations();
        self.cleared += 1;
        Ok(())
    }

    fn enter_data_declaration(
        &mut self,
        declaration: &'a DataDeclaration<'a>,
    ) -> Result<(), InternalError> {
        declaration.clear_annotations();
        self.cleared += 1;
        Ok(())
    }

    fn enter_function_definition(
        &mut self,
        definition: &'a FunctionDefinition<'a>,
    ) -> Result<(), InternalError> {
        definition.clear_annotations();
        self.cleared += 1;
        Ok(())
    }

    fn enter_function_parameter(
        &mut self,
        _fun: &'a FunctionDefinition<'a>,
        param: &'a DataDeclaration<'a>,
    ) -> Result<(), InternalError> {
        param.clear_annotations();
        self.cleared += 1;
        Ok(())
    }

    fn enter_block(&mut self, block: &'a Block<'a>) -> Result<(), InternalError> {
        block.clear_annotations();
        self.cleared += 1;
        Ok(())
    }

    fn enter_assignment(&mut self, assignment: &'a Assignment<'a>) -> Result<(), InternalError> {
        assignment.clear_annotations();
        self.cleared += 1;
        Ok(())
    }

    fn enter_expression(&mut self, expr: &'a Expression<'a>) -> Result<(), InternalError> {
        expr.clear_annotations();
        self.cleared += 1;
        Ok(())
    }

    fn enter_variable(
        &mut self,
        _expr: &'a Expression<'a>,
        variable: &'a VariableExpression<'a>,
    ) -> Result<(), InternalError> {
        variable.clear_annotations();
        Ok(())
    }

    fn enter_call(
        &mut self,
        _expr: &'a Expression<'a>,
        call: &'a CallExpression<'a>,
    ) -> Result<(), InternalError> {
        call.clear_annotations();
        Ok(())
    }
}
