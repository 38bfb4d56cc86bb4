use super::tree::*;
use super::{Position, Token, TokenKind};
use crate::semantic::TypeTag;
use std::cell::Cell;

/// Constructs tree nodes in an [`Ast`] arena.
///
/// Every token gets the position of an internal cursor which advances past
/// the token's text, so sibling nodes end up at distinct columns. Use
/// [`AstBuilder::at`] to move the cursor explicitly.
#[derive(Debug)]
pub struct AstBuilder<'a> {
    tree: &'a Ast,
    file: &'a str,
    line: Cell<u32>,
    column: Cell<u32>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(tree: &'a Ast, file: &str) -> Self {
        Self {
            tree,
            file: tree.alloc_str(file),
            line: Cell::new(1),
            column: Cell::new(1),
        }
    }

    pub fn tree(&self) -> &'a Ast {
        self.tree
    }

    pub fn at(&self, line: u32, column: u32) -> &Self {
        self.line.set(line);
        self.column.set(column);
        self
    }

    pub fn token(&self, kind: TokenKind, raw: &str) -> Token<'a> {
        let position = Position::new(self.file, self.line.get(), self.column.get());

        self.column
            .set(self.column.get() + raw.chars().count() as u32 + 1);

        Token::new(kind, self.tree.alloc_str(raw), position)
    }

    /// Consumes a keyword token so the cursor moves past it.
    pub fn keyword(&self, kind: TokenKind) -> Token<'a> {
        self.token(kind, &kind.to_string())
    }

    pub fn identifier(&self, name: &str) -> Identifier<'a> {
        Identifier::new(self.token(TokenKind::Identifier, name))
    }

    pub fn type_name(&self, name: &str) -> TypeName<'a> {
        let kind = TokenKind::from_type_name(name).unwrap_or(TokenKind::Identifier);
        TypeName::new(self.token(kind, name))
    }

    // Expressions

    pub fn literal(&self, kind: TokenKind, raw: &str, r#type: TypeTag<'a>) -> &'a Expression<'a> {
        let token = self.token(kind, raw);
        self.tree.alloc(Expression::literal(token, r#type))
    }

    /// A literal the front end failed to type.
    pub fn untyped_literal(&self, kind: TokenKind, raw: &str) -> &'a Expression<'a> {
        let token = self.token(kind, raw);
        self.tree
            .alloc(Expression::new(ExpressionKind::Literal(token)))
    }

    pub fn integer(&self, value: i64) -> &'a Expression<'a> {
        self.literal(TokenKind::IntegerLiteral, &value.to_string(), TypeTag::Integer)
    }

    pub fn float(&self, value: f64) -> &'a Expression<'a> {
        self.literal(TokenKind::FloatLiteral, &format!("{:?}", value), TypeTag::Float)
    }

    pub fn string(&self, value: &str) -> &'a Expression<'a> {
        self.literal(TokenKind::StringLiteral, value, TypeTag::String)
    }

    pub fn boolean(&self, value: bool) -> &'a Expression<'a> {
        let raw = if value { "true" } else { "false" };
        self.literal(TokenKind::BoolLiteral, raw, TypeTag::Bool)
    }

    pub fn variable(&self, name: &str) -> &'a Expression<'a> {
        let variable = self.tree.alloc(VariableExpression::new(self.identifier(name)));
        self.tree
            .alloc(Expression::new(ExpressionKind::Variable(variable)))
    }

    pub fn call(&self, name: &str, arguments: Vec<&'a Expression<'a>>) -> &'a Expression<'a> {
        let call = self
            .tree
            .alloc(CallExpression::new(self.tree, self.identifier(name), arguments));
        self.tree.alloc(Expression::new(ExpressionKind::Call(call)))
    }

    pub fn binary(
        &self,
        operator: BinaryOperator,
        lhs: &'a Expression<'a>,
        rhs: &'a Expression<'a>,
    ) -> &'a Expression<'a> {
        let token = self.token(binary_token_kind(operator), &operator.to_string());
        let binary = self
            .tree
            .alloc(BinaryExpression::new(operator, token, lhs, rhs));
        self.tree
            .alloc(Expression::new(ExpressionKind::Binary(binary)))
    }

    pub fn unary(&self, operator: UnaryOperator, operand: &'a Expression<'a>) -> &'a Expression<'a> {
        let kind = match operator {
            UnaryOperator::Minus => TokenKind::Minus,
            UnaryOperator::Not => TokenKind::Not,
        };
        let token = self.token(kind, &operator.to_string());
        let unary = self
            .tree
            .alloc(UnaryExpression::new(operator, token, operand));
        self.tree.alloc(Expression::new(ExpressionKind::Unary(unary)))
    }

    pub fn cast(&self, type_name: &str, operand: &'a Expression<'a>) -> &'a Expression<'a> {
        let cast = self
            .tree
            .alloc(CastExpression::new(self.type_name(type_name), operand));
        self.tree.alloc(Expression::new(ExpressionKind::Cast(cast)))
    }

    pub fn group(&self, inner: &'a Expression<'a>) -> &'a Expression<'a> {
        self.tree
            .alloc(Expression::new(ExpressionKind::Grouped(inner)))
    }

    pub fn format(&self, text: &str, arguments: Vec<&'a Expression<'a>>) -> &'a Expression<'a> {
        let token = self.token(TokenKind::StringLiteral, text);
        let format = self
            .tree
            .alloc(FormatString::new(self.tree, token, arguments));
        self.tree
            .alloc(Expression::new(ExpressionKind::Format(format)))
    }

    // Declarations

    pub fn declaration(&self, is_const: bool, type_name: &str, name: &str) -> &'a DataDeclaration<'a> {
        if is_const {
            self.keyword(TokenKind::Const);
        }
        let type_name = self.type_name(type_name);
        let name = self.identifier(name);

        self.tree
            .alloc(DataDeclaration::new(is_const, type_name, name))
    }

    pub fn data(
        &self,
        declaration: &'a DataDeclaration<'a>,
        initializer: Option<&'a Expression<'a>>,
    ) -> &'a DataDefinition<'a> {
        self.tree
            .alloc(DataDefinition::new(declaration, initializer))
    }

    pub fn function(
        &self,
        is_iterator: bool,
        return_type: &str,
        name: &str,
        parameters: Vec<&'a DataDeclaration<'a>>,
        body: &'a Block<'a>,
    ) -> &'a FunctionDefinition<'a> {
        if is_iterator {
            self.keyword(TokenKind::Iterator);
        }
        let return_type = self.type_name(return_type);
        let name = self.identifier(name);

        self.tree.alloc(FunctionDefinition::new(
            self.tree,
            is_iterator,
            return_type,
            name,
            parameters,
            body,
        ))
    }

    // Statements

    pub fn block(&self, statements: Vec<Statement<'a>>) -> &'a Block<'a> {
        let open = self.token(TokenKind::LeftBrace, "{");
        self.tree.alloc(Block::new(self.tree, open, statements))
    }

    pub fn assign(&self, target: &str, value: &'a Expression<'a>) -> Statement<'a> {
        let assignment = self
            .tree
            .alloc(Assignment::new(self.identifier(target), value));
        Statement::Assignment(assignment)
    }

    pub fn if_stmt(
        &self,
        condition: &'a Expression<'a>,
        then_block: &'a Block<'a>,
        else_branch: Option<ElseBranch<'a>>,
    ) -> &'a IfStatement<'a> {
        let keyword = self.token(TokenKind::If, "if");
        self.tree
            .alloc(IfStatement::new(keyword, condition, then_block, else_branch))
    }

    pub fn while_loop(
        &self,
        condition: Option<&'a Expression<'a>>,
        body: &'a Block<'a>,
    ) -> Statement<'a> {
        let keyword = self.token(TokenKind::While, "while");
        Statement::While(self.tree.alloc(WhileStatement::new(keyword, condition, body)))
    }

    pub fn do_loop(
        &self,
        body: &'a Block<'a>,
        condition: Option<&'a Expression<'a>>,
    ) -> Statement<'a> {
        let keyword = self.token(TokenKind::Do, "do");
        Statement::Do(self.tree.alloc(DoStatement::new(keyword, body, condition)))
    }

    pub fn ret(&self, value: Option<&'a Expression<'a>>) -> Statement<'a> {
        let keyword = self.token(TokenKind::Return, "return");
        Statement::Return(self.tree.alloc(ReturnStatement::new(keyword, value)))
    }

    pub fn yield_value(&self, value: Option<&'a Expression<'a>>) -> Statement<'a> {
        let keyword = self.token(TokenKind::Yield, "yield");
        Statement::Yield(self.tree.alloc(YieldStatement::new(keyword, value)))
    }

    pub fn brk(&self) -> Statement<'a> {
        Statement::Break(self.token(TokenKind::Break, "break"))
    }

    pub fn cont(&self) -> Statement<'a> {
        Statement::Continue(self.token(TokenKind::Continue, "continue"))
    }

    pub fn inline(&self, text: &str) -> Statement<'a> {
        let keyword = self.token(TokenKind::Inline, "inline");
        let text = self.tree.alloc_str(text);
        Statement::Inline(self.tree.alloc(InlineStatement::new(keyword, text)))
    }

    // Program

    pub fn import(&self, path: &str) -> &'a ImportStatement<'a> {
        let keyword = self.token(TokenKind::Import, "import");
        let path = self.tree.alloc_str(path);
        self.tree.alloc(ImportStatement::new(keyword, path))
    }

    pub fn start(&self, body: &'a Block<'a>) -> &'a StartBlock<'a> {
        let keyword = self.token(TokenKind::Start, "start");
        self.tree.alloc(StartBlock::new(keyword, body))
    }

    pub fn program(&self, items: Vec<ProgramItem<'a>>) -> &'a Program<'a> {
        self.tree.alloc(Program::new(self.tree, self.file, items))
    }
}

fn binary_token_kind(operator: BinaryOperator) -> TokenKind {
    match operator {
        BinaryOperator::Add => TokenKind::Plus,
        BinaryOperator::Sub => TokenKind::Minus,
        BinaryOperator::Mul => TokenKind::Star,
        BinaryOperator::Div => TokenKind::Slash,
        BinaryOperator::Mod => TokenKind::Percent,
        BinaryOperator::Pow => TokenKind::Caret,
        BinaryOperator::Lt => TokenKind::Lt,
        BinaryOperator::Gt => TokenKind::Gt,
        BinaryOperator::Le => TokenKind::Le,
        BinaryOperator::Ge => TokenKind::Ge,
        BinaryOperator::Eq => TokenKind::Eq,
        BinaryOperator::Ne => TokenKind::Ne,
        BinaryOperator::And => TokenKind::And,
        BinaryOperator::Or => TokenKind::Or,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn cursor_advances_past_tokens() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let decl = b.at(3, 5).declaration(true, "float", "ratio");

        assert!(decl.is_const());
        assert_eq!(decl.type_name().position(), Position::new("test.dk", 3, 11));
        assert_eq!(decl.name().position(), Position::new("test.dk", 3, 17));
        assert_eq!(decl.to_string(), "const float ratio");
    }

    #[test]
    fn iterator_keyword_is_skipped() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        let body = b.block(vec![]);
        let fun = b.at(1, 1).function(true, "int", "range", vec![], body);

        assert!(fun.is_iterator());
        assert_eq!(fun.return_type().position(), Position::new("test.dk", 1, 10));
        assert_eq!(fun.name().position(), Position::new("test.dk", 1, 14));
    }

    #[test]
    fn literals_are_typed() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        assert_matches!(b.integer(7).r#type(), Some(TypeTag::Integer));
        assert_matches!(b.float(2.5).r#type(), Some(TypeTag::Float));
        assert_matches!(b.string("x").r#type(), Some(TypeTag::String));
        assert_matches!(b.boolean(true).r#type(), Some(TypeTag::Bool));
        assert_matches!(
            b.untyped_literal(TokenKind::IntegerLiteral, "1").r#type(),
            None
        );
    }

    #[test]
    fn struct_type_names() {
        let ast = Ast::new();
        let b = AstBuilder::new(&ast, "test.dk");

        assert_matches!(b.type_name("Point").type_tag(), Some(TypeTag::Struct("Point")));
        assert_matches!(b.type_name("nothing").type_tag(), Some(TypeTag::Nothing));
    }
}
