//! Grammar
//! -------
//!
//! ```ignore
//! Program            := (Import | DataDefinition | FunctionDefinition | Start)*
//! Import             := "import" <Path>
//! Start              := "start" Block
//! DataDefinition     := DataDeclaration ("=" Expression)?
//! DataDeclaration    := "const"? TypeName Id
//! FunctionDefinition := "iterator"? TypeName Id "(" (DataDeclaration ",")* DataDeclaration? ")" Block
//! Block              := "{" Statement* "}"
//! Statement          := DataDefinition | Assignment | Expression | If | While | Do | Return
//!                     | "break" | "continue" | Yield | Inline | Block
//! Assignment         := Id "=" Expression
//! If                 := "if" "(" Expression ")" Block ("else" (If | Block))?
//! While              := "while" ("(" Expression ")")? Block
//! Do                 := "do" Block "while" ("(" Expression ")")?
//! Return             := "return" ("(" Expression ")")?
//! Yield              := "yield" ("(" Expression ")")?
//! Inline             := "inline" <Text>
//! Expression         := Literal | Id | Call | Binary | Unary | Cast | "(" Expression ")"
//!                     | FormatString
//! Call               := Id "(" (Expression ",")* Expression? ")"
//! Binary             := Expression BinaryOperator Expression
//! Unary              := ("-" | "not") Expression
//! Cast               := TypeName ":" Expression
//! FormatString       := <String> "(" (Expression ",")* Expression? ")"
//! TypeName           := "int" | "float" | "string" | "bool" | "nothing" | Id
//! ```
use super::{Position, Token};
use crate::arena::{BumpaloArena, BumpaloVec};
use crate::semantic::{Context, Prototype, Symbol, TypeTag};
use std::cell::Cell;
use std::fmt;

#[derive(Debug, Default)]
pub struct Ast {
    arena: BumpaloArena,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &BumpaloArena {
        &self.arena
    }

    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, val: T) -> &mut T {
        self.arena.alloc(val)
    }

    pub fn alloc_str(&self, s: &str) -> &str {
        self.arena.alloc_str(s)
    }
}

/// A set-once annotation filled in by semantic analysis.
#[derive(Debug)]
pub struct Slot<T: Copy>(Cell<Option<T>>);

impl<T: Copy> Slot<T> {
    pub fn get(&self) -> Option<T> {
        self.0.get()
    }

    /// Stores `value` unless the slot is already filled, in which case the
    /// existing value is returned as the error.
    pub fn assign(&self, value: T) -> Result<(), T> {
        if let Some(existing) = self.0.get() {
            return Err(existing);
        }

        self.0.set(Some(value));
        Ok(())
    }

    pub(crate) fn clear(&self) {
        self.0.set(None);
    }
}

impl<T: Copy> Default for Slot<T> {
    fn default() -> Self {
        Self(Cell::new(None))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    token: Token<'a>,
}

impl<'a> Identifier<'a> {
    pub fn new(token: Token<'a>) -> Self {
        Self { token }
    }

    pub fn name(&self) -> &'a str {
        self.token.raw
    }

    pub fn position(&self) -> Position<'a> {
        self.token.position
    }
}

impl fmt::Display for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeName<'a> {
    token: Token<'a>,
}

impl<'a> TypeName<'a> {
    pub fn new(token: Token<'a>) -> Self {
        Self { token }
    }

    pub fn token(&self) -> Token<'a> {
        self.token
    }

    pub fn position(&self) -> Position<'a> {
        self.token.position
    }

    /// Returns `None` when the token cannot name a type.
    pub fn type_tag(&self) -> Option<TypeTag<'a>> {
        self.token.type_tag()
    }
}

impl fmt::Display for TypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.raw)
    }
}

/// The translation unit. Opens the root context.
#[derive(Debug)]
pub struct Program<'a> {
    file: &'a str,
    items: BumpaloVec<'a, ProgramItem<'a>>,
    context: Slot<&'a Context<'a>>,
}

impl<'a> Program<'a> {
    pub fn new<I: IntoIterator<Item = ProgramItem<'a>>>(
        tree: &'a Ast,
        file: &'a str,
        items: I,
    ) -> Self {
        Self {
            file,
            items: BumpaloVec::from_iter_in(items, tree.arena()),
            context: Slot::default(),
        }
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn items(&self) -> impl ExactSizeIterator<Item = ProgramItem<'a>> + '_ {
        self.items.iter().copied()
    }

    pub fn context(&self) -> Option<&'a Context<'a>> {
        self.context.get()
    }

    pub fn assign_context(&self, context: &'a Context<'a>) -> Result<(), &'a Context<'a>> {
        self.context.assign(context)
    }

    pub(crate) fn clear_annotations(&self) {
        self.context.clear();
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ProgramItem<'a> {
    Import(&'a ImportStatement<'a>),
    Data(&'a DataDefinition<'a>),
    Function(&'a FunctionDefinition<'a>),
    Start(&'a StartBlock<'a>),
}

#[derive(Debug)]
pub struct ImportStatement<'a> {
    keyword: Token<'a>,
    path: &'a str,
}

impl<'a> ImportStatement<'a> {
    pub fn new(keyword: Token<'a>, path: &'a str) -> Self {
        Self { keyword, path }
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }
}

#[derive(Debug)]
pub struct StartBlock<'a> {
    keyword: Token<'a>,
    body: &'a Block<'a>,
}

impl<'a> StartBlock<'a> {
    pub fn new(keyword: Token<'a>, body: &'a Block<'a>) -> Self {
        Self { keyword, body }
    }

    pub fn body(&self) -> &'a Block<'a> {
        self.body
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }
}

#[derive(Debug)]
pub struct DataDeclaration<'a> {
    is_const: bool,
    type_name: TypeName<'a>,
    name: Identifier<'a>,
    symbol: Slot<&'a Symbol<'a>>,
}

impl<'a> DataDeclaration<'a> {
    pub fn new(is_const: bool, type_name: TypeName<'a>, name: Identifier<'a>) -> Self {
        Self {
            is_const,
            type_name,
            name,
            symbol: Slot::default(),
        }
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn type_name(&self) -> TypeName<'a> {
        self.type_name
    }

    pub fn name(&self) -> Identifier<'a> {
        self.name
    }

    /// The symbol this declaration bound. `None` when binding was refused.
    pub fn symbol(&self) -> Option<&'a Symbol<'a>> {
        self.symbol.get()
    }

    pub fn assign_symbol(&self, symbol: &'a Symbol<'a>) -> Result<(), &'a Symbol<'a>> {
        self.symbol.assign(symbol)
    }

    pub(crate) fn clear_annotations(&self) {
        self.symbol.clear();
    }
}

impl fmt::Display for DataDeclaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{} {}", self.type_name, self.name)
    }
}

#[derive(Debug)]
pub struct DataDefinition<'a> {
    declaration: &'a DataDeclaration<'a>,
    initializer: Option<&'a Expression<'a>>,
}

impl<'a> DataDefinition<'a> {
    pub fn new(declaration: &'a DataDeclaration<'a>, initializer: Option<&'a Expression<'a>>) -> Self {
        Self {
            declaration,
            initializer,
        }
    }

    pub fn declaration(&self) -> &'a DataDeclaration<'a> {
        self.declaration
    }

    pub fn initializer(&self) -> Option<&'a Expression<'a>> {
        self.initializer
    }
}

/// A function definition opens its own context for the parameters. The body
/// block opens another one nested inside it.
#[derive(Debug)]
pub struct FunctionDefinition<'a> {
    is_iterator: bool,
    return_type: TypeName<'a>,
    name: Identifier<'a>,
    parameters: BumpaloVec<'a, &'a DataDeclaration<'a>>,
    body: &'a Block<'a>,
    context: Slot<&'a Context<'a>>,
    prototype: Slot<&'a Prototype<'a>>,
    symbol: Slot<&'a Symbol<'a>>,
}

impl<'a> FunctionDefinition<'a> {
    pub fn new<I: IntoIterator<Item = &'a DataDeclaration<'a>>>(
        tree: &'a Ast,
        is_iterator: bool,
        return_type: TypeName<'a>,
        name: Identifier<'a>,
        parameters: I,
        body: &'a Block<'a>,
    ) -> Self {
        Self {
            is_iterator,
            return_type,
            name,
            parameters: BumpaloVec::from_iter_in(parameters, tree.arena()),
            body,
            context: Slot::default(),
            prototype: Slot::default(),
            symbol: Slot::default(),
        }
    }

    pub fn is_iterator(&self) -> bool {
        self.is_iterator
    }

    pub fn return_type(&self) -> TypeName<'a> {
        self.return_type
    }

    pub fn name(&self) -> Identifier<'a> {
        self.name
    }

    pub fn parameters(&self) -> impl ExactSizeIterator<Item = &'a DataDeclaration<'a>> + '_ {
        self.parameters.iter().copied()
    }

    pub fn body(&self) -> &'a Block<'a> {
        self.body
    }

    pub fn context(&self) -> Option<&'a Context<'a>> {
        self.context.get()
    }

    pub fn assign_context(&self, context: &'a Context<'a>) -> Result<(), &'a Context<'a>> {
        self.context.assign(context)
    }

    pub fn prototype(&self) -> Option<&'a Prototype<'a>> {
        self.prototype.get()
    }

    pub fn assign_prototype(&self, prototype: &'a Prototype<'a>) -> Result<(), &'a Prototype<'a>> {
        self.prototype.assign(prototype)
    }

    /// Known once the parameter list has been analyzed.
    pub fn arity(&self) -> Option<usize> {
        self.prototype().map(|p| p.arity())
    }

    pub fn symbol(&self) -> Option<&'a Symbol<'a>> {
        self.symbol.get()
    }

    pub fn assign_symbol(&self, symbol: &'a Symbol<'a>) -> Result<(), &'a Symbol<'a>> {
        self.symbol.assign(symbol)
    }

    pub(crate) fn clear_annotations(&self) {
        self.context.clear();
        self.prototype.clear();
        self.symbol.clear();
    }
}

#[derive(Debug)]
pub struct Block<'a> {
    open: Token<'a>,
    statements: BumpaloVec<'a, Statement<'a>>,
    context: Slot<&'a Context<'a>>,
}

impl<'a> Block<'a> {
    pub fn new<I: IntoIterator<Item = Statement<'a>>>(
        tree: &'a Ast,
        open: Token<'a>,
        statements: I,
    ) -> Self {
        Self {
            open,
            statements: BumpaloVec::from_iter_in(statements, tree.arena()),
            context: Slot::default(),
        }
    }

    pub fn statements(&self) -> impl ExactSizeIterator<Item = Statement<'a>> + '_ {
        self.statements.iter().copied()
    }

    pub fn position(&self) -> Position<'a> {
        self.open.position
    }

    pub fn context(&self) -> Option<&'a Context<'a>> {
        self.context.get()
    }

    pub fn assign_context(&self, context: &'a Context<'a>) -> Result<(), &'a Context<'a>> {
        self.context.assign(context)
    }

    pub(crate) fn clear_annotations(&self) {
        self.context.clear();
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Data(&'a DataDefinition<'a>),
    Assignment(&'a Assignment<'a>),
    Expression(&'a Expression<'a>),
    If(&'a IfStatement<'a>),
    While(&'a WhileStatement<'a>),
    Do(&'a DoStatement<'a>),
    Return(&'a ReturnStatement<'a>),
    Break(Token<'a>),
    Continue(Token<'a>),
    Yield(&'a YieldStatement<'a>),
    Inline(&'a InlineStatement<'a>),
    Block(&'a Block<'a>),
}

#[derive(Debug)]
pub struct Assignment<'a> {
    target: Identifier<'a>,
    value: &'a Expression<'a>,
    symbol: Slot<&'a Symbol<'a>>,
}

impl<'a> Assignment<'a> {
    pub fn new(target: Identifier<'a>, value: &'a Expression<'a>) -> Self {
        Self {
            target,
            value,
            symbol: Slot::default(),
        }
    }

    pub fn target(&self) -> Identifier<'a> {
        self.target
    }

    pub fn value(&self) -> &'a Expression<'a> {
        self.value
    }

    pub fn symbol(&self) -> Option<&'a Symbol<'a>> {
        self.symbol.get()
    }

    pub fn assign_symbol(&self, symbol: &'a Symbol<'a>) -> Result<(), &'a Symbol<'a>> {
        self.symbol.assign(symbol)
    }

    pub(crate) fn clear_annotations(&self) {
        self.symbol.clear();
    }
}

#[derive(Debug)]
pub struct IfStatement<'a> {
    keyword: Token<'a>,
    condition: &'a Expression<'a>,
    then_block: &'a Block<'a>,
    else_branch: Option<ElseBranch<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ElseBranch<'a> {
    If(&'a IfStatement<'a>),
    Block(&'a Block<'a>),
}

impl<'a> IfStatement<'a> {
    pub fn new(
        keyword: Token<'a>,
        condition: &'a Expression<'a>,
        then_block: &'a Block<'a>,
        else_branch: Option<ElseBranch<'a>>,
    ) -> Self {
        Self {
            keyword,
            condition,
            then_block,
            else_branch,
        }
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }

    pub fn condition(&self) -> &'a Expression<'a> {
        self.condition
    }

    pub fn then_block(&self) -> &'a Block<'a> {
        self.then_block
    }

    pub fn else_branch(&self) -> Option<ElseBranch<'a>> {
        self.else_branch
    }
}

#[derive(Debug)]
pub struct WhileStatement<'a> {
    keyword: Token<'a>,
    condition: Option<&'a Expression<'a>>,
    body: &'a Block<'a>,
}

impl<'a> WhileStatement<'a> {
    pub fn new(
        keyword: Token<'a>,
        condition: Option<&'a Expression<'a>>,
        body: &'a Block<'a>,
    ) -> Self {
        Self {
            keyword,
            condition,
            body,
        }
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }

    /// A loop without a condition runs until `break`.
    pub fn condition(&self) -> Option<&'a Expression<'a>> {
        self.condition
    }

    pub fn body(&self) -> &'a Block<'a> {
        self.body
    }
}

#[derive(Debug)]
pub struct DoStatement<'a> {
    keyword: Token<'a>,
    body: &'a Block<'a>,
    condition: Option<&'a Expression<'a>>,
}

impl<'a> DoStatement<'a> {
    pub fn new(
        keyword: Token<'a>,
        body: &'a Block<'a>,
        condition: Option<&'a Expression<'a>>,
    ) -> Self {
        Self {
            keyword,
            body,
            condition,
        }
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }

    pub fn body(&self) -> &'a Block<'a> {
        self.body
    }

    pub fn condition(&self) -> Option<&'a Expression<'a>> {
        self.condition
    }
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    keyword: Token<'a>,
    value: Option<&'a Expression<'a>>,
}

impl<'a> ReturnStatement<'a> {
    pub fn new(keyword: Token<'a>, value: Option<&'a Expression<'a>>) -> Self {
        Self { keyword, value }
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }

    pub fn value(&self) -> Option<&'a Expression<'a>> {
        self.value
    }
}

#[derive(Debug)]
pub struct YieldStatement<'a> {
    keyword: Token<'a>,
    value: Option<&'a Expression<'a>>,
}

impl<'a> YieldStatement<'a> {
    pub fn new(keyword: Token<'a>, value: Option<&'a Expression<'a>>) -> Self {
        Self { keyword, value }
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }

    pub fn value(&self) -> Option<&'a Expression<'a>> {
        self.value
    }
}

/// Target-language text copied verbatim into the generated output.
#[derive(Debug)]
pub struct InlineStatement<'a> {
    keyword: Token<'a>,
    text: &'a str,
}

impl<'a> InlineStatement<'a> {
    pub fn new(keyword: Token<'a>, text: &'a str) -> Self {
        Self { keyword, text }
    }

    pub fn position(&self) -> Position<'a> {
        self.keyword.position
    }

    pub fn text(&self) -> &'a str {
        self.text
    }
}

#[derive(Debug)]
pub struct Expression<'a> {
    kind: ExpressionKind<'a>,
    r#type: Slot<TypeTag<'a>>,
}

impl<'a> Expression<'a> {
    pub fn new(kind: ExpressionKind<'a>) -> Self {
        Self {
            kind,
            r#type: Slot::default(),
        }
    }

    /// Literals arrive from the front end with their type already known.
    pub fn literal(token: Token<'a>, r#type: TypeTag<'a>) -> Self {
        Self {
            kind: ExpressionKind::Literal(token),
            r#type: Slot(Cell::new(Some(r#type))),
        }
    }

    pub fn kind(&self) -> &ExpressionKind<'a> {
        &self.kind
    }

    pub fn r#type(&self) -> Option<TypeTag<'a>> {
        self.r#type.get()
    }

    pub fn assign_type(&self, r#type: TypeTag<'a>) -> Result<(), TypeTag<'a>> {
        self.r#type.assign(r#type)
    }

    /// Literal types belong to the front end and are kept.
    pub(crate) fn clear_annotations(&self) {
        if !matches!(self.kind, ExpressionKind::Literal(_)) {
            self.r#type.clear();
        }
    }

    pub fn position(&self) -> Position<'a> {
        match self.kind {
            ExpressionKind::Literal(token) => token.position,
            ExpressionKind::Variable(expr) => expr.name().position(),
            ExpressionKind::Call(expr) => expr.callee().position(),
            ExpressionKind::Binary(expr) => expr.operator_token().position,
            ExpressionKind::Unary(expr) => expr.operator_token().position,
            ExpressionKind::Cast(expr) => expr.type_name().position(),
            ExpressionKind::Grouped(expr) => expr.position(),
            ExpressionKind::Format(expr) => expr.token().position,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ExpressionKind<'a> {
    Literal(Token<'a>),
    Variable(&'a VariableExpression<'a>),
    Call(&'a CallExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Unary(&'a UnaryExpression<'a>),
    Cast(&'a CastExpression<'a>),
    Grouped(&'a Expression<'a>),
    Format(&'a FormatString<'a>),
}

#[derive(Debug)]
pub struct VariableExpression<'a> {
    name: Identifier<'a>,
    symbol: Slot<&'a Symbol<'a>>,
}

impl<'a> VariableExpression<'a> {
    pub fn new(name: Identifier<'a>) -> Self {
        Self {
            name,
            symbol: Slot::default(),
        }
    }

    pub fn name(&self) -> Identifier<'a> {
        self.name
    }

    pub fn symbol(&self) -> Option<&'a Symbol<'a>> {
        self.symbol.get()
    }

    pub fn assign_symbol(&self, symbol: &'a Symbol<'a>) -> Result<(), &'a Symbol<'a>> {
        self.symbol.assign(symbol)
    }

    pub(crate) fn clear_annotations(&self) {
        self.symbol.clear();
    }
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    callee: Identifier<'a>,
    arguments: BumpaloVec<'a, &'a Expression<'a>>,
    symbol: Slot<&'a Symbol<'a>>,
}

impl<'a> CallExpression<'a> {
    pub fn new<I: IntoIterator<Item = &'a Expression<'a>>>(
        tree: &'a Ast,
        callee: Identifier<'a>,
        arguments: I,
    ) -> Self {
        Self {
            callee,
            arguments: BumpaloVec::from_iter_in(arguments, tree.arena()),
            symbol: Slot::default(),
        }
    }

    pub fn callee(&self) -> Identifier<'a> {
        self.callee
    }

    pub fn arguments(&self) -> impl ExactSizeIterator<Item = &'a Expression<'a>> + '_ {
        self.arguments.iter().copied()
    }

    pub fn symbol(&self) -> Option<&'a Symbol<'a>> {
        self.symbol.get()
    }

    pub fn assign_symbol(&self, symbol: &'a Symbol<'a>) -> Result<(), &'a Symbol<'a>> {
        self.symbol.assign(symbol)
    }

    pub(crate) fn clear_annotations(&self) {
        self.symbol.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinaryOperator {
    pub fn variants() -> impl Iterator<Item = BinaryOperator> {
        [
            Self::Add,
            Self::Sub,
            Self::Mul,
            Self::Div,
            Self::Mod,
            Self::Pow,
            Self::Lt,
            Self::Gt,
            Self::Le,
            Self::Ge,
            Self::Eq,
            Self::Ne,
            Self::And,
            Self::Or,
        ]
        .iter()
        .copied()
    }

    /// Comparison and logical operators always produce a boolean.
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            Self::Lt | Self::Gt | Self::Le | Self::Ge | Self::Eq | Self::Ne | Self::And | Self::Or
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Sub => write!(f, "-"),
            BinaryOperator::Mul => write!(f, "*"),
            BinaryOperator::Div => write!(f, "/"),
            BinaryOperator::Mod => write!(f, "%"),
            BinaryOperator::Pow => write!(f, "^"),
            BinaryOperator::Lt => write!(f, "<"),
            BinaryOperator::Gt => write!(f, ">"),
            BinaryOperator::Le => write!(f, "<="),
            BinaryOperator::Ge => write!(f, ">="),
            BinaryOperator::Eq => write!(f, "=="),
            BinaryOperator::Ne => write!(f, "!="),
            BinaryOperator::And => write!(f, "and"),
            BinaryOperator::Or => write!(f, "or"),
        }
    }
}

impl std::str::FromStr for BinaryOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .find(|x| x.to_string() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    operator: BinaryOperator,
    operator_token: Token<'a>,
    lhs: &'a Expression<'a>,
    rhs: &'a Expression<'a>,
}

impl<'a> BinaryExpression<'a> {
    pub fn new(
        operator: BinaryOperator,
        operator_token: Token<'a>,
        lhs: &'a Expression<'a>,
        rhs: &'a Expression<'a>,
    ) -> Self {
        Self {
            operator,
            operator_token,
            lhs,
            rhs,
        }
    }

    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }

    pub fn operator_token(&self) -> Token<'a> {
        self.operator_token
    }

    pub fn lhs(&self) -> &'a Expression<'a> {
        self.lhs
    }

    pub fn rhs(&self) -> &'a Expression<'a> {
        self.rhs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Not,
}

impl UnaryOperator {
    pub fn variants() -> impl Iterator<Item = UnaryOperator> {
        [Self::Minus, Self::Not].iter().copied()
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Minus => write!(f, "-"),
            UnaryOperator::Not => write!(f, "not"),
        }
    }
}

impl std::str::FromStr for UnaryOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .find(|x| x.to_string() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug)]
pub struct UnaryExpression<'a> {
    operator: UnaryOperator,
    operator_token: Token<'a>,
    operand: &'a Expression<'a>,
}

impl<'a> UnaryExpression<'a> {
    pub fn new(
        operator: UnaryOperator,
        operator_token: Token<'a>,
        operand: &'a Expression<'a>,
    ) -> Self {
        Self {
            operator,
            operator_token,
            operand,
        }
    }

    pub fn operator(&self) -> UnaryOperator {
        self.operator
    }

    pub fn operator_token(&self) -> Token<'a> {
        self.operator_token
    }

    pub fn operand(&self) -> &'a Expression<'a> {
        self.operand
    }
}

#[derive(Debug)]
pub struct CastExpression<'a> {
    type_name: TypeName<'a>,
    operand: &'a Expression<'a>,
}

impl<'a> CastExpression<'a> {
    pub fn new(type_name: TypeName<'a>, operand: &'a Expression<'a>) -> Self {
        Self { type_name, operand }
    }

    pub fn type_name(&self) -> TypeName<'a> {
        self.type_name
    }

    pub fn operand(&self) -> &'a Expression<'a> {
        self.operand
    }
}

/// A string literal followed by the values substituted into it.
#[derive(Debug)]
pub struct FormatString<'a> {
    token: Token<'a>,
    arguments: BumpaloVec<'a, &'a Expression<'a>>,
}

impl<'a> FormatString<'a> {
    pub fn new<I: IntoIterator<Item = &'a Expression<'a>>>(
        tree: &'a Ast,
        token: Token<'a>,
        arguments: I,
    ) -> Self {
        Self {
            token,
            arguments: BumpaloVec::from_iter_in(arguments, tree.arena()),
        }
    }

    pub fn token(&self) -> Token<'a> {
        self.token
    }

    pub fn arguments(&self) -> impl ExactSizeIterator<Item = &'a Expression<'a>> + '_ {
        self.arguments.iter().copied()
    }
}
