//! JSON encoding of a parsed program.
//!
//! A front end hands the analyzer a document such as
//!
//! ```json
//! { "file": "fib.dk", "items": [
//!     { "item": "function", "returns": "int", "name": "fib", "at": [1, 1],
//!       "parameters": [ { "type": "int", "name": "n", "at": [1, 9] } ],
//!       "body": [
//!         { "stmt": "return", "at": [2, 5],
//!           "value": { "expr": "call", "name": "fib", "at": [2, 12], "args": [
//!             { "expr": "binary", "op": "-", "at": [2, 18],
//!               "lhs": { "expr": "var", "name": "n", "at": [2, 16] },
//!               "rhs": { "expr": "literal", "type": "int", "value": "1", "at": [2, 20] } } ] } } ] } ] }
//! ```
//!
//! Positions are `[line, column]` pairs. The `at` of a declaration or a
//! function is its first token, the `const` or `iterator` keyword when one
//! is present. An optional `name_at` gives the identifier's own position.
//! Literals carry the type the front end assigned to them.
use super::tree::*;
use super::{AstBuilder, TokenKind};
use crate::semantic::TypeTag;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unknown operator: `{0}`")]
    UnknownOperator(String),

    #[error("literal of type `{0}` is not supported")]
    UnsupportedLiteral(String),

    #[error("else branch at {0}:{1} must be an `if` statement or a block")]
    InvalidElseBranch(u32, u32),
}

type At = (u32, u32);

#[derive(Debug, Deserialize)]
struct ProgramDocument {
    file: String,
    #[serde(default)]
    items: Vec<ItemDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
enum ItemDocument {
    Import {
        path: String,
        at: At,
    },
    Data(DeclarationDocument),
    Function {
        #[serde(default)]
        iterator: bool,
        returns: String,
        name: String,
        at: At,
        #[serde(default)]
        name_at: Option<At>,
        #[serde(default)]
        parameters: Vec<DeclarationDocument>,
        body: Vec<StatementDocument>,
    },
    Start {
        at: At,
        body: Vec<StatementDocument>,
    },
}

#[derive(Debug, Deserialize)]
struct DeclarationDocument {
    #[serde(rename = "const", default)]
    is_const: bool,
    #[serde(rename = "type")]
    type_name: String,
    name: String,
    at: At,
    #[serde(default)]
    name_at: Option<At>,
    #[serde(default)]
    init: Option<ExpressionDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
enum StatementDocument {
    Data(DeclarationDocument),
    Assign {
        name: String,
        at: At,
        value: ExpressionDocument,
    },
    Expr {
        value: ExpressionDocument,
    },
    If {
        at: At,
        cond: ExpressionDocument,
        then: Vec<StatementDocument>,
        #[serde(rename = "else", default)]
        else_branch: Option<Box<StatementDocument>>,
    },
    While {
        at: At,
        #[serde(default)]
        cond: Option<ExpressionDocument>,
        body: Vec<StatementDocument>,
    },
    Do {
        at: At,
        body: Vec<StatementDocument>,
        #[serde(default)]
        cond: Option<ExpressionDocument>,
    },
    Return {
        at: At,
        #[serde(default)]
        value: Option<ExpressionDocument>,
    },
    Yield {
        at: At,
        #[serde(default)]
        value: Option<ExpressionDocument>,
    },
    Break {
        at: At,
    },
    Continue {
        at: At,
    },
    Inline {
        at: At,
        text: String,
    },
    Block {
        at: At,
        body: Vec<StatementDocument>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
enum ExpressionDocument {
    Literal {
        #[serde(rename = "type")]
        type_name: String,
        value: String,
        at: At,
    },
    Var {
        name: String,
        at: At,
    },
    Call {
        name: String,
        at: At,
        #[serde(default)]
        args: Vec<ExpressionDocument>,
    },
    Binary {
        op: String,
        at: At,
        lhs: Box<ExpressionDocument>,
        rhs: Box<ExpressionDocument>,
    },
    Unary {
        op: String,
        at: At,
        operand: Box<ExpressionDocument>,
    },
    Cast {
        #[serde(rename = "type")]
        type_name: String,
        at: At,
        operand: Box<ExpressionDocument>,
    },
    Group {
        value: Box<ExpressionDocument>,
    },
    Format {
        text: String,
        at: At,
        #[serde(default)]
        args: Vec<ExpressionDocument>,
    },
}

/// Parses a JSON document and builds its tree in `tree`.
pub fn load_program<'a>(tree: &'a Ast, source: &str) -> Result<&'a Program<'a>, DocumentError> {
    let document: ProgramDocument = serde_json::from_str(source)?;
    let lowering = Lowering {
        builder: AstBuilder::new(tree, &document.file),
    };

    lowering.program(&document)
}

struct Lowering<'a> {
    builder: AstBuilder<'a>,
}

impl<'a> Lowering<'a> {
    fn at(&self, at: At) -> &AstBuilder<'a> {
        self.builder.at(at.0, at.1)
    }

    fn program(&self, document: &ProgramDocument) -> Result<&'a Program<'a>, DocumentError> {
        let mut items = Vec::with_capacity(document.items.len());

        for item in &document.items {
            items.push(self.item(item)?);
        }

        Ok(self.builder.program(items))
    }

    fn item(&self, item: &ItemDocument) -> Result<ProgramItem<'a>, DocumentError> {
        let item = match item {
            ItemDocument::Import { path, at } => ProgramItem::Import(self.at(*at).import(path)),
            ItemDocument::Data(data) => ProgramItem::Data(self.data(data)?),
            ItemDocument::Function {
                iterator,
                returns,
                name,
                at,
                name_at,
                parameters,
                body,
            } => {
                let tree = self.builder.tree();
                if *iterator {
                    self.at(*at).keyword(TokenKind::Iterator);
                } else {
                    self.at(*at);
                }
                let return_type = self.builder.type_name(returns);
                let name = self.identifier(name, *name_at);

                let mut params = Vec::with_capacity(parameters.len());
                for param in parameters {
                    params.push(self.declaration(param));
                }

                let body = self.block(*at, body)?;
                let fun = tree.alloc(FunctionDefinition::new(
                    tree,
                    *iterator,
                    return_type,
                    name,
                    params,
                    body,
                ));

                ProgramItem::Function(fun)
            }
            ItemDocument::Start { at, body } => {
                let body = self.block(*at, body)?;
                ProgramItem::Start(self.at(*at).start(body))
            }
        };

        Ok(item)
    }

    fn declaration(&self, document: &DeclarationDocument) -> &'a DataDeclaration<'a> {
        if document.is_const {
            self.at(document.at).keyword(TokenKind::Const);
        } else {
            self.at(document.at);
        }
        let type_name = self.builder.type_name(&document.type_name);
        let name = self.identifier(&document.name, document.name_at);

        self.builder
            .tree()
            .alloc(DataDeclaration::new(document.is_const, type_name, name))
    }

    /// Without `name_at` the identifier is taken to follow the type name
    /// after a single space.
    fn identifier(&self, name: &str, at: Option<At>) -> Identifier<'a> {
        match at {
            Some(at) => self.at(at).identifier(name),
            None => self.builder.identifier(name),
        }
    }

    fn data(&self, document: &DeclarationDocument) -> Result<&'a DataDefinition<'a>, DocumentError> {
        let declaration = self.declaration(document);
        let init = match &document.init {
            Some(expr) => Some(self.expression(expr)?),
            None => None,
        };

        Ok(self.builder.data(declaration, init))
    }

    fn block(&self, at: At, statements: &[StatementDocument]) -> Result<&'a Block<'a>, DocumentError> {
        let mut body = Vec::with_capacity(statements.len());

        for stmt in statements {
            body.push(self.statement(stmt)?);
        }

        Ok(self.at(at).block(body))
    }

    fn statement(&self, stmt: &StatementDocument) -> Result<Statement<'a>, DocumentError> {
        let stmt = match stmt {
            StatementDocument::Data(data) => Statement::Data(self.data(data)?),
            StatementDocument::Assign { name, at, value } => {
                let value = self.expression(value)?;
                self.at(*at).assign(name, value)
            }
            StatementDocument::Expr { value } => Statement::Expression(self.expression(value)?),
            StatementDocument::If {
                at,
                cond,
                then,
                else_branch,
            } => Statement::If(self.if_stmt(*at, cond, then, else_branch)?),
            StatementDocument::While { at, cond, body } => {
                let cond = self.optional_expression(cond)?;
                let body = self.block(*at, body)?;
                self.at(*at).while_loop(cond, body)
            }
            StatementDocument::Do { at, body, cond } => {
                let body = self.block(*at, body)?;
                let cond = self.optional_expression(cond)?;
                self.at(*at).do_loop(body, cond)
            }
            StatementDocument::Return { at, value } => {
                let value = self.optional_expression(value)?;
                self.at(*at).ret(value)
            }
            StatementDocument::Yield { at, value } => {
                let value = self.optional_expression(value)?;
                self.at(*at).yield_value(value)
            }
            StatementDocument::Break { at } => self.at(*at).brk(),
            StatementDocument::Continue { at } => self.at(*at).cont(),
            StatementDocument::Inline { at, text } => self.at(*at).inline(text),
            StatementDocument::Block { at, body } => Statement::Block(self.block(*at, body)?),
        };

        Ok(stmt)
    }

    fn if_stmt(
        &self,
        at: At,
        cond: &ExpressionDocument,
        then: &[StatementDocument],
        else_branch: &Option<Box<StatementDocument>>,
    ) -> Result<&'a IfStatement<'a>, DocumentError> {
        let cond = self.expression(cond)?;
        let then = self.block(at, then)?;
        let else_branch = match else_branch.as_deref() {
            None => None,
            Some(StatementDocument::If {
                at,
                cond,
                then,
                else_branch,
            }) => Some(ElseBranch::If(self.if_stmt(*at, cond, then, else_branch)?)),
            Some(StatementDocument::Block { at, body }) => {
                Some(ElseBranch::Block(self.block(*at, body)?))
            }
            Some(_) => return Err(DocumentError::InvalidElseBranch(at.0, at.1)),
        };

        Ok(self.at(at).if_stmt(cond, then, else_branch))
    }

    fn optional_expression(
        &self,
        expr: &Option<ExpressionDocument>,
    ) -> Result<Option<&'a Expression<'a>>, DocumentError> {
        match expr {
            Some(expr) => Ok(Some(self.expression(expr)?)),
            None => Ok(None),
        }
    }

    fn expressions(&self, exprs: &[ExpressionDocument]) -> Result<Vec<&'a Expression<'a>>, DocumentError> {
        exprs.iter().map(|expr| self.expression(expr)).collect()
    }

    fn expression(&self, expr: &ExpressionDocument) -> Result<&'a Expression<'a>, DocumentError> {
        let expr = match expr {
            ExpressionDocument::Literal {
                type_name,
                value,
                at,
            } => {
                let (kind, r#type) = literal_kind(type_name)?;
                self.at(*at).literal(kind, value, r#type)
            }
            ExpressionDocument::Var { name, at } => self.at(*at).variable(name),
            ExpressionDocument::Call { name, at, args } => {
                let args = self.expressions(args)?;
                self.at(*at).call(name, args)
            }
            ExpressionDocument::Binary { op, at, lhs, rhs } => {
                let operator = op
                    .parse::<BinaryOperator>()
                    .map_err(DocumentError::UnknownOperator)?;
                let lhs = self.expression(lhs)?;
                let rhs = self.expression(rhs)?;
                self.at(*at).binary(operator, lhs, rhs)
            }
            ExpressionDocument::Unary { op, at, operand } => {
                let operator = op
                    .parse::<UnaryOperator>()
                    .map_err(DocumentError::UnknownOperator)?;
                let operand = self.expression(operand)?;
                self.at(*at).unary(operator, operand)
            }
            ExpressionDocument::Cast {
                type_name,
                at,
                operand,
            } => {
                let operand = self.expression(operand)?;
                self.at(*at).cast(type_name, operand)
            }
            ExpressionDocument::Group { value } => {
                let inner = self.expression(value)?;
                self.builder.group(inner)
            }
            ExpressionDocument::Format { text, at, args } => {
                let args = self.expressions(args)?;
                self.at(*at).format(text, args)
            }
        };

        Ok(expr)
    }
}

fn literal_kind(type_name: &str) -> Result<(TokenKind, TypeTag<'static>), DocumentError> {
    match type_name {
        "int" => Ok((TokenKind::IntegerLiteral, TypeTag::Integer)),
        "float" => Ok((TokenKind::FloatLiteral, TypeTag::Float)),
        "string" => Ok((TokenKind::StringLiteral, TypeTag::String)),
        "bool" => Ok((TokenKind::BoolLiteral, TypeTag::Bool)),
        _ => Err(DocumentError::UnsupportedLiteral(type_name.to_string())),
    }
}
