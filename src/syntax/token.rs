use crate::semantic::TypeTag;
use serde::Serialize;
use std::fmt;

/// A location in the source file. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
}

impl<'a> Position<'a> {
    pub fn new(file: &'a str, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }
}

impl fmt::Display for Position<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Type names
    IntegerType,
    FloatType,
    StringType,
    BoolType,
    NothingType,

    Identifier,

    // Literals
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    BoolLiteral,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Not,
    Assign,

    // Keywords
    Const,
    Iterator,
    Import,
    Start,
    Inline,
    Return,
    Break,
    Continue,
    Yield,
    If,
    Else,
    While,
    Do,
    LeftBrace,
}

impl TokenKind {
    /// Returns the keyword kind for a primitive type name.
    pub fn from_type_name(name: &str) -> Option<TokenKind> {
        match name {
            "int" => Some(TokenKind::IntegerType),
            "float" => Some(TokenKind::FloatType),
            "string" => Some(TokenKind::StringType),
            "bool" => Some(TokenKind::BoolType),
            "nothing" => Some(TokenKind::NothingType),
            _ => None,
        }
    }

    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerType
                | TokenKind::FloatType
                | TokenKind::StringType
                | TokenKind::BoolType
                | TokenKind::NothingType
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::IntegerType => "int",
            TokenKind::FloatType => "float",
            TokenKind::StringType => "string",
            TokenKind::BoolType => "bool",
            TokenKind::NothingType => "nothing",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::BoolLiteral => "boolean literal",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::Eq => "==",
            TokenKind::Ne => "!=",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Assign => "=",
            TokenKind::Const => "const",
            TokenKind::Iterator => "iterator",
            TokenKind::Import => "import",
            TokenKind::Start => "start",
            TokenKind::Inline => "inline",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Yield => "yield",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::LeftBrace => "{",
        };

        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub raw: &'a str,
    pub position: Position<'a>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, raw: &'a str, position: Position<'a>) -> Self {
        Self {
            kind,
            raw,
            position,
        }
    }

    /// Maps a type-name token to its type. An identifier in type position
    /// names a user struct.
    pub fn type_tag(&self) -> Option<TypeTag<'a>> {
        match self.kind {
            TokenKind::IntegerType => Some(TypeTag::Integer),
            TokenKind::FloatType => Some(TypeTag::Float),
            TokenKind::StringType => Some(TypeTag::String),
            TokenKind::BoolType => Some(TypeTag::Bool),
            TokenKind::NothingType => Some(TypeTag::Nothing),
            TokenKind::Identifier => Some(TypeTag::Struct(self.raw)),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
