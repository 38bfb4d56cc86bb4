use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag<'a> {
    Integer,
    Float,
    String,
    Bool,
    Nothing,
    /// A user-defined struct, identified by name only.
    Struct(&'a str),
}

impl<'a> TypeTag<'a> {
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Integer | TypeTag::Float)
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, TypeTag::Struct(_))
    }

    /// The word used for this type in diagnostics, e.g. `integer`.
    pub fn name(&self) -> &'a str {
        match self {
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::Bool => "boolean",
            TypeTag::Nothing => "nothing",
            TypeTag::Struct(name) => name,
        }
    }

    /// The type with an indefinite article, e.g. `an integer`.
    pub fn noun(&self) -> Noun<'a> {
        Noun(*self)
    }
}

impl fmt::Display for TypeTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Integer => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Nothing => write!(f, "nothing"),
            TypeTag::Struct(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Noun<'a>(TypeTag<'a>);

impl fmt::Display for Noun<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            TypeTag::Integer => write!(f, "an integer"),
            TypeTag::Nothing => write!(f, "nothing"),
            TypeTag::Struct(name) => write!(f, "a `{}`", name),
            ty => write!(f, "a {}", ty.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_as_keyword() {
        assert_eq!(TypeTag::Integer.to_string(), "int");
        assert_eq!(TypeTag::Bool.to_string(), "bool");
        assert_eq!(TypeTag::Struct("Point").to_string(), "Point");
    }

    #[test]
    fn nouns() {
        assert_eq!(TypeTag::Integer.noun().to_string(), "an integer");
        assert_eq!(TypeTag::Float.noun().to_string(), "a float");
        assert_eq!(TypeTag::Bool.noun().to_string(), "a boolean");
        assert_eq!(TypeTag::Nothing.noun().to_string(), "nothing");
        assert_eq!(TypeTag::Struct("Point").noun().to_string(), "a `Point`");
    }
}
