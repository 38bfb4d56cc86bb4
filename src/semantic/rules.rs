//! The type rules: assignment compatibility, binary and unary operators and
//! explicit casts. Each check is a pure function of the operand types.
use super::diagnostics::{DiagnosticCode, Reportable};
use super::TypeTag;
use crate::syntax::{BinaryOperator, UnaryOperator};
use thiserror::Error;

/// The outcome of a successful check: the resulting type and possibly a
/// warning about the conversion involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checked<'a> {
    pub r#type: TypeTag<'a>,
    pub warning: Option<TypeWarning<'a>>,
}

impl<'a> Checked<'a> {
    fn ok(r#type: TypeTag<'a>) -> Self {
        Self {
            r#type,
            warning: None,
        }
    }

    fn warn(r#type: TypeTag<'a>, warning: TypeWarning<'a>) -> Self {
        Self {
            r#type,
            warning: Some(warning),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TypeError<'a> {
    #[error("cannot assign {} to {}", .value.noun(), .target.noun())]
    IncompatibleAssignment {
        target: TypeTag<'a>,
        value: TypeTag<'a>,
    },

    #[error("function has no return value")]
    NoReturnValue,

    #[error("arithmetic operation `{operator}` not allowed on a string")]
    StringArithmetic { operator: BinaryOperator },

    #[error("arithmetic operation not allowed: {} and {} are incompatible", .lhs.name(), .rhs.name())]
    IncompatibleOperands {
        operator: BinaryOperator,
        lhs: TypeTag<'a>,
        rhs: TypeTag<'a>,
    },

    #[error("unary minus does not make sense with {}", .0.noun())]
    InvalidNegation(TypeTag<'a>),

    #[error("unary not does not make sense with {}", .0.noun())]
    InvalidNot(TypeTag<'a>),

    #[error("cast {} to {} is not allowed", .from.name(), .to.name())]
    InvalidCast { to: TypeTag<'a>, from: TypeTag<'a> },

    #[error("cast to nothing is not allowed")]
    CastToNothing,
}

impl Reportable for TypeError<'_> {
    fn code(&self) -> DiagnosticCode {
        match self {
            TypeError::IncompatibleAssignment { value, .. } if *value == TypeTag::Nothing => {
                DiagnosticCode::NothingValue
            }
            TypeError::IncompatibleAssignment { .. } => DiagnosticCode::IncompatibleAssignment,
            TypeError::NoReturnValue => DiagnosticCode::NothingValue,
            TypeError::StringArithmetic { .. }
            | TypeError::IncompatibleOperands { .. }
            | TypeError::InvalidNegation(_)
            | TypeError::InvalidNot(_) => DiagnosticCode::InvalidOperand,
            TypeError::InvalidCast { .. } | TypeError::CastToNothing => DiagnosticCode::InvalidCast,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TypeWarning<'a> {
    #[error("assigning {} to {} loses resolution", .value.noun(), .target.noun())]
    AssignmentLosesResolution {
        target: TypeTag<'a>,
        value: TypeTag<'a>,
    },

    #[error("assigning {} to a boolean is always true", .0.noun())]
    AssignmentAlwaysTrue(TypeTag<'a>),

    #[error("boolean operation on {} is always true", .0.name())]
    BooleanOperation(TypeTag<'a>),

    #[error("casting {} to {} loses resolution", .from.name(), .to.name())]
    CastLosesResolution { to: TypeTag<'a>, from: TypeTag<'a> },

    #[error("casting {} to boolean is always true", .0.name())]
    CastAlwaysTrue(TypeTag<'a>),
}

impl Reportable for TypeWarning<'_> {
    fn code(&self) -> DiagnosticCode {
        match self {
            TypeWarning::AssignmentLosesResolution { .. } | TypeWarning::CastLosesResolution { .. } => {
                DiagnosticCode::LossyConversion
            }
            TypeWarning::AssignmentAlwaysTrue(_)
            | TypeWarning::BooleanOperation(_)
            | TypeWarning::CastAlwaysTrue(_) => DiagnosticCode::AlwaysTrue,
        }
    }
}

/// Checks storing a `value` into a `target`. The result type is the target's.
pub fn check_assignment<'a>(
    target: TypeTag<'a>,
    value: TypeTag<'a>,
) -> Result<Checked<'a>, TypeError<'a>> {
    let incompatible = TypeError::IncompatibleAssignment { target, value };

    match (target, value) {
        (_, TypeTag::Nothing) | (TypeTag::Nothing, _) => Err(incompatible),
        (TypeTag::Integer, TypeTag::Integer) => Ok(Checked::ok(target)),
        (TypeTag::Integer, TypeTag::Float) => Ok(Checked::warn(
            target,
            TypeWarning::AssignmentLosesResolution { target, value },
        )),
        (TypeTag::Float, TypeTag::Integer) | (TypeTag::Float, TypeTag::Float) => {
            Ok(Checked::ok(target))
        }
        (TypeTag::String, TypeTag::String) => Ok(Checked::ok(target)),
        (TypeTag::Bool, TypeTag::Bool) => Ok(Checked::ok(target)),
        (TypeTag::Bool, TypeTag::Integer) => Ok(Checked::warn(
            target,
            TypeWarning::AssignmentLosesResolution { target, value },
        )),
        (TypeTag::Bool, TypeTag::Float) | (TypeTag::Bool, TypeTag::String) => Ok(Checked::warn(
            target,
            TypeWarning::AssignmentAlwaysTrue(value),
        )),
        (TypeTag::Struct(a), TypeTag::Struct(b)) if a == b => Ok(Checked::ok(target)),
        _ => Err(incompatible),
    }
}

pub fn check_binary<'a>(
    operator: BinaryOperator,
    lhs: TypeTag<'a>,
    rhs: TypeTag<'a>,
) -> Result<Checked<'a>, TypeError<'a>> {
    if lhs == TypeTag::Nothing || rhs == TypeTag::Nothing {
        return Err(TypeError::NoReturnValue);
    }

    if operator.is_boolean() {
        return Ok(Checked::ok(TypeTag::Bool));
    }

    if operator == BinaryOperator::Pow {
        return Ok(Checked::ok(TypeTag::Float));
    }

    if lhs.is_struct() || rhs.is_struct() {
        return Err(TypeError::IncompatibleOperands { operator, lhs, rhs });
    }

    if lhs == TypeTag::String || rhs == TypeTag::String {
        return if operator == BinaryOperator::Add {
            Ok(Checked::ok(TypeTag::String))
        } else {
            Err(TypeError::StringArithmetic { operator })
        };
    }

    promote(operator, lhs, rhs)
}

// Both operands are integer, float or boolean here.
fn promote<'a>(
    operator: BinaryOperator,
    lhs: TypeTag<'a>,
    rhs: TypeTag<'a>,
) -> Result<Checked<'a>, TypeError<'a>> {
    match (lhs, rhs) {
        (TypeTag::Bool, TypeTag::Bool) => Ok(Checked::ok(TypeTag::Bool)),
        (TypeTag::Bool, other) | (other, TypeTag::Bool) if other.is_numeric() => Ok(Checked::warn(
            TypeTag::Bool,
            TypeWarning::BooleanOperation(other),
        )),
        (TypeTag::Integer, TypeTag::Integer) => Ok(Checked::ok(TypeTag::Integer)),
        (TypeTag::Float, TypeTag::Integer)
        | (TypeTag::Integer, TypeTag::Float)
        | (TypeTag::Float, TypeTag::Float) => Ok(Checked::ok(TypeTag::Float)),
        _ => Err(TypeError::IncompatibleOperands { operator, lhs, rhs }),
    }
}

pub fn check_unary<'a>(
    operator: UnaryOperator,
    operand: TypeTag<'a>,
) -> Result<Checked<'a>, TypeError<'a>> {
    match operator {
        UnaryOperator::Minus if operand.is_numeric() => Ok(Checked::ok(operand)),
        UnaryOperator::Minus => Err(TypeError::InvalidNegation(operand)),
        UnaryOperator::Not if operand == TypeTag::Bool => Ok(Checked::ok(operand)),
        UnaryOperator::Not => Err(TypeError::InvalidNot(operand)),
    }
}

/// Checks an explicit conversion of `from` into `to`.
pub fn check_cast<'a>(to: TypeTag<'a>, from: TypeTag<'a>) -> Result<Checked<'a>, TypeError<'a>> {
    let invalid = TypeError::InvalidCast { to, from };

    match (to, from) {
        (TypeTag::Nothing, _) => Err(TypeError::CastToNothing),
        (_, TypeTag::Nothing) => Err(invalid),
        (TypeTag::Integer, TypeTag::Integer)
        | (TypeTag::Integer, TypeTag::Float)
        | (TypeTag::Integer, TypeTag::String) => Ok(Checked::ok(to)),
        (TypeTag::Integer, TypeTag::Bool) => Ok(Checked::warn(
            to,
            TypeWarning::CastLosesResolution { to, from },
        )),
        (TypeTag::Float, TypeTag::Integer)
        | (TypeTag::Float, TypeTag::Float)
        | (TypeTag::Float, TypeTag::String) => Ok(Checked::ok(to)),
        (TypeTag::String, TypeTag::Integer)
        | (TypeTag::String, TypeTag::Float)
        | (TypeTag::String, TypeTag::String)
        | (TypeTag::String, TypeTag::Bool) => Ok(Checked::ok(to)),
        (TypeTag::Bool, TypeTag::Bool) => Ok(Checked::ok(to)),
        (TypeTag::Bool, TypeTag::Integer) => Ok(Checked::warn(
            to,
            TypeWarning::CastLosesResolution { to, from },
        )),
        (TypeTag::Bool, TypeTag::Float)
        | (TypeTag::Bool, TypeTag::String)
        | (TypeTag::Bool, TypeTag::Struct(_)) => {
            Ok(Checked::warn(to, TypeWarning::CastAlwaysTrue(from)))
        }
        (TypeTag::Struct(a), TypeTag::Struct(b)) if a == b => Ok(Checked::ok(to)),
        _ => Err(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn assignment_matrix() {
        use TypeTag::*;

        assert_eq!(check_assignment(Integer, Integer), Ok(Checked::ok(Integer)));
        assert_eq!(check_assignment(Float, Integer), Ok(Checked::ok(Float)));
        assert_eq!(check_assignment(String, String), Ok(Checked::ok(String)));

        assert_matches!(
            check_assignment(Integer, Float),
            Ok(Checked { r#type: Integer, warning: Some(TypeWarning::AssignmentLosesResolution { .. }) })
        );
        assert_matches!(
            check_assignment(Bool, Integer),
            Ok(Checked { r#type: Bool, warning: Some(TypeWarning::AssignmentLosesResolution { .. }) })
        );
        assert_matches!(
            check_assignment(Bool, Float),
            Ok(Checked { r#type: Bool, warning: Some(TypeWarning::AssignmentAlwaysTrue(Float)) })
        );

        assert_matches!(check_assignment(Integer, String), Err(TypeError::IncompatibleAssignment { .. }));
        assert_matches!(check_assignment(Integer, Bool), Err(TypeError::IncompatibleAssignment { .. }));
        assert_matches!(check_assignment(Float, Bool), Err(TypeError::IncompatibleAssignment { .. }));
        assert_matches!(check_assignment(String, Integer), Err(TypeError::IncompatibleAssignment { .. }));
        assert_matches!(check_assignment(Bool, Nothing), Err(TypeError::IncompatibleAssignment { .. }));
    }

    #[test]
    fn assignment_messages() {
        let warning = check_assignment(TypeTag::Bool, TypeTag::String)
            .unwrap()
            .warning
            .unwrap();
        assert_eq!(warning.to_string(), "assigning a string to a boolean is always true");

        let warning = check_assignment(TypeTag::Integer, TypeTag::Float)
            .unwrap()
            .warning
            .unwrap();
        assert_eq!(warning.to_string(), "assigning a float to an integer loses resolution");

        let err = check_assignment(TypeTag::Integer, TypeTag::String).unwrap_err();
        assert_eq!(err.to_string(), "cannot assign a string to an integer");
        assert_eq!(err.code(), DiagnosticCode::IncompatibleAssignment);

        let err = check_assignment(TypeTag::Float, TypeTag::Nothing).unwrap_err();
        assert_eq!(err.to_string(), "cannot assign nothing to a float");
        assert_eq!(err.code(), DiagnosticCode::NothingValue);
    }

    #[test]
    fn struct_identity() {
        let point = TypeTag::Struct("Point");

        assert_eq!(check_assignment(point, point), Ok(Checked::ok(point)));
        assert_matches!(
            check_assignment(point, TypeTag::Struct("Size")),
            Err(TypeError::IncompatibleAssignment { .. })
        );
        assert_matches!(
            check_binary(BinaryOperator::Add, point, TypeTag::Integer),
            Err(TypeError::IncompatibleOperands { .. })
        );
        assert_eq!(check_cast(point, point), Ok(Checked::ok(point)));
        assert_matches!(
            check_cast(point, TypeTag::Bool),
            Err(TypeError::InvalidCast { .. })
        );

        let warning = check_cast(TypeTag::Bool, point).unwrap().warning.unwrap();
        assert_eq!(warning, TypeWarning::CastAlwaysTrue(point));
        assert_eq!(warning.to_string(), "casting Point to boolean is always true");
    }

    #[test]
    fn comparison_and_power() {
        assert_eq!(
            check_binary(BinaryOperator::Lt, TypeTag::String, TypeTag::Integer),
            Ok(Checked::ok(TypeTag::Bool))
        );
        assert_eq!(
            check_binary(BinaryOperator::And, TypeTag::Bool, TypeTag::Bool),
            Ok(Checked::ok(TypeTag::Bool))
        );
        assert_eq!(
            check_binary(BinaryOperator::Pow, TypeTag::Integer, TypeTag::Integer),
            Ok(Checked::ok(TypeTag::Float))
        );
    }

    #[test]
    fn arithmetic_promotion() {
        assert_eq!(
            check_binary(BinaryOperator::Add, TypeTag::Integer, TypeTag::Integer),
            Ok(Checked::ok(TypeTag::Integer))
        );
        assert_eq!(
            check_binary(BinaryOperator::Add, TypeTag::Integer, TypeTag::Float),
            Ok(Checked::ok(TypeTag::Float))
        );
        assert_eq!(
            check_binary(BinaryOperator::Mod, TypeTag::Float, TypeTag::Integer),
            Ok(Checked::ok(TypeTag::Float))
        );
        assert_eq!(
            check_binary(BinaryOperator::Add, TypeTag::String, TypeTag::Integer),
            Ok(Checked::ok(TypeTag::String))
        );
        assert_eq!(
            check_binary(BinaryOperator::Add, TypeTag::Bool, TypeTag::String),
            Ok(Checked::ok(TypeTag::String))
        );
    }

    #[test]
    fn boolean_operands_warn() {
        let checked = check_binary(BinaryOperator::Mul, TypeTag::Integer, TypeTag::Bool).unwrap();

        assert_eq!(checked.r#type, TypeTag::Bool);
        assert_matches!(checked.warning, Some(TypeWarning::BooleanOperation(TypeTag::Integer)) => {});
        assert_eq!(
            checked.warning.unwrap().to_string(),
            "boolean operation on integer is always true"
        );

        assert_eq!(
            check_binary(BinaryOperator::Add, TypeTag::Bool, TypeTag::Integer),
            Ok(Checked::warn(
                TypeTag::Bool,
                TypeWarning::BooleanOperation(TypeTag::Integer)
            ))
        );
        assert_eq!(
            check_binary(BinaryOperator::Add, TypeTag::Float, TypeTag::Bool),
            Ok(Checked::warn(
                TypeTag::Bool,
                TypeWarning::BooleanOperation(TypeTag::Float)
            ))
        );
        assert_eq!(
            check_binary(BinaryOperator::Sub, TypeTag::Bool, TypeTag::Bool),
            Ok(Checked::ok(TypeTag::Bool))
        );
    }

    #[test]
    fn string_arithmetic_is_rejected() {
        for operator in [
            BinaryOperator::Sub,
            BinaryOperator::Mul,
            BinaryOperator::Div,
            BinaryOperator::Mod,
        ]
        .iter()
        {
            assert_matches!(
                check_binary(*operator, TypeTag::Integer, TypeTag::String),
                Err(TypeError::StringArithmetic { .. })
            );
        }

        let err = check_binary(BinaryOperator::Sub, TypeTag::Integer, TypeTag::String).unwrap_err();
        assert_eq!(err.to_string(), "arithmetic operation `-` not allowed on a string");
    }

    #[test]
    fn nothing_operand_is_always_an_error() {
        for operator in BinaryOperator::variants() {
            assert_eq!(
                check_binary(operator, TypeTag::Nothing, TypeTag::Integer),
                Err(TypeError::NoReturnValue)
            );
            assert_eq!(
                check_binary(operator, TypeTag::Bool, TypeTag::Nothing),
                Err(TypeError::NoReturnValue)
            );
        }
    }

    #[test]
    fn unary_operators() {
        assert_eq!(
            check_unary(UnaryOperator::Minus, TypeTag::Float),
            Ok(Checked::ok(TypeTag::Float))
        );
        assert_eq!(
            check_unary(UnaryOperator::Not, TypeTag::Bool),
            Ok(Checked::ok(TypeTag::Bool))
        );

        let err = check_unary(UnaryOperator::Minus, TypeTag::String).unwrap_err();
        assert_eq!(err.to_string(), "unary minus does not make sense with a string");

        let err = check_unary(UnaryOperator::Not, TypeTag::Integer).unwrap_err();
        assert_eq!(err.to_string(), "unary not does not make sense with an integer");
    }

    #[test]
    fn casts() {
        assert_eq!(
            check_cast(TypeTag::Integer, TypeTag::String),
            Ok(Checked::ok(TypeTag::Integer))
        );
        assert_eq!(
            check_cast(TypeTag::String, TypeTag::Bool),
            Ok(Checked::ok(TypeTag::String))
        );
        assert_matches!(
            check_cast(TypeTag::Integer, TypeTag::Bool),
            Ok(Checked { r#type: TypeTag::Integer, warning: Some(TypeWarning::CastLosesResolution { .. }) })
        );

        let warning = check_cast(TypeTag::Bool, TypeTag::Integer).unwrap().warning.unwrap();
        assert_eq!(warning.to_string(), "casting integer to boolean loses resolution");

        let warning = check_cast(TypeTag::Bool, TypeTag::Float).unwrap().warning.unwrap();
        assert_eq!(warning.to_string(), "casting float to boolean is always true");

        let err = check_cast(TypeTag::Float, TypeTag::Bool).unwrap_err();
        assert_eq!(err.to_string(), "cast boolean to float is not allowed");

        let err = check_cast(TypeTag::Integer, TypeTag::Nothing).unwrap_err();
        assert_eq!(err.to_string(), "cast nothing to integer is not allowed");

        assert_eq!(check_cast(TypeTag::Nothing, TypeTag::Integer), Err(TypeError::CastToNothing));
    }
}
