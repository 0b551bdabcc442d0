use std::rc::Rc;

use monkey_core::ast;
use monkey_core::ast::{Expression, InfixOperationKind, PrefixOperationKind};

use crate::environment::Environment;
use crate::object::{Object, RuntimeError, Signal};

/// Evaluates a program in the given environment. Runtime faults come back as
/// an `Object::Error` value, never as a panic; a top-level `return` yields
/// its value like the end of a function body would.
pub fn eval_program(program: &ast::Program, environment: &mut Environment) -> Rc<Object> {
    let mut output = Object::null();
    for statement in &program.statements {
        match eval_statement(statement, environment) {
            Ok(object) => output = object,
            Err(Signal::Return(value)) => return value,
            Err(Signal::Error(error)) => return Object::error(error),
        }
    }
    output
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
) -> Result<Rc<Object>, Signal> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, Signal> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.identifier.name.clone(), value);
    Ok(Object::null())
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, Signal> {
    let value = eval_expression(&statement.value, environment)?;
    Err(Signal::Return(value))
}

fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
) -> Result<Rc<Object>, Signal> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::Identifier(identifier) => environment.get(&identifier.name).ok_or_else(|| {
            Signal::Error(RuntimeError::IdentifierNotFound(identifier.name.clone()))
        }),
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment)?;
            eval_prefix_operation(kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if is_truthy(&condition) {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, environment)?;
            let Object::Function(function) = callee.as_ref() else {
                return Err(Signal::Error(RuntimeError::NotAFunction(
                    callee.type_name(),
                )));
            };
            let arguments = eval_expressions(arguments, environment)?;
            apply_function(function, arguments)
        }
    }
}

fn eval_expressions(
    arguments: &[Expression],
    environment: &mut Environment,
) -> Result<Vec<Rc<Object>>, Signal> {
    let mut result = Vec::new();
    for argument in arguments {
        result.push(eval_expression(argument, environment)?);
    }
    Ok(result)
}

fn apply_function(
    function: &crate::object::Function,
    arguments: Vec<Rc<Object>>,
) -> Result<Rc<Object>, Signal> {
    // Child of the *defining* environment, not the caller's. Parameters zip
    // with arguments: extra arguments are ignored, missing ones stay unbound.
    let mut environment = Environment::new_enclosed(function.env.clone());
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        environment.set(parameter.name.clone(), argument);
    }
    match eval_block_statement(&function.body, &mut environment) {
        Err(Signal::Return(value)) => Ok(value),
        other => other,
    }
}

fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, Signal> {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

/// `false` and `null` are falsy; every other value, zero included, is truthy.
fn is_truthy(object: &Object) -> bool {
    !matches!(object, Object::Boolean(false) | Object::Null)
}

fn eval_prefix_operation(
    kind: &PrefixOperationKind,
    right: Rc<Object>,
) -> Result<Rc<Object>, Signal> {
    match (kind, right.as_ref()) {
        (PrefixOperationKind::Bang, _) => Ok(Object::boolean(!is_truthy(&right))),
        (PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (PrefixOperationKind::Minus, _) => {
            Err(Signal::Error(RuntimeError::UnknownPrefixOperator {
                operation: kind.clone(),
                right: right.type_name(),
            }))
        }
    }
}

fn eval_infix_operation(
    kind: &InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, Signal> {
    use InfixOperationKind::*;
    match (kind, left.as_ref(), right.as_ref()) {
        (_, Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        (Equal, Object::Boolean(left), Object::Boolean(right)) => Ok(Object::boolean(left == right)),
        (NotEqual, Object::Boolean(left), Object::Boolean(right)) => {
            Ok(Object::boolean(left != right))
        }
        (Equal, Object::Null, Object::Null) => Ok(Object::boolean(true)),
        (NotEqual, Object::Null, Object::Null) => Ok(Object::boolean(false)),
        // Equality on mixed types is an unsupported operator, not a type
        // mismatch; the latter is reserved for the arithmetic and ordering
        // operators
        (Equal | NotEqual, _, _) => Err(Signal::Error(RuntimeError::UnknownInfixOperator {
            left: left.type_name(),
            operation: kind.clone(),
            right: right.type_name(),
        })),
        _ if left.type_name() != right.type_name() => {
            Err(Signal::Error(RuntimeError::TypeMismatch {
                left: left.type_name(),
                operation: kind.clone(),
                right: right.type_name(),
            }))
        }
        _ => Err(Signal::Error(RuntimeError::UnknownInfixOperator {
            left: left.type_name(),
            operation: kind.clone(),
            right: right.type_name(),
        })),
    }
}

fn eval_integer_infix_operation(
    kind: &InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Rc<Object>, Signal> {
    use InfixOperationKind::*;
    match kind {
        Plus => Ok(Object::integer(left.wrapping_add(right))),
        Minus => Ok(Object::integer(left.wrapping_sub(right))),
        Multiply => Ok(Object::integer(left.wrapping_mul(right))),
        Divide => {
            if right == 0 {
                Err(Signal::Error(RuntimeError::DivisionByZero))
            } else {
                Ok(Object::integer(left.wrapping_div(right)))
            }
        }
        LessThan => Ok(Object::boolean(left < right)),
        GreaterThan => Ok(Object::boolean(left > right)),
        Equal => Ok(Object::boolean(left == right)),
        NotEqual => Ok(Object::boolean(left != right)),
    }
}
