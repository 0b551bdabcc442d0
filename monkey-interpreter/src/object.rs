use std::rc::Rc;

use monkey_core::ast;

use crate::environment::Environment;

use thiserror::Error;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Function(Function),
    Error(RuntimeError),
    Null,
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Rc<Object> {
        Rc::new(Object::Integer(value))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: ast::BlockStatement,
        env: Environment,
    ) -> Rc<Object> {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }
    pub fn error(error: RuntimeError) -> Rc<Object> {
        Rc::new(Object::Error(error))
    }

    /// Tag name used in runtime error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Function(_) => "FUNCTION",
            Object::Error(_) => "ERROR",
            Object::Null => "NULL",
        }
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Function(function) => {
                write!(
                    f,
                    "function({}) {}",
                    function
                        .parameters
                        .iter()
                        .map(|id| id.name.as_ref())
                        .collect::<Vec<&str>>()
                        .join(", "),
                    function.body
                )
            }
            Object::Error(error) => write!(f, "ERROR: {}", error),
            Object::Null => write!(f, "null"),
        }
    }
}

#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    pub env: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.env.ptr_eq(&other.env)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("ptr", &(self as *const Function as usize))
            .finish()
    }
}

/// Unwinds the evaluation recursion: a `return` travels up until the nearest
/// call boundary, an error travels all the way out.
#[derive(Debug, PartialEq)]
pub enum Signal {
    Return(Rc<Object>),
    Error(RuntimeError),
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum RuntimeError {
    #[error("type mismatch: {left} {operation} {right}")]
    TypeMismatch {
        left: &'static str,
        operation: ast::InfixOperationKind,
        right: &'static str,
    },
    #[error("unknown operator: {left} {operation} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        operation: ast::InfixOperationKind,
        right: &'static str,
    },
    #[error("unknown operator: {operation}{right}")]
    UnknownPrefixOperator {
        operation: ast::PrefixOperationKind,
        right: &'static str,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(Rc<str>),
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    #[error("division by zero")]
    DivisionByZero,
}
