use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

#[derive(Debug)]
struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// A lexical scope: bindings plus a shared link to the enclosing scope.
/// Cloning is cheap and aliases the same scope, which is what closures rely
/// on. Recursive closures can form reference cycles; those are never
/// collected (garbage collection is out of scope here).
#[derive(Debug, Clone)]
pub struct Environment {
    environment: Rc<RefCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    pub fn get(&self, key: &str) -> Option<Rc<Object>> {
        let env = self.environment.borrow();
        match env.store.get(key) {
            Some(value) => Some(value.clone()),
            None => env.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    /// Binds in this scope only, shadowing any same-named binding further out.
    pub fn set(&mut self, key: Rc<str>, value: Rc<Object>) {
        self.environment.borrow_mut().store.insert(key, value);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.environment, &other.environment)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_walks_the_chain() {
        let mut outer = Environment::new();
        outer.set("a".into(), Object::integer(1));
        outer.set("b".into(), Object::integer(2));

        let mut inner = Environment::new_enclosed(outer);
        inner.set("b".into(), Object::integer(3));

        assert_eq!(inner.get("a"), Some(Object::integer(1)));
        assert_eq!(inner.get("b"), Some(Object::integer(3)));
        assert_eq!(inner.get("c"), None);
    }

    #[test]
    fn test_shared_scope_mutation_is_visible() {
        let mut left = Environment::new();
        let right = left.clone();

        left.set("x".into(), Object::integer(7));

        assert_eq!(right.get("x"), Some(Object::integer(7)));
        assert!(left.ptr_eq(&right));
    }
}
