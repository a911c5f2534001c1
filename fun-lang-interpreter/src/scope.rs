use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use fun_lang_core::ast::FunctionDeclaration;

use crate::error::{DeclarationKind, ScopeError};

/// Where `println` writes. Every scope of one evaluation shares the sink of
/// its root.
pub type OutputSink = Rc<RefCell<dyn Write>>;

#[derive(Default)]
struct ScopeCore {
    variables: HashMap<Rc<str>, i64>,
    functions: HashMap<Rc<str>, Rc<FunctionDeclaration>>,
    parent: Option<Scope>,
}

/// One level of the scope tree. Children point at their parent, never the
/// other way around, so a scope is freed as soon as the block or call that
/// created it stops referencing it.
#[derive(Clone)]
pub struct Scope {
    scope: Rc<RefCell<ScopeCore>>,
    output: OutputSink,
}

impl Scope {
    pub fn new(output: OutputSink) -> Self {
        Scope {
            scope: Rc::new(RefCell::new(ScopeCore::default())),
            output,
        }
    }

    pub fn with_stdout() -> Self {
        Self::new(Rc::new(RefCell::new(std::io::stdout())))
    }

    pub fn child(&self) -> Scope {
        Scope {
            scope: Rc::new(RefCell::new(ScopeCore {
                parent: Some(self.clone()),
                ..ScopeCore::default()
            })),
            output: self.output.clone(),
        }
    }

    pub fn resolve_variable(&self, name: &str) -> Option<i64> {
        let scope = self.scope.borrow();
        scope
            .variables
            .get(name)
            .copied()
            .or_else(|| scope.parent.as_ref().and_then(|parent| parent.resolve_variable(name)))
    }

    pub fn resolve_function(&self, name: &str) -> Option<Rc<FunctionDeclaration>> {
        let scope = self.scope.borrow();
        scope
            .functions
            .get(name)
            .cloned()
            .or_else(|| scope.parent.as_ref().and_then(|parent| parent.resolve_function(name)))
    }

    /// Only this scope is checked for an existing binding, so shadowing a
    /// variable of an enclosing scope succeeds.
    pub fn declare_variable(&self, name: Rc<str>, value: i64) -> Result<(), ScopeError> {
        match self.scope.borrow_mut().variables.entry(name) {
            Entry::Occupied(entry) => Err(ScopeError::AlreadyDeclared {
                kind: DeclarationKind::Variable,
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    pub fn declare_function(&self, function: Rc<FunctionDeclaration>) -> Result<(), ScopeError> {
        match self
            .scope
            .borrow_mut()
            .functions
            .entry(function.name.name.clone())
        {
            Entry::Occupied(entry) => Err(ScopeError::AlreadyDeclared {
                kind: DeclarationKind::Function,
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(function);
                Ok(())
            }
        }
    }

    /// Overwrites the binding in the nearest scope that declares `name`.
    pub fn assign(&self, name: &str, value: i64) -> Result<(), ScopeError> {
        let mut scope = self.scope.borrow_mut();
        if let Some(slot) = scope.variables.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &scope.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(ScopeError::UnboundVariable(name.into())),
        }
    }

    pub fn print_line(&self, values: &[i64]) -> std::io::Result<()> {
        crate::builtins::write_line(&mut *self.output.borrow_mut(), values)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use fun_lang_core::ast::{Block, FunctionDeclaration};
    use pretty_assertions::assert_eq;

    use super::Scope;
    use crate::error::{DeclarationKind, ScopeError};

    fn function(name: &str) -> Rc<FunctionDeclaration> {
        Rc::new(FunctionDeclaration {
            line: 1,
            name: name.into(),
            parameters: vec![],
            body: Block::default(),
        })
    }

    fn scope() -> (Scope, Rc<RefCell<Vec<u8>>>) {
        let output = Rc::new(RefCell::new(Vec::<u8>::new()));
        (Scope::new(output.clone()), output)
    }

    #[test]
    fn test_resolve_through_parents() {
        let (root, _) = scope();
        root.declare_variable("a".into(), 1).unwrap();
        let child = root.child();
        let grandchild = child.child();

        assert_eq!(grandchild.resolve_variable("a"), Some(1));
        assert_eq!(grandchild.resolve_variable("b"), None);
        assert_eq!(root.resolve_variable("a"), Some(1));
    }

    #[test]
    fn test_shadowing() {
        let (root, _) = scope();
        root.declare_variable("x".into(), 10).unwrap();
        let child = root.child();
        child.declare_variable("x".into(), 6).unwrap();

        assert_eq!(child.resolve_variable("x"), Some(6));
        assert_eq!(root.resolve_variable("x"), Some(10));
    }

    #[test]
    fn test_duplicate_declaration() {
        let (root, _) = scope();
        root.declare_variable("x".into(), 10).unwrap();

        assert_eq!(
            root.declare_variable("x".into(), 10),
            Err(ScopeError::AlreadyDeclared {
                kind: DeclarationKind::Variable,
                name: "x".into()
            })
        );

        root.declare_function(function("f")).unwrap();
        assert_eq!(
            root.declare_function(function("f")),
            Err(ScopeError::AlreadyDeclared {
                kind: DeclarationKind::Function,
                name: "f".into()
            })
        );
        assert_eq!(root.child().declare_function(function("f")), Ok(()));
    }

    #[test]
    fn test_separate_namespaces() {
        let (root, _) = scope();
        root.declare_variable("f".into(), 3).unwrap();
        root.declare_function(function("f")).unwrap();

        assert_eq!(root.resolve_variable("f"), Some(3));
        assert_eq!(root.child().resolve_function("f"), Some(function("f")));
        assert_eq!(root.resolve_function("g"), None);
    }

    #[test]
    fn test_assign() {
        let (root, _) = scope();
        root.declare_variable("a".into(), 1).unwrap();
        let child = root.child();
        child.declare_variable("b".into(), 2).unwrap();

        child.assign("a", 5).unwrap();
        child.assign("b", 7).unwrap();

        assert_eq!(root.resolve_variable("a"), Some(5));
        assert_eq!(child.resolve_variable("b"), Some(7));
        assert_eq!(
            child.assign("c", 1),
            Err(ScopeError::UnboundVariable("c".into()))
        );
        assert_eq!(
            root.assign("b", 1),
            Err(ScopeError::UnboundVariable("b".into()))
        );
    }

    #[test]
    fn test_children_share_output() {
        let (root, output) = scope();
        root.print_line(&[1, 2]).unwrap();
        root.child().child().print_line(&[3]).unwrap();

        assert_eq!(String::from_utf8(output.borrow().clone()).unwrap(), "1 2 \n3 \n");
    }
}
