use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Expression(Expression),
    Variable(VariableDeclaration),
    Assignment(Assignment),
    If(IfStatement),
    While(WhileStatement),
    Return(ReturnStatement),
    Function(Rc<FunctionDeclaration>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct VariableDeclaration {
    pub line: usize,
    pub identifier: Identifier,
    pub value: Option<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Assignment {
    pub line: usize,
    pub identifier: Identifier,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequence: Block,
    pub alternative: Option<Block>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStatement {
    pub value: Expression,
}

/// A named function. Parameters are bound positionally at the call site; the
/// body does not capture the scope the declaration was executed in.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionDeclaration {
    pub line: usize,
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    IntegerLiteral(i64),
    BinaryOperation(BinaryOperator, Box<Expression>, Box<Expression>),
    Variable {
        identifier: Identifier,
        line: usize,
    },
    FunctionCall {
        name: Identifier,
        line: usize,
        arguments: Vec<Expression>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Multiply,
    Divide,
    Modulo,
    Plus,
    Minus,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier { name: name.into() }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "var {}", self.identifier.name)?;
        if let Some(value) = &self.value {
            write!(f, " = {}", value)?;
        }
        Ok(())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier.name, self.value)
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {}", self.value)
    }
}

impl Display for FunctionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fun {}({}) {}",
            self.name.name,
            self.parameters
                .iter()
                .map(|id| id.name.as_ref())
                .collect::<Box<[&str]>>()
                .join(", "),
            self.body
        )
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", statement)?;
        }
        write!(f, "}}")
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            IntegerLiteral(val) => write!(f, "{}", val),
            BinaryOperation(operator, left, right) => {
                write!(f, "({} {} {})", left, operator.to_str(), right)
            }
            Variable { identifier, .. } => write!(f, "{}", identifier.name),
            FunctionCall {
                name, arguments, ..
            } => {
                write!(
                    f,
                    "{}({})",
                    name.name,
                    arguments
                        .iter()
                        .map(|arg| arg.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            Expression(expression) => write!(f, "{}", expression),
            Variable(statement) => write!(f, "{}", statement),
            Assignment(statement) => write!(f, "{}", statement),
            If(statement) => write!(f, "{}", statement),
            While(statement) => write!(f, "{}", statement),
            Return(statement) => write!(f, "{}", statement),
            Function(declaration) => write!(f, "{}", declaration),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.body.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl BinaryOperator {
    pub fn to_str(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Plus => "+",
            Minus => "-",
            LessThan => "<",
            GreaterThan => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        }
    }
}
