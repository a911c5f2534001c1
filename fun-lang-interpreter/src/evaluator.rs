use fun_lang_core::ast;
use fun_lang_core::ast::{BinaryOperator, Block, Expression, Identifier, Statement};
use fun_lang_core::stack::ensure_sufficient_stack;

use crate::builtins;
use crate::error::{ArithmeticError, EvaluationError};
use crate::scope::Scope;

/// Runs a whole program in a child of `scope`.
///
/// `Ok(Some(value))` means a top-level `return` ended the program early,
/// `Ok(None)` that it ran out of statements.
pub fn eval_program(
    program: &ast::Program,
    scope: &Scope,
) -> Result<Option<i64>, EvaluationError> {
    let result = exec_block(&program.body, scope);
    tracing::debug!(?result, "program finished");
    result
}

/// Executes `block` in a fresh child of `scope`. Returns the exit value of the
/// first statement that produced one; the remaining statements are skipped.
pub fn exec_block(block: &Block, scope: &Scope) -> Result<Option<i64>, EvaluationError> {
    ensure_sufficient_stack(|| exec_statements(block, &scope.child()))
}

/// Like [`exec_block`] but declares directly into `scope`, so top-level
/// bindings outlive the call.
pub fn exec_statements(block: &Block, scope: &Scope) -> Result<Option<i64>, EvaluationError> {
    for statement in &block.statements {
        if let Some(value) = exec_statement(statement, scope)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn exec_statement(statement: &Statement, scope: &Scope) -> Result<Option<i64>, EvaluationError> {
    match statement {
        Statement::Expression(expression) => {
            eval_expression(expression, scope)?;
            Ok(None)
        }
        Statement::Variable(declaration) => {
            exec_variable_declaration(declaration, scope)?;
            Ok(None)
        }
        Statement::Assignment(assignment) => {
            exec_assignment(assignment, scope)?;
            Ok(None)
        }
        Statement::Function(function) => {
            tracing::trace!(name = %function.name.name, line = function.line, "declare function");
            scope
                .declare_function(function.clone())
                .map_err(|err| EvaluationError::from_scope(err, function.line))?;
            Ok(None)
        }
        Statement::If(statement) => exec_if_statement(statement, scope),
        Statement::While(statement) => exec_while_statement(statement, scope),
        Statement::Return(statement) => Ok(Some(eval_expression(&statement.value, scope)?)),
    }
}

fn exec_variable_declaration(
    declaration: &ast::VariableDeclaration,
    scope: &Scope,
) -> Result<(), EvaluationError> {
    let value = match &declaration.value {
        Some(expression) => eval_expression(expression, scope)?,
        None => 0,
    };
    tracing::trace!(name = %declaration.identifier.name, value, "declare variable");
    scope
        .declare_variable(declaration.identifier.name.clone(), value)
        .map_err(|err| EvaluationError::from_scope(err, declaration.line))
}

fn exec_assignment(assignment: &ast::Assignment, scope: &Scope) -> Result<(), EvaluationError> {
    let value = eval_expression(&assignment.value, scope)?;
    scope
        .assign(&assignment.identifier.name, value)
        .map_err(|err| EvaluationError::from_scope(err, assignment.line))
}

fn exec_if_statement(
    statement: &ast::IfStatement,
    scope: &Scope,
) -> Result<Option<i64>, EvaluationError> {
    if eval_expression(&statement.condition, scope)? != 0 {
        exec_block(&statement.consequence, scope)
    } else if let Some(alternative) = &statement.alternative {
        exec_block(alternative, scope)
    } else {
        Ok(None)
    }
}

fn exec_while_statement(
    statement: &ast::WhileStatement,
    scope: &Scope,
) -> Result<Option<i64>, EvaluationError> {
    while eval_expression(&statement.condition, scope)? != 0 {
        if let Some(value) = exec_block(&statement.body, scope)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

pub fn eval_expression(expression: &Expression, scope: &Scope) -> Result<i64, EvaluationError> {
    ensure_sufficient_stack(|| eval_expression_kind(expression, scope))
}

fn eval_expression_kind(expression: &Expression, scope: &Scope) -> Result<i64, EvaluationError> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(*value),
        Expression::Variable { identifier, line } => scope
            .resolve_variable(&identifier.name)
            .ok_or_else(|| EvaluationError::UnboundVariable {
                name: identifier.name.clone(),
                line: *line,
            }),
        Expression::BinaryOperation(operator, left, right) => {
            // Both sides are always evaluated, `&&` and `||` included.
            let left = eval_expression(left, scope)?;
            let right = eval_expression(right, scope)?;
            Ok(eval_binary_operation(*operator, left, right)?)
        }
        Expression::FunctionCall {
            name,
            line,
            arguments,
        } => eval_function_call(name, *line, arguments, scope),
    }
}

fn eval_expressions(
    arguments: &[Expression],
    scope: &Scope,
) -> Result<Vec<i64>, EvaluationError> {
    let mut result = Vec::with_capacity(arguments.len());
    for argument in arguments {
        result.push(eval_expression(argument, scope)?);
    }
    Ok(result)
}

#[tracing::instrument(level = "debug", skip_all, fields(name = %name.name, line = line))]
fn eval_function_call(
    name: &Identifier,
    line: usize,
    arguments: &[Expression],
    scope: &Scope,
) -> Result<i64, EvaluationError> {
    let arguments = eval_expressions(arguments, scope)?;

    let Some(function) = scope.resolve_function(&name.name) else {
        return match builtins::map_builtins(&name.name) {
            Some(builtin) => builtin.call(scope, &arguments),
            None => Err(EvaluationError::UnboundFunction {
                name: name.name.clone(),
                line,
            }),
        };
    };
    apply_function(&function, arguments, line, scope)
}

/// Binds the parameters in a child of the *calling* scope and runs the body
/// there. The declaration site plays no part in name resolution.
fn apply_function(
    function: &ast::FunctionDeclaration,
    arguments: Vec<i64>,
    line: usize,
    scope: &Scope,
) -> Result<i64, EvaluationError> {
    if function.parameters.len() != arguments.len() {
        return Err(EvaluationError::ArityMismatch {
            name: function.name.name.clone(),
            expected: function.parameters.len(),
            actual: arguments.len(),
            line,
        });
    }

    let call_scope = scope.child();
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        call_scope
            .declare_variable(parameter.name.clone(), argument)
            .map_err(|err| EvaluationError::from_scope(err, function.line))?;
    }

    let result = exec_block(&function.body, &call_scope)?;
    tracing::debug!(?result, "function returned");
    Ok(result.unwrap_or(0))
}

fn eval_binary_operation(
    operator: BinaryOperator,
    left: i64,
    right: i64,
) -> Result<i64, ArithmeticError> {
    use BinaryOperator::*;
    let value = match operator {
        Multiply => left.wrapping_mul(right),
        Divide => {
            if right == 0 {
                return Err(ArithmeticError::DivisionByZero);
            }
            left.wrapping_div(right)
        }
        Modulo => {
            if right == 0 {
                return Err(ArithmeticError::ModuloByZero);
            }
            left.wrapping_rem(right)
        }
        Plus => left.wrapping_add(right),
        Minus => left.wrapping_sub(right),
        LessThan => i64::from(left < right),
        GreaterThan => i64::from(left > right),
        LessEqual => i64::from(left <= right),
        GreaterEqual => i64::from(left >= right),
        Equal => i64::from(left == right),
        NotEqual => i64::from(left != right),
        And => i64::from(left != 0 && right != 0),
        Or => i64::from(left != 0 || right != 0),
    };
    Ok(value)
}
