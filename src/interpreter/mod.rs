//! Core program interpreter.
//!
//! The interpreter walks the abstract syntax tree (AST) produced by the parser
//! and checked by the checker, executing statements in program order against
//! three pieces of state:
//!
//! - **Environment**: the scope chain and call stack, binding names to
//!   [`Binding`]s. Every statement sequence runs in a fresh scope.
//! - **Heap**: append-only integer cells that `ref` variables point into.
//! - **Functions**: the function table, filled once before execution.
//!
//! Function arguments are bound by copying the caller's binding into the
//! callee's parameter scope. For an `int` that is a snapshot of the value; for
//! a `ref` it is the handle, so writes through the parameter land in the
//! caller's cell while re-pointing the parameter (`p = new`) does not affect
//! the caller.

pub(crate) mod heap;
pub(crate) mod input;
pub(crate) mod value;

use std::{collections::HashMap, io::Write};

use anyhow::{Context, anyhow};
use heap::Heap;
use input::InputSource;
use value::{Binding, Value};

use crate::{
	environment::Environment,
	error::interpreter::InterpreterError,
	parser::expression::{AddOp, Comparison, Condition, Expression, Factor, Term},
	statement::{AssignValue, Declaration, Function, Ident, Program, Statement, VarKind},
};

/// Interpreter that executes Core programs.
pub(crate) struct Interpreter<'a, I, W> {
	environment: Environment<'a, Binding>,
	heap:        Heap,
	functions:   HashMap<&'a str, &'a Function<'a>>,
	/// Values for `input` statements.
	input:       I,
	/// Sink for `output` statements.
	output:      W,
}

impl<'a, I: InputSource, W: Write> Interpreter<'a, I, W> {
	pub fn new(input: I, output: W) -> Self {
		Self { environment: Environment::new(), heap: Heap::new(), functions: HashMap::new(), input, output }
	}

	/// Run a whole program: globals, then the function table, then the body.
	pub fn interpret(&mut self, program: &'a Program<'a>) -> Result<(), InterpreterError> {
		for declaration in &program.declarations {
			self.declare(declaration);
		}
		for function in &program.functions {
			self.functions.insert(function.name.name, function);
		}
		self.interpret_block(&program.body)?;
		self.output.flush().context("Failed flush output")?;
		tracing::debug!(heap_cells = self.heap.len(), "program finished");
		Ok(())
	}

	/// Execute a statement sequence in its own scope.
	fn interpret_block(&mut self, statements: &'a [Statement<'a>]) -> Result<(), InterpreterError> {
		self.environment.push_scope();
		let result = statements.iter().try_for_each(|statement| self.interpret_statement(statement));
		self.environment.pop_scope();
		result
	}

	fn interpret_statement(&mut self, statement: &'a Statement<'a>) -> Result<(), InterpreterError> {
		match statement {
			Statement::VarDeclaration(declaration) => self.declare(declaration),
			Statement::Assign { target, value } => self.assign(target, value)?,
			Statement::If { condition, then_branch, else_branch } => {
				if self.condition(condition)? {
					self.interpret_block(then_branch)?;
				} else if let Some(else_branch) = else_branch {
					self.interpret_block(else_branch)?;
				}
			}
			Statement::While { condition, body } => {
				while self.condition(condition)? {
					self.interpret_block(body)?;
				}
			}
			Statement::Input(target) => {
				let value = self
					.input
					.next_value()
					.ok_or_else(|| InterpreterError::InputExhausted { name: target.name.to_string(), line: target.line })?;
				self.store(target, Value::Int(value))?;
			}
			Statement::Output(expression) => {
				let value = self.evaluate(expression)?;
				writeln!(self.output, "{value}").context("Failed write output")?;
			}
			Statement::Call { name, arguments } => {
				let function = self.functions.get(name.name).copied().ok_or_else(|| anyhow!("undefined function '{name}'"))?;
				if function.parameters.len() != arguments.len() {
					return Err(anyhow!(
						"'{name}' takes {} arguments, called with {}",
						function.parameters.len(),
						arguments.len()
					)
					.into());
				}
				let bindings = arguments.iter().map(|argument| self.lookup(argument)).collect::<Result<Vec<_>, _>>()?;
				self.call(function, bindings)?;
			}
		}
		Ok(())
	}

	/// Bind each declared name to its kind's default in the current scope.
	fn declare(&mut self, declaration: &'a Declaration<'a>) {
		for name in &declaration.names {
			self.environment.declare(name.name, Binding::declare(declaration.kind));
		}
	}

	fn assign(&mut self, target: &Ident<'a>, value: &AssignValue<'a>) -> Result<(), InterpreterError> {
		match value {
			AssignValue::New => {
				self.expect_reference(target)?;
				let handle = self.heap.allocate();
				self.environment.assign(target.name, Binding::Ref(Some(handle)))
			}
			AssignValue::Ref(source) => {
				self.expect_reference(target)?;
				let Binding::Ref(handle) = self.lookup(source)? else {
					return Err(anyhow!("line {}: '{source}' is not a ref variable", source.line).into());
				};
				self.environment.assign(target.name, Binding::Ref(handle))
			}
			AssignValue::Expression(expression) => {
				// Writing through a null reference fails before the right side runs.
				if let Binding::Ref(None) = self.lookup(target)? {
					return Err(Self::dangling(target));
				}
				let value = self.evaluate(expression)?;
				self.store(target, value)
			}
		}
	}

	/// Put a value into a variable: directly for `int`, through the heap for
	/// `ref`. `Null` is stored like any other value.
	fn store(&mut self, target: &Ident<'a>, value: Value) -> Result<(), InterpreterError> {
		match self.lookup(target)? {
			Binding::Int(_) => self.environment.assign(target.name, Binding::Int(value)),
			Binding::Ref(Some(handle)) => {
				self.heap.write(handle, value);
				Ok(())
			}
			Binding::Ref(None) => Err(Self::dangling(target)),
		}
	}

	#[tracing::instrument(level = "debug", skip_all, fields(function = function.name.name, depth = self.environment.depth()))]
	fn call(&mut self, function: &'a Function<'a>, arguments: Vec<Binding>) -> Result<(), InterpreterError> {
		let parameters = function.parameters.iter().map(|parameter| parameter.name);
		self.environment.enter_frame(parameters.zip(arguments));
		let result = self.interpret_block(&function.body);
		self.environment.leave_frame();
		result
	}

	/// Evaluate a condition. `or` stops at the first true comparison.
	fn condition(&self, condition: &Condition<'a>) -> Result<bool, InterpreterError> {
		Ok(match condition {
			Condition::Comparison(comparison) => self.comparison(comparison)?,
			Condition::Or(comparison, rest) => self.comparison(comparison)? || self.condition(rest)?,
			Condition::Not(inner) => !self.condition(inner)?,
		})
	}

	fn comparison(&self, comparison: &Comparison<'a>) -> Result<bool, InterpreterError> {
		let left = self.evaluate(&comparison.left)?;
		let right = self.evaluate(&comparison.right)?;
		left.compare(comparison.operator, right).ok_or_else(|| {
			if let Value::Null = left { self.null_read(&comparison.left) } else { self.null_read(&comparison.right) }
		})
	}

	/// Evaluate `term (('+' | '-') expr)?`. The left term is evaluated first.
	fn evaluate(&self, expression: &Expression<'a>) -> Result<Value, InterpreterError> {
		Ok(match expression {
			Expression::Term(term) => self.term(term)?,
			Expression::Binary { left, operator, right } => {
				let left = self.term(left)?;
				let right = self.evaluate(right)?;
				match operator {
					AddOp::Plus => left.plus(right),
					AddOp::Minus => left.minus(right),
				}
			}
		})
	}

	fn term(&self, term: &Term<'a>) -> Result<Value, InterpreterError> {
		Ok(match term {
			Term::Factor(factor) => self.factor(factor)?,
			Term::Product { left, right } => self.factor(left)?.star(self.term(right)?),
		})
	}

	fn factor(&self, factor: &Factor<'a>) -> Result<Value, InterpreterError> {
		Ok(match factor {
			Factor::Variable(ident) => match self.lookup(ident)? {
				Binding::Int(value) => value,
				Binding::Ref(Some(handle)) => self.heap.read(handle),
				Binding::Ref(None) => Value::Null,
			},
			Factor::Constant(value) => Value::Int(*value),
			Factor::Grouping(expression) => self.evaluate(expression)?,
		})
	}

	fn lookup(&self, ident: &Ident<'a>) -> Result<Binding, InterpreterError> {
		self.environment.get(ident.name).copied().ok_or_else(|| InterpreterError::UnboundName(ident.name.to_string()))
	}

	fn expect_reference(&self, target: &Ident<'a>) -> Result<(), InterpreterError> {
		match self.lookup(target)?.kind() {
			VarKind::Ref => Ok(()),
			VarKind::Int => Err(anyhow!("line {}: '{target}' is not a ref variable", target.line).into()),
		}
	}

	/// The error for a comparison operand that produced no value, naming the
	/// variable it came from.
	fn null_read(&self, expression: &Expression<'a>) -> InterpreterError {
		match self.null_variable(expression) {
			Some(ident) => Self::dangling(&ident),
			None => anyhow!("expression '{expression}' produced no value").into(),
		}
	}

	/// The first variable, left to right, that reads as `Null`: an unset `ref`,
	/// or a variable or cell that was assigned such a read.
	fn null_variable(&self, expression: &Expression<'a>) -> Option<Ident<'a>> {
		match expression {
			Expression::Term(term) => self.null_variable_in_term(term),
			Expression::Binary { left, right, .. } => {
				self.null_variable_in_term(left).or_else(|| self.null_variable(right))
			}
		}
	}

	fn null_variable_in_term(&self, term: &Term<'a>) -> Option<Ident<'a>> {
		match term {
			Term::Factor(factor) => self.null_variable_in_factor(factor),
			Term::Product { left, right } => {
				self.null_variable_in_factor(left).or_else(|| self.null_variable_in_term(right))
			}
		}
	}

	fn null_variable_in_factor(&self, factor: &Factor<'a>) -> Option<Ident<'a>> {
		match factor {
			Factor::Variable(ident) => matches!(self.factor(factor), Ok(Value::Null)).then_some(*ident),
			Factor::Constant(_) => None,
			Factor::Grouping(expression) => self.null_variable(expression),
		}
	}

	fn dangling(ident: &Ident<'a>) -> InterpreterError {
		InterpreterError::DanglingReference { name: ident.name.to_string(), line: ident.line }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{interpreter::input::DataFile, parser::Parser, scanner::Scanner};

	/// Run `source` with the given input values, returning the result and
	/// everything printed before it.
	fn run(source: &str, input: &[i32]) -> (Result<(), InterpreterError>, String) {
		let tokens = Scanner::new(source).scan_tokens().unwrap();
		let program = Parser::new(tokens).parse().unwrap();
		let mut data: DataFile = input.iter().copied().collect();
		let mut output = Vec::new();
		let result = Interpreter::new(&mut data, &mut output).interpret(&program);
		(result, String::from_utf8(output).unwrap())
	}

	fn output_of(source: &str, input: &[i32]) -> String {
		let (result, output) = run(source, input);
		assert!(result.is_ok(), "{result:?}");
		output
	}

	#[test]
	fn test_output_and_arithmetic() {
		assert_eq!(output_of("program begin output 1 + 2 * 3; output (1 + 2) * 3; end", &[]), "7\n9\n");
	}

	#[test]
	fn test_right_associativity() {
		assert_eq!(output_of("program begin output 9 - 4 - 2; end", &[]), "7\n");
		// 10 - ((2 * 3) - 1) = 10 - 5
		assert_eq!(output_of("program begin output 10 - 2 * 3 - 1; end", &[]), "5\n");
	}

	#[test]
	fn test_scope_shadowing() {
		let source = "program int x; begin
			x = 1;
			if x == 1 then int x; x = 2; output x; endif
			output x;
		end";
		assert_eq!(output_of(source, &[]), "2\n1\n");
	}

	#[test]
	fn test_assignment_reaches_outer_scope() {
		let source = "program int x; begin
			if x == 0 then if x == 0 then x = 5; endif endif
			output x;
		end";
		assert_eq!(output_of(source, &[]), "5\n");
	}

	#[test]
	fn test_reference_aliasing() {
		let source = "program ref a, b, c; begin
			a = new;
			b = ref a;
			c = ref b;
			c = 5;
			output a;
			a = 6;
			output b;
		end";
		assert_eq!(output_of(source, &[]), "5\n6\n");
	}

	#[test]
	fn test_new_breaks_alias() {
		let source = "program ref a, b; begin
			a = new; a = 1;
			b = ref a;
			b = new; b = 2;
			output a; output b;
		end";
		assert_eq!(output_of(source, &[]), "1\n2\n");
	}

	#[test]
	fn test_dangling_write() {
		let (result, output) = run("program ref r; begin output 1; r = 3; output 2; end", &[]);
		assert!(matches!(result, Err(InterpreterError::DanglingReference { ref name, line: 1 }) if name == "r"));
		assert_eq!(output, "1\n");
	}

	#[test]
	fn test_null_reads_print_null() {
		assert_eq!(output_of("program ref r; begin output r; output r + 1; end", &[]), "null\nnull\n");
	}

	#[test]
	fn test_null_is_stored_into_int() {
		let source = "program ref r; int x; begin x = r; output x; x = 1 + r; output x; x = 2; output x; end";
		assert_eq!(output_of(source, &[]), "null\nnull\n2\n");
	}

	#[test]
	fn test_null_is_stored_through_reference() {
		let source = "program ref r, s; begin s = new; s = r; output s; s = 3; output s; end";
		assert_eq!(output_of(source, &[]), "null\n3\n");
	}

	#[test]
	fn test_comparing_stored_null_fails() {
		let (result, output) = run("program ref r; int x; begin x = r; output 1; if x == 0 then output 2; endif end", &[]);
		assert!(matches!(result, Err(InterpreterError::DanglingReference { ref name, line: 1 }) if name == "x"));
		assert_eq!(output, "1\n");
	}

	#[test]
	fn test_short_circuit_or() {
		let source = "program ref r; int x; begin if x == 0 or r == 1 then output 1; endif end";
		assert_eq!(output_of(source, &[]), "1\n");

		let source = "program ref r; int x; begin if x == 1 or r == 1 then output 1; endif end";
		let (result, _) = run(source, &[]);
		assert!(matches!(result, Err(InterpreterError::DanglingReference { ref name, .. }) if name == "r"));
	}

	#[test]
	fn test_negation() {
		let source = "program int x; begin
			if !(x == 1) then output 1; else output 2; endif
			if !(x == 1 or x == 0) then output 3; else output 4; endif
		end";
		assert_eq!(output_of(source, &[]), "1\n4\n");
	}

	#[test]
	fn test_loop_locals_are_fresh() {
		let source = "program int i; begin
			while i < 3 begin
				int j;
				j = j + 1;
				output j;
				i = i + 1;
			endwhile
		end";
		assert_eq!(output_of(source, &[]), "1\n1\n1\n");
	}

	#[test]
	fn test_input() {
		let source = "program int x; ref r; begin
			r = new;
			input x; input r;
			output x + r;
		end";
		assert_eq!(output_of(source, &[3, 4]), "7\n");
	}

	#[test]
	fn test_input_exhausted() {
		let (result, output) = run("program int x; begin input x; output x; input x; output x; end", &[7]);
		assert!(matches!(result, Err(InterpreterError::InputExhausted { ref name, .. }) if name == "x"));
		assert_eq!(output, "7\n");
	}

	#[test]
	fn test_input_into_null_reference() {
		let (result, _) = run("program ref r; begin input r; end", &[1]);
		assert!(matches!(result, Err(InterpreterError::DanglingReference { .. })));
	}

	#[test]
	fn test_reference_parameters_share_cells() {
		let source = "program ref a, b, c, x;
			define f(p) begin p = 5; endfunc
		begin
			a = new; b = new; c = new; x = new;
			f(x);
			output x; output a;
		end";
		assert_eq!(output_of(source, &[]), "5\n0\n");
	}

	#[test]
	fn test_int_parameters_are_copies() {
		let source = "program int x;
			define f(p) begin p = 9; output p; endfunc
		begin
			x = 1;
			f(x);
			output x;
		end";
		assert_eq!(output_of(source, &[]), "9\n1\n");
	}

	#[test]
	fn test_repointing_parameter_leaves_caller() {
		let source = "program ref x;
			define f(p) begin p = new; p = 7; endfunc
		begin
			x = new; x = 1;
			f(x);
			output x;
		end";
		assert_eq!(output_of(source, &[]), "1\n");
	}

	#[test]
	fn test_functions_mutate_globals() {
		let source = "program int n, total;
			define sum() begin
				if 0 < n then total = total + n; n = n - 1; sum(); endif
			endfunc
		begin
			n = 4;
			sum();
			output total;
			output n;
		end";
		assert_eq!(output_of(source, &[]), "10\n0\n");
	}

	#[test]
	fn test_function_locals_do_not_leak() {
		let source = "program int x;
			define f(a, b) begin int x; x = a * b; output x; endfunc
		begin
			int y;
			x = 2; y = 3;
			f(x, y);
			output x;
		end";
		assert_eq!(output_of(source, &[]), "6\n2\n");
	}

	#[test]
	fn test_unbound_name() {
		let (result, _) = run("program begin output x; end", &[]);
		assert!(matches!(result, Err(InterpreterError::UnboundName(ref name)) if name == "x"));
	}

	#[test]
	fn test_arithmetic_wraps() {
		let source = "program int x; begin x = 1023 * 1023 * 1023 * 1023; output x; end";
		assert_eq!(output_of(source, &[]), format!("{}\n", 1023i32.wrapping_pow(4)));
	}
}
