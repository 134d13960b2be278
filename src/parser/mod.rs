//! Where the `syntactic grammar` lives: the alphabet is tokens and each
//! sentence is a whole `Program`.
//!
//! Recursive descent with a single token of lookahead. The only place that
//! needs to look past an identifier is a statement starting with one: `=`
//! makes it an assignment, `(` a function call, and the identifier has
//! already been consumed by then.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Condition|or|Right
//! Comparison|== < <=|None
//! Expr|+ -|Right
//! Term|*|Right
//!
//! Grammar:
//!
//! ``` BNF
//! program   → "program" decl_seq? "begin" stmt_seq "end" EOF ;
//! decl_seq  → ( decl | func_decl )+ ;
//! decl      → ( "int" | "ref" ) id_list ";" ;
//! func_decl → "define" ID "(" id_list? ")" "begin" stmt_seq "endfunc" ;
//! stmt      → assign | call | if | loop | input | output | decl ;
//! assign    → ID "=" ( "new" | "ref" ID | expr ) ";" ;
//! call      → ID "(" id_list? ")" ";" ;
//! if        → "if" cond "then" stmt_seq ( "else" stmt_seq )? "endif" ;
//! loop      → "while" cond "begin" stmt_seq "endwhile" ;
//! input     → "input" ID ";" ;
//! output    → "output" expr ";" ;
//! cond      → cmpr ( "or" cond )? | "!" "(" cond ")" ;
//! cmpr      → expr ( "==" | "<" | "<=" ) expr ;
//! expr      → term ( ( "+" | "-" ) expr )? ;
//! term      → factor ( "*" term )? ;
//! factor    → ID | CONST | "(" expr ")" ;
//! ```

pub(crate) mod expression;

use std::{iter::Peekable, vec::IntoIter};

use TokenType::*;
use anyhow::anyhow;
use expression::{AddOp, CompareOp, Comparison, Condition, Expression, Factor, Term};

use crate::{
	CoreError,
	error::parser::{ParseError, ParseErrorType, ParserError},
	scanner::{Token, TokenType},
	statement::{AssignValue, Declaration, Function, Ident, Program, Statement, VarKind},
};

pub(crate) struct Parser<'a> {
	/// The tokens to parse.
	tokens: Peekable<IntoIter<Token<'a>>>,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self { Self { tokens: tokens.into_iter().peekable() } }

	/// Parse a whole program, stopping at the first error.
	pub fn parse(mut self) -> Result<Program<'a>, CoreError> {
		match self.program() {
			Ok(program) => Ok(program),
			Err(ParserError::InternalError(e)) => Err(e.into()),
			Err(ParserError::ParseError(e)) => Err(e.into()),
		}
	}

	fn program(&mut self) -> Result<Program<'a>, ParserError> {
		self.expect(TokenType::Program, "'program'")?;
		let mut declarations = Vec::new();
		let mut functions = Vec::new();
		loop {
			match self.peek()?.r#type {
				Int | Ref => declarations.push(self.declaration()?),
				Define => functions.push(self.function()?),
				_ => break,
			}
		}
		self.expect(Begin, "'begin'")?;
		let body = self.statements()?;
		self.expect(End, "'end'")?;

		let token = self.peek()?.clone();
		if token.r#type != Eof {
			return Err(ParseError::new(token.line, ParseErrorType::TrailingTokens(token.to_string())).into());
		}
		Ok(Program { declarations, functions, body })
	}

	/// `( "int" | "ref" ) id_list ";"`
	fn declaration(&mut self) -> Result<Declaration<'a>, ParserError> {
		let kind = match self.advance()?.r#type {
			Int => VarKind::Int,
			_ => VarKind::Ref,
		};
		let names = self.identifiers()?;
		self.expect(Semicolon, "';' at end of declaration")?;
		Ok(Declaration { kind, names })
	}

	fn function(&mut self) -> Result<Function<'a>, ParserError> {
		self.expect(Define, "'define'")?;
		let name = self.identifier("function name after 'define'")?;
		self.expect(LeftParen, "'(' after function name")?;
		let parameters = self.optional_identifiers()?;
		self.expect(RightParen, "')' after parameters")?;
		self.expect(Begin, "'begin' before function body")?;
		let body = self.statements()?;
		self.expect(Endfunc, "'endfunc' at end of function body")?;
		Ok(Function { name, parameters, body })
	}

	/// One or more statements.
	fn statements(&mut self) -> Result<Vec<Statement<'a>>, ParserError> {
		let mut statements = vec![self.statement()?];
		while matches!(self.peek()?.r#type, Identifier(_) | If | While | Input | Output | Int | Ref) {
			statements.push(self.statement()?);
		}
		Ok(statements)
	}

	fn statement(&mut self) -> Result<Statement<'a>, ParserError> {
		let token = self.peek()?.clone();
		match token.r#type {
			Identifier(_) => self.assign_or_call(),
			If => self.if_statement(),
			While => self.while_statement(),
			Input => {
				self.advance()?;
				let target = self.identifier("identifier after 'input'")?;
				self.expect(Semicolon, "';' at end of input statement")?;
				Ok(Statement::Input(target))
			}
			Output => {
				self.advance()?;
				let expression = self.expression()?;
				self.expect(Semicolon, "';' at end of output statement")?;
				Ok(Statement::Output(expression))
			}
			Int | Ref => Ok(Statement::VarDeclaration(self.declaration()?)),
			_ => Err(ParseError::new(token.line, ParseErrorType::InvalidStatement(token.to_string())).into()),
		}
	}

	fn assign_or_call(&mut self) -> Result<Statement<'a>, ParserError> {
		let target = self.identifier("identifier")?;
		let token = self.advance()?;
		match token.r#type {
			Equal => {
				let value = match self.peek()?.r#type {
					New => {
						self.advance()?;
						AssignValue::New
					}
					Ref => {
						self.advance()?;
						AssignValue::Ref(self.identifier("identifier after 'ref'")?)
					}
					_ => AssignValue::Expression(self.expression()?),
				};
				self.expect(Semicolon, "';' at end of assignment")?;
				Ok(Statement::Assign { target, value })
			}
			LeftParen => {
				let arguments = self.optional_identifiers()?;
				self.expect(RightParen, "')' after arguments")?;
				self.expect(Semicolon, "';' at end of function call")?;
				Ok(Statement::Call { name: target, arguments })
			}
			_ => Err(ParseError::new(token.line, ParseErrorType::Expected {
				expected: "'=' or '(' after identifier",
				found:    token.to_string(),
			})
			.into()),
		}
	}

	fn if_statement(&mut self) -> Result<Statement<'a>, ParserError> {
		self.expect(If, "'if'")?;
		let condition = self.condition()?;
		self.expect(Then, "'then' after if condition")?;
		let then_branch = self.statements()?;
		let else_branch = if self.peek()?.r#type == Else {
			self.advance()?;
			Some(self.statements()?)
		} else {
			None
		};
		self.expect(Endif, "'endif' at end of if statement")?;
		Ok(Statement::If { condition, then_branch, else_branch })
	}

	fn while_statement(&mut self) -> Result<Statement<'a>, ParserError> {
		self.expect(While, "'while'")?;
		let condition = self.condition()?;
		self.expect(Begin, "'begin' before loop body")?;
		let body = self.statements()?;
		self.expect(Endwhile, "'endwhile' at end of loop body")?;
		Ok(Statement::While { condition, body })
	}

	fn condition(&mut self) -> Result<Condition<'a>, ParserError> {
		if self.peek()?.r#type == Bang {
			self.advance()?;
			self.expect(LeftParen, "'(' after '!'")?;
			let inner = self.condition()?;
			self.expect(RightParen, "')' at end of negation")?;
			return Ok(Condition::Not(Box::new(inner)));
		}
		let comparison = self.comparison()?;
		if self.peek()?.r#type == Or {
			self.advance()?;
			return Ok(Condition::Or(comparison, Box::new(self.condition()?)));
		}
		Ok(Condition::Comparison(comparison))
	}

	fn comparison(&mut self) -> Result<Comparison<'a>, ParserError> {
		let left = self.expression()?;
		let token = self.advance()?;
		let operator = match token.r#type {
			EqualEqual => CompareOp::Equal,
			Less => CompareOp::Less,
			LessEqual => CompareOp::LessEqual,
			_ => {
				return Err(ParseError::new(token.line, ParseErrorType::InvalidComparison(token.to_string())).into());
			}
		};
		let right = self.expression()?;
		Ok(Comparison { left, operator, right })
	}

	/// Parse `term (('+' | '-') expr)?`, recursing on the right.
	fn expression(&mut self) -> Result<Expression<'a>, ParserError> {
		let left = self.term()?;
		let operator = match self.peek()?.r#type {
			Plus => AddOp::Plus,
			Minus => AddOp::Minus,
			_ => return Ok(Expression::Term(left)),
		};
		self.advance()?;
		Ok(Expression::Binary { left, operator, right: Box::new(self.expression()?) })
	}

	/// Parse `factor ('*' term)?`, recursing on the right.
	fn term(&mut self) -> Result<Term<'a>, ParserError> {
		let left = self.factor()?;
		if self.peek()?.r#type != Star {
			return Ok(Term::Factor(left));
		}
		self.advance()?;
		Ok(Term::Product { left, right: Box::new(self.term()?) })
	}

	fn factor(&mut self) -> Result<Factor<'a>, ParserError> {
		let token = self.advance()?;
		match token.r#type {
			Identifier(name) => Ok(Factor::Variable(Ident::new(name, token.line))),
			Constant(value) => Ok(Factor::Constant(value)),
			LeftParen => {
				let expression = self.expression()?;
				let closing = self.peek()?;
				if closing.r#type != RightParen {
					return Err(ParseError::new(closing.line, ParseErrorType::UnterminatedParenthesis).into());
				}
				self.advance()?; // consume ')'
				Ok(Factor::Grouping(Box::new(expression)))
			}
			_ => Err(ParseError::new(token.line, ParseErrorType::InvalidFactor(token.to_string())).into()),
		}
	}

	/// `ID ("," ID)*`
	fn identifiers(&mut self) -> Result<Vec<Ident<'a>>, ParserError> {
		let mut identifiers = vec![self.identifier("identifier")?];
		while self.peek()?.r#type == Comma {
			self.advance()?;
			identifiers.push(self.identifier("identifier after ','")?);
		}
		Ok(identifiers)
	}

	/// An identifier list that may be empty, as in `f()`.
	fn optional_identifiers(&mut self) -> Result<Vec<Ident<'a>>, ParserError> {
		if matches!(self.peek()?.r#type, Identifier(_)) { self.identifiers() } else { Ok(Vec::new()) }
	}

	fn identifier(&mut self, expected: &'static str) -> Result<Ident<'a>, ParserError> {
		let token = self.advance()?;
		match token.r#type {
			Identifier(name) => Ok(Ident::new(name, token.line)),
			_ => Err(ParseError::new(token.line, ParseErrorType::Expected { expected, found: token.to_string() }).into()),
		}
	}

	/// Consume a token of the given type or fail naming what was expected.
	fn expect(&mut self, r#type: TokenType<'a>, expected: &'static str) -> Result<Token<'a>, ParserError> {
		let token = self.advance()?;
		if token.r#type == r#type {
			Ok(token)
		} else {
			Err(ParseError::new(token.line, ParseErrorType::Expected { expected, found: token.to_string() }).into())
		}
	}

	/// Advance to the next token.
	fn advance(&mut self) -> Result<Token<'a>, ParserError> {
		self.tokens.next().ok_or_else(|| anyhow!("Unexpected EOF").into())
	}

	/// Peek at the current token.
	fn peek(&mut self) -> Result<&Token<'a>, ParserError> {
		self.tokens.peek().ok_or_else(|| anyhow!("Unexpected EOF").into())
	}
}
