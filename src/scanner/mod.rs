//! Turns Core source text into tokens.
//!
//! The lexical grammar is small: keywords and identifiers (a letter followed
//! by letters or digits), unsigned constants of at most four digits in
//! `0..=1023`, and a fixed set of one- and two-character specials. Keywords
//! are recognised by `maximal munch`: we scan the whole word first and only
//! then decide whether it is reserved.
//!
//! The same scanner tokenises the data file that feeds `input` statements.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub(crate) use token::*;

use crate::{
	CoreError,
	error::scanner::{ScanError, ScanErrorType, ScannerError},
};

/// Longest constant the language accepts, in digits.
const MAX_CONSTANT_DIGITS: usize = 4;
/// Largest constant the language accepts.
const MAX_CONSTANT: i32 = 1023;

/// A scanner for Core source code
pub(crate) struct Scanner<'a> {
	source:      &'a str,
	source_iter: Peekable<CharIndices<'a>>,
	/// Byte offset of the first character of the lexeme being scanned.
	start:       usize,
	/// Byte offset just past the last consumed character.
	cursor:      usize,
	/// 1-based line of `cursor`, stamped on every token and error.
	line:        usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Scan all tokens from the source code, stopping at the first error.
	pub fn scan_tokens(mut self) -> Result<Vec<Token<'a>>, CoreError> {
		let mut tokens = Vec::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			match self.scan_token(&mut tokens) {
				Ok(()) => {}
				Err(ScannerError::ScanError(e)) => return Err(e.into()),
				Err(ScannerError::InternalError(e)) => return Err(e.into()),
			}
		}
		tokens.push(Token::new(Eof, "", self.line));
		tracing::trace!(count = tokens.len(), "scanned tokens");
		Ok(tokens)
	}

	/// Scan one lexeme, pushing a token unless it is whitespace.
	fn scan_token(&mut self, tokens: &mut Vec<Token<'a>>) -> Result<(), ScannerError> {
		let next_char = self.advance().context("Unexpected EOF")?;
		#[rustfmt::skip]
		let r#type = match next_char {
			';' => Semicolon,
			'(' => LeftParen,
			')' => RightParen,
			',' => Comma,
			'!' => Bang,
			'+' => Plus,
			'-' => Minus,
			'*' => Star,
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => { self.line += 1; NewLine }
			c if c.is_ascii_digit() => self.constant()?,
			c if c.is_ascii_alphabetic() => self.identifier(),
			_ => return Err(ScanError::new(self.line, ScanErrorType::UnexpectedCharacter(next_char)).into()),
		};

		if !r#type.is_ignored() {
			let lexeme = &self.source[self.start..self.cursor];
			tokens.push(Token::new(r#type, lexeme, self.line));
		}

		Ok(())
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Scan a constant, rejecting anything longer than four digits or above 1023.
	fn constant(&mut self) -> Result<TokenType<'a>, ScannerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		let digits = &self.source[self.start..self.cursor];
		if digits.len() > MAX_CONSTANT_DIGITS {
			return Err(ScanError::new(self.line, ScanErrorType::ConstantTooLong(digits.to_string())).into());
		}
		let value: i32 = digits.parse().context("Failed to parse constant")?;
		if value > MAX_CONSTANT {
			return Err(ScanError::new(self.line, ScanErrorType::ConstantOutOfRange(value)).into());
		}
		Ok(Constant(value))
	}

	/// Scan a word, then decide whether it is reserved.
	fn identifier(&mut self) -> TokenType<'a> {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		TokenType::keyword_or_identifier(text)
	}
}
