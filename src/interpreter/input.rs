//! Where `input` statements get their values from.

use std::collections::VecDeque;

use crate::{CoreError, error::data::DataError, scanner::{Scanner, TokenType}};

/// A pull-based source of input values, consumed strictly in program order.
pub trait InputSource {
	/// The next value, or `None` once the source is exhausted.
	fn next_value(&mut self) -> Option<i32>;
}

/// The values of a data file: whitespace separated constants, tokenised with
/// the program scanner so the same `0..=1023` rule applies.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataFile {
	values: VecDeque<i32>,
}

impl DataFile {
	/// Tokenise `source`, rejecting anything that is not a constant.
	pub fn parse(source: &str) -> Result<Self, CoreError> {
		let tokens = match Scanner::new(source).scan_tokens() {
			Ok(tokens) => tokens,
			Err(CoreError::ScanError(e)) => return Err(DataError::from(e).into()),
			Err(e) => return Err(e),
		};
		let mut values = VecDeque::with_capacity(tokens.len());
		for token in tokens {
			match token.r#type {
				TokenType::Constant(value) => values.push_back(value),
				TokenType::Eof => break,
				_ => {
					return Err(DataError::NotAConstant { line: token.line, lexeme: token.lexeme.to_string() }.into());
				}
			}
		}
		tracing::debug!(count = values.len(), "loaded data file");
		Ok(Self { values })
	}

	/// Values not consumed yet.
	pub fn remaining(&self) -> usize { self.values.len() }
}

impl FromIterator<i32> for DataFile {
	fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self { Self { values: iter.into_iter().collect() } }
}

impl InputSource for DataFile {
	fn next_value(&mut self) -> Option<i32> { self.values.pop_front() }
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
	fn next_value(&mut self) -> Option<i32> { (**self).next_value() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_data_file() {
		let mut data = DataFile::parse("1 2\n  1023\n").unwrap();
		assert_eq!(data.remaining(), 3);
		assert_eq!(data.next_value(), Some(1));
		assert_eq!(data.next_value(), Some(2));
		assert_eq!(data.next_value(), Some(1023));
		assert_eq!(data.next_value(), None);
		assert_eq!(data.next_value(), None);
	}

	#[test]
	fn empty_data_file() {
		let mut data = DataFile::parse("").unwrap();
		assert_eq!(data.next_value(), None);
	}

	#[test]
	fn reject_non_constants() {
		assert!(matches!(
			DataFile::parse("1\nx 2"),
			Err(CoreError::DataError(DataError::NotAConstant { line: 2, .. }))
		));
		assert!(matches!(DataFile::parse("1 2000"), Err(CoreError::DataError(DataError::ScanError(_)))));
		assert!(matches!(DataFile::parse("1 -2"), Err(CoreError::DataError(DataError::NotAConstant { .. }))));
	}

	#[test]
	fn borrowed_sources_consume_the_original() {
		fn pull(mut source: impl InputSource) -> Option<i32> { source.next_value() }

		let mut data: DataFile = [4, 5].into_iter().collect();
		assert_eq!(pull(&mut data), Some(4));
		assert_eq!(data.remaining(), 1);
	}
}
