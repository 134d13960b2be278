/// A token produced by the scanner
#[derive(Debug, Clone)]
pub(crate) struct Token<'a> {
	pub r#type: TokenType<'a>,
	pub lexeme: &'a str,
	pub line:   usize,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType<'a>, lexeme: &'a str, line: usize) -> Self { Self { r#type, lexeme, line } }
}

/// The different types of tokens in Core, The copying is lightweight
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenType<'a> {
	/// New Line Character `\n`.
	NewLine,
	/// Empty Character: ` `, `\r`, `\t`.
	EmptyChar,
	/// Semicolon `;`.
	Semicolon,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Comma `,`.
	Comma,
	/// Assignment `=`.
	Equal,
	/// Negation `!`.
	Bang,
	/// Equal equal `==`.
	EqualEqual,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Plus `+`.
	Plus,
	/// Minus `-`.
	Minus,
	/// Asterisk `*`.
	Star,
	/// Identifier, e.g. variable or function name.
	Identifier(&'a str),
	/// Constant in `0..=1023`.
	Constant(i32),
	Program,
	Begin,
	End,
	/// `new`, allocates a heap cell.
	New,
	Int,
	/// `ref`, both the declaration kind and the aliasing assignment.
	Ref,
	/// Function declaration keyword.
	Define,
	Endfunc,
	If,
	Then,
	Else,
	Endif,
	While,
	Endwhile,
	Or,
	Input,
	Output,
	/// End of file/input.
	Eof,
}

impl<'a> TokenType<'a> {
	pub fn is_ignored(&self) -> bool { matches!(self, TokenType::EmptyChar | TokenType::NewLine) }

	pub fn keyword_or_identifier(value: &'a str) -> Self {
		match value {
			"program" => TokenType::Program,
			"begin" => TokenType::Begin,
			"end" => TokenType::End,
			"new" => TokenType::New,
			"int" => TokenType::Int,
			"ref" => TokenType::Ref,
			"define" => TokenType::Define,
			"endfunc" => TokenType::Endfunc,
			"if" => TokenType::If,
			"then" => TokenType::Then,
			"else" => TokenType::Else,
			"endif" => TokenType::Endif,
			"while" => TokenType::While,
			"endwhile" => TokenType::Endwhile,
			"or" => TokenType::Or,
			"input" => TokenType::Input,
			"output" => TokenType::Output,
			_ => TokenType::Identifier(value),
		}
	}
}

impl std::fmt::Display for Token<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.r#type {
			TokenType::Eof => write!(f, "end of file"),
			_ => write!(f, "'{}'", self.lexeme),
		}
	}
}
