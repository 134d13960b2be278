#[cfg(test)]
mod tests {
	use std::{fs::read_to_string, path::PathBuf};

	use pretty_assertions::assert_eq;
	use zcore::{CoreError, Corer, DataFile, InterpreterError};

	fn program_path(name: &str) -> PathBuf {
		PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("programs").join(name)
	}

	/// Run `tests/programs/<name>.core` against `<name>.data` when it exists,
	/// returning the result together with everything printed.
	fn run_program(name: &str) -> (Result<(), CoreError>, String) {
		let source = read_to_string(program_path(&format!("{name}.core"))).unwrap();
		let input = match read_to_string(program_path(&format!("{name}.data"))) {
			Ok(data) => DataFile::parse(&data).unwrap(),
			Err(_) => DataFile::default(),
		};
		let mut output = Vec::new();
		let result = Corer.run(&source, input, &mut output);
		(result, String::from_utf8(output).unwrap())
	}

	fn output_of(name: &str) -> String {
		let (result, output) = run_program(name);
		assert!(result.is_ok(), "{name}: {result:?}");
		output
	}

	#[test]
	fn test_sum_through_reference_parameter() { assert_eq!(output_of("sum"), "60\n"); }

	#[test]
	fn test_aliasing() { assert_eq!(output_of("aliasing"), "6\n6\n100\n"); }

	#[test]
	fn test_recursive_factorial() { assert_eq!(output_of("factorial"), "120\n5\n"); }

	#[test]
	fn test_scopes() { assert_eq!(output_of("scopes"), "2\n1\n0\n0\n"); }

	#[test]
	fn test_short_circuit_is_observable() {
		let (result, output) = run_program("short_circuit");
		assert_eq!(output, "null\n1\n");
		assert_eq!(result.unwrap_err().to_string(), "Runtime error: line 9: Can't use null reference 'r' here");
	}

	#[test]
	fn test_output_before_runtime_error_is_kept() {
		let (result, output) = run_program("dangling");
		assert_eq!(output, "1\n");
		assert!(matches!(
			result,
			Err(CoreError::RuntimeError(InterpreterError::DanglingReference { ref name, line: 5 })) if name == "r"
		));
	}

	#[test]
	fn test_semantic_error_stops_before_running() {
		let (result, output) = run_program("undeclared");
		assert_eq!(output, "");
		assert_eq!(result.unwrap_err().to_string(), "Semantic error: line 5: Attempting to use undeclared variable 'y'");
	}

	#[test]
	fn test_constant_out_of_range() {
		let (result, _) = run_program("big_constant");
		assert_eq!(
			result.unwrap_err().to_string(),
			"Syntax error: line 3: Constants must be in the range 0-1023, found 1024"
		);
	}

	#[test]
	fn test_input_exhausted() {
		let mut output = Vec::new();
		let source = read_to_string(program_path("sum.core")).unwrap();
		let result = Corer.run(&source, DataFile::parse("2 1").unwrap(), &mut output);
		assert_eq!(
			result.unwrap_err().to_string(),
			"Runtime error: line 12: No more input values available in data file for 'value'"
		);
		assert_eq!(output, b"");
	}

	#[test]
	fn test_bad_data_file() {
		let data = read_to_string(program_path("bad.data")).unwrap();
		assert_eq!(
			DataFile::parse(&data).unwrap_err().to_string(),
			"Data file error: line 2: expected a constant, found 'three'"
		);
	}

	#[test]
	fn test_check_file() {
		let corer = Corer;
		assert!(corer.check_file(program_path("factorial.core")).is_ok());
		assert!(matches!(corer.check_file(program_path("undeclared.core")), Err(CoreError::SemanticError(_))));
		assert!(matches!(corer.check_file(program_path("missing.core")), Err(CoreError::InternalError(_))));
	}

	#[test]
	fn test_run_file() {
		let result = Corer.run_file(program_path("sum.core"), program_path("sum.data"));
		assert!(result.is_ok(), "{result:?}");
	}

	#[test]
	fn test_run_file_checks_program_before_data() {
		let result = Corer.run_file(program_path("undeclared.core"), program_path("bad.data"));
		assert!(matches!(result, Err(CoreError::SemanticError(_))));
		let result = Corer.run_file(program_path("undeclared.core"), program_path("missing.data"));
		assert!(matches!(result, Err(CoreError::SemanticError(_))));
	}

	#[test]
	fn test_null_read_is_stored() {
		assert_eq!(output_of("null_store"), "null\nnull\n4\n");
	}
}
