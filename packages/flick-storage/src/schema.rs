pub fn render_schema(vector_dim: u32) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded.replace("<VECTOR_DIM>", &vector_dim.to_string())
}

/// Splits rendered SQL into executable statements.
///
/// Semicolons inside `$$` function bodies do not end a statement.
pub fn split_statements(sql: &str) -> Vec<&str> {
	let mut statements = Vec::new();
	let mut start = 0;
	let mut in_body = false;
	let bytes = sql.as_bytes();
	let mut idx = 0;

	while idx < bytes.len() {
		if bytes[idx..].starts_with(b"$$") {
			in_body = !in_body;
			idx += 2;

			continue;
		}
		if bytes[idx] == b';' && !in_body {
			push_statement(&mut statements, &sql[start..idx]);

			start = idx + 1;
		}

		idx += 1;
	}

	push_statement(&mut statements, &sql[start..]);

	statements
}

fn push_statement<'a>(statements: &mut Vec<&'a str>, raw: &'a str) {
	let trimmed = raw.trim();

	if !trimmed.is_empty() {
		statements.push(trimmed);
	}
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_movies.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_movies.sql")),
				"functions/002_match_movies.sql" =>
					out.push_str(include_str!("../../../sql/functions/002_match_movies.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
