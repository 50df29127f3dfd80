pub fn render_schema(vector_dim: u32) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded.replace("<VECTOR_DIM>", &vector_dim.to_string())
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_vibes.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_vibes.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn substitutes_the_vector_dimension() {
		let schema = render_schema(1_536);

		assert!(schema.contains("vector(1536)"));
		assert!(!schema.contains("<VECTOR_DIM>"));
	}

	#[test]
	fn expands_every_include() {
		let schema = render_schema(8);

		assert!(schema.contains("CREATE EXTENSION IF NOT EXISTS vector"));
		assert!(schema.contains("CREATE TABLE IF NOT EXISTS vibes"));
		assert!(!schema.contains("\\ir "));
	}
}
