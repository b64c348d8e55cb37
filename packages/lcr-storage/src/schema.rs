//! DDL for the contest catalog and both record tables, bundled from `sql/`.

const INIT: &str = include_str!("../../../sql/init.sql");
const TABLES: [(&str, &str); 3] = [
	("tables/001_contests.sql", include_str!("../../../sql/tables/001_contests.sql")),
	(
		"tables/002_contest_records_predict.sql",
		include_str!("../../../sql/tables/002_contest_records_predict.sql"),
	),
	(
		"tables/003_contest_records_archive.sql",
		include_str!("../../../sql/tables/003_contest_records_archive.sql"),
	),
];

/// `init.sql` with every `\ir` line replaced by the bundled file it names.
pub fn render_schema() -> String {
	let mut out = String::new();

	for line in INIT.lines() {
		let included = line
			.trim()
			.strip_prefix("\\ir ")
			.and_then(|path| TABLES.iter().find(|(name, _)| *name == path.trim()))
			.map(|(_, sql)| *sql);

		out.push_str(included.unwrap_or(line));
		out.push('\n');
	}

	out
}

/// Non-empty statements of `sql`. The bundled DDL has no `;` inside literals.
pub fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}
