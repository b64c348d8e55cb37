//! Lenient boolean for query-string flags such as `archived`.

use std::fmt;

use serde::{
	Deserializer,
	de::{self, Unexpected, Visitor},
};

/// Accepts `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` and `t`/`f`/`y`/`n`, in any case.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	deserializer.deserialize_any(FlagVisitor)
}

pub(crate) fn parse(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
		"false" | "f" | "0" | "no" | "n" | "off" => Some(false),
		_ => None,
	}
}

struct FlagVisitor;
impl Visitor<'_> for FlagVisitor {
	type Value = bool;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a boolean flag such as true, false, 1, 0, yes, no, on or off")
	}

	fn visit_bool<E>(self, value: bool) -> Result<bool, E>
	where
		E: de::Error,
	{
		Ok(value)
	}

	fn visit_u64<E>(self, value: u64) -> Result<bool, E>
	where
		E: de::Error,
	{
		match value {
			0 => Ok(false),
			1 => Ok(true),
			_ => Err(E::invalid_value(Unexpected::Unsigned(value), &self)),
		}
	}

	fn visit_i64<E>(self, value: i64) -> Result<bool, E>
	where
		E: de::Error,
	{
		match value {
			0 => Ok(false),
			1 => Ok(true),
			_ => Err(E::invalid_value(Unexpected::Signed(value), &self)),
		}
	}

	fn visit_str<E>(self, value: &str) -> Result<bool, E>
	where
		E: de::Error,
	{
		parse(value).ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
	}
}
