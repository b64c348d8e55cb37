//! Shared command-line presentation for the contest records binaries.

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ABOUT: &str = "Read-only HTTP API over predicted and archived contest rankings.";

pub fn styles() -> Styles {
	let accent = AnsiColor::Yellow.on_default();

	Styles::styled()
		.header(accent | Effects::BOLD | Effects::UNDERLINE)
		.usage(accent | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Cyan.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
		.invalid(AnsiColor::Red.on_default())
		.valid(AnsiColor::Green.on_default())
}
