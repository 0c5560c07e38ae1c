//! Terminal color support for formatted output.
//!
//! 1. **With `std` feature (default)**: uses the `colored` crate, which
//!    respects `NO_COLOR`, `TERM` and TTY detection.
//!
//! 2. **Without `std`**: plain text.

use alloc::string::String;

#[cfg(feature = "std")]
use colored::Colorize;

#[cfg(feature = "std")]
pub fn green(s: &str) -> String {
    s.green().to_string()
}

#[cfg(feature = "std")]
pub fn yellow(s: &str) -> String {
    s.yellow().to_string()
}

#[cfg(feature = "std")]
pub fn bold(s: &str) -> String {
    s.bold().to_string()
}

#[cfg(feature = "std")]
pub fn dim(s: &str) -> String {
    s.dimmed().to_string()
}

#[cfg(feature = "std")]
pub fn bold_cyan(s: &str) -> String {
    s.cyan().bold().to_string()
}

#[cfg(not(feature = "std"))]
pub fn green(s: &str) -> String {
    String::from(s)
}

#[cfg(not(feature = "std"))]
pub fn yellow(s: &str) -> String {
    String::from(s)
}

#[cfg(not(feature = "std"))]
pub fn bold(s: &str) -> String {
    String::from(s)
}

#[cfg(not(feature = "std"))]
pub fn dim(s: &str) -> String {
    String::from(s)
}

#[cfg(not(feature = "std"))]
pub fn bold_cyan(s: &str) -> String {
    String::from(s)
}
