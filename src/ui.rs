//! Styled terminal output helpers

use console::style;

/// Print a green step header with its value
pub fn step(label: &str, value: &str) {
    println!("{} {value}", style(format!("{label}:")).bold().green());
}

/// Print a yellow warning to stderr
pub fn warn(message: &str) {
    eprintln!("{} {message}", style("Warning:").bold().yellow());
}
