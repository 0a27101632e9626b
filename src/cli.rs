//! Status output helpers.
//!
//! Everything here writes to stderr: stdout carries the MCP protocol stream,
//! so a stray println would corrupt the session.

pub fn gen_prefix(prefix: &str) -> String {
    format!("{prefix} ")
}

#[macro_export]
macro_rules! msg {
    ($($arg:tt)+) => {{
        eprint!("      ");
        eprintln!($($arg)+);
    }};
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {{
        eprint!("{}", $crate::cli::gen_prefix(&console::style("INFO ").on_blue().bright().to_string()));
        eprintln!($($arg)+);
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {{
        eprint!("{}", $crate::cli::gen_prefix(&console::style("WARN ").on_yellow().bright().to_string()));
        eprintln!($($arg)+);
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {{
        eprint!("{}", $crate::cli::gen_prefix(&console::style("ERROR").on_red().bright().to_string()));
        eprintln!($($arg)+);
    }};
}

#[macro_export]
macro_rules! due_to {
    ($($arg:tt)+) => {{
        eprint!("{}", $crate::cli::gen_prefix(&console::style("DUE TO").dim().to_string()));
        eprintln!($($arg)+);
    }};
}
