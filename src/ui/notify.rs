//! One-line user notifications, the terminal stand-in for toasts.
//!
//! Success and info go to stdout; warnings and errors go to stderr so they
//! survive output redirection.

use console::style;

use super::icons::{CHECK, CROSS, INFO, WARN};

pub fn success(msg: impl AsRef<str>) {
    println!("{}{}", CHECK, style(msg.as_ref()).green());
}

pub fn info(msg: impl AsRef<str>) {
    println!("{}{}", INFO, msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    eprintln!("{}{}", WARN, style(msg.as_ref()).yellow());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{}{}", CROSS, style(msg.as_ref()).red().bold());
}

/// Print an error together with its `source()` chain.
pub fn error_chain(err: &anyhow::Error) {
    error(err.to_string());
    for cause in err.chain().skip(1) {
        eprintln!("    {} {}", style("caused by:").dim(), cause);
    }
}
