use std::cell::RefCell;

use colored::Colorize;

/// Print a line of execution trace, if tracing is enabled.
#[macro_export]
macro_rules! tprintln {
    ( $fmt:literal $($tt:tt)* ) => {{
        if $crate::output::Output::is_tracing() {
            let s = format!(
                concat!($fmt, "\n")
                $($tt)*
            );
            $crate::output::Output::Trace.print_str(&s);
        }
    }};
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// Results, to stdout.
    Normal,
    /// Machine trace, to stderr.
    Trace,
}

impl Output {
    thread_local! {
        static IS_MINIMAL: RefCell<bool> = const { RefCell::new(false) };
        static IS_TRACING: RefCell<bool> = const { RefCell::new(false) };
    }

    pub fn set_minimal(new_value: bool) -> bool {
        Self::IS_MINIMAL.with(|value| value.replace(new_value))
    }
    pub fn is_minimal() -> bool {
        Self::IS_MINIMAL.with(|value| *value.borrow())
    }

    pub fn set_tracing(new_value: bool) -> bool {
        Self::IS_TRACING.with(|value| value.replace(new_value))
    }
    pub fn is_tracing() -> bool {
        Self::IS_TRACING.with(|value| *value.borrow())
    }

    pub fn print_str(&self, string: &str) {
        match self {
            Self::Normal => print!("{}", string),
            // Never colored if `--minimal`
            Self::Trace if Self::is_minimal() => eprint!("{}", string),
            Self::Trace => eprint!("{}", string.blue()),
        }
    }
}
