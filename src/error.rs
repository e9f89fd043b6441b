use std::num::ParseIntError;

use miette::{miette, LabeledSpan, Report, Severity};

use crate::span::Span;

// Loader errors

pub fn load_empty(src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::empty",
        help = "a program is a list of comma-separated integers like `1002,4,3,4,33`",
        labels = vec![LabeledSpan::at_offset(0, "no integers here")],
        "Program contains no integers",
    )
    .with_source_code(src.to_owned())
}

pub fn load_missing(span: Span, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::missing",
        help = "remove the extra comma, or add the missing integer",
        labels = vec![LabeledSpan::at(span, "expected an integer")],
        "Encountered an empty cell",
    )
    .with_source_code(src.to_owned())
}

pub fn load_bad_int(span: Span, src: &str, e: ParseIntError) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::bad_int",
        help = "cells are signed base-10 integers from -9223372036854775808 to 9223372036854775807",
        labels = vec![LabeledSpan::at(span, "incorrect integer")],
        "Encountered an invalid integer: {e}",
    )
    .with_source_code(src.to_owned())
}
