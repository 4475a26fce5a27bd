//! Error types.
//!
//! Rejections by a membership oracle are *not* errors: they are the normal
//! signal the learner prunes candidate rules with. Errors are reserved for
//!
//! - IO problems on the grammar file,
//! - format problems in the grammar file, when the loader runs strict,
//! - a target grammar rejecting one of its own samples
//!   ([`ErrorKind::InconsistentSample`][inconsistent]),
//! - resource bounds: powerset cap and timeout.
//!
//! [inconsistent]: enum.ErrorKind.html#variant.InconsistentSample
//! (InconsistentSample variant of the ErrorKind enum)

use crate::common::*;

/// Parse error data.
#[derive(Debug)]
pub struct ParseErrorData {
    /// Error message.
    pub msg: String,
    /// Line that caused the error.
    pub line: String,
    /// Line number of the error, starting at `1`.
    pub line_no: usize,
}
impl ParseErrorData {
    /// Constructor.
    pub fn new<S: Into<String>, L: Into<String>>(msg: S, line: L, line_no: usize) -> Self {
        ParseErrorData {
            msg: msg.into(),
            line: line.into(),
            line_no,
        }
    }
}
impl fmt::Display for ParseErrorData {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let line_str = format!("{} ", self.line_no);
        writeln!(
            fmt,
            "{} at line {}:",
            self.msg,
            conf.emph(&format!("{}", self.line_no))
        )?;
        writeln!(fmt, "{0: ^1$}|", "", line_str.len())?;
        writeln!(fmt, "{}| {}", line_str, conf.bad(&self.line))?;
        write!(
            fmt,
            "{0: ^1$}| {2}",
            "",
            line_str.len(),
            conf.bad(&format!("{0:^>1$}", "", self.line.len()))
        )
    }
}

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Res;
    }

    foreign_links {
        Io(::std::io::Error) #[doc = "IO error."];
    }

    errors {
        #[doc = "Parse error."]
        ParseError(data: ParseErrorData) {
            description("parse error")
            display("{}", data)
        }
        #[doc = "A sample of the target grammar is rejected by the target grammar."]
        InconsistentSample(sample: String) {
            description("sample rejected by its own grammar")
            display("sample `{}` is rejected by the target grammar", sample)
        }
        #[doc = "Context set enumeration would exceed the cap."]
        PowersetCap(cap: usize, reached: usize) {
            description("powerset cap exceeded")
            display(
                "powerset enumeration reached {} context sets, cap is {}",
                reached, cap
            )
        }
        #[doc = "Timeout reached."]
        Timeout {
            description("timeout")
            display("timeout")
        }
    }
}

impl Error {
    /// True if the kind of the error is [`ErrorKind::Timeout`][timeout].
    ///
    /// [timeout]: enum.ErrorKind.html#variant.Timeout
    /// (ErrorKind's Timeout variant)
    pub fn is_timeout(&self) -> bool {
        matches!(*self.kind(), ErrorKind::Timeout)
    }

    /// True if the kind of the error is
    /// [`ErrorKind::InconsistentSample`][inconsistent].
    ///
    /// [inconsistent]: enum.ErrorKind.html#variant.InconsistentSample
    /// (ErrorKind's InconsistentSample variant)
    pub fn is_inconsistent(&self) -> bool {
        matches!(*self.kind(), ErrorKind::InconsistentSample(_))
    }

    /// True if the kind of the error is a parse error.
    pub fn is_parse_error(&self) -> bool {
        matches!(*self.kind(), ErrorKind::ParseError(_))
    }
}

/// Prints an error.
pub fn print_err(errs: &Error) {
    println!("({} \"", conf.bad("error"));
    for err in errs.iter() {
        for line in format!("{}", err).lines() {
            println!("  {}", line)
        }
    }
    println!("\")")
}
