//! Entry point for the binary.

use gramind::common::*;

fn main() {
    Config::validate_args();
    // Work and report error if any.
    if let Err(errs) = gramind::work() {
        print_err(&errs);
        ::std::process::exit(2)
    } else {
        ::std::process::exit(0)
    }
}
