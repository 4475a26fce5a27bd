//! Grammar file loader.
//!
//! The format is line-based. Section headers start with `#`, the name of the
//! section is the alphanumeric characters following it:
//!
//! ```text
//! #P0
//! N
//! #P1
//! S->T
//! #P2
//! T->A,B
//! #PL
//! A->a
//! B->b
//! #Starts
//! S
//! #Samples
//! a b
//! ```
//!
//! Blank lines are ignored, so is whitespace around symbols. A line not
//! matching the pattern of its section is reported and skipped, or is an
//! error if the loader is strict.

use std::path::Path;

use crate::common::*;
use crate::grammar::Cfg;

/// Sections of a grammar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Empty rules.
    P0,
    /// Unary rules.
    P1,
    /// Binary rules.
    P2,
    /// Lexical rules.
    Pl,
    /// Start symbols.
    Starts,
    /// Samples.
    Samples,
}

impl Section {
    /// Section of a header name.
    fn of_str(name: &str) -> Option<Self> {
        match name {
            "P0" => Some(Section::P0),
            "P1" => Some(Section::P1),
            "P2" => Some(Section::P2),
            "PL" => Some(Section::Pl),
            "Starts" => Some(Section::Starts),
            "Samples" => Some(Section::Samples),
            _ => None,
        }
    }
}

/// Grammar file parser.
pub struct Parser {
    /// Grammar so far.
    cfg: Cfg,
    /// Current section, `None` before the first header or after an unknown
    /// one.
    section: Option<Section>,
    /// Format errors are fatal.
    strict: bool,
    /// Number of lines skipped.
    skipped: usize,
}

impl Parser {
    /// Constructor.
    pub fn new(strict: bool) -> Self {
        Parser {
            cfg: Cfg::new(),
            section: None,
            strict,
            skipped: 0,
        }
    }

    /// Number of lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Grammar parsed.
    pub fn into_cfg(self) -> Cfg {
        self.cfg
    }

    /// Reports a format error.
    ///
    /// Fails if strict, warns and skips the line otherwise.
    fn error<S: Into<String>>(&mut self, msg: S, line: &str, line_no: usize) -> Res<()> {
        let data = ParseErrorData::new(msg, line, line_no);
        if self.strict {
            bail!(ErrorKind::ParseError(data))
        }
        warn! { "{}", data ; "skipping line" }
        self.skipped += 1;
        Ok(())
    }

    /// Parses a line.
    ///
    /// `line_no` starts at `1`.
    pub fn line(&mut self, line: &str, line_no: usize) -> Res<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        if let Some(header) = trimmed.strip_prefix('#') {
            let name: String = header
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect();
            self.section = Section::of_str(&name);
            if self.section.is_none() {
                return self.error(format!("unknown section `{}`", name), line, line_no);
            }
            return Ok(());
        }

        let section = if let Some(section) = self.section {
            section
        } else {
            return self.error("expected a section header", line, line_no);
        };

        match section {
            Section::P0 => match symbol(trimmed) {
                Some(lhs) => self.cfg.add_p0(lhs),
                None => return self.error("illegal empty rule", line, line_no),
            },
            Section::P1 => match rule(trimmed).and_then(|(lhs, rhs)| Some((lhs, symbol(rhs)?))) {
                Some((lhs, rhs)) => self.cfg.add_p1(lhs, rhs),
                None => return self.error("illegal unary rule", line, line_no),
            },
            Section::P2 => match rule(trimmed).and_then(|(lhs, rhs)| {
                let (rhs_1, rhs_2) = rhs.split_once(',')?;
                Some((lhs, symbol(rhs_1)?, symbol(rhs_2)?))
            }) {
                Some((lhs, rhs_1, rhs_2)) => self.cfg.add_p2(lhs, rhs_1, rhs_2),
                None => return self.error("illegal binary rule", line, line_no),
            },
            Section::Pl => match rule(trimmed).and_then(|(lhs, rhs)| Some((lhs, symbol(rhs)?))) {
                Some((lhs, rhs)) => self.cfg.add_pl(lhs, rhs),
                None => return self.error("illegal lexical rule", line, line_no),
            },
            Section::Starts => match symbol(trimmed) {
                Some(start) => {
                    let _ = self.cfg.add_start(start);
                }
                None => return self.error("illegal start symbol", line, line_no),
            },
            Section::Samples => self.cfg.add_sample(word(trimmed)),
        }

        Ok(())
    }
}

/// A symbol: no whitespace, no `->` and no `,`.
fn symbol(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() || s.contains(char::is_whitespace) || s.contains("->") || s.contains(',') {
        None
    } else {
        Some(s)
    }
}

/// Splits `lhs -> rhs`, checks `lhs` is a symbol.
fn rule(s: &str) -> Option<(&str, &str)> {
    let (lhs, rhs) = s.split_once("->")?;
    Some((symbol(lhs)?, rhs))
}

/// Parses a grammar from a string.
pub fn parse_str(s: &str, strict: bool) -> Res<Cfg> {
    let mut parser = Parser::new(strict);
    for (idx, line) in s.lines().enumerate() {
        parser.line(line, idx + 1)?
    }
    if parser.skipped() > 0 {
        log! { @info "skipped {} line(s)", parser.skipped() }
    }
    Ok(parser.into_cfg())
}

/// Parses a grammar from a reader.
pub fn read<R: Read>(mut reader: R, strict: bool) -> Res<Cfg> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    parse_str(&s, strict)
}

/// Parses a grammar file.
pub fn read_file<P: AsRef<Path>>(path: P, strict: bool) -> Res<Cfg> {
    let path = path.as_ref();
    let file = ::std::fs::File::open(path)
        .chain_err(|| format!("while opening grammar file `{}`", path.display()))?;
    read(file, strict).chain_err(|| format!("while reading grammar file `{}`", path.display()))
}

#[cfg(test)]
mod test {
    use super::*;

    static GRAMMAR: &str = "\
#P0
N
#P1
S -> T
#P2
T->A,B
T -> A , N
#PL
A->a
B->b
#Starts
S

#Samples
a b
a
";

    #[test]
    fn full_grammar() {
        let cfg = parse_str(GRAMMAR, true).unwrap();
        assert_eq!(cfg.p0().len(), 1);
        assert_eq!(cfg.p1().len(), 1);
        assert_eq!(cfg.p2().len(), 2);
        assert_eq!(cfg.pl().len(), 2);
        assert_eq!(cfg.p1()[0].lhs, "S");
        assert_eq!(cfg.p1()[0].rhs, "T");
        assert_eq!(cfg.p2()[1].rhs_2, "N");
        assert!(cfg.starts().contains("S"));
        assert_eq!(cfg.samples(), &[word("a b"), word("a")][..]);
    }

    #[test]
    fn lenient_skips_bad_lines() {
        let s = "\
A->a
#P1
S->
#PL
A->a
B b
#Whatever
junk
#Starts
A
#Samples
a
";
        let cfg = parse_str(s, false).unwrap();
        assert_eq!(cfg.p1().len(), 0);
        assert_eq!(cfg.pl().len(), 1);
        assert_eq!(cfg.starts().len(), 1);
        assert_eq!(cfg.samples().len(), 1);

        let mut parser = Parser::new(false);
        for (idx, line) in s.lines().enumerate() {
            parser.line(line, idx + 1).unwrap()
        }
        // `A->a` before any header, `S->`, `B b`, `#Whatever`, `junk`.
        assert_eq!(parser.skipped(), 5);
    }

    #[test]
    fn strict_fails() {
        let s = "#P2\nT->A B\n";
        match parse_str(s, true) {
            Err(e) => {
                assert!(e.is_parse_error());
                match e.kind() {
                    ErrorKind::ParseError(data) => {
                        assert_eq!(data.line_no, 2);
                        assert_eq!(data.line, "T->A B")
                    }
                    kind => panic!("unexpected error {}", kind),
                }
            }
            Ok(_) => panic!("expected a parse error"),
        }
    }

    #[test]
    fn missing_file() {
        assert!(read_file("rsc/does/not/exist.cfg", false).is_err())
    }
}
