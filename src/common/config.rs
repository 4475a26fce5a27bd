//! Gramind's global configuration.

use std::time::{Duration, Instant};

use ansi_term::{Colour, Style};
use clap::Arg;

use crate::errors::*;

/// Clap `App` with static lifetimes.
pub type App = clap::Command<'static>;
/// Clap `ArgMatches`.
pub type Matches = clap::ArgMatches;

/// Learning configuration.
#[derive(Debug, Clone)]
pub struct LearnConf {
    /// Maximal cardinality of the context sets of the hypothesis.
    pub f: usize,
    /// Maximal number of context sets the powerset enumeration can produce.
    pub pow_cap: usize,
    /// Run the learned grammar on all samples at the end.
    pub check_learner: bool,
    /// Format errors in the grammar file are fatal.
    pub strict: bool,
    /// Timeout for the learning loop.
    pub timeout: Option<Duration>,
}
impl Default for LearnConf {
    fn default() -> Self {
        LearnConf {
            f: 1,
            pow_cap: 100_000,
            check_learner: true,
            strict: false,
            timeout: None,
        }
    }
}
impl LearnConf {
    /// Adds clap options to a clap App.
    pub fn add_args(app: App, mut order: usize) -> App {
        let mut order = || {
            order += 1;
            order
        };

        app.arg(
            Arg::new("f")
                .long("f")
                .help("maximal number of contexts in the context sets of the hypothesis")
                .validator(|s| bounded_int_validator(s, 1, 16))
                .value_name("int")
                .default_value("1")
                .takes_value(true)
                .number_of_values(1)
                .display_order(order()),
        )
        .arg(
            Arg::new("pow_cap")
                .long("pow_cap")
                .help("maximal number of context sets the learner can enumerate")
                .validator(int_validator)
                .value_name("int")
                .default_value("100000")
                .takes_value(true)
                .number_of_values(1)
                .display_order(order()),
        )
        .arg(
            Arg::new("check_learner")
                .long("check_learner")
                .help("checks the samples against the learned grammar at the end")
                .validator(bool_validator)
                .value_name(bool_format)
                .default_value("on")
                .takes_value(true)
                .number_of_values(1)
                .display_order(order()),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("format errors in the grammar file are fatal")
                .validator(bool_validator)
                .value_name(bool_format)
                .default_value("off")
                .takes_value(true)
                .number_of_values(1)
                .display_order(order()),
        )
    }

    /// Creates itself from some matches.
    pub fn new(matches: &Matches) -> Self {
        let f = int_of_matches(matches, "f");
        let pow_cap = int_of_matches(matches, "pow_cap");
        let check_learner = bool_of_matches(matches, "check_learner");
        let strict = bool_of_matches(matches, "strict");
        let timeout = match int_of_matches(matches, "timeout") {
            0 => None,
            n => Some(Duration::new(n as u64, 0)),
        };

        LearnConf {
            f,
            pow_cap,
            check_learner,
            strict,
            timeout,
        }
    }
}

/// Random sample generation configuration.
#[derive(Debug, Clone)]
pub struct GenConf {
    /// Number of samples to generate.
    pub count: usize,
    /// Seed of the generator.
    pub seed: u64,
    /// Maximal derivation depth.
    pub depth: usize,
}
impl Default for GenConf {
    fn default() -> Self {
        GenConf {
            count: 0,
            seed: 42,
            depth: 12,
        }
    }
}
impl GenConf {
    /// Adds clap options to a clap App.
    pub fn add_args(app: App, mut order: usize) -> App {
        let mut order = || {
            order += 1;
            order
        };

        app.arg(
            Arg::new("gen")
                .long("gen")
                .help("number of random samples to generate from the target grammar")
                .validator(int_validator)
                .value_name("int")
                .default_value("0")
                .takes_value(true)
                .number_of_values(1)
                .display_order(order()),
        )
        .arg(
            Arg::new("gen_seed")
                .long("gen_seed")
                .help("seed used for random sample generation")
                .validator(int_validator)
                .value_name("int")
                .default_value("42")
                .takes_value(true)
                .number_of_values(1)
                .display_order(order()),
        )
        .arg(
            Arg::new("gen_depth")
                .long("gen_depth")
                .help("maximal derivation depth for random sample generation")
                .validator(|s| bounded_int_validator(s, 1, 1000))
                .value_name("int")
                .default_value("12")
                .takes_value(true)
                .number_of_values(1)
                .display_order(order())
                .hide(true),
        )
    }

    /// Creates itself from some matches.
    pub fn new(matches: &Matches) -> Self {
        let count = int_of_matches(matches, "gen");
        let seed = int_of_matches(matches, "gen_seed") as u64;
        let depth = int_of_matches(matches, "gen_depth");
        GenConf { count, seed, depth }
    }
}

/// Global configuration.
pub struct Config {
    file: Option<String>,
    /// Verbosity.
    pub verb: usize,
    /// Statistics flag.
    pub stats: bool,
    /// Instant at which we'll timeout.
    timeout: Option<Instant>,
    /// Styles, for coloring.
    styles: Styles,

    /// Learning configuration.
    pub learn: LearnConf,
    /// Sample generation configuration.
    pub gen: GenConf,
}
impl ColorExt for Config {
    fn styles(&self) -> &Styles {
        &self.styles
    }
}
impl Config {
    /// Input file.
    #[inline]
    pub fn in_file(&self) -> Option<&String> {
        self.file.as_ref()
    }

    /// Checks if we're out of time.
    #[inline]
    pub fn check_timeout(&self) -> Res<()> {
        if let Some(max) = self.timeout.as_ref() {
            if &Instant::now() > max {
                bail!(ErrorKind::Timeout)
            }
        }
        Ok(())
    }

    /// The clap application, all options included.
    pub fn app() -> App {
        let mut app = App::new(crate_name!());
        app = Self::add_args(app, 0);
        app = LearnConf::add_args(app, 100);
        app = GenConf::add_args(app, 200);
        app
    }

    /// Validates the command-line arguments.
    ///
    /// Exits on `--help`, `--version` and bad arguments.
    pub fn validate_args() {
        let _ = Self::app().get_matches();
    }

    /// Parses command-line arguments and generates the configuration.
    ///
    /// Falls back to the default configuration if the arguments are not
    /// legal, which happens when running under a test harness. The binary
    /// calls [`validate_args`](#method.validate_args) first.
    pub fn clap() -> Self {
        let matches = Self::app()
            .try_get_matches()
            .unwrap_or_else(|_| Self::app().get_matches_from(vec![crate_name!()]));
        Self::of_matches(&matches)
    }

    /// Generates the configuration from some matches.
    pub fn of_matches(matches: &Matches) -> Self {
        // Input file.
        let file = matches.value_of("input file").map(|s| s.to_string());

        // Verbosity.
        let mut verb = 0;
        for _ in 0..matches.occurrences_of("verb") {
            verb += 1
        }
        for _ in 0..matches.occurrences_of("quiet") {
            if verb > 0 {
                verb -= 1
            }
        }

        // Colors.
        let color = atty::is(atty::Stream::Stdout) && bool_of_matches(matches, "color");
        let styles = Styles::new(color);

        // Profiling.
        let stats = bool_of_matches(matches, "stats");

        // Timeout.
        let timeout = match int_of_matches(matches, "timeout") {
            0 => None,
            n => Some(Instant::now() + Duration::new(n as u64, 0)),
        };

        let learn = LearnConf::new(matches);
        let gen = GenConf::new(matches);

        Config {
            file,
            verb,
            stats,
            timeout,
            styles,
            learn,
            gen,
        }
    }

    /// Adds clap options to a clap App.
    pub fn add_args(app: App, mut order: usize) -> App {
        let mut order = || {
            order += 1;
            order
        };

        app.author(crate_authors!())
            .version(*crate::common::version)
            .about("Learns context-free grammars from samples and membership queries.")
            .arg(
                Arg::new("input file")
                    .help("sets the grammar file to learn")
                    .index(1)
                    .display_order(order()),
            )
            .arg(
                Arg::new("verb")
                    .short('v')
                    .help("increases verbosity")
                    .takes_value(false)
                    .multiple_occurrences(true)
                    .display_order(order()),
            )
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .help("decreases verbosity")
                    .takes_value(false)
                    .multiple_occurrences(true)
                    .display_order(order()),
            )
            .arg(
                Arg::new("color")
                    .long("color")
                    .short('c')
                    .help("(de)activates coloring (off if output is not a tty)")
                    .validator(bool_validator)
                    .value_name(bool_format)
                    .default_value("on")
                    .takes_value(true)
                    .number_of_values(1)
                    .display_order(order()),
            )
            .arg(
                Arg::new("stats")
                    .long("stats")
                    .short('s')
                    .help("reports some statistics at the end of the run")
                    .validator(bool_validator)
                    .value_name(bool_format)
                    .default_value("no")
                    .takes_value(true)
                    .number_of_values(1)
                    .display_order(order()),
            )
            .arg(
                Arg::new("timeout")
                    .long("timeout")
                    .short('t')
                    .help("sets a timeout in seconds, `0` for none")
                    .validator(int_validator)
                    .value_name("int")
                    .default_value("0")
                    .takes_value(true)
                    .number_of_values(1)
                    .display_order(order()),
            )
    }
}

/// Contains some styles for coloring.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Emphasis style.
    emph: Style,
    /// Happy style.
    hap: Style,
    /// Sad style.
    sad: Style,
    /// Bad style.
    bad: Style,
}
impl Default for Styles {
    fn default() -> Self {
        Styles::new(true)
    }
}
impl ColorExt for Styles {
    fn styles(&self) -> &Styles {
        self
    }
}
impl Styles {
    /// Creates some styles.
    pub fn new(colored: bool) -> Self {
        Styles {
            emph: if colored {
                Style::new().bold()
            } else {
                Style::new()
            },
            hap: if colored {
                Colour::Green.normal().bold()
            } else {
                Style::new()
            },
            sad: if colored {
                Colour::Yellow.normal().bold()
            } else {
                Style::new()
            },
            bad: if colored {
                Colour::Red.normal().bold()
            } else {
                Style::new()
            },
        }
    }
}

/// Can color things.
pub trait ColorExt {
    /// The styles in the colorizer: emph, happy, sad, and bad.
    fn styles(&self) -> &Styles;
    /// String emphasis.
    #[inline]
    fn emph<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().emph.paint(s.as_ref()))
    }
    /// Happy string.
    #[inline]
    fn happy<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().hap.paint(s.as_ref()))
    }
    /// Sad string.
    #[inline]
    fn sad<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().sad.paint(s.as_ref()))
    }
    /// Bad string.
    #[inline]
    fn bad<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}", self.styles().bad.paint(s.as_ref()))
    }
}

/// Format for booleans.
pub static bool_format: &str = "on/true|no/off/false";

/// Boolean of a string.
pub fn bool_of_str(s: &str) -> Option<bool> {
    match s {
        "on" | "true" => Some(true),
        "no" | "off" | "false" => Some(false),
        _ => None,
    }
}

/// Boolean of some matches.
///
/// Assumes a default is provided and the input has been validated with
/// `bool_validator`.
pub fn bool_of_matches(matches: &Matches, key: &str) -> bool {
    matches
        .value_of(key)
        .and_then(bool_of_str)
        .expect("failed to retrieve boolean argument")
}

/// Integer of some matches.
///
/// Assumes a default is provided and the input has been validated with
/// `int_validator`.
pub fn int_of_matches(matches: &Matches, key: &str) -> usize {
    use std::str::FromStr;
    matches
        .value_of(key)
        .map(usize::from_str)
        .expect("failed to retrieve integer argument")
        .expect("failed to retrieve integer argument")
}

/// Validates integer input.
pub fn int_validator(s: &str) -> Result<(), String> {
    use std::str::FromStr;
    match usize::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("expected an integer, got `{}`", s)),
    }
}

/// Validates integer input between some bounds.
pub fn bounded_int_validator(s: &str, lo: usize, hi: usize) -> Result<(), String> {
    use std::str::FromStr;
    match usize::from_str(s) {
        Ok(val) => {
            if lo <= val && val <= hi {
                Ok(())
            } else {
                Err(format!(
                    "expected a value between {} and {}, got `{}`",
                    lo, hi, val
                ))
            }
        }
        Err(_) => Err(format!("expected an integer, got `{}`", s)),
    }
}

/// Validates boolean input.
pub fn bool_validator(s: &str) -> Result<(), String> {
    if bool_of_str(s).is_some() {
        Ok(())
    } else {
        Err(format!(
            "expected `on/true` or `off/false`, got `{}`",
            s
        ))
    }
}
