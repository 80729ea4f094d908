//! Decoding encoded grid lines with Markov rewrite rules.
//!
//! A puzzle ships its grid encoded. Each encoded line is decoded by its own
//! [`RuleSchedule`]: an ordered list of steps, each naming one of the shared
//! [`RewriteRule`]s. Decoding is a Markov algorithm:
//!
//! 1. Walk the steps in order of priority.
//! 2. The first step whose rule source occurs in the line replaces the leftmost occurrence.
//! 3. If that step is terminating, stop; otherwise start again from the first step.
//! 4. Stop when no step applies.
//!
//! # File formats
//!
//! Rules, one per line (`#` lines and blank lines are ignored; indices count rules only):
//!
//! ```text
//! ab;ba
//! x;
//! ```
//!
//! Schedules, one line per encoded grid line, steps written `RULE@ORDER`, a trailing `!`
//! marking a terminating step. A blank line leaves its grid line unchanged.
//!
//! ```text
//! 0@1 1@2!
//!
//! 1@1
//! ```
//!
//! # Examples
//!
//! ```
//! use wordgrid::cipher::{parse_rules, parse_schedules, Cipher};
//!
//! let rules = parse_rules("ab;ba")?;
//! let schedules = parse_schedules("0@1")?;
//! let cipher = Cipher::new(rules, schedules)?;
//! assert_eq!(cipher.decode_line(0, "aab")?, "baa");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::errors::ParseError;
use crate::puzzle::PuzzleError;
use log::{debug, warn};
use nom::{
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map, opt, recognize},
    multi::separated_list0,
    sequence::delimited,
    IResult, Parser,
};

/// Upper bound on replacements while decoding one line; rule sets like `a;aa` never stop.
pub const MAX_REWRITES: usize = 10_000;

/// Parser result type: input, output, with our custom `ParseError`
type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

/// Replace `source` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub source: String,
    pub replacement: String,
}

/// One entry of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleStep {
    /// Zero-based index into the rule list.
    pub rule: usize,
    /// Priority; lower runs first.
    pub order: i64,
    /// Stop decoding as soon as this step fires.
    pub terminating: bool,
}

/// The steps used to decode one encoded line, sorted by `order`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSchedule {
    steps: Vec<RuleStep>,
}

impl RuleSchedule {
    /// Sorts the steps by `order`; steps with equal order keep their relative position.
    #[must_use]
    pub fn new(mut steps: Vec<RuleStep>) -> Self {
        steps.sort_by_key(|step| step.order);
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[RuleStep] {
        &self.steps
    }

    /// Check that every step names an existing rule. `line` is 1-based, for messages.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownRule` for the first step naming a missing rule.
    pub fn validate(&self, line: usize, num_rules: usize) -> Result<(), Box<ParseError>> {
        match self.steps.iter().find(|step| step.rule >= num_rules) {
            Some(step) => Err(Box::new(ParseError::UnknownRule { line, rule: step.rule, num_rules })),
            None => Ok(()),
        }
    }
}

/// Parse the rules file contents.
///
/// # Errors
///
/// - `ParseError::InvalidRule` for a line without `;`.
/// - `ParseError::EmptyRuleSource` for a rule whose source is empty.
pub fn parse_rules(contents: &str) -> Result<Vec<RewriteRule>, Box<ParseError>> {
    let mut rules = Vec::new();

    for (i, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((source, replacement)) = line.split_once(';') else {
            return Err(Box::new(ParseError::InvalidRule { line: i + 1, input: line.to_string() }));
        };
        let source = source.trim();
        if source.is_empty() {
            return Err(Box::new(ParseError::EmptyRuleSource { line: i + 1 }));
        }

        rules.push(RewriteRule {
            source: source.to_string(),
            replacement: replacement.trim().to_string(),
        });
    }

    debug!("parsed {} rewrite rules", rules.len());
    Ok(rules)
}

/// Parse the schedules file contents: one schedule per line, blank lines included.
///
/// # Errors
///
/// Returns `ParseError::InvalidSchedule` (or `ParseError::ParseIntError` for
/// out-of-range numbers) naming the offending line.
pub fn parse_schedules(contents: &str) -> Result<Vec<RuleSchedule>, Box<ParseError>> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| parse_schedule_line(line, i + 1))
        .collect()
}

fn parse_schedule_line(line: &str, line_no: usize) -> Result<RuleSchedule, Box<ParseError>> {
    let invalid = || Box::new(ParseError::InvalidSchedule { line: line_no, input: line.to_string() });

    match schedule_steps(line) {
        Ok(("", steps)) => Ok(RuleSchedule::new(steps)),
        Ok(_) => Err(invalid()),
        Err(nom::Err::Failure(e)) => Err(e),
        Err(_) => Err(invalid()),
    }
}

// === Token parsers ===

fn number<T: std::str::FromStr<Err = std::num::ParseIntError>>(digits: &str) -> Result<T, nom::Err<Box<ParseError>>> {
    digits
        .parse::<T>()
        .map_err(|e| nom::Err::Failure(e.into()))
}

fn rule_index(input: &'_ str) -> PResult<'_, usize> {
    let parsed: PResult<'_, &str> = digit1(input);
    let (input, digits) = parsed?;
    Ok((input, number(digits)?))
}

fn order(input: &'_ str) -> PResult<'_, i64> {
    let parsed: PResult<'_, &str> = recognize((opt(char('-')), digit1)).parse(input);
    let (input, digits) = parsed?;
    Ok((input, number(digits)?))
}

fn step(input: &'_ str) -> PResult<'_, RuleStep> {
    map((rule_index, char('@'), order, opt(char('!'))), |(rule, _, order, bang)| RuleStep {
        rule,
        order,
        terminating: bang.is_some(),
    })
    .parse(input)
}

fn schedule_steps(input: &'_ str) -> PResult<'_, Vec<RuleStep>> {
    delimited(multispace0, separated_list0(multispace1, step), multispace0).parse(input)
}

/// Shared rules plus one schedule per encoded line, validated against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cipher {
    rules: Vec<RewriteRule>,
    schedules: Vec<RuleSchedule>,
}

impl Cipher {
    /// # Errors
    ///
    /// Returns `ParseError::UnknownRule` if a schedule names a rule that doesn't exist.
    pub fn new(rules: Vec<RewriteRule>, schedules: Vec<RuleSchedule>) -> Result<Self, Box<ParseError>> {
        for (i, schedule) in schedules.iter().enumerate() {
            schedule.validate(i + 1, rules.len())?;
        }
        Ok(Self { rules, schedules })
    }

    #[must_use]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    #[must_use]
    pub fn schedules(&self) -> &[RuleSchedule] {
        &self.schedules
    }

    /// Decode the encoded line at zero-based position `index` with its schedule.
    ///
    /// # Errors
    ///
    /// - `ParseError::MissingSchedule` (wrapped) if there is no schedule for `index`.
    /// - `PuzzleError::RewriteLimitExceeded` if decoding doesn't stop within [`MAX_REWRITES`].
    pub fn decode_line(&self, index: usize, encoded: &str) -> Result<String, PuzzleError> {
        let schedule = self.schedules.get(index).ok_or_else(|| {
            Box::new(ParseError::MissingSchedule { line: index + 1, num_schedules: self.schedules.len() })
        })?;

        let decoded = self
            .rewrite(encoded, schedule)
            .ok_or(PuzzleError::RewriteLimitExceeded { line: index + 1, limit: MAX_REWRITES })?;
        debug!("line {}: {encoded} -> {decoded}", index + 1);
        Ok(decoded)
    }

    /// Decode every encoded line in order.
    ///
    /// # Errors
    ///
    /// Fails on the first line [`decode_line`](Self::decode_line) rejects.
    pub fn decode_lines<S: AsRef<str>>(&self, encoded_lines: &[S]) -> Result<Vec<String>, PuzzleError> {
        if self.schedules.len() > encoded_lines.len() {
            warn!(
                "{} schedules for {} encoded lines; ignoring the extra schedules",
                self.schedules.len(),
                encoded_lines.len()
            );
        }
        encoded_lines
            .iter()
            .enumerate()
            .map(|(i, line)| self.decode_line(i, line.as_ref()))
            .collect()
    }

    // Returns None once MAX_REWRITES replacements have not been enough.
    fn rewrite(&self, encoded: &str, schedule: &RuleSchedule) -> Option<String> {
        let steps = schedule.steps();
        let mut text = encoded.to_string();
        let mut rewrites = 0;
        let mut i = 0;

        while let Some(step) = steps.get(i) {
            let rule = &self.rules[step.rule];
            if let Some(pos) = text.find(&rule.source) {
                if rewrites == MAX_REWRITES {
                    return None;
                }
                text.replace_range(pos..pos + rule.source.len(), &rule.replacement);
                rewrites += 1;
                if step.terminating {
                    break;
                }
                i = 0;
            } else {
                i += 1;
            }
        }

        Some(text)
    }
}
