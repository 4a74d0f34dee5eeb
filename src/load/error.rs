//! Diagnostics found while loading a log
//!
//! ```txt
//! --> Warning: Unknown coin
//!  |     --> data/pennies.csv:4:1
//!  |      |
//!  |    4 | 1735862400000,Zach,0.03,USD
//!  |      | ^-------------------------^
//!  |      |
//!  |      = no metadata for '0.03USD'
//!  |  The row is kept but drawn with a placeholder
//!  |      ? hint: add the denomination to the coin table
//! ```

use std::fmt;

use crate::load::parse::Rule;

/// Location of a diagnostic: file name and span within its contents
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single problem, messages are one line each
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// determines the label (warning/error) and the color (yellow/red)
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

/// Kinds of items that can be added to a report
#[derive(Debug)]
enum Item {
    /// code block
    Block(pest::error::Error<Rule>),
    /// important message
    Text(String),
    /// recommendation for a fix
    Hint(String),
}

/// All diagnostics of one file
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    contents: Vec<Error>,
}

impl Error {
    fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Wrap a grammar failure
    pub fn from(&mut self, err: pest::error::Error<Rule>) -> &mut Self {
        self.items.push(Item::Block(err.renamed_rules(rule_rename)));
        self
    }

    /// The row is still usable
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Add a code block and its associated message
    pub fn span<S>(&mut self, loc: &Loc, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Block(
            pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError {
                    message: msg.to_string(),
                },
                loc.1.clone(),
            )
            .with_path(loc.0),
        ));
        self
    }

    /// Add an important note
    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new (fatal by default) error to the pool
    pub fn make<S>(&mut self, msg: S) -> &mut Error
    where
        S: ToString,
    {
        self.contents.push(Error::new(msg));
        let idx = self.contents.len() - 1;
        &mut self.contents[idx]
    }

    /// Checks if any of the recorded errors are fatal
    pub fn is_fatal(&self) -> bool {
        self.contents.iter().any(Error::is_fatal)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn count_errors(&self) -> usize {
        self.contents.iter().filter(|e| e.fatal).count()
    }

    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.contents.iter()
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    for line in err.to_string().lines() {
                        write!(f, " {}|  {}", color, BLUE)?;
                        for c in line.chars() {
                            match c {
                                '|' => write!(f, "|{}", NONE)?,
                                '=' => write!(f, "={}", NONE)?,
                                '^' => write!(f, "{}^", color)?,
                                '␊' => (), // pest shows line endings with this symbol
                                _ => write!(f, "{}", c)?,
                            }
                        }
                        writeln!(f, "{}", NONE)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

/// Only prints diagnostics of the highest severity present, at most 10 of them
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let (count, color) = if fatal {
            (self.count_errors(), RED)
        } else {
            (self.count_warnings(), YELLOW)
        };
        let trunc = 10;
        for err in self
            .contents
            .iter()
            .filter(|err| err.fatal == fatal)
            .take(trunc)
        {
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(f, "{}Fatal: {}{} error{} emitted{}", color, WHITE, count, plural, NONE)
        } else {
            writeln!(f, "{}Nonfatal: {}{} warning{} emitted{}", color, WHITE, count, plural, NONE)
        }
    }
}

fn rule_rename(r: &Rule) -> String {
    String::from(match r {
        Rule::EOI => "end of file",
        Rule::timestamp => "a timestamp in epoch milliseconds",
        Rule::person | Rule::bare => "a name, quoted if it holds a comma",
        Rule::quoted_text => "a non-empty quoted name",
        Rule::denomination => "a face value ('0.01', '20')",
        Rule::currency => "a 3-letter uppercase currency code ('USD')",
        Rule::header => "the header 'timestamp,person,denomination,currency'",
        Rule::row => "a row 'timestamp,person,denomination,currency'",
        Rule::file => "a header followed by rows",
        _ => "a separator",
    })
}
