//! Title validity rules.
//!
//! A search for a first name also matches songs where the name only shows up
//! in a credit or an annotation ("Song (feat. Susie)", "Track - curated by
//! Billy"). Each rule below describes one such case; [`TitleValidator`]
//! evaluates them in order for a given search term.

use regex::Regex;

const REMIX_WORDS: &str = r"re-?mix|rmx|mix|edit|dub|rework|bootleg|mash-?up";

enum TitleCheck {
    /// The term has to appear somewhere in the title.
    RequireTerm,
    /// Reject any title the pattern matches.
    Reject(String),
    /// Reject titles where the term only appears inside matched segments.
    TermOutside(&'static str),
}

struct TitleRule {
    name: &'static str,
    check: TitleCheck,
}

fn rules() -> Vec<TitleRule> {
    vec![
        TitleRule {
            name: "term_in_title",
            check: TitleCheck::RequireTerm,
        },
        TitleRule {
            name: "remix_annotation",
            check: TitleCheck::Reject(format!(
                r"(?i)[(\[][^)\]]*\b(?:{words})\b[^)\]]*[)\]]|\s-\s.*\b(?:{words})\b",
                words = REMIX_WORDS
            )),
        },
        TitleRule {
            name: "featured_credit",
            check: TitleCheck::TermOutside(
                r"(?i)[(\[]?\s*\b(?:feat\.?|ft\.|featuring)\s+[^)\]]*[)\]]?",
            ),
        },
        TitleRule {
            name: "curated_by",
            check: TitleCheck::TermOutside(r"(?i)[(\[]?\s*\bcurated\s+by\s+[^)\]]*[)\]]?"),
        },
        TitleRule {
            name: "parenthetical",
            check: TitleCheck::TermOutside(r"\([^)]*\)|\[[^\]]*\]"),
        },
    ]
}

enum CompiledCheck {
    RequireTerm,
    Reject(Regex),
    TermOutside(Regex),
}

/// The rule set compiled for one search term.
pub struct TitleValidator {
    term: Regex,
    checks: Vec<(&'static str, CompiledCheck)>,
}

impl TitleValidator {
    pub fn new(term: &str) -> Result<Self, regex::Error> {
        let term = Regex::new(&format!(
            r"(?i)(?:^|[^\p{{L}}\p{{N}}]){}(?:[^\p{{L}}\p{{N}}]|$)",
            regex::escape(term.trim())
        ))?;

        let checks = rules()
            .into_iter()
            .map(|rule| {
                let check = match rule.check {
                    TitleCheck::RequireTerm => CompiledCheck::RequireTerm,
                    TitleCheck::Reject(pattern) => CompiledCheck::Reject(Regex::new(&pattern)?),
                    TitleCheck::TermOutside(pattern) => {
                        CompiledCheck::TermOutside(Regex::new(pattern)?)
                    }
                };
                Ok((rule.name, check))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { term, checks })
    }

    /// Name of the first rule the title breaks, if any.
    pub fn rejection(&self, title: &str) -> Option<&'static str> {
        self.checks
            .iter()
            .find(|(_, check)| match check {
                CompiledCheck::RequireTerm => !self.term.is_match(title),
                CompiledCheck::Reject(pattern) => pattern.is_match(title),
                CompiledCheck::TermOutside(segments) => {
                    let remainder = segments.replace_all(title, " ");
                    self.term.is_match(title) && !self.term.is_match(&remainder)
                }
            })
            .map(|(name, _)| *name)
    }

    pub fn is_valid(&self, title: &str) -> bool {
        self.rejection(title).is_none()
    }
}
