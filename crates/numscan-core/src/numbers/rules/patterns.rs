//! Recognition rules for numbers and magnitude scales.

use lazy_static::lazy_static;
use regex::Regex;

/// Optionally signed number: comma-grouped thousands or a plain digit run,
/// with an optional decimal part.
const NUMBER: &str = r"[-+]?(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]+)?";

/// Magnitude scale a number can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Trillion,
    Billion,
    Million,
    Thousand,
}

impl Scale {
    /// All scales, largest first. Rule order follows this order.
    pub const ALL: [Scale; 4] = [
        Scale::Trillion,
        Scale::Billion,
        Scale::Million,
        Scale::Thousand,
    ];

    /// Factor applied to a number carrying this scale.
    pub fn multiplier(self) -> f64 {
        match self {
            Scale::Trillion => 1e12,
            Scale::Billion => 1e9,
            Scale::Million => 1e6,
            Scale::Thousand => 1e3,
        }
    }

    /// Word that follows a number, e.g. "5 million".
    pub fn word(self) -> &'static str {
        match self {
            Scale::Trillion => "trillion",
            Scale::Billion => "billion",
            Scale::Million => "million",
            Scale::Thousand => "thousand",
        }
    }

    /// Plural used in headings such as "amounts in millions".
    pub fn plural(self) -> &'static str {
        match self {
            Scale::Trillion => "trillions",
            Scale::Billion => "billions",
            Scale::Million => "millions",
            Scale::Thousand => "thousands",
        }
    }

    /// Name recorded on findings scaled by a heading phrase.
    pub fn context_name(self) -> &'static str {
        match self {
            Scale::Trillion => "trillions (from context)",
            Scale::Billion => "billions (from context)",
            Scale::Million => "millions (from context)",
            Scale::Thousand => "thousands (from context)",
        }
    }
}

/// A scale recognition rule. Built once, never mutated.
#[derive(Debug)]
pub struct ScaleRule {
    /// Pattern recognising the rule.
    pub pattern: Regex,
    /// Factor applied to matched numbers.
    pub multiplier: f64,
    /// Name recorded on the findings this rule produces.
    pub name: &'static str,
}

impl ScaleRule {
    fn new(pattern: &str, scale: Scale, name: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            multiplier: scale.multiplier(),
            name,
        }
    }
}

lazy_static! {
    /// Bare number. Must not touch a letter, digit or period on either side,
    /// except for a sentence-ending period after the number.
    pub static ref NUMBER_PATTERN: fancy_regex::Regex = fancy_regex::Regex::new(
        &format!(r"(?<![a-zA-Z0-9.]){NUMBER}(?![a-zA-Z0-9]|\.\S)")
    ).unwrap();

    /// Whitespace-free run of text. Whitespace satisfies both boundary checks
    /// of `NUMBER_PATTERN`, so each run can be scanned on its own.
    pub static ref TEXT_RUN: Regex = Regex::new(r"\S+").unwrap();

    /// Number followed by a scale word ("5 million"). Group 1 is the number.
    pub static ref SUFFIX_RULES: Vec<ScaleRule> = Scale::ALL
        .iter()
        .map(|&scale| ScaleRule::new(
            &format!(r"(?i)({NUMBER})\s*{}", scale.word()),
            scale,
            scale.word(),
        ))
        .collect();

    /// Heading phrases that scale nearby bare numbers ("amounts in thousands").
    pub static ref CONTEXT_RULES: Vec<ScaleRule> = Scale::ALL
        .iter()
        .flat_map(|&scale| {
            let plural = scale.plural();
            [
                ScaleRule::new(
                    &format!(r"(?i)(?:dollars|amounts|figures|values)\s+in\s+{plural}"),
                    scale,
                    scale.context_name(),
                ),
                ScaleRule::new(
                    &format!(r"(?i)in\s+{plural}(?:\s+of\s+dollars)?"),
                    scale,
                    scale.context_name(),
                ),
            ]
        })
        .collect();
}

/// Multiplier of the rule that records `scale_name` on its findings.
pub fn multiplier_for(scale_name: &str) -> Option<f64> {
    SUFFIX_RULES
        .iter()
        .chain(CONTEXT_RULES.iter())
        .find(|rule| rule.name == scale_name)
        .map(|rule| rule.multiplier)
}
