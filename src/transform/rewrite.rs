use std::sync::OnceLock;

use regex::Regex;

use super::OptimizationMode;

const CLARIFY_PREAMBLE: &str =
    "I need you to create exactly what I describe below, with no additions or omissions:";
const CLARIFY_CLOSING: &str = "Please confirm your understanding before proceeding.";

const POLISH_SUFFIX: &str = "Please ensure the result is visually appealing, fully functional, \
     and follows modern design principles. Include responsive layouts and accessibility features.";

const EXPAND_CHECKLIST: &str = "For this task, please:\n\
     - Follow modern best practices\n\
     - Provide detailed documentation\n\
     - Ensure code quality and maintainability\n\
     - Implement proper error handling\n\
     - Consider edge cases and accessibility";

/// Word count above which SHORTEN truncates.
pub const SHORTEN_WORD_LIMIT: usize = 15;

static LEADING_VERB: OnceLock<Regex> = OnceLock::new();
static PRAISE: OnceLock<Regex> = OnceLock::new();
static WEBSITE: OnceLock<Regex> = OnceLock::new();
static APP: OnceLock<Regex> = OnceLock::new();
static POLITE_FILLER: OnceLock<Regex> = OnceLock::new();
static WANT_FILLER: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("static pattern"))
}

/// Apply the mode's rewrite rule. `None` leaves the text untouched.
pub fn rewrite(text: &str, mode: Option<OptimizationMode>) -> String {
    let Some(mode) = mode else {
        return text.to_string();
    };

    match mode {
        OptimizationMode::RewritePerfectly => rewrite_perfectly(text),
        OptimizationMode::Clarify => clarify(text),
        OptimizationMode::Simplify => simplify(text),
        OptimizationMode::Expand => expand(text),
        OptimizationMode::Shorten => shorten(text),
    }
}

// Replacements run in sequence, so "website" becomes "web application" and
// then the "app" pass rewrites it again to "web applicationlication".
fn rewrite_perfectly(text: &str) -> String {
    let improved = pattern(&LEADING_VERB, r"(?i)^(?:create|make|generate)")
        .replace(text.trim(), "Design and implement");
    let improved = pattern(&PRAISE, r"(?i)good|nice|great")
        .replace_all(&improved, "professional and polished");
    let improved = pattern(&WEBSITE, r"(?i)website").replace_all(&improved, "web application");
    let improved = pattern(&APP, r"(?i)app").replace_all(&improved, "application");

    format!("{}\n\n{}", improved, POLISH_SUFFIX)
}

fn clarify(text: &str) -> String {
    format!("{}\n\n{}\n\n{}", CLARIFY_PREAMBLE, text, CLARIFY_CLOSING)
}

fn simplify(text: &str) -> String {
    let stripped = pattern(&POLITE_FILLER, r"(?i)please|kindly|if you could").replace_all(text, "");
    let stripped =
        pattern(&WANT_FILLER, r"(?i)I would like|I want|I need").replace_all(&stripped, "");
    pattern(&WHITESPACE, r"\s+")
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

fn expand(text: &str) -> String {
    format!("{}\n\n{}", text, EXPAND_CHECKLIST)
}

fn shorten(text: &str) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() <= SHORTEN_WORD_LIMIT {
        return text.to_string();
    }
    format!("{}...", words[..SHORTEN_WORD_LIMIT].join(" "))
}
