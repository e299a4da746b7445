use serde::{Deserialize, Serialize};

/// Rewrite rule applied to the input before it is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationMode {
    RewritePerfectly,
    Clarify,
    Simplify,
    Expand,
    Shorten,
}

impl OptimizationMode {
    pub const ALL: [Self; 5] = [
        Self::RewritePerfectly,
        Self::Clarify,
        Self::Simplify,
        Self::Expand,
        Self::Shorten,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RewritePerfectly => "REWRITE_PERFECTLY",
            Self::Clarify => "CLARIFY",
            Self::Simplify => "SIMPLIFY",
            Self::Expand => "EXPAND",
            Self::Shorten => "SHORTEN",
        }
    }

    /// Human-facing name, as stored in agent presets.
    pub fn title(&self) -> &'static str {
        match self {
            Self::RewritePerfectly => "Rewrite Perfectly",
            Self::Clarify => "Clarify",
            Self::Simplify => "Simplify",
            Self::Expand => "Expand",
            Self::Shorten => "Shorten",
        }
    }
}

impl std::fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for OptimizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "rewriteperfectly" | "rewrite" => Ok(Self::RewritePerfectly),
            "clarify" => Ok(Self::Clarify),
            "simplify" => Ok(Self::Simplify),
            "expand" => Ok(Self::Expand),
            "shorten" => Ok(Self::Shorten),
            _ => Err(format!("Invalid optimization mode: {}", s)),
        }
    }
}

/// Envelope applied to the rewritten text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "Plain Text")]
    PlainText,
    Markdown,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "XML")]
    Xml,
    #[serde(rename = "Bulleted List")]
    BulletedList,
    Table,
}

impl OutputFormat {
    pub const ALL: [Self; 6] = [
        Self::PlainText,
        Self::Markdown,
        Self::Json,
        Self::Xml,
        Self::BulletedList,
        Self::Table,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PlainText => "Plain Text",
            Self::Markdown => "Markdown",
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::BulletedList => "Bulleted List",
            Self::Table => "Table",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "plaintext" | "plain" | "text" => Ok(Self::PlainText),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "bulletedlist" | "bullets" | "list" => Ok(Self::BulletedList),
            "table" => Ok(Self::Table),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Lowercase and drop separators so "Plain Text", "plain-text" and "PLAIN_TEXT" agree.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
