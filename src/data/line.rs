//! Line grammar: label declarations and numeric data lines.
//!
//! ```text
//! Labels:<name>[<sep><name>]*
//! <token>[<sep><token>]*          sep ∈ { ',', ';', ' ', '\t' }
//! ```

/// Prefix that marks a label declaration line.
pub const LABELS_PREFIX: &str = "Labels:";

/// Characters separating names and tokens within a line.
pub const FIELD_SEPARATORS: [char; 4] = [',', ';', ' ', '\t'];

/// A classified line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Display names, positionally matched to series indices.
    Labels(Vec<String>),
    /// Successfully parsed values; position in the vector is the series index.
    Data(Vec<f64>),
}

impl ParsedLine {
    pub fn is_empty(&self) -> bool {
        match self {
            ParsedLine::Labels(names) => names.is_empty(),
            ParsedLine::Data(values) => values.is_empty(),
        }
    }
}

/// Classify a complete line and tokenize it.
///
/// Tokens that do not parse as a finite number are skipped and do not reserve an
/// index: `"1.0,bad,2.0"` yields `[1.0, 2.0]`.
pub fn classify(line: &str) -> ParsedLine {
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line.strip_prefix(LABELS_PREFIX) {
        Some(rest) => ParsedLine::Labels(split_fields(rest).into_iter().map(str::to_string).collect()),
        None => ParsedLine::Data(
            split_fields(line)
                .into_iter()
                .filter_map(|token| {
                    let value = parse_value(token);
                    if value.is_none() && !token.trim().is_empty() {
                        tracing::trace!(token, "skipping malformed token");
                    }
                    value
                })
                .collect(),
        ),
    }
}

/// Split on [`FIELD_SEPARATORS`], keeping leading and interior empty fields but
/// dropping trailing ones.
pub fn split_fields(s: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = s.split(&FIELD_SEPARATORS[..]).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Parse one token as a finite floating-point value.
pub fn parse_value(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
