//! `${{ name }}` placeholder substitution
//!
//! Only the double-brace form is resolved here. Gradle's own `${...}`
//! interpolation (`${project.property("x")}`, `${it}`, `${version}`) is
//! left exactly as written so the build tool can expand it later.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;
use thiserror::Error;

/// Placeholder name -> substituted value
pub type Params = BTreeMap<String, String>;

const OPEN: &str = "${{";
const CLOSE: &str = "}}";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{\{(.*?)\}\}").expect("placeholder pattern is valid"));

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("name pattern is valid"));

/// Fatal rendering errors. Nothing is produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Missing parameter '{name}' referenced on line {line}")]
    MissingParameter { name: String, line: usize },

    #[error("Invalid placeholder '{token}' on line {line}: names must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidPlaceholder { token: String, line: usize },

    #[error("Unterminated placeholder on line {line}: '${{{{' without a closing '}}}}'")]
    Unterminated { line: usize },
}

/// Non-fatal diagnostics attached to a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    UnusedParameter(String),
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::UnusedParameter(name) => {
                write!(f, "Parameter '{}' is never referenced", name)
            }
        }
    }
}

/// Result of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Fully substituted text
    pub text: String,

    /// Placeholder names that appeared in the template
    pub referenced: BTreeSet<String>,

    /// Supplied parameters the template never used
    pub warnings: Vec<RenderWarning>,
}

impl Rendered {
    /// Names of supplied parameters that were never referenced
    pub fn unused_parameters(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(|w| match w {
            RenderWarning::UnusedParameter(name) => name.as_str(),
        })
    }
}

struct Placeholder<'a> {
    range: Range<usize>,
    name: &'a str,
}

/// Substitute every `${{ name }}` in `template` with its value from `params`.
///
/// Values are inserted verbatim and never re-scanned, so a value that itself
/// looks like a placeholder stays literal in the output.
pub fn render(template: &str, params: &Params) -> Result<Rendered, RenderError> {
    let found = scan(template)?;

    if let Some(missing) = found.iter().find(|p| !params.contains_key(p.name)) {
        return Err(RenderError::MissingParameter {
            name: missing.name.to_string(),
            line: line_of(template, missing.range.start),
        });
    }

    let mut text = String::with_capacity(template.len());
    let mut referenced = BTreeSet::new();
    let mut last = 0;

    for placeholder in &found {
        text.push_str(&template[last..placeholder.range.start]);
        text.push_str(&params[placeholder.name]);
        referenced.insert(placeholder.name.to_string());
        last = placeholder.range.end;
    }
    text.push_str(&template[last..]);

    let warnings = params
        .keys()
        .filter(|name| !referenced.contains(name.as_str()))
        .map(|name| RenderWarning::UnusedParameter(name.clone()))
        .collect();

    Ok(Rendered {
        text,
        referenced,
        warnings,
    })
}

/// List the placeholder names a template references, without substituting
pub fn placeholder_names(template: &str) -> Result<BTreeSet<String>, RenderError> {
    Ok(scan(template)?
        .into_iter()
        .map(|p| p.name.to_string())
        .collect())
}

fn scan(template: &str) -> Result<Vec<Placeholder<'_>>, RenderError> {
    let mut found = Vec::new();
    let mut cursor = 0;

    for m in PLACEHOLDER.find_iter(template) {
        ensure_terminated(template, cursor..m.start())?;

        let token = m.as_str();
        let name = token[OPEN.len()..token.len() - CLOSE.len()].trim();
        if !NAME.is_match(name) {
            return Err(RenderError::InvalidPlaceholder {
                token: token.to_string(),
                line: line_of(template, m.start()),
            });
        }

        found.push(Placeholder {
            range: m.range(),
            name,
        });
        cursor = m.end();
    }
    ensure_terminated(template, cursor..template.len())?;

    Ok(found)
}

/// An opening `${{` outside any matched placeholder never found its `}}`
fn ensure_terminated(template: &str, gap: Range<usize>) -> Result<(), RenderError> {
    match template[gap.clone()].find(OPEN) {
        Some(offset) => Err(RenderError::Unterminated {
            line: line_of(template, gap.start + offset),
        }),
        None => Ok(()),
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}
