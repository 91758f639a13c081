use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::{Manifest, ManifestEntry};
use crate::error::ManifestError;

#[derive(Parser)]
#[grammar = "manifest/manifest.pest"] // relative to src
pub struct ManifestParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    TopLevel,
    Namespaces,
    Prepend,
}

/// A parsed right-hand side: one string or a list of them.
enum Value {
    Single(String),
    List(Vec<String>),
}

impl Value {
    fn into_vec(self) -> Vec<String> {
        match self {
            Value::Single(s) => vec![s],
            Value::List(items) => items,
        }
    }
}

pub fn parse_manifest(text: &str) -> Result<Manifest, ManifestError> {
    let mut pairs = ManifestParser::parse(Rule::manifest, text).map_err(Box::new)?;
    let mut manifest = Manifest::default();
    let mut section = Section::TopLevel;

    let root = match pairs.next() {
        Some(pair) => pair,
        None => return Ok(manifest),
    };

    for pair in root.into_inner() {
        let line = line_of(&pair);
        match pair.as_rule() {
            Rule::section => {
                let name = pair
                    .into_inner()
                    .next()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                section = match name.as_str() {
                    "namespaces" => Section::Namespaces,
                    "prepend" => Section::Prepend,
                    _ => return Err(ManifestError::UnknownSection { section: name, line }),
                };
            }
            Rule::entry => {
                let (key, value) = build_entry(pair)?;
                match section {
                    Section::TopLevel => apply_option(&mut manifest, key, value, line)?,
                    Section::Namespaces | Section::Prepend => {
                        let directories = expect_directories(&key, value, line)?;
                        manifest.entries.push(ManifestEntry {
                            prefix: key,
                            directories,
                            prepend: section == Section::Prepend,
                        });
                    }
                }
            }
            Rule::EOI => {}
            _ => return Err(unexpected(&pair)),
        }
    }

    Ok(manifest)
}

fn apply_option(
    manifest: &mut Manifest,
    key: String,
    value: Value,
    line: usize,
) -> Result<(), ManifestError> {
    match key.as_str() {
        "separator" => {
            let value = expect_single(key, value, line)?;
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => manifest.options.separator = c,
                _ => return Err(ManifestError::InvalidSeparator { value, line }),
            }
        }
        "extension" => {
            manifest.options.extension = expect_single(key, value, line)?;
        }
        "root" => {
            let directories = expect_directories(&key, value, line)?;
            manifest.root.extend(directories);
        }
        _ => return Err(ManifestError::UnknownKey { key, line }),
    }
    Ok(())
}

fn expect_single(key: String, value: Value, line: usize) -> Result<String, ManifestError> {
    match value {
        Value::Single(s) => Ok(s),
        Value::List(_) => Err(ManifestError::InvalidValue {
            key,
            expected: "a single string",
            line,
        }),
    }
}

fn expect_directories(key: &str, value: Value, line: usize) -> Result<Vec<String>, ManifestError> {
    let directories = value.into_vec();
    if directories.is_empty() {
        return Err(ManifestError::InvalidValue {
            key: key.to_string(),
            expected: "at least one directory",
            line,
        });
    }
    Ok(directories)
}

fn build_entry(pair: Pair<Rule>) -> Result<(String, Value), ManifestError> {
    let mut inner = pair.into_inner();
    let (key_pair, value_pair) = match (inner.next(), inner.next()) {
        (Some(k), Some(v)) => (k, v),
        _ => return Ok((String::new(), Value::List(vec![]))),
    };

    let key = match key_pair.as_rule() {
        Rule::ident => key_pair.as_str().to_string(),
        Rule::string => build_string(key_pair),
        _ => return Err(unexpected(&key_pair)),
    };

    let value = match value_pair.as_rule() {
        Rule::string => Value::Single(build_string(value_pair)),
        Rule::array => Value::List(value_pair.into_inner().map(build_string).collect()),
        _ => return Err(unexpected(&value_pair)),
    };

    Ok((key, value))
}

/// Unescape a `string` pair into its contents.
fn build_string(pair: Pair<Rule>) -> String {
    let raw = pair
        .into_inner()
        .next()
        .map(|inner| inner.as_str())
        .unwrap_or("");

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn line_of(pair: &Pair<Rule>) -> usize {
    pair.as_span().start_pos().line_col().0
}

fn unexpected(pair: &Pair<Rule>) -> ManifestError {
    let error = pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: format!("unexpected {:?}", pair.as_rule()),
        },
        pair.as_span(),
    );
    ManifestError::Syntax(Box::new(error))
}
