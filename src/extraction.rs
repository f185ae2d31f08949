// Text extraction rules for FTB Quests SNBT content
// Operates on raw text with two regex rules; the SNBT structure is never parsed

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::debug;

use crate::keygen::KeyGenerator;

/// Inner text of a double-quoted SNBT string: no raw quote, no line break,
/// backslash escapes (including `\"`) kept as part of the text
const STRING_BODY: &str = r#"(?:[^"\\\n]|\\.)"#;

/// Where a field name may begin: start of line, after whitespace, `{` or `,`
const FIELD_START: &str = r"(?:^|[\s{,])";

/// Compiled extraction rules, shared read-only by every worker.
///
/// The field rules also match any complete quoted string (without capturing
/// it), so text inside a string is consumed whole and can never be taken for
/// the start of a field.
#[derive(Debug, Clone)]
pub struct Extractor {
    /// `title: "<text>"` or `subtitle: "<text>"`, group 1 is the text
    title: Regex,
    /// `description: [ "<a>" "<b>" ... ]`, group 1 is the whole block
    description_block: Regex,
    /// One quoted string inside a description block, group 1 is the text
    quoted: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        let title = Regex::new(&format!(
            r#"(?m){FIELD_START}(?:sub)?title: "({STRING_BODY}+)"|"{STRING_BODY}*""#
        ))?;
        let description_block = Regex::new(&format!(
            r#"(?m){FIELD_START}(description: \[\s*(?:"{STRING_BODY}*"\s*)+\])|"{STRING_BODY}*""#
        ))?;
        let quoted = Regex::new(&format!(r#""({STRING_BODY}*)""#))?;

        debug!("Compiled title and description extraction rules");

        Ok(Self {
            title,
            description_block,
            quoted,
        })
    }

    /// Run both rules over one file's content: titles first, then descriptions.
    pub fn apply(&self, content: &str, keygen: &mut KeyGenerator) -> String {
        let with_titles = self.replace_titles(content, keygen);
        self.replace_descriptions(&with_titles, keygen)
    }

    /// Replace the text of every `title: "<text>"` and `subtitle: "<text>"`
    /// field with a reference token.
    ///
    /// Matches are taken left to right in a single pass and written to a new
    /// buffer, so substituted text is never matched again. A field name must
    /// start a line or follow whitespace, `{` or `,`, and never lies inside
    /// another string.
    pub fn replace_titles(&self, content: &str, keygen: &mut KeyGenerator) -> String {
        substitute_group(&self.title, content, keygen)
    }

    /// Replace the text of every string in each well-formed `description: [...]`
    /// block with a reference token.
    ///
    /// Whitespace, brackets and quotes inside the block are kept byte for byte.
    /// A block with an unterminated bracket or string, or with anything other
    /// than quoted strings between the brackets, is left untouched.
    pub fn replace_descriptions(&self, content: &str, keygen: &mut KeyGenerator) -> String {
        let mut output = String::with_capacity(content.len());
        let mut last = 0;

        for caps in self.description_block.captures_iter(content) {
            let Some(block) = caps.get_group(1) else {
                continue;
            };
            output.push_str(&content[last..block.start]);
            output.push_str(&substitute_group(&self.quoted, &content[block.range()], keygen));
            last = block.end;
        }

        output.push_str(&content[last..]);
        output
    }
}

/// Replace capture group 1 of every match of `regex` in `haystack` with the
/// reference token for its text, leaving the rest of each match as it was.
///
/// Empty strings and strings that already are a reference token stay as they
/// are and produce no key.
fn substitute_group(regex: &Regex, haystack: &str, keygen: &mut KeyGenerator) -> String {
    let mut output = String::with_capacity(haystack.len());
    let mut last = 0;

    for caps in regex.captures_iter(haystack) {
        let Some(text_span) = caps.get_group(1) else {
            continue;
        };
        let text = &haystack[text_span.range()];
        if text.is_empty() || keygen.is_reference_token(text) {
            continue;
        }

        output.push_str(&haystack[last..text_span.start]);
        output.push_str(&keygen.generate(text));
        last = text_span.end;
    }

    output.push_str(&haystack[last..]);
    output
}
