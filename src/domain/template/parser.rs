// Template parser: one pass over the template, tracking escape state

use crate::error::{Result, RouteError};

use super::ast::{is_word_char, ParameterSlot, TemplatePart, UrlTemplate};

/// Word token that can never name a parameter
const RESERVED_NAME: &str = "hasOwnProperty";

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &'a str) -> Result<UrlTemplate> {
        check_candidate_tokens(template)?;

        let mut parser = Self {
            input: template,
            pos: 0,
        };
        let parsed = parser.parse_template();

        tracing::trace!(
            template,
            slots = ?parsed.slots().iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "parsed url template"
        );
        Ok(parsed)
    }

    fn parse_template(&mut self) -> UrlTemplate {
        let mut parts = Vec::new();
        let mut slots: Vec<ParameterSlot> = Vec::new();
        let mut literal_buf = String::new();
        let mut seen_query = false;

        while let Some(ch) = self.peek_char() {
            match ch {
                '\\' if self.peek_ahead(1) == Some(':') => {
                    // Escaped colon: the name after it is plain text
                    self.pos += 2;
                    literal_buf.push(':');
                    literal_buf.push_str(self.take_word());
                }
                ':' => {
                    let colon = self.pos;
                    self.pos += 1;
                    let name = self.take_word();

                    if name.is_empty() || name.bytes().all(|b| b.is_ascii_digit()) {
                        literal_buf.push(':');
                        literal_buf.push_str(name);
                        continue;
                    }

                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let is_query_value = seen_query && self.input[..colon].ends_with('=');
                    let index = match slots.iter().position(|slot| slot.name == name) {
                        Some(index) => {
                            slots[index].is_query_value |= is_query_value;
                            index
                        }
                        None => {
                            slots.push(ParameterSlot {
                                name: name.to_string(),
                                is_query_value,
                            });
                            slots.len() - 1
                        }
                    };
                    parts.push(TemplatePart::Slot(index));
                }
                _ => {
                    if ch == '?' {
                        seen_query = true;
                    }
                    literal_buf.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        UrlTemplate::new(self.input, parts, slots)
    }

    /// Consume a maximal run of word characters
    fn take_word(&mut self) -> &'a str {
        let input = self.input;
        let rest = &input[self.pos..];
        let len = rest.find(|ch: char| !is_word_char(ch)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }
}

// Every word run of the template is a candidate name, slot or not.
fn check_candidate_tokens(template: &str) -> Result<()> {
    match template
        .split(|ch: char| !is_word_char(ch))
        .find(|token| *token == RESERVED_NAME)
    {
        Some(token) => Err(RouteError::InvalidParameterName(token.to_string())),
        None => Ok(()),
    }
}
