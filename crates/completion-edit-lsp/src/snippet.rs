//! LSP / VSCode snippet expansion.
//!
//! Supported syntax:
//! - tab stops `$1`, `${1}`, final cursor `$0`
//! - placeholders `${1:default}` (nested placeholders allowed)
//! - choices `${1|one,two|}` (the first option is inserted)
//! - variables `$NAME`, `${NAME}`, `${NAME:default}`
//! - `\` escapes the next character
//!
//! Transforms (`${1/regex/format/}`) are not supported and fail to parse.

use completion_edit::{
    Context, ContextualEdit, Mark, ParseError, ParsedEdit, RangeEdit, SnippetEdit, SnippetGrammar,
    SnippetParser, derive_contextual,
};
use completion_edit_lang::WordChars;

/// Parser for [`SnippetGrammar::Lsp`] templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LspSnippetParser;

/// Expanded snippet text plus its tab stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Template with placeholders, choices and variables substituted.
    pub text: String,
    /// Tab stops in template order; byte offsets into `text`.
    pub marks: Vec<Mark>,
}

impl Expansion {
    /// Byte offset of the cursor after insertion.
    ///
    /// The first tab stop in navigation order (`1`, `2`, ..., then `0`); the end of the text when
    /// there are none.
    pub fn cursor(&self) -> usize {
        self.marks
            .iter()
            .filter(|mark| mark.idx > 0)
            .min_by_key(|mark| mark.idx)
            .or_else(|| self.marks.iter().find(|mark| mark.idx == 0))
            .map_or(self.text.len(), |mark| mark.begin)
    }
}

struct Variables<'a> {
    ctx: &'a Context,
    chars: &'a WordChars,
    visual: &'a str,
}

impl Variables<'_> {
    fn resolve(&self, name: &str) -> Option<String> {
        let value = match name {
            "TM_SELECTED_TEXT" => self.visual.to_string(),
            "TM_CURRENT_LINE" => self.ctx.line.clone(),
            "TM_CURRENT_WORD" => format!(
                "{}{}",
                self.ctx.words_before(self.chars),
                self.ctx.words_after(self.chars)
            ),
            "TM_LINE_INDEX" => self.ctx.position.row.to_string(),
            "TM_LINE_NUMBER" => (self.ctx.position.row + 1).to_string(),
            _ => return None,
        };
        Some(value).filter(|value| !value.is_empty())
    }
}

struct Expander<'a> {
    src: &'a str,
    pos: usize,
    vars: Variables<'a>,
    out: String,
    marks: Vec<Mark>,
}

impl<'a> Expander<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn tab_stop_idx(&mut self) -> Result<usize, ParseError> {
        let at = self.pos;
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits.parse().map_err(|_| ParseError::Unexpected {
            found: self.src[at..].chars().next().unwrap_or('$'),
            at,
        })
    }

    /// Expand until end of input, or until the `}` closing the `${` opened at `open`.
    fn expand(&mut self, open: Option<usize>) -> Result<(), ParseError> {
        while let Some(c) = self.bump() {
            match c {
                '}' if open.is_some() => return Ok(()),
                '\\' => match self.bump() {
                    Some(escaped) => self.out.push(escaped),
                    None => self.out.push('\\'),
                },
                '$' => self.dollar(self.pos - 1)?,
                other => self.out.push(other),
            }
        }
        match open {
            Some(at) => Err(ParseError::Unterminated(at)),
            None => Ok(()),
        }
    }

    fn dollar(&mut self, at: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let idx = self.tab_stop_idx()?;
                self.push_mark(idx, self.out.len());
                Ok(())
            }
            Some(c) if is_var_start(c) => {
                let name = self.take_while(is_var_char);
                let value = self.vars.resolve(name).unwrap_or_default();
                self.out.push_str(&value);
                Ok(())
            }
            Some('{') => {
                self.bump();
                self.braced(at)
            }
            _ => {
                self.out.push('$');
                Ok(())
            }
        }
    }

    fn braced(&mut self, open: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let idx = self.tab_stop_idx()?;
                let begin = self.out.len();
                match self.bump() {
                    Some('}') => {}
                    Some(':') => self.expand(Some(open))?,
                    Some('|') => self.choice(open)?,
                    Some(found) => {
                        return Err(ParseError::Unexpected {
                            found,
                            at: self.pos - found.len_utf8(),
                        });
                    }
                    None => return Err(ParseError::Unterminated(open)),
                }
                self.push_mark(idx, begin);
                Ok(())
            }
            Some(c) if is_var_start(c) => {
                let name = self.take_while(is_var_char);
                let resolved = self.vars.resolve(name);
                match self.bump() {
                    Some('}') => {
                        self.out.push_str(resolved.as_deref().unwrap_or_default());
                        Ok(())
                    }
                    Some(':') => {
                        let (out_len, marks_len) = (self.out.len(), self.marks.len());
                        self.expand(Some(open))?;
                        if let Some(value) = resolved {
                            // The default is parsed for validity but the variable wins.
                            self.out.truncate(out_len);
                            self.marks.truncate(marks_len);
                            self.out.push_str(&value);
                        }
                        Ok(())
                    }
                    Some(found) => Err(ParseError::Unexpected {
                        found,
                        at: self.pos - found.len_utf8(),
                    }),
                    None => Err(ParseError::Unterminated(open)),
                }
            }
            Some(found) => Err(ParseError::Unexpected {
                found,
                at: self.pos,
            }),
            None => Err(ParseError::Unterminated(open)),
        }
    }

    /// `${1|one,two|}` after the opening `|`: insert the first option.
    fn choice(&mut self, open: usize) -> Result<(), ParseError> {
        let mut options = vec![String::new()];
        loop {
            match self.bump() {
                None => return Err(ParseError::Unterminated(open)),
                Some('\\') => {
                    if let (Some(escaped), Some(option)) = (self.bump(), options.last_mut()) {
                        option.push(escaped);
                    }
                }
                Some(',') => options.push(String::new()),
                Some('|') => {
                    return match self.bump() {
                        Some('}') => {
                            self.out.push_str(&options[0]);
                            Ok(())
                        }
                        Some(found) => Err(ParseError::Unexpected {
                            found,
                            at: self.pos - found.len_utf8(),
                        }),
                        None => Err(ParseError::Unterminated(open)),
                    };
                }
                Some(c) => {
                    if let Some(option) = options.last_mut() {
                        option.push(c);
                    }
                }
            }
        }
    }

    fn push_mark(&mut self, idx: usize, begin: usize) {
        self.marks.push(Mark {
            idx,
            begin,
            end: self.out.len(),
            text: self.out[begin..].to_string(),
        });
    }
}

fn is_var_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_var_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Expand an LSP snippet template.
///
/// `visual` is substituted for `TM_SELECTED_TEXT`. Tab stops are returned in template order,
/// with a nested placeholder listed before the placeholder that contains it.
pub fn expand(
    chars: &WordChars,
    ctx: &Context,
    template: &str,
    visual: &str,
) -> Result<Expansion, ParseError> {
    let mut expander = Expander {
        src: template,
        pos: 0,
        vars: Variables { ctx, chars, visual },
        out: String::with_capacity(template.len()),
        marks: Vec::new(),
    };
    expander.expand(None)?;
    Ok(Expansion {
        text: expander.out,
        marks: expander.marks,
    })
}

impl SnippetParser for LspSnippetParser {
    fn parse(
        &self,
        chars: &WordChars,
        ctx: &Context,
        snippet: &SnippetEdit,
        visual: &str,
    ) -> Result<(ParsedEdit, Vec<Mark>), ParseError> {
        if snippet.grammar != SnippetGrammar::Lsp {
            return Err(ParseError::UnsupportedGrammar(snippet.grammar));
        }

        let expansion = expand(chars, ctx, &snippet.new_text, visual)?;
        let new_prefix = expansion.text[..expansion.cursor()].to_string();

        let edit = match snippet.range {
            None => ParsedEdit::Contextual(ContextualEdit {
                new_prefix,
                ..derive_contextual(chars, ctx, &expansion.text)
            }),
            Some(range) => ParsedEdit::Range(RangeEdit {
                new_prefix: Some(new_prefix),
                ..RangeEdit::new(range.begin, range.end, range.encoding, expansion.text)
            }),
        };
        Ok((edit, expansion.marks))
    }
}
