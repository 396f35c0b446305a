//! Minimal delimited-text codec shared by the row emitter and the report.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Float text with a guaranteed fractional part: `1.0`, `0.25`,
/// `0.3333333333333333`. Keeps computed floats distinct from integers.
pub fn format_float(x: f64) -> String {
    let s = x.to_string();
    if x.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}

fn needs_quotes(field: &str, delim: char) -> bool {
    field.contains(delim) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one record followed by `\n`, quoting fields that need it.
pub fn write_record<W, S>(writer: &mut W, fields: &[S], delim: Delimiter) -> io::Result<()>
where
    W: Write + ?Sized,
    S: AsRef<str>,
{
    let d = delim.as_char();
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(d);
        }
        let field = field.as_ref();
        if needs_quotes(field, d) {
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(field);
        }
    }
    line.push('\n');
    writer.write_all(line.as_bytes())
}

/// Split one line into fields, honoring quotes and doubled quotes.
pub fn parse_line(line: &str, delim: Delimiter) -> Vec<String> {
    let d = delim.as_char();
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == d {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}
