use crate::foundation::error::{ConvertError, ConvertResult};
use crate::path::ParseMode;
use crate::path::command::Command;

/// Byte range of a token in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// One of `M m C c S s L l H h V v Q q T t A a Z z`.
    Command(char),
    /// Signed decimal literal with optional fractional part and exponent.
    Number(f64),
}

/// Lex path data into command and number tokens.
///
/// Lenient mode is a pure filter: bytes matching neither pattern
/// (whitespace, commas, stray symbols, malformed numeric tails) are
/// silently dropped and the function never errors. Strict mode reports
/// the first unexpected character or malformed numeric literal with its
/// byte offset.
pub fn lex(input: &str, mode: ParseMode) -> ConvertResult<Vec<Token>> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;

        // Whitespace and commas separate tokens in the grammar.
        if c.is_whitespace() || c == ',' {
            i += 1;
            continue;
        }

        if Command::is_letter(c) {
            out.push(Token {
                kind: TokenKind::Command(c),
                span: Span { start: i, end: i + 1 },
            });
            i += 1;
            continue;
        }

        // Number: [+-]? digits (. digits?)? ([eE][+-]? digits)?
        // with the leading-dot form .5 and the trailing-dot form 1.
        if starts_number(bytes, i) {
            let start = i;
            if matches!(bytes[i] as char, '+' | '-') {
                i += 1;
            }
            while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] as char) == '.' {
                i += 1;
                while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                    i += 1;
                }
            }

            // exponent
            if i < bytes.len() && matches!(bytes[i] as char, 'e' | 'E') {
                let e_pos = i;
                i += 1;
                if i < bytes.len() && matches!(bytes[i] as char, '+' | '-') {
                    i += 1;
                }
                let exp_start = i;
                while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                    i += 1;
                }
                if exp_start == i {
                    if mode == ParseMode::Strict {
                        return Err(ConvertError::malformed(
                            e_pos,
                            "invalid number exponent (expected digits)",
                        ));
                    }
                    // Keep the mantissa, rescan from the bare 'e'.
                    i = e_pos;
                }
            }

            let s = &input[start..i];
            match s.parse::<f64>() {
                Ok(v) => out.push(Token {
                    kind: TokenKind::Number(v),
                    span: Span { start, end: i },
                }),
                Err(_) => {
                    if mode == ParseMode::Strict {
                        return Err(ConvertError::malformed(start, "invalid number"));
                    }
                }
            }
            continue;
        }

        if mode == ParseMode::Strict {
            return Err(ConvertError::malformed(
                i,
                format!("unexpected character '{c}'"),
            ));
        }
        i += 1;
    }

    Ok(out)
}

fn starts_number(bytes: &[u8], i: usize) -> bool {
    let c = bytes[i] as char;
    if c.is_ascii_digit() {
        return true;
    }
    if c == '.' {
        return i + 1 < bytes.len() && (bytes[i + 1] as char).is_ascii_digit();
    }
    if matches!(c, '+' | '-') {
        if i + 1 >= bytes.len() {
            return false;
        }
        let n = bytes[i + 1] as char;
        return n.is_ascii_digit()
            || (n == '.' && i + 2 < bytes.len() && (bytes[i + 2] as char).is_ascii_digit());
    }
    false
}
