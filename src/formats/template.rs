use thiserror::Error;

// Validates the {{ ... }} action grammar shared by the text and HTML template
// flavors; the flavors only diverge after parsing, during escaping, so a
// single parser covers both.
//
// Errors that reflect a grammar violation spell "unexpected ..." like the
// reference parser does; recoverable oddities (unclosed action, unterminated
// string) use different wording and are deliberately not matched by the
// template lint's allowlist.

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unexpected {found} in {context}")]
    Unexpected {
        found: String,
        context: &'static str,
    },
    #[error("unexpected EOF")]
    UnexpectedEof,
    #[error("unexpected {{{{end}}}}")]
    UnexpectedEnd,
    #[error("unexpected {{{{else}}}}")]
    UnexpectedElse,
    #[error("unexpected right paren")]
    UnexpectedRightParen,
    #[error("unclosed action")]
    UnclosedAction,
    #[error("unclosed comment")]
    UnclosedComment,
    #[error("unclosed left paren")]
    UnclosedLeftParen,
    #[error("unterminated quoted string")]
    UnterminatedString,
    #[error("unrecognized character in action: {0:?}")]
    BadCharacter(char),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Field,
    Variable,
    Str,
    Number,
    Pipe,
    LParen,
    RParen,
    Declare,
    Comma,
    Dot,
}

/// Checks that `source` is a well-formed template. Only the verdict matters
/// to callers; nothing is executed or kept.
pub fn parse(source: &str) -> Result<(), TemplateError> {
    let mut rest = source;
    // control actions opened so far (if/range/with/block/define)
    let mut open: Vec<&'static str> = Vec::new();

    while let Some(start) = rest.find("{{") {
        rest = &rest[start + 2..];
        if let Some(marked) = rest.strip_prefix('-') {
            // trim marker only counts when followed by whitespace
            if marked.starts_with(|c: char| c.is_ascii_whitespace()) {
                rest = marked;
            }
        }
        if let Some(comment) = rest.strip_prefix("/*") {
            match comment.find("*/}}") {
                Some(end) => {
                    rest = &comment[end + 4..];
                    continue;
                }
                None => return Err(TemplateError::UnclosedComment),
            }
        }
        let end = action_end(rest)?;
        let action = &rest[..end];
        rest = &rest[end + 2..];
        let action = action.strip_suffix('-').unwrap_or(action);
        check_action(action.trim(), &mut open)?;
    }

    if open.is_empty() {
        Ok(())
    } else {
        Err(TemplateError::UnexpectedEof)
    }
}

/// Byte offset of the closing "}}", skipping over quoted and raw strings.
fn action_end(action: &str) -> Result<usize, TemplateError> {
    let bytes = action.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'}' if bytes.get(i + 1) == Some(&b'}') => return Ok(i),
            b'"' => {
                i += 1;
                loop {
                    match bytes.get(i) {
                        Some(b'\\') => i += 2,
                        Some(b'"') => break,
                        Some(b'\n') | None => return Err(TemplateError::UnterminatedString),
                        Some(_) => i += 1,
                    }
                }
                i += 1;
            }
            b'`' => {
                i += 1;
                while bytes.get(i).is_some_and(|&b| b != b'`') {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err(TemplateError::UnterminatedString);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    Err(TemplateError::UnclosedAction)
}

fn lex_action(action: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut chars = action.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_ascii_whitespace() => {
                chars.next();
            }
            '"' => {
                chars.next();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(TemplateError::UnterminatedString);
                }
                tokens.push(Token::Str);
            }
            '`' => {
                chars.next();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '`' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(TemplateError::UnterminatedString);
                }
                tokens.push(Token::Str);
            }
            '\'' => {
                chars.next();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '\'' => {
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(TemplateError::UnterminatedString);
                }
                tokens.push(Token::Number);
            }
            '.' => {
                chars.next();
                if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    consume_number(&mut chars);
                    tokens.push(Token::Number);
                } else if chars
                    .peek()
                    .is_some_and(|&c| c.is_ascii_alphanumeric() || c == '_')
                {
                    consume_field_chain(&mut chars);
                    tokens.push(Token::Field);
                } else {
                    tokens.push(Token::Dot);
                }
            }
            '$' => {
                chars.next();
                while chars
                    .peek()
                    .is_some_and(|&c| c.is_ascii_alphanumeric() || c == '_')
                {
                    chars.next();
                }
                // a variable may be followed by field selections
                if chars.peek() == Some(&'.') {
                    chars.next();
                    consume_field_chain(&mut chars);
                }
                tokens.push(Token::Variable);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Pipe);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            ':' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Declare);
                } else {
                    return Err(TemplateError::Unexpected {
                        found: "\":\"".to_string(),
                        context: "command",
                    });
                }
            }
            c if c.is_ascii_digit() || c == '+' || c == '-' => {
                consume_number(&mut chars);
                tokens.push(Token::Number);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // builtin idents may carry field selections too
                if chars.peek() == Some(&'.') {
                    chars.next();
                    consume_field_chain(&mut chars);
                }
                tokens.push(Token::Ident(ident));
            }
            other => return Err(TemplateError::BadCharacter(other)),
        }
    }
    Ok(tokens)
}

fn consume_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars
        .peek()
        .is_some_and(|&c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'))
    {
        chars.next();
    }
}

fn consume_field_chain(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars
        .peek()
        .is_some_and(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        chars.next();
    }
}

fn check_action(action: &str, open: &mut Vec<&'static str>) -> Result<(), TemplateError> {
    if action.is_empty() {
        return Err(TemplateError::MissingValue("command"));
    }
    let tokens = lex_action(action)?;
    if tokens.is_empty() {
        return Err(TemplateError::MissingValue("command"));
    }

    // paren discipline holds per action
    let mut depth = 0usize;
    for token in &tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(TemplateError::UnexpectedRightParen)?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(TemplateError::UnclosedLeftParen);
    }

    let Token::Ident(first) = &tokens[0] else {
        return Ok(());
    };
    match first.as_str() {
        "if" => {
            if tokens.len() == 1 {
                return Err(TemplateError::MissingValue("if"));
            }
            open.push("if");
        }
        "with" => {
            if tokens.len() == 1 {
                return Err(TemplateError::MissingValue("with"));
            }
            open.push("with");
        }
        "range" => {
            if tokens.len() == 1 {
                return Err(TemplateError::MissingValue("range"));
            }
            open.push("range");
        }
        "block" => {
            if !matches!(tokens.get(1), Some(Token::Str)) {
                return Err(TemplateError::Unexpected {
                    found: describe(tokens.get(1)),
                    context: "block",
                });
            }
            open.push("block");
        }
        "define" => {
            if !matches!(tokens.get(1), Some(Token::Str)) {
                return Err(TemplateError::Unexpected {
                    found: describe(tokens.get(1)),
                    context: "define",
                });
            }
            open.push("define");
        }
        "template" => {
            if !matches!(tokens.get(1), Some(Token::Str)) {
                return Err(TemplateError::Unexpected {
                    found: describe(tokens.get(1)),
                    context: "template",
                });
            }
        }
        "end" => {
            if tokens.len() > 1 {
                return Err(TemplateError::Unexpected {
                    found: describe(tokens.get(1)),
                    context: "end",
                });
            }
            if open.pop().is_none() {
                return Err(TemplateError::UnexpectedEnd);
            }
        }
        "else" => {
            // "else if pipeline" keeps the surrounding if open
            match open.last() {
                Some(&("if" | "range" | "with")) => {}
                _ => return Err(TemplateError::UnexpectedElse),
            }
        }
        _ => {}
    }
    Ok(())
}

fn describe(token: Option<&Token>) -> String {
    match token {
        None => "end of action".to_string(),
        Some(Token::Ident(name)) => format!("{:?}", name),
        Some(Token::Field) => "field".to_string(),
        Some(Token::Variable) => "variable".to_string(),
        Some(Token::Str) => "string".to_string(),
        Some(Token::Number) => "number".to_string(),
        Some(Token::Pipe) => "\"|\"".to_string(),
        Some(Token::LParen) => "\"(\"".to_string(),
        Some(Token::RParen) => "\")\"".to_string(),
        Some(Token::Declare) => "\":=\"".to_string(),
        Some(Token::Comma) => "\",\"".to_string(),
        Some(Token::Dot) => "\".\"".to_string(),
    }
}
