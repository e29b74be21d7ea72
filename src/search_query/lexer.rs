#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word, already lowercased. Never contains whitespace or `:`.
    Word(String),
    /// Contents of a `"..."` run, inner whitespace preserved.
    Quoted(String),
    /// `name:v1,v2`. Name keeps a leading `-` if one was typed.
    Attribute(String, Vec<String>),
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Whitespace,
    Word,
    AttributeValue,
    QuotedText,
}

/// Single-pass scanner. Total: any input produces some (possibly empty)
/// token stream.
///
/// - whitespace separates tokens
/// - `not` (any case) as a whole word becomes [`Token::Not`]
/// - the first `:` in a word switches to attribute value mode, later `:`
///   are part of the value
/// - `"` only opens a quoted run at the start of a token; an unterminated
///   run is closed at end of input
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut state = State::Whitespace;
    let mut buf = String::new();
    let mut name = String::new();

    for c in input.chars() {
        match state {
            State::Whitespace => {
                if c.is_whitespace() {
                    continue;
                }
                match c {
                    '"' => state = State::QuotedText,
                    ':' => {
                        name.clear();
                        state = State::AttributeValue;
                    }
                    _ => {
                        buf.push(c);
                        state = State::Word;
                    }
                }
            }
            State::Word => {
                if c.is_whitespace() {
                    tokens.push(finish_word(&mut buf));
                    state = State::Whitespace;
                } else if c == ':' {
                    name = std::mem::take(&mut buf);
                    state = State::AttributeValue;
                } else {
                    buf.push(c);
                }
            }
            State::AttributeValue => {
                if c.is_whitespace() {
                    tokens.push(finish_attribute(&mut name, &mut buf));
                    state = State::Whitespace;
                } else {
                    buf.push(c);
                }
            }
            State::QuotedText => {
                if c == '"' {
                    tokens.push(Token::Quoted(std::mem::take(&mut buf).to_lowercase()));
                    state = State::Whitespace;
                } else {
                    buf.push(c);
                }
            }
        }
    }

    match state {
        State::Whitespace => {}
        State::Word => tokens.push(finish_word(&mut buf)),
        State::AttributeValue => tokens.push(finish_attribute(&mut name, &mut buf)),
        State::QuotedText => {
            log::trace!("unterminated quote, closing at end of input");
            tokens.push(Token::Quoted(buf.to_lowercase()));
        }
    }

    tokens
}

fn finish_word(buf: &mut String) -> Token {
    let word = std::mem::take(buf).to_lowercase();
    if word == "not" {
        Token::Not
    } else {
        Token::Word(word)
    }
}

fn finish_attribute(name: &mut String, buf: &mut String) -> Token {
    let values = buf
        .split(',')
        .filter(|value| !value.is_empty())
        .map(|value| value.to_lowercase())
        .collect();
    buf.clear();
    Token::Attribute(std::mem::take(name).to_lowercase(), values)
}
