/// One run of lesson prose after splitting out math and bold markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineToken {
    Text(String),
    Bold(String),
    /// `$..$` or `\(..\)`, kept as raw TeX.
    InlineMath(String),
    /// `$$..$$` or `\[..\]`, kept as raw TeX.
    BlockMath(String),
}

/// Split prose into text, bold and math runs.
///
/// Math delimiters are matched first; `**bold**` is only recognised in the
/// text between math runs. Unclosed delimiters stay as literal text.
#[must_use]
pub fn tokenize(input: &str) -> Vec<InlineToken> {
    let mut tokens = Vec::new();
    let mut last = 0;
    let mut cursor = 0;

    while cursor < input.len() {
        let rest = &input[cursor..];
        if let Some((token, len)) = math_at(rest) {
            push_text(&mut tokens, &input[last..cursor]);
            tokens.push(token);
            cursor += len;
            last = cursor;
        } else {
            cursor += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    push_text(&mut tokens, &input[last..]);
    tokens
}

/// Plain text of a token list, markup dropped. Used for labels and titles.
#[must_use]
pub fn plain_text(tokens: &[InlineToken]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            InlineToken::Text(value)
            | InlineToken::Bold(value)
            | InlineToken::InlineMath(value)
            | InlineToken::BlockMath(value) => value.as_str(),
        })
        .collect()
}

fn math_at(rest: &str) -> Option<(InlineToken, usize)> {
    if let Some(body) = rest.strip_prefix("$$") {
        if let Some(end) = closing(body, "$$", |_| true) {
            return Some((InlineToken::BlockMath(body[..end].to_owned()), end + 4));
        }
    }
    if let Some(body) = rest.strip_prefix('$') {
        if let Some(end) = closing(body, "$", |ch| ch != '$') {
            return Some((InlineToken::InlineMath(body[..end].to_owned()), end + 2));
        }
    }
    if let Some(body) = rest.strip_prefix("\\(") {
        if let Some(end) = closing(body, "\\)", |ch| ch != '\n') {
            return Some((InlineToken::InlineMath(body[..end].to_owned()), end + 4));
        }
    }
    if let Some(body) = rest.strip_prefix("\\[") {
        if let Some(end) = closing(body, "\\]", |_| true) {
            return Some((InlineToken::BlockMath(body[..end].to_owned()), end + 4));
        }
    }
    None
}

fn push_text(tokens: &mut Vec<InlineToken>, text: &str) {
    let mut last = 0;
    let mut cursor = 0;
    while cursor < text.len() {
        let rest = &text[cursor..];
        if let Some(body) = rest.strip_prefix("**") {
            if let Some(end) = closing(body, "**", |ch| ch != '\n') {
                if cursor > last {
                    tokens.push(InlineToken::Text(text[last..cursor].to_owned()));
                }
                tokens.push(InlineToken::Bold(body[..end].to_owned()));
                cursor += end + 4;
                last = cursor;
                continue;
            }
        }
        cursor += rest.chars().next().map_or(1, char::len_utf8);
    }
    if text.len() > last {
        tokens.push(InlineToken::Text(text[last..].to_owned()));
    }
}

/// Byte offset of the shortest non-empty body made of `allowed` characters
/// that is followed by `close`.
fn closing(body: &str, close: &str, allowed: impl Fn(char) -> bool) -> Option<usize> {
    let first = body.chars().next()?;
    if !allowed(first) {
        return None;
    }
    let mut offset = first.len_utf8();
    loop {
        if body[offset..].starts_with(close) {
            return Some(offset);
        }
        let ch = body[offset..].chars().next()?;
        if !allowed(ch) {
            return None;
        }
        offset += ch.len_utf8();
    }
}
