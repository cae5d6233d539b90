/// A word borrowed from the source buffer, tagged with its 1-based line.
///
/// The lexer classifies nothing: mnemonics, registers, literals, label
/// definitions and the `ORG` directive all come out as plain words. A bare
/// newline is its own one-character token so line boundaries stay visible
/// to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: u32,
}

impl Token<'_> {
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }

    /// Label definitions end in `:`; the name is everything before it.
    pub fn label_name(&self) -> Option<&str> {
        self.text.strip_suffix(':')
    }
}

/// Cursor over the (already uppercased) source text. `;` comments are
/// consumed as whitespace up to, but not including, the terminating
/// newline, so the newline token is still produced.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
}

fn is_word_char(c: u8) -> bool {
    matches!(c, b'.' | b':' | b'A'..=b'Z' | b'0'..=b'9')
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    /// Advance to the next character that can start a word.
    fn skip_blank(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b';' => {
                    while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                c if is_word_char(c) || c == b'\n' => break,
                _ => self.pos += 1,
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_blank();
        let bytes = self.src.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let line = self.line;

        // newline is a one-char word and can't be part of any other
        if bytes[self.pos] == b'\n' {
            self.pos += 1;
            self.line += 1;
        } else {
            while self.pos < bytes.len() && is_word_char(bytes[self.pos]) {
                self.pos += 1;
            }
        }

        Some(Token {
            text: &self.src[start..self.pos],
            line,
        })
    }
}
