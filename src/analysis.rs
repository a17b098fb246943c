//! Text analysis: splitting field values into terms.
//!
//! Offsets are measured in characters, not bytes, and are end-exclusive.

use unicode_segmentation::UnicodeSegmentation;

/// A single analyzed term occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Normalized term text.
    pub text: String,
    /// Token position within the field value.
    pub position: u32,
    /// Character offset of the first character.
    pub start_offset: u32,
    /// Character offset one past the last character.
    pub end_offset: u32,
}

/// Split text on Unicode word boundaries and lowercase each word.
///
/// Segments without any alphanumeric character (whitespace, punctuation)
/// are dropped and do not consume a position.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut char_pos: u32 = 0;
    let mut position: u32 = 0;

    for segment in text.split_word_bounds() {
        let len = segment.chars().count() as u32;
        if segment.chars().any(char::is_alphanumeric) {
            tokens.push(Token {
                text: segment.to_lowercase(),
                position,
                start_offset: char_pos,
                end_offset: char_pos + len,
            });
            position += 1;
        }
        char_pos += len;
    }

    tokens
}

/// A keyword value as one token spanning the whole value.
pub fn keyword_token(value: &str, position: u32) -> Token {
    Token {
        text: value.to_string(),
        position,
        start_offset: 0,
        end_offset: value.chars().count() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_positions_and_offsets() {
        let tokens = tokenize("The quick, brown fox");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["the", "quick", "brown", "fox"]);

        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].start_offset, 4);
        assert_eq!(tokens[1].end_offset, 9);
        assert_eq!(tokens[3].start_offset, 17);
        assert_eq!(tokens[3].end_offset, 20);
    }

    #[test]
    fn test_offsets_count_characters() {
        let tokens = tokenize("café au lait");
        assert_eq!(tokens[0].end_offset, 4);
        assert_eq!(tokens[1].start_offset, 5);
    }

    #[test]
    fn test_keyword_token() {
        let token = keyword_token("New York", 0);
        assert_eq!(token.text, "New York");
        assert_eq!(token.end_offset, 8);
    }
}
