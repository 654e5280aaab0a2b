//! Case conversion for grammar names.
//!
//! Grammar names are mostly snake_case (`binary_expression`), occasionally
//! with leading underscores for hidden rules, and token literals can be
//! arbitrary punctuation.

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '.')
}

/// Convert snake_case or kebab-case to PascalCase.
///
/// Words are split on `_`, `-` and `.`. Input that is already PascalCase
/// (starts uppercase, has lowercase, no separators) is returned unchanged.
///
/// # Examples
/// ```
/// use sapling_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("binary_expression"), "BinaryExpression");
/// assert_eq!(to_pascal_case("NodeKind"), "NodeKind");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let starts_upper = s.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
    if starts_upper && has_lower && !s.chars().any(is_separator) {
        return s.to_string();
    }

    s.split(is_separator)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            let mut out = String::with_capacity(word.len());
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
            }
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
            out
        })
        .collect()
}

/// Convert PascalCase, camelCase or kebab-case to snake_case.
///
/// # Examples
/// ```
/// use sapling_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FieldName"), "field_name");
/// assert_eq!(to_snake_case("field-name"), "field_name");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if is_separator(c) {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert any case to SCREAMING_SNAKE_CASE, for constants and enum variants.
pub fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_ascii_uppercase()
}

/// Whether `s` is non-blank and only consists of ASCII letters and whitespace,
/// like keyword tokens (`return`, `else if`).
pub fn is_alphabetic_words(s: &str) -> bool {
    !s.trim().is_empty() && s.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Descriptive name of an ASCII punctuation character, as used for token
/// variant names (`+` is `PLUS_SIGN`).
pub fn punctuation_name(c: char) -> Option<&'static str> {
    let name = match c {
        '!' => "EXCLAMATION_MARK",
        '"' => "QUOTATION_MARK",
        '#' => "NUMBER_SIGN",
        '$' => "DOLLAR_SIGN",
        '%' => "PERCENT_SIGN",
        '&' => "AMPERSAND",
        '\'' => "APOSTROPHE",
        '(' => "LEFT_PARENTHESIS",
        ')' => "RIGHT_PARENTHESIS",
        '*' => "ASTERISK",
        '+' => "PLUS_SIGN",
        ',' => "COMMA",
        '-' => "HYPHEN_MINUS",
        '.' => "FULL_STOP",
        '/' => "SOLIDUS",
        ':' => "COLON",
        ';' => "SEMICOLON",
        '<' => "LESS_THAN_SIGN",
        '=' => "EQUALS_SIGN",
        '>' => "GREATER_THAN_SIGN",
        '?' => "QUESTION_MARK",
        '@' => "COMMERCIAL_AT",
        '[' => "LEFT_SQUARE_BRACKET",
        '\\' => "REVERSE_SOLIDUS",
        ']' => "RIGHT_SQUARE_BRACKET",
        '^' => "CIRCUMFLEX_ACCENT",
        '`' => "GRAVE_ACCENT",
        '{' => "LEFT_CURLY_BRACKET",
        '|' => "VERTICAL_LINE",
        '}' => "RIGHT_CURLY_BRACKET",
        '~' => "TILDE",
        '\n' => "LINE_FEED",
        '\t' => "CHARACTER_TABULATION",
        ' ' => "SPACE",
        _ => return None,
    };
    Some(name)
}
