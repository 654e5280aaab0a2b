use crate::utils::{
    is_alphabetic_words, punctuation_name, to_pascal_case, to_snake_case, to_upper_snake_case,
};

#[test]
fn pascal_case_from_snake() {
    assert_eq!(to_pascal_case("binary_expression"), "BinaryExpression");
    assert_eq!(to_pascal_case("foo"), "Foo");
    assert_eq!(to_pascal_case("_hidden_rule"), "HiddenRule");
    assert_eq!(to_pascal_case("foo_"), "Foo");
}

#[test]
fn pascal_case_normalizes_shouting() {
    assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
    assert_eq!(to_pascal_case("FOO"), "Foo");
}

#[test]
fn pascal_case_idempotent() {
    assert_eq!(to_pascal_case("FooBar"), "FooBar");
    assert_eq!(to_pascal_case("Child"), "Child");
}

#[test]
fn pascal_case_from_kebab_and_dotted() {
    assert_eq!(to_pascal_case("foo-bar"), "FooBar");
    assert_eq!(to_pascal_case("foo.bar"), "FooBar");
}

#[test]
fn snake_case_conversions() {
    assert_eq!(to_snake_case("FooBar"), "foo_bar");
    assert_eq!(to_snake_case("fooBar"), "foo_bar");
    assert_eq!(to_snake_case("foo-bar"), "foo_bar");
    assert_eq!(to_snake_case("already_snake"), "already_snake");
}

#[test]
fn upper_snake_case() {
    assert_eq!(to_upper_snake_case("left_operand"), "LEFT_OPERAND");
    assert_eq!(to_upper_snake_case("typeName"), "TYPE_NAME");
}

#[test]
fn alphabetic_words() {
    assert!(is_alphabetic_words("return"));
    assert!(is_alphabetic_words("else if"));
    assert!(!is_alphabetic_words("u8"));
    assert!(!is_alphabetic_words("+="));
    assert!(!is_alphabetic_words("  "));
}

#[test]
fn punctuation_names() {
    assert_eq!(punctuation_name('+'), Some("PLUS_SIGN"));
    assert_eq!(punctuation_name('('), Some("LEFT_PARENTHESIS"));
    assert_eq!(punctuation_name('a'), None);
}
