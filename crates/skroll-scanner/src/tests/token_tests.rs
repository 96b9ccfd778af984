use super::*;

#[test]
fn kind_indices_follow_external_order() {
    for (index, kind) in TokenKind::ALL.iter().enumerate() {
        assert_eq!(kind.index(), index);
        assert_eq!(TokenKind::from_index(index), Some(*kind));
    }
    assert_eq!(TokenKind::from_index(4), None);
}

#[test]
fn valid_symbols_map_to_mask() {
    let mask = TokenSet::from_valid_symbols(&[false, true, true, false]);
    assert!(mask.accepts(TokenKind::Dedent));
    assert!(mask.accepts(TokenKind::Newline));
    assert!(!mask.accepts(TokenKind::Indent));
    assert!(!mask.accepts(TokenKind::IndentationError));
}

#[test]
fn short_valid_symbols_reject_missing_kinds() {
    let mask = TokenSet::from_valid_symbols(&[true]);
    assert_eq!(mask, TokenSet::INDENT);
    assert_eq!(TokenSet::from_valid_symbols(&[]), TokenSet::empty());
}

#[test]
fn extra_valid_symbols_are_ignored() {
    let mask = TokenSet::from_valid_symbols(&[true, true, true, true, true, true]);
    assert_eq!(mask, TokenSet::all());
}

#[test]
fn token_display_includes_indent_width() {
    assert_eq!(Token::Indent { width: 4 }.to_string(), "INDENT(4)");
    assert_eq!(Token::Dedent.to_string(), "DEDENT");
    assert_eq!(Token::IndentationError.to_string(), "INDENTATION_ERROR");
    assert_eq!(Token::Indent { width: 4 }.width(), Some(4));
    assert_eq!(Token::Newline.width(), None);
}
