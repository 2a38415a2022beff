//! Lexer tests for sqlcanon

use sqlcanon::parser::lexer::{tokenize, Token};

mod keywords {
    use super::*;

    #[test]
    fn keywords_match_case_insensitively() {
        let tokens = tokenize("SELECT Select select").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Select, Token::Select, Token::Select, Token::Eof]
        );
    }

    #[test]
    fn simple_select_statement() {
        let tokens = tokenize("select id from users").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Select,
                Token::Identifier("id".to_string()),
                Token::From,
                Token::Identifier("users".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn contextual_words_stay_identifiers() {
        // Interval units and lock strengths are keywords only in context
        let tokens = tokenize("year update share name").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("year".to_string()),
                Token::Identifier("update".to_string()),
                Token::Identifier("share".to_string()),
                Token::Identifier("name".to_string()),
                Token::Eof,
            ]
        );
    }
}

mod identifiers {
    use super::*;

    #[test]
    fn identifier_case_is_preserved() {
        let tokens = tokenize("MyTable").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Identifier("MyTable".to_string()), Token::Eof]
        );
    }

    #[test]
    fn quoted_identifier_keeps_quotes() {
        let tokens = tokenize("\"Order\"").unwrap();
        assert_eq!(
            tokens,
            vec![Token::QuotedIdentifier("\"Order\"".to_string()), Token::Eof]
        );
    }

    #[test]
    fn quoted_identifier_with_escaped_quote() {
        let tokens = tokenize("\"a\"\"b\"").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::QuotedIdentifier("\"a\"\"b\"".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn underscore_and_dollar_in_identifiers() {
        let tokens = tokenize("_tmp col$1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("_tmp".to_string()),
                Token::Identifier("col$1".to_string()),
                Token::Eof,
            ]
        );
    }
}

mod literals {
    use super::*;

    #[test]
    fn string_lexeme_keeps_quotes() {
        let tokens = tokenize("'hello'").unwrap();
        assert_eq!(
            tokens,
            vec![Token::StringLiteral("'hello'".to_string()), Token::Eof]
        );
    }

    #[test]
    fn string_with_escaped_quote() {
        let tokens = tokenize("'it''s'").unwrap();
        assert_eq!(
            tokens,
            vec![Token::StringLiteral("'it''s'".to_string()), Token::Eof]
        );
    }

    #[test]
    fn integer_lexeme_is_verbatim() {
        let tokens = tokenize("007").unwrap();
        assert_eq!(
            tokens,
            vec![Token::IntegerLiteral("007".to_string()), Token::Eof]
        );
    }

    #[test]
    fn float_lexemes() {
        let tokens = tokenize("1.5 .5 2e10 3.25E-2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::FloatLiteral("1.5".to_string()),
                Token::FloatLiteral(".5".to_string()),
                Token::FloatLiteral("2e10".to_string()),
                Token::FloatLiteral("3.25E-2".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn bit_string_lexemes() {
        let tokens = tokenize("b'0101' X'1f'").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::BitLiteral("b'0101'".to_string()),
                Token::BitLiteral("X'1f'".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn boolean_and_null_are_keywords() {
        let tokens = tokenize("true false null").unwrap();
        assert_eq!(
            tokens,
            vec![Token::True, Token::False, Token::Null, Token::Eof]
        );
    }
}

mod operators {
    use super::*;

    #[test]
    fn multi_char_operators() {
        let tokens = tokenize("<= >= <> || :: := =>").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LtEq,
                Token::GtEq,
                Token::NotEq,
                Token::Concat,
                Token::DoubleColon,
                Token::ColonEquals,
                Token::FatArrow,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn bang_equals_normalizes_to_not_eq() {
        let tokens = tokenize("a != b").unwrap();
        assert_eq!(tokens[1], Token::NotEq);
    }

    #[test]
    fn single_char_operators_and_punctuation() {
        let tokens = tokenize("+ - * / % ^ ( ) [ ] , . ; :").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Percent,
                Token::Caret,
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::Comma,
                Token::Dot,
                Token::Semicolon,
                Token::Colon,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn typecast_is_not_two_colons() {
        let tokens = tokenize("a::int").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".to_string()),
                Token::DoubleColon,
                Token::Identifier("int".to_string()),
                Token::Eof,
            ]
        );
    }
}

mod comments {
    use super::*;

    #[test]
    fn single_line_comment_is_skipped() {
        let tokens = tokenize("select 1 -- trailing\n").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Select,
                Token::IntegerLiteral("1".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn block_comment_is_skipped() {
        let tokens = tokenize("select /* inner */ 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Select,
                Token::IntegerLiteral("1".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn nested_block_comment() {
        let tokens = tokenize("select /* a /* b */ c */ 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Select,
                Token::IntegerLiteral("1".to_string()),
                Token::Eof
            ]
        );
    }
}

mod errors {
    use super::*;

    #[test]
    fn unterminated_string() {
        assert!(tokenize("select 'abc").is_err());
    }

    #[test]
    fn unterminated_quoted_identifier() {
        assert!(tokenize("select \"abc").is_err());
    }

    #[test]
    fn unterminated_block_comment() {
        assert!(tokenize("select /* oops").is_err());
    }

    #[test]
    fn unexpected_character() {
        assert!(tokenize("select @").is_err());
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(tokenize("").unwrap(), vec![Token::Eof]);
    }
}
