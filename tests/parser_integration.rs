//! Integration tests for expression parsing
//!
//! These tests cover precedence levels, associativity, literal handling,
//! custom precedence tables and error reporting through the public API.

use gentab::expression::{
    ast::{BinaryOp, Expr, UnaryOp, Variable},
    error::SyntaxErrorKind,
    parser::{ExpressionParser, OperatorFactory, ParserConfig, StandardOperators},
    precedence::PrecedenceTable,
};

fn canonical(input: &str) -> String {
    ExpressionParser::standard()
        .parse(input)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", input, e))
        .to_string()
}

// ============================================================================
// Precedence and Associativity
// ============================================================================

#[test]
fn test_all_levels_in_one_expression() {
    assert_eq!(
        canonical("x << 2 ** y + z * 3 // 2"),
        "(x << ((2 ** y) + (z * (3 // 2))))"
    );
}

#[test]
fn test_every_level_folds_left() {
    assert_eq!(canonical("2 ** 3 ** 2"), "((2 ** 3) ** 2)");
    assert_eq!(canonical("x / y * z"), "((x / y) * z)");
    assert_eq!(canonical("x - y + z"), "((x - y) + z)");
    assert_eq!(canonical("x << y >>> z >> 1"), "(((x << y) >>> z) >> 1)");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(canonical("(x + y) * z"), "((x + y) * z)");
    assert_eq!(canonical("x - (y - z)"), "(x - (y - z))");
    assert_eq!(canonical("((((x))))"), "x");
}

#[test]
fn test_unary_binds_tightest() {
    assert_eq!(canonical("-x ** 2"), "(-(x) ** 2)");
    assert_eq!(canonical("- -x"), "-(-(x))");
    assert_eq!(canonical("-(x + 1)"), "-((x + 1))");
}

// ============================================================================
// Literals and Whitespace
// ============================================================================

#[test]
fn test_negative_literal_vs_negation() {
    let parser = ExpressionParser::standard();
    assert_eq!(parser.parse("-5").unwrap(), Expr::constant(-5));
    assert_eq!(
        parser.parse("-(5)").unwrap(),
        Expr::unary(UnaryOp::Negate, Expr::constant(5))
    );
    assert_eq!(
        parser.parse("- 5").unwrap(),
        Expr::unary(UnaryOp::Negate, Expr::constant(5))
    );
}

#[test]
fn test_minus_minus_literal() {
    assert_eq!(canonical("x--5"), "(x - -5)");
    assert_eq!(canonical("x - - 5"), "(x - -(5))");
}

#[test]
fn test_literal_text_is_kept() {
    // Too large for i32, but still a valid literal
    assert_eq!(canonical("99999999999999999999"), "99999999999999999999");
    assert_eq!(canonical("007"), "007");
}

#[test]
fn test_whitespace_anywhere_between_tokens() {
    assert_eq!(canonical(" \t x\n+\r\ny "), "(x + y)");
    assert_eq!(canonical("x>>>1"), "(x >>> 1)");
}

#[test]
fn test_whitespace_never_inside_literal() {
    let err = ExpressionParser::standard().parse("1 2").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::ExtraTrailingInput { found: '2' });
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_builds_expected_tree() {
    let expr = ExpressionParser::standard().parse("x * (y - 2)").unwrap();
    let expected = Expr::binary(
        BinaryOp::Multiply,
        Expr::var(Variable::X),
        Expr::binary(BinaryOp::Subtract, Expr::var(Variable::Y), Expr::constant(2)),
    );
    assert_eq!(expr, expected);
    assert_eq!(expr.variables(), vec![Variable::X, Variable::Y]);
    assert_eq!(expr.depth(), 3);
}

#[test]
fn test_canonical_form_reparses_to_same_tree() {
    let parser = ExpressionParser::standard();
    for input in [
        "x + y * z",
        "-x >> -3",
        "2 ** -(y) // 7",
        "((x))-(-(-1))",
        "x >>> 31 << 1",
    ] {
        let expr = parser.parse(input).unwrap();
        let reparsed = parser.parse(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed, "round trip of {:?}", input);
    }
}

// ============================================================================
// Custom Tables and Factories
// ============================================================================

#[test]
fn test_basic_table_has_no_power_operators() {
    let parser = ExpressionParser::basic();
    assert!(parser.parse("x << y * 2").is_ok());
    let err = parser.parse("x ** 2").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::MissingArgument { found: Some('*') });
}

#[test]
fn test_table_from_json() {
    let table: PrecedenceTable = serde_json::from_str(
        r#"{ "unary": ["-"], "levels": [["+", "-"], ["*", "/"]] }"#,
    )
    .unwrap();
    table.validate().unwrap();
    let parser = ExpressionParser::new(table, StandardOperators);
    // Additive binds tighter than multiplicative here
    assert_eq!(parser.parse("x * y + z").unwrap().to_string(), "(x * (y + z))");
}

#[test]
fn test_factory_can_reject_operator() {
    struct NoDivision;

    impl OperatorFactory for NoDivision {
        fn binary(&self, op: &str, left: Expr, right: Expr) -> Result<Expr, SyntaxErrorKind> {
            if op == "/" {
                return Err(SyntaxErrorKind::UnknownOperator(op.to_string()));
            }
            StandardOperators.binary(op, left, right)
        }

        fn unary(&self, op: &str, operand: Expr) -> Result<Expr, SyntaxErrorKind> {
            StandardOperators.unary(op, operand)
        }
    }

    let parser = ExpressionParser::new(PrecedenceTable::standard(), NoDivision);
    assert!(parser.parse("x * y").is_ok());
    let err = parser.parse("x / y").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnknownOperator("/".to_string()));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_argument_position() {
    let err = ExpressionParser::standard().parse("x +").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::MissingArgument { found: None });
    assert_eq!(err.position.column, 4);
    assert_eq!(
        err.to_string(),
        "Error at line 1, column 4: missing argument, found end of input"
    );
}

#[test]
fn test_unclosed_parenthesis() {
    let err = ExpressionParser::standard().parse("(x + 1").unwrap_err();
    assert_eq!(
        err.kind,
        SyntaxErrorKind::UnexpectedSymbol {
            expected: ")".to_string(),
            found: None
        }
    );
}

#[test]
fn test_unknown_variable() {
    let err = ExpressionParser::standard().parse("x + w").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::MissingArgument { found: Some('w') });
    assert_eq!(err.position.column, 5);
}

#[test]
fn test_error_on_second_line() {
    let input = "x +\n  * y";
    let err = ExpressionParser::standard().parse(input).unwrap_err();
    assert_eq!(err.position.line, 2);
    assert_eq!(err.position.column, 3);
    assert!(err.format_with_source(input).ends_with("  * y\n  ^\n"));
}

#[test]
fn test_empty_input() {
    let err = ExpressionParser::standard().parse("   ").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::MissingArgument { found: None });
}

#[test]
fn test_nesting_limit() {
    let parser = ExpressionParser::standard().with_config(ParserConfig::new().with_max_depth(4));
    assert!(parser.parse("((((x))))").is_ok());
    let err = parser.parse("(((((x)))))").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::NestingTooDeep { limit: 4 });

    let deep = format!("{}x", "-".repeat(10_000));
    let err = ExpressionParser::standard().parse(&deep).unwrap_err();
    assert!(matches!(err.kind, SyntaxErrorKind::NestingTooDeep { .. }));
}

#[test]
fn test_long_flat_chain_is_bounded() {
    let chain = format!("x{}", "+x".repeat(500_000));
    let err = ExpressionParser::standard().parse(&chain).unwrap_err();
    assert!(matches!(err.kind, SyntaxErrorKind::NestingTooDeep { limit: 256 }));

    // Just under the limit the tree is still walkable
    let chain = format!("x{}", "+x".repeat(256));
    let expr = ExpressionParser::standard().parse(&chain).unwrap();
    assert_eq!(expr.depth(), 257);
    assert_eq!(expr.evaluate_at(&gentab::CheckedInt, 1, 0, 0), Ok(257));
}
