use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;
use voice_expense::{
    parse_expense, Annotation, Annotator, CategoryVocabulary, DateBias, ExpenseError,
    ExpenseParser, FixedClock, RelativeDateInterpreter, RuleAnnotator,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn parser_on(
    today: NaiveDate,
) -> ExpenseParser<RuleAnnotator, RelativeDateInterpreter, FixedClock> {
    ExpenseParser::new(
        RuleAnnotator::new(),
        RelativeDateInterpreter::new(),
        FixedClock(today),
        CategoryVocabulary::default(),
        DateBias::Past,
    )
    .unwrap()
}

/// 參考日 2024-05-15（星期三）
fn parser() -> ExpenseParser<RuleAnnotator, RelativeDateInterpreter, FixedClock> {
    parser_on(ymd(2024, 5, 15))
}

#[test]
fn test_spoken_example_end_to_end() -> Result<()> {
    let expense = parser().parse("I spent 500 on food yesterday")?;

    assert_eq!(expense.amount, Some(dec("500")));
    assert_eq!(expense.category, "food");
    assert_eq!(expense.date, ymd(2024, 5, 14));
    assert_eq!(expense.description, "I spent on yesterday");

    let json = serde_json::to_value(&expense)?;
    assert_eq!(json["date"], "2024-05-14");
    Ok(())
}

#[test]
fn test_single_number_with_separators() -> Result<()> {
    let cases = [
        ("paid 1,200 for shopping", "1200"),
        ("bus ticket 45", "45"),
        ("₹2,500.75 on bills", "2500.75"),
        ("dinner was 12.50 dollars", "12.50"),
    ];
    for (text, expected) in cases {
        let expense = parser().parse(text)?;
        assert_eq!(expense.amount, Some(dec(expected)), "input: {}", text);
    }
    Ok(())
}

#[test]
fn test_any_comma_grouping_is_one_amount() -> Result<()> {
    let expense = parser().parse("paid ₹1,00,000 for bills")?;
    assert_eq!(expense.amount, Some(dec("100000")));
    assert_eq!(expense.category, "bills");
    assert_eq!(expense.description, "paid ₹ for");

    let expense = parser().parse("paid $12,34 for bills")?;
    assert_eq!(expense.amount, Some(dec("1234")));
    assert_eq!(expense.description, "paid $ for");
    Ok(())
}

#[test]
fn test_amount_glued_to_currency_is_removed() -> Result<()> {
    for (text, description) in [
        ("spent 500rs on food", "spent rs on"),
        ("Rs500 for food", "Rs for"),
    ] {
        let expense = parser().parse(text)?;
        assert_eq!(expense.amount, Some(dec("500")), "input: {}", text);
        assert_eq!(expense.description, description, "input: {}", text);
        assert!(!expense.description.contains("500"));
    }
    Ok(())
}

#[test]
fn test_no_digits_means_no_amount() -> Result<()> {
    for text in [
        "I spent five hundred on food yesterday",
        "five hundred rupees for the movie",
        "paid the electricity bills",
    ] {
        let expense = parser().parse(text)?;
        assert_eq!(expense.amount, None, "input: {}", text);
        assert!(expense.needs_amount());
    }
    Ok(())
}

#[test]
fn test_money_entity_preferred_over_first_number() -> Result<()> {
    let expense = parser().parse("2 coffees for $7.40 today")?;
    assert_eq!(expense.amount, Some(dec("7.40")));
    assert_eq!(expense.description, "2 coffees for $ today");
    Ok(())
}

#[test]
fn test_first_money_mention_wins_and_second_stays() -> Result<()> {
    let expense = parser().parse("$20 for the cab and $30 tip")?;
    assert_eq!(expense.amount, Some(dec("20")));
    assert!(expense.description.contains("$30"));
    Ok(())
}

#[test]
fn test_category_follows_vocabulary_order() -> Result<()> {
    let expense = parser().parse("shopping for food 300")?;
    assert_eq!(expense.category, "food");

    let expense = parser().parse("movie tickets entertainment then transport home 250")?;
    assert_eq!(expense.category, "transport");
    Ok(())
}

#[test]
fn test_synthetic_vocabulary() -> Result<()> {
    let vocabulary = CategoryVocabulary::new(["shopping", "food", "misc"], "misc")?;
    let parser = ExpenseParser::new(
        RuleAnnotator,
        RelativeDateInterpreter,
        FixedClock(ymd(2024, 5, 15)),
        vocabulary,
        DateBias::Past,
    )?;

    assert_eq!(parser.parse("shopping for food 300")?.category, "shopping");
    assert_eq!(parser.parse("haircut 300")?.category, "misc");
    Ok(())
}

#[test]
fn test_no_keyword_is_other() -> Result<()> {
    let expense = parser().parse("haircut 300 on monday")?;
    assert_eq!(expense.category, "other");
    assert_eq!(expense.date, ymd(2024, 5, 13));
    Ok(())
}

#[test]
fn test_amount_removal_keeps_adjacent_numbers() -> Result<()> {
    let expense = parser().parse("I paid $50 and tipped 150")?;
    assert_eq!(expense.amount, Some(dec("50")));
    assert!(expense.description.contains("150"));

    let sanitized = voice_expense::core::sanitize::DescriptionSanitizer::new(
        &CategoryVocabulary::default(),
    )?
    .sanitize("I paid 150 and tipped 50", Some(dec("50")), "other");
    assert_eq!(sanitized, "I paid 150 and tipped");
    Ok(())
}

#[test]
fn test_description_without_tokens_is_only_trimmed() -> Result<()> {
    let expense = parser().parse("  lunch with   the team  ")?;
    assert_eq!(expense.description, "lunch with   the team");
    Ok(())
}

#[test]
fn test_relative_and_absolute_dates() -> Result<()> {
    let cases = [
        ("taxi 200 the day before yesterday", ymd(2024, 5, 13)),
        ("groceries 80 last friday", ymd(2024, 5, 10)),
        ("electricity bills 1500 on march 3rd", ymd(2024, 3, 3)),
        ("concert 90 on december 20", ymd(2023, 12, 20)),
        ("rent 900 2024-05-01", ymd(2024, 5, 1)),
        ("gift 40 two weeks ago", ymd(2024, 5, 1)),
    ];
    for (text, expected) in cases {
        assert_eq!(parser().parse(text)?.date, expected, "input: {}", text);
    }
    Ok(())
}

#[test]
fn test_future_date_falls_back_to_today() -> Result<()> {
    let expense = parser().parse("will pay 60 for transport tomorrow")?;
    assert_eq!(expense.date, ymd(2024, 5, 15));
    Ok(())
}

#[test]
fn test_no_date_uses_current_day() -> Result<()> {
    let before = Local::now().date_naive();
    let expense = parse_expense("coffee 3")?;
    let after = Local::now().date_naive();

    assert!(expense.date >= before && expense.date <= after);
    assert_eq!(expense.amount, Some(dec("3")));
    Ok(())
}

struct FailingAnnotator;

impl Annotator for FailingAnnotator {
    fn annotate(&self, _text: &str) -> voice_expense::Result<Annotation> {
        Err(ExpenseError::AnnotatorError {
            message: "model not loaded".to_string(),
        })
    }
}

#[test]
fn test_collaborator_failure_is_not_swallowed() {
    let parser = ExpenseParser::new(
        FailingAnnotator,
        RelativeDateInterpreter,
        FixedClock(ymd(2024, 5, 15)),
        CategoryVocabulary::default(),
        DateBias::Past,
    )
    .unwrap();

    let err = parser.parse("I spent 500 on food").unwrap_err();
    assert!(matches!(err, ExpenseError::AnnotatorError { .. }));
    assert_eq!(err.exit_code(), 3);
}
