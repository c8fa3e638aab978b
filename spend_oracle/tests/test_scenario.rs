use approx::assert_relative_eq;
use chrono::NaiveDate;
use spend_oracle::aggregate::{CategoryForecastMap, DailyTotals};
use spend_oracle::scenario::{apply_scenario, ExpenseShift, Scenario, SkipExpense};
use std::collections::BTreeMap;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// food 30 + rent 1000 on a single date, baseline 1030
fn fixture() -> (DailyTotals, CategoryForecastMap) {
    let date = day("2025-03-01");
    let mut categories = CategoryForecastMap::new();
    categories.insert("food".to_string(), BTreeMap::from([(date, 30.0)]));
    categories.insert("rent".to_string(), BTreeMap::from([(date, 1000.0)]));
    let baseline = DailyTotals::from([(date, 1030.0)]);
    (baseline, categories)
}

fn skip(category: &str) -> Option<SkipExpense> {
    Some(SkipExpense {
        active: true,
        category: category.to_string(),
    })
}

fn shift(category: &str, percent: f64) -> Option<ExpenseShift> {
    Some(ExpenseShift {
        active: true,
        category: category.to_string(),
        percent,
    })
}

#[test]
fn test_skip_expense_removes_the_category() {
    let (baseline, categories) = fixture();
    let scenario = Scenario {
        skip_expense: skip("food"),
        ..Scenario::default()
    };

    let outcome = apply_scenario(&baseline, &categories, &scenario);
    assert_relative_eq!(outcome.adjusted[&day("2025-03-01")], 1000.0);
    assert_relative_eq!(outcome.baseline[&day("2025-03-01")], 1030.0);
}

#[test]
fn test_new_expense_adds_a_surcharge() {
    let (baseline, categories) = fixture();
    let scenario = Scenario {
        new_expense: shift("food", 0.5),
        ..Scenario::default()
    };

    let outcome = apply_scenario(&baseline, &categories, &scenario);
    assert_relative_eq!(outcome.adjusted[&day("2025-03-01")], 1045.0);
}

#[test]
fn test_reduce_expense_scales_down() {
    let (baseline, categories) = fixture();
    let scenario = Scenario {
        reduce_expense: shift("rent", 0.1),
        ..Scenario::default()
    };

    let outcome = apply_scenario(&baseline, &categories, &scenario);
    assert_relative_eq!(outcome.adjusted[&day("2025-03-01")], 930.0);
}

#[test]
fn test_directives_compose_independently() {
    let (baseline, categories) = fixture();

    // Skip alone.
    let alone = apply_scenario(
        &baseline,
        &categories,
        &Scenario {
            skip_expense: skip("food"),
            ..Scenario::default()
        },
    );
    let skip_effect = alone.adjusted[&day("2025-03-01")] - alone.baseline[&day("2025-03-01")];

    // Skip alongside an unrelated category's surcharge.
    let combined = apply_scenario(
        &baseline,
        &categories,
        &Scenario {
            skip_expense: skip("food"),
            new_expense: shift("rent", 0.2),
            ..Scenario::default()
        },
    );
    let combined_total = combined.adjusted[&day("2025-03-01")];

    // The skip's own effect is unchanged by the other directive.
    assert_relative_eq!(combined_total, 1030.0 + skip_effect + 0.2 * 1000.0);
}

#[test]
fn test_overlapping_directives_all_apply() {
    let (baseline, categories) = fixture();
    let scenario = Scenario {
        skip_expense: skip("food"),
        new_expense: shift("food", 0.5),
        reduce_expense: shift("food", 0.25),
    };

    // 1030 - 30 + 15 - 7.5
    let outcome = apply_scenario(&baseline, &categories, &scenario);
    assert_relative_eq!(outcome.adjusted[&day("2025-03-01")], 1007.5);
}

#[test]
fn test_unknown_category_is_a_no_op() {
    let (baseline, categories) = fixture();
    let scenario = Scenario {
        skip_expense: skip("yachts"),
        new_expense: shift("yachts", 0.9),
        reduce_expense: shift("yachts", 0.9),
    };

    let outcome = apply_scenario(&baseline, &categories, &scenario);
    assert_eq!(outcome.adjusted, outcome.baseline);
}

#[test]
fn test_inactive_directives_are_ignored() {
    let (baseline, categories) = fixture();
    let scenario = Scenario {
        skip_expense: Some(SkipExpense {
            active: false,
            category: "food".to_string(),
        }),
        ..Scenario::default()
    };

    let outcome = apply_scenario(&baseline, &categories, &scenario);
    assert_eq!(outcome.adjusted, outcome.baseline);
}

#[test]
fn test_scenario_wire_format() {
    // The JSON shape the HTTP layer receives.
    let raw = r#"{
        "skip_expense": {"active": true, "category": "food"},
        "new_expense": {"active": false, "category": "rent", "percent": 0.2}
    }"#;
    let scenario: Scenario = serde_json::from_str(raw).unwrap();

    assert!(scenario.skip_expense.as_ref().unwrap().active);
    assert!(!scenario.new_expense.as_ref().unwrap().active);
    assert!(scenario.reduce_expense.is_none());

    let (baseline, categories) = fixture();
    let outcome = apply_scenario(&baseline, &categories, &scenario);
    assert_relative_eq!(outcome.adjusted[&day("2025-03-01")], 1000.0);
}
