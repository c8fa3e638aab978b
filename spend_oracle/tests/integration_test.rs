use chrono::{Days, NaiveDate};
use spend_oracle::aggregate::{forecast_by_category, AggregatorConfig};
use spend_oracle::data::TransactionLoader;
use spend_oracle::models::SmoothingSampler;
use spend_oracle::scenario::{apply_scenario, Scenario, SkipExpense};
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a transaction history file: two categories
// with daily history plus income rows that must be excluded
fn create_sample_history() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "date,amount,category").unwrap();
    let start: NaiveDate = "2025-01-01".parse().unwrap();
    for offset in 0..30u64 {
        let date = start + Days::new(offset);
        writeln!(file, "{date},25.0,food").unwrap();
        if offset % 2 == 0 {
            writeln!(file, "{date},8.5,transport").unwrap();
        }
        if offset % 14 == 0 {
            writeln!(file, "{date},2000.0,income").unwrap();
        }
    }

    file
}

#[test]
fn test_full_prediction_workflow() {
    // 1. Load transaction history
    let file = create_sample_history();
    let transactions = TransactionLoader::from_csv(file.path()).unwrap();
    assert!(transactions.len() >= 40);

    // 2. Forecast each category over a two-week window
    let horizon_start: NaiveDate = "2025-02-01".parse().unwrap();
    let dates: Vec<NaiveDate> = (0..14u64).map(|d| horizon_start + Days::new(d)).collect();

    let model = SmoothingSampler::with_seed(0.3, 17).unwrap();
    let forecasts =
        forecast_by_category(&model, &transactions, &dates, &AggregatorConfig::default()).unwrap();

    // Income never shows up as a forecast category.
    assert!(forecasts.categories.contains_key("food"));
    assert!(forecasts.categories.contains_key("transport"));
    assert!(!forecasts.categories.contains_key("income"));

    // Baseline covers exactly the requested dates and sums the categories.
    assert_eq!(forecasts.baseline.len(), dates.len());
    for date in &dates {
        let sum: f64 = forecasts
            .categories
            .values()
            .map(|by_date| by_date[date])
            .sum();
        assert!((forecasts.baseline[date] - sum).abs() < 1e-9);
    }

    // 3. Apply a what-if scenario
    let scenario = Scenario {
        skip_expense: Some(SkipExpense {
            active: true,
            category: "transport".to_string(),
        }),
        ..Scenario::default()
    };
    let outcome = apply_scenario(&forecasts.baseline, &forecasts.categories, &scenario);

    assert_eq!(outcome.adjusted.len(), dates.len());
    for date in &dates {
        let expected = forecasts.baseline[date] - forecasts.categories["transport"][date];
        assert!((outcome.adjusted[date] - expected).abs() < 1e-9);
    }

    // 4. Error handling: a missing file surfaces as a loader error
    let result = TransactionLoader::from_csv("/nonexistent/history.csv");
    assert!(result.is_err());
}
