//! Forecast a month of spending per category, then compare a what-if
//! scenario against the baseline.
//!
//! Run with: cargo run --example category_forecast

use chrono::{Days, NaiveDate};
use spend_oracle::aggregate::{forecast_by_category, AggregatorConfig};
use spend_oracle::data::Transaction;
use spend_oracle::models::SmoothingSampler;
use spend_oracle::scenario::{apply_scenario, Scenario, SkipExpense};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start: NaiveDate = "2025-02-01".parse()?;

    // Ninety days of synthetic history: groceries every other day, rent
    // monthly, coffee most days.
    let mut transactions = Vec::new();
    for offset in 0..90u64 {
        let date = start + Days::new(offset);
        if offset % 2 == 0 {
            transactions.push(Transaction::new(date, 35.0 + (offset % 7) as f64, "food"));
        }
        if offset % 30 == 0 {
            transactions.push(Transaction::new(date, 1200.0, "rent"));
        }
        if offset % 3 != 0 {
            transactions.push(Transaction::new(date, 4.5, "coffee"));
        }
    }

    let horizon_start = start + Days::new(90);
    let target_dates: Vec<NaiveDate> = (0..14u64).map(|d| horizon_start + Days::new(d)).collect();

    let model = SmoothingSampler::with_seed(0.3, 99)?;
    let forecasts = forecast_by_category(
        &model,
        &transactions,
        &target_dates,
        &AggregatorConfig::default(),
    )?;

    println!("Forecast categories: {:?}", forecasts.categories.keys());
    for (date, total) in &forecasts.baseline {
        println!("{date}  baseline {total:>8.2}");
    }

    let scenario = Scenario {
        skip_expense: Some(SkipExpense {
            active: true,
            category: "coffee".to_string(),
        }),
        ..Scenario::default()
    };
    let outcome = apply_scenario(&forecasts.baseline, &forecasts.categories, &scenario);

    println!("\nWithout coffee:");
    for (date, total) in &outcome.adjusted {
        println!("{date}  adjusted {total:>8.2}");
    }

    Ok(())
}
