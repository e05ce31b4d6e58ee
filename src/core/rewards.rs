use crate::core::dates::{month_year_label, parse_date_str};
use crate::domain::model::{MonthlyReward, RewardSummary, TotalReward, Transaction};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Reward points for a purchase amount: 2 points per dollar above $100 plus
/// 1 point per dollar between $50 and $100, floored to a whole point.
/// `NaN` and non-positive amounts earn nothing.
pub fn calculate_points(amount: f64) -> i64 {
    if amount.is_nan() || amount <= 0.0 {
        return 0;
    }
    let points = if amount > 100.0 {
        (amount - 100.0) * 2.0 + 50.0
    } else if amount > 50.0 {
        amount - 50.0
    } else {
        0.0
    };
    points.floor() as i64
}

/// Groups transactions into monthly-per-customer and lifetime-per-customer
/// reward rows in a single pass. Rows come out in first-occurrence order of
/// their key; ordering and filtering are the caller's concern.
pub fn aggregate_rewards(transactions: &[Transaction]) -> RewardSummary {
    let mut monthly: Vec<MonthlyReward> = Vec::new();
    let mut monthly_dates: Vec<Option<NaiveDate>> = Vec::new();
    let mut monthly_index: HashMap<(String, String), usize> = HashMap::new();

    let mut totals: Vec<TotalReward> = Vec::new();
    let mut total_dates: Vec<Option<NaiveDate>> = Vec::new();
    let mut total_index: HashMap<String, usize> = HashMap::new();

    for txn in transactions {
        let parsed = parse_date_str(&txn.date);
        // An unparseable date still groups; the raw string doubles as the label.
        let month_year = parsed
            .map(month_year_label)
            .unwrap_or_else(|| txn.date.clone());
        let points = calculate_points(txn.amount);

        let key = (txn.customer_id.clone(), month_year.clone());
        match monthly_index.get(&key) {
            Some(&ix) => {
                monthly[ix].points += points;
                // Keep the earliest contributing date; ties keep the first seen.
                if let Some(candidate) = parsed {
                    if monthly_dates[ix].map_or(true, |held| candidate < held) {
                        monthly_dates[ix] = Some(candidate);
                        monthly[ix].original_date = txn.date.clone();
                    }
                }
            }
            None => {
                monthly_index.insert(key, monthly.len());
                monthly_dates.push(parsed);
                monthly.push(MonthlyReward {
                    customer_id: txn.customer_id.clone(),
                    customer_name: txn.customer_name.clone(),
                    month_year,
                    points,
                    original_date: txn.date.clone(),
                });
            }
        }

        match total_index.get(&txn.customer_id) {
            Some(&ix) => {
                totals[ix].points += points;
                // Keep the latest contributing date; ties keep the first seen.
                if let Some(candidate) = parsed {
                    if total_dates[ix].map_or(true, |held| candidate > held) {
                        total_dates[ix] = Some(candidate);
                        totals[ix].original_date = txn.date.clone();
                    }
                }
            }
            None => {
                total_index.insert(txn.customer_id.clone(), totals.len());
                total_dates.push(parsed);
                totals.push(TotalReward {
                    customer_id: txn.customer_id.clone(),
                    customer_name: txn.customer_name.clone(),
                    points,
                    original_date: txn.date.clone(),
                });
            }
        }
    }

    RewardSummary { monthly, totals }
}
