//! Transaction store client
//!
//! The store is an external query service; the pipeline only needs records
//! with date, amount and category fields for a user and date range.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spend_oracle::data::Transaction;
use spend_oracle::{OracleError, Result};

/// Query interface over the external transaction store
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Transactions recorded for `user_id` between `start` and `end` inclusive
    async fn transactions_for(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreQuery<'a> {
    user_id: &'a str,
    start_date: String,
    end_date: String,
}

/// Raw record shape on the wire; dates arrive as strings
#[derive(Debug, Deserialize)]
struct StoreRecord {
    date: String,
    amount: f64,
    category: String,
}

/// HTTP JSON client for the transaction store
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    /// Create a client against the given store base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Convert wire records to transactions, dropping rows whose date does
    /// not parse. The store is external; one bad row must not poison the
    /// whole batch.
    fn parse_records(records: Vec<StoreRecord>) -> Vec<Transaction> {
        records
            .into_iter()
            .filter_map(|record| match record.date.parse::<NaiveDate>() {
                Ok(date) => Some(Transaction::new(date, record.amount, record.category)),
                Err(err) => {
                    tracing::warn!(date = %record.date, %err, "dropping record with bad date");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl TransactionStore for HttpStore {
    async fn transactions_for(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let url = format!("{}/transactions/query", self.base_url);
        let query = StoreQuery {
            user_id,
            start_date: start.to_string(),
            end_date: end.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&query)
            .send()
            .await
            .map_err(|err| {
                OracleError::UpstreamUnavailable(format!("transaction store unreachable: {err}"))
            })?
            .error_for_status()
            .map_err(|err| {
                OracleError::UpstreamUnavailable(format!("transaction store error: {err}"))
            })?;

        let records: Vec<StoreRecord> = response.json().await.map_err(|err| {
            OracleError::UpstreamUnavailable(format!("undecodable store response: {err}"))
        })?;

        Ok(Self::parse_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_drops_bad_dates() {
        let records = vec![
            StoreRecord {
                date: "2025-01-05".to_string(),
                amount: 12.0,
                category: "food".to_string(),
            },
            StoreRecord {
                date: "last tuesday".to_string(),
                amount: 5.0,
                category: "food".to_string(),
            },
        ];

        let transactions = HttpStore::parse_records(records);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 12.0);
        assert_eq!(transactions[0].category, "food");
    }

    #[test]
    fn test_store_query_wire_shape() {
        let query = StoreQuery {
            user_id: "u-1",
            start_date: "2025-01-01".to_string(),
            end_date: "2025-03-31".to_string(),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["startDate"], "2025-01-01");
        assert_eq!(json["endDate"], "2025-03-31");
    }
}
