//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or sent money out.
///
/// The wire and database representation is the lowercase name, e.g. "income".
/// Parsing ignores case and surrounding whitespace, so "INCOME" is accepted
/// too. Any other value is rejected with [Error::InvalidTransactionType].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TransactionType {
    /// Money earned, counted positively in the balance.
    Income,
    /// Money spent, counted negatively in the balance.
    Expense,
}

impl TransactionType {
    /// The canonical lowercase name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("income") {
            Ok(TransactionType::Income)
        } else if trimmed.eq_ignore_ascii_case("expense") {
            Ok(TransactionType::Expense)
        } else {
            Err(Error::InvalidTransactionType(s.to_owned()))
        }
    }
}

impl TryFrom<String> for TransactionType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// A `Transaction` always has an ID, it only exists once a store has saved it.
/// To create a new `Transaction`, use [Transaction::build] and hand the
/// builder to a [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store.
    pub id: TransactionId,
    /// A short label for the transaction, e.g. "Salary".
    pub title: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// The amount is stored as given. Whether it adds to or subtracts from
    /// the balance is decided by `transaction_type`, not by its sign.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-text classification, e.g. "Housing".
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        amount: f64,
        transaction_type: TransactionType,
        date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            amount,
            transaction_type,
            category: String::new(),
            date,
        }
    }

    /// The amount as it contributes to the balance: positive for income and
    /// negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Replace every field except the ID with the values from `builder`.
    pub fn overwrite_with(&mut self, builder: TransactionBuilder) {
        self.title = builder.title;
        self.amount = builder.amount;
        self.transaction_type = builder.transaction_type;
        self.category = builder.category;
        self.date = builder.date;
    }
}

/// The fields of a transaction that has not been saved yet.
///
/// This is also the JSON body accepted when creating or updating a
/// transaction. An `id` in the body is ignored, IDs are only ever assigned by
/// the store.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::transaction::{Transaction, TransactionType};
///
/// let builder = Transaction::build(
///         "Rent",
///         400.0,
///         TransactionType::Expense,
///         date!(2024-01-02),
///     )
///     .category("Housing");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBuilder {
    /// A short label for the transaction.
    pub title: String,

    /// The amount of money spent or earned.
    ///
    /// Both positive and negative amounts are accepted. The sign used for the
    /// balance comes from `transaction_type`.
    pub amount: f64,

    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// A free-text classification. Defaults to an empty string when omitted.
    #[serde(default)]
    pub category: String,

    /// The calendar date of the transaction, `YYYY-MM-DD` in JSON.
    pub date: Date,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Attach `id` and produce the saved form of the transaction.
    pub fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            title: self.title,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            date: self.date,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod transaction_type_tests {
    use crate::{Error, transaction::TransactionType};

    #[test]
    fn parses_case_insensitively() {
        for text in ["income", "INCOME", "Income", " income "] {
            assert_eq!(text.parse::<TransactionType>(), Ok(TransactionType::Income));
        }

        for text in ["expense", "EXPENSE", "eXpEnSe"] {
            assert_eq!(text.parse::<TransactionType>(), Ok(TransactionType::Expense));
        }
    }

    #[test]
    fn rejects_unknown_type() {
        assert_eq!(
            "refund".parse::<TransactionType>(),
            Err(Error::InvalidTransactionType("refund".to_owned()))
        );
        assert_eq!(
            "".parse::<TransactionType>(),
            Err(Error::InvalidTransactionType("".to_owned()))
        );
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();

        assert_eq!(json, "\"income\"");
    }

    #[test]
    fn deserializes_uppercase() {
        let got: TransactionType = serde_json::from_str("\"EXPENSE\"").unwrap();

        assert_eq!(got, TransactionType::Expense);
    }

    #[test]
    fn deserialize_fails_on_unknown_type() {
        let got = serde_json::from_str::<TransactionType>("\"transfer\"");

        assert!(got.is_err());
    }
}

#[cfg(test)]
mod transaction_tests {
    use serde_json::json;
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionBuilder, TransactionType};

    #[test]
    fn income_counts_positively() {
        let transaction =
            Transaction::build("Salary", 1000.0, TransactionType::Income, date!(2024 - 01 - 01))
                .finalise(1);

        assert_eq!(transaction.signed_amount(), 1000.0);
    }

    #[test]
    fn expense_counts_negatively() {
        let transaction =
            Transaction::build("Rent", 400.0, TransactionType::Expense, date!(2024 - 01 - 02))
                .finalise(1);

        assert_eq!(transaction.signed_amount(), -400.0);
    }

    #[test]
    fn sign_comes_from_type_not_amount() {
        let refund =
            Transaction::build("Refund", -25.0, TransactionType::Expense, date!(2024 - 01 - 03))
                .finalise(1);

        assert_eq!(refund.signed_amount(), 25.0);
    }

    #[test]
    fn overwrite_keeps_id() {
        let mut transaction =
            Transaction::build("Rent", 400.0, TransactionType::Expense, date!(2024 - 01 - 02))
                .category("Housing")
                .finalise(7);

        transaction.overwrite_with(
            Transaction::build("Rent", 500.0, TransactionType::Expense, date!(2024 - 02 - 02))
                .category("Home"),
        );

        assert_eq!(transaction.id, 7);
        assert_eq!(transaction.amount, 500.0);
        assert_eq!(transaction.category, "Home");
        assert_eq!(transaction.date, date!(2024 - 02 - 02));
    }

    #[test]
    fn builder_parses_from_json() {
        let body = json!({
            "title": "Salary",
            "amount": 1000,
            "type": "INCOME",
            "category": "Job",
            "date": "2024-01-01",
        });

        let builder: TransactionBuilder = serde_json::from_value(body).unwrap();

        assert_eq!(
            builder,
            Transaction::build("Salary", 1000.0, TransactionType::Income, date!(2024 - 01 - 01))
                .category("Job")
        );
    }

    #[test]
    fn builder_ignores_id_in_json() {
        let body = json!({
            "id": 99,
            "title": "Salary",
            "amount": 1000.0,
            "type": "income",
            "date": "2024-01-01",
        });

        let builder: TransactionBuilder = serde_json::from_value(body).unwrap();

        assert_eq!(builder.category, "");
        assert_eq!(builder.title, "Salary");
    }

    #[test]
    fn transaction_serializes_type_field() {
        let transaction =
            Transaction::build("Salary", 1000.0, TransactionType::Income, date!(2024 - 01 - 01))
                .category("Job")
                .finalise(1);

        let value = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "Salary",
                "amount": 1000.0,
                "type": "income",
                "category": "Job",
                "date": "2024-01-01",
            })
        );
    }
}
