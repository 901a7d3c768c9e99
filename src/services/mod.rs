//! One service per resource type. Every operation is a single dispatcher
//! call against one catalog endpoint.

mod bank_accounts;
mod cards;
mod deposits;
mod idempotency;
mod pay_ins;
mod pay_outs;
mod refunds;
mod transfers;
mod users;
mod wallets;

pub use bank_accounts::BankAccounts;
pub use cards::{CardRegistrations, Cards};
pub use deposits::Deposits;
pub use idempotency::Idempotency;
pub use pay_ins::PayIns;
pub use pay_outs::PayOuts;
pub use refunds::Refunds;
pub use transfers::Transfers;
pub use users::Users;
pub use wallets::Wallets;

use crate::error::{Error, Result};
use crate::http::RequestOptions;
use crate::models::IdempotencyKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Pagination, sorting and filters for list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<(String, SortDirection)>,
    pub filters: Vec<(String, String)>,
}

impl ListOptions {
    pub fn page(page: u32, per_page: u32) -> Self {
        ListOptions {
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        }
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }

    /// Resource-specific filter such as `Status` or `Nature`.
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((name.into(), value.into()));
        self
    }

    /// Appends the paging, sort and filter query parameters to `options`.
    pub fn apply(&self, mut options: RequestOptions) -> RequestOptions {
        if let Some(page) = self.page {
            options = options.query_param("page", page);
        }
        if let Some(per_page) = self.per_page {
            options = options.query_param("per_page", per_page);
        }
        if let Some((field, direction)) = &self.sort {
            let dir = match direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            options = options.query_param("Sort", format!("{}:{}", field, dir));
        }
        for (name, value) in &self.filters {
            options = options.query_param(name.clone(), value);
        }
        options
    }
}

fn write_options(key: Option<&IdempotencyKey>) -> Result<RequestOptions> {
    match key {
        Some(key) => RequestOptions::new().idempotency_key(key),
        None => Ok(RequestOptions::new()),
    }
}

fn require_id<'a>(id: &'a Option<String>, what: &str) -> Result<&'a str> {
    id.as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::InvalidRequest(format!("{} id is required", what)))
}
