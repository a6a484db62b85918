use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod invoice {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum InvoiceStatus {
        Pending,
        Paid,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct InvoiceView {
        pub id: String,
        pub customer_id: String,
        /// Integer cents.
        pub amount_minor: i64,
        pub status: InvoiceStatus,
        /// ISO `YYYY-MM-DD`.
        pub date: NaiveDate,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct InvoiceListResponse {
        pub invoices: Vec<InvoiceView>,
    }

    /// Body returned when a create/update/delete form did not go through.
    ///
    /// `errors` is keyed by form field (`customerId`, `amount`, `status`) and
    /// is only present for validation failures.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ActionState {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub errors: Option<BTreeMap<String, Vec<String>>>,
        pub message: Option<String>,
    }
}

pub mod user {
    use super::*;

    /// Body returned when a sign-in attempt is rejected.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LoginRejected {
        pub message: String,
    }
}
