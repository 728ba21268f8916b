// Payment endpoints
//
// The richest resource: filtered/sorted listing, lifecycle transitions
// (mark paid), aggregate stats, and bulk generation for a whole class.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classes::StudentRef;
use crate::client::{ApiClient, MessageResponse};
use crate::error::Error;

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl PaymentStatus {
    /// Wire name, also used for query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Sort key accepted by the payments listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentSortBy {
    #[default]
    DueDate,
    PaidDate,
    Amount,
    CreatedAt,
}

impl PaymentSortBy {
    fn as_query_value(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::PaidDate => "paidDate",
            Self::Amount => "amount",
            Self::CreatedAt => "createdAt",
        }
    }
}

/// Class summary embedded in payment responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentClassRef {
    pub id: String,
    pub name: String,
}

/// A payment owed by (or settled for) a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub class_id: Option<String>,
    pub amount: f64,
    pub description: String,
    pub status: PaymentStatus,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub paid_date: Option<DateTime<Utc>>,
    pub reference_month: u8,
    pub reference_year: u16,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub student: StudentRef,
    #[serde(default)]
    pub class: Option<PaymentClassRef>,
}

/// Paginated `api/payments` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsPage {
    pub payments: Vec<Payment>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Aggregate payment statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total_payments: u64,
    pub paid_payments: u64,
    pub pending_payments: u64,
    pub overdue_payments: u64,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
    pub overdue_amount: f64,
}

/// Filters and sorting for listing payments.
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    pub status: Option<PaymentStatus>,
    pub student_id: Option<String>,
    pub class_id: Option<String>,
    pub reference_month: Option<u8>,
    pub reference_year: Option<u16>,
    pub sort_by: Option<PaymentSortBy>,
    pub sort_descending: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaymentQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_owned()));
        }
        if let Some(ref student_id) = self.student_id {
            params.push(("studentId", student_id.clone()));
        }
        if let Some(ref class_id) = self.class_id {
            params.push(("classId", class_id.clone()));
        }
        if let Some(month) = self.reference_month {
            params.push(("referenceMonth", month.to_string()));
        }
        if let Some(year) = self.reference_year {
            params.push(("referenceYear", year.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            params.push(("sortBy", sort_by.as_query_value().to_owned()));
            params.push((
                "sortOrder",
                if self.sort_descending { "desc" } else { "asc" }.to_owned(),
            ));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Payload for creating a payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentInput {
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    pub amount: f64,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub reference_month: u8,
    pub reference_year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial payload for updating a payment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for marking a payment as paid.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for generating one payment per active student of a class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreatePaymentsInput {
    pub class_id: String,
    pub amount: f64,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub reference_month: u8,
    pub reference_year: u16,
}

/// Result of a bulk payment generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreatePaymentsResult {
    pub message: String,
    pub payments_created: u32,
    pub students_affected: Vec<StudentRef>,
}

impl ApiClient {
    /// List payments with filters and sorting.
    pub async fn list_payments(&self, query: &PaymentQuery) -> Result<PaymentsPage, Error> {
        self.get("payments", &query.to_params()).await
    }

    /// Fetch one payment.
    pub async fn get_payment(&self, id: &str) -> Result<Payment, Error> {
        self.get(&format!("payments/{id}"), &[]).await
    }

    /// Create a payment.
    pub async fn create_payment(&self, input: &CreatePaymentInput) -> Result<Payment, Error> {
        self.post("payments", input).await
    }

    /// Update a payment.
    pub async fn update_payment(
        &self,
        id: &str,
        input: &UpdatePaymentInput,
    ) -> Result<Payment, Error> {
        self.put(&format!("payments/{id}"), input).await
    }

    /// Delete a payment.
    pub async fn delete_payment(&self, id: &str) -> Result<MessageResponse, Error> {
        self.delete(&format!("payments/{id}")).await
    }

    /// Transition a payment to PAID.
    pub async fn mark_payment_paid(
        &self,
        id: &str,
        input: &MarkPaidInput,
    ) -> Result<Payment, Error> {
        self.patch(&format!("payments/{id}/pay"), input).await
    }

    /// Aggregate statistics across all payments.
    pub async fn payment_stats(&self) -> Result<PaymentStats, Error> {
        self.get("payments/stats", &[]).await
    }

    /// Generate one payment per active student of a class.
    pub async fn create_bulk_payments(
        &self,
        input: &BulkCreatePaymentsInput,
    ) -> Result<BulkCreatePaymentsResult, Error> {
        self.post("payments/bulk", input).await
    }

    /// Payments belonging to a single student.
    pub async fn student_payments(
        &self,
        student_id: &str,
        query: &PaymentQuery,
    ) -> Result<PaymentsPage, Error> {
        self.get(&format!("payments/student/{student_id}"), &query.to_params())
            .await
    }
}
