//! Typed error handling for order-desk
//!
//! Every core operation returns an [`OrderError`] so the presentation layer
//! can render a specific message instead of a generic failure.
//!
//! # Error Categories
//!
//! - [`EntityError`]: the referenced order is missing, or a workflow action was
//!   attempted from the wrong status
//! - [`ValidationError`]: creation input or request parameters are unusable
//! - [`StorageError`]: the order table could not be read or written
//!
//! [`ConfigError`] stands apart: configuration is loaded before any service
//! exists, so it is reported at startup rather than to a request.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.mark_ready(id).await {
//!     Ok(order) => println!("{} is ready", order.name),
//!     Err(OrderError::Entity(EntityError::NotFound { id })) => {
//!         println!("Order {} no longer exists, refresh the view", id);
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::core::lifecycle::WorkflowAction;
use crate::core::order::{OrderId, OrderStatus};

/// The main error type for order-desk
#[derive(Debug)]
pub enum OrderError {
    /// Order lookup or workflow errors
    Entity(EntityError),

    /// Input validation errors
    Validation(ValidationError),

    /// Order table read/write errors
    Storage(StorageError),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::Entity(e) => write!(f, "{}", e),
            OrderError::Validation(e) => write!(f, "{}", e),
            OrderError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OrderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderError::Entity(e) => Some(e),
            OrderError::Validation(e) => Some(e),
            OrderError::Storage(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl OrderError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderError::Entity(e) => e.status_code(),
            OrderError::Validation(e) => e.status_code(),
            OrderError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::Entity(e) => e.error_code(),
            OrderError::Validation(e) => e.error_code(),
            OrderError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            OrderError::Entity(EntityError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            OrderError::Entity(EntityError::InvalidTransition { id, from, action }) => {
                Some(serde_json::json!({
                    "id": id,
                    "current_status": from,
                    "action": action.slug(),
                    "allowed_from": action.view().statuses(),
                }))
            }
            OrderError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }

    /// Whether the caller should re-query before trying again
    pub fn is_stale_view(&self) -> bool {
        matches!(
            self,
            OrderError::Entity(EntityError::NotFound { .. })
                | OrderError::Entity(EntityError::InvalidTransition { .. })
        )
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors about a specific order
#[derive(Debug, Error)]
pub enum EntityError {
    /// The id does not refer to any row of the current table
    #[error("Order {id} not found")]
    NotFound { id: OrderId },

    /// A workflow action was attempted from a status outside its view
    #[error("Cannot {} order {id}: current status is '{from}'", .action.label())]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        action: WorkflowAction,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::InvalidTransition { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ORDER_NOT_FOUND",
            EntityError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

impl From<EntityError> for OrderError {
    fn from(err: EntityError) -> Self {
        OrderError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed validation
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Value is not one of the five workflow statuses
    #[error("Invalid status '{value}', expected one of: {}", OrderStatus::labels().join(", "))]
    InvalidStatus { value: String },

    /// Value is not a `YYYY-MM-DD` date
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Value is not an order id
    #[error("Invalid order id '{value}'")]
    InvalidId { value: String },

    /// Request body or parameters could not be interpreted
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidStatus { .. } => "INVALID_STATUS",
            ValidationError::InvalidDate { .. } => "INVALID_DATE",
            ValidationError::InvalidId { .. } => "INVALID_ORDER_ID",
            ValidationError::InvalidRequest { .. } => "INVALID_REQUEST",
        }
    }

    /// Names of the fields at fault, if this is a field error
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        OrderError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to reading and writing the order table
#[derive(Debug, Error)]
pub enum StorageError {
    /// The table could not be read
    #[error("Failed to read order table '{path}': {message}")]
    Read { path: String, message: String },

    /// The table could not be written
    #[error("Failed to write order table '{path}': {message}")]
    Write { path: String, message: String },

    /// The header row is not the six-column schema
    #[error("Order table '{path}' has unexpected header: {found}")]
    BadHeader { path: String, found: String },

    /// A data row could not be decoded
    #[error("Order table '{path}' row {row} is malformed: {message}")]
    MalformedRow {
        path: String,
        row: usize,
        message: String,
    },

    /// The in-process table lock was poisoned
    #[error("Order table lock poisoned: {message}")]
    Poisoned { message: String },
}

impl From<StorageError> for OrderError {
    fn from(err: StorageError) -> Self {
        OrderError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default()
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for order-desk operations
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Tests
// =============================================================================
