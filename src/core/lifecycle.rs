//! Order lifecycle: workflow views, gated actions and the status override
//!
//! Three views partition the live part of the workflow and each owns exactly
//! one forward action:
//!
//! | View            | Statuses                          | Action           | Target        |
//! |-----------------|-----------------------------------|------------------|---------------|
//! | Pending         | Pending                           | `place_order`    | Order Placed  |
//! | Ready-eligible  | Order Placed, Sent for Fitting    | `mark_ready`     | Ready         |
//! | Ready           | Ready                             | `mark_delivered` | Delivered     |
//!
//! An action is only legal while the order is shown in its view. The
//! administrative [`Transition::Override`] bypasses the views entirely and can
//! set any status, including moving an order backwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{EntityError, ValidationError};
use crate::core::order::{OrderId, OrderRecord, OrderStatus};

/// A predefined filter over status that drives one workflow screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusView {
    Pending,
    ReadyEligible,
    Ready,
}

impl StatusView {
    pub const ALL: [StatusView; 3] = [
        StatusView::Pending,
        StatusView::ReadyEligible,
        StatusView::Ready,
    ];

    /// Statuses shown in this view
    pub fn statuses(&self) -> &'static [OrderStatus] {
        match self {
            StatusView::Pending => &[OrderStatus::Pending],
            StatusView::ReadyEligible => &[OrderStatus::OrderPlaced, OrderStatus::SentForFitting],
            StatusView::Ready => &[OrderStatus::Ready],
        }
    }

    pub fn contains(&self, status: OrderStatus) -> bool {
        self.statuses().contains(&status)
    }

    /// The single action offered on this view's screen
    pub fn action(&self) -> WorkflowAction {
        match self {
            StatusView::Pending => WorkflowAction::PlaceOrder,
            StatusView::ReadyEligible => WorkflowAction::MarkReady,
            StatusView::Ready => WorkflowAction::MarkDelivered,
        }
    }

    /// URL slug (`pending`, `ready-eligible`, `ready`)
    pub fn slug(&self) -> &'static str {
        match self {
            StatusView::Pending => "pending",
            StatusView::ReadyEligible => "ready-eligible",
            StatusView::Ready => "ready",
        }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            StatusView::Pending => "Pending Orders",
            StatusView::ReadyEligible => "Mark Ready",
            StatusView::Ready => "Ready Orders",
        }
    }

    /// Message shown when the view has nothing in it
    pub fn empty_message(&self) -> &'static str {
        match self {
            StatusView::Pending => "No pending orders.",
            StatusView::ReadyEligible => {
                "No orders in 'Order Placed' or 'Sent for Fitting' status."
            }
            StatusView::Ready => "No orders marked as 'Ready'.",
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for StatusView {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|view| view.slug() == wanted)
            .ok_or_else(|| ValidationError::InvalidRequest {
                message: format!(
                    "unknown view '{}', expected one of: pending, ready-eligible, ready",
                    s
                ),
            })
    }
}

/// One of the three gated forward transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    PlaceOrder,
    MarkReady,
    MarkDelivered,
}

impl WorkflowAction {
    pub const ALL: [WorkflowAction; 3] = [
        WorkflowAction::PlaceOrder,
        WorkflowAction::MarkReady,
        WorkflowAction::MarkDelivered,
    ];

    /// The view an order must be in for this action to apply
    pub fn view(&self) -> StatusView {
        match self {
            WorkflowAction::PlaceOrder => StatusView::Pending,
            WorkflowAction::MarkReady => StatusView::ReadyEligible,
            WorkflowAction::MarkDelivered => StatusView::Ready,
        }
    }

    pub fn target(&self) -> OrderStatus {
        match self {
            WorkflowAction::PlaceOrder => OrderStatus::OrderPlaced,
            WorkflowAction::MarkReady => OrderStatus::Ready,
            WorkflowAction::MarkDelivered => OrderStatus::Delivered,
        }
    }

    pub fn allows(&self, from: OrderStatus) -> bool {
        self.view().contains(from)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            WorkflowAction::PlaceOrder => "place_order",
            WorkflowAction::MarkReady => "mark_ready",
            WorkflowAction::MarkDelivered => "mark_delivered",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowAction::PlaceOrder => "mark as Order Placed",
            WorkflowAction::MarkReady => "mark as Ready",
            WorkflowAction::MarkDelivered => "mark as Delivered",
        }
    }
}

/// Gated actions legal from `status`, in workflow order
///
/// Views are disjoint, so this holds at most one action.
pub fn available_actions(status: OrderStatus) -> Vec<WorkflowAction> {
    WorkflowAction::ALL
        .iter()
        .copied()
        .filter(|action| action.allows(status))
        .collect()
}

/// A requested status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Normal workflow step, gated on the current view
    Workflow(WorkflowAction),
    /// Administrative direct set, no precondition
    Override(OrderStatus),
}

impl Transition {
    pub fn target(&self) -> OrderStatus {
        match self {
            Transition::Workflow(action) => action.target(),
            Transition::Override(status) => *status,
        }
    }

    /// Apply to `record`, returning the status it had before
    ///
    /// On a rejected workflow action the record is left untouched.
    pub fn apply(&self, id: OrderId, record: &mut OrderRecord) -> Result<OrderStatus, EntityError> {
        let from = record.status;
        if let Transition::Workflow(action) = self {
            if !action.allows(from) {
                return Err(EntityError::InvalidTransition {
                    id,
                    from,
                    action: *action,
                });
            }
        }
        record.status = self.target();
        Ok(from)
    }
}

impl From<WorkflowAction> for Transition {
    fn from(action: WorkflowAction) -> Self {
        Transition::Workflow(action)
    }
}
