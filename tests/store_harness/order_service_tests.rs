//! Macro-generated behaviour suite for `OrderService` over any `TableStore`.
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use order_desk::storage::InMemoryTableStore;
//!
//! order_service_tests!(InMemoryTableStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Creation
//! - `test_create_then_find_by_mobile`: one Pending match with submitted values
//! - `test_create_rejects_missing_fields`: every blank field is reported
//! - `test_create_rejects_unknown_salesperson`
//!
//! ## Queries
//! - `test_find_by_name_is_case_insensitive`
//! - `test_find_by_date_without_match_is_empty`
//! - `test_views_partition_live_orders`
//!
//! ## Lifecycle
//! - `test_full_walkthrough`: Pending through Delivered, visible by mobile throughout
//! - `test_gated_actions_reject_wrong_status`: every action from every status
//! - `test_set_status_overrides_any_status`: every pair of statuses
//! - `test_unknown_id_is_not_found`
//!
//! ## Concurrency
//! - `test_concurrent_creates_are_serialised`

/// Generate the `OrderService` behaviour suite over a store.
///
/// `$factory` must yield an empty store implementing `TableStore + 'static`.
#[macro_export]
macro_rules! order_service_tests {
    ($factory:expr) => {
        mod order_service_contract_tests {
            use super::*;
            use order_desk::core::error::{EntityError, OrderError, ValidationError};
            use order_desk::core::lifecycle::{StatusView, WorkflowAction};
            use order_desk::core::order::{NewOrder, OrderId, OrderStatus, Roster};
            use order_desk::core::service::OrderService;
            use std::sync::Arc;

            fn service() -> OrderService {
                OrderService::new(Arc::new($factory), Roster::default())
            }

            // ==================================================================
            // Creation
            // ==================================================================

            #[tokio::test]
            async fn test_create_then_find_by_mobile() {
                let service = service();
                let created = service.create_order(asha()).await.unwrap();
                assert_eq!(created.order.status, OrderStatus::Pending);

                let found = service.find_by_mobile("9990001111").await.unwrap();
                assert_eq!(found.len(), 1);

                let entry = &found.entries()[0];
                assert_eq!(entry.id, created.id);
                assert_eq!(entry.order.name, "Asha Rao");
                assert_eq!(entry.order.details, "Progressive lenses");
                assert_eq!(entry.order.salesperson, "Tanya");
                assert_eq!(entry.order.date, date("2024-05-01"));
                assert_eq!(entry.order.status, OrderStatus::Pending);
            }

            #[tokio::test]
            async fn test_create_trims_values() {
                let service = service();
                let created = service
                    .create_order(new_order("  123  ", "  Padded Name ", "2024-05-01"))
                    .await
                    .unwrap();
                assert_eq!(created.order.mobile, "123");
                assert_eq!(created.order.name, "Padded Name");
            }

            #[tokio::test]
            async fn test_create_rejects_missing_fields() {
                let service = service();
                let err = service
                    .create_order(NewOrder::new(" ", "", "details", "Tanya"))
                    .await
                    .unwrap_err();

                match err {
                    OrderError::Validation(e) => {
                        let fields = e.fields();
                        assert!(fields.contains(&"mobile"));
                        assert!(fields.contains(&"name"));
                        assert!(!fields.contains(&"details"));
                    }
                    other => panic!("expected validation error, got {other:?}"),
                }
                assert!(service.list_view(StatusView::Pending).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_create_rejects_unknown_salesperson() {
                let service = service();
                let err = service
                    .create_order(NewOrder::new("1", "A", "B", "Mallory"))
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    OrderError::Validation(ValidationError::FieldErrors(_))
                ));
            }

            #[tokio::test]
            async fn test_create_with_initial_status() {
                let service = service();
                let created = service
                    .create_order(asha().with_status(OrderStatus::SentForFitting))
                    .await
                    .unwrap();
                assert_eq!(created.order.status, OrderStatus::SentForFitting);
                assert_eq!(created.actions, vec![WorkflowAction::MarkReady]);
            }

            // ==================================================================
            // Queries
            // ==================================================================

            #[tokio::test]
            async fn test_find_by_name_is_case_insensitive() {
                let service = service();
                service.create_order(asha()).await.unwrap();

                assert_eq!(service.find_by_name("asha").await.unwrap().len(), 1);
                assert_eq!(service.find_by_name("RAO").await.unwrap().len(), 1);
                assert!(service.find_by_name("ravi").await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_by_date_without_match_is_empty() {
                let service = service();
                service.create_order(asha()).await.unwrap();

                let result = service.find_by_date(date("2024-05-02")).await.unwrap();
                assert!(result.is_empty());
                assert_eq!(
                    service.find_by_date(date("2024-05-01")).await.unwrap().len(),
                    1
                );
            }

            #[tokio::test]
            async fn test_views_partition_live_orders() {
                let service = service();
                let a = service.create_order(new_order("1", "A", "2024-05-01")).await.unwrap();
                let b = service.create_order(new_order("2", "B", "2024-05-01")).await.unwrap();
                let c = service.create_order(new_order("3", "C", "2024-05-01")).await.unwrap();
                let d = service.create_order(new_order("4", "D", "2024-05-01")).await.unwrap();

                service.mark_order_placed(b.id).await.unwrap();
                service.set_status(c.id, OrderStatus::SentForFitting).await.unwrap();
                service.set_status(d.id, OrderStatus::Ready).await.unwrap();

                let pending = service.list_view(StatusView::Pending).await.unwrap();
                let eligible = service.list_view(StatusView::ReadyEligible).await.unwrap();
                let ready = service.list_view(StatusView::Ready).await.unwrap();

                assert_eq!(pending.ids(), vec![a.id]);
                assert_eq!(eligible.ids(), vec![b.id, c.id]);
                assert_eq!(ready.ids(), vec![d.id]);

                let by_set = service
                    .list_by_status_set(&[OrderStatus::Pending, OrderStatus::Ready])
                    .await
                    .unwrap();
                assert_eq!(by_set.ids(), vec![a.id, d.id]);

                let summary = service.view_summary().await.unwrap();
                let counts: Vec<usize> = summary.iter().map(|v| v.count).collect();
                assert_eq!(counts, vec![1, 2, 1]);
            }

            // ==================================================================
            // Lifecycle
            // ==================================================================

            #[tokio::test]
            async fn test_full_walkthrough() {
                let service = service();
                let id = service.create_order(asha()).await.unwrap().id;

                let steps = [
                    (WorkflowAction::PlaceOrder, OrderStatus::OrderPlaced),
                    (WorkflowAction::MarkReady, OrderStatus::Ready),
                    (WorkflowAction::MarkDelivered, OrderStatus::Delivered),
                ];

                for (action, expected) in steps {
                    let updated = match action {
                        WorkflowAction::PlaceOrder => service.mark_order_placed(id).await,
                        WorkflowAction::MarkReady => service.mark_ready(id).await,
                        WorkflowAction::MarkDelivered => service.mark_delivered(id).await,
                    }
                    .unwrap();
                    assert_eq!(updated.status, expected);

                    let found = service.find_by_mobile("999").await.unwrap();
                    assert_eq!(found.ids(), vec![id]);
                    assert_eq!(found.entries()[0].order.status, expected);
                }

                assert!(service.get(id).await.unwrap().actions.is_empty());
            }

            #[tokio::test]
            async fn test_gated_actions_reject_wrong_status() {
                let service = service();
                let id = service.create_order(asha()).await.unwrap().id;

                for from in OrderStatus::ALL {
                    for action in WorkflowAction::ALL {
                        service.set_status(id, from).await.unwrap();
                        let result = service.apply_action(id, action).await;

                        if action.allows(from) {
                            assert_eq!(result.unwrap().status, action.target());
                        } else {
                            let err = result.unwrap_err();
                            assert!(
                                matches!(
                                    err,
                                    OrderError::Entity(EntityError::InvalidTransition { .. })
                                ),
                                "{action:?} from {from} should be rejected"
                            );
                            assert_eq!(service.get(id).await.unwrap().order.status, from);
                        }
                    }
                }
            }

            #[tokio::test]
            async fn test_set_status_overrides_any_status() {
                let service = service();
                let id = service.create_order(asha()).await.unwrap().id;

                for from in OrderStatus::ALL {
                    for to in OrderStatus::ALL {
                        service.set_status(id, from).await.unwrap();
                        service.set_status(id, to).await.unwrap();
                        assert_eq!(service.get(id).await.unwrap().order.status, to);
                    }
                }
            }

            #[tokio::test]
            async fn test_transitions_leave_other_orders_alone() {
                let service = service();
                let first = service.create_order(asha()).await.unwrap();
                let second = service
                    .create_order(new_order("8880002222", "Ravi", "2024-05-02"))
                    .await
                    .unwrap();

                service.mark_order_placed(second.id).await.unwrap();

                assert_eq!(service.get(first.id).await.unwrap().order, first.order);
            }

            #[tokio::test]
            async fn test_unknown_id_is_not_found() {
                let service = service();
                service.create_order(asha()).await.unwrap();

                let err = service.mark_ready(OrderId(7)).await.unwrap_err();
                assert!(matches!(
                    err,
                    OrderError::Entity(EntityError::NotFound { id: OrderId(7) })
                ));
                assert!(service.set_status(OrderId(7), OrderStatus::Ready).await.is_err());
                assert!(service.get(OrderId(7)).await.is_err());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates_are_serialised() {
                let service = Arc::new(service());

                let mut handles = Vec::new();
                for i in 0..16 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        let mobile = format!("70000{:05}", i);
                        service
                            .create_order(new_order(&mobile, "Walk-in", "2024-05-01"))
                            .await
                            .unwrap()
                            .id
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap());
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 16);

                assert_eq!(service.find_by_name("walk-in").await.unwrap().len(), 16);
            }
        }
    };
}
