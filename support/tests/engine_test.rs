use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use deskrelay_embeddings::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use deskrelay_orders::{Order, OrderStatus, Product, SimulatedOrders};
use deskrelay_support::template::DETAILS_PLACEHOLDER;
use deskrelay_support::{Confidence, SupportCase, SupportEngine, SupportError};

/// Deterministic provider for tests: one axis per topic keyword, plus a
/// catch-all axis so no text ever embeds to the zero vector.
struct KeywordProvider;

#[async_trait]
impl EmbeddingProvider for KeywordProvider {
    fn name(&self) -> &str {
        "keyword"
    }

    fn default_model(&self) -> &str {
        "keyword-test"
    }

    async fn embed(
        &self,
        request: EmbeddingRequest,
    ) -> deskrelay_embeddings::Result<EmbeddingResponse> {
        let text = request.text.to_lowercase();
        let mut embedding = vec![
            f32::from(text.contains("pedido") || text.contains("orden")),
            f32::from(text.contains("factura")),
            f32::from(text.contains("reembolso")),
            0.0,
        ];
        if embedding.iter().all(|&v| v == 0.0) {
            embedding[3] = 1.0;
        }
        Ok(EmbeddingResponse {
            embedding,
            model: "keyword-test".to_string(),
            dimension: 4,
        })
    }
}

fn case(question: &str, answer: &str, category: &str) -> SupportCase {
    SupportCase {
        question: question.to_string(),
        answer: answer.to_string(),
        category: category.to_string(),
        priority: 1,
    }
}

fn order(id: &str, email: &str, status: OrderStatus) -> Order {
    let mut order = Order {
        order_id: id.to_string(),
        customer_email: email.to_string(),
        status,
        order_date: Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap(),
        products: vec![Product {
            name: "Laptop Pro".to_string(),
            price: 1299.99,
        }],
        total: 1299.99,
        payment_method: "Visa".to_string(),
        shipping_address: "Calle 1, Ciudad".to_string(),
        tracking_number: None,
        shipping_date: None,
        delivery_date: None,
        decline_reason: None,
        decline_date: None,
        refund_date: None,
        refund_amount: None,
    };
    if status.has_tracking() {
        order.tracking_number = Some(format!("TRACK-{id}"));
        order.shipping_date = Some(Utc.with_ymd_and_hms(2024, 2, 22, 12, 0, 0).unwrap());
        if status == OrderStatus::Delivered {
            order.delivery_date = Some(Utc.with_ymd_and_hms(2024, 2, 25, 12, 0, 0).unwrap());
        }
    }
    order
}

fn engine_with_orders(orders: Vec<Order>) -> SupportEngine {
    SupportEngine::new(
        Arc::new(KeywordProvider),
        Arc::new(SimulatedOrders::from_orders(orders)),
    )
}

async fn trained_engine(orders: Vec<Order>) -> SupportEngine {
    let engine = engine_with_orders(orders);
    engine
        .train(
            vec![
                case(
                    "¿Dónde está mi pedido?",
                    &format!("He encontrado su orden. {DETAILS_PLACEHOLDER}"),
                    "order_status_tracking",
                ),
                case(
                    "Necesito una copia de mi factura",
                    "Puede descargar su factura desde su cuenta.",
                    "solicitud_factura",
                ),
                case(
                    "Quiero solicitar un reembolso",
                    "Los reembolsos tardan de 5 a 7 días hábiles.",
                    "reembolsos",
                ),
            ],
            None,
        )
        .await
        .unwrap();
    engine
}

#[tokio::test]
async fn exact_question_ranks_first_with_unit_similarity() {
    let engine = trained_engine(vec![]).await;

    let outcome = engine
        .find_similar("Necesito una copia de mi factura", None, None)
        .await
        .unwrap();

    assert_eq!(outcome.results[0].case.category, "solicitud_factura");
    assert!((outcome.results[0].similarity - 1.0).abs() < 1e-6);
    assert_eq!(outcome.results[0].confidence, Confidence::High);
    assert_eq!(outcome.confidence, Confidence::High);
    assert_eq!(outcome.total_cases, 3);
    assert_eq!(outcome.threshold, 0.75);
}

#[tokio::test]
async fn fewer_cases_than_top_k_returns_all() {
    let engine = engine_with_orders(vec![]);
    engine
        .train(vec![case("hola", "Hola, ¿en qué puedo ayudarte?", "saludo")], None)
        .await
        .unwrap();

    let outcome = engine.find_similar("hola", Some(5), None).await.unwrap();
    assert_eq!(outcome.results.len(), 1);
}

#[tokio::test]
async fn requested_top_k_is_capped() {
    let engine = trained_engine(vec![]).await;
    let outcome = engine
        .find_similar("mi pedido, mi factura y mi reembolso", Some(50), None)
        .await
        .unwrap();
    // max_top_k is 5, and only 3 cases exist
    assert_eq!(outcome.results.len(), 3);
}

#[tokio::test]
async fn below_threshold_query_still_returns_results() {
    let engine = trained_engine(vec![]).await;

    let outcome = engine
        .find_similar("no entiendo nada de esto", None, None)
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 3);
    assert!(outcome.results.iter().all(|r| r.similarity < 0.75));
    assert_eq!(outcome.confidence, Confidence::Low);
}

#[tokio::test]
async fn empty_index_query_fails() {
    let engine = engine_with_orders(vec![]);
    let err = engine.find_similar("hola", None, None).await.unwrap_err();
    assert!(matches!(err, SupportError::EmptyIndex));
}

#[tokio::test]
async fn mismatched_training_payload_fails() {
    let engine = engine_with_orders(vec![]);
    let err = engine
        .train_with_embeddings(vec![case("a", "b", "c")], vec![])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SupportError::CaseCountMismatch {
            cases: 1,
            embeddings: 0
        }
    ));
}

#[tokio::test]
async fn matched_order_augments_the_embedded_query() {
    let shipped = order("ORD000002", "usuario2@ejemplo.com", OrderStatus::Shipped);
    let engine = trained_engine(vec![shipped]).await;

    let outcome = engine
        .find_similar("¿Dónde está mi pedido ORD000002?", None, None)
        .await
        .unwrap();

    assert!(outcome.processed_query.contains("Orden: ORD000002 Estado: Enviado"));
    assert_eq!(
        outcome.order.as_ref().map(|o| o.order_id.as_str()),
        Some("ORD000002")
    );
}

#[tokio::test]
async fn shipped_order_enrichment_fills_tracking_without_delivery() {
    let shipped = order("ORD000002", "usuario2@ejemplo.com", OrderStatus::Shipped);
    let engine = trained_engine(vec![shipped]).await;

    let outcome = engine
        .find_similar("¿Dónde está mi pedido ORD000002?", None, None)
        .await
        .unwrap();

    let answer = &outcome.results[0].case.answer;
    assert!(!answer.contains(DETAILS_PLACEHOLDER));
    assert!(answer.contains("Número de seguimiento: TRACK-ORD000002"));
    assert!(!answer.contains("Fecha de entrega"));
}

#[tokio::test]
async fn conversational_answer_without_placeholder_stays_unchanged() {
    let shipped = order("ORD000002", "usuario2@ejemplo.com", OrderStatus::Shipped);
    let engine = engine_with_orders(vec![shipped]);
    let answer = "¿Puede compartir su número de orden para revisar el pedido?";
    engine
        .train(
            vec![case("¿Dónde está mi pedido?", answer, "seguimiento_pedido")],
            None,
        )
        .await
        .unwrap();

    let outcome = engine
        .find_similar("¿Dónde está mi pedido ORD000002?", None, None)
        .await
        .unwrap();

    assert_eq!(outcome.results[0].case.answer, answer);
}

#[tokio::test]
async fn enrichment_skips_non_order_categories() {
    let shipped = order("ORD000002", "usuario2@ejemplo.com", OrderStatus::Shipped);
    let engine = trained_engine(vec![shipped]).await;

    let outcome = engine
        .find_similar("Mi factura de la orden ORD000002", None, None)
        .await
        .unwrap();

    let invoice = outcome
        .results
        .iter()
        .find(|r| r.case.category == "solicitud_factura")
        .unwrap();
    assert_eq!(invoice.case.answer, "Puede descargar su factura desde su cuenta.");
}

#[tokio::test]
async fn unknown_order_id_is_not_an_error() {
    let engine = trained_engine(vec![]).await;

    let outcome = engine
        .find_similar("¿Dónde está mi pedido ORD999999?", None, None)
        .await
        .unwrap();

    assert!(outcome.order.is_none());
    assert!(outcome.results[0].case.answer.contains(DETAILS_PLACEHOLDER));
}

#[tokio::test]
async fn email_summary_lands_on_top_result_only() {
    let orders = vec![
        order("ORD000001", "usuario@ejemplo.com", OrderStatus::Pending),
        order("ORD000002", "usuario@ejemplo.com", OrderStatus::Delivered),
    ];
    let engine = trained_engine(orders).await;

    let outcome = engine
        .find_similar("Estado de mis pedidos, soy usuario@ejemplo.com", Some(3), None)
        .await
        .unwrap();

    let top = &outcome.results[0].case.answer;
    assert!(top.contains("- Order ORD000001: Pendiente"));
    assert!(top.contains("- Order ORD000002: Entregado"));
    for result in &outcome.results[1..] {
        assert!(!result.case.answer.contains("- Order "));
    }
}

#[tokio::test]
async fn order_status_reports_status_and_details() {
    let delivered = order("ORD000003", "usuario3@ejemplo.com", OrderStatus::Delivered);
    let engine = engine_with_orders(vec![delivered]);

    let report = engine.order_status("ORD000003").unwrap();
    assert_eq!(report.status, "Entregado");
    assert!(report.details.delivery_date.is_some());

    assert!(engine.order_status("ORD999999").is_none());
}
