use pinjam_client::api::bookings::{BookingDraft, CompletionDraft};
use pinjam_client::config::ClientOptions;
use pinjam_client::list::{ListFetcher, ListPhase};
use pinjam_client::pagination::PageRequest;
use pinjam_client::session::{Role, Session, SessionStore};
use pinjam_client::Pinjam;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_role(server_uri: &str, role: Role) -> Pinjam {
    let client = Pinjam::with_session_store(
        server_uri,
        ClientOptions::default(),
        Arc::new(SessionStore::in_memory()),
    );
    client.session().login(Session::new(
        "test_token",
        "2",
        "Sari",
        "sari@example.com",
        role,
    ));
    client
}

fn pending_json(id: i64) -> serde_json::Value {
    json!({
        "id_Peminjaman": id,
        "start_Date": "2024-06-01T00:00:00",
        "end_Date": "2024-06-03T00:00:00",
        "deskripsi": "Praktikum",
        "status_Peminjaman": "Pending",
        "nama_Barang": "Proyektor",
        "id_Barang": 4,
        "nama_Peminjam": "Budi",
        "id_Peminjam": 7,
        "peminjam_Email": "budi@example.com"
    })
}

fn history_json(id: i64) -> serde_json::Value {
    json!({
        "id_Peminjaman": id,
        "start_Date": "2024-05-01T00:00:00",
        "end_Date": "2024-05-02T00:00:00",
        "status_Peminjaman": "Returned",
        "nama_Barang": "Kamera",
        "id_Barang": 6,
        "nama_Peminjam": "Budi",
        "id_Peminjam": 7
    })
}

fn envelope(items: Vec<serde_json::Value>, total: u64) -> serde_json::Value {
    json!({
        "items": items,
        "pageNumber": 1,
        "pageSize": 10,
        "totalRecords": total
    })
}

#[tokio::test]
async fn test_approve_triggers_exactly_one_refetch_with_unchanged_request() {
    let mock_server = MockServer::start().await;

    // first load shows one pending request, the refetch after approval none
    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/pending"))
        .and(query_param("pageNumber", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![pending_json(5)], 1)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![], 0)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/bookings/admin/5/approve"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let fetcher = ListFetcher::new(|page: PageRequest| client.bookings().pending(page));

    fetcher.refresh().await;
    assert_eq!(fetcher.items().len(), 1);

    let outcome = fetcher.run_action(|| client.bookings().approve(5)).await;
    assert!(outcome.is_ok());

    assert_eq!(fetcher.items().len(), 0);
    assert_eq!(fetcher.phase(), ListPhase::Loaded);
    assert_eq!(fetcher.request(), PageRequest::default());
    assert!(!fetcher.action_in_flight());
}

#[tokio::test]
async fn test_decline_failure_keeps_items_and_reports_message() {
    let mock_server = MockServer::start().await;

    // exactly one list fetch; a failed action must not refetch
    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![pending_json(5)], 1)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/bookings/admin/5/decline"))
        .and(body_json(json!({ "alasan_Penolakan": "Stok habis" })))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({
                "message": "Request already processed."
            })),
        )
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let fetcher = ListFetcher::new(|page: PageRequest| client.bookings().pending(page));

    fetcher.refresh().await;
    let before = fetcher.items();

    let outcome = fetcher
        .run_action(|| client.bookings().decline(5, "Stok habis"))
        .await;

    assert!(outcome.is_err());
    assert_eq!(fetcher.items().len(), before.len());
    assert_eq!(fetcher.items()[0].id, 5);
    assert_eq!(
        fetcher.error().as_deref(),
        Some("Request already processed.")
    );
    assert!(!fetcher.action_in_flight());
}

#[tokio::test]
async fn test_decline_without_reason_never_reaches_the_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![pending_json(5)], 1)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/bookings/admin/5/decline"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let fetcher = ListFetcher::new(|page: PageRequest| client.bookings().pending(page));
    fetcher.refresh().await;

    let outcome = fetcher.run_action(|| client.bookings().decline(5, " ")).await;

    assert!(outcome.is_err());
    assert_eq!(
        fetcher.error().as_deref(),
        Some("Reason for decline is required.")
    );
    assert_eq!(fetcher.items().len(), 1);
}

#[tokio::test]
async fn test_admin_dashboard_fetches_sources_concurrently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/dashboard-stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "pendingCount": 4, "todaysBookingsCount": 2 }))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/pending"))
        .and(query_param("pageSize", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![pending_json(1), pending_json(2)], 4))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/all"))
        .and(query_param("pageSize", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![history_json(8), history_json(9)], 12))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let started = Instant::now();
    let dashboard = client.bookings().admin_dashboard().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(dashboard.stats.pending_count, 4);
    assert_eq!(dashboard.stats.todays_bookings_count, 2);
    assert_eq!(dashboard.pending.items.len(), 2);
    assert_eq!(dashboard.recent.items.len(), 2);
    // sequential execution could not finish before the summed delays
    assert!(elapsed < Duration::from_millis(300), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_admin_dashboard_with_reversed_delays_gives_the_same_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/dashboard-stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "pendingCount": 1, "todaysBookingsCount": 0 }))
                .set_delay(Duration::from_millis(10)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/pending"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![pending_json(3)], 1))
                .set_delay(Duration::from_millis(120)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![history_json(8)], 1))
                .set_delay(Duration::from_millis(60)),
        )
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let dashboard = client.bookings().admin_dashboard().await.unwrap();

    assert_eq!(dashboard.stats.pending_count, 1);
    assert_eq!(dashboard.pending.items[0].id, 3);
    assert_eq!(dashboard.recent.items[0].id, 8);
}

#[tokio::test]
async fn test_create_booking_posts_wire_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(json!({
            "start_Date": "2024-06-01",
            "end_Date": "2024-06-03",
            "deskripsi": "Praktikum fotografi",
            "id_Barang": 6
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::User);
    let draft = BookingDraft {
        start_date: "2024-06-01".to_string(),
        end_date: "2024-06-03".to_string(),
        description: "Praktikum fotografi".to_string(),
        item_id: 6,
    };
    client.bookings().create(&draft).await.unwrap();
}

#[tokio::test]
async fn test_my_history_parses_fine_and_decline_reason() {
    let mock_server = MockServer::start().await;

    let row = json!({
        "id_Peminjaman": 11,
        "start_Date": "2024-04-01T00:00:00",
        "end_Date": "2024-04-05T00:00:00",
        "status_Peminjaman": "Declined",
        "nama_Barang": "Proyektor",
        "denda": 0,
        "alasan_Penolakan": "Barang sedang diperbaiki"
    });
    Mock::given(method("GET"))
        .and(path("/api/bookings/my-history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![row], 1)))
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::User);
    let page = client
        .bookings()
        .my_history(PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.items[0].id, 11);
    assert_eq!(page.items[0].fine, Some(0));
    assert_eq!(
        page.items[0].decline_reason.as_deref(),
        Some("Barang sedang diperbaiki")
    );
}

#[tokio::test]
async fn test_request_details_for_review() {
    let mock_server = MockServer::start().await;

    let mut body = pending_json(5);
    body["peminjam_No_Telp"] = json!("0812345678");

    Mock::given(method("GET"))
        .and(path("/api/bookings/admin/requests/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let request = client.bookings().request(5).await.unwrap();

    assert_eq!(request.borrower_name, "Budi");
    assert_eq!(request.borrower_phone.as_deref(), Some("0812345678"));
    assert_eq!(request.item_id, 4);
}

#[tokio::test]
async fn test_complete_sends_fine_and_condition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/admin/9/complete"))
        .and(body_json(json!({
            "denda": 15000,
            "status_Kondisi_Pengembalian": "Good"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let draft = CompletionDraft {
        fine: Some(15_000),
        condition: "Good".to_string(),
    };
    client.bookings().complete(9, &draft).await.unwrap();
}

#[tokio::test]
async fn test_complete_requires_a_condition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/admin/9/complete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_with_role(&mock_server.uri(), Role::Admin);
    let err = client
        .bookings()
        .complete(9, &CompletionDraft::default())
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Return condition is required.");
}
