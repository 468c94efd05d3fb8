use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::config::ApiConfig;
use crate::net::classify::{Access, classify_path};
use crate::net::types::{AttendanceStatus, BookingStatus, PaymentMethod, PaymentType};
use crate::state::session::Session;

fn client_for(server: &MockServer) -> ApiClient {
    let session = Session::in_memory();
    session.persist_tokens("tok", None).unwrap();
    let config = ApiConfig::new(&server.uri()).unwrap();
    ApiClient::new(&config, session).unwrap()
}

// =============================================================
// paths
// =============================================================

#[test]
fn collection_paths_follow_backend_layout() {
    assert_eq!(CLASSES.list(), "/classes/");
    assert_eq!(CLASSES.detail(5), "/classes/5/");
    assert_eq!(INSTRUCTORS.create(), "/instructors/create/");
    assert_eq!(STUDENTS.update(3), "/students/3/update/");
    assert_eq!(BOOKINGS.delete(9), "/bookings/9/delete/");
    assert_eq!(attendance_record_path(2, 7), "/classes/2/attendance/7/");
    assert_eq!(attendance_report_path(AttendancePeriod::Week), "/reports/attendance/week/");
    assert_eq!(analytics_report_path(AnalyticsPeriod::Quarter), "/reports/analytics/quarter/");
}

#[test]
fn writes_and_private_reads_are_protected() {
    for path in [
        CLASSES.create(),
        CLASSES.update(1),
        CLASSES.delete(1),
        INSTRUCTORS.list(),
        BOOKINGS.list(),
        PAYMENTS.detail(1),
        attendance_path(1),
        attendance_report_path(AttendancePeriod::Month),
        PROFILE_PATH.to_owned(),
        PROFILE_UPDATE_PATH.to_owned(),
        SCHOOL_INFO_UPDATE_PATH.to_owned(),
    ] {
        assert_eq!(classify_path(&path), Access::Protected, "{path}");
    }
}

#[test]
fn schedule_reads_are_public() {
    for path in [CLASSES.list(), CLASSES.detail(4), STUDENTS.list(), SCHOOL_INFO_PATH.to_owned()] {
        assert_eq!(classify_path(&path), Access::Public, "{path}");
    }
}

// =============================================================
// wire behaviour
// =============================================================

#[tokio::test]
async fn list_classes_decodes_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/classes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 1,
            "name": "Salsa Basics",
            "style": "Salsa",
            "max_participants": 15,
            "instructor": 2,
            "start_time": "2024-03-01 18:00",
            "end_time": "2024-03-01 19:00",
            "days_of_week": "MO,WE",
            "is_recurring": true,
            "room": "A",
        }])))
        .mount(&server)
        .await;

    let classes = list_classes(&client_for(&server)).await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].style, "Salsa");
    assert!(classes[0].is_recurring);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn book_class_posts_class_model_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings/create/"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(serde_json::json!({"class_model": 12})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 40,
            "student": 3,
            "class_model": 12,
            "booking_date": "2024-03-01T10:00:00Z",
            "status": "confirmed",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let booking = book_class(&client_for(&server), 12).await.unwrap();
    assert_eq!(booking.id, 40);
    assert_eq!(booking.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn full_class_booking_surfaces_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bookings/create/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"non_field_errors": ["Brak wolnych miejsc na te zajęcia."]})),
        )
        .mount(&server)
        .await;

    let err = book_class(&client_for(&server), 12).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}

#[tokio::test]
async fn create_payment_sends_wire_enums() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments/create/"))
        .and(body_json(serde_json::json!({
            "student": 3,
            "amount": "150.00",
            "payment_type": "monthly",
            "payment_method": "transfer",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 8,
            "student": 3,
            "amount": "150.00",
            "payment_type": "monthly",
            "payment_method": "transfer",
            "status": "pending",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payment = create_payment(
        &client_for(&server),
        &NewPayment {
            student: 3,
            amount: "150.00".to_owned(),
            payment_type: PaymentType::Monthly,
            payment_method: PaymentMethod::Transfer,
        },
    )
    .await
    .unwrap();
    assert_eq!(payment.id, 8);
}

#[tokio::test]
async fn update_attendance_patches_record() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/classes/2/attendance/7/"))
        .and(body_json(serde_json::json!({"status": "late"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "student": 7,
            "class_instance": 2,
            "status": "late",
            "notes": "Arrived on time",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = AttendancePatch { status: Some(AttendanceStatus::Late), notes: None };
    let record = update_attendance(&client_for(&server), 2, 7, &patch).await.unwrap();
    assert_eq!(record.status, AttendanceStatus::Late);
}

#[tokio::test]
async fn attendance_report_uses_period_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/attendance/month/"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "class_name": "Tango",
            "instructor_name": "John",
            "date": "2024-03-01T18:00:00Z",
            "booked_slots": 6,
            "max_slots": 12,
            "attendance_rate": 50.0,
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = attendance_report(&client_for(&server), AttendancePeriod::Month).await.unwrap();
    assert_eq!(rows[0].booked_slots, 6);
    assert!((rows[0].attendance_rate - 50.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn update_profile_puts_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(PROFILE_UPDATE_PATH))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(serde_json::json!({"phone_number": "555000111"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"phone_number": "555000111"})))
        .expect(1)
        .mount(&server)
        .await;

    let patch = StudentPatch { phone_number: Some("555000111".to_owned()), ..StudentPatch::default() };
    let echoed = update_profile(&client_for(&server), &patch).await.unwrap();
    assert_eq!(echoed["phone_number"], "555000111");
}

#[tokio::test]
async fn school_info_is_fetched_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SCHOOL_INFO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Szkoła Tańca",
            "address": "Ulica przykładowa 1",
            "phone": "000000000",
            "email": "kontakt@szkola.pl",
        })))
        .mount(&server)
        .await;

    let info = school_info(&client_for(&server)).await.unwrap();
    assert_eq!(info.name.as_deref(), Some("Szkoła Tańca"));
    assert_eq!(info.bank_account, None);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

// =============================================================
// admin writes: classes and instructors
// =============================================================

fn salsa() -> NewClass {
    NewClass {
        name: "Salsa Basics".to_owned(),
        style: "Salsa".to_owned(),
        max_participants: 15,
        instructor: 2,
        start_time: "2024-03-01T18:00:00Z".to_owned(),
        end_time: "2024-03-01T19:00:00Z".to_owned(),
        room: Some("A".to_owned()),
    }
}

#[tokio::test]
async fn create_class_accepts_echo_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classes/create/"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(serde_json::to_value(salsa()).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "name": "Salsa Basics",
            "style": "Salsa",
            "max_participants": 15,
            "instructor": 2,
            "start_time": "2024-03-01T18:00:00Z",
            "end_time": "2024-03-01T19:00:00Z",
            "room": "A",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let echoed = create_class(&client_for(&server), &salsa()).await.unwrap();
    assert_eq!(echoed["name"], "Salsa Basics");
    assert!(echoed.get("id").is_none());
}

#[tokio::test]
async fn update_class_patches_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/classes/5/update/"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(serde_json::json!({"max_participants": 20})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Salsa Basics",
            "style": "Salsa",
            "max_participants": 20,
            "instructor": 2,
            "start_time": "2024-03-01T18:00:00Z",
            "end_time": "2024-03-01T19:00:00Z",
            "room": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ClassPatch { max_participants: Some(20), ..ClassPatch::default() };
    let echoed = update_class(&client_for(&server), 5, &patch).await.unwrap();
    assert_eq!(echoed["max_participants"], 20);
}

#[tokio::test]
async fn delete_class_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/classes/5/delete/"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    delete_class(&client_for(&server), 5).await.unwrap();
}

#[tokio::test]
async fn create_instructor_accepts_echo_without_id() {
    let server = MockServer::start().await;
    let instructor = NewInstructor {
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        email: "john@example.com".to_owned(),
        specialization: "Tango".to_owned(),
    };
    Mock::given(method("POST"))
        .and(path("/instructors/create/"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(serde_json::to_value(&instructor).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "first_name": "John",
            "last_name": "Doe",
            "email": "john@example.com",
            "specialization": "Tango",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let echoed = create_instructor(&client_for(&server), &instructor).await.unwrap();
    assert_eq!(echoed["email"], "john@example.com");
}

#[tokio::test]
async fn update_instructor_accepts_echo_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/instructors/3/update/"))
        .and(body_json(serde_json::json!({"specialization": "Salsa"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "first_name": "John",
            "last_name": "Doe",
            "email": "john@example.com",
            "specialization": "Salsa",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = InstructorPatch { specialization: Some("Salsa".to_owned()), ..InstructorPatch::default() };
    let echoed = update_instructor(&client_for(&server), 3, &patch).await.unwrap();
    assert_eq!(echoed["specialization"], "Salsa");
}

#[tokio::test]
async fn delete_instructor_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/instructors/3/delete/"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    delete_instructor(&client_for(&server), 3).await.unwrap();
}
