//! REST helpers for every backend resource.
//!
//! Thin wrappers over [`ApiClient`]: each builds its path, picks the verb and
//! decodes the typed response. Credentials are decided by the client from
//! the path alone, so nothing here touches tokens.
//!
//! Updates use `PATCH` with partial bodies, except the profile and school
//! info which are replaced with `PUT`.

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use super::client::{ApiClient, ApiError};
use super::types::{
    AnalyticsPeriod, Attendance, AttendancePatch, AttendancePeriod, AttendanceReportRow, Booking, ClassAnalytics,
    ClassPatch, DanceClass, Instructor, InstructorPatch, NewAttendance, NewBooking, NewClass, NewInstructor,
    NewPayment, NewStudent, Payment, PaymentPatch, SchoolInfo, Student, StudentPatch,
};

pub const PROFILE_PATH: &str = "/student/profile/";
pub const PROFILE_UPDATE_PATH: &str = "/student/profile/update/";
pub const SCHOOL_INFO_PATH: &str = "/school-info/";
pub const SCHOOL_INFO_UPDATE_PATH: &str = "/school-info/update/";

/// Path builders for a backend collection that follows the
/// `list / {id} / create / {id}/update / {id}/delete` layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collection(&'static str);

pub const CLASSES: Collection = Collection("classes");
pub const INSTRUCTORS: Collection = Collection("instructors");
pub const STUDENTS: Collection = Collection("students");
pub const BOOKINGS: Collection = Collection("bookings");
pub const PAYMENTS: Collection = Collection("payments");

impl Collection {
    #[must_use]
    pub fn list(self) -> String {
        format!("/{}/", self.0)
    }

    #[must_use]
    pub fn detail(self, id: i64) -> String {
        format!("/{}/{id}/", self.0)
    }

    #[must_use]
    pub fn create(self) -> String {
        format!("/{}/create/", self.0)
    }

    #[must_use]
    pub fn update(self, id: i64) -> String {
        format!("/{}/{id}/update/", self.0)
    }

    #[must_use]
    pub fn delete(self, id: i64) -> String {
        format!("/{}/{id}/delete/", self.0)
    }
}

#[must_use]
pub fn attendance_path(class_id: i64) -> String {
    format!("/classes/{class_id}/attendance/")
}

#[must_use]
pub fn attendance_record_path(class_id: i64, student_id: i64) -> String {
    format!("/classes/{class_id}/attendance/{student_id}/")
}

#[must_use]
pub fn attendance_report_path(period: AttendancePeriod) -> String {
    format!("/reports/attendance/{period}/")
}

#[must_use]
pub fn analytics_report_path(period: AnalyticsPeriod) -> String {
    format!("/reports/analytics/{period}/")
}

// =============================================================================
// CLASSES
// =============================================================================

/// The public class schedule.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn list_classes(client: &ApiClient) -> Result<Vec<DanceClass>, ApiError> {
    client.get(&CLASSES.list()).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn get_class(client: &ApiClient, id: i64) -> Result<DanceClass, ApiError> {
    client.get(&CLASSES.detail(id)).await
}

/// The create endpoint echoes the submitted fields without an `id`, so the
/// echo is returned as the backend sent it.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn create_class(client: &ApiClient, class: &NewClass) -> Result<serde_json::Value, ApiError> {
    client.post(&CLASSES.create(), class).await
}

/// Returns the updated fields as echoed, again without an `id`.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn update_class(client: &ApiClient, id: i64, patch: &ClassPatch) -> Result<serde_json::Value, ApiError> {
    client.patch(&CLASSES.update(id), patch).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn delete_class(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&CLASSES.delete(id)).await
}

// =============================================================================
// INSTRUCTORS
// =============================================================================

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn list_instructors(client: &ApiClient) -> Result<Vec<Instructor>, ApiError> {
    client.get(&INSTRUCTORS.list()).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn get_instructor(client: &ApiClient, id: i64) -> Result<Instructor, ApiError> {
    client.get(&INSTRUCTORS.detail(id)).await
}

/// Like classes, the echo carries the four editable fields and no `id`.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn create_instructor(
    client: &ApiClient,
    instructor: &NewInstructor,
) -> Result<serde_json::Value, ApiError> {
    client.post(&INSTRUCTORS.create(), instructor).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn update_instructor(
    client: &ApiClient,
    id: i64,
    patch: &InstructorPatch,
) -> Result<serde_json::Value, ApiError> {
    client.patch(&INSTRUCTORS.update(id), patch).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn delete_instructor(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&INSTRUCTORS.delete(id)).await
}

// =============================================================================
// STUDENTS
// =============================================================================

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn list_students(client: &ApiClient) -> Result<Vec<Student>, ApiError> {
    client.get(&STUDENTS.list()).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn get_student(client: &ApiClient, id: i64) -> Result<Student, ApiError> {
    client.get(&STUDENTS.detail(id)).await
}

/// The create endpoint echoes the submitted fields only, not a full
/// [`Student`], so the echo is returned as the backend sent it.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn create_student(client: &ApiClient, student: &NewStudent) -> Result<serde_json::Value, ApiError> {
    client.post(&STUDENTS.create(), student).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn update_student(
    client: &ApiClient,
    id: i64,
    patch: &StudentPatch,
) -> Result<serde_json::Value, ApiError> {
    client.patch(&STUDENTS.update(id), patch).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn delete_student(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&STUDENTS.delete(id)).await
}

// =============================================================================
// BOOKINGS
// =============================================================================

/// Bookings visible to the signed-in user.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn list_bookings(client: &ApiClient) -> Result<Vec<Booking>, ApiError> {
    client.get(&BOOKINGS.list()).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn get_booking(client: &ApiClient, id: i64) -> Result<Booking, ApiError> {
    client.get(&BOOKINGS.detail(id)).await
}

/// Reserve a seat. The backend answers 400 when the class is full.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn book_class(client: &ApiClient, class_id: i64) -> Result<Booking, ApiError> {
    client.post(&BOOKINGS.create(), &NewBooking { class_model: class_id }).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn cancel_booking(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&BOOKINGS.delete(id)).await
}

// =============================================================================
// PAYMENTS
// =============================================================================

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn list_payments(client: &ApiClient) -> Result<Vec<Payment>, ApiError> {
    client.get(&PAYMENTS.list()).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn get_payment(client: &ApiClient, id: i64) -> Result<Payment, ApiError> {
    client.get(&PAYMENTS.detail(id)).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn create_payment(client: &ApiClient, payment: &NewPayment) -> Result<Payment, ApiError> {
    client.post(&PAYMENTS.create(), payment).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn update_payment(client: &ApiClient, id: i64, patch: &PaymentPatch) -> Result<Payment, ApiError> {
    client.patch(&PAYMENTS.update(id), patch).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn delete_payment(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&PAYMENTS.delete(id)).await
}

// =============================================================================
// ATTENDANCE
// =============================================================================

/// # Errors
///
/// Propagates [`ApiError`] from the client; 404 when the class does not exist.
pub async fn list_attendance(client: &ApiClient, class_id: i64) -> Result<Vec<Attendance>, ApiError> {
    client.get(&attendance_path(class_id)).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn record_attendance(
    client: &ApiClient,
    class_id: i64,
    record: &NewAttendance,
) -> Result<Attendance, ApiError> {
    client.post(&attendance_path(class_id), record).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn get_attendance(client: &ApiClient, class_id: i64, student_id: i64) -> Result<Attendance, ApiError> {
    client.get(&attendance_record_path(class_id, student_id)).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn update_attendance(
    client: &ApiClient,
    class_id: i64,
    student_id: i64,
    patch: &AttendancePatch,
) -> Result<Attendance, ApiError> {
    client.patch(&attendance_record_path(class_id, student_id), patch).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn delete_attendance(client: &ApiClient, class_id: i64, student_id: i64) -> Result<(), ApiError> {
    client.delete(&attendance_record_path(class_id, student_id)).await
}

// =============================================================================
// REPORTS
// =============================================================================

/// Per-class booking fill rates over `period`. Admin only.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn attendance_report(
    client: &ApiClient,
    period: AttendancePeriod,
) -> Result<Vec<AttendanceReportRow>, ApiError> {
    client.get(&attendance_report_path(period)).await
}

/// Popular classes, peak hours and style mix over `period`. Admin only.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn class_analytics(client: &ApiClient, period: AnalyticsPeriod) -> Result<ClassAnalytics, ApiError> {
    client.get(&analytics_report_path(period)).await
}

// =============================================================================
// SCHOOL INFO / PROFILE
// =============================================================================

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn school_info(client: &ApiClient) -> Result<SchoolInfo, ApiError> {
    client.get(SCHOOL_INFO_PATH).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn update_school_info(client: &ApiClient, info: &SchoolInfo) -> Result<SchoolInfo, ApiError> {
    client.put(SCHOOL_INFO_UPDATE_PATH, info).await
}

/// The signed-in student's own record.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn profile(client: &ApiClient) -> Result<Student, ApiError> {
    client.get(PROFILE_PATH).await
}

/// Replace the signed-in student's editable fields.
///
/// # Errors
///
/// Propagates [`ApiError`] from the client.
pub async fn update_profile(client: &ApiClient, patch: &StudentPatch) -> Result<serde_json::Value, ApiError> {
    client.put(PROFILE_UPDATE_PATH, patch).await
}
