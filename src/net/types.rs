//! Wire types exchanged with the dance-school backend.
//!
//! Field names follow the backend's JSON exactly. Timestamps stay strings
//! because the backend renders class times as `"%Y-%m-%d %H:%M"` rather than
//! RFC 3339, and amounts stay strings because they are decimals.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A lowercase string enum could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Defines a unit enum whose JSON and text forms are the given literals.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_owned(),
                        expected: concat!($($text, " "),+),
                    }),
                }
            }
        }
    };
}

// =============================================================================
// AUTH
// =============================================================================

wire_enum!(
    /// Account role assigned by the backend.
    Role, "role" {
        Admin => "admin",
        Instructor => "instructor",
        Student => "student",
    }
);

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of a successful `POST /auth/login/`.
///
/// Fields the client does not model are kept in `extra` so callers still
/// see the whole payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    /// Absent when the backend cannot look the account up by email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginResponse {
    /// Identity snapshot carried by the login response.
    ///
    /// Older backends send `first_name`/`last_name` instead of the camel-case
    /// keys; those land in `extra` and are used as a fallback.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        let extra_str = |key: &str| self.extra.get(key).and_then(Value::as_str).map(ToOwned::to_owned);
        UserProfile {
            role: self.role,
            email: self.email.clone(),
            first_name: self.first_name.clone().or_else(|| extra_str("first_name")),
            last_name: self.last_name.clone().or_else(|| extra_str("last_name")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    /// Present only when the backend rotates refresh tokens.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Student self-registration fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
}

/// Role, email and display name of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub role: Option<Role>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// =============================================================================
// CLASSES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanceClass {
    pub id: i64,
    pub name: String,
    pub style: String,
    pub max_participants: u32,
    pub instructor: i64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    /// Comma-separated day codes such as `MO,WE,FR`.
    #[serde(default)]
    pub days_of_week: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub room: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewClass {
    pub name: String,
    pub style: String,
    pub max_participants: u32,
    pub instructor: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClassPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

// =============================================================================
// INSTRUCTORS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub specialization: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewInstructor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialization: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InstructorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

// =============================================================================
// STUDENTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub joined_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Partial student update; also the body of the profile update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

// =============================================================================
// BOOKINGS
// =============================================================================

wire_enum!(
    BookingStatus, "booking status" {
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        Waiting => "waiting",
    }
);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub student: Option<i64>,
    pub class_model: i64,
    #[serde(default)]
    pub booking_date: Option<String>,
    pub status: BookingStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NewBooking {
    pub class_model: i64,
}

// =============================================================================
// PAYMENTS
// =============================================================================

wire_enum!(
    PaymentType, "payment type" {
        Single => "single",
        Monthly => "monthly",
        Quarterly => "quarterly",
        Yearly => "yearly",
    }
);

wire_enum!(
    PaymentMethod, "payment method" {
        Cash => "cash",
        Transfer => "transfer",
        Blik => "blik",
        Card => "card",
    }
);

wire_enum!(
    PaymentStatus, "payment status" {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
);

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub student: i64,
    /// Decimal string, e.g. `"150.00"`.
    pub amount: String,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPayment {
    pub student: i64,
    pub amount: String,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaymentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

// =============================================================================
// ATTENDANCE
// =============================================================================

wire_enum!(
    AttendanceStatus, "attendance status" {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    #[serde(default)]
    pub id: Option<i64>,
    pub student: i64,
    #[serde(default)]
    pub class_instance: Option<i64>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewAttendance {
    pub student: i64,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AttendancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// REPORTS
// =============================================================================

wire_enum!(
    AttendancePeriod, "attendance period" {
        Week => "week",
        Month => "month",
        Quarter => "quarter",
    }
);

wire_enum!(
    AnalyticsPeriod, "analytics period" {
        Month => "month",
        Quarter => "quarter",
        Year => "year",
    }
);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReportRow {
    pub class_name: String,
    pub instructor_name: String,
    pub date: Option<String>,
    pub booked_slots: u32,
    pub max_slots: u32,
    /// Percentage of seats booked, 0-100.
    pub attendance_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularClass {
    pub name: String,
    pub booking_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHour {
    pub hour: u8,
    pub class_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleShare {
    pub style: String,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAnalytics {
    #[serde(default)]
    pub popular_classes: Vec<PopularClass>,
    #[serde(default)]
    pub peak_hours: Vec<PeakHour>,
    #[serde(default)]
    pub style_distribution: Vec<StyleShare>,
}

// =============================================================================
// SCHOOL INFO
// =============================================================================

/// Contact and bank-transfer details shown on the pricing page.
///
/// Used for both reads and updates; unset fields are left out of updates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_title_prefix: Option<String>,
}
