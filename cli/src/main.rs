use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use studio::config::{ApiConfig, ConfigError};
use studio::net::api;
use studio::net::types::{
    AnalyticsPeriod, AttendancePatch, AttendancePeriod, AttendanceStatus, ClassPatch, InstructorPatch, NewAttendance,
    NewClass, NewInstructor, NewPayment, NewStudent, PaymentMethod, PaymentPatch, PaymentStatus, PaymentType,
    RegisterRequest, SchoolInfo, StudentPatch,
};
use studio::routes::{self, Navigation};
use studio::services::auth;
use studio::state::storage::{FileStorage, StorageError};
use studio::{ApiClient, ApiError, AuthState, Session};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "studio-cli", about = "Dance school API client")]
struct Cli {
    #[arg(long, env = "STUDIO_API_BASE_URL", default_value = studio::config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "STUDIO_API_TIMEOUT_MS", default_value_t = studio::config::DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// File holding the persisted session (tokens and identity).
    #[arg(long, env = "STUDIO_SESSION_FILE", default_value = ".studio-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STUDIO_PASSWORD")]
        password: String,
    },
    Register(RegisterArgs),
    Logout,
    Refresh,
    /// Show the locally stored identity.
    Whoami,
    /// Check whether the current session may open a client route.
    Route {
        path: String,
    },
    Classes(ClassesCommand),
    Instructors(InstructorsCommand),
    Students(StudentsCommand),
    Bookings(BookingsCommand),
    Payments(PaymentsCommand),
    Attendance(AttendanceCommand),
    Reports(ReportsCommand),
    SchoolInfo(SchoolInfoCommand),
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "STUDIO_PASSWORD")]
    password: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    phone_number: String,
    #[arg(long, help = "YYYY-MM-DD")]
    date_of_birth: String,
}

// =============================================================================
// CLASSES
// =============================================================================

#[derive(Args, Debug)]
struct ClassesCommand {
    #[command(subcommand)]
    command: ClassesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ClassesSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        style: String,
        #[arg(long)]
        max_participants: u32,
        #[arg(long)]
        instructor: i64,
        #[arg(long)]
        start_time: String,
        #[arg(long)]
        end_time: String,
        #[arg(long)]
        room: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        max_participants: Option<u32>,
        #[arg(long)]
        instructor: Option<i64>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long)]
        room: Option<String>,
    },
    Delete {
        id: i64,
    },
}

// =============================================================================
// INSTRUCTORS / STUDENTS
// =============================================================================

#[derive(Args, Debug)]
struct InstructorsCommand {
    #[command(subcommand)]
    command: InstructorsSubcommand,
}

#[derive(Subcommand, Debug)]
enum InstructorsSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        specialization: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct StudentsCommand {
    #[command(subcommand)]
    command: StudentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum StudentsSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone_number: String,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: StudentFields,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct StudentFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    phone_number: Option<String>,
    #[arg(long)]
    date_of_birth: Option<String>,
}

impl From<StudentFields> for StudentPatch {
    fn from(fields: StudentFields) -> Self {
        Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            phone_number: fields.phone_number,
            date_of_birth: fields.date_of_birth,
        }
    }
}

// =============================================================================
// BOOKINGS / PAYMENTS / ATTENDANCE
// =============================================================================

#[derive(Args, Debug)]
struct BookingsCommand {
    #[command(subcommand)]
    command: BookingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum BookingsSubcommand {
    List,
    Show { id: i64 },
    Book { class_id: i64 },
    Cancel { id: i64 },
}

#[derive(Args, Debug)]
struct PaymentsCommand {
    #[command(subcommand)]
    command: PaymentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PaymentsSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        student: i64,
        #[arg(long, help = "Decimal amount, e.g. 150.00")]
        amount: String,
        #[arg(long)]
        payment_type: PaymentType,
        #[arg(long)]
        payment_method: PaymentMethod,
    },
    Update {
        id: i64,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        payment_type: Option<PaymentType>,
        #[arg(long)]
        payment_method: Option<PaymentMethod>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        #[arg(long)]
        paid_at: Option<String>,
        #[arg(long)]
        valid_until: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct AttendanceCommand {
    #[command(subcommand)]
    command: AttendanceSubcommand,
}

#[derive(Subcommand, Debug)]
enum AttendanceSubcommand {
    List {
        class_id: i64,
    },
    Record {
        class_id: i64,
        #[arg(long)]
        student: i64,
        #[arg(long)]
        status: AttendanceStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    Show {
        class_id: i64,
        student_id: i64,
    },
    Update {
        class_id: i64,
        student_id: i64,
        #[arg(long)]
        status: Option<AttendanceStatus>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        class_id: i64,
        student_id: i64,
    },
}

// =============================================================================
// REPORTS / SCHOOL INFO / PROFILE
// =============================================================================

#[derive(Args, Debug)]
struct ReportsCommand {
    #[command(subcommand)]
    command: ReportsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReportsSubcommand {
    Attendance {
        #[arg(long, default_value = "month")]
        period: AttendancePeriod,
    },
    Analytics {
        #[arg(long, default_value = "month")]
        period: AnalyticsPeriod,
    },
}

#[derive(Args, Debug)]
struct SchoolInfoCommand {
    #[command(subcommand)]
    command: SchoolInfoSubcommand,
}

#[derive(Subcommand, Debug)]
enum SchoolInfoSubcommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bank_name: Option<String>,
        #[arg(long)]
        bank_account: Option<String>,
        #[arg(long)]
        bank_recipient: Option<String>,
        #[arg(long)]
        transfer_title_prefix: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update(StudentFields),
}

// =============================================================================
// ENTRY
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ApiConfig::new(&cli.base_url)?.with_timeout_ms(cli.timeout_ms)?;
    let session = open_session(&cli.session_file)?;
    tracing::debug!(base_url = %config.base_url, session_file = %cli.session_file.display(), "cli configured");

    match cli.command {
        Command::Logout => {
            auth::logout(&session)?;
            print_json(&whoami(&session))
        }
        Command::Whoami => print_json(&whoami(&session)),
        Command::Route { path } => print_json(&route_decision(&path, &session)),
        command => {
            let client = ApiClient::new(&config, session)?;
            run_remote(&client, command).await
        }
    }
}

fn open_session(path: &std::path::Path) -> Result<Session, CliError> {
    Ok(Session::new(FileStorage::open(path)?))
}

async fn run_remote(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let response = auth::login(client, &email, &password).await?;
            let mut state = AuthState::load(client.session());
            state.update(client.session(), Some(&response.profile()))?;
            eprintln!("welcome {}; next: {}", state.display_name().unwrap_or(email), routes::AFTER_LOGIN);
            print_json(&whoami(client.session()))
        }
        Command::Register(args) => {
            let payload = RegisterRequest {
                email: args.email,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
                phone_number: args.phone_number,
                date_of_birth: args.date_of_birth,
            };
            let response = auth::register(client, &payload).await?;
            eprintln!("registered; next: {}", routes::AFTER_REGISTER);
            print_json(&response)
        }
        Command::Refresh => {
            auth::refresh(client).await?;
            print_json(&whoami(client.session()))
        }
        Command::Classes(classes) => run_classes(client, classes.command).await,
        Command::Instructors(instructors) => run_instructors(client, instructors.command).await,
        Command::Students(students) => run_students(client, students.command).await,
        Command::Bookings(bookings) => run_bookings(client, bookings.command).await,
        Command::Payments(payments) => run_payments(client, payments.command).await,
        Command::Attendance(attendance) => run_attendance(client, attendance.command).await,
        Command::Reports(reports) => run_reports(client, reports.command).await,
        Command::SchoolInfo(info) => run_school_info(client, info.command).await,
        Command::Profile(profile) => run_profile(client, profile.command).await,
        Command::Logout | Command::Whoami | Command::Route { .. } => Ok(()),
    }
}

async fn run_classes(client: &ApiClient, command: ClassesSubcommand) -> Result<(), CliError> {
    match command {
        ClassesSubcommand::List => print_json(&api::list_classes(client).await?),
        ClassesSubcommand::Show { id } => print_json(&api::get_class(client, id).await?),
        ClassesSubcommand::Create { name, style, max_participants, instructor, start_time, end_time, room } => {
            let class = NewClass { name, style, max_participants, instructor, start_time, end_time, room };
            print_json(&api::create_class(client, &class).await?)
        }
        ClassesSubcommand::Update { id, name, style, max_participants, instructor, start_time, end_time, room } => {
            let patch = ClassPatch { name, style, max_participants, instructor, start_time, end_time, room };
            print_json(&api::update_class(client, id, &patch).await?)
        }
        ClassesSubcommand::Delete { id } => {
            api::delete_class(client, id).await?;
            print_json(&deleted("class", id))
        }
    }
}

async fn run_instructors(client: &ApiClient, command: InstructorsSubcommand) -> Result<(), CliError> {
    match command {
        InstructorsSubcommand::List => print_json(&api::list_instructors(client).await?),
        InstructorsSubcommand::Show { id } => print_json(&api::get_instructor(client, id).await?),
        InstructorsSubcommand::Create { first_name, last_name, email, specialization } => {
            let instructor = NewInstructor { first_name, last_name, email, specialization };
            print_json(&api::create_instructor(client, &instructor).await?)
        }
        InstructorsSubcommand::Update { id, first_name, last_name, email, specialization } => {
            let patch = InstructorPatch { first_name, last_name, email, specialization };
            print_json(&api::update_instructor(client, id, &patch).await?)
        }
        InstructorsSubcommand::Delete { id } => {
            api::delete_instructor(client, id).await?;
            print_json(&deleted("instructor", id))
        }
    }
}

async fn run_students(client: &ApiClient, command: StudentsSubcommand) -> Result<(), CliError> {
    match command {
        StudentsSubcommand::List => print_json(&api::list_students(client).await?),
        StudentsSubcommand::Show { id } => print_json(&api::get_student(client, id).await?),
        StudentsSubcommand::Create { first_name, last_name, email, phone_number } => {
            let student = NewStudent { first_name, last_name, email, phone_number };
            print_json(&api::create_student(client, &student).await?)
        }
        StudentsSubcommand::Update { id, fields } => {
            print_json(&api::update_student(client, id, &fields.into()).await?)
        }
        StudentsSubcommand::Delete { id } => {
            api::delete_student(client, id).await?;
            print_json(&deleted("student", id))
        }
    }
}

async fn run_bookings(client: &ApiClient, command: BookingsSubcommand) -> Result<(), CliError> {
    match command {
        BookingsSubcommand::List => print_json(&api::list_bookings(client).await?),
        BookingsSubcommand::Show { id } => print_json(&api::get_booking(client, id).await?),
        BookingsSubcommand::Book { class_id } => print_json(&api::book_class(client, class_id).await?),
        BookingsSubcommand::Cancel { id } => {
            api::cancel_booking(client, id).await?;
            print_json(&deleted("booking", id))
        }
    }
}

async fn run_payments(client: &ApiClient, command: PaymentsSubcommand) -> Result<(), CliError> {
    match command {
        PaymentsSubcommand::List => print_json(&api::list_payments(client).await?),
        PaymentsSubcommand::Show { id } => print_json(&api::get_payment(client, id).await?),
        PaymentsSubcommand::Create { student, amount, payment_type, payment_method } => {
            let payment = NewPayment { student, amount, payment_type, payment_method };
            print_json(&api::create_payment(client, &payment).await?)
        }
        PaymentsSubcommand::Update { id, amount, payment_type, payment_method, status, paid_at, valid_until } => {
            let patch = PaymentPatch { amount, payment_type, payment_method, status, paid_at, valid_until };
            print_json(&api::update_payment(client, id, &patch).await?)
        }
        PaymentsSubcommand::Delete { id } => {
            api::delete_payment(client, id).await?;
            print_json(&deleted("payment", id))
        }
    }
}

async fn run_attendance(client: &ApiClient, command: AttendanceSubcommand) -> Result<(), CliError> {
    match command {
        AttendanceSubcommand::List { class_id } => print_json(&api::list_attendance(client, class_id).await?),
        AttendanceSubcommand::Record { class_id, student, status, notes } => {
            let record = NewAttendance { student, status, notes };
            print_json(&api::record_attendance(client, class_id, &record).await?)
        }
        AttendanceSubcommand::Show { class_id, student_id } => {
            print_json(&api::get_attendance(client, class_id, student_id).await?)
        }
        AttendanceSubcommand::Update { class_id, student_id, status, notes } => {
            let patch = AttendancePatch { status, notes };
            print_json(&api::update_attendance(client, class_id, student_id, &patch).await?)
        }
        AttendanceSubcommand::Delete { class_id, student_id } => {
            api::delete_attendance(client, class_id, student_id).await?;
            print_json(&serde_json::json!({ "deleted": "attendance", "class": class_id, "student": student_id }))
        }
    }
}

async fn run_reports(client: &ApiClient, command: ReportsSubcommand) -> Result<(), CliError> {
    match command {
        ReportsSubcommand::Attendance { period } => print_json(&api::attendance_report(client, period).await?),
        ReportsSubcommand::Analytics { period } => print_json(&api::class_analytics(client, period).await?),
    }
}

async fn run_school_info(client: &ApiClient, command: SchoolInfoSubcommand) -> Result<(), CliError> {
    match command {
        SchoolInfoSubcommand::Show => print_json(&api::school_info(client).await?),
        SchoolInfoSubcommand::Update {
            name,
            address,
            phone,
            email,
            bank_name,
            bank_account,
            bank_recipient,
            transfer_title_prefix,
        } => {
            let info = SchoolInfo {
                name,
                address,
                phone,
                email,
                bank_name,
                bank_account,
                bank_recipient,
                transfer_title_prefix,
            };
            print_json(&api::update_school_info(client, &info).await?)
        }
    }
}

async fn run_profile(client: &ApiClient, command: ProfileSubcommand) -> Result<(), CliError> {
    match command {
        ProfileSubcommand::Show => print_json(&api::profile(client).await?),
        ProfileSubcommand::Update(fields) => print_json(&api::update_profile(client, &fields.into()).await?),
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn whoami(session: &Session) -> Value {
    let state = AuthState::load(session);
    serde_json::json!({
        "logged_in": state.is_logged_in,
        "role": state.role,
        "email": state.email,
        "name": state.display_name(),
    })
}

fn route_decision(path: &str, session: &Session) -> Value {
    let state = AuthState::load(session);
    let Some(matched) = routes::resolve(path) else {
        return serde_json::json!({ "path": path, "decision": "not_found" });
    };

    let params: serde_json::Map<String, Value> = matched
        .params
        .iter()
        .map(|(key, value)| ((*key).to_owned(), Value::String((*value).to_owned())))
        .collect();
    let (decision, redirect) = match routes::authorize(matched.route, &state) {
        Navigation::Allow => ("allow", None),
        Navigation::Redirect(target) => ("redirect", Some(target)),
        Navigation::NotFound => ("not_found", None),
    };

    serde_json::json!({
        "path": path,
        "route": matched.route.name,
        "params": params,
        "decision": decision,
        "redirect": redirect,
    })
}

fn deleted(kind: &str, id: i64) -> Value {
    serde_json::json!({ "deleted": kind, "id": id })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
