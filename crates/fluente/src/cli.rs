//! Clap derive structures for the `fluente` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fluente -- command-line client for the language-school platform
#[derive(Debug, Parser)]
#[command(
    name = "fluente",
    version,
    about = "Manage students, classes, and payments from the command line",
    long_about = "Administrative client for the Fluente language-school platform.\n\n\
        Talks to the school's REST backend: students, consultants, classes\n\
        (turmas), course contents, lessons, enrollments, and payments.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "FLUENTE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "FLUENTE_SERVER", global = true)]
    pub server: Option<String>,

    /// Login email (overrides profile)
    #[arg(long, env = "FLUENTE_EMAIL", global = true)]
    pub email: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLUENTE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FLUENTE_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage students
    #[command(alias = "st", alias = "alunos")]
    Students(StudentsArgs),

    /// Manage consultants (teachers)
    #[command(alias = "co")]
    Consultants(ConsultantsArgs),

    /// Manage classes (turmas)
    #[command(alias = "turmas", alias = "cl")]
    Classes(ClassesArgs),

    /// Manage course contents
    Contents(ContentsArgs),

    /// Manage lessons and attendance
    Lessons(LessonsArgs),

    /// Manage payments
    #[command(alias = "pay")]
    Payments(PaymentsArgs),

    /// Show the dashboard summary
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared pagination arguments for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Max results per page
    #[arg(long, short = 'l', default_value = "25")]
    pub limit: u32,

    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STUDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List students
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by name or email
        #[arg(long)]
        search: Option<String>,
    },

    /// Get student details
    Get {
        /// Student id
        id: String,
    },

    /// Register a new student
    Create {
        /// Full name
        #[arg(long, required = true)]
        name: String,

        /// Email address
        #[arg(long, required = true)]
        email: String,

        /// Initial password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,

        /// Postal address
        #[arg(long)]
        address: Option<String>,

        /// Emergency contact
        #[arg(long)]
        emergency_contact: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Update a student
    Update {
        /// Student id
        id: String,

        /// Full name
        #[arg(long)]
        name: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a student
    Delete {
        /// Student id
        id: String,
    },

    /// List a student's payments
    Payments {
        /// Student id
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONSULTANTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConsultantsArgs {
    #[command(subcommand)]
    pub command: ConsultantsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConsultantsCommand {
    /// List consultants
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by name or email
        #[arg(long)]
        search: Option<String>,
    },

    /// Get consultant details
    Get {
        /// Consultant id
        id: String,
    },

    /// Register a new consultant
    Create {
        /// Full name
        #[arg(long, required = true)]
        name: String,

        /// Email address
        #[arg(long, required = true)]
        email: String,

        /// Initial password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a consultant
    Delete {
        /// Consultant id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CLASSES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ClassesArgs {
    #[command(subcommand)]
    pub command: ClassesCommand,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ClassTypeArg {
    Corporate,
    Private,
}

#[derive(Debug, Subcommand)]
pub enum ClassesCommand {
    /// List classes
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by class type
        #[arg(long, value_enum)]
        class_type: Option<ClassTypeArg>,

        /// Filter by level (e.g. B1, CONVERSATION_A2)
        #[arg(long)]
        level: Option<String>,

        /// Filter by consultant id
        #[arg(long)]
        consultant: Option<String>,

        /// Only active classes
        #[arg(long)]
        active: bool,
    },

    /// Get class details (consultant + enrollments)
    Get {
        /// Class id
        id: String,
    },

    /// Create a class
    Create {
        /// Class name
        #[arg(long, required = true)]
        name: String,

        /// Class type
        #[arg(long, value_enum, required = true)]
        class_type: ClassTypeArg,

        /// Level (e.g. A1, B2, CONVERSATION_C1)
        #[arg(long, required = true)]
        level: String,

        /// Consultant id
        #[arg(long, required = true)]
        consultant: String,

        /// Weekly start time (HH:MM)
        #[arg(long, required = true)]
        start_time: String,

        /// Weekly end time (HH:MM)
        #[arg(long, required = true)]
        end_time: String,

        /// Day of week (0 = Sunday ... 6 = Saturday)
        #[arg(long, required = true, value_parser = clap::value_parser!(u8).range(0..=6))]
        day_of_week: u8,

        /// Maximum number of students
        #[arg(long)]
        max_students: Option<u32>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a class
    Update {
        /// Class id
        id: String,

        /// Class name
        #[arg(long)]
        name: Option<String>,

        /// Level
        #[arg(long)]
        level: Option<String>,

        /// Consultant id
        #[arg(long)]
        consultant: Option<String>,

        /// Activate/deactivate
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Delete a class
    Delete {
        /// Class id
        id: String,
    },

    /// Enroll a student
    Enroll {
        /// Class id
        id: String,

        /// Student id
        #[arg(long, required = true)]
        student: String,
    },

    /// Remove a student from the class
    Unenroll {
        /// Class id
        id: String,

        /// Student id
        #[arg(long, required = true)]
        student: String,
    },

    /// List a class's enrollments
    Enrollments {
        /// Class id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContentsArgs {
    #[command(subcommand)]
    pub command: ContentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContentsCommand {
    /// List contents
    #[command(alias = "ls")]
    List(ListArgs),

    /// List contents of one module, in order
    Module {
        /// Module name
        module: String,
    },

    /// Get content details
    Get {
        /// Content id
        id: String,
    },

    /// Create a content unit
    Create {
        /// Title
        #[arg(long, required = true)]
        title: String,

        /// Module name
        #[arg(long, required = true)]
        module: String,

        /// Position within the module
        #[arg(long, required = true)]
        order: u32,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Presentation URL
        #[arg(long)]
        presentation_url: Option<String>,

        /// Students PDF URL
        #[arg(long)]
        students_pdf_url: Option<String>,

        /// Homework URL
        #[arg(long)]
        homework_url: Option<String>,
    },

    /// Update a content unit
    Update {
        /// Content id
        id: String,

        /// Title
        #[arg(long)]
        title: Option<String>,

        /// Module name
        #[arg(long)]
        module: Option<String>,

        /// Position within the module
        #[arg(long)]
        order: Option<u32>,

        /// Activate/deactivate
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Delete a content unit
    Delete {
        /// Content id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LESSONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LessonsArgs {
    #[command(subcommand)]
    pub command: LessonsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LessonsCommand {
    /// List a class's lessons
    #[command(alias = "ls")]
    List {
        /// Class id
        #[arg(long, required = true)]
        class: String,
    },

    /// Get lesson details (attendance included)
    Get {
        /// Lesson id
        id: String,
    },

    /// Schedule a lesson
    Create {
        /// Class id
        #[arg(long, required = true)]
        class: String,

        /// Content id
        #[arg(long, required = true)]
        content: String,

        /// Lesson date (YYYY-MM-DD)
        #[arg(long, required = true)]
        date: String,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Mark a lesson as completed
    Complete {
        /// Lesson id
        id: String,
    },

    /// Update a lesson
    Update {
        /// Lesson id
        id: String,

        /// Content id
        #[arg(long)]
        content: Option<String>,

        /// Lesson date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a lesson
    Delete {
        /// Lesson id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum PaymentStatusArg {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// List payments
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by status
        #[arg(long, value_enum)]
        status: Option<PaymentStatusArg>,

        /// Filter by student id
        #[arg(long)]
        student: Option<String>,

        /// Filter by class id
        #[arg(long)]
        class: Option<String>,

        /// Filter by reference month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,

        /// Filter by reference year
        #[arg(long)]
        year: Option<u16>,
    },

    /// Get payment details
    Get {
        /// Payment id
        id: String,
    },

    /// Create a payment
    Create {
        /// Student id
        #[arg(long, required = true)]
        student: String,

        /// Class id (optional)
        #[arg(long)]
        class: Option<String>,

        /// Amount
        #[arg(long, required = true)]
        amount: f64,

        /// Description
        #[arg(long, required = true)]
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, required = true)]
        due: String,

        /// Reference month (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,

        /// Reference year (defaults to the current year)
        #[arg(long)]
        year: Option<u16>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Mark a payment as paid
    Pay {
        /// Payment id
        id: String,

        /// Paid date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a payment
    Delete {
        /// Payment id
        id: String,
    },

    /// Aggregate payment statistics
    Stats,

    /// Generate one payment per active student of a class
    Bulk {
        /// Class id
        #[arg(long, required = true)]
        class: String,

        /// Amount per student
        #[arg(long, required = true)]
        amount: f64,

        /// Description
        #[arg(long, required = true)]
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, required = true)]
        due: String,

        /// Reference month (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,

        /// Reference year (defaults to the current year)
        #[arg(long)]
        year: Option<u16>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
