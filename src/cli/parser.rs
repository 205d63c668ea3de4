use clap::{Parser, Subcommand};

/// Command-line interface definition for dailytime
#[derive(Parser)]
#[command(
    name = "dailytime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record daily labor hours and generate the payroll Daily Time Import spreadsheets",
    long_about = None
)]
pub struct Cli {
    /// Use a specific configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the store path (SQLite database or CSV file, per backend)
    #[arg(global = true, long = "db", value_name = "PATH")]
    pub db: Option<String>,

    /// Override the configured backend (sqlite | csv)
    #[arg(global = true, long = "backend", value_name = "BACKEND")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and initialize the store
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Show the active configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "path", help = "Print the configuration file path")]
        path: bool,
    },

    /// Add a time entry for one or more employees
    Add {
        /// Date of the work (YYYY-MM-DD)
        date: String,

        #[arg(long = "job", help = "Job number")]
        job: String,

        #[arg(long = "area", help = "Job area (numeric areas are padded to 3 digits)")]
        area: String,

        #[arg(long = "code", help = "Class type / cost code")]
        code: String,

        /// Repeat for several employees working the same hours
        #[arg(long = "employee", required = true, help = "Employee name")]
        employees: Vec<String>,

        /// Person numbers, matched to --employee by position
        #[arg(long = "emp-no", help = "Employee (person) number")]
        emp_numbers: Vec<String>,

        /// Trade classes, matched to --employee by position
        #[arg(long = "trade", help = "Override trade class")]
        trades: Vec<String>,

        #[arg(long = "rt", default_value_t = 0.0, help = "Regular hours per employee")]
        rt: f64,

        #[arg(long = "ot", default_value_t = 0.0, help = "Overtime hours per employee")]
        ot: f64,

        #[arg(
            long = "total",
            help = "Total hours, split into RT/OT at export when --rt and --ot are zero"
        )]
        total: Option<f64>,

        #[arg(long = "night-shift", help = "Night shift flag (e.g. Y)")]
        night_shift: Option<String>,

        #[arg(
            long = "premium",
            help = "Premium / subsistence / travel rate code (e.g. 261, Subsistence)"
        )]
        premium: Option<String>,

        #[arg(long = "record-type", help = "Time record type")]
        record_type: Option<String>,

        #[arg(long = "comments", help = "Description of work")]
        comments: Option<String>,

        #[arg(long = "by", help = "Who is submitting the entry")]
        by: Option<String>,
    },

    /// List the entries of a day
    List {
        /// Date to show (YYYY-MM-DD), defaults to today
        date: Option<String>,

        #[arg(long = "job", help = "Only entries of this job number")]
        job: Option<String>,

        #[arg(long = "json", help = "Print entries as JSON")]
        json: bool,
    },

    /// Delete entries by id
    Del {
        /// Date the entries belong to (YYYY-MM-DD)
        date: String,

        #[arg(long = "id", required = true, num_args = 1.., help = "Entry id(s) to delete")]
        ids: Vec<i64>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export a day into the payroll import spreadsheets
    Export {
        /// Export date (YYYY-MM-DD), defaults to today
        date: Option<String>,

        #[arg(long = "out", value_name = "DIR", help = "Output folder (overrides config)")]
        out: Option<String>,

        #[arg(long = "by", help = "Who triggered the export")]
        by: Option<String>,

        #[arg(long = "reg", help = "Pay code for regular hours")]
        reg: Option<String>,

        #[arg(long = "ot", help = "Pay code for overtime hours")]
        ot: Option<String>,

        #[arg(long = "subsistence", help = "Pay code for subsistence")]
        subsistence: Option<String>,

        #[arg(long = "no-subsistence", help = "Do not emit subsistence lines")]
        no_subsistence: bool,

        #[arg(long = "no-summary", help = "Skip the whole-day Daily Time workbook")]
        no_summary: bool,

        #[arg(long = "no-descriptions", help = "Skip the per-job Description workbooks")]
        no_descriptions: bool,

        #[arg(long = "dry-run", help = "Build and name documents without writing or logging them")]
        dry_run: bool,
    },

    /// Print the exports log (or the internal operations log)
    Log {
        #[arg(long = "date", help = "Only exports of this date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "internal", help = "Print the internal operations log (SQLite only)")]
        internal: bool,
    },
}
