//! HR Desk - command-line front end for the HR record-keeping core.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use hr_desk as app;

use app::attendance::{AttendanceLedger, DepartmentFilter};
use app::config::{AppConfig, ConfigLoadResult};
use app::desk::Desk;
use app::models::{EmployeeDraft, LeaveForm, ReviewForm};
use app::store::{self, Store};

/// Employee roster, attendance, leave requests and dashboard metrics.
#[derive(Parser)]
#[command(name = "hr-desk", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Explicit config file path
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Employee roster
    #[command(subcommand)]
    Employees(EmployeesCommand),
    /// Attendance grid
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    /// Leave requests
    #[command(subcommand)]
    Leave(LeaveCommand),
    /// Performance reviews
    #[command(subcommand)]
    Reviews(ReviewsCommand),
    /// Payroll total shown on the dashboard
    #[command(subcommand)]
    Payroll(PayrollCommand),
    /// Print dashboard metrics
    Dashboard {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write roster, attendance and leave to an Excel workbook
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum EmployeesCommand {
    List,
    Show { id: u32 },
    Add(EmployeeArgs),
    Edit {
        id: u32,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    Remove { id: u32 },
}

#[derive(Args)]
struct EmployeeArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    position: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    salary: String,
    #[arg(long)]
    contact: String,
    /// Full-Time, Part-Time or Contractor
    #[arg(long = "type")]
    employment_type: String,
}

impl From<EmployeeArgs> for EmployeeDraft {
    fn from(args: EmployeeArgs) -> Self {
        Self {
            name: args.name,
            position: args.position,
            department: args.department,
            salary: args.salary,
            contact: args.contact,
            employment_type: args.employment_type,
        }
    }
}

#[derive(Subcommand)]
enum AttendanceCommand {
    /// Grid of statuses per date
    List {
        /// Case-insensitive name substring
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = app::attendance::ALL_DEPARTMENTS)]
        department: String,
    },
    /// Status totals per employee
    Summary,
    /// Overwrite all attendance with random statuses (demo only)
    SimulateDemo {
        #[arg(long)]
        seed: Option<u64>,
        /// Confirm overwriting existing attendance
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LeaveCommand {
    List,
    Submit {
        #[arg(long)]
        employee: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD
        #[arg(long)]
        end: String,
        #[arg(long)]
        reason: String,
    },
    Approve { index: usize },
    Deny { index: usize },
    /// Delete every leave request
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ReviewsCommand {
    List,
    Add(ReviewArgs),
}

#[derive(Args)]
struct ReviewArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    role: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    rating: String,
    #[arg(long)]
    attendance: String,
    #[arg(long)]
    feedback: String,
    #[arg(long)]
    date: String,
    #[arg(long)]
    reviewer: String,
}

impl From<ReviewArgs> for ReviewForm {
    fn from(args: ReviewArgs) -> Self {
        Self {
            name: args.name,
            role: args.role,
            department: args.department,
            performance_rating: args.rating,
            attendance: args.attendance,
            peer_feedback: args.feedback,
            review_date: args.date,
            reviewer: args.reviewer,
        }
    }
}

#[derive(Subcommand)]
enum PayrollCommand {
    /// Set the total to the sum of roster salaries
    Sync,
    /// Set the total explicitly
    Set { amount: f64 },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if let Some(path) = &cli.config {
        path.clone()
    } else if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let (config, missing) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, false),
        ConfigLoadResult::Missing => (AppConfig::default(), true),
        ConfigLoadResult::Invalid(e) => {
            bail!("Invalid config at {}: {}", config_path.display(), e);
        }
    };

    let _log_guard = app::logging::init(&config.logging);
    tracing::info!("HR Desk starting, config path: {:?}", config_path);
    if missing {
        tracing::info!("Config missing, using defaults");
    }

    let store = store::open(&config).context("Failed to open storage")?;
    let mut desk = Desk::open(store)?;

    run(&mut desk, cli.command)
}

fn run<S: Store>(desk: &mut Desk<S>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Employees(cmd) => employees(desk, cmd),
        Command::Attendance(cmd) => attendance(desk, cmd),
        Command::Leave(cmd) => leave(desk, cmd),
        Command::Reviews(cmd) => reviews(desk, cmd),
        Command::Payroll(PayrollCommand::Sync) => {
            let total = desk.sync_payroll()?;
            println!("Total payroll set to {total:.2}");
            Ok(())
        }
        Command::Payroll(PayrollCommand::Set { amount }) => {
            desk.set_total_payroll(amount)?;
            println!("Total payroll set to {amount:.2}");
            Ok(())
        }
        Command::Dashboard { json } => {
            let metrics = desk.recompute();
            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
                return Ok(());
            }
            println!("Employees:          {}", metrics.total_employees);
            println!("Attendance:         {:.1}%", metrics.overall_attendance_percent);
            println!("Total payroll:      {:.2}", metrics.total_payroll);
            println!(
                "Time off:           {} approved, {} denied, {} pending",
                metrics.time_off.approved, metrics.time_off.denied, metrics.time_off.pending
            );
            println!(
                "Categories:         {} full-time, {} part-time, {} contractors",
                metrics.employee_categories.full_time,
                metrics.employee_categories.part_time,
                metrics.employee_categories.contractors
            );
            Ok(())
        }
        Command::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(app::export::generate_export_filename("hr_desk")));
            app::export::export_workbook(desk.employees(), desk.attendance(), desk.leave(), &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
            Ok(())
        }
    }
}

fn employees<S: Store>(desk: &mut Desk<S>, cmd: EmployeesCommand) -> anyhow::Result<()> {
    match cmd {
        EmployeesCommand::List => {
            println!(
                "{:>4}  {:<24} {:<22} {:<14} {:<11} {:>12}  {}",
                "ID", "Name", "Position", "Department", "Type", "Salary", "Contact"
            );
            for e in desk.employees().list() {
                println!(
                    "{:>4}  {:<24} {:<22} {:<14} {:<11} {:>12.2}  {}",
                    e.employee_id,
                    e.name,
                    e.position,
                    e.department,
                    e.employment_type.as_str(),
                    e.salary,
                    e.contact
                );
            }
        }
        EmployeesCommand::Show { id } => {
            let Some(e) = desk.employees().get(id) else {
                bail!("No employee with ID {id}");
            };
            println!("{}", serde_json::to_string_pretty(e)?);
        }
        EmployeesCommand::Add(args) => {
            let record = desk.add_employee(&args.into())?;
            println!("Added employee {} ({})", record.employee_id, record.name);
        }
        EmployeesCommand::Edit { id, fields } => match desk.update_employee(id, &fields.into())? {
            Some(record) => println!("Updated employee {} ({})", record.employee_id, record.name),
            None => bail!("No employee with ID {id}"),
        },
        EmployeesCommand::Remove { id } => {
            if desk.remove_employee(id)? {
                println!("Removed employee {id}");
            } else {
                println!("No employee with ID {id}, nothing removed");
            }
        }
    }
    Ok(())
}

fn attendance<S: Store>(desk: &mut Desk<S>, cmd: AttendanceCommand) -> anyhow::Result<()> {
    match cmd {
        AttendanceCommand::List { name, department } => {
            let ledger = desk.attendance();
            let dates = ledger.date_range();

            print!("{:>4}  {:<24} {:<12}", "ID", "Name", "Department");
            for date in dates {
                print!(" {:<10}", date.format("%m-%d").to_string());
            }
            println!();

            for record in ledger.filter(&name, &DepartmentFilter::from_selector(&department)) {
                print!("{:>4}  {:<24} {:<12}", record.id, record.name, record.department);
                for date in dates {
                    print!(" {:<10}", AttendanceLedger::status_label(record, *date));
                }
                println!();
            }
        }
        AttendanceCommand::Summary => {
            println!(
                "{:>4}  {:<24} {:>7} {:>6} {:>4} {:>8}",
                "ID", "Name", "Present", "Absent", "Late", "On Leave"
            );
            for record in desk.attendance().records() {
                let s = AttendanceLedger::summarize(record);
                println!(
                    "{:>4}  {:<24} {:>7} {:>6} {:>4} {:>8}",
                    record.id, record.name, s.present, s.absent, s.late, s.on_leave
                );
            }
        }
        AttendanceCommand::SimulateDemo { seed, yes } => {
            if !yes {
                bail!("This overwrites all attendance records; pass --yes to continue");
            }
            let assigned = match seed {
                Some(seed) => desk.simulate_demo_attendance(&mut StdRng::seed_from_u64(seed))?,
                None => desk.simulate_demo_attendance(&mut rand::thread_rng())?,
            };
            println!("Assigned {assigned} random statuses");
        }
    }
    Ok(())
}

fn leave<S: Store>(desk: &mut Desk<S>, cmd: LeaveCommand) -> anyhow::Result<()> {
    match cmd {
        LeaveCommand::List => {
            let requests = desk.leave();
            for (index, request) in requests.requests().iter().enumerate() {
                let who = match requests.enrich(index, desk.employees()) {
                    Some(e) => format!("{} ({}, {})", request.employee_name, e.position, e.department),
                    None => request.employee_name.clone(),
                };
                println!(
                    "#{index:<3} {who:<48} {} to {}  {:<8} {}",
                    request.start_date,
                    request.end_date,
                    request.status.as_str(),
                    request.reason
                );
            }
        }
        LeaveCommand::Submit {
            employee,
            start,
            end,
            reason,
        } => {
            let request = desk.submit_leave(&LeaveForm {
                employee_name: employee,
                start_date: start,
                end_date: end,
                reason,
            })?;
            println!(
                "Submitted leave for {} from {} to {}",
                request.employee_name, request.start_date, request.end_date
            );
        }
        LeaveCommand::Approve { index } => {
            let request = desk.approve_leave(index)?;
            println!("Request #{index} for {} {}", request.employee_name, request.status);
        }
        LeaveCommand::Deny { index } => {
            let request = desk.deny_leave(index)?;
            println!("Request #{index} for {} {}", request.employee_name, request.status);
        }
        LeaveCommand::Clear { yes } => {
            if !yes {
                bail!("This deletes every leave request; pass --yes to continue");
            }
            let cleared = desk.clear_leave()?;
            println!("Cleared {cleared} leave requests");
        }
    }
    Ok(())
}

fn reviews<S: Store>(desk: &mut Desk<S>, cmd: ReviewsCommand) -> anyhow::Result<()> {
    match cmd {
        ReviewsCommand::List => {
            for r in desk.reviews().list() {
                println!(
                    "{:>3}  {:<24} {:<20} {:<12} {:<10} {:<6} {}  by {}",
                    r.id, r.name, r.role, r.department, r.performance_rating, r.attendance, r.review_date, r.reviewer
                );
            }
        }
        ReviewsCommand::Add(args) => {
            let review = desk.add_review(args.into())?;
            println!("Added review {} for {}", review.id, review.name);
        }
    }
    Ok(())
}
