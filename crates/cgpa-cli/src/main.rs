//! cgpa CLI — record semesters and grades, view GPA and CGPA.

use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, Subcommand};

use cgpa_core::grade::Grade;
use cgpa_core::stepper::StepDirection;

mod commands;

#[derive(Parser)]
#[command(name = "cgpa", version, about = "Semester GPA and CGPA tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gradebook data file (overrides config and CGPA_DATA_FILE)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter cgpa.toml
    Init,

    /// Add a new semester
    AddSemester {
        /// Semester name, e.g. "Fall 2024"
        name: String,
    },

    /// Remove a semester and all of its courses
    RemoveSemester {
        /// Semester id or name
        semester: String,
    },

    /// Add a course to a semester
    AddCourse {
        /// Semester id or name
        #[arg(long)]
        semester: String,

        /// Course name (taken from the catalog when --code is given)
        #[arg(long)]
        name: Option<String>,

        /// Credit hours (default: catalog value, else 3)
        #[arg(long)]
        credits: Option<f64>,

        /// Letter grade, e.g. "A-" (default from config)
        #[arg(long)]
        grade: Option<Grade>,

        /// Catalog course code, e.g. "CS301"
        #[arg(long)]
        code: Option<String>,
    },

    /// Edit a course's name, credits or grade
    UpdateCourse {
        /// Semester id or name
        #[arg(long)]
        semester: String,

        /// Course id
        #[arg(long)]
        course: String,

        /// New course name
        #[arg(long)]
        name: Option<String>,

        /// New credit hours
        #[arg(long)]
        credits: Option<f64>,

        /// New letter grade
        #[arg(long)]
        grade: Option<Grade>,
    },

    /// Remove a course from a semester
    RemoveCourse {
        /// Semester id or name
        #[arg(long)]
        semester: String,

        /// Course id
        #[arg(long)]
        course: String,
    },

    /// List semesters, or the courses of one semester
    Show {
        /// Semester id or name
        semester: Option<String>,
    },

    /// Show CGPA, credits and other headline figures
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show GPA and running CGPA per semester
    Trend,

    /// List or search the built-in course catalog
    Catalog {
        /// Filter by code or name
        query: Option<String>,
    },

    /// Convert between letter grades and grade points
    #[command(group(ArgGroup::new("input").required(true).args(["grade", "point"])))]
    Convert {
        /// Letter grade to convert to points
        #[arg(long)]
        grade: Option<Grade>,

        /// Grade point to convert to a letter grade (clamped to 0.0-4.0)
        #[arg(long, allow_negative_numbers = true)]
        point: Option<f64>,
    },

    /// Move a GPA value one step up or down the step table
    Step {
        /// Current GPA
        #[arg(allow_negative_numbers = true)]
        gpa: f64,

        /// Direction: up or down
        direction: StepDirection,
    },

    /// Export the gradebook as HTML, Markdown or JSON
    Export {
        /// Output format: html, markdown, json
        #[arg(long, default_value = "html")]
        format: String,

        /// Output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Delete every semester and course
    Reset,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cgpa=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = commands::Paths {
        config: cli.config,
        data: cli.data,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::AddSemester { name } => commands::semester::add(&paths, &name),
        Commands::RemoveSemester { semester } => commands::semester::remove(&paths, &semester),
        Commands::AddCourse {
            semester,
            name,
            credits,
            grade,
            code,
        } => commands::course::add(&paths, &semester, name, credits, grade, code),
        Commands::UpdateCourse {
            semester,
            course,
            name,
            credits,
            grade,
        } => commands::course::update(&paths, &semester, &course, name, credits, grade),
        Commands::RemoveCourse { semester, course } => {
            commands::course::remove(&paths, &semester, &course)
        }
        Commands::Show { semester } => commands::show::execute(&paths, semester.as_deref()),
        Commands::Summary { json } => commands::summary::execute(&paths, json),
        Commands::Trend => commands::summary::trend(&paths),
        Commands::Catalog { query } => commands::catalog::execute(query.as_deref()),
        Commands::Convert { grade, point } => commands::convert::execute(grade, point),
        Commands::Step { gpa, direction } => commands::convert::step(gpa, direction),
        Commands::Export { format, output } => commands::export::execute(&paths, &format, output),
        Commands::Reset => commands::semester::reset(&paths),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
