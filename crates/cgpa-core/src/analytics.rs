//! Dashboard and chart figures derived from the aggregate record.
//!
//! Nothing here feeds back into the record; these are read-only views built
//! on top of the engine.

use serde::Serialize;

use crate::engine::{cumulative_gpa, round_to_hundredths};
use crate::model::{AggregateRecord, Semester};

/// Display tier for a GPA value, used to colour figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GpaBand {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    None,
}

impl GpaBand {
    /// Classify a GPA. Zero (no GPA-bearing credit yet) is `None`.
    pub fn of(gpa: f64) -> Self {
        match gpa {
            g if g >= 3.7 => GpaBand::APlus,
            g if g >= 3.3 => GpaBand::A,
            g if g >= 3.0 => GpaBand::AMinus,
            g if g >= 2.7 => GpaBand::BPlus,
            g if g >= 2.3 => GpaBand::B,
            g if g >= 2.0 => GpaBand::BMinus,
            g if g >= 1.7 => GpaBand::CPlus,
            g if g >= 1.3 => GpaBand::C,
            g if g >= 1.0 => GpaBand::CMinus,
            g if g > 0.0 => GpaBand::D,
            _ => GpaBand::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GpaBand::APlus => "A+",
            GpaBand::A => "A",
            GpaBand::AMinus => "A-",
            GpaBand::BPlus => "B+",
            GpaBand::B => "B",
            GpaBand::BMinus => "B-",
            GpaBand::CPlus => "C+",
            GpaBand::C => "C",
            GpaBand::CMinus => "C-",
            GpaBand::D => "D",
            GpaBand::None => "-",
        }
    }

    /// Hex colour used for charts.
    pub fn color(self) -> &'static str {
        match self {
            GpaBand::APlus => "#4CAF50",
            GpaBand::A => "#66BB6A",
            GpaBand::AMinus => "#81C784",
            GpaBand::BPlus => "#90CAF9",
            GpaBand::B => "#64B5F6",
            GpaBand::BMinus => "#42A5F5",
            GpaBand::CPlus => "#FFD54F",
            GpaBand::C => "#FFCA28",
            GpaBand::CMinus => "#FFC107",
            GpaBand::D => "#FFA726",
            GpaBand::None => "#EF5350",
        }
    }
}

/// Share of a 4.0 scale as a progress percentage, capped at 100.
pub fn progress_percent(gpa: f64) -> f64 {
    (gpa * 25.0).min(100.0)
}

/// One point on the semester-by-semester trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub name: String,
    /// That semester's GPA.
    pub gpa: f64,
    /// Cumulative GPA through this semester.
    pub cgpa: f64,
    pub credits: f64,
}

/// GPA and running CGPA per semester.
///
/// The running CGPA is recomputed from the courses of every semester up to
/// and including this one.
pub fn cgpa_trend(semesters: &[Semester]) -> Vec<TrendPoint> {
    semesters
        .iter()
        .enumerate()
        .map(|(i, semester)| TrendPoint {
            name: semester.name.clone(),
            gpa: semester.gpa,
            cgpa: cumulative_gpa(&semesters[..=i]),
            credits: semester.total_credits,
        })
        .collect()
}

/// One bar of the credit distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditBar {
    pub name: String,
    pub credits: f64,
    pub band: GpaBand,
}

/// GPA-bearing credits per semester, coloured by that semester's GPA.
pub fn credit_distribution(semesters: &[Semester]) -> Vec<CreditBar> {
    semesters
        .iter()
        .map(|s| CreditBar {
            name: s.name.clone(),
            credits: s.total_credits,
            band: GpaBand::of(s.gpa),
        })
        .collect()
}

/// Headline dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub cgpa: f64,
    pub total_credits: f64,
    pub semester_count: usize,
    pub course_count: usize,
    /// Credit hours attempted in courses graded F.
    pub failed_credits: f64,
    /// Name of the semester with the highest GPA, first one on ties.
    pub best_semester: Option<String>,
    pub band: GpaBand,
    pub progress_percent: f64,
}

impl Summary {
    pub fn of(record: &AggregateRecord) -> Self {
        let failed_credits = record
            .semesters
            .iter()
            .flat_map(|s| s.courses.iter())
            .filter(|c| !c.grade.is_passing())
            .map(|c| c.credit_hours)
            .sum();

        let best_semester = record
            .semesters
            .iter()
            .filter(|s| !s.courses.is_empty())
            .fold(None::<&Semester>, |best, s| match best {
                Some(b) if b.gpa >= s.gpa => Some(b),
                _ => Some(s),
            })
            .map(|s| s.name.clone());

        Self {
            cgpa: record.cgpa,
            total_credits: record.total_credits,
            semester_count: record.semesters.len(),
            course_count: record.course_count(),
            failed_credits,
            best_semester,
            band: GpaBand::of(record.cgpa),
            progress_percent: round_to_hundredths(progress_percent(record.cgpa)),
        }
    }
}
