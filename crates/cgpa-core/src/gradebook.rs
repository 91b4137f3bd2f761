//! The gradebook state store.
//!
//! Owns the caller's [`AggregateRecord`] and applies add/update/remove
//! mutations to it. Each successful mutation ends in a full
//! [`recompute_aggregate`], so derived figures can never drift from the
//! course set. A rejected mutation leaves the record untouched.

use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::recompute_aggregate;
use crate::error::GradebookError;
use crate::model::{AggregateRecord, Course, CourseUpdate, NewCourse, Semester};
use crate::validation::{validate_course, validate_semester_name, CreditPolicy};

/// Mutable owner of one student's record.
#[derive(Debug, Clone, Default)]
pub struct Gradebook {
    record: AggregateRecord,
    policy: CreditPolicy,
}

impl Gradebook {
    /// An empty gradebook with the default credit policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing record. Derived fields are recomputed on the way in.
    pub fn from_record(record: AggregateRecord) -> Self {
        Self {
            record: recompute_aggregate(record.semesters),
            policy: CreditPolicy::default(),
        }
    }

    /// Replace the credit-hour policy applied to new and edited courses.
    pub fn with_policy(mut self, policy: CreditPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &CreditPolicy {
        &self.policy
    }

    /// The current record.
    pub fn record(&self) -> &AggregateRecord {
        &self.record
    }

    pub fn into_record(self) -> AggregateRecord {
        self.record
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.record.semesters
    }

    /// Look up a semester by identifier.
    pub fn semester(&self, semester_id: &str) -> Option<&Semester> {
        self.record.semesters.iter().find(|s| s.id == semester_id)
    }

    /// Resolve a user-supplied selector: exact id first, then the first
    /// semester whose name matches case-insensitively.
    pub fn find_semester(&self, selector: &str) -> Option<&Semester> {
        let selector = selector.trim();
        self.semester(selector).or_else(|| {
            self.record
                .semesters
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(selector))
        })
    }

    /// Append a new, empty semester.
    pub fn add_semester(&mut self, name: &str) -> Result<&Semester, GradebookError> {
        validate_semester_name(name)?;

        let semester = Semester::new(Uuid::new_v4().to_string(), name.trim());
        let id = semester.id.clone();
        info!(semester_id = %id, name = %semester.name, "adding semester");

        let mut semesters = std::mem::take(&mut self.record.semesters);
        semesters.push(semester);
        self.commit(semesters);

        self.semester(&id)
            .ok_or(GradebookError::SemesterNotFound(id))
    }

    /// Add a course to a semester after validating it.
    pub fn add_course(
        &mut self,
        semester_id: &str,
        course: NewCourse,
    ) -> Result<&Course, GradebookError> {
        let index = self.semester_index(semester_id)?;

        let course = trim_name(course.with_id(Uuid::new_v4().to_string()));
        validate_course(&course, &self.policy)?;
        let course_id = course.id.clone();
        info!(
            semester_id,
            course_id = %course_id,
            grade = %course.grade,
            credit_hours = course.credit_hours,
            "adding course"
        );

        let mut semesters = std::mem::take(&mut self.record.semesters);
        semesters[index].courses.push(course);
        self.commit(semesters);

        self.course(semester_id, &course_id)
    }

    /// Merge a partial update into an existing course. The merged course is
    /// validated as a whole.
    pub fn update_course(
        &mut self,
        semester_id: &str,
        course_id: &str,
        update: CourseUpdate,
    ) -> Result<&Course, GradebookError> {
        let (semester_index, course_index) = self.course_index(semester_id, course_id)?;

        let current = &self.record.semesters[semester_index].courses[course_index];
        let updated = trim_name(update.apply_to(current));
        validate_course(&updated, &self.policy)?;
        debug!(semester_id, course_id, ?update, "updating course");

        let mut semesters = std::mem::take(&mut self.record.semesters);
        semesters[semester_index].courses[course_index] = updated;
        self.commit(semesters);

        self.course(semester_id, course_id)
    }

    /// Remove a course, returning it.
    pub fn remove_course(
        &mut self,
        semester_id: &str,
        course_id: &str,
    ) -> Result<Course, GradebookError> {
        let (semester_index, course_index) = self.course_index(semester_id, course_id)?;
        info!(semester_id, course_id, "removing course");

        let mut semesters = std::mem::take(&mut self.record.semesters);
        let removed = semesters[semester_index].courses.remove(course_index);
        self.commit(semesters);

        Ok(removed)
    }

    /// Remove a semester and every course in it, returning the semester.
    pub fn remove_semester(&mut self, semester_id: &str) -> Result<Semester, GradebookError> {
        let index = self.semester_index(semester_id)?;

        let mut semesters = std::mem::take(&mut self.record.semesters);
        let removed = semesters.remove(index);
        info!(
            semester_id,
            name = %removed.name,
            courses = removed.courses.len(),
            "removing semester"
        );
        self.commit(semesters);

        Ok(removed)
    }

    /// Drop every semester.
    pub fn reset(&mut self) {
        info!(semesters = self.record.semesters.len(), "resetting gradebook");
        self.record = AggregateRecord::default();
    }

    fn commit(&mut self, semesters: Vec<Semester>) {
        self.record = recompute_aggregate(semesters);
        debug!(
            cgpa = self.record.cgpa,
            total_credits = self.record.total_credits,
            "record recomputed"
        );
    }

    fn course(&self, semester_id: &str, course_id: &str) -> Result<&Course, GradebookError> {
        let (semester_index, course_index) = self.course_index(semester_id, course_id)?;
        Ok(&self.record.semesters[semester_index].courses[course_index])
    }

    fn semester_index(&self, semester_id: &str) -> Result<usize, GradebookError> {
        self.record
            .semesters
            .iter()
            .position(|s| s.id == semester_id)
            .ok_or_else(|| GradebookError::SemesterNotFound(semester_id.to_string()))
    }

    fn course_index(
        &self,
        semester_id: &str,
        course_id: &str,
    ) -> Result<(usize, usize), GradebookError> {
        let semester_index = self.semester_index(semester_id)?;
        let course_index = self.record.semesters[semester_index]
            .courses
            .iter()
            .position(|c| c.id == course_id)
            .ok_or_else(|| GradebookError::CourseNotFound {
                semester_id: semester_id.to_string(),
                course_id: course_id.to_string(),
            })?;
        Ok((semester_index, course_index))
    }
}

fn trim_name(mut course: Course) -> Course {
    let trimmed = course.name.trim();
    if trimmed.len() != course.name.len() {
        course.name = trimmed.to_string();
    }
    course
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;

    fn with_semester() -> (Gradebook, String) {
        let mut book = Gradebook::new();
        let id = book.add_semester("Fall 2024").unwrap().id.clone();
        (book, id)
    }

    #[test]
    fn add_semester_starts_empty() {
        let (book, id) = with_semester();
        let semester = book.semester(&id).unwrap();
        assert_eq!(semester.name, "Fall 2024");
        assert!(semester.courses.is_empty());
        assert_eq!(semester.gpa, 0.0);
        assert_eq!(book.record().cgpa, 0.0);
    }

    #[test]
    fn semester_ids_are_unique() {
        let mut book = Gradebook::new();
        let a = book.add_semester("One").unwrap().id.clone();
        let b = book.add_semester("One").unwrap().id.clone();
        assert_ne!(a, b);
        assert_eq!(book.semesters().len(), 2);
    }

    #[test]
    fn blank_semester_rejected() {
        let mut book = Gradebook::new();
        assert!(matches!(
            book.add_semester("   "),
            Err(GradebookError::InvalidSemester(_))
        ));
        assert!(book.semesters().is_empty());
    }

    #[test]
    fn add_course_recomputes_everything() {
        let (mut book, id) = with_semester();
        book.add_course(&id, NewCourse::new("Calculus I", 3.0, Grade::APlus))
            .unwrap();
        book.add_course(&id, NewCourse::new("Physics I", 3.0, Grade::B))
            .unwrap();

        let semester = book.semester(&id).unwrap();
        assert_eq!(semester.gpa, 3.5);
        assert_eq!(semester.total_credits, 6.0);
        assert_eq!(book.record().cgpa, 3.5);
        assert_eq!(book.record().total_credits, 6.0);
    }

    #[test]
    fn course_names_are_trimmed() {
        let (mut book, id) = with_semester();
        let course_id = book
            .add_course(&id, NewCourse::new("  Linear Algebra\t", 3.0, Grade::B))
            .unwrap()
            .id
            .clone();
        assert_eq!(book.semester(&id).unwrap().courses[0].name, "Linear Algebra");

        let update = CourseUpdate {
            name: Some(" Discrete Mathematics ".into()),
            ..Default::default()
        };
        let course = book.update_course(&id, &course_id, update).unwrap();
        assert_eq!(course.name, "Discrete Mathematics");
    }

    #[test]
    fn invalid_course_leaves_record_untouched() {
        let (mut book, id) = with_semester();
        book.add_course(&id, NewCourse::new("Statistics", 3.0, Grade::A))
            .unwrap();
        let before = book.record().clone();

        let err = book
            .add_course(&id, NewCourse::new("Too Heavy", 12.0, Grade::A))
            .unwrap_err();
        assert!(matches!(err, GradebookError::InvalidCourse(_)));
        assert_eq!(book.record(), &before);
    }

    #[test]
    fn add_course_to_missing_semester() {
        let mut book = Gradebook::new();
        let err = book
            .add_course("nope", NewCourse::new("Ethics", 3.0, Grade::A))
            .unwrap_err();
        assert_eq!(err, GradebookError::SemesterNotFound("nope".into()));
    }

    #[test]
    fn update_course_grade() {
        let (mut book, id) = with_semester();
        let course_id = book
            .add_course(&id, NewCourse::new("Algorithms", 4.0, Grade::F))
            .unwrap()
            .id
            .clone();
        assert_eq!(book.record().total_credits, 0.0);

        let update = CourseUpdate {
            grade: Some(Grade::BPlus),
            ..Default::default()
        };
        let course = book.update_course(&id, &course_id, update).unwrap();
        assert_eq!(course.grade, Grade::BPlus);
        assert_eq!(book.record().cgpa, 3.25);
        assert_eq!(book.record().total_credits, 4.0);
    }

    #[test]
    fn update_rejects_blank_name() {
        let (mut book, id) = with_semester();
        let course_id = book
            .add_course(&id, NewCourse::new("Algorithms", 4.0, Grade::A))
            .unwrap()
            .id
            .clone();
        let update = CourseUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(book.update_course(&id, &course_id, update).is_err());
        assert_eq!(book.semester(&id).unwrap().courses[0].name, "Algorithms");
    }

    #[test]
    fn update_missing_course() {
        let (mut book, id) = with_semester();
        let err = book
            .update_course(&id, "ghost", CourseUpdate::default())
            .unwrap_err();
        assert!(matches!(err, GradebookError::CourseNotFound { .. }));
    }

    #[test]
    fn remove_course_recomputes() {
        let (mut book, id) = with_semester();
        book.add_course(&id, NewCourse::new("Databases", 3.0, Grade::A))
            .unwrap();
        let weak = book
            .add_course(&id, NewCourse::new("Networks", 3.0, Grade::D))
            .unwrap()
            .id
            .clone();
        assert_eq!(book.record().cgpa, 2.38);

        let removed = book.remove_course(&id, &weak).unwrap();
        assert_eq!(removed.name, "Networks");
        assert_eq!(book.record().cgpa, 3.75);
        assert_eq!(book.record().total_credits, 3.0);
    }

    #[test]
    fn remove_semester_cascades() {
        let (mut book, id) = with_semester();
        book.add_course(&id, NewCourse::new("Databases", 3.0, Grade::A))
            .unwrap();
        let other = book.add_semester("Spring 2025").unwrap().id.clone();
        book.add_course(&other, NewCourse::new("Graphics", 4.0, Grade::C))
            .unwrap();

        let removed = book.remove_semester(&id).unwrap();
        assert_eq!(removed.courses.len(), 1);
        assert_eq!(book.semesters().len(), 1);
        assert_eq!(book.record().cgpa, 2.25);
        assert_eq!(book.record().course_count(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let (mut book, id) = with_semester();
        book.add_course(&id, NewCourse::new("Databases", 3.0, Grade::A))
            .unwrap();
        book.reset();
        assert_eq!(book.record(), &AggregateRecord::default());
    }

    #[test]
    fn find_semester_by_id_or_name() {
        let (book, id) = with_semester();
        assert_eq!(book.find_semester(&id).unwrap().id, id);
        assert_eq!(book.find_semester("fall 2024").unwrap().id, id);
        assert!(book.find_semester("Winter").is_none());
    }

    #[test]
    fn from_record_repairs_derived_fields() {
        let mut semester = Semester::new("s1", "Fall");
        semester
            .courses
            .push(NewCourse::new("Ethics", 3.0, Grade::A).with_id("c1"));
        let record = AggregateRecord {
            semesters: vec![semester],
            cgpa: 1.0,
            total_credits: 42.0,
        };

        let book = Gradebook::from_record(record);
        assert_eq!(book.record().cgpa, 3.75);
        assert_eq!(book.record().total_credits, 3.0);
        assert_eq!(book.semesters()[0].gpa, 3.75);
    }

    #[test]
    fn custom_policy_allows_half_credits() {
        let mut book = Gradebook::new().with_policy(CreditPolicy::new(0.5, 6.0));
        let id = book.add_semester("Summer").unwrap().id.clone();
        assert!(book
            .add_course(&id, NewCourse::new("Lab", 0.5, Grade::A))
            .is_ok());
    }
}
