//! The `cgpa add-semester`, `cgpa remove-semester` and `cgpa reset` commands.

use anyhow::Result;

use super::{fmt_gpa, Paths, Session};

pub fn add(paths: &Paths, name: &str) -> Result<()> {
    let mut session = Session::open(paths)?;
    let semester = session.book.add_semester(name)?;
    println!("Semester \"{}\" added (id: {})", semester.name, semester.id);
    session.save();
    Ok(())
}

pub fn remove(paths: &Paths, selector: &str) -> Result<()> {
    let mut session = Session::open(paths)?;
    let id = session.semester_id(selector)?;
    let removed = session.book.remove_semester(&id)?;
    println!(
        "Semester \"{}\" removed ({} course(s))",
        removed.name,
        removed.courses.len()
    );
    println!(
        "CGPA: {} | Credits: {}",
        fmt_gpa(session.book.record().cgpa),
        session.book.record().total_credits
    );
    session.save();
    Ok(())
}

pub fn reset(paths: &Paths) -> Result<()> {
    let mut session = Session::open(paths)?;
    session.book.reset();
    session.save();
    println!("All data has been reset");
    Ok(())
}
