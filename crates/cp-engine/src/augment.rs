//! Synthetic academic complaints for corpus bootstrapping. All rows are High.

use cp_core::{ComplaintRecord, Priority};
use rand::Rng;

const TEMPLATES: &[&str] = &[
    "My {item} marks are not updated.",
    "The {item} was not evaluated properly.",
    "Professor is not available during {time} hours.",
    "Syllabus for {subject} is incomplete.",
    "Unfair grading in the {exam} exam.",
    "Attendance shortage issue in {subject} class.",
    "Assignment deadline for {subject} is not communicated.",
    "Result for {exam} is delayed.",
    "Internal marks for {subject} are too low.",
    "Teacher is absent for two weeks.",
    "Project guide not assigned for {subject}.",
    "Revaluation for {exam} paper not done.",
    "Lab sessions for {subject} are not conducted.",
    "Lecture cancelled without notice.",
    "No professor assigned for {subject}.",
    "Unfair evaluation in {exam}.",
    "Subject change request not processed.",
    "Class timing for {subject} is not followed.",
    "Practical exam for {subject} not held.",
    "Grades not updated for {subject}.",
];

const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Computer Science",
    "Electronics",
    "English",
    "Mechanical Engineering",
    "Civil Engineering",
    "Biology",
    "Economics",
];
const ITEMS: &[&str] = &["internal", "external", "practical", "sessional", "midterm", "final"];
const TIMES: &[&str] = &["office", "evening", "morning"];
const EXAMS: &[&str] = &["midterm", "final", "sessional", "practical"];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Generate `count` filled-in templates labeled High.
pub fn augment_academic<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<ComplaintRecord> {
    (0..count)
        .map(|_| {
            let text = pick(rng, TEMPLATES)
                .replace("{item}", pick(rng, ITEMS))
                .replace("{subject}", pick(rng, SUBJECTS))
                .replace("{time}", pick(rng, TIMES))
                .replace("{exam}", pick(rng, EXAMS));
            ComplaintRecord::new(text, Priority::High)
        })
        .collect()
}
