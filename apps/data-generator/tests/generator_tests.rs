use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashSet;

use student_data_generator::common::whole_months_between;
use student_data_generator::data_generator::{
    academic_standing_for, country_code_for, generate_students, phone_start_digits_for,
    StudentRecord,
};
use student_data_generator::output::{resolve_output_path, write_csv};

const SEED: u64 = 20_240_613;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

fn sample_table(row_count: i64) -> Vec<StudentRecord> {
    generate_students(row_count, SEED, today()).expect("generation should succeed")
}

#[test]
fn student_ids_are_unique_and_sequential() {
    let records = sample_table(100);
    assert_eq!(records.len(), 100);
    let ids: HashSet<&str> = records.iter().map(|r| r.student_id.as_str()).collect();
    assert_eq!(ids.len(), records.len(), "student IDs should be unique");
    for (index, record) in records.iter().enumerate() {
        assert_eq!(record.student_id, format!("STU{:06}", index));
    }
}

#[test]
fn row_count_matches_request() {
    let records = sample_table(50);
    assert_eq!(records.len(), 50, "row count does not match the input");
}

#[test]
fn email_is_lowercased_name_at_university_domain() {
    for record in sample_table(100) {
        let expected = format!(
            "{}.{}@university.edu.co",
            record.first_name.to_lowercase(),
            record.last_name.to_lowercase()
        );
        assert_eq!(record.email, expected);
    }
}

#[test]
fn academic_standing_follows_gpa_brackets() {
    for record in sample_table(100) {
        let expected = if record.gpa >= 4.5 {
            "Excellent"
        } else if record.gpa >= 4.0 {
            "Good"
        } else if record.gpa >= 3.0 {
            "Average"
        } else {
            "Poor"
        };
        assert_eq!(record.academic_standing, expected);
        assert_eq!(record.academic_standing, academic_standing_for(record.gpa));
    }
}

#[test]
fn scholarship_requires_excellent_gpa() {
    for record in sample_table(100) {
        assert_eq!(record.scholarship, record.gpa >= 4.5);
    }
}

#[test]
fn identification_number_has_8_to_10_digits() {
    for record in sample_table(100) {
        let digits = record.identification_number.to_string().len();
        assert!(
            (8..=10).contains(&digits),
            "identification number {} should be 8 to 10 digits",
            record.identification_number
        );
    }
}

#[test]
fn phone_number_and_country_code_match_nationality() {
    for record in sample_table(200) {
        assert_eq!(record.phone_number.len(), 10, "phone number should be 10 digits");
        assert!(
            record.phone_number.chars().all(|c| c.is_ascii_digit()),
            "phone number should contain only digits"
        );

        let expected_code = country_code_for(record.nationality)
            .unwrap_or_else(|| panic!("unknown nationality {}", record.nationality));
        assert_eq!(record.country_code, expected_code);

        let allowed_starts = phone_start_digits_for(record.nationality).unwrap();
        let first = record.phone_number.chars().next().unwrap();
        assert!(
            allowed_starts.contains(&first),
            "{} phone numbers should start with one of {:?}, got {}",
            record.nationality,
            allowed_starts,
            first
        );
    }
}

#[test]
fn venezuela_rows_use_plus58_and_leading_4() {
    let records = sample_table(2000);
    let venezuelan: Vec<_> = records
        .iter()
        .filter(|r| r.nationality == "Venezuela")
        .collect();
    assert!(!venezuelan.is_empty(), "expected some Venezuelan rows at n=2000");
    for record in venezuelan {
        assert_eq!(record.country_code, "+58");
        assert!(record.phone_number.starts_with('4'));
    }
}

#[test]
fn student_status_mirrors_state_program() {
    for record in sample_table(100) {
        if record.state_program == "Enrolled" {
            assert_eq!(record.student_status, "Active");
        } else {
            assert_eq!(record.student_status, "Inactive");
        }
    }
}

#[test]
fn gender_distribution_is_plausible() {
    let records = sample_table(100);
    let male = records.iter().filter(|r| r.gender == "Male").count();
    let female = records.iter().filter(|r| r.gender == "Female").count();
    let other = records.iter().filter(|r| r.gender == "Other").count();
    assert!(male > 0 && male < 100, "there should be some male students");
    assert!(female > 0 && female < 100, "there should be some female students");
    assert!(other <= 30, "'Other' should stay a small minority");
    assert_eq!(male + female + other, 100);
}

#[test]
fn type_id_number_tracks_age_bracket() {
    let reference = today();
    for record in sample_table(200) {
        let age = reference.year() - record.date_of_birth.year();
        if (16..=17).contains(&age) {
            assert_eq!(record.type_id_number, "TI");
        } else {
            assert_eq!(record.type_id_number, "CC");
        }
    }
}

#[test]
fn nationality_is_mostly_colombian() {
    let records = sample_table(100);
    let colombian = records.iter().filter(|r| r.nationality == "Colombia").count();
    assert!(
        colombian >= 70,
        "at least 70% of students should be Colombian, got {colombian}"
    );
}

#[test]
fn gpa_stays_in_clipped_range() {
    for record in sample_table(500) {
        assert!(
            (2.0..=5.0).contains(&record.gpa),
            "GPA {} out of range",
            record.gpa
        );
    }
}

#[test]
fn course_load_stays_in_range() {
    for record in sample_table(100) {
        assert!((15..=20).contains(&record.course_load));
    }
}

#[test]
fn payment_status_uses_known_values() {
    let valid = ["Paid", "Pending", "Late"];
    for record in sample_table(100) {
        assert!(valid.contains(&record.payment_status));
    }
}

#[test]
fn marital_status_uses_known_values() {
    let valid = ["Single", "Married", "Divorced"];
    for record in sample_table(100) {
        assert!(valid.contains(&record.marital_status));
    }
}

#[test]
fn credit_totals_stay_consistent() {
    for record in sample_table(500) {
        assert!((140..=180).contains(&record.total_credits_required));
        assert!(record.credits_approved <= record.total_credits_required);
        let cap = (record.current_semester * 18 + 18).min(record.total_credits_required);
        assert!(
            record.credits_approved <= cap,
            "credits {} above cap {} for semester {}",
            record.credits_approved,
            cap,
            record.current_semester
        );
        assert_eq!(
            record.credits_remaining,
            record.total_credits_required - record.credits_approved
        );
    }
}

#[test]
fn advisor_id_is_adv_plus_four_digits() {
    for record in sample_table(100) {
        assert!(record.advisor_id.starts_with("ADV"));
        assert_eq!(record.advisor_id.len(), 7);
        let number: u32 = record.advisor_id[3..]
            .parse()
            .expect("advisor ID should end in 4 digits");
        assert!((1..=49).contains(&number));
    }
}

#[test]
fn advisor_name_is_not_empty() {
    for record in sample_table(100) {
        assert!(!record.advisor_name.is_empty());
    }
}

#[test]
fn enrollment_date_is_within_last_four_years() {
    let reference = today();
    let earliest = reference.checked_sub_months(Months::new(48)).unwrap();
    for record in sample_table(200) {
        assert!(record.enrollment_date >= earliest);
        assert!(record.enrollment_date <= reference);
    }
}

#[test]
fn current_semester_derives_from_enrollment_date() {
    let reference = today();
    for record in sample_table(200) {
        let months = whole_months_between(record.enrollment_date, reference);
        let expected = (months / 6 + 1).clamp(1, 10) as u32;
        assert_eq!(record.current_semester, expected);
        assert!((1..=10).contains(&record.current_semester));
    }
}

#[test]
fn library_books_are_non_negative_and_bounded_sane() {
    let records = sample_table(500);
    let max = records
        .iter()
        .map(|r| r.library_books_borrowed)
        .max()
        .unwrap();
    // Poisson(3) mass above 20 is negligible
    assert!(max < 25, "unexpectedly large book count {max}");
}

#[test]
fn addresses_are_newline_free() {
    for record in sample_table(100) {
        assert!(!record.address.contains('\n'));
        assert!(!record.address.is_empty());
    }
}

#[test]
fn non_positive_row_count_is_rejected() {
    let error = generate_students(0, SEED, today()).unwrap_err();
    assert!(error.to_string().contains("positive"));
    assert!(generate_students(-1, SEED, today()).is_err());
}

#[test]
fn csv_output_is_fully_quoted_with_expected_header() {
    let records = sample_table(5);
    let dir = std::env::temp_dir().join("student-data-generator-test");
    let path = resolve_output_path(Some(dir.join("nested").join("data.csv")))
        .expect("parent directories should be created");
    write_csv(&records, &path).expect("csv write should succeed");

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    let header = lines.next().unwrap();
    let expected_header = [
        "student_id",
        "first_name",
        "last_name",
        "gender",
        "date_of_birth",
        "type_id_number",
        "identification_number",
        "email",
        "address",
        "nationality",
        "country_code",
        "phone_number",
        "program",
        "enrollment_date",
        "current_semester",
        "Number_of_credits_approved",
        "credits_remaining",
        "GPA",
        "academic_standing",
        "scholarship",
        "course_load",
        "marital_status",
        "state_program",
        "student_status",
        "advisor_id",
        "advisor_name",
        "payment_status",
        "library_books_borrowed",
    ]
    .map(|name| format!("\"{name}\""))
    .join(",");
    assert_eq!(header, expected_header);

    let data_lines: Vec<&str> = lines.collect();
    assert_eq!(data_lines.len(), 5);
    for line in data_lines {
        assert!(line.starts_with('"') && line.ends_with('"'));
    }

    std::fs::remove_dir_all(&dir).ok();
}
