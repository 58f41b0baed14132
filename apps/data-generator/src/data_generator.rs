use anyhow::{bail, Result};
use chrono::{Datelike, Duration, Months, NaiveDate};
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, StreetSuffix, ZipCode};
use fake::faker::name::en::{LastName, Name};
use fake::Fake;
use log::debug;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Cauchy, Distribution, Normal, Poisson};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::common::{
    generate_date_between_with_rng, generate_from_options_with_rng, generate_prefixed_id_with_rng,
    generate_weighted_with_rng, whole_months_between,
};

const MIN_AGE: u32 = 16;
const MAX_AGE: u32 = 25;
const ENROLLMENT_WINDOW_YEARS: u32 = 4;
const MAX_SEMESTER: i32 = 10;
const CREDITS_PER_SEMESTER: u32 = 18;

const GENDER_WEIGHTS: &[(&str, f64)] = &[("Male", 0.45), ("Female", 0.45), ("Other", 0.10)];

const MARITAL_STATUS_WEIGHTS: &[(&str, f64)] =
    &[("Single", 0.90), ("Married", 0.08), ("Divorced", 0.02)];

const STATE_PROGRAM_WEIGHTS: &[(&str, f64)] =
    &[("Enrolled", 0.70), ("Suspended", 0.15), ("Withdrawn", 0.15)];

// Mostly Colombian student body, remaining mass split evenly
const NATIONALITY_WEIGHTS: &[(&str, f64)] = &[
    ("Colombia", 80.0),
    ("USA", 2.0),
    ("Brazil", 2.0),
    ("Argentina", 2.0),
    ("Spain", 2.0),
    ("Mexico", 2.0),
    ("Peru", 2.0),
    ("Chile", 2.0),
    ("Ecuador", 2.0),
    ("Venezuela", 2.0),
];

const PAYMENT_STATUS_OPTIONS: [&str; 3] = ["Paid", "Pending", "Late"];

const PROGRAMS: [&str; 33] = [
    "Computer Science",
    "Software Engineering",
    "Information Technology",
    "Data Science",
    "Cybersecurity",
    "Artificial Intelligence",
    "Engineering",
    "Mechanical Engineering",
    "Electrical Engineering",
    "Civil Engineering",
    "Industrial Engineering",
    "Biology",
    "Chemistry",
    "Biotechnology",
    "Medicine",
    "Nursing",
    "Pharmacy",
    "Psychology",
    "Sociology",
    "Anthropology",
    "Political Science",
    "Philosophy",
    "History",
    "Business Administration",
    "Marketing",
    "Accounting",
    "Economics",
    "Finance",
    "Entrepreneurship",
    "Graphic Design",
    "Architecture",
    "Music",
    "International Relations",
];

// Three disjoint first-name pools, selected by the drawn gender
pub const FIRST_NAMES_MALE: [&str; 36] = [
    "Andres", "Camilo", "Carlos", "Cristian", "Daniel", "David", "Diego", "Eduardo", "Esteban",
    "Felipe", "Fernando", "Gabriel", "German", "Gustavo", "Hector", "Ivan", "Jaime", "Javier",
    "Jorge", "Jose", "Juan", "Julian", "Leonardo", "Luis", "Manuel", "Mario", "Mateo", "Mauricio",
    "Miguel", "Nicolas", "Oscar", "Pablo", "Ricardo", "Santiago", "Sebastian", "Sergio",
];

pub const FIRST_NAMES_FEMALE: [&str; 36] = [
    "Adriana", "Alejandra", "Ana", "Andrea", "Angela", "Camila", "Carolina", "Catalina", "Claudia",
    "Daniela", "Diana", "Gabriela", "Isabella", "Johanna", "Juliana", "Laura", "Liliana", "Lina",
    "Lucia", "Luisa", "Manuela", "Marcela", "Margarita", "Maria", "Mariana", "Monica", "Natalia",
    "Paola", "Patricia", "Paula", "Sandra", "Sara", "Sofia", "Valentina", "Valeria", "Veronica",
];

pub const FIRST_NAMES_NEUTRAL: [&str; 12] = [
    "Alex", "Ariel", "Cameron", "Casey", "Dakota", "Jordan", "Morgan", "Quinn", "Reese", "Riley",
    "Sam", "Taylor",
];

static COUNTRY_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Colombia", "+57"),
        ("USA", "+1"),
        ("Brazil", "+55"),
        ("Argentina", "+54"),
        ("Spain", "+34"),
        ("Mexico", "+52"),
        ("Peru", "+51"),
        ("Chile", "+56"),
        ("Ecuador", "+593"),
        ("Venezuela", "+58"),
    ])
});

static PHONE_START_DIGITS: Lazy<HashMap<&'static str, &'static [char]>> = Lazy::new(|| {
    HashMap::from([
        ("Colombia", &['3'] as &[char]),
        ("USA", &['2', '3', '4', '5', '6', '7', '8', '9']),
        ("Brazil", &['9']),
        ("Argentina", &['9']),
        ("Spain", &['6', '7']),
        ("Mexico", &['2', '3', '4', '5', '6', '7', '8', '9']),
        ("Peru", &['9']),
        ("Chile", &['9']),
        ("Ecuador", &['9']),
        ("Venezuela", &['4']),
    ])
});

/// One row of the generated table. Field order is the CSV column order;
/// `total_credits_required` is internal to the credit derivation and never written.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: &'static str,
    pub date_of_birth: NaiveDate,
    pub type_id_number: &'static str,
    pub identification_number: i64,
    pub email: String,
    pub address: String,
    pub nationality: &'static str,
    pub country_code: &'static str,
    pub phone_number: String,
    pub program: &'static str,
    pub enrollment_date: NaiveDate,
    pub current_semester: u32,
    #[serde(skip_serializing)]
    pub total_credits_required: u32,
    #[serde(rename = "Number_of_credits_approved")]
    pub credits_approved: u32,
    pub credits_remaining: u32,
    #[serde(rename = "GPA")]
    pub gpa: f64,
    pub academic_standing: &'static str,
    pub scholarship: bool,
    pub course_load: u32,
    pub marital_status: &'static str,
    pub state_program: &'static str,
    pub student_status: &'static str,
    pub advisor_id: String,
    pub advisor_name: String,
    pub payment_status: &'static str,
    pub library_books_borrowed: u32,
}

/// International dialing prefix for a nationality in the generated set
pub fn country_code_for(nationality: &str) -> Option<&'static str> {
    COUNTRY_CODES.get(nationality).copied()
}

/// Allowed leading phone digits for a nationality in the generated set
pub fn phone_start_digits_for(nationality: &str) -> Option<&'static [char]> {
    PHONE_START_DIGITS.get(nationality).copied()
}

/// Academic standing bracket for a GPA
pub fn academic_standing_for(gpa: f64) -> &'static str {
    if gpa >= 4.5 {
        "Excellent"
    } else if gpa >= 4.0 {
        "Good"
    } else if gpa >= 3.0 {
        "Average"
    } else {
        "Poor"
    }
}

// Generates one record; every random draw comes from the row's own seeded RNG
// so rows are independent streams regardless of generation order.
fn generate_student_record(row_index: usize, row_seed: u64, today: NaiveDate) -> StudentRecord {
    let mut rng = StdRng::seed_from_u64(row_seed);

    let student_id = format!("STU{:06}", row_index);

    let gender = generate_weighted_with_rng(GENDER_WEIGHTS, &mut rng);
    let first_name_pool: &[&str] = match gender {
        "Male" => &FIRST_NAMES_MALE,
        "Female" => &FIRST_NAMES_FEMALE,
        _ => &FIRST_NAMES_NEUTRAL,
    };
    let first_name = generate_from_options_with_rng(first_name_pool, &mut rng).to_string();
    let last_name: String = LastName().fake_with_rng(&mut rng);
    let email = format!(
        "{}.{}@university.edu.co",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );

    // Age within [MIN_AGE, MAX_AGE] at generation time
    let dob_start = today
        .checked_sub_months(Months::new((MAX_AGE + 1) * 12))
        .unwrap()
        + Duration::days(1);
    let dob_end = today.checked_sub_months(Months::new(MIN_AGE * 12)).unwrap();
    let date_of_birth = generate_date_between_with_rng(dob_start, dob_end, &mut rng);
    let age = today.year() - date_of_birth.year();
    let type_id_number = if (16..=17).contains(&age) { "TI" } else { "CC" };

    // 8 to 10 decimal digits
    let identification_number = rng.gen_range(10_000_000_i64..=9_999_999_999);

    let address = format!(
        "{} {} {}, {}, {} {}",
        BuildingNumber().fake_with_rng::<String, _>(&mut rng),
        StreetName().fake_with_rng::<String, _>(&mut rng),
        StreetSuffix().fake_with_rng::<String, _>(&mut rng),
        CityName().fake_with_rng::<String, _>(&mut rng),
        StateAbbr().fake_with_rng::<String, _>(&mut rng),
        ZipCode().fake_with_rng::<String, _>(&mut rng),
    );

    let nationality = generate_weighted_with_rng(NATIONALITY_WEIGHTS, &mut rng);
    let country_code = COUNTRY_CODES[nationality];
    let start_digits = PHONE_START_DIGITS[nationality];
    let first_digit = start_digits[rng.gen_range(0..start_digits.len())];
    let phone_number = format!(
        "{}{}",
        first_digit,
        rng.gen_range(100_000_000_u64..=999_999_999)
    );

    let program = generate_from_options_with_rng(&PROGRAMS, &mut rng);

    let enrollment_start = today
        .checked_sub_months(Months::new(ENROLLMENT_WINDOW_YEARS * 12))
        .unwrap();
    let enrollment_date = generate_date_between_with_rng(enrollment_start, today, &mut rng);
    let current_semester = (whole_months_between(enrollment_date, today) / 6 + 1)
        .clamp(1, MAX_SEMESTER) as u32;

    let total_credits_required: u32 = rng.gen_range(140..=180);
    // Heavy-tailed draw around the semester's nominal progress; extreme values
    // are clipped, never resampled
    let credits_center = (current_semester * CREDITS_PER_SEMESTER) as f64;
    let credits_cap = (current_semester * CREDITS_PER_SEMESTER + CREDITS_PER_SEMESTER)
        .min(total_credits_required) as f64;
    let credits_approved = Cauchy::new(credits_center, 5.0)
        .unwrap()
        .sample(&mut rng)
        .clamp(0.0, credits_cap)
        .round() as u32;
    let credits_remaining = total_credits_required - credits_approved;

    let gpa: f64 = Normal::new(3.5_f64, 0.5).unwrap().sample(&mut rng).clamp(2.0, 5.0);
    let academic_standing = academic_standing_for(gpa);
    let scholarship = gpa >= 4.5;

    let course_load = rng.gen_range(15_u32..=20);
    let marital_status = generate_weighted_with_rng(MARITAL_STATUS_WEIGHTS, &mut rng);
    let state_program = generate_weighted_with_rng(STATE_PROGRAM_WEIGHTS, &mut rng);
    let student_status = if state_program == "Enrolled" {
        "Active"
    } else {
        "Inactive"
    };

    let advisor_id = generate_prefixed_id_with_rng("ADV", 4, 1..50, &mut rng);
    let advisor_name: String = Name().fake_with_rng(&mut rng);
    let payment_status = generate_from_options_with_rng(&PAYMENT_STATUS_OPTIONS, &mut rng);
    let library_books_borrowed = Poisson::new(3.0).unwrap().sample(&mut rng) as u32;

    StudentRecord {
        student_id,
        first_name,
        last_name,
        gender,
        date_of_birth,
        type_id_number,
        identification_number,
        email,
        address,
        nationality,
        country_code,
        phone_number,
        program,
        enrollment_date,
        current_semester,
        total_credits_required,
        credits_approved,
        credits_remaining,
        gpa,
        academic_standing,
        scholarship,
        course_load,
        marital_status,
        state_program,
        student_status,
        advisor_id,
        advisor_name,
        payment_status,
        library_books_borrowed,
    }
}

/// Generate `row_count` student records.
///
/// The master `seed` is expanded into one seed per row up front, so parallel
/// workers draw from independent non-overlapping streams and the output is
/// identical for a given (seed, today) pair. `today` anchors every wall-clock
/// dependent derivation (age bracket, current semester).
pub fn generate_students(
    row_count: i64,
    seed: u64,
    today: NaiveDate,
) -> Result<Vec<StudentRecord>> {
    if row_count <= 0 {
        bail!("row count must be a positive integer, got {row_count}");
    }
    let row_count = row_count as usize;

    let mut seed_rng = StdRng::seed_from_u64(seed);
    let row_seeds: Vec<u64> = (0..row_count).map(|_| seed_rng.gen()).collect();
    debug!("expanded master seed {seed} into {row_count} row seeds");

    let records = row_seeds
        .into_par_iter()
        .enumerate()
        .map(|(row_index, row_seed)| generate_student_record(row_index, row_seed, today))
        .collect();
    Ok(records)
}
