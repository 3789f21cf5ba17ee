//! End-to-end wizard flows against the standard ten-step registry
//!
//! These tests drive the public library API the way a presenter would:
//! read the current view, submit a patch, observe the outcome.

use sangam::core::{FieldValue, FieldValues, SubmitOutcome, WizardController, WizardError, WizardState};
use sangam::schema::StepRegistry;

fn controller() -> WizardController {
    WizardController::new(StepRegistry::standard().unwrap())
}

fn patch(entries: &[(&str, &str)]) -> FieldValues {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
        .collect()
}

/// A patch that validates for the given step
fn valid_patch(step_id: &str) -> FieldValues {
    match step_id {
        "basics" => patch(&[
            ("fullName", "Ananya Sharma"),
            ("gender", "Female"),
            ("dateOfBirth", "1993-06-21"),
            ("maritalStatus", "Never Married"),
        ]),
        "about" => {
            let mut p = patch(&[(
                "bio",
                "Software engineer from Pune who enjoys reading, travel, and good food.",
            )]);
            p.insert(
                "hobbies".into(),
                FieldValue::List(vec!["Reading".into(), "Travelling".into()]),
            );
            p
        }
        "religion" => patch(&[("religion", "Hindu"), ("caste", "Maratha")]),
        "horoscope" => patch(&[("believesInHoroscope", "No")]),
        "education" => patch(&[
            ("highestEducation", "Masters"),
            ("educationField", "Computer Science"),
        ]),
        "occupation" => patch(&[("occupation", "Student")]),
        "physical" => patch(&[
            ("height", "170"),
            ("weight", "65"),
            ("complexion", "Fair"),
            ("bodyType", "Average"),
        ]),
        "lifestyle" => patch(&[("diet", "Vegetarian"), ("smoking", "No"), ("drinking", "No")]),
        "family" => patch(&[("familyType", "Nuclear")]),
        "location" => patch(&[("country", "India"), ("state", "Maharashtra"), ("city", "Pune")]),
        other => panic!("no valid patch for step '{}'", other),
    }
}

/// Advance a fresh controller until the named step is current
fn controller_at(step_id: &str) -> WizardController {
    let mut ctrl = controller();
    loop {
        let view = ctrl.current_step_view().unwrap();
        if view.step_id == step_id {
            return ctrl;
        }
        let outcome = ctrl.submit_next(&valid_patch(&view.step_id)).unwrap();
        assert_eq!(outcome, SubmitOutcome::Advanced, "setup failed at {}", view.step_id);
    }
}

// ============================================================================
// Whole-flow behavior
// ============================================================================

#[test]
fn test_full_walk_completes() {
    let mut ctrl = controller();
    for i in 0..ctrl.step_count() {
        let view = ctrl.current_step_view().unwrap();
        assert_eq!(view.index, i);
        assert!(view.errors.is_empty());

        let outcome = ctrl.submit_next(&valid_patch(&view.step_id)).unwrap();
        if i + 1 == ctrl.step_count() {
            assert_eq!(outcome, SubmitOutcome::Completed);
        } else {
            assert_eq!(outcome, SubmitOutcome::Advanced);
        }
    }

    assert_eq!(ctrl.state(), WizardState::Completed);
    let profile = ctrl.completed_profile().unwrap();
    assert_eq!(profile["fullName"], FieldValue::from("Ananya Sharma"));
    assert_eq!(profile["occupation"], FieldValue::from("Student"));
    assert_eq!(profile["city"], FieldValue::from("Pune"));
    // Horoscope details were hidden ("No") and never entered the draft
    assert!(!profile.contains_key("rashi"));
}

#[test]
fn test_each_required_field_errors_alone() {
    // Submitting an empty patch at the first step flags exactly the
    // required fields, nothing else
    let mut ctrl = controller();
    let outcome = ctrl.submit_next(&FieldValues::new()).unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("empty patch must fail")
    };
    assert!(errors.contains_key("fullName"));
    assert!(errors.contains_key("gender"));
    assert!(errors.contains_key("dateOfBirth"));
    assert!(errors.contains_key("maritalStatus"));
    // Optional and conditionally hidden fields stay silent
    assert!(!errors.contains_key("haveChildren"));
}

#[test]
fn test_go_back_at_first_step_is_a_no_op() {
    let mut ctrl = controller();
    assert_eq!(ctrl.go_back(), Err(WizardError::AtFirstStep));
    assert_eq!(ctrl.state(), WizardState::Active(0));
    assert!(ctrl.draft().is_empty());
}

#[test]
fn test_revisit_with_unchanged_answers_reproduces_draft() {
    let mut ctrl = controller_at("religion");
    let before = ctrl.draft().clone();

    ctrl.go_back().unwrap();
    let view = ctrl.current_step_view().unwrap();
    assert_eq!(view.step_id, "about");
    // The view repopulates previously accepted values
    assert!(view.values.contains_key("bio"));

    ctrl.submit_next(&valid_patch("about")).unwrap();
    assert_eq!(ctrl.draft(), &before);
}

#[test]
fn test_abandon_mid_flow() {
    let mut ctrl = controller_at("education");
    ctrl.abandon();
    assert_eq!(ctrl.state(), WizardState::Abandoned);
    assert!(ctrl.draft().is_empty());
    assert_eq!(
        ctrl.submit_next(&FieldValues::new()),
        Err(WizardError::NotActive)
    );
}

// ============================================================================
// Occupation step (conditional employer fields)
// ============================================================================

#[test]
fn test_occupation_student_skips_employer_fields() {
    let mut ctrl = controller_at("occupation");
    let outcome = ctrl.submit_next(&patch(&[("occupation", "Student")])).unwrap();
    assert_eq!(outcome, SubmitOutcome::Advanced);
    assert_eq!(ctrl.draft()["occupation"], FieldValue::from("Student"));
    assert!(!ctrl.draft().contains_key("companyName"));
}

#[test]
fn test_occupation_private_sector_requires_employer_fields() {
    let mut ctrl = controller_at("occupation");
    let outcome = ctrl
        .submit_next(&patch(&[("occupation", "Private Sector")]))
        .unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("missing employer fields must fail")
    };
    assert!(errors.contains_key("companyName"));
    assert!(errors.contains_key("designation"));
    assert_eq!(ctrl.state(), WizardState::Active(5));
}

#[test]
fn test_occupation_view_hides_employer_fields_for_student() {
    let mut ctrl = controller_at("occupation");
    // A failed submit stores the step-local trigger nowhere, so drive the
    // view through an accepted value instead
    ctrl.submit_next(&patch(&[("occupation", "Student")])).unwrap();
    ctrl.go_back().unwrap();

    let view = ctrl.current_step_view().unwrap();
    assert!(!view.active["companyName"].visible);
    assert!(!view.active["designation"].visible);
    assert!(view.active["occupation"].visible);
}

// ============================================================================
// Physical attributes step (numeric ranges)
// ============================================================================

#[test]
fn test_height_out_of_range_then_valid() {
    let mut ctrl = controller_at("physical");

    let outcome = ctrl.submit_next(&patch(&[("height", "300")])).unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("height 300 must fail")
    };
    assert_eq!(errors["height"], "must be between 120\u{2013}250");

    let outcome = ctrl
        .submit_next(&patch(&[
            ("height", "170"),
            ("weight", "65"),
            ("complexion", "Fair"),
            ("bodyType", "Average"),
        ]))
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Advanced);
    // Numeric text is normalized on merge
    assert_eq!(ctrl.draft()["height"], FieldValue::Number(170));
}

// ============================================================================
// Location step (country-gated state requirement)
// ============================================================================

#[test]
fn test_india_requires_state() {
    let mut ctrl = controller_at("location");
    let outcome = ctrl
        .submit_next(&patch(&[("country", "India"), ("state", ""), ("city", "Pune")]))
        .unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("blank state for India must fail")
    };
    assert!(errors.contains_key("state"));
    assert!(!errors.contains_key("city"));
}

#[test]
fn test_non_india_state_is_free_text() {
    let mut ctrl = controller_at("location");
    let outcome = ctrl
        .submit_next(&patch(&[
            ("country", "USA"),
            ("state", "California"),
            ("city", "Fresno"),
        ]))
        .unwrap();
    // Location is the last step
    assert_eq!(outcome, SubmitOutcome::Completed);
    let profile = ctrl.completed_profile().unwrap();
    assert_eq!(profile["state"], FieldValue::from("California"));
}

// ============================================================================
// About step (text length)
// ============================================================================

#[test]
fn test_bio_below_minimum_then_valid() {
    let mut ctrl = controller_at("about");

    let mut short = patch(&[("bio", "short")]);
    short.insert("hobbies".into(), FieldValue::from("Reading"));
    let outcome = ctrl.submit_next(&short).unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("short bio must fail")
    };
    assert_eq!(errors["bio"], "must be at least 50 characters");
    assert!(!errors.contains_key("hobbies"));

    let mut ok = patch(&[(
        "bio",
        "Software engineer from Pune who enjoys reading, travel, and good food.",
    )]);
    ok.insert("hobbies".into(), FieldValue::from("Reading"));
    let outcome = ctrl.submit_next(&ok).unwrap();
    assert_eq!(outcome, SubmitOutcome::Advanced);
    assert!(ctrl.draft().contains_key("bio"));
    assert_eq!(ctrl.draft()["hobbies"], FieldValue::from("Reading"));
}
