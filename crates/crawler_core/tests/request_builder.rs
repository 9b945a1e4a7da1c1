use crawler_core::{build_job_spec, JobSpec, ValidationError};

fn venues(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn empty_keywords_are_rejected() {
    let err = build_job_spec("", &venues(&["aaai"]), "2020").unwrap_err();
    assert_eq!(err, ValidationError::EmptyKeywords);

    let err = build_job_spec("  , ,", &venues(&["aaai"]), "2020").unwrap_err();
    assert_eq!(err, ValidationError::EmptyKeywords);
}

#[test]
fn missing_venues_are_rejected() {
    let err = build_job_spec("ml", &[], "2020").unwrap_err();
    assert_eq!(err, ValidationError::NoVenuesSelected);
}

#[test]
fn keywords_are_split_trimmed_and_filtered() {
    let spec = build_job_spec(" ml , nlp ,, ", &venues(&["aaai"]), "2020").unwrap();
    assert_eq!(
        spec,
        JobSpec {
            keywords: vec!["ml".to_string(), "nlp".to_string()],
            venue_ids: venues(&["aaai"]),
            year_start: 2020,
        }
    );
}

#[test]
fn malformed_year_is_rejected() {
    let err = build_job_spec("ml", &venues(&["aaai"]), "20x0").unwrap_err();
    assert_eq!(err, ValidationError::InvalidYearStart("20x0".to_string()));

    let err = build_job_spec("ml", &venues(&["aaai"]), "").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidYearStart(_)));
}

#[test]
fn year_is_not_range_checked() {
    let spec = build_job_spec("ml", &venues(&["aaai"]), " 1850 ").unwrap();
    assert_eq!(spec.year_start, 1850);
}

#[test]
fn validation_errors_render_user_notices() {
    assert_eq!(
        ValidationError::EmptyKeywords.to_string(),
        "Please enter at least one keyword"
    );
    assert_eq!(
        ValidationError::NoVenuesSelected.to_string(),
        "Please select at least one conference"
    );
}
