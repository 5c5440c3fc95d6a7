//! Integration tests for the registration form

use regform::{
    DateOfBirth, FieldPath, Form, FormController, RegistrationDraft, SubmitOutcome, SubmitState,
    TestBackend, options, paths,
};

const VALID: [(&str, &str); 7] = [
    (paths::FIRST_NAME, "Ada"),
    (paths::LAST_NAME, "Lovelace"),
    (paths::EMAIL, "ada@example.com"),
    (paths::COMPANY, "Analytical Engines"),
    (paths::BIRTH_MONTH, "03"),
    (paths::BIRTH_DAY, "07"),
    (paths::BIRTH_YEAR, "1985"),
];

fn is_select(path: &str) -> bool {
    path.starts_with("date_of_birth.")
}

/// A script filling every field from `values`, then submitting.
fn script(values: &[(&str, &str)]) -> TestBackend {
    values
        .iter()
        .fold(TestBackend::new(), |backend, (path, value)| {
            if is_select(path) {
                backend.select(*path, *value)
            } else {
                backend.fill(*path, *value)
            }
        })
        .submit()
}

fn run(
    backend: TestBackend,
) -> anyhow::Result<(FormController<RegistrationDraft>, Vec<RegistrationDraft>)> {
    let mut submitted = Vec::new();
    let controller = RegistrationDraft::run_with(backend, |r| submitted.push(r))?;
    Ok((controller, submitted))
}

fn expected() -> RegistrationDraft {
    RegistrationDraft {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        company: "Analytical Engines".into(),
        email: "ada@example.com".into(),
        date_of_birth: DateOfBirth {
            month: "03".into(),
            day: "07".into(),
            year: "1985".into(),
        },
    }
}

#[test]
fn valid_submit_calls_handler_once_with_entered_values() -> anyhow::Result<()> {
    let (controller, submitted) = run(script(&VALID))?;

    assert_eq!(submitted, vec![expected()]);
    assert!(controller.errors().is_empty());
    assert_eq!(controller.state(), SubmitState::Submitted);
    Ok(())
}

#[test]
fn each_empty_text_field_yields_exactly_its_error() -> anyhow::Result<()> {
    let cases = [
        (paths::FIRST_NAME, "First name is required"),
        (paths::LAST_NAME, "Last name is required"),
        (paths::COMPANY, "Company is required"),
        (paths::EMAIL, "Invalid email address"),
    ];

    for (empty, message) in cases {
        let values: Vec<_> = VALID
            .iter()
            .map(|&(path, value)| (path, if path == empty { "" } else { value }))
            .collect();
        let (controller, submitted) = run(script(&values))?;

        assert!(submitted.is_empty(), "{empty}: handler must not run");
        assert_eq!(controller.errors().len(), 1, "{empty}: one error expected");
        assert_eq!(controller.error(&FieldPath::new(empty)), Some(message));
    }
    Ok(())
}

#[test]
fn each_unselected_date_part_yields_exactly_its_error() -> anyhow::Result<()> {
    for unset in [paths::BIRTH_MONTH, paths::BIRTH_DAY, paths::BIRTH_YEAR] {
        let values: Vec<_> = VALID.iter().copied().filter(|(path, _)| *path != unset).collect();
        let (controller, submitted) = run(script(&values))?;

        assert!(submitted.is_empty());
        assert_eq!(controller.errors().len(), 1);
        assert_eq!(controller.error(&FieldPath::new(unset)), Some("Required"));
    }
    Ok(())
}

#[test]
fn malformed_email_errors_on_email_only() -> anyhow::Result<()> {
    let values: Vec<_> = VALID
        .iter()
        .map(|&(path, value)| (path, if path == paths::EMAIL { "not-an-email" } else { value }))
        .collect();
    let (controller, submitted) = run(script(&values))?;

    assert!(submitted.is_empty());
    let errors: Vec<_> = controller.errors().iter().map(|(p, m)| (p.as_str(), m)).collect();
    assert_eq!(errors, vec![(paths::EMAIL, "Invalid email address")]);
    Ok(())
}

#[test]
fn untouched_form_reports_every_field() -> anyhow::Result<()> {
    let (controller, submitted) = run(TestBackend::new().submit())?;

    assert!(submitted.is_empty());
    assert_eq!(controller.errors().len(), paths::ALL.len());
    assert_eq!(
        controller.error(&FieldPath::new(paths::FIRST_NAME)),
        Some("First name is required")
    );
    assert_eq!(
        controller.error(&FieldPath::new(paths::BIRTH_YEAR)),
        Some("Required")
    );
    Ok(())
}

#[test]
fn invalid_then_corrected_submit() -> anyhow::Result<()> {
    let backend = script(&VALID[..3]).fill(paths::COMPANY, "Analytical Engines");
    let backend = VALID[4..]
        .iter()
        .fold(backend, |b, (path, value)| b.select(*path, *value))
        .submit();
    let (controller, submitted) = run(backend)?;

    assert_eq!(controller.submit_count(), 2);
    assert_eq!(submitted, vec![expected()]);
    assert!(controller.errors().is_empty());
    Ok(())
}

#[test]
fn form_stays_usable_after_many_failed_submits() -> anyhow::Result<()> {
    let backend = (0..5).fold(TestBackend::new(), |b, _| b.submit());
    let (mut controller, _) = run(backend)?;
    assert_eq!(controller.submit_count(), 5);

    for (path, value) in VALID {
        if is_select(path) {
            controller.control(path)?.on_change(value)?;
        } else {
            controller.register(path)?.set(value);
        }
    }

    let mut submitted = Vec::new();
    let outcome = controller.submit(|r| submitted.push(r))?;
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(submitted.len(), 1);
    Ok(())
}

#[test]
fn each_valid_submit_calls_the_handler_again() -> anyhow::Result<()> {
    let (controller, submitted) = run(script(&VALID).submit())?;

    assert_eq!(submitted.len(), 2);
    assert_eq!(
        controller.value(&FieldPath::new(paths::FIRST_NAME)),
        Some("Ada")
    );
    Ok(())
}

#[test]
fn option_lists_match_the_layout() {
    let definition = RegistrationDraft::definition();
    let field = |path: &str| definition.field(&FieldPath::new(path)).map(|f| f.options().len());

    assert_eq!(field(paths::BIRTH_MONTH), Some(12));
    assert_eq!(field(paths::BIRTH_DAY), Some(31));
    assert_eq!(
        field(paths::BIRTH_YEAR),
        Some((options::current_year() - options::EARLIEST_BIRTH_YEAR + 1) as usize)
    );
}
