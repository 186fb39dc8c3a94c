//! Terminal rendering for portal data.

use colored::Colorize;
use portal_core::{ApiMode, AuthGrant, Profile, Program, SessionToken, TokenOrigin};
use portal_interaction::{DEMO_PASSWORD, DEMO_USERNAME};
use std::fmt::Write;

const NOT_AVAILABLE: &str = "N/A";

const PERSONAL_FIELDS: &[(&str, &str)] = &[
    ("Full Name", "name"),
    ("Student ID", "student_id"),
    ("Email", "email"),
    ("Phone", "phone"),
];

const ACADEMIC_FIELDS: &[(&str, &str)] = &[
    ("Session", "session"),
    ("Roll No", "roll_no"),
    ("Semester", "semester"),
];

/// Keys already shown in a labelled section.
const SHOWN_KEYS: &[&str] = &[
    "id",
    "name",
    "student_id",
    "email",
    "phone",
    "program",
    "program_name",
    "session",
    "roll_no",
    "semester",
];

pub fn mode_banner(mode: ApiMode) -> String {
    match mode {
        ApiMode::Real => format!("Mode: {}", mode.label().green().bold()),
        ApiMode::Mock => format!(
            "Mode: {} {}",
            mode.label().yellow().bold(),
            "(real API unavailable, showing mock data)".bright_black()
        ),
    }
}

pub fn demo_hint() -> String {
    format!(
        "{} username: {}, password: {}",
        "Demo credentials:".yellow(),
        DEMO_USERNAME, DEMO_PASSWORD
    )
}

pub fn program_list(programs: &[Program]) -> String {
    if programs.is_empty() {
        return "No programs available".bright_black().to_string();
    }

    let mut out = String::new();
    for program in programs {
        let _ = writeln!(out, "  {:>4}  {}", program.id.to_string().cyan(), program.name);
    }
    out
}

pub fn login_summary(grant: &AuthGrant) -> String {
    let who = grant
        .user
        .as_ref()
        .and_then(|user| user.name.clone().or_else(|| user.username.clone()))
        .unwrap_or_else(|| "student".to_string());
    format!(
        "{} Logged in as {} ({})",
        "✓".green(),
        who.bold(),
        token_origin(&grant.token)
    )
}

pub fn token_status(token: Option<&SessionToken>) -> String {
    match token {
        Some(token) => format!(
            "Logged in: {} (token {}, {})",
            "yes".green(),
            token.redacted(),
            token_origin(token)
        ),
        None => format!("Logged in: {}", "no".bright_black()),
    }
}

fn token_origin(token: &SessionToken) -> &'static str {
    match token.origin() {
        TokenOrigin::Real => "issued by the university API",
        TokenOrigin::Mock => "issued by the demo backend",
    }
}

pub fn profile_view(profile: &Profile) -> String {
    let mut out = String::new();
    let name = profile.name().unwrap_or_else(|| "Student".to_string());
    let program = profile
        .program()
        .unwrap_or_else(|| "Program not specified".to_string());

    let _ = writeln!(out, "{}", name.bold());
    let _ = writeln!(out, "{}", program.bright_black());

    let _ = writeln!(out, "\n{}", "Personal Information".underline());
    for (label, key) in PERSONAL_FIELDS {
        push_row(&mut out, label, profile.field(key));
    }

    let _ = writeln!(out, "\n{}", "Academic Information".underline());
    push_row(&mut out, "Program", profile.program());
    for (label, key) in ACADEMIC_FIELDS {
        push_row(&mut out, label, profile.field(key));
    }

    let extra: Vec<(&str, String)> = profile
        .iter()
        .filter(|(key, _)| !SHOWN_KEYS.contains(key))
        .filter_map(|(key, _)| profile.field(key).map(|value| (key, value)))
        .collect();
    if !extra.is_empty() {
        let _ = writeln!(out, "\n{}", "Other".underline());
        for (key, value) in extra {
            push_row(&mut out, &humanize(key), Some(value));
        }
    }

    out
}

fn push_row(out: &mut String, label: &str, value: Option<String>) {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let _ = writeln!(out, "  {:<14} {}", label, value);
}

/// `blood_group` -> `Blood group`
fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::UserSummary;
    use serde_json::json;

    fn profile(value: serde_json::Value) -> Profile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_profile_view_uses_labels_and_fallbacks() {
        let view = profile_view(&profile(json!({
            "name": "Rahim Uddin",
            "student_id": 202200017,
            "program": "BSc in EEE"
        })));

        assert!(view.contains("Rahim Uddin"));
        assert!(view.contains("Student ID"));
        assert!(view.contains("202200017"));
        assert!(view.contains("BSc in EEE"));
        // email, phone, session, roll no and semester are missing
        assert_eq!(view.matches(NOT_AVAILABLE).count(), 5);
    }

    #[test]
    fn test_profile_view_lists_unknown_fields() {
        let view = profile_view(&profile(json!({
            "name": "Minhaj Ahmed",
            "blood_group": "A+"
        })));
        assert!(view.contains("Other"));
        assert!(view.contains("Blood group"));
        assert!(view.contains("A+"));
    }

    #[test]
    fn test_profile_view_prefers_program_name() {
        let view = profile_view(&profile(json!({
            "program": "BSc in CSE",
            "program_name": "Bachelor of Science in CSE"
        })));
        assert!(view.contains("Bachelor of Science in CSE"));
        assert!(!view.contains("Program not specified"));
    }

    #[test]
    fn test_empty_profile_has_placeholders() {
        let view = profile_view(&Profile::default());
        assert!(view.contains("Student"));
        assert!(view.contains("Program not specified"));
        assert!(!view.contains("Other"));
    }

    #[test]
    fn test_program_list() {
        let list = program_list(&[Program::new(13, "Bachelor of Architecture - B.Arch", 30)]);
        assert!(list.contains("13"));
        assert!(list.contains("B.Arch"));
        assert!(program_list(&[]).contains("No programs"));
    }

    #[test]
    fn test_mode_banner_names_the_backend() {
        assert!(mode_banner(ApiMode::Real).contains("REAL API"));
        assert!(mode_banner(ApiMode::Mock).contains("DEMO"));
        assert!(mode_banner(ApiMode::Mock).contains("mock data"));
    }

    #[test]
    fn test_login_summary_names_the_issuer() {
        let grant = AuthGrant {
            token: SessionToken::mock("mock_jwt_token_1_abcdefghi"),
            user: Some(UserSummary {
                id: Some(1),
                name: Some("Minhaj Ahmed".to_string()),
                username: Some("minhaj".to_string()),
            }),
        };
        let summary = login_summary(&grant);
        assert!(summary.contains("Minhaj Ahmed"));
        assert!(summary.contains("demo backend"));
    }

    #[test]
    fn test_token_status() {
        assert!(token_status(None).contains("no"));
        let token = SessionToken::real("abcdefghijklmnop");
        let status = token_status(Some(&token));
        assert!(status.contains("university API"));
        assert!(!status.contains("abcdefghijklmnop"));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("date_of_birth"), "Date of birth");
        assert_eq!(humanize(""), "");
    }
}
