//! MockBackend - deterministic demo stand-in for the university API.
//!
//! Serves a fixed catalog, accepts exactly one demo account and returns a
//! fixed profile. Each call sleeps first so front ends behave as they would
//! against the network.

use async_trait::async_trait;
use portal_core::{
    ApiMode, AuthGrant, Credentials, MOCK_TOKEN_MARKER, MockSettings, PortalError, Profile,
    Program, Result, SessionToken, StudentBackend, UserSummary,
};
use rand::Rng;
use serde_json::{Map, Value, json};
use std::time::Duration;

pub const DEMO_USERNAME: &str = "minhaj";
pub const DEMO_PASSWORD: &str = "12345";
pub const DEMO_STUDENT_ID: &str = "202100001";

const TOKEN_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Artificial delay per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub catalog: Duration,
    pub login: Duration,
    pub profile: Duration,
}

impl MockLatency {
    /// No delay at all.
    pub fn none() -> Self {
        Self {
            catalog: Duration::ZERO,
            login: Duration::ZERO,
            profile: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self::from(&MockSettings::default())
    }
}

impl From<&MockSettings> for MockLatency {
    fn from(settings: &MockSettings) -> Self {
        Self {
            catalog: Duration::from_millis(settings.catalog_ms),
            login: Duration::from_millis(settings.login_ms),
            profile: Duration::from_millis(settings.profile_ms),
        }
    }
}

/// Local demo backend.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    latency: MockLatency,
}

impl MockBackend {
    pub fn new(latency: MockLatency) -> Self {
        Self { latency }
    }

    /// A backend that answers immediately.
    pub fn instant() -> Self {
        Self::new(MockLatency::none())
    }

    pub fn latency(&self) -> MockLatency {
        self.latency
    }

    async fn simulate_latency(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builds `mock_jwt_token_<unix millis>_<9 base36 chars>`.
pub fn generate_mock_token() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TOKEN_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!(
        "{MOCK_TOKEN_MARKER}_{}_{suffix}",
        chrono::Utc::now().timestamp_millis()
    )
}

/// The five programs of the demo catalog, in display order.
pub fn demo_programs() -> Vec<Program> {
    vec![
        Program::new(
            1,
            "Bachelor of Science (Engineering) in Computer Science and Engineering - BSc in CSE",
            10,
        ),
        Program::new(2, "M.Sc. in Computer Science & Engineering - MSc in CSE", 11),
        Program::new(
            3,
            "Bachelor of Science (Engineering) in Electrical and Electronic Engineering - BSc in EEE",
            20,
        ),
        Program::new(13, "Bachelor of Architecture - B.Arch", 30),
        Program::new(
            25,
            "Bachelor of Science (Honors) in Mathematics - B.Sc. (Honors) in Math",
            50,
        ),
    ]
}

/// The profile every demo session sees.
pub fn demo_profile() -> Profile {
    let fields = json!({
        "id": 1,
        "student_id": DEMO_STUDENT_ID,
        "name": "Minhaj Ahmed",
        "email": "minhaj@student.puc.ac.bd",
        "phone": "+8801XXXXXXXXX",
        "program_name": "Bachelor of Science (Engineering) in Computer Science and Engineering - BSc in CSE",
        "program": "BSc in CSE",
        "session": "2020-2021",
        "roll_no": DEMO_STUDENT_ID,
        "semester": "8th",
        "address": "Chittagong, Bangladesh",
        "blood_group": "A+",
        "date_of_birth": "2000-01-15"
    });

    match fields {
        Value::Object(map) => Profile::new(map),
        _ => Profile::new(Map::new()),
    }
}

#[async_trait]
impl StudentBackend for MockBackend {
    fn kind(&self) -> ApiMode {
        ApiMode::Mock
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        tracing::debug!("Using demo program catalog");
        Self::simulate_latency(self.latency.catalog).await;
        Ok(demo_programs())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant> {
        tracing::debug!(username = credentials.login_name(), "Using demo login");
        Self::simulate_latency(self.latency.login).await;

        if credentials.login_name() != DEMO_USERNAME || credentials.password != DEMO_PASSWORD {
            tracing::debug!("Demo login rejected");
            return Err(PortalError::invalid_credentials(format!(
                "Invalid credentials - Use username: {DEMO_USERNAME}, password: {DEMO_PASSWORD}"
            )));
        }

        Ok(AuthGrant {
            token: SessionToken::mock(generate_mock_token()),
            user: Some(UserSummary {
                id: Some(1),
                name: Some("Minhaj Ahmed".to_string()),
                username: Some(DEMO_USERNAME.to_string()),
            }),
        })
    }

    async fn fetch_profile(&self, token: &SessionToken) -> Result<Profile> {
        tracing::debug!(token = %token.redacted(), "Using demo profile");
        Self::simulate_latency(self.latency.profile).await;
        Ok(demo_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_catalog_is_ordered() {
        let programs = MockBackend::instant().list_programs().await.unwrap();
        assert_eq!(programs.len(), 5);
        assert!(programs.windows(2).all(|w| w[0].ordering <= w[1].ordering));
        assert_eq!(
            programs.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 13, 25]
        );
    }

    #[tokio::test]
    async fn test_demo_login_issues_distinct_mock_tokens() {
        let backend = MockBackend::instant();
        let credentials = Credentials::new(1, DEMO_USERNAME, DEMO_PASSWORD);

        let mut seen = HashSet::new();
        for _ in 0..20 {
            let grant = backend.authenticate(&credentials).await.unwrap();
            assert!(grant.token.is_mock());
            assert!(grant.token.as_str().starts_with("mock_jwt_token_"));
            assert!(seen.insert(grant.token.into_inner()));
        }
    }

    #[tokio::test]
    async fn test_demo_login_returns_user() {
        let grant = MockBackend::instant()
            .authenticate(&Credentials::new(1, " minhaj ", "12345"))
            .await
            .unwrap();
        let user = grant.user.unwrap();
        assert_eq!(user.username.as_deref(), Some("minhaj"));
        assert_eq!(user.name.as_deref(), Some("Minhaj Ahmed"));
    }

    #[tokio::test]
    async fn test_wrong_credentials_rejected() {
        let err = MockBackend::instant()
            .authenticate(&Credentials::new(1, "wrong", "bad"))
            .await
            .unwrap_err();
        assert!(err.is_invalid_credentials());
        assert!(!err.is_fallback_trigger());
    }

    #[tokio::test]
    async fn test_profile_is_fixed() {
        let backend = MockBackend::instant();
        let a = backend.fetch_profile(&SessionToken::mock("mock_jwt_token_1_a")).await.unwrap();
        let b = backend.fetch_profile(&SessionToken::real("anything")).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.student_id().as_deref(), Some(DEMO_STUDENT_ID));
    }

    #[test]
    fn test_token_format() {
        let token = generate_mock_token();
        let parts: Vec<&str> = token.rsplitn(3, '_').collect();
        assert_eq!(parts[0].len(), TOKEN_SUFFIX_LEN);
        assert!(parts[0].bytes().all(|b| BASE36.contains(&b)));
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2], MOCK_TOKEN_MARKER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let backend = MockBackend::default();
        let started = tokio::time::Instant::now();
        backend
            .authenticate(&Credentials::new(1, DEMO_USERNAME, DEMO_PASSWORD))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[test]
    fn test_latency_from_settings() {
        let latency = MockLatency::from(&MockSettings {
            catalog_ms: 1,
            login_ms: 2,
            profile_ms: 3,
        });
        assert_eq!(latency.login, Duration::from_millis(2));
        assert_eq!(MockLatency::default().catalog, Duration::from_millis(1000));
    }
}
