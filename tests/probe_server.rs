//! Probes against a local mock backend.

use std::time::Duration;

use apiprobe::prober::catalog;
use apiprobe::{
    BodyKind, ConsoleReporter, EndpointSpec, JsonExporter, ProbeConfig, ProbeDetail,
    ProbeObserver, ProbeOutcome, ProbeResult, Prober, SavedReport, write_report,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Recorder {
    started: Vec<String>,
    finished: Vec<(String, ProbeOutcome)>,
}

impl ProbeObserver for Recorder {
    fn on_start(&mut self, spec: &EndpointSpec) {
        self.started.push(spec.name.clone());
    }

    fn on_result(&mut self, spec: &EndpointSpec, result: &ProbeResult) {
        self.finished.push((spec.name.clone(), result.outcome));
    }
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hello!"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/public/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"email": "admin@system.com", "userName": "Admin", "lastName": "System", "role": "ADMIN", "isActive": true},
            {"userName": "Ana", "role": "STUDENT"},
            {"email": "luis@example.com"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/public/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stats unavailable"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users/all"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    server
}

fn prober_for(base_url: &str) -> Prober {
    Prober::new(&ProbeConfig::new(base_url).with_timeout(2)).unwrap()
}

fn outcome_pairs(results: &[ProbeResult]) -> Vec<(ProbeOutcome, Option<u16>)> {
    results.iter().map(|r| (r.outcome, r.status_code)).collect()
}

#[tokio::test]
async fn hello_endpoint_previews_body() {
    let server = backend().await;
    let prober = prober_for(&server.uri());
    let specs = vec![EndpointSpec::get("Hello", "/api/public/hello", "")];

    let results = prober.probe_all(&specs, &mut apiprobe::prober::Silent).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].endpoint_name, "Hello");
    assert_eq!(results[0].outcome, ProbeOutcome::Success);
    assert_eq!(results[0].status_code, Some(200));
    match &results[0].detail {
        ProbeDetail::Preview(text) => assert!(text.contains("Hello!")),
        other => panic!("unexpected detail: {:?}", other),
    }
}

#[tokio::test]
async fn results_match_input_order_and_length() {
    let server = backend().await;
    let prober = prober_for(&server.uri());
    let mut specs = catalog::public_endpoints();
    specs.insert(0, EndpointSpec::get("Missing", "/api/public/missing", ""));

    let mut recorder = Recorder::default();
    let results = prober.probe_all(&specs, &mut recorder).await;

    let names: Vec<&str> = results.iter().map(|r| r.endpoint_name.as_str()).collect();
    let expected: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, expected);
    assert_eq!(recorder.started, expected);
    assert_eq!(recorder.finished.len(), specs.len());

    assert_eq!(
        outcome_pairs(&results),
        vec![
            (ProbeOutcome::HttpError, Some(404)),
            (ProbeOutcome::Success, Some(200)),
            (ProbeOutcome::HttpError, Some(404)),
            (ProbeOutcome::Success, Some(200)),
            (ProbeOutcome::HttpError, Some(500)),
        ]
    );
    assert_eq!(
        results[4].detail,
        ProbeDetail::ErrorBody("stats unavailable".to_string())
    );
}

#[tokio::test]
async fn user_list_yields_one_line_per_user() {
    colored::control::set_override(false);
    let server = backend().await;
    let prober = prober_for(&server.uri());
    let specs = vec![
        EndpointSpec::get("Users", "/api/public/users", "").with_body(BodyKind::UserList),
    ];

    let results = prober.probe_all(&specs, &mut apiprobe::prober::Silent).await;
    assert_eq!(results[0].outcome, ProbeOutcome::Success);

    let reporter = ConsoleReporter::new(&server.uri());
    let lines = reporter.render_outcome(&results[0]);
    let user_lines: Vec<String> = lines
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()))
        .collect();

    assert_eq!(
        user_lines,
        vec![
            "1. Admin System (ADMIN)",
            "2. Ana N/A (STUDENT)",
            "3. N/A N/A (N/A)"
        ]
    );
}

#[tokio::test]
async fn user_listing_401_gives_auth_guidance() {
    colored::control::set_override(false);
    let server = backend().await;
    let prober = prober_for(&server.uri());
    let spec = catalog::user_listing_endpoint(None).unwrap();

    let result = prober
        .probe_user_listing(&spec, &mut apiprobe::prober::Silent)
        .await;

    assert_eq!(result.outcome, ProbeOutcome::HttpError);
    assert_eq!(result.status_code, Some(401));
    assert!(matches!(result.detail, ProbeDetail::Unauthorized(_)));

    let text = ConsoleReporter::new(&server.uri())
        .render_outcome(&result)
        .join("\n");
    assert!(text.contains("/api/auth/login"));
    assert!(text.contains("/h2-console"));
    assert!(!text.contains("Response: Unauthorized"));
}

#[tokio::test]
async fn user_listing_lists_every_field() {
    colored::control::set_override(false);
    let server = backend().await;
    let prober = prober_for(&server.uri());
    let spec = catalog::user_listing_endpoint(Some("/api/public/users")).unwrap();

    let result = prober
        .probe_user_listing(&spec, &mut apiprobe::prober::Silent)
        .await;
    assert_eq!(result.outcome, ProbeOutcome::Success);

    let text = ConsoleReporter::new(&server.uri())
        .with_user_details(true)
        .render_outcome(&result)
        .join("\n");
    assert!(text.contains("Email: admin@system.com"));
    assert!(text.contains("Active: Yes"));
    assert!(text.contains("User 3:"));
}

#[tokio::test]
async fn unreachable_server_is_connection_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base_url = format!("http://127.0.0.1:{}", port);
    let prober = Prober::new(
        &ProbeConfig::new(base_url.clone())
            .with_timeout(2)
            .with_startup_hint("mvn spring-boot:run"),
    )
    .unwrap();

    let specs = catalog::public_endpoints();
    let results = prober.probe_all(&specs, &mut apiprobe::prober::Silent).await;

    assert_eq!(results.len(), specs.len());
    for result in &results {
        assert_eq!(result.outcome, ProbeOutcome::ConnectionFailure);
        assert_eq!(result.status_code, None);
        match &result.detail {
            ProbeDetail::Unreachable {
                message,
                startup_hint,
            } => {
                assert!(message.contains(&base_url));
                assert_eq!(startup_hint, "mvn spring-boot:run");
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }
}

#[tokio::test]
async fn slow_endpoint_times_out_as_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let prober = Prober::new(&ProbeConfig::new(server.uri()).with_timeout(1)).unwrap();
    let specs = vec![EndpointSpec::get("Slow", "/slow", "")];

    let results = prober.probe_all(&specs, &mut apiprobe::prober::Silent).await;

    assert_eq!(results[0].outcome, ProbeOutcome::UnexpectedError);
    assert_eq!(results[0].status_code, None);
    assert!(matches!(results[0].detail, ProbeDetail::Failure(_)));
}

#[tokio::test]
async fn malformed_user_list_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let prober = prober_for(&server.uri());
    let specs = vec![
        EndpointSpec::get("Users", "/api/public/users", "").with_body(BodyKind::UserList),
        EndpointSpec::get("Next", "/api/public/next", ""),
    ];

    let results = prober.probe_all(&specs, &mut apiprobe::prober::Silent).await;

    assert_eq!(results[0].outcome, ProbeOutcome::UnexpectedError);
    assert_eq!(results[0].status_code, None);
    assert_eq!(results[1].status_code, Some(404));
}

#[tokio::test]
async fn repeated_runs_agree() {
    let server = backend().await;
    let prober = prober_for(&server.uri());
    let specs = catalog::public_endpoints();

    let first = prober.probe_all(&specs, &mut apiprobe::prober::Silent).await;
    let second = prober.probe_all(&specs, &mut apiprobe::prober::Silent).await;

    assert_eq!(outcome_pairs(&first), outcome_pairs(&second));
}

#[tokio::test]
async fn combined_run_saves_every_result() {
    colored::control::set_override(false);
    let server = backend().await;
    let prober = prober_for(&server.uri());

    let mut results = prober
        .probe_all(&catalog::public_endpoints(), &mut apiprobe::prober::Silent)
        .await;
    let spec = catalog::user_listing_endpoint(None).unwrap();
    results.push(
        prober
            .probe_user_listing(&spec, &mut apiprobe::prober::Silent)
            .await,
    );

    let table = ConsoleReporter::render_table(&results);
    assert!(table.find("/api/public/stats").unwrap() < table.find("/api/users/all").unwrap());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all.json");
    let path = path.to_str().unwrap();
    write_report(&SavedReport::new(prober.base_url(), &results), path).unwrap();

    let loaded = JsonExporter::load(path).unwrap();
    assert_eq!(loaded.results.len(), 5);
    assert_eq!(loaded.results[4].status_code, Some(401));
    assert!(matches!(loaded.results[4].detail, ProbeDetail::Unauthorized(_)));
    assert_eq!(loaded.summary.total, 5);
}
