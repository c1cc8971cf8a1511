use crate::models::{EndpointSpec, HttpMethod};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const DB_CONSOLE_PATH: &str = "/h2-console";

/// Manual-query cheat sheet printed after a run.
pub fn render_usage_hints(base_url: &str, specs: &[EndpointSpec]) -> String {
    let mut lines = vec!["🎯 Available endpoints:".to_string()];
    for spec in specs {
        if spec.description.is_empty() {
            lines.push(format!("   • {} {}", spec.method, spec.path));
        } else {
            lines.push(format!(
                "   • {} {} - {}",
                spec.method, spec.path, spec.description
            ));
        }
    }

    lines.push(String::new());
    lines.push("💡 To query them manually:".to_string());
    for spec in specs {
        lines.push(format!("   • {}", curl_command(base_url, spec)));
    }

    lines.join("\n")
}

fn curl_command(base_url: &str, spec: &EndpointSpec) -> String {
    match spec.method {
        HttpMethod::Get => format!("curl {}{}", base_url, spec.path),
        HttpMethod::Head => format!("curl -I {}{}", base_url, spec.path),
    }
}

pub fn unauthorized_guidance(base_url: &str) -> Vec<String> {
    vec![
        "💡 The endpoint requires authentication: send a valid JWT bearer token.".to_string(),
        "🔑 Ways to get access:".to_string(),
        format!("   1. Log in through {}{}", base_url, LOGIN_PATH),
        format!(
            "   2. Query the database directly in the console at {}{}",
            base_url, DB_CONSOLE_PATH
        ),
    ]
}

pub fn startup_guidance(startup_hint: &str) -> Vec<String> {
    vec![
        "💡 The server may not be running.".to_string(),
        "🚀 To start it:".to_string(),
        format!("   {}", startup_hint),
    ]
}

/// Steps for reading users straight from the embedded database console.
pub fn render_db_console_hint(base_url: &str) -> String {
    [
        "🌐 Alternative: database console".to_string(),
        "=".repeat(30),
        "Users can be inspected directly in the database:".to_string(),
        "1. Open a browser".to_string(),
        format!("2. Go to {}{}", base_url, DB_CONSOLE_PATH),
        "3. Connect with:".to_string(),
        "   - JDBC URL: jdbc:h2:mem:testdb".to_string(),
        "   - User: sa".to_string(),
        "4. Run: SELECT * FROM users;".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_hints_list_every_endpoint() {
        let specs = vec![
            EndpointSpec::get("Hello", "/api/public/hello", "Greeting"),
            EndpointSpec::from_path(HttpMethod::Head, "/api/public/info".to_string()),
        ];
        let hints = render_usage_hints("http://localhost:8080", &specs);

        assert!(hints.contains("GET /api/public/hello - Greeting"));
        assert!(hints.contains("HEAD /api/public/info"));
        assert!(hints.contains("curl http://localhost:8080/api/public/hello"));
        assert!(hints.contains("curl -I http://localhost:8080/api/public/info"));
    }

    #[test]
    fn test_unauthorized_guidance_names_alternatives() {
        let text = unauthorized_guidance("http://localhost:8080").join("\n");
        assert!(text.contains("http://localhost:8080/api/auth/login"));
        assert!(text.contains("http://localhost:8080/h2-console"));
        assert!(text.contains("JWT"));
    }

    #[test]
    fn test_db_console_hint() {
        let text = render_db_console_hint("http://127.0.0.1:9000");
        assert!(text.contains("http://127.0.0.1:9000/h2-console"));
        assert!(text.contains("SELECT * FROM users;"));
    }
}
