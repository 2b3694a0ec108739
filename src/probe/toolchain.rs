use tokio::process::Command;

use crate::probe::ServiceStatus;

/// The stack's own runtime and build tool. Unlike the database probes these
/// are local and always reported reachable; only the version is best-effort.
pub async fn get_status() -> Vec<ServiceStatus> {
    vec![
        ServiceStatus {
            name: "Rust".to_string(),
            icon: "fa-code".to_string(),
            status: true,
            info: command_version("rustc").await,
        },
        ServiceStatus {
            name: "Cargo".to_string(),
            icon: "fa-box".to_string(),
            status: true,
            info: command_version("cargo").await,
        },
    ]
}

async fn command_version(program: &str) -> String {
    match Command::new(program).arg("--version").output().await {
        Ok(out) if out.status.success() => {
            parse_version_line(&String::from_utf8_lossy(&out.stdout))
        }
        _ => String::new(),
    }
}

/// "rustc 1.79.0 (129f3b996 2024-06-10)" -> "1.79.0"
fn parse_version_line(line: &str) -> String {
    line.split_whitespace().nth(1).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::parse_version_line;

    #[test]
    fn takes_version_token_from_tool_banner() {
        assert_eq!(parse_version_line("rustc 1.79.0 (129f3b996 2024-06-10)"), "1.79.0");
        assert_eq!(parse_version_line("cargo 1.79.0"), "1.79.0");
        assert_eq!(parse_version_line(""), "");
    }
}
