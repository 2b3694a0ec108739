use std::fs;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

use serde::Serialize;

/// Executable script marking a directory as a runnable Laravel project.
pub const BOOTSTRAP_MARKER: &str = "artisan";
/// File web servers route external requests to.
pub const PUBLIC_ENTRY: &str = "public/index.php";
/// Dependency manifest the metadata is read from.
pub const MANIFEST: &str = "composer.json";

const FRAMEWORK_PACKAGE: &str = "laravel/framework";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: String,
    pub path: String,
    pub version: String,
    pub description: String,
    pub url: String,
    pub last_modified: i64,
}

/// Scans the immediate subdirectories of `base_dir` for Laravel projects.
///
/// A subdirectory qualifies when it holds both the `artisan` bootstrap script
/// and `public/index.php`. Candidates are visited in name order so discovery
/// does not depend on the filesystem's listing order, then sorted by manifest
/// mtime, newest first. A broken manifest in one project never aborts the
/// scan of the others.
pub fn scan_projects(base_dir: &Path) -> io::Result<Vec<ProjectInfo>> {
    let mut entries: Vec<_> = fs::read_dir(base_dir)?
        .filter_map(|entry| entry.ok())
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    let mut projects = Vec::new();
    for entry in entries {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if !path.join(BOOTSTRAP_MARKER).is_file() || !path.join(PUBLIC_ENTRY).is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        projects.push(read_project(&name, &path));
    }

    // sort_by is stable, so equal timestamps keep the name order from above
    projects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    Ok(projects)
}

fn read_project(name: &str, path: &Path) -> ProjectInfo {
    let manifest = path.join(MANIFEST);
    let (version, description) = read_manifest(&manifest);
    ProjectInfo {
        name: name.to_string(),
        path: path.display().to_string(),
        version,
        description,
        url: format!("/{}/", urlencoding::encode(name)),
        last_modified: last_modified(&manifest, path),
    }
}

/// Returns `(version, description)` from the manifest, falling back to
/// `("Unknown", "")` when the file is missing, unreadable, or not JSON.
fn read_manifest(manifest: &Path) -> (String, String) {
    let json: serde_json::Value = match fs::read_to_string(manifest) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(json) => json,
            Err(_) => return ("Unknown".to_string(), String::new()),
        },
        Err(_) => return ("Unknown".to_string(), String::new()),
    };

    let version = json
        .get("require")
        .and_then(|require| require.get(FRAMEWORK_PACKAGE))
        .and_then(|v| v.as_str())
        .map(strip_constraint)
        .unwrap_or_else(|| "Unknown".to_string());
    let description = json
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    (version, description)
}

/// "^10.2.0" -> "10.2.0", "~9.5" -> "9.5"
fn strip_constraint(raw: &str) -> String {
    raw.trim_start_matches(['^', '~']).to_string()
}

// Manifest mtime when present, directory mtime otherwise, zero as a last
// resort. Projects qualify without a manifest, so the timestamp needs a
// source that always exists.
fn last_modified(manifest: &Path, dir: &Path) -> i64 {
    mtime(manifest).or_else(|| mtime(dir)).unwrap_or(0)
}

fn mtime(path: &Path) -> Option<i64> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(modified.duration_since(UNIX_EPOCH).ok()?.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::strip_constraint;

    #[test]
    fn strips_caret_and_tilde_operators() {
        assert_eq!(strip_constraint("^10.2.0"), "10.2.0");
        assert_eq!(strip_constraint("~9.5"), "9.5");
        assert_eq!(strip_constraint("11.0"), "11.0");
    }
}
