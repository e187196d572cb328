//! Mapping of dev-server API paths onto content files.

use std::path::{Component, Path, PathBuf};

/// Resolve a request path (`/about/`, `/blog/post.html`, `/docs/index.json`)
/// to a content file below `base_dir`.
///
/// An explicit `.json` or `.md` path wins if the file exists. Otherwise an
/// `index.html`, `index.json` or `.html` suffix and any trailing slash are
/// stripped, and `<p>.json`, `<p>.md`, `<p>/index.json`, `<p>/index.md` are
/// tried in that order. Paths that climb out of `base_dir` resolve to nothing.
pub fn resolve_api_path(base_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('/');

    if Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    if path.ends_with(".json") || path.ends_with(".md") {
        let direct = base_dir.join(path);
        if direct.is_file() {
            return Some(direct);
        }
    }

    let mut stem = path;
    for suffix in ["index.html", "index.json", ".html"] {
        if let Some(stripped) = stem.strip_suffix(suffix) {
            stem = stripped;
            break;
        }
    }
    let stem = stem.trim_end_matches('/');

    candidates(stem)
        .into_iter()
        .map(|candidate| base_dir.join(candidate))
        .find(|candidate| candidate.is_file())
}

fn candidates(stem: &str) -> Vec<String> {
    if stem.is_empty() {
        return vec!["index.json".to_string(), "index.md".to_string()];
    }

    vec![
        format!("{stem}.json"),
        format!("{stem}.md"),
        format!("{stem}/index.json"),
        format!("{stem}/index.md"),
    ]
}
