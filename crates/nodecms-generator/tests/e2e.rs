//! End-to-end tests for nodecms.
//!
//! These tests build small sites in temporary directories and check the
//! generated output.

use std::{
    fs,
    path::{Path, PathBuf},
};

use nodecms_core::{Config, Phase};
use nodecms_generator::Builder;
use nodecms_render::ERROR_CLASS;
use serde_json::json;
use tempfile::TempDir;

struct Site {
    _dir: TempDir,
    config: Config,
}

impl Site {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let mut config = Config::default();
        config.content.base = path_string(&dir.path().join("pages"));
        config.build.output_dir = path_string(&dir.path().join("dist"));
        config.collections.root = path_string(&dir.path().join("collections"));
        fs::create_dir_all(config.content_dir()).expect("create pages");
        Self { _dir: dir, config }
    }

    fn page(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.config.content_dir().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, content).expect("write page");
        path
    }

    fn output(&self, relative: &str) -> PathBuf {
        self.config.output_dir().join(relative)
    }

    fn builder(&self) -> Builder {
        Builder::from_config(self.config.clone())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn text_page(body: &str) -> String {
    json!({
        "type": "page",
        "attributes": {
            "title": "Page",
            "content": [{"type": "text", "attributes": {"body": body}}]
        }
    })
    .to_string()
}

#[test]
fn test_partial_failure_keeps_going() {
    let site = Site::new();
    site.page("file1.json", &text_page("one"));
    site.page("file2.json", "{ \"type\": ");
    site.page("file3.json", &text_page("three"));
    site.page("file4.json", "not json at all");
    site.page("file5.json", &text_page("five"));

    let report = site.builder().build_report();
    assert_eq!(report.outputs.len(), 3);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors.iter().all(|e| e.phase() == Phase::JsonParsing));
    assert!(report.errors[0].file_path().ends_with("file2.json"));
    assert!(report.errors[1].file_path().ends_with("file4.json"));

    for name in ["file1.html", "file3.html", "file5.html"] {
        assert!(site.output(name).exists(), "{name} should exist");
    }
    assert!(!site.output("file2.html").exists());
    assert!(!site.output("file4.html").exists());

    let err = site.builder().build_all().unwrap_err();
    assert_eq!(err.phase(), Phase::JsonParsing);
}

#[test]
fn test_nested_output_layout() {
    let site = Site::new();
    site.page("blog/2024/post.json", &text_page("post"));

    let outputs = site.builder().build_all().expect("build");
    assert_eq!(outputs, [site.output("blog/2024/post.html")]);
    assert!(site.output("assets/styles.css").exists());
}

#[test]
fn test_build_is_deterministic() {
    let site = Site::new();
    site.page(
        "index.json",
        &json!({
            "type": "page",
            "attributes": {
                "title": "Home",
                "description": "A test site",
                "content": [
                    {"type": "grid", "attributes": {"content": [
                        {"type": "grid-item", "attributes": {"columnSpan": 4, "content": [
                            {"type": "box", "attributes": {"preset": "highlight", "content": [
                                {"type": "markdown", "attributes": {"content": "**bold**"}}
                            ]}}
                        ]}}
                    ]}},
                    {"type": "image", "attributes": {"hash": "abc", "filename": "cat", "caption": "A cat"}}
                ]
            }
        })
        .to_string(),
    );

    site.builder().build_all().expect("first build");
    let first = fs::read_to_string(site.output("index.html")).expect("read");
    site.builder().build_all().expect("second build");
    let second = fs::read_to_string(site.output("index.html")).expect("read");

    assert_eq!(first, second);
    assert!(first.contains("<title>Home</title>"));
    assert!(first.contains(r#"<meta name="description" content="A test site">"#));
    assert!(first.contains("--node-grid-item--column-span: 4"));
    assert!(first.contains("nodebox--highlight"));
    assert!(first.contains("<strong>bold</strong>"));
    assert!(first.contains("./assets/media/abc/"));
    assert!(!first.contains(ERROR_CLASS));
}

#[test]
fn test_unknown_component_renders_inline_error() {
    let site = Site::new();
    site.page(
        "index.json",
        &json!({
            "type": "page",
            "attributes": {"content": [
                {"type": "text", "attributes": {"body": "before"}},
                {"type": "video", "attributes": {"src": "a.mp4"}},
                {"type": "text", "attributes": {"body": "after"}}
            ]}
        })
        .to_string(),
    );

    site.builder().build_all().expect("build");
    let html = fs::read_to_string(site.output("index.html")).expect("read");

    assert_eq!(html.matches(ERROR_CLASS).count(), 1);
    assert!(html.contains("Component for type 'video' is not registered."));
    assert!(html.contains("<p>before</p>"));
    assert!(html.contains("<p>after</p>"));
}

#[test]
fn test_markdown_pages() {
    let mut site = Site::new();
    site.config.content.pattern = "**/*.md".to_string();
    site.page("guides/getting-started.md", "# Setup\n\n```rust\nfn main() {}\n```\n");
    site.page(
        "about.md",
        "---\ntitle: About Us\nlang: fr\ndescription: Who we are\n---\nHello",
    );

    let outputs = site.builder().build_all().expect("build");
    assert_eq!(outputs.len(), 2);

    let guide = fs::read_to_string(site.output("guides/getting-started.html")).expect("read");
    assert!(guide.contains("<title>Getting Started</title>"));
    assert!(guide.contains("<h1>Setup</h1>"));
    assert!(guide.contains("<pre"));

    let about = fs::read_to_string(site.output("about.html")).expect("read");
    assert!(about.contains(r#"<html lang="fr">"#));
    assert!(about.contains("<title>About Us</title>"));
    assert!(about.contains(r#"<meta name="description" content="Who we are">"#));
}

#[test]
fn test_custom_stylesheet() {
    let mut site = Site::new();
    let custom = site.config.content_dir().with_file_name("site.css");
    fs::write(&custom, "body { color: rebeccapurple; }").expect("write css");
    site.config.build.stylesheet = "css/site.css".to_string();
    site.config.build.stylesheet_source = Some(path_string(&custom));
    site.page("index.json", &text_page("hi"));

    site.builder().build_all().expect("build");

    let css = fs::read_to_string(site.output("css/site.css")).expect("read css");
    assert_eq!(css, "body { color: rebeccapurple; }");
    let html = fs::read_to_string(site.output("index.html")).expect("read");
    assert!(html.contains(r#"<link rel="stylesheet" href="/css/site.css">"#));
}

#[test]
fn test_collection_overview_page() {
    let mut site = Site::new();
    site.page("index.json", &text_page("home"));

    let blog = site.config.collections_dir().join("blog");
    fs::create_dir_all(&blog).expect("mkdir");
    fs::write(
        blog.join("older.json"),
        r#"{"type": "page", "attributes": {"title": "Older", "date": "2023-05-01"}}"#,
    )
    .expect("write");
    fs::write(
        blog.join("newer.json"),
        r#"{"type": "page", "attributes": {"title": "Newer", "date": "2024-05-01"}}"#,
    )
    .expect("write");
    fs::write(
        blog.join("secret.json"),
        r#"{"type": "page", "attributes": {"title": "Secret", "draft": true}}"#,
    )
    .expect("write");
    site.config.collections.names = vec!["blog".to_string()];

    site.builder().build_all().expect("build");
    let html = fs::read_to_string(site.output("blog.html")).expect("read overview");

    assert!(html.contains("<h1>Blog</h1>"));
    assert!(html.contains("Welcome to the blog collection."));
    assert!(!html.contains("Secret"));
    let newer = html.find("Newer").expect("newer listed");
    let older = html.find("Older").expect("older listed");
    assert!(newer < older);
}

#[test]
fn test_live_reload_script() {
    let site = Site::new();
    site.page("index.json", &text_page("hi"));

    site.builder()
        .with_live_reload(true)
        .build_all()
        .expect("build");
    let html = fs::read_to_string(site.output("index.html")).expect("read");
    assert!(html.contains("/__livereload"));
}
