#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Global counter and lock for thread-safe temporary file creation
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    static TEMP_LOCK: Mutex<()> = Mutex::new(());

    /// Unique path in the temp dir; nothing is written.
    pub fn temp_path(ext: &str) -> PathBuf {
        let _lock = TEMP_LOCK.lock().unwrap();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        std::env::temp_dir().join(format!(
            "routekit_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ))
    }

    /// Creates a temporary route table with guaranteed unique name
    pub fn create_temp_table(content: &str, ext: &str) -> PathBuf {
        let path = temp_path(ext);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Creates a temporary file with default yaml extension
    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_table(content, "yaml")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

pub mod fixtures {
    use routekit::{HandlerRef, Method, RouteDefinition};

    pub fn handler(name: &str) -> HandlerRef {
        HandlerRef::Function(name.to_string())
    }

    pub fn get(path: &str, name: &str) -> RouteDefinition {
        RouteDefinition::new(Method::GET, path, name, handler(name))
    }

    /// A small blog-shaped table exercising static, dynamic and list routes.
    pub fn blog_routes() -> Vec<RouteDefinition> {
        vec![
            get("/", "home"),
            get("/posts", "posts.index"),
            RouteDefinition::new(Method::POST, "/posts", "posts.create", handler("posts.create")),
            get("/posts/{id}", "posts.show").with_param("id", r"\d+"),
            get("/posts/{id}.json", "posts.show_json").with_param("id", r"\d+"),
            get("/posts/{slug}", "posts.by_slug").with_param("slug", "[a-z0-9-]+"),
            get("/tags/{tag}", "tags.show").with_param("tag", "[a-z]+"),
            get("/search/{q}/{page}", "search")
                .with_param("q", "[a-z]+")
                .with_param("page", r"\d+"),
        ]
    }

    pub const BLOG_YAML: &str = r#"
routes:
  - name: home
    method: GET
    path: /
    handler: { function: "pages::home" }
  - name: posts.show
    method: GET
    path: /posts/{id}
    handler: { method: { type: "PostController", name: "show" } }
    parameters:
      id: '\d+'
  - name: posts.create
    method: POST
    path: /posts
    handler: { closure: "create_post" }
"#;
}
