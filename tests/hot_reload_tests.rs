use routekit::hot_reload::{build_router, watch_routes};
use routekit::{Method, RouterConfig, RouterHandle};
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::temp_files;

const TABLE_V1: &str = r#"
routes:
  - name: foo_one
    method: GET
    path: /foo
    handler: { function: "foo::one" }
"#;

const TABLE_V2: &str = r#"
routes:
  - name: foo_two
    method: GET
    path: /foo
    handler: { function: "foo::two" }
  - name: bar
    method: GET
    path: /bar
    handler: { function: "bar" }
"#;

const TABLE_BROKEN: &str = r#"
routes:
  - name: broken
    method: GET
    path: /foo/{id
    handler: { function: "foo::broken" }
"#;

fn current_name(handle: &RouterHandle, path: &str) -> Option<String> {
    handle
        .load()
        .route(Method::GET, path)
        .map(|m| m.route_name().to_string())
}

fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn test_watch_routes_reload() {
    let path = temp_files::create_temp_yaml(TABLE_V1);
    let config = RouterConfig::default();
    let handle = Arc::new(RouterHandle::new(build_router(&path, config).unwrap()));
    assert_eq!(current_name(&handle, "/foo").as_deref(), Some("foo_one"));

    let watcher = watch_routes(&path, Arc::clone(&handle), config).expect("watch_routes");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    let snapshot = handle.load();
    std::fs::write(&path, TABLE_V2).unwrap();

    assert!(wait_for(|| current_name(&handle, "/bar").is_some()));
    assert_eq!(current_name(&handle, "/foo").as_deref(), Some("foo_two"));

    // an already loaded snapshot is unaffected
    assert_eq!(
        snapshot.route(Method::GET, "/foo").unwrap().route_name(),
        "foo_one"
    );

    drop(watcher);
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_broken_table_keeps_previous_routes() {
    let path = temp_files::create_temp_yaml(TABLE_V1);
    let config = RouterConfig::default();
    let handle = Arc::new(RouterHandle::new(build_router(&path, config).unwrap()));
    let watcher = watch_routes(&path, Arc::clone(&handle), config).expect("watch_routes");
    std::thread::sleep(Duration::from_millis(100));

    std::fs::write(&path, TABLE_BROKEN).unwrap();
    std::thread::sleep(Duration::from_millis(500));
    assert_eq!(current_name(&handle, "/foo").as_deref(), Some("foo_one"));

    std::fs::write(&path, TABLE_V2).unwrap();
    assert!(wait_for(|| current_name(&handle, "/bar").is_some()));

    drop(watcher);
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_build_router_rejects_broken_table() {
    let path = temp_files::create_temp_yaml(TABLE_BROKEN);
    assert!(build_router(&path, RouterConfig::default()).is_err());
    temp_files::cleanup_temp_files(&[path]);
}
