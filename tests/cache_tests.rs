use routekit::cache::{deserialize, load_cache, serialize, write_cache};
use routekit::{param_data, Method, Router, RouterConfig};
use std::io::Write;

mod common;
use common::fixtures::{blog_routes, get};
use common::temp_files;

const REQUESTS: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/posts"),
    ("POST", "/posts"),
    ("GET", "/posts/12"),
    ("GET", "/posts/12.json"),
    ("GET", "/posts/hello-world"),
    ("GET", "/tags/rust"),
    ("GET", "/search/cats/2"),
    ("GET", "/nowhere"),
    ("DELETE", "/posts/12"),
];

fn outcome(router: &Router, method: &str, path: &str) -> Option<(String, Vec<(String, String)>)> {
    let method = Method::from_bytes(method.as_bytes()).unwrap();
    router.route(method, path).map(|m| {
        let params = m
            .path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        (m.route_name().to_string(), params)
    })
}

#[test]
fn test_restored_router_behaves_identically() {
    let live = Router::from_definitions(blog_routes(), RouterConfig::default()).unwrap();
    let bytes = serialize(live.collection()).unwrap();
    let restored = Router::new(deserialize(&bytes).unwrap());

    for (method, path) in REQUESTS {
        assert_eq!(
            outcome(&live, method, path),
            outcome(&restored, method, path),
            "{} {}",
            method,
            path
        );
    }

    let data = param_data([("tag", vec!["a", "b"])]);
    assert_eq!(
        live.generate("tags.show", &data).unwrap(),
        restored.generate("tags.show", &data).unwrap()
    );

    let live_order: Vec<_> = live.all_routes().map(|r| r.name.clone()).collect();
    let restored_order: Vec<_> = restored.all_routes().map(|r| r.name.clone()).collect();
    assert_eq!(live_order, restored_order);
}

#[test]
fn test_write_and_load_cache_file() {
    let live = Router::from_definitions(blog_routes(), RouterConfig::default()).unwrap();
    let path = temp_files::temp_path("json");

    write_cache(live.collection(), &path).unwrap();
    let restored = load_cache(&path).unwrap();
    assert_eq!(restored.collection().len(), live.collection().len());
    assert_eq!(
        outcome(&restored, "GET", "/posts/12.json"),
        Some(("posts.show_json".to_string(), vec![("id".to_string(), "12".to_string())]))
    );

    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_truncated_cache_file_is_rejected() {
    let live = Router::from_definitions(blog_routes(), RouterConfig::default()).unwrap();
    let bytes = serialize(live.collection()).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes[..bytes.len() / 2]).unwrap();
    assert!(load_cache(file.path()).is_err());
}

#[test]
fn test_missing_cache_file_is_an_error() {
    let path = temp_files::temp_path("json");
    assert!(load_cache(&path).is_err());
}

#[test]
fn test_replaced_and_renamed_routes_survive_round_trip() {
    let live = Router::from_definitions(
        vec![
            get("/a", "x"),
            get("/a", "y"),
            get("/old/{id}", "item").with_param("id", r"\d+"),
            get("/new/{id}", "item").with_param("id", r"\d+"),
        ],
        RouterConfig::default(),
    )
    .unwrap();
    let restored = Router::new(deserialize(&serialize(live.collection()).unwrap()).unwrap());

    for (method, path) in [("GET", "/a"), ("GET", "/old/1"), ("GET", "/new/1")] {
        assert_eq!(outcome(&live, method, path), outcome(&restored, method, path));
    }
    assert_eq!(outcome(&restored, "GET", "/a").unwrap().0, "y");

    let empty = routekit::ParamData::new();
    let id = param_data([("id", 5)]);
    for (name, data) in [("x", &empty), ("y", &empty), ("item", &id)] {
        assert_eq!(live.generate(name, data), restored.generate(name, data));
    }
    assert_eq!(restored.generate("x", &empty).unwrap(), "/a");
    assert_eq!(restored.generate("item", &id).unwrap(), "/new/5");

    let names: Vec<_> = restored.all_routes().map(|r| r.name.clone()).collect();
    assert_eq!(names, ["y", "item", "item"]);
}
