use routekit::route::{load_routes, parse_routes};
use routekit::{HandlerRef, Method, Router, RouterConfig};

mod common;
use common::fixtures::BLOG_YAML;
use common::temp_files;

const BLOG_JSON: &str = r#"{
  "routes": [
    { "name": "home", "method": "get", "path": "/", "handler": { "function": "pages::home" } },
    {
      "name": "posts.show",
      "method": "GET",
      "path": "/posts/{id}",
      "handler": { "function": "posts::show" },
      "parameters": { "id": "\\d+" }
    }
  ]
}"#;

const BLOG_TOML: &str = r#"
[[routes]]
name = "home"
method = "GET"
path = "/"
handler = { function = "pages::home" }

[[routes]]
name = "posts.show"
method = "GET"
path = "/posts/{id}"
handler = { method = { type = "PostController", name = "show" } }
parameters = { id = '\d+' }
"#;

#[test]
fn test_yaml_table_keeps_file_order_and_handlers() {
    let path = temp_files::create_temp_yaml(BLOG_YAML);
    let routes = load_routes(&path).unwrap();

    let names: Vec<_> = routes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["home", "posts.show", "posts.create"]);
    assert_eq!(routes[0].handler, HandlerRef::Function("pages::home".into()));
    assert_eq!(
        routes[1].handler,
        HandlerRef::Method {
            type_name: "PostController".into(),
            name: "show".into()
        }
    );
    assert_eq!(routes[2].handler, HandlerRef::Closure("create_post".into()));
    assert_eq!(routes[2].method, Method::POST);
    assert_eq!(routes[1].parameters["id"].regex, r"\d+");

    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_all_formats_build_equivalent_routers() {
    let from_json = parse_routes(BLOG_JSON, "json").unwrap();
    let from_toml = parse_routes(BLOG_TOML, "toml").unwrap();
    assert_eq!(from_json[0].method, Method::GET);

    for routes in [from_json, from_toml] {
        let router = Router::from_definitions(routes, RouterConfig::default()).unwrap();
        let m = router.route(Method::GET, "/posts/5").unwrap();
        assert_eq!(m.route_name(), "posts.show");
        assert!(router.route(Method::GET, "/posts/five").is_none());
    }
}

#[test]
fn test_unreadable_or_unknown_tables_fail() {
    let missing = temp_files::temp_path("yaml");
    assert!(load_routes(&missing).is_err());

    let txt = temp_files::create_temp_table("routes: []", "txt");
    assert!(load_routes(&txt).is_err());

    let bad = temp_files::create_temp_yaml("routes:\n  - name: x\n    path: /x\n");
    assert!(load_routes(&bad).is_err());

    temp_files::cleanup_temp_files(&[txt, bad]);
}
