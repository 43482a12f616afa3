use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the canonical root route.
pub const ROOT_PATH: &str = "/";

/// One node of the application's declared route tree.
///
/// Only `path` and `routes` participate in the namespace transform; every
/// other attribute (component reference, redirects, metadata) rides along in
/// `extra` and is copied verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteNode>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl RouteNode {
    pub fn leaf(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            routes: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_children(path: impl Into<String>, routes: Vec<RouteNode>) -> Self {
        Self {
            path: Some(path.into()),
            routes,
            extra: serde_json::Map::new(),
        }
    }

    /// Whether this node is a canonical root (`path == "/"`).
    pub fn is_root(&self) -> bool {
        self.path.as_deref() == Some(ROOT_PATH)
    }
}

/// Produce a route list that additionally serves the application under
/// `/{namespace}`.
///
/// The first top-level root node is deep-copied, the copy is reparented at
/// `/{namespace}`, and every descendant path in the copy is prefixed by
/// plain string concatenation. Descendants with no path, an empty path, or a
/// path of exactly `/` keep their path untouched; their nesting alone places
/// them under the namespaced parent. The copy is prepended so namespaced
/// matches win during route resolution.
///
/// The input is never mutated. With no root node present the input is
/// returned as-is (a content-identical copy). The transform is deliberately
/// not idempotent: each application prepends another namespaced copy.
pub fn namespace_routes(routes: &[RouteNode], namespace: &str) -> Vec<RouteNode> {
    let Some(root) = routes.iter().find(|node| node.is_root()) else {
        tracing::debug!(namespace, "no root route; namespace transform is a no-op");
        return routes.to_vec();
    };
    if routes.iter().filter(|node| node.is_root()).count() > 1 {
        tracing::debug!(namespace, "multiple root routes; only the first is namespaced");
    }

    let prefix = format!("/{namespace}");
    let mut copy = root.clone();
    copy.path = Some(prefix.clone());
    prefix_descendants(&mut copy.routes, &prefix);

    let mut out = Vec::with_capacity(routes.len() + 1);
    out.push(copy);
    out.extend(routes.iter().cloned());
    out
}

fn prefix_descendants(routes: &mut [RouteNode], prefix: &str) {
    for node in routes {
        prefix_descendants(&mut node.routes, prefix);
        if let Some(path) = node.path.as_mut()
            && !path.is_empty()
            && path.as_str() != ROOT_PATH
        {
            *path = format!("{prefix}{path}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop_tree() -> Vec<RouteNode> {
        vec![RouteNode::with_children(
            "/",
            vec![RouteNode::leaf("/a"), RouteNode::leaf("/b/c")],
        )]
    }

    #[test]
    fn namespaced_copy_is_prepended_and_original_kept() {
        let input = shop_tree();
        let out = namespace_routes(&input, "shop");

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].path.as_deref(), Some("/shop"));
        assert_eq!(out[0].routes[0].path.as_deref(), Some("/shop/a"));
        assert_eq!(out[0].routes[1].path.as_deref(), Some("/shop/b/c"));
        assert_eq!(out[1], input[0]);
    }

    #[test]
    fn input_tree_is_not_mutated() {
        let input = shop_tree();
        let snapshot = input.clone();
        let _ = namespace_routes(&input, "shop");
        assert_eq!(input, snapshot);
    }

    #[test]
    fn applying_twice_grows_the_list() {
        let once = namespace_routes(&shop_tree(), "shop");
        let twice = namespace_routes(&once, "shop");

        assert_eq!(twice.len(), 3);
        assert_eq!(twice[0].path.as_deref(), Some("/shop"));
        assert_eq!(twice[1].path.as_deref(), Some("/shop"));
        assert_eq!(twice[2].path.as_deref(), Some("/"));
    }

    #[test]
    fn only_first_root_is_namespaced() {
        let input = vec![
            RouteNode::with_children("/", vec![RouteNode::leaf("/first")]),
            RouteNode::with_children("/", vec![RouteNode::leaf("/second")]),
        ];
        let out = namespace_routes(&input, "ns");

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].routes[0].path.as_deref(), Some("/ns/first"));
        assert_eq!(out[1], input[0]);
        assert_eq!(out[2], input[1]);
    }

    #[test]
    fn no_root_means_no_change() {
        let input = vec![RouteNode::leaf("/about"), RouteNode::leaf("/contact")];
        assert_eq!(namespace_routes(&input, "shop"), input);
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(namespace_routes(&[], "shop").is_empty());
    }

    #[test]
    fn pathless_and_root_descendants_stay_untouched() {
        let mut layout = RouteNode {
            path: None,
            routes: vec![RouteNode::leaf("/inner")],
            extra: serde_json::Map::new(),
        };
        layout
            .extra
            .insert("component".into(), Value::String("Layout".into()));
        let index = RouteNode::leaf("/");
        let empty = RouteNode::leaf("");
        let input = vec![RouteNode::with_children("/", vec![layout, index, empty])];

        let out = namespace_routes(&input, "shop");
        let copy = &out[0];
        assert_eq!(copy.routes[0].path, None);
        assert_eq!(copy.routes[0].routes[0].path.as_deref(), Some("/shop/inner"));
        assert_eq!(copy.routes[1].path.as_deref(), Some("/"));
        assert_eq!(copy.routes[2].path.as_deref(), Some(""));
    }

    #[test]
    fn extra_attributes_are_copied_verbatim() {
        let mut root = RouteNode::with_children("/", vec![RouteNode::leaf("/a")]);
        root.extra
            .insert("component".into(), Value::String("App".into()));
        root.extra.insert("exact".into(), Value::Bool(true));

        let out = namespace_routes(&[root.clone()], "shop");
        assert_eq!(out[0].extra, root.extra);
        assert_eq!(out[1].extra, root.extra);
    }

    #[test]
    fn prefix_is_plain_concatenation() {
        // Relative descendant paths are not normalized before prefixing.
        let input = vec![RouteNode::with_children("/", vec![RouteNode::leaf("a")])];
        let out = namespace_routes(&input, "shop");
        assert_eq!(out[0].routes[0].path.as_deref(), Some("/shopa"));
    }

    #[test]
    fn route_nodes_round_trip_extra_fields_through_json() {
        let raw = serde_json::json!({
            "path": "/",
            "component": "App",
            "routes": [{ "path": "/a", "exact": true }]
        });
        let node: RouteNode = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(node.extra["component"], Value::String("App".into()));
        assert_eq!(node.routes[0].extra["exact"], Value::Bool(true));
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }
}
