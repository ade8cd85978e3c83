use crate::graph::Verb;

use super::route::{Route, RouteMiss, RouteSegment, RouteTree, Terminal, parse_template};

fn lit(s: &str) -> RouteSegment {
    RouteSegment::Literal(s.to_string())
}

fn param(s: &str) -> RouteSegment {
    RouteSegment::Parameter(s.to_string())
}

fn tree(routes: &[(Verb, &str)]) -> RouteTree {
    RouteTree::build(
        routes
            .iter()
            .enumerate()
            .map(|(i, (verb, path))| Route::new(i, *verb, path))
            .collect(),
    )
}

#[test]
fn parse_template_splits_literals_and_parameters() {
    assert!(parse_template("").is_empty());
    assert_eq!(parse_template("/users"), [lit("/users")]);
    assert_eq!(parse_template("/users/{id}"), [lit("/users/"), param("id")]);
    assert_eq!(
        parse_template("/users/{userId}/posts/{postId}"),
        [lit("/users/"), param("userId"), lit("/posts/"), param("postId")]
    );
}

#[test]
fn parse_template_adjacent_parameters() {
    assert_eq!(
        parse_template("{a}{b}-{c}"),
        [param("a"), param("b"), lit("-"), param("c")]
    );
}

#[test]
fn parse_template_unterminated_parameter_takes_the_rest() {
    assert_eq!(parse_template("/files/{path"), [lit("/files/"), param("path")]);
}

#[test]
fn common_prefixes_merge_into_one_edge() {
    let tree = tree(&[
        (Verb::Get, "/users"),
        (Verb::Get, "/users/{id}"),
        (Verb::Get, "/usergroups"),
    ]);

    assert_eq!(tree.root.literals.len(), 1);
    assert_eq!(tree.root.literals[0].prefix, "/user");

    let user = &tree.root.literals[0].node;
    let prefixes: Vec<&str> = user.literals.iter().map(|e| e.prefix.as_str()).collect();
    assert_eq!(prefixes, ["s", "groups"]);
    assert!(user.terminals.is_empty());

    insta::assert_snapshot!(tree.to_string(), @r#"
    "/user"
      "s"
        GET #0
        "/"
          {id}
            GET #1
      "groups"
        GET #2
    "#);
}

#[test]
fn resolve_binds_parameters() {
    let tree = tree(&[
        (Verb::Get, "/users"),
        (Verb::Get, "/users/{id}"),
        (Verb::Get, "/usergroups"),
    ]);

    let found = tree.resolve(Verb::Get, "/users/42").unwrap();
    assert_eq!(found.endpoint, 1);
    assert_eq!(found.bindings, [("id".to_string(), "42".to_string())]);

    assert_eq!(tree.resolve(Verb::Get, "/users").unwrap().endpoint, 0);
    assert_eq!(tree.resolve(Verb::Get, "/usergroups").unwrap().endpoint, 2);
}

#[test]
fn resolve_misses() {
    let tree = tree(&[(Verb::Get, "/users"), (Verb::Get, "/users/{id}")]);

    assert_eq!(tree.resolve(Verb::Get, "/userz"), Err(RouteMiss::NotFound));
    assert_eq!(tree.resolve(Verb::Get, "/use"), Err(RouteMiss::NotFound));
    assert_eq!(tree.resolve(Verb::Get, "/users/"), Err(RouteMiss::NotFound));
    assert_eq!(tree.resolve(Verb::Get, "/users/1/x"), Err(RouteMiss::NotFound));
    assert_eq!(
        tree.resolve(Verb::Post, "/users"),
        Err(RouteMiss::MethodNotAllowed)
    );
}

#[test]
fn parameters_at_one_position_share_a_capture() {
    let tree = tree(&[
        (Verb::Get, "/pets/{petId}"),
        (Verb::Delete, "/pets/{id}"),
    ]);

    let pets = &tree.root.literals[0].node;
    let capture = pets.parameter.as_ref().unwrap();
    assert_eq!(capture.names, ["petId", "id"]);
    assert_eq!(capture.node.terminals.len(), 2);

    let found = tree.resolve(Verb::Delete, "/pets/7").unwrap();
    assert_eq!(found.endpoint, 1);
    assert_eq!(
        found.bindings,
        [
            ("petId".to_string(), "7".to_string()),
            ("id".to_string(), "7".to_string())
        ]
    );
}

#[test]
fn literal_edges_have_distinct_first_characters() {
    let tree = tree(&[
        (Verb::Get, "/a"),
        (Verb::Get, "/b"),
        (Verb::Get, "x"),
        (Verb::Get, "/ab"),
    ]);

    let firsts: Vec<char> = tree
        .root
        .literals
        .iter()
        .map(|e| e.prefix.chars().next().unwrap())
        .collect();
    assert_eq!(firsts, ['/', 'x']);
    assert_eq!(tree.resolve(Verb::Get, "/ab").unwrap().endpoint, 3);
    assert_eq!(tree.resolve(Verb::Get, "/b").unwrap().endpoint, 1);
}

#[test]
fn empty_template_is_a_root_terminal() {
    let tree = tree(&[(Verb::Get, "")]);

    assert_eq!(tree.root.terminals.len(), 1);
    assert_eq!(tree.resolve(Verb::Get, "").unwrap().endpoint, 0);
    assert_eq!(tree.resolve(Verb::Get, "/"), Err(RouteMiss::NotFound));
}

#[test]
fn duplicate_terminals_keep_the_first() {
    let tree = tree(&[
        (Verb::Get, "/pets"),
        (Verb::Post, "/pets"),
        (Verb::Get, "/pets"),
    ]);

    assert_eq!(
        tree.duplicate_terminals(),
        [(
            Terminal {
                endpoint: 0,
                verb: Verb::Get
            },
            Terminal {
                endpoint: 2,
                verb: Verb::Get
            }
        )]
    );
    assert_eq!(tree.resolve(Verb::Get, "/pets").unwrap().endpoint, 0);
}
