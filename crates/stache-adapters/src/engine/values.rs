//! Render data as the `mustache` library sees it.
//!
//! The library writes only strings through `{{name}}`, `{{{name}}}` and
//! `{{&name}}`; a boolean, list or object reaching one of those tags is a
//! hard panic inside the library. [`prepare`] walks the template against the
//! data with the library's own lookup rules and settles every such value
//! before rendering:
//!
//! - `true` is stored as the string `"true"`, which sections and inverted
//!   sections treat exactly like `true`.
//! - `false` that is only ever written becomes `"false"`; `false` that is
//!   also tested by a section becomes null and writes nothing.
//! - a list or object reaching a variable tag is an error.

use std::{
    collections::{HashMap, HashSet},
    fs,
};

use mustache::{Context, Data};
use serde_json::{Map, Value};

/// Partial inclusions followed before giving up on a recursive template.
const MAX_PARTIAL_DEPTH: usize = 64;

/// Build the library value for `data`, checked against `template`.
///
/// `template` must already have compiled; partials are read from the same
/// place the library reads them.
pub(super) fn prepare(
    template: &str,
    data: &Map<String, Value>,
    context: &Context,
) -> Result<Data, String> {
    let nodes = parse(template);
    let mut partials = HashMap::new();
    load_partials(&nodes, context, &mut partials);

    let mut root = Data::Map(to_map(data));
    let mut walker = Walker {
        partials: &partials,
        printed: HashSet::new(),
        tested: HashSet::new(),
    };
    walker.walk(&nodes, &mut vec![&root], 0)?;

    let Walker {
        printed, tested, ..
    } = walker;
    if !printed.is_empty() {
        settle(&mut root, &printed, &tested);
    }
    Ok(root)
}

fn to_data(value: &Value) -> Data {
    match value {
        Value::Null => Data::Null,
        Value::Bool(true) => Data::String("true".to_owned()),
        Value::Bool(false) => Data::Bool(false),
        Value::Number(n) => Data::String(n.to_string()),
        Value::String(s) => Data::String(s.clone()),
        Value::Array(items) => Data::Vec(items.iter().map(to_data).collect()),
        Value::Object(map) => Data::Map(to_map(map)),
    }
}

fn to_map(map: &Map<String, Value>) -> HashMap<String, Data> {
    map.iter().map(|(k, v)| (k.clone(), to_data(v))).collect()
}

/// Rewrite the `false` values the walk saw written out.
fn settle(data: &mut Data, printed: &HashSet<*const Data>, tested: &HashSet<*const Data>) {
    let key = &*data as *const Data;
    match data {
        Data::Bool(false) if printed.contains(&key) => {
            *data = if tested.contains(&key) {
                Data::Null
            } else {
                Data::String("false".to_owned())
            };
        }
        Data::Vec(items) => items.iter_mut().for_each(|item| settle(item, printed, tested)),
        Data::Map(map) => map.values_mut().for_each(|value| settle(value, printed, tested)),
        _ => {}
    }
}

// ── Template structure ───────────────────────────────────────────────────────

/// The parts of a template that look values up.
#[derive(Debug, PartialEq)]
enum Node {
    /// `{{a.b}}`, `{{{a.b}}}` or `{{&a.b}}`; an empty path is `{{.}}`.
    Variable(Vec<String>),
    Section {
        path: Vec<String>,
        inverted: bool,
        children: Vec<Node>,
    },
    Partial(String),
}

/// Tag structure of an already-compiled template.
///
/// Follows the library's tag grammar, including `{{=<% %>=}}` delimiter
/// changes; text and comments are dropped.
fn parse(source: &str) -> Vec<Node> {
    let mut otag = "{{".to_owned();
    let mut ctag = "}}".to_owned();
    let mut nodes = Vec::new();
    let mut open: Vec<(Vec<String>, bool, Vec<Node>)> = Vec::new();
    let mut rest = source;

    while let Some(start) = rest.find(otag.as_str()) {
        let after = &rest[start + otag.len()..];
        // The first `}` of a triple mustache belongs to the tag body.
        let body_from = if after.starts_with('{') {
            match after.find('}') {
                Some(i) => i + 1,
                None => break,
            }
        } else {
            0
        };
        let Some(close) = after[body_from..].find(ctag.as_str()) else {
            break;
        };
        let content = &after[..body_from + close];
        rest = &after[body_from + close + ctag.len()..];

        let Some(sigil) = content.chars().next() else {
            continue;
        };
        match sigil {
            '!' => {}
            '&' => nodes.push(Node::Variable(name_path(&content[1..]))),
            '{' => {
                let inner = content[1..].strip_suffix('}').unwrap_or(&content[1..]);
                nodes.push(Node::Variable(name_path(inner)));
            }
            '#' | '^' => {
                let path = name_path(&content[1..]);
                open.push((path, sigil == '^', std::mem::take(&mut nodes)));
            }
            '/' => {
                let Some((path, inverted, parent)) = open.pop() else {
                    break;
                };
                let children = std::mem::replace(&mut nodes, parent);
                nodes.push(Node::Section {
                    path,
                    inverted,
                    children,
                });
            }
            '>' => nodes.push(Node::Partial(content[1..].trim().to_owned())),
            '=' => {
                let spec = content[1..].strip_suffix('=').unwrap_or_default().trim();
                let Some((o, c)) = spec.split_once(char::is_whitespace) else {
                    break;
                };
                otag = o.to_owned();
                ctag = c.trim_start().to_owned();
            }
            _ => nodes.push(Node::Variable(name_path(content))),
        }
    }

    nodes
}

fn name_path(name: &str) -> Vec<String> {
    match name.trim() {
        "." => Vec::new(),
        name => name.split_terminator('.').map(str::to_owned).collect(),
    }
}

/// Parse every partial reachable from `nodes`, once each. Missing files are
/// empty partials, as in the library.
fn load_partials(nodes: &[Node], context: &Context, partials: &mut HashMap<String, Vec<Node>>) {
    for node in nodes {
        match node {
            Node::Partial(name) if !partials.contains_key(name) => {
                partials.insert(name.clone(), Vec::new());
                let path = context
                    .template_path
                    .join(format!("{}.{}", name, context.template_extension));
                if let Ok(source) = fs::read_to_string(path) {
                    let parsed = parse(&source);
                    load_partials(&parsed, context, partials);
                    partials.insert(name.clone(), parsed);
                }
            }
            Node::Section { children, .. } => load_partials(children, context, partials),
            _ => {}
        }
    }
}

// ── Walk ─────────────────────────────────────────────────────────────────────

struct Walker<'t> {
    partials: &'t HashMap<String, Vec<Node>>,
    /// `false` values reached by a variable tag.
    printed: HashSet<*const Data>,
    /// `false` values reached by a section or inverted section.
    tested: HashSet<*const Data>,
}

impl<'t> Walker<'t> {
    fn walk<'d>(
        &mut self,
        nodes: &'t [Node],
        stack: &mut Vec<&'d Data>,
        depth: usize,
    ) -> Result<(), String> {
        for node in nodes {
            match node {
                Node::Variable(path) => match find(path, stack) {
                    Some(value @ Data::Bool(_)) => {
                        self.printed.insert(value);
                    }
                    Some(Data::Vec(_)) => return Err(unprintable(path, "a list")),
                    Some(Data::Map(_)) => return Err(unprintable(path, "an object")),
                    _ => {}
                },
                Node::Section {
                    path,
                    inverted: false,
                    children,
                } => match find(path, stack) {
                    Some(value @ Data::Bool(_)) => {
                        self.tested.insert(value);
                    }
                    Some(Data::String(text)) if text.is_empty() => {}
                    Some(value @ (Data::String(_) | Data::Map(_))) => {
                        self.walk_in(value, children, stack, depth)?
                    }
                    Some(Data::Vec(items)) => {
                        for item in items {
                            self.walk_in(item, children, stack, depth)?;
                        }
                    }
                    _ => {}
                },
                Node::Section {
                    path,
                    inverted: true,
                    children,
                } => {
                    let value = find(path, stack);
                    if let Some(flag @ Data::Bool(_)) = value {
                        self.tested.insert(flag);
                    }
                    let falsy = match value {
                        None | Some(Data::Null) | Some(Data::Bool(false)) => true,
                        Some(Data::Vec(items)) => items.is_empty(),
                        _ => false,
                    };
                    if falsy {
                        self.walk(children, stack, depth)?;
                    }
                }
                Node::Partial(name) => {
                    let partials = self.partials;
                    if let Some(included) = partials.get(name) {
                        if depth >= MAX_PARTIAL_DEPTH {
                            return Err(format!(
                                "partial '{name}' nests deeper than {MAX_PARTIAL_DEPTH} levels"
                            ));
                        }
                        self.walk(included, stack, depth + 1)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn walk_in<'d>(
        &mut self,
        frame: &'d Data,
        nodes: &'t [Node],
        stack: &mut Vec<&'d Data>,
        depth: usize,
    ) -> Result<(), String> {
        stack.push(frame);
        let result = self.walk(nodes, stack, depth);
        stack.pop();
        result
    }
}

/// Context-stack lookup, identical to the library's.
fn find<'d>(path: &[String], stack: &[&'d Data]) -> Option<&'d Data> {
    let Some((first, rest)) = path.split_first() else {
        return stack.last().copied();
    };

    let mut value = stack.iter().rev().find_map(|&frame| match frame {
        Data::Map(map) => map.get(first),
        _ => None,
    })?;

    for part in rest {
        value = match value {
            Data::Map(map) => map.get(part)?,
            _ => return None,
        };
    }
    Some(value)
}

fn unprintable(path: &[String], kind: &str) -> String {
    let name = if path.is_empty() {
        ".".to_owned()
    } else {
        path.join(".")
    };
    format!("tag '{name}' refers to {kind}, which cannot be written as text")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn context() -> Context {
        Context::new(PathBuf::from("."))
    }

    fn prepared(template: &str, data: Value) -> Result<Data, String> {
        let Value::Object(map) = data else {
            panic!("test data must be an object");
        };
        prepare(template, &map, &context())
    }

    fn field<'d>(data: &'d Data, key: &str) -> &'d Data {
        match data {
            Data::Map(map) => &map[key],
            other => panic!("not a map: {other:?}"),
        }
    }

    fn var(path: &[&str]) -> Node {
        Node::Variable(path.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn parse_variable_forms() {
        assert_eq!(
            parse("{{a}} {{{b}}} {{& c.d }} {{.}} {{! note }}"),
            vec![var(&["a"]), var(&["b"]), var(&["c", "d"]), var(&[])]
        );
    }

    #[test]
    fn parse_nested_sections_and_partials() {
        let nodes = parse("{{#list}}{{^empty}}{{> row}}{{/empty}}{{/list}}");
        assert_eq!(
            nodes,
            vec![Node::Section {
                path: vec!["list".into()],
                inverted: false,
                children: vec![Node::Section {
                    path: vec!["empty".into()],
                    inverted: true,
                    children: vec![Node::Partial("row".into())],
                }],
            }]
        );
    }

    #[test]
    fn parse_follows_delimiter_changes() {
        assert_eq!(
            parse("{{=<% %>=}}<% a %> {{b}} <%={{ }}=%>{{c}}"),
            vec![var(&["a"]), var(&["c"])]
        );
    }

    #[test]
    fn true_is_stored_as_text() {
        let data = prepared("{{#on}}x{{/on}}", json!({ "on": true })).unwrap();
        assert_eq!(field(&data, "on"), &Data::String("true".into()));
    }

    #[test]
    fn written_false_becomes_text() {
        let data = prepared("{{off}}", json!({ "off": false })).unwrap();
        assert_eq!(field(&data, "off"), &Data::String("false".into()));
    }

    #[test]
    fn tested_false_stays_false() {
        let data = prepared("{{^off}}x{{/off}}", json!({ "off": false })).unwrap();
        assert_eq!(field(&data, "off"), &Data::Bool(false));
    }

    #[test]
    fn written_and_tested_false_becomes_null() {
        let data = prepared("{{off}}{{^off}}x{{/off}}", json!({ "off": false })).unwrap();
        assert_eq!(field(&data, "off"), &Data::Null);
    }

    #[test]
    fn false_inside_list_written_by_implicit_iterator() {
        let data = prepared("{{#flags}}{{.}}{{/flags}}", json!({ "flags": [false] })).unwrap();
        assert_eq!(
            field(&data, "flags"),
            &Data::Vec(vec![Data::String("false".into())])
        );
    }

    #[test]
    fn written_list_is_rejected() {
        let err = prepared("{{items}}", json!({ "items": [1, 2] })).unwrap_err();
        assert!(err.contains("'items'") && err.contains("a list"), "{err}");
    }

    #[test]
    fn written_object_is_rejected() {
        let err = prepared("{{{user}}}", json!({ "user": { "name": "ada" } })).unwrap_err();
        assert!(err.contains("an object"), "{err}");
    }

    #[test]
    fn implicit_iterator_over_objects_is_rejected() {
        let err = prepared("{{#rows}}{{.}}{{/rows}}", json!({ "rows": [{ "a": 1 }] })).unwrap_err();
        assert!(err.contains("tag '.'"), "{err}");
    }

    #[test]
    fn unvisited_branches_are_not_checked() {
        let data = json!({ "show": false, "items": [1] });
        assert!(prepared("{{#show}}{{items}}{{/show}}", data).is_ok());
    }

    #[test]
    fn lookup_falls_back_through_the_stack() {
        let data = json!({ "flag": false, "rows": [{ "n": 1 }] });
        let data = prepared("{{#rows}}{{flag}}{{/rows}}", data).unwrap();
        assert_eq!(field(&data, "flag"), &Data::String("false".into()));
    }

    #[test]
    fn partials_are_checked_too() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("row.mustache"), "{{items}}").unwrap();
        let Value::Object(map) = json!({ "items": [1] }) else {
            unreachable!()
        };

        let err = prepare("{{> row}}", &map, &Context::new(dir.path().to_path_buf())).unwrap_err();
        assert!(err.contains("a list"), "{err}");
    }

    #[test]
    fn recursive_partial_is_bounded() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("loop.mustache"), "{{> loop}}").unwrap();
        let err = prepare("{{> loop}}", &Map::new(), &Context::new(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(err.contains("nests deeper"), "{err}");
    }
}
