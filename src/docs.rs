//! Per-class descriptive metadata for renderers and the `--describe` report.
//!
//! Layout never consults this module. Entries come from a table prepared
//! ahead of time, either one JSON map or one `<Class>.json` file per class.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

static GENERIC_ARGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*>").expect("static regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDoc {
    #[serde(default)]
    pub modifiers: String,
    #[serde(default)]
    pub type_name: String,
    pub name: String,
    /// `None` for fields, parameter type names for methods.
    #[serde(default)]
    pub parameters: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDoc {
    pub description: Option<String>,
    pub since: Option<String>,
    #[serde(default)]
    pub characteristics: Vec<String>,
    pub usage: Option<String>,
    pub performance: Option<String>,
    pub package: Option<String>,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub methods: Vec<MemberDoc>,
    #[serde(default)]
    pub fields: Vec<MemberDoc>,
}

pub trait DocumentationProvider {
    fn lookup(&self, name: &str) -> Option<ClassDoc>;
}

/// `HashMap<K, V>` becomes `HashMap`.
pub fn raw_class_name(name: &str) -> String {
    GENERIC_ARGS.replace_all(name, "").trim().to_string()
}

#[derive(Debug, Clone, Default)]
pub struct StaticDocs {
    entries: BTreeMap<String, ClassDoc>,
}

impl StaticDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, doc: ClassDoc) {
        self.entries.insert(raw_class_name(name), doc);
    }

    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let entries: BTreeMap<String, ClassDoc> = serde_json::from_str(input)?;
        let mut docs = Self::new();
        for (name, doc) in entries {
            docs.insert(&name, doc);
        }
        Ok(docs)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DocumentationProvider for StaticDocs {
    fn lookup(&self, name: &str) -> Option<ClassDoc> {
        self.entries.get(&raw_class_name(name)).cloned()
    }
}

/// Reads `<dir>/<RawName>.json` on each lookup. Missing or unreadable files
/// are treated as unknown classes.
#[derive(Debug, Clone)]
pub struct DocsDir {
    root: PathBuf,
}

impl DocsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `None` when the name is empty or contains a path separator, so lookups
    /// stay inside the root directory.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        let raw = raw_class_name(name);
        if raw.is_empty() || raw.contains(['/', '\\']) {
            return None;
        }
        Some(self.root.join(format!("{raw}.json")))
    }
}

impl DocumentationProvider for DocsDir {
    fn lookup(&self, name: &str) -> Option<ClassDoc> {
        let Some(path) = self.path_for(name) else {
            log::warn!(name = name; "Rejecting class name with a path separator");
            return None;
        };
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(doc) => Some(doc),
            Err(err) => {
                log::warn!(path = path.display().to_string(), error = err.to_string(); "Ignoring malformed class documentation");
                None
            }
        }
    }
}

/// Loads a provider from a directory of per-class files or a single JSON map.
pub fn load_docs(path: &Path) -> anyhow::Result<Box<dyn DocumentationProvider>> {
    if path.is_dir() {
        return Ok(Box::new(DocsDir::new(path)));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(Box::new(StaticDocs::from_json(&contents)?))
}

/// Plain-text detail report for one class.
pub fn describe(name: &str, doc: &ClassDoc) -> String {
    let mut out = String::new();
    out.push_str(if doc.is_interface { "INTERFACE\n" } else { "CLASS\n" });
    let _ = writeln!(out, "Name: {name}");
    if let Some(package) = &doc.package {
        let _ = writeln!(out, "Package: {package}");
    }
    let _ = writeln!(out, "Since: {}\n", doc.since.as_deref().unwrap_or("N/A"));

    if let Some(description) = &doc.description {
        out.push_str("Description:\n");
        out.push_str(&wrap_text(description, 80));
        out.push_str("\n\n");
    }

    if !doc.characteristics.is_empty() {
        out.push_str("Characteristics:\n");
        for item in &doc.characteristics {
            let _ = writeln!(out, " • {item}");
        }
        out.push('\n');
    }

    for (title, text) in [("Usage", &doc.usage), ("Performance", &doc.performance)] {
        if let Some(text) = text {
            let _ = writeln!(out, "{title}:\n{}\n", wrap_text(text, 80));
        }
    }

    out.push_str("Methods:\n");
    let mut methods: Vec<&MemberDoc> = doc.methods.iter().collect();
    methods.sort_by(|a, b| a.name.cmp(&b.name));
    for method in methods {
        let params = method.parameters.as_deref().unwrap_or(&[]).join(", ");
        let _ = writeln!(
            out,
            "  {}{}{}({params})",
            prefix(&method.modifiers),
            prefix(&method.type_name),
            method.name
        );
    }

    if !doc.is_interface {
        out.push_str("\nFields:\n");
        for field in &doc.fields {
            let _ = writeln!(
                out,
                "  {}{}{}",
                prefix(&field.modifiers),
                prefix(&field.type_name),
                field.name
            );
        }
    }

    out
}

fn prefix(word: &str) -> String {
    if word.is_empty() {
        String::new()
    } else {
        format!("{word} ")
    }
}

/// Greedy word wrap; a word longer than `width` gets a line of its own.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array_list() -> ClassDoc {
        ClassDoc {
            description: Some("Resizable-array implementation of the List interface.".to_string()),
            since: Some("1.2".to_string()),
            characteristics: vec!["Ordered".to_string(), "Allows null".to_string()],
            methods: vec![
                MemberDoc {
                    modifiers: "public".to_string(),
                    type_name: "boolean".to_string(),
                    name: "add".to_string(),
                    parameters: Some(vec!["Object".to_string()]),
                },
                MemberDoc {
                    modifiers: "public".to_string(),
                    type_name: "void".to_string(),
                    name: "clear".to_string(),
                    parameters: Some(Vec::new()),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn strips_generic_arguments() {
        assert_eq!(raw_class_name("HashMap<K, V>"), "HashMap");
        assert_eq!(raw_class_name("List<E>"), "List");
        assert_eq!(raw_class_name("Deque"), "Deque");
    }

    #[test]
    fn static_docs_lookup_ignores_generics() {
        let mut docs = StaticDocs::new();
        docs.insert("ArrayList<E>", array_list());
        assert!(docs.lookup("ArrayList").is_some());
        assert!(docs.lookup("ArrayList<String>").is_some());
        assert!(docs.lookup("LinkedList").is_none());
    }

    #[test]
    fn static_docs_from_json_map() {
        let docs = StaticDocs::from_json(
            r#"{"Map<K, V>": {"description": "Maps keys to values.", "isInterface": true}}"#,
        )
        .unwrap();
        let doc = docs.lookup("Map").unwrap();
        assert!(doc.is_interface);
        assert!(doc.methods.is_empty());
    }

    #[test]
    fn describe_lists_sections_in_order() {
        let report = describe("ArrayList", &array_list());
        assert!(report.starts_with("CLASS\n"));
        assert!(report.contains("Since: 1.2"));
        assert!(report.contains(" • Allows null"));
        let add = report.find("public boolean add(Object)").unwrap();
        let clear = report.find("public void clear()").unwrap();
        assert!(add < clear);
        assert!(report.contains("\nFields:\n"));
    }

    #[test]
    fn describe_interface_has_no_fields_and_defaults_since() {
        let doc = ClassDoc {
            is_interface: true,
            ..Default::default()
        };
        let report = describe("Queue", &doc);
        assert!(report.starts_with("INTERFACE\n"));
        assert!(report.contains("Since: N/A"));
        assert!(!report.contains("Fields:"));
        assert!(!report.contains("Package:"));
    }

    #[test]
    fn describe_prints_known_package() {
        let doc = ClassDoc {
            package: Some("java.util.concurrent".to_string()),
            ..Default::default()
        };
        assert!(describe("ConcurrentMap", &doc).contains("Package: java.util.concurrent\n"));
    }

    #[test]
    fn wrap_text_respects_width() {
        let wrapped = wrap_text("one two three four five six seven", 10);
        assert!(wrapped.lines().all(|line| line.chars().count() <= 10));
        assert_eq!(wrapped.lines().count(), 4);
    }

    #[test]
    fn docs_dir_reads_per_class_files() {
        let dir = std::env::temp_dir().join(format!("hierarchy-docs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("TreeMap.json"), r#"{"since": "1.2"}"#).unwrap();
        std::fs::write(dir.join("Broken.json"), "{").unwrap();
        let docs = DocsDir::new(&dir);
        assert_eq!(docs.lookup("TreeMap<K, V>").unwrap().since.as_deref(), Some("1.2"));
        assert!(docs.lookup("Broken").is_none());
        assert!(docs.lookup("Missing").is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn docs_dir_stays_inside_its_root() {
        let base = std::env::temp_dir().join(format!("hierarchy-docs-root-{}", std::process::id()));
        let dir = base.join("class_info");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(base.join("Secret.json"), r#"{"since": "1.0"}"#).unwrap();
        let docs = DocsDir::new(&dir);
        assert!(docs.path_for("../Secret").is_none());
        assert!(docs.path_for("..\\Secret").is_none());
        assert!(docs.lookup("../Secret").is_none());
        assert_eq!(docs.path_for("List<E>"), Some(dir.join("List.json")));
        std::fs::remove_dir_all(&base).unwrap();
    }
}
