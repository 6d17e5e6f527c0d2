//! Completion queries through the project registry

use luadex::indexing::ProjectRegistry;
use luadex::{InheritanceResolver, ProjectIndexer, Query, QueryResolver, SymbolKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(
        root,
        ".luadex/settings.toml",
        "[indexing]\nsource_roots = [\"src\"]\n",
    );
    write(
        root,
        "src/core/Base.lua",
        r#"Base = class(nil, nil)

function Base:init()
end

function Base:destroy()
    self.alive = false
end
"#,
    );
    write(
        root,
        "src/core/Mixin.lua",
        "Mixin = class(nil, nil)\n\nfunction Mixin:mix(other)\nend\n",
    );
    write(
        root,
        "src/lib/b.lua",
        "VERSION = 1\n\nfunction helper(x, y)\nend\n\nWidget = class(nil)\n",
    );
    write(
        root,
        "src/cyc/A.lua",
        "local B = require(\"cyc.B\")\nA = class(nil, B)\nfunction A:fromA()\nend\n",
    );
    write(
        root,
        "src/cyc/B.lua",
        "local A = require(\"cyc.A\")\nB = class(nil, A)\nfunction B:fromB()\nend\n",
    );
    temp_dir
}

const PLAYER: &str = r#"local Base = require("core.Base")
local Mixin = require("core.Mixin")

Player = class(nil, Base)
implement(Player, Mixin)

function Player:jump(height)
    self.height = height
end

function Player:update(dt)
    self."#;

fn query(registry: &ProjectRegistry, file: &Path, buffer: &str, prefix: &str) -> Option<Vec<String>> {
    let query = Query {
        file_path: file,
        buffer,
        cursor: buffer.len(),
        prefix,
    };
    registry
        .query(&query)
        .map(|list| list.names().into_iter().map(String::from).collect())
}

#[test]
fn test_self_sees_fields_and_inherited_members() {
    let temp_dir = project();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("src/game/Player.lua");

    let names = query(&registry, &file, PLAYER, "self.").unwrap();
    assert_eq!(
        names,
        vec!["alive", "destroy", "height", "init", "jump", "mix", "update"]
    );
}

#[test]
fn test_class_prefix_offers_functions_only() {
    let temp_dir = project();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let root = temp_dir.path();
    let player = write(root, "src/game/Player.lua", PLAYER);
    registry.reindex_file(&player).unwrap();

    let app = root.join("src/app.lua");
    let buffer = "local Player = require(\"game.Player\")\nPlayer:";
    let names = query(&registry, &app, buffer, "Player:").unwrap();

    assert_eq!(names, vec!["destroy", "init", "jump", "mix", "update"]);
}

#[test]
fn test_alias_resolves_module_members() {
    let temp_dir = project();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("src/main.lua");

    let buffer = "local b = require(\"lib.b\")\nb.";
    let query = Query {
        file_path: &file,
        buffer,
        cursor: buffer.len(),
        prefix: "b.",
    };
    let list = registry.query(&query).unwrap();

    assert_eq!(
        list.pairs(),
        vec![
            ("VERSION\tvariable".to_string(), "VERSION".to_string()),
            ("Widget\tclass".to_string(), "Widget".to_string()),
            ("helper\tfunction".to_string(), "helper($0x, y)".to_string()),
        ]
    );
    assert!(list.inhibit_word_completions);
    assert!(!list.inhibit_explicit_completions);
}

#[test]
fn test_cyclic_bases_terminate() {
    let temp_dir = project();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("src/main.lua");

    let buffer = "local A = require(\"cyc.A\")\nA.";
    let names = query(&registry, &file, buffer, "A.").unwrap();
    assert_eq!(names, vec!["fromA", "fromB"]);
}

#[test]
fn test_builtin_namespace_without_project_files() {
    let temp_dir = TempDir::new().unwrap();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("scratch.lua");

    let names = query(&registry, &file, "math.", "math.").unwrap();
    assert!(names.contains(&"floor".to_string()));
    assert!(names.contains(&"pi".to_string()));

    // Outside every project as well.
    let names = query(&registry, Path::new("/elsewhere/x.lua"), "", "string.").unwrap();
    assert!(names.contains(&"format".to_string()));
}

#[test]
fn test_global_root() {
    let temp_dir = project();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("src/main.lua");

    let names = query(&registry, &file, "_G.", "_G.").unwrap();
    assert!(names.contains(&"print".to_string()));
    assert!(names.contains(&"math".to_string()));
}

#[test]
fn test_unknown_and_malformed_prefixes() {
    let temp_dir = project();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("src/main.lua");

    assert!(query(&registry, &file, "x.", "nothing.").is_none());
    assert!(query(&registry, &file, "", "plain").is_none());
    assert!(query(&registry, &file, "", "a.b.").is_none());
    // `self` outside of any method has no enclosing class.
    assert!(query(&registry, &file, "self.", "self.").is_none());
}

#[test]
fn test_missing_configuration_degrades_to_none() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        ".luadex/settings.toml",
        "[indexing]\nsource_roots = []\n",
    );
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("main.lua");

    let buffer = "local b = require(\"lib.b\")\nb.";
    assert!(query(&registry, &file, buffer, "b.").is_none());
    assert!(query(&registry, &file, "", "table.").is_some());
}

#[test]
fn test_resolve_at_reads_prefix_from_buffer() {
    let temp_dir = project();
    let mut project = ProjectIndexer::load(temp_dir.path()).unwrap();
    let file = temp_dir.path().join("src/main.lua");

    let buffer = "local b = require(\"lib.b\")\nlocal v = b.";
    let list = QueryResolver::resolve_at(&mut project, &file, buffer, buffer.len()).unwrap();
    assert_eq!(list.names(), vec!["VERSION", "Widget", "helper"]);
    assert!(project.is_indexed());
}

#[test]
fn test_require_path_completion() {
    let temp_dir = project();
    let registry = ProjectRegistry::new([temp_dir.path()]);
    let file = temp_dir.path().join("src/main.lua");

    let list = registry
        .complete_require(&file, "local x = require(\"core.")
        .unwrap();
    assert_eq!(
        list.pairs(),
        vec![
            ("Base\tmodule".to_string(), "Base".to_string()),
            ("Mixin\tmodule".to_string(), "Mixin".to_string()),
        ]
    );
    assert!(list.inhibit_explicit_completions);

    let list = registry.complete_require(&file, "require('").unwrap();
    assert_eq!(
        list.names(),
        vec!["core", "cyc", "lib"]
    );

    assert!(registry.complete_require(&file, "print(\"core.").is_none());
}

#[test]
fn test_query_buffer_replaces_indexed_module() {
    let temp_dir = project();
    let mut project = ProjectIndexer::load(temp_dir.path()).unwrap();
    project.generate().unwrap();
    assert!(project.table().has_class("core.Base.Base"));

    // Unsaved edit: the class is renamed and `destroy` is gone.
    let file = temp_dir.path().join("src/core/Base.lua");
    let buffer = "Core = class(nil, nil)\n\nfunction Core:init()\nend\n\nCore.";
    let list = QueryResolver::resolve_at(&mut project, &file, buffer, buffer.len()).unwrap();
    assert_eq!(list.names(), vec!["init"]);

    let table = project.table();
    let module = table.get("core.Base").unwrap();
    assert!(module.contains("Core", SymbolKind::Class));
    assert!(!module.contains("Base", SymbolKind::Class));
    assert!(!table.has_class("core.Base.Base"));
    assert!(table.get("core.Base.Base").is_none());
    assert!(table.has_class("core.Base.Core"));
}

#[test]
fn test_builtin_query_does_not_index_project() {
    let temp_dir = project();
    let file = temp_dir.path().join("src/main.lua");
    let query = Query {
        file_path: &file,
        buffer: "math.",
        cursor: 5,
        prefix: "math.",
    };

    let mut project = ProjectIndexer::load(temp_dir.path()).unwrap();
    assert!(QueryResolver::resolve(&mut project, &query).is_some());
    assert!(!project.is_indexed());
    assert_eq!(project.table().module_count(), 0);

    let registry = ProjectRegistry::new([temp_dir.path()]);
    assert!(registry.query(&query).is_some());
    let loaded = registry.project(temp_dir.path()).unwrap();
    assert!(!loaded.read().is_indexed());
}

#[test]
fn test_file_outside_source_roots_does_not_index() {
    let temp_dir = project();
    let mut project = ProjectIndexer::load(temp_dir.path()).unwrap();
    let file = temp_dir.path().join("scripts/tool.lua");

    let buffer = "local b = require(\"lib.b\")\nb.";
    assert!(QueryResolver::resolve_at(&mut project, &file, buffer, buffer.len()).is_none());
    assert!(!project.is_indexed());
}

#[test]
fn test_implement_with_transitive_bases() {
    let temp_dir = project();
    let root = temp_dir.path();
    write(
        root,
        "src/streams/Root.lua",
        "Root = class(nil, nil)\nfunction Root:close()\nend\n",
    );
    write(
        root,
        "src/streams/Base.lua",
        "local Root = require(\"streams.Root\")\nBase = class(nil, Root)\nfunction Base:open(path)\nend\n",
    );
    write(
        root,
        "src/streams/IReadable.lua",
        "IReadable = class(nil, nil)\nfunction IReadable:read(n)\nend\n",
    );
    write(
        root,
        "src/streams/IWritable.lua",
        "IWritable = class(nil, nil)\nfunction IWritable:write(data)\nend\n",
    );
    write(
        root,
        "src/streams/Foo.lua",
        r#"local Base = require("streams.Base")
local IReadable = require("streams.IReadable")
local IWritable = require("streams.IWritable")

Foo = class(nil, Base)
implement(Foo, IReadable, IWritable)

function Foo:flush()
    self.dirty = false
end
"#,
    );

    let mut project = ProjectIndexer::load(root).unwrap();
    project.generate().unwrap();

    let mut bases: Vec<String> = InheritanceResolver::new(project.table())
        .collect_bases("streams.Foo.Foo")
        .into_iter()
        .collect();
    bases.sort();
    assert_eq!(
        bases,
        vec![
            "streams.Base.Base",
            "streams.Foo.Foo",
            "streams.IReadable.IReadable",
            "streams.IWritable.IWritable",
            "streams.Root.Root",
        ]
    );

    let file = root.join("src/main.lua");
    let buffer = "local Foo = require(\"streams.Foo\")\nFoo:";
    let list = QueryResolver::resolve_at(&mut project, &file, buffer, buffer.len()).unwrap();
    assert_eq!(list.names(), vec!["close", "flush", "open", "read", "write"]);
}
