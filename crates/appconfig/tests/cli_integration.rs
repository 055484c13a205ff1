//! Integration tests for the appconfig commands against a real directory.
//!
//! Each test builds the same `ConfigStore` the binary would build, runs one or
//! more commands through `appconfig::execute`, and checks stdout plus the file
//! on disk.  The synchronous tests use `tokio_test::block_on` the way a
//! non-async caller embedding the commands would.

use std::path::{Path, PathBuf};

use appconfig::{execute, load_options, Command, Outcome};
use config_store::{ConfigStore, FileBackend, WriteStrategy};
use uuid::Uuid;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("appconfig_it_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        Self(dir)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

async fn run(store: &mut ConfigStore<FileBackend>, command: Command) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = execute(store, &command, &mut out).await.expect("execute");
    (outcome, String::from_utf8(out).expect("utf-8 output"))
}

fn set(key: &str, value: &str) -> Command {
    Command::Set {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn get(key: &str, default: Option<&str>) -> Command {
    Command::Get {
        key: key.to_string(),
        default: default.map(str::to_string),
    }
}

#[test]
fn test_set_persists_typed_values_to_disk() {
    tokio_test::block_on(async {
        // Arrange
        let dir = TempDir::new();
        let mut store = ConfigStore::open(dir.path());

        // Act
        run(&mut store, set("theme", "dark")).await;
        run(&mut store, set("count", "5")).await;
        run(&mut store, set("beta", "false")).await;

        // Assert
        let text = std::fs::read_to_string(dir.path().join("AppConfig.json")).unwrap();
        assert_eq!(
            text,
            "{\n  \"theme\": \"dark\",\n  \"count\": 5,\n  \"beta\": false\n}"
        );
    });
}

#[test]
fn test_values_survive_a_new_process() {
    tokio_test::block_on(async {
        let dir = TempDir::new();
        let mut first = ConfigStore::open(dir.path());
        run(&mut first, set("window", r#"{"w":800}"#)).await;

        // A second invocation builds a fresh store on the same directory.
        let mut second = ConfigStore::open(dir.path());
        let (outcome, out) = run(&mut second, get("window", None)).await;

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(out, "{\"w\":800}\n");
    });
}

#[test]
fn test_list_on_fresh_directory_creates_file() {
    tokio_test::block_on(async {
        let dir = TempDir::new();
        let mut store = ConfigStore::open(dir.path());

        let (_, out) = run(&mut store, Command::List).await;

        assert_eq!(out, "{}\n");
        assert!(dir.path().join("AppConfig.json").exists());
    });
}

#[tokio::test]
async fn test_options_file_selects_name_and_strategy() {
    // Arrange
    let dir = TempDir::new();
    let options_path = dir.path().join("store.toml");
    std::fs::write(
        &options_path,
        "file_name = \"Settings.json\"\nwrite_strategy = \"overwrite\"\nindent = 4\n",
    )
    .unwrap();

    // Act
    let options = load_options(Some(&options_path), None).await.unwrap();
    let mut store = ConfigStore::with_options(dir.path(), options);
    run(&mut store, set("a", "1")).await;

    // Assert
    assert_eq!(store.backend().strategy(), WriteStrategy::Overwrite);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Settings.json")).unwrap(),
        "{\n    \"a\": 1\n}"
    );
}

#[tokio::test]
async fn test_file_flag_overrides_options_file() {
    let dir = TempDir::new();
    let options_path = dir.path().join("store.toml");
    std::fs::write(&options_path, "file_name = \"FromToml.json\"\n").unwrap();

    let options = load_options(Some(&options_path), Some("FromFlag.json")).await.unwrap();

    assert_eq!(options.file_name, "FromFlag.json");
}

#[tokio::test]
async fn test_invalid_options_file_is_error() {
    let dir = TempDir::new();
    let options_path = dir.path().join("store.toml");
    std::fs::write(&options_path, "indent = \"wide\"\n").unwrap();

    let err = load_options(Some(&options_path), None).await.unwrap_err();

    assert!(err.to_string().contains("invalid options file"), "{err:#}");
}

#[tokio::test]
async fn test_corrupt_file_lists_empty_and_set_repairs_it() {
    let dir = TempDir::new();
    let file = dir.path().join("AppConfig.json");
    std::fs::write(&file, "not json at all").unwrap();
    let mut store = ConfigStore::open(dir.path());

    let (outcome, out) = run(&mut store, Command::List).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, "{}\n");

    run(&mut store, set("fixed", "true")).await;
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "{\n  \"fixed\": true\n}"
    );
}

#[tokio::test]
async fn test_set_into_missing_directory_reports_error() {
    let dir = TempDir::new();
    let mut store = ConfigStore::open(dir.path().join("missing"));

    let mut out = Vec::new();
    let result = execute(&mut store, &set("a", "1"), &mut out).await;

    assert!(result.is_err());
}
