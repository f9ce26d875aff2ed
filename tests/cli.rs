use assert_cmd::prelude::*;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

fn write_requirements(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("requirements.txt");
    fs::write(&path, contents).expect("failed to write requirements");
    path
}

/// Binary with every user-level input pinned inside `temp`
fn zombie_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("zombie-detector"));
    cmd.env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("ZOMBIE_CACHE_FILE", temp.path().join("github_cache.json"))
        .env_remove("ZOMBIE_CONFIG")
        .env_remove("ZOMBIE_FORMAT")
        .env_remove("ZOMBIE_NO_CACHE")
        .env_remove("ZOMBIE_THRESHOLD_DAYS")
        .env_remove("GITHUB_TOKEN")
        .env("NO_COLOR", "1");
    cmd
}

fn pypi_body(repo_url: &str) -> String {
    format!(
        r#"{{"info": {{"project_urls": {{"Documentation": "https://docs.example.org", "Source": "{repo_url}"}}, "home_page": null}}}}"#
    )
}

fn repo_body(days_ago: i64) -> String {
    format!(
        r#"{{"full_name": "owner/repo", "pushed_at": "{}"}}"#,
        (Utc::now() - Duration::days(days_ago)).to_rfc3339()
    )
}

#[test]
fn missing_requirements_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    zombie_cmd(&temp)
        .arg(temp.path().join("nope.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Requirements file not found"));

    Ok(())
}

#[test]
fn empty_requirements_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let reqs = write_requirements(temp.path(), "# nothing pinned yet\n\n");

    zombie_cmd(&temp)
        .arg(&reqs)
        .assert()
        .success()
        .stderr(predicate::str::contains("No packages found"));

    Ok(())
}

#[test]
fn missing_explicit_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let reqs = write_requirements(temp.path(), "requests\n");

    zombie_cmd(&temp)
        .arg(&reqs)
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));

    Ok(())
}

#[test]
fn cache_path_honors_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let expected = temp.path().join("github_cache.json");

    zombie_cmd(&temp)
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn cache_status_and_clear() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let now = Utc::now();
    let cache = format!(
        r#"{{
            "k1": {{"pushed_at": "{}", "cached_at": "{}", "url": "https://github.com/a/b"}},
            "k2": {{"pushed_at": null, "cached_at": "{}", "url": "https://github.com/c/d"}}
        }}"#,
        (now - Duration::days(3)).to_rfc3339(),
        now.to_rfc3339(),
        (now - Duration::days(2)).to_rfc3339(),
    );
    fs::write(temp.path().join("github_cache.json"), cache)?;

    let assert = zombie_cmd(&temp)
        .args(["cache", "status", "--format", "json"])
        .assert()
        .success();
    let status: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(status["total_entries"], 2);
    assert_eq!(status["valid_entries"], 1);
    assert_eq!(status["expired_entries"], 1);

    zombie_cmd(&temp)
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 cache entries"));

    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    zombie_cmd(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zombie-detector"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn zombie_package_fails_run_and_is_cached() -> Result<(), Box<dyn std::error::Error>> {
    let mut pypi = mockito::Server::new();
    let mut github = mockito::Server::new();

    let _pkg = pypi
        .mock("GET", "/pypi/oldpkg/json")
        .with_status(200)
        .with_body(pypi_body("https://github.com/owner/repo.git"))
        .create();
    let repo = github
        .mock("GET", "/repos/owner/repo")
        .with_status(200)
        .with_body(repo_body(800))
        .expect(1)
        .create();

    let temp = tempdir()?;
    let reqs = write_requirements(temp.path(), "oldpkg==1.0\n");

    let assert = zombie_cmd(&temp)
        .arg(&reqs)
        .args(["--format", "json"])
        .env("ZOMBIE_PYPI_URL", pypi.url())
        .env("ZOMBIE_GITHUB_API_URL", github.url())
        .assert()
        .failure()
        .code(1);

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    let result = &report["data"]["results"][0];
    assert_eq!(result["package"], "oldpkg");
    assert_eq!(result["status"], "WARNING");
    assert_eq!(result["repository"], "https://github.com/owner/repo");
    assert_eq!(result["days_since_activity"], 800);
    assert_eq!(report["data"]["summary"]["warning"], 1);

    // Second run is served from the cache file
    zombie_cmd(&temp)
        .arg(&reqs)
        .args(["--format", "json"])
        .env("ZOMBIE_PYPI_URL", pypi.url())
        .env("ZOMBIE_GITHUB_API_URL", github.url())
        .assert()
        .code(1);

    repo.assert();
    assert!(temp.path().join("github_cache.json").exists());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn healthy_package_passes_with_table_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut pypi = mockito::Server::new();
    let mut github = mockito::Server::new();

    let _pkg = pypi
        .mock("GET", "/pypi/requests/json")
        .with_status(200)
        .with_body(pypi_body("https://github.com/owner/repo"))
        .create();
    let _repo = github
        .mock("GET", "/repos/owner/repo")
        .with_status(200)
        .with_body(repo_body(5))
        .create();

    let temp = tempdir()?;
    let reqs = write_requirements(temp.path(), "requests>=2\n");

    zombie_cmd(&temp)
        .arg(&reqs)
        .arg("--no-cache")
        .env("ZOMBIE_PYPI_URL", pypi.url())
        .env("ZOMBIE_GITHUB_API_URL", github.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("SAFE"))
        .stdout(predicate::str::contains("1 packages checked"))
        .stderr(predicate::str::contains("GITHUB_TOKEN not set"));

    assert!(!temp.path().join("github_cache.json").exists());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn validate_mode_never_calls_github() -> Result<(), Box<dyn std::error::Error>> {
    let mut pypi = mockito::Server::new();
    let mut github = mockito::Server::new();

    let _known = pypi
        .mock("GET", "/pypi/requests/json")
        .with_status(200)
        .with_body(r#"{"info": {"project_urls": null, "home_page": null}}"#)
        .create();
    let _ghost = pypi
        .mock("GET", "/pypi/ghost-pkg/json")
        .with_status(404)
        .create();
    let untouched = github
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create();

    let temp = tempdir()?;
    let reqs = write_requirements(temp.path(), "requests\nghost-pkg\n");

    let assert = zombie_cmd(&temp)
        .arg(&reqs)
        .args(["--validate", "--format", "json"])
        .env("ZOMBIE_PYPI_URL", pypi.url())
        .env("ZOMBIE_GITHUB_API_URL", github.url())
        .assert()
        .code(1);

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["data"]["results"][0]["status"], "SKIPPED");
    assert_eq!(report["data"]["results"][1]["status"], "INVALID");
    assert_eq!(
        report["data"]["results"][1]["reason"],
        "Package not found on PyPI"
    );

    untouched.assert();

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn markdown_report_for_unresolvable_package() -> Result<(), Box<dyn std::error::Error>> {
    let mut pypi = mockito::Server::new();
    let github = mockito::Server::new();

    let _pkg = pypi
        .mock("GET", "/pypi/nolink/json")
        .with_status(200)
        .with_body(r#"{"info": {"project_urls": {"Homepage": "https://nolink.example.org"}, "home_page": null}}"#)
        .create();

    let temp = tempdir()?;
    let reqs = write_requirements(temp.path(), "nolink\n");

    zombie_cmd(&temp)
        .arg(&reqs)
        .args(["--format", "markdown"])
        .env("ZOMBIE_PYPI_URL", pypi.url())
        .env("ZOMBIE_GITHUB_API_URL", github.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("# Dependency Health Report"))
        .stdout(predicate::str::contains("UNKNOWN"))
        .stdout(predicate::str::contains("No GitHub repository found"));

    Ok(())
}
