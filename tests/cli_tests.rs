//! End-to-end tests for the addoncat CLI
//!
//! These tests verify:
//! - The pending-changes log is edited through the `changes` subcommands
//! - `check` reads the persisted update cache without touching the network
//! - URL builders work offline
//! - Exit codes for missing configuration

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

fn addoncat(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("addoncat").unwrap();
    cmd.env_remove("ADDONCAT_BASE_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

/// Serves one canned 200 response per connection on a background thread
fn serve(bodies: Vec<&'static str>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        for body in bodies {
            let (mut socket, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).unwrap();
        }
    });

    (base, handle)
}

mod changes {
    use super::*;

    #[test]
    fn test_install_then_list() {
        let dir = tempfile::tempdir().unwrap();

        addoncat(&dir)
            .args(["changes", "install", "org.demo"])
            .assert()
            .success();

        let written = fs::read_to_string(dir.path().join("addons_update").join("changes.cfg")).unwrap();
        assert_eq!(written, "INSTALL_ADDON:org.demo\r\n");

        addoncat(&dir)
            .args(["changes", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Install addons:"))
            .stdout(predicate::str::contains("- org.demo"));
    }

    #[test]
    fn test_queueing_twice_keeps_one_entry() {
        let dir = tempfile::tempdir().unwrap();

        for _ in 0..2 {
            addoncat(&dir)
                .args(["changes", "remove-file", "plugins/old.jar"])
                .assert()
                .success();
        }

        let written = fs::read_to_string(dir.path().join("addons_update").join("changes.cfg")).unwrap();
        assert_eq!(written, "REMOVE_FILE:plugins/old.jar\r\n");
    }

    #[test]
    fn test_unreadable_changes_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addons_update").join("changes.cfg");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let original: &[u8] =
            b"INSTALL_ADDON:org.keep\r\nREMOVE_FILE:plugins/\xff.jar\r\nUPDATE_FILE:lib/a.jar\r\n";
        fs::write(&path, original).unwrap();

        for action in [
            vec!["changes", "install", "org.new"],
            vec!["changes", "discard", "install", "org.keep"],
            vec!["changes", "clear"],
        ] {
            addoncat(&dir)
                .args(&action)
                .assert()
                .failure()
                .code(1)
                .stderr(predicate::str::contains("untouched"));
        }

        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_discard_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("addons_update")).unwrap();
        fs::write(
            dir.path().join("addons_update").join("changes.cfg"),
            "UPDATE_FILE:lib/a.jar\r\nREMOVE_ADDON:org.old\r\n",
        )
        .unwrap();

        addoncat(&dir)
            .args(["--json", "changes", "discard", "update-file", "lib/a.jar"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"REMOVE_ADDON\""))
            .stdout(predicate::str::contains("lib/a.jar").not());

        addoncat(&dir)
            .args(["changes", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No pending changes"));

        let written = fs::read_to_string(dir.path().join("addons_update").join("changes.cfg")).unwrap();
        assert!(written.is_empty());
    }
}

mod check {
    use super::*;

    fn write_cache(dir: &TempDir) {
        fs::write(
            dir.path().join("available-updates.cfg"),
            "3\r\norg.demo:1.4.0\r\norg.other:2.0\r\n",
        )
        .unwrap();
    }

    #[test]
    fn test_check_reports_available_update() {
        let dir = tempfile::tempdir().unwrap();
        write_cache(&dir);

        let output = addoncat(&dir)
            .args(["--json", "check", "org.demo", "1.2.0"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["module_id"], "org.demo");
        assert_eq!(value["latest_version"], "1.4.0");
        assert_eq!(value["update_available"], true);
    }

    #[test]
    fn test_check_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        write_cache(&dir);

        addoncat(&dir)
            .args(["check", "org.other", "2.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("is up to date"));
    }

    #[test]
    fn test_check_without_cache() {
        let dir = tempfile::tempdir().unwrap();

        addoncat(&dir)
            .args(["check", "org.demo", "1.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("has no known update"));
    }
}

mod catalog {
    use super::*;

    #[test]
    fn test_download_url_offline() {
        let dir = tempfile::tempdir().unwrap();

        addoncat(&dir)
            .args([
                "--base-url",
                "https://addons.example.org/store",
                "url",
                "download",
                "a/a-1.0.zip",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "https://addons.example.org/store/download/?f=a/a-1.0.zip",
            ));
    }

    #[test]
    fn test_saved_updates_print_in_catalog_order() {
        let dir = tempfile::tempdir().unwrap();
        let (base, server) = serve(vec!["2", "zeta:1.0\nalpha:2.0\nzeta:1.1\n"]);

        let output = addoncat(&dir)
            .args(["--base-url", &base, "--json", "updates", "--save"])
            .output()
            .unwrap();
        server.join().unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let ids: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["module_id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["zeta", "alpha", "zeta"]);

        let cache = fs::read_to_string(dir.path().join("available-updates.cfg")).unwrap();
        assert_eq!(cache, "2\r\nalpha:2.0\r\nzeta:1.1\r\n");
    }

    #[test]
    fn test_catalog_command_requires_base_url() {
        let dir = tempfile::tempdir().unwrap();

        addoncat(&dir)
            .args(["deps", "org.demo"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let dir = tempfile::tempdir().unwrap();

        addoncat(&dir)
            .args(["--base-url", "not a url", "status", "1.0"])
            .assert()
            .failure()
            .code(1);
    }
}
