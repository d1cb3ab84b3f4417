//! Integration tests for ratecache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const STATIC_CONFIG: &str = r#"
[cache]
capacity = 4

[provider]
kind = "static"

[rates]
"USD/EUR" = 0.5
"USD/GBP" = 0.25
"#;

    fn ratecache() -> Command {
        let mut cmd = cargo_bin_cmd!("ratecache");
        cmd.env_remove("RATECACHE_CONFIG");
        cmd
    }

    /// Write a static-provider config and return its path
    fn static_config(temp: &TempDir) -> PathBuf {
        let path = temp.path().join("config.toml");
        std::fs::write(&path, STATIC_CONFIG).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        ratecache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("cached currency conversion"));
    }

    #[test]
    fn version_displays() {
        ratecache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("ratecache"));
    }

    #[test]
    fn convert_with_static_rates() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["convert", "100", "USD", "EUR", "--format", "plain"])
            .assert()
            .success()
            .stdout("50.00\n");
    }

    #[test]
    fn convert_uses_inverse_rate() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["convert", "10", "gbp", "usd", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""converted":40.0"#))
            .stdout(predicate::str::contains(r#""provider":"static""#));
    }

    #[test]
    fn convert_unknown_pair_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["convert", "1", "EUR", "JPY"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No exchange rate available for EUR/JPY"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn invalid_currency_rejected() {
        ratecache()
            .args(["convert", "1", "DOLLARS", "EUR"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid currency code"));
    }

    #[test]
    fn capacity_out_of_range() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["--capacity", "2", "convert", "1", "USD", "EUR"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid cache capacity 2"));
    }

    #[test]
    fn batch_from_stdin() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["batch", "--format", "plain"])
            .write_stdin("# requests\n100 USD EUR\n100 USD GBP\nrefresh USD EUR\n20 USD EUR\n")
            .assert()
            .success()
            .stdout("50.00\n25.00\n10.00\n");
    }

    #[test]
    fn batch_reports_cache_summary() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .arg("batch")
            .write_stdin("1 USD EUR\n2 USD EUR\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("1/4 pairs cached, 1 hits, 1 misses"));
    }

    #[test]
    fn batch_failure_exits_nonzero() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["batch", "--format", "plain"])
            .write_stdin("1 USD EUR\nnot a request at all\n")
            .assert()
            .failure()
            .stdout("0.50\n")
            .stderr(predicate::str::contains("Batch line 2"))
            .stderr(predicate::str::contains("1 of 2 batch requests failed"));
    }

    #[test]
    fn http_provider_requires_api_key() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(
            &config,
            "[provider]\nkind = \"http\"\napi_key_env = \"RATECACHE_IT_NO_SUCH_KEY\"\n",
        )
        .unwrap();

        ratecache()
            .env_remove("RATECACHE_IT_NO_SUCH_KEY")
            .arg("--config")
            .arg(&config)
            .args(["convert", "1", "USD", "EUR"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("RATECACHE_IT_NO_SUCH_KEY"));
    }

    #[test]
    fn config_path() {
        ratecache()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn verbose_logs_config_source() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("-vv")
            .arg("--config")
            .arg(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Loaded config from"));
    }

    #[test]
    fn unknown_log_format_rejected() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "[general]\nlog_format = \"yaml\"\n").unwrap();

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["config", "path"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration at"))
            .stderr(predicate::str::contains("yaml"));
    }

    #[test]
    fn config_capacity_out_of_range() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "[cache]\ncapacity = 2\n").unwrap();

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["convert", "1", "USD", "EUR"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration at"))
            .stderr(predicate::str::contains("cache.capacity = 2"));
    }

    #[test]
    fn convert_overflow_rejected() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["convert", "1e308", "EUR", "USD"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid amount"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        let config = static_config(&temp);

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("kind = \"static\""));
    }

    #[test]
    fn config_init_creates_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("fresh").join("config.toml");

        ratecache()
            .arg("--config")
            .arg(&config)
            .args(["config", "init"])
            .assert()
            .success();

        let written = std::fs::read_to_string(&config).unwrap();
        assert!(written.contains("capacity = 16"));
    }

    #[test]
    fn completions_generate() {
        ratecache()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ratecache"));
    }
}
