use super::*;

#[test]
fn help_lists_all_commands() {
    let ctx = TestContext::new();
    let result = ctx.run(&["--help"]);

    assert_success(&result);
    assert!(result.stdout.contains("scan"));
    assert!(result.stdout.contains("session"));
    assert!(result.stdout.contains("config"));
}

#[test]
fn first_run_creates_the_global_config_with_defaults() {
    let ctx = TestContext::new();
    let result = ctx.run(&["config"]);

    assert_success(&result);

    let config_file = ctx.config_home().join("config.toml");
    assert!(
        config_file.exists(),
        "expected {} to be created",
        config_file.display()
    );

    let contents = std::fs::read_to_string(&config_file).expect("read config");
    assert!(contents.contains("api_key_env"));
    assert!(contents.contains("gemini-2.5-flash"));

    assert!(result.stdout.contains("gemini-2.5-flash"));
    assert!(result.stdout.contains("GEMINI_API_KEY"));
    assert!(result.stdout.contains("not set"));
}

#[test]
fn scan_refuses_to_run_without_a_credential() {
    let ctx = TestContext::new();
    let result = ctx.run(&["scan", "--url", "https://example.com"]);

    assert_failure(&result);
    assert!(
        result.stderr.contains("GEMINI_API_KEY"),
        "expected remediation naming the env var, got:\n{}",
        result.stderr
    );
    // the scan must not have been attempted
    assert!(!result.stdout.contains("Running security scan"));
}

#[test]
fn session_refuses_to_start_without_a_credential() {
    let ctx = TestContext::new();
    let result = ctx.run(&["session"]);

    assert_failure(&result);
    assert!(result.stderr.contains("GEMINI_API_KEY"));
}

#[test]
fn scan_requires_exactly_one_target() {
    let ctx = TestContext::new();

    let missing = ctx.run(&["scan"]);
    assert_failure(&missing);
    assert!(missing.stderr.contains("required"));

    let conflicting = ctx.run(&["scan", "--url", "https://a.com", "--text", "hello"]);
    assert_failure(&conflicting);
    assert!(conflicting.stderr.contains("cannot be used with"));
}

#[test]
fn config_masks_the_credential_value() {
    let ctx = TestContext::new();
    let result = ctx.run_with_key(&["config"], "AIzaSyExampleKey1234");

    assert_success(&result);
    assert!(result.stdout.contains("AIza...1234"));
    assert!(!result.stdout.contains("AIzaSyExampleKey1234"));
}
