use ck_domain::config::{Config, ConfigSeverity};

use crate::bootstrap::{process_env, resolve_settings};
use crate::state::BrokerSettings;

/// Run all diagnostic checks and print a summary.
///
/// Returns `Ok(true)` when every check passes, `Ok(false)` when at least
/// one check failed.  A missing fallback workflow only warns: requests can
/// still name their own.
pub async fn run(config: &Config, config_path: &str) -> anyhow::Result<bool> {
    println!("chatkit-broker doctor");
    println!("=====================\n");

    let mut all_passed = true;
    let settings = resolve_settings(config, process_env);

    // 1. Config file
    check_config_file(config_path, &mut all_passed);

    // 2. Config validation
    check_config_validation(config, &mut all_passed);

    // 3. Upstream credential
    check_api_key(&settings, &mut all_passed);

    // 4. Fallback workflow
    check_default_workflow(config, &settings);

    // 5. Upstream reachability
    check_upstream(&settings, &mut all_passed).await;

    // 6. Cookie policy
    print_check(
        "Identity cookie",
        true,
        if settings.secure_cookies {
            "Secure (production)".into()
        } else {
            "not Secure (non-production)".into()
        },
    );

    println!();
    if all_passed {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Review the output above.");
    }

    Ok(all_passed)
}

// ── Individual checks ─────────────────────────────────────────────────

fn check_config_file(config_path: &str, all_passed: &mut bool) {
    let exists = std::path::Path::new(config_path).exists();
    print_check(
        "Config file exists",
        exists,
        if exists {
            config_path.to_owned()
        } else {
            format!("{config_path} not found (using defaults)")
        },
    );
    if !exists {
        *all_passed = false;
    }
}

fn check_config_validation(config: &Config, all_passed: &mut bool) {
    let issues = config.validate();
    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();

    if issues.is_empty() {
        print_check("Config validation", true, "no issues".into());
        return;
    }

    print_check(
        "Config validation",
        error_count == 0,
        format!("{} issue(s) ({} error(s))", issues.len(), error_count),
    );
    for issue in &issues {
        println!("      {issue}");
    }
    if error_count > 0 {
        *all_passed = false;
    }
}

fn check_api_key(settings: &BrokerSettings, all_passed: &mut bool) {
    let ok = settings.api_key.is_some();
    print_check(
        "Upstream API key",
        ok,
        if ok {
            format!("{} is set", settings.api_key_env)
        } else {
            format!("{} is not set", settings.api_key_env)
        },
    );
    if !ok {
        *all_passed = false;
    }
}

fn check_default_workflow(config: &Config, settings: &BrokerSettings) {
    match &settings.default_workflow_id {
        Some(wf) => print_check("Fallback workflow", true, wf.clone()),
        None => println!(
            "  [WARN] Fallback workflow: none (checked {} and chatkit.workflow_id)",
            config.chatkit.workflow_id_envs.join(", ")
        ),
    }
}

async fn check_upstream(settings: &BrokerSettings, all_passed: &mut bool) {
    let url = &settings.api_base;
    let reachable = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
    {
        Ok(client) => client.get(url).send().await.is_ok(),
        Err(_) => false,
    };

    print_check(
        "Upstream reachable",
        reachable,
        if reachable {
            url.clone()
        } else {
            format!("{url} (unreachable)")
        },
    );

    if !reachable {
        *all_passed = false;
    }
}

// ── Formatting helper ─────────────────────────────────────────────────

fn print_check(name: &str, passed: bool, detail: String) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("  [{status}] {name}: {detail}");
}
