// GpioConsole - Build Script
//
// Injects version and build time strings reported by the `version` command.

use std::process::Command;

fn main() {
    // ESP-IDF environment setup (MUST be first!)
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    // Get git version info
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = command_output("git", &["rev-parse", "--short", "HEAD"]);
    let build_time = command_output("date", &["-u", "+%b %e %Y %H:%M:%S"]);

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=VERSION_STRING=GpioConsole v{}-g{}", version, git_hash);
    println!("cargo:rustc-env=BUILD_TIME={}", build_time);

    // Rebuild if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}

fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
