use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let rev = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok());
    if let Some(rev) = rev {
        let rev = rev.trim();
        if !rev.is_empty() {
            println!("cargo:rustc-env=BUILD_REV={rev}");
        }
    }
}
