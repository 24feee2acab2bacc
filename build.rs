use std::env;
use std::path::Path;
use std::process::Command;

/// Locate llvm-config for LLVM 18, preferring an explicit
/// LLVM_SYS_180_PREFIX over whatever is on PATH.
fn find_llvm_prefix() -> Option<String> {
    if let Ok(prefix) = env::var("LLVM_SYS_180_PREFIX") {
        return Some(prefix);
    }

    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &[
            "/opt/homebrew/opt/llvm@18/bin/llvm-config",
            "/usr/local/opt/llvm@18/bin/llvm-config",
            "llvm-config-18",
        ]
    } else {
        &["llvm-config-18", "llvm-config"]
    };

    for candidate in candidates {
        if candidate.contains('/') && !Path::new(candidate).exists() {
            continue;
        }
        if let Ok(output) = Command::new(candidate).arg("--prefix").output() {
            if output.status.success() {
                return Some(String::from_utf8_lossy(&output.stdout).trim().to_string());
            }
        }
    }

    None
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LLVM_SYS_180_PREFIX");

    match find_llvm_prefix() {
        Some(prefix) => {
            println!("cargo:rustc-env=LLVM_SYS_180_PREFIX={}", prefix);
        }
        None => {
            println!("cargo:warning=picc requires LLVM 18 to be installed.");
            println!("cargo:warning=On macOS: brew install llvm@18");
            println!("cargo:warning=On Ubuntu/Debian: apt-get install llvm-18-dev");
            println!("cargo:warning=Or set LLVM_SYS_180_PREFIX to your LLVM installation path");
        }
    }

    // LLVM itself is C++; link the platform C++ standard library
    if cfg!(target_os = "macos") {
        println!("cargo:rustc-link-lib=c++");
        println!("cargo:rustc-link-search=/opt/homebrew/lib");
        println!("cargo:rustc-link-search=/usr/local/lib");
    } else if cfg!(target_os = "linux") {
        println!("cargo:rustc-link-lib=stdc++");
    }
}
