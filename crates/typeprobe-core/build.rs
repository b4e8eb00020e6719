//! Build script for typeprobe-core
//!
//! Checks the toolchain before compilation:
//! - Minimum Rust version (1.70.0, for `Option::is_some_and`)

fn main()
{
    println!("cargo:rerun-if-changed=build.rs");

    // If we can't get the version (e.g., in some build environments), just warn
    let Ok(rustc_version) = rustc_version::version() else {
        println!("cargo:warning=could not verify Rust version");
        return;
    };

    let min_rust_version = rustc_version::Version::new(1, 70, 0);
    assert!(
        rustc_version >= min_rust_version,
        "typeprobe-core requires Rust {min_rust_version} or newer, found {rustc_version}"
    );
}
