//! Build script - stages the SoftDevice-aware linker script.
//!
//! `memory.x` carves the flash/RAM regions around the S140; the copy
//! into OUT_DIR lets the linker pick it up without a workspace-relative
//! search path.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    fs::copy("memory.x", out_dir.join("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
