//! Build script - places the nRF52840 + S140 linker script where the
//! linker can find it.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // memory.x reserves the SoftDevice flash/RAM regions.
    fs::copy("memory.x", out_dir.join("memory.x")).expect("memory.x must exist at the crate root");

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
