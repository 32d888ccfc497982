//! Puts `memory.x` in the linker search path, and encodes `keyboard_config.json` into the config
//! blob embedded in the firmware.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");

    let config_path = Path::new(&env::var_os("CARGO_MANIFEST_DIR").unwrap()).join("keyboard_config.json");
    println!("cargo:rerun-if-changed={}", config_path.display());
    let config = match macropad_config::load_config_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => panic!("{}", e),
    };
    let bytes = macropad_config::encode_config(&config).unwrap();
    File::create(out.join("macropad_config.bin"))
        .unwrap()
        .write_all(&bytes)
        .unwrap();

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
