use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=GYPSY_CONFIG");

    let wp_manifest_path = format!("{}/../Cargo.toml", env::var("CARGO_MANIFEST_DIR").unwrap());
    let gypsy_version =
        toml::from_str::<toml::Table>(&std::fs::read_to_string(&wp_manifest_path).unwrap())
            .unwrap()["workspace"]["metadata"]["version"]
            .as_str()
            .unwrap()
            .to_string();
    println!("cargo:rustc-env=GYPSY_VERSION={gypsy_version}");
    println!("cargo:rerun-if-env-changed=GYPSY_VERSION");
    println!("cargo:rerun-if-changed={wp_manifest_path}");
}
