use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // askama embeds templates at compile time; cargo scans a directory path recursively
    println!("cargo:rerun-if-changed=templates");
    println!("cargo:rerun-if-changed=build.rs");

    let build_id = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs().to_string(),
        Err(_) => "dev".to_string(),
    };
    println!("cargo:rustc-env=HUMAN_SHUFFLE_BUILD_ID={build_id}");
}
