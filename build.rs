fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // Stamp the build day for `garmentcad --version`
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
