fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host-target test builds run without the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
