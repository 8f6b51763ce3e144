// File: crates/kbar-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // DirectWrite font enumeration goes through the registry APIs.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
