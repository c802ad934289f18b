use std::env;

fn main() {
    // Store binding defaults, overridable from the build environment

    // Partition label (default: nvs)
    if let Ok(partition) = env::var("NVS_PARTITION") {
        println!("cargo:rustc-env=NVS_PARTITION={}", partition);
        println!(
            "cargo:warning=Using NVS_PARTITION from environment: {}",
            partition
        );
    } else {
        println!("cargo:rustc-env=NVS_PARTITION=nvs");
    }

    // Namespace (default: storage)
    if let Ok(namespace) = env::var("NVS_NAMESPACE") {
        println!("cargo:rustc-env=NVS_NAMESPACE={}", namespace);
        println!(
            "cargo:warning=Using NVS_NAMESPACE from environment: {}",
            namespace
        );
    } else {
        println!("cargo:rustc-env=NVS_NAMESPACE=storage");
    }

    // Info logging of successful mutations (default: true)
    if let Ok(debug) = env::var("NVS_DEBUG") {
        println!("cargo:rustc-env=NVS_DEBUG={}", debug);
        println!("cargo:warning=Using NVS_DEBUG from environment: {}", debug);
    } else {
        println!("cargo:rustc-env=NVS_DEBUG=true");
    }

    println!("cargo:rerun-if-env-changed=NVS_PARTITION");
    println!("cargo:rerun-if-env-changed=NVS_NAMESPACE");
    println!("cargo:rerun-if-env-changed=NVS_DEBUG");
}
