//! Generates the protobuf message types for the metadata resource and the
//! parsed phone number from `resources/*.proto`.
//!
//! The pure-Rust parser of `protobuf-codegen` is used, so no `protoc`
//! installation is required.

const PROTO_FILES: [&str; 2] = [
    "resources/phonemetadata.proto",
    "resources/phonenumber.proto",
];

fn main() {
    for proto in PROTO_FILES {
        println!("cargo:rerun-if-changed={}", proto);
    }
    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["resources"])
        .inputs(PROTO_FILES)
        .cargo_out_dir("proto_gen")
        .run_from_script();
}
