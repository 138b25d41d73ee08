include!(concat!(env!("OUT_DIR"), "/proto_gen/mod.rs"));
