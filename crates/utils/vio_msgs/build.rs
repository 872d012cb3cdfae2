fn main() -> Result<(), Box<dyn std::error::Error>> {
    capnpc::CompilerCommand::new()
        .src_prefix("capnp")
        .file("capnp/header.capnp")
        .file("capnp/image.capnp")
        .file("capnp/odometry3d.capnp")
        .run()?;
    println!("cargo:rerun-if-changed=capnp");
    Ok(())
}
