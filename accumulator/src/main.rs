fn main() {
    // Silent unless RUST_LOG asks for output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    accumulator::entry_point();
}
