fn main() -> Result<(), eframe::Error> {
    // Set up logging, filtered through RUST_LOG
    env_logger::init();

    // Run the floor-map application
    floormap_tool::run_app()
}
