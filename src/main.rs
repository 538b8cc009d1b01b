fn main() -> Result<(), Box<dyn std::error::Error>> {
    tapedeck::runtime::run()
}
