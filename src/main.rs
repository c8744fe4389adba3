fn main() {
    if let Err(err) = catalog_export::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
