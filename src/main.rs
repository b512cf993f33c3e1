fn main() {
    if let Err(err) = player_profiles::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
