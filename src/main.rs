fn main() {
    wfconf::app::cli::run();
}
